use anyhow::{Context, Result};
use clap::Parser;
use mht2html::{SimplifyReport, extract_html, simplify_with_report};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mht2html")]
#[command(about = "Convert an MHT web archive into minimal, portable HTML")]
#[command(version)]
struct Cli {
    /// MHT file to convert, or `-` for stdin
    input: PathBuf,

    /// Write the HTML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only extract the HTML part, without simplifying it
    #[arg(long)]
    extract_only: bool,

    /// Input is already HTML; only simplify it
    #[arg(long, conflicts_with = "extract_only")]
    from_html: bool,

    /// Print a JSON report of the simplification to stderr
    #[arg(long)]
    stats: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        error!(target = "mht2html", "conversion failed: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let input = read_input(&cli.input)?;

    let html = if cli.from_html {
        String::from_utf8_lossy(&input).into_owned()
    } else {
        extract_html(&input)
            .with_context(|| format!("Could not extract HTML from {}", cli.input.display()))?
    };

    let output = if cli.extract_only {
        html.into_bytes()
    } else {
        let (simplified, report) = simplify_with_report(&html);
        info!(
            "Simplified {} -> {} bytes ({:.1}% removed)",
            report.input_bytes,
            report.output_bytes,
            report.reduction_ratio() * 100.0
        );
        if cli.stats {
            print_report(&report)?;
        }
        simplified
    };

    write_output(cli.output.as_deref(), &output)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn print_report(report: &SimplifyReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    eprintln!("{json}");
    Ok(())
}
