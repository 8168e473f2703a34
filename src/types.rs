//! Report types produced by the simplification pipeline

use serde::{Deserialize, Serialize};

/// What one run of the simplifier did, rule by rule
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimplifyReport {
    /// Length of the HTML text handed to the simplifier, in bytes
    pub input_bytes: usize,

    /// Length of the simplified UTF-8 output, in bytes
    pub output_bytes: usize,

    /// One entry per rule, in pipeline order
    pub rules: Vec<RuleStat>,
}

/// Effect of a single rewrite rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleStat {
    /// Rule name, e.g. `span-unwrap`
    pub rule: String,

    /// Document length before the rule ran
    pub bytes_before: usize,

    /// Document length after the rule ran
    pub bytes_after: usize,

    /// Whether the rule altered the text (a same-length rewrite counts)
    pub changed: bool,
}

impl SimplifyReport {
    /// Fraction of the input removed by the pipeline. Growth (e.g. a
    /// synthesized skeleton around a tiny fragment) reports as 0.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }

        let removed = self.input_bytes.saturating_sub(self.output_bytes);
        removed as f64 / self.input_bytes as f64
    }

    /// Names of the rules that altered the text
    pub fn changed_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|stat| stat.changed)
            .map(|stat| stat.rule.as_str())
    }
}
