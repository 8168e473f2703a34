//! HTML simplification pipeline
//!
//! The document is treated as flat text and threaded through an ordered list
//! of pure rewrite rules. Order matters: later rules rely on earlier ones
//! having already removed or normalized content, and entity decoding runs
//! last so decoded `<`/`>` never reach a structural rule.

use crate::entities::decode_entities;
use crate::structure::{CHARSET_META, CHARSET_META_TAG, ensure_structure, head_interior};
use crate::types::{RuleStat, SimplifyReport};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// A named text-to-text rewrite
struct Rule {
    name: &'static str,
    apply: fn(&str) -> Cow<'_, str>,
}

const PIPELINE: &[Rule] = &[
    Rule { name: "xml-declarations", apply: strip_xml_declarations },
    Rule { name: "comments", apply: strip_comments },
    Rule { name: "style-script-blocks", apply: strip_style_and_script },
    Rule { name: "link-tags", apply: strip_links },
    Rule { name: "meta-tags", apply: strip_meta },
    Rule { name: "xmlns-attributes", apply: strip_xmlns },
    Rule { name: "span-unwrap", apply: unwrap_spans },
    Rule { name: "body-cn-quirk", apply: fix_body_cn },
    Rule { name: "presentation-attributes", apply: strip_presentation_attributes },
    Rule { name: "table-cells", apply: bare_table_cells },
    Rule { name: "table-border", apply: canonical_table_border },
    Rule { name: "paragraphs-divs", apply: bare_blocks },
    Rule { name: "office-paragraphs", apply: strip_office_paragraphs },
    Rule { name: "tag-repair", apply: repair_tags },
    Rule { name: "structure", apply: assure_structure },
    Rule { name: "charset-meta", apply: canonical_charset },
    Rule { name: "whitespace", apply: collapse_whitespace },
    Rule { name: "tag-boundary-whitespace", apply: trim_tag_whitespace },
    Rule { name: "entities", apply: decode_entities },
];

static XML_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<\?xml.*?\?>").unwrap());

// Also catches Word's downlevel-revealed `<![if !supportLists]>` / `<![endif]>`
// markers; the content between them stays.
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<!\[(?:if\b[^\]]*|endif)\]>").unwrap());

static STYLE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>|<script\b[^>]*>.*?</script\s*>").unwrap()
});

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*>").unwrap());

static META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<meta\b[^>]*>").unwrap());

static XMLNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s*\bxmlns(?::[\w-]+)?\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap()
});

static SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?span\b[^>]*>").unwrap());

static BODY_CN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body\s*-CN").unwrap());

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").unwrap());

static PRESENTATION_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+(?:style|class|id|mso-[\w-]+)\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+)"#)
        .unwrap()
});

static TABLE_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(td|tr)\b[^>]*>").unwrap());

static TABLE_BORDER_1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<table\b[^>]*?\sborder\s*=\s*["']?1\b["']?[^>]*>"#).unwrap()
});

static BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(p|div)\b[^>]*>").unwrap());

static OFFICE_P: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<o:p\b[^>]*>.*?</o:p\s*>").unwrap());

static SELF_CLOSING_VOID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(img|br|hr)\b([^>]*?)\s*/>").unwrap());

static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static TAG_EDGE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+>|<\s+").unwrap());

/// Simplify extracted HTML into a minimal UTF-8 document.
///
/// Never fails: any input, however malformed, yields a document with one
/// `<html>`, one `<head>` declaring UTF-8 and one `<body>`.
#[must_use]
pub fn simplify(html: &str) -> Vec<u8> {
    simplify_html(html).into_bytes()
}

/// Text-level form of [`simplify`]
#[must_use]
pub fn simplify_html(html: &str) -> String {
    run_pipeline(html, None)
}

/// Like [`simplify`], also reporting what each rule did
#[must_use]
pub fn simplify_with_report(html: &str) -> (Vec<u8>, SimplifyReport) {
    let mut stats = Vec::with_capacity(PIPELINE.len());
    let output = run_pipeline(html, Some(&mut stats));

    let report = SimplifyReport {
        input_bytes: html.len(),
        output_bytes: output.len(),
        rules: stats,
    };

    (output.into_bytes(), report)
}

fn run_pipeline(html: &str, mut stats: Option<&mut Vec<RuleStat>>) -> String {
    let mut doc = html.to_string();

    for rule in PIPELINE {
        let bytes_before = doc.len();
        let rewritten = match (rule.apply)(&doc) {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };
        let changed = rewritten.as_ref().is_some_and(|next| *next != doc);
        if let Some(next) = rewritten {
            doc = next;
        }

        trace!("Rule {}: {} -> {} bytes", rule.name, bytes_before, doc.len());

        if let Some(stats) = stats.as_deref_mut() {
            stats.push(RuleStat {
                rule: rule.name.to_string(),
                bytes_before,
                bytes_after: doc.len(),
                changed,
            });
        }
    }

    debug!("Simplified HTML: {} -> {} bytes", html.len(), doc.len());

    doc
}

fn strip_xml_declarations(html: &str) -> Cow<'_, str> {
    XML_DECL.replace_all(html, "")
}

fn strip_comments(html: &str) -> Cow<'_, str> {
    COMMENT.replace_all(html, "")
}

fn strip_style_and_script(html: &str) -> Cow<'_, str> {
    STYLE_SCRIPT.replace_all(html, "")
}

fn strip_links(html: &str) -> Cow<'_, str> {
    LINK.replace_all(html, "")
}

/// Drop every `<meta>` except those declaring a character set
fn strip_meta(html: &str) -> Cow<'_, str> {
    META.replace_all(html, |caps: &Captures| {
        if caps[0].to_ascii_lowercase().contains("charset") {
            caps[0].to_string()
        } else {
            String::new()
        }
    })
}

fn strip_xmlns(html: &str) -> Cow<'_, str> {
    XMLNS.replace_all(html, "")
}

fn unwrap_spans(html: &str) -> Cow<'_, str> {
    SPAN.replace_all(html, "")
}

/// Some exports emit `<body-CN ...>` or `<body -CN ...>`
fn fix_body_cn(html: &str) -> Cow<'_, str> {
    BODY_CN.replace_all(html, "<body")
}

/// Remove `style`, `class`, `id` and `mso-*` attributes, leaving the tags
fn strip_presentation_attributes(html: &str) -> Cow<'_, str> {
    OPEN_TAG.replace_all(html, |caps: &Captures| {
        PRESENTATION_ATTR.replace_all(&caps[0], "").into_owned()
    })
}

fn bare_table_cells(html: &str) -> Cow<'_, str> {
    bare_tags(&TABLE_CELL, html)
}

/// Only tables already declaring `border=1` are canonicalized; other border
/// values and border-less tables keep their opening tag.
fn canonical_table_border(html: &str) -> Cow<'_, str> {
    TABLE_BORDER_1.replace_all(html, "<table border=1>")
}

fn bare_blocks(html: &str) -> Cow<'_, str> {
    bare_tags(&BLOCK, html)
}

fn strip_office_paragraphs(html: &str) -> Cow<'_, str> {
    OFFICE_P.replace_all(html, "")
}

/// Drop the XHTML slash on void elements and glue adjacent tags together
fn repair_tags(html: &str) -> Cow<'_, str> {
    match SELF_CLOSING_VOID.replace_all(html, "<${1}${2}>") {
        Cow::Borrowed(unchanged) => BETWEEN_TAGS.replace_all(unchanged, "><"),
        Cow::Owned(repaired) => Cow::Owned(BETWEEN_TAGS.replace_all(&repaired, "><").into_owned()),
    }
}

fn assure_structure(html: &str) -> Cow<'_, str> {
    Cow::Owned(ensure_structure(html))
}

/// Rewrite the head's charset declaration to `<meta charset="utf-8">` and
/// drop every other one, wherever it sits
fn canonical_charset(html: &str) -> Cow<'_, str> {
    let keep = head_interior(html)
        .and_then(|(start, end)| {
            CHARSET_META_TAG
                .find_at(html, start)
                .filter(|m| m.end() <= end)
        })
        .or_else(|| CHARSET_META_TAG.find(html))
        .map(|m| m.start());

    CHARSET_META_TAG.replace_all(html, |caps: &Captures| {
        if caps.get(0).map(|m| m.start()) == keep {
            CHARSET_META
        } else {
            ""
        }
    })
}

fn collapse_whitespace(html: &str) -> Cow<'_, str> {
    WHITESPACE.replace_all(html, " ")
}

fn trim_tag_whitespace(html: &str) -> Cow<'_, str> {
    TAG_EDGE_WHITESPACE.replace_all(html, |caps: &Captures| {
        if caps[0].ends_with('>') { ">" } else { "<" }
    })
}

/// Replace a matched `<name ...>` with a bare, lowercase `<name>`
fn bare_tags<'h>(pattern: &Regex, html: &'h str) -> Cow<'h, str> {
    pattern.replace_all(html, |caps: &Captures| {
        format!("<{}>", caps[1].to_ascii_lowercase())
    })
}
