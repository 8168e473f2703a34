//! Structural repair of the top-level `<html>`/`<head>`/`<body>` skeleton

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

pub const CHARSET_META: &str = r#"<meta charset="utf-8">"#;

static HTML_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<html\b[^>]*>").unwrap());
static HTML_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</html\s*>").unwrap());
static HEAD_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").unwrap());
static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head\s*>").unwrap());
static BODY_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").unwrap());
static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</body\s*>").unwrap());
pub static CHARSET_META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta\b[^>]*charset[^>]*>").unwrap());

/// Guarantee an `<html>` wrapper, a `<head>` carrying a UTF-8 charset
/// declaration and a `<body>`, each opened and closed.
///
/// Content outside the wrappers is never reordered: a missing `<body>` is
/// synthesized around whatever sits between `</head>` and `</html>`.
#[must_use]
pub fn ensure_structure(html: &str) -> String {
    let mut doc = ensure_html(html.trim());
    ensure_head(&mut doc);
    ensure_body(&mut doc);
    doc
}

fn ensure_html(html: &str) -> String {
    if !HTML_OPEN.is_match(html) {
        let html = HTML_CLOSE.replace_all(html, "");
        return format!("<html>{html}</html>");
    }

    let mut doc = html.to_string();
    if !HTML_CLOSE.is_match(&doc) {
        doc.push_str("</html>");
    }
    doc
}

fn ensure_head(doc: &mut String) {
    let Some(head_end) = HEAD_OPEN.find(doc).map(|m| m.end()) else {
        strip_stray(doc, &HEAD_CLOSE);
        if let Some(at) = HTML_OPEN.find(doc).map(|m| m.end()) {
            doc.insert_str(at, &format!("<head>{CHARSET_META}</head>"));
        }
        return;
    };

    let close = HEAD_CLOSE.find_at(doc, head_end).map(|m| m.start());

    let mut meta_end = head_end;
    if !CHARSET_META_TAG.is_match(&doc[head_end..close.unwrap_or(doc.len())]) {
        doc.insert_str(head_end, CHARSET_META);
        meta_end += CHARSET_META.len();
    }

    if close.is_none() {
        // unclosed head ends where the body starts
        let at = BODY_OPEN
            .find_at(doc, meta_end)
            .map_or(meta_end, |m| m.start());
        doc.insert_str(at, "</head>");
    }
}

fn ensure_body(doc: &mut String) {
    if BODY_OPEN.is_match(doc) {
        if !BODY_CLOSE.is_match(doc)
            && let Some(html_close) = last_html_close(doc)
        {
            doc.insert_str(html_close, "</body>");
        }
        return;
    }

    strip_stray(doc, &BODY_CLOSE);
    let Some(html_close) = last_html_close(doc) else {
        return;
    };

    let content_start = HEAD_CLOSE
        .find(doc)
        .or_else(|| HTML_OPEN.find(doc))
        .map_or(0, |m| m.end());
    if content_start > html_close {
        return;
    }

    doc.insert_str(html_close, "</body>");
    doc.insert_str(content_start, "<body>");
}

/// Span of the `<head>` interior, between its opening and closing tags
#[must_use]
pub fn head_interior(doc: &str) -> Option<(usize, usize)> {
    let start = HEAD_OPEN.find(doc)?.end();
    let end = HEAD_CLOSE.find_at(doc, start)?.start();
    Some((start, end))
}

/// Remove closing tags whose opening tag is missing
fn strip_stray(doc: &mut String, close: &Regex) {
    let stripped = match close.replace_all(doc, "") {
        Cow::Borrowed(_) => return,
        Cow::Owned(stripped) => stripped,
    };
    *doc = stripped;
}

fn last_html_close(doc: &str) -> Option<usize> {
    HTML_CLOSE.find_iter(doc).last().map(|m| m.start())
}
