//! Locates and decodes the HTML document inside an MHT container

use crate::error::{FormatError, Result};
use mailparse::ParsedMail;
use tracing::debug;

const HTML_MIMETYPE: &str = "text/html";

/// Extract the decoded text of the first `text/html` part of an MHT document.
///
/// Transfer encodings and charsets are handled by `mailparse`; the returned
/// text is the part body exactly as decoded.
pub fn extract_html(mht: &[u8]) -> Result<String> {
    let parsed = mailparse::parse_mail(mht).map_err(|e| FormatError::Mime(e.to_string()))?;

    debug!(
        "Parsed MHT container: {} ({} leaf parts)",
        parsed.ctype.mimetype,
        count_leaves(&parsed)
    );

    let part = find_html_part(&parsed).ok_or(FormatError::NoHtmlPart)?;
    let html = part
        .get_body()
        .map_err(|e| FormatError::Decode(e.to_string()))?;

    debug!(
        "Selected HTML part: charset {}, {} bytes decoded",
        part.ctype.charset,
        html.len()
    );

    Ok(html)
}

/// First leaf part, depth-first, whose content type is `text/html`.
/// A message without subparts is its own single candidate.
fn find_html_part<'a>(part: &'a ParsedMail<'a>) -> Option<&'a ParsedMail<'a>> {
    if part.subparts.is_empty() {
        return is_html(part).then_some(part);
    }

    part.subparts.iter().find_map(find_html_part)
}

fn is_html(part: &ParsedMail) -> bool {
    part.ctype.mimetype.trim().eq_ignore_ascii_case(HTML_MIMETYPE)
}

fn count_leaves(part: &ParsedMail) -> usize {
    if part.subparts.is_empty() {
        1
    } else {
        part.subparts.iter().map(count_leaves).sum()
    }
}
