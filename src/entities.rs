//! Character reference decoding

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#([0-9]+);").unwrap());

static HEX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#[xX]([0-9a-fA-F]+);").unwrap());

/// Named entities, replaced in this order
const NAMED: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Decode numeric (`&#NNN;`), then hexadecimal (`&#xHHH;`), then the five
/// XML named entities into literal characters.
///
/// Each kind is its own pass over the output of the previous one, so
/// `&amp;lt;` ends up as `<`. References that do not name a Unicode scalar
/// value are kept verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = DECIMAL_REGEX
        .replace_all(text, |caps: &Captures| {
            code_point(&caps[0], caps[1].parse::<u32>().ok())
        })
        .into_owned();

    decoded = HEX_REGEX
        .replace_all(&decoded, |caps: &Captures| {
            code_point(&caps[0], u32::from_str_radix(&caps[1], 16).ok())
        })
        .into_owned();

    for (entity, literal) in NAMED {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, literal);
        }
    }

    Cow::Owned(decoded)
}

fn code_point(reference: &str, code: Option<u32>) -> String {
    code.and_then(char::from_u32)
        .map_or_else(|| reference.to_string(), String::from)
}
