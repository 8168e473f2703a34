use mht2html::decode_entities;
use std::borrow::Cow;

#[test]
fn test_decimal_references() {
    for code in [0x20_u32, 0x41, 0xe9, 0x4e2d, 0x1f600, 0x10ffff] {
        let expected = char::from_u32(code).unwrap().to_string();
        assert_eq!(decode_entities(&format!("&#{code};")), expected);
    }
}

#[test]
fn test_hex_references() {
    assert_eq!(decode_entities("&#x41;&#X42;&#x6587;"), "AB\u{6587}");
    assert_eq!(decode_entities("&#x1F600;"), "\u{1f600}");
}

#[test]
fn test_named_entities() {
    assert_eq!(
        decode_entities("&amp; &lt; &gt; &quot; &apos;"),
        "& < > \" '"
    );
}

#[test]
fn test_passes_run_numeric_then_named() {
    assert_eq!(decode_entities("&amp;lt;"), "<");
    assert_eq!(decode_entities("&#38;amp;"), "&");
    assert_eq!(decode_entities("&#38;#x41;"), "A");
    assert_eq!(decode_entities("&#x26;#65;"), "&#65;");
}

#[test]
fn test_invalid_code_points_are_kept() {
    assert_eq!(decode_entities("&#55296;"), "&#55296;");
    assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
    assert_eq!(
        decode_entities("&#99999999999999999999;"),
        "&#99999999999999999999;"
    );
}

#[test]
fn test_unknown_and_unterminated_entities_are_kept() {
    assert_eq!(decode_entities("a&nbsp;b &copy;"), "a&nbsp;b &copy;");
    assert_eq!(decode_entities("AT&T &amp"), "AT&T &amp");
}

#[test]
fn test_text_without_ampersand_is_borrowed() {
    assert!(matches!(decode_entities("plain text"), Cow::Borrowed(_)));
}
