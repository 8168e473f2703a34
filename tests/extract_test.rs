use mht2html::{FormatError, extract_html};

fn crlf(lines: &[&str]) -> Vec<u8> {
    lines.join("\r\n").into_bytes()
}

#[test]
fn test_selects_html_among_other_parts() {
    let raw = crlf(&[
        "MIME-Version: 1.0",
        "Content-Type: multipart/related; boundary=\"----=_NextPart_000\"",
        "",
        "------=_NextPart_000",
        "Content-Type: text/plain; charset=\"utf-8\"",
        "",
        "plain text alternative",
        "------=_NextPart_000",
        "Content-Type: text/html; charset=\"utf-8\"",
        "Content-Location: file:///C:/page.htm",
        "",
        "<html><body><p>Chosen</p></body></html>",
        "------=_NextPart_000",
        "Content-Type: image/png",
        "Content-Transfer-Encoding: base64",
        "",
        "iVBORw0KGgo=",
        "------=_NextPart_000--",
        "",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<html><body><p>Chosen</p></body></html>");
}

#[test]
fn test_no_html_part_fails() {
    let raw = crlf(&[
        "Content-Type: multipart/related; boundary=\"b1\"",
        "",
        "--b1",
        "Content-Type: text/plain",
        "",
        "only text",
        "--b1",
        "Content-Type: image/png",
        "Content-Transfer-Encoding: base64",
        "",
        "iVBORw0KGgo=",
        "--b1--",
        "",
    ]);

    let err = extract_html(&raw).unwrap_err();

    assert!(matches!(err, FormatError::NoHtmlPart));
    assert!(err.to_string().contains("No HTML part"));
}

#[test]
fn test_nested_multipart_is_searched_depth_first() {
    let raw = crlf(&[
        "Content-Type: multipart/mixed; boundary=\"outer\"",
        "",
        "--outer",
        "Content-Type: multipart/alternative; boundary=\"inner\"",
        "",
        "--inner",
        "Content-Type: text/plain",
        "",
        "first",
        "--inner",
        "Content-Type: text/html",
        "",
        "<p>nested</p>",
        "--inner--",
        "--outer",
        "Content-Type: text/html",
        "",
        "<p>later</p>",
        "--outer--",
        "",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<p>nested</p>");
}

#[test]
fn test_quoted_printable_part_is_decoded() {
    let raw = crlf(&[
        "Content-Type: multipart/related; boundary=\"qp\"",
        "",
        "--qp",
        "Content-Type: text/html; charset=\"iso-8859-1\"",
        "Content-Transfer-Encoding: quoted-printable",
        "",
        "<p class=3DMsoNormal>caf=E9 au =",
        "lait</p>",
        "--qp--",
        "",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<p class=MsoNormal>caf\u{e9} au lait</p>");
}

#[test]
fn test_base64_part_is_decoded() {
    let raw = crlf(&[
        "Content-Type: multipart/related; boundary=\"b64\"",
        "",
        "--b64",
        "Content-Type: text/html; charset=utf-8",
        "Content-Transfer-Encoding: base64",
        "",
        "PGh0bWw+PGJvZHk+PHA+RW5jb2RlZDwvcD48L2JvZHk+PC9odG1sPg==",
        "--b64--",
        "",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<html><body><p>Encoded</p></body></html>");
}

#[test]
fn test_single_part_html_message() {
    let raw = crlf(&[
        "Subject: Saved page",
        "Content-Type: text/html; charset=utf-8",
        "",
        "<html><body>Single</body></html>",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<html><body>Single</body></html>");
}

#[test]
fn test_content_type_is_case_insensitive() {
    let raw = crlf(&[
        "Content-Type: Text/HTML; charset=utf-8",
        "",
        "<p>upper</p>",
    ]);

    let html = extract_html(&raw).unwrap();

    assert_eq!(html.trim(), "<p>upper</p>");
}

#[test]
fn test_single_part_non_html_fails() {
    let raw = crlf(&["Content-Type: text/plain", "", "just words"]);

    assert!(matches!(
        extract_html(&raw),
        Err(FormatError::NoHtmlPart)
    ));
}

#[test]
fn test_garbage_input_fails() {
    assert!(extract_html(b"definitely not a web archive").is_err());
}
