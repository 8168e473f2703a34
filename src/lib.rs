// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! MHT to HTML converter
//!
//! Takes a MIME-encapsulated web archive (an "MHT" file, as written by a
//! browser's "Save as single file" or by office suites) and produces a
//! minimal HTML document holding only structural markup and visible text.
//!
//! Conversion runs in two strictly sequential stages:
//!
//! - [`extract_html`] parses the MIME container and decodes the first
//!   `text/html` part.
//! - [`simplify`] threads that text through an ordered rewrite pipeline that
//!   strips scripts, styles, metadata and presentation markup, repairs the
//!   document skeleton and decodes character references.
//!
//! # Example
//!
//! ```rust
//! use mht2html::mht_to_html;
//!
//! let mht = b"Content-Type: text/html; charset=utf-8\r\n\r\n\
//!             <html><body><span class=\"x\">Hello</span></body></html>";
//! let html = mht_to_html(mht).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(html).unwrap(),
//!     "<html><head><meta charset=\"utf-8\"></head><body>Hello</body></html>"
//! );
//! ```

mod entities;
mod error;
mod extract;
mod simplify;
mod structure;
mod types;

pub use entities::decode_entities;
pub use error::{FormatError, Result};
pub use extract::extract_html;
pub use simplify::{simplify, simplify_html, simplify_with_report};
pub use types::*;

/// Convert raw MHT bytes into simplified UTF-8 HTML
pub fn mht_to_html(mht: &[u8]) -> Result<Vec<u8>> {
    let html = extract_html(mht)?;
    Ok(simplify(&html))
}

/// Like [`mht_to_html`], also reporting what the simplifier did
pub fn mht_to_html_with_report(mht: &[u8]) -> Result<(Vec<u8>, SimplifyReport)> {
    let html = extract_html(mht)?;
    Ok(simplify_with_report(&html))
}
