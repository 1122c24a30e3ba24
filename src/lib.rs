//! # undocs
//!
//! Extraction of Google Docs "Download as HTML" exports into a clean,
//! semantic document model.
//!
//! The export is verbose and presentation-heavy: inline styles, generated
//! class names, a `<span>` for every formatting change, layout tables and
//! editor comment markers. This library recovers author intent (which runs
//! of text are bold, italic, underlined or linked) and discards the noise,
//! producing a flat sequence of headings, paragraphs, lists, horizontal
//! rules and page breaks.
//!
//! ## Quick Start
//!
//! ```
//! use undocs::parse;
//!
//! let html = "<html><head><style>.c1{font-weight:bold}</style></head>\
//!             <body><p><span class=\"c1\">Bold</span><span> and plain</span></p>\
//!             </body></html>";
//! let doc = parse(html).unwrap();
//!
//! assert_eq!(doc.block_count(), 1);
//! assert_eq!(doc.plain_text(), "Bold and plain");
//! ```
//!
//! ## Features
//!
//! - **Style recovery**: bold/italic/underline resolved through the
//!   export's generated CSS class table and inline styles
//! - **Link unwrapping**: redirector-wrapped hrefs reduced to their true
//!   destination; `mailto:` and similar used verbatim
//! - **Run merging**: adjacent identically-styled runs coalesced
//! - **Noise removal**: layout tables, comment markers and non-breaking
//!   space artifacts dropped
//!
//! Fetching documents and rendering output are out of scope; the input is
//! a plain HTML string and the output is the plain data model.

pub mod error;
pub mod link;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod style;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Block, Document, Run, StyleFlags};
pub use parser::{DocsParser, ErrorMode, ParseOptions};

use std::io::Read;

/// Parse exported HTML and return a structured document.
///
/// # Example
///
/// ```
/// let doc = undocs::parse("<p><span>hello</span></p>").unwrap();
/// assert_eq!(doc.plain_text(), "hello");
/// ```
pub fn parse(html: &str) -> Result<Document> {
    DocsParser::new(html).parse()
}

/// Parse exported HTML with custom options.
///
/// # Example
///
/// ```
/// use undocs::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_with_options("<p><span>hello</span></p>", options).unwrap();
/// assert_eq!(doc.block_count(), 1);
/// ```
pub fn parse_with_options(html: &str, options: ParseOptions) -> Result<Document> {
    DocsParser::with_options(html, options).parse()
}

/// Parse exported HTML from bytes (must be valid UTF-8).
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocsParser::from_bytes(data)?.parse()
}

/// Parse exported HTML from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    DocsParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse exported HTML from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    DocsParser::from_reader(reader)?.parse()
}

/// Parse exported HTML from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    DocsParser::from_reader_with_options(reader, options)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_reader() {
        let html = b"<p><span>from a reader</span></p>" as &[u8];
        let doc = parse_reader(html).unwrap();
        assert_eq!(doc.plain_text(), "from a reader");
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let result = parse_bytes(&[0xC3, 0x28]);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_independent_parses_share_nothing() {
        let a = parse("<p><span>one</span></p>").unwrap();
        let b = parse("<p><span>two</span></p>").unwrap();
        assert_eq!(a.plain_text(), "one");
        assert_eq!(b.plain_text(), "two");
    }
}
