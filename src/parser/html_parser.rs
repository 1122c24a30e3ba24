//! HTML event driver.
//!
//! Adapts the quick-xml SAX-style reader to the builder's tag-open / text /
//! tag-close contract. The exporter's markup is XML-shaped but leaves void
//! elements (`<meta>`, `<hr>`, `<br>`) unclosed, so end-name checking is
//! relaxed rather than treated as an error. The builder never sees the
//! reader; it only consumes the event contract.

use std::io::Read;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{Error, Result};
use crate::model::Document;

use super::builder::{DocBuilder, Tag, TagAttrs};
use super::options::ParseOptions;

/// Parser for HTML exported by the document editor.
///
/// One instance owns one input buffer and parses it in a single streaming
/// pass; independent instances share no state.
#[derive(Debug)]
pub struct DocsParser {
    html: String,
    options: ParseOptions,
}

impl DocsParser {
    /// Create a parser over an HTML string.
    pub fn new(html: impl Into<String>) -> Self {
        Self::with_options(html, ParseOptions::default())
    }

    /// Create a parser over an HTML string with custom options.
    pub fn with_options(html: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            html: html.into(),
            options,
        }
    }

    /// Create a parser from raw bytes; the export is always UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from raw bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let html = std::str::from_utf8(data)
            .map_err(|e| Error::Encoding(format!("input is not valid UTF-8: {e}")))?;
        Ok(Self::with_options(html, options))
    }

    /// Create a parser from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the input and return the document model.
    ///
    /// Feeds the whole input through the builder before returning; on any
    /// fatal error no partial document is published.
    pub fn parse(&self) -> Result<Document> {
        let mut reader = Reader::from_str(&self.html);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut builder = DocBuilder::new(self.options.clone());

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = element_name(e.name().as_ref());
                    builder.open_tag(Tag::from_name(&name), &tag_attrs(&e))?;
                }
                Ok(Event::Empty(e)) => {
                    // Self-closed element: open and immediately close.
                    let name = element_name(e.name().as_ref());
                    let tag = Tag::from_name(&name);
                    builder.open_tag(tag, &tag_attrs(&e))?;
                    builder.close_tag(tag, &name)?;
                }
                Ok(Event::End(e)) => {
                    let name = element_name(e.name().as_ref());
                    builder.close_tag(Tag::from_name(&name), &name)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .decode()
                        .map_err(|e| Error::Tokenize(format!("text decode failed: {e}")))?;
                    builder.text(&text);
                }
                Ok(Event::GeneralRef(e)) => {
                    let entity = e
                        .decode()
                        .map_err(|e| Error::Tokenize(format!("entity decode failed: {e}")))?;
                    builder.text(&resolve_entity(&entity));
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    builder.text(&text);
                }
                // Declarations, doctype, comments and processing
                // instructions carry no document content.
                Ok(Event::Decl(_))
                | Ok(Event::DocType(_))
                | Ok(Event::Comment(_))
                | Ok(Event::PI(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Tokenize(format!("reader error: {e}"))),
            }
        }

        builder.finish()
    }
}

/// Decode and lowercase an element name.
fn element_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

/// Pull the attributes the builder recognizes out of a start tag.
fn tag_attrs(e: &BytesStart) -> TagAttrs {
    let mut attrs = TagAttrs::default();
    for attr in e.attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        // Attribute values carry escaped ampersands in wrapped hrefs.
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        match key.as_str() {
            "class" => attrs.class = Some(value),
            "style" => attrs.style = Some(value),
            "href" => attrs.href = Some(value),
            _ => {}
        }
    }
    attrs
}

/// Resolve one general entity reference to its replacement text.
///
/// Predefined and numeric references go through quick-xml's resolver; the
/// handful of named HTML entities the exporter emits are handled locally;
/// anything unknown degrades to its literal source text.
fn resolve_entity(entity: &str) -> String {
    let raw = format!("&{entity};");
    if let Ok(resolved) = unescape(&raw) {
        return resolved.into_owned();
    }
    match entity {
        "nbsp" => "\u{00A0}".to_string(),
        "ensp" => "\u{2002}".to_string(),
        "emsp" => "\u{2003}".to_string(),
        "ndash" => "\u{2013}".to_string(),
        "mdash" => "\u{2014}".to_string(),
        "lsquo" => "\u{2018}".to_string(),
        "rsquo" => "\u{2019}".to_string(),
        "ldquo" => "\u{201C}".to_string(),
        "rdquo" => "\u{201D}".to_string(),
        "hellip" => "\u{2026}".to_string(),
        "copy" => "\u{00A9}".to_string(),
        _ => {
            log::debug!("unknown entity &{entity};, keeping literal text");
            raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), "&");
        assert_eq!(resolve_entity("#8212"), "\u{2014}");
        assert_eq!(resolve_entity("nbsp"), "\u{00A0}");
        assert_eq!(resolve_entity("bogus"), "&bogus;");
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let doc = DocsParser::new("<html><body><p><span>hello</span></p></body></html>")
            .parse()
            .unwrap();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.plain_text(), "hello");
    }

    #[test]
    fn test_unclosed_void_elements_are_tolerated() {
        let html = "<html><head><meta content=\"text/html; charset=UTF-8\" \
                    http-equiv=\"content-type\"></head><body>\
                    <p><span>after meta</span></p><hr></body></html>";
        let doc = DocsParser::new(html).parse().unwrap();
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = DocsParser::from_bytes(&[0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_entity_in_span_text() {
        let doc = DocsParser::new("<p><span>a&nbsp;b &amp; c</span></p>")
            .parse()
            .unwrap();
        assert_eq!(doc.plain_text(), "a b & c");
    }
}
