//! Streaming parser for the exporter's HTML dialect.

mod builder;
mod html_parser;
mod options;

pub use html_parser::DocsParser;
pub use options::{ErrorMode, ParseOptions};
