//! Document model types.
//!
//! The model is a flat, owned tree: a [`Document`] owns an ordered
//! sequence of [`Block`]s, and text-bearing blocks own their [`Run`]s.
//! Everything is immutable once the parser has appended it.

mod block;
mod document;
mod run;

pub use block::Block;
pub use document::Document;
pub use run::{Run, StyleFlags};
