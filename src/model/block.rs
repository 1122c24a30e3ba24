//! Block-level structural units.

use serde::{Deserialize, Serialize};

use super::Run;

/// A top-level or list-item-level structural unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading, level 1-4.
    Heading {
        /// Heading level (1-4)
        level: u8,
        /// Text runs
        runs: Vec<Run>,
    },

    /// A paragraph of text runs.
    Paragraph {
        /// Text runs
        runs: Vec<Run>,
    },

    /// A list item. Only valid as a child of a `List`.
    ListItem {
        /// Text runs
        runs: Vec<Run>,
    },

    /// An ordered or unordered list of items.
    List {
        /// True for `<ol>`, false for `<ul>`
        ordered: bool,
        /// Item blocks (list items)
        items: Vec<Block>,
    },

    /// A horizontal divider.
    Rule,

    /// An explicit pagination marker.
    PageBreak,
}

impl Block {
    /// Get the text runs of a text-bearing block, if any.
    pub fn runs(&self) -> Option<&[Run]> {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } | Block::ListItem { runs } => {
                Some(runs)
            }
            _ => None,
        }
    }

    /// Plain text content of this block, links and styling dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } | Block::ListItem { runs } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
            Block::List { items, .. } => items
                .iter()
                .map(|item| item.plain_text())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Rule | Block::PageBreak => String::new(),
        }
    }
}
