//! Text runs and style flags.

use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing one styling/link signature.
///
/// Runs are never emitted with empty text, and false/absent attributes are
/// omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Bold text
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,

    /// Italic text
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,

    /// Underlined text
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,

    /// Link target, if the run is a hyperlink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Run {
    /// Create a plain text run with no styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            href: None,
        }
    }

    /// Create a run from text and resolved style flags.
    pub fn styled(text: impl Into<String>, flags: StyleFlags) -> Self {
        Self {
            text: text.into(),
            bold: flags.bold,
            italic: flags.italic,
            underline: flags.underline,
            href: None,
        }
    }

    /// The tuple that decides whether two adjacent runs merge.
    pub fn style_signature(&self) -> (bool, bool, bool, Option<&str>) {
        (self.bold, self.italic, self.underline, self.href.as_deref())
    }

    /// Check if this run carries any styling or a link.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.href.is_some()
    }
}

/// Boolean style properties resolved for a block or span.
///
/// Flags are additive: a child scope can promote a flag to true but never
/// demote one its ancestor established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleFlags {
    /// font-weight:bold
    pub bold: bool,

    /// font-style:italic
    pub italic: bool,

    /// text-decoration:underline
    pub underline: bool,
}

impl StyleFlags {
    /// Combine two flag sets, keeping every flag that is set in either.
    pub fn union(self, other: StyleFlags) -> StyleFlags {
        StyleFlags {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }

    /// Check if any flag is set.
    pub fn any(self) -> bool {
        self.bold || self.italic || self.underline
    }
}
