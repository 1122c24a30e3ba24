//! Style resolution for generated CSS classes and inline styles.
//!
//! The editor's export wraps every formatting change in a `<span>` whose
//! `class` list points at generated `.cNN` rules in the document's single
//! `<style>` block. Only three properties matter for the output model:
//! `font-weight:bold`, `font-style:italic` and `text-decoration:underline`.
//! Everything else (colors, fonts, sizes) is noise and is ignored.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::StyleFlags;

/// Answers whether a generated class name carries bold/italic/underline.
///
/// Built from the stylesheet text captured inside the export's `<style>`
/// element. Scans `.cNN { ... }` rule sets with a token match rather than a
/// full CSS parser; the export's stylesheet is machine-generated and never
/// uses nesting, at-rules that matter here, or multi-selector groups for
/// the `.cNN` classes.
#[derive(Debug, Default, Clone)]
pub struct ClassStyles {
    bold: HashSet<String>,
    italic: HashSet<String>,
    underline: HashSet<String>,
}

impl ClassStyles {
    /// Build the class table from stylesheet text.
    pub fn parse(css: &str) -> Self {
        static RULE_SET: OnceLock<Regex> = OnceLock::new();
        let rule_set = RULE_SET.get_or_init(|| Regex::new(r"\.(c\d+)\{([^}]*)\}").unwrap());

        let mut table = Self::default();
        for cap in rule_set.captures_iter(css) {
            let selector = &cap[1];
            let flags = detect_flags(&cap[2]);

            if flags.bold {
                table.bold.insert(selector.to_string());
            }
            if flags.italic {
                table.italic.insert(selector.to_string());
            }
            if flags.underline {
                table.underline.insert(selector.to_string());
            }
        }
        table
    }

    /// Resolve the flags carried by a set of class names.
    ///
    /// A flag is true if any of the supplied classes maps to a rule with
    /// that property. Classes with no declared rule contribute nothing.
    pub fn resolve<I, S>(&self, class_names: I) -> StyleFlags
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = StyleFlags::default();
        for name in class_names {
            let name = name.as_ref();
            flags.bold |= self.bold.contains(name);
            flags.italic |= self.italic.contains(name);
            flags.underline |= self.underline.contains(name);
        }
        flags
    }

    /// Number of classes carrying at least one tracked property.
    pub fn len(&self) -> usize {
        let mut all: HashSet<&str> = HashSet::new();
        all.extend(self.bold.iter().map(String::as_str));
        all.extend(self.italic.iter().map(String::as_str));
        all.extend(self.underline.iter().map(String::as_str));
        all.len()
    }

    /// Check if no tracked classes were found.
    pub fn is_empty(&self) -> bool {
        self.bold.is_empty() && self.italic.is_empty() && self.underline.is_empty()
    }
}

/// Split an element's `class` attribute into the generated class names the
/// table tracks, dropping everything else (`title`, `subtitle`, list
/// classes and so on).
pub fn generated_classes(class_attr: &str) -> Vec<&str> {
    static CLASS_NAME: OnceLock<Regex> = OnceLock::new();
    let class_name = CLASS_NAME.get_or_init(|| Regex::new(r"^c\d+$").unwrap());
    class_attr
        .split_whitespace()
        .filter(|s| class_name.is_match(s))
        .collect()
}

/// Resolve an inline `style` attribute against inherited parent flags.
///
/// Returns the parent flags with any newly detected property OR'd in;
/// inheritance is monotonic, a child can only add formatting. Absent or
/// empty style text yields the parent flags unchanged.
pub fn inline_flags(style_text: Option<&str>, parent: StyleFlags) -> StyleFlags {
    match style_text {
        Some(text) if !text.is_empty() => parent.union(detect_flags(text)),
        _ => parent,
    }
}

/// Scan a declaration block for the three tracked property signatures.
fn detect_flags(declarations: &str) -> StyleFlags {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    static UNDERLINE: OnceLock<Regex> = OnceLock::new();

    let bold = BOLD.get_or_init(|| Regex::new(r"\bfont-weight:bold\b").unwrap());
    let italic = ITALIC.get_or_init(|| Regex::new(r"\bfont-style:italic\b").unwrap());
    let underline =
        UNDERLINE.get_or_init(|| Regex::new(r"\btext-decoration:underline\b").unwrap());

    StyleFlags {
        bold: bold.is_match(declarations),
        italic: italic.is_match(declarations),
        underline: underline.is_match(declarations),
    }
}
