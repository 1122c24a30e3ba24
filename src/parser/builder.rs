//! Document builder state machine.
//!
//! Consumes tag-open/text/tag-close events in document order and
//! incrementally assembles the output [`Document`]. Nested parsing
//! contexts live on an explicit stack, one frame per open construct, so
//! suppressed regions and collectors compose without shared flags. All
//! accumulator state is private to one builder value and dies with the
//! parse call.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::link::{self, HrefKind};
use crate::model::{Block, Document, Run, StyleFlags};
use crate::normalize::merge_runs;
use crate::style::{self, ClassStyles};

use super::options::{ErrorMode, ParseOptions};

/// Recognized element kinds.
///
/// A closed dispatch over the exporter's dialect; anything else maps to
/// `Other` and is structurally ignored, its children processed under
/// whatever context is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    /// `<style>`: stylesheet capture
    Style,
    /// `<table>`: layout scaffolding, suppressed wholesale
    Table,
    /// `<div>`: the exporter only emits divs around comment sections
    CommentsWrapper,
    /// `<h1>`-`<h4>`
    Heading(u8),
    /// `<p>`
    Paragraph,
    /// `<li>`
    ListItem,
    /// `<ol>`
    OrderedList,
    /// `<ul>`
    UnorderedList,
    /// `<span>`
    Span,
    /// `<a>`
    Anchor,
    /// `<hr>`: divider or page break
    Rule,
    /// Anything unrecognized
    Other,
}

impl Tag {
    pub(crate) fn from_name(name: &str) -> Tag {
        match name {
            "style" => Tag::Style,
            "table" => Tag::Table,
            "div" => Tag::CommentsWrapper,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "p" => Tag::Paragraph,
            "li" => Tag::ListItem,
            "ol" => Tag::OrderedList,
            "ul" => Tag::UnorderedList,
            "span" => Tag::Span,
            "a" => Tag::Anchor,
            "hr" => Tag::Rule,
            _ => Tag::Other,
        }
    }
}

/// The attributes the builder cares about, extracted by the event driver.
#[derive(Debug, Default, Clone)]
pub(crate) struct TagAttrs {
    pub class: Option<String>,
    pub style: Option<String>,
    pub href: Option<String>,
}

/// Which block-level element a `Block` context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
}

/// One frame of nested parsing state.
#[derive(Debug)]
enum Context {
    /// Suppress all emission and text capture until the matching close of
    /// `tag`; `depth` tracks same-element nesting inside the region.
    Suppress { tag: Tag, depth: usize },
    /// Accumulating stylesheet text inside `<style>`.
    StyleCapture { css: String },
    /// Collecting runs for a heading, paragraph or list item.
    Block {
        kind: BlockKind,
        flags: StyleFlags,
        runs: Vec<Run>,
    },
    /// Collecting item blocks for an ordered/unordered list.
    List { ordered: bool, items: Vec<Block> },
    /// Collecting text and resolving style/href for one run.
    Span {
        text: String,
        flags: StyleFlags,
        href: Option<String>,
    },
}

/// Streaming document builder.
pub(crate) struct DocBuilder {
    options: ParseOptions,
    styles: ClassStyles,
    contexts: Vec<Context>,
    output: Vec<Block>,
}

impl DocBuilder {
    pub(crate) fn new(options: ParseOptions) -> Self {
        Self {
            options,
            styles: ClassStyles::default(),
            contexts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Handle a tag-open event.
    pub(crate) fn open_tag(&mut self, tag: Tag, attrs: &TagAttrs) -> Result<()> {
        if let Some(Context::Suppress {
            tag: suppressed,
            depth,
        }) = self.contexts.last_mut()
        {
            if tag == *suppressed {
                *depth += 1;
            }
            return Ok(());
        }

        match tag {
            Tag::Table | Tag::CommentsWrapper => {
                self.contexts.push(Context::Suppress { tag, depth: 1 });
            }
            Tag::Style => {
                self.contexts.push(Context::StyleCapture { css: String::new() });
            }
            Tag::Heading(level) => self.open_block(BlockKind::Heading(level), attrs),
            Tag::Paragraph => self.open_block(BlockKind::Paragraph, attrs),
            Tag::ListItem => self.open_block(BlockKind::ListItem, attrs),
            Tag::OrderedList | Tag::UnorderedList => {
                // The exporter never nests lists; it flattens indentation
                // into sibling lists with margin classes. A nested list
                // would corrupt the collector, so refuse it outright.
                if self
                    .contexts
                    .iter()
                    .any(|c| matches!(c, Context::List { .. }))
                {
                    return Err(Error::InternalInconsistency(
                        "nested lists are not supported".to_string(),
                    ));
                }
                self.contexts.push(Context::List {
                    ordered: tag == Tag::OrderedList,
                    items: Vec::new(),
                });
            }
            Tag::Span => {
                let flags = self.resolve_flags(attrs, self.inherited_flags());
                self.contexts.push(Context::Span {
                    text: String::new(),
                    flags,
                    href: None,
                });
            }
            Tag::Anchor => {
                if let Some(href) = attrs.href.as_deref() {
                    self.open_anchor(href)?;
                }
            }
            Tag::Rule => {
                static PAGE_BREAK: OnceLock<Regex> = OnceLock::new();
                let page_break =
                    PAGE_BREAK.get_or_init(|| Regex::new(r"\bpage-break-before:always\b").unwrap());
                let block = match attrs.style.as_deref() {
                    Some(style) if page_break.is_match(style) => Block::PageBreak,
                    _ => Block::Rule,
                };
                // Rules and breaks always land at the top level.
                self.output.push(block);
            }
            Tag::Other => {}
        }
        Ok(())
    }

    /// Handle a text event.
    pub(crate) fn text(&mut self, text: &str) {
        match self.contexts.last_mut() {
            Some(Context::StyleCapture { css }) => css.push_str(text),
            Some(Context::Span { text: buf, .. }) => buf.push_str(text),
            // Block-level text outside a span is not part of the dialect.
            _ => {}
        }
    }

    /// Handle a tag-close event. `name` is the raw element name, kept for
    /// error messages.
    pub(crate) fn close_tag(&mut self, tag: Tag, name: &str) -> Result<()> {
        if let Some(Context::Suppress {
            tag: suppressed,
            depth,
        }) = self.contexts.last_mut()
        {
            if tag == *suppressed {
                *depth -= 1;
                if *depth == 0 {
                    self.contexts.pop();
                }
            }
            return Ok(());
        }

        match tag {
            Tag::Style => match self.contexts.pop() {
                Some(Context::StyleCapture { css }) => {
                    self.styles = ClassStyles::parse(&css);
                    log::debug!("class table built: {} styled classes", self.styles.len());
                }
                other => return self.unmatched(name, other),
            },
            Tag::Heading(_) | Tag::Paragraph | Tag::ListItem => match self.contexts.pop() {
                Some(Context::Block { kind, runs, .. }) => self.close_block(kind, runs, name)?,
                other => return self.unmatched(name, other),
            },
            Tag::OrderedList | Tag::UnorderedList => match self.contexts.pop() {
                Some(Context::List { ordered, items }) => {
                    self.output.push(Block::List { ordered, items });
                }
                other => return self.unmatched(name, other),
            },
            Tag::Span => match self.contexts.pop() {
                Some(Context::Span { text, flags, href }) => self.close_span(text, flags, href),
                other => return self.unmatched(name, other),
            },
            // Non-marker anchors push no context; marker anchors were
            // popped through the suppression path above.
            Tag::Anchor => {}
            // A stray close for a region we never opened; the reader is
            // configured to tolerate the exporter's unclosed void elements,
            // so these can surface here. Ignore them.
            Tag::Table | Tag::CommentsWrapper | Tag::Rule | Tag::Other => {}
        }
        Ok(())
    }

    /// Finalize and return the document.
    pub(crate) fn finish(mut self) -> Result<Document> {
        if !self.contexts.is_empty() {
            log::warn!(
                "input ended with {} unclosed context(s); dropping unfinished content",
                self.contexts.len()
            );
        }
        Ok(Document {
            blocks: std::mem::take(&mut self.output),
        })
    }

    fn open_block(&mut self, kind: BlockKind, attrs: &TagAttrs) {
        let flags = self.resolve_flags(attrs, StyleFlags::default());
        self.contexts.push(Context::Block {
            kind,
            flags,
            runs: Vec::new(),
        });
    }

    fn close_block(&mut self, kind: BlockKind, runs: Vec<Run>, name: &str) -> Result<()> {
        // An empty block (zero runs after capture) is silently dropped.
        if runs.is_empty() {
            return Ok(());
        }

        let runs = if self.options.merge_runs {
            merge_runs(runs)
        } else {
            runs
        };

        let block = match kind {
            BlockKind::Heading(level) => Block::Heading { level, runs },
            BlockKind::Paragraph => Block::Paragraph { runs },
            BlockKind::ListItem => Block::ListItem { runs },
        };

        match self.contexts.last_mut() {
            Some(Context::List { items, .. }) => items.push(block),
            _ if kind == BlockKind::ListItem => {
                return Err(Error::InternalInconsistency(format!(
                    "</{name}> closed outside a list"
                )));
            }
            _ => self.output.push(block),
        }
        Ok(())
    }

    fn close_span(&mut self, mut text: String, flags: StyleFlags, href: Option<String>) {
        if self.options.nbsp_to_space {
            text = substitute_nbsp(&text);
        }
        if text.is_empty() {
            return;
        }

        let mut run = Run::styled(text, flags);
        if href.is_some() {
            // Links are never rendered underlined, even when the source
            // marked the containing span underlined.
            run.underline = false;
            run.href = href;
        }

        // The nearest enclosing block collects the run; spans separated
        // from any block (inside ignored structure) contribute nothing.
        // The exporter emits spans as siblings, never nested, so appending
        // at close preserves document order.
        for context in self.contexts.iter_mut().rev() {
            if let Context::Block { runs, .. } = context {
                runs.push(run);
                return;
            }
        }
        log::debug!("dropping text run with no enclosing block");
    }

    fn open_anchor(&mut self, href: &str) -> Result<()> {
        match link::classify(href) {
            HrefKind::CommentMarker => {
                // Editor comment markers ("[a]" and the back-references in
                // the comments section) are not links and their text is
                // noise; suppress the whole anchor.
                self.contexts.push(Context::Suppress {
                    tag: Tag::Anchor,
                    depth: 1,
                });
            }
            HrefKind::Direct => self.set_pending_href(href.to_string()),
            HrefKind::Wrapped => match link::extract(href) {
                Ok(target) => self.set_pending_href(target),
                Err(err) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("keeping unrecognized href verbatim: {err}");
                    self.set_pending_href(href.to_string());
                }
                Err(err) => return Err(err),
            },
        }
        Ok(())
    }

    fn set_pending_href(&mut self, target: String) {
        match self.contexts.last_mut() {
            Some(Context::Span { href, .. }) => *href = Some(target),
            _ => log::debug!("anchor outside a span; dropping href {target:?}"),
        }
    }

    /// Flags an element carries itself: its generated classes resolved
    /// against the class table, plus its inline style, on top of whatever
    /// it inherits.
    fn resolve_flags(&self, attrs: &TagAttrs, inherited: StyleFlags) -> StyleFlags {
        let from_classes = match attrs.class.as_deref() {
            Some(class_attr) => self.styles.resolve(style::generated_classes(class_attr)),
            None => StyleFlags::default(),
        };
        style::inline_flags(attrs.style.as_deref(), inherited.union(from_classes))
    }

    /// The flags established by the nearest enclosing span or block.
    fn inherited_flags(&self) -> StyleFlags {
        for context in self.contexts.iter().rev() {
            match context {
                Context::Span { flags, .. } | Context::Block { flags, .. } => return *flags,
                _ => {}
            }
        }
        StyleFlags::default()
    }

    fn unmatched(&mut self, name: &str, popped: Option<Context>) -> Result<()> {
        // Put the frame back so the error reflects the true state.
        if let Some(context) = popped {
            self.contexts.push(context);
        }
        Err(Error::InternalInconsistency(format!(
            "close event for </{name}> with no matching open"
        )))
    }
}

/// Replace decoded non-breaking spaces (U+00A0 and the narrow U+202F) with
/// ordinary spaces.
fn substitute_nbsp(text: &str) -> String {
    text.replace(['\u{00A0}', '\u{202F}'], " ")
}
