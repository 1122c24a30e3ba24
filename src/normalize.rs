//! Run merging.
//!
//! Colors, fonts and sizes each open a fresh `<span>` in the exported
//! HTML, so a visually uniform sentence arrives as many raw runs. Merging
//! adjacent runs with an identical style signature keeps the output model
//! from inheriting that fragmentation.

use crate::model::Run;

/// Merge adjacent runs whose (bold, italic, underline, href) signature is
/// identical, concatenating their text in order.
///
/// The caller never passes an empty sequence: a block with zero raw text
/// events is dropped before normalization.
pub fn merge_runs(runs: Vec<Run>) -> Vec<Run> {
    debug_assert!(!runs.is_empty(), "blocks with no runs are never normalized");

    let mut merged = Vec::new();
    let mut iter = runs.into_iter();
    let mut current = match iter.next() {
        Some(first) => first,
        None => return merged,
    };

    for run in iter {
        if run.style_signature() == current.style_signature() {
            current.text.push_str(&run.text);
        } else {
            merged.push(std::mem::replace(&mut current, run));
        }
    }

    merged.push(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> Run {
        Run {
            bold: true,
            ..Run::new(text)
        }
    }

    #[test]
    fn test_same_style_merges_to_one() {
        let runs = vec![Run::new("a"), Run::new("b"), Run::new("c")];
        let merged = merge_runs(runs);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "abc");
        assert!(!merged[0].has_styling());
    }

    #[test]
    fn test_alternating_styles_preserved() {
        let runs = vec![
            Run::new("a"),
            bold("b"),
            Run::new("c"),
            bold("d"),
            Run::new("e"),
        ];
        let merged = merge_runs(runs);
        // One output run per signature change, plus one.
        assert_eq!(merged.len(), 5);
        assert!(merged[1].bold);
        assert_eq!(merged[4].text, "e");
    }

    #[test]
    fn test_consecutive_styled_groups_merge() {
        let runs = vec![Run::new("a"), Run::new("b"), bold("c"), bold("d")];
        let merged = merge_runs(runs);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "ab");
        assert_eq!(merged[1].text, "cd");
        assert!(merged[1].bold);
    }

    #[test]
    fn test_href_splits_otherwise_identical_runs() {
        let mut linked = Run::new("site");
        linked.href = Some("http://example.com".to_string());
        let runs = vec![Run::new("see "), linked, Run::new(" here")];
        let merged = merge_runs(runs);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].href.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_single_run_passthrough() {
        let merged = merge_runs(vec![Run::new("only")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "only");
    }
}
