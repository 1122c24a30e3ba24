//! End-to-end tests over a representative export fixture.

use undocs::{parse, parse_with_options, Block, Error, ParseOptions};

/// Trimmed-down copy of a real "Download as HTML" export: generated class
/// stylesheet, spans for every formatting change, a wrapped link, a mailto
/// link, a layout table, comment markers and a comments section.
const EXPORT: &str = r##"<html><head><meta content="text/html; charset=UTF-8" http-equiv="content-type"><style type="text/css">.c0{font-weight:bold}.c1{font-style:italic}.c2{text-decoration:underline}.c3{color:#1155cc;text-decoration:underline}.c4{color:#ff0000;font-family:"Courier New"}</style></head><body class="c9">
<h1 class="c6"><span>Title</span></h1>
<p class="c7"><span>Intro paragraph.</span></p>
<p class="c7"><span></span></p>
<ul class="c8"><li class="c7"><span>plain item</span></li><li class="c7"><span>If you mark text </span><span class="c0">bold</span><span> we keep it </span><span class="c0">bold</span><span>.</span></li><li class="c7"><span>mix </span><span class="c1">italic</span><span class="c2">underline</span></li></ul>
<p class="c7"><span>Use </span><span class="c3"><a class="c10" href="https://www.google.com/url?q=http%3A%2F%2Fexample.com%2Fdocs&amp;sa=D&amp;ust=123">absolute links</a></span><span> everywhere.</span></p>
<p class="c7"><span>Here is a </span><span><a href="mailto:foo@bar.com">mailto a tag</a></span></p>
<hr>
<table class="c11"><tbody><tr><td><p><span>table noise</span></p></td></tr></tbody></table>
<p class="c7"><span>Everything after this page break will be published:</span></p>
<hr style="page-break-before:always;display:none;">
<p class="c7"><span>annotated</span><sup><a href="#cmnt1" id="cmnt_ref1">[a]</a></sup></p>
<p class="c7"><span>one&nbsp;&nbsp;two</span></p>
<div style="border:1px solid black;margin:5px"><p class="c7"><a href="#cmnt_ref1" id="cmnt1">[a]</a><span>comment body text</span></p></div>
</body></html>"##;

#[test]
fn test_block_sequence() {
    let doc = parse(EXPORT).unwrap();

    let kinds: Vec<&str> = doc
        .blocks
        .iter()
        .map(|b| match b {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::ListItem { .. } => "list_item",
            Block::List { .. } => "list",
            Block::Rule => "rule",
            Block::PageBreak => "page_break",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "list",
            "paragraph",
            "paragraph",
            "rule",
            "paragraph",
            "page_break",
            "paragraph",
            "paragraph",
        ]
    );
}

#[test]
fn test_heading() {
    let doc = parse(EXPORT).unwrap();
    match &doc.blocks[0] {
        Block::Heading { level, runs } => {
            assert_eq!(*level, 1);
            assert_eq!(runs[0].text, "Title");
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn test_empty_paragraph_is_dropped() {
    let doc = parse(EXPORT).unwrap();
    // The empty <p><span></span></p> after the intro leaves no block; the
    // list follows the intro directly.
    assert!(matches!(doc.blocks[2], Block::List { .. }));
    for block in &doc.blocks {
        if let Some(runs) = block.runs() {
            assert!(!runs.is_empty());
        }
    }
}

#[test]
fn test_list_items_and_run_merging() {
    let doc = parse(EXPORT).unwrap();
    let items = match &doc.blocks[2] {
        Block::List { ordered, items } => {
            assert!(!ordered);
            items
        }
        other => panic!("expected list, got {other:?}"),
    };
    assert_eq!(items.len(), 3);

    // Alternating plain/bold spans survive as five runs.
    let runs = items[1].runs().unwrap();
    assert_eq!(runs.len(), 5);
    assert_eq!(runs[0].text, "If you mark text ");
    assert!(runs[1].bold);
    assert_eq!(runs[1].text, "bold");
    assert!(!runs[2].bold);
    assert!(runs[3].bold);
    assert_eq!(runs[4].text, ".");

    let runs = items[2].runs().unwrap();
    assert!(runs[1].italic);
    assert!(runs[2].underline);
}

#[test]
fn test_wrapped_link_is_unwrapped() {
    let doc = parse(EXPORT).unwrap();
    let runs = doc.blocks[3].runs().unwrap();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "Use ");
    assert_eq!(runs[1].text, "absolute links");
    assert_eq!(runs[1].href.as_deref(), Some("http://example.com/docs"));
    // Links are never underlined, even though .c3 declares underline.
    assert!(!runs[1].underline);
    assert_eq!(runs[2].text, " everywhere.");
}

#[test]
fn test_mailto_link_used_verbatim() {
    let doc = parse(EXPORT).unwrap();
    let runs = doc.blocks[4].runs().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Here is a ");
    assert!(runs[0].href.is_none());
    assert_eq!(runs[1].text, "mailto a tag");
    assert_eq!(runs[1].href.as_deref(), Some("mailto:foo@bar.com"));
}

#[test]
fn test_table_contents_fully_skipped() {
    let doc = parse(EXPORT).unwrap();
    let all_text = doc.plain_text();
    assert!(!all_text.contains("table noise"));
    // The paragraph after the table survives.
    assert_eq!(
        doc.blocks[6].plain_text(),
        "Everything after this page break will be published:"
    );
}

#[test]
fn test_rule_and_page_break() {
    let doc = parse(EXPORT).unwrap();
    assert_eq!(doc.blocks[5], Block::Rule);
    assert_eq!(doc.blocks[7], Block::PageBreak);
}

#[test]
fn test_comment_markers_and_comment_section_dropped() {
    let doc = parse(EXPORT).unwrap();
    let all_text = doc.plain_text();
    assert!(!all_text.contains("[a]"));
    assert!(!all_text.contains("comment body text"));
    assert_eq!(doc.blocks[8].plain_text(), "annotated");
}

#[test]
fn test_nbsp_becomes_ordinary_space() {
    let doc = parse(EXPORT).unwrap();
    assert_eq!(doc.blocks[9].plain_text(), "one  two");
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse(EXPORT).unwrap();
    let second = parse(EXPORT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_link_fails_the_parse() {
    let html = r#"<p><span><a href="https://www.google.com/url?sa=D">broken</a></span></p>"#;
    let err = parse(html).unwrap_err();
    assert!(matches!(err, Error::MalformedLink(_)));
}

#[test]
fn test_lenient_mode_keeps_raw_href() {
    let html = r#"<p><span><a href="https://www.google.com/url?sa=D">broken</a></span></p>"#;
    let doc = parse_with_options(html, ParseOptions::new().lenient()).unwrap();
    let runs = doc.blocks[0].runs().unwrap();
    assert_eq!(
        runs[0].href.as_deref(),
        Some("https://www.google.com/url?sa=D")
    );
}

#[test]
fn test_merge_runs_can_be_disabled() {
    let html = "<p><span>a</span><span>b</span></p>";
    let doc = parse_with_options(html, ParseOptions::new().with_merge_runs(false)).unwrap();
    assert_eq!(doc.blocks[0].runs().unwrap().len(), 2);

    let doc = parse(html).unwrap();
    assert_eq!(doc.blocks[0].runs().unwrap().len(), 1);
    assert_eq!(doc.blocks[0].plain_text(), "ab");
}

#[test]
fn test_serialized_shape_matches_model() {
    let doc = parse(EXPORT).unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    let heading = &json["blocks"][0];
    assert_eq!(heading["type"], "heading");
    assert_eq!(heading["level"], 1);
    // Plain runs omit false attributes entirely.
    assert_eq!(
        heading["runs"][0],
        serde_json::json!({ "text": "Title" })
    );

    let link_run = &json["blocks"][3]["runs"][1];
    assert_eq!(link_run["href"], "http://example.com/docs");
    assert!(link_run.get("underline").is_none());
}
