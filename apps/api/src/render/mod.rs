//! Markdown renderer for generated content.
//!
//! The model returns a restricted Markdown dialect: `#`–`###` headings,
//! `**bold**`, `*italic*`, and `*`/`-` list items. Rendering is two steps —
//! parse into a block tree, then serialize to HTML — so list grouping and
//! line-break placement are decided structurally instead of by ordered
//! string-substitution cleanup passes.

mod parser;

use crate::render::parser::{parse, Block, Span};

const H1_CLASS: &str = "text-2xl font-bold mt-10 mb-5 text-gray-900";
const H2_CLASS: &str = "text-xl font-bold mt-8 mb-4 text-gray-900";
const H3_CLASS: &str = "text-lg font-semibold mt-6 mb-3 text-gray-800";
const STRONG_CLASS: &str = "font-semibold text-gray-900";
const EM_CLASS: &str = "italic text-gray-700";
const UL_CLASS: &str = "list-disc list-inside mb-4 space-y-1";
const LI_CLASS: &str = "ml-4 mb-2 text-gray-700";

/// Converts dialect text to presentational HTML. Pure and total: malformed
/// markup degrades to literal text, nested or ordered lists flatten to plain
/// unordered items.
pub fn render(source: &str) -> String {
    serialize(&segment(&parse(source)))
}

enum Segment<'a> {
    Heading { level: u8, spans: &'a [Span] },
    List(Vec<&'a [Span]>),
    Text(&'a [Span]),
}

/// Groups parsed blocks for serialization. Consecutive list items merge into
/// one list; blank lines between two items stay inside the run (their breaks
/// are dropped), while any other line ends it.
fn segment(blocks: &[Block]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            Block::Heading { level, spans } => {
                segments.push(Segment::Heading {
                    level: *level,
                    spans,
                });
                i += 1;
            }
            Block::Text(spans) => {
                segments.push(Segment::Text(spans));
                i += 1;
            }
            Block::ListItem(spans) => {
                let mut items = vec![spans.as_slice()];
                let mut end = i + 1;
                loop {
                    let mut probe = end;
                    while probe < blocks.len() && is_blank(&blocks[probe]) {
                        probe += 1;
                    }
                    match blocks.get(probe) {
                        Some(Block::ListItem(spans)) => {
                            items.push(spans.as_slice());
                            end = probe + 1;
                        }
                        _ => break,
                    }
                }
                segments.push(Segment::List(items));
                i = end;
            }
        }
    }
    segments
}

fn is_blank(block: &Block) -> bool {
    matches!(block, Block::Text(spans) if spans.is_empty())
}

fn serialize(segments: &[Segment]) -> String {
    let mut html = String::new();
    for (i, segment) in segments.iter().enumerate() {
        // A newline becomes <br> only between two plain-text lines; breaks
        // touching a heading or a list container are dropped.
        if i > 0
            && matches!(segments[i - 1], Segment::Text(_))
            && matches!(segment, Segment::Text(_))
        {
            html.push_str("<br>");
        }
        match segment {
            Segment::Heading { level, spans } => {
                let class = match level {
                    1 => H1_CLASS,
                    2 => H2_CLASS,
                    _ => H3_CLASS,
                };
                html.push_str(&format!("<h{level} class=\"{class}\">"));
                write_spans(&mut html, spans);
                html.push_str(&format!("</h{level}>"));
            }
            Segment::List(items) => {
                html.push_str(&format!("<ul class=\"{UL_CLASS}\">"));
                for item in items {
                    html.push_str(&format!("<li class=\"{LI_CLASS}\">"));
                    write_spans(&mut html, item);
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
            }
            Segment::Text(spans) => write_spans(&mut html, spans),
        }
    }
    html
}

fn write_spans(html: &mut String, spans: &[Span]) {
    for span in spans {
        match span {
            Span::Text(text) => html.push_str(text),
            Span::Italic(text) => {
                html.push_str(&format!("<em class=\"{EM_CLASS}\">{text}</em>"));
            }
            Span::Bold(inner) => {
                html.push_str(&format!("<strong class=\"{STRONG_CLASS}\">"));
                write_spans(html, inner);
                html.push_str("</strong>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_shape() {
        let html = render("# Title\n**bold** and *italic*\n* item1\n* item2");

        assert!(html.contains(&format!("<h1 class=\"{H1_CLASS}\">Title</h1>")));
        assert!(html.contains(&format!("<strong class=\"{STRONG_CLASS}\">bold</strong>")));
        assert!(html.contains(&format!("<em class=\"{EM_CLASS}\">italic</em>")));
        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<li").count(), 2);
        assert!(html.contains("item1</li>"));
        assert!(html.contains("item2</li>"));
        // No stray breaks anywhere: every newline touches a heading or list.
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn test_plain_text_gets_one_break_per_newline() {
        assert_eq!(
            render("line one\nline two\nline three"),
            "line one<br>line two<br>line three"
        );
    }

    #[test]
    fn test_blank_line_between_paragraph_lines_keeps_both_breaks() {
        assert_eq!(render("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn test_trailing_newline_emits_break() {
        assert_eq!(render("a\n"), "a<br>");
        assert_eq!(render("a\n\n"), "a<br><br>");
    }

    #[test]
    fn test_heading_levels_map_to_h1_through_h3() {
        assert_eq!(render("# t"), format!("<h1 class=\"{H1_CLASS}\">t</h1>"));
        assert_eq!(render("## t"), format!("<h2 class=\"{H2_CLASS}\">t</h2>"));
        assert_eq!(render("### t"), format!("<h3 class=\"{H3_CLASS}\">t</h3>"));
    }

    #[test]
    fn test_no_break_between_text_and_heading() {
        assert_eq!(
            render("intro\n# Title"),
            format!("intro<h1 class=\"{H1_CLASS}\">Title</h1>")
        );
    }

    #[test]
    fn test_dash_items_join_star_items_in_one_list() {
        let html = render("* a\n- b");
        assert_eq!(
            html,
            format!(
                "<ul class=\"{UL_CLASS}\"><li class=\"{LI_CLASS}\">a</li><li class=\"{LI_CLASS}\">b</li></ul>"
            )
        );
    }

    #[test]
    fn test_blank_line_between_items_stays_one_list() {
        let html = render("* a\n\n* b");
        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<li").count(), 2);
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn test_text_after_list_keeps_single_break() {
        let html = render("* a\n\nafter");
        assert_eq!(
            html,
            format!(
                "<ul class=\"{UL_CLASS}\"><li class=\"{LI_CLASS}\">a</li></ul><br>after"
            )
        );
    }

    #[test]
    fn test_bold_list_item_label() {
        let html = render("* **Skill:** detail");
        assert!(html.contains(&format!(
            "<li class=\"{LI_CLASS}\"><strong class=\"{STRONG_CLASS}\">Skill:</strong> detail</li>"
        )));
    }

    #[test]
    fn test_markup_free_text_passes_through_unchanged() {
        assert_eq!(render("just a sentence."), "just a sentence.");
    }

    #[test]
    fn test_unbalanced_markup_does_not_panic() {
        let html = render("**open\n* item *half");
        assert!(!html.is_empty());
    }
}
