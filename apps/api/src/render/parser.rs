//! Line-by-line parser for the restricted Markdown dialect.
//!
//! One block per source line: `#`–`###` headings, `*`/`-` list items,
//! everything else plain text. Inline emphasis is resolved per line.

/// Block-level node, one per source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    ListItem(Vec<Span>),
    Text(Vec<Span>),
}

/// Inline node. Bold content may carry italic runs; deeper nesting does not
/// occur in this dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Bold(Vec<Span>),
    Italic(String),
    Text(String),
}

pub fn parse(source: &str) -> Vec<Block> {
    // split, not `lines()`: a trailing newline must produce a final empty
    // block so its line break survives serialization.
    source.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("### ") {
        Block::Heading {
            level: 3,
            spans: parse_inline(rest),
        }
    } else if let Some(rest) = line.strip_prefix("## ") {
        Block::Heading {
            level: 2,
            spans: parse_inline(rest),
        }
    } else if let Some(rest) = line.strip_prefix("# ") {
        Block::Heading {
            level: 1,
            spans: parse_inline(rest),
        }
    } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        Block::ListItem(parse_inline(rest))
    } else {
        Block::Text(parse_inline(line))
    }
}

/// Splits a line into bold, italic, and plain runs. Bold (`**`) binds first;
/// italic (`*`) is resolved inside the remaining segments, including inside
/// bold content. Unbalanced markers stay as literal text.
fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some((before, inner, after)) = split_delimited(rest, "**") {
        spans.extend(italic_runs(before));
        spans.push(Span::Bold(italic_runs(inner)));
        rest = after;
    }
    spans.extend(italic_runs(rest));
    spans
}

fn italic_runs(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some((before, inner, after)) = split_delimited(rest, "*") {
        if !before.is_empty() {
            spans.push(Span::Text(before.to_string()));
        }
        spans.push(Span::Italic(inner.to_string()));
        rest = after;
    }
    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }
    spans
}

/// Leftmost shortest-match split around a delimiter pair:
/// `(before, inner, after)`.
fn split_delimited<'a>(text: &'a str, delimiter: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let open = text.find(delimiter)?;
    let inner_start = open + delimiter.len();
    let close = text[inner_start..].find(delimiter)? + inner_start;
    Some((
        &text[..open],
        &text[inner_start..close],
        &text[close + delimiter.len()..],
    ))
}
