//! Lore markup: the `*emphasis*` convention used in wizard stories.
//!
//! Stories carry exactly one markup feature: text wrapped in a pair of
//! asterisks is emphasized (typically the opening title line). The
//! tokenizer splits a story into plain segments so each renderer can
//! escape text for its own context before adding any structure.

/// A piece of a tokenized story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text. Renderers must escape this for their output context.
    Text(&'a str),
    /// The text between a matched pair of asterisks, markers excluded.
    Emphasis(&'a str),
    /// A line break in the source text.
    Break,
}

/// Tokenize a story into segments.
///
/// An asterisk with no closing partner is literal text, and an empty
/// pair (`**`) never produces an emphasis span. Newlines inside an
/// emphasized span split it into multiple spans with breaks between.
pub fn parse(story: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = story;

    while !rest.is_empty() {
        let Some(i) = rest.find(['*', '\n']) else {
            segments.push(Segment::Text(rest));
            break;
        };
        if i > 0 {
            segments.push(Segment::Text(&rest[..i]));
        }
        if rest.as_bytes()[i] == b'\n' {
            segments.push(Segment::Break);
            rest = &rest[i + 1..];
            continue;
        }
        let after = &rest[i + 1..];
        match after.find('*') {
            Some(0) => {
                // `**` stays literal; the second asterisk may still open a span
                segments.push(Segment::Text(&rest[i..i + 1]));
                rest = after;
            }
            Some(j) => {
                let mut first = true;
                for part in after[..j].split('\n') {
                    if !first {
                        segments.push(Segment::Break);
                    }
                    if !part.is_empty() {
                        segments.push(Segment::Emphasis(part));
                    }
                    first = false;
                }
                rest = &after[j + 1..];
            }
            None => {
                segments.push(Segment::Text(&rest[i..i + 1]));
                rest = after;
            }
        }
    }

    segments
}

/// Plain text with the markers removed but all text kept.
pub fn strip_markup(story: &str) -> String {
    let mut out = String::with_capacity(story.len());
    for segment in parse(story) {
        match segment {
            Segment::Text(t) | Segment::Emphasis(t) => out.push_str(t),
            Segment::Break => out.push('\n'),
        }
    }
    out
}

/// Plain text with every emphasized span deleted.
///
/// Used for meta descriptions, where the emphasized title line of a
/// story would otherwise repeat the page title.
pub fn without_emphasis(story: &str) -> String {
    let mut out = String::with_capacity(story.len());
    for segment in parse(story) {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Emphasis(_) => {}
            Segment::Break => out.push('\n'),
        }
    }
    out
}

/// Description excerpt: emphasized spans deleted, whitespace trimmed,
/// truncated to `max_chars`.
pub fn excerpt(story: &str, max_chars: usize) -> String {
    truncate_chars(without_emphasis(story).trim(), max_chars)
}

/// Card excerpt: the first emphasized span (the title line) and the
/// breaks that follow it are dropped, remaining markers stripped, and
/// the result truncated to `max_chars`.
pub fn card_excerpt(story: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(story.len());
    let mut skipped_title = false;
    let mut skipping_breaks = false;
    for segment in parse(story) {
        match segment {
            Segment::Emphasis(t) => {
                if skipped_title {
                    out.push_str(t);
                } else {
                    skipped_title = true;
                    skipping_breaks = true;
                }
            }
            Segment::Break => {
                if !skipping_breaks {
                    out.push(' ');
                }
            }
            Segment::Text(t) => {
                skipping_breaks = false;
                out.push_str(t);
            }
        }
    }
    truncate_chars(out.trim(), max_chars)
}

/// Truncate to at most `max_chars` characters on a char boundary,
/// appending an ellipsis when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_index, _)) => {
            let mut out = text[..byte_index].trim_end().to_string();
            out.push('…');
            out
        }
    }
}
