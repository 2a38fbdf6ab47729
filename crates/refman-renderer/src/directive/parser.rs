//! Directive syntax recognition.

use super::args::DirectiveArgs;

/// A whole-line container marker.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedBlock {
    /// `:::name[content]{attrs}` opening a container.
    Start { name: String, args: DirectiveArgs },
    /// A line holding only colons, closing the innermost container.
    End { colons: usize },
}

/// A directive span found inside a line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedSpan {
    /// `:name[content]{attrs}`
    Inline { name: String, args: DirectiveArgs },
    /// `::name[content]{attrs}`
    Leaf { name: String, args: DirectiveArgs },
}

/// Recognize a container start or end line. Returns `None` for
/// ordinary lines, including malformed starts, which then pass
/// through untouched.
pub(crate) fn parse_block_line(line: &str) -> Option<ParsedBlock> {
    let trimmed = line.trim();
    if !trimmed.starts_with(":::") {
        return None;
    }
    let colons = trimmed.chars().take_while(|&c| c == ':').count();
    let rest = trimmed[colons..].trim();
    if rest.is_empty() {
        return Some(ParsedBlock::End { colons });
    }
    let (name, name_len) = directive_name(rest)?;
    let mut pos = name_len;
    let (content, used) = delimited(&rest[pos..], '[', ']');
    pos += used;
    let (attrs, _) = delimited(&rest[pos..], '{', '}');
    Some(ParsedBlock::Start {
        name,
        args: DirectiveArgs::parse(&content, &attrs),
    })
}

/// Find the first inline or leaf directive span in `text`. Returns the
/// span plus its byte range. Colon runs of three or more are container
/// syntax and are skipped over, as are colons not followed by a name.
pub(crate) fn parse_span(text: &str) -> Option<(ParsedSpan, usize, usize)> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(':') {
        let start = search_from + offset;
        let colons = text[start..].chars().take_while(|&c| c == ':').count();
        let after = start + colons;
        if colons <= 2 {
            if let Some((name, name_len)) = directive_name(&text[after..]) {
                let mut pos = after + name_len;
                let (content, used) = delimited(&text[pos..], '[', ']');
                pos += used;
                let (attrs, used) = delimited(&text[pos..], '{', '}');
                pos += used;
                let args = DirectiveArgs::parse(&content, &attrs);
                let span = if colons == 1 {
                    ParsedSpan::Inline { name, args }
                } else {
                    ParsedSpan::Leaf { name, args }
                };
                return Some((span, start, pos));
            }
        }
        search_from = after;
    }
    None
}

/// Leading run of name characters, or `None` when the text does not
/// start with one.
fn directive_name(text: &str) -> Option<(String, usize)> {
    let end = text
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '_')
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((text[..end].to_owned(), end))
}

/// Content of a delimited group at the start of `text`, with the
/// number of bytes consumed. Nested delimiters are balanced. Missing
/// or unterminated groups consume nothing.
fn delimited(text: &str, open: char, close: char) -> (String, usize) {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c == open => {}
        _ => return (String::new(), 0),
    }
    let mut depth = 1usize;
    for (idx, c) in chars {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (text[1..idx].to_owned(), idx + 1);
            }
        }
    }
    (String::new(), 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn block_start_with_args() {
        let parsed = parse_block_line(":::list-table[Title]{header-rows=\"1\"}").unwrap();
        let ParsedBlock::Start { name, args } = parsed else {
            panic!("expected start");
        };
        assert_eq!(name, "list-table");
        assert_eq!(args.content, "Title");
        assert_eq!(args.get("header-rows"), Some("1"));
    }

    #[test]
    fn block_end_counts_colons() {
        assert_eq!(
            parse_block_line(":::"),
            Some(ParsedBlock::End { colons: 3 })
        );
        assert_eq!(
            parse_block_line("  ::::  "),
            Some(ParsedBlock::End { colons: 4 })
        );
    }

    #[test]
    fn block_requires_three_colons() {
        assert_eq!(parse_block_line("::include[x.md]"), None);
        assert_eq!(parse_block_line("plain text"), None);
    }

    #[test]
    fn block_with_invalid_name_is_ignored() {
        assert_eq!(parse_block_line("::: [odd]"), None);
    }

    #[test]
    fn span_finds_inline_with_range() {
        let (span, start, end) = parse_span("see :version here").unwrap();
        assert_eq!(span, ParsedSpan::Inline {
            name: "version".to_owned(),
            args: DirectiveArgs::default(),
        });
        assert_eq!(&"see :version here"[start..end], ":version");
    }

    #[test]
    fn span_finds_leaf_with_content() {
        let (span, _, end) = parse_span("::include[frag.md]").unwrap();
        let ParsedSpan::Leaf { name, args } = span else {
            panic!("expected leaf");
        };
        assert_eq!(name, "include");
        assert_eq!(args.content, "frag.md");
        assert_eq!(end, "::include[frag.md]".len());
    }

    #[test]
    fn span_skips_container_colon_runs() {
        let text = "before :::note after :release";
        let (span, start, _) = parse_span(text).unwrap();
        assert_eq!(span, ParsedSpan::Inline {
            name: "release".to_owned(),
            args: DirectiveArgs::default(),
        });
        assert_eq!(start, text.find(":release").unwrap());
    }

    #[test]
    fn span_skips_bare_colons() {
        assert_eq!(parse_span("a: b: c:"), None);
        let (span, _, _) = parse_span("ratio 5:30 and :ver too").unwrap();
        let ParsedSpan::Inline { name, .. } = span else {
            panic!("expected inline");
        };
        // "30" parses as a harmless unknown name, resolved first.
        assert_eq!(name, "30");
    }

    #[test]
    fn span_with_nested_brackets() {
        let (span, _, _) = parse_span(":math[a[0] + b]").unwrap();
        let ParsedSpan::Inline { args, .. } = span else {
            panic!("expected inline");
        };
        assert_eq!(args.content, "a[0] + b");
    }

    #[test]
    fn unterminated_bracket_consumes_nothing() {
        let (span, _, end) = parse_span(":note[oops").unwrap();
        let ParsedSpan::Inline { name, args } = span else {
            panic!("expected inline");
        };
        assert_eq!(name, "note");
        assert_eq!(args.content, "");
        assert_eq!(end, ":note".len());
    }
}
