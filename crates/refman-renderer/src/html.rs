//! HTML emission helpers.

use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

/// Escape text for HTML element and attribute positions.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Admonition categories, mapped from blockquote alert markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl From<BlockQuoteKind> for AdmonitionKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

impl AdmonitionKind {
    fn css_class(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

pub(crate) fn admonition_start(kind: AdmonitionKind, out: &mut String) {
    let _ = write!(
        out,
        "<div class=\"admonition {}\"><p class=\"admonition-title\">{}</p>",
        kind.css_class(),
        kind.title()
    );
}

pub(crate) fn admonition_end(out: &mut String) {
    out.push_str("</div>");
}

pub(crate) fn code_block(language: Option<&str>, content: &str, out: &mut String) {
    match language {
        Some(language) => {
            let _ = write!(
                out,
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(language),
                escape_html(content)
            );
        }
        None => {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        }
    }
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let _ = write!(
        out,
        "<img src=\"{}\" alt=\"{}\"",
        escape_html(src),
        escape_html(alt)
    );
    if !title.is_empty() {
        let _ = write!(out, " title=\"{}\"", escape_html(title));
    }
    out.push('>');
}

/// Rewrite a cross reference for static HTML output. Relative links to
/// `.md` files point at the generated page instead, and fragments
/// survive the rewrite. Absolute URLs, root relative paths, and bare
/// anchors pass through.
#[must_use]
pub fn resolve_href(url: &str) -> String {
    if url.starts_with('#')
        || url.starts_with('/')
        || url.contains("://")
        || url.starts_with("mailto:")
    {
        return url.to_owned();
    }
    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };
    let rewritten = path
        .strip_suffix(".md")
        .map_or_else(|| path.to_owned(), |base| format!("{base}.html"));
    match fragment {
        Some(fragment) => format!("{rewritten}#{fragment}"),
        None => rewritten,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn md_links_are_rewritten() {
        assert_eq!(resolve_href("other.md"), "other.html");
        assert_eq!(resolve_href("api/conn.md"), "api/conn.html");
        assert_eq!(resolve_href("other.md#section"), "other.html#section");
    }

    #[test]
    fn non_page_links_pass_through() {
        assert_eq!(resolve_href("#anchor"), "#anchor");
        assert_eq!(resolve_href("/site/page.md"), "/site/page.md");
        assert_eq!(resolve_href("https://example.com/x.md"), "https://example.com/x.md");
        assert_eq!(resolve_href("mailto:docs@example.com"), "mailto:docs@example.com");
        assert_eq!(resolve_href("image.png"), "image.png");
    }

    #[test]
    fn admonition_kinds_map_from_markers() {
        assert_eq!(AdmonitionKind::from(BlockQuoteKind::Note), AdmonitionKind::Note);
        assert_eq!(
            AdmonitionKind::from(BlockQuoteKind::Caution),
            AdmonitionKind::Caution
        );
    }

    #[test]
    fn code_block_with_language() {
        let mut out = String::new();
        code_block(Some("c"), "int x;\n", &mut out);
        assert_eq!(out, "<pre><code class=\"language-c\">int x;\n</code></pre>");
    }

    #[test]
    fn image_title_is_optional() {
        let mut plain = String::new();
        image("pic.png", "Alt", "", &mut plain);
        assert_eq!(plain, "<img src=\"pic.png\" alt=\"Alt\">");

        let mut titled = String::new();
        image("pic.png", "Alt", "Hover", &mut titled);
        assert_eq!(titled, "<img src=\"pic.png\" alt=\"Alt\" title=\"Hover\">");
    }
}
