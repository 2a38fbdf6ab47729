//! Handler output.

/// What a directive handler produced for an occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// Raw HTML, emitted verbatim into the rendered page.
    Html(String),
    /// Markdown that is processed again before rendering, so nested
    /// directives inside it are expanded.
    Markdown(String),
    /// Leave the original syntax in place.
    Skip,
}

impl DirectiveOutput {
    /// HTML output from anything stringifiable.
    pub fn html(content: impl Into<String>) -> Self {
        Self::Html(content.into())
    }

    /// Markdown output from anything stringifiable.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self::Markdown(content.into())
    }
}
