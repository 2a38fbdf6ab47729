//! Project string substitutions.

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
use crate::html::escape_html;

/// Replaces an inline directive with a fixed, HTML escaped value.
///
/// Pages use these for the project strings, so `:project`, `:version`,
/// and `:release` always reflect the configuration:
///
/// ```
/// use refman_renderer::SubstitutionDirective;
/// use refman_renderer::directive::DirectiveProcessor;
///
/// let mut processor = DirectiveProcessor::new()
///     .with_inline(SubstitutionDirective::new("release", "7.2.1"));
/// assert_eq!(processor.process("Added in :release."), "Added in 7.2.1.\n");
/// ```
pub struct SubstitutionDirective {
    name: String,
    value: String,
}

impl SubstitutionDirective {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl InlineDirective for SubstitutionDirective {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
        DirectiveOutput::html(escape_html(&self.value))
    }
}
