//! Inline directive trait.

use super::args::DirectiveArgs;
use super::context::DirectiveContext;
use super::output::DirectiveOutput;

/// A directive that occurs inside a line of text: `:name[content]{attrs}`.
///
/// # Example
///
/// ```
/// use refman_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, InlineDirective,
/// };
///
/// struct Stamp {
///     value: String,
/// }
///
/// impl InlineDirective for Stamp {
///     fn name(&self) -> &str {
///         "stamp"
///     }
///
///     fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(self.value.clone())
///     }
/// }
///
/// let mut processor = DirectiveProcessor::new().with_inline(Stamp {
///     value: "7.2.0".to_owned(),
/// });
/// assert_eq!(processor.process("Added in :stamp."), "Added in 7.2.0.\n");
/// ```
pub trait InlineDirective: Send {
    /// Name the directive is registered under.
    fn name(&self) -> &str;

    /// Handle one occurrence.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;

    /// Warnings accumulated by the handler, drained by the processor.
    fn take_warnings(&mut self) -> Vec<String> {
        Vec::new()
    }
}
