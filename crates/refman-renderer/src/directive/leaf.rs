//! Leaf directive trait.

use super::args::DirectiveArgs;
use super::context::DirectiveContext;
use super::output::DirectiveOutput;

/// A directive that stands on its own: `::name[content]{attrs}`.
///
/// # Example
///
/// ```
/// use refman_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, LeafDirective,
/// };
///
/// struct Rule;
///
/// impl LeafDirective for Rule {
///     fn name(&self) -> &str {
///         "rule"
///     }
///
///     fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html("<hr>")
///     }
/// }
///
/// let mut processor = DirectiveProcessor::new().with_leaf(Rule);
/// assert_eq!(processor.process("::rule"), "<hr>\n");
/// ```
pub trait LeafDirective: Send {
    /// Name the directive is registered under.
    fn name(&self) -> &str;

    /// Handle one occurrence.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;

    /// Warnings accumulated by the handler, drained by the processor.
    fn take_warnings(&mut self) -> Vec<String> {
        Vec::new()
    }
}
