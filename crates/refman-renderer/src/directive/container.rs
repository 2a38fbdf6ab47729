//! Container directive trait.

use super::args::DirectiveArgs;
use super::context::DirectiveContext;
use super::output::DirectiveOutput;

/// A directive that wraps a block of lines: `:::name[content]{attrs}`
/// up to a line holding only `:::`.
///
/// By default the body flows through the processor like any other
/// source, so nested directives inside it are expanded. A handler
/// that needs to consume its body as data instead overrides
/// [`captures_body`](Self::captures_body); while such a container is
/// open the processor feeds every body line to
/// [`capture`](Self::capture) verbatim, and nothing reaches the
/// rendered output until [`end`](Self::end) produces it.
///
/// # Example
///
/// ```
/// use refman_renderer::directive::{
///     ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor,
/// };
///
/// struct Banner;
///
/// impl ContainerDirective for Banner {
///     fn name(&self) -> &str {
///         "banner"
///     }
///
///     fn start(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<div class=\"banner\">{}", args.content))
///     }
///
///     fn end(&mut self, _line_num: usize) -> Option<String> {
///         Some("</div>".to_owned())
///     }
/// }
///
/// let mut processor = DirectiveProcessor::new().with_container(Banner);
/// let html = processor.process(":::banner[Deprecated]\nUse the new call.\n:::");
/// assert_eq!(html, "<div class=\"banner\">Deprecated\nUse the new call.\n</div>\n");
/// ```
pub trait ContainerDirective: Send {
    /// Name the directive is registered under.
    fn name(&self) -> &str;

    /// Called for the opening line.
    fn start(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;

    /// Whether body lines are fed to [`capture`](Self::capture)
    /// instead of flowing through the processor.
    fn captures_body(&self) -> bool {
        false
    }

    /// Receive one body line while capturing.
    fn capture(&mut self, _line: &str, _line_num: usize) {}

    /// Called for the closing `:::`. Returned HTML is emitted in its
    /// place.
    fn end(&mut self, _line_num: usize) -> Option<String> {
        None
    }

    /// Warnings accumulated by the handler, drained by the processor.
    fn take_warnings(&mut self) -> Vec<String> {
        Vec::new()
    }
}
