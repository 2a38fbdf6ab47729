//! Markdown rendering for reference manuals.
//!
//! Turns markdown pages into HTML fragments with the extensions the
//! manual sources rely on: slug anchors on headings, an extracted
//! outline, `.md` link rewriting, admonitions, and a directive layer
//! for content plain markdown cannot express. Directive handlers are
//! registered by name on a [`DirectiveProcessor`](directive::DirectiveProcessor)
//! before rendering starts; see [`directive`] for the syntax.
//!
//! # Example
//!
//! ```
//! use refman_renderer::directive::DirectiveProcessor;
//! use refman_renderer::{MarkdownRenderer, ParametersTableDirective};
//!
//! let processor = DirectiveProcessor::new().with_container(ParametersTableDirective::new());
//! let mut renderer = MarkdownRenderer::new().with_directives(processor);
//! let result = renderer.render(":::parameters-table\n* - x\n  - in\n  - the x parameter\n:::\n");
//! assert!(result.html.contains("<th>Parameter</th>"));
//! ```

pub mod directive;
mod html;
mod include;
mod renderer;
mod state;
mod substitution;
pub mod tables;

pub use html::{AdmonitionKind, escape_html, resolve_href};
pub use include::IncludeDirective;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::TocEntry;
pub use substitution::SubstitutionDirective;
pub use tables::{ListTableDirective, ParametersTableDirective, TableOptions};
