//! Directive extensions for markdown sources.
//!
//! Directives let manual pages embed structured content that plain
//! markdown has no syntax for. Three forms are recognized:
//!
//! - Inline: `:name[content]{attrs}` inside a line of text
//! - Leaf: `::name[content]{attrs}` standing on its own
//! - Container: `:::name[content]{attrs}` opening a block that runs
//!   until a line holding only `:::`
//!
//! Handlers are registered on a [`DirectiveProcessor`] under a fixed
//! name before any source is processed. Processing resolves each
//! occurrence against that registry in a single pass over the source;
//! unknown names pass through unchanged so downstream tooling can
//! still see them.
//!
//! Container handlers may opt into capturing their body line by line
//! (see [`ContainerDirective::captures_body`]), which is how the table
//! directives consume row syntax without the markdown parser ever
//! seeing it.

mod args;
mod container;
mod context;
mod fence;
mod inline;
mod leaf;
mod output;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use container::ContainerDirective;
pub use context::DirectiveContext;
pub use inline::InlineDirective;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig, ReadFileFn};
