//! Static site building for refman.
//!
//! This crate provides:
//! - [`SiteBuilder`]: full builds from a markdown source tree
//! - [`render_page`]: single-page rendering for tooling
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use refman_config::Config;
//! use refman_site::SiteBuilder;
//!
//! // Load refman.toml from the working directory or a parent
//! let config = Config::load(None, None)?;
//!
//! // Render the source tree and write the HTML site
//! let report = SiteBuilder::new(config).build()?;
//! assert!(report.pages > 0);
//! # Ok(())
//! # }
//! ```

pub(crate) mod builder;
pub(crate) mod index;
pub(crate) mod page;
pub(crate) mod scan;
pub(crate) mod template;

pub use builder::{BuildError, BuildReport, SiteBuilder};
pub use index::{IndexEntry, SearchDocument, SearchIndex};
pub use page::{RenderedPage, directive_processor, render_page};
pub use scan::{SourcePage, scan_pages};
pub use template::{PageContext, render_page_shell};

// Re-export TocEntry from refman-renderer for convenience
pub use refman_renderer::TocEntry;
