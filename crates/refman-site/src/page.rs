//! Single-page rendering.

use std::fs;
use std::path::Path;

use refman_config::Config;
use refman_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
use refman_renderer::{
    IncludeDirective, ListTableDirective, MarkdownRenderer, ParametersTableDirective,
    SubstitutionDirective, TocEntry,
};

use crate::builder::BuildError;
use crate::scan::SourcePage;

/// A rendered page ready for templating.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Source path relative to the source directory.
    pub rel: String,
    /// Output path relative to the output directory, with `/` separators.
    pub href: String,
    /// Title from the first H1 heading, or the file stem when absent.
    pub title: String,
    /// Rendered body HTML.
    pub html: String,
    /// Table of contents collected from H2/H3 headings.
    pub toc: Vec<TocEntry>,
    /// Warnings emitted while rendering.
    pub warnings: Vec<String>,
}

/// Build the directive processor for one page.
///
/// The directive set is fixed here, once, at renderer construction:
/// project substitutions (`:project`, `:version`, `:release`),
/// `::include`, `:::list-table` and `:::parameters-table`. Registering
/// a name twice replaces the earlier entry, so this is the only place
/// that assembles the set.
pub fn directive_processor(
    config: &Config,
    source_dir: &Path,
    source_path: &Path,
) -> DirectiveProcessor {
    let processor_config = DirectiveProcessorConfig::new()
        .with_base_dir(source_dir)
        .with_source_path(source_path);
    DirectiveProcessor::with_config(processor_config)
        .with_inline(SubstitutionDirective::new("project", &config.project.name))
        .with_inline(SubstitutionDirective::new("version", &config.project.version))
        .with_inline(SubstitutionDirective::new("release", &config.project.release))
        .with_leaf(IncludeDirective::new())
        .with_container(ListTableDirective::new())
        .with_container(ParametersTableDirective::new())
}

/// Render one source page to body HTML.
pub fn render_page(
    config: &Config,
    source_dir: &Path,
    page: &SourcePage,
) -> Result<RenderedPage, BuildError> {
    let markdown = fs::read_to_string(&page.path)?;
    let processor = directive_processor(config, source_dir, &page.path);
    let mut renderer = MarkdownRenderer::new()
        .with_title_extraction()
        .with_smart_punctuation(config.html_resolved.smart_quotes)
        .with_directives(processor);
    let result = renderer.render(&markdown);

    for warning in &result.warnings {
        tracing::warn!(page = %page.rel, warning = %warning, "Render warning");
    }

    Ok(RenderedPage {
        rel: page.rel.clone(),
        href: page_href(&page.rel),
        title: result.title.unwrap_or_else(|| fallback_title(&page.rel)),
        html: result.html,
        toc: result.toc,
        warnings: result.warnings,
    })
}

/// Map a source path to its output path (`guide/intro.md` to
/// `guide/intro.html`).
pub(crate) fn page_href(rel: &str) -> String {
    format!("{}.html", rel.strip_suffix(".md").unwrap_or(rel))
}

fn fallback_title(rel: &str) -> String {
    let name = rel.rsplit('/').next().unwrap_or(rel);
    name.strip_suffix(".md").unwrap_or(name).to_owned()
}
