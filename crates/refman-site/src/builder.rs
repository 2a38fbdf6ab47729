//! Full site builds.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use refman_config::Config;

use crate::index;
use crate::page::{self, RenderedPage};
use crate::scan;
use crate::template::{self, PageContext};

/// Error returned when a site build fails.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory missing or not a directory.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),
    /// I/O error reading sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// I/O error writing an output file.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Search index serialization failed.
    #[error("Failed to encode search index: {0}")]
    Index(#[from] serde_json::Error),
}

/// Summary of a completed build or check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of pages rendered.
    pub pages: usize,
    /// Total warnings across all pages.
    pub warnings: usize,
}

/// Builds a static HTML site from a markdown source tree.
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render every page without writing any output.
    ///
    /// Returns the rendered pages so callers can inspect per-page
    /// warnings.
    pub fn check(&self) -> Result<Vec<RenderedPage>, BuildError> {
        let pages = self.render_all()?;
        let report = report(&pages);
        tracing::info!(
            pages = report.pages,
            warnings = report.warnings,
            "Check completed"
        );
        Ok(pages)
    }

    /// Render every page and write the site to the output directory.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let pages = self.render_all()?;
        let out_dir = self.config.docs_resolved.out_dir.clone();
        fs::create_dir_all(&out_dir)?;

        self.write_static_assets(&out_dir)?;
        let site_title = self.config.html_title();
        for rendered in &pages {
            self.write_page(&out_dir, &site_title, rendered)?;
        }
        if self.config.html_resolved.use_index {
            self.write_genindex(&out_dir, &site_title, &pages)?;
        }
        if self.config.html_resolved.search {
            self.write_search(&out_dir, &site_title, &pages)?;
        }

        let report = report(&pages);
        tracing::info!(
            pages = report.pages,
            warnings = report.warnings,
            out_dir = %out_dir.display(),
            "Site build completed"
        );
        Ok(report)
    }

    fn render_all(&self) -> Result<Vec<RenderedPage>, BuildError> {
        let source_dir = &self.config.docs_resolved.source_dir;
        if !source_dir.is_dir() {
            return Err(BuildError::SourceDirNotFound(source_dir.clone()));
        }
        let sources = scan::scan_pages(source_dir)?;
        let pages: Vec<RenderedPage> = sources
            .par_iter()
            .map(|source| page::render_page(&self.config, source_dir, source))
            .collect::<Result<_, _>>()?;
        tracing::debug!(pages = pages.len(), "Rendered source tree");
        Ok(pages)
    }

    fn write_page(
        &self,
        out_dir: &Path,
        site_title: &str,
        rendered: &RenderedPage,
    ) -> Result<(), BuildError> {
        let root = template::root_prefix(&rendered.href);
        let html = template::render_page_shell(&self.page_context(
            site_title,
            &rendered.title,
            &rendered.html,
            &rendered.toc,
            &root,
        ));
        write_file(&out_dir.join(&rendered.href), &html)
    }

    fn write_genindex(
        &self,
        out_dir: &Path,
        site_title: &str,
        pages: &[RenderedPage],
    ) -> Result<(), BuildError> {
        let entries = index::collect_entries(pages);
        let body = index::render_genindex(&entries);
        let html =
            template::render_page_shell(&self.page_context(site_title, "Index", &body, &[], ""));
        write_file(&out_dir.join("genindex.html"), &html)
    }

    fn write_search(
        &self,
        out_dir: &Path,
        site_title: &str,
        pages: &[RenderedPage],
    ) -> Result<(), BuildError> {
        let json = serde_json::to_string(&index::search_index(pages))?;
        write_file(&out_dir.join("searchindex.json"), &json)?;

        let body = template::search_page_body();
        let html =
            template::render_page_shell(&self.page_context(site_title, "Search", &body, &[], ""));
        write_file(&out_dir.join("search.html"), &html)
    }

    /// Write `_static/`: the theme stylesheet plus any configured static
    /// directory, copied verbatim.
    fn write_static_assets(&self, out_dir: &Path) -> Result<(), BuildError> {
        let static_dir = out_dir.join("_static");
        fs::create_dir_all(&static_dir)?;
        write_file(&static_dir.join("styles.css"), &self.stylesheet()?)?;

        if let Some(source) = &self.config.html_resolved.static_dir {
            copy_dir(source, &static_dir)?;
        }
        Ok(())
    }

    /// Resolve the theme stylesheet: `{theme_dir}/{theme}.css` when
    /// present, the builtin default otherwise.
    fn stylesheet(&self) -> Result<String, BuildError> {
        let html = &self.config.html_resolved;
        if let Some(theme_dir) = &html.theme_dir {
            let path = theme_dir.join(format!("{}.css", html.theme));
            if path.is_file() {
                return Ok(fs::read_to_string(&path)?);
            }
            tracing::warn!(
                theme = %html.theme,
                path = %path.display(),
                "Theme stylesheet not found, using builtin default"
            );
        }
        Ok(template::DEFAULT_STYLESHEET.to_owned())
    }

    fn page_context<'a>(
        &'a self,
        site_title: &'a str,
        page_title: &'a str,
        body: &'a str,
        toc: &'a [refman_renderer::TocEntry],
        root: &'a str,
    ) -> PageContext<'a> {
        let html = &self.config.html_resolved;
        PageContext {
            site_title,
            page_title,
            body,
            toc,
            root,
            project: &self.config.project.name,
            release: &self.config.project.release,
            copyright: &self.config.project.copyright,
            favicon: html.favicon.as_deref(),
            scripts: &html.scripts,
            search: html.search,
            use_index: html.use_index,
        }
    }
}

fn report(pages: &[RenderedPage]) -> BuildReport {
    BuildReport {
        pages: pages.len(),
        warnings: pages.iter().map(|p| p.warnings.len()).sum(),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    let map = |source: std::io::Error| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(map)?;
    }
    fs::write(path, contents).map_err(map)
}

fn copy_dir(source: &Path, target: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|source| BuildError::Write { path: to, source })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SiteBuilder: Send, Sync);

    fn load_config(dir: &Path, html_section: &str) -> Config {
        let toml = format!(
            r#"
[project]
name = "refman"
version = "7.3"
release = "7.3.1"
author = "Example Corp"
copyright = "Copyright 2026, Example Corp."
{html_section}
"#
        );
        fs::write(dir.join("refman.toml"), toml).unwrap();
        fs::create_dir_all(dir.join("docs")).unwrap();
        Config::load(Some(&dir.join("refman.toml")), None).unwrap()
    }

    #[test]
    fn build_writes_pages_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::write(
            dir.path().join("docs/index.md"),
            "# Home\n\nWelcome to :project :release.\n",
        )
        .unwrap();

        let report = SiteBuilder::new(config).build().unwrap();
        assert_eq!(
            report,
            BuildReport {
                pages: 1,
                warnings: 0
            }
        );

        let out = dir.path().join("build/html");
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("<title>Home - refman v7.3.1</title>"));
        assert!(index.contains("Welcome to refman 7.3.1."));
        assert!(out.join("_static/styles.css").is_file());
        assert!(out.join("genindex.html").is_file());
        assert!(out.join("search.html").is_file());
        assert!(out.join("searchindex.json").is_file());
    }

    #[test]
    fn build_renders_parameter_tables_in_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::write(
            dir.path().join("docs/api.md"),
            "# API\n\n:::parameters-table\n\
             * - handle\n  - IN\n  - The connection handle.\n\
             * - timeout\n  - IN\n  - Call timeout in milliseconds.\n\
             :::\n",
        )
        .unwrap();

        SiteBuilder::new(config).build().unwrap();

        let html = fs::read_to_string(dir.path().join("build/html/api.html")).unwrap();
        assert!(html.contains("class=\"wy-table-responsive\""));
        assert!(html.contains("summary=\"The first column displays the name of the parameter."));
        assert!(html.contains("<th>Parameter</th>"));
        assert!(html.contains("<th>Mode</th>"));
        assert!(html.contains("<th>Description</th>"));
        assert!(html.contains("<td>timeout</td>"));
    }

    #[test]
    fn build_nested_pages_link_to_root_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::create_dir_all(dir.path().join("docs/guide")).unwrap();
        fs::write(dir.path().join("docs/guide/intro.md"), "# Intro\n").unwrap();

        SiteBuilder::new(config).build().unwrap();

        let html = fs::read_to_string(dir.path().join("build/html/guide/intro.html")).unwrap();
        assert!(html.contains("href=\"../_static/styles.css\""));
        assert!(html.contains("href=\"../genindex.html\""));
    }

    #[test]
    fn build_disabled_search_and_index_suppress_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "[html]\nsearch = false\nuse_index = false\n");
        fs::write(dir.path().join("docs/index.md"), "# Home\n").unwrap();

        SiteBuilder::new(config).build().unwrap();

        let out = dir.path().join("build/html");
        assert!(!out.join("search.html").exists());
        assert!(!out.join("searchindex.json").exists());
        assert!(!out.join("genindex.html").exists());
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(!index.contains("type=\"search\""));
    }

    #[test]
    fn build_copies_static_dir_and_theme_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(
            dir.path(),
            "[html]\ntheme = \"corp\"\ntheme_dir = \"themes\"\nstatic_dir = \"assets\"\n",
        );
        fs::create_dir_all(dir.path().join("themes")).unwrap();
        fs::write(dir.path().join("themes/corp.css"), "body { color: red; }\n").unwrap();
        fs::create_dir_all(dir.path().join("assets/img")).unwrap();
        fs::write(dir.path().join("assets/logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("assets/img/icon.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("docs/index.md"), "# Home\n").unwrap();

        SiteBuilder::new(config).build().unwrap();

        let out = dir.path().join("build/html");
        let css = fs::read_to_string(out.join("_static/styles.css")).unwrap();
        assert_eq!(css, "body { color: red; }\n");
        assert!(out.join("_static/logo.svg").is_file());
        assert!(out.join("_static/img/icon.svg").is_file());
    }

    #[test]
    fn build_missing_theme_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "[html]\ntheme = \"corp\"\ntheme_dir = \"themes\"\n");
        fs::create_dir_all(dir.path().join("themes")).unwrap();
        fs::write(dir.path().join("docs/index.md"), "# Home\n").unwrap();

        SiteBuilder::new(config).build().unwrap();

        let css =
            fs::read_to_string(dir.path().join("build/html/_static/styles.css")).unwrap();
        assert!(css.contains("wy-table-responsive"));
    }

    #[test]
    fn check_renders_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::write(dir.path().join("docs/index.md"), "# Home\n").unwrap();

        let pages = SiteBuilder::new(config).check().unwrap();
        assert_eq!(pages.len(), 1);
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn check_reports_page_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::write(dir.path().join("docs/bad.md"), "::include\n").unwrap();

        let pages = SiteBuilder::new(config).check().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rel, "bad.md");
        assert_eq!(pages[0].warnings.len(), 1);
    }

    #[test]
    fn build_missing_source_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), "");
        fs::remove_dir(dir.path().join("docs")).unwrap();

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BuildError::SourceDirNotFound(_)));
    }
}
