//! Configuration management for refman.
//!
//! Parses `refman.toml` configuration files with serde and provides
//! auto-discovery of the file in parent directories. Paths are
//! resolved relative to the config file, with `~` expansion.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub out_dir: Option<PathBuf>,
    /// Override the HTML theme name.
    pub theme: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "refman.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project identity strings.
    pub project: ProjectConfig,
    /// Documentation sources (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// HTML output options (paths are relative strings from TOML).
    html: HtmlConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved HTML configuration (set after loading).
    #[serde(skip)]
    pub html_resolved: HtmlConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Project identity strings, substituted into pages and shown in the
/// page shell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name.
    pub name: String,
    /// Short X.Y version.
    pub version: String,
    /// Full release string. Must extend the version.
    pub release: String,
    /// Author line.
    pub author: String,
    /// Copyright line for the footer.
    pub copyright: String,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    out_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Source directory holding the markdown pages.
    pub source_dir: PathBuf,
    /// Directory the HTML tree is written to.
    pub out_dir: PathBuf,
}

/// Raw HTML configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize)]
#[serde(default)]
struct HtmlConfigRaw {
    theme: String,
    theme_dir: Option<String>,
    static_dir: Option<String>,
    favicon: Option<String>,
    title: Option<String>,
    use_index: bool,
    search: bool,
    smart_quotes: bool,
    scripts: Vec<String>,
}

impl Default for HtmlConfigRaw {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            theme_dir: None,
            static_dir: None,
            favicon: None,
            title: None,
            use_index: true,
            search: true,
            smart_quotes: true,
            scripts: Vec::new(),
        }
    }
}

/// Resolved HTML output configuration.
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Theme name. Selects the bundled stylesheet unless `theme_dir`
    /// provides one.
    pub theme: String,
    /// Directory holding a custom `{theme}.css`.
    pub theme_dir: Option<PathBuf>,
    /// Directory of extra files copied into the output as-is.
    pub static_dir: Option<PathBuf>,
    /// Favicon href emitted into each page head.
    pub favicon: Option<String>,
    /// Explicit site title. Defaults to `"{name} v{release}"`.
    pub title: Option<String>,
    /// Emit the general index page. Off suppresses `genindex.html`.
    pub use_index: bool,
    /// Emit the search box and `searchindex.json`. Off suppresses
    /// both, for themes that ship their own search.
    pub search: bool,
    /// Typographic quote replacement in page text.
    pub smart_quotes: bool,
    /// Extra script hrefs emitted into each page head.
    pub scripts: Vec<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            theme_dir: None,
            static_dir: None,
            favicon: None,
            title: None,
            use_index: true,
            search: true,
            smart_quotes: true,
            scripts: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly given file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Discovery walked to the filesystem root without a match.
    #[error("No refman.toml found in the current directory or any parent")]
    NotDiscovered,
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Expand `~` and join a relative path onto the config directory.
fn resolve_path(config_dir: &Path, raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `refman.toml` in the current directory and its
    /// parents.
    ///
    /// CLI settings are applied after loading and path resolution, so
    /// CLI arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file is found, or if parsing or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            return Err(ConfigError::NotDiscovered);
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.docs_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(theme) = &settings.theme {
            self.html_resolved.theme.clone_from(theme);
        }
    }

    /// Title for the HTML shell, `"{name} v{release}"` unless the
    /// config sets one explicitly.
    #[must_use]
    pub fn html_title(&self) -> String {
        match &self.html_resolved.title {
            Some(title) => title.clone(),
            None => format!("{} v{}", self.project.name, self.project.release),
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: resolve_path(config_dir, self.docs.source_dir.as_deref().unwrap_or("docs")),
            out_dir: resolve_path(
                config_dir,
                self.docs.out_dir.as_deref().unwrap_or("build/html"),
            ),
        };
        self.html_resolved = HtmlConfig {
            theme: self.html.theme.clone(),
            theme_dir: self
                .html
                .theme_dir
                .as_deref()
                .map(|raw| resolve_path(config_dir, raw)),
            static_dir: self
                .html
                .static_dir
                .as_deref()
                .map(|raw| resolve_path(config_dir, raw)),
            favicon: self.html.favicon.clone(),
            title: self.html.title.clone(),
            use_index: self.html.use_index,
            search: self.html.search,
            smart_quotes: self.html.smart_quotes,
            scripts: self.html.scripts.clone(),
        };
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project.name, "project.name")?;
        require_non_empty(&self.project.version, "project.version")?;
        require_non_empty(&self.project.release, "project.release")?;
        if !self.project.release.starts_with(&self.project.version) {
            return Err(ConfigError::Validation(format!(
                "project.release {:?} must extend project.version {:?}",
                self.project.release, self.project.version
            )));
        }
        require_non_empty(&self.html_resolved.theme, "html.theme")?;
        for script in &self.html_resolved.scripts {
            require_non_empty(script, "html.scripts entries")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_resolved(toml: &str, base: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new(base));
        config
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_resolved("", "/site");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/site/docs"));
        assert_eq!(
            config.docs_resolved.out_dir,
            PathBuf::from("/site/build/html")
        );
        assert_eq!(config.html_resolved.theme, "default");
        assert!(config.html_resolved.use_index);
        assert!(config.html_resolved.search);
        assert!(config.html_resolved.smart_quotes);
        assert!(config.html_resolved.scripts.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[project]
name = "cdriver"
version = "7.2"
release = "7.2.1"
author = "Example Corp"
copyright = "2018, 2026, Example Corp"

[docs]
source_dir = "manual"
out_dir = "dist/html"

[html]
theme = "slate"
theme_dir = "themes"
static_dir = "static"
favicon = "favicon.ico"
title = "cdriver manual"
use_index = false
search = false
smart_quotes = false
scripts = ["extra.js"]
"#;
        let config = parse_resolved(toml, "/site");
        assert_eq!(config.project.name, "cdriver");
        assert_eq!(config.project.release, "7.2.1");
        assert_eq!(config.project.copyright, "2018, 2026, Example Corp");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/site/manual")
        );
        assert_eq!(config.docs_resolved.out_dir, PathBuf::from("/site/dist/html"));
        assert_eq!(config.html_resolved.theme, "slate");
        assert_eq!(
            config.html_resolved.theme_dir,
            Some(PathBuf::from("/site/themes"))
        );
        assert_eq!(
            config.html_resolved.static_dir,
            Some(PathBuf::from("/site/static"))
        );
        assert_eq!(config.html_resolved.favicon.as_deref(), Some("favicon.ico"));
        assert!(!config.html_resolved.use_index);
        assert!(!config.html_resolved.search);
        assert!(!config.html_resolved.smart_quotes);
        assert_eq!(config.html_resolved.scripts, vec!["extra.js"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let toml = "[docs]\nsource_dir = \"/elsewhere/docs\"\n";
        let config = parse_resolved(toml, "/site");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/elsewhere/docs")
        );
    }

    #[test]
    fn test_validate_requires_project_strings() {
        let config = parse_resolved("[project]\nname = \"x\"\n", "/site");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("project.version"));
    }

    #[test]
    fn test_release_must_extend_version() {
        let toml = r#"
[project]
name = "x"
version = "7.2"
release = "8.0.0"
"#;
        let config = parse_resolved(toml, "/site");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must extend project.version"));

        let ok = parse_resolved(
            "[project]\nname = \"x\"\nversion = \"7.2\"\nrelease = \"7.2.1\"\n",
            "/site",
        );
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_empty_script_entry_rejected() {
        let toml = r#"
[project]
name = "x"
version = "1.0"
release = "1.0.0"

[html]
scripts = [""]
"#;
        let config = parse_resolved(toml, "/site");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_html_title_defaults_to_name_and_release() {
        let config = parse_resolved(
            "[project]\nname = \"cdriver\"\nversion = \"7.2\"\nrelease = \"7.2.1\"\n",
            "/site",
        );
        assert_eq!(config.html_title(), "cdriver v7.2.1");

        let titled = parse_resolved("[html]\ntitle = \"My Manual\"\n", "/site");
        assert_eq!(titled.html_title(), "My Manual");
    }

    #[test]
    fn test_apply_cli_settings_overrides_resolved_values() {
        let mut config = parse_resolved("", "/site");
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/cli/docs")),
            out_dir: Some(PathBuf::from("/cli/out")),
            theme: Some("night".to_owned()),
        };
        config.apply_cli_settings(&settings);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/cli/docs"));
        assert_eq!(config.docs_resolved.out_dir, PathBuf::from("/cli/out"));
        assert_eq!(config.html_resolved.theme, "night");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
