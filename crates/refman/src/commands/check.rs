//! `refman check` command implementation.

use std::path::PathBuf;

use clap::Args;
use refman_config::{CliSettings, Config};
use refman_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover refman.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Render every page and fail when any of them produced warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));

        let pages = SiteBuilder::new(config).check()?;
        let warning_count: usize = pages.iter().map(|p| p.warnings.len()).sum();
        for page in &pages {
            for warning in &page.warnings {
                output.warning(&format!("{}: {warning}", page.rel));
            }
        }
        if warning_count > 0 {
            return Err(CliError::Validation(format!(
                "{warning_count} render warnings in {} pages",
                pages.len()
            )));
        }

        output.success(&format!("Checked {} pages", pages.len()));
        Ok(())
    }
}
