//! `refman build` command implementation.

use std::path::PathBuf;

use clap::Args;
use refman_config::{CliSettings, Config};
use refman_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Theme name (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Path to configuration file (default: auto-discover refman.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            out_dir: self.output_dir.clone(),
            theme: self.theme.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.docs_resolved.out_dir.display()
        ));

        let out_dir = config.docs_resolved.out_dir.clone();
        let report = SiteBuilder::new(config).build()?;

        if report.warnings > 0 {
            output.warning(&format!(
                "{} render warnings, rerun with --verbose for details",
                report.warnings
            ));
        }
        output.success(&format!(
            "Built {} pages to {}",
            report.pages,
            out_dir.display()
        ));
        Ok(())
    }
}
