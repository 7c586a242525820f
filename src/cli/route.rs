//! CLI route: run context and the two command entry points.

use crate::branch::columns::{parse_columns, select_columns};
use crate::branch::dates::validate_date_format;
use crate::branch::status::{max_width_from, resolve_repo_dir, MOODLE_DIR_ENV};
use crate::branch::{run_branch_status, BranchStatusOptions};
use crate::cli::parse::{BrstatusCli, CommonArgs, CompareCli};
use crate::cli::presentation::format_compare_report;
use crate::config::{ConfigLoader, ToolsConfig};
use crate::error::ToolError;
use crate::logging::LoggingConfig;
use crate::reconcile::reconcile_files;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Runtime context for one invocation: the validated configuration.
pub struct RunContext {
    config: ToolsConfig,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Load and validate configuration; `config_path` replaces the global file.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ToolError> {
        let config = ConfigLoader::load_optional(config_path.as_deref())?;
        if let Err(errors) = config.validate() {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ToolError::Config(format!("Invalid configuration: {}", message)));
        }
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Wrap an already loaded configuration.
    pub fn from_config(config: ToolsConfig) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    pub fn config(&self) -> &ToolsConfig {
        &self.config
    }

    /// Reconcile the export with the listing and format the report.
    pub fn run_compare(&self, cli: &CompareCli) -> Result<String, ToolError> {
        let (db_file, dir_file) = match (&cli.db_file, &cli.dir_file) {
            (Some(db), Some(dir)) => (db, dir),
            _ => {
                return Err(ToolError::Config(
                    "Both database file (-d) and directory listing file (-f) must be provided"
                        .to_string(),
                ))
            }
        };
        if cli.format != "text" && cli.format != "json" {
            return Err(ToolError::Config(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                cli.format
            )));
        }
        let show_name = !cli.no_name && self.config.compare.show_file_name;

        let started = Instant::now();
        let report = reconcile_files(db_file, dir_file)?;
        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            clean = report.is_clean(),
            "Compare completed"
        );
        format_compare_report(&report, &cli.format, show_name)
    }

    /// Resolve options (flags over config) and render the branch table.
    pub fn run_brstatus(&self, cli: &BrstatusCli) -> Result<String, ToolError> {
        let options = self.branch_status_options(cli)?;
        debug!(
            repo = %options.repo_dir.display(),
            columns = options.columns.len(),
            config_path = ?self.config_path,
            "Branch status options resolved"
        );
        run_branch_status(&options)
    }

    /// Options for a branch status run. Flags override configuration.
    pub fn branch_status_options(
        &self,
        cli: &BrstatusCli,
    ) -> Result<BranchStatusOptions, ToolError> {
        let settings = &self.config.brstatus;

        let columns = match cli.columns.as_deref() {
            Some(list) => parse_columns(list)?,
            None => select_columns(&settings.columns)?,
        };
        let date_format = cli
            .date_format
            .clone()
            .unwrap_or_else(|| settings.date_format.clone());
        validate_date_format(&date_format)?;

        let cwd = std::env::current_dir().map_err(|e| ToolError::io(".", e))?;
        let moodle_dir = std::env::var(MOODLE_DIR_ENV).ok();
        let repo_dir = resolve_repo_dir(cli.repo_dir.as_deref(), moodle_dir.as_deref(), &cwd)?;

        Ok(BranchStatusOptions {
            repo_dir,
            columns,
            max_width: max_width_from(cli.max_width.unwrap_or(settings.max_width)),
            date_format,
            tracker_url: cli
                .tracker_url
                .clone()
                .unwrap_or_else(|| settings.tracker_url.clone()),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }
}

/// Logging configuration: config file first, then the command-line flags.
///
/// A config file that fails to load is ignored here; [`RunContext::new`]
/// reports it once logging is up.
pub fn logging_config(common: &CommonArgs) -> LoggingConfig {
    let mut config = ConfigLoader::load_optional(common.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if common.quiet {
        config.enabled = false;
    }
    if common.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = common.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = common.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = common.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = common.log_file {
        config.file = Some(file.clone());
    }
    config
}
