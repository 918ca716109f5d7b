pub mod toml_config;

use crate::app::report::ReportFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use std::path::PathBuf;
use std::str::FromStr;
use toml_config::{TomlConfig, LOG_FORMATS, LOG_LEVELS, REPORT_FORMATS};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_SOURCE: &str = "sales_data.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-ledger")]
#[command(about = "Total revenue and top product of a comma-delimited sales ledger")]
pub struct CliConfig {
    /// Ledger file with a `product_name,price,quantity` header
    #[arg(long)]
    pub source: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format: text or json
    #[arg(long)]
    pub format: Option<String>,

    /// Write a sample ledger first if the source does not exist
    #[arg(long)]
    pub create_sample: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log output format: compact or json
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Fully resolved settings: command-line flags over file values over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_path: String,
    pub create_sample: bool,
    pub format: String,
    pub verbose: bool,
    pub log_level: Option<String>,
    pub log_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_path: DEFAULT_SOURCE.to_string(),
            create_sample: false,
            format: "text".to_string(),
            verbose: false,
            log_level: None,
            log_format: "compact".to_string(),
        }
    }
}

impl Settings {
    pub fn from_file(file: &TomlConfig) -> Self {
        let defaults = Settings::default();
        Self {
            source_path: file
                .source_path()
                .map(str::to_string)
                .unwrap_or(defaults.source_path),
            create_sample: file.create_sample_if_missing(),
            format: file
                .report_format()
                .map(str::to_string)
                .unwrap_or(defaults.format),
            verbose: false,
            log_level: file.log_level().map(str::to_string),
            log_format: file
                .log_format()
                .map(str::to_string)
                .unwrap_or(defaults.log_format),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_file(&file);
        if let Some(source) = &cli.source {
            settings.source_path = source.clone();
        }
        if let Some(format) = &cli.format {
            settings.format = format.clone();
        }
        if let Some(log_format) = &cli.log_format {
            settings.log_format = log_format.clone();
        }
        settings.create_sample |= cli.create_sample;
        settings.verbose = cli.verbose;

        settings.validate()?;
        Ok(settings)
    }

    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.source_path)
    }

    pub fn report_format(&self) -> Result<ReportFormat> {
        ReportFormat::from_str(&self.format)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source_path)?;
        validate_one_of("format", &self.format, &REPORT_FORMATS)?;
        validate_one_of("log_format", &self.log_format, &LOG_FORMATS)?;
        if let Some(level) = &self.log_level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
