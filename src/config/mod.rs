pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "weekday-etl")]
#[command(about = "Expand day-keyed CSV sources into per-weekday reports")]
pub struct CliConfig {
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, value_delimiter = ',', default_value = "1.csv,2.csv,3.csv")]
    pub sources: Vec<String>,

    /// Directory for JSON reports; reports go to stdout when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    /// Bundle all reports into this zip inside the output path
    #[arg(long)]
    pub archive: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn archive_name(&self) -> Option<&str> {
        self.archive.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CliConfig {
        CliConfig {
            data_dir: "./data".to_string(),
            sources: vec!["1.csv".to_string()],
            output_path: None,
            archive: None,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_cli_config() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_archive_requires_output_path() {
        let mut config = base();
        config.archive = Some("reports.zip".to_string());
        assert!(config.validate().is_err());

        config.output_path = Some("./out".to_string());
        assert!(config.validate().is_ok());

        config.archive = Some("reports.tar".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colliding_report_names_rejected_for_file_output() {
        let mut config = base();
        config.sources = vec!["a/1.csv".to_string(), "b/1.csv".to_string()];

        // stdout 模式沒有檔名衝突
        assert!(config.validate().is_ok());

        config.output_path = Some("./out".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'1.json'"));
    }

    #[test]
    fn test_repeated_source_rejected_for_archive_output() {
        let mut config = base();
        config.sources = vec!["3.csv".to_string(), "3.csv".to_string()];
        config.output_path = Some("./out".to_string());
        config.archive = Some("reports.zip".to_string());

        assert!(matches!(
            config.validate(),
            Err(crate::utils::error::EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_rejects_non_csv_sources() {
        let mut config = base();
        config.sources = vec!["1.csv".to_string(), "notes.txt".to_string()];
        assert!(config.validate().is_err());

        config.sources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_cli_defaults() {
        let config = CliConfig::parse_from(["weekday-etl"]);
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.sources, vec!["1.csv", "2.csv", "3.csv"]);
        assert!(config.output_path.is_none());

        let config =
            CliConfig::parse_from(["weekday-etl", "--sources", "a.csv,b.csv", "--verbose"]);
        assert_eq!(config.sources, vec!["a.csv", "b.csv"]);
        assert!(config.verbose);
    }
}
