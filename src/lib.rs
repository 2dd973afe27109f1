pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::app::pipelines::day_pipeline::DayReportPipeline;
pub use self::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use self::core::etl::{EtlEngine, RunSummary, SourceFailure};
pub use self::domain::model::{Day, ReportEntry, SourceReport, TransformResult};
pub use self::utils::error::{EtlError, Result};
