use clap::Parser;
use weekday_etl::core::ConfigProvider;
use weekday_etl::utils::{logger, validation::Validate};
use weekday_etl::{DayReportPipeline, EtlEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Weekday reports driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "weekday-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose, config.log_level(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let engine = EtlEngine::new(DayReportPipeline::local(config));

    match engine.run().await {
        Ok(summary) => {
            for failure in &summary.failures {
                tracing::error!(
                    "❌ {} skipped: {} (Severity: {:?})",
                    failure.source,
                    failure.error,
                    failure.error.severity()
                );
                eprintln!("❌ {}: {}", failure.source, failure.error.user_friendly_message());
            }

            if !summary.is_success() {
                std::process::exit(1);
            }

            tracing::info!("✅ {} reports written to {}", summary.reports, summary.output);
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Data dir: {}", config.data_dir());
    println!("  Sources: {}", config.sources().join(", "));
    println!("  Output: {}", config.output_path().unwrap_or("stdout"));

    if let Some(archive) = config.archive_name() {
        println!("  Compression: {} (ZIP)", archive);
    }

    println!("  🔍 DRY RUN MODE - no sources were read");
}
