use clap::Parser;
use weekday_etl::utils::{logger, validation::Validate};
use weekday_etl::{CliConfig, DayReportPipeline, EtlEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting weekday-etl");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let engine = EtlEngine::new(DayReportPipeline::local(config));

    match engine.run().await {
        Ok(summary) => {
            for failure in &summary.failures {
                eprintln!("❌ {}: {}", failure.source, failure.error.user_friendly_message());
                eprintln!("💡 {}", failure.error.recovery_suggestion());
            }

            if !summary.is_success() {
                tracing::warn!(
                    "{} of {} sources failed",
                    summary.failures.len(),
                    summary.failures.len() + summary.reports
                );
                std::process::exit(1);
            }

            tracing::info!("✅ {} reports written to {}", summary.reports, summary.output);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
