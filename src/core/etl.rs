use crate::core::Pipeline;
use crate::utils::error::{EtlError, Result};

/// A source that could not be turned into a report.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: EtlError,
}

#[derive(Debug)]
pub struct RunSummary {
    pub output: String,
    pub reports: usize,
    pub failures: Vec<SourceFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Each source is extracted and transformed on its own; one bad source
    /// is recorded in the summary and the rest still get loaded.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting ETL process...");

        let sources = self.pipeline.sources();
        let mut reports = Vec::with_capacity(sources.len());
        let mut failures = Vec::new();

        for source in sources {
            tracing::debug!("Processing source {}", source);

            match self.process_source(&source).await {
                Ok(report) => {
                    tracing::debug!("{}: built {} entries", source, report.entries.len());
                    reports.push(report);
                }
                Err(error) => {
                    tracing::error!(
                        "❌ {} failed: {} (Category: {:?})",
                        source,
                        error,
                        error.category()
                    );
                    failures.push(SourceFailure { source, error });
                }
            }
        }

        tracing::info!(
            "Transformed {} sources ({} failed)",
            reports.len(),
            failures.len()
        );

        // Load
        let output = self.pipeline.load(&reports).await?;
        tracing::info!("Output written to: {}", output);

        Ok(RunSummary {
            output,
            reports: reports.len(),
            failures,
        })
    }

    async fn process_source(&self, source: &str) -> Result<crate::domain::model::SourceReport> {
        let record = self.pipeline.extract(source).await?;
        self.pipeline.transform(source, record).await
    }
}
