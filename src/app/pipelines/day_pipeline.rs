use crate::core::expander::expand;
use crate::core::loader::load_record_from_bytes;
use crate::core::report::{build, render_pretty};
use crate::config::cli::LocalStorage;
use crate::core::{ConfigProvider, Pipeline, RawRecord, SourceReport, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_unique_report_names;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Reads sources through `input` and writes reports through `output`.
pub struct DayReportPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) input: S,
    pub(crate) output: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> DayReportPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn check_report_names(reports: &[SourceReport]) -> Result<()> {
        let sources: Vec<String> = reports.iter().map(|r| r.source.clone()).collect();
        validate_unique_report_names("sources", &sources)
    }

    fn bundle(reports: &[SourceReport]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for report in reports {
            zip.start_file::<_, ()>(report.output_name(), FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&report.entries)?;
            zip.write_all(json_data.as_bytes())?;
        }

        // 完成並取回底層 Vec<u8>
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl<C: ConfigProvider> DayReportPipeline<LocalStorage, C> {
    /// Reads from the provider's data dir and writes under its output path.
    pub fn local(config: C) -> Self {
        let input = LocalStorage::new(config.data_dir());
        let output = LocalStorage::new(config.output_path().unwrap_or_default());
        Self::new(input, output, config)
    }
}

fn print_reports(reports: &[SourceReport]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for report in reports {
        stdout.write_all(render_pretty(report)?.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DayReportPipeline<S, C> {
    fn sources(&self) -> Vec<String> {
        self.config.sources().to_vec()
    }

    async fn extract(&self, source: &str) -> Result<RawRecord> {
        tracing::debug!("Reading {} from {}", source, self.config.data_dir());
        let data = self.input.read_file(source).await?;
        load_record_from_bytes(source, &data)
    }

    async fn transform(&self, source: &str, mut record: RawRecord) -> Result<SourceReport> {
        let description = record.take_description(source)?;
        let expanded = expand(record);
        tracing::debug!("{}: expanded to {} days", source, expanded.len());

        let entries = build(&expanded, &description)?;
        Ok(SourceReport {
            source: source.to_string(),
            entries,
        })
    }

    async fn load(&self, reports: &[SourceReport]) -> Result<String> {
        let Some(output_path) = self.config.output_path() else {
            print_reports(reports)?;
            return Ok("stdout".to_string());
        };

        // 寫檔前先確認沒有兩份報表落在同一個檔名
        Self::check_report_names(reports)?;

        if let Some(archive) = self.config.archive_name() {
            // 把所有報表打包成單一 ZIP
            let zip_data = Self::bundle(reports)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.output.write_file(archive, &zip_data).await?;
            return Ok(format!("{}/{}", output_path, archive));
        }

        for report in reports {
            let json_data = serde_json::to_string_pretty(&report.entries)?;
            self.output
                .write_file(&report.output_name(), json_data.as_bytes())
                .await?;
        }
        tracing::debug!("Wrote {} report files", reports.len());

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::EtlEngine;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        sources: Vec<String>,
        output_path: Option<String>,
        archive: Option<String>,
    }

    impl ConfigProvider for TestConfig {
        fn data_dir(&self) -> &str {
            "mock"
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

    fn config(sources: &[&str], archive: Option<&str>) -> TestConfig {
        TestConfig {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            output_path: Some("out".to_string()),
            archive: archive.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_transform_takes_description_and_expands() {
        let pipeline = DayReportPipeline::new(
            MockStorage::default(),
            MockStorage::default(),
            config(&["2.csv"], None),
        );
        let record: RawRecord = vec![("mon-thu", "2"), ("fri", "3"), ("description", "second_desc")]
            .into_iter()
            .collect();

        let report = pipeline.transform("2.csv", record).await.unwrap();

        assert_eq!(report.entries.len(), 5);
        assert_eq!(report.entries[0].description, "second_desc 4");
        assert_eq!(report.entries[4].description, "second_desc 6");
    }

    #[tokio::test]
    async fn test_transform_without_description_fails() {
        let pipeline = DayReportPipeline::new(
            MockStorage::default(),
            MockStorage::default(),
            config(&["x.csv"], None),
        );
        let record: RawRecord = vec![("mon-fri", "1")].into_iter().collect();

        let err = pipeline.transform("x.csv", record).await.unwrap_err();
        assert!(matches!(err, EtlError::MalformedSource { .. }));
    }

    #[tokio::test]
    async fn test_engine_writes_json_per_source_and_skips_bad_ones() {
        let input = MockStorage::default();
        input
            .put("1.csv", "mon,tue,wed,thu,fri,description\n1,2,3,4,5,first\n")
            .await;
        input.put("bad.csv", "mon,tue,description\n").await;
        let output = MockStorage::default();

        let pipeline = DayReportPipeline::new(
            input,
            output.clone(),
            config(&["1.csv", "bad.csv", "missing.csv"], None),
        );
        let summary = EtlEngine::new(pipeline).run().await.unwrap();

        assert_eq!(summary.reports, 1);
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].source, "bad.csv");
        assert!(matches!(
            summary.failures[1].error,
            EtlError::IoError(_)
        ));

        let written = output.get_file("1.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(json[4]["double"], 10);
        assert_eq!(json[4]["description"], "first 10");
    }

    #[tokio::test]
    async fn test_load_bundles_archive() {
        let input = MockStorage::default();
        input
            .put("a.csv", "description,mon-fri\nx,2\n")
            .await;
        input
            .put("b.csv", "description,mon-wed,thu-fri\ny,1,2\n")
            .await;
        let output = MockStorage::default();

        let pipeline = DayReportPipeline::new(
            input,
            output.clone(),
            config(&["a.csv", "b.csv"], Some("reports.zip")),
        );
        let summary = EtlEngine::new(pipeline).run().await.unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.output, "out/reports.zip");

        let zip_data = output.get_file("reports.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let mut content = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("b.json").unwrap(), &mut content)
            .unwrap();
        assert!(content.contains("\"description\": \"y 4\""));
    }

    async fn collision_input() -> MockStorage {
        let input = MockStorage::default();
        input.put("a/1.csv", "description,mon-fri\nA,1\n").await;
        input.put("b/1.csv", "description,mon-fri\nB,2\n").await;
        input.put("3.csv", "description,mon-fri\nC,3\n").await;
        input
    }

    #[tokio::test]
    async fn test_colliding_report_files_are_not_overwritten() {
        let output = MockStorage::default();
        let pipeline = DayReportPipeline::new(
            collision_input().await,
            output.clone(),
            config(&["a/1.csv", "b/1.csv"], None),
        );

        let err = EtlEngine::new(pipeline).run().await.unwrap_err();

        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
        assert!(output.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_source_fails_before_zipping() {
        let output = MockStorage::default();
        let pipeline = DayReportPipeline::new(
            collision_input().await,
            output.clone(),
            config(&["3.csv", "3.csv"], Some("reports.zip")),
        );

        let err = EtlEngine::new(pipeline).run().await.unwrap_err();

        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
        assert!(output.get_file("reports.zip").await.is_none());
    }

    #[test]
    fn test_local_pipeline_roots_storage_at_config_paths() {
        let pipeline = DayReportPipeline::local(config(&["1.csv"], None));
        assert_eq!(pipeline.input.base_path(), std::path::Path::new("mock"));
        assert_eq!(pipeline.output.base_path(), std::path::Path::new("out"));

        let engine = EtlEngine::new(pipeline);
        assert_eq!(engine.pipeline().config().sources(), ["1.csv"]);
    }
}
