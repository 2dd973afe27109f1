use crate::domain::model::{RawRecord, SourceReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn sources(&self) -> &[String];
    /// `None` prints reports to stdout.
    fn output_path(&self) -> Option<&str>;
    /// Bundle reports into a zip of this name instead of loose JSON files.
    fn archive_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn sources(&self) -> Vec<String>;
    async fn extract(&self, source: &str) -> Result<RawRecord>;
    async fn transform(&self, source: &str, record: RawRecord) -> Result<SourceReport>;
    async fn load(&self, reports: &[SourceReport]) -> Result<String>;
}
