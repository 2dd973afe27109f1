pub mod etl;
pub mod expander;
pub mod loader;
pub mod report;
pub mod transform;

pub use crate::domain::model::{
    Day, ExpandedMap, RawRecord, ReportEntry, SourceReport, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
