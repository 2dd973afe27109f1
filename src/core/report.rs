//! Report builder: one entry per weekday, always in Mon..Fri order.

use crate::core::transform::{coerce_value, transform};
use crate::domain::model::{Day, ExpandedMap, ReportEntry, SourceReport};
use crate::utils::error::{EtlError, Result};

pub fn build(expanded: &ExpandedMap, description_prefix: &str) -> Result<Vec<ReportEntry>> {
    Day::ALL
        .into_iter()
        .map(|day| -> Result<ReportEntry> {
            let raw = expanded.get(&day).ok_or_else(|| EtlError::MissingDay {
                day: day.to_string(),
            })?;
            let value = coerce_value(day, raw)?;
            let result = transform(day, value)?;

            Ok(ReportEntry {
                day,
                description: format!("{} {}", description_prefix, result.value()),
                result,
                value,
            })
        })
        .collect()
}

/// Console rendering: source name, pretty JSON, then two blank lines.
pub fn render_pretty(report: &SourceReport) -> Result<String> {
    let json = serde_json::to_string_pretty(&report.entries)?;
    Ok(format!("{}\n{}\n\n\n", report.source, json))
}
