use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the column holding the description prefix.
pub const DESCRIPTION_FIELD: &str = "description";

/// Working-week day. The derived ordering is the fixed Mon..Fri report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
        }
    }

    /// Exact, case-sensitive match against a day token. Weekend tokens are not days.
    pub fn from_token(token: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|day| day.as_str() == token)
    }

    pub fn operation(self) -> Operation {
        match self {
            Day::Mon | Day::Tue | Day::Wed => Operation::Square,
            Day::Thu | Day::Fri => Operation::Double,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Square,
    Double,
}

/// Outcome of the day transform, tagged with the operation that produced it.
///
/// Serializes as a single-key object: `{"square": 9}` or `{"double": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformResult {
    Square(i64),
    Double(i64),
}

impl TransformResult {
    pub fn value(&self) -> i64 {
        match *self {
            TransformResult::Square(n) | TransformResult::Double(n) => n,
        }
    }
}

/// Header → value pairs of one source, in header column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated key keeps its first position but takes the newest value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for RawRecord {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// One raw value per weekday after range expansion.
pub type ExpandedMap = BTreeMap<Day, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub day: Day,
    pub description: String,
    #[serde(flatten)]
    pub result: TransformResult,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub entries: Vec<ReportEntry>,
}

/// File name a source's report is written under, e.g. `3.csv` → `3.json`.
///
/// Only the file stem is kept, so `a/1.csv` and `b/1.csv` share a name.
pub fn report_file_name(source: &str) -> String {
    let stem = std::path::Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source);
    format!("{}.json", stem)
}

impl SourceReport {
    pub fn output_name(&self) -> String {
        report_file_name(&self.source)
    }
}
