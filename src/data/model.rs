use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ScalarValue – a single decoded field value
// ---------------------------------------------------------------------------

/// A dynamically-typed field value decoded from a `key=value` token.
/// Using `BTreeMap` / `BTreeSet` downstream so `ScalarValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
}

// -- Manual Eq/Ord so we can key BTreeMaps and BTreeSets with ScalarValue --

impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use ScalarValue::*;
        fn discriminant(v: &ScalarValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                String(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for ScalarValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ScalarValue::String(s) => s.hash(state),
            ScalarValue::Integer(i) => i.hash(state),
            ScalarValue::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "{s}"),
            ScalarValue::Integer(i) => write!(f, "{i}"),
            ScalarValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl ScalarValue {
    /// Try to interpret the value as an `f64` for numeric fields.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(v) => Some(*v),
            ScalarValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer access; floats and strings do not qualify.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// One merged CONFIG+RESULT record: field name → decoded value.
pub type FieldMap = BTreeMap<String, ScalarValue>;

// ---------------------------------------------------------------------------
// ScanPoint – one measurement extracted from a merged record
// ---------------------------------------------------------------------------

/// A single benchmark measurement: compression level, achieved ratio and
/// throughput in MB/s (unit suffix already stripped during decoding).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    pub level: i64,
    pub ratio: f64,
    pub datarate: f64,
}

/// Why a merged record could not be turned into a [`ScanPoint`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' has non-numeric value '{value}'")]
    NotNumeric {
        field: &'static str,
        value: ScalarValue,
    },
}

fn require<'a>(record: &'a FieldMap, field: &'static str) -> Result<&'a ScalarValue, RecordError> {
    record.get(field).ok_or(RecordError::MissingField(field))
}

fn require_i64(record: &FieldMap, field: &'static str) -> Result<i64, RecordError> {
    let value = require(record, field)?;
    value.as_i64().ok_or_else(|| RecordError::NotNumeric {
        field,
        value: value.clone(),
    })
}

fn require_f64(record: &FieldMap, field: &'static str) -> Result<f64, RecordError> {
    let value = require(record, field)?;
    value.as_f64().ok_or_else(|| RecordError::NotNumeric {
        field,
        value: value.clone(),
    })
}

/// Extract the grouping key and measurement tuple from one merged record.
fn scan_point(record: &FieldMap) -> Result<(ScalarValue, ScanPoint), RecordError> {
    let threads = require(record, "threads")?.clone();
    let level = require_i64(record, "level")?;
    let ratio = require_f64(record, "Ratio")?;
    let datarate = require_f64(record, "Datarate")?;
    Ok((threads, ScanPoint { level, ratio, datarate }))
}

// ---------------------------------------------------------------------------
// ThreadGroups – measurements grouped by thread count
// ---------------------------------------------------------------------------

/// Measurements partitioned by the `threads` field, in first-seen group
/// order. Within a group, points keep the order their RESULT lines had in
/// the log. The key is the decoded value, compared exactly; it is treated
/// as an opaque label, not re-parsed as a number.
#[derive(Debug, Clone, Default)]
pub struct ThreadGroups {
    groups: Vec<(ScalarValue, Vec<ScanPoint>)>,
}

impl ThreadGroups {
    /// Build groups from merged records. Records lacking one of the four
    /// required fields (or failing numeric coercion) are skipped with a
    /// warning; the remaining records still aggregate.
    pub fn from_records(records: &[FieldMap]) -> Self {
        let mut groups = ThreadGroups::default();
        for record in records {
            match scan_point(record) {
                Ok((threads, point)) => groups.push(threads, point),
                Err(e) => log::warn!("skipping record: {e}"),
            }
        }
        groups
    }

    fn push(&mut self, key: ScalarValue, point: ScanPoint) {
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, points)) => points.push(point),
            None => self.groups.push((key, vec![point])),
        }
    }

    /// Iterate groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&ScalarValue, &[ScanPoint])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &ScalarValue> {
        self.groups.iter().map(|(k, _)| k)
    }

    pub fn get(&self, index: usize) -> Option<(&ScalarValue, &[ScanPoint])> {
        self.groups.get(index).map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of measurements across all groups.
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|(_, v)| v.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// BenchReport – the complete parsed benchmark log
// ---------------------------------------------------------------------------

/// Everything the chart needs from one log file.
#[derive(Debug, Clone, Default)]
pub struct BenchReport {
    /// First header line: the data file the harness compressed.
    pub datafile: String,
    /// Second header line: the dataset identifier inside that file.
    pub dataset: String,
    /// Uncompressed dataset size in MB, if the log reported one.
    pub dataset_mb: Option<f64>,
    /// Compression algorithm label from the first record carrying `algo`.
    pub algorithm: Option<String>,
    /// Measurements grouped by thread count.
    pub groups: ThreadGroups,
}

impl BenchReport {
    /// One-line summary for the top bar.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} — {}", self.datafile, self.dataset)];
        if let Some(algo) = &self.algorithm {
            parts.push(algo.clone());
        }
        if let Some(mb) = self.dataset_mb {
            parts.push(format!("{mb} MB"));
        }
        parts.push(format!(
            "{} scans in {} groups",
            self.groups.point_count(),
            self.groups.len()
        ));
        parts.join("  ·  ")
    }
}
