use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{BenchReport, FieldMap, ScalarValue, ThreadGroups};

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// What a raw log line is, decided purely from its position and prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    /// Line 0: name of the data file the harness compressed.
    HeaderDatafile,
    /// Line 1: dataset identifier inside that file.
    HeaderDataset,
    /// `CONFIG:` – benchmark parameters for the RESULT lines that follow.
    Config,
    /// `RESULT:` – one measured outcome under the current config.
    Result,
    /// ` Dataset=` – dataset size summary (leading space significant).
    DatasetInfo,
    /// Anything else: timing chatter, verbose output, blank lines.
    Ignored,
}

/// Classify one line. The first two lines are headers regardless of content.
/// Prefixes are matched on the line with only trailing whitespace stripped;
/// the leading space of ` Dataset=` is part of the harness's output format.
pub fn classify(index: usize, line: &str) -> LineTag {
    match index {
        0 => LineTag::HeaderDatafile,
        1 => LineTag::HeaderDataset,
        _ if line.starts_with("CONFIG:") => LineTag::Config,
        _ if line.starts_with("RESULT:") => LineTag::Result,
        _ if line.starts_with(" Dataset=") => LineTag::DatasetInfo,
        _ => LineTag::Ignored,
    }
}

// ---------------------------------------------------------------------------
// Key-value decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed token '{0}': expected key=value")]
    MalformedToken(String),
}

/// Unit suffixes the harness appends to numeric values. Checked in order;
/// the remainder after stripping is trimmed before parsing because the
/// harness writes `Datarate=800 MB/s` with a space.
const UNIT_SUFFIXES: [&str; 2] = ["MB/s", "MB"];

/// Decode one raw value into the narrowest type that fits: integer, then
/// unit-suffixed float, then plain float, else the original string. A value
/// whose suffix strips but does not parse falls back to a string rather than
/// failing, so noisy logs degrade instead of aborting.
pub fn decode_value(raw: &str) -> ScalarValue {
    if let Ok(i) = raw.parse::<i64>() {
        return ScalarValue::Integer(i);
    }
    for unit in UNIT_SUFFIXES {
        if let Some(stripped) = raw.strip_suffix(unit) {
            if let Ok(f) = stripped.trim().parse::<f64>() {
                return ScalarValue::Float(f);
            }
        }
    }
    if let Ok(f) = raw.parse::<f64>() {
        return ScalarValue::Float(f);
    }
    ScalarValue::String(raw.to_string())
}

fn decode_fields<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<FieldMap, ParseError> {
    let mut fields = FieldMap::new();
    for token in tokens {
        let token = token.trim();
        let (key, raw) = token
            .split_once('=')
            .ok_or_else(|| ParseError::MalformedToken(token.to_string()))?;
        fields.insert(key.to_string(), decode_value(raw));
    }
    Ok(fields)
}

/// Decode a CONFIG/RESULT line: split on tabs, skip the tag echo in the
/// first token, then decode each `key=value` token. A line that is just the
/// tag yields an empty map.
pub fn decode_tagged(line: &str) -> Result<FieldMap, ParseError> {
    decode_fields(line.split('\t').skip(1))
}

/// Decode a dataset-info line: every tab-separated token is a `key=value`.
pub fn decode_untagged(line: &str) -> Result<FieldMap, ParseError> {
    decode_fields(line.split('\t'))
}

// ---------------------------------------------------------------------------
// Set-once capture
// ---------------------------------------------------------------------------

/// Holder that keeps the first value it is given and ignores the rest.
#[derive(Debug, Default)]
struct SetOnce<T>(Option<T>);

impl<T> SetOnce<T> {
    fn set(&mut self, value: T) {
        if self.0.is_none() {
            self.0 = Some(value);
        }
    }

    fn into_inner(self) -> Option<T> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// The parse fold
// ---------------------------------------------------------------------------

/// Intermediate parse product: headers, one-shot captures and the merged
/// records in RESULT-line order.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    pub datafile: String,
    pub dataset: String,
    pub dataset_mb: Option<f64>,
    pub algorithm: Option<String>,
    pub records: Vec<FieldMap>,
}

impl ParsedLog {
    /// Aggregate the records into thread groups and hand over the captures.
    pub fn into_report(self) -> BenchReport {
        let groups = ThreadGroups::from_records(&self.records);
        BenchReport {
            datafile: self.datafile,
            dataset: self.dataset,
            dataset_mb: self.dataset_mb,
            algorithm: self.algorithm,
            groups,
        }
    }
}

/// Parse a whole benchmark log.
///
/// A synchronous fold over the lines: the most recent CONFIG line's fields
/// are kept in a local accumulator, replaced wholesale by each new CONFIG
/// line, and every RESULT line merges its own fields over a clone of it
/// (RESULT wins on key collision). A RESULT before any CONFIG still yields
/// a record with just its own fields. Lines with malformed tokens are
/// skipped with a warning; nothing short of I/O failure aborts the parse.
pub fn parse_log(content: &str) -> ParsedLog {
    let mut datafile = String::new();
    let mut dataset = String::new();
    let mut config = FieldMap::new();
    let mut records: Vec<FieldMap> = Vec::new();
    let mut dataset_mb: SetOnce<f64> = SetOnce::default();
    let mut algorithm: SetOnce<String> = SetOnce::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_end();
        match classify(index, line) {
            LineTag::HeaderDatafile => datafile = line.trim().to_string(),
            LineTag::HeaderDataset => dataset = line.trim().to_string(),
            LineTag::Config => match decode_tagged(line) {
                Ok(fields) => config = fields,
                Err(e) => log::warn!("line {}: skipping CONFIG: {e}", index + 1),
            },
            LineTag::Result => match decode_tagged(line) {
                Ok(fields) => {
                    let mut record = config.clone();
                    record.extend(fields);
                    if let Some(algo) = record.get("algo") {
                        algorithm.set(algo.to_string());
                    }
                    records.push(record);
                }
                Err(e) => log::warn!("line {}: skipping RESULT: {e}", index + 1),
            },
            LineTag::DatasetInfo => match decode_untagged(line) {
                Ok(fields) => {
                    if let Some(mb) = fields.get("Dataset").and_then(ScalarValue::as_f64) {
                        dataset_mb.set(mb);
                    }
                }
                Err(e) => log::warn!("line {}: skipping dataset info: {e}", index + 1),
            },
            LineTag::Ignored => {}
        }
    }

    ParsedLog {
        datafile,
        dataset,
        dataset_mb: dataset_mb.into_inner(),
        algorithm: algorithm.into_inner(),
        records,
    }
}

// ---------------------------------------------------------------------------
// File entry-point
// ---------------------------------------------------------------------------

/// Read a benchmark log from disk and parse it into a [`BenchReport`].
/// Opening or reading the file is the only fatal failure.
pub fn load_file(path: &Path) -> Result<BenchReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading benchmark log {}", path.display()))?;
    Ok(parse_log(&content).into_report())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_two_lines_are_headers_regardless_of_content() {
        assert_eq!(classify(0, "CONFIG:\talgo=lz4"), LineTag::HeaderDatafile);
        assert_eq!(classify(1, "RESULT:\tRatio=2"), LineTag::HeaderDataset);
    }

    #[test]
    fn classifier_matches_prefixes() {
        assert_eq!(classify(2, "CONFIG:\talgo=lz4"), LineTag::Config);
        assert_eq!(classify(2, "RESULT:\tRatio=2.5"), LineTag::Result);
        assert_eq!(classify(2, " Dataset=10240MB\tCompressed=4096MB"), LineTag::DatasetInfo);
        assert_eq!(classify(2, "Dataset=10240MB"), LineTag::Ignored);
        assert_eq!(classify(2, "Time: Wall=7.9\tUser=30.1"), LineTag::Ignored);
        assert_eq!(classify(2, ""), LineTag::Ignored);
    }

    #[test]
    fn decode_value_round_trips() {
        assert_eq!(decode_value("3"), ScalarValue::Integer(3));
        assert_eq!(decode_value("1280MB/s"), ScalarValue::Float(1280.0));
        assert_eq!(decode_value("10240MB"), ScalarValue::Float(10240.0));
        assert_eq!(decode_value("2.5"), ScalarValue::Float(2.5));
        assert_eq!(decode_value("zstd"), ScalarValue::String("zstd".to_string()));
    }

    #[test]
    fn decode_value_tolerates_space_before_unit() {
        // The harness writes "Datarate=800 MB/s".
        assert_eq!(decode_value("800 MB/s"), ScalarValue::Float(800.0));
    }

    #[test]
    fn suffix_mismatch_falls_back_to_string() {
        assert_eq!(
            decode_value("fastMB/s"),
            ScalarValue::String("fastMB/s".to_string())
        );
        assert_eq!(decode_value("MB"), ScalarValue::String("MB".to_string()));
    }

    #[test]
    fn tagged_line_skips_the_tag_echo() {
        let fields = decode_tagged("CONFIG:\talgo=zstd\tthreads=4").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.get("algo"),
            Some(&ScalarValue::String("zstd".to_string()))
        );
        assert_eq!(fields.get("threads"), Some(&ScalarValue::Integer(4)));
    }

    #[test]
    fn bare_tag_yields_empty_map() {
        assert!(decode_tagged("RESULT:").unwrap().is_empty());
    }

    #[test]
    fn token_without_equals_is_malformed() {
        let err = decode_tagged("RESULT:\tRatio=2.5\tbadtoken").unwrap_err();
        assert!(matches!(err, ParseError::MalformedToken(t) if t == "badtoken"));
    }

    #[test]
    fn value_splits_on_first_equals_only() {
        let fields = decode_tagged("CONFIG:\tnote=a=b").unwrap();
        assert_eq!(
            fields.get("note"),
            Some(&ScalarValue::String("a=b".to_string()))
        );
    }

    #[test]
    fn result_fields_override_config_fields() {
        let log = "f\nd\nCONFIG:\tthreads=4\tlevel=9\nRESULT:\tlevel=1\tRatio=2.5\tDatarate=800MB/s\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(
            parsed.records[0].get("level"),
            Some(&ScalarValue::Integer(1))
        );
        assert_eq!(
            parsed.records[0].get("threads"),
            Some(&ScalarValue::Integer(4))
        );
    }

    #[test]
    fn result_without_config_yields_partial_record() {
        let log = "f\nd\nRESULT:\tthreads=2\tlevel=1\tRatio=2.0\tDatarate=500MB/s\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].len(), 4);
    }

    #[test]
    fn new_config_replaces_old_wholesale() {
        let log = "f\nd\nCONFIG:\talgo=lz4\tshuffle=1\nCONFIG:\talgo=zstd\nRESULT:\tRatio=2.0\n";
        let parsed = parse_log(log);
        // "shuffle" came only from the first config and must not leak through.
        assert!(parsed.records[0].get("shuffle").is_none());
        assert_eq!(
            parsed.records[0].get("algo"),
            Some(&ScalarValue::String("zstd".to_string()))
        );
    }

    #[test]
    fn dataset_and_algorithm_capture_first_value_only() {
        let log = "f\nd\n Dataset=10240MB\tCompressed=4096MB\n Dataset=999MB\n\
                   CONFIG:\talgo=zstd\tthreads=4\tlevel=1\n\
                   RESULT:\tRatio=2.5\tDatarate=800MB/s\n\
                   CONFIG:\talgo=lz4\tthreads=4\tlevel=1\n\
                   RESULT:\tRatio=1.8\tDatarate=1400MB/s\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.dataset_mb, Some(10240.0));
        assert_eq!(parsed.algorithm.as_deref(), Some("zstd"));
    }

    #[test]
    fn malformed_line_does_not_abort_the_parse() {
        let log = "f\nd\n\
                   RESULT:\tthreads=2\tlevel=1\tRatio=2.0\tDatarate=500MB/s\n\
                   RESULT:\tbadtoken\n\
                   RESULT:\tthreads=2\tlevel=2\tRatio=2.4\tDatarate=400MB/s\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.records.len(), 2);
    }

    #[test]
    fn short_file_yields_empty_headers() {
        let parsed = parse_log("only-line\n");
        assert_eq!(parsed.datafile, "only-line");
        assert_eq!(parsed.dataset, "");
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn end_to_end_sample_log() {
        let log = "mydata.bin\n\
                   dataset-A\n\
                   \x20Dataset=10240MB\n\
                   CONFIG:\talgo=zstd\tthreads=4\n\
                   RESULT:\tthreads=4\tlevel=1\tRatio=2.5\tDatarate=800MB/s\n\
                   RESULT:\tthreads=4\tlevel=2\tRatio=3.1\tDatarate=600MB/s\n\
                   CONFIG:\talgo=zstd\tthreads=8\n\
                   RESULT:\tthreads=8\tlevel=1\tRatio=2.5\tDatarate=1500MB/s\n";
        let report = parse_log(log).into_report();

        assert_eq!(report.datafile, "mydata.bin");
        assert_eq!(report.dataset, "dataset-A");
        assert_eq!(report.dataset_mb, Some(10240.0));
        assert_eq!(report.algorithm.as_deref(), Some("zstd"));
        assert_eq!(report.groups.len(), 2);

        let (key, points) = report.groups.get(0).unwrap();
        assert_eq!(*key, ScalarValue::Integer(4));
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].level, points[0].ratio, points[0].datarate), (1, 2.5, 800.0));
        assert_eq!((points[1].level, points[1].ratio, points[1].datarate), (2, 3.1, 600.0));

        let (key, points) = report.groups.get(1).unwrap();
        assert_eq!(*key, ScalarValue::Integer(8));
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].level, points[0].ratio, points[0].datarate), (1, 2.5, 1500.0));
    }

    #[test]
    fn set_once_keeps_the_first_value() {
        let mut slot: SetOnce<f64> = SetOnce::default();
        slot.set(10240.0);
        slot.set(999.0);
        assert_eq!(slot.into_inner(), Some(10240.0));
    }
}
