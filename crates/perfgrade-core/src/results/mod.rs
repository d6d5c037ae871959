//! Load-test harness output (`test_results.json`) as consumed by the report.

use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::PerfgradeError;

/// Default file name written by the load-test harness.
pub const DEFAULT_RESULTS_FILE: &str = "test_results.json";

/// Metadata and aggregate statistics for one load-test run.
///
/// The per-request `results` array the harness also writes is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TestResultSet {
    /// Opaque run metadata (base URL, start time, worker count, ...).
    #[serde(default = "empty_object")]
    pub test_metadata: Value,
    #[serde(default)]
    pub statistics: TestStatistics,
}

impl Default for TestResultSet {
    fn default() -> Self {
        Self {
            test_metadata: empty_object(),
            statistics: TestStatistics::default(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn zero() -> Number {
    Number::from(0u64)
}

fn number_value(n: &Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}

/// Run-wide counters plus per-operation response times.
///
/// Missing counters read as zero. Rates and times keep the exact JSON number
/// the harness wrote (`100` stays `100`, `98.5` stays `98.5`) so the report
/// echoes them unchanged. Fields this type does not model are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct TestStatistics {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    /// Percentage in `[0, 100]`.
    pub success_rate: Number,
    /// Keyed by operation name, in document order.
    pub operations: IndexMap<String, OperationStats>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TestStatistics {
    fn default() -> Self {
        Self {
            total_operations: 0,
            successful_operations: 0,
            failed_operations: 0,
            success_rate: zero(),
            operations: IndexMap::new(),
            extra: Map::new(),
        }
    }
}

impl TestStatistics {
    pub fn success_rate_percent(&self) -> f64 {
        number_value(&self.success_rate)
    }
}

/// Response-time figures for a single operation type, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct OperationStats {
    pub avg_response_time: Number,
    pub min_response_time: Number,
    pub max_response_time: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            avg_response_time: zero(),
            min_response_time: zero(),
            max_response_time: zero(),
            extra: Map::new(),
        }
    }
}

impl OperationStats {
    pub fn avg_ms(&self) -> f64 {
        number_value(&self.avg_response_time)
    }

    pub fn min_ms(&self) -> f64 {
        number_value(&self.min_response_time)
    }

    pub fn max_ms(&self) -> f64 {
        number_value(&self.max_response_time)
    }
}

/// Read the harness output at `path`.
///
/// Returns `Ok(None)` when the file does not exist or holds an empty document
/// (`{}`, `[]`, `null`, `""`, `0` or `false`); the caller treats both as
/// "nothing to report". Any other non-object document is a validation error.
pub fn read_test_results(path: impl AsRef<Path>) -> Result<Option<TestResultSet>, PerfgradeError> {
    let content = match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&content)?;
    if is_empty_document(&value) {
        return Ok(None);
    }
    if !value.is_object() {
        return Err(PerfgradeError::Validation(
            "test results must be a JSON object".to_string(),
        ));
    }

    Ok(Some(serde_json::from_value(value)?))
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("writing fixture should succeed");
        path
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let result = read_test_results(dir.path().join("absent.json")).expect("should not error");
        assert!(result.is_none());
    }

    #[test]
    fn empty_object_is_none() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = write_file(&dir, "empty.json", "{}");
        assert!(read_test_results(&path).expect("should not error").is_none());
    }

    #[test]
    fn empty_array_is_none() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = write_file(&dir, "empty.json", "[]");
        assert!(read_test_results(&path).expect("should not error").is_none());
    }

    #[test]
    fn non_object_document_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = write_file(&dir, "list.json", r#"[{"success_rate": 100}]"#);
        let err = read_test_results(&path).unwrap_err();
        assert!(matches!(err, PerfgradeError::Validation(_)));
    }

    #[test]
    fn invalid_json_is_error() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = write_file(&dir, "bad.json", "not json at all");
        let err = read_test_results(&path).unwrap_err();
        assert!(matches!(err, PerfgradeError::Serde(_)));
    }

    #[test]
    fn parses_harness_output() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let doc = json!({
            "test_metadata": {
                "base_url": "http://alb.example.com",
                "concurrent_workers": 10
            },
            "statistics": {
                "total_operations": 150,
                "successful_operations": 147,
                "failed_operations": 3,
                "success_rate": 98.0,
                "operations": {
                    "create_cart": {
                        "count": 50, "successful": 50, "failed": 0,
                        "avg_response_time": 42.5,
                        "min_response_time": 12.0,
                        "max_response_time": 180.25
                    },
                    "add_items": {
                        "count": 50, "successful": 47, "failed": 3,
                        "avg_response_time": 61.0,
                        "min_response_time": 20.0,
                        "max_response_time": 300.0
                    }
                }
            },
            "results": []
        });
        let path = write_file(&dir, "test_results.json", &doc.to_string());

        let set = read_test_results(&path)
            .expect("should parse")
            .expect("should be present");
        assert_eq!(set.test_metadata["concurrent_workers"], json!(10));
        assert_eq!(set.statistics.total_operations, 150);
        assert_eq!(set.statistics.failed_operations, 3);
        assert!((set.statistics.success_rate_percent() - 98.0).abs() < f64::EPSILON);

        let names: Vec<&str> = set.statistics.operations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["create_cart", "add_items"]);
        let create = &set.statistics.operations["create_cart"];
        assert!((create.avg_ms() - 42.5).abs() < f64::EPSILON);
        assert_eq!(create.extra.get("count"), Some(&json!(50)));
    }

    #[test]
    fn missing_statistics_default_to_zero() {
        let set: TestResultSet =
            serde_json::from_value(json!({"test_metadata": {"run": "smoke"}})).expect("parse");
        assert_eq!(set.statistics.total_operations, 0);
        assert_eq!(set.statistics.success_rate_percent(), 0.0);
        assert!(set.statistics.operations.is_empty());
    }

    #[test]
    fn missing_metadata_defaults_to_empty_object() {
        let set: TestResultSet =
            serde_json::from_value(json!({"statistics": {"success_rate": 100.0}})).expect("parse");
        assert_eq!(set.test_metadata, json!({}));
    }

    #[test]
    fn whole_numbers_are_echoed_without_fraction() {
        let set: TestResultSet = serde_json::from_value(json!({
            "statistics": {
                "success_rate": 100,
                "operations": {"get_cart": {"avg_response_time": 1500, "min_response_time": 12, "max_response_time": 2100.5}}
            }
        }))
        .expect("parse");
        let op = &set.statistics.operations["get_cart"];
        assert_eq!(op.avg_ms(), 1500.0);
        assert_eq!(set.statistics.success_rate_percent(), 100.0);

        let echoed = serde_json::to_string(&set.statistics).expect("serialize");
        assert!(echoed.contains(r#""success_rate":100,"#), "{echoed}");
        assert!(echoed.contains(r#""avg_response_time":1500,"#), "{echoed}");
        assert!(echoed.contains(r#""min_response_time":12,"#), "{echoed}");
        assert!(echoed.contains(r#""max_response_time":2100.5"#), "{echoed}");
    }

    #[test]
    fn unknown_statistics_fields_are_echoed() {
        let set: TestResultSet = serde_json::from_value(json!({
            "statistics": {"success_rate": 100.0, "p95_ms": 88.0}
        }))
        .expect("parse");
        let echoed = serde_json::to_value(&set.statistics).expect("serialize");
        assert_eq!(echoed["p95_ms"], json!(88.0));
    }
}
