//! Reads exported metric files from disk.
//!
//! Each file is a `get-metric-statistics` style JSON document with a
//! `Datapoints` array. A file that cannot be read or parsed contributes
//! nothing; it never fails the run.

use std::path::{Path, PathBuf};

use globset::Glob;
use serde::Deserialize;
use tracing::debug;

use super::Datapoint;
use crate::error::PerfgradeError;

#[derive(Debug, Deserialize)]
struct MetricFile {
    #[serde(rename = "Datapoints")]
    datapoints: Vec<Datapoint>,
}

/// Collect the datapoints of every file in `dir` whose name matches `pattern`.
///
/// Files are read in sorted name order. A missing directory or no matching
/// files yields an empty vec. Only an invalid `pattern` is an error.
pub fn load_datapoints(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<Datapoint>, PerfgradeError> {
    let dir = dir.as_ref();
    let files = matching_files(dir, pattern)?;

    let mut datapoints = Vec::new();
    for path in files {
        match read_metric_file(&path) {
            Ok(mut points) => {
                debug!(
                    file = %path.display(),
                    count = points.len(),
                    first = points.iter().find_map(Datapoint::timestamp),
                    "loaded metric file"
                );
                datapoints.append(&mut points);
            }
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping metric file");
            }
        }
    }
    Ok(datapoints)
}

/// Regular files directly inside `dir` whose name matches `pattern`, sorted.
fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, PerfgradeError> {
    let matcher = Glob::new(pattern)?.compile_matcher();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "metrics directory not readable");
            return Ok(Vec::new());
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .collect();
    files.sort();
    Ok(files)
}

fn read_metric_file(path: &Path) -> Result<Vec<Datapoint>, PerfgradeError> {
    let content = std::fs::read_to_string(path)?;
    let file: MetricFile = serde_json::from_str(&content)?;
    Ok(file.datapoints)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
