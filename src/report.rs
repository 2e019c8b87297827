//! JSON report data model for a scan run.
//!
//! Mirrors the stdout lines in machine-readable form: one record per scanned
//! file, carrying either the detection verdict or the decode failure that
//! was skipped under `--keep-going`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of the report written by `--json`.
#[derive(Serialize, Debug, Clone)]
pub struct ScanReport {
    /// The directory that was scanned.
    pub directory: String,

    /// One record per matched file, in scan order.
    pub images: Vec<ImageRecord>,
}

impl ScanReport {
    pub fn new(directory: &Path, images: Vec<ImageRecord>) -> Self {
        Self {
            directory: directory.display().to_string(),
            images,
        }
    }
}

/// One scanned file. Exactly one of `bordered` / `error` is present.
#[derive(Serialize, Debug, Clone)]
pub struct ImageRecord {
    /// 1-based position in scan order.
    pub index: usize,

    /// Base file name within the scanned directory.
    pub file: String,

    /// Detection verdict, absent when the file failed to decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordered: Option<bool>,

    /// Decode failure skipped under `--keep-going`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageRecord {
    pub fn detected(index: usize, file: String, bordered: bool) -> Self {
        Self {
            index,
            file,
            bordered: Some(bordered),
            error: None,
        }
    }

    pub fn failed(index: usize, file: String, error: String) -> Self {
        Self {
            index,
            file,
            bordered: None,
            error: Some(error),
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &ScanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize scan report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write scan report to {}", path.display()))?;
    Ok(())
}
