//! JSON report describing how a scroll scenario ended.
//!
//! The report records where the viewer came to rest (offsets and velocity)
//! next to the pass/fail verdict, so a failing snap or fling can be read off
//! the file without re-running the scenario.

use anyhow::{bail, Context, Result};
use glide_core::Vec3;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Whether every assertion of the scenario held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Outcome of a scroll scenario and the viewer state it left behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    /// Index of the first assertion that did not hold
    pub failed_step_index: Option<usize>,
    /// Step type of that assertion (`assert_offset`, `assert_speed`, ...)
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Content translation when the run stopped
    pub final_offsets: Vec3,
    /// Scrolling velocity when the run stopped
    pub final_speed: Vec3,
}

impl HeadlessReport {
    pub fn passed(elapsed_frames: u64, elapsed_ms: u64, offsets: Vec3, speed: Vec3) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames,
            elapsed_ms,
            final_offsets: offsets,
            final_speed: speed,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        elapsed_frames: u64,
        elapsed_ms: u64,
        offsets: Vec3,
        speed: Vec3,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_frames,
            elapsed_ms,
            final_offsets: offsets,
            final_speed: speed,
        }
    }

    /// Write the report under the working directory
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        check_report_path(path)?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create report directory {}", dir.display()))?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(path, payload)
            .with_context(|| format!("failed to write report {}", path.display()))
    }

    /// Pretty JSON followed by a newline
    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Reports may only land below the directory the runner was started from
fn check_report_path(path: &Path) -> Result<()> {
    if path.is_absolute() || path.has_root() {
        bail!("report path {} must be relative", path.display());
    }
    let escapes = path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        bail!("report path {} must not contain '..' or a drive prefix", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_offsets_as_arrays() {
        let report = HeadlessReport::passed(3, 48, Vec3::new(-50.0, 0.0, 0.0), Vec3::ZERO);
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "passed");
        assert_eq!(value["final_offsets"][0], -50.0);
        assert!(value["failed_step_index"].is_null());
    }

    #[test]
    fn test_report_path_must_stay_relative() {
        let report = HeadlessReport::passed(0, 0, Vec3::ZERO, Vec3::ZERO);
        assert!(report.write_to_path(Path::new("/tmp/report.json")).is_err());
        assert!(report.write_to_path(Path::new("../report.json")).is_err());
        assert!(check_report_path(Path::new("out/snap/report.json")).is_ok());
    }

    #[test]
    fn test_failed_report_keeps_final_state() {
        let report = HeadlessReport::failed(
            "assert_speed",
            4,
            "speed mismatch".to_string(),
            10,
            160,
            Vec3::new(0.0, -40.0, 0.0),
            Vec3::new(0.0, 12.5, 0.0),
        );
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();

        assert!(out.ends_with(b"\n"));
        let parsed: HeadlessReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.status, ReportStatus::Failed);
        assert_eq!(parsed.failed_step_index, Some(4));
        assert_eq!(parsed.final_speed, Vec3::new(0.0, 12.5, 0.0));
    }
}
