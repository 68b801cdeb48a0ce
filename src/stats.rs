// SPDX-License-Identifier: MIT OR Apache-2.0

//! Branch statistics extracted from the verification tool reports.
//!
//! Two fixed JSON files are read from the metrics directory: the line-count
//! summary (`tokei.json`) and the coverage report (`tarpaulin-report.json`).
//! They are reduced to three scalars: lines of code, lines of comments, and
//! the rounded coverage percentage.

use std::{fs, path::Path};

use serde::{Deserialize, de::DeserializeOwned};

use crate::error::Error;

/// File name of the line-count report inside the metrics directory.
pub const LINE_COUNT_REPORT: &str = "tokei.json";
/// File name of the coverage report inside the metrics directory.
pub const COVERAGE_REPORT: &str = "tarpaulin-report.json";

/// Statistics for one branch, computed fresh per run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStats {
    /// Branch the statistics were computed for.
    pub branch:   String,
    /// Coverage percentage, rounded to the nearest integer (0..=100).
    pub coverage: u32,
    /// Total lines of code across the checkout.
    pub code:     u64,
    /// Total lines of comments across the checkout.
    pub comments: u64
}

#[derive(Debug, Deserialize)]
struct LineCountReport {
    #[serde(rename = "Total")]
    total: LineCountTotals
}

#[derive(Debug, Deserialize)]
struct LineCountTotals {
    code:     u64,
    comments: u64
}

#[derive(Debug, Deserialize)]
struct CoverageReport {
    files: Vec<FileCoverage>
}

#[derive(Debug, Deserialize)]
struct FileCoverage {
    covered:   u64,
    coverable: u64
}

/// Reads the two metrics reports and reduces them to [`BranchStats`].
///
/// Coverage is the sum of per-file `covered` over the sum of per-file
/// `coverable`, scaled to a percentage and rounded to the nearest integer.
///
/// # Errors
///
/// Returns [`Error::Metrics`] when either report is missing or malformed,
/// or when the coverable sum is zero.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use cicycle::extract_stats;
///
/// # fn main() -> Result<(), cicycle::Error> {
/// let stats = extract_stats(Path::new("develop/.metrics"), "develop")?;
/// println!("{}% coverage over {} lines", stats.coverage, stats.code);
/// # Ok(())
/// # }
/// ```
pub fn extract_stats(metrics_dir: &Path, branch: &str) -> Result<BranchStats, Error> {
    let line_count_path = metrics_dir.join(LINE_COUNT_REPORT);
    let line_count: LineCountReport = read_report(&line_count_path)?;

    let coverage_path = metrics_dir.join(COVERAGE_REPORT);
    let coverage: CoverageReport = read_report(&coverage_path)?;

    let covered: u64 = coverage.files.iter().map(|file| file.covered).sum();
    let coverable: u64 = coverage.files.iter().map(|file| file.coverable).sum();

    if coverable == 0 {
        return Err(Error::metrics(&coverage_path, "coverage report has no coverable lines"));
    }

    let percentage = (covered as f64 / coverable as f64 * 100.0).round() as u32;

    Ok(BranchStats {
        branch:   branch.to_owned(),
        coverage: percentage,
        code:     line_count.total.code,
        comments: line_count.total.comments
    })
}

fn read_report<T>(path: &Path) -> Result<T, Error>
where
    T: DeserializeOwned
{
    let contents =
        fs::read_to_string(path).map_err(|source| Error::metrics(path, source.to_string()))?;
    serde_json::from_str(&contents).map_err(|source| Error::metrics(path, source.to_string()))
}
