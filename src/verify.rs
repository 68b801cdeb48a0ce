// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verification pipeline: coverage tests, line counting, release build.
//!
//! Three independent external invocations, each run inside the branch
//! checkout. The test and line-count steps fail the run on a non-zero exit;
//! the release build reports a boolean instead and never halts the pipeline.

use std::{fs, path::Path};

use tracing::{info, warn};

use crate::{
    error::Error,
    runner::CommandRunner,
    stats::LINE_COUNT_REPORT
};

/// Runs the coverage-enabled test suite inside `checkout`.
///
/// The coverage tool writes its JSON report into `metrics_subdir` (relative
/// to the checkout) itself; tests execute single-threaded.
///
/// # Errors
///
/// Returns [`Error::Test`] when the tool exits non-zero.
pub fn run_tests(
    runner: &dyn CommandRunner,
    checkout: &Path,
    metrics_subdir: &Path
) -> Result<(), Error> {
    let output_dir = metrics_subdir.to_string_lossy();
    let output = runner.run(
        "cargo",
        &[
            "tarpaulin",
            "--skip-clean",
            "--target-dir",
            "./target_cov",
            "--output-dir",
            &output_dir,
            "--out",
            "Json",
            "--",
            "--test-threads=1"
        ],
        Some(checkout)
    )?;

    if !output.success() {
        return Err(Error::Test {
            status: output.status
        });
    }

    info!("tests passed");
    Ok(())
}

/// Counts lines of code inside `checkout` and stores the JSON summary.
///
/// The counter prints its report to stdout; the report is written to
/// `<metrics_dir>/tokei.json`, creating the metrics directory if absent.
///
/// # Errors
///
/// Returns [`Error::LineCount`] when the tool exits non-zero and
/// [`Error::Metrics`] when the report cannot be written.
pub fn count_lines(
    runner: &dyn CommandRunner,
    checkout: &Path,
    metrics_dir: &Path
) -> Result<(), Error> {
    let output = runner.run("tokei", &["--output", "json"], Some(checkout))?;

    if !output.success() {
        return Err(Error::LineCount {
            status: output.status
        });
    }

    fs::create_dir_all(metrics_dir)
        .map_err(|source| Error::metrics(metrics_dir, source.to_string()))?;
    let report_path = metrics_dir.join(LINE_COUNT_REPORT);
    fs::write(&report_path, &output.stdout)
        .map_err(|source| Error::metrics(&report_path, source.to_string()))?;

    Ok(())
}

/// Builds the release artifact inside `checkout`.
///
/// Returns whether the build succeeded. A failed build is logged but does
/// not halt the pipeline and does not influence the build badge.
///
/// # Errors
///
/// Returns [`Error::Spawn`] only when the build tool cannot be launched.
pub fn build_release(runner: &dyn CommandRunner, checkout: &Path) -> Result<bool, Error> {
    let output = runner.run("cargo", &["build", "--release"], Some(checkout))?;

    if !output.success() {
        warn!("release build exited with status {}", output.status);
    }

    Ok(output.success())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::test_support::RecordingRunner;

    #[test]
    fn run_tests_passes_coverage_arguments() {
        let temp = tempdir().expect("failed to create tempdir");
        let runner = RecordingRunner::new();

        run_tests(&runner, temp.path(), Path::new(".metrics"))
            .expect("expected tests to pass");

        let cargo_calls = runner.args_for("cargo");
        assert_eq!(cargo_calls.len(), 1);
        assert_eq!(cargo_calls[0][0], "tarpaulin");
        assert!(cargo_calls[0].contains(&".metrics".to_owned()));
        assert!(cargo_calls[0].contains(&"--out".to_owned()));
        assert!(cargo_calls[0].contains(&"Json".to_owned()));
        assert_eq!(cargo_calls[0].last().map(String::as_str), Some("--test-threads=1"));

        let invocation = &runner.invocations()[0];
        assert_eq!(invocation.cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    fn failing_tests_map_to_test_error() {
        let temp = tempdir().expect("failed to create tempdir");
        let runner = RecordingRunner::new();
        runner.respond("cargo", Some("tarpaulin"), 101, b"");

        let error = run_tests(&runner, temp.path(), Path::new(".metrics"))
            .expect_err("expected test error");
        assert!(matches!(error, Error::Test { status: 101 }));
    }

    #[test]
    fn count_lines_writes_stdout_to_report() {
        let temp = tempdir().expect("failed to create tempdir");
        let metrics_dir = temp.path().join(".metrics");
        let runner = RecordingRunner::new();
        runner.respond("tokei", None, 0, br#"{"Total":{"code":500,"comments":50}}"#);

        count_lines(&runner, temp.path(), &metrics_dir).expect("expected line count to succeed");

        let report = std::fs::read_to_string(metrics_dir.join(LINE_COUNT_REPORT))
            .expect("expected report to exist");
        assert!(report.contains("\"code\":500"));

        let tokei_calls = runner.args_for("tokei");
        assert_eq!(tokei_calls, vec![vec!["--output".to_owned(), "json".to_owned()]]);
    }

    #[test]
    fn failing_line_count_maps_to_line_count_error() {
        let temp = tempdir().expect("failed to create tempdir");
        let runner = RecordingRunner::new();
        runner.respond("tokei", None, 2, b"");

        let error = count_lines(&runner, temp.path(), &temp.path().join(".metrics"))
            .expect_err("expected line count error");
        assert!(matches!(error, Error::LineCount { status: 2 }));
    }

    #[test]
    fn build_release_reports_success_flag() {
        let temp = tempdir().expect("failed to create tempdir");
        let runner = RecordingRunner::new();

        let built = build_release(&runner, temp.path()).expect("expected build to launch");
        assert!(built);

        let cargo_calls = runner.args_for("cargo");
        assert_eq!(cargo_calls, vec![vec!["build".to_owned(), "--release".to_owned()]]);
    }

    #[test]
    fn failed_build_returns_false_without_error() {
        let temp = tempdir().expect("failed to create tempdir");
        let runner = RecordingRunner::new();
        runner.respond("cargo", Some("build"), 101, b"");

        let built = build_release(&runner, temp.path()).expect("expected build to launch");
        assert!(!built);
    }
}
