// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-run orchestration.
//!
//! The happy path walks Syncing -> Verifying -> ExtractingStats -> Rendering;
//! any error inside that span crosses the single failure boundary and renders
//! the fallback badge set instead. Publishing is the sole terminal stage and
//! runs on both paths. Execution is fully sequential and blocking, with no
//! timeout on external tools.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::{
    badge::{render_badges, render_failure_badges, success_badges},
    config::PipelineConfig,
    error::Error,
    publish::publish_badges,
    runner::CommandRunner,
    stats::{BranchStats, extract_stats},
    sync::sync_branch,
    verify::{build_release, count_lines, run_tests}
};

/// Final result of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All stages completed and the stats badges were rendered.
    Success,
    /// A stage failed and the fallback badge set was rendered instead.
    Failed
}

impl CycleOutcome {
    /// Returns `true` for the happy path.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Runs one full CI cycle for `branch` and publishes the badge directory.
///
/// Badges are published unconditionally as the final step, regardless of
/// which badge set the run produced.
pub fn run_cycle(
    runner: &dyn CommandRunner,
    config: &PipelineConfig,
    branch: &str
) -> CycleOutcome {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}")
            .expect("valid template")
    );

    let outcome = match run_stages(runner, config, branch, &pb) {
        Ok(stats) => {
            info!(
                "cycle complete: {} at {}% coverage, {}/{} code/comment lines",
                stats.branch, stats.coverage, stats.code, stats.comments
            );
            pb.finish_with_message(format!(
                "cycle complete: {branch} at {}% coverage",
                stats.coverage
            ));
            CycleOutcome::Success
        }
        Err(error) => {
            warn!("cycle failed: {error}");
            pb.set_message("rendering failure badges...");
            render_failure_badges(runner, &config.badge_dir);
            pb.finish_with_message(format!("cycle failed: {error}"));
            CycleOutcome::Failed
        }
    };

    publish_badges(runner, &config.badge_dir, &config.deploy_target);

    outcome
}

fn run_stages(
    runner: &dyn CommandRunner,
    config: &PipelineConfig,
    branch: &str,
    pb: &ProgressBar
) -> Result<BranchStats, Error> {
    pb.set_message(format!("syncing {branch}..."));
    let checkout = sync_branch(runner, config, branch)?;
    let metrics_dir = checkout.join(&config.metrics_subdir);

    pb.set_message("running tests with coverage...");
    run_tests(runner, &checkout, &config.metrics_subdir)?;

    pb.set_message("counting lines of code...");
    count_lines(runner, &checkout, &metrics_dir)?;

    pb.set_message("building release artifact...");
    build_release(runner, &checkout)?;

    pb.set_message("extracting stats...");
    let stats = extract_stats(&metrics_dir, branch)?;

    pb.set_message("rendering badges...");
    render_badges(runner, &config.badge_dir, &success_badges(&stats))?;

    Ok(stats)
}
