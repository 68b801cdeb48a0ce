// SPDX-License-Identifier: MIT OR Apache-2.0

//! Automates one continuous-integration cycle for an external project.
//!
//! The library syncs a branch checkout, runs the verification tools (tests
//! with coverage, line counting, release build), reduces the tool reports to
//! branch statistics, renders SVG status badges, and publishes them to a
//! remote host. All external tools are reached through the [`CommandRunner`]
//! seam so the pipeline can be exercised in tests without spawning real
//! processes.

mod badge;
mod config;
mod error;
mod pipeline;
mod publish;
mod runner;
mod stats;
mod sync;
#[cfg(test)]
mod test_support;
mod verify;

pub use badge::{
    Badge, BadgeColor, coverage_color, failure_badges, render_badges, render_failure_badges,
    success_badges
};
pub use config::PipelineConfig;
pub use error::{Error, badge_io_error, io_error, spawn_error};
pub use pipeline::{CycleOutcome, run_cycle};
pub use publish::publish_badges;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use stats::{BranchStats, COVERAGE_REPORT, LINE_COUNT_REPORT, extract_stats};
pub use sync::sync_branch;
pub use verify::{build_release, count_lines, run_tests};
