// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge rendering and the failure fallback set.
//!
//! Every run produces the same four badge files: coverage, code/comments,
//! build status, and a constant awesomeness badge. Rendering shells out to
//! the external `badge-maker` tool through the [`CommandRunner`] seam and
//! writes its stdout to the badge file, so the module itself never touches
//! SVG internals.

use std::{fs, path::Path};

use tracing::warn;

use crate::{
    error::{Error, badge_io_error},
    runner::CommandRunner,
    stats::BranchStats
};

/// External tool invoked to produce a single badge image.
const BADGE_TOOL: &str = "badge-maker";

/// Named colors accepted by the badge renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    /// Neutral placeholder color used by the failure fallback.
    LightGray
}

impl BadgeColor {
    /// Returns the color value passed to the badge renderer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::LightGray => "#dddddd"
        }
    }
}

/// Coverage color policy, evaluated highest threshold first.
///
/// Thresholds are strictly decreasing; a rule's color applies when coverage
/// is at least its threshold and no higher threshold matched.
const COVERAGE_COLOR_RULES: [(u32, BadgeColor); 4] = [
    (90, BadgeColor::Green),
    (80, BadgeColor::Yellow),
    (70, BadgeColor::Orange),
    (60, BadgeColor::Red)
];

/// Selects the coverage badge color for a coverage percentage.
///
/// # Examples
///
/// ```
/// use cicycle::{BadgeColor, coverage_color};
///
/// assert_eq!(coverage_color(92), BadgeColor::Green);
/// assert_eq!(coverage_color(59), BadgeColor::Blue);
/// ```
pub fn coverage_color(coverage: u32) -> BadgeColor {
    for (threshold, color) in COVERAGE_COLOR_RULES {
        if coverage >= threshold {
            return color;
        }
    }
    BadgeColor::Blue
}

/// One badge to render: a fixed identity plus a value and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// File name inside the badge directory.
    pub filename: &'static str,
    /// Left-hand label shown on the badge.
    pub label:    &'static str,
    /// Right-hand value shown on the badge.
    pub value:    String,
    /// Badge color.
    pub color:    BadgeColor
}

/// The four badges rendered on the happy path.
pub fn success_badges(stats: &BranchStats) -> [Badge; 4] {
    [
        Badge {
            filename: "coverage.svg",
            label:    "coverage",
            value:    format!("{}%", stats.coverage),
            color:    coverage_color(stats.coverage)
        },
        Badge {
            filename: "code.svg",
            label:    "code/comments",
            value:    format!("{}/{}", stats.code, stats.comments),
            color:    BadgeColor::Green
        },
        Badge {
            filename: "build.svg",
            label:    "build",
            value:    "success".to_owned(),
            color:    BadgeColor::Green
        },
        Badge {
            filename: "awesome.svg",
            label:    "awesomeness",
            value:    "100%".to_owned(),
            color:    BadgeColor::Blue
        }
    ]
}

/// The four neutral/failure badges rendered when any stage fails.
///
/// The awesomeness badge is constant regardless of outcome.
pub fn failure_badges() -> [Badge; 4] {
    [
        Badge {
            filename: "coverage.svg",
            label:    "coverage",
            value:    "-".to_owned(),
            color:    BadgeColor::LightGray
        },
        Badge {
            filename: "code.svg",
            label:    "code/comments",
            value:    "-".to_owned(),
            color:    BadgeColor::LightGray
        },
        Badge {
            filename: "build.svg",
            label:    "build",
            value:    "fail".to_owned(),
            color:    BadgeColor::Red
        },
        Badge {
            filename: "awesome.svg",
            label:    "awesomeness",
            value:    "100%".to_owned(),
            color:    BadgeColor::Blue
        }
    ]
}

/// Renders `badges` into `badge_dir`, replacing any prior contents.
///
/// The directory is created if absent and cleared of existing files first,
/// so no stale badge survives a run.
///
/// # Errors
///
/// Returns [`Error::BadgeIo`] when the directory or a badge file cannot be
/// written and [`Error::BadgeRender`] when the badge tool exits non-zero.
pub fn render_badges(
    runner: &dyn CommandRunner,
    badge_dir: &Path,
    badges: &[Badge]
) -> Result<(), Error> {
    reset_badge_dir(badge_dir)?;

    for badge in badges {
        render_badge(runner, badge_dir, badge)?;
    }

    Ok(())
}

/// Renders the failure fallback set, best effort.
///
/// Creates the badge directory unconditionally, which covers the case where
/// the run failed before the renderer ever ran. Existing files are kept:
/// the fallback overwrites the four badge names and leaves anything else in
/// place. Render errors on this path are logged and swallowed, since there
/// is nothing left to fall back to.
pub fn render_failure_badges(runner: &dyn CommandRunner, badge_dir: &Path) {
    if let Err(source) = fs::create_dir_all(badge_dir) {
        warn!("failed to create badge directory {}: {source}", badge_dir.display());
        return;
    }

    for badge in failure_badges() {
        if let Err(error) = render_badge(runner, badge_dir, &badge) {
            warn!("failed to render fallback badge {}: {error}", badge.filename);
        }
    }
}

fn reset_badge_dir(badge_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(badge_dir).map_err(|source| badge_io_error(badge_dir, source))?;

    let entries = fs::read_dir(badge_dir).map_err(|source| badge_io_error(badge_dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| badge_io_error(badge_dir, source))?;
        let path = entry.path();
        if path.is_file() {
            fs::remove_file(&path).map_err(|source| badge_io_error(&path, source))?;
        }
    }

    Ok(())
}

fn render_badge(runner: &dyn CommandRunner, badge_dir: &Path, badge: &Badge) -> Result<(), Error> {
    let output = runner.run(
        BADGE_TOOL,
        &["-c", badge.color.as_str(), badge.label, &badge.value],
        None
    )?;

    if !output.success() {
        return Err(Error::BadgeRender {
            filename: badge.filename.to_owned(),
            status:   output.status
        });
    }

    let path = badge_dir.join(badge.filename);
    fs::write(&path, &output.stdout).map_err(|source| badge_io_error(&path, source))
}
