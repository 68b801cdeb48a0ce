// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge publication to the remote host.
//!
//! Copies every file in the badge directory to the deploy target in a single
//! `scp` invocation. This is the terminal stage of every run, reached from
//! both the success and the failure path, and it never propagates errors:
//! transfer problems are logged and otherwise ignored.

use std::{fs, path::Path};

use tracing::{info, warn};

use crate::runner::CommandRunner;

/// Copies the badge directory contents to `deploy_target`.
///
/// Files are transferred in deterministic (sorted) order. A missing or empty
/// badge directory, a launch failure, and a non-zero transfer status are all
/// reported at warn level only.
pub fn publish_badges(runner: &dyn CommandRunner, badge_dir: &Path, deploy_target: &str) {
    let entries = match fs::read_dir(badge_dir) {
        Ok(entries) => entries,
        Err(source) => {
            warn!("cannot read badge directory {}: {source}", badge_dir.display());
            return;
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("no badges to publish from {}", badge_dir.display());
        return;
    }

    let destination = format!("{deploy_target}/");
    let mut args: Vec<&str> = vec!["-r"];
    args.extend(files.iter().map(String::as_str));
    args.push(&destination);

    match runner.run("scp", &args, None) {
        Ok(output) if output.success() => {
            info!("published {} badges to {deploy_target}", files.len());
        }
        Ok(output) => {
            warn!("badge transfer exited with status {}", output.status);
        }
        Err(error) => {
            warn!("badge transfer failed: {error}");
        }
    }
}
