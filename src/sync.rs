// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source synchronization for the branch under verification.
//!
//! Guarantees a local checkout named after the branch exists under the
//! workspace directory and is up to date with its remote. The checkout path
//! is returned and threaded explicitly through the later stages; the process
//! working directory is never changed.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::{config::PipelineConfig, error::Error, runner::CommandRunner};

/// Ensures an up-to-date checkout of `branch` and returns its path.
///
/// Clones the repository with `--single-branch` when no checkout directory
/// exists yet, then pulls the latest remote state inside the checkout.
///
/// # Errors
///
/// Returns [`Error::Sync`] when the clone or the pull exits non-zero and
/// [`Error::Spawn`] when git cannot be launched.
pub fn sync_branch(
    runner: &dyn CommandRunner,
    config: &PipelineConfig,
    branch: &str
) -> Result<PathBuf, Error> {
    let checkout = config.workspace_dir.join(branch);
    let checkout_arg = checkout.to_string_lossy();

    if checkout.exists() {
        debug!("reusing existing checkout at {}", checkout.display());
    } else {
        info!("cloning {} into {}", config.repo_url, checkout.display());
        let output = runner.run(
            "git",
            &[
                "clone",
                "--single-branch",
                "--branch",
                branch,
                &config.repo_url,
                &checkout_arg
            ],
            None
        )?;
        if !output.success() {
            return Err(Error::sync(format!(
                "clone of branch {branch} exited with status {}",
                output.status
            )));
        }
    }

    let output = runner.run("git", &["pull"], Some(&checkout))?;
    if !output.success() {
        return Err(Error::sync(format!(
            "pull of branch {branch} exited with status {}",
            output.status
        )));
    }

    Ok(checkout)
}
