// SPDX-License-Identifier: MIT OR Apache-2.0

//! External tool invocation seam.
//!
//! Every subprocess the pipeline touches (git, the test runner, the line
//! counter, the release builder, the badge renderer, the transfer tool) goes
//! through the [`CommandRunner`] trait so tests can substitute a recording
//! fake and assert on invocation arguments without spawning real processes.

use std::{path::Path, process::Command};

use tracing::debug;

use crate::error::{Error, spawn_error};

/// Captured result of a single external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status reported by the tool. `-1` when terminated by a signal.
    pub status: i32,
    /// Raw bytes the tool wrote to stdout.
    pub stdout: Vec<u8>
}

impl CommandOutput {
    /// Returns `true` when the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Capability for running external tools.
///
/// Implementations block until the subprocess exits; there is no timeout and
/// no cancellation. Failing to launch the program at all is the only error
/// path — a launched tool that exits non-zero is reported through
/// [`CommandOutput::status`] and left to the caller to interpret.
pub trait CommandRunner {
    /// Runs `program` with `args`, optionally inside `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] when the program cannot be started.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>
    ) -> Result<CommandOutput, Error>;
}

/// Production [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>
    ) -> Result<CommandOutput, Error> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        debug!("running {program} {}", args.join(" "));
        let output = command.output().map_err(|source| spawn_error(program, source))?;

        let status = output.status.code().unwrap_or(-1);
        if status != 0 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("{program} exited with status {status}: {}", stderr.trim());
        }

        Ok(CommandOutput {
            status,
            stdout: output.stdout
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_output_success_checks_status() {
        let success = CommandOutput {
            status: 0,
            stdout: Vec::new()
        };
        let failure = CommandOutput {
            status: 2,
            stdout: Vec::new()
        };

        assert!(success.success());
        assert!(!failure.success());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let runner = SystemRunner;
        let output =
            runner.run("sh", &["-c", "printf hello"], None).expect("expected sh to launch");

        assert!(output.success());
        assert_eq!(output.stdout, b"hello");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_nonzero_status() {
        let runner = SystemRunner;
        let output = runner.run("sh", &["-c", "exit 3"], None).expect("expected sh to launch");

        assert_eq!(output.status, 3);
        assert!(!output.success());
    }

    #[test]
    fn system_runner_maps_missing_program_to_spawn_error() {
        let runner = SystemRunner;
        let error = runner
            .run("cicycle-definitely-not-installed", &[], None)
            .expect_err("expected launch failure");

        match error {
            Error::Spawn {
                ref program, ..
            } => {
                assert_eq!(program, "cicycle-definitely-not-installed");
            }
            other => panic!("unexpected error variant: {other:?}")
        }
    }
}
