// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording [`CommandRunner`] fake shared by the module tests.
//!
//! The fake records every invocation and replies with canned responses
//! matched on the program name and, optionally, its first argument. Programs
//! without a canned response succeed and echo their command line to stdout,
//! which keeps badge contents a deterministic function of the render
//! arguments.

use std::{
    cell::RefCell,
    path::{Path, PathBuf}
};

use crate::{
    error::Error,
    runner::{CommandOutput, CommandRunner}
};

/// One recorded external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args:    Vec<String>,
    pub cwd:     Option<PathBuf>
}

struct CannedResponse {
    program:   String,
    first_arg: Option<String>,
    output:    CommandOutput
}

/// Test double for [`CommandRunner`].
#[derive(Default)]
pub struct RecordingRunner {
    canned:      RefCell<Vec<CannedResponse>>,
    invocations: RefCell<Vec<Invocation>>
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a canned response for `program`, optionally narrowed to
    /// invocations whose first argument equals `first_arg`.
    pub fn respond(&self, program: &str, first_arg: Option<&str>, status: i32, stdout: &[u8]) {
        self.canned.borrow_mut().push(CannedResponse {
            program:   program.to_owned(),
            first_arg: first_arg.map(str::to_owned),
            output:    CommandOutput {
                status,
                stdout: stdout.to_vec()
            }
        });
    }

    /// Returns every invocation recorded so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Returns the recorded argument vectors for `program`.
    pub fn args_for(&self, program: &str) -> Vec<Vec<String>> {
        self.invocations
            .borrow()
            .iter()
            .filter(|invocation| invocation.program == program)
            .map(|invocation| invocation.args.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>
    ) -> Result<CommandOutput, Error> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_owned(),
            args:    args.iter().map(|arg| (*arg).to_owned()).collect(),
            cwd:     cwd.map(Path::to_path_buf)
        });

        let canned = self.canned.borrow();
        let matched = canned.iter().find(|response| {
            response.program == program
                && response
                    .first_arg
                    .as_deref()
                    .is_none_or(|first| args.first().copied() == Some(first))
        });

        Ok(match matched {
            Some(response) => response.output.clone(),
            None => CommandOutput {
                status: 0,
                stdout: format!("{program} {}\n", args.join(" ")).into_bytes()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_response_echoes_command_line() {
        let runner = RecordingRunner::new();
        let output = runner.run("badge-maker", &["-c", "green", "build", "success"], None)
            .expect("fake never fails to launch");

        assert!(output.success());
        assert_eq!(output.stdout, b"badge-maker -c green build success\n");
    }

    #[test]
    fn canned_response_matches_first_argument() {
        let runner = RecordingRunner::new();
        runner.respond("cargo", Some("tarpaulin"), 101, b"");

        let tarpaulin = runner
            .run("cargo", &["tarpaulin", "--out", "Json"], None)
            .expect("fake never fails to launch");
        let build = runner
            .run("cargo", &["build", "--release"], None)
            .expect("fake never fails to launch");

        assert_eq!(tarpaulin.status, 101);
        assert!(build.success());
    }

    #[test]
    fn invocations_are_recorded_in_order() {
        let runner = RecordingRunner::new();
        runner.run("git", &["pull"], None).expect("fake never fails to launch");
        runner.run("scp", &["-r", "a", "b"], None).expect("fake never fails to launch");

        let recorded = runner.invocations();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].program, "git");
        assert_eq!(recorded[1].program, "scp");
    }
}
