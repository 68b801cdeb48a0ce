#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the pipeline crate."]
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by every pipeline stage.
///
/// Any variant raised between source sync and badge rendering is caught by
/// the single failure boundary in [`crate::run_cycle`] and converted into the
/// failure badge set. The release-build result is deliberately absent from
/// this taxonomy: it is reported as a boolean and never halts the run.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Checkout or pull of the target branch failed.
    #[error("failed to sync source: {message}")]
    Sync {
        /// Human readable description of the git failure.
        message: String
    },
    /// The coverage-enabled test run exited with a non-zero status.
    #[error("tests failed with status {status}")]
    Test {
        /// Exit status reported by the test tool.
        status: i32
    },
    /// The line-counting tool exited with a non-zero status.
    #[error("line count failed with status {status}")]
    LineCount {
        /// Exit status reported by the line counter.
        status: i32
    },
    /// A metrics report was missing, malformed, or yielded no coverable lines.
    #[error("failed to extract metrics from {path:?}: {message}")]
    Metrics {
        /// Location of the report that triggered the error.
        path:    PathBuf,
        /// Human readable description of the parse failure.
        message: String
    },
    /// Wraps I/O errors that occur while writing badge artifacts.
    #[error("failed to write badge artifact at {path:?}: {source}")]
    BadgeIo {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// The badge rendering tool exited with a non-zero status.
    #[error("badge renderer failed for {filename} with status {status}")]
    BadgeRender {
        /// Badge file that was being rendered.
        filename: String,
        /// Exit status reported by the renderer.
        status:   i32
    },
    /// An external tool could not be launched at all.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Name of the program that could not be started.
        program: String,
        /// Underlying I/O error reported by the operating system.
        source:  std::io::Error
    },
    /// Wraps I/O errors that occur while reading the configuration file.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors for the configuration file.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    }
}

impl Error {
    /// Constructs a sync error from the provided displayable value.
    pub fn sync<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Sync {
            message: message.into()
        }
    }

    /// Constructs a metrics error capturing the failing report path.
    pub fn metrics<M>(path: &Path, message: M) -> Self
    where
        M: Into<String>
    {
        Self::Metrics {
            path:    path.to_path_buf(),
            message: message.into()
        }
    }

    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Primarily intended for CLI contexts where the variant name does not
    /// add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::BadgeIo`] variant capturing the failing path and
/// source.
pub fn badge_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::BadgeIo {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Spawn`] variant naming the unlaunchable program.
pub fn spawn_error(program: &str, source: std::io::Error) -> Error {
    Error::Spawn {
        program: program.to_owned(),
        source
    }
}
