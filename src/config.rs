// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline configuration.
//!
//! The defaults below are the crate's compiled-in endpoints; an optional YAML
//! document passed via `--config` may override any subset of them. The
//! structure intentionally keeps every field optional in the document so a
//! deployment only states what differs from the defaults.

use std::{fs, path::{Path, PathBuf}};

use serde::Deserialize;

use crate::error::{Error, io_error};

const DEFAULT_REPO_URL: &str = "git@github.com:cicycle/target-project.git";
const DEFAULT_BRANCH: &str = "develop";
const DEFAULT_WORKSPACE_DIR: &str = ".";
const DEFAULT_BADGE_DIR: &str = "badges";
const DEFAULT_METRICS_SUBDIR: &str = ".metrics";
const DEFAULT_DEPLOY_TARGET: &str = "ci@badges.example.net:/srv/www/badges";

/// Resolved configuration for one pipeline run.
///
/// # Examples
///
/// ```
/// use cicycle::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.default_branch, "develop");
/// assert_eq!(config.badge_dir.to_str(), Some("badges"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Clone URL of the repository under verification.
    pub repo_url:       String,
    /// Branch built when the CLI receives no positional argument.
    pub default_branch: String,
    /// Directory under which branch checkouts are created.
    pub workspace_dir:  PathBuf,
    /// Directory receiving the rendered badge files.
    pub badge_dir:      PathBuf,
    /// Name of the metrics directory created inside the checkout.
    pub metrics_subdir: PathBuf,
    /// Remote `scp` destination for the badge directory contents.
    pub deploy_target:  String
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repo_url:       DEFAULT_REPO_URL.to_owned(),
            default_branch: DEFAULT_BRANCH.to_owned(),
            workspace_dir:  PathBuf::from(DEFAULT_WORKSPACE_DIR),
            badge_dir:      PathBuf::from(DEFAULT_BADGE_DIR),
            metrics_subdir: PathBuf::from(DEFAULT_METRICS_SUBDIR),
            deploy_target:  DEFAULT_DEPLOY_TARGET.to_owned()
        }
    }
}

/// Partial configuration document as written by users.
#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default, alias = "repo", alias = "repository")]
    repo_url:       Option<String>,
    #[serde(default, alias = "branch")]
    default_branch: Option<String>,
    #[serde(default, alias = "workspace")]
    workspace_dir:  Option<PathBuf>,
    #[serde(default, alias = "badges")]
    badge_dir:      Option<PathBuf>,
    #[serde(default, alias = "metrics")]
    metrics_subdir: Option<PathBuf>,
    #[serde(default, alias = "deploy")]
    deploy_target:  Option<String>
}

impl PipelineConfig {
    /// Loads configuration from a YAML document, falling back to the
    /// compiled-in defaults for absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`]
    /// when the document is not valid YAML, and [`Error::Validation`] when a
    /// required endpoint resolves to an empty string.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// use cicycle::PipelineConfig;
    ///
    /// # fn main() -> Result<(), cicycle::Error> {
    /// let config = PipelineConfig::load(Path::new("cicycle.yaml"))?;
    /// println!("building {} by default", config.default_branch);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        let document: ConfigDocument = serde_yaml::from_str(&contents)?;

        let defaults = Self::default();
        let config = Self {
            repo_url:       document.repo_url.unwrap_or(defaults.repo_url),
            default_branch: document.default_branch.unwrap_or(defaults.default_branch),
            workspace_dir:  document.workspace_dir.unwrap_or(defaults.workspace_dir),
            badge_dir:      document.badge_dir.unwrap_or(defaults.badge_dir),
            metrics_subdir: document.metrics_subdir.unwrap_or(defaults.metrics_subdir),
            deploy_target:  document.deploy_target.unwrap_or(defaults.deploy_target)
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.repo_url.trim().is_empty() {
            return Err(Error::validation("repo_url must not be empty"));
        }
        if self.default_branch.trim().is_empty() {
            return Err(Error::validation("default_branch must not be empty"));
        }
        if self.deploy_target.trim().is_empty() {
            return Err(Error::validation("deploy_target must not be empty"));
        }
        Ok(())
    }
}
