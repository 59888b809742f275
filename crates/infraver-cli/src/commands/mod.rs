pub mod classify;
pub mod fingerprint;
pub mod next;
pub mod parse;

use clap::{Args, ValueEnum};
use infraver_engine::commands::{Baseline, VersionRequest};
use infraver_repo::GitCli;
use std::path::PathBuf;
use std::time::Duration;

/// Where the configuration lives.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Repository root
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Configuration root, relative to the repository root
    #[arg(
        long,
        env = "CONFIG_DIRECTORY",
        default_value = "workload/terraform/jamfpro"
    )]
    pub config_dir: PathBuf,
}

impl LocationArgs {
    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(&self.config_dir)
    }
}

/// How the previous state is obtained.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Source of the existing resource table
    #[arg(long, value_enum, default_value = "working-tree")]
    pub baseline: BaselineArg,

    /// Time budget for each git invocation, in seconds
    #[arg(long, env = "INFRAVER_GIT_TIMEOUT_SECS", default_value_t = 30)]
    pub git_timeout_secs: u64,

    /// git executable to run
    #[arg(long, env = "INFRAVER_GIT", default_value = "git")]
    pub git_program: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BaselineArg {
    /// Every configuration file in the working tree
    WorkingTree,
    /// Configuration files committed at the last version tag
    Reference,
}

impl From<BaselineArg> for Baseline {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::WorkingTree => Baseline::WorkingTree,
            BaselineArg::Reference => Baseline::Reference,
        }
    }
}

pub fn version_request(location: &LocationArgs, history: &HistoryArgs) -> VersionRequest {
    VersionRequest::new(&location.repo_root, &location.config_dir)
        .with_baseline(history.baseline.into())
}

pub fn git_cli(location: &LocationArgs, history: &HistoryArgs) -> GitCli {
    GitCli::new(&location.repo_root)
        .with_program(&history.git_program)
        .with_timeout(Duration::from_secs(history.git_timeout_secs))
}
