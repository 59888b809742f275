//! Next version command
//!
//! Usage: infraver next [--dry-run] [--json]

use super::{git_cli, version_request, HistoryArgs, LocationArgs};
use clap::Args;
use infraver_core::Sha256Hasher;
use infraver_engine::commands::{apply_engine_command, EngineCommand};
use infraver_repo::ci;
use infraver_repo::errors::missing_env;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NextArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub history: HistoryArgs,

    /// Environment file receiving NEW_VERSION=<version>
    #[arg(long, env = "GITHUB_ENV")]
    pub github_env: Option<PathBuf>,

    /// Step-output file receiving new_version=<version>
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Print the version without writing CI files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full outcome as JSON instead of the step output
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: NextArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Fail before any git work when the runner did not provide the env file
    let env_file = match (&args.github_env, args.dry_run) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => None,
        (None, false) => return Err(missing_env(ci::GITHUB_ENV).into()),
    };

    let git = git_cli(&args.location, &args.history);
    let cmd = EngineCommand::DetermineVersion(version_request(&args.location, &args.history));
    let outcome = apply_engine_command(cmd, &git, &Sha256Hasher)?.into_version()?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&outcome)?)?;
    } else {
        ci::write_step_output(&mut stdout, &outcome.version)?;
    }

    if args.dry_run {
        tracing::info!(op = "next", version = %outcome.version, "dry run; CI files untouched");
        return Ok(());
    }

    if let Some(path) = &args.github_output {
        ci::append_output_file(path, &outcome.version)?;
    }
    if let Some(path) = &env_file {
        ci::append_env_file(path, &outcome.version)?;
    }

    Ok(())
}
