//! Classify command
//!
//! Usage: infraver classify [--json]

use super::{git_cli, version_request, HistoryArgs, LocationArgs};
use clap::Args;
use infraver_core::classify::render_human_summary;
use infraver_core::Sha256Hasher;
use infraver_engine::commands::{apply_engine_command, EngineCommand};

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub history: HistoryArgs,

    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let git = git_cli(&args.location, &args.history);
    let cmd = EngineCommand::DetermineVersion(version_request(&args.location, &args.history));
    let outcome = apply_engine_command(cmd, &git, &Sha256Hasher)?.into_version()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.classification)?);
    } else {
        print!("{}", render_human_summary(&outcome.classification));
    }

    Ok(())
}
