//! Parse command
//!
//! Usage: infraver parse <FILE>

use clap::Args;
use infraver_core::{InMemoryVersionControl, Sha256Hasher};
use infraver_engine::commands::{apply_engine_command, EngineCommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Configuration file to parse
    pub file: PathBuf,
}

pub fn execute(args: ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let vcs = InMemoryVersionControl::new();
    let cmd = EngineCommand::ParseFile { path: args.file };

    let table = apply_engine_command(cmd, &vcs, &Sha256Hasher)?.into_resources()?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
