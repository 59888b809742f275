//! Fingerprint command
//!
//! Usage: infraver fingerprint [--config-dir <DIR>]

use super::LocationArgs;
use clap::Args;
use infraver_core::{InMemoryVersionControl, Sha256Hasher};
use infraver_engine::commands::{apply_engine_command, EngineCommand};

#[derive(Debug, Args)]
pub struct FingerprintArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

pub fn execute(args: FingerprintArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Fingerprinting reads the working tree only
    let vcs = InMemoryVersionControl::new();
    let cmd = EngineCommand::Fingerprint {
        config_dir: args.location.config_path(),
    };

    let fingerprint = apply_engine_command(cmd, &vcs, &Sha256Hasher)?.into_fingerprint()?;
    println!("{}", fingerprint);
    Ok(())
}
