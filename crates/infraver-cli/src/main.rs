//! infraver CLI
//!
//! Computes the next semantic version of an infrastructure configuration
//! repository and publishes it to the CI runner.

use clap::{Parser, Subcommand, ValueEnum};
use infraver_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "infraver")]
#[command(about = "infraver - Semantic versioning for infrastructure configuration", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(
        long,
        global = true,
        value_enum,
        env = "INFRAVER_LOG_FORMAT",
        default_value = "text"
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the next version and publish it to the CI runner
    Next(commands::next::NextArgs),
    /// Print the classification of changes since the last version tag
    Classify(commands::classify::ClassifyArgs),
    /// Print the content fingerprint of the configuration files
    Fingerprint(commands::fingerprint::FingerprintArgs),
    /// Print the resources declared in one configuration file as JSON
    Parse(commands::parse::ParseArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Next(args) => commands::next::execute(args),
        Commands::Classify(args) => commands::classify::execute(args),
        Commands::Fingerprint(args) => commands::fingerprint::execute(args),
        Commands::Parse(args) => commands::parse::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
