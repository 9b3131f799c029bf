//! `docindex` merges documentation index fragments the way a viewer would and
//! prints the resulting registry as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod command;

#[derive(Parser)]
#[command(name = "docindex", version, about = "Merge documentation index fragments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge fragment documents into one registry and print it
    Merge(command::MergeArgs),
    /// Print the JSON schema of a fragment document
    Schema,
}

fn main() -> Result<()> {
    // stdout carries the JSON result, logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Merge(args) => serde_json::to_value(command::merge(&args)?)?,
        Commands::Schema => command::schema()?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
