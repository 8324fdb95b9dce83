use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Commands, Context};

#[derive(Parser)]
#[command(name = "fcokit")]
#[command(about = "FcoKit: subtitle database and font atlas tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Symbol database to use instead of the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut context = Context::new(cli.database);
    cli.command.execute(&mut context)?;

    Ok(())
}
