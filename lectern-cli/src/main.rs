use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lectern", about = "Course enrollment and progress engine")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
    /// Seed the catalog from a fixture file
    Seed(commands::seed::SeedArgs),
    /// Run the lectern server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Seed(args) => commands::seed::run(args).await,
        Commands::Serve(args) => commands::serve::run(args).await,
    }
}
