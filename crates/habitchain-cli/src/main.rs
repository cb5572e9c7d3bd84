use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitchain-cli", version, about = "HabitChain CLI")]
struct Cli {
    /// Use this config file instead of ~/.config/habitchain/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive in-memory session reading commands from stdin
    Session {
        /// Start with the sample habits loaded
        #[arg(long)]
        demo: bool,
        /// Seed for reproducible completion multipliers
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the sample scenario and print the resulting state
    Demo {
        /// Seed for reproducible completion multipliers
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HABITCHAIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::Session { demo, seed } => commands::session::run(config_path.as_deref(), demo, seed),
        Commands::Demo { seed } => commands::demo::run(config_path.as_deref(), seed),
        Commands::Config { action } => commands::config::run(config_path.as_deref(), action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitchain-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
