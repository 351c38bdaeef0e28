use clap::{Parser, Subcommand};
use mentorslot_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mentorslot", version, about = "Mentor availability and session CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly availability, break dates and session settings
    Availability {
        #[command(subcommand)]
        action: commands::availability::AvailabilityAction,
    },
    /// Booked sessions: status, join, review
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// MENTORSLOT_LOG wins over the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("MENTORSLOT_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Availability { action } => commands::availability::run(action, &config),
        Commands::Session { action } => commands::session::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
