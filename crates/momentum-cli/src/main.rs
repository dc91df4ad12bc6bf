use clap::{Parser, Subcommand};
use momentum_core::TaskPriority;

mod commands;

#[derive(Parser)]
#[command(name = "momentum-cli", version, about = "Momentum CLI")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current momentum (applies any pending decay)
    Status,
    /// Record a completed task
    Complete {
        /// Task priority: low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: TaskPriority,
    },
    /// Grant the comeback boost after an absence
    Comeback,
    /// Mark today as a rest day
    Rest {
        /// Remove the rest-day marker instead
        #[arg(long)]
        clear: bool,
    },
    /// Show and apply pending decay
    Decay,
    /// Recent momentum changes
    History {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Status => commands::momentum::status(),
        Commands::Complete { priority } => commands::momentum::complete(priority),
        Commands::Comeback => commands::momentum::comeback(),
        Commands::Rest { clear } => commands::momentum::rest(clear),
        Commands::Decay => commands::momentum::decay(),
        Commands::History { limit } => commands::history::run(limit),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
