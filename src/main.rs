use clap::{Parser, Subcommand};
use rinkside::{commands, config};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

/// Default watch duration in seconds
const DEFAULT_WATCH_SECONDS: u64 = 30;

#[derive(Parser)]
#[command(name = "rinkside")]
#[command(
    about = "Simulated live NHL broadcast feed",
    long_about = "Simulated live NHL broadcast feed\n\nIf no command is specified, the program runs the live feed in watch mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulated feed and stream commentary, chat, and scores
    Watch {
        /// How long to run before disconnecting, in seconds
        #[arg(short, long, default_value_t = DEFAULT_WATCH_SECONDS)]
        seconds: u64,

        /// Keep the commentary gate closed regardless of the autoPlay preference
        #[arg(long)]
        paused: bool,
    },
    /// Render the current scoreboard once
    Snapshot,
    /// Inspect or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Display the current preference set
    Show,
    /// Set one preference key, e.g. `prefs set theme light`
    Set { key: String, value: String },
    /// Restore every preference to its default
    Reset,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

async fn execute_command(config: &config::Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Watch { seconds, paused } => commands::watch::run(config, seconds, paused).await,
        Commands::Snapshot => commands::snapshot::run(config).await,
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::prefs::show(),
            PrefsAction::Set { key, value } => commands::prefs::set(&key, &value),
            PrefsAction::Reset => commands::prefs::reset(),
        },
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run the feed in watch mode
    let command = cli.command.unwrap_or(Commands::Watch {
        seconds: DEFAULT_WATCH_SECONDS,
        paused: false,
    });

    if let Err(e) = execute_command(&config, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
