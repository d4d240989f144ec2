use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use msm::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "msm")]
#[command(about = "Missed-call Smart Messenger - answers unanswered calls on WhatsApp")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.msm/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for call state changes (one event per line) and act on missed calls
    ///
    /// Edits to [settings] (switch, message, app, line) apply while running.
    /// Edits to [dispatch] and [numbers] apply after a restart.
    Run {
        /// Read events from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Log deliveries instead of opening links or posting notifications
        #[arg(long)]
        dry_run: bool,
    },

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the current configuration
    Status,

    /// Turn the service on
    Enable,

    /// Turn the service off
    Disable,

    /// Flip the service on or off
    Toggle,

    /// Show the custom message, or set it
    Message {
        /// New message text
        text: Option<String>,
    },

    /// Select the messaging app (omit to use the first installed one)
    SelectApp {
        /// Package name, e.g. com.whatsapp.w4b
        package: Option<String>,
    },

    /// Select the line to track on multi-line devices (omit to track all)
    SelectLine {
        /// Line (subscription) id
        line: Option<i32>,
    },

    /// Open a WhatsApp conversation with a number now, using the stored message
    Send {
        /// Phone number to message
        number: String,

        /// Use this app instead of the selected one
        #[arg(short, long)]
        package: Option<String>,

        /// Log the link instead of opening it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    match cli.command {
        Some(Commands::Run { input, dry_run }) => {
            cli::run::run_command(&config_path, input, dry_run).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&config_path, force).await?;
        }
        Some(Commands::Status) | None => {
            cli::status::status_command(&config_path).await?;
        }
        Some(Commands::Enable) => {
            cli::settings::set_enabled_command(&config_path, Some(true)).await?;
        }
        Some(Commands::Disable) => {
            cli::settings::set_enabled_command(&config_path, Some(false)).await?;
        }
        Some(Commands::Toggle) => {
            cli::settings::set_enabled_command(&config_path, None).await?;
        }
        Some(Commands::Message { text }) => {
            cli::settings::message_command(&config_path, text).await?;
        }
        Some(Commands::SelectApp { package }) => {
            cli::settings::select_app_command(&config_path, package).await?;
        }
        Some(Commands::SelectLine { line }) => {
            cli::settings::select_line_command(&config_path, line).await?;
        }
        Some(Commands::Send {
            number,
            package,
            dry_run,
        }) => {
            cli::send::send_command(&config_path, &number, package.as_deref(), dry_run).await?;
        }
    }

    Ok(())
}
