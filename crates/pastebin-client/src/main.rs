use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pastebin_client::commands::{self, CreateOptions};
use pastebin_client::ClientConfig;

#[derive(Parser)]
#[command(
    name = "pb",
    version = env!("CARGO_PKG_VERSION"),
    about = "Share text that destroys itself after a number of views"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a paste from text, a file, or stdin
    Create {
        /// Paste content (read from stdin when omitted)
        text: Vec<String>,

        /// Read content from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Number of views before the paste is gone
        #[arg(short = 'v', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        max_views: u32,

        /// Expire after this many seconds
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        expires_in: Option<i64>,

        /// Prompt for a password to protect the paste
        #[arg(short, long)]
        password: bool,
    },

    /// Read a paste by ID or share URL
    View {
        /// Paste ID or share URL
        paste: String,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load_or_default();

    let result = match cli.command {
        Command::Create {
            text,
            file,
            max_views,
            expires_in,
            password,
        } => {
            commands::create(
                &config,
                CreateOptions {
                    text,
                    file,
                    max_views,
                    expires_in,
                    password,
                },
            )
            .await
        }
        Command::View { paste } => commands::view(&config, &paste).await,
        Command::Config => Ok(commands::show_config(&config)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
