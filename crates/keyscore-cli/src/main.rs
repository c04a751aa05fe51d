//! keyscore CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "keyscore", version, about = "Keyword-based essay grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single response
    Score {
        /// Path to .toml or .json scoring config
        #[arg(long)]
        config: PathBuf,

        /// Read the response from a file
        #[arg(long, conflicts_with_all = ["text", "state"])]
        input: Option<PathBuf>,

        /// Score this literal text
        #[arg(long, conflicts_with = "state")]
        text: Option<String>,

        /// Read the response from a saved session state JSON
        #[arg(long)]
        state: Option<PathBuf>,

        /// Write the response as session state JSON
        #[arg(long)]
        save_state: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade every .txt response in a directory
    Grade {
        /// Path to .toml or .json scoring config
        #[arg(long)]
        config: PathBuf,

        /// Directory of .txt responses
        #[arg(long)]
        responses: PathBuf,

        /// Output directory
        #[arg(long, default_value = "./keyscore-results")]
        output: PathBuf,

        /// Output format: json, markdown, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Validate scoring config files
    Validate {
        /// Path to config file or directory
        #[arg(long)]
        config: PathBuf,
    },

    /// Create a starter config and sample response
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keyscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            config,
            input,
            text,
            state,
            save_state,
            format,
        } => commands::score::execute(config, input, text, state, save_state, format),
        Commands::Grade {
            config,
            responses,
            output,
            format,
        } => commands::grade::execute(config, responses, output, format),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
