use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use locbundle_cli::{LayersCommandOptions, LoadCommandOptions, run_layers_command, run_load_command};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG is used otherwise.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a culture from a bundle and print the merged data as JSON.
    Load {
        /// Zip archive or directory holding the bundle
        #[arg(short, long)]
        bundle: Option<String>,

        /// Culture to load (defaults to the system locale)
        #[arg(short, long)]
        culture: Option<String>,

        /// Entry format: json, xml, strings or csv
        #[arg(short, long)]
        format: Option<String>,

        /// Give up on opening the bundle after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Directory name of the culture-independent layer
        #[arg(long)]
        default_segment: Option<String>,

        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show which bundle entries each layer selects for a culture.
    Layers {
        /// Zip archive or directory holding the bundle
        #[arg(short, long)]
        bundle: Option<String>,

        /// Culture to select for (defaults to the system locale)
        #[arg(short, long)]
        culture: Option<String>,

        /// Directory name of the culture-independent layer
        #[arg(long)]
        default_segment: Option<String>,

        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.commands {
        Commands::Load {
            bundle,
            culture,
            format,
            timeout_ms,
            default_segment,
            config,
            output,
        } => {
            run_load_command(LoadCommandOptions {
                bundle,
                culture,
                format,
                timeout_ms,
                default_segment,
                config,
                output,
            })
            .await
        }
        Commands::Layers {
            bundle,
            culture,
            default_segment,
            config,
        } => {
            run_layers_command(LayersCommandOptions {
                bundle,
                culture,
                default_segment,
                config,
            })
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
