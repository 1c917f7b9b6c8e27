// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ansera - knowledge-grounded customer-service answer engine.
//!
//! Binary entry point: loads and validates configuration, then runs the
//! selected subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod faq;
mod serve;

/// Ansera - knowledge-grounded customer-service answer engine.
#[derive(Parser, Debug)]
#[command(name = "ansera", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the answer engine HTTP server.
    Serve,
    /// Generate FAQ pairs from a document chunk.
    Faq {
        /// Path to the document chunk; reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ansera_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            ansera_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("ansera serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Faq { input }) => {
            if let Err(e) = faq::run_faq(config, input).await {
                eprintln!("ansera faq failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("ansera: use --help for available commands");
        }
    }
}
