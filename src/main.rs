// Copyright 2026 Schemescout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use schemescout::cli;
use schemescout::config::DEFAULT_PORT;

#[derive(Parser)]
#[command(
    name = "schemescout",
    about = "Schemescout — headless-browser search agent for the myScheme portal",
    version,
    after_help = "Run 'schemescout <command> --help' for details on each command.\nRun 'schemescout' with no command to start the service on the default port."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::serve::run(DEFAULT_PORT).await,
        Some(Commands::Serve { port }) => cli::serve::run(port).await,
        Some(Commands::Doctor) => cli::doctor::run().await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "schemescout", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
