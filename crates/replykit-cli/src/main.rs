// Rust guideline compliant 2026-10-16

//! Replykit CLI Application
//!
//! Inspects the effective Replykit configuration and previews envelopes.

use clap::Parser;
use replykit_cli::commands;
use replykit_cli::commands::render::RenderRequest;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rkit",
    version,
    about = "Replykit: uniform response envelopes for HTTP and sockets",
    after_help = "Examples:\n  rkit config --toml\n  rkit render --status 404 --message \"User not found\"\n  rkit render --status 500 --error '{\"name\":\"TypeError\",\"message\":\"x is undefined\"}'\n"
)]
struct Cli {
    /// Config file path (defaults to replykit.toml)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Print the effective configuration after environment overrides
    Config {
        /// Print TOML instead of JSON
        #[arg(long)]
        toml: bool,
    },

    /// Preview the HTTP reply for a status and payload
    Render {
        /// Status code to send
        #[arg(long, default_value_t = 200)]
        status: u16,

        /// Envelope message
        #[arg(long)]
        message: Option<String>,

        /// Success payload as JSON
        #[arg(long)]
        data: Option<String>,

        /// Raw error as JSON
        #[arg(long)]
        error: Option<String>,

        /// Correlation id to use instead of a generated one
        #[arg(long)]
        request_id: Option<String>,

        /// Include the log lines the adapter produced
        #[arg(long)]
        logs: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = cli.file.as_deref();

    match cli.command {
        Commands::Config { toml } => commands::config::execute(file, toml)?,
        Commands::Render {
            status,
            message,
            data,
            error,
            request_id,
            logs,
        } => {
            let request = RenderRequest {
                status,
                message,
                data,
                error,
                request_id,
                logs,
            };
            commands::render::execute(file, &request)?;
        }
    }

    Ok(())
}
