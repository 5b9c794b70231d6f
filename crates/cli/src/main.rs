mod commands;
mod http;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio-relay")]
#[command(version, about = "Publish single-page HTML portfolios to Netlify", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the HTTP deploy relay
    Serve {
        /// Path to folio-relay.toml (environment variables still apply)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Deploy a local HTML file once and print the live URL
    Deploy {
        /// Tenant name the site is named after
        #[arg(short, long)]
        username: String,

        /// HTML file to publish
        file: PathBuf,

        /// Undo backslash escaping (\" \n \t \\) before publishing
        #[arg(long)]
        decode_escapes: bool,

        /// Path to folio-relay.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Delete a site from Netlify
    Teardown {
        /// Netlify site id
        site_id: String,

        /// Skip confirmation prompt (dangerous!)
        #[arg(long)]
        force: bool,

        /// Path to folio-relay.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("folio_relay=info,folio_relay_deployer=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port } => commands::serve::run(config, port).await,
        Command::Deploy {
            username,
            file,
            decode_escapes,
            config,
        } => commands::deploy::publish(username, file, decode_escapes, config).await,
        Command::Teardown {
            site_id,
            force,
            config,
        } => commands::deploy::teardown(site_id, force, config).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "folio-relay", &mut io::stdout());
            Ok(())
        }
    }
}
