use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "shelf-cli", version, about = "Run and inspect the shelf book tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve {
        /// Interface to bind, overrides configuration
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides configuration and `PORT`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved settings as JSON
    Settings,
    /// Print the documented route table
    Routes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            shelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "shelf-cli serve");

            tokio::runtime::Runtime::new()
                .context("failed to start async runtime")?
                .block_on(shelf_app::run(&settings))
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Command::Routes => {
            let document = shelf_http::router::openapi_document(&shelf_app::registry());
            for entry in shelf_http::router::route_table(&document) {
                println!("{:<6} {:<28} {}", entry.method, entry.path, entry.summary);
            }
            Ok(())
        }
    }
}
