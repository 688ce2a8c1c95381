//! chatrelay entry point.
//!
//! Parses CLI arguments, wires configuration, database and services, then
//! serves the HTTP API. When a bot token is configured, the greeter's
//! long-polling loop runs alongside the server.

use std::sync::Arc;

use clap::Parser;

use chatrelay_api::http;
use chatrelay_api::state::AppState;
use chatrelay_core::greeter::Greeter;
use chatrelay_infra::bot::{BotApiClient, run_start_loop};
use chatrelay_infra::config::RelayConfig;

#[derive(Parser)]
#[command(name = "chatrelay", about = "Telegram chat history relay", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Export spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000", env = "PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatrelay=debug",
        _ => "trace",
    };
    chatrelay_observe::tracing_setup::init_tracing(cli.otel, filter)
        .map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;

    let config = RelayConfig::from_env()?;
    let state = AppState::init(&config).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            // The greeter runs only when a bot token is configured.
            if let Some(token) = config.bot_token.clone() {
                let bot = Arc::new(BotApiClient::new(token, config.web_app_url.clone()));
                let greeter = Greeter::new(Arc::clone(&bot));
                tokio::spawn(async move {
                    run_start_loop(&bot, &greeter).await;
                });
            } else {
                tracing::info!("BOT_TOKEN not set, greeter disabled");
            }

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} chatrelay listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            chatrelay_observe::tracing_setup::shutdown_tracing();
            println!("\n  Server stopped.");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
