//! answerdesk CLI and REST API entry point.
//!
//! Binary name: `answerdesk`
//!
//! Parses CLI arguments, initializes tracing and the backend, then dispatches
//! to the command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use answerdesk_observe::{LogFormat, TracingOptions, default_filter, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet && cli.verbose == 0 {
        "error"
    } else {
        default_filter(cli.verbose)
    };
    init_tracing(&TracingOptions {
        default_filter: filter.to_string(),
        format: if cli.log_json { LogFormat::Json } else { LogFormat::Pretty },
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "answerdesk", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.demo).await?;

    match cli.command {
        Commands::Status => {
            cli::status::status(&state, cli.json, cli.quiet).await?;
        }

        Commands::Next { session } => {
            cli::session::next(&state, &session.session, cli.json, cli.quiet).await?;
        }

        Commands::Skip { session } => {
            cli::session::skip(&state, &session.session, cli.json, cli.quiet).await?;
        }

        Commands::Reset { session } => {
            cli::session::reset(&state, &session.session, cli.json, cli.quiet).await?;
        }

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} answerdesk API listening on {} ({})",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan(),
                    state.backend
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, backend = %state.backend, "server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
