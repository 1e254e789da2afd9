//! HairFit CLI entry point.
//!
//! Binary name: `hairfit`
//!
//! Parses CLI arguments, initializes tracing, configuration, storage and the
//! suggestion pipeline, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use cli::suggest::SuggestArgs;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,hairfit=debug",
        _ => "trace",
    };
    hairfit_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "hairfit", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref()).await?;

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            tracing::warn!("interrupt received, finishing with fallback data");
            cancel.cancel();
        }
    });

    let outcome = match cli.command {
        Commands::Suggest {
            photo,
            face_shape,
            direct,
            save,
        } => {
            let args = SuggestArgs {
                photo,
                face_shape,
                direct,
                save,
            };
            cli::suggest::suggest(&state, args, &cancel, cli.json).await
        }

        Commands::Saved { action } => cli::saved::handle_saved_command(action, &state, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    watcher.abort();
    hairfit_observe::tracing_setup::shutdown_tracing();
    outcome
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
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
                tracing::warn!("failed to install SIGTERM handler: {e}");
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
