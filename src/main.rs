// telly - TV-style market dashboard
//
// A candlestick dashboard you drive like a TV: the d-pad moves a highlight
// between controls, confirm activates whatever is highlighted, and a short
// hint next to the highlight says what confirm will do there.
//
// Architecture:
// - Feed task: synthetic market data behind an mpsc command/event pair
// - Scene: the element tree; owns controls, frames and confirm actions
// - Navigator: spatial focus resolution over the scene
// - TUI (ratatui): event loop, input behaviors, rendering

mod cli;
mod config;
mod feed;
mod logging;
mod nav;
mod theme;
mod tui;

use anyhow::Result;
use config::Config;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // The guard must be kept alive for the duration of the program so
    // buffered file logs flush on exit
    let _log_guard = logging::init(&config.logging);

    tracing::info!(version = config::VERSION, "starting telly");

    // Channels between the event loop and the market feed task
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::channel(256);

    // Oneshot channel for graceful feed shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    // Spawn the market feed task
    let feed_handle = tokio::spawn(async move {
        feed::run(cmd_rx, event_tx, shutdown_rx).await;
    });

    // Run the TUI in the main task
    // This blocks until the user quits (presses 'q')
    if let Err(e) = tui::run_tui(config, event_rx, cmd_tx).await {
        tracing::error!("TUI error: {:?}", e);
    }

    tracing::info!("Shutting down...");

    // Signal the feed task; if the send fails it already stopped
    let _ = shutdown_tx.send(());
    let _ = feed_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
