// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, market events)
// - Rendering the dashboard
//
// The keyboard models a TV remote: d-pad, confirm, back, and two pin
// keys. There is no pointer, so mouse capture stays off.

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod scene;
pub mod ui;

use crate::config::Config;
use crate::feed::{FeedCommand, FeedEvent};
use crate::nav::Direction;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// The event loop handles keyboard input, periodic redraws, and market
/// events from the feed task.
pub async fn run_tui(
    config: Config,
    mut event_rx: mpsc::Receiver<FeedEvent>,
    cmd_tx: mpsc::Sender<FeedCommand>,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // The scene needs a real screen size before the navigator's first scan
    let size = terminal.size().context("Failed to read terminal size")?;
    let initial_area = Rect::new(0, 0, size.width, size.height);
    let mut app = App::new(&config, cmd_tx, initial_area);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources at once via tokio::select!: keyboard input,
/// a redraw tick, and market events. Redrawing every pass keeps the
/// focus hint fading on schedule even when nothing else happens.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<FeedEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI; this also refreshes every control's frame, so the
        // key handling below always resolves against current geometry
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick: just redraw (hint fade is time-based)
            _ = tick_interval.tick() => {}

            // Market events
            Some(feed_event) = event_rx.recv() => {
                app.on_feed_event(feed_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Every press runs through the behavior table first (debounce for action
/// keys, hold-to-repeat for the d-pad). The editing layer lives inside the
/// app: an open control editor captures up/down and confirm before spatial
/// navigation sees them.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match key_event.kind {
        KeyEventKind::Press => {
            let key = key_event.code;
            if !app.handle_key_press(key) {
                return;
            }

            match key {
                // Quit
                KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,

                // Confirm / back
                KeyCode::Enter => app.confirm(),
                KeyCode::Esc => app.back(),

                // Favorites
                KeyCode::Char('f') => app.pin_favorite(),
                KeyCode::Char('x') => app.unpin_focused(),

                // D-pad (arrows and vim keys)
                KeyCode::Up | KeyCode::Char('k') => app.navigate(Direction::Up),
                KeyCode::Down | KeyCode::Char('j') => app.navigate(Direction::Down),
                KeyCode::Left | KeyCode::Char('h') => app.navigate(Direction::Left),
                KeyCode::Right | KeyCode::Char('l') => app.navigate(Direction::Right),

                _ => {}
            }
        }
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
        }
        _ => {}
    }
}
