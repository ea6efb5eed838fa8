// TUI application state
//
// Glues the scene (element tree), the navigator, the chart panel and the
// feed channel together. Key handling is layered: an open control editor
// sees up/down first, then global keys, then the d-pad falls through to
// spatial navigation.

use super::input::InputHandler;
use super::scene::{Scene, UiAction};
use crate::config::Config;
use crate::feed::{FeedCommand, FeedEvent};
use crate::nav::{Direction, Navigator};
use crate::theme::Theme;
use crate::tui::components::chart::ChartPanel;
use ratatui::layout::Rect;
use std::time::Duration;
use tokio::sync::mpsc;

/// Main application state for the TUI
pub struct App {
    /// Element tree: rail controls, favorite chips, panel areas
    pub scene: Scene,

    /// Spatial focus over the scene
    pub nav: Navigator,

    /// Candlestick panel fed by market events
    pub chart: ChartPanel,

    /// Active color theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Input handler for flexible key behavior
    input_handler: InputHandler,

    /// Commands to the market feed task
    feed_tx: mpsc::Sender<FeedCommand>,
}

impl App {
    /// `initial_area` is the terminal size at startup; the scene is laid
    /// out once before the navigator scans it, so first focus lands on a
    /// real frame and the hint has somewhere to anchor.
    pub fn new(config: &Config, feed_tx: mpsc::Sender<FeedCommand>, initial_area: Rect) -> Self {
        let mut scene = Scene::new(config);
        scene.layout(initial_area);
        let nav = Navigator::new(&mut scene);

        let mut app = Self {
            scene,
            nav,
            chart: ChartPanel::new(config.symbol.clone(), config.timeframe),
            theme: Theme::by_name(&config.theme),
            should_quit: false,
            input_handler: InputHandler::default(),
            feed_tx,
        };

        // Open the initial subscription; the channel is empty at startup
        app.send_command(FeedCommand::Watch {
            symbol: config.symbol.clone(),
            timeframe: config.timeframe,
            count: config.candles as usize,
        });
        app.send_command(FeedCommand::AutoRefresh {
            enabled: config.auto_refresh,
            every: Duration::from_secs(config.refresh_secs),
        });

        app
    }

    /// Handle a key press - returns true if the action should be triggered
    /// Uses the configured behavior for each key (state-change or repeatable)
    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    /// Handle a key release
    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// D-pad press. While a control editor is open, up/down adjust its
    /// value and left/right do nothing; otherwise the press moves focus.
    pub fn navigate(&mut self, direction: Direction) {
        if self.scene.is_editing() {
            match direction {
                Direction::Up => self.scene.adjust_editing(1),
                Direction::Down => self.scene.adjust_editing(-1),
                Direction::Left | Direction::Right => {}
            }
            return;
        }
        self.nav.navigate(&mut self.scene, direction);
    }

    /// Confirm press: dispatch to the focused element. Opens a closed
    /// control editor, commits an open one.
    pub fn confirm(&mut self) {
        self.nav.activate(&mut self.scene);
        self.sync_scene();
    }

    /// Back press: closes an open control editor, restoring its value.
    pub fn back(&mut self) {
        if self.scene.is_editing() {
            self.scene.cancel_editing();
        }
    }

    /// Pin the current symbol to the favorites row.
    pub fn pin_favorite(&mut self) {
        if self.scene.pin_favorite() {
            self.sync_scene();
        }
    }

    /// Unpin the focused favorite chip. Does nothing unless a chip holds
    /// focus.
    pub fn unpin_focused(&mut self) {
        let Some(id) = self.nav.focused_id() else {
            return;
        };
        if self.scene.unpin_favorite(id) {
            self.sync_scene();
        }
    }

    /// Apply a market event to the chart. Events carry the subscription
    /// they answer; anything that raced a re-subscribe is dropped here.
    pub fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot {
                symbol,
                timeframe,
                candles,
            } => {
                if symbol == self.scene.symbol() && timeframe == self.scene.timeframe() {
                    self.chart.set_snapshot(symbol, timeframe, candles);
                }
            }
            FeedEvent::Candle {
                symbol,
                timeframe,
                candle,
            } => {
                if symbol == self.scene.symbol() && timeframe == self.scene.timeframe() {
                    self.chart.push_candle(candle, self.scene.candle_count());
                }
            }
        }
    }

    /// Drain what the last confirm left behind: queued actions become feed
    /// commands, a structural change becomes one navigator rebuild. Runs
    /// after every mutating key, before the next draw.
    fn sync_scene(&mut self) {
        for action in self.scene.take_actions() {
            let command = match action {
                UiAction::Resubscribe => FeedCommand::Watch {
                    symbol: self.scene.symbol().to_string(),
                    timeframe: self.scene.timeframe(),
                    count: self.scene.candle_count(),
                },
                UiAction::RefreshNow => FeedCommand::Refresh,
                UiAction::RefreshPolicyChanged => FeedCommand::AutoRefresh {
                    enabled: self.scene.auto_refresh_on(),
                    every: Duration::from_secs(self.scene.interval_secs()),
                },
            };
            self.send_command(command);
        }

        if self.scene.take_structure_changed() {
            self.nav.rebuild(&mut self.scene);
            // A vanished focus target drops the navigator to unfocused;
            // the dashboard policy is to restart from the first control
            if self.nav.focused_index().is_none() {
                self.nav.focus_first(&mut self.scene);
            }
            tracing::debug!(elements = self.nav.element_count(), "focus tree rebuilt");
        }
    }

    fn send_command(&mut self, command: FeedCommand) {
        if let Err(e) = self.feed_tx.try_send(command) {
            tracing::warn!("feed command dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn test_app() -> (App, mpsc::Receiver<FeedCommand>) {
        let (tx, rx) = mpsc::channel(16);
        let app = App::new(&Config::default(), tx, Rect::new(0, 0, 120, 40));
        (app, rx)
    }

    fn drain_startup_commands(rx: &mut mpsc::Receiver<FeedCommand>) {
        // Initial Watch + AutoRefresh pair
        assert!(matches!(rx.try_recv(), Ok(FeedCommand::Watch { .. })));
        assert!(matches!(rx.try_recv(), Ok(FeedCommand::AutoRefresh { .. })));
    }

    #[test]
    fn test_startup_focuses_and_subscribes() {
        let (app, mut rx) = test_app();

        assert_eq!(app.nav.focused_index(), Some(0));
        assert!(app.nav.guide().is_visible());

        match rx.try_recv() {
            Ok(FeedCommand::Watch {
                symbol,
                timeframe,
                count,
            }) => {
                assert_eq!(symbol, "BTC-USD");
                assert_eq!(timeframe, crate::feed::Timeframe::M1);
                assert_eq!(count, 60);
            }
            other => panic!("expected initial Watch, got {:?}", other),
        }
        match rx.try_recv() {
            Ok(FeedCommand::AutoRefresh { enabled, every }) => {
                assert!(enabled);
                assert_eq!(every, Duration::from_secs(5));
            }
            other => panic!("expected initial AutoRefresh, got {:?}", other),
        }
    }

    #[test]
    fn test_editing_captures_up_down() {
        let (mut app, mut rx) = test_app();
        drain_startup_commands(&mut rx);

        // Focus starts on the symbol picker; confirm opens it
        app.confirm();
        assert!(app.scene.is_editing());
        let before = app.scene.symbol().to_string();

        app.navigate(Direction::Down);
        assert_ne!(app.scene.symbol(), before);
        // Focus did not move while the editor was open
        assert_eq!(app.nav.focused_index(), Some(0));

        // Left/right are swallowed
        app.navigate(Direction::Right);
        assert_eq!(app.nav.focused_index(), Some(0));

        // Commit emits a fresh subscription for the new symbol
        app.confirm();
        assert!(!app.scene.is_editing());
        match rx.try_recv() {
            Ok(FeedCommand::Watch { symbol, .. }) => assert_eq!(symbol, app.scene.symbol()),
            other => panic!("expected Watch after commit, got {:?}", other),
        }
    }

    #[test]
    fn test_back_cancels_editing() {
        let (mut app, mut rx) = test_app();
        drain_startup_commands(&mut rx);

        app.confirm();
        let before = app.scene.symbol().to_string();
        app.navigate(Direction::Down);
        app.back();

        assert!(!app.scene.is_editing());
        assert_eq!(app.scene.symbol(), before);
        // A cancelled edit never touches the feed
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_pin_then_unpin_restores_focus_to_rail() {
        let (mut app, mut rx) = test_app();
        drain_startup_commands(&mut rx);

        let rail_count = app.nav.element_count();
        app.pin_favorite();
        assert_eq!(app.nav.element_count(), rail_count + 1);
        // Pinning does not steal focus
        assert_eq!(app.nav.focused_index(), Some(0));

        // Focus the chip (last element), then unpin it
        app.nav.set_focus(&mut app.scene, rail_count);
        app.unpin_focused();

        assert_eq!(app.nav.element_count(), rail_count);
        // Focus fell back to the first rail control
        assert_eq!(app.nav.focused_index(), Some(0));
    }

    #[test]
    fn test_unpin_ignores_rail_controls() {
        let (mut app, mut rx) = test_app();
        drain_startup_commands(&mut rx);

        let count = app.nav.element_count();
        app.unpin_focused();

        assert_eq!(app.nav.element_count(), count);
        assert_eq!(app.nav.focused_index(), Some(0));
    }

    #[test]
    fn test_stale_feed_events_are_dropped() {
        let (mut app, mut rx) = test_app();
        drain_startup_commands(&mut rx);

        app.on_feed_event(FeedEvent::Snapshot {
            symbol: "ETH-USD".to_string(),
            timeframe: crate::feed::Timeframe::M1,
            candles: Vec::new(),
        });

        // Wrong symbol: the chart never saw it
        assert!(app.chart.last_update().is_none());
    }

    #[test]
    fn test_key_behaviors_are_wired() {
        let (mut app, _rx) = test_app();

        // Confirm is state-change: held presses don't re-trigger
        assert!(app.handle_key_press(KeyCode::Enter));
        assert!(!app.handle_key_press(KeyCode::Enter));
        app.handle_key_release(KeyCode::Enter);
        assert!(app.handle_key_press(KeyCode::Enter));
    }
}
