// The dashboard's element tree
//
// The scene owns every on-screen control and is the navigator's FocusHost:
// it hands out element ids in tree order, answers frame and interaction
// queries, applies focus marks, and runs confirm actions. Rail controls
// have fixed ids; favorite chips mint fresh ids as they are pinned.
//
// Structural changes (the interval picker following the auto-refresh
// switch, chips appearing and disappearing) raise a dirty flag instead of
// rebuilding inline; the event loop drains the flag into a single
// navigator rebuild before the next key is processed. Committed value
// changes queue UiActions the same way, so confirm handling stays free of
// feed plumbing.

use crate::config::Config;
use crate::feed::{Timeframe, SYMBOLS};
use crate::nav::{ElementId, FocusHost, InteractionKind};
use crate::theme::Theme;
use crate::tui::components::button::Button;
use crate::tui::components::picker::Picker;
use crate::tui::components::stepper::Stepper;
use crate::tui::components::toggle::Toggle;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

const ID_SYMBOL: ElementId = ElementId::new(1);
const ID_TIMEFRAME: ElementId = ElementId::new(2);
const ID_CANDLES: ElementId = ElementId::new(3);
const ID_AUTO: ElementId = ElementId::new(4);
const ID_INTERVAL: ElementId = ElementId::new(5);
const ID_REFRESH: ElementId = ElementId::new(6);

/// First id handed to favorite chips; rail ids stay below this.
const FAVORITE_ID_BASE: u64 = 100;

const INTERVAL_CHOICES: [u64; 4] = [2, 5, 10, 30];

/// Something a confirmed control wants the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Symbol, timeframe or candle count changed: open a fresh feed
    /// subscription.
    Resubscribe,
    /// One-shot refresh of the current subscription.
    RefreshNow,
    /// Auto-refresh switch or cadence changed.
    RefreshPolicyChanged,
}

struct Favorite {
    id: ElementId,
    symbol: String,
    button: Button,
}

pub struct Scene {
    symbol: Picker,
    timeframe: Picker,
    candles: Stepper,
    auto_refresh: Toggle,
    interval: Picker,
    refresh: Button,
    favorites: Vec<Favorite>,
    next_favorite_id: u64,

    structure_dirty: bool,
    actions: Vec<UiAction>,

    title_area: Rect,
    rail_area: Rect,
    favorites_area: Rect,
    chart_area: Rect,
    status_area: Rect,
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        let mut symbol = Picker::new(
            "Symbol",
            SYMBOLS.iter().map(|s| s.to_string()).collect(),
        );
        symbol.select_value(&config.symbol);

        let mut timeframe = Picker::new(
            "Timeframe",
            Timeframe::ALL
                .iter()
                .map(|tf| tf.label().to_string())
                .collect(),
        );
        timeframe.select_value(config.timeframe.label());

        let mut interval = Picker::new(
            "Every",
            INTERVAL_CHOICES.iter().map(|s| format!("{s}s")).collect(),
        );
        interval.select_value(&format!("{}s", config.refresh_secs));

        Self {
            symbol,
            timeframe,
            candles: Stepper::new("Candles", 20, 200, 10, config.candles as i64),
            auto_refresh: Toggle::new("Auto", config.auto_refresh),
            interval,
            refresh: Button::new("Refresh"),
            favorites: Vec::new(),
            next_favorite_id: FAVORITE_ID_BASE,
            structure_dirty: false,
            actions: Vec::new(),
            title_area: Rect::default(),
            rail_area: Rect::default(),
            favorites_area: Rect::default(),
            chart_area: Rect::default(),
            status_area: Rect::default(),
        }
    }

    fn interval_visible(&self) -> bool {
        self.auto_refresh.on
    }

    /// Split the screen and pin every control's frame. Runs on each draw,
    /// so navigation always resolves against the latest layout.
    pub fn layout(&mut self, area: Rect) {
        let favorites_height = if self.favorites.is_empty() { 0 } else { 3 };
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(favorites_height),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(area);
        self.title_area = chunks[0];
        self.rail_area = chunks[1];
        self.favorites_area = chunks[2];
        self.chart_area = chunks[3];
        self.status_area = chunks[4];

        let mut constraints = vec![
            Constraint::Length(self.symbol.width()),
            Constraint::Length(self.timeframe.width()),
            Constraint::Length(self.candles.width()),
            Constraint::Length(self.auto_refresh.width()),
        ];
        if self.interval_visible() {
            constraints.push(Constraint::Length(self.interval.width()));
        }
        constraints.push(Constraint::Length(self.refresh.width()));
        constraints.push(Constraint::Min(0));
        let cells = Layout::horizontal(constraints).split(self.rail_area);

        self.symbol.frame = cells[0];
        self.timeframe.frame = cells[1];
        self.candles.frame = cells[2];
        self.auto_refresh.frame = cells[3];
        let mut next = 4;
        if self.interval_visible() {
            self.interval.frame = cells[next];
            next += 1;
        } else {
            self.interval.frame = Rect::default();
        }
        self.refresh.frame = cells[next];

        if !self.favorites.is_empty() {
            let mut chip_constraints: Vec<Constraint> = self
                .favorites
                .iter()
                .map(|favorite| Constraint::Length(favorite.button.width()))
                .collect();
            chip_constraints.push(Constraint::Min(0));
            let cells = Layout::horizontal(chip_constraints).split(self.favorites_area);
            for (favorite, cell) in self.favorites.iter_mut().zip(cells.iter()) {
                favorite.button.frame = *cell;
            }
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        self.symbol.render(f, theme);
        self.timeframe.render(f, theme);
        self.candles.render(f, theme);
        self.auto_refresh.render(f, theme);
        if self.interval_visible() {
            self.interval.render(f, theme);
        }
        self.refresh.render(f, theme);
        for favorite in &self.favorites {
            favorite.button.render(f, theme);
        }
    }

    // --- editing layer -----------------------------------------------------

    pub fn editing_id(&self) -> Option<ElementId> {
        if self.symbol.editing {
            Some(ID_SYMBOL)
        } else if self.timeframe.editing {
            Some(ID_TIMEFRAME)
        } else if self.candles.editing {
            Some(ID_CANDLES)
        } else if self.interval.editing {
            Some(ID_INTERVAL)
        } else {
            None
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }

    /// Up/down while a control is open. `delta` is +1 for up, -1 for down:
    /// pickers walk toward their first option on up, the stepper grows.
    pub fn adjust_editing(&mut self, delta: i64) {
        if self.symbol.editing {
            self.symbol.step(-delta);
        } else if self.timeframe.editing {
            self.timeframe.step(-delta);
        } else if self.candles.editing {
            self.candles.adjust(delta);
        } else if self.interval.editing {
            self.interval.step(-delta);
        }
    }

    /// Esc while a control is open: close it and restore the value it
    /// opened with.
    pub fn cancel_editing(&mut self) {
        if self.symbol.editing {
            self.symbol.cancel();
        } else if self.timeframe.editing {
            self.timeframe.cancel();
        } else if self.candles.editing {
            self.candles.cancel();
        } else if self.interval.editing {
            self.interval.cancel();
        }
    }

    // --- favorites ---------------------------------------------------------

    /// Pin the current symbol as a chip. No-op when already pinned.
    pub fn pin_favorite(&mut self) -> bool {
        let symbol = self.symbol.value().to_string();
        if self.favorites.iter().any(|favorite| favorite.symbol == symbol) {
            return false;
        }
        let id = ElementId::new(self.next_favorite_id);
        self.next_favorite_id += 1;
        self.favorites.push(Favorite {
            id,
            button: Button::accented(symbol.clone()),
            symbol,
        });
        self.structure_dirty = true;
        true
    }

    /// Unpin a chip by element id. Non-chip ids are ignored.
    pub fn unpin_favorite(&mut self, id: ElementId) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|favorite| favorite.id != id);
        if self.favorites.len() == before {
            return false;
        }
        self.structure_dirty = true;
        true
    }

    // --- event-loop drains -------------------------------------------------

    /// True once per structural change batch; the caller owes a navigator
    /// rebuild when it gets true.
    pub fn take_structure_changed(&mut self) -> bool {
        std::mem::take(&mut self.structure_dirty)
    }

    pub fn take_actions(&mut self) -> Vec<UiAction> {
        std::mem::take(&mut self.actions)
    }

    // --- current values ----------------------------------------------------

    pub fn symbol(&self) -> &str {
        self.symbol.value()
    }

    pub fn timeframe(&self) -> Timeframe {
        Timeframe::parse(self.timeframe.value()).unwrap_or(Timeframe::M1)
    }

    pub fn candle_count(&self) -> usize {
        self.candles.value() as usize
    }

    pub fn auto_refresh_on(&self) -> bool {
        self.auto_refresh.on
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval
            .value()
            .trim_end_matches('s')
            .parse()
            .unwrap_or(5)
    }

    pub fn title_area(&self) -> Rect {
        self.title_area
    }

    pub fn chart_area(&self) -> Rect {
        self.chart_area
    }

    pub fn status_area(&self) -> Rect {
        self.status_area
    }
}

impl FocusHost for Scene {
    fn collect_focusable(&self, out: &mut Vec<ElementId>) {
        out.push(ID_SYMBOL);
        out.push(ID_TIMEFRAME);
        out.push(ID_CANDLES);
        out.push(ID_AUTO);
        if self.interval_visible() {
            out.push(ID_INTERVAL);
        }
        out.push(ID_REFRESH);
        out.extend(self.favorites.iter().map(|favorite| favorite.id));
    }

    fn frame(&self, id: ElementId) -> Option<Rect> {
        match id {
            ID_SYMBOL => Some(self.symbol.frame),
            ID_TIMEFRAME => Some(self.timeframe.frame),
            ID_CANDLES => Some(self.candles.frame),
            ID_AUTO => Some(self.auto_refresh.frame),
            ID_INTERVAL => self.interval_visible().then_some(self.interval.frame),
            ID_REFRESH => Some(self.refresh.frame),
            other => self
                .favorites
                .iter()
                .find(|favorite| favorite.id == other)
                .map(|favorite| favorite.button.frame),
        }
    }

    fn interaction(&self, id: ElementId) -> InteractionKind {
        match id {
            ID_SYMBOL | ID_TIMEFRAME | ID_INTERVAL => InteractionKind::Choice,
            ID_CANDLES => InteractionKind::Numeric,
            ID_AUTO => InteractionKind::Toggle,
            _ => InteractionKind::Generic,
        }
    }

    fn set_focused(&mut self, id: ElementId, focused: bool) {
        match id {
            ID_SYMBOL => self.symbol.focused = focused,
            ID_TIMEFRAME => self.timeframe.focused = focused,
            ID_CANDLES => self.candles.focused = focused,
            ID_AUTO => self.auto_refresh.focused = focused,
            ID_INTERVAL => self.interval.focused = focused,
            ID_REFRESH => self.refresh.focused = focused,
            other => {
                if let Some(favorite) = self
                    .favorites
                    .iter_mut()
                    .find(|favorite| favorite.id == other)
                {
                    favorite.button.focused = focused;
                }
            }
        }
    }

    fn activate(&mut self, id: ElementId) {
        match id {
            ID_SYMBOL => {
                if self.symbol.editing {
                    if self.symbol.commit() {
                        self.actions.push(UiAction::Resubscribe);
                    }
                } else {
                    self.symbol.begin_editing();
                }
            }
            ID_TIMEFRAME => {
                if self.timeframe.editing {
                    if self.timeframe.commit() {
                        self.actions.push(UiAction::Resubscribe);
                    }
                } else {
                    self.timeframe.begin_editing();
                }
            }
            ID_CANDLES => {
                if self.candles.editing {
                    if self.candles.commit() {
                        self.actions.push(UiAction::Resubscribe);
                    }
                } else {
                    self.candles.begin_editing();
                }
            }
            ID_AUTO => {
                self.auto_refresh.flip();
                self.actions.push(UiAction::RefreshPolicyChanged);
                // The interval picker follows the switch
                self.structure_dirty = true;
            }
            ID_INTERVAL => {
                if self.interval.editing {
                    if self.interval.commit() {
                        self.actions.push(UiAction::RefreshPolicyChanged);
                    }
                } else {
                    self.interval.begin_editing();
                }
            }
            ID_REFRESH => self.actions.push(UiAction::RefreshNow),
            other => {
                let jump = self
                    .favorites
                    .iter()
                    .find(|favorite| favorite.id == other)
                    .map(|favorite| favorite.symbol.clone());
                if let Some(symbol) = jump {
                    if self.symbol.select_value(&symbol) {
                        self.actions.push(UiAction::Resubscribe);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(&Config::default())
    }

    fn collected(scene: &Scene) -> Vec<ElementId> {
        let mut out = Vec::new();
        scene.collect_focusable(&mut out);
        out
    }

    #[test]
    fn test_collect_order_follows_the_rail() {
        let scene = scene();
        // Default config has auto-refresh on, so the interval is present
        assert_eq!(
            collected(&scene),
            vec![
                ID_SYMBOL,
                ID_TIMEFRAME,
                ID_CANDLES,
                ID_AUTO,
                ID_INTERVAL,
                ID_REFRESH
            ]
        );
    }

    #[test]
    fn test_toggle_hides_interval_and_flags_structure() {
        let mut scene = scene();
        scene.activate(ID_AUTO);

        assert!(!scene.auto_refresh_on());
        assert!(scene.take_structure_changed());
        assert!(!scene.take_structure_changed());
        assert!(!collected(&scene).contains(&ID_INTERVAL));
        assert_eq!(scene.frame(ID_INTERVAL), None);
        assert_eq!(scene.take_actions(), vec![UiAction::RefreshPolicyChanged]);
    }

    #[test]
    fn test_picker_commit_emits_resubscribe() {
        let mut scene = scene();
        scene.activate(ID_SYMBOL);
        assert_eq!(scene.editing_id(), Some(ID_SYMBOL));

        // Down walks away from the first option
        scene.adjust_editing(-1);
        scene.activate(ID_SYMBOL);

        assert!(!scene.is_editing());
        assert_eq!(scene.symbol(), "ETH-USD");
        assert_eq!(scene.take_actions(), vec![UiAction::Resubscribe]);
    }

    #[test]
    fn test_commit_without_change_emits_nothing() {
        let mut scene = scene();
        scene.activate(ID_TIMEFRAME);
        scene.activate(ID_TIMEFRAME);
        assert!(scene.take_actions().is_empty());
    }

    #[test]
    fn test_cancel_editing_restores_value() {
        let mut scene = scene();
        scene.activate(ID_CANDLES);
        scene.adjust_editing(1);
        scene.adjust_editing(1);
        scene.cancel_editing();

        assert!(!scene.is_editing());
        assert_eq!(scene.candle_count(), 60);
        assert!(scene.take_actions().is_empty());
    }

    #[test]
    fn test_stepper_up_grows_value() {
        let mut scene = scene();
        scene.activate(ID_CANDLES);
        scene.adjust_editing(1);
        scene.activate(ID_CANDLES);

        assert_eq!(scene.candle_count(), 70);
        assert_eq!(scene.take_actions(), vec![UiAction::Resubscribe]);
    }

    #[test]
    fn test_refresh_button_requests_refresh() {
        let mut scene = scene();
        scene.activate(ID_REFRESH);
        assert_eq!(scene.take_actions(), vec![UiAction::RefreshNow]);
        assert!(!scene.take_structure_changed());
    }

    #[test]
    fn test_pin_and_unpin_favorites() {
        let mut scene = scene();
        assert!(scene.pin_favorite());
        assert!(scene.take_structure_changed());

        // Pinning the same symbol again does nothing
        assert!(!scene.pin_favorite());
        assert!(!scene.take_structure_changed());

        let ids = collected(&scene);
        let chip = *ids.last().unwrap();
        assert!(chip.raw() >= FAVORITE_ID_BASE);

        assert!(scene.unpin_favorite(chip));
        assert!(scene.take_structure_changed());
        assert!(!collected(&scene).contains(&chip));

        // Rail controls are not chips
        assert!(!scene.unpin_favorite(ID_REFRESH));
    }

    #[test]
    fn test_favorite_chip_jumps_symbol() {
        let mut scene = scene();
        scene.pin_favorite(); // pins BTC-USD

        // Move the symbol elsewhere
        scene.activate(ID_SYMBOL);
        scene.adjust_editing(-1);
        scene.activate(ID_SYMBOL);
        scene.take_actions();
        assert_eq!(scene.symbol(), "ETH-USD");

        let chip = *collected(&scene).last().unwrap();
        scene.activate(chip);

        assert_eq!(scene.symbol(), "BTC-USD");
        assert_eq!(scene.take_actions(), vec![UiAction::Resubscribe]);
    }

    #[test]
    fn test_layout_places_rail_controls_left_to_right() {
        let mut scene = scene();
        scene.pin_favorite();
        scene.layout(Rect::new(0, 0, 120, 30));

        let symbol = scene.frame(ID_SYMBOL).unwrap();
        let timeframe = scene.frame(ID_TIMEFRAME).unwrap();
        let refresh = scene.frame(ID_REFRESH).unwrap();
        assert!(symbol.width > 0);
        assert!(symbol.right() <= timeframe.left());
        assert!(timeframe.right() <= refresh.left());

        // Chips live on their own row below the rail
        let chip = *collected(&scene).last().unwrap();
        let chip_frame = scene.frame(chip).unwrap();
        assert!(chip_frame.top() >= symbol.bottom());

        assert!(scene.chart_area().height >= 6);
        assert_eq!(scene.title_area().height, 1);
        assert_eq!(scene.status_area().height, 2);
    }

    #[test]
    fn test_focus_marks_follow_set_focused() {
        let mut scene = scene();
        scene.set_focused(ID_CANDLES, true);
        assert!(scene.candles.focused);
        scene.set_focused(ID_CANDLES, false);
        assert!(!scene.candles.focused);

        // Unknown ids are ignored
        scene.set_focused(ElementId::new(9999), true);
    }

    #[test]
    fn test_interaction_kinds_per_control() {
        let scene = scene();
        assert_eq!(scene.interaction(ID_SYMBOL), InteractionKind::Choice);
        assert_eq!(scene.interaction(ID_CANDLES), InteractionKind::Numeric);
        assert_eq!(scene.interaction(ID_AUTO), InteractionKind::Toggle);
        assert_eq!(scene.interaction(ID_REFRESH), InteractionKind::Generic);
    }
}
