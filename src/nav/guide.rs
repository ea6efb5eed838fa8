// Interaction hint attached to the focused element
//
// One guide instance lives inside the Navigator for its whole lifetime; it
// is shown and superseded in place, never re-created per focus change. The
// guide owns hint text, the anchor frame captured at show time, and the
// auto-fade clock. Drawing happens in the TUI layer, which reads this
// state each frame; expiry needs no timer, the next redraw simply finds
// the hint no longer visible.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

/// How long a hint stays on screen before fading.
const HINT_DURATION: Duration = Duration::from_millis(2000);

/// How an element reacts to the confirm key, declared at registration.
/// Picks the hint line shown when the element gains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Plain actionable element.
    Generic,
    /// Enumerable choice adjusted with up/down.
    Choice,
    /// Numeric value adjusted with up/down.
    Numeric,
    /// Boolean flipped by confirm.
    Toggle,
}

impl InteractionKind {
    /// The hint line for this kind. Wording is fixed; the UI renders it
    /// verbatim.
    pub fn hint(self) -> &'static str {
        match self {
            InteractionKind::Choice => "use up/down to choose, confirm to select",
            InteractionKind::Numeric => "use up/down to adjust the value, confirm to accept",
            InteractionKind::Toggle => "confirm to toggle",
            InteractionKind::Generic => "confirm to select",
        }
    }
}

/// Transient hint overlay state.
#[derive(Debug)]
pub struct FocusGuide {
    text: &'static str,
    anchor: Rect,
    shown_at: Option<Instant>,
    duration: Duration,
}

impl FocusGuide {
    pub fn new() -> Self {
        Self::with_duration(HINT_DURATION)
    }

    fn with_duration(duration: Duration) -> Self {
        Self {
            text: "",
            anchor: Rect::default(),
            shown_at: None,
            duration,
        }
    }

    /// Show the hint for a newly focused element, superseding whatever was
    /// visible. `anchor` is the element's frame at show time.
    pub fn show(&mut self, kind: InteractionKind, anchor: Rect) {
        self.text = kind.hint();
        self.anchor = anchor;
        self.shown_at = Some(Instant::now());
    }

    /// Drop the hint immediately (focus was lost, not moved).
    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    /// Whether the hint should currently be drawn.
    pub fn is_visible(&self) -> bool {
        self.shown_at
            .is_some_and(|shown_at| shown_at.elapsed() < self.duration)
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Frame of the element the hint is attached to.
    pub fn anchor(&self) -> Rect {
        self.anchor
    }
}

impl Default for FocusGuide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_wording_per_kind() {
        assert_eq!(
            InteractionKind::Choice.hint(),
            "use up/down to choose, confirm to select"
        );
        assert_eq!(
            InteractionKind::Numeric.hint(),
            "use up/down to adjust the value, confirm to accept"
        );
        assert_eq!(InteractionKind::Toggle.hint(), "confirm to toggle");
        assert_eq!(InteractionKind::Generic.hint(), "confirm to select");
    }

    #[test]
    fn test_new_guide_starts_hidden() {
        let guide = FocusGuide::new();
        assert!(!guide.is_visible());
    }

    #[test]
    fn test_show_makes_visible_with_anchor() {
        let mut guide = FocusGuide::new();
        let anchor = Rect::new(4, 2, 20, 3);
        guide.show(InteractionKind::Toggle, anchor);

        assert!(guide.is_visible());
        assert_eq!(guide.text(), "confirm to toggle");
        assert_eq!(guide.anchor(), anchor);
    }

    #[test]
    fn test_newer_hint_supersedes_older() {
        let mut guide = FocusGuide::new();
        guide.show(InteractionKind::Choice, Rect::new(0, 0, 10, 3));
        guide.show(InteractionKind::Numeric, Rect::new(30, 0, 10, 3));

        // One guide instance: only the latest hint exists
        assert!(guide.is_visible());
        assert_eq!(
            guide.text(),
            "use up/down to adjust the value, confirm to accept"
        );
        assert_eq!(guide.anchor(), Rect::new(30, 0, 10, 3));
    }

    #[test]
    fn test_hide_drops_hint() {
        let mut guide = FocusGuide::new();
        guide.show(InteractionKind::Generic, Rect::new(0, 0, 10, 3));
        guide.hide();
        assert!(!guide.is_visible());
    }

    #[test]
    fn test_hint_fades_after_duration() {
        let mut guide = FocusGuide::with_duration(Duration::from_millis(20));
        guide.show(InteractionKind::Generic, Rect::new(0, 0, 10, 3));
        assert!(guide.is_visible());

        std::thread::sleep(Duration::from_millis(30));
        assert!(!guide.is_visible());
    }
}
