// Spatial focus navigation for a remote-driven screen
//
// The navigator owns which element holds focus and how focus moves when a
// d-pad key arrives. It sees the UI through the FocusHost trait: an ordered
// tree of focusable elements with frames, interaction kinds, and an
// activation entry point. The host pushes structural changes (elements
// appearing, disappearing, changing visibility) by asking for a rebuild;
// nothing here polls. Frames are read on demand at resolve time, so layout
// can shift freely between key presses.
//
// All operations run on the host's event loop task. A rebuild therefore
// never interleaves with a resolution.

pub mod geometry;
pub mod guide;
pub mod registry;
pub mod resolver;

pub use geometry::Direction;
pub use guide::{FocusGuide, InteractionKind};

use ratatui::layout::Rect;

use registry::FocusRegistry;

/// Stable identity of a focusable element, minted by the host. Indices in
/// the registry change on every rebuild; ids do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The element tree as the navigator sees it.
pub trait FocusHost {
    /// Append the ids of all visible focusable elements, in tree order.
    fn collect_focusable(&self, out: &mut Vec<ElementId>);

    /// Current frame of an element, or None if it is no longer in the tree.
    fn frame(&self, id: ElementId) -> Option<Rect>;

    /// How the element reacts to confirm; picks its hint line.
    fn interaction(&self, id: ElementId) -> InteractionKind;

    /// Apply or clear the focus mark on an element. May be called with an
    /// id that already left the tree; hosts ignore unknown ids.
    fn set_focused(&mut self, id: ElementId, focused: bool);

    /// Run the element's confirm action.
    fn activate(&mut self, id: ElementId);
}

/// Focus state and movement over a host's element tree.
///
/// Construction scans the host and focuses the first element, if any.
/// After that the state only changes through `set_focus` (directly or via
/// `navigate`/`focus_first`) and `rebuild`.
pub struct Navigator {
    registry: FocusRegistry,
    focused: Option<usize>,
    guide: FocusGuide,
}

impl Navigator {
    pub fn new(host: &mut dyn FocusHost) -> Self {
        let mut navigator = Self {
            registry: FocusRegistry::new(),
            focused: None,
            guide: FocusGuide::new(),
        };
        navigator.registry.rebuild(|out| host.collect_focusable(out));
        if !navigator.registry.is_empty() {
            navigator.set_focus(host, 0);
        }
        navigator
    }

    /// Move the focus to a registry index. Out-of-range indices are
    /// ignored, as is a target whose frame the host can no longer produce.
    /// This is the single path that blurs the old element, marks the new
    /// one, and shows its hint.
    pub fn set_focus(&mut self, host: &mut dyn FocusHost, index: usize) {
        let Some(id) = self.registry.get(index) else {
            return;
        };
        let Some(frame) = host.frame(id) else {
            return;
        };

        if let Some(previous) = self.focused {
            if previous != index {
                if let Some(previous_id) = self.registry.get(previous) {
                    host.set_focused(previous_id, false);
                }
            }
        }

        self.focused = Some(index);
        host.set_focused(id, true);
        self.guide.show(host.interaction(id), frame);
        tracing::debug!(index, id = id.raw(), "focus moved");
    }

    /// Resolve a d-pad press into a focus move. Without a focused element,
    /// or without an eligible target in that direction, nothing happens.
    pub fn navigate(&mut self, host: &mut dyn FocusHost, direction: Direction) {
        let Some(current) = self.focused else {
            return;
        };
        let Some(current_id) = self.registry.get(current) else {
            return;
        };
        let Some(origin) = host.frame(current_id) else {
            return;
        };

        let candidates = self
            .registry
            .ids()
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != current)
            .filter_map(|(index, &id)| host.frame(id).map(|frame| (index, frame)));

        match resolver::closest_in_direction(direction, origin, candidates) {
            Some(next) => self.set_focus(host, next),
            None => tracing::debug!(?direction, "no eligible focus target"),
        }
    }

    /// Confirm key: dispatch to the focused element, if there is one.
    pub fn activate(&mut self, host: &mut dyn FocusHost) {
        let Some(index) = self.focused else {
            tracing::debug!("confirm ignored, nothing focused");
            return;
        };
        if let Some(id) = self.registry.get(index) {
            host.activate(id);
        }
    }

    /// Re-scan the host after a structural change. Focus follows the
    /// focused element to its new index when it survived; when it is gone
    /// the navigator drops to unfocused, hides the stale hint, and leaves
    /// the choice of a successor to the host.
    pub fn rebuild(&mut self, host: &mut dyn FocusHost) {
        let previously_focused = self.focused.and_then(|index| self.registry.get(index));
        self.registry.rebuild(|out| host.collect_focusable(out));

        if let Some(id) = previously_focused {
            match self.registry.index_of(id) {
                Some(new_index) => {
                    // Same element, new coordinates; no side effects re-fire
                    self.focused = Some(new_index);
                }
                None => {
                    host.set_focused(id, false);
                    self.focused = None;
                    self.guide.hide();
                    tracing::debug!(id = id.raw(), "focused element left the tree");
                }
            }
        }
    }

    /// Host policy hook for regaining focus after it was lost (or never
    /// established over an initially empty tree). Returns whether an
    /// element is focused afterwards.
    pub fn focus_first(&mut self, host: &mut dyn FocusHost) -> bool {
        self.set_focus(host, 0);
        self.focused.is_some()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_id(&self) -> Option<ElementId> {
        self.focused.and_then(|index| self.registry.get(index))
    }

    pub fn element_count(&self) -> usize {
        self.registry.len()
    }

    pub fn guide(&self) -> &FocusGuide {
        &self.guide
    }
}
