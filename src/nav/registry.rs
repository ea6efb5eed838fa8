// Ordered registry of focusable elements
//
// The registry is a flat, ordered list of element ids captured from the
// host's tree. It is rebuilt on demand (never polled): the host reports
// structural changes and the event loop drains them into one rebuild.
// Registry indices are the engine's focus coordinates, so every rebuild
// invalidates previously held indices; Navigator::rebuild re-maps them.

use super::ElementId;

/// Ordered list of the currently focusable elements.
#[derive(Debug, Default)]
pub struct FocusRegistry {
    ids: Vec<ElementId>,
}

impl FocusRegistry {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Rebuild from the host's current tree. `collect` appends the ids of
    /// visible focusable elements in tree order; duplicate registrations
    /// are dropped here, first occurrence wins.
    pub fn rebuild(&mut self, collect: impl FnOnce(&mut Vec<ElementId>)) {
        self.ids.clear();
        collect(&mut self.ids);

        let mut seen: Vec<ElementId> = Vec::with_capacity(self.ids.len());
        self.ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
    }

    pub fn get(&self, index: usize) -> Option<ElementId> {
        self.ids.get(index).copied()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.ids.iter().position(|&other| other == id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
