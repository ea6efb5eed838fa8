// Directional focus resolution
//
// Pure geometry: given the focused frame, a direction, and the frames of
// every other registered element, pick the next focus target. Candidates
// are judged by their center; the departure point is the midpoint of the
// focused frame's edge facing the pressed direction. Only candidates whose
// center lies strictly beyond that point qualify, so elements level with
// the focused one are unreachable in that direction and a lone element can
// never resolve to itself.

use ratatui::layout::Rect;

use super::geometry::{self, Direction};

/// Resolve the next focus target. `candidates` carries registry indices
/// with their current frames, with the focused element already excluded.
/// Returns `None` when nothing qualifies in the pressed direction.
pub fn closest_in_direction(
    direction: Direction,
    origin: Rect,
    candidates: impl IntoIterator<Item = (usize, Rect)>,
) -> Option<usize> {
    let reference = geometry::reference_point(origin, direction);
    let mut best: Option<(usize, f64)> = None;

    for (index, frame) in candidates {
        let target = geometry::center(frame);
        if !direction.admits(reference, target) {
            continue;
        }

        let dist = geometry::distance(reference, target);
        let better = match best {
            None => true,
            // Ties break to the lowest registry index
            Some((best_index, best_dist)) => {
                dist < best_dist || (dist == best_dist && index < best_index)
            }
        };
        if better {
            best = Some((index, dist));
        }
    }

    best.map(|(index, _)| index)
}
