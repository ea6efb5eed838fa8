// Screen geometry for directional focus resolution
//
// All navigation math runs in f64 screen space (y grows downward, same as
// terminal rows). Frames are ratatui Rects; midpoints of odd-sized frames
// must not truncate, so cell coordinates are widened before dividing.

use ratatui::layout::Rect;

/// D-pad direction on the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Center of a frame.
pub fn center(frame: Rect) -> Point {
    Point::new(
        f64::from(frame.x) + f64::from(frame.width) / 2.0,
        f64::from(frame.y) + f64::from(frame.height) / 2.0,
    )
}

/// Departure point on the focused frame for a given direction: the midpoint
/// of the edge facing that direction.
pub fn reference_point(frame: Rect, direction: Direction) -> Point {
    let mid_x = f64::from(frame.x) + f64::from(frame.width) / 2.0;
    let mid_y = f64::from(frame.y) + f64::from(frame.height) / 2.0;
    match direction {
        Direction::Up => Point::new(mid_x, f64::from(frame.top())),
        Direction::Down => Point::new(mid_x, f64::from(frame.bottom())),
        Direction::Left => Point::new(f64::from(frame.left()), mid_y),
        Direction::Right => Point::new(f64::from(frame.right()), mid_y),
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

impl Direction {
    /// True when `candidate` lies strictly on this direction's far side of
    /// `reference`. Equality never qualifies: an element level with the
    /// reference point is not reachable in that direction.
    pub fn admits(self, reference: Point, candidate: Point) -> bool {
        match self {
            Direction::Up => candidate.y < reference.y,
            Direction::Down => candidate.y > reference.y,
            Direction::Left => candidate.x < reference.x,
            Direction::Right => candidate.x > reference.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_odd_sized_frame() {
        // 5x3 frame at origin: center falls between cells
        let point = center(Rect::new(0, 0, 5, 3));
        assert_eq!(point, Point::new(2.5, 1.5));
    }

    #[test]
    fn test_reference_points_per_direction() {
        let frame = Rect::new(0, 0, 10, 10);
        assert_eq!(reference_point(frame, Direction::Up), Point::new(5.0, 0.0));
        assert_eq!(
            reference_point(frame, Direction::Down),
            Point::new(5.0, 10.0)
        );
        assert_eq!(
            reference_point(frame, Direction::Left),
            Point::new(0.0, 5.0)
        );
        assert_eq!(
            reference_point(frame, Direction::Right),
            Point::new(10.0, 5.0)
        );
    }

    #[test]
    fn test_admits_requires_strict_inequality() {
        let reference = Point::new(5.0, 10.0);

        // Level with the reference: never admitted, in any direction
        let level = Point::new(5.0, 10.0);
        assert!(!Direction::Up.admits(reference, level));
        assert!(!Direction::Down.admits(reference, level));
        assert!(!Direction::Left.admits(reference, level));
        assert!(!Direction::Right.admits(reference, level));

        // Strictly below: only Down admits
        let below = Point::new(5.0, 10.5);
        assert!(Direction::Down.admits(reference, below));
        assert!(!Direction::Up.admits(reference, below));

        // Strictly left: only Left admits
        let left = Point::new(4.0, 10.0);
        assert!(Direction::Left.admits(reference, left));
        assert!(!Direction::Right.admits(reference, left));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
        assert_eq!(distance(a, a), 0.0);
    }
}
