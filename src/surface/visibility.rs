//! Geometry for deciding whether a status item is really on screen.
//!
//! Platforms report an item frame in bottom-left-origin screen coordinates,
//! while hit-testing works top-down. An item counts as visible only when the
//! element under the midpoint of its frame belongs to the item's owner; any
//! step that cannot be resolved answers "not visible".

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn mid(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Half-open containment, so adjacent screens never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Map a bottom-left-origin point into the top-left-origin space of `screen`.
pub fn flip_to_top_left(point: Point, screen: &Rect) -> Point {
    Point {
        x: point.x,
        y: screen.y + screen.height - point.y,
    }
}

/// Decide visibility of an item frame.
///
/// `hit_test` receives top-left-origin coordinates and returns the owner of
/// the element there, if any.
pub fn frame_is_visible<O, H>(frame: Option<Rect>, screens: &[Rect], hit_test: H, owner: &O) -> bool
where
    O: PartialEq,
    H: FnOnce(Point) -> Option<O>,
{
    let Some(frame) = frame else {
        return false;
    };
    let mid = frame.mid();
    let Some(screen) = screens.iter().find(|screen| screen.contains(mid)) else {
        return false;
    };
    match hit_test(flip_to_top_left(mid, screen)) {
        Some(found) => found == *owner,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 40.0,
    };

    #[test]
    fn missing_frame_is_hidden() {
        assert!(!frame_is_visible(None, &[SCREEN], |_| Some(1u32), &1));
    }

    #[test]
    fn offscreen_frame_is_hidden() {
        let frame = Rect::new(-20.0, 39.0, 10.0, 1.0);
        assert!(!frame_is_visible(Some(frame), &[SCREEN], |_| Some(1u32), &1));
    }

    #[test]
    fn hit_test_must_match_owner() {
        let frame = Rect::new(80.0, 39.0, 10.0, 1.0);
        assert!(frame_is_visible(Some(frame), &[SCREEN], |_| Some(7u32), &7));
        assert!(!frame_is_visible(Some(frame), &[SCREEN], |_| Some(8u32), &7));
        assert!(!frame_is_visible(Some(frame), &[SCREEN], |_| None::<u32>, &7));
    }

    #[test]
    fn hit_test_receives_flipped_midpoint() {
        let frame = Rect::new(80.0, 39.0, 10.0, 1.0);
        let mut seen = None;
        frame_is_visible(
            Some(frame),
            &[SCREEN],
            |point| {
                seen = Some(point);
                Some(1u32)
            },
            &1,
        );
        assert_eq!(seen, Some(Point { x: 85.0, y: 0.5 }));
    }

    #[test]
    fn second_screen_is_searched() {
        let right = Rect::new(100.0, 0.0, 50.0, 20.0);
        let frame = Rect::new(120.0, 19.0, 4.0, 1.0);
        let mut seen = None;
        let visible = frame_is_visible(
            Some(frame),
            &[SCREEN, right],
            |point| {
                seen = Some(point);
                Some(())
            },
            &(),
        );
        assert!(visible);
        assert_eq!(seen, Some(Point { x: 122.0, y: 0.5 }));
    }
}
