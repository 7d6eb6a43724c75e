//! Integer rectangles in screen space
//!
//! Screen space has its origin at the top-left and y growing downward, so
//! `bottom` is the larger y value. Right and bottom edges are exclusive.

/// An axis-aligned rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle whose bottom-left corner sits at `(left, bottom)`
    pub const fn from_bottom_left(left: i32, bottom: i32, w: i32, h: i32) -> Self {
        Self::new(left, bottom - h, w, h)
    }

    /// Rectangle whose bottom edge is centered on `(centerx, bottom)`
    pub const fn from_mid_bottom(centerx: i32, bottom: i32, w: i32, h: i32) -> Self {
        Self::new(centerx - w / 2, bottom - h, w, h)
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub const fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap test. Touching edges do not collide and an empty
    /// rectangle never collides with anything.
    pub fn colliderect(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_anchors() {
        let r = Rect::from_bottom_left(800, 325, 48, 48);
        assert_eq!(r.left(), 800);
        assert_eq!(r.bottom(), 325);
        assert_eq!(r.top(), 277);

        let m = Rect::from_mid_bottom(150, 325, 50, 25);
        assert_eq!(m.x, 125);
        assert_eq!(m.centerx(), 150);
        assert_eq!(m.bottom(), 325);
    }

    #[test]
    fn test_colliderect_overlap_and_touching() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.colliderect(&Rect::new(5, 5, 10, 10)));
        // Sharing an edge is not an overlap
        assert!(!a.colliderect(&Rect::new(10, 0, 10, 10)));
        assert!(!a.colliderect(&Rect::new(0, 10, 10, 10)));
        // Containment counts
        assert!(a.colliderect(&Rect::new(2, 2, 3, 3)));
    }

    #[test]
    fn test_empty_rect_never_collides() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.colliderect(&Rect::new(5, 5, 0, 4)));
        assert!(!Rect::new(5, 5, 4, 0).colliderect(&a));
    }
}
