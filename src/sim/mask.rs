//! Binary occupancy masks for narrow-phase collision
//!
//! One bit per pixel, packed into 64-bit words per row. A set bit marks an
//! opaque pixel.

const WORD_BITS: usize = 64;

/// A `width × height` bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// All-clear mask
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Fully opaque mask, used to stand in for a rectangular hitbox
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Build a mask by evaluating `opaque(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if opaque(x, y) {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> (usize, u64) {
        let word = y as usize * self.words_per_row + x as usize / WORD_BITS;
        (word, 1u64 << (x as usize % WORD_BITS))
    }

    /// Mark a pixel opaque. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            let (word, bit) = self.index(x, y);
            self.bits[word] |= bit;
        }
    }

    /// Whether a pixel is opaque. Out-of-range coordinates read as clear.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.index(x, y);
        self.bits[word] & bit != 0
    }

    /// Number of opaque pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First pixel (in this mask's coordinates, row-major) where both masks
    /// are opaque, with `other`'s top-left placed at `offset` relative to
    /// this mask's top-left.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width as i32).min(self.width as i32);
        let y1 = (dy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_across_word_boundary() {
        let mut mask = Mask::new(130, 2);
        mask.set(63, 0);
        mask.set(64, 0);
        mask.set(129, 1);
        assert!(mask.get(63, 0));
        assert!(mask.get(64, 0));
        assert!(mask.get(129, 1));
        assert!(!mask.get(65, 0));
        assert!(!mask.get(500, 0));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_filled_overlap_at_offset() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(4, 4);
        assert_eq!(a.overlap(&b, (3, 2)), Some((3, 2)));
        // Negative offset: b hangs off the top-left corner
        assert_eq!(a.overlap(&b, (-2, -3)), Some((0, 0)));
        // Fully outside
        assert_eq!(a.overlap(&b, (10, 0)), None);
        assert_eq!(a.overlap(&b, (-4, 0)), None);
    }

    #[test]
    fn test_transparent_corner_does_not_overlap() {
        // Diamond: opaque only where |x-5| + |y-5| <= 4
        let diamond = Mask::from_fn(11, 11, |x, y| {
            (x as i32 - 5).abs() + (y as i32 - 5).abs() <= 4
        });
        let square = Mask::filled(2, 2);
        // Top-left corner of the bounding box is transparent
        assert_eq!(diamond.overlap(&square, (0, 0)), None);
        // Center is opaque
        assert!(diamond.overlap(&square, (5, 5)).is_some());
    }
}
