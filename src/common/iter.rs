use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks two-module-wide columns from the bottom-right corner, alternating upward
/// and downward, skipping the vertical timing column. Yields (x, y) for every module,
/// function patterns included.
pub struct EncRegionIter {
    // Right column of the current pair
    right: i32,
    // Steps taken within the current pair
    vert: i32,
    // 0 for the right column, 1 for the left
    side: i32,
    width: i32,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i32;
        Self { right: w - 1, vert: 0, side: 0, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i32, i32);
    fn next(&mut self) -> Option<Self::Item> {
        if self.right == 6 {
            self.right = 5;
        }
        if self.right < 1 {
            return None;
        }
        let x = self.right - self.side;
        let upward = (self.right + 1) & 2 == 0;
        let y = if upward { self.width - 1 - self.vert } else { self.vert };

        self.side += 1;
        if self.side == 2 {
            self.side = 0;
            self.vert += 1;
            if self.vert == self.width {
                self.vert = 0;
                self.right -= 2;
            }
        }
        Some((x, y))
    }
}
