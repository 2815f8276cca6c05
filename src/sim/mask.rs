//! Binary occupancy masks for pixel-accurate collision
//!
//! A mask marks which pixels of a shape's bounding rectangle are solid.
//! Bits are packed row by row into `u64` words.

use glam::IVec2;

use super::geom::Rect;

/// Alpha above this counts as solid in `Mask::from_alpha`
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

const WORD_BITS: usize = 64;

/// Row-packed bitmap
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("count", &self.count())
            .finish()
    }
}

impl Mask {
    /// Empty (fully transparent) mask
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height],
        }
    }

    /// Fully solid mask
    pub fn full(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut solid: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build a mask from a row-major alpha channel
    ///
    /// Returns `None` if `alpha` does not hold exactly `width * height` values.
    pub fn from_alpha(width: usize, height: usize, alpha: &[u8], threshold: u8) -> Option<Self> {
        if alpha.len() != width * height {
            return None;
        }
        Some(Self::from_fn(width, height, |x, y| alpha[y * width + x] > threshold))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as a vector (for comparing against rect sizes)
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> (usize, u64) {
        (y * self.words_per_row + x / WORD_BITS, 1u64 << (x % WORD_BITS))
    }

    /// Read a pixel (out of range reads as transparent)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.index(x, y);
        self.bits[word] & bit != 0
    }

    /// Signed-coordinate read, for offset lookups
    #[inline]
    fn get_signed(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.get(x as usize, y as usize)
    }

    /// The 64 pixels of row `y` starting at column `x`, bit 0 first
    ///
    /// Columns outside the mask read as transparent.
    fn row_word(&self, y: i32, x: i32) -> u64 {
        if y < 0 || y as usize >= self.height || x <= -(WORD_BITS as i32) {
            return 0;
        }
        if x < 0 {
            return self.row_word(y, 0) << (-x) as u32;
        }
        let row = y as usize * self.words_per_row;
        let (word, shift) = (x as usize / WORD_BITS, x as usize % WORD_BITS);
        if word >= self.words_per_row {
            return 0;
        }
        let mut bits = self.bits[row + word] >> shift;
        if shift > 0 && word + 1 < self.words_per_row {
            bits |= self.bits[row + word + 1] << (WORD_BITS - shift);
        }
        bits
    }

    /// Write a pixel (out of range writes are ignored)
    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, bit) = self.index(x, y);
        if solid {
            self.bits[word] |= bit;
        } else {
            self.bits[word] &= !bit;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// First pixel (in this mask's coordinates) where both masks are solid
    ///
    /// `offset` is the position of `other`'s top-left corner relative to
    /// this mask's top-left corner.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let ours = Rect::new(0, 0, self.width as i32, self.height as i32);
        let theirs = Rect {
            origin: offset,
            size: other.size(),
        };
        let region = ours.intersection(&theirs)?;

        // AND 64 columns at a time; both words are aligned to the same
        // column `x` of this mask
        for y in region.top()..region.bottom() {
            let mut x = region.left();
            while x < region.right() {
                let span = (region.right() - x).min(WORD_BITS as i32) as u32;
                let mut hits =
                    self.row_word(y, x) & other.row_word(y - offset.y, x - offset.x);
                if span < WORD_BITS as u32 {
                    hits &= (1u64 << span) - 1;
                }
                if hits != 0 {
                    return Some(IVec2::new(x + hits.trailing_zeros() as i32, y));
                }
                x += WORD_BITS as i32;
            }
        }
        None
    }

    /// Check if the two silhouettes share any pixel
    #[inline]
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        self.overlap(other, offset).is_some()
    }

    /// Smallest rect holding every solid pixel
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut min = IVec2::MAX;
        let mut max = IVec2::MIN;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    let p = IVec2::new(x as i32, y as i32);
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }
        if min.x > max.x {
            return None;
        }
        Some(Rect {
            origin: min,
            size: max - min + IVec2::ONE,
        })
    }

    /// Copy out the pixels covered by `rect` (parts outside read as empty)
    pub fn cropped(&self, rect: &Rect) -> Mask {
        let width = rect.width().max(0) as usize;
        let height = rect.height().max(0) as usize;
        Mask::from_fn(width, height, |x, y| {
            self.get_signed(rect.left() + x as i32, rect.top() + y as i32)
        })
    }

    /// Nearest-neighbour resize
    pub fn scaled(&self, width: usize, height: usize) -> Mask {
        if self.width == 0 || self.height == 0 {
            return Mask::new(width, height);
        }
        Mask::from_fn(width, height, |x, y| {
            self.get(x * self.width / width, y * self.height / height)
        })
    }

    /// Mirror top to bottom
    pub fn flipped_vertical(&self) -> Mask {
        let mut flipped = Mask::new(self.width, self.height);
        for y in 0..self.height {
            let src = (self.height - 1 - y) * self.words_per_row;
            let dst = y * self.words_per_row;
            flipped.bits[dst..dst + self.words_per_row]
                .copy_from_slice(&self.bits[src..src + self.words_per_row]);
        }
        flipped
    }

    /// Split into 8-connected components, each the size of this mask
    pub fn connected_components(&self) -> Vec<Mask> {
        let mut seen = Mask::new(self.width, self.height);
        let mut components = Vec::new();
        let mut stack = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                if !self.get(x, y) || seen.get(x, y) {
                    continue;
                }
                let mut component = Mask::new(self.width, self.height);
                seen.set(x, y, true);
                stack.push((x, y));

                while let Some((cx, cy)) = stack.pop() {
                    component.set(cx, cy, true);
                    for dy in -1i32..=1 {
                        for dx in -1i32..=1 {
                            let nx = cx as i32 + dx;
                            let ny = cy as i32 + dy;
                            if self.get_signed(nx, ny) && !seen.get_signed(nx, ny) {
                                seen.set(nx as usize, ny as usize, true);
                                stack.push((nx as usize, ny as usize));
                            }
                        }
                    }
                }
                components.push(component);
            }
        }
        components
    }

    /// Component with the most solid pixels (first one wins ties)
    pub fn largest_component(&self) -> Option<Mask> {
        let mut best: Option<(usize, Mask)> = None;
        for component in self.connected_components() {
            let count = component.count();
            if best.as_ref().is_none_or(|(n, _)| count > *n) {
                best = Some((count, component));
            }
        }
        best.map(|(_, mask)| mask)
    }

    /// Trim stray specks: keep the largest component and crop to its bounds
    ///
    /// A mask with no solid pixels is returned unchanged.
    pub fn crop_to_largest_component(&self) -> Mask {
        match self.largest_component() {
            Some(largest) => match largest.bounding_rect() {
                Some(rect) => largest.cropped(&rect),
                None => self.clone(),
            },
            None => self.clone(),
        }
    }
}
