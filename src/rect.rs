/// A rectangle with inclusive minimum and exclusive maximum coordinates.
///
/// Any rectangle with `min_x >= max_x` or `min_y >= max_y` is empty, and all
/// empty rectangles compare equal under [`RectIeU32::equals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RectIeU32 {
    pub min_incl_x: u32,
    pub min_incl_y: u32,
    pub max_excl_x: u32,
    pub max_excl_y: u32,
}

impl RectIeU32 {
    #[inline]
    pub const fn new(min_incl_x: u32, min_incl_y: u32, max_excl_x: u32, max_excl_y: u32) -> Self {
        Self {
            min_incl_x,
            min_incl_y,
            max_excl_x,
            max_excl_y,
        }
    }

    /// The rectangle `(0, 0)..(width, height)`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.min_incl_x >= self.max_excl_x || self.min_incl_y >= self.max_excl_y
    }

    /// Field-wise equality, except that any two empty rectangles are equal.
    pub fn equals(&self, other: &Self) -> bool {
        self == other || (self.is_empty() && other.is_empty())
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_incl_x: self.min_incl_x.max(other.min_incl_x),
            min_incl_y: self.min_incl_y.max(other.min_incl_y),
            max_excl_x: self.max_excl_x.min(other.max_excl_x),
            max_excl_y: self.max_excl_y.min(other.max_excl_y),
        }
    }

    /// Smallest rectangle containing both. Empty operands are ignored.
    pub fn unite(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min_incl_x: self.min_incl_x.min(other.min_incl_x),
            min_incl_y: self.min_incl_y.min(other.min_incl_y),
            max_excl_x: self.max_excl_x.max(other.max_excl_x),
            max_excl_y: self.max_excl_y.max(other.max_excl_y),
        }
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.min_incl_x <= x && x < self.max_excl_x && self.min_incl_y <= y && y < self.max_excl_y
    }

    /// An empty `other` is contained in every rectangle.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.is_empty()
            || (self.min_incl_x <= other.min_incl_x
                && other.max_excl_x <= self.max_excl_x
                && self.min_incl_y <= other.min_incl_y
                && other.max_excl_y <= self.max_excl_y)
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.max_excl_x.saturating_sub(self.min_incl_x)
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.max_excl_y.saturating_sub(self.min_incl_y)
    }
}
