//! Rectangle primitives shared by every placer: intersection, subtraction into
//! residual strips, and the fit predicate used throughout the free-rectangle store.

use smallvec::SmallVec;

/// An axis-aligned rectangle using the closed-open convention: a point `(px, py)`
/// lies inside `r` iff `r.x <= px < r.x + r.width` and `r.y <= py < r.y + r.height`.
#[cfg_attr(feature = "serialize", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// X location of the left edge.
    pub x: f64,
    /// Y location of the bottom edge.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge of this rectangle.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge of this rectangle.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this rectangle's dimensions are both strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whether `inner` is fully contained within this rectangle (non-strict).
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.top() <= self.top()
    }

    /// Returns a copy of this rectangle inflated by `gap` on every side. Used to
    /// build the exclusion rect for a placed piece before subtracting it from the
    /// free-rectangle store, so that the gap is maintained implicitly.
    pub fn inflate(&self, gap: f64) -> Rect {
        Rect {
            x: self.x - gap,
            y: self.y - gap,
            width: self.width + 2.0 * gap,
            height: self.height + 2.0 * gap,
        }
    }
}

/// Area of a rectangle.
pub fn area(r: &Rect) -> f64 {
    r.width * r.height
}

/// True iff the open interiors of `a` and `b` overlap. Touching edges do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x + a.width > b.x && b.x + b.width > a.x && a.y + a.height > b.y && b.y + b.height > a.y
}

/// Whether a `w`×`h` rectangle fits within `rect` without rotation.
pub fn fits(rect: &Rect, w: f64, h: f64) -> bool {
    rect.width >= w && rect.height >= h
}

/// Subtracts `obstacle`'s footprint from `space`, returning the left, right, bottom,
/// and top residual strips that remain. Callers must ensure `intersects(space, obstacle)`
/// first; strips with non-positive width or height are omitted.
pub fn subtract(space: &Rect, obstacle: &Rect) -> SmallVec<[Rect; 4]> {
    let mut strips = SmallVec::new();

    if obstacle.x > space.x {
        strips.push(Rect::new(space.x, space.y, obstacle.x - space.x, space.height));
    }

    let right_width = space.right() - obstacle.right();
    if right_width > 0.0 {
        strips.push(Rect::new(obstacle.right(), space.y, right_width, space.height));
    }

    if obstacle.y > space.y {
        strips.push(Rect::new(space.x, space.y, space.width, obstacle.y - space.y));
    }

    let top_height = space.top() - obstacle.top();
    if top_height > 0.0 {
        strips.push(Rect::new(space.x, obstacle.top(), space.width, top_height));
    }

    strips.retain(|r| r.is_positive());
    strips
}
