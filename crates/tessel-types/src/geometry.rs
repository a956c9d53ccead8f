//! Integer geometry: points, sizes, rectangles and rectangle regions.
//!
//! Rectangles use exclusive right/bottom edges: `Rect::new(0, 0, 10, 4)`
//! covers columns `0..10` and rows `0..4`.

/// A position in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width/height pair. Negative values are treated as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// An axis-aligned rectangle with exclusive right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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

    /// Rectangle at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    /// Rectangle spanning `left..right`, `top..bottom`.
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// One past the last column.
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the last row.
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.w as i64 * self.h as i64
        }
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Move the edges: `dx1`/`dy1` shift left/top, `dx2`/`dy2` shift right/bottom.
    pub const fn adjusted(&self, dx1: i32, dy1: i32, dx2: i32, dy2: i32) -> Self {
        Self::from_edges(
            self.x + dx1,
            self.y + dy1,
            self.right() + dx2,
            self.bottom() + dy2,
        )
    }

    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x && y2 > y {
            Some(Self::from_edges(x, y, x2, y2))
        } else {
            None
        }
    }
}

/// A set of pixels described by disjoint rectangles.
///
/// Used as a clip shape: a frame minus its corner notches, or the ring between
/// an outer rectangle and an inner one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: Rect) -> Self {
        let rects = if rect.is_empty() { Vec::new() } else { vec![rect] };
        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    /// Bounding box of the region.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.rects.first()?;
        let mut bounds = *first;
        for r in &self.rects[1..] {
            bounds = Rect::from_edges(
                bounds.x.min(r.x),
                bounds.y.min(r.y),
                bounds.right().max(r.right()),
                bounds.bottom().max(r.bottom()),
            );
        }
        Some(bounds)
    }

    /// Remove `cut` from the region.
    pub fn subtract(&mut self, cut: Rect) {
        if cut.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.rects.len() + 3);
        for r in self.rects.drain(..) {
            let Some(hole) = r.intersect(&cut) else {
                out.push(r);
                continue;
            };
            // Full-width bands above and below, side pieces in the hole's rows.
            let pieces = [
                Rect::from_edges(r.x, r.y, r.right(), hole.y),
                Rect::from_edges(r.x, hole.bottom(), r.right(), r.bottom()),
                Rect::from_edges(r.x, hole.y, hole.x, hole.bottom()),
                Rect::from_edges(hole.right(), hole.y, r.right(), hole.bottom()),
            ];
            out.extend(pieces.into_iter().filter(|p| !p.is_empty()));
        }
        self.rects = out;
    }

    /// Keep only the part of the region inside `clip`.
    pub fn intersect_rect(&self, clip: Rect) -> Self {
        Self {
            rects: self.rects.iter().filter_map(|r| r.intersect(&clip)).collect(),
        }
    }

    /// Pixels present in both regions.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut rects = Vec::new();
        for a in &self.rects {
            rects.extend(other.rects.iter().filter_map(|b| a.intersect(b)));
        }
        Self { rects }
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}
