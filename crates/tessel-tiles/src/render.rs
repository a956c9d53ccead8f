//! The nine-slice layout shared by every backend.
//!
//! [`render_tiles`] decides *what* goes *where*; the [`TileBackend`] it is
//! handed decides how a blit happens (blend onto a surface, copy into a
//! retained picture, colorize through a mask first).

use tessel_types::backend::TileBackend;
use tessel_types::error::Result;
use tessel_types::flags::PosFlags;
use tessel_types::geometry::{Point, Rect};

use crate::template::{SliceGrid, SlicePos};

/// Fit two fixed pieces that share an axis of length `avail`.
///
/// When `lead + trail` exceeds `avail`, both shrink proportionally: the
/// leading piece gets `floor(lead * avail / (lead + trail))`, the trailing
/// one the rest, so the pair always covers exactly `avail`.
pub fn fit_pair(lead: i32, trail: i32, avail: i32) -> (i32, i32) {
    let avail = avail.max(0);
    let total = lead + trail;
    if total <= avail || total <= 0 {
        return (lead, trail);
    }
    let lead = (lead as i64 * avail as i64 / total as i64) as i32;
    (lead, avail - lead)
}

/// Where the border bands land for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Target rectangle.
    pub rect: Rect,
    /// Drawn band thicknesses after overlap shrinking (0 for omitted sides).
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TileLayout {
    pub fn compute(grid: &SliceGrid, rect: Rect, flags: PosFlags) -> Self {
        let b = grid.borders();
        let pick = |flag: PosFlags, v: i32| if flags.contains(flag) { v } else { 0 };
        let (left, right) = fit_pair(
            pick(PosFlags::LEFT, b.left),
            pick(PosFlags::RIGHT, b.right),
            rect.w,
        );
        let (top, bottom) = fit_pair(
            pick(PosFlags::TOP, b.top),
            pick(PosFlags::BOTTOM, b.bottom),
            rect.h,
        );
        Self {
            rect,
            left,
            top,
            right,
            bottom,
        }
    }

    /// The stretchable interior between the drawn bands.
    pub fn inner(&self) -> Rect {
        Rect::from_edges(
            self.rect.x + self.left,
            self.rect.y + self.top,
            self.rect.right() - self.right,
            self.rect.bottom() - self.bottom,
        )
    }

    fn right_x(&self) -> i32 {
        self.rect.right() - self.right
    }

    fn bottom_y(&self) -> i32 {
        self.rect.bottom() - self.bottom
    }
}

/// Draw the requested parts of `grid` into `rect`.
///
/// Corners are blitted unscaled (cropped from their outer side when the
/// target is too small); edges and the center are tiled, never stretched.
/// Absent slices and empty targets produce no backend calls.
pub fn render_tiles<B: TileBackend + ?Sized>(
    backend: &mut B,
    grid: &SliceGrid,
    rect: Rect,
    flags: PosFlags,
) -> Result<()> {
    if rect.is_empty() {
        return Ok(());
    }
    let layout = TileLayout::compute(grid, rect, flags);
    let inner = layout.inner();
    let (x, y) = (rect.x, rect.y);

    // Blit the leading/trailing part of a corner so its outer edge stays put.
    let corner = |b: &mut B, pos: SlicePos, w: i32, h: i32, dst: Point| -> Result<()> {
        let slice = grid.get(pos);
        let Some(img) = slice.image() else {
            return Ok(());
        };
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let sx = if matches!(pos, SlicePos::TopRight | SlicePos::BottomRight) {
            slice.width() - w
        } else {
            0
        };
        let sy = if matches!(pos, SlicePos::BottomLeft | SlicePos::BottomRight) {
            slice.height() - h
        } else {
            0
        };
        b.blit(img, Rect::new(sx, sy, w, h), dst)
    };

    let tile = |b: &mut B, pos: SlicePos, dst: Rect, offset: Point| -> Result<()> {
        match grid.get(pos).image() {
            Some(img) if !dst.is_empty() => b.tiled_blit(img, dst, offset),
            _ => Ok(()),
        }
    };

    if flags.contains(PosFlags::TOP) && layout.top > 0 {
        if flags.contains(PosFlags::LEFT) {
            corner(backend, SlicePos::TopLeft, layout.left, layout.top, Point::new(x, y))?;
        }
        if flags.contains(PosFlags::RIGHT) {
            corner(
                backend,
                SlicePos::TopRight,
                layout.right,
                layout.top,
                Point::new(layout.right_x(), y),
            )?;
        }
        tile(
            backend,
            SlicePos::Top,
            Rect::new(inner.x, y, inner.w, layout.top),
            Point::ZERO,
        )?;
    }

    if flags.contains(PosFlags::BOTTOM) && layout.bottom > 0 {
        let by = layout.bottom_y();
        if flags.contains(PosFlags::LEFT) {
            corner(backend, SlicePos::BottomLeft, layout.left, layout.bottom, Point::new(x, by))?;
        }
        if flags.contains(PosFlags::RIGHT) {
            corner(
                backend,
                SlicePos::BottomRight,
                layout.right,
                layout.bottom,
                Point::new(layout.right_x(), by),
            )?;
        }
        let phase = grid.get(SlicePos::Bottom).height() - layout.bottom;
        tile(
            backend,
            SlicePos::Bottom,
            Rect::new(inner.x, by, inner.w, layout.bottom),
            Point::new(0, phase),
        )?;
    }

    if inner.h > 0 {
        if flags.contains(PosFlags::CENTER) {
            tile(backend, SlicePos::Center, inner, Point::ZERO)?;
        }
        if flags.contains(PosFlags::LEFT) && layout.left > 0 {
            tile(
                backend,
                SlicePos::Left,
                Rect::new(x, inner.y, layout.left, inner.h),
                Point::ZERO,
            )?;
        }
        if flags.contains(PosFlags::RIGHT) && layout.right > 0 {
            let phase = grid.get(SlicePos::Right).width() - layout.right;
            tile(
                backend,
                SlicePos::Right,
                Rect::new(layout.right_x(), inner.y, layout.right, inner.h),
                Point::new(phase, 0),
            )?;
        }
    }
    Ok(())
}
