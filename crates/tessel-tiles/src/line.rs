//! Three-piece strips: a cap, a repeatable middle, another cap.
//!
//! The one-dimensional cousin of [`TileSet`](crate::TileSet), used for
//! separators and single border lines.

use tessel_types::backend::TileBackend;
use tessel_types::config::Orientation;
use tessel_types::error::Result;
use tessel_types::flags::PosFlags;
use tessel_types::geometry::{Point, Rect};
use tessel_types::image::Image;

use crate::render::fit_pair;
use crate::template::{Slice, repeated_len};

/// A strip template cut from one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    orientation: Orientation,
    thickness: i32,
    cap0: Slice,
    middle: Slice,
    cap1: Slice,
}

impl LineTemplate {
    /// Cut `image` at `split_start` and `split_end` along `orientation`.
    ///
    /// `[0, split_start)` is the leading cap, `[split_start, split_end)` the
    /// repeated middle and the rest the trailing cap. Splits are clamped to
    /// the image.
    pub fn new(image: &Image, orientation: Orientation, split_start: i32, split_end: i32) -> Self {
        let (len, thickness) = match orientation {
            Orientation::Horizontal => (image.width() as i32, image.height() as i32),
            Orientation::Vertical => (image.height() as i32, image.width() as i32),
        };
        let start = split_start.clamp(0, len);
        let end = split_end.clamp(start, len);
        let unit = end - start;

        // Axis-relative rect -> image rect.
        let cut = |along: i32, extent: i32| match orientation {
            Orientation::Horizontal => Rect::new(along, 0, extent, thickness),
            Orientation::Vertical => Rect::new(0, along, thickness, extent),
        };

        let middle = if unit > 0 {
            let run = repeated_len(unit);
            let (w, h) = match orientation {
                Orientation::Horizontal => (run, thickness),
                Orientation::Vertical => (thickness, run),
            };
            Image::from_fn(w as u32, h as u32, |x, y| {
                let (x, y) = (x as i32, y as i32);
                match orientation {
                    Orientation::Horizontal => image.pixel(start + x % unit, y),
                    Orientation::Vertical => image.pixel(x, start + y % unit),
                }
            })
        } else {
            Image::null()
        };

        Self {
            orientation,
            thickness,
            cap0: Slice::new(image.crop(cut(0, start))),
            middle: Slice::new(middle),
            cap1: Slice::new(image.crop(cut(end, len - end))),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Extent perpendicular to the strip.
    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    /// Lengths of the leading and trailing caps as cut.
    pub fn cap_lengths(&self) -> (i32, i32) {
        (self.along(&self.cap0), self.along(&self.cap1))
    }

    fn along(&self, slice: &Slice) -> i32 {
        match self.orientation {
            Orientation::Horizontal => slice.width(),
            Orientation::Vertical => slice.height(),
        }
    }

    /// Draw the strip along `rect`.
    ///
    /// Horizontal strips use `LEFT`/`RIGHT` for their caps, vertical ones
    /// `TOP`/`BOTTOM`; `CENTER` selects the middle. With `far_aligned` the
    /// strip hugs the bottom (or right) edge of `rect` instead of the top
    /// (or left).
    pub fn render<B: TileBackend + ?Sized>(
        &self,
        backend: &mut B,
        rect: Rect,
        flags: PosFlags,
        far_aligned: bool,
    ) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let horizontal = self.orientation == Orientation::Horizontal;
        let (lead_flag, trail_flag) = if horizontal {
            (PosFlags::LEFT, PosFlags::RIGHT)
        } else {
            (PosFlags::TOP, PosFlags::BOTTOM)
        };
        let (start, length) = if horizontal {
            (rect.x, rect.w)
        } else {
            (rect.y, rect.h)
        };
        let across = match (horizontal, far_aligned) {
            (true, false) => rect.y,
            (true, true) => rect.bottom() - self.thickness,
            (false, false) => rect.x,
            (false, true) => rect.right() - self.thickness,
        };

        let (cap0_len, cap1_len) = self.cap_lengths();
        let (d0, d2) = fit_pair(
            if flags.contains(lead_flag) { cap0_len } else { 0 },
            if flags.contains(trail_flag) { cap1_len } else { 0 },
            length,
        );

        // Strip-relative (along, extent) -> target point / rect.
        let at = |along: i32| {
            if horizontal {
                Point::new(along, across)
            } else {
                Point::new(across, along)
            }
        };
        let span = |along: i32, extent: i32| {
            if horizontal {
                Rect::new(along, across, extent, self.thickness)
            } else {
                Rect::new(across, along, self.thickness, extent)
            }
        };
        let src = |from: i32, extent: i32| {
            if horizontal {
                Rect::new(from, 0, extent, self.thickness)
            } else {
                Rect::new(0, from, self.thickness, extent)
            }
        };

        let gap = length - d0 - d2;
        if flags.contains(PosFlags::CENTER)
            && gap > 0
            && let Some(img) = self.middle.image()
        {
            backend.tiled_blit(img, span(start + d0, gap), Point::ZERO)?;
        }
        if d0 > 0
            && let Some(img) = self.cap0.image()
        {
            backend.blit(img, src(0, d0), at(start))?;
        }
        if d2 > 0
            && let Some(img) = self.cap1.image()
        {
            backend.blit(img, src(cap1_len - d2, d2), at(start + length - d2))?;
        }
        Ok(())
    }
}
