//! Scalable frames drawn from a nine-slice template.

use tessel_types::backend::{Canvas, TileBackend};
use tessel_types::color::Color;
use tessel_types::error::Result;
use tessel_types::flags::PosFlags;
use tessel_types::geometry::{Point, Rect, Region, Size};
use tessel_types::image::Image;

use crate::picture::{Picture, PictureBuilder};
use crate::render::render_tiles;
use crate::template::{RadiusHint, SlicePos, TileTemplate};

/// How far a missing side of an outline is pushed out before clipping.
const OUTLINE_OVERSHOOT: i32 = 100;

/// A frame that renders at any size from one template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileSet {
    template: TileTemplate,
}

impl TileSet {
    /// Cut `image` around `inner`. See [`TileTemplate::new`].
    pub fn new(image: &Image, inner: Rect, radius: RadiusHint) -> Self {
        Self::from_template(TileTemplate::new(image, inner, radius))
    }

    pub fn from_template(template: TileTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &TileTemplate {
        &self.template
    }

    pub(crate) fn template_mut(&mut self) -> &mut TileTemplate {
        &mut self.template
    }

    pub fn width(&self, pos: SlicePos) -> i32 {
        self.template.width(pos)
    }

    pub fn height(&self, pos: SlicePos) -> i32 {
        self.template.height(pos)
    }

    /// Draw the parts selected by `flags` into `rect` on any backend.
    pub fn render<B: TileBackend + ?Sized>(
        &self,
        backend: &mut B,
        rect: Rect,
        flags: PosFlags,
    ) -> Result<()> {
        render_tiles(backend, self.template.grid(), rect, flags)
    }

    /// Render into a fresh retained picture of `size`.
    pub fn render_picture(&self, size: Size, flags: PosFlags) -> Result<Picture> {
        let mut builder = PictureBuilder::new(size);
        self.render(&mut builder, Rect::from_size(size), flags)?;
        Ok(builder.finish())
    }

    /// The part of `rect` occupied by one band, or the center.
    ///
    /// `part` must be exactly one of `LEFT`, `TOP`, `RIGHT`, `BOTTOM` or
    /// `CENTER`; anything else returns `rect` unchanged.
    pub fn rect(&self, rect: Rect, part: PosFlags) -> Rect {
        let b = self.template.borders();
        if part == PosFlags::CENTER {
            rect.adjusted(b.left, b.top, -b.right, -b.bottom)
        } else if part == PosFlags::LEFT {
            Rect::new(rect.x, rect.y, b.left, rect.h)
        } else if part == PosFlags::TOP {
            Rect::new(rect.x, rect.y, rect.w, b.top)
        } else if part == PosFlags::RIGHT {
            Rect::new(rect.right() - b.right, rect.y, b.right, rect.h)
        } else if part == PosFlags::BOTTOM {
            Rect::new(rect.x, rect.bottom() - b.bottom, rect.w, b.bottom)
        } else {
            rect
        }
    }

    /// Stroke a one-pixel rounded outline around `rect`.
    ///
    /// Sides missing from `flags` are pushed far outside `rect` before the
    /// stroke is clipped to it, so only the requested corners curve. With
    /// `strong`, the straight runs between the corners are drawn as well.
    pub fn outline<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        rect: Rect,
        color: Color,
        strong: bool,
        flags: PosFlags,
    ) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let (last_x, last_y) = (rect.right() - 1, rect.bottom() - 1);
        let segment = |c: &mut C, from: Point, to: Point| -> Result<()> {
            if from.x <= to.x && from.y <= to.y {
                c.draw_line(from, to, color)?;
            }
            Ok(())
        };

        let (mut left, mut top, mut right, mut bottom) =
            (rect.x, rect.y, rect.right(), rect.bottom());
        if !flags.contains(PosFlags::TOP) {
            top -= OUTLINE_OVERSHOOT;
        } else if strong {
            segment(
                canvas,
                Point::new(rect.x + self.width(SlicePos::TopLeft), rect.y),
                Point::new(last_x - self.width(SlicePos::TopRight), rect.y),
            )?;
        }
        if !flags.contains(PosFlags::LEFT) {
            left -= OUTLINE_OVERSHOOT;
        } else if strong {
            segment(
                canvas,
                Point::new(rect.x, rect.y + self.height(SlicePos::TopLeft)),
                Point::new(rect.x, last_y - self.height(SlicePos::BottomLeft)),
            )?;
        }
        if !flags.contains(PosFlags::BOTTOM) {
            bottom += OUTLINE_OVERSHOOT;
        } else if strong {
            segment(
                canvas,
                Point::new(rect.x + self.width(SlicePos::BottomLeft), last_y),
                Point::new(last_x - self.width(SlicePos::BottomRight), last_y),
            )?;
        }
        if !flags.contains(PosFlags::RIGHT) {
            right += OUTLINE_OVERSHOOT;
        } else if strong {
            segment(
                canvas,
                Point::new(last_x, rect.y + self.height(SlicePos::TopRight)),
                Point::new(last_x, last_y - self.height(SlicePos::BottomRight)),
            )?;
        }

        let shape = Rect::from_edges(left, top, right, bottom);
        let (rx, ry) = self.outline_radii(shape);
        canvas.push_clip(Region::from_rect(rect))?;
        let stroked = canvas.stroke_rounded_rect(shape, rx, ry, color);
        canvas.pop_clip()?;
        stroked
    }

    /// Corner radii of the outline stroked around `shape`.
    ///
    /// The scaled radius hint becomes a roundness percentage of the shape
    /// (rounded up, capped at 99), and half that percentage of the shape's
    /// extent is the radius.
    fn outline_radii(&self, shape: Rect) -> (f32, f32) {
        let (hint_x, hint_y) = self.template.scaled_radius();
        let axis = |hint: i32, extent: i32| {
            if extent <= 0 || hint <= 0 {
                return 0.0;
            }
            let roundness = (hint.saturating_add(extent - 1) / extent).clamp(0, 99);
            extent as f32 * roundness as f32 / 200.0
        };
        (axis(hint_x, shape.w), axis(hint_y, shape.h))
    }
}
