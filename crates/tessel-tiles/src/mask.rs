//! Alpha masks: recolor any paint through the shape of a nine-slice template.
//!
//! A [`TileMask`] keeps only the template's *shape*. The area between the
//! corners is filled through a clip region; each corner is colorized by
//! running the paint through the corner's alpha channel. Inverted rendering
//! uses the alpha-inverted slices to paint everything *outside* the shape.

use tessel_types::backend::{Canvas, TileBackend};
use tessel_types::color::Color;
use tessel_types::error::Result;
use tessel_types::flags::PosFlags;
use tessel_types::geometry::{Point, Rect, Region};
use tessel_types::image::Image;
use tessel_types::paint::Paint;

use crate::render::render_tiles;
use crate::template::{RadiusHint, SliceGrid, SlicePos};
use crate::tileset::TileSet;

/// Signed edge deltas from a drawn rectangle to its content rectangle.
///
/// Applied like [`Rect::adjusted`]: `dx1`/`dy1` move the left/top edge,
/// `dx2`/`dy2` the right/bottom edge. Inconsistent values produce odd
/// shapes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inset {
    pub dx1: i32,
    pub dy1: i32,
    pub dx2: i32,
    pub dy2: i32,
}

impl Inset {
    pub const fn new(dx1: i32, dy1: i32, dx2: i32, dy2: i32) -> Self {
        Self { dx1, dy1, dx2, dy2 }
    }
}

/// How [`TileMask::render`] paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    pub flags: PosFlags,
    /// Fill the clip region only; corners stay unpainted.
    pub just_clip: bool,
    /// Paint coordinate shown at the target's top-left.
    pub offset: Point,
    /// Paint the outside of the shape instead of the inside.
    pub inverse: bool,
    /// With `inverse`, also fill this rectangle minus the target.
    pub outer_rect: Option<Rect>,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            flags: PosFlags::FULL,
            just_clip: false,
            offset: Point::ZERO,
            inverse: false,
            outer_rect: None,
        }
    }
}

impl MaskOptions {
    pub fn new(flags: PosFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn just_clip(mut self) -> Self {
        self.just_clip = true;
        self
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn inverse(mut self, outer_rect: Option<Rect>) -> Self {
        self.inverse = true;
        self.outer_rect = outer_rect;
        self
    }
}

/// A nine-slice shape used as a paint stencil.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileMask {
    set: TileSet,
    inverted: SliceGrid,
    inset: Inset,
    has_corners: bool,
}

impl TileMask {
    /// Cut `image` around `inner` and keep its shape.
    ///
    /// The center is never kept. An edge slice is kept only when the inset on
    /// that side reaches into it (left/top inset >= 1, right/bottom <= -1);
    /// otherwise the clip region already covers it. A null `image` yields a
    /// plain rectangular mask.
    pub fn new(image: &Image, inner: Rect, inset: Inset, radius: RadiusHint) -> Self {
        let mut set = TileSet::new(image, inner, radius);
        let mut inverted = set.template().grid().inverted_alpha();

        let mut dropped = vec![SlicePos::Center];
        if inset.dx1 < 1 {
            dropped.push(SlicePos::Left);
        }
        if inset.dx2 > -1 {
            dropped.push(SlicePos::Right);
        }
        if inset.dy1 < 1 {
            dropped.push(SlicePos::Top);
        }
        if inset.dy2 > -1 {
            dropped.push(SlicePos::Bottom);
        }
        for pos in dropped {
            set.template_mut().grid_mut().clear(pos);
            inverted.clear(pos);
        }

        Self {
            set,
            inverted,
            inset,
            has_corners: !image.is_null(),
        }
    }

    /// The underlying tile set (with the dropped slices removed).
    pub fn set(&self) -> &TileSet {
        &self.set
    }

    pub fn inset(&self) -> Inset {
        self.inset
    }

    /// False for a mask built without an image.
    pub fn has_corners(&self) -> bool {
        self.has_corners
    }

    fn grid(&self, inverse: bool) -> &SliceGrid {
        if inverse {
            &self.inverted
        } else {
            self.set.template().grid()
        }
    }

    /// The content rectangle of `rect`: insets applied on the requested sides.
    pub fn bounds(&self, rect: Rect, flags: PosFlags) -> Rect {
        let pick = |flag: PosFlags, v: i32| if flags.contains(flag) { v } else { 0 };
        rect.adjusted(
            pick(PosFlags::LEFT, self.inset.dx1),
            pick(PosFlags::TOP, self.inset.dy1),
            pick(PosFlags::RIGHT, self.inset.dx2),
            pick(PosFlags::BOTTOM, self.inset.dy2),
        )
    }

    /// [`bounds`](Self::bounds) minus the full-size rectangle of every
    /// requested corner.
    pub fn clip_region(&self, rect: Rect, flags: PosFlags) -> Region {
        let mut region = Region::from_rect(self.bounds(rect, flags));
        let corners = [
            (PosFlags::TOP | PosFlags::LEFT, SlicePos::TopLeft),
            (PosFlags::TOP | PosFlags::RIGHT, SlicePos::TopRight),
            (PosFlags::BOTTOM | PosFlags::LEFT, SlicePos::BottomLeft),
            (PosFlags::BOTTOM | PosFlags::RIGHT, SlicePos::BottomRight),
        ];
        for (needed, pos) in corners {
            if !flags.matches(needed) {
                continue;
            }
            let (w, h) = (self.set.width(pos), self.set.height(pos));
            let x = match pos {
                SlicePos::TopRight | SlicePos::BottomRight => rect.right() - w,
                _ => rect.x,
            };
            let y = match pos {
                SlicePos::BottomLeft | SlicePos::BottomRight => rect.bottom() - h,
                _ => rect.y,
            };
            region.subtract(Rect::new(x, y, w, h));
        }
        region
    }

    /// The corner slice named by exactly two flags, e.g. `TOP | LEFT`.
    ///
    /// Returns `None` for a transparent corner or a combination that names
    /// no corner.
    pub fn corner(&self, flags: PosFlags, inverse: bool) -> Option<&Image> {
        let pos = if flags == PosFlags::TOP | PosFlags::LEFT {
            SlicePos::TopLeft
        } else if flags == PosFlags::TOP | PosFlags::RIGHT {
            SlicePos::TopRight
        } else if flags == PosFlags::BOTTOM | PosFlags::RIGHT {
            SlicePos::BottomRight
        } else if flags == PosFlags::BOTTOM | PosFlags::LEFT {
            SlicePos::BottomLeft
        } else {
            log::warn!("requested impossible corner {flags:?}");
            return None;
        };
        self.grid(inverse).get(pos).image()
    }

    /// Paint `fill` into `rect` through the mask.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        rect: Rect,
        fill: &Paint,
        opts: &MaskOptions,
    ) -> Result<()> {
        let anchor = |r: Rect| r.origin().offset(-opts.offset.x, -opts.offset.y);

        if opts.just_clip {
            canvas.push_clip(self.clip_region(rect, opts.flags))?;
            let filled = canvas.fill_rect(rect, fill, anchor(rect));
            canvas.pop_clip()?;
            return filled;
        }

        if !opts.inverse || opts.outer_rect.is_some() {
            let (clip, target) = match opts.outer_rect {
                Some(outer) if opts.inverse => {
                    let mut ring = Region::from_rect(outer);
                    ring.subtract(rect);
                    (ring, outer)
                }
                _ => (self.clip_region(rect, opts.flags), rect),
            };
            canvas.push_clip(clip)?;
            let filled = canvas.fill_rect(target, fill, anchor(target));
            canvas.pop_clip()?;
            filled?;
        }

        if !self.has_corners {
            log::debug!("mask without template, rendered as rectangular clip");
            return Ok(());
        }

        let mut colorize = Colorize {
            canvas,
            fill,
            origin: anchor(rect),
        };
        render_tiles(
            &mut colorize,
            self.grid(opts.inverse),
            rect,
            opts.flags - PosFlags::CENTER,
        )
    }

    /// Outline following the mask's rounded shape. See [`TileSet::outline`].
    pub fn outline<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        rect: Rect,
        color: Color,
        strong: bool,
        flags: PosFlags,
    ) -> Result<()> {
        self.set.outline(canvas, rect, color, strong, flags)
    }
}

/// Backend adapter that turns each alpha slice into colored pixels before
/// passing it on. Paint stays aligned to `origin` across all pieces.
struct Colorize<'a, C: ?Sized> {
    canvas: &'a mut C,
    fill: &'a Paint,
    origin: Point,
}

impl<C: Canvas + ?Sized> Colorize<'_, C> {
    fn draw_shaped(&mut self, shape: &Image, at: Point) -> Result<()> {
        let paint_at = Point::new(at.x - self.origin.x, at.y - self.origin.y);
        let filled = self.fill.render(shape.width(), shape.height(), paint_at);
        let colored = Image::apply_alpha(&filled, shape)?;
        self.canvas.blit(&colored, colored.rect(), at)
    }
}

impl<C: Canvas + ?Sized> TileBackend for Colorize<'_, C> {
    fn blit(&mut self, image: &Image, src: Rect, dst: Point) -> Result<()> {
        let shape = image.crop(src);
        if shape.is_null() {
            return Ok(());
        }
        self.draw_shaped(&shape, dst)
    }

    fn tiled_blit(&mut self, image: &Image, dst: Rect, offset: Point) -> Result<()> {
        if image.is_null() || dst.is_empty() {
            return Ok(());
        }
        let (tw, th) = (image.width() as i32, image.height() as i32);
        let shape = Image::from_fn(dst.w as u32, dst.h as u32, |x, y| {
            image.pixel(
                (x as i32 + offset.x).rem_euclid(tw),
                (y as i32 + offset.y).rem_euclid(th),
            )
        });
        self.draw_shaped(&shape, dst.origin())
    }
}
