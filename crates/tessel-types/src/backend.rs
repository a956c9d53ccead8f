//! Drawing traits implemented by tessel backends.
//!
//! The tile engine needs only two primitives to lay out a frame: copy part of
//! a slice somewhere, and repeat a slice over a rectangle. Those live in
//! [`TileBackend`], which retained pictures and immediate surfaces both
//! implement. [`Canvas`] adds the immediate-mode operations used by masks,
//! outlines and ornaments.

use crate::color::Color;
use crate::error::Result;
use crate::geometry::{Point, Rect, Region};
use crate::image::Image;
use crate::paint::Paint;

/// Minimal blit interface driven by the nine-slice geometry.
pub trait TileBackend {
    /// Draw `src` (a sub-rectangle of `image`) with its top-left at `dst`, unscaled.
    fn blit(&mut self, image: &Image, src: Rect, dst: Point) -> Result<()>;

    /// Repeat `image` over `dst` at natural size, clipping the last repetition.
    ///
    /// `offset` is the image coordinate shown at `dst`'s top-left corner.
    fn tiled_blit(&mut self, image: &Image, dst: Rect, offset: Point) -> Result<()>;
}

/// An immediate-mode drawing surface.
pub trait Canvas: TileBackend {
    /// Fill `rect` with `paint`; paint-space `(0, 0)` sits at `origin`.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint, origin: Point) -> Result<()>;

    /// Restrict drawing to `region` intersected with the current clip.
    fn push_clip(&mut self, region: Region) -> Result<()>;

    /// Restore the clip active before the matching `push_clip`.
    fn pop_clip(&mut self) -> Result<()>;

    /// One-pixel line between pixel centers, endpoints inclusive.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()>;

    /// One-pixel anti-aliased outline of `rect` with elliptical corners of
    /// radii `rx` by `ry`, stroked along the pixel centers of the outer ring.
    fn stroke_rounded_rect(&mut self, rect: Rect, rx: f32, ry: f32, color: Color) -> Result<()>;

    /// Draw a whole image at `at`.
    fn draw_image(&mut self, image: &Image, at: Point) -> Result<()> {
        self.blit(image, image.rect(), at)
    }
}
