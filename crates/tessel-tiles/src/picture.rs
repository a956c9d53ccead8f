//! Retained rendering: tile a frame once into an owned image, draw it often.
//!
//! [`PictureBuilder`] is the second [`TileBackend`] the nine-slice geometry
//! runs on. Unlike a canvas it never blends: every blit replaces the
//! destination pixels, so the finished [`Picture`] holds exactly the tiled
//! result on a transparent background.

use std::rc::Rc;

use tessel_types::backend::{Canvas, TileBackend};
use tessel_types::error::Result;
use tessel_types::geometry::{Point, Rect, Size};
use tessel_types::image::Image;

/// A finished, immutable rendering. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    image: Rc<Image>,
}

impl Picture {
    pub fn size(&self) -> Size {
        self.image.size()
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Shared handle to the pixels.
    pub fn shared(&self) -> Rc<Image> {
        Rc::clone(&self.image)
    }

    /// Composite the picture onto `canvas` with its top-left at `at`.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, at: Point) -> Result<()> {
        canvas.draw_image(&self.image, at)
    }
}

/// Source-copy compositor producing a [`Picture`].
#[derive(Debug)]
pub struct PictureBuilder {
    image: Image,
}

impl PictureBuilder {
    /// A transparent picture of `size`. Negative extents become zero.
    pub fn new(size: Size) -> Self {
        Self {
            image: Image::new(size.w.max(0) as u32, size.h.max(0) as u32),
        }
    }

    pub fn finish(self) -> Picture {
        Picture {
            image: Rc::new(self.image),
        }
    }
}

impl TileBackend for PictureBuilder {
    fn blit(&mut self, image: &Image, src: Rect, dst: Point) -> Result<()> {
        self.image.copy_from(image, src, dst);
        Ok(())
    }

    fn tiled_blit(&mut self, image: &Image, dst: Rect, offset: Point) -> Result<()> {
        if image.is_null() || dst.is_empty() {
            return Ok(());
        }
        let (tw, th) = (image.width() as i32, image.height() as i32);
        let mut ty = dst.y - offset.y.rem_euclid(th);
        while ty < dst.bottom() {
            let mut tx = dst.x - offset.x.rem_euclid(tw);
            while tx < dst.right() {
                if let Some(visible) = Rect::new(tx, ty, tw, th).intersect(&dst) {
                    let src = visible.translated(-tx, -ty);
                    self.image.copy_from(image, src, visible.origin());
                }
                tx += tw;
            }
            ty += th;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_types::color::Color;

    #[test]
    fn blit_replaces_pixels() {
        let mut b = PictureBuilder::new(Size::new(4, 4));
        b.blit(&Image::filled(2, 2, Color::WHITE), Rect::new(0, 0, 2, 2), Point::new(1, 1))
            .unwrap();
        // A translucent blit over white does not blend.
        let half = Color::rgba(0, 0, 0, 100);
        b.blit(&Image::filled(1, 1, half), Rect::new(0, 0, 1, 1), Point::new(1, 1))
            .unwrap();
        let pic = b.finish();
        assert_eq!(pic.image().pixel(1, 1), half);
        assert_eq!(pic.image().pixel(2, 2), Color::WHITE);
        assert_eq!(pic.image().pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn tiled_blit_repeats_with_phase() {
        let tile = Image::from_fn(3, 1, |x, _| Color::gray(x as u8 * 50, 255));
        let mut b = PictureBuilder::new(Size::new(8, 2));
        b.tiled_blit(&tile, Rect::new(1, 0, 6, 2), Point::new(1, 0)).unwrap();
        let pic = b.finish();
        let row: Vec<u8> = (0..8).map(|x| pic.image().pixel(x, 1).r).collect();
        assert_eq!(row, vec![0, 50, 100, 0, 50, 100, 0, 0]);
        assert_eq!(pic.image().pixel(0, 0).a, 0);
        assert_eq!(pic.image().pixel(7, 0).a, 0);
    }

    #[test]
    fn negative_size_is_empty() {
        let pic = PictureBuilder::new(Size::new(-3, 5)).finish();
        assert_eq!(pic.size(), Size::new(0, 5));
    }
}
