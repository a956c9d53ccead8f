//! Software RGBA surface.
//!
//! Implements `Canvas` by drawing into a `Vec<u8>` RGBA buffer with straight
//! alpha. Every primitive honors the region clip stack and blends with
//! source-over, so drawing onto a transparent surface reproduces the source
//! pixels exactly.

use tessel_types::backend::{Canvas, TileBackend};
use tessel_types::color::Color;
use tessel_types::error::Result;
use tessel_types::geometry::{Point, Rect, Region};
use tessel_types::image::Image;
use tessel_types::paint::Paint;

/// Immediate-mode RGBA raster target.
pub struct RasterSurface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    clip: Option<Region>,
    clip_stack: Vec<Option<Region>>,
}

/// Source-over for straight alpha, rounded to nearest.
fn blend(dst: [u8; 4], src: Color) -> [u8; 4] {
    let sa = src.a as u32;
    if sa == 255 {
        return [src.r, src.g, src.b, 255];
    }
    let da = (dst[3] as u32 * (255 - sa) + 127) / 255;
    let out_a = sa + da;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da + out_a / 2) / out_a) as u8;
    [
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        out_a as u8,
    ]
}

impl RasterSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width as usize * height as usize * 4],
            clip: None,
            clip_stack: Vec::new(),
        }
    }

    /// Read-only view of the RGBA buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Byte offset of an in-bounds pixel.
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`, transparent outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if !self.bounds().contains(x, y) {
            return Color::TRANSPARENT;
        }
        let o = self.offset(x, y);
        Color::rgba(
            self.buffer[o],
            self.buffer[o + 1],
            self.buffer[o + 2],
            self.buffer[o + 3],
        )
    }

    /// Overwrite every pixel, ignoring the clip.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Copy the buffer out as an `Image`.
    pub fn to_image(&self) -> Result<Image> {
        Image::from_rgba(self.width, self.height, self.buffer.clone())
    }

    /// Part of `rect` that can receive pixels under the current clip.
    fn visible(&self, rect: Rect) -> Option<Rect> {
        let area = rect.intersect(&self.bounds())?;
        match &self.clip {
            Some(clip) => area.intersect(&clip.bounding_rect()?),
            None => Some(area),
        }
    }

    /// Blend one pixel. Performs bounds and clip checking.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 || !self.bounds().contains(x, y) {
            return;
        }
        if let Some(clip) = &self.clip
            && !clip.contains(x, y)
        {
            return;
        }
        let o = self.offset(x, y);
        let dst = [
            self.buffer[o],
            self.buffer[o + 1],
            self.buffer[o + 2],
            self.buffer[o + 3],
        ];
        self.buffer[o..o + 4].copy_from_slice(&blend(dst, color));
    }
}

impl TileBackend for RasterSurface {
    fn blit(&mut self, image: &Image, src: Rect, dst: Point) -> Result<()> {
        let Some(src) = src.intersect(&image.rect()) else {
            return Ok(());
        };
        let target = Rect::new(dst.x, dst.y, src.w, src.h);
        let Some(area) = self.visible(target) else {
            return Ok(());
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let c = image.pixel(src.x + x - dst.x, src.y + y - dst.y);
                self.set_pixel(x, y, c);
            }
        }
        Ok(())
    }

    fn tiled_blit(&mut self, image: &Image, dst: Rect, offset: Point) -> Result<()> {
        if image.is_null() {
            return Ok(());
        }
        let Some(area) = self.visible(dst) else {
            return Ok(());
        };
        let (iw, ih) = (image.width() as i32, image.height() as i32);
        for y in area.y..area.bottom() {
            let sy = (y - dst.y + offset.y).rem_euclid(ih);
            for x in area.x..area.right() {
                let sx = (x - dst.x + offset.x).rem_euclid(iw);
                self.set_pixel(x, y, image.pixel(sx, sy));
            }
        }
        Ok(())
    }
}

impl Canvas for RasterSurface {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint, origin: Point) -> Result<()> {
        let Some(area) = self.visible(rect) else {
            return Ok(());
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set_pixel(x, y, paint.sample(x - origin.x, y - origin.y));
            }
        }
        Ok(())
    }

    fn push_clip(&mut self, region: Region) -> Result<()> {
        let next = match &self.clip {
            Some(current) => current.intersect(&region),
            None => region.intersect_rect(self.bounds()),
        };
        self.clip_stack.push(self.clip.replace(next));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<()> {
        match self.clip_stack.pop() {
            Some(previous) => self.clip = previous,
            None => {
                log::warn!("pop_clip without a matching push_clip");
                self.clip = None;
            }
        }
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()> {
        // Bresenham's line algorithm.
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (from.x, from.y);

        loop {
            self.set_pixel(cx, cy, color);
            if cx == to.x && cy == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
        Ok(())
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, rx: f32, ry: f32, color: Color) -> Result<()> {
        let Some(area) = self.visible(rect) else {
            return Ok(());
        };
        // The stroke runs through the centers of the outermost pixel ring.
        let left = rect.x as f32 + 0.5;
        let top = rect.y as f32 + 0.5;
        let right = rect.right() as f32 - 0.5;
        let bottom = rect.bottom() as f32 - 0.5;
        let rx = rx.clamp(0.0, (right - left) / 2.0);
        let ry = ry.clamp(0.0, (bottom - top) / 2.0);

        for y in area.y..area.bottom() {
            let py = y as f32 + 0.5;
            for x in area.x..area.right() {
                let px = x as f32 + 0.5;
                let cx = px.clamp(left + rx, right - rx);
                let cy = py.clamp(top + ry, bottom - ry);
                let dist = if px != cx && py != cy {
                    ellipse_distance(px - cx, py - cy, rx, ry)
                } else {
                    (px - left)
                        .min(right - px)
                        .min(py - top)
                        .min(bottom - py)
                };
                let coverage = (1.0 - dist.abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let a = (color.a as f32 * coverage).round() as u8;
                    self.set_pixel(x, y, color.with_alpha(a));
                }
            }
        }
        Ok(())
    }
}

/// Approximate signed distance from an offset `(dx, dy)` to an axis-aligned
/// ellipse with radii `rx`, `ry` centered at the origin (first-order).
fn ellipse_distance(dx: f32, dy: f32, rx: f32, ry: f32) -> f32 {
    let f = (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) - 1.0;
    let gx = 2.0 * dx / (rx * rx);
    let gy = 2.0 * dy / (ry * ry);
    let g = (gx * gx + gy * gy).sqrt();
    if g <= f32::EPSILON { 0.0 } else { f / g }
}
