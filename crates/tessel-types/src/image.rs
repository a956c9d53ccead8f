//! Owned RGBA8 rasters.
//!
//! `Image` is the unit of pixel data everywhere in tessel: template sources,
//! cut slices, colorized corners and retained pictures.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::color::{Color, mul_div_255};
use crate::error::{Result, TesselError};
use crate::geometry::{Point, Rect, Size};

/// An RGBA8 raster with straight alpha, rows top to bottom.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Bytes in a `width`x`height` RGBA8 buffer.
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Image {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// A zero-sized image. Templates built from it have no slices.
    pub fn null() -> Self {
        Self::default()
    }

    /// Wrap raw RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(TesselError::Image(format!(
                "pixel data size mismatch: expected {expected}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut img = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.put(x, y, f(x, y));
            }
        }
        img
    }

    /// A solid-filled image.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn is_null(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn put(&mut self, x: u32, y: u32, c: Color) {
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    /// Pixel at `(x, y)`, transparent outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Color::TRANSPARENT;
        }
        let o = self.offset(x as u32, y as u32);
        Color::rgba(
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        )
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        self.put(x as u32, y as u32, color);
    }

    pub fn fill(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Copy `src_rect` of `src` to `dst` without blending. Clipped on both sides.
    pub fn copy_from(&mut self, src: &Image, src_rect: Rect, dst: Point) {
        let Some(src_rect) = src_rect.intersect(&src.rect()) else {
            return;
        };
        for row in 0..src_rect.h {
            for col in 0..src_rect.w {
                let c = src.pixel(src_rect.x + col, src_rect.y + row);
                self.set_pixel(dst.x + col, dst.y + row, c);
            }
        }
    }

    /// Cut a sub-rectangle into a new image. Areas outside the source stay transparent.
    pub fn crop(&self, rect: Rect) -> Image {
        if rect.is_empty() {
            return Image::null();
        }
        let mut out = Image::new(rect.w as u32, rect.h as u32);
        out.copy_from(self, rect, Point::new(-rect.x.min(0), -rect.y.min(0)));
        out
    }

    /// Whether every pixel has zero alpha. Null images count as transparent.
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Copy with each alpha replaced by `255 - alpha`.
    pub fn inverted_alpha(&self) -> Image {
        let mut out = self.clone();
        for px in out.data.chunks_exact_mut(4) {
            px[3] = 255 - px[3];
        }
        out
    }

    /// Colorize `mask`'s shape with `fill`: color from `fill`, alpha from
    /// `fill.alpha * mask.alpha`.
    ///
    /// Both images must have the same size.
    pub fn apply_alpha(fill: &Image, mask: &Image) -> Result<Image> {
        if fill.size() != mask.size() {
            return Err(TesselError::Image(format!(
                "apply_alpha size mismatch: fill {}x{}, mask {}x{}",
                fill.width, fill.height, mask.width, mask.height
            )));
        }
        let mut out = fill.clone();
        for (px, m) in out.data.chunks_exact_mut(4).zip(mask.data.chunks_exact(4)) {
            px[3] = mul_div_255(px[3], m[3]);
        }
        Ok(out)
    }

    /// Decode a PNG stream into RGBA8.
    pub fn decode_png(reader: impl Read) -> Result<Image> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());
        log::debug!(
            "decoded {}x{} PNG ({:?})",
            info.width,
            info.height,
            info.color_type
        );

        let data = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(TesselError::Image(
                    "indexed PNG was not expanded by the decoder".into(),
                ));
            }
        };
        Image::from_rgba(info.width, info.height, data)
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self, writer: impl Write) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)?;
        Ok(())
    }

    /// Load a PNG file.
    pub fn load_png(path: &Path) -> Result<Image> {
        let file = File::open(path)?;
        Self::decode_png(BufReader::new(file))
    }

    /// Save as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.encode_png(BufWriter::new(file))
    }
}
