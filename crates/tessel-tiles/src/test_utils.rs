//! Shared test utilities for tessel-tiles tests.
//!
//! Provides a [`MockCanvas`] that records all draw calls for assertion.

use tessel_types::backend::{Canvas, TileBackend};
use tessel_types::color::Color;
use tessel_types::error::Result;
use tessel_types::geometry::{Point, Rect, Region};
use tessel_types::image::Image;
use tessel_types::paint::Paint;

/// A recorded draw call from the mock canvas.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawCall {
    Blit {
        src: Rect,
        dst: Point,
    },
    TiledBlit {
        dst: Rect,
        offset: Point,
    },
    FillRect {
        rect: Rect,
        paint: Paint,
        origin: Point,
    },
    PushClip(Region),
    PopClip,
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        rx: f32,
        ry: f32,
        color: Color,
    },
}

/// A mock canvas that records all draw calls for test assertions.
pub struct MockCanvas {
    pub calls: Vec<DrawCall>,
    /// Images passed to `blit`, in call order.
    pub blitted: Vec<Image>,
}

impl MockCanvas {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            blitted: Vec::new(),
        }
    }

    /// Count of `Blit` calls.
    pub fn blit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Blit { .. }))
            .count()
    }

    /// Count of `TiledBlit` calls.
    pub fn tiled_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::TiledBlit { .. }))
            .count()
    }

    /// Count of `FillRect` calls.
    pub fn fill_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
            .count()
    }

    /// Return the `(from, to)` pairs of all `Line` calls.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.calls
            .iter()
            .filter_map(|c| {
                if let DrawCall::Line { from, to, .. } = c {
                    Some((*from, *to))
                } else {
                    None
                }
            })
            .collect()
    }

    /// The region of the first `PushClip` call, if any.
    pub fn first_clip(&self) -> Option<&Region> {
        self.calls.iter().find_map(|c| {
            if let DrawCall::PushClip(r) = c {
                Some(r)
            } else {
                None
            }
        })
    }
}

impl TileBackend for MockCanvas {
    fn blit(&mut self, image: &Image, src: Rect, dst: Point) -> Result<()> {
        self.calls.push(DrawCall::Blit { src, dst });
        self.blitted.push(image.clone());
        Ok(())
    }

    fn tiled_blit(&mut self, _image: &Image, dst: Rect, offset: Point) -> Result<()> {
        self.calls.push(DrawCall::TiledBlit { dst, offset });
        Ok(())
    }
}

impl Canvas for MockCanvas {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint, origin: Point) -> Result<()> {
        self.calls.push(DrawCall::FillRect {
            rect,
            paint: paint.clone(),
            origin,
        });
        Ok(())
    }

    fn push_clip(&mut self, region: Region) -> Result<()> {
        self.calls.push(DrawCall::PushClip(region));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<()> {
        self.calls.push(DrawCall::PopClip);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Line { from, to, color });
        Ok(())
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, rx: f32, ry: f32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::RoundedRect {
            rect,
            rx,
            ry,
            color,
        });
        Ok(())
    }
}
