//! A fixed corner ornament: four small arc glyphs joined by gradient rules.
//!
//! Unlike a [`TileSet`](crate::TileSet) nothing here comes from an asset.
//! The glyphs and the two pairs of connector end pieces are generated once;
//! connectors too short for the end pieces get a custom strip, built on first
//! use and kept in a caller-owned [`StripCache`].

use std::collections::HashMap;
use std::rc::Rc;

use tessel_types::backend::Canvas;
use tessel_types::color::Color;
use tessel_types::error::Result;
use tessel_types::flags::PosFlags;
use tessel_types::geometry::{Point, Rect};
use tessel_types::image::Image;
use tessel_types::paint::LinearGradient;

use crate::template::SlicePos;

/// Edge length of a corner glyph.
const GLYPH: i32 = 4;
/// Radius of the arc each glyph is a quarter of.
const ARC_RADIUS: f32 = 4.0;
/// Length of a bottom connector end piece.
const BOTTOM_PIECE: i32 = 37;
/// Length of a right connector end piece.
const RIGHT_PIECE: i32 = 31;

/// Which side a connector runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorEdge {
    Bottom,
    Right,
}

/// Connector strips built for exact lengths, one map per edge.
#[derive(Debug, Default)]
pub struct StripCache {
    bottom: HashMap<i32, Rc<Image>>,
    right: HashMap<i32, Rc<Image>>,
}

impl StripCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached strips over both edges.
    pub fn len(&self) -> usize {
        self.bottom.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached strip.
    pub fn reset(&mut self) {
        self.bottom.clear();
        self.right.clear();
    }

    fn map(&mut self, edge: ConnectorEdge) -> &mut HashMap<i32, Rc<Image>> {
        match edge {
            ConnectorEdge::Bottom => &mut self.bottom,
            ConnectorEdge::Right => &mut self.right,
        }
    }
}

/// Corner glyphs plus connector end pieces, all at one opacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerOrnament {
    alpha: u8,
    /// Top-left, top-right, bottom-right, bottom-left.
    glyphs: [Image; 4],
    bottom: [Image; 2],
    right: [Image; 2],
}

impl CornerOrnament {
    pub fn new(alpha: u8) -> Self {
        let gray = |level: u8| Color::gray(level, alpha);
        let white = Color::WHITE.with_alpha(alpha);
        let diag = |from: u8, to: u8| LinearGradient::new((0.0, 0.0), (4.0, 4.0), gray(from), gray(to));

        let glyphs = [
            arc_glyph((4.0, 4.0), |_, _| white),
            arc_glyph((0.0, 4.0), |x, y| diag(255, 170).sample(x, y)),
            arc_glyph((0.0, 0.0), |x, y| {
                LinearGradient::new((4.0, 0.0), (0.0, 4.0), gray(107), gray(100)).sample(x, y)
            }),
            arc_glyph((4.0, 0.0), |x, y| diag(255, 175).sample(x, y)),
        ];
        let bottom = [
            strip(ConnectorEdge::Bottom, BOTTOM_PIECE, gray(175), gray(138)),
            strip(ConnectorEdge::Bottom, BOTTOM_PIECE, gray(136), gray(100)),
        ];
        let right = [
            strip(ConnectorEdge::Right, RIGHT_PIECE, gray(170), gray(139)),
            strip(ConnectorEdge::Right, RIGHT_PIECE, gray(137), gray(107)),
        ];
        Self {
            alpha,
            glyphs,
            bottom,
            right,
        }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// The glyph drawn at a corner; `None` for non-corner positions.
    pub fn glyph(&self, pos: SlicePos) -> Option<&Image> {
        let i = match pos {
            SlicePos::TopLeft => 0,
            SlicePos::TopRight => 1,
            SlicePos::BottomRight => 2,
            SlicePos::BottomLeft => 3,
            _ => return None,
        };
        Some(&self.glyphs[i])
    }

    /// A single gradient strip of exactly `len` pixels for `edge`, from the
    /// cache or freshly built and inserted.
    pub fn connector(&self, cache: &mut StripCache, edge: ConnectorEdge, len: i32) -> Rc<Image> {
        let alpha = self.alpha;
        let map = cache.map(edge);
        if let Some(hit) = map.get(&len) {
            return Rc::clone(hit);
        }
        let (from, to) = match edge {
            ConnectorEdge::Bottom => (175, 100),
            ConnectorEdge::Right => (170, 107),
        };
        let built = Rc::new(strip(
            edge,
            len,
            Color::gray(from, alpha),
            Color::gray(to, alpha),
        ));
        map.insert(len, Rc::clone(&built));
        log::trace!("cached {edge:?} connector of length {len} ({} total)", map.len());
        built
    }

    /// Draw the glyphs of the corners requested by `flags` and the
    /// connectors between corners that share a side.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        rect: Rect,
        flags: PosFlags,
        cache: &mut StripCache,
    ) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let (left_x, right_x) = (rect.x, rect.right() - GLYPH);
        let (top_y, bottom_y) = (rect.y, rect.bottom() - GLYPH);
        let mut left_end = None;
        let mut right_start = None;
        let mut top_end = None;
        let mut bottom_start = None;

        if flags.matches(PosFlags::TOP | PosFlags::LEFT) {
            canvas.draw_image(&self.glyphs[0], Point::new(left_x, top_y))?;
            left_end = Some(left_x + GLYPH);
            top_end = Some(top_y + GLYPH);
        }
        if flags.matches(PosFlags::TOP | PosFlags::RIGHT) {
            canvas.draw_image(&self.glyphs[1], Point::new(right_x, top_y))?;
            right_start = Some(right_x);
            top_end = Some(top_y + GLYPH);
        }
        if flags.matches(PosFlags::BOTTOM | PosFlags::LEFT) {
            canvas.draw_image(&self.glyphs[3], Point::new(left_x, bottom_y))?;
            left_end = Some(left_x + GLYPH);
            bottom_start = Some(bottom_y);
        }
        if flags.matches(PosFlags::BOTTOM | PosFlags::RIGHT) {
            canvas.draw_image(&self.glyphs[2], Point::new(right_x, bottom_y))?;
            right_start = Some(right_x);
            bottom_start = Some(bottom_y);
        }

        let white = Color::WHITE.with_alpha(self.alpha);
        let (last_x, last_y) = (rect.right() - 1, rect.bottom() - 1);

        if let (Some(x0), Some(x1)) = (left_end, right_start)
            && x0 < x1
        {
            if flags.contains(PosFlags::TOP) {
                canvas.draw_line(Point::new(x0, rect.y), Point::new(x1 - 1, rect.y), white)?;
            }
            if flags.contains(PosFlags::BOTTOM) {
                let w = x1 - x0;
                if w < 2 * BOTTOM_PIECE {
                    let line = self.connector(cache, ConnectorEdge::Bottom, w);
                    canvas.draw_image(&line, Point::new(x0, last_y))?;
                } else {
                    canvas.draw_image(&self.bottom[0], Point::new(x0, last_y))?;
                    canvas.draw_image(&self.bottom[1], Point::new(x1 - BOTTOM_PIECE, last_y))?;
                    if w > 2 * BOTTOM_PIECE {
                        canvas.draw_line(
                            Point::new(x0 + BOTTOM_PIECE, last_y),
                            Point::new(x1 - BOTTOM_PIECE - 1, last_y),
                            Color::gray(137, self.alpha),
                        )?;
                    }
                }
            }
        }

        if let (Some(y0), Some(y1)) = (top_end, bottom_start)
            && y0 < y1
        {
            if flags.contains(PosFlags::LEFT) {
                canvas.draw_line(Point::new(rect.x, y0), Point::new(rect.x, y1 - 1), white)?;
            }
            if flags.contains(PosFlags::RIGHT) {
                let h = y1 - y0;
                if h < 2 * RIGHT_PIECE {
                    let line = self.connector(cache, ConnectorEdge::Right, h);
                    canvas.draw_image(&line, Point::new(last_x, y0))?;
                } else {
                    canvas.draw_image(&self.right[0], Point::new(last_x, y0))?;
                    canvas.draw_image(&self.right[1], Point::new(last_x, y1 - RIGHT_PIECE))?;
                    if h > 2 * RIGHT_PIECE {
                        canvas.draw_line(
                            Point::new(last_x, y0 + RIGHT_PIECE),
                            Point::new(last_x, y1 - RIGHT_PIECE - 1),
                            Color::gray(138, self.alpha),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for CornerOrnament {
    fn default() -> Self {
        Self::new(255)
    }
}

/// A quarter of a one-pixel anti-aliased circle around `center`, colored by
/// `color(x, y)` and faded by stroke coverage.
fn arc_glyph(center: (f32, f32), color: impl Fn(i32, i32) -> Color) -> Image {
    Image::from_fn(GLYPH as u32, GLYPH as u32, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let dx = x as f32 + 0.5 - center.0;
        let dy = y as f32 + 0.5 - center.1;
        let coverage = (1.0 - ((dx * dx + dy * dy).sqrt() - ARC_RADIUS).abs()).clamp(0.0, 1.0);
        let c = color(x, y);
        c.with_alpha((c.a as f32 * coverage).round() as u8)
    })
}

/// A one-pixel gradient strip of `len` pixels along `edge`.
fn strip(edge: ConnectorEdge, len: i32, from: Color, to: Color) -> Image {
    let len = len.max(0);
    match edge {
        ConnectorEdge::Bottom => {
            let g = LinearGradient::new((0.0, 0.5), (len as f32, 0.5), from, to);
            Image::from_fn(len as u32, 1, |x, y| g.sample(x as i32, y as i32))
        }
        ConnectorEdge::Right => {
            let g = LinearGradient::new((0.5, 0.0), (0.5, len as f32), from, to);
            Image::from_fn(1, len as u32, |x, y| g.sample(x as i32, y as i32))
        }
    }
}
