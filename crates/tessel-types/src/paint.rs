//! Paint sources: what a fill puts into the pixels it covers.
//!
//! Paints are sampled in *paint space*. Canvases take an `origin` alongside
//! the paint so the same pattern or gradient can line up across several
//! separately drawn pieces.

use std::rc::Rc;

use crate::color::Color;
use crate::geometry::Point;
use crate::image::Image;

/// A two-stop linear gradient between `start` and `end`.
///
/// Points before `start` take `from`, points past `end` take `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn new(start: (f32, f32), end: (f32, f32), from: Color, to: Color) -> Self {
        Self {
            start,
            end,
            from,
            to,
        }
    }

    /// Color at the center of pixel `(x, y)`.
    pub fn sample(&self, x: i32, y: i32) -> Color {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let len2 = dx * dx + dy * dy;
        if len2 <= f32::EPSILON {
            return self.from;
        }
        let px = x as f32 + 0.5 - self.start.0;
        let py = y as f32 + 0.5 - self.start.1;
        let t = ((px * dx + py * dy) / len2).clamp(0.0, 1.0);
        self.from.lerp(self.to, (t * 1024.0).round() as u32, 1024)
    }
}

/// Something that can fill a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// A repeating image, anchored at the paint-space origin.
    Pattern(Rc<Image>),
    Linear(LinearGradient),
}

impl Paint {
    pub fn pattern(image: Image) -> Self {
        Self::Pattern(Rc::new(image))
    }

    /// The single color of a solid paint.
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Self::Solid(c) => Some(*c),
            _ => None,
        }
    }

    /// Color at paint-space pixel `(x, y)`.
    pub fn sample(&self, x: i32, y: i32) -> Color {
        match self {
            Self::Solid(c) => *c,
            Self::Pattern(img) => {
                if img.is_null() {
                    return Color::TRANSPARENT;
                }
                let w = img.width() as i32;
                let h = img.height() as i32;
                img.pixel(x.rem_euclid(w), y.rem_euclid(h))
            }
            Self::Linear(g) => g.sample(x, y),
        }
    }

    /// Fill a `width`x`height` buffer with this paint; buffer pixel `(0, 0)`
    /// samples paint-space `at`.
    pub fn render(&self, width: u32, height: u32, at: Point) -> Image {
        Image::from_fn(width, height, |x, y| {
            self.sample(at.x + x as i32, at.y + y as i32)
        })
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}
