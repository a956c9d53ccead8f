//! RGBA colors and hex parsing.

/// An 8-bit straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque-or-not gray level.
    pub const fn gray(level: u8, a: u8) -> Self {
        Self::rgba(level, level, level, a)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linearly interpolate towards `other` by `num / den`, rounding to nearest.
    pub fn lerp(self, other: Self, num: u32, den: u32) -> Self {
        Self::rgba(
            lerp_u8(self.r, other.r, num, den),
            lerp_u8(self.g, other.g, num, den),
            lerp_u8(self.b, other.b, num, den),
            lerp_u8(self.a, other.a, num, den),
        )
    }
}

/// Linearly interpolate between two u8 values.
fn lerp_u8(a: u8, b: u8, t_num: u32, t_den: u32) -> u8 {
    if t_den == 0 {
        return a;
    }
    let t_num = t_num.min(t_den);
    let a32 = a as u32;
    let b32 = b as u32;
    ((a32 * (t_den - t_num) + b32 * t_num + t_den / 2) / t_den) as u8
}

/// Multiply two 8-bit channel values as fractions of 255, rounding to nearest.
pub fn mul_div_255(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

/// Parse "#RRGGBB" or "#RRGGBBAA" into a `Color`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#')?;
    let channel = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
    match s.len() {
        6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}
