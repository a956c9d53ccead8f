//! Cutting a template image into the nine slices of a tiled frame.
//!
//! The template is divided into a 3x3 grid by its *inner* rectangle. Corners
//! keep their size forever; edge and center slices are pre-repeated into
//! small buffers (at least 32 px along the stretchable axis) so tiling them
//! needs fewer blits. Slices whose pixels are all transparent are dropped:
//! they keep their geometry but draw nothing.

use tessel_types::geometry::{Rect, Size};
use tessel_types::image::Image;

/// Minimum length, in pixels, of a pre-repeated edge or center buffer.
const TILE_BUFFER_LEN: i32 = 32;

/// One cell of the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlicePos {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl SlicePos {
    /// All cells in row-major order.
    pub const ALL: [SlicePos; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }
}

/// A cut slice. `image` is `None` when the slice is empty or fully transparent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slice {
    size: Size,
    image: Option<Image>,
}

impl Slice {
    /// Wrap a cut image, dropping its pixels if none are visible.
    pub fn new(image: Image) -> Self {
        let size = image.size();
        let image = (!image.is_fully_transparent()).then_some(image);
        Self { size, image }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.w
    }

    pub fn height(&self) -> i32 {
        self.size.h
    }

    /// Pixels to draw, if any.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn is_absent(&self) -> bool {
        self.image.is_none()
    }

    /// Forget the pixels, keep the geometry.
    pub fn clear(&mut self) {
        self.image = None;
    }

    /// Same slice with alpha inverted. A dropped (transparent) slice becomes
    /// fully opaque.
    pub fn inverted_alpha(&self) -> Self {
        let image = match &self.image {
            Some(img) => img.inverted_alpha(),
            None => Image::new(self.size.w.max(0) as u32, self.size.h.max(0) as u32)
                .inverted_alpha(),
        };
        Self::new(image)
    }
}

/// Thickness of the fixed border bands around the inner rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// The nine slices plus the band thicknesses they were cut with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SliceGrid {
    slices: [Slice; 9],
    borders: Borders,
}

impl SliceGrid {
    pub fn get(&self, pos: SlicePos) -> &Slice {
        &self.slices[pos.index()]
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// Drop the pixels of one slice.
    pub fn clear(&mut self, pos: SlicePos) {
        self.slices[pos.index()].clear();
    }

    /// Grid with every slice alpha-inverted.
    pub fn inverted_alpha(&self) -> Self {
        Self {
            slices: std::array::from_fn(|i| self.slices[i].inverted_alpha()),
            borders: self.borders,
        }
    }

    /// Number of slices with visible pixels.
    pub fn present_count(&self) -> usize {
        self.slices.iter().filter(|s| !s.is_absent()).count()
    }
}

/// Outline roundness hint, in percent of the template size per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadiusHint {
    pub rx: i32,
    pub ry: i32,
}

impl RadiusHint {
    pub const fn new(rx: i32, ry: i32) -> Self {
        Self { rx, ry }
    }
}

/// A template image cut into nine slices. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileTemplate {
    grid: SliceGrid,
    /// Radius hint scaled by the source size.
    radius: (i32, i32),
}

impl TileTemplate {
    /// Cut `source` around `inner`.
    ///
    /// A null source yields a template with no slices. An inner rectangle
    /// reaching outside the source is clamped to it.
    pub fn new(source: &Image, inner: Rect, radius: RadiusHint) -> Self {
        if source.is_null() {
            return Self::default();
        }
        let (sw, sh) = (source.width() as i32, source.height() as i32);
        let x_off = inner.x.clamp(0, sw);
        let y_off = inner.y.clamp(0, sh);
        let width = inner.w.clamp(0, sw - x_off);
        let height = inner.h.clamp(0, sh - y_off);
        let r_off = sw - x_off - width;
        let b_off = sh - y_off - height;

        // Pre-repeated lengths along each stretchable axis.
        let rep_w = repeated_len(width);
        let rep_h = repeated_len(height);
        let (mid_x, right_x) = (x_off, x_off + width);
        let (mid_y, bottom_y) = (y_off, y_off + height);

        // Repeat the `w`x`h` block at (`sx`, `sy`) into a `out_w`x`out_h` buffer.
        let repeat = |sx: i32, sy: i32, w: i32, h: i32, out_w: i32, out_h: i32| {
            if w <= 0 || h <= 0 {
                return Image::null();
            }
            Image::from_fn(out_w as u32, out_h as u32, |x, y| {
                source.pixel(sx + x as i32 % w, sy + y as i32 % h)
            })
        };

        let cells = [
            source.crop(Rect::new(0, 0, x_off, y_off)),
            repeat(mid_x, 0, width, y_off, rep_w, y_off),
            source.crop(Rect::new(right_x, 0, r_off, y_off)),
            repeat(0, mid_y, x_off, height, x_off, rep_h),
            repeat(mid_x, mid_y, width, height, rep_w, rep_h),
            repeat(right_x, mid_y, r_off, height, r_off, rep_h),
            source.crop(Rect::new(0, bottom_y, x_off, b_off)),
            repeat(mid_x, bottom_y, width, b_off, rep_w, b_off),
            source.crop(Rect::new(right_x, bottom_y, r_off, b_off)),
        ];
        let slices = cells.map(Slice::new);

        let dropped: Vec<SlicePos> = SlicePos::ALL
            .into_iter()
            .filter(|p| slices[p.index()].is_absent())
            .collect();
        if !dropped.is_empty() {
            log::debug!("template {sw}x{sh}: no visible pixels in {dropped:?}");
        }

        Self {
            grid: SliceGrid {
                slices,
                borders: Borders {
                    left: x_off,
                    top: y_off,
                    right: r_off,
                    bottom: b_off,
                },
            },
            radius: (sw.saturating_mul(radius.rx), sh.saturating_mul(radius.ry)),
        }
    }

    pub fn grid(&self) -> &SliceGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut SliceGrid {
        &mut self.grid
    }

    pub fn slice(&self, pos: SlicePos) -> &Slice {
        self.grid.get(pos)
    }

    pub fn borders(&self) -> Borders {
        self.grid.borders
    }

    /// Size of a slice as cut, whether or not its pixels were dropped.
    pub fn size(&self, pos: SlicePos) -> Size {
        self.grid.get(pos).size()
    }

    /// Width of a slice as cut (edge and center slices include their repeats).
    pub fn width(&self, pos: SlicePos) -> i32 {
        self.grid.get(pos).width()
    }

    pub fn height(&self, pos: SlicePos) -> i32 {
        self.grid.get(pos).height()
    }

    /// Radius hint multiplied by the source size, used for outlines.
    pub fn scaled_radius(&self) -> (i32, i32) {
        self.radius
    }

    /// Whether no slice has visible pixels.
    pub fn is_null(&self) -> bool {
        self.grid.present_count() == 0
    }
}

/// Smallest multiple of `unit` that is longer than [`TILE_BUFFER_LEN`].
pub(crate) fn repeated_len(unit: i32) -> i32 {
    if unit <= 0 {
        0
    } else {
        (TILE_BUFFER_LEN / unit + 1) * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_types::color::Color;

    /// 12x10 template: 3 px left, 2 px top, 4 px right, 3 px bottom bands.
    fn banded() -> Image {
        Image::from_fn(12, 10, |x, y| Color::rgb(x as u8 * 20, y as u8 * 20, 9))
    }

    #[test]
    fn corners_have_band_sizes() {
        let t = TileTemplate::new(&banded(), Rect::new(3, 2, 5, 5), RadiusHint::default());
        assert_eq!(t.slice(SlicePos::TopLeft).size(), Size::new(3, 2));
        assert_eq!(t.slice(SlicePos::TopRight).size(), Size::new(4, 2));
        assert_eq!(t.slice(SlicePos::BottomLeft).size(), Size::new(3, 3));
        assert_eq!(t.slice(SlicePos::BottomRight).size(), Size::new(4, 3));
        assert_eq!(
            t.borders(),
            Borders {
                left: 3,
                top: 2,
                right: 4,
                bottom: 3
            }
        );
    }

    #[test]
    fn edges_are_pre_repeated() {
        let src = banded();
        let t = TileTemplate::new(&src, Rect::new(3, 2, 5, 5), RadiusHint::default());
        let top = t.slice(SlicePos::Top);
        // 32 / 5 + 1 = 7 repeats.
        assert_eq!(top.size(), Size::new(35, 2));
        let img = top.image().unwrap();
        assert_eq!(img.pixel(0, 1), src.pixel(3, 1));
        assert_eq!(img.pixel(5, 1), src.pixel(3, 1));
        assert_eq!(img.pixel(9, 0), src.pixel(7, 0));
        let center = t.slice(SlicePos::Center);
        assert_eq!(center.size(), Size::new(35, 35));
        assert_eq!(center.image().unwrap().pixel(6, 6), src.pixel(4, 3));
    }

    #[test]
    fn corner_pixels_copied_verbatim() {
        let src = banded();
        let t = TileTemplate::new(&src, Rect::new(3, 2, 5, 5), RadiusHint::default());
        let br = t.slice(SlicePos::BottomRight).image().unwrap();
        assert_eq!(br.pixel(0, 0), src.pixel(8, 7));
        assert_eq!(br.pixel(3, 2), src.pixel(11, 9));
    }

    #[test]
    fn transparent_slices_dropped_but_keep_size() {
        // Only the bottom band is visible.
        let src = Image::from_fn(6, 6, |_, y| {
            if y >= 4 { Color::WHITE } else { Color::TRANSPARENT }
        });
        let t = TileTemplate::new(&src, Rect::new(2, 2, 2, 2), RadiusHint::default());
        assert!(t.slice(SlicePos::TopLeft).is_absent());
        assert!(t.slice(SlicePos::Top).is_absent());
        assert!(t.slice(SlicePos::Center).is_absent());
        assert!(!t.slice(SlicePos::Bottom).is_absent());
        assert_eq!(t.slice(SlicePos::TopLeft).size(), Size::new(2, 2));
        assert_eq!(t.grid().present_count(), 3);
    }

    #[test]
    fn null_source_yields_empty_template() {
        let t = TileTemplate::new(&Image::null(), Rect::new(1, 1, 1, 1), RadiusHint::new(50, 50));
        assert!(t.is_null());
        assert_eq!(t.borders(), Borders::default());
        assert_eq!(t.scaled_radius(), (0, 0));
    }

    #[test]
    fn zero_width_inner_has_no_horizontal_edges() {
        let t = TileTemplate::new(&banded(), Rect::new(6, 2, 0, 5), RadiusHint::default());
        assert!(t.slice(SlicePos::Top).is_absent());
        assert!(t.slice(SlicePos::Center).is_absent());
        assert!(!t.slice(SlicePos::Left).is_absent());
        assert_eq!(t.borders().right, 6);
    }

    #[test]
    fn oversized_inner_is_clamped() {
        let t = TileTemplate::new(&banded(), Rect::new(3, 2, 100, 100), RadiusHint::default());
        assert_eq!(t.borders().right, 0);
        assert_eq!(t.borders().bottom, 0);
    }

    #[test]
    fn radius_scales_with_source() {
        let t = TileTemplate::new(&banded(), Rect::new(3, 2, 5, 5), RadiusHint::new(3, 2));
        assert_eq!(t.scaled_radius(), (36, 20));
    }

    #[test]
    fn huge_radius_hint_saturates() {
        let t = TileTemplate::new(
            &banded(),
            Rect::new(3, 2, 5, 5),
            RadiusHint::new(i32::MAX, i32::MIN),
        );
        assert_eq!(t.scaled_radius(), (i32::MAX, i32::MIN));
    }

    #[test]
    fn inverted_slice_of_dropped_is_opaque() {
        let s = Slice::new(Image::new(2, 3));
        assert!(s.is_absent());
        let inv = s.inverted_alpha();
        assert_eq!(inv.size(), Size::new(2, 3));
        assert_eq!(inv.image().unwrap().pixel(1, 2).a, 255);
    }

    #[test]
    fn inverted_opaque_slice_is_dropped() {
        let s = Slice::new(Image::filled(2, 2, Color::WHITE));
        assert!(s.inverted_alpha().is_absent());
    }
}
