//! Mask rendering on the software surface.

use proptest::prelude::*;

use tessel_raster::RasterSurface;
use tessel_tiles::{Inset, MaskOptions, RadiusHint, TileMask};
use tessel_types::{Color, Image, Paint, PosFlags, Rect};

/// 12x12 anti-aliased disc: the shape of a rounded 4 px corner.
fn disc() -> Image {
    Image::from_fn(12, 12, |x, y| {
        let dx = x as f32 + 0.5 - 6.0;
        let dy = y as f32 + 0.5 - 6.0;
        let cover = (6.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
        Color::WHITE.with_alpha((cover * 255.0).round() as u8)
    })
}

fn mask() -> TileMask {
    TileMask::new(&disc(), Rect::new(4, 4, 4, 4), Inset::default(), RadiusHint::new(50, 50))
}

fn draw(rect: Rect, paint: &Paint, opts: &MaskOptions) -> RasterSurface {
    let mut surface = RasterSurface::new(64, 64);
    mask().render(&mut surface, rect, paint, opts).unwrap();
    surface
}

#[test]
fn shaped_fill_rounds_the_corners() {
    let blue = Paint::Solid(Color::rgb(0, 0, 255));
    let out = draw(Rect::new(2, 2, 30, 20), &blue, &MaskOptions::default());
    // Outermost corner pixel is outside the disc.
    assert_eq!(out.pixel(2, 2).a, 0);
    // Inside the corner slice, on the shape.
    assert_eq!(out.pixel(5, 5), Color::rgb(0, 0, 255));
    // Between the corners the clip fill is solid.
    assert_eq!(out.pixel(16, 2), Color::rgb(0, 0, 255));
    assert_eq!(out.pixel(16, 12), Color::rgb(0, 0, 255));
    // Nothing outside the target.
    assert_eq!(out.pixel(1, 10).a, 0);
    assert_eq!(out.pixel(32, 10).a, 0);
}

#[test]
fn just_clip_leaves_corners_empty() {
    let red = Paint::Solid(Color::rgb(255, 0, 0));
    let out = draw(Rect::new(0, 0, 30, 20), &red, &MaskOptions::default().just_clip());
    assert_eq!(out.pixel(2, 2).a, 0);
    assert_eq!(out.pixel(26, 17).a, 0);
    assert_eq!(out.pixel(4, 0).a, 255);
    assert_eq!(out.pixel(15, 10).a, 255);
}

#[test]
fn pattern_lines_up_across_pieces() {
    let stripes = Image::from_fn(5, 1, |x, _| Color::gray(x as u8 * 40, 255));
    let paint = Paint::pattern(stripes);
    let rect = Rect::new(5, 5, 30, 30);
    let out = draw(rect, &paint, &MaskOptions::default());
    // Corner pixel and clip-fill pixel both sample paint space from the rect origin.
    for x in [8, 10, 12, 20] {
        let expected = paint.sample(x - rect.x, 0);
        assert_eq!(out.pixel(x, 8).r, expected.r, "column {x}");
    }
}

#[test]
fn inverse_with_outer_rect_paints_surroundings() {
    let white = Paint::Solid(Color::WHITE);
    let inner = Rect::new(10, 10, 20, 20);
    let outer = Rect::new(0, 0, 40, 40);
    let out = draw(inner, &white, &MaskOptions::default().inverse(Some(outer)));
    assert_eq!(out.pixel(5, 5).a, 255);
    assert_eq!(out.pixel(35, 20).a, 255);
    // The corner tip outside the rounded shape is painted, the interior is not.
    assert_eq!(out.pixel(10, 10).a, 255);
    assert_eq!(out.pixel(20, 20).a, 0);
    assert_eq!(out.pixel(45, 45).a, 0);
}

#[test]
fn outline_stays_inside_rect() {
    let mut surface = RasterSurface::new(50, 40);
    let rect = Rect::new(5, 5, 30, 20);
    mask()
        .outline(&mut surface, rect, Color::BLACK, true, PosFlags::RING)
        .unwrap();
    for y in 0..40 {
        for x in 0..50 {
            if !rect.contains(x, y) {
                assert_eq!(surface.pixel(x, y).a, 0, "({x}, {y})");
            }
        }
    }
    // Straight runs on every side.
    assert_eq!(surface.pixel(20, 5).a, 255);
    assert_eq!(surface.pixel(5, 15).a, 255);
    assert_eq!(surface.pixel(20, 24).a, 255);
    assert_eq!(surface.pixel(34, 15).a, 255);
}

fn mask_with(inset: Inset) -> TileMask {
    TileMask::new(&disc(), Rect::new(4, 4, 4, 4), inset, RadiusHint::new(50, 50))
}

/// Alpha sum of the normal and inverse renders at every pixel.
fn coverage_sums(m: &TileMask, rect: Rect, flags: PosFlags) -> Vec<(i32, i32, u32)> {
    let paint = Paint::Solid(Color::rgb(0, 120, 0));
    let mut normal = RasterSurface::new(64, 64);
    let mut inverse = RasterSurface::new(64, 64);
    m.render(&mut normal, rect, &paint, &MaskOptions::new(flags)).unwrap();
    m.render(&mut inverse, rect, &paint, &MaskOptions::new(flags).inverse(Some(rect)))
        .unwrap();
    let mut sums = Vec::new();
    for y in 0..64 {
        for x in 0..64 {
            let sum = normal.pixel(x, y).a as u32 + inverse.pixel(x, y).a as u32;
            sums.push((x, y, sum));
        }
    }
    sums
}

#[test]
fn inset_on_omitted_sides_leaves_no_gap() {
    let m = mask_with(Inset::new(1, 1, -1, -1));
    let rect = Rect::new(2, 2, 30, 20);
    for (x, y, sum) in coverage_sums(&m, rect, PosFlags::TOP | PosFlags::LEFT) {
        let expected = if rect.contains(x, y) { 255 } else { 0 };
        assert_eq!(sum, expected, "({x}, {y})");
    }
}

proptest! {
    #[test]
    fn normal_and_inverse_partition_the_rect(
        w in 8i32..60,
        h in 8i32..60,
        bits in 0u8..32,
        sides in (0i32..2, 0i32..2, 0i32..2, 0i32..2),
    ) {
        // Insets either stop at the disc's soft outer ring or cover nothing.
        let inset = Inset::new(sides.0, sides.1, -sides.2, -sides.3);
        let m = mask_with(inset);
        let rect = Rect::new(2, 2, w, h);
        let flags = PosFlags::from_bits_truncate(bits);
        for (x, y, sum) in coverage_sums(&m, rect, flags) {
            let expected = if rect.contains(x, y) { 255 } else { 0 };
            prop_assert_eq!(sum, expected, "({}, {}) flags {:?} inset {:?}", x, y, flags, inset);
        }
    }
}
