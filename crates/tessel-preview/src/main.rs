//! tessel-preview: render one themed tile element into a PNG.
//!
//! ```text
//! tessel-preview <theme-dir> <element> <WxH> [flags] [out.png] [--fill #RRGGBB[AA]]
//! ```
//!
//! `element` names a tileset, mask or line from the theme's manifest, or
//! `ornament` for the corner ornament. `flags` is a `|`-separated list such
//! as `top|left`, `ring` or `full` (the default). Masks are filled with
//! `--fill` (default `#4080c0`).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use tessel_raster::RasterSurface;
use tessel_tiles::{MaskOptions, TileTheme};
use tessel_types::color::parse_hex_color;
use tessel_types::{Color, Paint, PosFlags, Rect};

const USAGE: &str =
    "usage: tessel-preview <theme-dir> <element> <WxH> [flags] [out.png] [--fill #RRGGBB[AA]]";

const DEFAULT_FILL: Color = Color::rgb(0x40, 0x80, 0xc0);

#[derive(Debug, PartialEq)]
struct Args {
    theme_dir: PathBuf,
    element: String,
    width: u32,
    height: u32,
    flags: PosFlags,
    out: PathBuf,
    fill: Color,
}

/// `WxH` with both sides fitting in an `i32`.
fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let side = |v: &str| {
        v.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| i32::try_from(n).is_ok())
    };
    Some((side(w)?, side(h)?))
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut fill = DEFAULT_FILL;
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        if arg == "--fill" {
            let value = iter.next().context("--fill needs a color")?;
            fill = parse_hex_color(value).with_context(|| format!("bad color '{value}'"))?;
        } else {
            positional.push(arg.as_str());
        }
    }

    let [theme_dir, element, size, rest @ ..] = positional.as_slice() else {
        bail!("{USAGE}");
    };
    let (width, height) =
        parse_size(size).with_context(|| format!("bad size '{size}', expected WxH"))?;
    let flags = match rest.first() {
        Some(f) => PosFlags::parse(f).with_context(|| format!("bad flags '{f}'"))?,
        None => PosFlags::FULL,
    };
    let out = match rest.get(1) {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("{element}.png")),
    };
    if rest.len() > 2 {
        bail!("unexpected argument '{}'\n{USAGE}", rest[2]);
    }

    Ok(Args {
        theme_dir: PathBuf::from(theme_dir),
        element: element.to_string(),
        width,
        height,
        flags,
        out,
        fill,
    })
}

fn render(theme: &mut TileTheme, args: &Args, surface: &mut RasterSurface) -> Result<&'static str> {
    let rect = Rect::new(0, 0, args.width as i32, args.height as i32);
    let name = args.element.as_str();

    if name == "ornament" {
        theme.render_ornament(surface, rect, args.flags)?;
        return Ok("ornament");
    }
    if let Some(set) = theme.tileset(name) {
        set.render(surface, rect, args.flags)?;
        return Ok("tileset");
    }
    if let Some(mask) = theme.mask(name) {
        let opts = MaskOptions::new(args.flags);
        mask.render(surface, rect, &Paint::Solid(args.fill), &opts)?;
        return Ok("mask");
    }
    if let Some(line) = theme.line(name) {
        line.render(surface, rect, args.flags, false)?;
        return Ok("line");
    }
    bail!("theme '{}' has no element named '{name}'", theme.name())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    let mut theme = TileTheme::load(&args.theme_dir)
        .with_context(|| format!("loading theme from {}", args.theme_dir.display()))?;
    let mut surface = RasterSurface::new(args.width, args.height);
    let kind = render(&mut theme, &args, &mut surface)?;

    surface
        .to_image()?
        .save_png(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!(
        "Rendered {kind} '{}' at {}x{} ({:?}) to {}",
        args.element,
        args.width,
        args.height,
        args.flags,
        args.out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn minimal_args_use_defaults() {
        let a = parse_args(&args(&["themes/slate", "button", "64x32"])).unwrap();
        assert_eq!(a.theme_dir, PathBuf::from("themes/slate"));
        assert_eq!((a.width, a.height), (64, 32));
        assert_eq!(a.flags, PosFlags::FULL);
        assert_eq!(a.out, PathBuf::from("button.png"));
        assert_eq!(a.fill, DEFAULT_FILL);
    }

    #[test]
    fn flags_output_and_fill() {
        let a = parse_args(&args(&[
            "t", "panel", "10X20", "top|left", "out.png", "--fill", "#ff000080",
        ]))
        .unwrap();
        assert_eq!(a.flags, PosFlags::TOP | PosFlags::LEFT);
        assert_eq!(a.out, PathBuf::from("out.png"));
        assert_eq!(a.fill, Color::rgba(255, 0, 0, 128));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["t", "button"])).is_err());
        assert!(parse_args(&args(&["t", "button", "64by32"])).is_err());
        assert!(parse_args(&args(&["t", "button", "8x8", "sideways"])).is_err());
        assert!(parse_args(&args(&["t", "button", "8x8", "--fill"])).is_err());
        assert!(parse_args(&args(&["t", "button", "8x8", "full", "a.png", "extra"])).is_err());
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("3x4"), Some((3, 4)));
        assert_eq!(parse_size("x4"), None);
        assert_eq!(parse_size("-3x4"), None);
        assert_eq!(parse_size("2147483647x1"), Some((2147483647, 1)));
        assert_eq!(parse_size("2147483648x1"), None);
        assert_eq!(parse_size("4x3000000000"), None);
    }
}
