//! CSS color strings for the divider and handle.

use once_cell::sync::Lazy;
use palette::{FromColor, Hsl, Srgb};
use regex::Regex;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses a CSS color: a named color, `#rgb`, `#rgba`, `#rrggbb`,
    /// `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()` or `hsla()`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(color) = parse_functional(value) {
            return Some(color);
        }
        if let Some(color) = parse_hsl(value) {
            return Some(color);
        }
        named(&value.to_ascii_lowercase())
    }
}

static FUNCTIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)(%?)\s*)?\)$",
    )
    .expect("valid color regex")
});

fn parse_functional(value: &str) -> Option<Rgba> {
    let captures = FUNCTIONAL.captures(value)?;
    let channel = |i: usize| -> Option<u8> { captures.get(i)?.as_str().parse::<u8>().ok() };
    Some(Rgba {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
        a: alpha(&captures, 4)?,
    })
}

static HSL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)hsla?\(\s*(-?[0-9]*\.?[0-9]+)(?:deg)?\s*,\s*([0-9]*\.?[0-9]+)%\s*,\s*([0-9]*\.?[0-9]+)%\s*(?:,\s*([0-9]*\.?[0-9]+)(%?)\s*)?\)$",
    )
    .expect("valid color regex")
});

fn parse_hsl(value: &str) -> Option<Rgba> {
    let captures = HSL.captures(value)?;
    let number = |i: usize| -> Option<f32> { captures.get(i)?.as_str().parse().ok() };
    let hue = number(1)?.rem_euclid(360.0);
    let saturation = (number(2)? / 100.0).clamp(0.0, 1.0);
    let lightness = (number(3)? / 100.0).clamp(0.0, 1.0);

    let hsl: Hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb<f32> = Srgb::from_color(hsl);
    let rgb: Srgb<u8> = rgb.into_format();
    Some(Rgba {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
        a: alpha(&captures, 4)?,
    })
}

/// Optional alpha at capture `index`, a fraction or a percentage (`index + 1`).
fn alpha(captures: &regex::Captures<'_>, index: usize) -> Option<u8> {
    let Some(alpha) = captures.get(index) else {
        return Some(255);
    };
    let mut alpha: f64 = alpha.as_str().parse().ok()?;
    if captures.get(index + 1).is_some_and(|p| p.as_str() == "%") {
        alpha /= 100.0;
    }
    Some((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba {
            r: nibble(0)?,
            g: nibble(1)?,
            b: nibble(2)?,
            a: nibble(3)?,
        }),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: byte(6)?,
        }),
        _ => None,
    }
}

/// The full CSS named color table, plus `transparent`.
fn named(name: &str) -> Option<Rgba> {
    if name == "transparent" {
        return Some(Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        });
    }
    let color = palette::named::from_str(name)?;
    Some(Rgba::opaque(color.red, color.green, color.blue))
}
