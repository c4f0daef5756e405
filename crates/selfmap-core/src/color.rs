//! Color space helpers: hex parsing and interpolation, HSL→RGB, and the
//! `rgba(...)` strings handed to the renderer.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

static TRAILING_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d.]+\)$").unwrap());

const POSITIVE_LOW: &str = "#a5d6a7";
const POSITIVE_HIGH: &str = "#00e676";
const NEGATIVE_LOW: &str = "#ef9a9a";
const NEGATIVE_HIGH: &str = "#ff1744";
const NEUTRAL: &str = "#9e9e9e";

/// Valence magnitude below which the legacy palette reports neutral gray.
const NEUTRAL_BAND: f64 = 0.02;

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse `rrggbb` or `#rrggbb`. Anything else is rejected rather than
/// decoded into a partial color.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHex(hex.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| FormatError::InvalidHex(hex.to_string()))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Linear per-channel blend from `from` (t = 0) to `to` (t = 1).
/// `t` is clamped to [0, 1] so the result is always a valid color.
pub fn interpolate_hex(from: &str, to: &str, t: f64) -> Result<String> {
    let a = hex_to_rgb(from)?;
    let b = hex_to_rgb(to)?;
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Ok(Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b)).to_hex())
}

/// Convert HSL to RGB.
///
/// `hue` is in degrees (any value, wrapped into [0, 360)); `saturation` and
/// `lightness` are fractions in [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.rem_euclid(360.0);
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let scale = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(scale(r), scale(g), scale(b))
}

/// `rgba(r,g,b,alpha)`. Alpha is written as given; callers clamp it.
pub fn to_rgba(rgb: Rgb, alpha: f64) -> String {
    format!("rgba({},{},{},{alpha})", rgb.r, rgb.g, rgb.b)
}

/// `rgba(...)` from a hex color, alpha rounded to three decimals.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String> {
    let rgb = hex_to_rgb(hex)?;
    Ok(format!("rgba({},{},{},{alpha:.3})", rgb.r, rgb.g, rgb.b))
}

/// Replace the trailing alpha component of an `rgba(...)` string.
/// Strings without a numeric trailing component are returned unchanged.
pub fn with_alpha(rgba: &str, alpha: f64) -> String {
    TRAILING_ALPHA
        .replace(rgba, format!("{alpha})").as_str())
        .into_owned()
}

/// Legacy diverging palette: green for positive valence, red for negative,
/// gray inside the neutral band.
pub fn valence_color(valence: f64) -> Result<String> {
    if valence >= NEUTRAL_BAND {
        return interpolate_hex(POSITIVE_LOW, POSITIVE_HIGH, valence.min(1.0));
    }
    if valence <= -NEUTRAL_BAND {
        return interpolate_hex(NEGATIVE_LOW, NEGATIVE_HIGH, valence.abs().min(1.0));
    }
    Ok(NEUTRAL.to_string())
}
