use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::unit_to_u8;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Straight (non-premultiplied) RGBA8 color as assigned to fill and stroke styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Build a color from straight channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with alpha replaced by `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    /// Premultiply, scaling alpha by an extra `0..=1` opacity factor (e.g. global alpha).
    pub fn to_premul(self, opacity: f64) -> Rgba8Premul {
        let a = unit_to_u8(f64::from(self.a) / 255.0 * opacity);
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }

    /// CSS hex form, `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)` or a named color.
    fn from_str(s: &str) -> CanvasResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(CanvasError::validation);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba") {
            return parse_rgb_args(args, true).map_err(CanvasError::validation);
        }
        if let Some(args) = function_args(&lower, "rgb") {
            return parse_rgb_args(args, false).map_err(CanvasError::validation);
        }
        named_color(&lower)
            .ok_or_else(|| CanvasError::validation(format!("unknown color \"{s}\"")))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(name)?.trim_start();
    rest.strip_prefix('(')?.strip_suffix(')')
}

fn parse_rgb_args(args: &str, with_alpha: bool) -> Result<Color, String> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(format!("expected {expected} color components, got {}", parts.len()));
    }

    fn channel(s: &str) -> Result<u8, String> {
        let v: f64 = s
            .parse()
            .map_err(|_| format!("invalid color component \"{s}\""))?;
        Ok(v.clamp(0.0, 255.0).round() as u8)
    }

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if with_alpha {
        let v: f64 = parts[3]
            .parse()
            .map_err(|_| format!("invalid alpha \"{}\"", parts[3]))?;
        unit_to_u8(v)
    } else {
        255
    };
    Ok(Color::rgba(r, g, b, a))
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }
    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        3 => Ok(Color::rgb(
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
        )),
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("navy", 0x000080),
    ("darkblue", 0x00008b),
    ("blue", 0x0000ff),
    ("darkgreen", 0x006400),
    ("green", 0x008000),
    ("teal", 0x008080),
    ("deepskyblue", 0x00bfff),
    ("lime", 0x00ff00),
    ("aqua", 0x00ffff),
    ("cyan", 0x00ffff),
    ("midnightblue", 0x191970),
    ("dodgerblue", 0x1e90ff),
    ("forestgreen", 0x228b22),
    ("seagreen", 0x2e8b57),
    ("darkslategray", 0x2f4f4f),
    ("royalblue", 0x4169e1),
    ("steelblue", 0x4682b4),
    ("indigo", 0x4b0082),
    ("cornflowerblue", 0x6495ed),
    ("rebeccapurple", 0x663399),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("slategray", 0x708090),
    ("maroon", 0x800000),
    ("purple", 0x800080),
    ("olive", 0x808000),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("skyblue", 0x87ceeb),
    ("darkred", 0x8b0000),
    ("saddlebrown", 0x8b4513),
    ("lightgreen", 0x90ee90),
    ("sienna", 0xa0522d),
    ("brown", 0xa52a2a),
    ("darkgray", 0xa9a9a9),
    ("darkgrey", 0xa9a9a9),
    ("lightblue", 0xadd8e6),
    ("firebrick", 0xb22222),
    ("silver", 0xc0c0c0),
    ("chocolate", 0xd2691e),
    ("tan", 0xd2b48c),
    ("lightgray", 0xd3d3d3),
    ("lightgrey", 0xd3d3d3),
    ("goldenrod", 0xdaa520),
    ("crimson", 0xdc143c),
    ("lavender", 0xe6e6fa),
    ("violet", 0xee82ee),
    ("khaki", 0xf0e68c),
    ("beige", 0xf5f5dc),
    ("salmon", 0xfa8072),
    ("red", 0xff0000),
    ("fuchsia", 0xff00ff),
    ("magenta", 0xff00ff),
    ("deeppink", 0xff1493),
    ("orangered", 0xff4500),
    ("tomato", 0xff6347),
    ("hotpink", 0xff69b4),
    ("coral", 0xff7f50),
    ("darkorange", 0xff8c00),
    ("orange", 0xffa500),
    ("pink", 0xffc0cb),
    ("gold", 0xffd700),
    ("yellow", 0xffff00),
    ("ivory", 0xfffff0),
    ("white", 0xffffff),
];

fn named_color(name: &str) -> Option<Color> {
    if name == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, rgb)| Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
