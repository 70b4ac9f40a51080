use crate::foundation::error::{CanvasError, CanvasResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a validated, non-empty size.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::validation("frame size must be non-empty"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by this size.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> CanvasResult<Self> {
        if den == 0 {
            return Err(CanvasError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CanvasError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Presentation timestamp (seconds) of the given 0-based frame number.
    pub fn pts_of(self, frame: u64) -> f64 {
        (frame as f64) * self.frame_duration_secs()
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Build a pixel from already premultiplied channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight alpha. Fully transparent pixels become transparent black.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let unpremul = |c: u8| -> u8 {
            let v = (u32::from(c) * 255 + u32::from(self.a) / 2) / u32::from(self.a);
            v.min(255) as u8
        };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }

    /// Channels in memory order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from channels in memory order.
    pub fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Pack into a `u32` whose little-endian bytes are `r, g, b, a`, i.e. `0xAABBGGRR`.
    ///
    /// This matches reading the frame memory as a `u32` array on little-endian hosts, the layout
    /// pixel scripts use for literal masks such as `0xff0000ff`.
    pub fn to_packed(self) -> u32 {
        u32::from_le_bytes(self.to_array())
    }

    /// Inverse of [`Rgba8Premul::to_packed`].
    pub fn from_packed(v: u32) -> Self {
        Self::from_array(v.to_le_bytes())
    }

    /// Keep the channels selected by `mask` and zero the others.
    pub fn masked(self, mask: ChannelMask) -> Self {
        Self {
            r: if mask.r { self.r } else { 0 },
            g: if mask.g { self.g } else { 0 },
            b: if mask.b { self.b } else { 0 },
            a: if mask.a { self.a } else { 0 },
        }
    }
}

/// Per-channel keep/zero selection applied by [`Rgba8Premul::masked`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelMask {
    /// Keep red.
    pub r: bool,
    /// Keep green.
    pub g: bool,
    /// Keep blue.
    pub b: bool,
    /// Keep alpha.
    pub a: bool,
}

impl ChannelMask {
    /// Keep every channel.
    pub const ALL: Self = Self::new(true, true, true, true);
    /// Red and alpha only.
    pub const RED: Self = Self::new(true, false, false, true);
    /// Green and alpha only.
    pub const GREEN: Self = Self::new(false, true, false, true);
    /// Blue and alpha only.
    pub const BLUE: Self = Self::new(false, false, true, true);

    /// Build a mask from explicit channel flags.
    pub const fn new(r: bool, g: bool, b: bool, a: bool) -> Self {
        Self { r, g, b, a }
    }

    /// Interpret a packed `0xAABBGGRR` bit mask. A channel is kept only when its whole byte is set.
    pub fn from_packed(mask: u32) -> Self {
        let [r, g, b, a] = mask.to_le_bytes();
        Self::new(r == 0xff, g == 0xff, b == 0xff, a == 0xff)
    }

    /// Packed `0xAABBGGRR` form of this mask.
    pub fn to_packed(self) -> u32 {
        let byte = |keep: bool| if keep { 0xffu8 } else { 0 };
        u32::from_le_bytes([byte(self.r), byte(self.g), byte(self.b), byte(self.a)])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
