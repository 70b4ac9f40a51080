use crate::foundation::core::{FrameSize, Rgba8Premul};
use crate::foundation::error::{CanvasError, CanvasResult};

/// A video frame as premultiplied RGBA8 pixels plus its presentation timestamp.
///
/// This is the pixel surface every drawing call ends up mutating. Pixels are tightly packed,
/// row-major, 4 bytes each in `r, g, b, a` order.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts: f64,
    /// RGBA8 bytes, premultiplied alpha.
    pub data: Vec<u8>,
}

impl VideoFrame {
    /// Allocate a transparent frame.
    pub fn new(width: u32, height: u32, pts: f64) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            pts,
            data: vec![0; len],
        }
    }

    /// Allocate a frame filled with `px`.
    pub fn filled(width: u32, height: u32, pts: f64, px: Rgba8Premul) -> Self {
        let mut frame = Self::new(width, height, pts);
        frame.fill(px);
        frame
    }

    /// Wrap existing premultiplied bytes, validating their length.
    pub fn from_data(width: u32, height: u32, pts: f64, data: Vec<u8>) -> CanvasResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CanvasError::validation("frame buffer size overflow"))?;
        if data.len() != expected {
            return Err(CanvasError::validation(format!(
                "frame data length {} does not match {width}x{height}x4 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pts,
            data,
        })
    }

    /// Frame dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Linear pixel offset of `(x, y)`, or `None` when outside the frame.
    pub fn offset_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        self.offset_of(x, y).and_then(|i| self.pixel_at(i))
    }

    /// Write the pixel at `(x, y)`. Returns `false` when outside the frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8Premul) -> bool {
        match self.offset_of(x, y) {
            Some(i) => self.set_pixel_at(i, px),
            None => false,
        }
    }

    /// Read the pixel at linear offset `i` (row-major).
    pub fn pixel_at(&self, i: usize) -> Option<Rgba8Premul> {
        let px = self.data.get(byte_range(i)?)?;
        Some(Rgba8Premul::new(px[0], px[1], px[2], px[3]))
    }

    /// Write the pixel at linear offset `i`. Returns `false` when outside the frame.
    pub fn set_pixel_at(&mut self, i: usize, px: Rgba8Premul) -> bool {
        match byte_range(i).and_then(|r| self.data.get_mut(r)) {
            Some(dst) => {
                dst.copy_from_slice(&px.to_array());
                true
            }
            None => false,
        }
    }

    /// Overwrite every pixel with `px`.
    pub fn fill(&mut self, px: Rgba8Premul) {
        let bytes = px.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&bytes);
        }
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8Premul> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Rgba8Premul::new(px[0], px[1], px[2], px[3]))
    }

    /// Stable 64-bit content hash over size and pixels (pts excluded).
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = xxhash_rust::xxh3::Xxh3::new();
        hasher.update(&self.width.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&self.data);
        hasher.digest()
    }

    /// Copy out straight-alpha RGBA8 bytes, e.g. for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.pixels() {
            out.extend_from_slice(&px.to_straight_rgba());
        }
        out
    }
}

// Byte span of linear pixel `i`, or `None` when the offset overflows.
pub(crate) fn byte_range(i: usize) -> Option<std::ops::Range<usize>> {
    let start = i.checked_mul(4)?;
    Some(start..start.checked_add(4)?)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
