use crate::foundation::core::{ChannelMask, Rgba8Premul};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::frame::VideoFrame;

/// Channel masks written into the four destination quadrants, in
/// `[top-left, top-right, bottom-left, bottom-right]` order.
pub const QUADRANT_MASKS: [ChannelMask; 4] = [
    ChannelMask::ALL,
    ChannelMask::RED,
    ChannelMask::GREEN,
    ChannelMask::BLUE,
];

/// Apply `mask` to every pixel of `frame`.
pub fn mask_channels(frame: &mut VideoFrame, mask: ChannelMask) {
    for px in frame.data.chunks_exact_mut(4) {
        let out = Rgba8Premul::new(px[0], px[1], px[2], px[3]).masked(mask);
        px.copy_from_slice(&out.to_array());
    }
}

/// Quadrant-swap filter into a freshly allocated frame of the same size and pts.
pub fn quadrant_remap(src: &VideoFrame) -> CanvasResult<VideoFrame> {
    let mut out = VideoFrame::new(src.width, src.height, src.pts);
    quadrant_remap_into(src, &mut out)?;
    Ok(out)
}

/// Downsample `src` into each quadrant of `dst`, masking one channel set per quadrant.
///
/// Each destination quadrant is `dst / 2` in size and samples `src` on a nearest-neighbor grid,
/// so a source the size of `dst` is read at a stride of 2 and a source half the size of `dst`
/// is copied 1:1. Every source pixel is read once per quadrant; `dst` is a separate allocation.
/// An odd trailing row or column of `dst` is left untouched.
pub fn quadrant_remap_into(src: &VideoFrame, dst: &mut VideoFrame) -> CanvasResult<()> {
    let qw = dst.width / 2;
    let qh = dst.height / 2;
    if qw == 0 || qh == 0 {
        return Err(CanvasError::validation(
            "quadrant remap needs a destination of at least 2x2",
        ));
    }
    if src.width == 0 || src.height == 0 {
        return Err(CanvasError::validation("quadrant remap source is empty"));
    }

    let origins = [(0, 0), (qw, 0), (0, qh), (qw, qh)];
    for y in 0..qh {
        let sy = (u64::from(y) * u64::from(src.height) / u64::from(qh)) as u32;
        for x in 0..qw {
            let sx = (u64::from(x) * u64::from(src.width) / u64::from(qw)) as u32;
            let Some(px) = src.pixel(sx, sy) else {
                continue;
            };
            for (&(ox, oy), &mask) in origins.iter().zip(QUADRANT_MASKS.iter()) {
                dst.set_pixel(ox + x, oy + y, px.masked(mask));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/channels.rs"]
mod tests;
