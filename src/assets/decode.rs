use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::CanvasResult;
use crate::render::frame::VideoFrame;

/// Decode an encoded image (PNG) into a premultiplied frame stamped with `pts`.
pub fn decode_frame(bytes: &[u8], pts: f64) -> CanvasResult<VideoFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    VideoFrame::from_data(width, height, pts, data)
}

/// Read and decode the image file at `path`.
pub fn load_frame_png(path: &Path, pts: f64) -> CanvasResult<VideoFrame> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let frame = decode_frame(&bytes, pts)?;
    tracing::debug!(
        path = %path.display(),
        width = frame.width,
        height = frame.height,
        "loaded frame"
    );
    Ok(frame)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let p = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
        px.copy_from_slice(&p.to_array());
    }
}
