use crate::effects::channels::quadrant_remap;
use crate::foundation::error::CanvasResult;
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// Replaces each frame with a 2×2 grid of half-size copies: raw, red, green and blue.
#[derive(Debug, Default)]
pub struct QuadrantsNode;

impl FrameNode for QuadrantsNode {
    fn pads(&self) -> PadLayout {
        PadLayout::new(1)
    }

    fn receive(
        &mut self,
        frame: VideoFrame,
        _pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        let out = quadrant_remap(&frame)?;
        cx.send(out);
        Ok(())
    }
}
