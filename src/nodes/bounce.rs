use serde::{Deserialize, Serialize};

use crate::canvas::GraphicsContext;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// Pad carrying the picture to bounce.
pub const OVERLAY_PAD: usize = 1;

/// Bouncing overlay settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BounceConfig {
    /// Overlay width on the output frame.
    pub width: f64,
    /// Overlay height on the output frame.
    pub height: f64,
    /// Pixels moved along each axis per primary frame.
    pub speed: f64,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
            speed: 5.0,
        }
    }
}

/// Draws the latest pad-1 frame onto every pad-0 frame, moving diagonally and
/// reflecting off the frame edges.
pub struct BounceNode {
    cfg: BounceConfig,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

impl BounceNode {
    /// Start at the top-left corner heading down-right.
    pub fn new(cfg: BounceConfig) -> CanvasResult<Self> {
        let sizes_ok = cfg.width.is_finite()
            && cfg.height.is_finite()
            && cfg.width > 0.0
            && cfg.height > 0.0;
        if !sizes_ok {
            return Err(CanvasError::validation("bounce overlay size must be > 0"));
        }
        if !(cfg.speed.is_finite() && cfg.speed >= 0.0) {
            return Err(CanvasError::validation("bounce speed must be >= 0"));
        }
        Ok(Self {
            cfg,
            x: 0.0,
            y: 0.0,
            dx: 1.0,
            dy: 1.0,
        })
    }

    /// Top-left corner used for the most recent primary frame.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn step(&mut self, frame_w: f64, frame_h: f64) {
        let speed = self.cfg.speed;
        self.x += self.dx * speed;
        self.y += self.dy * speed;
        (self.x, self.dx) = reflect(self.x, self.dx, frame_w - self.cfg.width);
        (self.y, self.dy) = reflect(self.y, self.dy, frame_h - self.cfg.height);
    }
}

// Clamp `pos` into `[0, max]`, turning around at whichever edge was crossed.
fn reflect(pos: f64, dir: f64, max: f64) -> (f64, f64) {
    let (mut pos, mut dir) = (pos, dir);
    if pos < 0.0 {
        pos = 0.0;
        dir = 1.0;
    }
    if pos > max {
        pos = max;
        dir = -1.0;
    }
    (pos, dir)
}

impl FrameNode for BounceNode {
    fn pads(&self) -> PadLayout {
        PadLayout::new(2).latched(OVERLAY_PAD)
    }

    fn receive(
        &mut self,
        mut frame: VideoFrame,
        pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        if pad == OVERLAY_PAD {
            return cx.latch(frame);
        }

        self.step(f64::from(frame.width), f64::from(frame.height));
        if let Some(overlay) = cx.latched(OVERLAY_PAD) {
            let mut ctx = GraphicsContext::new(&mut frame);
            ctx.draw_image(overlay, self.x, self.y, self.cfg.width, self.cfg.height);
        } else {
            tracing::debug!(pts = frame.pts, "no overlay latched yet");
        }
        cx.send(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nodes/bounce.rs"]
mod tests;
