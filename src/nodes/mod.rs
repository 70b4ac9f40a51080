//! Built-in frame nodes.
//!
//! Each node is a [`FrameNode`](crate::pipeline::node::FrameNode) configured from plain values
//! (see [`crate::config`]); none of them perform I/O.

/// Bouncing picture-in-picture overlay.
pub mod bounce;
/// Analog clock overlay driven by the frame timestamp.
pub mod clock;
/// Fading title cards.
pub mod credits;
/// Vector house illustration.
pub mod house;
/// Quadrant channel-split filter.
pub mod quadrants;

use crate::canvas::GraphicsContext;
use crate::canvas::text::{TextRenderer, TextRun};
use crate::foundation::error::CanvasResult;
use crate::render::frame::VideoFrame;

/// Optional text collaborator for nodes that draw labels.
///
/// Without a renderer, the runs of the most recent callback are kept for inspection.
#[derive(Default)]
pub struct TextSlot {
    renderer: Option<Box<dyn TextRenderer + Send>>,
    last_runs: Vec<TextRun>,
}

impl TextSlot {
    /// Slot without a renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot forwarding every run to `renderer`.
    pub fn with_renderer(renderer: Box<dyn TextRenderer + Send>) -> Self {
        Self {
            renderer: Some(renderer),
            last_runs: Vec::new(),
        }
    }

    /// Runs queued by the most recent draw when no renderer is attached.
    pub fn last_runs(&self) -> &[TextRun] {
        &self.last_runs
    }

    /// Run `draw` against a fresh context on `frame`.
    pub(crate) fn draw<F>(&mut self, frame: &mut VideoFrame, draw: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut GraphicsContext<'_>) -> CanvasResult<()>,
    {
        let mut ctx = GraphicsContext::new(frame);
        if let Some(renderer) = self.renderer.as_deref_mut() {
            ctx = ctx.with_text_renderer(renderer);
        }
        let result = draw(&mut ctx);
        self.last_runs = ctx.take_text_runs();
        result
    }
}
