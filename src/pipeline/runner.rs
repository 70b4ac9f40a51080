use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// Lifecycle of a [`NodeRunner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    /// Node attached, pads not yet queried.
    Uninitialized,
    /// Pad layout queried and validated.
    PadsDeclared,
    /// Accepting frames.
    Ready,
}

/// Counters for a stream of pushed frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to `push_frame`.
    pub frames_in: u64,
    /// Frames the node sent downstream.
    pub frames_out: u64,
    /// Frames rejected before reaching the node (bad pad index).
    pub frames_rejected: u64,
    /// Callbacks that returned an error.
    pub callbacks_failed: u64,
}

/// Host-side driver for one [`FrameNode`].
///
/// The runner owns the latched pad state; each `push_frame` runs exactly one callback.
pub struct NodeRunner<N: FrameNode> {
    node: N,
    layout: PadLayout,
    latched: Vec<Option<VideoFrame>>,
    state: RunnerState,
    stats: RunStats,
}

impl<N: FrameNode> NodeRunner<N> {
    /// Attach `node`, query and validate its pads, and make it ready.
    #[tracing::instrument(skip(node))]
    pub fn new(node: N) -> CanvasResult<Self> {
        let mut runner = Self::attach(node);
        runner.declare_pads()?;
        runner.start()?;
        Ok(runner)
    }

    /// Attach `node` without querying its pads.
    pub fn attach(node: N) -> Self {
        Self {
            node,
            layout: PadLayout::new(0),
            latched: Vec::new(),
            state: RunnerState::Uninitialized,
            stats: RunStats::default(),
        }
    }

    /// Query the node's pad layout once and validate it.
    pub fn declare_pads(&mut self) -> CanvasResult<()> {
        if self.state != RunnerState::Uninitialized {
            return Err(CanvasError::validation("pads were already declared"));
        }
        let layout = self.node.pads();
        layout.validate()?;
        self.latched = vec![None; layout.count()];
        self.layout = layout;
        self.advance(RunnerState::PadsDeclared);
        Ok(())
    }

    /// Start accepting frames.
    pub fn start(&mut self) -> CanvasResult<()> {
        if self.state != RunnerState::PadsDeclared {
            return Err(CanvasError::validation(format!(
                "cannot start a runner in state {:?}",
                self.state
            )));
        }
        self.advance(RunnerState::Ready);
        Ok(())
    }

    fn advance(&mut self, to: RunnerState) {
        tracing::debug!(from = ?self.state, ?to, "runner state");
        self.state = to;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Pad layout declared by the node.
    pub fn layout(&self) -> &PadLayout {
        &self.layout
    }

    /// Counters accumulated since creation.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The driven node.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Mutable access to the driven node.
    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    /// Frame currently latched on `pad`.
    pub fn latched(&self, pad: usize) -> Option<&VideoFrame> {
        self.latched.get(pad).and_then(Option::as_ref)
    }

    /// Detach and return the node.
    pub fn into_inner(self) -> N {
        self.node
    }

    /// Deliver `frame` on `pad` and return the frames the node sent, in emission order.
    ///
    /// Fails with a validation error before [`NodeRunner::start`]. An undeclared pad fails with
    /// [`CanvasError::OutOfRangePad`] and the frame is dropped. A failing callback emits nothing
    /// for this invocation; the node keeps running.
    #[tracing::instrument(skip(self, frame), fields(pts = frame.pts))]
    pub fn push_frame(&mut self, frame: VideoFrame, pad: usize) -> CanvasResult<Vec<VideoFrame>> {
        if self.state != RunnerState::Ready {
            return Err(CanvasError::validation(format!(
                "runner is {:?}, not accepting frames",
                self.state
            )));
        }
        self.stats.frames_in += 1;
        let declared = self.layout.count();
        if pad >= declared {
            self.stats.frames_rejected += 1;
            tracing::debug!(pad, declared, "dropping frame on undeclared pad");
            return Err(CanvasError::OutOfRangePad { pad, declared });
        }

        let mut out = Vec::new();
        let mut cx = PadContext::new(pad, &self.layout, &mut self.latched, &mut out);
        if let Err(e) = self.node.receive(frame, pad, &mut cx) {
            self.stats.callbacks_failed += 1;
            tracing::warn!(error = %e, pad, dropped = out.len(), "node callback failed");
            return Err(e);
        }
        self.stats.frames_out += out.len() as u64;
        Ok(out)
    }

    /// Feed `(pad, frame)` inputs through the node into `sink`.
    ///
    /// Per-frame errors (bad pads, failing callbacks) are logged and skipped; sink errors abort.
    pub fn run_into<I>(
        &mut self,
        inputs: I,
        sink: &mut dyn FrameSink,
        cfg: SinkConfig,
    ) -> CanvasResult<RunStats>
    where
        I: IntoIterator<Item = (usize, VideoFrame)>,
    {
        let before = self.stats;
        sink.begin(cfg)?;
        let mut idx = 0u64;
        for (pad, frame) in inputs {
            let emitted = match self.push_frame(frame, pad) {
                Ok(emitted) => emitted,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping input frame");
                    continue;
                }
            };
            for f in &emitted {
                sink.push_frame(idx, f)?;
                idx += 1;
            }
        }
        sink.end()?;

        let after = self.stats;
        Ok(RunStats {
            frames_in: after.frames_in - before.frames_in,
            frames_out: after.frames_out - before.frames_out,
            frames_rejected: after.frames_rejected - before.frames_rejected,
            callbacks_failed: after.callbacks_failed - before.callbacks_failed,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
