use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::frame::VideoFrame;
use smallvec::SmallVec;

/// How frames arriving on a pad are kept between callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PadMode {
    /// Frames are handed to the node and not remembered.
    #[default]
    Transient,
    /// The node may latch the most recent frame; a new one replaces it.
    Latched,
}

/// Pad declaration made once when a node is attached.
///
/// Pad 0 is the primary input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadLayout {
    modes: SmallVec<[PadMode; 4]>,
    undeclared_latch: Option<usize>,
}

impl PadLayout {
    /// `count` transient pads.
    pub fn new(count: usize) -> Self {
        Self {
            modes: SmallVec::from_elem(PadMode::Transient, count),
            undeclared_latch: None,
        }
    }

    /// Mark `pad` as latched. Indices beyond the count are rejected by [`Self::validate`].
    pub fn latched(mut self, pad: usize) -> Self {
        match self.modes.get_mut(pad) {
            Some(mode) => *mode = PadMode::Latched,
            None => self.undeclared_latch = Some(pad),
        }
        self
    }

    /// Number of declared pads.
    pub fn count(&self) -> usize {
        self.modes.len()
    }

    /// Mode of `pad`, if declared.
    pub fn mode(&self, pad: usize) -> Option<PadMode> {
        self.modes.get(pad).copied()
    }

    /// Fails unless at least one pad is declared.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.modes.is_empty() {
            return Err(CanvasError::validation("a node must declare at least one pad"));
        }
        if let Some(pad) = self.undeclared_latch {
            return Err(CanvasError::validation(format!(
                "latched pad {pad} exceeds the {} declared pads",
                self.modes.len()
            )));
        }
        Ok(())
    }
}

/// Per-callback view of the pipeline handed to [`FrameNode::receive`].
pub struct PadContext<'a> {
    pad: usize,
    layout: &'a PadLayout,
    latched: &'a mut [Option<VideoFrame>],
    out: &'a mut Vec<VideoFrame>,
}

impl<'a> PadContext<'a> {
    pub(crate) fn new(
        pad: usize,
        layout: &'a PadLayout,
        latched: &'a mut [Option<VideoFrame>],
        out: &'a mut Vec<VideoFrame>,
    ) -> Self {
        Self {
            pad,
            layout,
            latched,
            out,
        }
    }

    /// Pad the current frame arrived on.
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Declared pad layout.
    pub fn layout(&self) -> &PadLayout {
        self.layout
    }

    /// Keep `frame` as the latched frame of the arriving pad, replacing any previous one.
    ///
    /// Fails with a validation error when the arriving pad was not declared latched.
    pub fn latch(&mut self, frame: VideoFrame) -> CanvasResult<()> {
        if self.layout.mode(self.pad) != Some(PadMode::Latched) {
            return Err(CanvasError::validation(format!(
                "pad {} is not latched",
                self.pad
            )));
        }
        if let Some(slot) = self.latched.get_mut(self.pad) {
            *slot = Some(frame);
        }
        Ok(())
    }

    /// Most recent frame latched on `pad`.
    pub fn latched(&self, pad: usize) -> Option<&VideoFrame> {
        self.latched.get(pad).and_then(Option::as_ref)
    }

    /// Emit `frame` downstream. Frames that are never sent are dropped.
    pub fn send(&mut self, frame: VideoFrame) {
        self.out.push(frame);
    }

    /// Number of frames emitted so far in this callback.
    pub fn sent(&self) -> usize {
        self.out.len()
    }
}

/// A per-frame processing unit driven by a [`NodeRunner`](crate::pipeline::runner::NodeRunner).
pub trait FrameNode: Send {
    /// Pad declaration, queried once when the runner is created.
    fn pads(&self) -> PadLayout;

    /// Handle `frame` arriving on `pad`.
    ///
    /// The frame is owned by the callback: send it, latch it, or let it drop.
    fn receive(&mut self, frame: VideoFrame, pad: usize, cx: &mut PadContext<'_>)
    -> CanvasResult<()>;
}

impl<N: FrameNode + ?Sized> FrameNode for Box<N> {
    fn pads(&self) -> PadLayout {
        (**self).pads()
    }

    fn receive(
        &mut self,
        frame: VideoFrame,
        pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        (**self).receive(frame, pad, cx)
    }
}
