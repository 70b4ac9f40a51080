//! framecanvas draws per-frame 2D vector graphics into video frames.
//!
//! A host pipeline hands decoded frames to small [`FrameNode`]s, one callback per frame. Nodes
//! draw with an immediate-mode [`GraphicsContext`] (transform stack, paths, fill and stroke) or
//! touch pixels directly, then send frames downstream.
//!
//! - Drive a node with a [`NodeRunner`]
//! - Draw with a [`GraphicsContext`] borrowed over a [`VideoFrame`]
//! - Stream emitted frames into a [`FrameSink`]
//!
//! Rasterization samples pixel centers with the nonzero winding rule and no anti-aliasing, so
//! output is exact and reproducible across runs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Colors and image decoding.
pub mod assets;
/// Immediate-mode drawing context.
pub mod canvas;
/// Node configuration loading.
pub mod config;
/// Compositing and per-pixel filters.
pub mod effects;
/// Frame sinks.
pub mod encode;
/// Built-in nodes.
pub mod nodes;
/// Pad-routed frame callbacks.
pub mod pipeline;
/// Frame buffer and rasterizer.
pub mod render;

pub use crate::foundation::core::{
    Affine, BezPath, ChannelMask, Fps, FrameSize, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{CanvasError, CanvasResult};

pub use crate::assets::color::Color;
pub use crate::assets::decode::{decode_frame, load_frame_png};
pub use crate::canvas::GraphicsContext;
pub use crate::canvas::path::{ArcCmd, ArcPolicy, PathBuilder, PathCmd};
pub use crate::canvas::state::{LineCap, LineJoin, StyleState};
pub use crate::canvas::text::{FontSpec, TextMode, TextRenderer, TextRun, TextRunRecorder};
pub use crate::config::NodeConfig;
pub use crate::effects::channels::{mask_channels, quadrant_remap, quadrant_remap_into};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::nodes::TextSlot;
pub use crate::nodes::bounce::{BounceConfig, BounceNode};
pub use crate::nodes::clock::{ClockConfig, ClockNode};
pub use crate::nodes::credits::{CreditsConfig, CreditsNode, TitleCard, fade_alpha};
pub use crate::nodes::house::{HouseConfig, HouseNode};
pub use crate::nodes::quadrants::QuadrantsNode;
pub use crate::pipeline::node::{FrameNode, PadContext, PadLayout, PadMode};
pub use crate::pipeline::runner::{NodeRunner, RunStats, RunnerState};
pub use crate::render::frame::VideoFrame;
