//! Pad-routed frame callbacks.
//!
//! A [`FrameNode`](node::FrameNode) declares its pads once, then receives one callback per
//! arriving frame. It decides per callback whether to send, latch, or drop the frame.
//! [`NodeRunner`](runner::NodeRunner) is the host side of that contract.

/// Node trait, pad declaration and the per-callback context.
pub mod node;
/// Host-facing driver.
pub mod runner;
