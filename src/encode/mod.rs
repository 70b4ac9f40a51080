//! Frame sinks.
//!
//! Sinks consume the frames a node emits, in emission order.

/// PNG image sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
