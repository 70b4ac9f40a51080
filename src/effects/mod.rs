/// Per-channel masking and the quadrant remap filter.
pub mod channels;
/// Premultiplied source-over compositing and scaled image draws.
pub mod composite;
