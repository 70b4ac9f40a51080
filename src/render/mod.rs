/// Frame buffer with direct pixel access.
pub mod frame;
/// Nonzero scanline fill and stroke expansion.
pub mod raster;
