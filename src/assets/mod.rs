/// CSS-style colors for fill and stroke styles.
pub mod color;
/// Image decoding into premultiplied frames.
pub mod decode;
