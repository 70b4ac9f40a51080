use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::frame::VideoFrame;

/// Writes every pushed frame as `frame_%05d.png` (straight alpha) into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`; the directory is created in `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for frame index `idx`.
    pub fn file_name(idx: u64) -> String {
        format!("frame_{idx:05}.png")
    }
}

/// Encode `frame` as a straight-alpha RGBA8 PNG at `path`.
pub fn save_frame_png(frame: &VideoFrame, path: &Path) -> CanvasResult<()> {
    let rgba = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> CanvasResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CanvasError::validation("png sink needs a non-empty size"));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &VideoFrame) -> CanvasResult<()> {
        if self.cfg.is_none() {
            return Err(CanvasError::validation("png sink: push_frame before begin"));
        }
        let path = self.dir.join(Self::file_name(idx));
        save_frame_png(frame, &path)?;
        tracing::debug!(path = %path.display(), pts = frame.pts, "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CanvasResult<()> {
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
