use crate::foundation::core::{Affine, Point, Rgba8Premul};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::frame::VideoFrame;
use std::str::FromStr;

/// Font selection in the `"<size>px <family>"` shorthand, e.g. `"100px Arial"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    /// Em size in local units.
    pub size_px: f64,
    /// Family name passed through to the text renderer.
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            family: "sans-serif".to_owned(),
        }
    }
}

impl FromStr for FontSpec {
    type Err = CanvasError;

    fn from_str(s: &str) -> CanvasResult<Self> {
        let s = s.trim();
        let (size, family) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| CanvasError::validation(format!("font \"{s}\" needs a size and a family")))?;
        let size_px: f64 = size
            .strip_suffix("px")
            .and_then(|v| v.parse().ok())
            .filter(|v: &f64| v.is_finite() && *v > 0.0)
            .ok_or_else(|| CanvasError::validation(format!("invalid font size \"{size}\"")))?;
        let family = family.trim();
        if family.is_empty() {
            return Err(CanvasError::validation("font family is empty"));
        }
        Ok(Self {
            size_px,
            family: family.to_owned(),
        })
    }
}

/// Whether a text run should be filled or outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextMode {
    /// Filled glyphs using the fill color.
    Fill,
    /// Outlined glyphs using the stroke color and line width.
    Stroke,
}

/// Placement and paint for one text draw, resolved at call time.
///
/// Glyph shaping and rasterization are not done here; a [`TextRenderer`] receives the run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// UTF-8 text.
    pub text: String,
    /// Baseline origin in device space.
    pub origin: Point,
    /// Local-to-device transform active at call time.
    pub transform: Affine,
    /// Font in local units.
    pub font: FontSpec,
    /// Paint with global alpha already applied.
    pub color: Rgba8Premul,
    /// Fill or stroke.
    pub mode: TextMode,
    /// Outline width in local units (meaningful for [`TextMode::Stroke`]).
    pub line_width: f64,
}

/// External glyph rasterizer.
pub trait TextRenderer {
    /// Draw `run` into `frame`.
    fn render_text(&mut self, frame: &mut VideoFrame, run: &TextRun) -> CanvasResult<()>;
}

/// Text renderer that only records runs; useful for tests and headless hosts.
#[derive(Debug, Default)]
pub struct TextRunRecorder {
    runs: Vec<TextRun>,
}

impl TextRunRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs recorded so far, in call order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Take the recorded runs, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<TextRun> {
        std::mem::take(&mut self.runs)
    }
}

impl TextRenderer for TextRunRecorder {
    fn render_text(&mut self, _frame: &mut VideoFrame, run: &TextRun) -> CanvasResult<()> {
        self.runs.push(run.clone());
        Ok(())
    }
}
