use crate::assets::color::Color;
use crate::canvas::text::FontSpec;
use crate::foundation::core::Affine;
use crate::foundation::error::{CanvasError, CanvasResult};
use smallvec::SmallVec;
use std::str::FromStr;

/// How open stroke endpoints are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat edge exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircle of radius `line_width / 2`.
    Round,
    /// Band extended by `line_width / 2`.
    Square,
}

impl FromStr for LineCap {
    type Err = CanvasError;

    fn from_str(s: &str) -> CanvasResult<Self> {
        match s.trim() {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            other => Err(CanvasError::validation(format!("unknown line cap \"{other}\""))),
        }
    }
}

/// How consecutive stroke segments are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corner, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

impl FromStr for LineJoin {
    type Err = CanvasError;

    fn from_str(s: &str) -> CanvasResult<Self> {
        match s.trim() {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            other => Err(CanvasError::validation(format!("unknown line join \"{other}\""))),
        }
    }
}

/// Style attributes captured by `save` and restored by `restore`.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleState {
    /// Color used by `stroke`.
    pub stroke_color: Color,
    /// Color used by `fill`.
    pub fill_color: Color,
    /// Stroke width in local units, always `>= 0`.
    pub line_width: f64,
    /// Cap applied at open stroke endpoints.
    pub line_cap: LineCap,
    /// Join applied between stroke segments.
    pub line_join: LineJoin,
    /// Miter length limit relative to the line width.
    pub miter_limit: f64,
    /// Opacity multiplier in `0..=1` applied to every draw.
    pub global_alpha: f64,
    /// Font handed to the text collaborator.
    pub font: FontSpec,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            global_alpha: 1.0,
            font: FontSpec::default(),
        }
    }
}

/// Transform and style bundled so that `save`/`restore` act on both atomically.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextFrame {
    /// Local-to-device transform.
    pub transform: Affine,
    /// Drawing style.
    pub style: StyleState,
}

impl Default for ContextFrame {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            style: StyleState::default(),
        }
    }
}

/// Current context frame plus the LIFO stack of saved frames.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: ContextFrame,
    saved: SmallVec<[ContextFrame; 8]>,
}

impl StateStack {
    /// Start from `initial` with an empty save stack.
    pub fn new(initial: ContextFrame) -> Self {
        Self {
            current: initial,
            saved: SmallVec::new(),
        }
    }

    /// The active context frame.
    pub fn current(&self) -> &ContextFrame {
        &self.current
    }

    /// Mutable access to the active context frame.
    pub fn current_mut(&mut self) -> &mut ContextFrame {
        &mut self.current
    }

    /// Number of saves not yet matched by a restore.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push a copy of the current frame.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the most recent saved frame and make it current.
    ///
    /// With nothing saved this fails with [`CanvasError::StackUnderflow`] and leaves the current
    /// frame untouched.
    pub fn restore(&mut self) -> CanvasResult<()> {
        let frame = self.saved.pop().ok_or(CanvasError::StackUnderflow)?;
        self.current = frame;
        Ok(())
    }

    /// Right-multiply the current transform: `current = current * m`.
    pub fn concat(&mut self, m: Affine) {
        self.current.transform = self.current.transform * m;
    }

    /// `concat(translate(dx, dy))`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(Affine::translate((dx, dy)));
    }

    /// `concat(scale(sx, sy))`.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(Affine::scale_non_uniform(sx, sy));
    }

    /// `concat(rotate(theta))`, radians, positive toward +Y.
    pub fn rotate(&mut self, theta: f64) {
        self.concat(Affine::rotate(theta));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/state.rs"]
mod tests;
