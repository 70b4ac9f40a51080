use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::nodes::TextSlot;
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// Opacity of a title shown from `start` for `duration` seconds with linear fades.
///
/// Returns `None` outside `[start, start + duration]`, where nothing is drawn. `fade` is clamped
/// to half the duration (and defaults to it when `None`); the title fades in over the first `fade`
/// seconds and out over the last `fade` seconds. A zero fade shows the title at full opacity.
pub fn fade_alpha(pts: f64, start: f64, duration: f64, fade: Option<f64>) -> Option<f64> {
    if !(pts.is_finite() && duration.is_finite() && duration >= 0.0) {
        return None;
    }
    let end = start + duration;
    if pts < start || pts > end {
        return None;
    }

    let half = duration / 2.0;
    let fade = match fade {
        Some(f) if f.is_finite() && f <= half => f.max(0.0),
        _ => half,
    };
    if fade <= 0.0 {
        return Some(1.0);
    }

    let fade_out_start = end - fade;
    let alpha = if pts > fade_out_start {
        1.0 - (pts - fade_out_start) / fade
    } else {
        (pts - start) / fade
    };
    Some(alpha.clamp(0.0, 1.0))
}

/// One title card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleCard {
    /// Text to show.
    pub text: String,
    /// First visible timestamp, seconds.
    pub start: f64,
    /// Visible span, seconds.
    pub duration: f64,
    /// Fade length, seconds; defaults to half the duration.
    #[serde(default)]
    pub fade: Option<f64>,
}

impl TitleCard {
    /// Card with an explicit fade length.
    pub fn new(text: impl Into<String>, start: f64, duration: f64, fade: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
            fade: Some(fade),
        }
    }

    /// Opacity at `pts`, or `None` when the card is not visible.
    pub fn alpha_at(&self, pts: f64) -> Option<f64> {
        fade_alpha(pts, self.start, self.duration, self.fade)
    }
}

/// Title sequence settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreditsConfig {
    /// Cards in draw order.
    pub titles: Vec<TitleCard>,
    /// Baseline origin shared by all cards.
    pub origin: [f64; 2],
    /// Font shorthand.
    pub font: String,
    /// Outline color; its alpha is replaced by the fade.
    pub color: Color,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            titles: vec![
                TitleCard::new("framecanvas presents", 2.0, 5.0, 1.0),
                TitleCard::new("in association with the pipeline", 8.0, 5.0, 1.0),
                TitleCard::new("a framecanvas film", 14.0, 5.0, 1.0),
            ],
            origin: [200.0, 200.0],
            font: "100px Arial".to_owned(),
            color: Color::WHITE,
        }
    }
}

impl CreditsConfig {
    /// Reject cards with negative or non-finite timing.
    pub fn validate(&self) -> CanvasResult<()> {
        for card in &self.titles {
            if !(card.start.is_finite() && card.duration.is_finite() && card.duration >= 0.0) {
                return Err(CanvasError::validation(format!(
                    "title \"{}\" has invalid timing",
                    card.text
                )));
            }
        }
        Ok(())
    }
}

/// Outlines every visible title card on the passing frame.
pub struct CreditsNode {
    cfg: CreditsConfig,
    text: TextSlot,
}

impl CreditsNode {
    /// Node with queued (unrendered) text.
    pub fn new(cfg: CreditsConfig) -> CanvasResult<Self> {
        Self::with_text(cfg, TextSlot::new())
    }

    /// Node drawing text through `text`.
    pub fn with_text(cfg: CreditsConfig, text: TextSlot) -> CanvasResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg, text })
    }

    /// Text runs from the latest frame (when no renderer is attached).
    pub fn text(&self) -> &TextSlot {
        &self.text
    }
}

impl FrameNode for CreditsNode {
    fn pads(&self) -> PadLayout {
        PadLayout::new(1)
    }

    fn receive(
        &mut self,
        mut frame: VideoFrame,
        _pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        let cfg = &self.cfg;
        let pts = frame.pts;
        self.text.draw(&mut frame, |ctx| {
            ctx.set_font(&cfg.font)?;
            let [x, y] = cfg.origin;
            for card in &cfg.titles {
                let Some(alpha) = card.alpha_at(pts) else {
                    continue;
                };
                ctx.set_stroke_color(cfg.color.with_alpha(alpha));
                ctx.stroke_text(&card.text, x, y)?;
            }
            Ok(())
        })?;
        cx.send(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nodes/credits.rs"]
mod tests;
