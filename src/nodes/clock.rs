use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::canvas::GraphicsContext;
use crate::canvas::state::LineCap;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::nodes::TextSlot;
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// Dial geometry below is authored for this size and scaled to [`ClockConfig::dial_size`].
const DESIGN_SIZE: f64 = 400.0;

const BEZEL: Color = Color::rgb(0x32, 0x5f, 0xa2);
const SECOND_HAND: Color = Color::rgb(255, 0, 0);

/// Placement of the clock overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Side of the square dial frame in pixels.
    pub dial_size: u32,
    /// Destination rectangle `[x, y, w, h]` of the dial on the input frame.
    pub dest: [f64; 4],
    /// Backing panel rectangle `[x, y, w, h]`.
    pub panel: [f64; 4],
    /// Backing panel color.
    pub panel_color: Color,
    /// Baseline origin of the `PTS:` label.
    pub label_origin: [f64; 2],
    /// Label font shorthand.
    pub font: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            dial_size: 400,
            dest: [100.0, 100.0, 640.0, 640.0],
            panel: [150.0, 150.0, 1300.0, 580.0],
            panel_color: Color::rgba(0, 0, 0, 0x80),
            label_origin: [600.0, 700.0],
            font: "100px Arial".to_owned(),
        }
    }
}

/// Draw an analog clock showing `seconds` since midnight, centered in a square of side `size`.
///
/// Hands advance clockwise on screen. Drawing state is balanced on return.
pub fn draw_clock(ctx: &mut GraphicsContext<'_>, size: f64, seconds: f64) -> CanvasResult<()> {
    let k = size / DESIGN_SIZE;
    let sec = seconds.rem_euclid(60.0);
    let min = (seconds / 60.0).floor().rem_euclid(60.0);
    let hr = (seconds / 3600.0).floor().rem_euclid(12.0);

    ctx.save();
    ctx.translate(size / 2.0, size / 2.0);
    ctx.scale(k, k);
    ctx.rotate(-PI / 2.0);
    ctx.set_stroke_color(Color::WHITE);
    ctx.set_fill_color(Color::WHITE);
    ctx.set_line_width(8.0);
    ctx.set_line_cap(LineCap::Round);

    // hour marks
    ctx.save();
    for _ in 0..12 {
        ctx.begin_path();
        ctx.rotate(PI / 6.0);
        ctx.move_to(100.0, 0.0);
        ctx.line_to(120.0, 0.0)?;
        ctx.stroke();
    }
    ctx.restore()?;

    // minute marks
    ctx.save();
    ctx.set_line_width(5.0);
    for i in 0..60 {
        if i % 5 != 0 {
            ctx.begin_path();
            ctx.move_to(117.0, 0.0);
            ctx.line_to(120.0, 0.0)?;
            ctx.stroke();
        }
        ctx.rotate(PI / 30.0);
    }
    ctx.restore()?;

    ctx.set_fill_color(Color::BLACK);

    ctx.save();
    ctx.rotate(PI / 6.0 * hr + PI / 360.0 * min + PI / 21600.0 * sec);
    ctx.set_line_width(14.0);
    hand(ctx, -20.0, 80.0)?;
    ctx.restore()?;

    ctx.save();
    ctx.rotate(PI / 30.0 * min + PI / 1800.0 * sec);
    ctx.set_line_width(10.0);
    hand(ctx, -28.0, 112.0)?;
    ctx.restore()?;

    ctx.save();
    ctx.rotate(sec * PI / 30.0);
    ctx.set_stroke_color(SECOND_HAND);
    ctx.set_fill_color(SECOND_HAND);
    ctx.set_line_width(6.0);
    hand(ctx, -30.0, 83.0)?;
    ctx.begin_path();
    ctx.arc(0.0, 0.0, 10.0, 0.0, TAU, true)?;
    ctx.fill();
    ctx.begin_path();
    ctx.arc(95.0, 0.0, 10.0, 0.0, TAU, true)?;
    ctx.stroke();
    ctx.begin_path();
    ctx.set_fill_color(Color::BLACK);
    ctx.arc(0.0, 0.0, 3.0, 0.0, TAU, true)?;
    ctx.fill();
    ctx.restore()?;

    ctx.begin_path();
    ctx.set_line_width(14.0);
    ctx.set_stroke_color(BEZEL);
    ctx.arc(0.0, 0.0, 142.0, 0.0, TAU, true)?;
    ctx.stroke();

    ctx.restore()
}

fn hand(ctx: &mut GraphicsContext<'_>, from: f64, to: f64) -> CanvasResult<()> {
    ctx.begin_path();
    ctx.move_to(from, 0.0);
    ctx.line_to(to, 0.0)?;
    ctx.stroke();
    Ok(())
}

/// Render the dial alone into a transparent `size`×`size` frame.
pub fn render_dial(size: u32, seconds: f64) -> CanvasResult<VideoFrame> {
    if size == 0 {
        return Err(CanvasError::validation("clock dial size must be > 0"));
    }
    let mut dial = VideoFrame::new(size, size, seconds);
    let mut ctx = GraphicsContext::new(&mut dial);
    draw_clock(&mut ctx, f64::from(size), seconds)?;
    drop(ctx);
    Ok(dial)
}

/// Composites a clock for each frame's timestamp over a translucent panel.
pub struct ClockNode {
    cfg: ClockConfig,
    text: TextSlot,
}

impl ClockNode {
    /// Node with `cfg` and queued (unrendered) labels.
    pub fn new(cfg: ClockConfig) -> Self {
        Self::with_text(cfg, TextSlot::new())
    }

    /// Node drawing labels through `text`.
    pub fn with_text(cfg: ClockConfig, text: TextSlot) -> Self {
        Self { cfg, text }
    }

    /// Active configuration.
    pub fn config(&self) -> &ClockConfig {
        &self.cfg
    }

    /// Label runs from the latest frame (when no renderer is attached).
    pub fn text(&self) -> &TextSlot {
        &self.text
    }
}

impl FrameNode for ClockNode {
    fn pads(&self) -> PadLayout {
        PadLayout::new(1)
    }

    fn receive(
        &mut self,
        mut frame: VideoFrame,
        _pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        let dial = render_dial(self.cfg.dial_size, frame.pts)?;
        let cfg = &self.cfg;
        let pts = frame.pts;
        self.text.draw(&mut frame, |ctx| {
            ctx.set_font(&cfg.font)?;
            ctx.set_fill_color(cfg.panel_color);
            let [px, py, pw, ph] = cfg.panel;
            ctx.fill_rect(px, py, pw, ph);
            let [lx, ly] = cfg.label_origin;
            ctx.stroke_text(&format!("PTS: {pts}"), lx, ly)?;
            let [dx, dy, dw, dh] = cfg.dest;
            ctx.draw_image(&dial, dx, dy, dw, dh);
            Ok(())
        })?;
        cx.send(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nodes/clock.rs"]
mod tests;
