use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::canvas::GraphicsContext;
use crate::foundation::error::CanvasResult;
use crate::pipeline::node::{FrameNode, PadContext, PadLayout};
use crate::render::frame::VideoFrame;

/// House illustration colors and optional parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseConfig {
    /// Roof, chimney and wall fill.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width.
    pub line_width: f64,
    /// Window fill.
    pub window: Color,
    /// Draw the door frame, arch and handles.
    pub door: bool,
    /// Draw the elliptical chimney cap.
    pub chimney_cap: bool,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            fill: Color::rgb(0x97, 0x5b, 0x5b),
            stroke: Color::WHITE,
            line_width: 3.0,
            window: Color::WHITE,
            door: true,
            chimney_cap: true,
        }
    }
}

const WINDOWS: [(f64, f64); 12] = [
    (130.0, 300.0),
    (205.0, 300.0),
    (325.0, 300.0),
    (400.0, 300.0),
    (130.0, 350.0),
    (205.0, 350.0),
    (325.0, 350.0),
    (400.0, 350.0),
    (325.0, 425.0),
    (400.0, 425.0),
    (325.0, 475.0),
    (400.0, 475.0),
];
const WINDOW_SIZE: (f64, f64) = (70.0, 45.0);

/// Draw the house in its fixed 600×600 layout under the context's current transform.
pub fn draw_house(ctx: &mut GraphicsContext<'_>, cfg: &HouseConfig) -> CanvasResult<()> {
    ctx.save();
    ctx.set_fill_color(cfg.fill);
    ctx.set_stroke_color(cfg.stroke);
    ctx.set_line_width(cfg.line_width);

    // roof
    ctx.begin_path();
    ctx.move_to(100.0, 260.0);
    ctx.line_to(300.0, 10.0)?;
    ctx.line_to(500.0, 260.0)?;
    ctx.close_path();
    ctx.fill();
    ctx.stroke();

    // chimney
    ctx.fill_rect(381.0, 60.0, 45.0, 120.0);
    ctx.stroke_rect(381.0, 60.0, 45.0, 140.0);
    if cfg.chimney_cap {
        ctx.begin_path();
        ctx.ellipse_bezier(380.0, 55.0, 47.0, 14.0)?;
        ctx.fill();
        ctx.stroke();
    }
    ctx.fill_rect(378.0, 198.0, 55.0, 5.0);

    // walls
    ctx.fill_rect(100.0, 260.0, 400.0, 300.0);
    ctx.stroke_rect(100.0, 260.0, 400.0, 300.0);

    ctx.set_fill_color(cfg.window);
    let (w, h) = WINDOW_SIZE;
    for (x, y) in WINDOWS {
        ctx.fill_rect(x, y, w, h);
    }

    if cfg.door {
        draw_door(ctx)?;
    }
    ctx.restore()
}

fn draw_door(ctx: &mut GraphicsContext<'_>) -> CanvasResult<()> {
    ctx.begin_path();
    for (x, top) in [(200.0, 423.0), (140.0, 433.0), (260.0, 434.0)] {
        ctx.move_to(x, top);
        ctx.line_to(x, 560.0)?;
    }
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(199.0, 562.0, 140.0, 1.355 * PI, 1.65 * PI, false)?;
    ctx.stroke();

    for cx in [185.0, 215.0] {
        ctx.begin_path();
        ctx.arc(cx, 510.0, 5.0, 0.0, TAU, false)?;
        ctx.stroke();
    }
    Ok(())
}

/// Paints the house over every passing frame.
#[derive(Debug, Default)]
pub struct HouseNode {
    cfg: HouseConfig,
}

impl HouseNode {
    /// Node drawing with `cfg`.
    pub fn new(cfg: HouseConfig) -> Self {
        Self { cfg }
    }
}

impl FrameNode for HouseNode {
    fn pads(&self) -> PadLayout {
        PadLayout::new(1)
    }

    fn receive(
        &mut self,
        mut frame: VideoFrame,
        _pad: usize,
        cx: &mut PadContext<'_>,
    ) -> CanvasResult<()> {
        let mut ctx = GraphicsContext::new(&mut frame);
        draw_house(&mut ctx, &self.cfg)?;
        drop(ctx);
        cx.send(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nodes/house.rs"]
mod tests;
