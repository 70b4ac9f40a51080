//! Immediate-mode 2D drawing over a borrowed [`VideoFrame`].
//!
//! A [`GraphicsContext`] owns its transform stack and path for the duration of one node callback
//! and mutably borrows the frame it draws into. Path commands are transformed when issued, so a
//! later `rotate` never moves points that were already recorded.

/// Path commands and their device-space capture.
pub mod path;
/// Style state and the save/restore stack.
pub mod state;
/// Text runs and the pluggable text renderer.
pub mod text;

use crate::assets::color::Color;
use crate::canvas::path::{ArcPolicy, PathBuilder};
use crate::canvas::state::{ContextFrame, LineCap, LineJoin, StateStack, StyleState};
use crate::canvas::text::{FontSpec, TextMode, TextRenderer, TextRun};
use crate::effects::composite;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul};
use crate::foundation::error::CanvasResult;
use crate::render::frame::VideoFrame;
use crate::render::raster::{self, FLATTEN_TOLERANCE};
use kurbo::{Cap, Join, Stroke};

/// Control point offset for approximating a quarter ellipse with one cubic.
pub const ELLIPSE_KAPPA: f64 = 0.552_284_83;

/// Drawing state bound to one frame.
pub struct GraphicsContext<'f> {
    target: &'f mut VideoFrame,
    state: StateStack,
    path: PathBuilder,
    arc_policy: ArcPolicy,
    text: Option<&'f mut dyn TextRenderer>,
    pending_text: Vec<TextRun>,
}

impl<'f> GraphicsContext<'f> {
    /// Start drawing into `target` with the identity transform and default style.
    pub fn new(target: &'f mut VideoFrame) -> Self {
        Self {
            target,
            state: StateStack::new(ContextFrame::default()),
            path: PathBuilder::new(),
            arc_policy: ArcPolicy::default(),
            text: None,
            pending_text: Vec::new(),
        }
    }

    /// Route `fill_text`/`stroke_text` to `renderer` instead of queueing the runs.
    pub fn with_text_renderer(mut self, renderer: &'f mut dyn TextRenderer) -> Self {
        self.text = Some(renderer);
        self
    }

    /// Choose how arcs behave under non-uniform scale.
    pub fn with_arc_policy(mut self, policy: ArcPolicy) -> Self {
        self.arc_policy = policy;
        self
    }

    /// Read access to the target frame.
    pub fn frame(&self) -> &VideoFrame {
        &*self.target
    }

    /// Direct pixel access to the target frame.
    pub fn frame_mut(&mut self) -> &mut VideoFrame {
        &mut *self.target
    }

    // ----- transform stack -----

    /// Push a copy of the transform and style.
    pub fn save(&mut self) {
        self.state.save();
    }

    /// Pop the most recently saved transform and style.
    ///
    /// Fails with `StackUnderflow` when nothing was saved; the state is left unchanged.
    pub fn restore(&mut self) -> CanvasResult<()> {
        self.state.restore().inspect_err(|e| {
            tracing::warn!(error = %e, "ignoring restore");
        })
    }

    /// Number of saves not matched by a restore.
    pub fn unbalanced_saves(&self) -> usize {
        self.state.depth()
    }

    /// Right-multiply a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
    }

    /// Right-multiply a scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
    }

    /// Right-multiply a rotation (radians, clockwise on screen).
    pub fn rotate(&mut self, theta: f64) {
        self.state.rotate(theta);
    }

    /// Right-multiply an arbitrary affine matrix.
    pub fn concat(&mut self, m: Affine) {
        self.state.concat(m);
    }

    /// The current transform.
    pub fn transform(&self) -> Affine {
        self.state.current().transform
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, m: Affine) {
        self.state.current_mut().transform = m;
    }

    /// Reset the current transform to identity.
    pub fn reset_transform(&mut self) {
        self.set_transform(Affine::IDENTITY);
    }

    // ----- style -----

    /// The active style.
    pub fn style(&self) -> &StyleState {
        &self.state.current().style
    }

    fn style_mut(&mut self) -> &mut StyleState {
        &mut self.state.current_mut().style
    }

    /// Set the fill color from a CSS color string.
    pub fn set_fill_style(&mut self, css: &str) -> CanvasResult<()> {
        let color = css.parse()?;
        self.set_fill_color(color);
        Ok(())
    }

    /// Set the fill color.
    pub fn set_fill_color(&mut self, color: Color) {
        self.style_mut().fill_color = color;
    }

    /// Set the stroke color from a CSS color string.
    pub fn set_stroke_style(&mut self, css: &str) -> CanvasResult<()> {
        let color = css.parse()?;
        self.set_stroke_color(color);
        Ok(())
    }

    /// Set the stroke color.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.style_mut().stroke_color = color;
    }

    /// Set the line width; negative or non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width >= 0.0 {
            self.style_mut().line_width = width;
        } else {
            tracing::debug!(width, "ignoring invalid line width");
        }
    }

    /// Set the endpoint style of open strokes.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.style_mut().line_cap = cap;
    }

    /// Set the corner style of strokes.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.style_mut().line_join = join;
    }

    /// Set the miter limit; values that are not positive and finite are ignored.
    pub fn set_miter_limit(&mut self, limit: f64) {
        if limit.is_finite() && limit > 0.0 {
            self.style_mut().miter_limit = limit;
        }
    }

    /// Set the global alpha, clamped to `0..=1`. NaN is ignored.
    pub fn set_global_alpha(&mut self, alpha: f64) {
        if !alpha.is_nan() {
            self.style_mut().global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Set the font from `"<size>px <family>"` shorthand.
    pub fn set_font(&mut self, font: &str) -> CanvasResult<()> {
        let font: FontSpec = font.parse()?;
        self.style_mut().font = font;
        Ok(())
    }

    // ----- path -----

    /// Recorded path, for inspection.
    pub fn path(&self) -> &PathBuilder {
        &self.path
    }

    /// Discard the current path.
    pub fn begin_path(&mut self) {
        self.path.begin_path();
    }

    /// Start a subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let m = self.transform();
        self.path.move_to(m, x, y);
    }

    /// Straight segment to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) -> CanvasResult<()> {
        let m = self.transform();
        self.path.line_to(m, x, y)
    }

    /// Cubic Bézier segment to `(x, y)`.
    pub fn bezier_curve_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> CanvasResult<()> {
        let m = self.transform();
        self.path.bezier_curve_to(m, (c1x, c1y), (c2x, c2y), (x, y))
    }

    /// Circular arc around `(cx, cy)`.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        ccw: bool,
    ) -> CanvasResult<()> {
        let m = self.transform();
        self.path
            .arc(m, self.arc_policy, (cx, cy), radius, start, end, ccw)
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        self.path.close_path();
    }

    /// Append a closed rectangle subpath.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let m = self.transform();
        self.path.rect(m, x, y, w, h);
    }

    /// Append an ellipse inscribed in `(x, y, w, h)` as four cubics.
    ///
    /// The subpath starts at the left midpoint and ends there without being closed.
    pub fn ellipse_bezier(&mut self, x: f64, y: f64, w: f64, h: f64) -> CanvasResult<()> {
        let ox = w / 2.0 * ELLIPSE_KAPPA;
        let oy = h / 2.0 * ELLIPSE_KAPPA;
        let (xe, ye) = (x + w, y + h);
        let (xm, ym) = (x + w / 2.0, y + h / 2.0);

        self.move_to(x, ym);
        self.bezier_curve_to(x, ym - oy, xm - ox, y, xm, y)?;
        self.bezier_curve_to(xm + ox, y, xe, ym - oy, xe, ym)?;
        self.bezier_curve_to(xe, ym + oy, xm + ox, ye, xm, ye)?;
        self.bezier_curve_to(xm - ox, ye, x, ym + oy, x, ym)
    }

    // ----- painting -----

    fn fill_paint(&self) -> Rgba8Premul {
        let style = self.style();
        style.fill_color.to_premul(style.global_alpha)
    }

    fn stroke_paint(&self) -> Rgba8Premul {
        let style = self.style();
        style.stroke_color.to_premul(style.global_alpha)
    }

    fn stroke_style(&self) -> Stroke {
        let style = self.style();
        let det = self.transform().determinant().abs();
        let cap = match style.line_cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        };
        let join = match style.line_join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        };
        Stroke::new(style.line_width * det.sqrt())
            .with_caps(cap)
            .with_join(join)
            .with_miter_limit(style.miter_limit)
    }

    /// Fill the current path with the fill color (nonzero winding).
    ///
    /// Returns the number of pixels covered. The path is kept.
    pub fn fill(&mut self) -> usize {
        let path = self.path.to_bezpath(FLATTEN_TOLERANCE);
        let paint = self.fill_paint();
        raster::fill_path(self.target, &path, paint)
    }

    /// Stroke the current path with the stroke color and line style.
    ///
    /// Returns the number of pixels covered. The path is kept.
    pub fn stroke(&mut self) -> usize {
        let path = self.path.to_bezpath(FLATTEN_TOLERANCE);
        let (style, paint) = (self.stroke_style(), self.stroke_paint());
        raster::stroke_path(self.target, &path, &style, paint)
    }

    fn rect_path(&self, x: f64, y: f64, w: f64, h: f64) -> BezPath {
        let mut builder = PathBuilder::new();
        builder.rect(self.transform(), x, y, w, h);
        builder.to_bezpath(FLATTEN_TOLERANCE)
    }

    /// Fill a rectangle without touching the current path.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> usize {
        let path = self.rect_path(x, y, w, h);
        let paint = self.fill_paint();
        raster::fill_path(self.target, &path, paint)
    }

    /// Stroke a rectangle outline without touching the current path.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> usize {
        let path = self.rect_path(x, y, w, h);
        let (style, paint) = (self.stroke_style(), self.stroke_paint());
        raster::stroke_path(self.target, &path, &style, paint)
    }

    /// Set every pixel inside the rectangle to transparent black.
    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> usize {
        let path = self.rect_path(x, y, w, h);
        raster::replace_path(self.target, &path, Rgba8Premul::TRANSPARENT)
    }

    // ----- text -----

    /// Fill `text` with its baseline origin at `(x, y)`.
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) -> CanvasResult<()> {
        let color = self.fill_paint();
        self.emit_text(text, Point::new(x, y), color, TextMode::Fill)
    }

    /// Outline `text` with its baseline origin at `(x, y)`.
    pub fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> CanvasResult<()> {
        let color = self.stroke_paint();
        self.emit_text(text, Point::new(x, y), color, TextMode::Stroke)
    }

    fn emit_text(
        &mut self,
        text: &str,
        at: Point,
        color: Rgba8Premul,
        mode: TextMode,
    ) -> CanvasResult<()> {
        let transform = self.transform();
        let style = self.style();
        let run = TextRun {
            text: text.to_owned(),
            origin: transform * at,
            transform,
            font: style.font.clone(),
            color,
            mode,
            line_width: style.line_width,
        };
        match self.text.as_deref_mut() {
            Some(renderer) => renderer.render_text(self.target, &run),
            None => {
                self.pending_text.push(run);
                Ok(())
            }
        }
    }

    /// Text runs queued because no renderer was attached.
    pub fn take_text_runs(&mut self) -> Vec<TextRun> {
        std::mem::take(&mut self.pending_text)
    }

    // ----- images -----

    /// Draw `src` scaled into `(x, y, w, h)` under the current transform.
    ///
    /// The destination is the device-space bounding box of the transformed rectangle;
    /// global alpha applies.
    pub fn draw_image(&mut self, src: &VideoFrame, x: f64, y: f64, w: f64, h: f64) {
        let dest = self
            .transform()
            .transform_rect_bbox(Rect::new(x, y, x + w, y + h));
        let opacity = self.style().global_alpha as f32;
        composite::draw_image(self.target, src, dest, opacity);
    }
}

impl Drop for GraphicsContext<'_> {
    fn drop(&mut self) {
        let depth = self.state.depth();
        if depth > 0 {
            tracing::warn!(depth, "graphics context dropped with unbalanced saves");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/context.rs"]
mod tests;
