use crate::foundation::core::{Affine, BezPath, Point, Vec2};
use crate::foundation::error::{CanvasError, CanvasResult};
use kurbo::PathEl;
use std::f64::consts::TAU;

/// How `arc` behaves under a transform that does not scale both axes equally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcPolicy {
    /// Map the circle through the transform, producing an ellipse.
    #[default]
    Approximate,
    /// Fail with [`CanvasError::UnsupportedTransform`].
    Reject,
}

/// A circular arc captured at issue time.
///
/// The center is stored in device space; radius and angles stay in local units together with the
/// linear part of the transform that was active, so the arc can be lowered exactly later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcCmd {
    /// Device-space center.
    pub center: Point,
    /// Local radius.
    pub radius: f64,
    /// Local start angle, radians.
    pub start_angle: f64,
    /// Local end angle, radians.
    pub end_angle: f64,
    /// Counter-clockwise (decreasing angle) when `true`.
    pub ccw: bool,
    /// Transform at issue time with its translation removed.
    pub linear: Affine,
    /// Whether `linear` scales both axes equally (rotation/reflection allowed).
    pub uniform_scale: bool,
}

impl ArcCmd {
    /// Signed sweep in local radians.
    ///
    /// A span of at least a full turn draws a complete circle in the requested direction;
    /// otherwise the span is normalized into `[0, 2π)` clockwise or `(-2π, 0]` counter-clockwise.
    pub fn sweep(&self) -> f64 {
        let delta = self.end_angle - self.start_angle;
        if delta.abs() >= TAU {
            return if self.ccw { -TAU } else { TAU };
        }
        if self.ccw {
            -(-delta).rem_euclid(TAU)
        } else {
            delta.rem_euclid(TAU)
        }
    }

    /// Device-space point at local `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        let local = Point::new(self.radius * angle.cos(), self.radius * angle.sin());
        self.center + (self.linear * local).to_vec2()
    }

    /// Device-space start point.
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Device-space end point.
    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep())
    }

    /// Append the arc body (cubic segments, no leading move) to `out`.
    ///
    /// `tolerance` is in device units.
    pub(crate) fn append_cubics(&self, out: &mut BezPath, tolerance: f64) {
        let sweep = self.sweep();
        if sweep == 0.0 || self.radius == 0.0 {
            return;
        }
        let arc = kurbo::Arc {
            center: Point::ORIGIN,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let to_device = Affine::translate(self.center.to_vec2()) * self.linear;
        let local_tolerance = tolerance / max_scale(self.linear).max(1e-12);
        for el in arc.append_iter(local_tolerance) {
            match el {
                PathEl::LineTo(p) => out.line_to(to_device * p),
                PathEl::QuadTo(p1, p2) => out.quad_to(to_device * p1, to_device * p2),
                PathEl::CurveTo(p1, p2, p3) => {
                    out.curve_to(to_device * p1, to_device * p2, to_device * p3)
                }
                PathEl::MoveTo(_) | PathEl::ClosePath => {}
            }
        }
    }
}

/// One recorded path command, in device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment.
    LineTo(Point),
    /// Cubic Bézier with two control points and an end point.
    CubicTo(Point, Point, Point),
    /// Circular (or, under non-uniform scale, elliptical) arc.
    Arc(ArcCmd),
    /// Marks the current subpath closed.
    ClosePath,
}

/// Records drawing commands with the transform applied eagerly.
///
/// Changing the transform after a command was issued never moves already recorded points.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    cmds: Vec<PathCmd>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl PathBuilder {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in issue order.
    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Whether no command has been recorded.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Device-space current point, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Discard every command and forget the current point.
    pub fn begin_path(&mut self) {
        self.cmds.clear();
        self.current = None;
        self.subpath_start = None;
    }

    /// Start a subpath at `m * (x, y)`.
    pub fn move_to(&mut self, m: Affine, x: f64, y: f64) {
        let p = m * Point::new(x, y);
        self.cmds.push(PathCmd::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    /// Straight segment to `m * (x, y)`.
    pub fn line_to(&mut self, m: Affine, x: f64, y: f64) -> CanvasResult<()> {
        self.require_current()?;
        let p = m * Point::new(x, y);
        self.cmds.push(PathCmd::LineTo(p));
        self.current = Some(p);
        Ok(())
    }

    /// Cubic Bézier to `(x, y)` with control points `c1`, `c2`, all transformed by `m`.
    pub fn bezier_curve_to(
        &mut self,
        m: Affine,
        c1: (f64, f64),
        c2: (f64, f64),
        end: (f64, f64),
    ) -> CanvasResult<()> {
        self.require_current()?;
        let p1 = m * Point::from(c1);
        let p2 = m * Point::from(c2);
        let p3 = m * Point::from(end);
        self.cmds.push(PathCmd::CubicTo(p1, p2, p3));
        self.current = Some(p3);
        Ok(())
    }

    /// Arc around local `(cx, cy)` with radius `r` from `start` to `end` (radians).
    ///
    /// When a current point exists, lowering joins it to the arc start with a straight segment;
    /// otherwise the arc starts a new subpath. The current point becomes the arc end.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        m: Affine,
        policy: ArcPolicy,
        (cx, cy): (f64, f64),
        r: f64,
        start: f64,
        end: f64,
        ccw: bool,
    ) -> CanvasResult<()> {
        if !(r.is_finite() && start.is_finite() && end.is_finite()) {
            return Err(CanvasError::validation("arc parameters must be finite"));
        }
        if r < 0.0 {
            return Err(CanvasError::validation(format!("arc radius {r} is negative")));
        }
        let [a, b, c, d, _, _] = m.as_coeffs();
        let linear = Affine::new([a, b, c, d, 0.0, 0.0]);
        let uniform_scale = is_uniform_scale(linear);
        if !uniform_scale && policy == ArcPolicy::Reject {
            return Err(CanvasError::unsupported_transform(
                "arc under non-uniform scale",
            ));
        }

        let cmd = ArcCmd {
            center: m * Point::new(cx, cy),
            radius: r,
            start_angle: start,
            end_angle: end,
            ccw,
            linear,
            uniform_scale,
        };
        if self.current.is_none() {
            self.subpath_start = Some(cmd.start_point());
        }
        self.current = Some(cmd.end_point());
        self.cmds.push(PathCmd::Arc(cmd));
        Ok(())
    }

    /// Close the current subpath with a segment back to its start.
    ///
    /// Without a current point this does nothing.
    pub fn close_path(&mut self) {
        let (Some(_), Some(start)) = (self.current, self.subpath_start) else {
            return;
        };
        self.cmds.push(PathCmd::LineTo(start));
        self.cmds.push(PathCmd::ClosePath);
        self.current = Some(start);
    }

    /// Closed axis-aligned (in local space) rectangle subpath.
    pub fn rect(&mut self, m: Affine, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(m, x, y);
        for (px, py) in [(x + w, y), (x + w, y + h), (x, y + h)] {
            let p = m * Point::new(px, py);
            self.cmds.push(PathCmd::LineTo(p));
            self.current = Some(p);
        }
        self.close_path();
    }

    /// Lower the recorded commands into a device-space [`BezPath`].
    ///
    /// Arcs become cubic segments within `tolerance` device units. The synthetic closing segment
    /// of `close_path` is folded into the `ClosePath` element.
    pub fn to_bezpath(&self, tolerance: f64) -> BezPath {
        let mut out = BezPath::new();
        let mut last: Option<Point> = None;
        let mut start: Option<Point> = None;
        let mut open = false;

        for (i, cmd) in self.cmds.iter().enumerate() {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    out.move_to(p);
                    open = true;
                    start = Some(p);
                    last = Some(p);
                }
                PathCmd::LineTo(p) => {
                    let closes = matches!(self.cmds.get(i + 1), Some(PathCmd::ClosePath))
                        && start == Some(p);
                    if let Some(from) = last {
                        reopen(&mut out, &mut open, &mut start, from);
                    }
                    if !closes {
                        out.line_to(p);
                    }
                    last = Some(p);
                }
                PathCmd::CubicTo(p1, p2, p3) => {
                    if let Some(from) = last {
                        reopen(&mut out, &mut open, &mut start, from);
                    }
                    out.curve_to(p1, p2, p3);
                    last = Some(p3);
                }
                PathCmd::Arc(arc) => {
                    let s = arc.start_point();
                    match last {
                        Some(from) => {
                            reopen(&mut out, &mut open, &mut start, from);
                            if from != s {
                                out.line_to(s);
                            }
                        }
                        None => {
                            out.move_to(s);
                            open = true;
                            start = Some(s);
                        }
                    }
                    arc.append_cubics(&mut out, tolerance);
                    last = Some(arc.end_point());
                }
                PathCmd::ClosePath => {
                    if open {
                        out.close_path();
                        open = false;
                    }
                    last = start;
                }
            }
        }
        out
    }

    fn require_current(&self) -> CanvasResult<()> {
        if self.current.is_none() {
            tracing::debug!("path command issued without a current point");
            return Err(CanvasError::NoCurrentPoint);
        }
        Ok(())
    }
}

// Restart a subpath at the current point after a `ClosePath`.
fn reopen(out: &mut BezPath, open: &mut bool, start: &mut Option<Point>, at: Point) {
    if !*open {
        out.move_to(at);
        *open = true;
        *start = Some(at);
    }
}

// Largest singular value of the linear part: the most a unit length can be stretched.
fn max_scale(m: Affine) -> f64 {
    let [a, b, c, d, _, _] = m.as_coeffs();
    let f2 = a * a + b * b + c * c + d * d;
    let det = a * d - b * c;
    let disc = (f2 * f2 - 4.0 * det * det).max(0.0);
    ((f2 + disc.sqrt()) / 2.0).sqrt()
}

fn is_uniform_scale(linear: Affine) -> bool {
    let [a, b, c, d, _, _] = linear.as_coeffs();
    let sx = a.hypot(b);
    let sy = c.hypot(d);
    let eps = 1e-9 * sx.max(sy).max(1.0);
    (sx - sy).abs() <= eps && (a * c + b * d).abs() <= eps * sx.max(sy).max(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/path.rs"]
mod tests;
