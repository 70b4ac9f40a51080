//! Scanline rasterization of device-space paths.
//!
//! Coverage is binary: a pixel is inside when its center is inside the path under the nonzero
//! winding rule. There is no anti-aliasing, which keeps output exact and reproducible.

use crate::effects::composite::blend_at;
use crate::foundation::core::{BezPath, Point, Rgba8Premul};
use crate::render::frame::VideoFrame;
use kurbo::{PathEl, Stroke, StrokeOpts};

/// Maximum distance in device pixels between a curve and its flattened polyline.
pub const FLATTEN_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    dir: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y || !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let (top, bottom, dir) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        Some(Self {
            x0: top.x,
            y0: top.y,
            x1: bottom.x,
            y1: bottom.y,
            dir,
        })
    }

    fn x_at(&self, y: f64) -> f64 {
        let t = (y - self.y0) / (self.y1 - self.y0);
        self.x0 + t * (self.x1 - self.x0)
    }
}

fn close(edges: &mut Vec<Edge>, start: Option<Point>, last: Option<Point>) {
    if let (Some(s), Some(l)) = (start, last) {
        edges.extend(Edge::new(l, s));
    }
}

/// Flatten `path` into edges, closing every subpath.
fn build_edges(path: &BezPath, tolerance: f64) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;

    kurbo::flatten(path.elements().iter().copied(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            close(&mut edges, start, last);
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(l) = last {
                edges.extend(Edge::new(l, p));
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            close(&mut edges, start, last);
            last = start;
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    close(&mut edges, start, last);
    edges
}

/// Visit every horizontal run of covered pixels as `(y, x_start, x_end)` with `x_end` exclusive.
fn for_each_span(mut edges: Vec<Edge>, width: u32, height: u32, mut span: impl FnMut(u32, u32, u32)) {
    if edges.is_empty() || width == 0 || height == 0 {
        return;
    }
    edges.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let y_min = edges[0].y0;
    let y_max = edges.iter().map(|e| e.y1).fold(f64::NEG_INFINITY, f64::max);
    let row_start = (y_min - 0.5).ceil().clamp(0.0, f64::from(height)) as u32;
    let row_end = (y_max - 0.5).ceil().clamp(0.0, f64::from(height)) as u32;

    let mut next = 0usize;
    let mut active: Vec<usize> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for y in row_start..row_end {
        let yc = f64::from(y) + 0.5;
        while next < edges.len() && edges[next].y0 <= yc {
            active.push(next);
            next += 1;
        }
        active.retain(|&i| edges[i].y1 > yc);

        crossings.clear();
        crossings.extend(
            active
                .iter()
                .map(|&i| (edges[i].x_at(yc), edges[i].dir)),
        );
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        for i in 0..crossings.len() {
            winding += crossings[i].1;
            if winding == 0 {
                continue;
            }
            let Some(&(x_next, _)) = crossings.get(i + 1) else {
                break;
            };
            let x0 = (crossings[i].0 - 0.5).ceil().clamp(0.0, f64::from(width)) as u32;
            let x1 = (x_next - 0.5).ceil().clamp(0.0, f64::from(width)) as u32;
            if x0 < x1 {
                span(y, x0, x1);
            }
        }
    }
}

/// Blend `color` into every pixel inside `path` (nonzero winding, open subpaths auto-closed).
///
/// Returns the number of pixels touched.
pub fn fill_path(frame: &mut VideoFrame, path: &BezPath, color: Rgba8Premul) -> usize {
    let edges = build_edges(path, FLATTEN_TOLERANCE);
    let width = frame.width as usize;
    let mut touched = 0usize;
    let (w, h) = (frame.width, frame.height);
    for_each_span(edges, w, h, |y, x0, x1| {
        let row = (y as usize) * width;
        for x in x0..x1 {
            if color.a != 0 {
                blend_at(frame, row + x as usize, color);
            }
        }
        touched += (x1 - x0) as usize;
    });
    touched
}

/// Overwrite every pixel inside `path` with `px`, ignoring what was there.
pub fn replace_path(frame: &mut VideoFrame, path: &BezPath, px: Rgba8Premul) -> usize {
    let edges = build_edges(path, FLATTEN_TOLERANCE);
    let width = frame.width as usize;
    let mut touched = 0usize;
    let (w, h) = (frame.width, frame.height);
    for_each_span(edges, w, h, |y, x0, x1| {
        let row = (y as usize) * width;
        for x in x0..x1 {
            frame.set_pixel_at(row + x as usize, px);
        }
        touched += (x1 - x0) as usize;
    });
    touched
}

/// Expand `path` into its stroke outline.
pub fn stroke_outline(path: &BezPath, style: &Stroke) -> BezPath {
    kurbo::stroke(
        path.elements().iter().copied(),
        style,
        &StrokeOpts::default(),
        FLATTEN_TOLERANCE,
    )
}

/// Stroke `path` with `style` and blend `color` into the covered pixels.
///
/// Returns the number of pixels touched; a zero or non-finite width draws nothing.
pub fn stroke_path(
    frame: &mut VideoFrame,
    path: &BezPath,
    style: &Stroke,
    color: Rgba8Premul,
) -> usize {
    if !(style.width.is_finite() && style.width > 0.0) {
        return 0;
    }
    let outline = stroke_outline(path, style);
    fill_path(frame, &outline, color)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
