use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::frame::{VideoFrame, byte_range};

/// Source-over blend of premultiplied pixels with an extra opacity factor.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: f32) -> Rgba8Premul {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src.a == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src.a), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);
    let channel = |s: u8, d: u8| add_sat_u8(mul_div255(u16::from(s), op), mul_div255(u16::from(d), inv));

    Rgba8Premul {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: add_sat_u8(sa, mul_div255(u16::from(dst.a), inv)),
    }
}

/// Blend `src` over the pixel at linear offset `i` of `frame`.
pub(crate) fn blend_at(frame: &mut VideoFrame, i: usize, src: Rgba8Premul) {
    let Some(dst) = byte_range(i).and_then(|r| frame.data.get_mut(r)) else {
        return;
    };
    let out = over(Rgba8Premul::new(dst[0], dst[1], dst[2], dst[3]), src, 1.0);
    dst.copy_from_slice(&out.to_array());
}

/// Blend `src` over every pixel of `dst` (equal-sized frames).
pub fn over_in_place(dst: &mut VideoFrame, src: &VideoFrame, opacity: f32) -> CanvasResult<()> {
    if dst.width != src.width || dst.height != src.height {
        return Err(CanvasError::validation(
            "over_in_place expects equal-sized frames",
        ));
    }
    for (d, s) in dst.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
        let out = over(
            Rgba8Premul::new(d[0], d[1], d[2], d[3]),
            Rgba8Premul::new(s[0], s[1], s[2], s[3]),
            opacity,
        );
        d.copy_from_slice(&out.to_array());
    }
    Ok(())
}

/// Draw `src` into `dst`, scaled to the destination rectangle `dest`.
///
/// Sampling is nearest-neighbor at destination pixel centers, so output is exact and
/// reproducible. Pixels outside `dst` are clipped; an empty or non-finite rectangle draws nothing.
pub fn draw_image(dst: &mut VideoFrame, src: &VideoFrame, dest: Rect, opacity: f32) {
    if src.width == 0 || src.height == 0 || opacity <= 0.0 {
        return;
    }
    let dest = dest.abs();
    let (w, h) = (dest.width(), dest.height());
    if !(w.is_finite() && h.is_finite() && dest.x0.is_finite() && dest.y0.is_finite())
        || w <= 0.0
        || h <= 0.0
    {
        return;
    }

    let x_start = clamp_px(dest.x0.round(), dst.width);
    let x_end = clamp_px(dest.x1.round(), dst.width);
    let y_start = clamp_px(dest.y0.round(), dst.height);
    let y_end = clamp_px(dest.y1.round(), dst.height);

    let sx_scale = f64::from(src.width) / w;
    let sy_scale = f64::from(src.height) / h;

    for y in y_start..y_end {
        let sy = (((f64::from(y) + 0.5) - dest.y0) * sy_scale).floor();
        let sy = sy.clamp(0.0, f64::from(src.height - 1)) as u32;
        for x in x_start..x_end {
            let sx = (((f64::from(x) + 0.5) - dest.x0) * sx_scale).floor();
            let sx = sx.clamp(0.0, f64::from(src.width - 1)) as u32;

            let Some(s) = src.pixel(sx, sy) else {
                continue;
            };
            let i = (y as usize) * (dst.width as usize) + (x as usize);
            let Some(d) = dst.pixel_at(i) else {
                continue;
            };
            dst.set_pixel_at(i, over(d, s, opacity));
        }
    }
}

fn clamp_px(v: f64, max: u32) -> u32 {
    v.clamp(0.0, f64::from(max)) as u32
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
