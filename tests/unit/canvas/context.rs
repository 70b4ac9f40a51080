use super::*;
use crate::canvas::path::PathCmd;
use crate::canvas::text::TextRunRecorder;
use crate::foundation::error::CanvasError;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn lit(frame: &VideoFrame, x: u32, y: u32) -> bool {
    frame.pixel(x, y).is_some_and(|p| p.a != 0)
}

fn covered(frame: &VideoFrame) -> usize {
    frame.pixels().filter(|p| p.a != 0).count()
}

fn center_dist(x: u32, y: u32, cx: f64, cy: f64) -> f64 {
    (f64::from(x) + 0.5 - cx).hypot(f64::from(y) + 0.5 - cy)
}

#[test]
fn filled_disk_covers_pixels_within_radius() {
    let mut frame = VideoFrame::new(32, 32, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_fill_color(Color::WHITE);
    ctx.arc(16.0, 16.0, 10.0, 0.0, TAU, false).unwrap();
    ctx.fill();
    drop(ctx);

    for y in 0..32 {
        for x in 0..32 {
            let d = center_dist(x, y, 16.0, 16.0);
            if d < 9.5 {
                assert!(lit(&frame, x, y), "({x},{y}) at {d} should be inside");
            }
            if d > 10.5 {
                assert!(!lit(&frame, x, y), "({x},{y}) at {d} should be outside");
            }
        }
    }
}

#[test]
fn stroked_circle_stays_inside_its_band() {
    let mut frame = VideoFrame::new(40, 40, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_stroke_color(Color::WHITE);
    ctx.set_line_width(4.0);
    ctx.arc(20.0, 20.0, 12.0, 0.0, TAU, true).unwrap();
    ctx.stroke();
    drop(ctx);

    assert!(covered(&frame) > 0);
    for y in 0..40 {
        for x in 0..40 {
            let d = center_dist(x, y, 20.0, 20.0);
            if d > 14.5 || d < 9.5 {
                assert!(!lit(&frame, x, y), "({x},{y}) at {d} is outside the ring");
            }
            if (d - 12.0).abs() < 1.5 {
                assert!(lit(&frame, x, y), "({x},{y}) at {d} is on the ring");
            }
        }
    }
}

#[test]
fn save_restore_round_trips_transform_and_style() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.translate(3.0, 4.0);
    ctx.set_line_width(7.0);
    let before = (ctx.transform(), ctx.style().clone());

    ctx.save();
    ctx.rotate(1.0);
    ctx.scale(2.0, 3.0);
    ctx.set_line_width(2.0);
    ctx.set_fill_style("red").unwrap();
    ctx.restore().unwrap();

    assert_eq!((ctx.transform(), ctx.style().clone()), before);
    assert_eq!(ctx.unbalanced_saves(), 0);
}

#[test]
fn restore_on_empty_stack_is_an_error_and_a_no_op() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.translate(1.0, 2.0);
    let before = ctx.transform();
    assert!(matches!(ctx.restore(), Err(CanvasError::StackUnderflow)));
    assert_eq!(ctx.transform(), before);
}

#[test]
fn unbalanced_saves_are_counted() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.save();
    ctx.save();
    ctx.restore().unwrap();
    assert_eq!(ctx.unbalanced_saves(), 1);
}

#[test]
fn points_are_captured_when_issued() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.move_to(10.0, 0.0);
    ctx.rotate(FRAC_PI_2);
    ctx.line_to(10.0, 0.0).unwrap();

    let cmds = ctx.path().commands();
    let PathCmd::MoveTo(a) = cmds[0] else {
        panic!("expected move");
    };
    let PathCmd::LineTo(b) = cmds[1] else {
        panic!("expected line");
    };
    assert_eq!(a, Point::new(10.0, 0.0));
    assert!((b.x - 0.0).abs() < 1e-9 && (b.y - 10.0).abs() < 1e-9);
}

#[test]
fn clock_hand_points_up_after_quarter_turn_back() {
    let mut frame = VideoFrame::new(40, 40, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.translate(20.0, 20.0);
    ctx.rotate(-FRAC_PI_2);
    ctx.set_line_width(2.0);
    ctx.set_stroke_color(Color::WHITE);
    ctx.move_to(0.0, 0.0);
    ctx.line_to(15.0, 0.0).unwrap();
    ctx.stroke();
    drop(ctx);

    assert!(lit(&frame, 20, 8));
    assert!(!lit(&frame, 20, 30));
    assert!(!lit(&frame, 32, 20));
}

#[test]
fn line_to_without_current_point_fails_and_keeps_path() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    assert!(matches!(ctx.line_to(1.0, 1.0), Err(CanvasError::NoCurrentPoint)));
    assert!(ctx.path().is_empty());
}

#[test]
fn negative_radius_is_rejected() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    assert!(matches!(
        ctx.arc(0.0, 0.0, -1.0, 0.0, PI, false),
        Err(CanvasError::Validation(_))
    ));
}

#[test]
fn non_uniform_scale_draws_an_ellipse_or_rejects() {
    let mut frame = VideoFrame::new(40, 40, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_fill_color(Color::WHITE);
    ctx.translate(20.0, 20.0);
    ctx.scale(2.0, 1.0);
    ctx.arc(0.0, 0.0, 8.0, 0.0, TAU, false).unwrap();
    ctx.fill();
    drop(ctx);
    assert!(lit(&frame, 35, 20));
    assert!(!lit(&frame, 20, 30));

    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame).with_arc_policy(ArcPolicy::Reject);
    ctx.scale(2.0, 1.0);
    assert!(matches!(
        ctx.arc(0.0, 0.0, 1.0, 0.0, PI, false),
        Err(CanvasError::UnsupportedTransform(_))
    ));
}

#[test]
fn line_width_scales_with_transform() {
    let mut thin = VideoFrame::new(40, 40, 0.0);
    let mut ctx = GraphicsContext::new(&mut thin);
    ctx.set_line_width(2.0);
    ctx.move_to(5.0, 20.0);
    ctx.line_to(35.0, 20.0).unwrap();
    ctx.stroke();
    drop(ctx);

    let mut thick = VideoFrame::new(40, 40, 0.0);
    let mut ctx = GraphicsContext::new(&mut thick);
    ctx.scale(2.0, 2.0);
    ctx.set_line_width(2.0);
    ctx.move_to(2.5, 10.0);
    ctx.line_to(17.5, 10.0).unwrap();
    ctx.stroke();
    drop(ctx);

    assert_eq!(covered(&thin), 60);
    assert_eq!(covered(&thick), 120);
}

#[test]
fn negative_line_width_is_ignored() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_line_width(3.0);
    ctx.set_line_width(-1.0);
    ctx.set_line_width(f64::NAN);
    assert_eq!(ctx.style().line_width, 3.0);
}

#[test]
fn global_alpha_scales_fill_paint() {
    let mut frame = VideoFrame::new(4, 4, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_fill_color(Color::WHITE);
    ctx.set_global_alpha(0.5);
    ctx.fill_rect(0.0, 0.0, 4.0, 4.0);
    ctx.set_global_alpha(7.0);
    assert_eq!(ctx.style().global_alpha, 1.0);
    drop(ctx);
    let px = frame.pixel(1, 1).unwrap();
    assert!((127..=128).contains(&px.a));
    assert_eq!(px.r, px.a);
}

#[test]
fn rect_helpers_do_not_touch_the_current_path() {
    let mut frame = VideoFrame::filled(10, 10, 0.0, Rgba8Premul::WHITE);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.move_to(1.0, 1.0);
    assert_eq!(ctx.clear_rect(2.0, 2.0, 3.0, 3.0), 9);
    ctx.set_stroke_color(Color::BLACK);
    ctx.stroke_rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(ctx.path().commands().len(), 1);
    drop(ctx);
    assert_eq!(frame.pixel(3, 3), Some(Rgba8Premul::TRANSPARENT));
    assert_eq!(frame.pixel(5, 5), Some(Rgba8Premul::WHITE));
}

#[test]
fn fill_keeps_the_path_and_begin_path_clears_it() {
    let mut frame = VideoFrame::new(8, 8, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.rect(0.0, 0.0, 4.0, 4.0);
    assert_eq!(ctx.fill(), 16);
    assert_eq!(ctx.fill(), 16);
    ctx.begin_path();
    assert_eq!(ctx.fill(), 0);
    assert!(ctx.path().current_point().is_none());
}

#[test]
fn ellipse_bezier_fills_its_box() {
    let mut frame = VideoFrame::new(40, 20, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_fill_color(Color::WHITE);
    ctx.ellipse_bezier(0.0, 0.0, 40.0, 20.0).unwrap();
    ctx.fill();
    drop(ctx);
    assert!(lit(&frame, 20, 10));
    assert!(lit(&frame, 1, 10));
    assert!(!lit(&frame, 0, 0));
    assert!(!lit(&frame, 39, 19));
}

#[test]
fn text_is_queued_without_a_renderer() {
    let mut frame = VideoFrame::new(8, 8, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.set_font("100px Arial").unwrap();
    ctx.translate(10.0, 0.0);
    ctx.stroke_text("PTS: 1", 600.0, 700.0).unwrap();
    let runs = ctx.take_text_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].origin, Point::new(610.0, 700.0));
    assert_eq!(runs[0].mode, TextMode::Stroke);
    assert_eq!(runs[0].font.size_px, 100.0);
    assert!(ctx.take_text_runs().is_empty());
}

#[test]
fn text_goes_to_the_attached_renderer() {
    let mut frame = VideoFrame::new(8, 8, 0.0);
    let mut recorder = TextRunRecorder::new();
    let mut ctx = GraphicsContext::new(&mut frame).with_text_renderer(&mut recorder);
    ctx.set_fill_color(Color::rgb(255, 0, 0));
    ctx.fill_text("hello", 1.0, 2.0).unwrap();
    assert!(ctx.take_text_runs().is_empty());
    drop(ctx);
    assert_eq!(recorder.runs().len(), 1);
    assert_eq!(recorder.runs()[0].color, Rgba8Premul::new(255, 0, 0, 255));
}

#[test]
fn draw_image_follows_the_transform() {
    let src = VideoFrame::filled(2, 2, 0.0, Rgba8Premul::WHITE);
    let mut frame = VideoFrame::new(16, 16, 0.0);
    let mut ctx = GraphicsContext::new(&mut frame);
    ctx.translate(4.0, 4.0);
    ctx.draw_image(&src, 0.0, 0.0, 8.0, 8.0);
    drop(ctx);
    assert_eq!(covered(&frame), 64);
    assert!(lit(&frame, 4, 4));
    assert!(!lit(&frame, 3, 4));
    assert!(lit(&frame, 11, 11));
    assert!(!lit(&frame, 12, 11));
}
