use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::pipeline::runner::NodeRunner;

const RED: Rgba8Premul = Rgba8Premul::new(255, 0, 0, 255);

#[test]
fn second_hand_points_up_at_zero_and_right_at_fifteen() {
    let dial = render_dial(400, 0.0).unwrap();
    assert_eq!(dial.pixel(200, 140), Some(RED));
    assert_ne!(dial.pixel(260, 200), Some(RED));

    let dial = render_dial(400, 15.0).unwrap();
    assert_eq!(dial.pixel(260, 200), Some(RED));
    assert_ne!(dial.pixel(200, 140), Some(RED));
}

#[test]
fn hour_marks_and_bezel_are_drawn() {
    let dial = render_dial(400, 0.0).unwrap();
    assert_eq!(dial.pixel(200, 90), Some(Rgba8Premul::WHITE));
    assert_eq!(dial.pixel(342, 200), Some(Rgba8Premul::new(0x32, 0x5f, 0xa2, 255)));
    assert_eq!(dial.pixel(0, 0), Some(Rgba8Premul::TRANSPARENT));
}

#[test]
fn hands_are_stroked_white_over_a_dark_panel() {
    let dial = render_dial(400, 15.0).unwrap();
    assert_eq!(dial.pixel(200, 120), Some(Rgba8Premul::WHITE));
}

#[test]
fn dial_scales_with_its_size() {
    let dial = render_dial(200, 0.0).unwrap();
    assert_eq!(dial.pixel(100, 70), Some(RED));
    assert_eq!(dial.pixel(171, 100), Some(Rgba8Premul::new(0x32, 0x5f, 0xa2, 255)));
}

#[test]
fn rendering_is_deterministic() {
    let a = render_dial(400, 12.25).unwrap();
    let b = render_dial(400, 12.25).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), render_dial(400, 13.0).unwrap().fingerprint());
}

#[test]
fn zero_sized_dial_is_rejected() {
    assert!(render_dial(0, 0.0).is_err());
}

#[test]
fn node_composites_panel_dial_and_label() {
    let mut runner = NodeRunner::new(ClockNode::new(ClockConfig::default())).unwrap();
    let input = VideoFrame::filled(1280, 720, 1.5, Rgba8Premul::WHITE);
    let out = runner.push_frame(input, 0).unwrap();
    assert_eq!(out.len(), 1);
    let frame = &out[0];
    assert_eq!(frame.pts, 1.5);

    let panel = frame.pixel(1000, 500).unwrap();
    assert_eq!(panel.a, 255);
    assert!((126..=128).contains(&panel.r));
    assert_eq!(frame.pixel(10, 10), Some(Rgba8Premul::WHITE));
    assert_eq!(frame.pixel(647, 420), Some(Rgba8Premul::new(0x32, 0x5f, 0xa2, 255)));

    let runs = runner.node().text().last_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "PTS: 1.5");
    assert_eq!(runs[0].font.size_px, 100.0);
}
