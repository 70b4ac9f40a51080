use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::pipeline::runner::NodeRunner;

const RED: Rgba8Premul = Rgba8Premul::new(255, 0, 0, 255);

fn small() -> BounceConfig {
    BounceConfig {
        width: 10.0,
        height: 10.0,
        speed: 5.0,
    }
}

#[test]
fn reflects_off_the_far_edges() {
    let mut node = BounceNode::new(small()).unwrap();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for _ in 0..8 {
        node.step(40.0, 30.0);
        xs.push(node.position().0);
        ys.push(node.position().1);
    }
    assert_eq!(xs, vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 30.0, 25.0]);
    assert_eq!(ys, vec![5.0, 10.0, 15.0, 20.0, 20.0, 15.0, 10.0, 5.0]);
}

#[test]
fn reflects_off_the_near_edges() {
    assert_eq!(reflect(-3.0, -1.0, 100.0), (0.0, 1.0));
    assert_eq!(reflect(50.0, -1.0, 100.0), (50.0, -1.0));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(BounceNode::new(BounceConfig { width: 0.0, ..small() }).is_err());
    assert!(BounceNode::new(BounceConfig { speed: f64::NAN, ..small() }).is_err());
}

#[test]
fn overlay_is_drawn_at_the_current_position_on_every_primary_frame() {
    let mut runner = NodeRunner::new(BounceNode::new(small()).unwrap()).unwrap();
    assert!(runner.push_frame(VideoFrame::filled(4, 4, 0.0, RED), OVERLAY_PAD).unwrap().is_empty());

    for i in 0..3 {
        let out = runner.push_frame(VideoFrame::new(40, 30, f64::from(i)), 0).unwrap();
        assert_eq!(out.len(), 1);
        let frame = &out[0];
        let p = 5 * (i + 1);
        assert_eq!(frame.pixel(p, p), Some(RED));
        assert_eq!(frame.pixel(p + 9, p + 9), Some(RED));
        assert_eq!(frame.pixel(p + 10, p), Some(Rgba8Premul::TRANSPARENT));
        assert_eq!(frame.pixel(p - 1, p), Some(Rgba8Premul::TRANSPARENT));
    }
}

#[test]
fn primary_frames_pass_through_until_an_overlay_arrives() {
    let mut runner = NodeRunner::new(BounceNode::new(small()).unwrap()).unwrap();
    let out = runner.push_frame(VideoFrame::new(40, 30, 0.0), 0).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out[0].pixels().all(|p| p == Rgba8Premul::TRANSPARENT));
}
