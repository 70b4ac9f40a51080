use super::*;

fn quadrant(frame: &VideoFrame, qx: u32, qy: u32, qw: u32, qh: u32) -> Vec<Rgba8Premul> {
    let mut out = Vec::new();
    for y in 0..qh {
        for x in 0..qw {
            out.push(frame.pixel(qx * qw + x, qy * qh + y).unwrap());
        }
    }
    out
}

#[test]
fn white_4x4_into_8x8_routes_channels_to_quadrants() {
    let src = VideoFrame::filled(4, 4, 0.0, Rgba8Premul::WHITE);
    let mut dst = VideoFrame::new(8, 8, 0.0);
    quadrant_remap_into(&src, &mut dst).unwrap();

    let raw = quadrant(&dst, 0, 0, 4, 4);
    assert_eq!(raw, src.pixels().collect::<Vec<_>>());
    assert!(
        quadrant(&dst, 1, 0, 4, 4)
            .iter()
            .all(|p| *p == Rgba8Premul::new(255, 0, 0, 255))
    );
    assert!(
        quadrant(&dst, 0, 1, 4, 4)
            .iter()
            .all(|p| *p == Rgba8Premul::new(0, 255, 0, 255))
    );
    assert!(
        quadrant(&dst, 1, 1, 4, 4)
            .iter()
            .all(|p| *p == Rgba8Premul::new(0, 0, 255, 255))
    );
}

#[test]
fn same_size_remap_samples_every_other_pixel() {
    let mut src = VideoFrame::new(4, 4, 3.0);
    for y in 0..4 {
        for x in 0..4 {
            src.set_pixel(x, y, Rgba8Premul::new((x * 10) as u8, (y * 10) as u8, 7, 255));
        }
    }
    let out = quadrant_remap(&src).unwrap();
    assert_eq!(out.pts, 3.0);
    assert_eq!(out.pixel(1, 1), src.pixel(2, 2));
    assert_eq!(out.pixel(3, 0), Some(Rgba8Premul::new(20, 0, 0, 255)));
    assert_eq!(out.pixel(0, 3), Some(Rgba8Premul::new(0, 20, 0, 255)));
    assert_eq!(out.pixel(3, 3), Some(Rgba8Premul::new(0, 0, 7, 255)));
}

#[test]
fn structured_masks_match_packed_literals() {
    let px = Rgba8Premul::new(0x12, 0x34, 0x56, 0xff);
    let literals = [0xffff_ffffu32, 0xff00_00ff, 0xff00_ff00, 0xffff_0000];
    for (mask, lit) in QUADRANT_MASKS.iter().zip(literals) {
        assert_eq!(px.masked(*mask).to_packed(), px.to_packed() & lit);
    }
}

#[test]
fn mask_channels_is_per_pixel() {
    let mut f = VideoFrame::filled(2, 1, 0.0, Rgba8Premul::new(1, 2, 3, 4));
    mask_channels(&mut f, ChannelMask::GREEN);
    assert!(f.pixels().all(|p| p == Rgba8Premul::new(0, 2, 0, 4)));
}

#[test]
fn tiny_destination_is_rejected() {
    let src = VideoFrame::new(4, 4, 0.0);
    let mut dst = VideoFrame::new(1, 8, 0.0);
    assert!(quadrant_remap_into(&src, &mut dst).is_err());
}
