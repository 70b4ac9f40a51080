use super::*;

#[test]
fn new_frame_is_transparent() {
    let f = VideoFrame::new(3, 2, 0.5);
    assert_eq!(f.data.len(), 24);
    assert!(f.pixels().all(|p| p == Rgba8Premul::TRANSPARENT));
    assert_eq!(f.pts, 0.5);
}

#[test]
fn xy_and_linear_access_agree() {
    let mut f = VideoFrame::new(4, 3, 0.0);
    let red = Rgba8Premul::new(255, 0, 0, 255);
    assert!(f.set_pixel(2, 1, red));
    assert_eq!(f.offset_of(2, 1), Some(6));
    assert_eq!(f.pixel_at(6), Some(red));
    assert_eq!(f.pixel(2, 1), Some(red));
    assert_eq!(&f.data[24..28], &[255, 0, 0, 255]);
}

#[test]
fn out_of_bounds_access_is_rejected() {
    let mut f = VideoFrame::new(2, 2, 0.0);
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel_at(4), None);
    assert!(!f.set_pixel(0, 2, Rgba8Premul::WHITE));
    assert!(!f.set_pixel_at(10, Rgba8Premul::WHITE));
}

#[test]
fn huge_linear_offsets_are_rejected_without_wrapping() {
    let mut f = VideoFrame::filled(2, 2, 0.0, Rgba8Premul::BLACK);
    for i in [usize::MAX / 4 + 1, usize::MAX] {
        assert_eq!(f.pixel_at(i), None);
        assert!(!f.set_pixel_at(i, Rgba8Premul::WHITE));
    }
    assert!(f.pixels().all(|p| p == Rgba8Premul::BLACK));
}

#[test]
fn from_data_validates_length() {
    assert!(VideoFrame::from_data(2, 2, 0.0, vec![0; 16]).is_ok());
    assert!(VideoFrame::from_data(2, 2, 0.0, vec![0; 15]).is_err());
}

#[test]
fn fingerprint_tracks_content_not_pts() {
    let a = VideoFrame::filled(4, 4, 0.0, Rgba8Premul::WHITE);
    let b = VideoFrame::filled(4, 4, 9.0, Rgba8Premul::WHITE);
    let c = VideoFrame::filled(4, 4, 0.0, Rgba8Premul::BLACK);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}
