use super::*;
use crate::assets::decode::load_frame_png;
use crate::foundation::core::{Fps, Rgba8Premul};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "framecanvas_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 3,
        height: 2,
        fps: Fps::new(25, 1).unwrap(),
    }
}

#[test]
fn file_names_are_zero_padded() {
    assert_eq!(PngSequenceSink::file_name(7), "frame_00007.png");
    assert_eq!(PngSequenceSink::file_name(123456), "frame_123456.png");
}

#[test]
fn writes_a_numbered_sequence_that_decodes_back() {
    let dir = temp_dir("png_sink");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();

    let mut frame = VideoFrame::new(3, 2, 0.0);
    frame.set_pixel(1, 1, Rgba8Premul::from_straight_rgba(200, 100, 50, 255));
    frame.set_pixel(2, 0, Rgba8Premul::from_straight_rgba(255, 255, 255, 128));
    sink.push_frame(0, &frame).unwrap();
    sink.push_frame(1, &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("frame_00000.png").exists());
    assert!(dir.join("frame_00001.png").exists());

    let back = load_frame_png(&dir.join("frame_00001.png"), 0.0).unwrap();
    assert_eq!(back.pixel(1, 1), frame.pixel(1, 1));
    assert_eq!(back.pixel(0, 0), Some(Rgba8Premul::TRANSPARENT));
    assert_eq!(back.pixel(2, 0).map(|p| p.a), Some(128));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn push_before_begin_fails() {
    let mut sink = PngSequenceSink::new(temp_dir("png_sink_unstarted"));
    assert!(sink.push_frame(0, &VideoFrame::new(1, 1, 0.0)).is_err());
}
