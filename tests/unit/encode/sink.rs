use super::*;

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());

    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        codec: "libx264".to_owned(),
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(FrameIndex(0), &Raster::new(2, 2)).unwrap();
    sink.push_frame(FrameIndex(1), &Raster::filled(2, 2, [1, 2, 3, 255]))
        .unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(&cfg));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].1.pixel(1, 1), Some([1, 2, 3, 255]));
    assert!(sink.is_ended());
}

#[test]
fn discard_drops_captured_frames() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        codec: "libx264".to_owned(),
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &Raster::new(2, 2)).unwrap();
    sink.end().unwrap();
    sink.discard().unwrap();
    assert!(sink.frames().is_empty());
}

#[test]
fn begin_resets_previous_capture() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        codec: "libx264".to_owned(),
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(FrameIndex(0), &Raster::new(2, 2)).unwrap();
    sink.end().unwrap();

    sink.begin(cfg).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}
