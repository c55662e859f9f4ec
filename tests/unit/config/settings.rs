use super::*;

const SETTINGS_JSON: &str = r#"{
    "width": 1920,
    "height": 1080,
    "fps": 60,
    "lane_scale": 1.0,
    "note_size": 0.8,
    "jacket_scale": 0.5,
    "note_width": 120.0,
    "lnl_scale": 0.9,
    "edge_color": [100, 255, 200, 160],
    "center_color": [200, 255, 240, 200],
    "line_color": [255, 255, 255, 255],
    "skip_note": 5,
    "position_length": 300,
    "flick_fps": 30,
    "lane_space_bottom": 100.0,
    "bottom": 900.0,
    "lane_skin_id": "1",
    "note_skin_id": "2",
    "music_jacket": "jacket.png",
    "jacket_position": [200.0, 150.0],
    "song_name": "Test Song",
    "name_position": [400.0, 100.0],
    "font_scale": 48.0,
    "font_path": "NotoSansJP-Bold.otf",
    "video_name": "out.mp4"
}"#;

fn parse() -> RenderSettings {
    RenderSettings::from_reader(SETTINGS_JSON.as_bytes()).unwrap()
}

#[test]
fn parses_and_applies_defaults() {
    let s = parse();
    assert_eq!(s.codec, "libx264");
    assert_eq!(s.assets_dir, PathBuf::from("assets"));
    assert_eq!(s.background_image, PathBuf::from("bgs.png"));
    assert_eq!(s.edge_color, Rgba8::new(100, 255, 200, 160));
    assert_eq!((s.width, s.height), (1920, 1080));
    assert_eq!(s.fps().unwrap().num, 60);
    s.validate().unwrap();
}

#[test]
fn validate_reports_every_violation() {
    let mut s = parse();
    s.width = 1921;
    s.flick_fps = 0;
    s.skip_note = 400;
    s.note_size = 0.0;
    let msg = s.validate().unwrap_err().to_string();
    assert!(msg.starts_with("configuration error:"));
    assert!(msg.contains("$.width"));
    assert!(msg.contains("$.flick_fps"));
    assert!(msg.contains("$.skip_note"));
    assert!(msg.contains("$.note_size"));
}

#[test]
fn output_path_prefixes_session_id() {
    let s = parse();
    assert_eq!(s.output_path(3), PathBuf::from("video").join("3th out.mp4"));
    assert_eq!(s.asset_path("common.json"), PathBuf::from("assets/common.json"));
}

#[test]
fn malformed_json_is_configuration_error() {
    let err = RenderSettings::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, ChartreelError::Configuration(_)));
}
