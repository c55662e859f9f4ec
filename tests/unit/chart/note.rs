use super::*;

#[test]
fn parses_every_note_shape() {
    let json = r#"[[
        {"type": "Bar", "frame": [350, -10], "lane": [1, 3]},
        {"type": "Sim", "frame": 12, "lane": [2, 5]},
        {"type": "Single", "frame": 10, "lane": 2},
        {"type": "SingleOff", "frame": 10, "lane": 3},
        {"type": "Flick", "frame": 11, "lane": 4},
        {"type": "Long", "frame": 11, "lane": 1},
        {"type": "Skill", "frame": 9, "lane": 6},
        {"type": "Tick", "frame": 9, "lane": 6}
    ], []]"#;
    let chart = Chart::from_reader(json.as_bytes()).unwrap();
    assert_eq!(chart.buckets().len(), 2);
    assert!(chart.buckets()[1].notes().is_empty());

    let notes = chart.buckets()[0].notes();
    assert_eq!(
        notes[0],
        NoteRecord::Bar {
            bottom_frame: 350,
            top_frame: -10,
            bottom_lane: 1,
            top_lane: 3,
        }
    );
    assert_eq!(
        notes[1],
        NoteRecord::Sim {
            frame: 12,
            lanes: [2, 5],
        }
    );
    assert_eq!(notes[2], NoteRecord::point(PointKind::Single, 10, 2));
    assert_eq!(notes[4], NoteRecord::point(PointKind::Flick, 11, 4));
    assert_eq!(notes[7], NoteRecord::point(PointKind::Tick, 9, 6));
    assert_eq!(notes[3], NoteRecord::point(PointKind::SingleOff, 10, 3));
}

#[test]
fn unknown_note_type_is_rejected() {
    let json = r#"[[{"type": "Bpm", "frame": 1, "lane": 1}]]"#;
    let err = Chart::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ChartreelError::Configuration(_)));
}

#[test]
fn serializes_back_to_wire_form() {
    let note = NoteRecord::Bar {
        bottom_frame: 20,
        top_frame: 4,
        bottom_lane: 0,
        top_lane: 2,
    };
    let v = serde_json::to_value(&note).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"type": "Bar", "frame": [20, 4], "lane": [0, 2]})
    );
}

#[test]
fn segments_are_contiguous_and_cover_all_buckets() {
    let buckets = (0..10)
        .map(|i| FrameBucket(vec![NoteRecord::point(PointKind::Single, i, 1)]))
        .collect();
    let chart = Chart::new(buckets);

    let segs = chart.segments(3);
    assert_eq!(
        segs.iter().map(|s| s.len()).collect::<Vec<_>>(),
        vec![4, 3, 3]
    );
    let flat: Vec<&FrameBucket> = segs.iter().flat_map(|s| s.iter()).collect();
    assert_eq!(flat.len(), 10);
    assert_eq!(flat[4], &chart.buckets()[4]);

    assert_eq!(chart.segments(0).len(), 1);
    assert_eq!(chart.segments(50).len(), 10);
    assert!(Chart::default().segments(4).is_empty());
}
