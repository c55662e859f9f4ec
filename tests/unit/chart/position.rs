use super::*;

fn table(len: usize) -> PositionTable {
    let samples = (0..len)
        .map(|i| PositionSample {
            x: (0..7).map(|lane| 100.0 * lane as f64 + i as f64).collect(),
            y: i as i32 * 2,
            r: 0.5 + i as f64 / len as f64,
        })
        .collect();
    PositionTable::new(samples).unwrap()
}

#[test]
fn every_scale_is_positive() {
    let t = table(301);
    for f in 0..=300 {
        assert!(t.sample(f).unwrap().r > 0.0);
    }
}

#[test]
fn rejects_non_positive_scale() {
    let err = PositionTable::new(vec![PositionSample {
        x: vec![0.0],
        y: 0,
        r: 0.0,
    }])
    .unwrap_err();
    assert!(matches!(err, ChartreelError::Configuration(_)));
    assert!(err.to_string().contains("$[0].r"));
}

#[test]
fn rejects_empty_table() {
    assert!(PositionTable::new(Vec::new()).is_err());
}

#[test]
fn out_of_range_lookups_are_geometry_errors() {
    let t = table(11);
    assert!(matches!(t.sample(-1), Err(ChartreelError::Geometry(_))));
    assert!(matches!(t.sample(11), Err(ChartreelError::Geometry(_))));
    assert!(matches!(t.lane_x(3, 7), Err(ChartreelError::Geometry(_))));
    assert_eq!(t.lane_x(3, 2).unwrap(), 203.0);
}

#[test]
fn ensure_covers_checks_position_length() {
    let t = table(11);
    assert_eq!(t.last_step(), 10);
    t.ensure_covers(10).unwrap();
    assert!(t.ensure_covers(11).is_err());
}

#[test]
fn parses_json_array() {
    let json = r#"[{"x": [0.0, 10.0], "y": 5, "r": 1.0}, {"x": [1.0, 11.0], "y": 6, "r": 1.5}]"#;
    let t = PositionTable::from_reader(json.as_bytes()).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.sample(1).unwrap().y, 6);
}
