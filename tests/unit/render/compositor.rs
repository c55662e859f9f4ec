use super::*;
use crate::test_fixtures;

const BG: [u8; 4] = [10, 10, 10, 255];

fn render(notes: Vec<NoteRecord>) -> ChartreelResult<Raster> {
    let settings = test_fixtures::settings();
    let table = test_fixtures::table(&settings);
    let atlas = test_fixtures::atlas();
    let background = Raster::filled(settings.width, settings.height, BG);
    FrameCompositor::new(&settings, &table, &atlas, &background).render_bucket(&FrameBucket(notes))
}

#[test]
fn single_note_is_pasted_centered_on_its_lane() {
    let frame = render(vec![NoteRecord::point(PointKind::Single, 10, 2)]).unwrap();

    let mut expected = Raster::filled(64, 48, BG);
    expected.draw_over(&test_fixtures::solid(4, 4, [255, 0, 0, 255]), 18, 18);
    assert_eq!(frame, expected);
}

#[test]
fn empty_bucket_is_the_background() {
    let frame = render(Vec::new()).unwrap();
    assert_eq!(frame, Raster::filled(64, 48, BG));
}

#[test]
fn later_notes_occlude_earlier_ones() {
    let frame = render(vec![
        NoteRecord::point(PointKind::Single, 10, 2),
        NoteRecord::point(PointKind::Long, 10, 2),
    ])
    .unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap(), [0, 255, 0, 255]);

    let frame = render(vec![
        NoteRecord::point(PointKind::Long, 10, 2),
        NoteRecord::point(PointKind::Single, 10, 2),
    ])
    .unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap(), [255, 0, 0, 255]);
}

#[test]
fn flick_draws_indicator_above_the_note() {
    let frame = render(vec![NoteRecord::point(PointKind::Flick, 8, 3)]).unwrap();
    // Note at (28, 16); indicator lifted by 0.1 * 10 = 1 px at phase 0, 2x2 sprite.
    assert_eq!(frame.pixel(28, 16).unwrap(), [255, 128, 0, 255]);
    assert_eq!(frame.pixel(27, 14).unwrap(), [0, 255, 255, 255]);
}

#[test]
fn sim_link_is_centered_between_lanes() {
    let frame = render(vec![NoteRecord::Sim {
        frame: 5,
        lanes: [1, 3],
    }])
    .unwrap();
    // Lanes at x = 12 and 28, y = 10: a 16x2 link anchored at (12, 9).
    assert_eq!(frame.pixel(12, 9).unwrap(), [255, 255, 0, 255]);
    assert_eq!(frame.pixel(27, 10).unwrap(), [255, 255, 0, 255]);
    assert_eq!(frame.pixel(11, 9).unwrap(), BG);
    assert_eq!(frame.pixel(28, 9).unwrap(), BG);
}

#[test]
fn bar_on_hit_line_gets_terminal_sprite() {
    let frame = render(vec![NoteRecord::Bar {
        bottom_frame: 20,
        top_frame: 10,
        bottom_lane: 1,
        top_lane: 1,
    }])
    .unwrap();
    // Connector fill at its midpoint row (y = 30) is the center color.
    assert_eq!(frame.pixel(12, 30).unwrap(), [0, 255, 0, 255]);
    // Terminal hold sprite (lane 4 skin) centered on the near end (12, 40).
    assert_eq!(frame.pixel(12, 40).unwrap(), [0, 255, 0, 255]);
    assert_eq!(frame.pixel(10, 38).unwrap(), [0, 255, 0, 255]);
}

#[test]
fn bar_inside_window_has_no_terminal_sprite() {
    let frame = render(vec![NoteRecord::Bar {
        bottom_frame: 15,
        top_frame: 5,
        bottom_lane: 1,
        top_lane: 1,
    }])
    .unwrap();
    assert_eq!(frame.pixel(12, 31).unwrap(), BG);
}

#[test]
fn unresolvable_note_aborts_the_frame() {
    let err = render(vec![
        NoteRecord::point(PointKind::Single, 10, 2),
        NoteRecord::point(PointKind::Single, 99, 2),
    ])
    .unwrap_err();
    assert!(matches!(err, crate::ChartreelError::Geometry(_)));
}
