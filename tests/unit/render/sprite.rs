use super::*;
use crate::test_fixtures;

#[test]
fn keys_follow_kind_and_zero_based_skin_index() {
    assert_eq!(sprite_key(PointKind::Single, 2), "note_normal_1.png");
    assert_eq!(sprite_key(PointKind::SingleOff, 1), "note_normal_gray_0.png");
    assert_eq!(sprite_key(PointKind::Long, 4), "note_long_3.png");
    assert_eq!(sprite_key(PointKind::Skill, 7), "note_skill_6.png");
    assert_eq!(sprite_key(PointKind::Flick, 3), "note_flick_2.png");
    assert_eq!(sprite_key(PointKind::Tick, 1), TICK_SPRITE);
    assert_eq!(sprite_key(PointKind::Tick, 6), TICK_SPRITE);
}

#[test]
fn zero_area_resize_yields_placeholder() {
    let src = test_fixtures::solid(4, 4, [255, 0, 0, 255]);
    let p = scale_sprite(&src, 0.1).unwrap();
    assert_eq!(p, placeholder());
    assert_eq!((p.width, p.height), (1, 1));
    assert_eq!(p.pixel(0, 0).unwrap(), [0, 0, 0, 0]);

    assert_eq!(resize_or_placeholder(&src, 0, 9).unwrap(), placeholder());
    assert_eq!(resize_or_placeholder(&src, 9, 0).unwrap(), placeholder());
    assert_eq!(scale_sprite(&src, -2.0).unwrap(), placeholder());
}

#[test]
fn unit_scale_keeps_the_region() {
    let src = test_fixtures::solid(4, 4, [255, 0, 0, 255]);
    assert_eq!(scale_sprite(&src, 1.0).unwrap(), src);
    let half = scale_sprite(&src, 0.5).unwrap();
    assert_eq!((half.width, half.height), (2, 2));
}

#[test]
fn flick_offset_is_a_sawtooth_with_period_flick_fps() {
    assert_eq!(flick_offset(0, 30, 100.0), 10.0);
    assert_eq!(flick_offset(30, 30, 100.0), 10.0);
    assert_eq!(flick_offset(15, 30, 100.0), 25.0);
    for f in 0..90 {
        assert_eq!(flick_offset(f, 30, 100.0), flick_offset(f + 30, 30, 100.0));
    }
    assert!(flick_offset(29, 30, 100.0) > flick_offset(28, 30, 100.0));
    assert_eq!(flick_offset(-1, 30, 100.0), flick_offset(29, 30, 100.0));
}

#[test]
fn selector_scales_point_and_sim_sprites() {
    let settings = test_fixtures::settings();
    let atlas = test_fixtures::atlas();
    let sel = SpriteSelector::new(&atlas, &settings);

    let s = sel.point_sprite(PointKind::Single, 2, 1.0).unwrap();
    assert_eq!((s.width, s.height), (4, 4));
    let s = sel.point_sprite(PointKind::Tick, 5, 0.5).unwrap();
    assert_eq!((s.width, s.height), (1, 1));

    let sim = SimGeometry {
        x1: 30.0,
        x2: 10.0,
        y: 5.0,
        scale: 1.0,
    };
    let s = sel.sim_sprite(&sim).unwrap();
    assert_eq!((s.width, s.height), (20, 2));

    let same_lane = SimGeometry { x2: 30.0, ..sim };
    assert_eq!(sel.sim_sprite(&same_lane).unwrap(), placeholder());
}

#[test]
fn selector_reports_missing_sprites() {
    let settings = test_fixtures::settings();
    let atlas = test_fixtures::atlas();
    let sel = SpriteSelector::new(&atlas, &settings);
    assert!(sel.point_sprite(PointKind::Single, 0, 1.0).is_err());
}

#[test]
fn flick_indicator_rises_above_the_note() {
    let settings = test_fixtures::settings();
    let atlas = test_fixtures::atlas();
    let sel = SpriteSelector::new(&atlas, &settings);
    let note = PointGeometry {
        pos: Point::new(20.0, 30.0),
        scale: 1.0,
    };
    // note width on screen = 1.0 * 10 * 1.0; phase 2 of 4.
    let (sprite, center) = sel.flick_indicator(6, &note).unwrap();
    assert_eq!((sprite.width, sprite.height), (2, 2));
    assert_eq!(center, Point::new(20.0, 30.0 - (1.0 + 2.0 * 3.0 / 4.0)));
}
