use super::*;
use crate::test_fixtures;

const BLUE: [u8; 4] = [0, 0, 200, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const GRAY: [u8; 4] = [90, 90, 90, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn atlas() -> SpriteAtlas {
    SpriteAtlas::from_regions([
        (HIT_LINE_SPRITE.to_owned(), test_fixtures::solid(8, 2, WHITE)),
        (RHYTHM_LINE_SPRITE.to_owned(), test_fixtures::solid(8, 4, GRAY)),
    ])
}

#[test]
fn assembles_layers_in_order() {
    let settings = test_fixtures::settings();
    let base = test_fixtures::solid(2, 2, BLUE);
    let jacket = test_fixtures::solid(4, 4, RED);
    let bg = assemble_background(base, &settings, &atlas(), &jacket, None).unwrap();

    assert_eq!((bg.width, bg.height), (64, 48));
    assert_eq!(bg.pixel(0, 47).unwrap(), BLUE);
    // Hit line centered on (32, 40).
    assert_eq!(bg.pixel(30, 40).unwrap(), WHITE);
    // Rhythm guide rests on the hit line and is drawn over it.
    assert_eq!(bg.pixel(30, 36).unwrap(), GRAY);
    assert_eq!(bg.pixel(30, 39).unwrap(), GRAY);
    assert_eq!(bg.pixel(30, 35).unwrap(), BLUE);
    // Jacket centered on (8, 8).
    assert_eq!(bg.pixel(6, 6).unwrap(), RED);
    assert_eq!(bg.pixel(10, 10).unwrap(), BLUE);
}

#[test]
fn title_layer_is_composited_and_result_is_opaque() {
    let settings = test_fixtures::settings();
    let base = test_fixtures::solid(64, 48, [0, 0, 0, 255]);
    let jacket = test_fixtures::solid(1, 1, [0, 0, 0, 0]);
    let mut title = Raster::new(64, 48);
    title.data[..4].copy_from_slice(&[128, 128, 128, 128]);

    let bg = assemble_background(base, &settings, &atlas(), &jacket, Some(&title)).unwrap();
    assert_eq!(bg.pixel(0, 0).unwrap(), [128, 128, 128, 255]);
    assert!(bg.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn missing_static_sprite_is_asset_load_error() {
    let settings = test_fixtures::settings();
    let base = test_fixtures::solid(2, 2, BLUE);
    let jacket = test_fixtures::solid(4, 4, RED);
    let err = assemble_background(base, &settings, &SpriteAtlas::default(), &jacket, None)
        .unwrap_err();
    assert!(matches!(err, ChartreelError::AssetLoad(_)));
}

#[test]
fn missing_font_is_asset_load_error() {
    let mut settings = test_fixtures::settings();
    settings.font_path = "/nonexistent/chartreel/font.otf".into();
    assert!(matches!(
        render_title(&settings),
        Err(ChartreelError::AssetLoad(_))
    ));
}

#[test]
fn xml_escape_covers_markup_characters() {
    assert_eq!(
        escape_xml(r#"A & B <"C"> 'D'"#),
        "A &amp; B &lt;&quot;C&quot;&gt; &apos;D&apos;"
    );
}
