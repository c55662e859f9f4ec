//! Session background: the static template every output frame starts from.

use crate::assets::atlas::SpriteAtlas;
use crate::assets::decode::{load_image, load_opaque_image};
use crate::config::settings::RenderSettings;
use crate::foundation::core::Point;
use crate::foundation::error::{ChartreelError, ChartreelResult};
use crate::render::raster::Raster;
use crate::render::sprite::scale_sprite;
use std::sync::Arc;

/// Hit line sprite, centered on the hit line.
pub const HIT_LINE_SPRITE: &str = "game_play_line.png";
/// Lane rhythm guide sprite, resting on the hit line.
pub const RHYTHM_LINE_SPRITE: &str = "bg_line_rhythm.png";

/// Load every background input named by `settings` and assemble the template.
#[tracing::instrument(skip_all)]
pub fn build_background(
    settings: &RenderSettings,
    atlas: &SpriteAtlas,
) -> ChartreelResult<Raster> {
    let base = load_opaque_image(&settings.asset_path(&settings.background_image))?;
    let jacket = load_image(&settings.music_jacket)?;
    let title = render_title(settings)?;
    assemble_background(base, settings, atlas, &jacket, Some(&title))
}

/// Compose the background from already loaded parts.
///
/// `base` is stretched to the canvas; the hit line, rhythm guide, jacket and title are drawn on
/// top in that order.
pub fn assemble_background(
    base: Raster,
    settings: &RenderSettings,
    atlas: &SpriteAtlas,
    jacket: &Raster,
    title: Option<&Raster>,
) -> ChartreelResult<Raster> {
    let mut bg = base.resized(settings.width, settings.height)?;
    let mid_x = f64::from(settings.width) / 2.0;

    let hit_line = scale_sprite(atlas.region(HIT_LINE_SPRITE)?, settings.lane_scale)?;
    bg.paste_center(&hit_line, Point::new(mid_x, settings.bottom));

    let rhythm = scale_sprite(atlas.region(RHYTHM_LINE_SPRITE)?, settings.lane_scale)?;
    let rhythm_y = settings.bottom - f64::from(rhythm.height) / 2.0;
    bg.paste_center(&rhythm, Point::new(mid_x, rhythm_y));

    let jacket = scale_sprite(jacket, settings.jacket_scale)?;
    bg.paste_center(&jacket, settings.jacket_center());

    if let Some(title) = title {
        bg.draw_over(title, 0, 0);
    }

    // Frames are encoded without alpha.
    for px in bg.data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    Ok(bg)
}

/// Rasterize the song title onto a transparent canvas-sized layer.
///
/// The text is white, `font_scale` pixels tall, with its top-left at `name_position`, set in the
/// first face of `font_path`.
pub fn render_title(settings: &RenderSettings) -> ChartreelResult<Raster> {
    let font_bytes = std::fs::read(&settings.font_path).map_err(|e| {
        ChartreelError::asset_load(format!(
            "read font '{}': {e}",
            settings.font_path.display()
        ))
    })?;

    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(font_bytes);
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| {
            ChartreelError::asset_load(format!(
                "font '{}' has no usable face",
                settings.font_path.display()
            ))
        })?;

    let origin = settings.name_origin();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="#ffffff" dominant-baseline="text-before-edge">{text}</text></svg>"##,
        w = settings.width,
        h = settings.height,
        x = origin.x,
        y = origin.y,
        family = escape_xml(&family),
        size = settings.font_scale,
        text = escape_xml(&settings.song_name),
    );

    let opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| ChartreelError::asset_load(format!("lay out title text: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(settings.width, settings.height)
        .ok_or_else(|| ChartreelError::asset_load("failed to allocate title pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(Raster {
        width: settings.width,
        height: settings.height,
        data: pixmap.data().to_vec(),
    })
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
