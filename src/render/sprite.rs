use crate::assets::atlas::SpriteAtlas;
use crate::chart::note::PointKind;
use crate::config::settings::RenderSettings;
use crate::foundation::core::Point;
use crate::foundation::error::ChartreelResult;
use crate::render::geometry::{PointGeometry, SimGeometry};
use crate::render::raster::Raster;

/// Lane-independent sprite used by [`PointKind::Tick`].
pub const TICK_SPRITE: &str = "note_slide_among.png";
/// Sim link sprite, stretched between two lanes.
pub const SIM_SPRITE: &str = "simultaneous_line.png";
/// Animated indicator drawn above flick notes.
pub const FLICK_TOP_SPRITE: &str = "note_flick_top.png";

/// Atlas key for a point note; lane `n` uses skin index `n - 1`.
pub fn sprite_key(kind: PointKind, lane: u32) -> String {
    let prefix = match kind {
        PointKind::Tick => return TICK_SPRITE.to_owned(),
        PointKind::Single => "note_normal_",
        PointKind::Long => "note_long_",
        PointKind::SingleOff => "note_normal_gray_",
        PointKind::Skill => "note_skill_",
        PointKind::Flick => "note_flick_",
    };
    format!("{prefix}{}.png", i64::from(lane) - 1)
}

/// Resize `src` to `width`x`height`, or return the 1×1 transparent placeholder when either
/// dimension is zero.
pub fn resize_or_placeholder(src: &Raster, width: u32, height: u32) -> ChartreelResult<Raster> {
    if width == 0 || height == 0 {
        return Ok(placeholder());
    }
    src.resized(width, height)
}

/// Uniformly scale `src` by `factor`, truncating pixel dimensions.
pub fn scale_sprite(src: &Raster, factor: f64) -> ChartreelResult<Raster> {
    let width = (f64::from(src.width) * factor) as u32;
    let height = (f64::from(src.height) * factor) as u32;
    resize_or_placeholder(src, width, height)
}

/// The 1×1 fully transparent stand-in for zero-area sprites.
pub fn placeholder() -> Raster {
    Raster::new(1, 1)
}

/// Vertical lift of the flick indicator at `frame`.
///
/// A sawtooth with period `flick_fps`: `0.1·w` at phase 0, rising by `0.3·w` over the period,
/// where `w` is the on-screen note width.
pub fn flick_offset(frame: i64, flick_fps: i64, note_width_px: f64) -> f64 {
    let position = frame.rem_euclid(flick_fps);
    note_width_px * 0.1 + position as f64 * note_width_px * 0.3 / flick_fps as f64
}

/// Resolves and scales sprites for notes against a shared atlas.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSelector<'a> {
    atlas: &'a SpriteAtlas,
    note_size: f64,
    note_width: f64,
    flick_fps: i64,
}

impl<'a> SpriteSelector<'a> {
    /// Selector over `atlas` using the note sizing in `settings`.
    pub fn new(atlas: &'a SpriteAtlas, settings: &RenderSettings) -> Self {
        Self {
            atlas,
            note_size: settings.note_size,
            note_width: settings.note_width,
            flick_fps: settings.flick_fps,
        }
    }

    /// Sprite for a point note, scaled by `scale * note_size`.
    pub fn point_sprite(
        &self,
        kind: PointKind,
        lane: u32,
        scale: f64,
    ) -> ChartreelResult<Raster> {
        let src = self.atlas.region(&sprite_key(kind, lane))?;
        scale_sprite(src, scale * self.note_size)
    }

    /// Sim link sprite spanning both lanes, to be pasted centered at [`SimGeometry::midpoint`].
    pub fn sim_sprite(&self, sim: &SimGeometry) -> ChartreelResult<Raster> {
        let src = self.atlas.region(SIM_SPRITE)?;
        let width = (sim.x2 - sim.x1).abs().round() as u32;
        let height = (f64::from(src.height) * self.note_size * sim.scale).round() as u32;
        resize_or_placeholder(src, width, height)
    }

    /// Flick indicator sprite and its center for a flick note at `frame`.
    pub fn flick_indicator(
        &self,
        frame: i64,
        note: &PointGeometry,
    ) -> ChartreelResult<(Raster, Point)> {
        let src = self.atlas.region(FLICK_TOP_SPRITE)?;
        let sprite = scale_sprite(src, note.scale * self.note_size)?;
        let note_width_px = note.scale * self.note_width * self.note_size;
        let lift = flick_offset(frame, self.flick_fps, note_width_px);
        Ok((sprite, Point::new(note.pos.x, note.pos.y - lift)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprite.rs"]
mod tests;
