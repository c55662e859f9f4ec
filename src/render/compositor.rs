use crate::assets::atlas::SpriteAtlas;
use crate::chart::note::{FrameBucket, NoteRecord, PointKind};
use crate::chart::position::PositionTable;
use crate::config::settings::RenderSettings;
use crate::foundation::error::ChartreelResult;
use crate::render::geometry::{
    BarGeometry, WindowParams, bar_geometry, point_geometry, sim_geometry,
};
use crate::render::gradient::{ConnectorStyle, draw_connector};
use crate::render::raster::Raster;
use crate::render::sprite::SpriteSelector;

/// Lane whose hold-start skin is drawn at a connector's near end on the hit line.
const TERMINAL_LANE: u32 = 4;

/// Composites one frame bucket at a time onto copies of a shared background.
///
/// Holds only borrowed, read-only session state; rendering a bucket never mutates it.
#[derive(Clone, Copy, Debug)]
pub struct FrameCompositor<'a> {
    background: &'a Raster,
    table: &'a PositionTable,
    sprites: SpriteSelector<'a>,
    window: WindowParams,
    connector: ConnectorStyle,
}

impl<'a> FrameCompositor<'a> {
    /// Compositor over the given session state.
    pub fn new(
        settings: &RenderSettings,
        table: &'a PositionTable,
        atlas: &'a SpriteAtlas,
        background: &'a Raster,
    ) -> Self {
        Self {
            background,
            table,
            sprites: SpriteSelector::new(atlas, settings),
            window: WindowParams::from(settings),
            connector: ConnectorStyle::from(settings),
        }
    }

    /// Draw every note of `bucket`, in order, onto a fresh copy of the background.
    pub fn render_bucket(&self, bucket: &FrameBucket) -> ChartreelResult<Raster> {
        let mut frame = self.background.clone();
        for note in bucket.notes() {
            self.draw_note(&mut frame, note)?;
        }
        Ok(frame)
    }

    /// Draw a single note onto `frame`.
    pub fn draw_note(&self, frame: &mut Raster, note: &NoteRecord) -> ChartreelResult<()> {
        match *note {
            NoteRecord::Bar {
                bottom_frame,
                top_frame,
                bottom_lane,
                top_lane,
            } => {
                let bar = bar_geometry(
                    [bottom_frame, top_frame],
                    [bottom_lane, top_lane],
                    self.table,
                    self.window,
                )?;
                self.draw_bar(frame, &bar)
            }
            NoteRecord::Sim { frame: step, lanes } => {
                let sim = sim_geometry(step, lanes, self.table)?;
                let sprite = self.sprites.sim_sprite(&sim)?;
                frame.paste_center(&sprite, sim.midpoint());
                Ok(())
            }
            NoteRecord::Point {
                kind,
                frame: step,
                lane,
            } => {
                let g = point_geometry(step, lane, self.table)?;
                let sprite = self.sprites.point_sprite(kind, lane, g.scale)?;
                frame.paste_center(&sprite, g.pos);
                if kind == PointKind::Flick {
                    let (top, center) = self.sprites.flick_indicator(step, &g)?;
                    frame.paste_center(&top, center);
                }
                Ok(())
            }
        }
    }

    fn draw_bar(&self, frame: &mut Raster, bar: &BarGeometry) -> ChartreelResult<()> {
        draw_connector(frame, bar, &self.connector);

        if let Some(center) = bar.terminal {
            let scale = self.table.sample(self.window.position_length)?.r;
            let sprite = self
                .sprites
                .point_sprite(PointKind::Long, TERMINAL_LANE, scale)?;
            frame.paste_center(&sprite, center);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
