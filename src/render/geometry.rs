//! Note record → screen geometry.
//!
//! Everything here is pure: records are read, never modified, and clamped frames are returned
//! alongside the geometry they produced.

use crate::chart::note::NoteRecord;
use crate::chart::position::PositionTable;
use crate::config::settings::RenderSettings;
use crate::foundation::core::Point;
use crate::foundation::error::{ChartreelError, ChartreelResult};

/// The slice of [`RenderSettings`] that geometry depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowParams {
    /// Time-step of the hit line; the last index of the position table.
    pub position_length: i64,
    /// First visible time-step; connector far ends are clamped up to it.
    pub skip_note: i64,
    /// Lane spacing at the hit line, in pixels.
    pub lane_space_bottom: f64,
}

impl From<&RenderSettings> for WindowParams {
    fn from(s: &RenderSettings) -> Self {
        Self {
            position_length: s.position_length,
            skip_note: s.skip_note,
            lane_space_bottom: s.lane_space_bottom,
        }
    }
}

/// Geometry of a single-position note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointGeometry {
    /// Sprite center.
    pub pos: Point,
    /// Depth scale.
    pub scale: f64,
}

/// Geometry of a sim link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimGeometry {
    /// Screen x of the first lane.
    pub x1: f64,
    /// Screen x of the second lane.
    pub x2: f64,
    /// Shared screen y.
    pub y: f64,
    /// Depth scale.
    pub scale: f64,
}

impl SimGeometry {
    /// Center of the link.
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, self.y)
    }
}

/// Geometry of a hold connector after clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// Resolved near-end time-step.
    pub bottom_frame: i64,
    /// Resolved far-end time-step.
    pub top_frame: i64,
    /// Far end on screen.
    pub top: Point,
    /// Near end on screen, before the scroll offset.
    pub bottom: Point,
    /// Depth scale at the far end.
    pub top_scale: f64,
    /// Depth scale at the near end.
    pub bottom_scale: f64,
    /// Horizontal scroll offset applied to the near end.
    pub distance: f64,
    /// Where the auxiliary hold-start sprite goes, when the near end sits on the hit line.
    pub terminal: Option<Point>,
}

impl BarGeometry {
    /// Near end on screen including the scroll offset.
    pub fn shifted_bottom(&self) -> Point {
        Point::new(self.bottom.x + self.distance, self.bottom.y)
    }
}

/// Geometry of any note record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoteGeometry {
    /// Hold connector.
    Bar(BarGeometry),
    /// Sim link.
    Sim(SimGeometry),
    /// Single-position note.
    Point(PointGeometry),
}

/// Resolve any note record against the position table.
pub fn note_geometry(
    note: &NoteRecord,
    table: &PositionTable,
    window: WindowParams,
) -> ChartreelResult<NoteGeometry> {
    Ok(match *note {
        NoteRecord::Bar {
            bottom_frame,
            top_frame,
            bottom_lane,
            top_lane,
        } => NoteGeometry::Bar(bar_geometry(
            [bottom_frame, top_frame],
            [bottom_lane, top_lane],
            table,
            window,
        )?),
        NoteRecord::Sim { frame, lanes } => NoteGeometry::Sim(sim_geometry(frame, lanes, table)?),
        NoteRecord::Point { frame, lane, .. } => {
            NoteGeometry::Point(point_geometry(frame, lane, table)?)
        }
    })
}

/// `P[frame].x[lane]`, `P[frame].y`, `P[frame].r`.
pub fn point_geometry(
    frame: i64,
    lane: u32,
    table: &PositionTable,
) -> ChartreelResult<PointGeometry> {
    let sample = table.sample(frame)?;
    Ok(PointGeometry {
        pos: Point::new(table.lane_x(frame, lane)?, f64::from(sample.y)),
        scale: sample.r,
    })
}

/// Both lane x positions of a sim link plus the shared y and scale.
pub fn sim_geometry(
    frame: i64,
    lanes: [u32; 2],
    table: &PositionTable,
) -> ChartreelResult<SimGeometry> {
    let sample = table.sample(frame)?;
    Ok(SimGeometry {
        x1: table.lane_x(frame, lanes[0])?,
        x2: table.lane_x(frame, lanes[1])?,
        y: f64::from(sample.y),
        scale: sample.r,
    })
}

/// Clamp `[bottom, top]` frames into the render window.
///
/// The near end is capped at the hit line; the far end is raised to 0 and then to `skip_note`,
/// so far ends outside the approach window are foreshortened to its boundary.
pub fn clamp_bar_frames(frames: [i64; 2], window: WindowParams) -> [i64; 2] {
    let bottom = frames[0].min(window.position_length);
    let top = frames[1].max(0).max(window.skip_note);
    [bottom, top]
}

/// Horizontal offset of a connector whose near end has not yet reached the hit line.
///
/// Computed from the unclamped frames. Returns 0 when the near end is inside the window. A near
/// end past the window with `bottom == top` has no slope to extrapolate and is rejected.
pub fn connector_distance(
    frames: [i64; 2],
    lanes: [u32; 2],
    window: WindowParams,
) -> ChartreelResult<f64> {
    let [bottom, top] = frames;
    if bottom <= window.position_length {
        return Ok(0.0);
    }
    if bottom == top {
        return Err(ChartreelError::geometry(format!(
            "connector spans zero time-steps at frame {bottom}; scroll offset is undefined"
        )));
    }

    let total = (f64::from(lanes[1]) - f64::from(lanes[0])) * window.lane_space_bottom;
    let per_frame = total / (bottom - top) as f64;
    Ok((bottom - window.position_length) as f64 * per_frame)
}

/// Full connector geometry for `frames = [bottom, top]`, `lanes = [bottom_lane, top_lane]`.
pub fn bar_geometry(
    frames: [i64; 2],
    lanes: [u32; 2],
    table: &PositionTable,
    window: WindowParams,
) -> ChartreelResult<BarGeometry> {
    let distance = connector_distance(frames, lanes, window)?;
    let [bottom_frame, top_frame] = clamp_bar_frames(frames, window);

    let top = point_geometry(top_frame, lanes[1], table)?;
    let bottom = point_geometry(bottom_frame, lanes[0], table)?;

    let terminal = (bottom_frame == window.position_length)
        .then(|| Point::new(bottom.pos.x + distance, bottom.pos.y));

    Ok(BarGeometry {
        bottom_frame,
        top_frame,
        top: top.pos,
        bottom: bottom.pos,
        top_scale: top.scale,
        bottom_scale: bottom.scale,
        distance,
        terminal,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
