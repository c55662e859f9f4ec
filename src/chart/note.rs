use crate::foundation::error::{ChartreelError, ChartreelResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Kind of a single-position note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Regular tap note.
    Single,
    /// Tap note drawn in its inactive (gray) skin.
    SingleOff,
    /// Flick note; also draws an animated indicator above it.
    Flick,
    /// Hold start or end note.
    Long,
    /// Skill note.
    Skill,
    /// Hold midpoint tick; lane-independent sprite.
    Tick,
}

/// A note event placed on the time-step axis.
///
/// Records are immutable; geometry is derived from them without modification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "NoteDef", into = "NoteDef")]
pub enum NoteRecord {
    /// Hold connector body between a near (bottom) and far (top) end.
    Bar {
        /// Time-step of the near end.
        bottom_frame: i64,
        /// Time-step of the far end.
        top_frame: i64,
        /// Lane of the near end.
        bottom_lane: u32,
        /// Lane of the far end.
        top_lane: u32,
    },
    /// Link between two notes hit at the same time-step.
    Sim {
        /// Time-step of both notes.
        frame: i64,
        /// Lanes of the two linked notes.
        lanes: [u32; 2],
    },
    /// Single-position note.
    Point {
        /// Note kind.
        kind: PointKind,
        /// Time-step.
        frame: i64,
        /// Lane.
        lane: u32,
    },
}

impl NoteRecord {
    /// Convenience constructor for point notes.
    pub fn point(kind: PointKind, frame: i64, lane: u32) -> Self {
        Self::Point { kind, frame, lane }
    }
}

// Wire form: `{"type": "...", "frame": ..., "lane": ...}` with array-valued frame/lane for bars
// and sim links.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum NoteDef {
    Bar { frame: [i64; 2], lane: [u32; 2] },
    Sim { frame: i64, lane: [u32; 2] },
    Single { frame: i64, lane: u32 },
    SingleOff { frame: i64, lane: u32 },
    Flick { frame: i64, lane: u32 },
    Long { frame: i64, lane: u32 },
    Skill { frame: i64, lane: u32 },
    Tick { frame: i64, lane: u32 },
}

impl From<NoteDef> for NoteRecord {
    fn from(def: NoteDef) -> Self {
        match def {
            NoteDef::Bar { frame, lane } => Self::Bar {
                bottom_frame: frame[0],
                top_frame: frame[1],
                bottom_lane: lane[0],
                top_lane: lane[1],
            },
            NoteDef::Sim { frame, lane } => Self::Sim { frame, lanes: lane },
            NoteDef::Single { frame, lane } => Self::point(PointKind::Single, frame, lane),
            NoteDef::SingleOff { frame, lane } => Self::point(PointKind::SingleOff, frame, lane),
            NoteDef::Flick { frame, lane } => Self::point(PointKind::Flick, frame, lane),
            NoteDef::Long { frame, lane } => Self::point(PointKind::Long, frame, lane),
            NoteDef::Skill { frame, lane } => Self::point(PointKind::Skill, frame, lane),
            NoteDef::Tick { frame, lane } => Self::point(PointKind::Tick, frame, lane),
        }
    }
}

impl From<NoteRecord> for NoteDef {
    fn from(note: NoteRecord) -> Self {
        match note {
            NoteRecord::Bar {
                bottom_frame,
                top_frame,
                bottom_lane,
                top_lane,
            } => Self::Bar {
                frame: [bottom_frame, top_frame],
                lane: [bottom_lane, top_lane],
            },
            NoteRecord::Sim { frame, lanes } => Self::Sim { frame, lane: lanes },
            NoteRecord::Point { kind, frame, lane } => match kind {
                PointKind::Single => Self::Single { frame, lane },
                PointKind::SingleOff => Self::SingleOff { frame, lane },
                PointKind::Flick => Self::Flick { frame, lane },
                PointKind::Long => Self::Long { frame, lane },
                PointKind::Skill => Self::Skill { frame, lane },
                PointKind::Tick => Self::Tick { frame, lane },
            },
        }
    }
}

/// Notes drawn into one output video frame, in draw order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameBucket(pub Vec<NoteRecord>);

impl FrameBucket {
    /// Notes in draw order.
    pub fn notes(&self) -> &[NoteRecord] {
        &self.0
    }
}

/// Ordered frame buckets of one chart; bucket `i` becomes output frame `i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chart {
    buckets: Vec<FrameBucket>,
}

impl Chart {
    /// Wrap an already bucketed note list.
    pub fn new(buckets: Vec<FrameBucket>) -> Self {
        Self { buckets }
    }

    /// Parse a chart from a JSON array of buckets.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChartreelError::configuration(format!("parse chart JSON: {e}")))
    }

    /// Parse a chart from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartreelError::configuration(format!("open chart JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Buckets in output order.
    pub fn buckets(&self) -> &[FrameBucket] {
        &self.buckets
    }

    /// Split into at most `parts` contiguous, non-empty, near-equal segments.
    pub fn segments(&self, parts: usize) -> Vec<&[FrameBucket]> {
        if self.buckets.is_empty() {
            return Vec::new();
        }
        let parts = parts.clamp(1, self.buckets.len());
        let base = self.buckets.len() / parts;
        let extra = self.buckets.len() % parts;

        let mut out = Vec::with_capacity(parts);
        let mut start = 0;
        for i in 0..parts {
            let len = base + usize::from(i < extra);
            out.push(&self.buckets[start..start + len]);
            start += len;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/note.rs"]
mod tests;
