use crate::foundation::error::{ChartreelError, ChartreelResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Screen projection of one time-step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Screen x per lane index.
    pub x: Vec<f64>,
    /// Screen y shared by every lane.
    pub y: i32,
    /// Depth scale shared by every lane, always `> 0`.
    pub r: f64,
}

/// Precomputed per-time-step projection table, indexed by time-step `0..=position_length`.
///
/// Read-only after construction. Lookups never clamp; callers resolve clamping first and any
/// index still outside the table is a [`ChartreelError::Geometry`].
#[derive(Debug, Clone)]
pub struct PositionTable {
    samples: Vec<PositionSample>,
}

impl PositionTable {
    /// Build a table, rejecting empty tables and non-positive or non-finite scales.
    pub fn new(samples: Vec<PositionSample>) -> ChartreelResult<Self> {
        if samples.is_empty() {
            return Err(ChartreelError::configuration(
                "position table must contain at least one sample",
            ));
        }
        for (i, s) in samples.iter().enumerate() {
            if !s.r.is_finite() || s.r <= 0.0 {
                return Err(ChartreelError::configuration(format!(
                    "position table $[{i}].r must be finite and > 0 (got {})",
                    s.r
                )));
            }
            if s.x.iter().any(|x| !x.is_finite()) {
                return Err(ChartreelError::configuration(format!(
                    "position table $[{i}].x must be finite"
                )));
            }
        }
        Ok(Self { samples })
    }

    /// Parse a table from a JSON array of `{x, y, r}` objects.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartreelResult<Self> {
        let samples: Vec<PositionSample> = serde_json::from_reader(r)
            .map_err(|e| ChartreelError::configuration(format!("parse position table JSON: {e}")))?;
        Self::new(samples)
    }

    /// Parse a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartreelError::configuration(format!(
                "open position table '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Highest valid time-step index.
    pub fn last_step(&self) -> i64 {
        self.samples.len() as i64 - 1
    }

    /// Ensure every time-step in `0..=position_length` is present.
    pub fn ensure_covers(&self, position_length: i64) -> ChartreelResult<()> {
        if position_length > self.last_step() {
            return Err(ChartreelError::configuration(format!(
                "position table has {} samples but position_length is {position_length}",
                self.samples.len()
            )));
        }
        Ok(())
    }

    /// Sample at `step`.
    pub fn sample(&self, step: i64) -> ChartreelResult<&PositionSample> {
        usize::try_from(step)
            .ok()
            .and_then(|i| self.samples.get(i))
            .ok_or_else(|| {
                ChartreelError::geometry(format!(
                    "time-step {step} is outside the position table (0..={})",
                    self.last_step()
                ))
            })
    }

    /// Screen x of `lane` at `step`.
    pub fn lane_x(&self, step: i64, lane: u32) -> ChartreelResult<f64> {
        let s = self.sample(step)?;
        s.x.get(lane as usize).copied().ok_or_else(|| {
            ChartreelError::geometry(format!(
                "lane {lane} is outside the position table at time-step {step} ({} lanes)",
                s.x.len()
            ))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/position.rs"]
mod tests;
