use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ChartreelResult;
use crate::render::raster::Raster;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Codec identifier from settings.
    pub codec: String,
}

/// Encoder contract: `begin` opens, `push_frame` appends, `end` finalizes.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order. `end` is
/// called exactly once after a successful `begin`, including when rendering fails part way; in
/// that case, `discard` follows `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ChartreelResult<()>;
    /// Push one finished frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> ChartreelResult<()>;
    /// Finalize the output.
    fn end(&mut self) -> ChartreelResult<()>;
    /// Remove finalized output that is known to be incomplete.
    fn discard(&mut self) -> ChartreelResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Raster)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, Raster)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ChartreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> ChartreelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ChartreelResult<()> {
        self.ended = true;
        Ok(())
    }

    fn discard(&mut self) -> ChartreelResult<()> {
        self.frames.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
