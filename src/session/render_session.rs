use crate::assets::atlas::SpriteAtlas;
use crate::chart::note::{Chart, FrameBucket};
use crate::chart::position::PositionTable;
use crate::config::settings::RenderSettings;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ChartreelError, ChartreelResult};
use crate::render::background::build_background;
use crate::render::compositor::FrameCompositor;
use crate::render::raster::Raster;
use rayon::prelude::*;

/// Per-session render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Note records drawn across all frames.
    pub notes_drawn: u64,
}

impl RenderStats {
    fn merge(self, other: Self) -> Self {
        Self {
            frames_total: self.frames_total + other.frames_total,
            notes_drawn: self.notes_drawn + other.notes_drawn,
        }
    }
}

/// Read-only assets shared by every session of a run.
#[derive(Clone, Debug)]
pub struct SessionAssets {
    /// Extracted sprite regions.
    pub atlas: SpriteAtlas,
    /// Background template, canvas-sized and opaque.
    pub background: Raster,
}

impl SessionAssets {
    /// Load the atlas and assemble the background described by `settings`.
    #[tracing::instrument(skip_all)]
    pub fn load(settings: &RenderSettings) -> ChartreelResult<Self> {
        let atlas = SpriteAtlas::load(settings)?;
        let background = build_background(settings, &atlas)?;
        tracing::debug!(regions = atlas.len(), "session assets ready");
        Ok(Self { atlas, background })
    }
}

/// Frame sequencer: renders buckets in order and streams them into a [`FrameSink`].
///
/// A session borrows settings, table, and assets; all of them stay read-only, so several sessions
/// may run on separate threads over the same data.
pub struct RenderSession<'a> {
    settings: &'a RenderSettings,
    compositor: FrameCompositor<'a>,
    fps: Fps,
}

impl<'a> RenderSession<'a> {
    /// Validate inputs and construct a session.
    #[tracing::instrument(skip_all)]
    pub fn new(
        settings: &'a RenderSettings,
        table: &'a PositionTable,
        assets: &'a SessionAssets,
    ) -> ChartreelResult<Self> {
        settings.validate()?;
        table.ensure_covers(settings.position_length)?;
        let fps = settings.fps()?;

        let bg = &assets.background;
        if bg.width != settings.width || bg.height != settings.height {
            return Err(ChartreelError::configuration(format!(
                "background is {}x{}, expected {}x{}",
                bg.width, bg.height, settings.width, settings.height
            )));
        }

        Ok(Self {
            settings,
            compositor: FrameCompositor::new(settings, table, &assets.atlas, bg),
            fps,
        })
    }

    /// Sink configuration for this session.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.settings.width,
            height: self.settings.height,
            fps: self.fps,
            codec: self.settings.codec.clone(),
        }
    }

    /// Render a single bucket to a finished frame.
    pub fn render_frame(&self, bucket: &FrameBucket) -> ChartreelResult<Raster> {
        self.compositor.render_bucket(bucket)
    }

    /// Render `buckets` in order and stream each finished frame into `sink`.
    ///
    /// The sink is finalized even when a bucket fails; in that case the partial output is
    /// discarded, the bucket's error is returned, and no frame is pushed for it or any later
    /// bucket.
    #[tracing::instrument(skip_all, fields(buckets = buckets.len()))]
    pub fn render(
        &self,
        buckets: &[FrameBucket],
        sink: &mut dyn FrameSink,
    ) -> ChartreelResult<RenderStats> {
        sink.begin(self.sink_config())?;

        match self.push_all(buckets, sink) {
            Ok(stats) => {
                sink.end()?;
                tracing::info!(
                    frames = stats.frames_total,
                    notes = stats.notes_drawn,
                    "session complete"
                );
                Ok(stats)
            }
            Err(err) => {
                if let Err(end_err) = sink.end() {
                    tracing::warn!(error = %end_err, "failed to finalize sink after render error");
                }
                discard_quietly(sink);
                Err(err)
            }
        }
    }

    fn push_all(
        &self,
        buckets: &[FrameBucket],
        sink: &mut dyn FrameSink,
    ) -> ChartreelResult<RenderStats> {
        let mut stats = RenderStats::default();
        for (i, bucket) in buckets.iter().enumerate() {
            let frame = self.render_frame(bucket)?;
            tracing::debug!(bucket = i, notes = bucket.notes().len(), "bucket rendered");
            sink.push_frame(FrameIndex(i as u64), &frame)?;
            stats.frames_total += 1;
            stats.notes_drawn += bucket.notes().len() as u64;
        }
        Ok(stats)
    }
}

/// Split `chart` into `jobs` contiguous segments and render each with its own session and sink.
///
/// `make_sink` receives the zero-based segment id. Segments run on a dedicated `rayon` pool;
/// the first failure (in segment order) is returned after every segment has finished. When any
/// segment fails, the outputs of the segments that completed are discarded as well.
#[tracing::instrument(skip(settings, table, assets, chart, make_sink))]
pub fn render_segments<S, F>(
    settings: &RenderSettings,
    table: &PositionTable,
    assets: &SessionAssets,
    chart: &Chart,
    jobs: usize,
    make_sink: F,
) -> ChartreelResult<RenderStats>
where
    S: FrameSink,
    F: Fn(usize) -> ChartreelResult<S> + Sync,
{
    if jobs == 0 {
        return Err(ChartreelError::configuration("jobs must be >= 1"));
    }
    let session = RenderSession::new(settings, table, assets)?;
    let segments = chart.segments(jobs);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(segments.len().max(1))
        .build()
        .map_err(|e| ChartreelError::configuration(format!("failed to build thread pool: {e}")))?;

    let mut results: Vec<(Option<S>, ChartreelResult<RenderStats>)> = pool.install(|| {
        segments
            .par_iter()
            .enumerate()
            .map(|(id, segment)| match make_sink(id) {
                Ok(mut sink) => {
                    let stats = session.render(segment, &mut sink);
                    (Some(sink), stats)
                }
                Err(e) => (None, Err(e)),
            })
            .collect()
    });

    if results.iter().any(|(_, r)| r.is_err()) {
        for (sink, r) in &mut results {
            if let (Some(sink), Ok(_)) = (sink.as_mut(), r.as_ref()) {
                discard_quietly(sink);
            }
        }
    }

    results
        .into_iter()
        .try_fold(RenderStats::default(), |acc, (_, r)| Ok(acc.merge(r?)))
}

fn discard_quietly(sink: &mut dyn FrameSink) {
    if let Err(e) = sink.discard() {
        tracing::warn!(error = %e, "failed to discard incomplete output");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
