//! Chartreel renders rhythm-game note charts into videos.
//!
//! A run is session-oriented:
//!
//! - Load [`RenderSettings`], a [`PositionTable`], and a [`Chart`]
//! - Build [`SessionAssets`] (sprite atlas + background template) once
//! - Create a [`RenderSession`] and stream frame buckets into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod chart;
mod config;
mod foundation;

/// Encoding sinks.
pub mod encode;
/// Frame rendering.
pub mod render;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{Fps, FrameIndex, Point, Rgba8};
pub use crate::foundation::error::{ChartreelError, ChartreelResult};

pub use crate::assets::atlas::SpriteAtlas;
pub use crate::assets::decode::{decode_image, load_image, load_opaque_image};
pub use crate::chart::note::{Chart, FrameBucket, NoteRecord, PointKind};
pub use crate::chart::position::{PositionSample, PositionTable};
pub use crate::config::settings::RenderSettings;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::compositor::FrameCompositor;
pub use crate::render::raster::Raster;
pub use crate::session::render_session::{
    RenderSession, RenderStats, SessionAssets, render_segments,
};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
pub(crate) mod test_fixtures;
