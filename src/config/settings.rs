use crate::foundation::core::{Fps, Point, Rgba8};
use crate::foundation::error::{ChartreelError, ChartreelResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Session-wide render configuration.
///
/// Loaded once from JSON and shared read-only by every component of a session. Relative asset
/// paths are resolved against [`RenderSettings::assets_dir`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames per second.
    pub fps: u32,
    /// ffmpeg video encoder name (for example `libx264` or `mpeg4`).
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Scale applied to the hit-line and rhythm-line sprites.
    pub lane_scale: f64,
    /// Global note sprite scale.
    pub note_size: f64,
    /// Scale applied to the jacket image.
    pub jacket_scale: f64,
    /// Unscaled note width in pixels; drives connector and flick indicator geometry.
    pub note_width: f64,
    /// Connector width multiplier relative to a note.
    #[serde(default = "default_lnl_scale")]
    pub lnl_scale: f64,

    /// Connector color at both ends.
    pub edge_color: Rgba8,
    /// Connector color at its midpoint.
    pub center_color: Rgba8,
    /// Connector border line color.
    pub line_color: Rgba8,

    /// First time-step of the visible approach window; connector far ends clamp to it.
    pub skip_note: i64,
    /// Last time-step index of the position table (the hit line).
    pub position_length: i64,
    /// Period, in time-steps, of the flick indicator animation.
    pub flick_fps: i64,
    /// Horizontal lane spacing at the hit line, in pixels.
    pub lane_space_bottom: f64,
    /// Screen y of the hit line, used when assembling the background.
    pub bottom: f64,

    /// Lane skin pack identifier (`lane <id>` atlas).
    pub lane_skin_id: String,
    /// Note skin pack identifier (`note <id>` atlas).
    pub note_skin_id: String,
    /// Directory holding atlas packs and the background image.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Background image, relative to `assets_dir`.
    #[serde(default = "default_background_image")]
    pub background_image: PathBuf,

    /// Jacket image path.
    pub music_jacket: PathBuf,
    /// Jacket center in pixels.
    pub jacket_position: [f64; 2],

    /// Title text.
    pub song_name: String,
    /// Top-left of the title text in pixels.
    pub name_position: [f64; 2],
    /// Title font size in pixels.
    pub font_scale: f64,
    /// Title font file (`.ttf`/`.otf`).
    pub font_path: PathBuf,

    /// Output directory for encoded videos.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output file name; each session prefixes it with its identifier.
    pub video_name: String,
}

fn default_codec() -> String {
    "libx264".to_owned()
}

fn default_lnl_scale() -> f64 {
    1.0
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_background_image() -> PathBuf {
    PathBuf::from("bgs.png")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("video")
}

impl RenderSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChartreelError::configuration(format!("parse settings JSON: {e}")))
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartreelError::configuration(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field and report all violations at once.
    pub fn validate(&self) -> ChartreelResult<()> {
        let mut errors = Vec::<String>::new();
        let mut check = |ok: bool, field: &str, msg: &str| {
            if !ok {
                errors.push(format!("$.{field}: {msg}"));
            }
        };

        check(self.width > 0, "width", "must be > 0");
        check(self.height > 0, "height", "must be > 0");
        check(
            self.width.is_multiple_of(2) && self.height.is_multiple_of(2),
            "width",
            "width/height must be even",
        );
        check(self.fps > 0, "fps", "must be > 0");
        check(!self.codec.trim().is_empty(), "codec", "must be non-empty");

        for (field, v) in [
            ("lane_scale", self.lane_scale),
            ("note_size", self.note_size),
            ("jacket_scale", self.jacket_scale),
            ("note_width", self.note_width),
            ("lnl_scale", self.lnl_scale),
            ("font_scale", self.font_scale),
        ] {
            check(v.is_finite() && v > 0.0, field, "must be finite and > 0");
        }
        check(
            self.lane_space_bottom.is_finite(),
            "lane_space_bottom",
            "must be finite",
        );
        check(self.bottom.is_finite(), "bottom", "must be finite");

        check(self.position_length > 0, "position_length", "must be > 0");
        check(self.skip_note >= 0, "skip_note", "must be >= 0");
        check(
            self.skip_note <= self.position_length,
            "skip_note",
            "must be <= position_length",
        );
        check(self.flick_fps > 0, "flick_fps", "must be > 0");

        check(
            !self.lane_skin_id.trim().is_empty(),
            "lane_skin_id",
            "must be non-empty",
        );
        check(
            !self.note_skin_id.trim().is_empty(),
            "note_skin_id",
            "must be non-empty",
        );
        check(!self.video_name.trim().is_empty(), "video_name", "must be non-empty");

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ChartreelError::configuration(format!(
                "settings validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }

    /// Output frame rate.
    pub fn fps(&self) -> ChartreelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Jacket center.
    pub fn jacket_center(&self) -> Point {
        Point::new(self.jacket_position[0], self.jacket_position[1])
    }

    /// Title text origin (top-left).
    pub fn name_origin(&self) -> Point {
        Point::new(self.name_position[0], self.name_position[1])
    }

    /// Resolve a path relative to `assets_dir`.
    pub fn asset_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.assets_dir.join(rel)
    }

    /// Output path for the session identified by `session_id`.
    pub fn output_path(&self, session_id: usize) -> PathBuf {
        self.output_dir.join(format!("{session_id}th {}", self.video_name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
