//! Encoding sinks.
//!
//! Sinks consume finished frames in bucket order and are driven by `RenderSession::render`.

/// `ffmpeg`-based sink (video file via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
