/// Result alias used across the crate.
pub type ChartreelResult<T> = Result<T, ChartreelError>;

/// Errors produced while setting up or running a render session.
///
/// Startup kinds (`Configuration`, `AssetLoad`) prevent any output. Mid-session kinds
/// (`Geometry`, `Encode`) abort the remaining sequence; the output file is then invalid.
#[derive(thiserror::Error, Debug)]
pub enum ChartreelError {
    /// Invalid settings, unknown skin identifiers, malformed input documents.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed atlas manifest, sheet, image, font, or sprite key.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Out-of-range time-step or lane, or a degenerate connector.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Encoder failed to open, write, or finalize.
    #[error("encode error: {0}")]
    Encode(String),

    /// Context-wrapped I/O and other foreign failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartreelError {
    /// Build a [`ChartreelError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ChartreelError::AssetLoad`].
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`ChartreelError::Geometry`].
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`ChartreelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for kinds raised before any frame is produced.
    pub fn is_startup(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::AssetLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
