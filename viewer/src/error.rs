//! Error types for the viewer crate.
//!
//! Only genuine failures are errors. A viewer that simply is not ready yet
//! reports that through typed outcomes (`SyncOutcome::NotReady`,
//! `ToggleOutcome::NotReady`) instead, and an unconfigured hotspot surfaces
//! as a notice action.

/// Failure reported by the external rendering engine.
///
/// The engine is a black box; the message is whatever it reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Creating an engine instance on the target surface failed.
    #[error("engine construction failed on #{target}: {message}")]
    Construct { target: String, message: String },
    /// Registering an interactive region failed.
    #[error("failed to register hotspot `{name}`: {message}")]
    Region { name: String, message: String },
    /// Replacing the displayed content failed.
    #[error("failed to replace engine content: {0}")]
    Content(String),
    /// Inspecting or detaching the rendering surface failed.
    #[error("rendering surface error: {0}")]
    Surface(String),
}

/// Error returned by [`crate::viewer::Viewer`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The engine failed. Never retried; propagates to the host.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Error returned when parsing scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid scene JSON.
    #[error("invalid scene configuration: {0}")]
    Json(#[from] serde_json::Error),
}
