//! Tour documents and the errors of loading and walking them.
//!
//! DESIGN
//! ======
//! A tour is a flat list of scenes plus the id of the scene to open first.
//! Hotspots link scenes by id; links are checked when followed, not when the
//! document is parsed, so a tour with a dangling link still loads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use viewer::scene::SceneConfig;

/// A set of linked scenes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Scene shown when the tour opens. Defaults to the first listed scene.
    #[serde(default, alias = "initialScene")]
    pub start: Option<String>,
    pub scenes: Vec<SceneConfig>,
}

impl Tour {
    /// Parse and validate a tour document.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::Json`] for malformed input, [`TourError::Empty`]
    /// when no scenes are listed and [`TourError::UnknownScene`] when `start`
    /// names a scene that is not in the list.
    pub fn from_json(raw: &str) -> Result<Self, TourError> {
        let tour: Self = serde_json::from_str(raw)?;
        tour.start_scene()?;
        Ok(tour)
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&SceneConfig> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    /// The scene the tour opens on.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Tour::from_json`] minus parsing.
    pub fn start_scene(&self) -> Result<&SceneConfig, TourError> {
        match &self.start {
            Some(id) => self.scene(id).ok_or_else(|| TourError::UnknownScene(id.clone())),
            None => self.scenes.first().ok_or(TourError::Empty),
        }
    }
}

/// Tour loading and navigation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    #[error("invalid tour document: {0}")]
    Json(String),
    #[error("tour lists no scenes")]
    Empty,
    #[error("no scene with id `{0}` in this tour")]
    UnknownScene(String),
    #[error("no tour loaded")]
    NotLoaded,
    #[error("no previous scene")]
    NoHistory,
    #[error("tour request failed: {0}")]
    Request(String),
    #[error("tour request failed with status {0}")]
    Status(u16),
}

impl From<serde_json::Error> for TourError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
