//! Caller-side scene graph for the active tour.
//!
//! SYSTEM CONTEXT
//! ==============
//! The viewer only ever reports "hotspot activated with scene id X". This
//! state decides what that means: look the scene up, push the current one on
//! the history stack and switch. The viewer host observes `current()` and
//! turns every change into a deferred content sync.

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

use viewer::scene::SceneConfig;

use crate::net::types::{Tour, TourError};

/// Loaded tour plus navigation position.
#[derive(Clone, Debug, Default)]
pub struct TourState {
    tour: Option<Tour>,
    current: Option<String>,
    history: Vec<String>,
    /// True while the tour document is being fetched.
    pub loading: bool,
    /// Most recent load or navigation failure, for display.
    pub last_error: Option<String>,
}

impl TourState {
    /// Replace the tour and open its start scene.
    ///
    /// # Errors
    ///
    /// Returns the [`Tour::start_scene`] error; the previous tour is kept then.
    pub fn load(&mut self, tour: Tour) -> Result<(), TourError> {
        self.loading = false;
        let start = match tour.start_scene() {
            Ok(scene) => scene.id.clone(),
            Err(err) => return Err(self.record(err)),
        };
        log::info!("tour loaded with {} scenes; opening `{start}`", tour.scenes.len());
        self.tour = Some(tour);
        self.current = Some(start);
        self.history.clear();
        self.last_error = None;
        Ok(())
    }

    /// Record a failed fetch.
    pub fn fail(&mut self, err: TourError) {
        self.loading = false;
        self.record(err);
    }

    /// The scene currently on display.
    pub fn current(&self) -> Option<&SceneConfig> {
        let id = self.current.as_deref()?;
        self.tour.as_ref()?.scene(id)
    }

    /// Ids of the scenes behind the current one, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Switch to `scene_id`. Navigating to the current scene is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::NotLoaded`] before a tour is loaded and
    /// [`TourError::UnknownScene`] for an id the tour does not contain. The
    /// current scene is unchanged in both cases.
    pub fn navigate(&mut self, scene_id: &str) -> Result<(), TourError> {
        let Some(tour) = &self.tour else {
            return Err(self.record(TourError::NotLoaded));
        };
        if tour.scene(scene_id).is_none() {
            return Err(self.record(TourError::UnknownScene(scene_id.to_string())));
        }
        if self.current.as_deref() == Some(scene_id) {
            return Ok(());
        }
        if let Some(previous) = self.current.replace(scene_id.to_string()) {
            self.history.push(previous);
        }
        self.last_error = None;
        log::debug!("tour moved to `{scene_id}`");
        Ok(())
    }

    /// Return to the previous scene.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::NoHistory`] when the current scene is the first
    /// one visited.
    pub fn back(&mut self) -> Result<(), TourError> {
        let Some(previous) = self.history.pop() else {
            return Err(self.record(TourError::NoHistory));
        };
        log::debug!("tour back to `{previous}`");
        self.current = Some(previous);
        self.last_error = None;
        Ok(())
    }

    fn record(&mut self, err: TourError) -> TourError {
        log::warn!("tour: {err}");
        self.last_error = Some(err.to_string());
        err
    }
}
