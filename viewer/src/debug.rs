//! Diagnostics overlay state.
//!
//! The engine only reads its debug flag at construction time, so turning the
//! overlay on or off means building a new instance. The viewer keeps the
//! declared [`DebugMode`] of each instance itself and that declaration is
//! what the next toggle flips. The rendered output is inspected once per
//! instance, when it reports ready, and a disagreement is only logged. Output
//! that cannot be read (a cross-origin document) is treated as unknown.

#[cfg(test)]
#[path = "debug_test.rs"]
mod debug_test;

use crate::engine::RenderSurface;
use crate::scene::SceneOverrides;

/// Whether the diagnostics overlay is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    #[default]
    Off,
    On,
}

impl DebugMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// Mode declared by an optional config flag; absent means off.
    #[must_use]
    pub fn from_flag(flag: Option<bool>) -> Self {
        Self::from(flag.unwrap_or(false))
    }
}

impl From<bool> for DebugMode {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Read the mode off the rendered output. `None` when it cannot be read.
#[must_use]
pub fn detect<S: RenderSurface + ?Sized>(surface: &S) -> Option<DebugMode> {
    surface.has_diagnostics_marker().map(DebugMode::from)
}

/// Check the declared mode against the rendered output. The declared mode is
/// returned unchanged.
#[must_use]
pub fn reconcile<S: RenderSurface + ?Sized>(declared: DebugMode, surface: &S) -> DebugMode {
    match detect(surface) {
        Some(detected) if detected != declared => {
            log::warn!("declared debug mode {declared:?} but surface renders {detected:?}; keeping declared state");
        }
        Some(_) => {}
        None => log::debug!("rendered output unreadable; keeping declared debug mode {declared:?}"),
    }
    declared
}

/// Inputs for re-creating an instance with the overlay flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglePlan {
    pub from: DebugMode,
    pub to: DebugMode,
    /// Overrides for the replacement: the new flag plus the pre-toggle size.
    pub overrides: SceneOverrides,
}

/// Flip `current` and snapshot the surface size into the overrides.
///
/// A detached surface reports no size; the previous snapshot is kept then.
#[must_use]
pub fn plan_toggle<S: RenderSurface + ?Sized>(current: DebugMode, surface: &S, overrides: &SceneOverrides) -> TogglePlan {
    let to = current.toggled();
    let size = surface.rendered_size().or_else(|| overrides.size.clone());
    TogglePlan { from: current, to, overrides: SceneOverrides { debug: Some(to.is_on()), size } }
}
