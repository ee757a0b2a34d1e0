//! Hotspot binding: engine regions plus one shared click dispatcher.
//!
//! Binding a hotspot is two steps: register its region with the engine, then
//! add a click registration to the instance's [`ClickDispatcher`]. Every
//! registration checks the clicked id against its own hotspot name, so a
//! dispatcher that was not cleared before rebinding would evaluate (and
//! possibly fire) stale registrations. Callers clear before every pass.

#[cfg(test)]
#[path = "hotspot_test.rs"]
mod hotspot_test;

use crate::bindings::Action;
use crate::engine::EngineInstance;
use crate::error::EngineError;
use crate::scene::{Hotspot, HotspotAction};

/// One click observer: the hotspot it matches and what it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClickRegistration {
    hotspot: String,
    action: Action,
}

/// The click observers attached to one engine instance.
#[derive(Debug, Default)]
pub struct ClickDispatcher {
    registrations: Vec<ClickRegistration>,
}

impl ClickDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer for `hotspot`.
    pub fn register(&mut self, hotspot: &Hotspot) {
        self.registrations.push(ClickRegistration { hotspot: hotspot.name.clone(), action: resolve(hotspot) });
    }

    /// Remove every observer. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.registrations.len();
        self.registrations.clear();
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Offer a click on region `id` to every observer, in registration order.
    #[must_use]
    pub fn dispatch(&self, id: &str) -> Vec<Action> {
        self.registrations
            .iter()
            .filter(|registration| registration.hotspot == id)
            .map(|registration| registration.action.clone())
            .collect()
    }
}

/// What a click on `hotspot` should do.
///
/// An explicit action wins, then a target scene. A hotspot with neither is
/// misconfigured and resolves to a notice.
#[must_use]
pub fn resolve(hotspot: &Hotspot) -> Action {
    match (&hotspot.action, &hotspot.target_scene_id) {
        (Some(HotspotAction::Navigate { target }), _) => Action::HotspotActivated { scene_id: target.clone() },
        (Some(HotspotAction::Callback { handler }), _) => {
            Action::InvokeHandler { handler: handler.clone(), hotspot: hotspot.name.clone() }
        }
        (None, Some(target)) => Action::HotspotActivated { scene_id: target.clone() },
        (None, None) => Action::Notice { hotspot: hotspot.name.clone() },
    }
}

/// Register each hotspot's region and click observer, in list order.
///
/// An absent list binds nothing. Returns the number of hotspots bound.
///
/// # Errors
///
/// Propagates the first region the engine rejects. Hotspots before it stay
/// bound.
pub fn load_hotspots<I: EngineInstance>(
    engine: &mut I,
    dispatcher: &mut ClickDispatcher,
    hotspots: Option<&[Hotspot]>,
) -> Result<usize, EngineError> {
    let Some(hotspots) = hotspots else {
        return Ok(0);
    };
    for hotspot in hotspots {
        engine.add_hotspot(&hotspot.name, &hotspot.region())?;
        dispatcher.register(hotspot);
    }
    Ok(hotspots.len())
}

/// Remove every observer, if there is a dispatcher at all.
///
/// Returns how many were removed.
pub fn clear_click_handlers(dispatcher: Option<&mut ClickDispatcher>) -> usize {
    dispatcher.map_or(0, ClickDispatcher::clear)
}
