//! Blocking user notices.
//!
//! The viewer reports unconfigured hotspots through the
//! [`viewer::bindings::Notifier`] seam; in the browser that is a
//! `window.alert`, recorded in [`ViewerUiState::last_notice`] as well.

use leptos::prelude::*;
use viewer::bindings::Notifier;

use crate::state::ui::ViewerUiState;

/// Notifier that alerts and records the message.
#[derive(Clone, Copy, Default)]
pub struct AlertNotifier {
    ui: Option<RwSignal<ViewerUiState>>,
}

impl AlertNotifier {
    pub fn new(ui: Option<RwSignal<ViewerUiState>>) -> Self {
        Self { ui }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        if let Some(ui) = self.ui {
            ui.update(|state| state.last_notice = Some(message.to_string()));
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                log::warn!("notice without a window: {message}");
                return;
            };
            if let Err(err) = window.alert_with_message(message) {
                log::warn!("alert failed for notice `{message}`: {err:?}");
            }
        }
    }
}
