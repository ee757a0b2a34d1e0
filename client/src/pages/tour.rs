//! Tour page: one viewer walking a linked set of scenes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page fetches the tour document, feeds the current scene to
//! `VrviewHost` and answers its "hotspot activated" callback by navigating
//! `TourState`. Callback hotspots reach the handlers registered in
//! `tour_handlers`. The host is only rendered once a scene is current, so the
//! engine is always constructed on a real scene.

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

use leptos::prelude::*;
use viewer::bindings::HandlerRegistry;
use viewer::scene::SceneConfig;

use crate::components::debug_toggle::DebugToggle;
use crate::components::vrview_host::VrviewHost;
use crate::state::tour::TourState;
use crate::state::ui::ViewerUiState;

/// Handler id that hotspots use to show their own name as a notice.
pub const ANNOUNCE_HANDLER: &str = "announce";

fn announcement(hotspot: &str) -> String {
    format!("You found: {hotspot}")
}

fn scene_title(scene: Option<&SceneConfig>) -> String {
    scene.map_or_else(|| "Loading tour…".to_string(), |scene| scene.id.clone())
}

/// Whether the viewer host has a scene to construct on.
fn has_scene(state: &TourState) -> bool {
    state.current().is_some()
}

/// Handlers callback hotspots can name.
fn tour_handlers(ui: RwSignal<ViewerUiState>) -> HandlerRegistry {
    HandlerRegistry::new().with(ANNOUNCE_HANDLER, move |hotspot| {
        ui.update(|state| state.last_notice = Some(announcement(hotspot)));
    })
}

/// Tour page component.
#[component]
pub fn TourPage() -> impl IntoView {
    let tour = expect_context::<RwSignal<TourState>>();
    let ui = expect_context::<RwSignal<ViewerUiState>>();

    #[cfg(feature = "hydrate")]
    {
        tour.update(|state| state.loading = true);
        leptos::task::spawn_local(async move {
            match crate::net::tour::fetch_tour(crate::net::tour::DEFAULT_TOUR_URL).await {
                Ok(loaded) => tour.update(|state| {
                    if let Err(err) = state.load(loaded) {
                        log::error!("tour rejected: {err}");
                    }
                }),
                Err(err) => {
                    log::error!("tour fetch failed: {err}");
                    tour.update(|state| state.fail(err));
                }
            }
        });
    }

    let scene = Signal::derive(move || tour.with(|state| state.current().cloned().unwrap_or_default()));
    let debug_toggle_seq = Signal::derive(move || ui.with(|state| state.debug_toggle_seq));
    let on_hotspot = Callback::new(move |scene_id: String| {
        tour.update(|state| {
            if let Err(err) = state.navigate(&scene_id) {
                log::warn!("hotspot target not followed: {err}");
            }
        });
    });
    let on_back = move |_| {
        tour.update(|state| {
            if let Err(err) = state.back() {
                log::debug!("back ignored: {err}");
            }
        });
    };

    let title = move || tour.with(|state| scene_title(state.current()));
    let scene_ready = move || tour.with(has_scene);
    let can_go_back = move || tour.with(TourState::can_go_back);
    let error = move || tour.with(|state| state.last_error.clone());
    let notice = move || ui.with(|state| state.last_notice.clone());

    view! {
        <main class="tour-page">
            <header class="tour-page__header">
                <h1>{title}</h1>
                <button class="btn" disabled=move || !can_go_back() on:click=on_back>
                    "Back"
                </button>
                <DebugToggle/>
            </header>
            <Show when=scene_ready>
                <VrviewHost
                    scene=scene
                    debug_toggle_seq=debug_toggle_seq
                    on_hotspot=on_hotspot
                    handlers=tour_handlers(ui)
                />
            </Show>
            <p class="tour-page__notice">{notice}</p>
            <p class="tour-page__error">{error}</p>
        </main>
    }
}
