//! Button that flips the viewer's diagnostics overlay.

use leptos::prelude::*;

use crate::state::ui::ViewerUiState;

/// Requests a debug toggle from every viewer host watching
/// [`ViewerUiState::debug_toggle_seq`].
#[component]
pub fn DebugToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<ViewerUiState>>();

    view! {
        <button
            class="btn debug-toggle"
            title="Show or hide the viewer diagnostics overlay"
            on:click=move |_| ui.update(ViewerUiState::request_debug_toggle)
        >
            "Toggle debug"
        </button>
    }
}
