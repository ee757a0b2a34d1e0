//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::tour::TourPage;
use crate::state::{tour::TourState, ui::ViewerUiState};

/// Script that defines the global `VRView.Player` constructor.
pub const PLAYER_SCRIPT: &str = "/vrview/build/vrview.min.js";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src=PLAYER_SCRIPT></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let tour = RwSignal::new(TourState::default());
    let ui = RwSignal::new(ViewerUiState::default());

    provide_context(tour);
    provide_context(ui);

    view! {
        <Stylesheet id="leptos" href="/pkg/vrview-tour.css"/>
        <Title text="Tour"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=TourPage/>
            </Routes>
        </Router>
    }
}
