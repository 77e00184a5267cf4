//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{editor::EditorPage, gallery::GalleryPage};
use crate::state::project::ProjectsState;

/// Root application component.
///
/// Provides the gallery state context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let projects = RwSignal::new(ProjectsState::default());
    provide_context(projects);

    view! {
        <Stylesheet id="leptos" href="/pkg/restage.css"/>
        <Title text="Restage"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=GalleryPage/>
                <Route path=(StaticSegment("project"), ParamSegment("id")) view=EditorPage/>
            </Routes>
        </Router>
    }
}
