//! Editor page: the per-project editing workspace.
//!
//! ARCHITECTURE
//! ============
//! Route-level coordinator between the gallery's project list, the editing
//! session, and the canvas engine. It owns the project/session/ui signals,
//! provides the action contexts the sidebar and popover trigger, runs the
//! async generation shell, and pushes every project mutation back to the
//! external store.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::canvas_host::{CanvasHost, EngineHandle};
use crate::components::edit_popover::EditPopover;
use crate::components::history_shelf::HistoryShelf;
use crate::components::sidebar::Sidebar;
use crate::components::tool_strip::ToolStrip;
use crate::components::welcome::WelcomeView;
use crate::state::project::{Project, ProjectsState, ReferenceImage};
use crate::state::session::EditorSession;
use crate::state::ui::EditorUi;
use crate::util::clock;

#[cfg(feature = "hydrate")]
use crate::net::{api, inference};

/// Context action: run a generation with `(prompt, reference_images)`.
#[derive(Clone, Copy)]
pub struct GenerateAction(pub Callback<(String, Vec<ReferenceImage>)>);

/// Context action: a new base image was uploaded (as a data URL).
#[derive(Clone, Copy)]
pub struct UploadAction(pub Callback<String>);

/// Context action: branch the active version into a brand-new project and
/// open it.
#[derive(Clone, Copy)]
pub struct BranchAction(pub Callback<()>);

/// Push a project into the gallery list and the external store.
fn persist(projects: RwSignal<ProjectsState>, project: Project) {
    projects.update(|s| {
        if !s.update(project.clone()) {
            s.add(project.clone());
        }
    });
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = api::persist_project(&project).await {
            log::warn!("project persist failed: {e}");
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = project;
}

/// The editing workspace for one project.
#[component]
pub fn EditorPage() -> impl IntoView {
    let projects = expect_context::<RwSignal<ProjectsState>>();
    let params = use_params_map();

    let project = RwSignal::new(Project::new(
        String::new(),
        "Untitled".to_owned(),
        clock::now_iso(),
    ));
    let session = RwSignal::new(EditorSession::default());
    let ui = RwSignal::new(EditorUi::default());
    let handle = EngineHandle::new();
    let loaded_id = RwSignal::new(None::<String>);

    provide_context(project);
    provide_context(session);
    provide_context(ui);
    provide_context(handle);

    let route_id = move || params.read().get("id").unwrap_or_default();

    // Rebuild the editing session whenever the route points at a different
    // project (or the gallery finishes loading it).
    Effect::new(move || {
        let id = route_id();
        if loaded_id.get_untracked().as_deref() == Some(id.as_str()) {
            return;
        }
        let Some(found) = projects.with(|s| s.find(&id).cloned()) else {
            return;
        };
        session.set(EditorSession::for_project(&found));
        project.set(found);
        ui.set(EditorUi::default());
        loaded_id.set(Some(id));
    });

    // Single persistence path: any project mutation (rename, upload, a new
    // generated version) flows back to the gallery list and the store.
    Effect::new(move || {
        let current = project.get();
        if current.id.is_empty() {
            return;
        }
        persist(projects, current);
    });

    let run_generation = move |prompt: String, references: Vec<ReferenceImage>| {
        let mask = handle.mask_png();
        let mut started = None;
        session.update(|s| {
            started = Some(s.begin_generation(&project.get_untracked(), &prompt, references, mask));
        });
        let Some(Ok(request)) = started else {
            // Validation failed; the session already carries the banner text.
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = inference::edit_image_with_mask(&request).await;
            let mut updated = project.get_untracked();
            let mut cleared = false;
            session.update(|s| {
                cleared = s.finish_generation(&mut updated, outcome).clear_mask;
            });
            project.set(updated);
            if cleared {
                handle.clear_mask();
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let generate = GenerateAction(Callback::new(move |(prompt, references)| {
        run_generation(prompt, references);
    }));
    provide_context(generate);

    let upload = UploadAction(Callback::new(move |image: String| {
        let mut updated = project.get_untracked();
        session.update(|s| s.load_base_image(&mut updated, image));
        project.set(updated);
        ui.update(EditorUi::note_new_base);
        handle.clear_mask();
    }));
    provide_context(upload);

    let navigate = use_navigate();
    let branch = BranchAction(Callback::new(move |()| {
        let active_image = session.with_untracked(|s| {
            project.with_untracked(|p| p.image_at(s.active).map(str::to_owned))
        });
        let created = project.with_untracked(|p| {
            p.branch_from_version(active_image, uuid::Uuid::new_v4().to_string(), clock::now_iso())
        });
        projects.update(|s| s.add(created.clone()));
        let target = format!("/project/{}", created.id);
        persist(projects, created);
        navigate(&target, NavigateOptions::default());
    }));
    provide_context(branch);

    let on_apply_edit = Callback::new(move |(prompt, references)| {
        ui.update(EditorUi::close_popover);
        run_generation(prompt, references);
    });

    let on_cancel_edit = Callback::new(move |()| {
        ui.update(EditorUi::close_popover);
        // Cancelling discards the drawn selection entirely.
        handle.clear_mask();
    });

    let has_base = move || project.with(|p| p.base_image.is_some());
    let error_text = move || session.with(|s| s.error.clone());

    view! {
        <div class="editor">
            <Sidebar/>
            <main class="editor__stage">
                <Show when=has_base fallback=WelcomeView>
                    <CanvasHost/>
                    <ToolStrip/>
                </Show>
                <Show when=move || error_text().is_some()>
                    <div class="editor__error" role="alert">
                        <span>{move || error_text().unwrap_or_default()}</span>
                        <button on:click=move |_| session.update(EditorSession::dismiss_error)>
                            "Dismiss"
                        </button>
                    </div>
                </Show>
                <Show when=move || session.with(|s| s.loading)>
                    <div class="editor__loading">"Generating..."</div>
                </Show>
            </main>
            <HistoryShelf/>
            {move || {
                ui.with(|u| u.popover).map(|anchor| {
                    view! {
                        <EditPopover anchor on_apply=on_apply_edit on_cancel=on_cancel_edit/>
                    }
                })
            }}
        </div>
    }
}
