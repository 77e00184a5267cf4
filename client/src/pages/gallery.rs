//! Project gallery: every project and folder, with the CRUD glue over the
//! external store.

use leptos::prelude::*;

use crate::state::project::{Folder, Project, ProjectsState};
use crate::util::clock;

#[cfg(feature = "hydrate")]
use crate::net::api;

/// Ask the user to confirm a destructive action. Off the browser the answer
/// is always no, which keeps deletes impossible outside a real session.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

fn persist(project: Project) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = api::persist_project(&project).await {
            log::warn!("project persist failed: {e}");
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = project;
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let projects = expect_context::<RwSignal<ProjectsState>>();
    let id = project.id.clone();
    let folders = move || projects.with(|s| s.folders.clone());

    let on_favorite = {
        let id = id.clone();
        move |_| {
            if let Some(updated) = projects.try_update(|s| s.toggle_favorite(&id)).flatten() {
                persist(updated);
            }
        }
    };

    let on_archive = {
        let id = id.clone();
        move |_| {
            if let Some(updated) = projects.try_update(|s| s.toggle_archive(&id)).flatten() {
                persist(updated);
            }
        }
    };

    let on_duplicate = {
        let id = id.clone();
        move |_| {
            let copy = projects.with_untracked(|s| {
                s.find(&id)
                    .map(|p| p.duplicated(uuid::Uuid::new_v4().to_string(), clock::now_iso()))
            });
            if let Some(copy) = copy {
                projects.update(|s| s.add(copy.clone()));
                persist(copy);
            }
        }
    };

    let on_delete = {
        let id = id.clone();
        let name = project.name.clone();
        move |_| {
            if !confirm(&format!("Delete \"{name}\"? This cannot be undone.")) {
                return;
            }
            projects.update(|s| s.remove(&id));
            #[cfg(feature = "hydrate")]
            {
                let id = id.clone();
                leptos::task::spawn_local(async move {
                    if let Err(e) = api::delete_project(&id).await {
                        log::warn!("project delete failed: {e}");
                    }
                });
            }
        }
    };

    let on_move = {
        let id = id.clone();
        move |ev: leptos::ev::Event| {
            let folder_id = match event_target_value(&ev).as_str() {
                "" => None,
                value => Some(value.to_owned()),
            };
            if let Some(updated) = projects.try_update(|s| s.move_to_folder(&id, folder_id)).flatten()
            {
                persist(updated);
            }
        }
    };

    let href = format!("/project/{}", project.id);
    let thumbnail = project
        .history
        .last()
        .cloned()
        .or_else(|| project.base_image.clone());
    let favorite_label = if project.is_favorite { "★" } else { "☆" };
    let archive_label = if project.is_archived { "Unarchive" } else { "Archive" };
    let current_folder = project.folder_id.clone().unwrap_or_default();

    view! {
        <div class="gallery__card">
            <a class="gallery__preview" href=href>
                {match thumbnail {
                    Some(src) => view! { <img src=src alt=project.name.clone()/> }.into_any(),
                    None => view! { <div class="gallery__placeholder">"No photo yet"</div> }.into_any(),
                }}
            </a>
            <div class="gallery__meta">
                <span class="gallery__name">{project.name.clone()}</span>
                <span class="gallery__versions">
                    {format!("{} version(s)", project.history.len())}
                </span>
            </div>
            <div class="gallery__actions">
                <button title="Favorite" on:click=on_favorite>{favorite_label}</button>
                <button title="Duplicate" on:click=on_duplicate>"Duplicate"</button>
                <button title="Archive" on:click=on_archive>{archive_label}</button>
                <select prop:value=current_folder on:change=on_move>
                    <option value="">"No folder"</option>
                    {move || {
                        folders()
                            .into_iter()
                            .map(|folder| {
                                view! { <option value=folder.id.clone()>{folder.name.clone()}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <button class="gallery__delete" title="Delete" on:click=on_delete>
                    "Delete"
                </button>
            </div>
        </div>
    }
}

/// The gallery page.
#[component]
pub fn GalleryPage() -> impl IntoView {
    let projects = expect_context::<RwSignal<ProjectsState>>();
    let show_archived = RwSignal::new(false);
    let new_folder_name = RwSignal::new(String::new());

    // Hydrate the gallery from the external store once.
    #[cfg(feature = "hydrate")]
    {
        projects.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            let items = api::fetch_projects().await.unwrap_or_default();
            let folders = api::fetch_folders().await.unwrap_or_default();
            projects.update(|s| {
                s.items = items;
                s.folders = folders;
                s.loading = false;
            });
        });
    }

    let on_create = move |_| {
        let created = Project::new(
            uuid::Uuid::new_v4().to_string(),
            "New project".to_owned(),
            clock::now_iso(),
        );
        projects.update(|s| s.add(created.clone()));
        persist(created);
    };

    let on_create_folder = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = new_folder_name.get_untracked().trim().to_owned();
        if name.is_empty() {
            return;
        }
        let folder = Folder { id: uuid::Uuid::new_v4().to_string(), name };
        projects.update(|s| s.folders.push(folder.clone()));
        new_folder_name.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = api::persist_folder(&folder).await {
                log::warn!("folder persist failed: {e}");
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = folder;
    };

    let visible = move || {
        let archived = show_archived.get();
        projects.with(|s| {
            s.items
                .iter()
                .filter(|p| p.is_archived == archived)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="gallery">
            <header class="gallery__header">
                <h1>"Projects"</h1>
                <div class="gallery__controls">
                    <button class="gallery__create" on:click=on_create>"New project"</button>
                    <label class="gallery__archived-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || show_archived.get()
                            on:change=move |_| show_archived.update(|v| *v = !*v)
                        />
                        "Archived"
                    </label>
                    <form class="gallery__folder-form" on:submit=on_create_folder>
                        <input
                            placeholder="New folder"
                            prop:value=move || new_folder_name.get()
                            on:input=move |ev| new_folder_name.set(event_target_value(&ev))
                        />
                        <button type="submit">"Add folder"</button>
                    </form>
                </div>
            </header>
            <Show when=move || projects.with(|s| s.loading)>
                <p class="gallery__loading">"Loading projects..."</p>
            </Show>
            <div class="gallery__grid">
                {move || {
                    visible()
                        .into_iter()
                        .map(|project| view! { <ProjectCard project/> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
