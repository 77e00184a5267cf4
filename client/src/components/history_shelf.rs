//! Version history shelf on the right edge of the editor.
//!
//! Lists the original upload plus every generated version, newest first.
//! Clicking a row re-points the session at that version; nothing here ever
//! shortens the history.

use leptos::prelude::*;

use crate::state::project::{ActiveVersion, Project};
use crate::state::session::EditorSession;
use crate::state::ui::EditorUi;

fn row_class(active: bool) -> &'static str {
    if active {
        "history-shelf__row history-shelf__row--active"
    } else {
        "history-shelf__row"
    }
}

/// Display label for a version pointer.
fn version_label(version: ActiveVersion) -> String {
    match version {
        ActiveVersion::Original => "Original".to_owned(),
        ActiveVersion::Entry(i) => format!("Version {}", i + 1),
    }
}

#[component]
fn ShelfRow(version: ActiveVersion, image: String) -> impl IntoView {
    let project = expect_context::<RwSignal<Project>>();
    let session = expect_context::<RwSignal<EditorSession>>();

    let is_active = move || session.with(|s| s.active) == version;
    let on_select = move |_| {
        session.update(|s| {
            if !s.select_version(&project.get_untracked(), version) {
                log::warn!("selected a version that no longer exists");
            }
        });
    };

    view! {
        <button class=move || row_class(is_active()) on:click=on_select>
            <img class="history-shelf__thumb" src=image alt=version_label(version)/>
            <span class="history-shelf__label">{version_label(version)}</span>
        </button>
    }
}

/// The collapsible history sidebar.
#[component]
pub fn HistoryShelf() -> impl IntoView {
    let project = expect_context::<RwSignal<Project>>();
    let ui = expect_context::<RwSignal<EditorUi>>();

    // Newest first; the original upload anchors the bottom of the list.
    let rows = move || {
        project.with(|p| {
            let mut rows: Vec<(ActiveVersion, String)> = p
                .history
                .iter()
                .enumerate()
                .rev()
                .map(|(i, image)| (ActiveVersion::Entry(i), image.clone()))
                .collect();
            if let Some(base) = &p.base_image {
                rows.push((ActiveVersion::Original, base.clone()));
            }
            rows
        })
    };

    let version_count = move || project.with(|p| p.history.len());

    view! {
        <Show
            when=move || ui.with(|u| u.right_sidebar_visible)
            fallback=move || {
                view! {
                    <aside class="history-shelf history-shelf--collapsed">
                        <button
                            class="history-shelf__toggle"
                            title="Show history"
                            on:click=move |_| ui.update(|u| u.right_sidebar_visible = true)
                        >
                            "<"
                        </button>
                    </aside>
                }
            }
        >
            <aside class="history-shelf">
                <button
                    class="history-shelf__toggle"
                    title="Hide history"
                    on:click=move |_| ui.update(|u| u.right_sidebar_visible = false)
                >
                    ">"
                </button>
                <div class="history-shelf__header">
                    <h2>"Session history"</h2>
                    <p>{move || format!("{} version(s) available", version_count())}</p>
                </div>
                <div class="history-shelf__rows">
                    {move || {
                        rows()
                            .into_iter()
                            .map(|(version, image)| view! { <ShelfRow version image/> })
                            .collect_view()
                    }}
                </div>
                <div class="history-shelf__footer">
                    <p>"Click a version to make it active."</p>
                </div>
            </aside>
        </Show>
    }
}
