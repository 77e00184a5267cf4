//! Left sidebar: project identity, upload, prompt, references, actions.
//!
//! The prompt textarea supports a slash command: typing `/` filters the
//! session's reference images by name and splices the chosen name into the
//! text at the cursor.

use leptos::prelude::*;

use crate::pages::editor::{BranchAction, GenerateAction, UploadAction};
use crate::state::project::{Project, ReferenceImage, ReferenceType};
use crate::state::session::{self, EditorSession, SlashToken};
use crate::state::ui::EditorUi;
use crate::util::{download, upload};

fn type_tag(reference_type: ReferenceType) -> &'static str {
    match reference_type {
        ReferenceType::Style => "style",
        ReferenceType::Object => "object",
        ReferenceType::Lighting => "lighting",
        ReferenceType::Background => "background",
    }
}

/// The sidebar's collapsed rail with just an expand button.
#[component]
fn CollapsedRail() -> impl IntoView {
    let ui = expect_context::<RwSignal<EditorUi>>();
    view! {
        <aside class="sidebar sidebar--collapsed">
            <button
                class="sidebar__toggle"
                title="Show controls"
                on:click=move |_| ui.update(|u| u.left_sidebar_visible = true)
            >
                ">"
            </button>
        </aside>
    }
}

/// Left sidebar with project controls and the generation prompt.
#[component]
pub fn Sidebar() -> impl IntoView {
    let project = expect_context::<RwSignal<Project>>();
    let session = expect_context::<RwSignal<EditorSession>>();
    let ui = expect_context::<RwSignal<EditorUi>>();
    let generate = expect_context::<GenerateAction>();
    let upload_base = expect_context::<UploadAction>();
    let branch = expect_context::<BranchAction>();

    let base_input_ref = NodeRef::<leptos::html::Input>::new();
    let reference_input_ref = NodeRef::<leptos::html::Input>::new();
    let prompt_ref = NodeRef::<leptos::html::Textarea>::new();
    let slash = RwSignal::new(None::<SlashToken>);
    let cursor = RwSignal::new(0_usize);

    let on_name_change = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        project.update(|p| {
            if !p.rename(&name) {
                log::info!("ignored rename to a blank name");
            }
        });
    };

    let on_prompt_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let position = prompt_ref
            .get()
            .and_then(|t| t.selection_start().unwrap_or(None))
            .map_or(value.len(), |v| v as usize);
        session.update(|s| s.prompt = value.clone());
        cursor.set(position);
        slash.set(session::slash_token_at(&value, position));
    };

    let complete_with = move |name: String| {
        let Some(token) = slash.get_untracked() else {
            return;
        };
        let (text, new_cursor) =
            session::apply_completion(&session.with_untracked(|s| s.prompt.clone()), &token, cursor.get_untracked(), &name);
        session.update(|s| s.prompt = text);
        slash.set(None);
        if let Some(textarea) = prompt_ref.get() {
            #[allow(clippy::cast_possible_truncation)]
            if let Err(e) = textarea.set_selection_range(new_cursor as u32, new_cursor as u32) {
                log::warn!("could not restore prompt cursor: {e:?}");
            }
        }
    };

    let suggestions = move || {
        slash.get().map_or_else(Vec::new, |token| {
            session.with(|s| {
                session::matching_references(&s.references, &token.query)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    };

    let on_pick_base = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        let upload_base = upload_base;
        upload::read_as_data_url(&file, move |url| upload_base.0.run(url));
        input.set_value("");
    };

    let on_pick_reference = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        let name = file.name();
        upload::read_as_data_url(&file, move |url| {
            session.update(|s| {
                s.add_reference(ReferenceImage {
                    id: uuid::Uuid::new_v4().to_string(),
                    url,
                    name: name.clone(),
                    types: vec![ReferenceType::Object],
                });
            });
        });
        input.set_value("");
    };

    let on_generate = move |_| {
        let prompt = session.with_untracked(|s| s.prompt.clone());
        let references = session.with_untracked(|s| s.references.clone());
        generate.0.run((prompt, references));
    };

    let on_download = move |_| {
        let active = session.with_untracked(|s| s.active);
        let image = project.with_untracked(|p| p.image_at(active).map(str::to_owned));
        if let Some(image) = image {
            let filename =
                download::export_filename(&project.with_untracked(|p| p.name.clone()));
            download::trigger_download(&image, &filename);
        }
    };

    let has_base = move || project.with(|p| p.base_image.is_some());
    let loading = move || session.with(|s| s.loading);

    view! {
        <Show when=move || ui.with(|u| u.left_sidebar_visible) fallback=CollapsedRail>
            <aside class="sidebar">
                <div class="sidebar__header">
                    <a class="sidebar__back" href="/">"All projects"</a>
                    <button
                        class="sidebar__toggle"
                        title="Hide controls"
                        on:click=move |_| ui.update(|u| u.left_sidebar_visible = false)
                    >
                        "<"
                    </button>
                </div>

                <input
                    class="sidebar__project-name"
                    prop:value=move || project.with(|p| p.name.clone())
                    on:change=on_name_change
                />

                <div class="sidebar__section">
                    <button class="sidebar__upload" on:click=move |_| {
                        if let Some(input) = base_input_ref.get() {
                            input.click();
                        }
                    }>
                        {move || if has_base() { "Replace photo" } else { "Upload photo" }}
                    </button>
                    <input
                        type="file"
                        accept="image/*"
                        class="sidebar__file"
                        node_ref=base_input_ref
                        on:change=on_pick_base
                    />
                </div>

                <div class="sidebar__section sidebar__prompt">
                    <label>"Describe the change"</label>
                    <textarea
                        node_ref=prompt_ref
                        placeholder="e.g. add a blue sofa along the wall (type / to insert a reference)"
                        prop:value=move || session.with(|s| s.prompt.clone())
                        on:input=on_prompt_input
                    ></textarea>
                    <Show when=move || !suggestions().is_empty()>
                        <ul class="sidebar__suggestions">
                            {move || {
                                suggestions()
                                    .into_iter()
                                    .map(|reference| {
                                        let name = reference.name.clone();
                                        view! {
                                            <li>
                                                <button on:click=move |_| complete_with(name.clone())>
                                                    {reference.name.clone()}
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                </div>

                <div class="sidebar__section">
                    <label>"Reference images"</label>
                    <div class="sidebar__references">
                        {move || {
                            session
                                .with(|s| s.references.clone())
                                .into_iter()
                                .map(|reference| {
                                    view! {
                                        <div class="sidebar__reference">
                                            <img src=reference.url alt=reference.name.clone()/>
                                            <span>{reference.name}</span>
                                            <span class="sidebar__reference-tags">
                                                {reference
                                                    .types
                                                    .iter()
                                                    .map(|t| type_tag(*t))
                                                    .collect::<Vec<_>>()
                                                    .join(" · ")}
                                            </span>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                    <button class="sidebar__add-reference" on:click=move |_| {
                        if let Some(input) = reference_input_ref.get() {
                            input.click();
                        }
                    }>
                        "Add reference"
                    </button>
                    <input
                        type="file"
                        accept="image/*"
                        class="sidebar__file"
                        node_ref=reference_input_ref
                        on:change=on_pick_reference
                    />
                </div>

                <div class="sidebar__section sidebar__actions">
                    <button
                        class="sidebar__generate"
                        disabled=move || loading() || !has_base()
                        on:click=on_generate
                    >
                        {move || if loading() { "Generating..." } else { "Generate" }}
                    </button>
                    <button class="sidebar__download" disabled=move || !has_base() on:click=on_download>
                        "Download composition"
                    </button>
                    <button
                        class="sidebar__branch"
                        title="Start a new project from the active version"
                        disabled=move || !has_base()
                        on:click=move |_| branch.0.run(())
                    >
                        "New project from version"
                    </button>
                    <button
                        class="sidebar__history-toggle"
                        on:click=move |_| ui.update(|u| u.right_sidebar_visible = !u.right_sidebar_visible)
                    >
                        "History"
                    </button>
                </div>
            </aside>
        </Show>
    }
}
