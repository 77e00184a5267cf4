//! Contextual edit prompt, anchored where the selection stroke ended.
//!
//! Keyboard shortcuts are a scoped resource: the window keydown listener is
//! registered on mount and removed in `on_cleanup`, so it disappears no
//! matter how the popover closes.

use leptos::prelude::*;

use crate::state::project::{ReferenceImage, ReferenceType};
use crate::state::ui::PopoverAnchor;
use crate::util::upload;

/// Anchored prompt popover for editing the selected area.
///
/// `on_apply` receives the prompt and the reference images attached inside
/// the popover; `on_cancel` closes it and discards the selection.
#[component]
pub fn EditPopover(
    anchor: PopoverAnchor,
    on_apply: Callback<(String, Vec<ReferenceImage>)>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let prompt = RwSignal::new(String::new());
    let attachments = RwSignal::new(Vec::<ReferenceImage>::new());
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let apply = move || {
        let text = prompt.get_untracked();
        if !text.trim().is_empty() {
            on_apply.run((text, attachments.get_untracked()));
        }
    };

    // Escape cancels, Enter (without Shift) applies.
    let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
        match ev.key().as_str() {
            "Escape" => on_cancel.run(()),
            "Enter" if !ev.shift_key() => {
                ev.prevent_default();
                apply();
            }
            _ => {}
        }
    });
    on_cleanup(move || keydown.remove());

    let on_attach = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        let name = file.name();
        upload::read_as_data_url(&file, move |url| {
            attachments.update(|list| {
                list.push(ReferenceImage {
                    id: uuid::Uuid::new_v4().to_string(),
                    url,
                    name: name.clone(),
                    types: vec![ReferenceType::Object],
                });
            });
        });
        input.set_value("");
    };

    let style = format!(
        "top: {}px; left: {}px;",
        anchor.y + 10.0,
        anchor.x - 160.0
    );

    view! {
        <div class="edit-popover" style=style>
            <div class="edit-popover__header">
                <h3>"Describe the edit"</h3>
                <button class="edit-popover__close" on:click=move |_| on_cancel.run(())>
                    "×"
                </button>
            </div>
            <textarea
                class="edit-popover__prompt"
                placeholder="e.g. add a floral pattern, switch to blue, add cushions..."
                autofocus=true
                prop:value=move || prompt.get()
                on:input=move |ev| prompt.set(event_target_value(&ev))
            ></textarea>
            <div class="edit-popover__attachments">
                {move || {
                    attachments
                        .get()
                        .into_iter()
                        .map(|reference| {
                            view! {
                                <img
                                    class="edit-popover__attachment"
                                    src=reference.url
                                    alt=reference.name
                                />
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="edit-popover__attach"
                    title="Attach an object image"
                    on:click=move |_| {
                        if let Some(input) = file_input_ref.get() {
                            input.click();
                        }
                    }
                >
                    "+"
                </button>
                <input
                    type="file"
                    accept="image/*"
                    class="edit-popover__file"
                    node_ref=file_input_ref
                    on:change=on_attach
                />
            </div>
            <div class="edit-popover__actions">
                <button
                    class="edit-popover__apply"
                    disabled=move || prompt.get().trim().is_empty()
                    on:click=move |_| apply()
                >
                    "Apply edit"
                </button>
                <button class="edit-popover__cancel" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
            <p class="edit-popover__hint">"Enter to apply · Esc to cancel"</p>
        </div>
    }
}
