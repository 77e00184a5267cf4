//! Welcome panel shown until the project has a base image.

use leptos::prelude::*;

use crate::pages::editor::UploadAction;
use crate::util::upload;

/// Upload call-to-action covering the canvas area of an empty project.
#[component]
pub fn WelcomeView() -> impl IntoView {
    let upload_base = expect_context::<UploadAction>();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let on_pick = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        upload::read_as_data_url(&file, move |url| upload_base.0.run(url));
        input.set_value("");
    };

    view! {
        <div class="welcome">
            <div class="welcome__card">
                <h2>"What are we staging today?"</h2>
                <ol class="welcome__steps">
                    <li>"Upload a photo of the room"</li>
                    <li>"Mask the area you want to change"</li>
                    <li>"Describe the furniture or style"</li>
                    <li>"Download and share the result"</li>
                </ol>
                <button class="welcome__upload" on:click=move |_| {
                    if let Some(input) = file_input_ref.get() {
                        input.click();
                    }
                }>
                    "Upload photo"
                </button>
                <input
                    type="file"
                    accept="image/*"
                    class="welcome__file"
                    node_ref=file_input_ref
                    on:change=on_pick
                />
            </div>
        </div>
    }
}
