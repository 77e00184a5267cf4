//! Exporting the active image as a browser download.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

/// Characters that are unsafe in filenames on common platforms.
const UNSAFE: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Normalize a project name into a safe filename stem: spaces become
/// underscores, unsafe and control characters are replaced, and an empty
/// result falls back to "image".
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c == ' ' || UNSAFE.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if stem.is_empty() { "image".to_owned() } else { stem }
}

/// The download filename for a project's exported composition.
#[must_use]
pub fn export_filename(project_name: &str) -> String {
    format!("{}.png", sanitize_filename(project_name))
}

/// Trigger a browser download of `href` (a data URL) under `filename`.
///
/// Creates a transient anchor element, clicks it, and removes it again.
/// Outside the browser this is a no-op.
pub fn trigger_download(href: &str, filename: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(element) = document.create_element("a") else {
            return;
        };
        let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
            return;
        };
        anchor.set_href(href);
        anchor.set_download(filename);
        if body.append_child(&anchor).is_ok() {
            anchor.click();
            if let Err(e) = body.remove_child(&anchor) {
                log::warn!("download anchor cleanup failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (href, filename);
    }
}
