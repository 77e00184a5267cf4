//! Reading user-selected image files as data URLs.

/// Read a file and hand its contents to `on_done` as a data URL.
///
/// Failures (unreadable file, non-string result) are logged and dropped;
/// the upload flow simply doesn't advance. Outside the browser this is a
/// no-op.
pub fn read_as_data_url(file: &web_sys::File, on_done: impl Fn(String) + 'static) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Ok(reader) = web_sys::FileReader::new() else {
            return;
        };
        let reader_for_cb = reader.clone();
        let on_loaded = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
            match reader_for_cb.result() {
                Ok(result) => {
                    if let Some(url) = result.as_string() {
                        on_done(url);
                    } else {
                        log::warn!("file read produced a non-string result");
                    }
                }
                Err(e) => log::warn!("file read failed: {e:?}"),
            }
        }) as Box<dyn FnMut(web_sys::ProgressEvent)>);
        reader.set_onloadend(Some(on_loaded.as_ref().unchecked_ref()));
        // The closure must outlive this call; the browser owns it from here.
        on_loaded.forget();

        if let Err(e) = reader.read_as_data_url(file) {
            log::warn!("could not start file read: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file, &on_done);
    }
}
