//! Wall-clock timestamps for created-at fields.

/// The current time as an ISO-8601 string, matching the format the external
/// store uses. Off the browser (native tests) this returns the epoch.
#[must_use]
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        "1970-01-01T00:00:00.000Z".to_owned()
    }
}
