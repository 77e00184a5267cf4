//! REST helpers for the external project/folder store.
//!
//! The editor never owns persistence: it receives `Project` values and
//! pushes updated ones back through these calls. In the browser they are
//! real HTTP requests via `gloo-net`; on the native (test) build they are
//! stubs, since the store only exists at runtime.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so a flaky store
//! degrades the gallery without crashing the editing session.

#![allow(clippy::unused_async)]

use crate::state::project::{Folder, Project};

/// Fetch every project visible to the current user.
/// Returns `None` when the store is unreachable or off the browser.
pub async fn fetch_projects() -> Option<Vec<Project>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/projects").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<Project>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist one project (create or update).
///
/// # Errors
///
/// Returns an error string when the store refuses or the call fails.
pub async fn persist_project(project: &Project) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{}", project.id);
        let resp = gloo_net::http::Request::put(&url)
            .json(project)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("persist failed: {}", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = project;
        Err("not available off the browser".to_owned())
    }
}

/// Delete a project permanently. Only called after explicit confirmation.
///
/// # Errors
///
/// Returns an error string when the store refuses or the call fails.
pub async fn delete_project(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{id}");
        let resp = gloo_net::http::Request::delete(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("delete failed: {}", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available off the browser".to_owned())
    }
}

/// Fetch every folder.
/// Returns `None` when the store is unreachable or off the browser.
pub async fn fetch_folders() -> Option<Vec<Folder>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/folders").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<Folder>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist one folder (create or rename).
///
/// # Errors
///
/// Returns an error string when the store refuses or the call fails.
pub async fn persist_folder(folder: &Folder) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/folders/{}", folder.id);
        let resp = gloo_net::http::Request::put(&url)
            .json(folder)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("persist failed: {}", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = folder;
        Err("not available off the browser".to_owned())
    }
}
