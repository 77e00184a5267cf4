//! Application state: projects, the editing session, and editor chrome.

pub mod project;
pub mod session;
pub mod ui;
