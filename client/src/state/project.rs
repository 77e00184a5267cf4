//! Project model, folders, reference images, and the version-history
//! operations over them.
//!
//! A project's `history` is the append-only list of generated versions.
//! `ActiveVersion` is a pointer into that list (or the virtual "original"
//! state for the raw upload); selecting a past version only moves the
//! pointer, it never discards entries. Generating from an old version still
//! appends at the end of the list, so every branch stays reachable on one
//! flat timeline.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use serde::{Deserialize, Serialize};

/// Semantic role tags a reference image can carry. Metadata hints for the
/// generation request only; nothing in the editor enforces them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    /// Overall style / mood reference.
    Style,
    /// A specific object or product to place.
    Object,
    /// Lighting reference.
    Lighting,
    /// Background / environment reference.
    Background,
}

/// An auxiliary image attached to the editing session to steer generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub id: String,
    /// Image payload as a data URL.
    pub url: String,
    /// User-editable label, also used by the prompt's slash autocomplete.
    pub name: String,
    #[serde(default)]
    pub types: Vec<ReferenceType>,
}

/// A folder for filing projects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// A home-staging project as persisted by the external store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// The originally uploaded photo, as a data URL. `None` until the first
    /// upload.
    pub base_image: Option<String>,
    /// Generated versions, oldest first. Append-only while editing.
    #[serde(default)]
    pub history: Vec<String>,
    pub folder_id: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: String,
}

/// Pointer into a project's version history.
///
/// `Original` is the raw upload: always selectable, and deliberately
/// distinct from `Entry(0)`, which is the first generated result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveVersion {
    #[default]
    Original,
    Entry(usize),
}

impl Project {
    /// Create an empty project.
    #[must_use]
    pub fn new(id: String, name: String, created_at: String) -> Self {
        Self {
            id,
            name,
            base_image: None,
            history: Vec::new(),
            folder_id: None,
            is_favorite: false,
            is_archived: false,
            created_at,
        }
    }

    /// The image a given pointer refers to, if it exists.
    #[must_use]
    pub fn image_at(&self, version: ActiveVersion) -> Option<&str> {
        match version {
            ActiveVersion::Original => self.base_image.as_deref(),
            ActiveVersion::Entry(i) => self.history.get(i).map(String::as_str),
        }
    }

    /// The most recent state: the last generated version, or the original
    /// upload when nothing has been generated yet.
    #[must_use]
    pub fn latest(&self) -> ActiveVersion {
        if self.history.is_empty() {
            ActiveVersion::Original
        } else {
            ActiveVersion::Entry(self.history.len() - 1)
        }
    }

    /// Whether `version` points at an existing state.
    #[must_use]
    pub fn has_version(&self, version: ActiveVersion) -> bool {
        self.image_at(version).is_some()
    }

    /// Replace the base image. Project progress resets: the history is
    /// emptied and editing starts over from the new upload.
    pub fn set_base_image(&mut self, image: String) {
        self.base_image = Some(image);
        self.history.clear();
    }

    /// Append a generated version and return a pointer to it.
    pub fn append_version(&mut self, image: String) -> ActiveVersion {
        self.history.push(image);
        ActiveVersion::Entry(self.history.len() - 1)
    }

    /// Rename the project. Whitespace is trimmed; an empty result is
    /// rejected and leaves the name unchanged.
    pub fn rename(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.name = trimmed.to_owned();
        true
    }

    /// An independent copy of this project under a new id.
    #[must_use]
    pub fn duplicated(&self, id: String, created_at: String) -> Self {
        Self {
            id,
            name: format!("{} (copy)", self.name),
            created_at,
            is_favorite: false,
            is_archived: false,
            ..self.clone()
        }
    }

    /// Branch: a brand-new project seeded from one visual state of this one.
    ///
    /// The seed is the explicitly given image if any, else the last history
    /// entry, else the base image. The new project starts with that seed as
    /// both its base image and its single history entry; further edits never
    /// link back to the source.
    #[must_use]
    pub fn branch_from_version(&self, image: Option<String>, id: String, created_at: String) -> Self {
        let seed = image
            .or_else(|| self.history.last().cloned())
            .or_else(|| self.base_image.clone());
        Self {
            id,
            name: format!("{} v{}", self.name, self.history.len() + 2),
            base_image: seed.clone(),
            history: seed.into_iter().collect(),
            folder_id: self.folder_id.clone(),
            is_favorite: false,
            is_archived: false,
            created_at,
        }
    }
}

/// Gallery-level state: every project and folder known to this session.
#[derive(Clone, Debug, Default)]
pub struct ProjectsState {
    pub items: Vec<Project>,
    pub folders: Vec<Folder>,
    pub loading: bool,
}

impl ProjectsState {
    /// Look up a project by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Insert a new project at the front of the list.
    pub fn add(&mut self, project: Project) {
        self.items.insert(0, project);
    }

    /// Replace a project in place. Returns false if the id is unknown.
    pub fn update(&mut self, project: Project) -> bool {
        match self.items.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project;
                true
            }
            None => false,
        }
    }

    /// Remove a project by id.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|p| p.id != id);
    }

    /// Flip the favorite flag. Returns the updated project for persistence.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<Project> {
        let project = self.items.iter_mut().find(|p| p.id == id)?;
        project.is_favorite = !project.is_favorite;
        Some(project.clone())
    }

    /// Flip the archived flag. Returns the updated project for persistence.
    pub fn toggle_archive(&mut self, id: &str) -> Option<Project> {
        let project = self.items.iter_mut().find(|p| p.id == id)?;
        project.is_archived = !project.is_archived;
        Some(project.clone())
    }

    /// File a project under a folder (or unfile it with `None`).
    pub fn move_to_folder(&mut self, id: &str, folder_id: Option<String>) -> Option<Project> {
        let project = self.items.iter_mut().find(|p| p.id == id)?;
        project.folder_id = folder_id;
        Some(project.clone())
    }
}
