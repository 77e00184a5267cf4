use super::*;

fn project() -> Project {
    Project::new("p1".into(), "Living room".into(), "2025-06-01T12:00:00.000Z".into())
}

fn project_with_base() -> Project {
    let mut p = project();
    p.set_base_image("data:image/png;base64,QkFTRQ==".into());
    p
}

// --- Creation ---

#[test]
fn new_project_is_empty() {
    let p = project();
    assert!(p.base_image.is_none());
    assert!(p.history.is_empty());
    assert!(p.folder_id.is_none());
    assert!(!p.is_favorite);
    assert!(!p.is_archived);
}

#[test]
fn new_project_latest_is_original() {
    assert_eq!(project().latest(), ActiveVersion::Original);
}

// --- Version pointers ---

#[test]
fn original_points_at_base_image() {
    let p = project_with_base();
    assert_eq!(p.image_at(ActiveVersion::Original), p.base_image.as_deref());
}

#[test]
fn original_without_upload_is_absent() {
    assert_eq!(project().image_at(ActiveVersion::Original), None);
}

#[test]
fn entry_pointer_resolves_history() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    p.append_version("v2".into());
    assert_eq!(p.image_at(ActiveVersion::Entry(0)), Some("v1"));
    assert_eq!(p.image_at(ActiveVersion::Entry(1)), Some("v2"));
    assert_eq!(p.image_at(ActiveVersion::Entry(2)), None);
}

#[test]
fn original_is_distinct_from_first_entry() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    assert_ne!(
        p.image_at(ActiveVersion::Original),
        p.image_at(ActiveVersion::Entry(0))
    );
}

// --- Appending ---

#[test]
fn append_grows_history_by_exactly_one_and_points_at_it() {
    let mut p = project_with_base();
    for i in 0..5 {
        let before = p.history.len();
        let current = p.append_version(format!("v{i}"));
        assert_eq!(p.history.len(), before + 1);
        assert_eq!(current, ActiveVersion::Entry(before));
        assert_eq!(p.latest(), current);
    }
}

#[test]
fn selecting_a_version_never_changes_history_length() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    p.append_version("v2".into());
    let len = p.history.len();
    assert!(p.has_version(ActiveVersion::Original));
    assert!(p.has_version(ActiveVersion::Entry(0)));
    assert!(!p.has_version(ActiveVersion::Entry(9)));
    assert_eq!(p.history.len(), len);
}

// --- Base image replacement ---

#[test]
fn set_base_image_resets_progress() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    p.set_base_image("data:image/png;base64,TkVX".into());
    assert!(p.history.is_empty());
    assert_eq!(p.latest(), ActiveVersion::Original);
    assert_eq!(p.base_image.as_deref(), Some("data:image/png;base64,TkVX"));
}

// --- Renaming ---

#[test]
fn rename_trims_whitespace() {
    let mut p = project();
    assert!(p.rename("  Bedroom  "));
    assert_eq!(p.name, "Bedroom");
}

#[test]
fn rename_to_blank_is_rejected() {
    let mut p = project();
    assert!(!p.rename("   "));
    assert_eq!(p.name, "Living room");
}

// --- Duplication ---

#[test]
fn duplicate_copies_content_under_a_new_identity() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    p.is_favorite = true;
    let copy = p.duplicated("p2".into(), "2025-06-02T00:00:00.000Z".into());
    assert_eq!(copy.id, "p2");
    assert_eq!(copy.name, "Living room (copy)");
    assert_eq!(copy.history, p.history);
    assert_eq!(copy.base_image, p.base_image);
    assert!(!copy.is_favorite);
    assert!(!copy.is_archived);
}

// --- Branching ---

#[test]
fn branch_prefers_the_explicit_image() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    let branch = p.branch_from_version(Some("chosen".into()), "p2".into(), "t".into());
    assert_eq!(branch.base_image.as_deref(), Some("chosen"));
    assert_eq!(branch.history, vec!["chosen".to_owned()]);
}

#[test]
fn branch_falls_back_to_last_history_entry() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    p.append_version("v2".into());
    let branch = p.branch_from_version(None, "p2".into(), "t".into());
    assert_eq!(branch.history, vec!["v2".to_owned()]);
}

#[test]
fn branch_of_ungenerated_project_seeds_from_base_image() {
    let p = project_with_base();
    let branch = p.branch_from_version(None, "p2".into(), "t".into());
    assert_eq!(branch.history, vec![p.base_image.clone().unwrap_or_default()]);
    assert_eq!(branch.base_image, p.base_image);
}

#[test]
fn branch_does_not_mutate_the_source() {
    let mut p = project_with_base();
    p.append_version("v1".into());
    let before = p.clone();
    let branch = p.branch_from_version(None, "p2".into(), "t".into());
    assert_eq!(p, before);
    assert_ne!(branch.id, p.id);
}

#[test]
fn branch_of_empty_project_is_empty() {
    let p = project();
    let branch = p.branch_from_version(None, "p2".into(), "t".into());
    assert!(branch.base_image.is_none());
    assert!(branch.history.is_empty());
}

// --- Serde shape ---

#[test]
fn project_serializes_with_camel_case_keys() {
    let p = project_with_base();
    let json = serde_json::to_value(&p).unwrap_or_default();
    assert!(json.get("baseImage").is_some());
    assert!(json.get("folderId").is_some());
    assert!(json.get("isFavorite").is_some());
    assert!(json.get("createdAt").is_some());
}

#[test]
fn project_deserializes_with_missing_flags() {
    let json = r#"{
        "id": "x", "name": "n", "baseImage": null,
        "folderId": null, "createdAt": "t"
    }"#;
    let p: Project = serde_json::from_str(json).unwrap_or_else(|e| panic!("parse: {e}"));
    assert!(p.history.is_empty());
    assert!(!p.is_favorite);
}

// --- Gallery state ---

#[test]
fn projects_state_adds_to_the_front() {
    let mut s = ProjectsState::default();
    s.add(project());
    s.add(Project::new("p2".into(), "Kitchen".into(), "t".into()));
    assert_eq!(s.items[0].id, "p2");
}

#[test]
fn projects_state_update_replaces_by_id() {
    let mut s = ProjectsState::default();
    s.add(project());
    let mut changed = project();
    changed.name = "Renamed".into();
    assert!(s.update(changed));
    assert_eq!(s.find("p1").map(|p| p.name.as_str()), Some("Renamed"));
    assert!(!s.update(Project::new("nope".into(), "x".into(), "t".into())));
}

#[test]
fn projects_state_toggles_are_independent() {
    let mut s = ProjectsState::default();
    s.add(project());
    s.toggle_favorite("p1");
    s.toggle_archive("p1");
    let p = s.find("p1").cloned().unwrap_or_else(|| panic!("missing"));
    assert!(p.is_favorite && p.is_archived);
    s.toggle_favorite("p1");
    let p = s.find("p1").cloned().unwrap_or_else(|| panic!("missing"));
    assert!(!p.is_favorite && p.is_archived);
}

#[test]
fn projects_state_moves_between_folders() {
    let mut s = ProjectsState::default();
    s.add(project());
    let updated = s.move_to_folder("p1", Some("f1".into()));
    assert_eq!(updated.and_then(|p| p.folder_id), Some("f1".to_owned()));
    let updated = s.move_to_folder("p1", None);
    assert_eq!(updated.map(|p| p.folder_id), Some(None));
}

#[test]
fn projects_state_remove_deletes_by_id() {
    let mut s = ProjectsState::default();
    s.add(project());
    s.remove("p1");
    assert!(s.items.is_empty());
}
