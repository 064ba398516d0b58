use std::fs;
use attachment_editor::editor::preferences::{
    load_preferences_from, save_preferences_to, EditorPreferences,
};

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let preferences = EditorPreferences {
        take_selection: true,
        auto_advance_slots: false,
        create_transaction: false,
    };
    save_preferences_to(&preferences, &path);
    assert!(path.exists());

    let loaded = load_preferences_from(&path);
    assert_eq!(loaded, preferences);
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("preferences.json");

    save_preferences_to(&EditorPreferences::default(), &path);
    assert!(path.exists());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_written.json");

    let loaded = load_preferences_from(&path);
    assert_eq!(loaded, EditorPreferences::default());
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "{ not json at all").unwrap();

    let loaded = load_preferences_from(&path);
    assert_eq!(loaded, EditorPreferences::default());
}

#[test]
fn test_unknown_fields_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(
        &path,
        r#"{
            "take_selection": true,
            "auto_advance_slots": true,
            "create_transaction": true,
            "from_a_newer_version": 42
        }"#,
    )
    .unwrap();

    let loaded = load_preferences_from(&path);
    assert!(loaded.take_selection);
}
