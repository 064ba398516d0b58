//! Persistence of editor preferences.
//!
//! Preferences are stored in `<config_dir>/attachment-editor/preferences.json`.
//! Loading never fails: any problem falls back to defaults. Saving logs a
//! warning and swallows errors, since preferences not saving is non-critical.

use std::fs;
use std::path::{Path, PathBuf};
use log::warn;
use serde::{Serialize, Deserialize};

const CONFIG_DIR_NAME: &str = "attachment-editor";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorPreferences {
    /// Seed the first reference slots from the current selection when the
    /// target has no references yet.
    pub take_selection: bool,
    /// After a pick lands in the active slot, advance to the next slot.
    pub auto_advance_slots: bool,
    /// Open an undo transaction for the lifetime of the session.
    pub create_transaction: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            take_selection: false,
            auto_advance_slots: true,
            create_transaction: true,
        }
    }
}

impl EditorPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Returns the path to the preferences file, or None if the config
/// directory cannot be determined.
pub fn get_preferences_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join(CONFIG_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

pub fn load_preferences() -> EditorPreferences {
    let Some(path) = get_preferences_path() else {
        warn!("Could not determine config directory, using default preferences");
        return EditorPreferences::default();
    };
    load_preferences_from(&path)
}

pub fn load_preferences_from(path: &Path) -> EditorPreferences {
    if !path.exists() {
        // First run or file was deleted - silently use defaults
        return EditorPreferences::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(preferences) => preferences,
            Err(err) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), err);
                EditorPreferences::default()
            }
        },
        Err(err) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), err);
            EditorPreferences::default()
        }
    }
}

pub fn save_preferences(preferences: &EditorPreferences) {
    let Some(path) = get_preferences_path() else {
        warn!("Could not determine config directory, preferences not saved");
        return;
    };
    save_preferences_to(preferences, &path);
}

pub fn save_preferences_to(preferences: &EditorPreferences, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory {}: {}", parent.display(), err);
            return;
        }
    }

    let json = match serde_json::to_string_pretty(preferences) {
        Ok(json) => json,
        Err(err) => {
            warn!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    if let Err(err) = fs::write(path, json) {
        warn!("Failed to write {}: {}", path.display(), err);
    }
}
