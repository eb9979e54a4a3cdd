// Persistent storage for the single working draft. The draft is one TOML
// record (title, body, save timestamp) in the platform data directory,
// mirroring how the app treats the editor: one story at a time.

use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{APPLICATION, ORGANIZATION, QUALIFIER};

const DRAFT_FILE_NAME: &str = "draft.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub saved_at: Option<String>,
}

pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: PathBuf) -> Self {
        DraftStore { path }
    }

    /// Store in the platform data directory, e.g.
    /// ~/.local/share/lekhak/draft.toml on Linux.
    pub fn open_default() -> Result<Self, String> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| DraftStore::new(dirs.data_local_dir().join(DRAFT_FILE_NAME)))
            .ok_or_else(|| "Could not determine a data directory for the draft".to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved draft. A missing or unreadable file yields an empty
    /// draft, the editor starts blank rather than refusing to open.
    pub fn load(&self) -> Draft {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Draft::default();
        };
        match toml::from_str::<Draft>(&contents) {
            Ok(draft) => draft,
            Err(err) => {
                eprintln!("Failed to parse draft file {}: {err}", self.path.display());
                Draft::default()
            }
        }
    }

    /// Save the draft, stamping the current local time.
    /// Creates parent directories if they don't exist.
    pub fn save(&self, title: &str, content: &str) -> Result<(), String> {
        let draft = Draft {
            title: title.to_string(),
            content: content.to_string(),
            saved_at: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directories for draft: {}", e))?;
        }

        let toml = toml::to_string_pretty(&draft)
            .map_err(|e| format!("Failed to serialize draft: {}", e))?;

        fs::write(&self.path, toml)
            .map_err(|e| format!("Failed to save draft to '{}': {}", self.path.display(), e))
    }

    /// Delete the saved draft. Deleting a draft that never existed is fine.
    pub fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!(
                "Failed to delete draft '{}': {}",
                self.path.display(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = env::temp_dir().join("lekhak-test-draft");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = DraftStore::new(temp_dir.join("nested/draft.toml"));
        store.save("ছায়া", "একদিন অন্ধকারে...").unwrap();

        let draft = store.load();
        assert_eq!(draft.title, "ছায়া");
        assert_eq!(draft.content, "একদিন অন্ধকারে...");
        assert!(draft.saved_at.is_some());

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_load_missing_file_gives_empty_draft() {
        let store = DraftStore::new(env::temp_dir().join("lekhak-test-missing/draft.toml"));

        let draft = store.load();
        assert_eq!(draft, Draft::default());
    }

    #[test]
    fn test_load_corrupt_file_gives_empty_draft() {
        let temp_dir = env::temp_dir().join("lekhak-test-corrupt");
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).unwrap();

        let path = temp_dir.join("draft.toml");
        fs::write(&path, "title = [not toml").unwrap();

        let store = DraftStore::new(path);
        assert_eq!(store.load(), Draft::default());

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_clear_removes_draft() {
        let temp_dir = env::temp_dir().join("lekhak-test-clear");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = DraftStore::new(temp_dir.join("draft.toml"));
        store.save("t", "c").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());

        // Clearing again is not an error
        store.clear().unwrap();

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }
}
