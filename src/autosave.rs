use chrono::{DateTime, Local};
use std::time::{Duration, SystemTime};

use crate::content::ContentProvider;
use crate::draft::DraftStore;

/// Quiet period after the last edit before the draft is written to disk.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1500);

/// How long the "saved" confirmation stays in the status bar.
pub const SAVE_FLASH: Duration = Duration::from_secs(2);

/// State management for the debounced draft auto-save
pub struct AutoSaveState {
    /// When the title or content last changed
    pub last_change_time: Option<SystemTime>,
    /// When the draft was last successfully written
    pub last_save_time: Option<SystemTime>,
    /// Whether a save is pending (for debounce)
    pub pending_save: bool,
    /// Show a save confirmation until this time
    flash_until: Option<SystemTime>,
    /// Last saved title and content, to detect changes
    saved_title: String,
    saved_content: String,
}

impl AutoSaveState {
    pub fn new() -> Self {
        AutoSaveState {
            last_change_time: None,
            last_save_time: None,
            pending_save: false,
            flash_until: None,
            saved_title: String::new(),
            saved_content: String::new(),
        }
    }

    /// Mark that the title or content has changed
    pub fn mark_changed(&mut self) {
        self.last_change_time = Some(SystemTime::now());
        self.pending_save = true;
    }

    /// Reset the baseline after loading or clearing a draft, so the
    /// freshly loaded text does not count as an unsaved change.
    pub fn reset(&mut self, title: &str, content: &str) {
        self.saved_title = title.to_string();
        self.saved_content = content.to_string();
        self.last_change_time = None;
        self.pending_save = false;
    }

    /// Whether a pending change has been quiet for at least `debounce`.
    pub fn should_autosave(&self, debounce: Duration) -> bool {
        if !self.pending_save {
            return false;
        }
        match self.last_change_time {
            Some(changed) => match changed.elapsed() {
                Ok(elapsed) => elapsed >= debounce,
                Err(_) => true,
            },
            None => false,
        }
    }

    /// Write the draft if it differs from the last saved state.
    pub fn trigger_save<T: ContentProvider + ?Sized>(
        &mut self,
        title: &str,
        editor: &T,
        store: &DraftStore,
    ) -> Result<(), String> {
        let current_content = editor.get_content();

        if title == self.saved_title && current_content == self.saved_content {
            self.pending_save = false;
            return Ok(());
        }

        self.pending_save = false;
        store.save(title, &current_content)?;

        self.last_save_time = Some(SystemTime::now());
        self.saved_title = title.to_string();
        self.saved_content = current_content;
        Ok(())
    }

    /// Show the save confirmation for [`SAVE_FLASH`].
    pub fn flash_saved(&mut self) {
        self.flash_until = SystemTime::now().checked_add(SAVE_FLASH);
    }

    /// Get the status text for display
    pub fn status_text(&self) -> String {
        if let Some(until) = self.flash_until
            && SystemTime::now() < until
        {
            return "সংরক্ষিত ✓".to_string();
        }

        if self.pending_save {
            return "স্বয়ংক্রিয় সেভ হচ্ছে...".to_string();
        }

        if let Some(save_time) = self.last_save_time {
            format_time_since(save_time)
        } else {
            String::new()
        }
    }
}

impl Default for AutoSaveState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the time since the last save as a short Bengali status string
pub fn format_time_since(time: SystemTime) -> String {
    let now = SystemTime::now();

    match now.duration_since(time) {
        Ok(duration) => {
            let secs = duration.as_secs();

            if secs < 60 {
                "এইমাত্র সেভ হয়েছে".to_string()
            } else if secs < 3600 {
                let mins = secs / 60;
                format!("{} মিনিট আগে সেভ হয়েছে", mins)
            } else if secs < 86400 {
                let hours = secs / 3600;
                format!("{} ঘণ্টা আগে সেভ হয়েছে", hours)
            } else {
                // A day or more: show the absolute date
                let local: DateTime<Local> = time.into();
                format!("সেভ হয়েছে {}", local.format("%Y-%m-%d %H:%M"))
            }
        }
        Err(_) => "সেভ হয়েছে (সময় অজানা)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    struct FixedContent(&'static str);

    impl ContentProvider for FixedContent {
        fn get_content(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_autosave_state_new() {
        let state = AutoSaveState::new();
        assert!(state.last_change_time.is_none());
        assert!(state.last_save_time.is_none());
        assert!(!state.pending_save);
        assert_eq!(state.status_text(), "");
    }

    #[test]
    fn test_mark_changed() {
        let mut state = AutoSaveState::new();
        state.mark_changed();
        assert!(state.last_change_time.is_some());
        assert!(state.pending_save);
    }

    #[test]
    fn test_debounce_window() {
        let mut state = AutoSaveState::new();
        assert!(!state.should_autosave(Duration::ZERO));

        state.mark_changed();
        assert!(state.should_autosave(Duration::ZERO));
        assert!(!state.should_autosave(Duration::from_secs(3600)));
    }

    #[test]
    fn test_trigger_save_writes_and_skips_unchanged() {
        let temp_dir = env::temp_dir().join("lekhak-test-autosave");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = DraftStore::new(temp_dir.join("draft.toml"));
        let mut state = AutoSaveState::new();
        let editor = FixedContent("কিছু লেখা");

        state.mark_changed();
        state.trigger_save("শিরোনাম", &editor, &store).unwrap();
        assert!(!state.pending_save);
        assert!(state.last_save_time.is_some());
        assert_eq!(store.load().content, "কিছু লেখা");

        // Unchanged content does not rewrite the file
        let first_save = state.last_save_time;
        state.mark_changed();
        state.trigger_save("শিরোনাম", &editor, &store).unwrap();
        assert_eq!(state.last_save_time, first_save);
        assert!(!state.pending_save);

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_title_change_alone_triggers_save() {
        let temp_dir = env::temp_dir().join("lekhak-test-autosave-title");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = DraftStore::new(temp_dir.join("draft.toml"));
        let mut state = AutoSaveState::new();
        let editor = FixedContent("একই লেখা");

        state.trigger_save("প্রথম", &editor, &store).unwrap();
        state.trigger_save("দ্বিতীয়", &editor, &store).unwrap();
        assert_eq!(store.load().title, "দ্বিতীয়");

        // Cleanup
        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut state = AutoSaveState::new();
        state.mark_changed();
        state.reset("t", "c");
        assert!(!state.pending_save);
        assert!(state.last_change_time.is_none());
    }

    #[test]
    fn test_flash_status() {
        let mut state = AutoSaveState::new();
        state.flash_saved();
        assert_eq!(state.status_text(), "সংরক্ষিত ✓");
    }

    #[test]
    fn test_format_time_just_now() {
        let formatted = format_time_since(SystemTime::now());
        assert_eq!(formatted, "এইমাত্র সেভ হয়েছে");
    }

    #[test]
    fn test_format_time_minutes() {
        let time = SystemTime::now() - Duration::from_secs(150);
        assert_eq!(format_time_since(time), "2 মিনিট আগে সেভ হয়েছে");
    }

    #[test]
    fn test_format_time_hours() {
        let time = SystemTime::now() - Duration::from_secs(7200);
        assert_eq!(format_time_since(time), "2 ঘণ্টা আগে সেভ হয়েছে");
    }
}
