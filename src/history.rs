const MAX_HISTORY_SIZE: usize = 50;

/// Linear undo/redo log of full document snapshots.
///
/// The log always holds at least one entry (the text the editor started
/// with), so `current()` never has to answer "nothing". Editing while
/// somewhere in the middle of the log discards the forward branch, the
/// same way a browser history does.
#[derive(Debug)]
pub struct EditHistory {
    entries: Vec<String>,
    current_index: usize,
}

impl EditHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        EditHistory {
            entries: vec![initial.into()],
            current_index: 0,
        }
    }

    /// Record a new snapshot
    /// This clears any forward history and appends the new entry.
    /// Pushing the text that is already current is a no-op.
    pub fn push(&mut self, snapshot: String) {
        if self.entries[self.current_index] == snapshot {
            return;
        }

        // If we're in the middle of history, truncate everything after current position
        self.entries.truncate(self.current_index + 1);
        self.entries.push(snapshot);

        // Limit history size by dropping the oldest snapshot
        if self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.remove(0);
        }

        self.current_index = self.entries.len() - 1;
    }

    /// Check if we can step back
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Check if we can step forward
    pub fn can_redo(&self) -> bool {
        self.current_index < self.entries.len() - 1
    }

    /// Step back one snapshot
    /// Returns the snapshot we should restore, or None if already at the oldest.
    pub fn undo(&mut self) -> Option<&str> {
        if self.current_index > 0 {
            self.current_index -= 1;
            return self.entries.get(self.current_index).map(String::as_str);
        }
        None
    }

    /// Step forward one snapshot
    /// Returns the snapshot we should restore, or None if already at the newest.
    pub fn redo(&mut self) -> Option<&str> {
        if self.current_index < self.entries.len() - 1 {
            self.current_index += 1;
            return self.entries.get(self.current_index).map(String::as_str);
        }
        None
    }

    /// Get the current snapshot without navigating
    pub fn current(&self) -> &str {
        &self.entries[self.current_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_navigate() {
        let mut history = EditHistory::new("");

        history.push("one".to_string());
        history.push("one two".to_string());
        history.push("one two three".to_string());

        assert_eq!(history.current(), "one two three");
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some("one two"));
        assert_eq!(history.current(), "one two");
        assert!(history.can_undo());
        assert!(history.can_redo());

        assert_eq!(history.redo(), Some("one two three"));
        assert_eq!(history.current(), "one two three");
    }

    #[test]
    fn test_undo_stops_at_oldest() {
        let mut history = EditHistory::new("seed");

        history.push("edit".to_string());
        assert_eq!(history.undo(), Some("seed"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), "seed");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_stops_at_newest() {
        let mut history = EditHistory::new("seed");

        history.push("edit".to_string());
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), "edit");
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut history = EditHistory::new("a");

        history.push("b".to_string());
        history.push("b".to_string());

        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_push_clears_forward_history() {
        let mut history = EditHistory::new("a");

        history.push("ab".to_string());
        history.push("abc".to_string());
        history.undo();
        history.undo();

        // Now at "a", with "ab" and "abc" ahead
        assert_eq!(history.current(), "a");

        // Pushing a new snapshot should discard "ab" and "abc"
        history.push("aX".to_string());
        assert_eq!(history.current(), "aX");
        assert!(!history.can_redo());
        assert_eq!(history.entries, vec!["a", "aX"]);
    }

    #[test]
    fn test_branch_discard_after_single_undo() {
        let mut history = EditHistory::new("a");

        history.push("ab".to_string());
        history.push("abc".to_string());
        history.undo();
        history.push("abX".to_string());

        assert_eq!(history.entries, vec!["a", "ab", "abX"]);
        assert_eq!(history.current(), "abX");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_size() {
        let mut history = EditHistory::new("seed");

        // Push well past the cap
        for i in 0..120 {
            history.push(format!("snapshot {}", i));
        }

        assert_eq!(history.entries.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.current(), "snapshot 119");

        // The seed and the earliest snapshots were evicted
        let mut oldest = history.current().to_string();
        while let Some(text) = history.undo() {
            oldest = text.to_string();
        }
        assert_eq!(oldest, "snapshot 70");
    }

    #[test]
    fn test_eviction_keeps_current_reachable() {
        let mut history = EditHistory::new("s0");

        // Fill to exactly the cap, then one more
        for i in 1..MAX_HISTORY_SIZE {
            history.push(format!("s{}", i));
        }
        assert_eq!(history.entries.len(), MAX_HISTORY_SIZE);

        history.push("overflow".to_string());
        assert_eq!(history.entries.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.current(), "overflow");
        assert!(history.can_undo());
        assert_eq!(history.undo(), Some(format!("s{}", MAX_HISTORY_SIZE - 1).as_str()));
    }
}
