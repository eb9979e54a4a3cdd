// Bookkeeping for the AI calls running on worker threads: one generate
// slot and one rewrite slot, plus the epoch that marks results as stale
// once the user has cleared the document.

/// Tracks the in-flight generation and rewrite requests.
///
/// `begin_*` hands out the epoch token the worker carries into its
/// completion message; [`RequestState::invalidate`] ends the epoch, so
/// completions still holding an old token report as stale.
#[derive(Debug, Default)]
pub struct RequestState {
    epoch: u64,
    generating: bool,
    rewriting: bool,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generating(&self) -> bool {
        self.generating
    }

    pub fn rewriting(&self) -> bool {
        self.rewriting
    }

    pub fn begin_generate(&mut self) -> u64 {
        self.generating = true;
        self.epoch
    }

    pub fn begin_rewrite(&mut self) -> u64 {
        self.rewriting = true;
        self.epoch
    }

    /// Release the generate slot. Returns whether the result is still
    /// current.
    pub fn finish_generate(&mut self, token: u64) -> bool {
        self.generating = false;
        token == self.epoch
    }

    /// Release the rewrite slot. Returns whether the result is still
    /// current.
    pub fn finish_rewrite(&mut self, token: u64) -> bool {
        self.rewriting = false;
        token == self.epoch
    }

    /// Invalidate everything dispatched so far. In-flight requests keep
    /// their old token and are dropped when they complete.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_with_current_token_is_fresh() {
        let mut state = RequestState::new();

        let token = state.begin_generate();
        assert!(state.generating());

        assert!(state.finish_generate(token));
        assert!(!state.generating());
    }

    #[test]
    fn test_stale_result_dropped_after_clear() {
        let mut state = RequestState::new();
        let token = state.begin_generate();

        state.invalidate();

        // The slot opens up again, only the payload is discarded
        assert!(!state.finish_generate(token));
        assert!(!state.generating());

        let fresh = state.begin_generate();
        assert!(state.finish_generate(fresh));
    }

    #[test]
    fn test_stale_rewrite_dropped_after_clear() {
        let mut state = RequestState::new();
        let token = state.begin_rewrite();

        state.invalidate();

        assert!(!state.finish_rewrite(token));
        assert!(!state.rewriting());
    }

    #[test]
    fn test_generate_and_rewrite_slots_are_independent() {
        let mut state = RequestState::new();

        let generate = state.begin_generate();
        let rewrite = state.begin_rewrite();
        assert!(state.generating());
        assert!(state.rewriting());

        assert!(state.finish_rewrite(rewrite));
        assert!(state.generating());
        assert!(!state.rewriting());

        assert!(state.finish_generate(generate));
        assert!(!state.generating());
    }
}
