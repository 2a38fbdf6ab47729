//! Code fence tracking.

/// Tracks whether the current line sits inside a fenced code block, so
/// directive-shaped text in code samples is left alone.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Fence character and length of the open fence, if any.
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed the next line. Must be called before [`in_fence`](Self::in_fence)
    /// so that the opening fence line itself already counts as inside.
    pub(crate) fn update(&mut self, line: &str) {
        let trimmed = line.trim_start();
        let Some(first) = trimmed.chars().next() else {
            return;
        };
        if first != '`' && first != '~' {
            return;
        }
        let run = trimmed.chars().take_while(|&c| c == first).count();
        if run < 3 {
            return;
        }
        match self.open {
            None => self.open = Some((first, run)),
            Some((ch, len)) if ch == first && run >= len => self.open = None,
            Some(_) => {}
        }
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(tracker: &mut FenceTracker, lines: &[&str]) {
        for line in lines {
            tracker.update(line);
        }
    }

    #[test]
    fn opens_and_closes_backtick_fence() {
        let mut tracker = FenceTracker::new();
        tracker.update("```c");
        assert!(tracker.in_fence());
        tracker.update("int x = 1;");
        assert!(tracker.in_fence());
        tracker.update("```");
        assert!(!tracker.in_fence());
    }

    #[test]
    fn tilde_fence_does_not_close_backtick_fence() {
        let mut tracker = FenceTracker::new();
        feed(&mut tracker, &["```", "~~~"]);
        assert!(tracker.in_fence());
        tracker.update("```");
        assert!(!tracker.in_fence());
    }

    #[test]
    fn closing_fence_must_be_at_least_as_long() {
        let mut tracker = FenceTracker::new();
        feed(&mut tracker, &["````", "```"]);
        assert!(tracker.in_fence());
        tracker.update("````");
        assert!(!tracker.in_fence());
    }

    #[test]
    fn short_runs_are_not_fences() {
        let mut tracker = FenceTracker::new();
        tracker.update("``inline``");
        assert!(!tracker.in_fence());
    }
}
