//! Level completion tracking and the level-select unlock.

use std::collections::BTreeSet;

use super::error::Rejection;

/// Survives restarts; only lost when the page reloads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    completed: BTreeSet<usize>,
    all_completed: bool,
}

impl Progress {
    /// Marks `level` as completed. The all-completed flag latches once every
    /// level in a catalog of `total` has been cleared.
    pub fn record_completion(&mut self, level: usize, total: usize) {
        self.completed.insert(level);
        if self.completed.len() >= total {
            self.all_completed = true;
        }
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn is_completed(&self, level: usize) -> bool {
        self.completed.contains(&level)
    }

    pub fn all_completed(&self) -> bool {
        self.all_completed
    }

    /// Level select stays locked until everything has been beaten once.
    pub fn check_selection(&self, level: usize, total: usize) -> Result<(), Rejection> {
        if !self.all_completed {
            return Err(Rejection::SelectionLocked);
        }
        if level >= total {
            return Err(Rejection::UnknownLevel(level));
        }
        Ok(())
    }
}

pub fn next_level(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (current + 1) % total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocks_after_every_level_is_completed() {
        let mut progress = Progress::default();
        progress.record_completion(1, 2);
        assert!(!progress.all_completed());
        assert_eq!(progress.check_selection(0, 2), Err(Rejection::SelectionLocked));
        progress.record_completion(1, 2);
        assert!(!progress.all_completed());
        progress.record_completion(0, 2);
        assert!(progress.all_completed());
        assert_eq!(progress.completed().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(progress.check_selection(1, 2), Ok(()));
        assert_eq!(progress.check_selection(2, 2), Err(Rejection::UnknownLevel(2)));
    }

    #[test]
    fn next_level_wraps() {
        assert_eq!(next_level(0, 2), 1);
        assert_eq!(next_level(1, 2), 0);
        assert_eq!(next_level(7, 8), 0);
    }
}
