//! Derived project progress aggregate.
//!
//! # Responsibility
//! - Tally task statuses into per-status counts in a single pass.
//! - Derive completion percentage and completeness from the final tally.
//!
//! # Invariants
//! - The four status counts partition `total_tasks` exactly.
//! - `progress_percentage` is in `[0, 100]` and is `0` when there are no tasks.
//! - `is_complete` holds iff `total_tasks > 0` and every task is done.

use serde::{Deserialize, Serialize};

use crate::model::task::TaskStatus;

/// Status distribution and completion for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub in_progress_tasks: u32,
    pub not_started_tasks: u32,
    pub needs_review_tasks: u32,
    pub progress_percentage: u8,
    pub is_complete: bool,
}

impl ProjectProgress {
    /// Zero-valued aggregate for a project without tasks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the aggregate from any collection of task statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        let mut progress = Self::empty();
        for status in statuses {
            progress.record(status);
        }
        progress.finish();
        progress
    }

    /// Number of tasks not yet in `done`.
    pub fn remaining_tasks(&self) -> u32 {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }

    fn record(&mut self, status: TaskStatus) {
        self.total_tasks += 1;
        match status {
            TaskStatus::NotStarted => self.not_started_tasks += 1,
            TaskStatus::InProgress => self.in_progress_tasks += 1,
            TaskStatus::NeedsReview => self.needs_review_tasks += 1,
            TaskStatus::Done => self.completed_tasks += 1,
        }
    }

    fn finish(&mut self) {
        self.progress_percentage = completion_percentage(self.completed_tasks, self.total_tasks);
        self.is_complete = self.total_tasks > 0 && self.completed_tasks == self.total_tasks;
    }
}

/// `round(completed / total * 100)` with halves rounded away from zero.
///
/// Integer arithmetic avoids float edge cases; `total == 0` yields `0`.
pub fn completion_percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    let rounded = (completed * 200 + total) / (total * 2);
    // completed <= total keeps this within 0..=100.
    rounded as u8
}
