//! Review session over the day's due items.
//!
//! Items answered below the pass threshold come back in the next round, so a
//! session ends only once every item has been recalled successfully once.
//! Every answer, including retries, is recorded through the [`Scheduler`].

use crate::error::ReviewError;
use crate::models::{Quality, ReviewRecord};
use crate::scheduler::Scheduler;
use tracing::debug;

#[derive(Clone, Debug)]
struct SessionItem {
    item_id: String,
    passed: bool,
}

pub struct ReviewSession {
    user: String,
    items: Vec<SessionItem>,
    current_round: Vec<usize>,
    current_index: usize,
    round_number: usize,
    show_answer: bool,
}

impl ReviewSession {
    pub fn new(user: impl Into<String>, item_ids: Vec<String>) -> Self {
        let items: Vec<SessionItem> = item_ids
            .into_iter()
            .map(|item_id| SessionItem {
                item_id,
                passed: false,
            })
            .collect();
        let current_round = (0..items.len()).collect();

        Self {
            user: user.into(),
            items,
            current_round,
            current_index: 0,
            round_number: 1,
            show_answer: false,
        }
    }

    /// Starts a session over a due queue, keeping its order.
    pub fn from_due(user: impl Into<String>, due: Vec<ReviewRecord>) -> Self {
        Self::new(user, due.into_iter().map(|record| record.item_id).collect())
    }

    pub fn current_item(&self) -> Option<&str> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.items.get(idx))
            .map(|item| item.item_id.as_str())
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    /// Records `quality` for the current item and moves on.
    ///
    /// On a persistence error the session stays on the same item so the
    /// answer can be retried. Returns `None` once the session is complete.
    pub async fn grade_current(
        &mut self,
        scheduler: &Scheduler,
        quality: Quality,
    ) -> Result<Option<ReviewRecord>, ReviewError> {
        let Some(&idx) = self.current_round.get(self.current_index) else {
            return Ok(None);
        };
        let item_id = self.items[idx].item_id.clone();

        let record = scheduler.record_review(&self.user, &item_id, quality).await?;
        self.items[idx].passed = quality.is_pass(scheduler.config().pass_threshold);
        self.advance();

        Ok(Some(record))
    }

    fn advance(&mut self) {
        self.show_answer = false;
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Repeats the items that were not passed this round. With none left the
    /// session is complete.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| !self.items[idx].passed)
            .collect();

        if failed.is_empty() {
            self.current_round.clear();
        } else {
            self.round_number += 1;
            debug!(
                user = %self.user,
                round = self.round_number,
                retry = failed.len(),
                "starting retry round"
            );
            self.current_round = failed;
        }
        self.current_index = 0;
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    /// Items passed so far in the current round.
    pub fn learned_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.items[idx].passed)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} items", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Retry): {} items to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
