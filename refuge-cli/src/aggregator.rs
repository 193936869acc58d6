//! Reordering of trial results that may finish out of order.

use crate::executor::{TrialResult, WorkItem};
use std::collections::BTreeMap;

/// Position of a trial in the printed report
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub size: usize,
    pub trial: usize,
}

impl From<&TrialResult> for ResultKey {
    fn from(r: &TrialResult) -> Self {
        Self {
            size: r.size,
            trial: r.trial,
        }
    }
}

impl From<&WorkItem> for ResultKey {
    fn from(w: &WorkItem) -> Self {
        Self {
            size: w.size,
            trial: w.trial,
        }
    }
}

/// Holds back early trials until every trial before them has arrived.
///
/// `expected` is sorted once; `cursor` indexes the next trial to release.
pub struct ResultAggregator {
    expected: Vec<ResultKey>,
    cursor: usize,
    waiting: BTreeMap<ResultKey, TrialResult>,
}

impl ResultAggregator {
    pub fn new(mut expected: Vec<ResultKey>) -> Self {
        expected.sort_unstable();
        Self {
            expected,
            cursor: 0,
            waiting: BTreeMap::new(),
        }
    }

    /// Accepts one result and releases the run of trials it completes
    pub fn add(&mut self, result: TrialResult) -> Vec<TrialResult> {
        self.waiting.insert(ResultKey::from(&result), result);

        let mut released = Vec::new();
        while let Some(key) = self.expected.get(self.cursor) {
            let Some(result) = self.waiting.remove(key) else {
                break;
            };
            released.push(result);
            self.cursor += 1;
        }
        released
    }

    /// Everything still held back, in key order
    pub fn drain(&mut self) -> Vec<TrialResult> {
        std::mem::take(&mut self.waiting).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.expected.len()
    }
}
