//! Top-down memoized evaluation of the recurrence.

use super::rules::{Direction, Probe, Rules};
use crate::grid::Position;
use crate::memo::{MemoBackend, MemoEntry};
use crate::score::Score;

/// State of one recursive solve: rules, memo table and call counter.
pub(crate) struct Search<'g, B> {
    rules: Rules<'g>,
    memo: B,
    calls: u64,
}

impl<'g, B: MemoBackend> Search<'g, B> {
    pub fn new(rules: Rules<'g>) -> Self {
        let size = rules.grid().size();
        Self {
            memo: B::for_grid(size, rules.max_steps()),
            rules,
            calls: 0,
        }
    }

    /// Best score from `pos` after `steps` moves, counting `pos` itself.
    ///
    /// `None` stands for a move off the top or left edge. Every invocation
    /// counts as one call, including those settled by a base case.
    pub fn eval(&mut self, pos: Option<Position>, steps: usize) -> Score {
        self.calls += 1;

        let (pos, cell) = match self.rules.probe(pos, steps) {
            Probe::Settled(score) => return score,
            Probe::Open(pos, cell) => (pos, cell),
        };
        let state = (pos.0, pos.1, steps);
        if let Some(entry) = self.memo.get(&state) {
            return entry.score;
        }

        let mut best = Score::Unreachable;
        let mut next = None;
        for direction in Direction::ALL {
            let neighbour = direction.step(pos);
            let score = self.eval(neighbour, steps + 1);
            if score > best {
                best = score;
                next = neighbour;
            }
        }

        let score = best.plus(cell.value());
        self.memo.insert(state, MemoEntry { score, next });
        score
    }

    pub fn into_parts(self) -> (B, u64) {
        (self.memo, self.calls)
    }
}
