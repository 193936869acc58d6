//! Iterative evaluation of the recurrence.
//!
//! Every move increases `steps` by one, so filling the table from
//! `max_steps` down to `0` visits each state after all of its successors.
//! No recursion is involved, so the grid size is bounded by memory only.

use super::rules::{Direction, Probe, Rules};
use crate::grid::Position;
use crate::memo::{DenseBackend, MemoBackend, MemoEntry};
use crate::score::Score;

/// Fills a dense table for every open state and returns it with the number
/// of states evaluated and the score of the start state.
pub(crate) fn tabulate(rules: Rules<'_>) -> (DenseBackend, u64, Score) {
    let size = rules.grid().size();
    let max_steps = rules.max_steps();
    let mut memo = DenseBackend::for_grid(size, max_steps);
    let mut evaluated = 0;

    for steps in (0..=max_steps).rev() {
        for row in 0..size {
            for col in 0..size {
                let Probe::Open(pos, cell) = rules.probe(Some((row, col)), steps) else {
                    continue;
                };
                evaluated += 1;

                let mut best = Score::Unreachable;
                let mut next = None;
                for direction in Direction::ALL {
                    let neighbour = direction.step(pos);
                    let score = lookup(&rules, &memo, neighbour, steps + 1);
                    if score > best {
                        best = score;
                        next = neighbour;
                    }
                }

                memo.insert(
                    (row, col, steps),
                    MemoEntry {
                        score: best.plus(cell.value()),
                        next,
                    },
                );
            }
        }
    }

    let outcome = lookup(&rules, &memo, Some(rules.grid().start()), 0);
    (memo, evaluated, outcome)
}

/// Resolves a state from its base case or the already filled layer.
fn lookup(rules: &Rules<'_>, memo: &DenseBackend, pos: Option<Position>, steps: usize) -> Score {
    match rules.probe(pos, steps) {
        Probe::Settled(score) => score,
        Probe::Open(pos, _) => memo
            .get(&(pos.0, pos.1, steps))
            .map_or(Score::Unreachable, |entry| entry.score),
    }
}
