//! Storage backends for the search memo.

use std::collections::HashMap;
use std::mem;

use super::{MemoBackend, MemoEntry, State};

/// A fixed-size three-dimensional table indexed by `(row, col, steps)`.
///
/// Every slot starts as `None` ("not computed yet"), which is distinct from a
/// computed [`Score::Unreachable`](crate::Score::Unreachable) entry. The table
/// is allocated up front for all `size * size * (max_steps + 1)` states.
#[derive(Debug)]
pub struct DenseBackend {
    data: Vec<Option<MemoEntry>>,
    size: usize,
    depth: usize,
    filled: usize,
}

impl DenseBackend {
    /// Creates a table for a `size`×`size` grid and step counts `0..=max_steps`.
    pub fn new(size: usize, max_steps: usize) -> Self {
        let depth = max_steps + 1;
        Self {
            data: vec![None; size * size * depth],
            size,
            depth,
            filled: 0,
        }
    }

    fn index(&self, &(row, col, steps): &State) -> Option<usize> {
        (row < self.size && col < self.size && steps < self.depth)
            .then(|| (row * self.size + col) * self.depth + steps)
    }
}

impl MemoBackend for DenseBackend {
    const NAME: &'static str = "dense";

    fn for_grid(size: usize, max_steps: usize) -> Self {
        Self::new(size, max_steps)
    }

    fn get(&self, state: &State) -> Option<&MemoEntry> {
        self.index(state)
            .and_then(|index| self.data[index].as_ref())
    }

    /// # Panics
    ///
    /// Panics if `state` lies outside the dimensions the table was built for.
    fn insert(&mut self, state: State, entry: MemoEntry) {
        let index = self
            .index(&state)
            .unwrap_or_else(|| panic!("state {:?} outside dense table", state));
        if self.data[index].replace(entry).is_none() {
            self.filled += 1;
        }
    }

    fn len(&self) -> usize {
        self.filled
    }

    fn footprint_bytes(&self) -> usize {
        self.data.capacity() * mem::size_of::<Option<MemoEntry>>()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (State, MemoEntry)> + '_> {
        let (size, depth) = (self.size, self.depth);
        Box::new(self.data.iter().enumerate().filter_map(move |(index, slot)| {
            slot.map(|entry| {
                let steps = index % depth;
                let cell = index / depth;
                ((cell / size, cell % size, steps), entry)
            })
        }))
    }
}

/// A HashMap keyed by the state triple, populated only for visited states.
///
/// Absence of a key means "not computed yet".
#[derive(Debug, Default)]
pub struct SparseBackend {
    data: HashMap<State, MemoEntry>,
}

impl SparseBackend {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl MemoBackend for SparseBackend {
    const NAME: &'static str = "sparse";

    fn for_grid(_size: usize, _max_steps: usize) -> Self {
        Self::new()
    }

    fn get(&self, state: &State) -> Option<&MemoEntry> {
        self.data.get(state)
    }

    fn insert(&mut self, state: State, entry: MemoEntry) {
        self.data.insert(state, entry);
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    /// Approximates the table as one key, one value and one control byte per bucket.
    fn footprint_bytes(&self) -> usize {
        self.data.capacity() * (mem::size_of::<(State, MemoEntry)>() + 1)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (State, MemoEntry)> + '_> {
        Box::new(self.data.iter().map(|(state, entry)| (*state, *entry)))
    }
}
