//! Lazy enumeration of k-subsets in lexicographic order of input position.
//!
//! Subsets are produced by an index-array odometer: the rightmost position
//! that can still move is bumped and every position after it is reset to
//! the smallest admissible value. Memory use is `O(k)` regardless of how many
//! subsets exist, and enumeration can start at any lexicographic rank so the
//! sequence can be split across workers.

use std::iter::FusedIterator;

/// Number of k-subsets of an n-set, `None` on `u128` overflow.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by (i + 1) at every step.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// `indices` holds a combination that has not been handed out yet.
    Fresh,
    Running,
    Done,
}

/// Streaming odometer over the position arrays of all k-subsets of `0..n`.
///
/// Cloning yields an independent cursor; there is no shared state between
/// enumerations.
#[derive(Clone, Debug)]
pub struct CombinationIndices {
    n: usize,
    indices: Vec<usize>,
    state: State,
}

impl CombinationIndices {
    pub fn new(n: usize, k: usize) -> Self {
        let state = if k > n { State::Done } else { State::Fresh };
        Self {
            n,
            indices: (0..k.min(n)).collect(),
            state,
        }
    }

    /// Position the cursor on the combination of lexicographic rank `rank`
    /// (0-based). Ranks past the end yield an exhausted cursor.
    pub fn starting_at(n: usize, k: usize, rank: u128) -> Self {
        let total = binomial(n, k).unwrap_or(u128::MAX);
        if k > n || rank >= total {
            return Self {
                n,
                indices: Vec::new(),
                state: State::Done,
            };
        }

        let mut indices = Vec::with_capacity(k);
        let mut remaining = rank;
        let mut candidate = 0;
        for slot in 0..k {
            loop {
                // Subsets whose `slot` position is `candidate`.
                let block = binomial(n - candidate - 1, k - slot - 1)
                    .unwrap_or(u128::MAX);
                if remaining < block {
                    indices.push(candidate);
                    candidate += 1;
                    break;
                }
                remaining -= block;
                candidate += 1;
            }
        }

        Self {
            n,
            indices,
            state: State::Fresh,
        }
    }

    /// Advance to the next combination and borrow its positions.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.state {
            State::Done => return None,
            State::Fresh => {
                self.state = State::Running;
                return Some(self.indices.as_slice());
            }
            State::Running => {}
        }

        let k = self.indices.len();
        let Some(pivot) =
            (0..k).rev().find(|&i| self.indices[i] < self.n - k + i)
        else {
            self.state = State::Done;
            return None;
        };

        self.indices[pivot] += 1;
        for i in pivot + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        Some(self.indices.as_slice())
    }
}

/// Iterator over every k-subset of `items`, preserving input order within
/// each subset.
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    cursor: CombinationIndices,
    remaining: Option<u128>,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Self {
        Self {
            items,
            cursor: CombinationIndices::new(items.len(), k),
            remaining: binomial(items.len(), k),
        }
    }
}

/// Shorthand for [`Combinations::new`].
pub fn combinations<T>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations::new(items, k)
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        let positions = self.cursor.advance()?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(positions.iter().map(|&i| &items[i]).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining.and_then(|r| usize::try_from(r).ok()) {
            Some(exact) => (exact, Some(exact)),
            None => (usize::MAX, None),
        }
    }
}

impl<T> FusedIterator for Combinations<'_, T> {}
