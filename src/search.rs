//! # Search Engine
//!
//! Classic iterative binary search over a sorted `i32` slice.
//!
//! [`binary_search`] answers the question; [`trace`] answers it the same way
//! while recording every probe so the UI can show how the answer was reached.
//! Both run the one loop in [`search_with`], so they cannot disagree.
//!
//! The input must be sorted ascending. With duplicate values equal to the
//! target, the returned index is whichever match the algorithm probes first:
//! any matching index, implementation-defined among duplicates.

use std::cmp::Ordering;

/// Outcome of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    Found(usize),
    NotFound,
}

impl SearchResult {
    pub fn index(self) -> Option<usize> {
        match self {
            SearchResult::Found(index) => Some(index),
            SearchResult::NotFound => None,
        }
    }
}

/// One iteration of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub left: usize,
    pub mid: usize,
    pub right: usize,
    /// Value stored at `mid`
    pub value: i32,
    /// How `value` compared to the target
    pub ordering: Ordering,
}

/// Every probe made by one search, in order, plus the final result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrace {
    pub target: i32,
    pub probes: Vec<Probe>,
    pub result: SearchResult,
}

/// Search `sorted` for `target`.
pub fn binary_search(sorted: &[i32], target: i32) -> SearchResult {
    search_with(sorted, target, |_| {})
}

/// Search `sorted` for `target`, recording each probe.
pub fn trace(sorted: &[i32], target: i32) -> SearchTrace {
    let mut probes = Vec::new();
    let result = search_with(sorted, target, |probe| probes.push(probe));
    SearchTrace {
        target,
        probes,
        result,
    }
}

/// The search loop, calling `on_probe` once per iteration.
///
/// Bounds are inclusive as in the textbook version. `right` is kept one past
/// the inclusive bound internally so `mid - 1` can never underflow at index 0.
pub fn search_with<F>(sorted: &[i32], target: i32, mut on_probe: F) -> SearchResult
where
    F: FnMut(Probe),
{
    let mut left = 0usize;
    let mut right_exclusive = sorted.len();

    while left < right_exclusive {
        let right = right_exclusive - 1;
        let mid = left + (right - left) / 2;
        let value = sorted[mid];
        let ordering = value.cmp(&target);

        on_probe(Probe {
            left,
            mid,
            right,
            value,
            ordering,
        });

        match ordering {
            Ordering::Equal => return SearchResult::Found(mid),
            Ordering::Less => left = mid + 1,
            Ordering::Greater => right_exclusive = mid,
        }
    }

    SearchResult::NotFound
}
