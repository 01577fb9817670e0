// LogMerge - core/sorter.rs
//
// Stable merge sort over borrowed slices.
// Core layer: pure functions, no shared state, safe to call from any thread.
//
// Every variant borrows its input and returns a freshly allocated vector:
// the caller's sequence is never reordered in place. Ties always go to the
// left run during a merge, which is what makes all variants stable and
// therefore interchangeable (for a total order the stable result is unique).
//
// For element types whose ordering is not total (f64 with NaN, for
// example) the output is whatever the `<=` comparison dictates. No guard
// is applied and the variants may then disagree with each other.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Strategy selection
// =============================================================================

/// Which merge-sort implementation to run. All produce identical output for
/// totally ordered element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    /// Top-down divide-and-conquer recursion.
    #[default]
    Recursive,

    /// Iterative merges over runs of width 1, 2, 4, ... No recursion.
    BottomUp,

    /// Top-down recursion with the two halves sorted on rayon workers.
    Parallel,
}

impl SortStrategy {
    /// Returns all variants in display order.
    pub fn all() -> &'static [SortStrategy] {
        &[
            SortStrategy::Recursive,
            SortStrategy::BottomUp,
            SortStrategy::Parallel,
        ]
    }

    /// Name as written in config files and on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            SortStrategy::Recursive => "recursive",
            SortStrategy::BottomUp => "bottom-up",
            SortStrategy::Parallel => "parallel",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recursive" | "top-down" => Ok(SortStrategy::Recursive),
            "bottom-up" | "bottom_up" | "iterative" => Ok(SortStrategy::BottomUp),
            "parallel" => Ok(SortStrategy::Parallel),
            other => Err(format!(
                "unknown sort strategy \"{other}\" (expected recursive, bottom-up or parallel)"
            )),
        }
    }
}

/// Sort `sequence` with the chosen strategy.
///
/// `parallel_threshold` only matters for [`SortStrategy::Parallel`].
pub fn sort_with<T>(strategy: SortStrategy, sequence: &[T], parallel_threshold: usize) -> Vec<T>
where
    T: PartialOrd + Clone + Send + Sync,
{
    tracing::trace!(strategy = %strategy, len = sequence.len(), "Sorting sequence");
    match strategy {
        SortStrategy::Recursive => merge_sort(sequence),
        SortStrategy::BottomUp => bottom_up_merge_sort(sequence),
        SortStrategy::Parallel => par_merge_sort(sequence, parallel_threshold),
    }
}

// =============================================================================
// Top-down recursion
// =============================================================================

/// Return a stable, non-decreasing copy of `sequence`.
pub fn merge_sort<T: PartialOrd + Clone>(sequence: &[T]) -> Vec<T> {
    merge_sort_by(sequence, |a, b| a <= b)
}

/// Stable merge sort with a caller-supplied "goes no later than" predicate.
///
/// `le(a, b)` must return true when `a` may precede `b`. On equal elements it
/// must return true as well, otherwise stability is lost.
pub fn merge_sort_by<T, F>(sequence: &[T], le: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    sort_recursive(sequence, &le)
}

/// Stable merge sort ordered by an extracted key.
pub fn merge_sort_by_key<T, K, F>(sequence: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    merge_sort_by(sequence, |a, b| key(a) <= key(b))
}

fn sort_recursive<T, F>(sequence: &[T], le: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    if sequence.len() <= 1 {
        return sequence.to_vec();
    }

    let mid = sequence.len() / 2;
    let left = sort_recursive(&sequence[..mid], le);
    let right = sort_recursive(&sequence[mid..], le);
    merge_by(&left, &right, le)
}

// =============================================================================
// Merge step
// =============================================================================

/// Merge two already-sorted runs into a new sorted vector.
///
/// On equal heads the left element is taken first.
pub fn merge<T: PartialOrd + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    merge_by(left, right, &|a: &T, b: &T| a <= b)
}

fn merge_by<T, F>(left: &[T], right: &[T], le: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    merge_into(left, right, le, &mut merged);
    merged
}

/// Two-pointer merge, appending to `out`.
fn merge_into<T, F>(left: &[T], right: &[T], le: &F, out: &mut Vec<T>)
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if le(&left[i], &right[j]) {
            out.push(left[i].clone());
            i += 1;
        } else {
            out.push(right[j].clone());
            j += 1;
        }
    }

    // At most one of these is non-empty.
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
}

// =============================================================================
// Bottom-up iteration
// =============================================================================

/// Iterative merge sort: same output as [`merge_sort`], no recursion depth.
pub fn bottom_up_merge_sort<T: PartialOrd + Clone>(sequence: &[T]) -> Vec<T> {
    bottom_up_merge_sort_by(sequence, |a, b| a <= b)
}

/// Iterative counterpart of [`merge_sort_by`].
pub fn bottom_up_merge_sort_by<T, F>(sequence: &[T], le: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let len = sequence.len();
    let mut current = sequence.to_vec();
    let mut width = 1;

    while width < len {
        let mut next = Vec::with_capacity(len);
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_into(&current[start..mid], &current[mid..end], &le, &mut next);
            start = end;
        }
        current = next;
        width *= 2;
    }

    current
}

// =============================================================================
// Fork-join parallelism
// =============================================================================

/// Parallel merge sort: halves larger than `threshold` are sorted on rayon
/// workers via `rayon::join`; smaller slices use the sequential recursion.
///
/// Output is identical to [`merge_sort`].
pub fn par_merge_sort<T>(sequence: &[T], threshold: usize) -> Vec<T>
where
    T: PartialOrd + Clone + Send + Sync,
{
    par_merge_sort_by(sequence, threshold, |a, b| a <= b)
}

/// Parallel counterpart of [`merge_sort_by`].
pub fn par_merge_sort_by<T, F>(sequence: &[T], threshold: usize, le: F) -> Vec<T>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    // A threshold below 2 would fork on single elements.
    sort_parallel(sequence, threshold.max(2), &le)
}

fn sort_parallel<T, F>(sequence: &[T], threshold: usize, le: &F) -> Vec<T>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    if sequence.len() <= threshold {
        return sort_recursive(sequence, le);
    }

    let mid = sequence.len() / 2;
    let (left, right) = rayon::join(
        || sort_parallel(&sequence[..mid], threshold, le),
        || sort_parallel(&sequence[mid..], threshold, le),
    );
    merge_by(&left, &right, le)
}

// =============================================================================
// Helpers
// =============================================================================

/// True if every adjacent pair satisfies `a <= b`.
pub fn is_sorted<T: PartialOrd>(sequence: &[T]) -> bool {
    sequence.windows(2).all(|pair| pair[0] <= pair[1])
}
