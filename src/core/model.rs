// LogMerge - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. These types are the shared vocabulary across
// all layers.

use crate::core::sorter::SortStrategy;
use serde::Serialize;

// =============================================================================
// Entry
// =============================================================================

/// A single log timestamp. Entries have no identity beyond their value;
/// duplicates are legal and must survive merging.
pub type Entry = i64;

// =============================================================================
// Batch
// =============================================================================

/// The ordered entries contributed by one source (one server's log file).
///
/// The source index is kept for diagnostics only. It does not survive
/// [`combine`]: the merged output carries bare entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    /// 1-based position of the source in enumeration order.
    pub source_index: usize,

    /// Entries in the order the source supplied them.
    pub entries: Vec<Entry>,
}

impl Batch {
    pub fn new(source_index: usize, entries: Vec<Entry>) -> Self {
        Self {
            source_index,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Concatenate all batches in source order, then intra-batch order.
///
/// Batches are borrowed; the combined sequence is a fresh vector.
pub fn combine(batches: &[Batch]) -> Vec<Entry> {
    let total: usize = batches.iter().map(Batch::len).sum();
    let mut combined = Vec::with_capacity(total);
    for batch in batches {
        combined.extend_from_slice(&batch.entries);
    }
    combined
}

// =============================================================================
// Merge report
// =============================================================================

/// Outcome of one merge job, handed back to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Number of sources that contributed to this merge.
    pub sources: usize,

    /// Combined sequence prior to sorting.
    pub combined: Vec<Entry>,

    /// Stable, non-decreasing permutation of `combined`.
    pub sorted: Vec<Entry>,

    /// Which sorter produced `sorted`.
    pub strategy: SortStrategy,
}

impl MergeReport {
    /// Earliest and latest timestamps, or `None` when nothing was merged.
    pub fn span(&self) -> Option<(Entry, Entry)> {
        match (self.sorted.first(), self.sorted.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_preserves_source_then_batch_order() {
        let batches = vec![
            Batch::new(1, vec![5, 1, 9]),
            Batch::new(2, vec![3]),
            Batch::new(3, vec![2, 2, 8]),
        ];
        assert_eq!(combine(&batches), vec![5, 1, 9, 3, 2, 2, 8]);
        // Inputs are untouched.
        assert_eq!(batches[0].entries, vec![5, 1, 9]);
    }

    #[test]
    fn test_combine_skips_nothing_for_empty_batches() {
        let batches = vec![Batch::new(1, vec![]), Batch::new(2, vec![7])];
        assert_eq!(combine(&batches), vec![7]);
        assert!(combine(&[]).is_empty());
    }

    #[test]
    fn test_report_span() {
        let report = MergeReport {
            sources: 1,
            combined: vec![3, 1, 2],
            sorted: vec![1, 2, 3],
            strategy: SortStrategy::Recursive,
        };
        assert_eq!(report.span(), Some((1, 3)));

        let empty = MergeReport {
            sources: 0,
            combined: vec![],
            sorted: vec![],
            strategy: SortStrategy::Recursive,
        };
        assert_eq!(empty.span(), None);
    }
}
