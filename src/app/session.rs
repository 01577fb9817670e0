// LogMerge - app/session.rs
//
// Merge orchestration: combine per-source batches into one sequence and
// hand it to the sorter. Each merge job owns its inputs for the duration
// of the call; nothing is shared between jobs, so independent jobs can run
// on rayon workers side by side.

use crate::core::model::{self, Batch, MergeReport};
use crate::core::sorter::{self, SortStrategy};
use crate::util::constants;
use rayon::prelude::*;
use std::time::Instant;

/// Tunables for a merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Which sorter implementation to use.
    pub strategy: SortStrategy,

    /// Fork-join cut-off for `SortStrategy::Parallel`.
    pub parallel_threshold: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            strategy: SortStrategy::default(),
            parallel_threshold: constants::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Combine `batches` in source order and sort the result.
///
/// The batches are only borrowed; the report owns fresh copies of both the
/// combined and the sorted sequence.
pub fn merge_batches(batches: &[Batch], options: &MergeOptions) -> MergeReport {
    let started = Instant::now();
    let combined = model::combine(batches);

    tracing::debug!(
        sources = batches.len(),
        entries = combined.len(),
        strategy = %options.strategy,
        "Merging batches"
    );

    let sorted = sorter::sort_with(options.strategy, &combined, options.parallel_threshold);

    tracing::info!(
        sources = batches.len(),
        entries = sorted.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Merge complete"
    );

    MergeReport {
        sources: batches.len(),
        combined,
        sorted,
        strategy: options.strategy,
    }
}

/// Run several independent merge jobs in parallel.
///
/// Reports come back in the same order as `jobs`.
pub fn merge_jobs(jobs: &[Vec<Batch>], options: &MergeOptions) -> Vec<MergeReport> {
    tracing::debug!(jobs = jobs.len(), "Dispatching merge jobs");
    jobs.par_iter()
        .map(|batches| merge_batches(batches, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_servers() -> Vec<Batch> {
        vec![
            Batch::new(1, vec![5, 1, 9]),
            Batch::new(2, vec![3]),
            Batch::new(3, vec![2, 2, 8]),
        ]
    }

    #[test]
    fn test_merge_batches_reports_combined_and_sorted() {
        let batches = three_servers();
        let report = merge_batches(&batches, &MergeOptions::default());
        assert_eq!(report.sources, 3);
        assert_eq!(report.combined, vec![5, 1, 9, 3, 2, 2, 8]);
        assert_eq!(report.sorted, vec![1, 2, 2, 3, 5, 8, 9]);
        assert_eq!(report.strategy, SortStrategy::Recursive);
        // Caller's batches are untouched.
        assert_eq!(batches, three_servers());
    }

    #[test]
    fn test_every_strategy_agrees() {
        for strategy in SortStrategy::all() {
            let options = MergeOptions {
                strategy: *strategy,
                parallel_threshold: 2,
            };
            let report = merge_batches(&three_servers(), &options);
            assert_eq!(report.sorted, vec![1, 2, 2, 3, 5, 8, 9], "strategy {strategy}");
            assert_eq!(report.strategy, *strategy);
        }
    }

    #[test]
    fn test_no_batches_yields_empty_report() {
        let report = merge_batches(&[], &MergeOptions::default());
        assert_eq!(report.sources, 0);
        assert!(report.combined.is_empty());
        assert!(report.sorted.is_empty());
    }

    #[test]
    fn test_merge_jobs_keeps_job_order() {
        let jobs = vec![
            three_servers(),
            vec![Batch::new(1, vec![4, 4, 4, 4])],
            vec![],
            vec![Batch::new(1, vec![1, 2, 3]), Batch::new(2, vec![4, 5])],
        ];
        let reports = merge_jobs(&jobs, &MergeOptions::default());
        let sorted: Vec<Vec<i64>> = reports.into_iter().map(|r| r.sorted).collect();
        assert_eq!(
            sorted,
            vec![
                vec![1, 2, 2, 3, 5, 8, 9],
                vec![4, 4, 4, 4],
                vec![],
                vec![1, 2, 3, 4, 5],
            ]
        );
    }
}
