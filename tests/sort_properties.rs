// LogMerge - tests/sort_properties.rs
//
// Property tests for the merge sorter over randomly generated sequences.

use logmerge::core::sorter::{
    bottom_up_merge_sort, bottom_up_merge_sort_by, is_sorted, merge_sort, merge_sort_by,
    par_merge_sort, par_merge_sort_by,
};
use proptest::prelude::*;

/// Sorting with the standard library's stable sort gives the reference
/// answer for multiset equality.
fn reference_sort(input: &[i64]) -> Vec<i64> {
    let mut expected = input.to_vec();
    expected.sort();
    expected
}

proptest! {
    #[test]
    fn sorted_output_is_ordered_permutation(input in prop::collection::vec(any::<i64>(), 0..300)) {
        let sorted = merge_sort(&input);
        prop_assert_eq!(sorted.len(), input.len());
        prop_assert!(is_sorted(&sorted));
        prop_assert_eq!(sorted, reference_sort(&input));
    }

    #[test]
    fn sorting_is_idempotent(input in prop::collection::vec(-50i64..50, 0..200)) {
        let once = merge_sort(&input);
        let twice = merge_sort(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn input_is_left_untouched(input in prop::collection::vec(any::<i64>(), 0..200)) {
        let snapshot = input.clone();
        let _ = merge_sort(&input);
        let _ = bottom_up_merge_sort(&input);
        let _ = par_merge_sort(&input, 8);
        prop_assert_eq!(input, snapshot);
    }

    #[test]
    fn equal_keys_keep_input_order(keys in prop::collection::vec(0i64..8, 0..200)) {
        // Tag every key with its input position; ties must come out in tag order.
        let tagged: Vec<(i64, usize)> = keys.iter().copied().zip(0..).collect();
        let le = |a: &(i64, usize), b: &(i64, usize)| a.0 <= b.0;

        let sorted = merge_sort_by(&tagged, le);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }

        prop_assert_eq!(&bottom_up_merge_sort_by(&tagged, le), &sorted);
        prop_assert_eq!(&par_merge_sort_by(&tagged, 4, le), &sorted);
    }

    #[test]
    fn strategies_agree(
        input in prop::collection::vec(any::<i64>(), 0..500),
        threshold in 0usize..64,
    ) {
        let expected = merge_sort(&input);
        prop_assert_eq!(&bottom_up_merge_sort(&input), &expected);
        prop_assert_eq!(&par_merge_sort(&input, threshold), &expected);
    }
}
