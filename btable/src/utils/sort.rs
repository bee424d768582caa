//! Deterministic stable sort.
//!
//! A TimSort without galloping: the slice is cut into natural runs, short runs
//! are extended with binary insertion sort, and runs are merged pairwise. The
//! number of comparator calls depends only on the input order and the
//! comparator's answers, so callers can observe (and rely on) it.

use std::cmp::Ordering;

/// Slices shorter than this are sorted as a single insertion-sorted run.
const MIN_MERGE: usize = 64;

/// Sort `items` in place, keeping equal elements in their input order.
///
/// While detecting runs the comparator is called as `compare(later, earlier)`;
/// during insertion as `compare(pivot, element)`; during merges as
/// `compare(right, left)`. An element is only moved before another when the
/// comparator answers [`Ordering::Less`].
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let min_run = min_run_length(len);
    let mut runs: Vec<(usize, usize)> = Vec::new();

    let mut low = 0;
    while low < len {
        let remaining = len - low;
        let mut run_len = count_and_make_run(&mut items[low..], &mut compare);
        if run_len < min_run {
            let forced = min_run.min(remaining);
            binary_insertion_sort(&mut items[low..low + forced], run_len, &mut compare);
            run_len = forced;
        }
        runs.push((low, run_len));
        low += run_len;
    }

    while runs.len() > 1 {
        let mut merged = Vec::with_capacity(runs.len() / 2 + 1);
        let mut i = 0;
        while i + 1 < runs.len() {
            let (start, left_len) = runs[i];
            let (_, right_len) = runs[i + 1];
            merge(
                &mut items[start..start + left_len + right_len],
                left_len,
                &mut compare,
            );
            merged.push((start, left_len + right_len));
            i += 2;
        }
        if i < runs.len() {
            merged.push(runs[i]);
        }
        runs = merged;
    }
}

fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Length of the run starting at the beginning of `items`.
/// Strictly descending runs are reversed in place.
fn count_and_make_run<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len == 1 {
        return 1;
    }

    let mut run_len = 2;
    let descending = compare(&items[1], &items[0]) == Ordering::Less;

    for idx in 2..len {
        let order = compare(&items[idx], &items[idx - 1]);
        let continues = if descending {
            order == Ordering::Less
        } else {
            order != Ordering::Less
        };
        if !continues {
            break;
        }
        run_len += 1;
    }

    if descending {
        items[..run_len].reverse();
    }
    run_len
}

/// Insert `items[sorted..]` one by one into the sorted prefix `items[..sorted]`.
fn binary_insertion_sort<T, F>(items: &mut [T], sorted: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let start = sorted.max(1);
    for i in start..items.len() {
        let mut left = 0;
        let mut right = i;
        while left < right {
            let mid = left + ((right - left) >> 1);
            if compare(&items[i], &items[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        items[left..=i].rotate_right(1);
    }
}

/// Merge the sorted halves `items[..mid]` and `items[mid..]`.
fn merge<T, F>(items: &mut [T], mid: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let left: Vec<T> = items[..mid].to_vec();
    let mut i = 0;
    let mut j = mid;
    let mut k = 0;

    while i < left.len() && j < items.len() {
        if compare(&items[j], &left[i]) == Ordering::Less {
            items[k] = items[j].clone();
            j += 1;
        } else {
            items[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }

    while i < left.len() {
        items[k] = left[i].clone();
        i += 1;
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_counting(items: &mut [i32]) -> usize {
        let mut calls = 0;
        stable_sort_by(items, |a, b| {
            calls += 1;
            a.cmp(b)
        });
        calls
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<i32> = vec![];
        assert_eq!(sort_counting(&mut empty), 0);

        let mut one = vec![7];
        assert_eq!(sort_counting(&mut one), 0);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_sorted_input_uses_one_pass() {
        let mut items = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(sort_counting(&mut items), 5);
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_strictly_descending_run_is_reversed() {
        let mut items = vec![6, 5, 4, 3, 2, 1];
        assert_eq!(sort_counting(&mut items), 5);
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_short_run_then_insertion() {
        // Run [3, 1] (reversed), then 2 is inserted with two comparisons.
        let mut items = vec![3, 1, 2];
        assert_eq!(sort_counting(&mut items), 4);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_min_run_length() {
        assert_eq!(min_run_length(6), 6);
        assert_eq!(min_run_length(63), 63);
        assert_eq!(min_run_length(64), 32);
        assert_eq!(min_run_length(100), 50);
        assert_eq!(min_run_length(65), 33);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')];
        stable_sort_by(&mut items, |a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]);
    }

    #[test]
    fn test_large_input_matches_std_stable_sort() {
        // Enough elements to force several runs and merges.
        let mut seed: u32 = 12345;
        let mut items: Vec<(u32, usize)> = (0..300)
            .map(|i| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                ((seed >> 16) % 17, i)
            })
            .collect();

        let mut expected = items.clone();
        expected.sort_by(|a, b| a.0.cmp(&b.0));

        stable_sort_by(&mut items, |a, b| a.0.cmp(&b.0));
        assert_eq!(items, expected);
    }

    #[test]
    fn test_sorting_twice_is_idempotent() {
        let mut items = vec![5, 3, 9, 1, 3, 7, 2];
        sort_counting(&mut items);
        let once = items.clone();
        sort_counting(&mut items);
        assert_eq!(items, once);
    }
}
