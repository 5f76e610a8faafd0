// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! k-subsets of an n-elements index range.
//!
//! Subsets are produced iteratively in colexicographic order with Algorithm L
//! from TAOCP 4a, and any subset can be reached directly from its position in
//! that order using the combinatorial number system (Theorem L pg. 260).
use crate::{Error, Result};

/// Returns the binomial coefficient for n choose k, 0 if k > n.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k);
    let mut acc = 1u128;
    for i in 0..k {
        // Exact at each step, acc * (n - i) is a multiple of (i + 1).
        acc = acc * (n - i) as u128 / (i + 1) as u128;
    }

    u64::try_from(acc).unwrap_or(u64::MAX)
}

/// Returns the k-subsets of 0..n.
///
/// Fails with [Error::InvalidArgument] if k > n.
///
/// ```
/// # use showdown_cards::combinations;
/// let all = combinations(4, 2).unwrap().collect::<Vec<_>>();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// ```
pub fn combinations(n: usize, k: usize) -> Result<Combinations> {
    Combinations::new(n, k)
}

/// Lazy iterator over the k-subsets of 0..n, each subset in ascending order.
#[derive(Debug, Clone)]
pub struct Combinations {
    /// c[1..=k] is the current subset, c[k + 1] = n and c[k + 2] = 0 are
    /// sentinels for the successor loop.
    c: Vec<usize>,
    k: usize,
    remaining: u64,
    started: bool,
}

impl Combinations {
    /// Creates an iterator over all the k-subsets of 0..n.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        Self::starting_at(n, k, 0, binomial(n, k))
    }

    /// Creates an iterator that yields at most `count` k-subsets of 0..n
    /// starting from the subset at position `nth`.
    pub fn starting_at(n: usize, k: usize, nth: u64, count: u64) -> Result<Self> {
        if k > n {
            return Err(Error::InvalidArgument(format!(
                "cannot choose {k} elements out of {n}"
            )));
        }

        let total = binomial(n, k);
        if nth > total {
            return Err(Error::InvalidArgument(format!(
                "subset {nth} out of range, there are {total} subsets"
            )));
        }

        let mut c = vec![0; k + 3];
        c[1..=k].copy_from_slice(&nth_subset(nth, k));
        c[k + 1] = n;

        Ok(Self {
            c,
            k,
            remaining: count.min(total - nth),
            started: false,
        })
    }

    /// Number of subsets left to visit.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Advances to the next subset returning it as a slice, this avoids the
    /// allocation made by [Iterator::next].
    pub fn next_slice(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }

        if self.started && !self.advance() {
            self.remaining = 0;
            return None;
        }

        self.started = true;
        self.remaining -= 1;
        Some(&self.c[1..=self.k])
    }

    /// Moves to the successor subset, returns false when the last subset has
    /// been visited.
    fn advance(&mut self) -> bool {
        let c = &mut self.c;

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > self.k {
            return false;
        }

        c[j] += 1;
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_slice().map(<[usize]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// Converts a position in colexicographic order to its k-subset.
fn nth_subset(mut nth: u64, k: usize) -> Vec<usize> {
    let mut out = vec![0; k];
    for i in (0..k).rev() {
        let mut c = i;
        while binomial(c, i + 1) <= nth {
            c += 1;
        }

        c -= 1;
        out[i] = c;
        nth -= binomial(c, i + 1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn binomial_values() {
        // For n < k = 0
        assert_eq!(binomial(2, 3), 0);
        assert_eq!(binomial(0, 0), 1);

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(52, k), v));

        [1, 46, 1035, 15180, 163185, 1370754]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(46, k), v));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(5, k), v));

        assert_eq!(binomial(7, 5), 21);
    }

    #[test]
    fn exact_coverage() {
        for n in 0..=10 {
            for k in 0..=n {
                let subsets = combinations(n, k).unwrap().collect::<Vec<_>>();
                assert_eq!(subsets.len() as u64, binomial(n, k), "n={n} k={k}");

                let unique = subsets.iter().cloned().collect::<HashSet<_>>();
                assert_eq!(unique.len(), subsets.len());

                for s in &subsets {
                    assert_eq!(s.len(), k);
                    assert!(s.windows(2).all(|w| w[0] < w[1]));
                    assert!(s.iter().all(|&i| i < n));
                }
            }
        }
    }

    #[test]
    fn boundary_cases() {
        let empty = combinations(5, 0).unwrap().collect::<Vec<_>>();
        assert_eq!(empty, vec![Vec::<usize>::new()]);

        let full = combinations(5, 5).unwrap().collect::<Vec<_>>();
        assert_eq!(full, vec![vec![0, 1, 2, 3, 4]]);

        let none = combinations(0, 0).unwrap().collect::<Vec<_>>();
        assert_eq!(none, vec![Vec::<usize>::new()]);

        assert!(matches!(combinations(3, 4), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn deterministic_order() {
        let a = combinations(7, 5).unwrap().collect::<Vec<_>>();
        let b = combinations(7, 5).unwrap().collect::<Vec<_>>();
        assert_eq!(a, b);
        assert_eq!(a.len(), 21);
        assert_eq!(a[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(a[20], vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn starting_at_matches_full_walk() {
        let all = combinations(12, 4).unwrap().collect::<Vec<_>>();

        for nth in 0..all.len() {
            let first = Combinations::starting_at(12, 4, nth as u64, 1)
                .unwrap()
                .next()
                .unwrap();
            assert_eq!(first, all[nth]);
        }

        // A window in the middle.
        let window = Combinations::starting_at(12, 4, 100, 50)
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(window, all[100..150]);

        // Count is clamped to the subsets left.
        let tail = Combinations::starting_at(12, 4, 490, 100).unwrap();
        assert_eq!(tail.remaining(), 5);
        assert_eq!(tail.count(), 5);

        assert!(Combinations::starting_at(12, 4, 496, 1).is_err());
    }

    #[test]
    fn next_slice() {
        let mut subsets = combinations(6, 3).unwrap();
        let mut count = 0;
        while let Some(s) = subsets.next_slice() {
            assert_eq!(s.len(), 3);
            count += 1;
        }

        assert_eq!(count, 20);
        assert!(subsets.next_slice().is_none());
    }
}
