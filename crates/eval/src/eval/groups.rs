// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grouping of a hand ranks by multiplicity.
use super::HandCategory;
use crate::Rank;

/// The distinct ranks of a five cards hand with their number of occurrences.
///
/// Groups must be pushed from the highest to the lowest rank.
#[derive(Debug)]
pub(crate) struct RankGroups {
    groups: [(Rank, u8); 5],
    len: usize,
}

impl RankGroups {
    pub(crate) fn new() -> Self {
        Self {
            groups: [(Rank::Deuce, 0); 5],
            len: 0,
        }
    }

    /// Groups ranks sorted from highest to lowest.
    pub(crate) fn from_sorted(ranks: &[Rank; 5]) -> Self {
        let mut groups = Self::new();
        let mut count = 1;

        for idx in 1..=ranks.len() {
            if idx < ranks.len() && ranks[idx] == ranks[idx - 1] {
                count += 1;
            } else {
                groups.push(ranks[idx - 1], count);
                count = 1;
            }
        }

        groups
    }

    pub(crate) fn push(&mut self, rank: Rank, count: u8) {
        debug_assert!(self.len == 0 || self.groups[self.len - 1].0 > rank);
        self.groups[self.len] = (rank, count);
        self.len += 1;
    }

    /// The category for the groups shape, straights and flushes are not
    /// detected here.
    pub(crate) fn category(&self) -> HandCategory {
        let largest = self.groups[..self.len]
            .iter()
            .map(|&(_, count)| count)
            .max()
            .unwrap_or(0);

        match (self.len, largest) {
            (2, 4) => HandCategory::FourOfAKind,
            (2, 3) => HandCategory::FullHouse,
            (3, 3) => HandCategory::ThreeOfAKind,
            (3, 2) => HandCategory::TwoPair,
            (4, 2) => HandCategory::Pair,
            (5, 1) => HandCategory::HighCard,
            shape => panic!("Invalid five cards groups {shape:?}"),
        }
    }

    /// Ranks ordered by group size and then by rank, quads before trips before
    /// pairs before kickers.
    pub(crate) fn tiebreak(&self) -> [Rank; 5] {
        let mut groups = self.groups;
        // Stable sort keeps equal size groups in descending rank order.
        groups[..self.len].sort_by(|a, b| b.1.cmp(&a.1));

        let mut out = [Rank::Deuce; 5];
        let ranks = groups[..self.len]
            .iter()
            .flat_map(|&(rank, count)| std::iter::repeat_n(rank, count as usize));
        for (slot, rank) in out.iter_mut().zip(ranks) {
            *slot = rank;
        }

        out
    }
}
