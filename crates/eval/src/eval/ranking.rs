// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hand categories and rankings.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use crate::Rank;

/// The category of a five cards hand, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// High card.
    HighCard = 0,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind plus a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Straight and flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// Returns all categories from weakest to strongest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category used when comparing hands.
    ///
    /// A royal flush is only a label for the ace high straight flush, it
    /// compares as a straight flush and wins on its tiebreak.
    pub fn strength(&self) -> HandCategory {
        match self {
            HandCategory::RoyalFlush => HandCategory::StraightFlush,
            c => *c,
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ranking of a five cards hand.
///
/// The tiebreak holds the five ranks in the order they are compared for hands
/// in the same category, for example a full house kings over jacks has tiebreak
/// `[K, K, K, J, J]` and a wheel straight `[5, 4, 3, 2, A]`.
///
/// Rankings are totally ordered: by category strength first and then by the
/// first tiebreak rank that differs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandRanking {
    category: HandCategory,
    tiebreak: [Rank; 5],
}

impl HandRanking {
    /// Creates a ranking.
    pub fn new(category: HandCategory, tiebreak: [Rank; 5]) -> Self {
        Self { category, tiebreak }
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The tiebreak ranks in comparison order.
    pub fn tiebreak(&self) -> &[Rank; 5] {
        &self.tiebreak
    }

    /// The tiebreak as rank values in 2..=14.
    pub fn values(&self) -> [u8; 5] {
        self.tiebreak.map(|r| r.value())
    }
}

/// Compares two rankings, [Ordering::Greater] if `a` is the stronger hand.
pub fn compare(a: &HandRanking, b: &HandRanking) -> Ordering {
    a.cmp(b)
}

impl Ord for HandRanking {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .strength()
            .cmp(&other.category.strength())
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for HandRanking {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandRanking {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandRanking {}

impl fmt::Display for HandRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category)?;
        for (idx, rank) in self.tiebreak.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{rank}")?;
        }
        f.write_str("]")
    }
}
