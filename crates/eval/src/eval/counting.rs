// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hand classification by sorting and counting ranks.
use super::{HandCategory, HandClassifier, HandRanking, groups::RankGroups};
use crate::{Card, Rank};

/// Ranks of the ace low straight as they are sorted.
const WHEEL_SORTED: [Rank; 5] = [Rank::Ace, Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce];

/// Ranks of the ace low straight with the ace played low.
pub(crate) const WHEEL: [Rank; 5] = [Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce, Rank::Ace];

/// A classifier that sorts the hand ranks and counts duplicates.
///
/// Hands with five distinct ranks are checked for straights and flushes, the
/// other hands are classified by the size of their groups of equal ranks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingClassifier;

impl HandClassifier for CountingClassifier {
    fn rank_five(&self, hand: &[Card; 5]) -> HandRanking {
        let mut ranks = hand.map(|c| c.rank());
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        if ranks == WHEEL_SORTED {
            ranks = WHEEL;
        }

        let distinct = ranks.windows(2).all(|w| w[0] != w[1]);
        if !distinct {
            let groups = RankGroups::from_sorted(&ranks);
            return HandRanking::new(groups.category(), groups.tiebreak());
        }

        let straight = ranks == WHEEL || is_sequence(&ranks);
        let flush = hand.iter().all(|c| c.suit() == hand[0].suit());

        let category = match (straight, flush) {
            (true, true) if ranks[0] == Rank::Ace => HandCategory::RoyalFlush,
            (true, true) => HandCategory::StraightFlush,
            (false, true) => HandCategory::Flush,
            (true, false) => HandCategory::Straight,
            (false, false) => HandCategory::HighCard,
        };

        HandRanking::new(category, ranks)
    }
}

/// Checks descending ranks are consecutive.
fn is_sequence(ranks: &[Rank; 5]) -> bool {
    ranks.windows(2).all(|w| w[0] as u8 == w[1] as u8 + 1)
}
