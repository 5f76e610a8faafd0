// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A [HandClassifier] ranks five cards hands and selects the best five cards
//! out of five, six or seven cards. Two classifiers are provided that always
//! return the same rankings:
//!
//! - [CountingClassifier] sorts the ranks and counts the duplicates.
//! - [BitPackedClassifier] packs the ranks in machine words and classifies the
//!   hand with bit arithmetic.
//!
//! Rankings are compared with [compare] or the [Ord] implementation on
//! [HandRanking].
use crate::{Card, Error, Result, combinations};

mod bitwise;
pub use bitwise::BitPackedClassifier;

mod counting;
pub use counting::CountingClassifier;

mod groups;

mod ranking;
pub use ranking::{HandCategory, HandRanking, compare};

/// The best five cards hand and its ranking.
#[derive(Debug, Clone, Copy)]
pub struct BestHand {
    /// The cards of the best hand.
    pub cards: [Card; 5],
    /// The hand ranking.
    pub ranking: HandRanking,
}

/// A five cards hand classifier.
pub trait HandClassifier: Send + Sync {
    /// Ranks five distinct cards.
    ///
    /// Callers must ensure that the cards are distinct, see [Self::classify]
    /// for a checked version. Repeated cards may panic or return a ranking that
    /// no valid hand has.
    fn rank_five(&self, hand: &[Card; 5]) -> HandRanking;

    /// Ranks a five cards hand.
    ///
    /// Fails with [Error::InvalidInput] if the hand does not have 5 cards or
    /// some cards are duplicated.
    fn classify(&self, hand: &[Card]) -> Result<HandRanking> {
        let hand = <&[Card; 5]>::try_from(hand).map_err(|_| {
            Error::InvalidInput(format!("expected 5 cards got {}", hand.len()))
        })?;

        check_distinct(hand)?;
        Ok(self.rank_five(hand))
    }

    /// Returns the best five cards hand out of 5 to 7 cards.
    ///
    /// When more than one hand has the best ranking the first one found is
    /// returned. Fails with [Error::InvalidInput] if there are less than 5 or
    /// more than 7 cards, or some cards are duplicated.
    fn best_of(&self, cards: &[Card]) -> Result<BestHand> {
        if !(5..=7).contains(&cards.len()) {
            return Err(Error::InvalidInput(format!(
                "expected 5 to 7 cards got {}",
                cards.len()
            )));
        }

        check_distinct(cards)?;

        let subsets = five_cards_subsets(cards.len())?;
        Ok(best_in_subsets(self, cards, &subsets))
    }
}

/// Checks no card is repeated.
fn check_distinct(cards: &[Card]) -> Result<()> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.mask() != 0 {
            return Err(Error::InvalidInput(format!("duplicated card {card}")));
        }

        mask |= card.mask();
    }

    Ok(())
}

/// Returns the positions of all 5 cards hands out of n cards.
pub(crate) fn five_cards_subsets(n: usize) -> Result<Vec<[usize; 5]>> {
    let mut subsets = combinations(n, 5)?;
    let mut out = Vec::with_capacity(subsets.remaining() as usize);
    while let Some(s) = subsets.next_slice() {
        out.push([s[0], s[1], s[2], s[3], s[4]]);
    }

    Ok(out)
}

/// Finds the best hand among the given subsets of cards.
///
/// Panics if `subsets` is empty.
pub(crate) fn best_in_subsets<C>(classifier: &C, cards: &[Card], subsets: &[[usize; 5]]) -> BestHand
where
    C: HandClassifier + ?Sized,
{
    let hand_at = |subset: &[usize; 5]| {
        let cards = subset.map(|pos| cards[pos]);
        BestHand {
            cards,
            ranking: classifier.rank_five(&cards),
        }
    };

    subsets[1..]
        .iter()
        .map(hand_at)
        .fold(hand_at(&subsets[0]), |best, candidate| {
            if candidate.ranking > best.ranking {
                candidate
            } else {
                best
            }
        })
}
