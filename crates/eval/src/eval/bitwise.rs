// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hand classification with bit packed rank sets and counters.
//!
//! Two words describe a hand. The first is a rank set with bit `v` set for
//! each rank value `v` in 2..=14 present in the hand:
//!
//! ```text
//!   bit  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//!         x  A  K  Q  J  T  9  8  7  6  5  4  3  2  x  x
//! ```
//!
//! five bits in sequence are a straight, that is the set divided by its lowest
//! bit equals 0b11111, the wheel is checked against its fixed pattern.
//!
//! The second word has a 4 bits nibble at bit `4 * v` for each rank, each card
//! shifts one more bit into its rank nibble so that a rank seen 1, 2, 3 or 4
//! times has nibble 0b0001, 0b0011, 0b0111 or 0b1111. As 16 = 1 mod 15 the
//! word modulo 15 is the sum of the nibbles modulo 15, and only depends on the
//! shape of the hand:
//!
//! ```text
//!   1 + 1 + 1 + 1 + 1   =  5  no duplicates
//!   3 + 1 + 1 + 1       =  6  pair
//!   3 + 3 + 1           =  7  two pair
//!   7 + 1 + 1           =  9  three of a kind
//!   7 + 3               = 10  full house
//!   15 + 1              =  1  four of a kind
//! ```
use super::{HandCategory, HandClassifier, HandRanking, counting::WHEEL, groups::RankGroups};
use crate::{Card, Rank};

/// Rank set for A, 5, 4, 3, 2.
const WHEEL_BITS: u16 = 0x403c;

/// Rank set for A, K, Q, J, T.
const BROADWAY_BITS: u16 = 0x7c00;

/// A classifier that uses bit arithmetic on packed ranks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitPackedClassifier;

impl HandClassifier for BitPackedClassifier {
    fn rank_five(&self, hand: &[Card; 5]) -> HandRanking {
        let bits = rank_bits(hand);
        let counts = rank_counts(hand);

        let category = match counts % 15 {
            1 => HandCategory::FourOfAKind,
            10 => HandCategory::FullHouse,
            9 => HandCategory::ThreeOfAKind,
            7 => HandCategory::TwoPair,
            6 => HandCategory::Pair,
            5 => {
                let straight = bits / (bits & bits.wrapping_neg()) == 0x1f || bits == WHEEL_BITS;
                let suits = hand[1..].iter().fold(0, |acc, c| acc | c.suit().bit());
                let flush = hand[0].suit().bit() == suits;

                let category = match (straight, flush) {
                    (_, true) if bits == BROADWAY_BITS => HandCategory::RoyalFlush,
                    (true, true) => HandCategory::StraightFlush,
                    (false, true) => HandCategory::Flush,
                    (true, false) => HandCategory::Straight,
                    (false, false) => HandCategory::HighCard,
                };

                let tiebreak = if bits == WHEEL_BITS {
                    WHEEL
                } else {
                    distinct_ranks(bits)
                };

                return HandRanking::new(category, tiebreak);
            }
            v => panic!("Invalid rank counts 0x{counts:x} mod 15 = {v}"),
        };

        let mut groups = RankGroups::new();
        for rank in Rank::ranks().rev() {
            let nibble = (counts >> nibble_shift(rank)) & 0xf;
            if nibble != 0 {
                groups.push(rank, nibble.count_ones() as u8);
            }
        }

        HandRanking::new(category, groups.tiebreak())
    }
}

#[inline]
fn nibble_shift(rank: Rank) -> u32 {
    4 * rank.value() as u32
}

/// One bit for each rank in the hand, duplicates are lost.
fn rank_bits(hand: &[Card; 5]) -> u16 {
    hand.iter().fold(0, |bits, c| bits | 1 << c.rank().value())
}

/// One nibble for each rank with a bit for each occurrence of the rank.
fn rank_counts(hand: &[Card; 5]) -> u64 {
    hand.iter().fold(0, |counts, c| {
        let shift = nibble_shift(c.rank());
        let nibble = (counts >> shift) & 0xf;
        (counts & !(0xf << shift)) | (((nibble << 1) | 1) << shift)
    })
}

/// The five ranks in a set of distinct ranks from highest to lowest.
fn distinct_ranks(bits: u16) -> [Rank; 5] {
    let mut out = [Rank::Deuce; 5];
    let ranks = Rank::ranks()
        .rev()
        .filter(|r| bits & (1 << r.value()) != 0);
    for (slot, rank) in out.iter_mut().zip(ranks) {
        *slot = rank;
    }

    out
}
