// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

use crate::{Error, Result, combinations::Combinations};

mod parallel;

/// A Poker card.
///
/// A card is stored as its index in an ordered deck, with the suits in spades,
/// hearts, diamonds, clubs order and the ranks from deuce to ace:
///
/// ```text
///   index = suit * 13 + rank
///   suit  = spades=0, hearts=1, diamonds=2, clubs=3
///   rank  = deuce=0, trey=1, four=2, ..., ace=12
/// ```
///
/// Cards compare by rank first and then by suit.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(suit as u8 * 13 + rank as u8)
    }

    /// Creates a card from its deck index, returns `None` if `index >= 52`.
    pub fn from_index(index: usize) -> Option<Card> {
        (index < Deck::SIZE).then(|| Self(index as u8))
    }

    /// This card index in 0..52.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 / 13 {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            _ => panic!("Invalid card index {}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.0 % 13) as usize]
    }

    /// A mask with this card bit set, used to detect duplicated cards.
    #[inline]
    pub fn mask(&self) -> u64 {
        1 << self.0
    }

    /// Parses a list of cards in shorthand notation.
    ///
    /// Cards can be separated by whitespace or commas or be concatenated,
    /// `"As Kd"`, `"As,Kd"` and `"AsKd"` all parse to the same two cards.
    pub fn parse_many(s: &str) -> std::result::Result<Vec<Card>, ParseCardError> {
        let chars = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect::<Vec<_>>();

        chars
            .chunks(2)
            .map(|token| token.iter().collect::<String>().parse())
            .collect()
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.suit().cmp(&other.suit()))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Error returned when parsing a card from its shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The token is not two characters long.
    #[error("invalid card {0:?}, expected a rank and a suit like \"As\"")]
    Length(String),
    /// Unknown rank character.
    #[error("invalid rank {0:?}")]
    Rank(char),
    /// Unknown suit character.
    #[error("invalid suit {0:?}")]
    Suit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseCardError::Length(s.to_string()));
        };

        let rank = match rank_ch.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(ParseCardError::Rank(rank_ch)),
        };

        let suit = match suit_ch.to_ascii_lowercase() {
            's' | '♠' => Suit::Spades,
            'h' | '♥' => Suit::Hearts,
            'd' | '♦' => Suit::Diamonds,
            'c' | '♣' => Suit::Clubs,
            _ => return Err(ParseCardError::Suit(suit_ch)),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// The rank value with deuce=2 and ace=14.
    #[inline]
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }
}

impl TryFrom<u8> for Rank {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2..=14 => Ok(Self::ALL[(value - 2) as usize]),
            _ => Err(Error::InvalidArgument(format!(
                "rank value {value} not in 2..=14"
            ))),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Hearts suit.
    Hearts = 1,
    /// Diamonds suit.
    Diamonds = 2,
    /// Clubs suit.
    Clubs = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs].into_iter()
    }

    /// One hot encoding of the suit.
    #[inline]
    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// A cards Deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards in this deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns a new deck without the `dead` cards.
    ///
    /// Fails with [Error::Conflict] if a card appears more than once in `dead`.
    pub fn remaining(&self, dead: &[Card]) -> Result<Deck> {
        let mut mask = 0u64;
        for card in dead {
            if mask & card.mask() != 0 {
                return Err(Error::Conflict(*card));
            }

            mask |= card.mask();
        }

        let cards = self
            .cards
            .iter()
            .filter(|c| mask & c.mask() == 0)
            .copied()
            .collect();

        Ok(Self { cards })
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Hands are visited in the order produced by [Combinations].
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        let Ok(mut subsets) = Combinations::new(self.cards.len(), k) else {
            return;
        };

        let mut h = Vec::with_capacity(k);
        while let Some(subset) = subsets.next_slice() {
            h.clear();
            h.extend(subset.iter().map(|&pos| self.cards[pos]));
            f(&h);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = (0..Self::SIZE as u8).map(Card).collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
