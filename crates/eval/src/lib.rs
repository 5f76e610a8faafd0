// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Showdown poker hand evaluator and equity calculator.
//!
//! Hands are ranked with a [HandClassifier], two interchangeable classifiers
//! are provided, and the [EquityEngine] computes the players share of the pot
//! over all the completions of a partial board:
//!
//! ```
//! # use showdown_eval::*;
//! let cards = Card::parse_many("Ah Ad Ac 7s 7d Kh 2c").unwrap();
//! let best = CountingClassifier.best_of(&cards).unwrap();
//! assert_eq!(best.ranking.category(), HandCategory::FullHouse);
//!
//! let aces = [cards[0], cards[1]];
//! let kings = Card::parse_many("Ks Kd").unwrap();
//! let request = EquityRequest::new([aces, [kings[0], kings[1]]])
//!     .with_board(&Card::parse_many("2c 7h 9d 3s").unwrap());
//!
//! let engine = EquityEngine::new(BitPackedClassifier, Config::default());
//! let result = engine.compute(&request).unwrap();
//! assert_eq!(result.boards, 44);
//! assert!(result.equity[0] > 0.9);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{
    BestHand, BitPackedClassifier, CountingClassifier, HandCategory, HandClassifier, HandRanking,
    compare,
};

pub mod equity;
pub use equity::{Config, EquityCache, EquityEngine, EquityRequest, EquityResult, Limit};

// Reexport cards types.
pub use showdown_cards::{
    Card, Combinations, Deck, Error, ParseCardError, Rank, Result, Suit, binomial, combinations,
};
