// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Showdown cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert!(ah > kd);
//! ```
//!
//! a [Deck] type for iterating the k-cards hands left in a deck once some
//! cards have been removed:
//!
//! ```
//! # use showdown_cards::{Card, Deck};
//! let dead = Card::parse_many("As Kd").unwrap();
//! let deck = Deck::default().remaining(&dead).unwrap();
//!
//! let mut counter = 0;
//! deck.for_each(2, |hand| {
//!     assert_eq!(hand.len(), 2);
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_225);
//! ```
//!
//! and the [combinations] generator the deck iteration is built on.
//!
//! Parallel iteration folds the hands from a given number of tasks, each task
//! gets its own accumulator so that no locking is needed, for example to count
//! all 5 cards hands with 4 tasks:
//!
//! ```
//! # use showdown_cards::Deck;
//! let counts = Deck::default()
//!     .par_fold(4, 5, u64::MAX, || 0u64, |count, _hand| *count += 1)
//!     .unwrap();
//! assert_eq!(counts.iter().sum::<u64>(), 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod combinations;
pub use combinations::{Combinations, binomial, combinations};

mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};

mod error;
pub use error::{Error, Result};
