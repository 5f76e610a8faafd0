// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Errors shared by the cards and evaluation crates.
use thiserror::Error;

use crate::Card;

/// Errors returned by the combinatorics, evaluation and equity functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed arguments such as k > n or a wrong number of cards.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A hand that does not have the shape expected by an evaluator.
    #[error("invalid hand: {0}")]
    InvalidInput(String),
    /// The same card has been assigned to more than one slot.
    #[error("card {0} is used more than once")]
    Conflict(Card),
    /// Not enough cards left in the deck to complete the board.
    #[error("{missing} board cards needed but only {remaining} left in the deck")]
    Exhaustion {
        /// Board cards still to be dealt.
        missing: usize,
        /// Cards left in the deck.
        remaining: usize,
    },
}

/// Result type for the showdown crates.
pub type Result<T> = std::result::Result<T, Error>;
