// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Showdown equity calculator.
//!
//! Given the players hole cards and a partial board the [EquityEngine] deals
//! every completion of the board from the remaining deck, ranks each player
//! best hand and credits the winners, a board split by `n` players credits
//! `1/n` to each of them.
//!
//! Large enumerations can be capped with a [Limit], either by evaluating a
//! random sample of boards or the first boards in enumeration order, results
//! from capped runs are flagged as not exact.
use log::debug;
use serde::{Deserialize, Serialize};
use std::{num::NonZeroUsize, thread, time::Instant};

use crate::{
    Card, Deck, Error, Result, binomial,
    eval::{HandClassifier, HandRanking, best_in_subsets, five_cards_subsets},
};

mod cache;
pub use cache::EquityCache;

/// Number of cards in a complete board.
pub const BOARD_SIZE: usize = 5;

/// Equity engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of parallel tasks used to evaluate the boards.
    pub tasks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// A cap on the number of boards evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limit {
    /// Evaluate every board.
    #[default]
    Exhaustive,
    /// Evaluate boards sampled uniformly at random.
    Sample {
        /// The number of boards to sample.
        boards: u64,
        /// Seed for reproducible samples.
        seed: Option<u64>,
    },
    /// Evaluate the first boards in enumeration order.
    Truncate {
        /// The number of boards to evaluate.
        boards: u64,
    },
}

/// The input of an equity calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquityRequest {
    players: Vec<[Card; 2]>,
    board: Vec<Card>,
    dead: Vec<Card>,
    limit: Limit,
}

impl EquityRequest {
    /// Creates a request for the given players hole cards with an empty board.
    pub fn new(players: impl IntoIterator<Item = [Card; 2]>) -> Self {
        Self {
            players: players.into_iter().collect(),
            board: Vec::new(),
            dead: Vec::new(),
            limit: Limit::Exhaustive,
        }
    }

    /// Sets the known board cards.
    pub fn with_board(mut self, board: &[Card]) -> Self {
        self.board = board.to_vec();
        self
    }

    /// Sets cards that are out of the deck but not in play.
    pub fn with_dead(mut self, dead: &[Card]) -> Self {
        self.dead = dead.to_vec();
        self
    }

    /// Sets a cap on the evaluated boards.
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    /// The players hole cards.
    pub fn players(&self) -> &[[Card; 2]] {
        &self.players
    }

    /// The known board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The dead cards.
    pub fn dead(&self) -> &[Card] {
        &self.dead
    }

    /// The boards cap.
    pub fn limit(&self) -> Limit {
        self.limit
    }

    /// Checks the request and returns the deck left once all the cards in the
    /// request have been removed.
    fn remaining_deck(&self) -> Result<Deck> {
        if self.players.is_empty() {
            return Err(Error::InvalidArgument("no players".into()));
        }

        if self.board.len() > BOARD_SIZE {
            return Err(Error::InvalidArgument(format!(
                "the board has {} cards, at most {BOARD_SIZE} expected",
                self.board.len()
            )));
        }

        if let Limit::Sample { boards: 0, .. } | Limit::Truncate { boards: 0 } = self.limit {
            return Err(Error::InvalidArgument("boards limit must be > 0".into()));
        }

        let used = self
            .players
            .iter()
            .flatten()
            .chain(&self.board)
            .chain(&self.dead)
            .copied()
            .collect::<Vec<_>>();

        let deck = Deck::default().remaining(&used)?;

        let missing = BOARD_SIZE - self.board.len();
        if missing > deck.count() {
            return Err(Error::Exhaustion {
                missing,
                remaining: deck.count(),
            });
        }

        Ok(deck)
    }
}

/// The result of an equity calculation, vectors are indexed by player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// Share of the pots won by each player, sums to 1.
    pub equity: Vec<f64>,
    /// Probability that a player wins alone.
    pub win: Vec<f64>,
    /// Probability that a player splits the pot.
    pub tie: Vec<f64>,
    /// Number of boards evaluated.
    pub boards: u64,
    /// True if every board completion was evaluated, false for estimates.
    pub exact: bool,
}

/// Per task accumulator.
#[derive(Debug)]
struct Tally {
    wins: Vec<u64>,
    ties: Vec<u64>,
    split_shares: Vec<f64>,
    boards: u64,
    rankings: Vec<HandRanking>,
}

impl Tally {
    fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            ties: vec![0; players],
            split_shares: vec![0.0; players],
            boards: 0,
            rankings: Vec::with_capacity(players),
        }
    }

    /// Credits the players holding the best ranking in `self.rankings`.
    fn credit_winners(&mut self) {
        let Some(best) = self.rankings.iter().max().copied() else {
            return;
        };

        let winners = self.rankings.iter().filter(|&&r| r == best).count();
        let share = 1.0 / winners as f64;

        for (player, ranking) in self.rankings.iter().enumerate() {
            if *ranking == best {
                if winners == 1 {
                    self.wins[player] += 1;
                } else {
                    self.ties[player] += 1;
                    self.split_shares[player] += share;
                }
            }
        }

        self.boards += 1;
    }

    fn merge(mut self, other: Tally) -> Tally {
        for (acc, v) in self.wins.iter_mut().zip(other.wins) {
            *acc += v;
        }

        for (acc, v) in self.ties.iter_mut().zip(other.ties) {
            *acc += v;
        }

        for (acc, v) in self.split_shares.iter_mut().zip(other.split_shares) {
            *acc += v;
        }

        self.boards += other.boards;
        self
    }

    fn into_result(self, exact: bool) -> EquityResult {
        let boards = self.boards.max(1) as f64;

        let equity = self
            .wins
            .iter()
            .zip(&self.split_shares)
            .map(|(&wins, &split)| (wins as f64 + split) / boards)
            .collect();

        EquityResult {
            equity,
            win: self.wins.iter().map(|&w| w as f64 / boards).collect(),
            tie: self.ties.iter().map(|&t| t as f64 / boards).collect(),
            boards: self.boards,
            exact,
        }
    }
}

/// Ranks the players hands for a board.
struct Showdown<'a, C: ?Sized> {
    classifier: &'a C,
    players: &'a [[Card; 2]],
    board: &'a [Card],
    five_of_seven: &'a [[usize; 5]],
}

impl<C: HandClassifier + ?Sized> Showdown<'_, C> {
    /// Completes the board with `completion` and credits the winners.
    fn eval(&self, completion: &[Card], tally: &mut Tally) {
        let mut cards = [self.players[0][0]; 7];
        cards[2..2 + self.board.len()].copy_from_slice(self.board);
        cards[2 + self.board.len()..].copy_from_slice(completion);

        tally.rankings.clear();
        for hole in self.players {
            cards[..2].copy_from_slice(hole);
            let best = best_in_subsets(self.classifier, &cards, self.five_of_seven);
            tally.rankings.push(best.ranking);
        }

        tally.credit_winners();
    }
}

/// Computes showdown equities with a given classifier.
#[derive(Debug)]
pub struct EquityEngine<C> {
    classifier: C,
    config: Config,
}

impl<C: HandClassifier> EquityEngine<C> {
    /// Creates an engine that ranks hands with the given classifier.
    pub fn new(classifier: C, config: Config) -> Self {
        Self { classifier, config }
    }

    /// The engine classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Computes the players equities for a request.
    ///
    /// Fails with [Error::Conflict] if a card is used more than once, with
    /// [Error::Exhaustion] if the deck has not enough cards left to complete
    /// the board and with [Error::InvalidArgument] for malformed requests.
    pub fn compute(&self, request: &EquityRequest) -> Result<EquityResult> {
        let deck = request.remaining_deck()?;
        let missing = BOARD_SIZE - request.board.len();
        let num_players = request.players.len();

        let five_of_seven = five_cards_subsets(7)?;
        let showdown = Showdown {
            classifier: &self.classifier,
            players: &request.players,
            board: &request.board,
            five_of_seven: &five_of_seven,
        };

        if missing == 0 {
            let mut tally = Tally::new(num_players);
            showdown.eval(&[], &mut tally);
            return Ok(tally.into_result(true));
        }

        let total = binomial(deck.count(), missing);
        let tasks = self.config.tasks.max(1);
        let init = || Tally::new(num_players);
        let fold = |tally: &mut Tally, completion: &[Card]| showdown.eval(completion, tally);

        let now = Instant::now();
        let (tallies, exact) = match request.limit {
            Limit::Sample { boards, seed } if boards < total => {
                debug!("Sampling {boards} of {total} boards with {tasks} tasks");
                let tallies = deck.par_sample_fold(tasks, boards, missing, seed, init, fold)?;
                (tallies, false)
            }
            Limit::Truncate { boards } if boards < total => {
                debug!("Evaluating first {boards} of {total} boards with {tasks} tasks");
                (deck.par_fold(tasks, missing, boards, init, fold)?, false)
            }
            _ => {
                debug!("Evaluating all {total} boards with {tasks} tasks");
                (deck.par_fold(tasks, missing, total, init, fold)?, true)
            }
        };

        let tally = tallies
            .into_iter()
            .fold(Tally::new(num_players), Tally::merge);

        debug!(
            "Evaluated {} boards in {:.3}s",
            tally.boards,
            now.elapsed().as_secs_f64()
        );

        Ok(tally.into_result(exact))
    }

    /// Computes the players equities reusing results stored in `cache`.
    ///
    /// Requests that sample boards without a seed are never cached, seeded
    /// samples are only reused by engines with the same number of tasks.
    pub fn compute_cached(
        &self,
        cache: &mut EquityCache,
        request: &EquityRequest,
    ) -> Result<EquityResult> {
        let tasks = self.config.tasks.max(1);
        if let Some(result) = cache.get(request, tasks) {
            return Ok(result);
        }

        let result = self.compute(request)?;
        cache.insert(request, tasks, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitPackedClassifier, CountingClassifier};

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    fn hole(s: &str) -> [Card; 2] {
        cards(s).try_into().unwrap()
    }

    fn engine(tasks: usize) -> EquityEngine<CountingClassifier> {
        EquityEngine::new(CountingClassifier, Config { tasks })
    }

    fn assert_normalized(result: &EquityResult) {
        for &e in &result.equity {
            assert!((0.0..=1.0).contains(&e), "{e}");
        }

        let sum = result.equity.iter().sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-9, "sum {sum}");
    }

    #[test]
    fn river_single_board() {
        let request = EquityRequest::new([hole("Ah Ac"), hole("Kd Ks")])
            .with_board(&cards("2c 7d 9h Js 3s"));

        let result = engine(4).compute(&request).unwrap();
        assert_eq!(result.boards, 1);
        assert!(result.exact);
        assert_eq!(result.equity, vec![1.0, 0.0]);
        assert_eq!(result.win, vec![1.0, 0.0]);
        assert_eq!(result.tie, vec![0.0, 0.0]);
    }

    #[test]
    fn river_split_pot() {
        // The board plays for everybody.
        let request = EquityRequest::new([hole("2h 3c"), hole("4d 5s"), hole("2d 3s")])
            .with_board(&cards("As Ks Qd Jc Th"));

        let result = engine(1).compute(&request).unwrap();
        assert_eq!(result.boards, 1);
        assert_normalized(&result);
        for p in 0..3 {
            assert!((result.equity[p] - 1.0 / 3.0).abs() < 1e-12);
            assert_eq!(result.tie[p], 1.0);
            assert_eq!(result.win[p], 0.0);
        }
    }

    #[test]
    fn aces_against_aces() {
        // No flush is possible so the aces always split.
        let request = EquityRequest::new([hole("Ah Ac"), hole("Ad As")])
            .with_board(&cards("Kc Qd 7s 4h"));

        let result = engine(3).compute(&request).unwrap();
        assert_eq!(result.boards, 44);
        assert!(result.exact);
        assert_eq!(result.equity, vec![0.5, 0.5]);
        assert_eq!(result.tie, vec![1.0, 1.0]);
    }

    #[test]
    fn tasks_do_not_change_results() {
        let request = EquityRequest::new([hole("Js Ts"), hole("Ac Kd"), hole("4h 4d")])
            .with_board(&cards("9s 4c Kh"));

        let one = engine(1).compute(&request).unwrap();
        assert_eq!(one.boards, 903);
        assert_normalized(&one);

        for tasks in [2, 5, 16] {
            let many = engine(tasks).compute(&request).unwrap();
            assert_eq!(many.boards, one.boards);
            assert_eq!(many.win, one.win);
            assert_eq!(many.tie, one.tie);
            for (a, b) in many.equity.iter().zip(&one.equity) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn classifiers_give_same_equity() {
        let request = EquityRequest::new([hole("8h 9h"), hole("Ac Ad"), hole("5s 5c")])
            .with_board(&cards("7h Th 5d"))
            .with_dead(&cards("2s 2c"));

        let counting = engine(4).compute(&request).unwrap();
        let bitwise = EquityEngine::new(BitPackedClassifier, Config { tasks: 4 })
            .compute(&request)
            .unwrap();

        assert_eq!(counting.boards, 820);
        assert_eq!(counting.boards, bitwise.boards);
        assert_eq!(counting.win, bitwise.win);
        assert_eq!(counting.tie, bitwise.tie);
        assert_normalized(&bitwise);
    }

    #[test]
    fn dead_cards_are_removed() {
        let request = EquityRequest::new([hole("Ah Ac"), hole("Kd Ks")])
            .with_board(&cards("2c 7d 9h"))
            .with_dead(&cards("Ad As Kh Kc"));

        let result = engine(2).compute(&request).unwrap();
        // 52 - 4 hole - 3 board - 4 dead = 41 cards left.
        assert_eq!(result.boards, 820);

        // Neither player can improve to a set so aces always win.
        assert_eq!(result.equity[0], 1.0);
    }

    #[test]
    fn truncated_results_are_estimates() {
        let request = EquityRequest::new([hole("Qs Qh"), hole("Ac Kd")])
            .with_limit(Limit::Truncate { boards: 5_000 });

        let result = engine(4).compute(&request).unwrap();
        assert_eq!(result.boards, 5_000);
        assert!(!result.exact);
        assert_normalized(&result);

        // A cap larger than the enumeration is a full enumeration.
        let request = EquityRequest::new([hole("Qs Qh"), hole("Ac Kd")])
            .with_board(&cards("2c 7d 9h 3s"))
            .with_limit(Limit::Truncate { boards: 1_000 });
        let result = engine(4).compute(&request).unwrap();
        assert_eq!(result.boards, 44);
        assert!(result.exact);
    }

    #[test]
    fn sampled_results_are_estimates() {
        let players = [hole("Js Ts"), hole("Ac Kd"), hole("4h 4d")];
        let request = EquityRequest::new(players).with_limit(Limit::Sample {
            boards: 20_000,
            seed: Some(7),
        });

        let result = engine(4).compute(&request).unwrap();
        assert_eq!(result.boards, 20_000);
        assert!(!result.exact);
        assert_normalized(&result);

        // Within a few standard errors of the exact equities.
        let expected = [0.3576000264574418, 0.3468971578172649, 0.2955028157252463];
        for (e, x) in result.equity.iter().zip(expected) {
            assert!((e - x).abs() < 0.02, "{e} {x}");
        }

        // Same seed same sample.
        let again = engine(4).compute(&request).unwrap();
        assert_eq!(again, result);
    }

    #[test]
    #[ignore]
    fn amarillo_slim() {
        // This takes a while to run in debug mode as it goes through 1.3M boards.
        let request = EquityRequest::new([hole("Js Ts"), hole("Ac Kd"), hole("4h 4d")]);

        let result = engine(4).compute(&request).unwrap();
        assert_eq!(result.boards, 1_370_754);
        assert!(result.exact);
        assert_normalized(&result);

        let expected = [0.3576000264574418, 0.3468971578172649, 0.2955028157252463];
        for (e, x) in result.equity.iter().zip(expected) {
            assert!((e - x).abs() < 1e-9, "{e} {x}");
        }
    }

    #[test]
    fn invalid_requests() {
        let engine = engine(2);

        let request = EquityRequest::new([hole("Ah Ac"), hole("Ad Ac")]);
        assert_eq!(
            engine.compute(&request).unwrap_err(),
            Error::Conflict("Ac".parse().unwrap())
        );

        let request = EquityRequest::new([hole("Ah Ac")]).with_board(&cards("2c 3c Ah"));
        assert!(matches!(engine.compute(&request), Err(Error::Conflict(_))));

        let request = EquityRequest::new([hole("Ah Ac")]).with_dead(&cards("2c 2c"));
        assert!(matches!(engine.compute(&request), Err(Error::Conflict(_))));

        let request = EquityRequest::new(Vec::new());
        assert!(matches!(engine.compute(&request), Err(Error::InvalidArgument(_))));

        let request = EquityRequest::new([hole("Ah Ac")]).with_board(&cards("2c 3c 4c 5c 6c 7c"));
        assert!(matches!(engine.compute(&request), Err(Error::InvalidArgument(_))));

        let request = EquityRequest::new([hole("Ah Ac")]).with_limit(Limit::Truncate { boards: 0 });
        assert!(matches!(engine.compute(&request), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn exhausted_deck() {
        // 22 players use 44 cards, 48 with 4 dead cards leaving 4 for the board.
        let deck = Deck::default();
        let players = deck.cards()[..44]
            .chunks(2)
            .map(|c| [c[0], c[1]])
            .collect::<Vec<_>>();
        let request = EquityRequest::new(players).with_dead(&deck.cards()[44..48]);

        assert_eq!(
            engine(2).compute(&request).unwrap_err(),
            Error::Exhaustion {
                missing: 5,
                remaining: 4
            }
        );
    }

    #[test]
    fn cached_results() {
        let engine = engine(2);
        let mut cache = EquityCache::new(8);

        let request = EquityRequest::new([hole("Ah Ac"), hole("Kd Ks")])
            .with_board(&cards("2c 7d 9h 3s"));

        let first = engine.compute_cached(&mut cache, &request).unwrap();
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 0);

        // Board order does not matter.
        let reordered = EquityRequest::new([hole("Ah Ac"), hole("Kd Ks")])
            .with_board(&cards("3s 9h 7d 2c"));
        let second = engine.compute_cached(&mut cache, &reordered).unwrap();
        assert_eq!(cache.hits(), 1);
        assert_eq!(first, second);

        // Players order does.
        let swapped = EquityRequest::new([hole("Kd Ks"), hole("Ah Ac")])
            .with_board(&cards("2c 7d 9h 3s"));
        let third = engine.compute_cached(&mut cache, &swapped).unwrap();
        assert_eq!(cache.misses(), 2);
        assert_eq!(third.equity[1], first.equity[0]);

        // Errors are not cached.
        let bad = EquityRequest::new([hole("Ah Ac"), hole("Ah Ks")]);
        assert!(engine.compute_cached(&mut cache, &bad).is_err());
        assert_eq!(cache.len(), 2);

        // A seeded sample depends on the number of tasks that drew it.
        let sampled = EquityRequest::new([hole("Js Ts"), hole("Ac Kd")]).with_limit(Limit::Sample {
            boards: 2_000,
            seed: Some(7),
        });

        let four_tasks = self::engine(4);
        let from_four = four_tasks.compute_cached(&mut cache, &sampled).unwrap();
        assert_eq!(from_four, four_tasks.compute(&sampled).unwrap());

        let two_tasks = self::engine(2);
        let cached = two_tasks.compute_cached(&mut cache, &sampled).unwrap();
        assert_eq!(cached, two_tasks.compute(&sampled).unwrap());
        assert_eq!(cache.len(), 4);

        // Both samples are reused by their own engine.
        let hits = cache.hits();
        assert_eq!(four_tasks.compute_cached(&mut cache, &sampled).unwrap(), from_four);
        assert_eq!(two_tasks.compute_cached(&mut cache, &sampled).unwrap(), cached);
        assert_eq!(cache.hits(), hits + 2);
    }
}
