// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Equity results cache.
use ahash::AHashMap;
use log::trace;

use super::{EquityRequest, EquityResult, Limit};

/// A normalized request, the task count is only set for seeded samples as
/// they draw different boards with a different number of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key {
    request: EquityRequest,
    tasks: Option<usize>,
}

#[derive(Debug)]
struct Entry {
    result: EquityResult,
    last_used: u64,
}

/// A bounded cache of equity results keyed by request.
///
/// Board and dead cards are compared as sets, players are compared in order
/// as the results are indexed by player. Seeded samples are also keyed by the
/// number of tasks that computed them. When the cache is full the least
/// recently used entry is evicted.
#[derive(Debug)]
pub struct EquityCache {
    entries: AHashMap<Key, Entry>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl EquityCache {
    /// Creates a cache that holds up to `capacity` results.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups that found a result.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that didn't find a result.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Removes all results, counters are not reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Looks up the result for a request computed with `tasks` tasks.
    pub fn get(&mut self, request: &EquityRequest, tasks: usize) -> Option<EquityResult> {
        let key = cache_key(request, tasks)?;

        self.tick += 1;
        match self.entries.get_mut(&key) {
            Some(entry) => {
                trace!("Cache hit for {} players", request.players.len());
                entry.last_used = self.tick;
                self.hits += 1;
                Some(entry.result.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores the result for a request computed with `tasks` tasks, evicting
    /// the least recently used result if the cache is full.
    pub fn insert(&mut self, request: &EquityRequest, tasks: usize, result: EquityResult) {
        if self.capacity == 0 {
            return;
        }

        let Some(key) = cache_key(request, tasks) else {
            return;
        };

        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());

            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }

        self.tick += 1;
        self.entries.insert(
            key,
            Entry {
                result,
                last_used: self.tick,
            },
        );
    }
}

/// The cache key for a request, or none if the request results are not
/// repeatable.
fn cache_key(request: &EquityRequest, tasks: usize) -> Option<Key> {
    let tasks = match request.limit {
        Limit::Sample { seed: None, .. } => return None,
        Limit::Sample { seed: Some(_), .. } => Some(tasks),
        Limit::Exhaustive | Limit::Truncate { .. } => None,
    };

    let mut request = request.clone();
    request.board.sort_unstable();
    request.dead.sort_unstable();
    Some(Key { request, tasks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;

    fn request(players: &[&str], board: &str, dead: &str) -> EquityRequest {
        let players = players.iter().map(|p| {
            let cards = Card::parse_many(p).unwrap();
            [cards[0], cards[1]]
        });

        EquityRequest::new(players)
            .with_board(&Card::parse_many(board).unwrap())
            .with_dead(&Card::parse_many(dead).unwrap())
    }

    fn result(boards: u64) -> EquityResult {
        EquityResult {
            equity: vec![0.5, 0.5],
            win: vec![0.0, 0.0],
            tie: vec![1.0, 1.0],
            boards,
            exact: true,
        }
    }

    #[test]
    fn normalized_keys() {
        let mut cache = EquityCache::new(4);
        cache.insert(&request(&["Ah Ac", "Kd Ks"], "2c 7d 9h", "3s 4s"), 2, result(1));

        let lookup = cache.get(&request(&["Ah Ac", "Kd Ks"], "9h 2c 7d", "4s 3s"), 2);
        assert_eq!(lookup, Some(result(1)));

        // Hole cards order within a hand is significant as is players order.
        assert!(cache.get(&request(&["Ac Ah", "Kd Ks"], "2c 7d 9h", "3s 4s"), 2).is_none());
        assert!(cache.get(&request(&["Kd Ks", "Ah Ac"], "2c 7d 9h", "3s 4s"), 2).is_none());

        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn limits_are_part_of_the_key() {
        let mut cache = EquityCache::new(4);
        let exhaustive = request(&["Ah Ac", "Kd Ks"], "", "");
        let truncated = exhaustive.clone().with_limit(Limit::Truncate { boards: 10 });
        let seeded = exhaustive.clone().with_limit(Limit::Sample {
            boards: 10,
            seed: Some(1),
        });
        let unseeded = exhaustive.clone().with_limit(Limit::Sample {
            boards: 10,
            seed: None,
        });

        cache.insert(&exhaustive, 2, result(1));
        cache.insert(&truncated, 2, result(2));
        cache.insert(&seeded, 2, result(3));
        cache.insert(&unseeded, 2, result(4));
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.get(&exhaustive, 2).map(|r| r.boards), Some(1));
        assert_eq!(cache.get(&truncated, 2).map(|r| r.boards), Some(2));
        assert_eq!(cache.get(&seeded, 2).map(|r| r.boards), Some(3));
        assert!(cache.get(&unseeded, 2).is_none());
    }

    #[test]
    fn seeded_samples_keyed_by_tasks() {
        let mut cache = EquityCache::new(4);
        let seeded = request(&["Ah Ac", "Kd Ks"], "", "").with_limit(Limit::Sample {
            boards: 10,
            seed: Some(1),
        });

        cache.insert(&seeded, 4, result(1));
        assert!(cache.get(&seeded, 2).is_none());
        assert_eq!(cache.get(&seeded, 4).map(|r| r.boards), Some(1));

        cache.insert(&seeded, 2, result(2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&seeded, 2).map(|r| r.boards), Some(2));

        // Other limits don't depend on the number of tasks.
        let truncated = seeded.clone().with_limit(Limit::Truncate { boards: 10 });
        cache.insert(&truncated, 4, result(3));
        assert_eq!(cache.get(&truncated, 1).map(|r| r.boards), Some(3));
    }

    #[test]
    fn least_recently_used_eviction() {
        let mut cache = EquityCache::new(2);
        let a = request(&["Ah Ac", "Kd Ks"], "2c 7d 9h", "");
        let b = request(&["Ah Ac", "Kd Ks"], "2c 7d 9h 3s", "");
        let c = request(&["Ah Ac", "Kd Ks"], "2c 7d 9h 3s 4s", "");

        cache.insert(&a, 2, result(1));
        cache.insert(&b, 2, result(2));

        // Touch a so that b is the oldest.
        assert!(cache.get(&a, 2).is_some());

        cache.insert(&c, 2, result(3));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&b, 2).is_none());
        assert!(cache.get(&a, 2).is_some());
        assert!(cache.get(&c, 2).is_some());

        // Replacing an entry doesn't evict.
        cache.insert(&c, 2, result(4));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&c, 2).map(|r| r.boards), Some(4));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity() {
        let mut cache = EquityCache::new(0);
        let a = request(&["Ah Ac", "Kd Ks"], "", "");
        cache.insert(&a, 2, result(1));
        assert!(cache.is_empty());
        assert!(cache.get(&a, 2).is_none());
        assert_eq!(cache.misses(), 1);
    }
}
