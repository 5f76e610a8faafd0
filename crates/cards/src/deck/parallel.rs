// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use rand::prelude::*;
use std::{panic, thread};

use super::{Card, Deck};
use crate::{
    Error, Result,
    combinations::{Combinations, binomial},
};

impl Deck {
    /// Parallel fold over the first `count` k-cards hands of this deck.
    ///
    /// The hands are split in contiguous ranges of the [Combinations] order,
    /// one range for each of the `num_tasks` tasks. Each task creates its own
    /// accumulator with `init` and calls `f` with it for every hand in its
    /// range, the task accumulators are returned to the caller for reduction.
    ///
    /// Fails if `k` is larger than the deck or `num_tasks` is zero.
    pub fn par_fold<T, I, F>(
        &self,
        num_tasks: usize,
        k: usize,
        count: u64,
        init: I,
        f: F,
    ) -> Result<Vec<T>>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) + Sync,
    {
        check_tasks(num_tasks)?;
        self.check_hand_size(k)?;

        let n = self.cards.len();
        let count = count.min(binomial(n, k));
        let hands_per_task = count.div_ceil(num_tasks as u64).max(1);

        let ranges = (0..num_tasks as u64)
            .map(|task_id| task_id * hands_per_task)
            .take_while(|&start| start < count)
            .map(|start| Combinations::starting_at(n, k, start, hands_per_task.min(count - start)))
            .collect::<Result<Vec<_>>>()?;

        Ok(thread::scope(|s| {
            let tasks = ranges
                .into_iter()
                .map(|mut subsets| {
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut acc = init();
                        let mut h = Vec::with_capacity(k);
                        while let Some(p) = subsets.next_slice() {
                            h.clear();
                            h.extend(p.iter().map(|&pos| self.cards[pos]));
                            f(&mut acc, &h);
                        }

                        acc
                    })
                })
                .collect::<Vec<_>>();

            join_all(tasks)
        }))
    }

    /// Parallel fold over `samples` random k-cards hands.
    ///
    /// The samples are split across `num_tasks` tasks, each with its own random
    /// generator. When a `seed` is given the task generators are seeded from it
    /// so that the same arguments sample the same hands.
    pub fn par_sample_fold<T, I, F>(
        &self,
        num_tasks: usize,
        samples: u64,
        k: usize,
        seed: Option<u64>,
        init: I,
        f: F,
    ) -> Result<Vec<T>>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) + Sync,
    {
        check_tasks(num_tasks)?;
        self.check_hand_size(k)?;

        let samples_per_task = samples.div_ceil(num_tasks as u64).max(1);

        Ok(thread::scope(|s| {
            let tasks = (0..num_tasks as u64)
                .map(|task_id| (task_id, task_id * samples_per_task))
                .take_while(|&(_, start)| start < samples)
                .map(|(task_id, start)| {
                    let (init, f) = (&init, &f);
                    let task_samples = samples_per_task.min(samples - start);
                    s.spawn(move || {
                        let mut rng = match seed {
                            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id)),
                            None => SmallRng::from_os_rng(),
                        };

                        let mut acc = init();
                        let mut h = Vec::with_capacity(k);
                        for _ in 0..task_samples {
                            h.clear();
                            h.extend(self.cards.choose_multiple(&mut rng, k).copied());
                            f(&mut acc, &h);
                        }

                        acc
                    })
                })
                .collect::<Vec<_>>();

            join_all(tasks)
        }))
    }

    fn check_hand_size(&self, k: usize) -> Result<()> {
        if k > self.cards.len() {
            Err(Error::InvalidArgument(format!(
                "cannot take {k} cards from a deck of {}",
                self.cards.len()
            )))
        } else {
            Ok(())
        }
    }
}

fn check_tasks(num_tasks: usize) -> Result<()> {
    if num_tasks == 0 {
        Err(Error::InvalidArgument("the number of tasks must be > 0".into()))
    } else {
        Ok(())
    }
}

/// Waits for all tasks, a panic in a task is propagated to the caller.
fn join_all<T>(tasks: Vec<thread::ScopedJoinHandle<'_, T>>) -> Vec<T> {
    tasks
        .into_iter()
        .map(|task| task.join().unwrap_or_else(|e| panic::resume_unwind(e)))
        .collect()
}
