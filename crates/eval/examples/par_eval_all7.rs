// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example par_eval_all7
// ```

use std::time::Instant;

use showdown_eval::*;

fn main() -> Result<()> {
    // Evaluate all 133M hands with 4 parallel tasks.
    const NUM_TASKS: usize = 4;

    let now = Instant::now();

    let classifier = BitPackedClassifier;
    let task_counts = Deck::default().par_fold(
        NUM_TASKS,
        7,
        u64::MAX,
        || Ok([0u64; 10]),
        |counts: &mut Result<[u64; 10]>, hand| {
            // Keep the first error a task hits.
            if counts.is_err() {
                return;
            }

            match classifier.best_of(hand) {
                Ok(best) => {
                    if let Ok(task_counts) = counts {
                        task_counts[best.ranking.category() as usize] += 1;
                    }
                }
                Err(e) => *counts = Err(e),
            }
        },
    )?;

    let elapsed = now.elapsed().as_secs_f64();

    // Aggregate counters.
    let mut counts = [0u64; 10];
    for task in task_counts {
        for (acc, c) in counts.iter_mut().zip(task?) {
            *acc += c;
        }
    }

    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in HandCategory::categories() {
        let label = format!("{}:", category.name());
        println!("{label:<17}{}", counts[category as usize]);
    }

    Ok(())
}
