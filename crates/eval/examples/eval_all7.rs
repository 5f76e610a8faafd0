// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all7 -- bit-packed
// ...
// Total hands      133784560
//
// High Card:       23294460
// Pair:            58627800
// Two Pair:        31433400
// Three of a Kind: 6461620
// Straight:        6180020
// Flush:           4047644
// Full House:      3473184
// Four of a Kind:  224848
// Straight Flush:  37260
// Royal Flush:     4324
// ```

use std::time::Instant;

use showdown_eval::*;

fn count_categories<C: HandClassifier>(classifier: C) -> Result<[u64; 10]> {
    let deck = Deck::default();
    let mut counts = [0u64; 10];
    let mut hands = combinations(deck.count(), 7)?;
    let mut hand = Vec::with_capacity(7);

    while let Some(positions) = hands.next_slice() {
        hand.clear();
        hand.extend(positions.iter().map(|&pos| deck.cards()[pos]));

        let best = classifier.best_of(&hand)?;
        counts[best.ranking.category() as usize] += 1;
    }

    Ok(counts)
}

fn main() -> Result<()> {
    let now = Instant::now();
    let counts = match std::env::args().nth(1).as_deref() {
        Some("bit-packed") => count_categories(BitPackedClassifier)?,
        _ => count_categories(CountingClassifier)?,
    };

    let elapsed = now.elapsed().as_secs_f64();
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
