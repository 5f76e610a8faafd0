// Copyright (C) 2025 Showdown Contributors
// SPDX-License-Identifier: Apache-2.0

//! Showdown equity calculator CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::time::Instant;

use showdown_eval::{
    BitPackedClassifier, Card, Config, CountingClassifier, EquityEngine, EquityRequest,
    HandClassifier, Limit,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Sort the ranks and count duplicates.
    Counting,
    /// Bit arithmetic on packed ranks.
    BitPacked,
}

#[derive(Debug, Parser)]
struct Cli {
    /// A player hole cards, repeat for each player (e.g. -H AsKd -H 7h7c).
    #[clap(long = "hand", short = 'H', required = true)]
    hands: Vec<String>,
    /// The known board cards (e.g. "Kc Qd 7s").
    #[clap(long, short, default_value = "")]
    board: String,
    /// Cards out of the deck that are not in play.
    #[clap(long, short, default_value = "")]
    dead: String,
    /// The hand classification strategy.
    #[clap(long, value_enum, default_value_t = Strategy::BitPacked)]
    strategy: Strategy,
    /// Number of parallel tasks, defaults to the available parallelism.
    #[clap(long, short, value_parser = clap::value_parser!(u16).range(1..=1024))]
    tasks: Option<u16>,
    /// Evaluate this many random boards instead of all boards.
    #[clap(long, conflicts_with = "truncate", value_parser = clap::value_parser!(u64).range(1..))]
    samples: Option<u64>,
    /// Evaluate only the first boards in enumeration order.
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    truncate: Option<u64>,
    /// Seed for reproducible samples.
    #[clap(long, requires = "samples")]
    seed: Option<u64>,
    /// Log the enumeration details.
    #[clap(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let players = cli
        .hands
        .iter()
        .map(|h| parse_hole(h))
        .collect::<Result<Vec<_>>>()?;

    let board = Card::parse_many(&cli.board).with_context(|| format!("board {}", cli.board))?;
    let dead = Card::parse_many(&cli.dead).with_context(|| format!("dead cards {}", cli.dead))?;

    let limit = match (cli.samples, cli.truncate) {
        (Some(boards), _) => Limit::Sample {
            boards,
            seed: cli.seed,
        },
        (None, Some(boards)) => Limit::Truncate { boards },
        (None, None) => Limit::Exhaustive,
    };

    let mut config = Config::default();
    if let Some(tasks) = cli.tasks {
        config.tasks = tasks as usize;
    }

    let request = EquityRequest::new(players)
        .with_board(&board)
        .with_dead(&dead)
        .with_limit(limit);

    match cli.strategy {
        Strategy::Counting => report(EquityEngine::new(CountingClassifier, config), &request),
        Strategy::BitPacked => report(EquityEngine::new(BitPackedClassifier, config), &request),
    }
}

fn parse_hole(s: &str) -> Result<[Card; 2]> {
    let cards = Card::parse_many(s).with_context(|| format!("hand {s}"))?;
    match cards.as_slice() {
        [c1, c2] => Ok([*c1, *c2]),
        _ => bail!("hand {s} must have 2 cards, got {}", cards.len()),
    }
}

fn report<C: HandClassifier>(engine: EquityEngine<C>, request: &EquityRequest) -> Result<()> {
    let now = Instant::now();
    let result = engine.compute(request)?;
    let elapsed = now.elapsed().as_secs_f64();

    let kind = if result.exact { "exact" } else { "estimated" };
    info!(
        "{} boards evaluated in {elapsed:.3}s, {kind} equities",
        result.boards
    );

    let complete_board = request.board().len() == 5;

    println!("{:<8}{:>9}{:>9}{:>9}", "Hand", "Win", "Tie", "Equity");
    for (idx, hole) in request.players().iter().enumerate() {
        let hand = format!("{}{}", hole[0], hole[1]);
        print!(
            "{hand:<8}{:>8.3}%{:>8.3}%{:>8.3}%",
            result.win[idx] * 100.0,
            result.tie[idx] * 100.0,
            result.equity[idx] * 100.0,
        );

        if complete_board {
            let mut cards = hole.to_vec();
            cards.extend_from_slice(request.board());
            let best = engine.classifier().best_of(&cards)?;
            print!("  {}", best.ranking);
        }

        println!();
    }

    Ok(())
}
