//! Test all secrets - comprehensive solver evaluation
//!
//! Runs the solver against every code in the space and generates statistics.

use crate::core::{Code, all_codes};
use crate::output::formatters::create_progress_bar;
use crate::protocol::Referee;
use crate::solver::{Outcome, Session, SessionConfig, SessionError, Strategy};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Number of hardest secrets kept in the statistics
const HARDEST_KEPT: usize = 10;

/// Result from playing a single secret
#[derive(Debug, Clone, Copy)]
pub struct SecretResult {
    pub secret: Code,
    pub first_guess: Option<Code>,
    pub outcome: Outcome,
}

/// Statistics from testing all secrets
#[derive(Debug)]
pub struct TestAllStatistics {
    pub total_secrets: usize,
    pub solved: usize,
    pub failed: usize,
    pub distribution: FxHashMap<u32, usize>,
    pub total_time: Duration,
    pub average_rounds: f64,
    pub max_rounds: u32,
    pub min_rounds: u32,
    pub hardest: Vec<(Code, u32)>,
    pub failures: Vec<(Code, Outcome)>,
    pub first_guess_used: FxHashMap<Code, usize>,
}

/// Play one secret against a local referee
pub fn play_secret<S: Strategy>(strategy: &S, secret: Code, config: SessionConfig) -> SecretResult {
    let referee = Referee::new(secret, config.layout);
    match Session::new(strategy, referee, config).run() {
        Ok(report) => SecretResult {
            secret,
            first_guess: report.steps.first().map(|s| s.guess),
            outcome: report.outcome,
        },
        Err(SessionError::Transport { round, .. }) => SecretResult {
            secret,
            first_guess: None,
            outcome: Outcome::TransportFault { round },
        },
    }
}

/// Run the solver on every secret (or the first `limit` in ascending order)
///
/// Sessions are independent and run in parallel.
pub fn run_test_all<S: Strategy + Sync>(
    strategy: &S,
    limit: Option<usize>,
    config: SessionConfig,
) -> TestAllStatistics {
    let secrets: Vec<Code> = all_codes().take(limit.unwrap_or(usize::MAX)).collect();

    let pb = ProgressBar::new(secrets.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {elapsed}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let results: Vec<SecretResult> = secrets
        .par_iter()
        .map(|&secret| {
            let result = play_secret(strategy, secret, config);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    collect_statistics(&results, start.elapsed())
}

fn collect_statistics(results: &[SecretResult], total_time: Duration) -> TestAllStatistics {
    let mut distribution: FxHashMap<u32, usize> = FxHashMap::default();
    let mut first_guess_used: FxHashMap<Code, usize> = FxHashMap::default();
    let mut solved_rounds: Vec<(Code, u32)> = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        if let Some(first) = result.first_guess {
            *first_guess_used.entry(first).or_insert(0) += 1;
        }
        match result.outcome {
            Outcome::Solved { rounds, .. } => {
                *distribution.entry(rounds).or_insert(0) += 1;
                solved_rounds.push((result.secret, rounds));
            }
            outcome => failures.push((result.secret, outcome)),
        }
    }

    let solved = solved_rounds.len();
    let total_rounds: u64 = solved_rounds.iter().map(|&(_, r)| u64::from(r)).sum();
    let average_rounds = if solved > 0 {
        total_rounds as f64 / solved as f64
    } else {
        0.0
    };
    let max_rounds = solved_rounds.iter().map(|&(_, r)| r).max().unwrap_or(0);
    let min_rounds = solved_rounds.iter().map(|&(_, r)| r).min().unwrap_or(0);

    // Stable sort keeps ascending code order among equal round counts
    solved_rounds.sort_by_key(|&(_, rounds)| std::cmp::Reverse(rounds));
    solved_rounds.truncate(HARDEST_KEPT);

    TestAllStatistics {
        total_secrets: results.len(),
        solved,
        failed: failures.len(),
        distribution,
        total_time,
        average_rounds,
        max_rounds,
        min_rounds,
        hardest: solved_rounds,
        failures,
        first_guess_used,
    }
}

/// Print test-all statistics
pub fn print_test_all_statistics(stats: &TestAllStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Test Results ");
    println!("{}", "═".repeat(70));

    let total = stats.total_secrets.max(1) as f64;

    println!("\n{}", "Overall Performance".bright_cyan().bold());
    println!("  Total secrets tested: {}", stats.total_secrets);
    println!(
        "  Successfully solved:  {} {}",
        stats.solved,
        format!("({:.1}%)", stats.solved as f64 / total * 100.0).green()
    );
    if stats.failed > 0 {
        println!(
            "  Failed to solve:      {} {}",
            stats.failed,
            format!("({:.1}%)", stats.failed as f64 / total * 100.0).red()
        );
    }
    println!(
        "  Average rounds:       {}",
        format!("{:.4}", stats.average_rounds).bright_yellow().bold()
    );
    println!("  Worst case:           {} rounds", stats.max_rounds);
    println!("  Total time:           {:.2}s", stats.total_time.as_secs_f64());
    println!(
        "  Time per secret:      {:.3}ms",
        stats.total_time.as_secs_f64() * 1000.0 / total
    );

    println!("\n{}", "Round Distribution".bright_cyan().bold());
    let max_count = stats.distribution.values().copied().max().unwrap_or(1);
    for rounds in stats.min_rounds..=stats.max_rounds {
        let count = stats.distribution.get(&rounds).copied().unwrap_or(0);
        if stats.solved == 0 {
            break;
        }
        let percentage = count as f64 / stats.solved as f64 * 100.0;
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        println!("  {rounds:2} rounds: {} {count:5} ({percentage:5.1}%)", bar.green());
    }

    if !stats.hardest.is_empty() {
        println!("\n{}", "Hardest Secrets".yellow().bold());
        for (code, rounds) in stats.hardest.iter().take(5) {
            println!("  {} ({rounds} rounds)", code.to_string().yellow());
        }
    }

    if !stats.failures.is_empty() {
        println!("\n{}", "Failures".red().bold());
        for (code, outcome) in stats.failures.iter().take(5) {
            println!("  {}: {outcome}", code.to_string().red());
        }
    }

    println!("\nFirst Guess Usage");
    let mut first_guesses: Vec<(Code, usize)> =
        stats.first_guess_used.iter().map(|(&k, &v)| (k, v)).collect();
    first_guesses.sort_by_key(|&(code, count)| (std::cmp::Reverse(count), code));
    for (code, count) in first_guesses.iter().take(5) {
        println!(
            "  {code}: {count} times ({:.1}%)",
            *count as f64 / total * 100.0
        );
    }
}
