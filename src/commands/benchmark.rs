//! Benchmark command
//!
//! Tests solver performance across a set of secrets.

use crate::core::{CODE_SPACE, Code};
use crate::protocol::Referee;
use crate::solver::{Outcome, Session, SessionConfig, SessionError, Strategy};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_secrets: usize,
    pub solved: usize,
    pub failed: usize,
    pub total_rounds: u64,
    pub average_rounds: f64,
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub distribution: FxHashMap<u32, usize>,
    pub duration: Duration,
    pub secrets_per_second: f64,
}

/// Draw `count` secrets uniformly from the code space
#[must_use]
pub fn random_secrets(count: usize) -> Vec<Code> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| Code::from_index(rng.random_range(0..CODE_SPACE)))
        .collect()
}

/// Run one session per secret and collect round statistics
///
/// Rounds are counted for solved sessions only; every other session,
/// including one cut short by a transport error, counts as failed.
pub fn run_benchmark<S: Strategy>(
    strategy: &S,
    secrets: &[Code],
    config: SessionConfig,
) -> BenchmarkResult {
    let start = Instant::now();
    let mut solved = 0;
    let mut failed = 0;
    let mut total_rounds = 0u64;
    let mut min_rounds = u32::MAX;
    let mut max_rounds = 0;
    let mut distribution: FxHashMap<u32, usize> = FxHashMap::default();

    for &secret in secrets {
        let referee = Referee::new(secret, config.layout);
        let outcome = match Session::new(strategy, referee, config).run() {
            Ok(report) => report.outcome,
            Err(SessionError::Transport { round, .. }) => Outcome::TransportFault { round },
        };
        let Outcome::Solved { rounds, .. } = outcome else {
            debug!(%secret, %outcome, "benchmark session failed");
            failed += 1;
            continue;
        };

        solved += 1;
        total_rounds += u64::from(rounds);
        min_rounds = min_rounds.min(rounds);
        max_rounds = max_rounds.max(rounds);
        *distribution.entry(rounds).or_insert(0) += 1;
    }

    let duration = start.elapsed();

    BenchmarkResult {
        total_secrets: secrets.len(),
        solved,
        failed,
        total_rounds,
        average_rounds: if solved > 0 {
            total_rounds as f64 / solved as f64
        } else {
            0.0
        },
        min_rounds: if solved > 0 { min_rounds } else { 0 },
        max_rounds,
        distribution,
        duration,
        secrets_per_second: secrets.len() as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::all_codes;
    use crate::solver::{DiversityStrategy, FirstCandidateStrategy, MAX_ROUNDS};

    fn sample() -> Vec<Code> {
        all_codes().step_by(331).collect()
    }

    #[test]
    fn benchmark_runs() {
        let secrets = sample();
        let result = run_benchmark(&DiversityStrategy::default(), &secrets, SessionConfig::default());

        assert_eq!(result.total_secrets, secrets.len());
        assert_eq!(result.solved, secrets.len());
        assert_eq!(result.failed, 0);
        assert!(result.average_rounds >= 1.0);
        assert!(result.min_rounds >= 1);
        assert!(result.max_rounds <= 10);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let secrets = sample();
        let result = run_benchmark(&DiversityStrategy::default(), &secrets, SessionConfig::default());

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.solved);

        let weighted: u64 = result
            .distribution
            .iter()
            .map(|(&rounds, &count)| u64::from(rounds) * count as u64)
            .sum();
        assert_eq!(weighted, result.total_rounds);
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let secrets = sample();
        let result = run_benchmark(&FirstCandidateStrategy, &secrets, SessionConfig::default());

        assert!(result.average_rounds >= f64::from(result.min_rounds));
        assert!(result.average_rounds <= f64::from(result.max_rounds));
        for &rounds in result.distribution.keys() {
            assert!((1..=MAX_ROUNDS).contains(&rounds));
        }
    }

    #[test]
    fn benchmark_empty_secret_list() {
        let result = run_benchmark(&DiversityStrategy::default(), &[], SessionConfig::default());

        assert_eq!(result.total_secrets, 0);
        assert_eq!(result.total_rounds, 0);
        assert_eq!(result.min_rounds, 0);
        assert!(result.average_rounds.abs() < f64::EPSILON);
    }

    #[test]
    fn unsolved_sessions_are_counted_as_failed() {
        let secrets = sample();
        let config = SessionConfig {
            max_rounds: 1,
            ..SessionConfig::default()
        };
        let result = run_benchmark(&FirstCandidateStrategy, &secrets, config);

        // Only packed 0 is guessed in the first round
        assert_eq!(result.solved, 1);
        assert_eq!(result.failed, secrets.len() - 1);
        assert_eq!(result.solved + result.failed, result.total_secrets);
        assert_eq!(result.distribution.get(&1), Some(&1));
    }

    #[test]
    fn random_secrets_have_requested_count() {
        assert_eq!(random_secrets(25).len(), 25);
    }
}
