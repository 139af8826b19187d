//! Secret solving command
//!
//! Plays a full session against a local referee and returns every step.

use crate::core::{CODE_SPACE, Code};
use crate::protocol::Referee;
use crate::solver::{Session, SessionConfig, SessionError, SessionReport, Strategy};
use rand::Rng;

/// Configuration for solving a secret
pub struct SolveConfig {
    pub secret: Code,
    pub session: SessionConfig,
}

impl SolveConfig {
    #[must_use]
    pub fn new(secret: Code) -> Self {
        Self {
            secret,
            session: SessionConfig::default(),
        }
    }

    /// Solve a uniformly random secret
    #[must_use]
    pub fn random() -> Self {
        Self::new(Code::from_index(rand::rng().random_range(0..CODE_SPACE)))
    }
}

/// Solve the configured secret with the given strategy
///
/// The session talks to an in-memory referee through the regular framing,
/// so parity encoding and decoding are exercised on every round.
///
/// # Errors
/// Returns `SessionError` if the referee cannot encode an answer.
pub fn solve_code<S: Strategy>(
    config: &SolveConfig,
    strategy: &S,
) -> Result<SessionReport, SessionError> {
    let referee = Referee::new(config.secret, config.session.layout);
    Session::new(strategy, referee, config.session).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ResponseLayout;
    use crate::solver::{DiversityStrategy, FirstCandidateStrategy, Outcome};

    #[test]
    fn solve_reference_secret() {
        let secret: Code = "25160".parse().unwrap();
        let report = solve_code(&SolveConfig::new(secret), &DiversityStrategy::default()).unwrap();

        assert_eq!(report.outcome, Outcome::Solved { rounds: 6, code: secret });
        assert_eq!(report.steps.last().map(|s| s.guess), Some(secret));
    }

    #[test]
    fn solve_records_history() {
        let secret: Code = "70773".parse().unwrap();
        let report = solve_code(&SolveConfig::new(secret), &DiversityStrategy::default()).unwrap();

        assert!(!report.steps.is_empty());
        for (i, step) in report.steps.iter().enumerate() {
            assert_eq!(step.round as usize, i + 1);
            assert!(step.candidates_after <= step.candidates_before);
        }
    }

    #[test]
    fn solve_over_classic_layout() {
        let secret: Code = "01234".parse().unwrap();
        let mut config = SolveConfig::new(secret);
        config.session.layout = ResponseLayout::Classic;

        let report = solve_code(&config, &DiversityStrategy::default()).unwrap();
        assert!(report.outcome.is_solved());
    }

    #[test]
    fn solve_with_max_rounds_limit() {
        let secret: Code = "77777".parse().unwrap();
        let mut config = SolveConfig::new(secret);
        config.session.max_rounds = 2;

        let report = solve_code(&config, &FirstCandidateStrategy).unwrap();
        assert_eq!(report.outcome, Outcome::Exhausted { rounds: 2 });
        assert!(report.steps.len() <= 2);
    }

    #[test]
    fn random_secret_is_solved() {
        let config = SolveConfig::random();
        assert!(config.secret.packed() < CODE_SPACE);
        let report = solve_code(&config, &DiversityStrategy::default()).unwrap();

        assert_eq!(
            report.outcome,
            Outcome::Solved {
                rounds: report.rounds(),
                code: config.secret
            }
        );
        assert!(report.rounds() <= 10);
    }
}
