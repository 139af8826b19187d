//! Simple interactive CLI mode
//!
//! The user holds the secret and scores each suggested guess.

use crate::core::{Code, Feedback};
use crate::output::formatters::feedback_pegs;
use crate::solver::{CandidateSet, Strategy};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive CLI mode on stdin/stdout
///
/// Returns the number of games solved.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub fn run_simple<S: Strategy>(strategy: &S) -> io::Result<u32> {
    let stdin = io::stdin();
    run_interactive(strategy, &mut stdin.lock(), &mut io::stdout())
}

/// Interactive loop over arbitrary input and output
///
/// End of input behaves like `quit`.
///
/// # Errors
/// Returns an error if reading input or writing output fails, or if the
/// strategy yields no guess for a non-empty candidate set.
pub fn run_interactive<S: Strategy, R: BufRead, W: Write>(
    strategy: &S,
    input: &mut R,
    out: &mut W,
) -> io::Result<u32> {
    print_banner(out)?;

    let mut history: Vec<(Code, Feedback)> = Vec::new();
    let mut candidates = CandidateSet::full();
    let mut games_solved = 0;

    loop {
        if candidates.is_empty() {
            writeln!(out, "\nNo candidates remain! Your feedback may be incorrect.")?;
            writeln!(out, "Type 'undo' to go back, or 'new' to start over.\n")?;

            match read_input(input, out, "Command")?.as_deref() {
                None | Some("quit" | "q" | "exit") => return farewell(out, games_solved),
                Some("undo" | "u") => {
                    undo(&mut history, &mut candidates, out)?;
                }
                Some("new" | "n") => new_game(&mut history, &mut candidates, out)?,
                Some(_) => {}
            }
            continue;
        }

        let Some(guess) = strategy.select_guess(&candidates) else {
            return Err(io::Error::other("strategy produced no guess"));
        };
        let turn = history.len() + 1;

        writeln!(out, "{}", "─".repeat(60))?;
        writeln!(out, "Turn {turn}: {} candidates remaining", candidates.len())?;
        writeln!(out, "{}", "─".repeat(60))?;
        writeln!(
            out,
            "\nSuggested guess: {}\n",
            guess.to_string().bright_yellow().bold()
        )?;

        if candidates.len() <= 10 {
            writeln!(out, "Remaining candidates:")?;
            for candidate in candidates.iter() {
                writeln!(out, "  • {candidate}")?;
            }
            writeln!(out)?;
        }

        let feedback = loop {
            let Some(line) = read_input(input, out, "Enter feedback (red white, 'win', or command)")?
            else {
                return farewell(out, games_solved);
            };

            match line.as_str() {
                "quit" | "q" | "exit" => return farewell(out, games_solved),
                "new" | "n" => {
                    new_game(&mut history, &mut candidates, out)?;
                    break None;
                }
                "undo" | "u" => {
                    if undo(&mut history, &mut candidates, out)? {
                        break None;
                    }
                }
                "win" | "correct" | "solved" => break Some(Feedback::SOLVED),
                other => match other.parse::<Feedback>() {
                    Ok(feedback) => break Some(feedback),
                    Err(e) => writeln!(out, "{e}. Use e.g. '2 1' or 'win'\n")?,
                },
            }
        };

        let Some(feedback) = feedback else {
            continue;
        };
        history.push((guess, feedback));

        if feedback.is_solved() {
            games_solved += 1;
            print_victory(out, &history)?;

            match read_input(input, out, "Play again? (yes/no)")?.as_deref() {
                Some("yes" | "y") => new_game(&mut history, &mut candidates, out)?,
                _ => return farewell(out, games_solved),
            }
            continue;
        }

        let remaining = candidates.exclude(guess, feedback);
        writeln!(out, "  {} -> {remaining} candidates\n", feedback_pegs(feedback))?;
    }
}

fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║            Mastermind Solver - Interactive Mode              ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(out, "Think of a secret of 5 slots with colors 0-7.")?;
    writeln!(out, "After each guess, enter the feedback as two numbers:\n")?;
    writeln!(out, "  - red:   right color in the right slot")?;
    writeln!(out, "  - white: right color in the wrong slot")?;
    writeln!(out, "  - Or type 'win' if the guess is your secret!\n")?;
    writeln!(out, "Commands: 'quit' to exit, 'new' for new game, 'undo' to undo last guess\n")
}

fn print_victory<W: Write>(out: &mut W, history: &[(Code, Feedback)]) -> io::Result<()> {
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    writeln!(
        out,
        "{}",
        format!("  Solved in {} rounds!", history.len()).bright_green().bold()
    )?;
    writeln!(out, "{}", "═".repeat(60).bright_cyan())?;

    writeln!(out, "\n  Guess history:")?;
    for (i, (code, feedback)) in history.iter().enumerate() {
        writeln!(
            out,
            "    {:2}. {} {}",
            i + 1,
            code.to_string().bright_white().bold(),
            feedback_pegs(*feedback)
        )?;
    }
    writeln!(out)
}

/// Drop the last exchange and rebuild the candidate set from the rest
fn undo<W: Write>(
    history: &mut Vec<(Code, Feedback)>,
    candidates: &mut CandidateSet,
    out: &mut W,
) -> io::Result<bool> {
    if history.pop().is_none() {
        writeln!(out, "Nothing to undo!\n")?;
        return Ok(false);
    }

    candidates.reset();
    for &(guess, feedback) in history.iter() {
        candidates.exclude(guess, feedback);
    }
    writeln!(out, "Undone! Back to turn {}\n", history.len() + 1)?;
    Ok(true)
}

fn new_game<W: Write>(
    history: &mut Vec<(Code, Feedback)>,
    candidates: &mut CandidateSet,
    out: &mut W,
) -> io::Result<()> {
    history.clear();
    candidates.reset();
    writeln!(out, "\nNew game started!\n")
}

fn farewell<W: Write>(out: &mut W, games_solved: u32) -> io::Result<u32> {
    writeln!(out, "\nThanks for playing!\n")?;
    Ok(games_solved)
}

/// Prompt and read one trimmed, lowercased line; `None` at end of input
fn read_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{SolveConfig, solve_code};
    use crate::solver::DiversityStrategy;
    use std::io::Cursor;

    fn run(script: &str) -> (u32, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let solved =
            run_interactive(&DiversityStrategy::default(), &mut input, &mut out).unwrap();
        (solved, String::from_utf8(out).unwrap())
    }

    /// Feedback lines a truthful user would type for `secret`
    fn honest_script(secret: &str) -> String {
        let config = SolveConfig::new(secret.parse().unwrap());
        let report = solve_code(&config, &DiversityStrategy::default()).unwrap();
        report
            .steps
            .iter()
            .map(|s| format!("{} {}\n", s.feedback.red(), s.feedback.white()))
            .collect()
    }

    #[test]
    fn honest_feedback_solves_the_secret() {
        let script = honest_script("25160") + "no\n";
        let (solved, output) = run(&script);

        assert_eq!(solved, 1);
        assert!(output.contains("Turn 6"));
        assert!(output.contains("Solved in 6 rounds"));
        assert!(!output.contains("Turn 7"));
    }

    #[test]
    fn win_shortcut_ends_the_game() {
        let (solved, output) = run("win\nno\n");

        assert_eq!(solved, 1);
        assert!(output.contains("Solved in 1 rounds"));
        assert!(output.contains("3 2 1 0 0"));
    }

    #[test]
    fn end_of_input_quits() {
        let (solved, output) = run("");

        assert_eq!(solved, 0);
        assert!(output.contains("Turn 1: 32768 candidates remaining"));
        assert!(output.contains("Thanks for playing"));
    }

    #[test]
    fn undo_restores_previous_turn() {
        let (_, output) = run("0 0\nundo\nquit\n");

        assert!(output.contains("Turn 2"));
        assert!(output.contains("Undone! Back to turn 1"));
        assert_eq!(output.matches("Turn 1: 32768 candidates remaining").count(), 2);
    }

    #[test]
    fn undo_with_empty_history() {
        let (_, output) = run("undo\nquit\n");
        assert!(output.contains("Nothing to undo!"));
    }

    #[test]
    fn invalid_feedback_is_rejected() {
        let (_, output) = run("6 0\nabc\nquit\n");

        assert!(output.contains("Too many pegs"));
        assert_eq!(output.matches("Use e.g.").count(), 2);
        assert!(!output.contains("Turn 2"));
    }

    #[test]
    fn contradictory_feedback_offers_recovery() {
        let (solved, output) = run("4 1\nnew\nquit\n");

        assert_eq!(solved, 0);
        assert!(output.contains("No candidates remain"));
        assert!(output.contains("New game started"));
        assert_eq!(output.matches("Turn 1: 32768 candidates remaining").count(), 2);
    }

    #[test]
    fn play_again_starts_fresh() {
        let (solved, output) = run("win\nyes\nwin\nno\n");

        assert_eq!(solved, 2);
        assert_eq!(output.matches("Solved in 1 rounds").count(), 2);
    }
}
