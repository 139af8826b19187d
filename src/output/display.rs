//! Display functions for command results

use super::formatters::{create_progress_bar, feedback_pegs, information_gain};
use crate::commands::BenchmarkResult;
use crate::core::Code;
use crate::solver::SessionReport;
use colored::Colorize;

/// Print a finished session, one line per round
pub fn print_session_report(report: &SessionReport, secret: Option<Code>, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    if let Some(secret) = secret {
        println!("Solving: {}", secret.to_string().bright_yellow().bold());
    } else {
        println!("Playing against remote referee");
    }
    println!("{}", "─".repeat(60).cyan());

    for step in &report.steps {
        println!(
            "\nRound {}: {} {}",
            step.round,
            step.guess,
            feedback_pegs(step.feedback)
        );

        if verbose {
            println!(
                "  Candidates:  {} → {}",
                step.candidates_before, step.candidates_after
            );
            if step.candidates_after > 0 {
                println!(
                    "  Info gained: {:.3} bits",
                    information_gain(step.candidates_before, step.candidates_after)
                );
            }
        }
    }

    println!();
    if report.outcome.is_solved() {
        println!("{}", format!("{}!", report.outcome).green().bold());
    } else {
        println!("{}", report.outcome.to_string().red().bold());
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n{}", "Performance:".bright_cyan().bold());
    println!("   Secrets tested:   {}", result.total_secrets);
    println!("   Solved:           {}", result.solved);
    if result.failed > 0 {
        println!("   Failed:           {}", result.failed.to_string().red());
    }
    println!(
        "   Average rounds:   {}",
        format!("{:.3}", result.average_rounds).bright_yellow().bold()
    );
    println!(
        "   Best case:        {}",
        result.min_rounds.to_string().green()
    );
    println!(
        "   Worst case:       {}",
        result.max_rounds.to_string().yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Secrets/second:   {:.1}", result.secrets_per_second);

    if result.solved == 0 {
        return;
    }

    println!("\n{}", "Distribution:".bright_cyan().bold());
    for rounds in result.min_rounds..=result.max_rounds {
        if let Some(&count) = result.distribution.get(&rounds) {
            let pct = count as f64 / result.solved as f64 * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {rounds:2}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
}
