//! Formatting utilities for terminal output

use crate::core::{Feedback, SLOTS};

/// Format feedback as a row of pegs: `●` red, `○` white, `·` empty
#[must_use]
pub fn feedback_pegs(feedback: Feedback) -> String {
    let red = usize::from(feedback.red());
    let white = usize::from(feedback.white());

    let mut result = String::with_capacity(SLOTS * 3);
    result.push_str(&"●".repeat(red));
    result.push_str(&"○".repeat(white));
    result.push_str(&"·".repeat(SLOTS.saturating_sub(red + white)));
    result
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bits of information gained when `before` candidates shrink to `after`
#[must_use]
pub fn information_gain(before: usize, after: usize) -> f64 {
    if before == 0 || after == 0 {
        return 0.0;
    }
    (before as f64 / after as f64).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pegs_for_no_match() {
        let feedback = Feedback::new(0, 0).unwrap();
        assert_eq!(feedback_pegs(feedback), "·····");
    }

    #[test]
    fn pegs_for_solved() {
        assert_eq!(feedback_pegs(Feedback::SOLVED), "●●●●●");
    }

    #[test]
    fn pegs_red_before_white() {
        let feedback = Feedback::new(2, 1).unwrap();
        assert_eq!(feedback_pegs(feedback), "●●○··");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn information_gain_halving_is_one_bit() {
        assert!((information_gain(32768, 16384) - 1.0).abs() < 1e-12);
        assert!(information_gain(10, 0).abs() < f64::EPSILON);
    }
}
