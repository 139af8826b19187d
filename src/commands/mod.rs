//! Command implementations

pub mod benchmark;
pub mod play;
pub mod simple;
pub mod solve;
pub mod test_all;

pub use benchmark::{BenchmarkResult, random_secrets, run_benchmark};
pub use play::play_remote;
pub use simple::{run_interactive, run_simple};
pub use solve::{SolveConfig, solve_code};
pub use test_all::{TestAllStatistics, print_test_all_statistics, run_test_all};
