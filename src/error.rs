use thiserror::Error;

/// Failures surfaced to the host. Contradictions hit during propagation are
/// recovered internally by backtracking and never appear here.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolverError {
    /// The backtrack stack was exhausted without reaching a solution.
    #[error("the puzzle has no solution")]
    NoSolution,

    /// The puzzle was rejected before any mutation took place.
    #[error("invalid puzzle input: {0}")]
    InvalidInput(String),
}
