//! Masyu puzzle solver core: a work-queue driven propagation engine over
//! vertex-local deduction rules, with depth-first guessing and snapshot
//! backtracking on top. The GUI, file handling and worker-thread plumbing
//! live in the host application; this crate exposes `solve` and `validate`
//! over a `PuzzleState` plus an observer hook for visualization.

#[macro_use]
extern crate itertools;

pub mod algorithm;
pub mod data;
mod error;
pub mod messaging;
pub mod serialization;

pub use crate::algorithm::{
    solve, validate, SolutionValue, SolveStats, Solver, SolverConfig,
};
pub use crate::data::{LineState, PuzzleState, Snapshot, TileType};
pub use crate::error::SolverError;
pub use crate::messaging::{Message, MessageBus, Publisher};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::algorithm::SolutionValue;
    use crate::error::SolverError;
    use crate::serialization;

    /// Solves a puzzle given in the serialized text format. Returns the
    /// solved state in the same format, or `None` when the puzzle has no
    /// solution.
    #[pyfunction]
    fn solve(serialized: &str) -> PyResult<Option<String>> {
        let mut state = serialization::deserialize(serialized)
            .map_err(|error| PyValueError::new_err(error.to_string()))?;

        match crate::algorithm::solve(&mut state) {
            Ok(()) => Ok(Some(serialization::serialize(&state))),
            Err(SolverError::NoSolution) => Ok(None),
            Err(error) => Err(PyValueError::new_err(error.to_string())),
        }
    }

    /// Classifies a puzzle given in the serialized text format as
    /// `"SOLVED"`, `"UNSOLVED"` or `"INVALID"`.
    #[pyfunction]
    fn validate(serialized: &str) -> PyResult<&'static str> {
        let state = serialization::deserialize(serialized)
            .map_err(|error| PyValueError::new_err(error.to_string()))?;

        Ok(match crate::algorithm::validate(&state) {
            SolutionValue::Solved => "SOLVED",
            SolutionValue::Unsolved => "UNSOLVED",
            SolutionValue::Invalid => "INVALID",
        })
    }

    #[pymodule]
    fn libmasyu(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(solve, m)?)?;
        m.add_function(wrap_pyfunction!(validate, m)?)
    }
}
