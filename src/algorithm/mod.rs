//! The solver: seeds a work set from the puzzle's constraints, runs the
//! vertex rules to fixpoint, and escapes fixpoints short of a solution with
//! prioritized guesses that are rolled back on contradiction.

pub mod positions;
pub mod validator;
pub mod vertex;

use std::cmp;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::data::{
    Direction, LineState, PuzzleState, Snapshot, TileType, Vertex,
};
use crate::error::SolverError;

pub use self::positions::{GuessCandidate, GuessPriority, SolverPosition};
pub use self::validator::{SolutionValidator, SolutionValue};

use self::positions::PositionSet;
use self::vertex::VERTEX_RULES;


/// Tuning knobs for a solver run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverConfig {
    /// Hard cap on the backtrack-stack depth; `None` means unlimited. A
    /// capped search may report no solution for puzzles whose solutions all
    /// lie deeper.
    pub max_search_depth: Option<usize>,
}

/// Counters describing one solver run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolveStats {
    pub guesses: usize,
    pub backtracks: usize,
    pub peak_depth: usize,
}

/// Propagation hit an impossible state; the driver backtracks.
struct Contradiction;

struct SearchFrame {
    snapshot: Snapshot,
    guess: GuessCandidate,
}

/// Depth-first solver over one `PuzzleState`, mutating it in place.
pub struct Solver<'a> {
    state: &'a mut PuzzleState,
    config: SolverConfig,
    positions: PositionSet,
    frames: Vec<SearchFrame>,
    stats: SolveStats,
}

impl<'a> Solver<'a> {
    pub fn new(state: &'a mut PuzzleState) -> Solver<'a> {
        Self::with_config(state, SolverConfig::default())
    }

    pub fn with_config(
        state: &'a mut PuzzleState,
        config: SolverConfig,
    ) -> Solver<'a> {
        Solver {
            state,
            config,
            positions: PositionSet::new(),
            frames: Vec::new(),
            stats: SolveStats::default(),
        }
    }

    /// Counters of the last `solve` run.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Runs propagation and search until the state holds a solution or the
    /// search space is exhausted. On `NoSolution` the state is restored to
    /// its input.
    pub fn solve(&mut self) -> Result<(), SolverError> {
        let initial = self.state.snapshot();
        self.load();

        loop {
            if self.propagate().is_err() {
                self.backtrack_or_fail(&initial)?;
                continue;
            }

            match SolutionValidator::new(self.state).is_solved() {
                SolutionValue::Solved => {
                    debug!(
                        "solved after {} guesses, {} backtracks",
                        self.stats.guesses, self.stats.backtracks
                    );
                    return Ok(());
                }
                SolutionValue::Invalid => {
                    self.backtrack_or_fail(&initial)?;
                }
                SolutionValue::Unsolved => {
                    let at_depth_cap = self
                        .config
                        .max_search_depth
                        .map_or(false, |cap| self.frames.len() >= cap);
                    let candidate = self.guess_candidates().into_iter().next();

                    match candidate {
                        Some(guess) if !at_depth_cap => {
                            self.apply_guess(guess)
                        }
                        _ => self.backtrack_or_fail(&initial)?,
                    }
                }
            }
        }
    }

    /// Seeds the work set: every bead, and both endpoints of every edge the
    /// caller pre-decided.
    fn load(&mut self) {
        let state = &*self.state;
        let mut positions = PositionSet::new();

        for (y, x) in iproduct!(0..state.height(), 0..state.width()) {
            if state.get_tile(x, y) != Some(TileType::Any) {
                positions.insert((x, y));
            }
        }

        for (y, x) in iproduct!(0..state.height(), 0..state.width() - 1) {
            if state.get_hline(x, y) != Some(LineState::Any) {
                positions.insert((x, y));
                positions.insert((x + 1, y));
            }
        }

        for (y, x) in iproduct!(0..state.height() - 1, 0..state.width()) {
            if state.get_vline(x, y) != Some(LineState::Any) {
                positions.insert((x, y));
                positions.insert((x, y + 1));
            }
        }

        self.positions = positions;
    }

    /// Runs the work set dry, applying rules vertex by vertex.
    fn propagate(&mut self) -> Result<(), Contradiction> {
        while !self.positions.is_empty() {
            self.serve()?;
        }

        Ok(())
    }

    /// Takes one vertex off the work set and applies the first productive
    /// rule. The rule's updates are checked for local contradictions and
    /// premature sub-loops before they re-enter the work set.
    fn serve(&mut self) -> Result<(), Contradiction> {
        let position = match self.positions.iter().next() {
            Some(&position) => position,
            None => return Ok(()),
        };
        self.positions.remove(&position);

        let (x, y) = position;
        {
            let vertex = Vertex::new(self.state, x, y);
            if vertex.is_filled() && vertex.tile() == TileType::Any {
                return Ok(());
            }
        }

        for rule in VERTEX_RULES.iter() {
            let updates = rule(self.state, position);
            if updates.is_empty() {
                continue;
            }

            for &(x, y) in updates.iter() {
                let verdict =
                    SolutionValidator::new(self.state).validate_vertex(x, y);
                if verdict == SolutionValue::Invalid {
                    return Err(Contradiction);
                }

                if let Some(length) = validator::walk_nodes(self.state, x, y)
                {
                    if length < self.state.count_lines() {
                        return Err(Contradiction);
                    }
                }
            }

            self.positions.extend(updates);
            self.positions.insert(position);
            break;
        }

        Ok(())
    }

    /// Enumerates one candidate per undecided edge of every unfinished
    /// vertex, deduplicated to the highest priority and sorted best first.
    fn guess_candidates(&self) -> Vec<GuessCandidate> {
        let state = &*self.state;
        let mut order = Vec::new();
        let mut priorities: HashMap<GuessCandidate, GuessPriority> =
            HashMap::new();

        for (y, x) in iproduct!(0..state.height(), 0..state.width()) {
            let vertex = Vertex::new(state, x, y);
            if vertex.is_filled() {
                continue;
            }

            let priority = positions::guess_priority(&vertex);
            for &side in Direction::ALL.iter() {
                if vertex.line(side) != Some(LineState::Any) {
                    continue;
                }
                let line = match vertex.edge(side) {
                    Some(line) => line,
                    None => continue,
                };

                match priorities.entry(GuessCandidate { line }) {
                    Entry::Vacant(entry) => {
                        order.push(GuessCandidate { line });
                        entry.insert(priority);
                    }
                    Entry::Occupied(mut entry) => {
                        if *entry.get() < priority {
                            entry.insert(priority);
                        }
                    }
                }
            }
        }

        order.sort_by_key(|candidate| cmp::Reverse(priorities[candidate]));
        order
    }

    /// Commits a guess: snapshot first, then force the edge to a line and
    /// wake its surroundings.
    fn apply_guess(&mut self, guess: GuessCandidate) {
        debug!("making guess {:?}", guess);

        self.frames.push(SearchFrame {
            snapshot: self.state.snapshot(),
            guess,
        });
        self.stats.guesses += 1;
        self.stats.peak_depth =
            cmp::max(self.stats.peak_depth, self.frames.len());

        self.state.set_line(guess.line, LineState::Line);
        self.positions = positions::affected_tiles(self.state, guess.line);
    }

    /// Unwinds one frame: restore the snapshot and rule the guessed edge
    /// out, which is the refutation the contradiction proved. Returns false
    /// when there is nothing left to unwind.
    fn backtrack(&mut self) -> bool {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return false,
        };

        debug!(
            "backtracking to depth {}, refuting {:?}",
            self.frames.len(),
            frame.guess
        );
        self.stats.backtracks += 1;

        self.state.apply(&frame.snapshot);
        self.state.set_line(frame.guess.line, LineState::Empty);
        self.positions =
            positions::affected_tiles(self.state, frame.guess.line);

        true
    }

    fn backtrack_or_fail(
        &mut self,
        initial: &Snapshot,
    ) -> Result<(), SolverError> {
        if self.backtrack() {
            Ok(())
        } else {
            self.state.apply(initial);
            Err(SolverError::NoSolution)
        }
    }
}

/// Solves the puzzle in place with the default configuration.
pub fn solve(state: &mut PuzzleState) -> Result<(), SolverError> {
    let mut solver = Solver::new(state);
    solver.solve()
}

/// Classifies the state without mutating it.
pub fn validate(state: &PuzzleState) -> SolutionValue {
    SolutionValidator::new(state).is_solved()
}
