//! Solution checking: per-vertex legality against the bead constraints, and
//! the structural walk that tells a single closed loop apart from open
//! chains and disjoint loops.

use std::collections::HashSet;

use crate::data::{
    Direction, LineIndex, LineState, PuzzleState, TileType, Vertex,
};


/// Verdict of the validator, for one vertex or for the whole state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolutionValue {
    Unsolved,
    Solved,
    Invalid,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum MovementDirection {
    /// Right or down: toward the far endpoint of the current edge.
    Forward,
    /// Left or up: toward the current edge's own coordinates.
    Backward,
}

/// Checks a puzzle state against the Masyu rules without mutating it.
pub struct SolutionValidator<'a> {
    state: &'a PuzzleState,
}

impl<'a> SolutionValidator<'a> {
    pub fn new(state: &'a PuzzleState) -> SolutionValidator<'a> {
        SolutionValidator { state }
    }

    /// Classifies the whole state: SOLVED for a single closed loop that
    /// satisfies every bead, INVALID for states no refinement can repair,
    /// UNSOLVED otherwise.
    pub fn is_solved(&self) -> SolutionValue {
        let state = self.state;

        for (y, x) in iproduct!(0..state.height(), 0..state.width()) {
            if self.validate_vertex(x, y) == SolutionValue::Invalid {
                return SolutionValue::Invalid;
            }
        }

        let mut vertices: HashSet<(usize, usize)> =
            iproduct!(0..state.height(), 0..state.width())
                .filter(|&(y, x)| {
                    state.get_tile(x, y) != Some(TileType::Any)
                })
                .map(|(y, x)| (x, y))
                .collect();

        let mut lines: HashSet<LineIndex> = HashSet::new();
        let mut starting_point = None;
        for (y, x) in iproduct!(0..state.height(), 0..state.width()) {
            for index in
                [LineIndex::horizontal(x, y), LineIndex::vertical(x, y)]
                    .iter()
            {
                if state.get_line(*index) == Some(LineState::Line) {
                    lines.insert(*index);
                    starting_point.get_or_insert(*index);
                }
            }
        }

        // Without a single line the state is complete exactly when nothing
        // demands a loop.
        let start = match starting_point {
            Some(start) => start,
            None if vertices.is_empty() => return SolutionValue::Solved,
            None => return SolutionValue::Unsolved,
        };

        let mut current = start;
        let mut direction = MovementDirection::Forward;
        loop {
            let leading = leading_vertex(current, direction);
            let next = match continuation(self.state, leading, current) {
                Some(next) => next,
                // The chain dangles; only more refinement can tell.
                None => return SolutionValue::Unsolved,
            };

            vertices.remove(&leading);
            lines.remove(&current);
            direction = step_direction(current, next);
            current = next;

            if current == start {
                break;
            }
        }

        // A closed walk that left lines or beads behind means disjoint
        // loops or an unreachable bead.
        if vertices.is_empty() && lines.is_empty() {
            SolutionValue::Solved
        } else {
            SolutionValue::Invalid
        }
    }

    /// Checks one vertex against the degree bound and its bead constraint.
    pub fn validate_vertex(&self, x: usize, y: usize) -> SolutionValue {
        let vertex = Vertex::new(self.state, x, y);

        if vertex.count_lines() > 2 {
            return SolutionValue::Invalid;
        }
        if vertex.is_filled() && vertex.count_lines() == 1 {
            return SolutionValue::Invalid;
        }

        match vertex.tile() {
            TileType::Any => {
                if vertex.is_filled() {
                    SolutionValue::Solved
                } else {
                    SolutionValue::Unsolved
                }
            }
            TileType::Corner => self.validate_corner(&vertex),
            TileType::Straight => self.validate_straight(&vertex),
        }
    }

    /// A corner bead must still admit a turn, and every line leaving it must
    /// be able to continue straight through the neighbor one step further.
    fn validate_corner(&self, vertex: &Vertex) -> SolutionValue {
        if !vertex.may_be_corner() {
            return SolutionValue::Invalid;
        }

        for &side in Direction::ALL.iter() {
            if vertex.line(side) != Some(LineState::Line) {
                continue;
            }

            let continues = vertex.adjacent_vertex(side).map_or(
                false,
                |neighbor| {
                    neighbor.may_be_straight()
                        && neighbor.may_place_line(side)
                },
            );
            if !continues {
                return SolutionValue::Invalid;
            }
        }

        if vertex.count_lines() == 2 {
            SolutionValue::Solved
        } else {
            SolutionValue::Unsolved
        }
    }

    /// A straight bead must still admit a passage, and on a decided axis at
    /// least one of the two neighbors has to stay available as a turn.
    fn validate_straight(&self, vertex: &Vertex) -> SolutionValue {
        use crate::data::Direction::*;

        if !vertex.may_be_straight() {
            return SolutionValue::Invalid;
        }

        for &(a, b) in [(Up, Down), (Left, Right)].iter() {
            if vertex.line(a) != Some(LineState::Line)
                && vertex.line(b) != Some(LineState::Line)
            {
                continue;
            }

            let (first, second) = match (
                vertex.adjacent_vertex(a),
                vertex.adjacent_vertex(b),
            ) {
                (Some(first), Some(second)) => (first, second),
                _ => return SolutionValue::Invalid,
            };

            if !first.may_be_corner() && !second.may_be_corner() {
                return SolutionValue::Invalid;
            }
            if first.is_straight() && !second.may_be_corner() {
                return SolutionValue::Invalid;
            }
            if second.is_straight() && !first.may_be_corner() {
                return SolutionValue::Invalid;
            }
        }

        if vertex.count_lines() == 2 {
            SolutionValue::Solved
        } else {
            SolutionValue::Unsolved
        }
    }
}

/// Follows the chain of lines through the vertex `(x, y)`. Returns the
/// number of edges when the chain closes back on itself, or `None` when the
/// vertex has no line or the chain ends somewhere. Propagation uses this to
/// spot sub-loops that close before covering every line.
pub fn walk_nodes(
    state: &PuzzleState,
    x: usize,
    y: usize,
) -> Option<usize> {
    let start = incident_lines(state, x, y).into_iter().next()?;

    let mut current = start;
    let mut direction = MovementDirection::Forward;
    let mut count = 0;
    loop {
        let leading = leading_vertex(current, direction);
        let next = continuation(state, leading, current)?;

        count += 1;
        direction = step_direction(current, next);
        current = next;

        if current == start {
            return Some(count);
        }
    }
}

/// All incident edges of the vertex currently set to `Line`.
fn incident_lines(
    state: &PuzzleState,
    x: usize,
    y: usize,
) -> Vec<LineIndex> {
    Direction::ALL
        .iter()
        .filter_map(|&side| LineIndex::from_vertex(x, y, side))
        .filter(|&index| state.get_line(index) == Some(LineState::Line))
        .collect()
}

/// The vertex the walk is about to cross, given the current edge and the
/// direction of travel along it.
fn leading_vertex(
    current: LineIndex,
    direction: MovementDirection,
) -> (usize, usize) {
    let [near, far] = current.endpoints();

    match direction {
        MovementDirection::Forward => far,
        MovementDirection::Backward => near,
    }
}

/// The unique line continuing the walk through the given vertex, if there is
/// exactly one besides the edge we arrived on.
fn continuation(
    state: &PuzzleState,
    (x, y): (usize, usize),
    current: LineIndex,
) -> Option<LineIndex> {
    let mut lines = incident_lines(state, x, y);
    lines.retain(|&line| line != current);

    match lines.as_slice() {
        &[next] => Some(next),
        _ => None,
    }
}

/// Travel continues forward unless the next edge sits left or up of the
/// current one.
fn step_direction(current: LineIndex, next: LineIndex) -> MovementDirection {
    if next.x < current.x || next.y < current.y {
        MovementDirection::Backward
    } else {
        MovementDirection::Forward
    }
}
