//! The vertex-local inference rules. Each rule inspects one vertex through
//! the `Vertex` lens, optionally refines adjacent edges, and returns the
//! positions whose rules may need to re-run. The order of `VERTEX_RULES` is
//! semantically significant: propagation applies the first productive rule
//! per pass and re-enqueues the focus.

use crate::algorithm::positions::{
    self, PositionSet, SolverPosition,
};
use crate::data::{
    Direction, LineState, LineState::*, PuzzleState, TileType, Vertex,
};


/// Shape shared by all vertex rules: mutate edges around the given vertex
/// and report the affected positions.
pub type VertexRule = fn(&mut PuzzleState, SolverPosition) -> PositionSet;

/// The rules in application order. Propagation tries them top to bottom and
/// stops at the first one that produces updates.
pub const VERTEX_RULES: [VertexRule; 6] = [
    fill_empty_edges,
    only_line_option,
    dead_end,
    straight_tile,
    corner_next_to_straight,
    corner_tile,
];

/// A vertex that already has its two lines cannot take another: every
/// remaining undecided edge becomes empty.
pub fn fill_empty_edges(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    let mut updates = PositionSet::new();

    let (x, y) = position;
    if Vertex::new(state, x, y).count_lines() != 2 {
        return updates;
    }

    for &side in Direction::ALL.iter() {
        set_edge(state, position, side, Empty, &mut updates);
    }

    updates
}

/// A vertex with one line and a single undecided edge has no choice: the
/// undecided edge completes the pair.
pub fn only_line_option(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    let mut updates = PositionSet::new();

    {
        let (x, y) = position;
        let vertex = Vertex::new(state, x, y);
        if vertex.count_lines() != 1 || vertex.count_any() != 1 {
            return updates;
        }
    }

    for &side in Direction::ALL.iter() {
        set_edge(state, position, side, Line, &mut updates);
    }

    updates
}

/// A vertex without lines and a single undecided edge can never reach a line
/// count of two through it: the edge is ruled out.
pub fn dead_end(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    let mut updates = PositionSet::new();

    {
        let (x, y) = position;
        let vertex = Vertex::new(state, x, y);
        if vertex.count_any() != 1 || vertex.count_lines() != 0 {
            return updates;
        }
    }

    for &side in Direction::ALL.iter() {
        set_edge(state, position, side, Empty, &mut updates);
    }

    updates
}

/// A straight bead commits to an axis as soon as one of its edges is a line
/// or the other axis has become impossible; both edges of the chosen axis
/// are then lines.
pub fn straight_tile(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    use crate::data::Direction::*;

    let mut updates = PositionSet::new();

    let axis = {
        let (x, y) = position;
        let vertex = Vertex::new(state, x, y);
        if vertex.tile() != TileType::Straight || vertex.count_lines() == 2 {
            None
        } else if vertex.line(Down) == Some(Line)
            || vertex.line(Up) == Some(Line)
            || !vertex.may_place_line(Left)
            || !vertex.may_place_line(Right)
        {
            Some([Up, Down])
        } else if vertex.line(Left) == Some(Line)
            || vertex.line(Right) == Some(Line)
            || !vertex.may_place_line(Up)
            || !vertex.may_place_line(Down)
        {
            Some([Left, Right])
        } else {
            None
        }
    };

    if let Some(sides) = axis {
        for &side in sides.iter() {
            set_edge(state, position, side, Line, &mut updates);
        }
    }

    updates
}

/// When a neighboring straight bead has its passage decided and the far end
/// of that passage cannot turn, this vertex must be the one that turns: its
/// continuation straight onward is ruled out.
pub fn corner_next_to_straight(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    let mut updates = PositionSet::new();

    for &side in Direction::ALL.iter() {
        let applies = {
            let (x, y) = position;
            let vertex = Vertex::new(state, x, y);

            match vertex.adjacent_vertex(side) {
                Some(adjacent)
                    if adjacent.tile() == TileType::Straight
                        && adjacent.count_lines() == 2 =>
                {
                    compliment_corner(adjacent, &vertex)
                        .map_or(false, |compliment| {
                            !compliment.may_be_corner()
                        })
                }
                _ => false,
            }
        };

        if applies {
            set_edge(
                state,
                position,
                side.get_opposite(),
                Empty,
                &mut updates,
            );

            if !updates.is_empty() {
                return updates;
            }
        }
    }

    updates
}

/// A corner bead turns here, and each of its lines continues straight one
/// step past the neighbor. An arm is placed as soon as its edge is a line or
/// the opposite arm has become impossible; arms that cannot extend are
/// ruled out.
pub fn corner_tile(
    state: &mut PuzzleState,
    position: SolverPosition,
) -> PositionSet {
    let mut updates = PositionSet::new();

    let (x, y) = position;
    if Vertex::new(state, x, y).tile() != TileType::Corner {
        return updates;
    }

    for &side in Direction::ALL.iter() {
        let place = {
            let vertex = Vertex::new(state, x, y);
            vertex.line(side) == Some(Line)
                || !may_extend(&vertex, side.get_opposite())
        };

        if place {
            place_line_extended(state, position, side, &mut updates);
            set_edge(
                state,
                position,
                side.get_opposite(),
                Empty,
                &mut updates,
            );
        }
    }

    for &side in Direction::ALL.iter() {
        let block = {
            let vertex = Vertex::new(state, x, y);
            !may_extend(&vertex, side)
        };

        if block {
            set_edge(state, position, side, Empty, &mut updates);
        }
    }

    updates
}

/// Whether a corner arm toward `side` is still available: the edge itself,
/// the neighbor's continuation edge, and the neighbor being free of
/// perpendicular lines that would force a turn there.
fn may_extend(vertex: &Vertex, side: Direction) -> bool {
    if !vertex.may_place_line(side) {
        return false;
    }

    let perpendicular: [Direction; 2] = if side.is_vertical() {
        [Direction::Left, Direction::Right]
    } else {
        [Direction::Up, Direction::Down]
    };

    vertex.adjacent_vertex(side).map_or(false, |neighbor| {
        neighbor.may_place_line(side)
            && perpendicular
                .iter()
                .all(|&p| neighbor.line(p) != Some(Line))
    })
}

/// Places a corner arm: the edge on `side` of the vertex and the matching
/// edge one step past the neighbor.
fn place_line_extended(
    state: &mut PuzzleState,
    position: SolverPosition,
    side: Direction,
    updates: &mut PositionSet,
) {
    set_edge(state, position, side, Line, updates);

    let neighbor = {
        let (x, y) = position;
        Vertex::new(state, x, y)
            .adjacent_vertex(side)
            .map(|neighbor| neighbor.position())
    };

    if let Some(neighbor) = neighbor {
        set_edge(state, neighbor, side, Line, updates);
    }
}

/// For a straight bead whose passage is decided through `current`, returns
/// the vertex at the other end of the passage.
fn compliment_corner<'a>(
    straight: Vertex<'a>,
    current: &Vertex<'a>,
) -> Option<Vertex<'a>> {
    use crate::data::Direction::*;

    let axis = if straight.line(Left) == Some(Line)
        && straight.line(Right) == Some(Line)
    {
        Some([Left, Right])
    } else if straight.line(Up) == Some(Line)
        && straight.line(Down) == Some(Line)
    {
        Some([Up, Down])
    } else {
        None
    }?;

    let [a, b] = axis;
    for &(toward_current, toward_compliment) in [(a, b), (b, a)].iter() {
        let candidate = straight.adjacent_vertex(toward_current);
        if candidate.map(|candidate| candidate.position())
            == Some(current.position())
        {
            return straight.adjacent_vertex(toward_compliment);
        }
    }

    None
}

/// Refines the edge on `side` of the vertex when it is still undecided, and
/// collects the positions affected by the change.
fn set_edge(
    state: &mut PuzzleState,
    position: SolverPosition,
    side: Direction,
    value: LineState,
    updates: &mut PositionSet,
) {
    let (x, y) = position;
    let index = {
        let vertex = Vertex::new(state, x, y);
        match vertex.line(side) {
            Some(Any) => vertex.edge(side),
            _ => None,
        }
    };

    if let Some(index) = index {
        state.set_line(index, value);
        updates.extend(positions::affected_tiles(state, index));
    }
}
