use std::collections::HashSet;

use crate::data::{LineDirection, LineIndex, PuzzleState, TileType, Vertex};

#[cfg(test)]
mod tests {
    use super::GuessPriority::*;
    use super::*;

    #[test]
    fn an_edge_affects_its_two_endpoints() {
        let state = PuzzleState::new(5, 5).unwrap();

        let tiles = affected_tiles(&state, LineIndex::horizontal(1, 2));

        assert_eq!(tiles, [(1, 2), (2, 2)].iter().cloned().collect());
    }

    #[test]
    fn straight_tiles_chain_one_step_further() {
        let mut state = PuzzleState::new(5, 5).unwrap();
        state.set_tile(0, 2, TileType::Straight);
        state.set_tile(3, 2, TileType::Straight);

        let tiles = affected_tiles(&state, LineIndex::horizontal(1, 2));

        assert_eq!(
            tiles,
            [(0, 2), (1, 2), (2, 2), (3, 2)].iter().cloned().collect()
        );
    }

    #[test]
    fn corner_tiles_do_not_chain() {
        let mut state = PuzzleState::new(5, 5).unwrap();
        state.set_tile(0, 2, TileType::Corner);

        let tiles = affected_tiles(&state, LineIndex::horizontal(1, 2));

        assert_eq!(tiles, [(1, 2), (2, 2)].iter().cloned().collect());
    }

    #[test]
    fn vertical_edges_chain_along_the_column() {
        let mut state = PuzzleState::new(5, 5).unwrap();
        state.set_tile(2, 0, TileType::Straight);
        state.set_tile(2, 3, TileType::Straight);

        let tiles = affected_tiles(&state, LineIndex::vertical(2, 1));

        assert_eq!(
            tiles,
            [(2, 0), (2, 1), (2, 2), (2, 3)].iter().cloned().collect()
        );
    }

    #[test]
    fn chains_are_clipped_at_the_border() {
        let state = PuzzleState::new(3, 3).unwrap();

        // Neither (x - 1, y) nor (x + 2, y) exist for this edge.
        let tiles = affected_tiles(&state, LineIndex::horizontal(1, 0));

        assert_eq!(tiles, [(1, 0), (2, 0)].iter().cloned().collect());
    }

    #[test]
    fn priorities_rank_corners_first() {
        assert!(PartialCorner > UnknownRestrictiveTile);
        assert!(UnknownRestrictiveTile > PartialAnyTile);
        assert!(PartialAnyTile > Remaining);
    }

    #[test]
    fn rates_vertices_for_guessing() {
        let state = PuzzleState::from_ascii(
            "
            C-. .

            . . C

            S . .
        ",
        );

        // A corner with a line already attached is the best guess spot.
        assert_eq!(guess_priority(&Vertex::new(&state, 0, 0)), PartialCorner);
        // Constrained tiles without lines still beat unconstrained ones.
        assert_eq!(
            guess_priority(&Vertex::new(&state, 2, 1)),
            UnknownRestrictiveTile
        );
        assert_eq!(
            guess_priority(&Vertex::new(&state, 0, 2)),
            UnknownRestrictiveTile
        );
        // An unconstrained tile touched by a line.
        assert_eq!(
            guess_priority(&Vertex::new(&state, 1, 0)),
            PartialAnyTile
        );
        assert_eq!(guess_priority(&Vertex::new(&state, 2, 2)), Remaining);
    }
}

/// Coordinates of a vertex awaiting rule re-evaluation.
pub type SolverPosition = (usize, usize);

/// The propagation work set. Order is irrelevant, uniqueness required.
pub type PositionSet = HashSet<SolverPosition>;

/// Vertices whose local rules may need to re-run after the edge at `index`
/// changed: its two endpoints, plus the next vertex along the edge's axis on
/// either side when that tile is a straight bead, whose rule reads one tile
/// further. The chain is capped at one step; longer chains surface through
/// subsequent propagation rounds.
pub fn affected_tiles(state: &PuzzleState, index: LineIndex) -> PositionSet {
    let LineIndex { direction, x, y } = index;

    let mut tiles: PositionSet = index.endpoints().iter().cloned().collect();

    let extensions = match direction {
        LineDirection::Horizontal => {
            [x.checked_sub(1).map(|x| (x, y)), Some((x + 2, y))]
        }
        LineDirection::Vertical => {
            [y.checked_sub(1).map(|y| (x, y)), Some((x, y + 2))]
        }
    };

    for (x, y) in extensions.iter().flatten() {
        if state.get_tile(*x, *y) == Some(TileType::Straight) {
            tiles.insert((*x, *y));
        }
    }

    tiles
}

/// One speculative move: force the named edge to `Line`. Structural equality
/// on the edge is what deduplicates candidates.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct GuessCandidate {
    pub line: LineIndex,
}

/// Ranking of guess candidates; higher variants are tried first.
#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum GuessPriority {
    Remaining,
    PartialAnyTile,
    UnknownRestrictiveTile,
    PartialCorner,
}

/// Rates a vertex for guessing: corners that already touch a line first,
/// then constrained tiles, then unconstrained tiles that touch a line.
pub fn guess_priority(vertex: &Vertex) -> GuessPriority {
    if vertex.tile() == TileType::Corner && vertex.count_lines() > 0 {
        GuessPriority::PartialCorner
    } else if vertex.tile() != TileType::Any {
        GuessPriority::UnknownRestrictiveTile
    } else if vertex.count_lines() > 0 {
        GuessPriority::PartialAnyTile
    } else {
        GuessPriority::Remaining
    }
}
