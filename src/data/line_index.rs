use crate::data::{Direction, LineDirection, LineDirection::*};


/// Names a single edge of the grid. A horizontal edge `(x, y)` connects the
/// vertices `(x, y)` and `(x + 1, y)`; a vertical edge `(x, y)` connects
/// `(x, y)` and `(x, y + 1)`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct LineIndex {
    pub direction: LineDirection,
    pub x: usize,
    pub y: usize,
}

impl LineIndex {
    pub fn horizontal(x: usize, y: usize) -> LineIndex {
        LineIndex {
            direction: Horizontal,
            x,
            y,
        }
    }

    pub fn vertical(x: usize, y: usize) -> LineIndex {
        LineIndex {
            direction: Vertical,
            x,
            y,
        }
    }

    /// Returns the index of the edge on the given side of the vertex
    /// `(x, y)`, or `None` when that side lies beyond the coordinate origin.
    /// The upper grid bounds are not known here; looking the index up in a
    /// `PuzzleState` settles whether the edge actually exists.
    pub fn from_vertex(
        x: usize,
        y: usize,
        side: Direction,
    ) -> Option<LineIndex> {
        match side {
            Direction::Up => {
                y.checked_sub(1).map(|y| LineIndex::vertical(x, y))
            }
            Direction::Down => Some(LineIndex::vertical(x, y)),
            Direction::Left => {
                x.checked_sub(1).map(|x| LineIndex::horizontal(x, y))
            }
            Direction::Right => Some(LineIndex::horizontal(x, y)),
        }
    }

    /// Returns the two vertices this edge connects.
    pub fn endpoints(&self) -> [(usize, usize); 2] {
        let &LineIndex { direction, x, y } = self;

        let next = match direction {
            Horizontal => (x + 1, y),
            Vertical => (x, y + 1),
        };

        [(x, y), next]
    }
}
