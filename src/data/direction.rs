use self::Direction::*;

/// Side of a vertex, naming one of its four incident edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Array of possible states provided for convenient iteration. The order
    /// is part of the guess-candidate contract: candidates for a vertex are
    /// emitted up, right, down, left.
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    pub fn get_opposite(self) -> Self {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    /// The axis an edge on this side of a vertex belongs to.
    pub fn line_direction(self) -> LineDirection {
        match self {
            Up | Down => LineDirection::Vertical,
            Left | Right => LineDirection::Horizontal,
        }
    }

    pub fn is_vertical(self) -> bool {
        self.line_direction() == LineDirection::Vertical
    }
}

/// Orientation of an edge in the grid.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LineDirection {
    Horizontal,
    Vertical,
}
