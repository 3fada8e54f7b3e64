use boolinator::Boolinator;

use crate::data::{Direction, LineIndex, LineState, PuzzleState, TileType};


/// A read-only lens over one vertex of the grid: its tile constraint and the
/// four incident edges. Carries no state of its own and is recreated cheaply
/// wherever a rule or validator needs local answers.
#[derive(Copy, Clone)]
pub struct Vertex<'a> {
    state: &'a PuzzleState,
    x: usize,
    y: usize,
    tile: TileType,
}

impl<'a> Vertex<'a> {
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid; vertices are only ever
    /// created for in-grid positions.
    pub fn new(state: &'a PuzzleState, x: usize, y: usize) -> Vertex<'a> {
        let tile = state.get_tile(x, y).unwrap();

        Vertex { state, x, y, tile }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn tile(&self) -> TileType {
        self.tile
    }

    /// State of the edge on the given side, or `None` when the grid ends
    /// there.
    pub fn line(&self, side: Direction) -> Option<LineState> {
        self.edge(side).and_then(|index| self.state.get_line(index))
    }

    pub fn line_up(&self) -> Option<LineState> {
        self.line(Direction::Up)
    }

    pub fn line_right(&self) -> Option<LineState> {
        self.line(Direction::Right)
    }

    pub fn line_down(&self) -> Option<LineState> {
        self.line(Direction::Down)
    }

    pub fn line_left(&self) -> Option<LineState> {
        self.line(Direction::Left)
    }

    /// Index of the edge on the given side, if it exists.
    pub fn edge(&self, side: Direction) -> Option<LineIndex> {
        LineIndex::from_vertex(self.x, self.y, side)
            .filter(|&index| self.state.get_line(index).is_some())
    }

    /// Whether the edge on the given side exists and can still become a
    /// line.
    pub fn may_place_line(&self, side: Direction) -> bool {
        self.line(side)
            .map_or(false, |state| state != LineState::Empty)
    }

    pub fn count_lines(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&side| self.has_line(side))
            .count()
    }

    pub fn count_any(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&side| self.line(side).map_or(false, LineState::is_any))
            .count()
    }

    /// All incident edges are decided.
    pub fn is_filled(&self) -> bool {
        self.count_any() == 0
    }

    /// The loop definitely turns here: two lines on perpendicular edges.
    pub fn is_corner(&self) -> bool {
        self.count_lines() == 2
            && (self.has_line(Direction::Left)
                || self.has_line(Direction::Right))
            && (self.has_line(Direction::Up)
                || self.has_line(Direction::Down))
    }

    /// The loop definitely passes straight through: two collinear lines.
    pub fn is_straight(&self) -> bool {
        (self.has_line(Direction::Left) && self.has_line(Direction::Right))
            || (self.has_line(Direction::Up)
                && self.has_line(Direction::Down))
    }

    /// The vertex can still end up as a corner: it is not already straight
    /// and one edge of each axis remains available.
    pub fn may_be_corner(&self) -> bool {
        !self.is_straight()
            && (self.may_place_line(Direction::Left)
                || self.may_place_line(Direction::Right))
            && (self.may_place_line(Direction::Up)
                || self.may_place_line(Direction::Down))
    }

    /// The vertex can still end up passed straight: it is not already a
    /// corner and at least one full axis remains available.
    pub fn may_be_straight(&self) -> bool {
        !self.is_corner()
            && ((self.may_place_line(Direction::Left)
                && self.may_place_line(Direction::Right))
                || (self.may_place_line(Direction::Up)
                    && self.may_place_line(Direction::Down)))
    }

    /// The neighboring vertex on the given side, if the grid continues
    /// there.
    pub fn adjacent_vertex(&self, side: Direction) -> Option<Vertex<'a>> {
        let state = self.state;

        match side {
            Direction::Up => self
                .y
                .checked_sub(1)
                .map(|y| Vertex::new(state, self.x, y)),
            Direction::Down => (self.y + 1 < state.height())
                .as_some_from(|| Vertex::new(state, self.x, self.y + 1)),
            Direction::Left => self
                .x
                .checked_sub(1)
                .map(|x| Vertex::new(state, x, self.y)),
            Direction::Right => (self.x + 1 < state.width())
                .as_some_from(|| Vertex::new(state, self.x + 1, self.y)),
        }
    }

    fn has_line(&self, side: Direction) -> bool {
        self.line(side) == Some(LineState::Line)
    }
}
