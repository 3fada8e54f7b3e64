use std::fmt;
use std::thread;
use std::time::Duration;

use boolinator::Boolinator;

use crate::data::{LineDirection, LineIndex, LineState, Size, TileType};
use crate::error::SolverError;
use crate::messaging::{Message, Publisher};

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use assert_matches::assert_matches;

    use super::LineState::{Empty, Line};
    use super::TileType::{Corner, Straight};
    use super::*;

    #[test]
    fn initializes_grids_to_correct_sizes() {
        let state = PuzzleState::new(4, 3).unwrap();

        assert_eq!(state.get_size(), Size {
            width: 4,
            height: 3
        });
        assert_eq!(state.hlines.len(), 3);
        assert!(state.hlines.iter().all(|row| row.len() == 3));
        assert_eq!(state.vlines.len(), 2);
        assert!(state.vlines.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_matches!(
            PuzzleState::new(0, 3),
            Err(SolverError::InvalidInput(_))
        );
        assert_matches!(
            PuzzleState::new(3, 0),
            Err(SolverError::InvalidInput(_))
        );
    }

    #[test]
    fn reports_absent_for_out_of_range_queries() {
        let state = PuzzleState::new(2, 2).unwrap();

        assert_eq!(state.get_tile(2, 0), None);
        assert_eq!(state.get_tile(0, 2), None);
        // A 2x2 grid has a single horizontal edge per row.
        assert_eq!(state.get_hline(0, 0), Some(LineState::Any));
        assert_eq!(state.get_hline(1, 0), None);
        assert_eq!(state.get_vline(0, 1), None);
    }

    #[test]
    fn stores_tiles_and_lines() {
        let mut state = PuzzleState::new(3, 3).unwrap();

        state.set_tile(1, 2, Corner);
        state.set_hline(0, 1, Line);
        state.set_vline(2, 0, Empty);

        assert_eq!(state.get_tile(1, 2), Some(Corner));
        assert_eq!(state.get_hline(0, 1), Some(Line));
        assert_eq!(state.get_vline(2, 0), Some(Empty));
        assert_eq!(state.count_lines(), 1);
    }

    #[test]
    fn indexes_lines_by_edge() {
        let mut state = PuzzleState::new(3, 3).unwrap();

        state.set_line(LineIndex::horizontal(1, 0), Line);
        state.set_line(LineIndex::vertical(0, 1), Empty);

        assert_eq!(state.get_line(LineIndex::horizontal(1, 0)), Some(Line));
        assert_eq!(state.get_line(LineIndex::vertical(0, 1)), Some(Empty));
        assert_eq!(state.get_line(LineIndex::vertical(0, 2)), None);
    }

    #[test]
    fn maps_tiles_and_lines_from_ascii() {
        let state = PuzzleState::from_ascii(
            "
            C-. S
            |   x
            . .x.
        ",
        );

        assert_eq!(state.get_size(), Size {
            width: 3,
            height: 2
        });
        assert_eq!(state.get_tile(0, 0), Some(Corner));
        assert_eq!(state.get_tile(2, 0), Some(Straight));
        assert_eq!(state.get_tile(1, 1), Some(TileType::Any));
        assert_eq!(state.get_hline(0, 0), Some(Line));
        assert_eq!(state.get_hline(1, 0), Some(LineState::Any));
        assert_eq!(state.get_hline(1, 1), Some(Empty));
        assert_eq!(state.get_vline(0, 0), Some(Line));
        assert_eq!(state.get_vline(2, 0), Some(Empty));
        assert_eq!(state.get_vline(1, 0), Some(LineState::Any));
    }

    #[test]
    fn round_trips_through_ascii() {
        let state = PuzzleState::from_ascii(
            "
            C-. S
            |   x
            . .x.
        ",
        );

        assert_eq!(PuzzleState::from_ascii(&state.to_ascii()), state);
    }

    #[test]
    fn restores_a_snapshot() {
        let mut state = PuzzleState::new(3, 3).unwrap();
        state.set_tile(0, 0, Straight);
        state.set_hline(1, 1, Line);

        let snapshot = state.snapshot();
        state.set_hline(0, 0, Line);
        state.set_vline(1, 1, Empty);
        state.apply(&snapshot);

        assert_eq!(state.get_hline(0, 0), Some(LineState::Any));
        assert_eq!(state.get_vline(1, 1), Some(LineState::Any));
        assert_eq!(state.get_hline(1, 1), Some(Line));
        assert_eq!(state.snapshot(), snapshot);
    }

    struct Recorder {
        messages: Rc<RefCell<Vec<Message>>>,
    }

    impl Publisher for Recorder {
        fn send(&self, message: Message) {
            self.messages.borrow_mut().push(message);
        }
    }

    #[test]
    fn notifies_the_observer_of_line_updates() {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let mut state = PuzzleState::new(3, 3).unwrap();
        state.set_observer(Box::new(Recorder {
            messages: Rc::clone(&messages),
        }));

        state.set_hline(1, 0, Line);
        state.set_vline(0, 2, Empty);

        assert_eq!(*messages.borrow(), vec![
            Message::UpdateHLine {
                x: 1,
                y: 0,
                state: Line
            },
            Message::UpdateVLine {
                x: 0,
                y: 2,
                state: Empty
            },
        ]);
    }

    #[test]
    fn publishes_edges_reverted_by_a_restore() {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let mut state = PuzzleState::new(2, 2).unwrap();
        let snapshot = state.snapshot();

        state.set_observer(Box::new(Recorder {
            messages: Rc::clone(&messages),
        }));
        state.set_hline(0, 0, Line);
        state.apply(&snapshot);

        assert_eq!(*messages.borrow(), vec![
            Message::UpdateHLine {
                x: 0,
                y: 0,
                state: Line
            },
            Message::UpdateHLine {
                x: 0,
                y: 0,
                state: LineState::Any
            },
        ]);
    }
}

/// The mutable state of one puzzle: the fixed tile constraints plus the two
/// grids of ternary edge states the solver refines in place. An optional
/// observer receives every line mutation, which is how the GUI renders
/// solver progress.
pub struct PuzzleState {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileType>>,
    hlines: Vec<Vec<LineState>>,
    vlines: Vec<Vec<LineState>>,
    observer: Option<Box<dyn Publisher>>,
    step_delay: Option<Duration>,
}

/// A value copy of the whole grid, owned by the search stack for
/// backtracking. Applying a snapshot restores the grid but leaves the
/// observer configuration untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileType>>,
    hlines: Vec<Vec<LineState>>,
    vlines: Vec<Vec<LineState>>,
}

impl PuzzleState {
    /// Creates a state with all tiles unconstrained and all edges undecided.
    /// Dimensions of zero are rejected before anything is allocated.
    pub fn new(width: usize, height: usize) -> Result<PuzzleState, SolverError> {
        if width == 0 || height == 0 {
            return Err(SolverError::InvalidInput(format!(
                "dimensions must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        Ok(PuzzleState {
            width,
            height,
            tiles: vec![vec![TileType::Any; width]; height],
            hlines: vec![vec![LineState::Any; width - 1]; height],
            vlines: vec![vec![LineState::Any; width]; height - 1],
            observer: None,
            step_delay: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get_size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Installs the mutation observer. Every `set_hline`/`set_vline` call
    /// notifies it from then on.
    pub fn set_observer(&mut self, observer: Box<dyn Publisher>) {
        self.observer = Some(observer);
    }

    /// Minimum wall time between observed mutations. Only meaningful with an
    /// observer installed; used by hosts to animate the solve.
    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = Some(delay);
    }

    pub fn get_tile(&self, x: usize, y: usize) -> Option<TileType> {
        (x < self.width && y < self.height).as_some_from(|| self.tiles[y][x])
    }

    pub fn set_tile(&mut self, x: usize, y: usize, tile: TileType) {
        assert!(x < self.width && y < self.height);
        self.tiles[y][x] = tile;
    }

    pub fn get_hline(&self, x: usize, y: usize) -> Option<LineState> {
        (x + 1 < self.width && y < self.height)
            .as_some_from(|| self.hlines[y][x])
    }

    pub fn set_hline(&mut self, x: usize, y: usize, state: LineState) {
        assert!(x + 1 < self.width && y < self.height);
        self.hlines[y][x] = state;
        self.notify(Message::UpdateHLine { x, y, state }, true);
    }

    pub fn get_vline(&self, x: usize, y: usize) -> Option<LineState> {
        (x < self.width && y + 1 < self.height)
            .as_some_from(|| self.vlines[y][x])
    }

    pub fn set_vline(&mut self, x: usize, y: usize, state: LineState) {
        assert!(x < self.width && y + 1 < self.height);
        self.vlines[y][x] = state;
        self.notify(Message::UpdateVLine { x, y, state }, true);
    }

    pub fn get_line(&self, index: LineIndex) -> Option<LineState> {
        match index.direction {
            LineDirection::Horizontal => self.get_hline(index.x, index.y),
            LineDirection::Vertical => self.get_vline(index.x, index.y),
        }
    }

    pub fn set_line(&mut self, index: LineIndex, state: LineState) {
        match index.direction {
            LineDirection::Horizontal => self.set_hline(index.x, index.y, state),
            LineDirection::Vertical => self.set_vline(index.x, index.y, state),
        }
    }

    /// Total number of edges currently set to `Line`.
    pub fn count_lines(&self) -> usize {
        [&self.hlines, &self.vlines]
            .iter()
            .flat_map(|rows| rows.iter())
            .flat_map(|row| row.iter())
            .filter(|state| state.is_line())
            .count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            tiles: self.tiles.clone(),
            hlines: self.hlines.clone(),
            vlines: self.vlines.clone(),
        }
    }

    /// Restores the grid from a snapshot. Every edge whose value changes is
    /// published to the observer, without the step delay, so a subscribed
    /// view tracks backtracking at full speed.
    pub fn apply(&mut self, snapshot: &Snapshot) {
        self.width = snapshot.width;
        self.height = snapshot.height;
        self.tiles = snapshot.tiles.clone();

        let old_hlines =
            std::mem::replace(&mut self.hlines, snapshot.hlines.clone());
        let old_vlines =
            std::mem::replace(&mut self.vlines, snapshot.vlines.clone());

        let mut changes = Vec::new();
        for (y, row) in self.hlines.iter().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                if old_hlines.get(y).and_then(|row| row.get(x)) != Some(&state)
                {
                    changes.push(Message::UpdateHLine { x, y, state });
                }
            }
        }
        for (y, row) in self.vlines.iter().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                if old_vlines.get(y).and_then(|row| row.get(x)) != Some(&state)
                {
                    changes.push(Message::UpdateVLine { x, y, state });
                }
            }
        }

        for message in changes {
            self.notify(message, false);
        }
    }

    fn notify(&self, message: Message, delay: bool) {
        if let Some(observer) = &self.observer {
            observer.send(message);

            if delay {
                if let Some(delay) = self.step_delay {
                    thread::sleep(delay);
                }
            }
        }
    }

    /// Creates a `PuzzleState` from a `&str` containing an ASCII-image of
    /// the puzzle, tiles and edges interleaved:
    ///
    /// ```text
    /// C-. S
    /// |   x
    /// . .x.
    /// ```
    ///
    /// Tile characters sit at even columns of even rows (`C`orner,
    /// `S`traight, anything else unconstrained); the characters between them
    /// are edges (`-`/`|` line, `x` empty, anything else undecided). This
    /// method is used internally in this crate to create more readable test
    /// cases; indentation is removed from the input before processing. No
    /// effort is put into detecting invalid inputs.
    ///
    /// # Panics
    ///
    /// May panic on unexpected inputs, but does not guarantee to do so.
    #[cfg(test)]
    pub fn from_ascii(input: &str) -> PuzzleState {
        use std::iter::repeat;

        let input = unindent::unindent(input);
        let lines: Vec<_> = input.lines().collect();

        let width = lines[0].len() / 2 + 1;
        let height = (lines.len() + 1) / 2;
        let mut state = PuzzleState::new(width, height).unwrap();

        for (y, line) in lines.iter().step_by(2).enumerate() {
            let tiles = line.chars().step_by(2).chain(repeat(' ')).take(width);
            for (x, character) in tiles.enumerate() {
                state.set_tile(x, y, TileType::from_ascii(character));
            }

            let hlines = line
                .chars()
                .skip(1)
                .step_by(2)
                .chain(repeat(' '))
                .take(width - 1);
            for (x, character) in hlines.enumerate() {
                state.set_hline(x, y, LineState::from_ascii(character));
            }
        }

        for (y, line) in lines.iter().skip(1).step_by(2).enumerate() {
            let vlines =
                line.chars().step_by(2).chain(repeat(' ')).take(width);
            for (x, character) in vlines.enumerate() {
                state.set_vline(x, y, LineState::from_ascii(character));
            }
        }

        state
    }

    /// Renders the state in the `from_ascii` format, for readable test
    /// failures.
    #[cfg(test)]
    pub fn to_ascii(&self) -> String {
        use itertools::Itertools;

        let tile_rows = (0..self.height).map(|y| {
            (0..self.width)
                .map(|x| match self.tiles[y][x] {
                    TileType::Any => '.',
                    TileType::Corner => 'C',
                    TileType::Straight => 'S',
                })
                .interleave((0..self.width - 1).map(|x| {
                    match self.hlines[y][x] {
                        LineState::Line => '-',
                        LineState::Empty => 'x',
                        LineState::Any => ' ',
                    }
                }))
                .collect::<String>()
        });

        let vline_rows = (0..self.height.saturating_sub(1)).map(|y| {
            (0..self.width)
                .map(|x| match self.vlines[y][x] {
                    LineState::Line => '|',
                    LineState::Empty => 'x',
                    LineState::Any => ' ',
                })
                .join(" ")
        });

        tile_rows.interleave(vline_rows).join("\n")
    }

    /// Copies the tile constraints into a fresh state with every edge
    /// undecided. Test fixtures encode puzzle and expected solution in one
    /// string; this strips the solution half.
    #[cfg(test)]
    pub fn tiles_only(&self) -> PuzzleState {
        let mut state = PuzzleState::new(self.width, self.height).unwrap();
        state.tiles = self.tiles.clone();
        state
    }
}

// The observer is deliberately left out of both equality and debug output;
// only the grid is state.
impl PartialEq for PuzzleState {
    fn eq(&self, other: &PuzzleState) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.tiles == other.tiles
            && self.hlines == other.hlines
            && self.vlines == other.vlines
    }
}

impl Eq for PuzzleState {}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tiles", &self.tiles)
            .field("hlines", &self.hlines)
            .field("vlines", &self.vlines)
            .finish()
    }
}
