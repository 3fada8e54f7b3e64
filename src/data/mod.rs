mod direction;
mod line_index;
mod line_state;
mod puzzle;
mod size;
mod tile;
mod vertex;

pub use self::{
    direction::Direction, direction::LineDirection, line_index::LineIndex,
    line_state::LineState, puzzle::PuzzleState, puzzle::Snapshot, size::Size,
    tile::TileType, vertex::Vertex,
};
