/// Dimensions of a puzzle grid, measured in tiles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}
