use self::TileType::*;

/// `Enum` that represents the constraint printed on a single tile of a Masyu
/// puzzle. A tile either carries no constraint, a filled bead (the loop must
/// turn here) or a hollow bead (the loop must pass through straight).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TileType {
    Any,
    Corner,
    Straight,
}

impl TileType {
    /// Returns the character used for this tile in the serialized puzzle
    /// format.
    pub fn to_symbol(self) -> char {
        match self {
            Any => 'A',
            Corner => 'C',
            Straight => 'S',
        }
    }

    /// Parses a serialized tile character. Returns `None` for characters
    /// outside the format alphabet.
    pub fn from_symbol(symbol: char) -> Option<TileType> {
        match symbol {
            'A' => Some(Any),
            'C' => Some(Corner),
            'S' => Some(Straight),
            _ => None,
        }
    }

    /// Creates a `TileType` from a character of an ASCII-art test fixture.
    /// Anything that is not a bead is an unconstrained tile.
    #[cfg(test)]
    pub fn from_ascii(character: char) -> TileType {
        match character {
            'C' => Corner,
            'S' => Straight,
            _ => Any,
        }
    }
}
