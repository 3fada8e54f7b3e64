//! The persisted puzzle format: semicolon-delimited text with a version
//! marker, the grid dimensions, the tile constraints, and (since version 2)
//! the edge states.
//!
//! ```text
//! v=2;s=3x2;ACSAAA;LAAE;AAL
//! ```

use thiserror::Error;

use crate::data::{LineState, PuzzleState, TileType};

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn serializes_tiles_and_lines() {
        let mut state = PuzzleState::new(2, 2).unwrap();
        state.set_tile(1, 0, TileType::Corner);
        state.set_tile(0, 1, TileType::Straight);
        state.set_hline(0, 0, LineState::Line);
        state.set_vline(1, 0, LineState::Empty);

        assert_eq!(serialize(&state), "v=2;s=2x2;ACSA;LA;AE");
    }

    #[test]
    fn deserializes_a_version_1_puzzle_with_undecided_edges() {
        let state = deserialize("v=1;s=2x2;ACSA").unwrap();

        assert_eq!(state.get_tile(1, 0), Some(TileType::Corner));
        assert_eq!(state.get_tile(0, 1), Some(TileType::Straight));
        assert_eq!(state.get_hline(0, 0), Some(LineState::Any));
        assert_eq!(state.get_vline(1, 0), Some(LineState::Any));
    }

    #[test]
    fn round_trips_through_the_current_version() {
        let input = "v=2;s=3x2;ACSAAA;LAAE;AAL";
        let state = deserialize(input).unwrap();

        assert_eq!(serialize(&state), input);
    }

    #[test]
    fn accepts_surrounding_whitespace() {
        assert!(deserialize("  v=1;s=1x1;A\n").is_ok());
    }

    #[test]
    fn rejects_unsupported_versions() {
        assert_matches!(
            deserialize("v=3;s=1x1;A"),
            Err(ParseError::UnsupportedVersion(_))
        );
        assert_matches!(
            deserialize("w=1;s=1x1;A"),
            Err(ParseError::UnsupportedVersion(_))
        );
    }

    #[test]
    fn rejects_malformed_dimensions() {
        assert_matches!(
            deserialize("v=1;s=11;A"),
            Err(ParseError::MalformedDimensions(_))
        );
        assert_matches!(
            deserialize("v=1;s=ax1;A"),
            Err(ParseError::MalformedDimensions(_))
        );
        assert_matches!(
            deserialize("v=1;s=0x4;"),
            Err(ParseError::MalformedDimensions(_))
        );
    }

    #[test]
    fn rejects_missing_sections() {
        assert_matches!(
            deserialize("v=1;s=2x2"),
            Err(ParseError::MissingSection("tiles"))
        );
        assert_matches!(
            deserialize("v=2;s=2x2;AAAA;LA"),
            Err(ParseError::MissingSection("vertical lines"))
        );
    }

    #[test]
    fn rejects_sections_of_the_wrong_length() {
        assert_matches!(
            deserialize("v=1;s=2x2;AAA"),
            Err(ParseError::WrongSectionLength {
                section: "tiles",
                ..
            })
        );
        assert_matches!(
            deserialize("v=2;s=2x2;AAAA;LAL;AA"),
            Err(ParseError::WrongSectionLength { .. })
        );
    }

    #[test]
    fn rejects_unknown_symbols() {
        assert_matches!(
            deserialize("v=1;s=2x2;AXSA"),
            Err(ParseError::UnexpectedSymbol {
                section: "tiles",
                symbol: 'X'
            })
        );
        assert_matches!(
            deserialize("v=2;s=2x2;AAAA;L?;AA"),
            Err(ParseError::UnexpectedSymbol { symbol: '?', .. })
        );
    }

    #[test]
    fn rejects_trailing_sections() {
        assert_matches!(
            deserialize("v=1;s=1x1;A;extra"),
            Err(ParseError::TrailingData)
        );
    }
}

const DELIMITER: char = ';';
const VERSION_PREFIX: &str = "v=";
const DIMENSIONS_PREFIX: &str = "s=";
const DIMENSIONS_DELIMITER: char = 'x';

/// The version `serialize` writes.
const VERSION: u32 = 2;

/// Failures while reading a serialized puzzle.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("missing {0} section")]
    MissingSection(&'static str),
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(String),
    #[error("malformed dimensions: {0}")]
    MalformedDimensions(String),
    #[error("{section} section has {actual} symbols, expected {expected}")]
    WrongSectionLength {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unexpected symbol {symbol:?} in {section} section")]
    UnexpectedSymbol {
        section: &'static str,
        symbol: char,
    },
    #[error("unexpected data after the final section")]
    TrailingData,
}

/// Writes the complete state, edges included, in the current format
/// version.
pub fn serialize(state: &PuzzleState) -> String {
    let mut output = format!(
        "{}{}{}{}{}{}{}",
        VERSION_PREFIX,
        VERSION,
        DELIMITER,
        DIMENSIONS_PREFIX,
        state.width(),
        DIMENSIONS_DELIMITER,
        state.height()
    );

    output.push(DELIMITER);
    for (y, x) in iproduct!(0..state.height(), 0..state.width()) {
        output.push(state.get_tile(x, y).unwrap().to_symbol());
    }

    output.push(DELIMITER);
    for (y, x) in iproduct!(0..state.height(), 0..state.width() - 1) {
        output.push(state.get_hline(x, y).unwrap().to_symbol());
    }

    output.push(DELIMITER);
    for (y, x) in iproduct!(0..state.height() - 1, 0..state.width()) {
        output.push(state.get_vline(x, y).unwrap().to_symbol());
    }

    output
}

/// Reads a serialized puzzle in format version 1 (tiles only) or 2 (tiles
/// and edges).
pub fn deserialize(input: &str) -> Result<PuzzleState, ParseError> {
    let mut sections = input.trim().split(DELIMITER);

    let version = sections
        .next()
        .ok_or(ParseError::MissingSection("version"))?;
    let version = match version.strip_prefix(VERSION_PREFIX) {
        Some("1") => 1,
        Some("2") => 2,
        _ => {
            return Err(ParseError::UnsupportedVersion(version.to_string()))
        }
    };

    let dimensions = sections
        .next()
        .ok_or(ParseError::MissingSection("dimensions"))?;
    let mut state = parse_dimensions(dimensions)?;

    let tiles = sections.next().ok_or(ParseError::MissingSection("tiles"))?;
    parse_section(
        "tiles",
        tiles,
        state.width() * state.height(),
        state.width(),
        |symbol| TileType::from_symbol(symbol),
        |state, x, y, tile| state.set_tile(x, y, tile),
        &mut state,
    )?;

    if version >= 2 {
        let hlines = sections
            .next()
            .ok_or(ParseError::MissingSection("horizontal lines"))?;
        parse_section(
            "horizontal lines",
            hlines,
            (state.width() - 1) * state.height(),
            state.width() - 1,
            |symbol| LineState::from_symbol(symbol),
            |state, x, y, line| state.set_hline(x, y, line),
            &mut state,
        )?;

        let vlines = sections
            .next()
            .ok_or(ParseError::MissingSection("vertical lines"))?;
        parse_section(
            "vertical lines",
            vlines,
            state.width() * (state.height() - 1),
            state.width(),
            |symbol| LineState::from_symbol(symbol),
            |state, x, y, line| state.set_vline(x, y, line),
            &mut state,
        )?;
    }

    if sections.next().map_or(false, |rest| !rest.is_empty()) {
        return Err(ParseError::TrailingData);
    }

    Ok(state)
}

fn parse_dimensions(section: &str) -> Result<PuzzleState, ParseError> {
    let malformed =
        || ParseError::MalformedDimensions(section.to_string());

    let dimensions = section
        .strip_prefix(DIMENSIONS_PREFIX)
        .ok_or_else(malformed)?;
    let mut parts = dimensions.split(DIMENSIONS_DELIMITER);

    let width: usize = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(malformed)?;
    let height: usize = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    PuzzleState::new(width, height).map_err(|_| malformed())
}

/// Parses one row-major symbol section of `columns` entries per row and
/// stores each parsed value through `store`.
fn parse_section<T: Copy>(
    section: &'static str,
    input: &str,
    expected: usize,
    columns: usize,
    parse: impl Fn(char) -> Option<T>,
    store: impl Fn(&mut PuzzleState, usize, usize, T),
    state: &mut PuzzleState,
) -> Result<(), ParseError> {
    let actual = input.chars().count();
    if actual != expected {
        return Err(ParseError::WrongSectionLength {
            section,
            expected,
            actual,
        });
    }

    for (position, symbol) in input.chars().enumerate() {
        let value = parse(symbol).ok_or(ParseError::UnexpectedSymbol {
            section,
            symbol,
        })?;
        store(state, position % columns, position / columns, value);
    }

    Ok(())
}
