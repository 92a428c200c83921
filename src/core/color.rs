use std::num::NonZeroU8;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a palette color.
///
/// Color codes are the small positive integers shared by level data, board
/// cells, and tray blocks. Code `0` is not a color: it marks an empty cell
/// and is unrepresentable here (see [`Cell::Empty`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct ColorCode(NonZeroU8);

impl ColorCode {
    /// Creates a color code. Returns `None` for `0`.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        match NonZeroU8::new(code) {
            Some(code) => Some(Self(code)),
            None => None,
        }
    }

    /// Returns the numeric code (always non-zero).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Serialize for ColorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.get())
    }
}

impl<'de> Deserialize<'de> for ColorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Self::new(code).ok_or_else(|| serde::de::Error::custom("color code must be non-zero"))
    }
}

/// A single cell in the board representation.
///
/// Stores what occupies the cell: nothing, or one palette color. The numeric
/// encoding (`0` empty, positive color code) only appears at the serde and
/// level-data boundaries; in memory the emptiness is its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell (background).
    #[default]
    Empty,
    /// Cell covered by a block of the given color.
    Color(ColorCode),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the numeric code of the cell (`0` for empty).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Color(color) => color.get(),
        }
    }

    /// Builds a cell from its numeric code (`0` becomes [`Cell::Empty`]).
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match ColorCode::new(code) {
            Some(color) => Cell::Color(color),
            None => Cell::Empty,
        }
    }
}

impl From<ColorCode> for Cell {
    fn from(color: ColorCode) -> Self {
        Cell::Color(color)
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Ok(Cell::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_code_rejects_zero() {
        assert_eq!(ColorCode::new(0), None);
        assert_eq!(ColorCode::new(1).map(ColorCode::get), Some(1));
        assert_eq!(ColorCode::new(255).map(ColorCode::get), Some(255));
    }

    #[test]
    fn test_cell_code_round_trip() {
        assert_eq!(Cell::from_code(0), Cell::Empty);
        for code in 1..=9 {
            let cell = Cell::from_code(code);
            assert!(!cell.is_empty(), "code {code} should be occupied");
            assert_eq!(cell.code(), code);
        }
    }

    #[test]
    fn test_cell_from_color() {
        let color = ColorCode::new(3).unwrap();
        assert_eq!(Cell::from(color), Cell::Color(color));
        assert_eq!(Cell::from(color).code(), 3);
    }

    #[test]
    fn test_cell_serialization() {
        let json = serde_json::to_string(&Cell::Empty).unwrap();
        assert_eq!(json, "0");

        let json = serde_json::to_string(&Cell::from_code(5)).unwrap();
        assert_eq!(json, "5");

        let cell: Cell = serde_json::from_str("2").unwrap();
        assert_eq!(cell.code(), 2);
        let cell: Cell = serde_json::from_str("0").unwrap();
        assert!(cell.is_empty());
    }

    #[test]
    fn test_color_code_serialization() {
        let color = ColorCode::new(4).unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "4");

        let parsed: ColorCode = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, color);

        let result: Result<ColorCode, _> = serde_json::from_str("0");
        assert!(result.is_err(), "zero is not a color code");
    }

    #[test]
    fn test_color_code_display() {
        let color = ColorCode::new(7).unwrap();
        assert_eq!(color.to_string(), "7");
    }
}
