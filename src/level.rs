//! Built-in level data and the display palette.
//!
//! Levels are static target patterns in the digit encoding parsed by
//! [`Board::from_digits`]; the palette maps color codes to CSS-style display
//! colors for rendering layers. Engine logic never reads display colors,
//! only code equality.

use crate::core::{Board, Cell, ColorCode};

const fn code(code: u8) -> ColorCode {
    match ColorCode::new(code) {
        Some(color) => color,
        None => panic!("palette codes are non-zero"),
    }
}

/// Code 1, brick yellow.
pub const YELLOW: ColorCode = code(1);
/// Code 2, near black.
pub const BLACK: ColorCode = code(2);
/// Code 3, stone gray.
pub const GRAY: ColorCode = code(3);
/// Code 4, dark gray.
pub const DARK_GRAY: ColorCode = code(4);
/// Code 5, brick red.
pub const RED: ColorCode = code(5);

/// Maps color codes to display colors.
///
/// Pure data for rendering layers: empty cells and codes missing from the
/// mapping display as `"transparent"`.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colors: &'static [(ColorCode, &'static str)],
}

impl Palette {
    /// The standard brick palette covering the built-in levels.
    pub const BRICK: Self = Self {
        colors: &[
            (YELLOW, "#fbbf24"),
            (BLACK, "#111827"),
            (GRAY, "#9ca3af"),
            (DARK_GRAY, "#4b5563"),
            (RED, "#ef4444"),
        ],
    };

    /// Returns the display color for a cell.
    #[must_use]
    pub fn display(&self, cell: Cell) -> &'static str {
        let Cell::Color(color) = cell else {
            return "transparent";
        };
        self.colors
            .iter()
            .find(|(candidate, _)| *candidate == color)
            .map_or("transparent", |(_, display)| display)
    }
}

/// A build target: a named pattern the player reproduces on the board.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    name: &'static str,
    art: &'static str,
}

impl Level {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parses the target pattern.
    #[must_use]
    pub fn target(&self) -> Board {
        Board::from_digits(self.art)
    }
}

/// The standard level set, easiest first.
pub const BUILTIN_LEVELS: [Level; 2] = [
    Level {
        name: "Smiley Face",
        art: r"
            0001111000
            0011111100
            0111111110
            1122112211
            1122112211
            1111111111
            1122112211
            0111221110
            0011111100
            0001111000
        ",
    },
    Level {
        name: "Castle",
        art: r"
            0000000000
            0000550000
            0005555000
            0055335500
            0553223550
            3333223333
            3223333223
            3223113223
            3333113333
            3333113333
        ",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_parse() {
        for level in BUILTIN_LEVELS {
            let target = level.target();
            assert_eq!(target.rows(), 10, "{} must be 10 rows", level.name());
            assert_eq!(target.cols(), 10, "{} must be 10 columns", level.name());
            assert!(!target.is_empty(), "{} must have content", level.name());
        }
        assert_eq!(BUILTIN_LEVELS[0].name(), "Smiley Face");
        assert_eq!(BUILTIN_LEVELS[1].name(), "Castle");
    }

    #[test]
    fn test_level_palettes() {
        let smiley = BUILTIN_LEVELS[0].target();
        assert_eq!(smiley.color_codes(), vec![YELLOW, BLACK]);

        // The castle skips dark gray entirely.
        let castle = BUILTIN_LEVELS[1].target();
        assert_eq!(castle.color_codes(), vec![YELLOW, BLACK, GRAY, RED]);
    }

    #[test]
    fn test_level_cells_spot_checks() {
        let smiley = BUILTIN_LEVELS[0].target();
        assert!(smiley.cell(0, 0).is_empty());
        assert_eq!(smiley.cell(0, 3), Cell::Color(YELLOW));
        assert_eq!(smiley.cell(3, 2), Cell::Color(BLACK)); // left eye
        assert_eq!(smiley.cell(7, 4), Cell::Color(BLACK)); // mouth

        let castle = BUILTIN_LEVELS[1].target();
        assert!(castle.cell(0, 0).is_empty());
        assert_eq!(castle.cell(1, 4), Cell::Color(RED)); // flag
        assert_eq!(castle.cell(5, 0), Cell::Color(GRAY)); // wall
        assert_eq!(castle.cell(7, 4), Cell::Color(YELLOW)); // gate
        assert_eq!(castle.cell(6, 1), Cell::Color(BLACK)); // window
    }

    #[test]
    fn test_palette_display() {
        let palette = Palette::BRICK;
        assert_eq!(palette.display(Cell::Empty), "transparent");
        assert_eq!(palette.display(Cell::Color(YELLOW)), "#fbbf24");
        assert_eq!(palette.display(Cell::Color(BLACK)), "#111827");
        assert_eq!(palette.display(Cell::Color(RED)), "#ef4444");
        // Codes outside the mapping fall back to transparent.
        assert_eq!(palette.display(Cell::from_code(9)), "transparent");
    }
}
