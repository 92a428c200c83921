use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{
    block::{Footprint, Orientation},
    color::{Cell, ColorCode},
};

/// Rectangular grid of color-coded cells.
///
/// `Board` is a value: the operations that change cells ([`place`](Self::place),
/// [`remove`](Self::remove)) take `&self` and return the changed copy, so
/// callers can keep any number of past states around and the legality checks
/// never copy anything. Equality compares dimensions plus cell-by-cell
/// content, which is exactly the win condition: the live board equals the
/// target pattern, empty cells included.
///
/// Row 0 is the top row, column 0 the leftmost. Storage is flat row-major,
/// which keeps the all-rows-equal-length invariant true by construction.
///
/// # Example
///
/// ```
/// use brickfill::{BlockLength, Board, Footprint, Orientation, level};
///
/// let board = Board::empty(10, 10);
/// let footprint = Footprint::new(0, 0, BlockLength::Four, Orientation::Horizontal);
/// assert!(board.can_place(footprint));
///
/// let next = board.place(footprint, level::YELLOW);
/// assert!(board.is_empty()); // the original value is untouched
/// assert!(!next.can_place(footprint));
/// assert_eq!(next.remove(footprint), board);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an all-empty board.
    ///
    /// Zero rows or zero columns are allowed and produce a board on which
    /// every placement is rejected.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Builds a board from digit art, one row per line.
    ///
    /// Each character is a decimal digit: `0` is an empty cell, `1`-`9` are
    /// color codes. Blank lines and per-line surrounding whitespace are
    /// ignored, so raw string literals can be indented freely. This is the
    /// format the built-in levels are written in.
    ///
    /// # Panics
    ///
    /// Panics if a character is not a digit or the rows have unequal widths.
    ///
    /// # Example
    ///
    /// ```
    /// use brickfill::Board;
    ///
    /// let target = Board::from_digits(
    ///     r"
    ///     120
    ///     021
    ///     ",
    /// );
    /// assert_eq!(target.rows(), 2);
    /// assert_eq!(target.cols(), 3);
    /// assert_eq!(target.cell(0, 0).code(), 1);
    /// assert!(target.cell(0, 2).is_empty());
    /// ```
    #[must_use]
    pub fn from_digits(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |line| line.chars().count());

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let mut width = 0;
            for ch in line.chars() {
                let Some(code) = ch.to_digit(10) else {
                    panic!("row {row} contains non-digit character {ch:?}");
                };
                cells.push(Cell::from_code(u8::try_from(code).expect("digit fits in u8")));
                width += 1;
            }
            assert_eq!(width, cols, "row {row} has {width} cells, expected {cols}");
        }

        Self {
            rows: lines.len(),
            cols,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Returns one row of cells, leftmost first.
    #[must_use]
    pub fn row_cells(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..][..self.cols]
    }

    /// Iterates over the rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.rows).map(|row| self.row_cells(row))
    }

    /// Whether every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Returns the distinct color codes on the board, ascending.
    ///
    /// For a level target this is the palette the tray generator draws from.
    #[must_use]
    pub fn color_codes(&self) -> Vec<ColorCode> {
        let mut codes: Vec<ColorCode> = self
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Empty => None,
                Cell::Color(color) => Some(*color),
            })
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Checks whether `footprint` lies fully on the board and covers only
    /// empty cells.
    ///
    /// This is the cheap preview check. Placement itself does not
    /// re-validate, so every [`place`](Self::place) must be gated on this.
    #[must_use]
    pub fn can_place(&self, footprint: Footprint) -> bool {
        let width = footprint.width();
        let height = footprint.height();
        if width > self.cols || footprint.col() > self.cols - width {
            return false;
        }
        if height > self.rows || footprint.row() > self.rows - height {
            return false;
        }
        footprint
            .cells()
            .into_iter()
            .all(|(row, col)| self.cell(row, col).is_empty())
    }

    /// Returns a copy of the board with every cell of `footprint` set to
    /// `color`.
    ///
    /// Occupancy is NOT re-checked: overlapped cells are blindly overwritten.
    /// Gate on [`can_place`](Self::can_place) first. A footprint outside the
    /// board is a caller bug and panics.
    #[must_use]
    pub fn place(&self, footprint: Footprint, color: ColorCode) -> Self {
        let mut next = self.clone();
        for (row, col) in footprint.cells() {
            let index = next.index(row, col);
            next.cells[index] = Cell::Color(color);
        }
        next
    }

    /// Returns a copy of the board with every cell of `footprint` emptied.
    ///
    /// The cells' previous content is ignored, mirroring
    /// [`place`](Self::place): the caller is responsible for passing the
    /// footprint of a block that is actually there.
    #[must_use]
    pub fn remove(&self, footprint: Footprint) -> Self {
        let mut next = self.clone();
        for (row, col) in footprint.cells() {
            let index = next.index(row, col);
            next.cells[index] = Cell::Empty;
        }
        next
    }

    /// [`can_place`](Self::can_place) plus a resting rule for gravity-style
    /// modes.
    ///
    /// A horizontal block must sit on the bottom row or have every column of
    /// its footprint directly above a non-empty cell. A vertical block needs
    /// only its lowest cell on the bottom row or directly above a non-empty
    /// cell.
    #[must_use]
    pub fn can_place_with_support(&self, footprint: Footprint) -> bool {
        if !self.can_place(footprint) {
            return false;
        }
        // can_place passed, so rows >= height >= 1 and the footprint is in
        // bounds.
        let last_row = self.rows - 1;
        match footprint.orientation() {
            Orientation::Horizontal => {
                if footprint.row() == last_row {
                    return true;
                }
                let below = footprint.row() + 1;
                (footprint.col()..footprint.col() + footprint.width())
                    .all(|col| !self.cell(below, col).is_empty())
            }
            Orientation::Vertical => {
                let bottom = footprint.row() + footprint.height() - 1;
                bottom == last_row || !self.cell(bottom + 1, footprint.col()).is_empty()
            }
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols,
        );
        row * self.cols + col
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "2x3:010200,000500" (dimension header, then comma-separated
        // rows of two hex digits per cell)
        let mut out = String::with_capacity(8 + self.rows * (self.cols * 2 + 1));
        write!(&mut out, "{}x{}:", self.rows, self.cols).unwrap();
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                out.push(',');
            }
            for cell in row {
                write!(&mut out, "{:02x}", cell.code()).unwrap();
            }
        }
        serializer.serialize_str(&out)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let Some((dims, data)) = s.split_once(':') else {
            return Err(serde::de::Error::custom(format!(
                "expected 'RxC:cells', got {s:?}"
            )));
        };
        let Some((rows_str, cols_str)) = dims.split_once('x') else {
            return Err(serde::de::Error::custom(format!(
                "invalid dimension header {dims:?}"
            )));
        };
        let rows: usize = rows_str.parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid row count {rows_str:?} ({e})"))
        })?;
        let cols: usize = cols_str.parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid column count {cols_str:?} ({e})"))
        })?;

        let row_strs: Vec<&str> = if rows == 0 {
            if !data.is_empty() {
                return Err(serde::de::Error::custom("expected no cell data for 0 rows"));
            }
            Vec::new()
        } else {
            data.split(',').collect()
        };
        if row_strs.len() != rows {
            return Err(serde::de::Error::custom(format!(
                "expected {rows} rows, got {}",
                row_strs.len()
            )));
        }

        let Some(digits_per_row) = cols.checked_mul(2) else {
            return Err(serde::de::Error::custom(format!(
                "column count {cols} is out of range"
            )));
        };

        // rows and cols are untrusted here; size the buffer from the payload.
        let mut cells = Vec::with_capacity(data.len() / 2);
        for (i, row) in row_strs.iter().enumerate() {
            if row.len() != digits_per_row {
                return Err(serde::de::Error::custom(format!(
                    "row {i} has {} hex digits, expected {digits_per_row}",
                    row.len()
                )));
            }
            for offset in (0..row.len()).step_by(2) {
                let Some(pair) = row.get(offset..offset + 2) else {
                    return Err(serde::de::Error::custom(format!(
                        "non-ASCII data in row {i}: {row:?}"
                    )));
                };
                let code = u8::from_str_radix(pair, 16).map_err(|e| {
                    serde::de::Error::custom(format!("invalid hex at row {i}: {row:?} ({e})"))
                })?;
                cells.push(Cell::from_code(code));
            }
        }

        Ok(Board { rows, cols, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::{super::block::BlockLength, *};

    fn footprint(row: usize, col: usize, length: u8, orientation: Orientation) -> Footprint {
        let length = BlockLength::from_cells(length).unwrap();
        Footprint::new(row, col, length, orientation)
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(10, 10);
        assert_eq!(board.rows(), 10);
        assert_eq!(board.cols(), 10);
        assert!(board.is_empty());
        assert!(board.cell(9, 9).is_empty());
    }

    #[test]
    fn test_from_digits() {
        let board = Board::from_digits(
            r"
            1203
            0051
            ",
        );
        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.cell(0, 0).code(), 1);
        assert_eq!(board.cell(0, 1).code(), 2);
        assert!(board.cell(0, 2).is_empty());
        assert_eq!(board.cell(1, 2).code(), 5);
        assert_eq!(board.row_cells(1).iter().map(|c| c.code()).sum::<u8>(), 6);
    }

    #[test]
    #[should_panic(expected = "row 1 has 3 cells, expected 4")]
    fn test_from_digits_rejects_ragged_rows() {
        let _ = Board::from_digits(
            r"
            1203
            005
            ",
        );
    }

    #[test]
    fn test_color_codes_sorted_distinct() {
        let board = Board::from_digits(
            r"
            505
            121
            ",
        );
        let codes: Vec<u8> = board.color_codes().iter().map(|c| c.get()).collect();
        assert_eq!(codes, vec![1, 2, 5]);

        assert!(Board::empty(3, 3).color_codes().is_empty());
    }

    #[test]
    fn test_can_place_on_empty_board() {
        let board = Board::empty(10, 10);
        assert!(board.can_place(footprint(0, 0, 4, Orientation::Horizontal)));
        assert!(board.can_place(footprint(0, 0, 4, Orientation::Vertical)));
        assert!(board.can_place(footprint(9, 9, 1, Orientation::Horizontal)));
        // Rightmost legal anchor for a horizontal 4-block is column 6.
        assert!(board.can_place(footprint(0, 6, 4, Orientation::Horizontal)));
        assert!(!board.can_place(footprint(0, 7, 4, Orientation::Horizontal)));
        // Bottom-most legal anchor for a vertical 4-block is row 6.
        assert!(board.can_place(footprint(6, 0, 4, Orientation::Vertical)));
        assert!(!board.can_place(footprint(7, 0, 4, Orientation::Vertical)));
        assert!(!board.can_place(footprint(10, 0, 1, Orientation::Horizontal)));
        assert!(!board.can_place(footprint(0, 10, 1, Orientation::Horizontal)));
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let board = Board::from_digits(
            r"
            000
            020
            000
            ",
        );
        // Any footprint covering (1, 1) is rejected.
        assert!(!board.can_place(footprint(1, 0, 3, Orientation::Horizontal)));
        assert!(!board.can_place(footprint(0, 1, 3, Orientation::Vertical)));
        assert!(!board.can_place(footprint(1, 1, 1, Orientation::Horizontal)));
        // Footprints skirting the occupied cell are fine.
        assert!(board.can_place(footprint(0, 0, 3, Orientation::Horizontal)));
        assert!(board.can_place(footprint(0, 0, 3, Orientation::Vertical)));
        assert!(board.can_place(footprint(2, 0, 3, Orientation::Horizontal)));
    }

    #[test]
    fn test_can_place_on_degenerate_boards() {
        let fp = footprint(0, 0, 1, Orientation::Horizontal);
        assert!(!Board::empty(0, 0).can_place(fp));
        assert!(!Board::empty(0, 5).can_place(fp));
        assert!(!Board::empty(5, 0).can_place(fp));
    }

    #[test]
    fn test_single_cell_orientation_is_irrelevant() {
        let board = Board::empty(3, 3);
        let color = ColorCode::new(2).unwrap();
        let horizontal = board.place(footprint(1, 1, 1, Orientation::Horizontal), color);
        let vertical = board.place(footprint(1, 1, 1, Orientation::Vertical), color);
        assert_eq!(horizontal, vertical);
    }

    #[test]
    fn test_place_sets_footprint_cells_only() {
        let board = Board::empty(10, 10);
        let color = ColorCode::new(3).unwrap();
        let placed = board.place(footprint(0, 0, 4, Orientation::Horizontal), color);

        for col in 0..4 {
            assert_eq!(placed.cell(0, col), Cell::Color(color));
        }
        let colored = placed
            .iter_rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(colored, 4);

        // A vertical single overlapping the placed block is rejected now.
        assert!(!placed.can_place(footprint(0, 2, 1, Orientation::Vertical)));

        // The input board is a value and never changes.
        assert!(board.is_empty());
    }

    #[test]
    fn test_place_vertical() {
        let board = Board::empty(5, 5);
        let color = ColorCode::new(1).unwrap();
        let placed = board.place(footprint(1, 2, 3, Orientation::Vertical), color);
        for row in 1..4 {
            assert_eq!(placed.cell(row, 2), Cell::Color(color));
        }
        assert!(placed.cell(0, 2).is_empty());
        assert!(placed.cell(4, 2).is_empty());
    }

    #[test]
    fn test_place_overwrites_blindly() {
        // place() trusts the caller: an ungated placement overwrites.
        let board = Board::from_digits("22");
        let color = ColorCode::new(1).unwrap();
        let fp = footprint(0, 0, 2, Orientation::Horizontal);
        assert!(!board.can_place(fp));
        let overwritten = board.place(fp, color);
        assert_eq!(overwritten.cell(0, 0), Cell::Color(color));
        assert_eq!(overwritten.cell(0, 1), Cell::Color(color));
    }

    #[test]
    fn test_remove_restores_place() {
        let board = Board::from_digits(
            r"
            000
            020
            000
            ",
        );
        let fp = footprint(0, 0, 3, Orientation::Horizontal);
        let color = ColorCode::new(5).unwrap();
        let placed = board.place(fp, color);
        assert_eq!(placed.remove(fp), board);
        // Removal does not touch cells outside the footprint.
        assert_eq!(placed.remove(fp).cell(1, 1).code(), 2);
    }

    #[test]
    fn test_equality_is_the_win_condition() {
        let target = Board::from_digits(
            r"
            10
            01
            ",
        );
        let color = ColorCode::new(1).unwrap();
        let built = Board::empty(2, 2)
            .place(footprint(0, 0, 1, Orientation::Horizontal), color)
            .place(footprint(1, 1, 1, Orientation::Horizontal), color);
        assert_eq!(built, target);

        // An extra colored cell on a must-stay-empty position breaks it.
        let excess = built.place(footprint(1, 0, 1, Orientation::Horizontal), color);
        assert_ne!(excess, target);

        // Same cells, different dimensions: never equal.
        assert_ne!(Board::empty(1, 4), Board::empty(4, 1));
        assert_ne!(Board::empty(2, 2), Board::empty(2, 3));
    }

    #[test]
    fn test_support_on_bottom_row() {
        let board = Board::empty(10, 10);
        assert!(board.can_place_with_support(footprint(9, 5, 1, Orientation::Horizontal)));
        assert!(board.can_place_with_support(footprint(9, 0, 4, Orientation::Horizontal)));
        // Vertical block whose lowest cell lands on the last row.
        assert!(board.can_place_with_support(footprint(7, 5, 3, Orientation::Vertical)));
        assert!(board.can_place_with_support(footprint(8, 5, 2, Orientation::Vertical)));
    }

    #[test]
    fn test_support_requires_ground_below() {
        let board = Board::empty(10, 10);
        // Floating single cell: nothing beneath (5, 5).
        assert!(!board.can_place_with_support(footprint(5, 5, 1, Orientation::Horizontal)));
        // Floating vertical block: nothing beneath its bottom cell.
        assert!(!board.can_place_with_support(footprint(2, 5, 3, Orientation::Vertical)));
    }

    #[test]
    fn test_support_from_occupied_cells() {
        let board = Board::from_digits(
            r"
            0000
            0000
            0220
            ",
        );
        // Columns 1-2 are supported by the blocks below, column 0 is not.
        assert!(board.can_place_with_support(footprint(1, 1, 2, Orientation::Horizontal)));
        assert!(!board.can_place_with_support(footprint(1, 0, 2, Orientation::Horizontal)));
        // A vertical block only needs support under its bottom cell.
        assert!(board.can_place_with_support(footprint(0, 1, 2, Orientation::Vertical)));
        // Overlap still disqualifies, support or not.
        assert!(!board.can_place_with_support(footprint(2, 1, 2, Orientation::Horizontal)));
    }

    #[test]
    fn test_board_serialization_round_trip() {
        let board = Board::from_digits(
            r"
            120
            005
            ",
        );
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, "\"2x3:010200,000005\"");

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_serialization_degenerate() {
        for board in [Board::empty(0, 0), Board::empty(0, 3), Board::empty(2, 0)] {
            let serialized = serde_json::to_string(&board).unwrap();
            let deserialized: Board = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, board, "round trip failed for {serialized}");
        }
    }

    #[test]
    fn test_board_deserialization_rejects_malformed() {
        for input in [
            "\"nonsense\"",
            "\"2x3\"",
            "\"x3:000000,000000\"",
            "\"2x:000000,000000\"",
            "\"2x3:000000\"",
            "\"2x3:0000,000000\"",
            "\"2x3:00000g,000000\"",
            "\"0x0:junk\"",
            // Multi-byte char: the row length in bytes still matches.
            "\"2x2:0\u{e9}0,0000\"",
            // Header dimensions no payload length could satisfy.
            "\"1x18446744073709551615:00\"",
        ] {
            let result: Result<Board, _> = serde_json::from_str(input);
            assert!(result.is_err(), "{input} should be rejected");
        }
    }
}
