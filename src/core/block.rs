use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::color::ColorCode;

/// A block waiting in the tray.
///
/// Blocks are immutable records: `(row, col)` is the block's slot inside the
/// tray area, assigned by the generator so tray tiles never overlap. It has
/// no bearing on where the block may go on the board; committing a block to
/// the board turns it into a [`PlacedBlock`] with a board anchor instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    color: ColorCode,
    length: BlockLength,
    orientation: Orientation,
    row: usize,
    col: usize,
}

impl Block {
    #[must_use]
    pub const fn new(
        id: BlockId,
        color: ColorCode,
        length: BlockLength,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Self {
        Self {
            id,
            color,
            length,
            orientation,
            row,
            col,
        }
    }

    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> ColorCode {
        self.color
    }

    #[must_use]
    pub fn length(&self) -> BlockLength {
        self.length
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Footprint of the block inside the tray area.
    #[must_use]
    pub fn tray_footprint(&self) -> Footprint {
        Footprint::new(self.row, self.col, self.length, self.orientation)
    }

    /// Commits the block to a board anchor, producing its placed record.
    #[must_use]
    pub fn into_placed(self, row: usize, col: usize) -> PlacedBlock {
        PlacedBlock {
            id: self.id,
            color: self.color,
            length: self.length,
            orientation: self.orientation,
            row,
            col,
        }
    }
}

/// A block committed to the board.
///
/// `(row, col)` is the anchor (top-left covered cell) on the board. The
/// footprint reconstructs exactly which cells belong to the block, which is
/// what removal and overlay rendering consume. Committed footprints never
/// overlap as long as placements are gated on
/// [`Board::can_place`](super::board::Board::can_place).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    id: BlockId,
    color: ColorCode,
    length: BlockLength,
    orientation: Orientation,
    row: usize,
    col: usize,
}

impl PlacedBlock {
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> ColorCode {
        self.color
    }

    #[must_use]
    pub fn length(&self) -> BlockLength {
        self.length
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Footprint of the block on the board.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.row, self.col, self.length, self.orientation)
    }

    /// Whether `(row, col)` is one of the block's cells.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.footprint().contains(row, col)
    }

    /// Returns the block to the tray as a fresh descriptor.
    ///
    /// The descriptor carries the caller-supplied fresh id and a reset tray
    /// slot; the board anchor is forgotten.
    #[must_use]
    pub fn into_tray_block(self, id: BlockId) -> Block {
        Block {
            id,
            color: self.color,
            length: self.length,
            orientation: self.orientation,
            row: 0,
            col: 0,
        }
    }
}

/// The cells a block covers on a grid: anchor, length, and orientation.
///
/// The anchor is the top-left covered cell. Width is the length for
/// horizontal blocks and 1 for vertical ones, height the other way round, so
/// a 1-length footprint is the same single cell in either orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    row: usize,
    col: usize,
    length: BlockLength,
    orientation: Orientation,
}

impl Footprint {
    #[must_use]
    pub const fn new(
        row: usize,
        col: usize,
        length: BlockLength,
        orientation: Orientation,
    ) -> Self {
        Self {
            row,
            col,
            length,
            orientation,
        }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    #[must_use]
    pub const fn length(self) -> BlockLength {
        self.length
    }

    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.length.cells(),
            Orientation::Vertical => 1,
        }
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(self) -> usize {
        match self.orientation {
            Orientation::Horizontal => 1,
            Orientation::Vertical => self.length.cells(),
        }
    }

    /// Returns every covered `(row, col)`, anchor first.
    #[must_use]
    pub fn cells(self) -> ArrayVec<(usize, usize), 4> {
        let mut cells = ArrayVec::new();
        for row in self.row..self.row + self.height() {
            for col in self.col..self.col + self.width() {
                cells.push((row, col));
            }
        }
        cells
    }

    /// Whether `(row, col)` lies inside the footprint.
    #[must_use]
    pub const fn contains(self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height()
            && col >= self.col
            && col < self.col + self.width()
    }
}

/// Axis a block extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The block spans its length in columns within a single row.
    Horizontal,
    /// The block spans its length in rows within a single column.
    Vertical,
}

impl Orientation {
    /// Returns the single character representation of this orientation.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickfill::Orientation;
    ///
    /// assert_eq!(Orientation::Horizontal.as_char(), 'h');
    /// assert_eq!(Orientation::Vertical.as_char(), 'v');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }

    /// Parses an orientation from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickfill::Orientation;
    ///
    /// assert_eq!(Orientation::from_char('h'), Some(Orientation::Horizontal));
    /// assert_eq!(Orientation::from_char('v'), Some(Orientation::Vertical));
    /// assert_eq!(Orientation::from_char('d'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(Orientation::Horizontal),
            'v' => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

impl Distribution<Orientation> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl Serialize for Orientation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.as_char())
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Self::from_char(c)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid orientation: {c:?}")))
    }
}

/// Number of cells a block covers: 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BlockLength {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl BlockLength {
    /// All lengths, shortest first.
    pub const ALL: [Self; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Returns the number of covered cells.
    #[must_use]
    pub const fn cells(self) -> usize {
        self as usize
    }

    /// Builds a length from its cell count.
    #[must_use]
    pub const fn from_cells(cells: u8) -> Option<Self> {
        match cells {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }
}

impl Distribution<BlockLength> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockLength {
        match rng.random_range(0..=3) {
            0 => BlockLength::One,
            1 => BlockLength::Two,
            2 => BlockLength::Three,
            _ => BlockLength::Four,
        }
    }
}

impl Serialize for BlockLength {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for BlockLength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cells = u8::deserialize(deserializer)?;
        Self::from_cells(cells).ok_or_else(|| {
            serde::de::Error::custom(format!("block length must be 1-4, got {cells}"))
        })
    }
}

/// Identifier of one tray block instance.
///
/// 128 random bits minted from the generator's RNG, so a seeded generator
/// reproduces them. Collisions are never checked: at 128 bits they do not
/// happen within a session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0:032x}")]
pub struct BlockId(u128);

impl BlockId {
    #[must_use]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.0
    }
}

impl Distribution<BlockId> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockId {
        BlockId(rng.random())
    }
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as a 32-character hex string
        let hex = format!("{:032x}", self.0);
        serializer.serialize_str(&hex)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid block id: expected 32 hex characters, got {}",
                s.len()
            )));
        }
        let bits = u128::from_str_radix(&s, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid block id: {s} ({e})")))?;
        Ok(BlockId(bits))
    }
}
