use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Block, BlockId, BlockLength, Board, ColorCode, Footprint, Orientation};

/// Stocks the tray with randomly parameterized, non-overlapping blocks.
///
/// # Rejection sampling
///
/// Each attempt draws a shape (length 1-4, horizontal or vertical) and an
/// anchor uniformly over the positions where that shape stays inside the
/// tray, then throws the attempt away if it overlaps a block generated
/// earlier in the same batch. Tray density is low relative to the attempt
/// budget, so this converges quickly; under real space pressure the budget
/// runs out and the batch simply comes back shorter than requested.
///
/// # Example
///
/// ```
/// use brickfill::{BlockGenerator, level};
///
/// let target = level::BUILTIN_LEVELS[0].target();
/// let palette = target.color_codes();
///
/// let mut generator = BlockGenerator::new();
/// let blocks = generator.generate(&target, 12, &palette, 8);
/// assert!(blocks.len() <= 12);
/// ```
#[derive(Debug, Clone)]
pub struct BlockGenerator {
    rng: Pcg32,
}

impl Default for BlockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic block generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator behind the tray. Using the same seed produces the same batches
/// of blocks, including their ids, enabling:
///
/// - Reproducible sessions for debugging
/// - Session recording and replay
/// - Deterministic testing
///
/// # Example
///
/// ```
/// use brickfill::{BlockGenerator, GeneratorSeed, level};
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: GeneratorSeed = rand::rng().random();
///
/// let target = level::BUILTIN_LEVELS[0].target();
/// let palette = target.color_codes();
///
/// // Two generators built from the same seed stock identical trays
/// let mut first = BlockGenerator::with_seed(seed);
/// let mut second = BlockGenerator::with_seed(seed);
/// assert_eq!(
///     first.generate(&target, 12, &palette, 8),
///     second.generate(&target, 12, &palette, 8),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSeed([u8; 16]);

impl Serialize for GeneratorSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for GeneratorSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `GeneratorSeed` values using the standard random
/// distribution, so `rng.random()` works for seeds.
impl Distribution<GeneratorSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratorSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GeneratorSeed(seed)
    }
}

/// Bounds of the region blocks are generated into.
///
/// The tray sits beside the board and shares its row count; its width is the
/// configured column count, floored at one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayArea {
    rows: usize,
    cols: usize,
}

impl TrayArea {
    #[must_use]
    pub fn for_level(level: &Board, tray_cols: usize) -> Self {
        Self {
            rows: level.rows(),
            cols: tray_cols.max(1),
        }
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }
}

impl BlockGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic output, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic block
    /// generation.
    #[must_use]
    pub fn with_seed(seed: GeneratorSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Produces up to `count` blocks laid out in the tray beside `level`.
    ///
    /// Colors are drawn uniformly from `allowed_colors`, shapes and tray
    /// slots uniformly from what fits. The attempt budget is
    /// `max(50, count * 10)` with rejected attempts counted, so a cramped
    /// tray yields fewer than `count` blocks rather than spinning; a short
    /// batch is a valid outcome, not an error. An empty `allowed_colors`
    /// yields an empty batch.
    pub fn generate(
        &mut self,
        level: &Board,
        count: usize,
        allowed_colors: &[ColorCode],
        tray_cols: usize,
    ) -> Vec<Block> {
        if allowed_colors.is_empty() {
            return Vec::new();
        }
        let area = TrayArea::for_level(level, tray_cols);
        let mut occupancy = Board::empty(area.rows(), area.cols());
        let mut blocks = Vec::with_capacity(count);

        let budget = count.saturating_mul(10).max(50);
        let mut attempts = 0;
        while blocks.len() < count && attempts < budget {
            attempts += 1;

            let length: BlockLength = self.rng.random();
            let orientation: Orientation = self.rng.random();
            let (width, height) = match orientation {
                Orientation::Horizontal => (length.cells(), 1),
                Orientation::Vertical => (1, length.cells()),
            };
            if width > area.cols() || height > area.rows() {
                continue;
            }
            let row = self.rng.random_range(0..=area.rows() - height);
            let col = self.rng.random_range(0..=area.cols() - width);
            let footprint = Footprint::new(row, col, length, orientation);
            if !occupancy.can_place(footprint) {
                continue;
            }

            let color = *allowed_colors
                .choose(&mut self.rng)
                .expect("allowed colors checked non-empty");
            occupancy = occupancy.place(footprint, color);
            blocks.push(Block::new(self.mint_id(), color, length, orientation, row, col));
        }
        blocks
    }

    /// Mints a fresh block id from the generator's RNG.
    ///
    /// Removal uses this to give a block returning to the tray a new
    /// identity.
    pub fn mint_id(&mut self) -> BlockId {
        self.rng.random()
    }
}
