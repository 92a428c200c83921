use crate::{
    BlockCollisionError, PlaceError, UnknownBlockError,
    core::{Block, BlockId, Board, ColorCode, Footprint, PlacedBlock},
};

use super::{
    GameStats,
    generator::{BlockGenerator, GeneratorSeed, TrayArea},
};

/// Number of blocks a freshly stocked tray holds.
pub const TRAY_BLOCK_COUNT: usize = 12;

/// Width of the tray area, in cells.
pub const TRAY_COLS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    InProgress,
    Completed,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    target: Board,
    board: Board,
    palette: Vec<ColorCode>,
    tray: Vec<Block>,
    held: Option<BlockId>,
    placed: Vec<PlacedBlock>,
    generator: BlockGenerator,
    stats: GameStats,
    state: SessionState,
}

fn stock_tray(
    generator: &mut BlockGenerator,
    target: &Board,
    palette: &[ColorCode],
) -> Vec<Block> {
    if palette.is_empty() {
        return Vec::new();
    }
    generator.generate(target, TRAY_BLOCK_COUNT, palette, TRAY_COLS)
}

impl GameSession {
    #[must_use]
    pub fn new(target: Board) -> Self {
        Self::with_generator(target, BlockGenerator::new())
    }

    #[must_use]
    pub fn with_seed(target: Board, seed: GeneratorSeed) -> Self {
        Self::with_generator(target, BlockGenerator::with_seed(seed))
    }

    fn with_generator(target: Board, mut generator: BlockGenerator) -> Self {
        let board = Board::empty(target.rows(), target.cols());
        let palette = target.color_codes();
        let tray = stock_tray(&mut generator, &target, &palette);
        Self {
            target,
            board,
            palette,
            tray,
            held: None,
            placed: Vec::new(),
            generator,
            stats: GameStats::new(),
            state: SessionState::InProgress,
        }
    }

    #[must_use]
    pub fn target(&self) -> &Board {
        &self.target
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Distinct color codes of the target, which every tray batch draws from.
    #[must_use]
    pub fn palette(&self) -> &[ColorCode] {
        &self.palette
    }

    #[must_use]
    pub fn tray_blocks(&self) -> &[Block] {
        &self.tray
    }

    #[must_use]
    pub fn placed_blocks(&self) -> &[PlacedBlock] {
        &self.placed
    }

    #[must_use]
    pub fn tray_area(&self) -> TrayArea {
        TrayArea::for_level(&self.target, TRAY_COLS)
    }

    #[must_use]
    pub fn held_block(&self) -> Option<&Block> {
        let id = self.held?;
        self.tray.iter().find(|block| block.id() == id)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Selects a tray block to drop next. Re-picking replaces the selection.
    pub fn try_pick(&mut self, id: BlockId) -> Result<(), UnknownBlockError> {
        if !self.tray.iter().any(|block| block.id() == id) {
            return Err(UnknownBlockError { id });
        }
        self.held = Some(id);
        Ok(())
    }

    pub fn unpick(&mut self) {
        self.held = None;
    }

    /// Drops the held block with its anchor cell at `(row, col)`.
    ///
    /// A rejected drop keeps the block held so the caller can retry another
    /// anchor.
    pub fn try_place(&mut self, row: usize, col: usize) -> Result<(), PlaceError> {
        let id = self.held.ok_or(PlaceError::NothingHeld)?;
        let index = self
            .tray
            .iter()
            .position(|block| block.id() == id)
            .expect("held id always refers to a tray block");
        let block = self.tray[index];
        let footprint = Footprint::new(row, col, block.length(), block.orientation());
        if !self.board.can_place(footprint) {
            return Err(PlaceError::BlockCollision(BlockCollisionError));
        }

        self.board = self.board.place(footprint, block.color());
        self.tray.remove(index);
        self.placed.push(block.into_placed(row, col));
        self.held = None;
        self.stats.record_placement();
        self.refresh_completion();
        Ok(())
    }

    /// Looks up the committed block covering `(row, col)`, if any.
    ///
    /// Committed footprints never overlap, so the cell alone identifies the
    /// block regardless of neighboring colors.
    #[must_use]
    pub fn placed_block_at(&self, row: usize, col: usize) -> Option<&PlacedBlock> {
        self.placed.iter().find(|block| block.contains(row, col))
    }

    /// Picks a committed block off the board, returning it to the front of
    /// the tray under a fresh id with its tray slot reset.
    pub fn try_remove(&mut self, id: BlockId) -> Result<(), UnknownBlockError> {
        let index = self
            .placed
            .iter()
            .position(|block| block.id() == id)
            .ok_or(UnknownBlockError { id })?;
        let record = self.placed.remove(index);
        self.board = self.board.remove(record.footprint());
        let fresh_id = self.generator.mint_id();
        self.tray.insert(0, record.into_tray_block(fresh_id));
        self.stats.record_removal();
        self.refresh_completion();
        Ok(())
    }

    /// Replaces the tray with a freshly generated batch and drops the
    /// current selection.
    ///
    /// An all-empty target has nothing to generate: the tray just empties
    /// and the refresh is not counted.
    pub fn refresh_tray(&mut self) {
        self.held = None;
        self.tray = stock_tray(&mut self.generator, &self.target, &self.palette);
        if !self.palette.is_empty() {
            self.stats.record_tray_refresh();
        }
    }

    /// Returns the session to its level-start state with a fresh tray.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.target.rows(), self.target.cols());
        self.tray = stock_tray(&mut self.generator, &self.target, &self.palette);
        self.held = None;
        self.placed.clear();
        self.stats = GameStats::new();
        self.state = SessionState::InProgress;
    }

    // Completion latches: once the live board has matched the target the
    // session stays completed, whatever happens to the board afterwards.
    fn refresh_completion(&mut self) {
        if self.state.is_completed() {
            return;
        }
        if self.board == self.target {
            self.state = SessionState::Completed;
        }
    }
}
