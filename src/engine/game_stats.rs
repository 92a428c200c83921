/// Counters for one play-through of a level.
///
/// Tracks how much work the player spent on the current attempt:
///
/// - **Placed blocks**: Total number of blocks committed to the board
/// - **Removed blocks**: Total number of blocks picked off the board again
/// - **Tray refreshes**: Times the tray was regenerated on request
///
/// Placing, removing and re-placing the same block counts on every step, so
/// the counters measure effort rather than final board content. They reset
/// with the session.
///
/// # Example
///
/// ```
/// use brickfill::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_placement();
/// stats.record_placement();
/// stats.record_removal();
///
/// assert_eq!(stats.placed_blocks(), 2);
/// assert_eq!(stats.removed_blocks(), 1);
/// assert_eq!(stats.tray_refreshes(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameStats {
    placed_blocks: usize,
    removed_blocks: usize,
    tray_refreshes: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placed_blocks: 0,
            removed_blocks: 0,
            tray_refreshes: 0,
        }
    }

    /// Returns the total number of blocks committed to the board.
    #[must_use]
    pub const fn placed_blocks(&self) -> usize {
        self.placed_blocks
    }

    /// Returns the total number of blocks picked off the board.
    #[must_use]
    pub const fn removed_blocks(&self) -> usize {
        self.removed_blocks
    }

    /// Returns the number of on-request tray regenerations.
    #[must_use]
    pub const fn tray_refreshes(&self) -> usize {
        self.tray_refreshes
    }

    /// Updates statistics after a block is committed to the board.
    pub const fn record_placement(&mut self) {
        self.placed_blocks += 1;
    }

    /// Updates statistics after a block is picked off the board.
    pub const fn record_removal(&mut self) {
        self.removed_blocks += 1;
    }

    /// Updates statistics after the tray is regenerated.
    pub const fn record_tray_refresh(&mut self) {
        self.tray_refreshes += 1;
    }
}
