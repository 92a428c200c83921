//! Game engine logic and state management.
//!
//! This module provides the high-level game logic that orchestrates the core
//! data structures into a playable puzzle:
//!
//! - [`GameSession`] - One level attempt (target, live board, tray, placed blocks)
//! - [`GameStats`] - Session statistics (placements, removals, tray refreshes)
//! - [`BlockGenerator`] - Rejection-sampling tray generation
//! - [`GeneratorSeed`] - Seed for deterministic block generation
//! - [`TrayArea`] - Bounds of the region tray blocks are generated into
//!
//! # Game Flow
//!
//! A typical session progresses as follows:
//!
//! 1. Build a [`GameSession`] from a level target (see [`crate::level`])
//! 2. The player picks a block from the tray and drops it on the board
//! 3. Legal drops commit the block; misplaced blocks are picked off the
//!    board and return to the tray
//! 4. The tray can be refreshed when none of its blocks help
//! 5. The session completes the moment the live board equals the target,
//!    empty cells included
//!
//! # Example
//!
//! ```
//! use brickfill::{GameSession, level};
//!
//! let mut session = GameSession::new(level::BUILTIN_LEVELS[0].target());
//!
//! // Drop the first tray block at the board's top-left corner
//! let id = session.tray_blocks()[0].id();
//! session.try_pick(id).unwrap();
//! session.try_place(0, 0).unwrap();
//!
//! assert_eq!(session.placed_blocks().len(), 1);
//! assert!(session.state().is_in_progress());
//! ```

pub use self::{game_session::*, game_stats::*, generator::*};

mod game_session;
mod game_stats;
mod generator;
