pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
pub mod level;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("block colliding or out of bounds at the requested anchor")]
pub struct BlockCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("block colliding when dropping held block")]
    BlockCollision(BlockCollisionError),
    #[display("no block held to drop")]
    NothingHeld,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("no block with id {id}")]
pub struct UnknownBlockError {
    #[error(not(source))]
    pub id: BlockId,
}
