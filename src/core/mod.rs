pub use self::{block::*, board::*, color::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod color;
