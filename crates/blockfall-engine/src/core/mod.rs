pub use self::{board::*, piece::*, shape::*, snapshot::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;
pub(crate) mod snapshot;
