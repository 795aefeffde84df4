mod flat;
mod linked;
mod sequence;

pub mod error;

pub use error::RingBufferError;
pub use flat::*;
pub use linked::*;
pub use sequence::Sequence;
