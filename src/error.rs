use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RingBufferError {
    #[error("capacity must be non-negative, got {0}")]
    InvalidArgument(isize),

    #[error("only the oldest element (index 0) can be accessed, got index {0}")]
    InvalidIndex(usize),

    #[error("buffer is empty and no element can be removed")]
    EmptyBuffer,
}
