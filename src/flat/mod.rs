mod ring_buffer;
mod ring_offsets;

pub use ring_buffer::FixedRingBuffer;
