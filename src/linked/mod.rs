mod node;
mod ring_buffer;

pub use ring_buffer::LinkedRingBuffer;
