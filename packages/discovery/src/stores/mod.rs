//! Profile store implementations.

pub mod memory;

pub use memory::MemoryProfileStore;
