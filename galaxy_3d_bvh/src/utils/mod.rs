//! Utility types shared across the crate.

mod memory_arena;

pub use memory_arena::MemoryArena;
