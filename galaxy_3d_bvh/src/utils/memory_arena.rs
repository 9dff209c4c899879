/// Typed bump arena backing the BVH node and instance arrays.
///
/// Elements are handed out as plain `usize` indices that stay valid until the
/// next bulk `reset`/`release`. There is no per-element free; memory is
/// reclaimed all at once.
///
/// Storage is a single contiguous buffer (so `as_slice` covers every live
/// element) whose capacity is reserved in steps of `block_size` elements.
/// Growing past the reserved blocks may reallocate and move the buffer:
/// indices survive a move, references into the arena do not.
/// Alignment comes from `T` itself.
///
/// # Example
///
/// ```ignore
/// let mut arena = MemoryArena::new(64);
/// let a = arena.allocate(1.0f32);      // 0
/// let r = arena.allocate_from_slice(&[2.0, 3.0]); // 1..3
/// arena.reset();                       // everything reclaimed, blocks kept
/// ```

use std::ops::{Index, IndexMut, Range};

pub struct MemoryArena<T> {
    storage: Vec<T>,
    block_size: usize,
    block_count: usize,
    high_water_mark: usize,
}

impl<T> MemoryArena<T> {
    /// Create an empty arena growing `block_size` elements at a time
    pub fn new(block_size: usize) -> Self {
        debug_assert!(block_size > 0, "arena block size must be non-zero");
        Self {
            storage: Vec::new(),
            block_size: block_size.max(1),
            block_count: 0,
            high_water_mark: 0,
        }
    }

    /// Reserve whole blocks until `additional` more elements fit (may move the buffer)
    fn reserve_blocks(&mut self, additional: usize) {
        let required = self.storage.len() + additional;
        let capacity = self.block_count * self.block_size;
        if required <= capacity {
            return;
        }

        let new_blocks = (required - capacity).div_ceil(self.block_size);
        self.block_count += new_blocks;
        let target = self.block_count * self.block_size;
        self.storage.reserve_exact(target - self.storage.len());
    }

    fn note_len(&mut self) {
        self.high_water_mark = self.high_water_mark.max(self.storage.len());
    }

    /// Bump-allocate one element and return its index
    pub fn allocate(&mut self, value: T) -> usize {
        self.reserve_blocks(1);
        let index = self.storage.len();
        self.storage.push(value);
        self.note_len();
        index
    }

    /// Bump-allocate a contiguous copy of `values`
    pub fn allocate_from_slice(&mut self, values: &[T]) -> Range<usize>
    where
        T: Clone,
    {
        self.reserve_blocks(values.len());
        let start = self.storage.len();
        self.storage.extend_from_slice(values);
        self.note_len();
        start..self.storage.len()
    }

    /// Remove one element, shifting every later element down by one.
    ///
    /// Indices above `index` move; no memory goes back to the arena.
    pub fn compact_remove(&mut self, index: usize) -> T {
        self.storage.remove(index)
    }

    /// Reclaim every element at once, keeping the blocks for reuse
    pub fn reset(&mut self) {
        self.storage.clear();
    }

    /// Reclaim every element and give the blocks back to the system allocator
    pub fn release(&mut self) {
        self.storage = Vec::new();
        self.block_count = 0;
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether no elements are live
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Elements that fit in the blocks reserved so far
    pub fn capacity(&self) -> usize {
        self.block_count * self.block_size
    }

    /// Number of block-sized steps reserved so far
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Block granularity in elements
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Bytes reserved by the allocated blocks
    pub fn allocated_bytes(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }

    /// Largest number of live elements ever held at once
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.storage.get(index)
    }
}

impl<T> Index<usize> for MemoryArena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.storage[index]
    }
}

impl<T> IndexMut<usize> for MemoryArena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.storage[index]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "memory_arena_tests.rs"]
mod tests;
