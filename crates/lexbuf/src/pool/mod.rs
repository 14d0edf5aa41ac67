//! BufferPool: recycles the buffers a lexer retires as it refills.
//!
//! What it does
//! - Exchanges a retired buffer for a fresh one of at least a requested
//!   capacity (`swap`), reusing a drained block when one is big enough and
//!   allocating only on a miss.
//! - Keeps every retired buffer in a FIFO chain, oldest (tail) to newest
//!   (head), until the caller reports its bytes consumed (`free`). Only then
//!   does the block become available for reuse.
//!
//! Representation
//! - Blocks live in an arena (`Vec<Block>`) and link to their successor by
//!   slot index. Blocks are never removed from the arena; storage is retained
//!   for the pool's lifetime and handed back out on later swaps.
//!
//! Invariants
//! - Walking `tail` → `head` visits retired buffers in the order their bytes
//!   were produced.
//! - `pos < len(tail)` whenever the chain is non-empty; while it is empty,
//!   `pos` counts bytes consumed from the caller's active buffer.
//! - A block is inactive only after cumulative consumption has passed its
//!   full length.
//!
//! Selection is first-fit: the first inactive block with enough capacity is
//! claimed, even if a later one would fit more tightly.

use alloc::vec::Vec;
use core::mem;

use log::trace;


#[derive(Debug, Default)]
struct Block {
    buf: Vec<u8>,
    next: Option<usize>,
    active: bool,
}

/// A snapshot of a [`BufferPool`], for inspection and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Blocks owned by the pool, active or not.
    pub blocks: usize,
    /// Blocks still waiting for their bytes to be consumed.
    pub in_flight: usize,
    /// Bytes held by in-flight blocks that have not been reported consumed.
    pub unconsumed: usize,
    /// Total capacity retained across all blocks.
    pub retained: usize,
}

/// Chain of retired buffers, reclaimed as their bytes are consumed.
///
/// The pool has a single-writer contract: the counts passed to
/// [`free`](BufferPool::free) must together describe consumption in stream
/// order, never counting a byte twice. Over-reporting recycles blocks that
/// are logically unread.
#[derive(Debug, Default)]
pub struct BufferPool {
    blocks: Vec<Block>,
    head: Option<usize>,
    tail: Option<usize>,
    pos: usize,
}

impl BufferPool {
    /// An empty pool; allocates nothing until the first swap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchanges `retired` for an empty buffer with capacity of at least
    /// `min_capacity`.
    ///
    /// The retired buffer, with its contents, is appended to the chain and
    /// drained by later [`free`](BufferPool::free) calls.
    pub fn swap(&mut self, retired: Vec<u8>, min_capacity: usize) -> Vec<u8> {
        let committed = retired.len();
        self.swap_carrying(retired, committed, min_capacity)
    }

    /// Like [`swap`](BufferPool::swap), but `retired[carry_from..]` is moved
    /// to the front of the returned buffer instead of being interned.
    ///
    /// Only `retired[..carry_from]` joins the chain. The returned buffer has
    /// length `retired.len() - carry_from`.
    ///
    /// # Panics
    /// If `carry_from > retired.len()`, or if the carried bytes do not fit in
    /// `min_capacity`.
    pub fn swap_carrying(
        &mut self,
        mut retired: Vec<u8>,
        carry_from: usize,
        min_capacity: usize,
    ) -> Vec<u8> {
        assert!(carry_from <= retired.len(), "carry start beyond buffer");
        assert!(
            retired.len() - carry_from <= min_capacity,
            "carried bytes exceed requested capacity"
        );

        let (mut fresh, slot) = if let Some(slot) = self.find_reusable(min_capacity) {
            trace!(
                "pool: reusing block {slot} (capacity {}) for {min_capacity}",
                self.blocks[slot].buf.capacity()
            );
            (mem::take(&mut self.blocks[slot].buf), slot)
        } else if self.tail.is_none()
            && self.pos >= carry_from
            && retired.capacity() >= min_capacity
        {
            // Nothing pooled yet and every committed byte was consumed, so
            // the retired buffer can serve as the fresh one.
            trace!("pool: reusing retired buffer in place");
            self.pos -= carry_from;
            retired.copy_within(carry_from.., 0);
            retired.truncate(retired.len() - carry_from);
            return retired;
        } else {
            trace!(
                "pool: allocating {min_capacity} bytes (block {})",
                self.blocks.len()
            );
            self.blocks.push(Block::default());
            (Vec::with_capacity(min_capacity), self.blocks.len() - 1)
        };

        fresh.clear();
        fresh.extend_from_slice(&retired[carry_from..]);
        retired.truncate(carry_from);
        self.intern(slot, retired);
        self.drain();
        fresh
    }

    /// Reports `n` more bytes consumed, reclaiming every block that is now
    /// fully drained.
    pub fn free(&mut self, n: usize) {
        self.pos += n;
        self.drain();
    }

    /// Number of blocks the pool owns.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the pool owns no blocks yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Snapshot of the pool's occupancy.
    pub fn stats(&self) -> PoolStats {
        let mut stats = PoolStats {
            blocks: self.blocks.len(),
            ..PoolStats::default()
        };
        for block in &self.blocks {
            stats.retained += block.buf.capacity();
        }
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            let block = &self.blocks[slot];
            stats.in_flight += 1;
            stats.unconsumed += block.buf.len();
            cursor = block.next;
        }
        if self.tail.is_some() {
            stats.unconsumed -= self.pos;
        }
        stats
    }

    fn find_reusable(&self, min_capacity: usize) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| !b.active && b.buf.capacity() >= min_capacity)
    }

    /// Stores `buf` in `slot` and appends it at the head of the chain.
    /// An empty buffer has nothing to consume and stays out of the chain.
    fn intern(&mut self, slot: usize, buf: Vec<u8>) {
        let active = !buf.is_empty();
        self.blocks[slot] = Block {
            buf,
            next: None,
            active,
        };
        if !active {
            return;
        }
        if let Some(head) = self.head {
            self.blocks[head].next = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    fn drain(&mut self) {
        while let Some(slot) = self.tail {
            let block = &mut self.blocks[slot];
            if self.pos < block.buf.len() {
                break;
            }
            self.pos -= block.buf.len();
            // after this the storage may be handed out again
            block.active = false;
            self.tail = block.next.take();
        }
        if self.tail.is_none() {
            self.head = None;
        }
    }

    #[cfg(test)]
    fn chain(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            out.push(slot);
            cursor = self.blocks[slot].next;
        }
        out
    }
}
