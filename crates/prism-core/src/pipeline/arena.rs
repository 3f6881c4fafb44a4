use crate::consts::ARENA_POOL_BUDGET_BYTES;

/// Pool of reusable backing buffers for the sampler's per-frame temporaries.
///
/// One [`ArenaScope`] is opened at the start of each processing tick and
/// dropped at its end. Buffers taken during the tick are recycled back into
/// the pool, and closing the scope trims the pool to
/// [`ARENA_POOL_BUDGET_BYTES`], bounding peak memory across ticks.
#[derive(Debug, Default)]
pub struct FrameArena {
    pool: Vec<Vec<f32>>,
}

impl FrameArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the per-tick scope. All scratch allocation for one frame goes
    /// through the returned guard.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        ArenaScope { arena: self }
    }

    /// Bytes currently held by pooled buffers.
    pub fn pooled_bytes(&self) -> usize {
        self.pool
            .iter()
            .map(|b| b.capacity() * std::mem::size_of::<f32>())
            .sum()
    }

    fn trim(&mut self) {
        // Largest buffers first, so the budget keeps the allocations most
        // worth reusing.
        self.pool.sort_by(|a, b| b.capacity().cmp(&a.capacity()));
        let mut total = 0usize;
        self.pool.retain(|b| {
            total += b.capacity() * std::mem::size_of::<f32>();
            total <= ARENA_POOL_BUDGET_BYTES
        });
    }
}

/// RAII guard for one tick's scratch buffers.
pub struct ArenaScope<'a> {
    arena: &'a mut FrameArena,
}

impl ArenaScope<'_> {
    /// Take a zero-filled buffer of exactly `len` elements, reusing a pooled
    /// allocation when one exists.
    pub fn take(&mut self, len: usize) -> Vec<f32> {
        let mut buf = self.arena.pool.pop().unwrap_or_default();
        buf.clear();
        buf.resize(len, 0.0);
        buf
    }

    /// Return a buffer for reuse by later frames.
    pub fn recycle(&mut self, buf: Vec<f32>) {
        self.arena.pool.push(buf);
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        self.arena.trim();
    }
}
