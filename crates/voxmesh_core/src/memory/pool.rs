//! # Scratch Pool
//!
//! Reusable, zero-filled working buffers with scoped release.

use std::ops::{Deref, DerefMut};

use bytemuck::Zeroable;
use parking_lot::Mutex;

/// Counters describing pool activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers currently handed out and not yet released.
    pub outstanding: usize,
    /// Buffers sitting in the free list.
    pub retained: usize,
    /// Fresh heap allocations performed by `acquire`.
    pub allocations: usize,
    /// `acquire` calls served from the free list.
    pub reuses: usize,
}

struct PoolInner<T> {
    /// Released buffers available for reuse.
    free_list: Vec<Vec<T>>,
    stats: PoolStats,
}

/// A pool of scratch buffers.
///
/// Buffers are handed out as [`ScratchBuffer`] guards. Dropping the guard
/// returns the storage to the pool, so every exit path of the caller
/// (including `?` early returns) releases what it acquired.
///
/// # Thread Safety
///
/// The free list sits behind a mutex, so a pool may be shared between
/// threads. Each guard owns its storage exclusively; two concurrent builds
/// never see the same buffer.
///
/// # Example
///
/// ```rust,ignore
/// let pool: ScratchPool<u32> = ScratchPool::new(4);
///
/// let field = pool.acquire(1024);
/// assert!(field.iter().all(|&v| v == 0));
/// drop(field);
///
/// assert_eq!(pool.stats().retained, 1);
/// ```
pub struct ScratchPool<T> {
    inner: Mutex<PoolInner<T>>,
    /// Upper bound on buffers kept in the free list.
    max_retained: usize,
}

impl<T: Zeroable + Copy> ScratchPool<T> {
    /// Creates an empty pool that keeps at most `max_retained` released buffers.
    ///
    /// # Arguments
    ///
    /// * `max_retained` - Buffers beyond this count are freed on release
    #[must_use]
    pub fn new(max_retained: usize) -> Self {
        Self {
            inner: Mutex::new(PoolInner {
                free_list: Vec::with_capacity(max_retained),
                stats: PoolStats::default(),
            }),
            max_retained,
        }
    }

    /// Acquires a zero-filled buffer of exactly `len` elements.
    ///
    /// Picks the smallest retained buffer whose capacity fits; otherwise
    /// allocates a new one rounded up to the next power of two so later
    /// requests of similar size can reuse it.
    pub fn acquire(&self, len: usize) -> ScratchBuffer<'_, T> {
        let recycled = {
            let mut inner = self.inner.lock();
            let best = inner
                .free_list
                .iter()
                .enumerate()
                .filter(|(_, buf)| buf.capacity() >= len)
                .min_by_key(|(_, buf)| buf.capacity())
                .map(|(index, _)| index);

            let recycled = best.map(|index| inner.free_list.swap_remove(index));
            if recycled.is_some() {
                inner.stats.reuses += 1;
            } else {
                inner.stats.allocations += 1;
            }
            inner.stats.outstanding += 1;
            inner.stats.retained = inner.free_list.len();
            recycled
        };

        let mut data = recycled.unwrap_or_else(|| Vec::with_capacity(len.next_power_of_two()));
        data.clear();
        data.resize(len, T::zeroed());

        ScratchBuffer { pool: self, data }
    }

    /// Returns a buffer's storage to the free list.
    fn release(&self, data: Vec<T>) {
        let mut inner = self.inner.lock();
        inner.stats.outstanding = inner.stats.outstanding.saturating_sub(1);
        if inner.free_list.len() < self.max_retained {
            inner.free_list.push(data);
        }
        inner.stats.retained = inner.free_list.len();
    }

    /// Returns a snapshot of the pool counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats
    }

    /// Frees every retained buffer.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.free_list.clear();
        inner.stats.retained = 0;
    }
}

impl<T: Zeroable + Copy> Default for ScratchPool<T> {
    fn default() -> Self {
        Self::new(8)
    }
}

/// A scratch buffer borrowed from a [`ScratchPool`].
///
/// Derefs to a slice. The storage goes back to the pool on drop.
pub struct ScratchBuffer<'pool, T: Zeroable + Copy> {
    pool: &'pool ScratchPool<T>,
    data: Vec<T>,
}

impl<T: Zeroable + Copy> Deref for ScratchBuffer<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: Zeroable + Copy> DerefMut for ScratchBuffer<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Zeroable + Copy> Drop for ScratchBuffer<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_zero_filled() {
        let pool: ScratchPool<u32> = ScratchPool::new(2);

        let mut buf = pool.acquire(16);
        assert_eq!(buf.len(), 16);
        buf.fill(0xDEAD);
        drop(buf);

        // The dirty buffer comes back cleared.
        let buf = pool.acquire(8);
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_release_on_drop() {
        let pool: ScratchPool<u32> = ScratchPool::new(4);

        {
            let _a = pool.acquire(10);
            let _b = pool.acquire(20);
            assert_eq!(pool.stats().outstanding, 2);
        }

        let stats = pool.stats();
        assert_eq!(stats.outstanding, 0);
        assert_eq!(stats.retained, 2);
        assert_eq!(stats.allocations, 2);
    }

    #[test]
    fn test_release_on_early_return() {
        fn build(pool: &ScratchPool<u32>, fail: bool) -> Result<usize, &'static str> {
            let field = pool.acquire(64);
            if fail {
                return Err("bail out");
            }
            Ok(field.len())
        }

        let pool: ScratchPool<u32> = ScratchPool::new(4);
        assert!(build(&pool, true).is_err());
        assert_eq!(pool.stats().outstanding, 0);
        assert_eq!(pool.stats().retained, 1);
    }

    #[test]
    fn test_reuse_smallest_fit() {
        let pool: ScratchPool<u32> = ScratchPool::new(4);

        let big = pool.acquire(1000);
        let small = pool.acquire(10);
        drop(big);
        drop(small);
        assert_eq!(pool.stats().allocations, 2);

        // 10 rounded up to capacity 16, which fits 12 before the 1024 one.
        let again = pool.acquire(12);
        assert_eq!(again.len(), 12);
        assert_eq!(pool.stats().reuses, 1);
        assert_eq!(pool.stats().retained, 1);
    }

    #[test]
    fn test_max_retained() {
        let pool: ScratchPool<u8> = ScratchPool::new(1);

        let a = pool.acquire(4);
        let b = pool.acquire(4);
        drop(a);
        drop(b);

        assert_eq!(pool.stats().retained, 1);
        pool.clear();
        assert_eq!(pool.stats().retained, 0);
    }
}
