//! # Memory Management
//!
//! Pooled scratch buffers for per-build working memory.
//!
//! ## Design Philosophy
//!
//! Buffers are acquired at the start of a build and handed back when the
//! guard goes out of scope:
//! - No manual free calls
//! - Early `?` returns release everything they acquired
//! - Reused buffers are zero-filled before being handed out

mod pool;

pub use pool::{PoolStats, ScratchBuffer, ScratchPool};
