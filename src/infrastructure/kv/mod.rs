//! Key-value store implementations.
//!
//! - [`RedisUrlStore`] - Redis via `ConnectionManager`
//! - [`MemoryUrlStore`] - In-process map for local runs and tests

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryUrlStore;
pub use redis_store::RedisUrlStore;
