//! A thread-safe, fixed-capacity LRU (Least Recently Used) cache.
//!
//! [`LruCache`] keeps at most `capacity` entries. Reading or writing a key
//! makes it the most recently used entry; inserting a new key into a full
//! cache evicts the single entry that has gone untouched the longest.
//!
//! # Features
//!
//! - O(1) `get`, `put` and eviction
//! - Recency list stored in an index arena, no `unsafe`
//! - One `parking_lot` mutex around the whole cache, so every operation is
//!   atomic with respect to the others
//! - Generic over any `Hash + Eq + Clone` key and any value type
//!
//! # Examples
//!
//! ```rust
//! use sync_lru::{Cache, LruCache};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<LruCache<u64, String>> = Arc::new(LruCache::new(1000)?);
//!
//! let writer = {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || cache.put(42, "answer".to_string()))
//! };
//! writer.join().unwrap();
//!
//! assert_eq!(cache.get(&42), Some("answer".to_string()));
//!
//! // The same cache through the trait object seam
//! let shared: Arc<dyn Cache<u64, String>> = cache;
//! assert_eq!(shared.len(), 1);
//! # Ok::<(), sync_lru::CacheError>(())
//! ```

pub mod error;
pub mod lru_cache;
mod recency_list;

pub use error::{CacheError, Result};
pub use lru_cache::{Cache, LruCache};
