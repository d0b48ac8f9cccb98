use crate::error::{CacheError, Result};
use crate::recency_list::RecencyList;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tracing::{debug, trace, warn};

// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 1 << 16;

/// The core trait that defines the behavior of a cache implementation.
///
/// Every method takes `&self`, so one cache can be shared between threads
/// behind an `Arc` and used through `dyn Cache<K, V>`.
pub trait Cache<K, V>: Send + Sync {
    /// Retrieves a clone of the value stored under `key` and marks the entry
    /// as most recently used.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key exists
    /// * `None` if the key doesn't exist
    fn get(&self, key: &K) -> Option<V>;

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key already exists, its value is replaced. If the cache is full,
    /// the least recently used entry is evicted to make space.
    fn put(&self, key: K, value: V);

    /// Removes an entry from the cache by its key.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key existed (returns the removed value)
    /// * `None` if the key didn't exist
    fn remove(&self, key: &K) -> Option<V>;

    /// Returns the number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries from the cache.
    fn clear(&self);

    /// Returns the maximum number of entries the cache holds.
    fn capacity(&self) -> usize;
}

/// A thread-safe, fixed-capacity LRU cache.
///
/// A `HashMap` maps each key to a slot in an arena-backed doubly linked list
/// that keeps entries in recency order, giving O(1) `get`, `put` and
/// eviction. Both structures sit behind a single mutex: every operation,
/// reads included, holds the lock for its whole duration because a read
/// reorders the list.
///
/// # Examples
///
/// ```rust
/// use sync_lru::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put("a".to_string(), 1);
/// cache.put("b".to_string(), 2);
/// assert_eq!(cache.get("a"), Some(1));
///
/// // "b" is now the least recently used entry
/// cache.put("d".to_string(), 4);
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.get("a"), Some(1));
/// ```
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    state: Mutex<State<K, V>>,
}

struct State<K, V> {
    map: HashMap<K, usize>,
    list: RecencyList<K, V>,
}

impl<K, V> State<K, V>
where
    K: Hash + Eq + Clone,
{
    // Looks up `key` and promotes it to the head of the list.
    fn touch<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.list.move_to_front(idx);
        self.list.get_mut(idx)
    }

    fn insert(&mut self, key: K, value: V, capacity: usize) {
        if let Some(slot) = self.touch(&key) {
            *slot = value;
            return;
        }

        if self.list.len() >= capacity {
            self.evict();
        }

        let idx = self.list.push_front(key.clone(), value);
        self.map.insert(key, idx);
    }

    fn evict(&mut self) {
        if let Some((key, _)) = self.list.pop_back() {
            self.map.remove(&key);
            trace!(len = self.list.len(), "evicted least recently used entry");
        }
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        let (_, value) = self.list.remove(idx)?;
        trace!(len = self.list.len(), "removed entry");
        Some(value)
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is 0.
    ///
    /// ```rust
    /// use sync_lru::{CacheError, LruCache};
    ///
    /// let err = LruCache::<u64, String>::new(0).unwrap_err();
    /// assert_eq!(err, CacheError::InvalidCapacity { capacity: 0 });
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(Self::with_capacity(capacity)),
            None => {
                warn!(capacity, "rejecting lru cache without room for an entry");
                Err(CacheError::InvalidCapacity { capacity })
            }
        }
    }

    /// Creates an empty cache from a capacity that is known to be positive.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!(capacity = capacity.get(), "creating lru cache");
        let reserved = capacity.get().min(MAX_PREALLOCATED);
        Self {
            capacity,
            state: Mutex::new(State {
                map: HashMap::with_capacity(reserved),
                list: RecencyList::with_capacity(reserved),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Retrieves a clone of the value stored under `key`, marking the entry
    /// as most recently used. A miss changes nothing.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let mut state = self.state.lock();
        state.touch(key).cloned()
    }

    /// Inserts or replaces the value for `key` and marks it as most recently
    /// used.
    ///
    /// A new key arriving at a full cache evicts exactly one entry, the least
    /// recently used one. Replacing an existing key never evicts.
    pub fn put(&self, key: K, value: V) {
        let mut state = self.state.lock();
        state.insert(key, value, self.capacity.get());
    }

    /// Retrieves a clone of the value without touching the recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let state = self.state.lock();
        let idx = *state.map.get(key)?;
        state.list.get(idx).cloned()
    }

    /// Checks for `key` without touching the recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.lock().map.contains_key(key)
    }

    /// Removes `key` and returns its value, if present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().list.is_empty()
    }

    /// Drops every entry. The capacity is unchanged.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.list.len();
        state.map.clear();
        state.list.clear();
        debug!(dropped, "cleared lru cache");
    }

    /// Snapshot of the keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        let state = self.state.lock();
        state.list.iter().map(|(key, _)| key.clone()).collect()
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let state = self.state.lock();
        state.list.assert_consistent();
        assert_eq!(state.map.len(), state.list.len());
        assert!(state.list.len() <= self.capacity.get());
        for (key, &idx) in &state.map {
            assert!(
                state.list.key_at(idx) == Some(key),
                "map points at a slot holding another key"
            );
        }
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.get(key)
    }

    fn put(&self, key: K, value: V) {
        self.put(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn clear(&self) {
        self.clear()
    }

    fn capacity(&self) -> usize {
        self.capacity()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.state.lock().list.len())
            .finish()
    }
}
