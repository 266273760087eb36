use std::sync::Arc;

use crate::constants::DEFAULT_CATALOG_CAPACITY;

use super::{SharedBookStore, SharedStockManager, SingleLockStore, TwoLevelStore};

/// Configuration options for a catalog store.
///
/// Use `StoreBuilder` for a more ergonomic way to configure the store.
pub struct StoreConfig {
    /// Selects the locking discipline: one global read-write lock when
    /// `true`, the two-level intention + per-record discipline otherwise.
    pub single_lock: bool,
    /// Initial capacity of the catalog map.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            single_lock: false,
            capacity: DEFAULT_CATALOG_CAPACITY,
        }
    }
}

/// Builder for creating a catalog store with custom configuration.
///
/// Both locking disciplines expose the same two contracts; `build` hands
/// back one handle per contract, both backed by the same store.
///
/// # Example
///
/// ```rust
/// use bookstall::{StockBook, StoreBuilder};
///
/// # fn main() -> bookstall::Result<()> {
/// let (client, stock) = StoreBuilder::new().single_lock(true).build();
/// stock.add_books(&[StockBook::new(1, "Title", "Author", 12.0, 3)])?;
/// assert_eq!(client.get_books(&[1])?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct StoreBuilder {
    single_lock: bool,
    capacity: usize,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            single_lock: false,
            capacity: DEFAULT_CATALOG_CAPACITY,
        }
    }

    /// Select the single global read-write lock discipline instead of the
    /// default two-level one. Both produce the same visible semantics; the
    /// single-lock variant additionally declares the rating operations
    /// unsupported.
    pub fn single_lock(mut self, enable: bool) -> Self {
        self.single_lock = enable;
        self
    }

    /// Set the initial capacity of the catalog map.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build the store and return its two client handles.
    pub fn build(self) -> (SharedBookStore, SharedStockManager) {
        let config = StoreConfig {
            single_lock: self.single_lock,
            capacity: self.capacity,
        };

        if config.single_lock {
            let store = Arc::new(SingleLockStore::with_config(config));
            (store.clone() as SharedBookStore, store as SharedStockManager)
        } else {
            let store = Arc::new(TwoLevelStore::with_config(config));
            (store.clone() as SharedBookStore, store as SharedStockManager)
        }
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
