use std::sync::atomic::{AtomicU64, Ordering};

/// Central statistics hub for a catalog store.
///
/// Counters are telemetry only and never gate an operation; both locking
/// disciplines feed the same hub.
#[derive(Debug, Default)]
pub struct Statistics {
    // Purchases
    pub total_buys: AtomicU64,
    pub failed_buys: AtomicU64,
    pub copies_sold: AtomicU64,
    pub sale_misses: AtomicU64,

    // Stock management
    pub books_added: AtomicU64,
    pub copies_added: AtomicU64,
    pub books_removed: AtomicU64,
    pub editor_pick_updates: AtomicU64,

    // Ratings
    pub ratings_recorded: AtomicU64,

    // Reads
    pub stock_reads: AtomicU64,
    pub catalog_reads: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed purchase of `copies` copies in total.
    pub fn record_buy(&self, copies: u64) {
        self.total_buys.fetch_add(1, Ordering::Relaxed);
        self.copies_sold.fetch_add(copies, Ordering::Relaxed);
    }

    /// Record an aborted purchase and the shortfall it accounted.
    pub fn record_failed_buy(&self, misses: u64) {
        self.failed_buys.fetch_add(1, Ordering::Relaxed);
        self.sale_misses.fetch_add(misses, Ordering::Relaxed);
    }

    pub fn record_books_added(&self, count: u64) {
        self.books_added.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_copies_added(&self, copies: u64) {
        self.copies_added.fetch_add(copies, Ordering::Relaxed);
    }

    pub fn record_books_removed(&self, count: u64) {
        self.books_removed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_editor_pick_updates(&self, count: u64) {
        self.editor_pick_updates.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_ratings(&self, count: u64) {
        self.ratings_recorded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_stock_read(&self) {
        self.stock_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_read(&self) {
        self.catalog_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_buys: self.total_buys.load(Ordering::Relaxed),
            failed_buys: self.failed_buys.load(Ordering::Relaxed),
            copies_sold: self.copies_sold.load(Ordering::Relaxed),
            sale_misses: self.sale_misses.load(Ordering::Relaxed),
            books_added: self.books_added.load(Ordering::Relaxed),
            copies_added: self.copies_added.load(Ordering::Relaxed),
            books_removed: self.books_removed.load(Ordering::Relaxed),
            editor_pick_updates: self.editor_pick_updates.load(Ordering::Relaxed),
            ratings_recorded: self.ratings_recorded.load(Ordering::Relaxed),
            stock_reads: self.stock_reads.load(Ordering::Relaxed),
            catalog_reads: self.catalog_reads.load(Ordering::Relaxed),
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.total_buys.store(0, Ordering::Relaxed);
        self.failed_buys.store(0, Ordering::Relaxed);
        self.copies_sold.store(0, Ordering::Relaxed);
        self.sale_misses.store(0, Ordering::Relaxed);
        self.books_added.store(0, Ordering::Relaxed);
        self.copies_added.store(0, Ordering::Relaxed);
        self.books_removed.store(0, Ordering::Relaxed);
        self.editor_pick_updates.store(0, Ordering::Relaxed);
        self.ratings_recorded.store(0, Ordering::Relaxed);
        self.stock_reads.store(0, Ordering::Relaxed);
        self.catalog_reads.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of statistics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_buys: u64,
    pub failed_buys: u64,
    pub copies_sold: u64,
    pub sale_misses: u64,
    pub books_added: u64,
    pub copies_added: u64,
    pub books_removed: u64,
    pub editor_pick_updates: u64,
    pub ratings_recorded: u64,
    pub stock_reads: u64,
    pub catalog_reads: u64,
}

impl StatsSnapshot {
    /// Format statistics as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "=== Bookstall Statistics ===\n\
            Purchases:\n\
            - Committed: {}\n\
            - Aborted: {}\n\
            - Copies Sold: {}\n\
            - Sale Misses: {}\n\n\
            Stock:\n\
            - Books Added: {}\n\
            - Copies Added: {}\n\
            - Books Removed: {}\n\
            - Editor Pick Updates: {}\n\n\
            Ratings: {}\n\n\
            Reads:\n\
            - Stock Snapshots: {}\n\
            - Catalog Reads: {}",
            self.total_buys,
            self.failed_buys,
            self.copies_sold,
            self.sale_misses,
            self.books_added,
            self.copies_added,
            self.books_removed,
            self.editor_pick_updates,
            self.ratings_recorded,
            self.stock_reads,
            self.catalog_reads
        )
    }
}
