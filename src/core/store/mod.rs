use std::sync::Arc;

use crate::core::book::{Book, BookCopy, BookRating, EditorPick, StockBook};
use crate::error::Result;

// Re-export public types
pub use self::builder::{StoreBuilder, StoreConfig};
pub use self::single::SingleLockStore;
pub use self::two_level::TwoLevelStore;

// Module declarations
pub mod builder;
pub mod single;
pub mod two_level;

/// The customer-facing contract: browsing, purchasing, and rating.
///
/// Every operation validates its whole input before mutating anything; a
/// failed call leaves the catalog unchanged, except that an aborted
/// purchase still accounts its sale misses.
pub trait BookStore: Send + Sync {
    /// Purchase the requested copies of every listed ISBN, all or nothing.
    ///
    /// If any record holds fewer copies than requested, the shortfall is
    /// added to that record's sale-miss counter, no copies change, and the
    /// call fails with `OutOfStock`.
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()>;

    /// Identity snapshots for the given ISBNs, in ascending ISBN order.
    fn get_books(&self, isbns: &[i32]) -> Result<Vec<Book>>;

    /// Up to `num_books` editor-picked books, sampled uniformly without
    /// replacement. Returns every pick when there are at most `num_books`.
    fn get_editor_picks(&self, num_books: i32) -> Result<Vec<Book>>;

    /// The `num_books` best-rated books: higher average first, ties broken
    /// by more ratings, then by lower ISBN. Unrated books never appear.
    fn get_top_rated_books(&self, num_books: i32) -> Result<Vec<Book>>;

    /// Record one 0-5 rating per listed ISBN.
    fn rate_books(&self, ratings: &[BookRating]) -> Result<()>;
}

/// The operator-facing contract: stock management and inventory inspection.
pub trait StockManager: Send + Sync {
    /// Install new titles. Either every candidate is installed or none.
    fn add_books(&self, books: &[StockBook]) -> Result<()>;

    /// Replenish copies of existing titles.
    fn add_copies(&self, copies: &[BookCopy]) -> Result<()>;

    /// Snapshot of the entire stock.
    fn get_books(&self) -> Result<Vec<StockBook>>;

    /// Stock snapshots for the given ISBNs, in ascending ISBN order.
    fn get_books_by_isbn(&self, isbns: &[i32]) -> Result<Vec<StockBook>>;

    /// Set or clear the curation flag on existing titles.
    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()>;

    /// Drop the listed titles. Either every listed ISBN is dropped or none.
    fn remove_books(&self, isbns: &[i32]) -> Result<()>;

    /// Drop the entire catalog.
    fn remove_all_books(&self) -> Result<()>;

    /// Every record that has missed at least one sale.
    fn get_books_in_demand(&self) -> Result<Vec<StockBook>>;
}

/// Shared handle to a store's customer contract.
pub type SharedBookStore = Arc<dyn BookStore>;

/// Shared handle to a store's operator contract.
pub type SharedStockManager = Arc<dyn StockManager>;

/// Uniform sample of `num_books` distinct picks; everything when the pick
/// set is no larger than that. The result carries no ordering guarantee.
pub(crate) fn sample_picks(picks: Vec<Book>, num_books: usize) -> Vec<Book> {
    if picks.len() <= num_books {
        return picks;
    }

    let mut rng = rand::rng();
    rand::seq::index::sample(&mut rng, picks.len(), num_books)
        .iter()
        .map(|index| picks[index].clone())
        .collect()
}
