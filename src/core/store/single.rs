use std::collections::HashMap;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::RwLock;

use crate::core::book::{Book, BookCopy, BookRating, EditorPick, StockBook};
use crate::core::record::BookRecord;
use crate::core::validate;
use crate::error::{BookstallError, Result};
use crate::stats::{Statistics, StatsSnapshot};

use super::{sample_picks, BookStore, StockManager, StoreConfig};

type CatalogMap = HashMap<i32, BookRecord, RandomState>;

/// The single-lock discipline: one global read-write lock around the whole
/// catalog. Reads run under the shared side, every mutation under the
/// exclusive side, so all snapshots are linearizable.
///
/// This variant keeps the rating surface (`rate_books`,
/// `get_top_rated_books`, `get_books_in_demand`) unsupported; use
/// [`TwoLevelStore`](super::TwoLevelStore) for the full contract.
pub struct SingleLockStore {
    books: RwLock<CatalogMap>,
    stats: Arc<Statistics>,
}

impl SingleLockStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig {
            single_lock: true,
            ..StoreConfig::default()
        })
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            books: RwLock::new(CatalogMap::with_capacity_and_hasher(
                config.capacity,
                RandomState::new(),
            )),
            stats: Arc::new(Statistics::new()),
        }
    }

    /// Get a statistics snapshot
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of titles in the catalog
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a title is stocked
    pub fn contains(&self, isbn: i32) -> bool {
        self.books.read().contains_key(&isbn)
    }
}

impl Default for SingleLockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_isbn_in_stock(books: &CatalogMap, isbn: i32) -> Result<()> {
    validate::validate_isbn(isbn)?;
    if !books.contains_key(&isbn) {
        return Err(BookstallError::NotInStock(isbn));
    }
    Ok(())
}

impl BookStore for SingleLockStore {
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()> {
        let mut books = self.books.write();

        if let Some(isbn) = validate::duplicate_in_batch(orders.iter().map(|order| order.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        for order in orders {
            validate_isbn_in_stock(&books, order.isbn)?;
            validate::validate_copy_count(order)?;
        }

        // Shortfalls are collected for the whole request before any decision.
        let mut misses: Vec<(i32, i32)> = Vec::new();
        for order in orders {
            let record = books
                .get(&order.isbn)
                .ok_or(BookstallError::NotInStock(order.isbn))?;
            if !record.copies_in_stock(order.num_copies) {
                misses.push((order.isbn, order.num_copies - record.num_copies()));
            }
        }

        // An aborted purchase still persists its sale misses; copies stay
        // untouched.
        if !misses.is_empty() {
            let mut total_misses = 0u64;
            let mut first_isbn = i32::MAX;
            for &(isbn, shortfall) in &misses {
                books
                    .get_mut(&isbn)
                    .ok_or(BookstallError::NotInStock(isbn))?
                    .add_sale_miss(shortfall);
                total_misses += shortfall as u64;
                first_isbn = first_isbn.min(isbn);
            }
            self.stats.record_failed_buy(total_misses);
            return Err(BookstallError::OutOfStock(first_isbn));
        }

        let mut copies_sold = 0u64;
        for order in orders {
            books
                .get_mut(&order.isbn)
                .ok_or(BookstallError::NotInStock(order.isbn))?
                .buy_copies(order.num_copies);
            copies_sold += order.num_copies as u64;
        }
        self.stats.record_buy(copies_sold);
        Ok(())
    }

    fn get_books(&self, isbns: &[i32]) -> Result<Vec<Book>> {
        let books = self.books.read();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        for &isbn in isbns {
            validate_isbn_in_stock(&books, isbn)?;
        }

        let mut sorted = isbns.to_vec();
        sorted.sort_unstable();

        let mut snapshots = Vec::with_capacity(sorted.len());
        for isbn in sorted {
            snapshots.push(
                books
                    .get(&isbn)
                    .ok_or(BookstallError::NotInStock(isbn))?
                    .book(),
            );
        }
        self.stats.record_catalog_read();
        Ok(snapshots)
    }

    fn get_editor_picks(&self, num_books: i32) -> Result<Vec<Book>> {
        let books = self.books.read();
        validate::validate_count("num_books", num_books)?;

        let picks: Vec<Book> = books
            .values()
            .filter(|record| record.editor_pick())
            .map(|record| record.book())
            .collect();

        self.stats.record_catalog_read();
        Ok(sample_picks(picks, num_books as usize))
    }

    fn get_top_rated_books(&self, _num_books: i32) -> Result<Vec<Book>> {
        Err(BookstallError::Unsupported("get_top_rated_books"))
    }

    fn rate_books(&self, _ratings: &[BookRating]) -> Result<()> {
        Err(BookstallError::Unsupported("rate_books"))
    }
}

impl StockManager for SingleLockStore {
    fn add_books(&self, new_books: &[StockBook]) -> Result<()> {
        let mut books = self.books.write();

        if let Some(isbn) = validate::duplicate_in_batch(new_books.iter().map(|book| book.isbn)) {
            return Err(BookstallError::Duplicate(isbn));
        }

        for candidate in new_books {
            validate::validate_candidate(candidate)?;
            if books.contains_key(&candidate.isbn) {
                return Err(BookstallError::Duplicate(candidate.isbn));
            }
        }

        for candidate in new_books {
            books.insert(candidate.isbn, BookRecord::new(candidate));
        }
        self.stats.record_books_added(new_books.len() as u64);
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let mut books = self.books.write();

        if let Some(isbn) = validate::duplicate_in_batch(copies.iter().map(|copy| copy.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        for copy in copies {
            validate_isbn_in_stock(&books, copy.isbn)?;
            validate::validate_copy_count(copy)?;
        }

        let mut copies_added = 0u64;
        for copy in copies {
            books
                .get_mut(&copy.isbn)
                .ok_or(BookstallError::NotInStock(copy.isbn))?
                .add_copies(copy.num_copies);
            copies_added += copy.num_copies as u64;
        }
        self.stats.record_copies_added(copies_added);
        Ok(())
    }

    fn get_books(&self) -> Result<Vec<StockBook>> {
        let books = self.books.read();
        let snapshot = books.values().map(|record| record.stock_book()).collect();
        self.stats.record_stock_read();
        Ok(snapshot)
    }

    fn get_books_by_isbn(&self, isbns: &[i32]) -> Result<Vec<StockBook>> {
        let books = self.books.read();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        for &isbn in isbns {
            validate_isbn_in_stock(&books, isbn)?;
        }

        let mut sorted = isbns.to_vec();
        sorted.sort_unstable();

        let mut snapshots = Vec::with_capacity(sorted.len());
        for isbn in sorted {
            snapshots.push(
                books
                    .get(&isbn)
                    .ok_or(BookstallError::NotInStock(isbn))?
                    .stock_book(),
            );
        }
        self.stats.record_stock_read();
        Ok(snapshots)
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()> {
        let mut books = self.books.write();

        if let Some(isbn) = validate::duplicate_in_batch(picks.iter().map(|pick| pick.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        for pick in picks {
            validate_isbn_in_stock(&books, pick.isbn)?;
        }

        for pick in picks {
            books
                .get_mut(&pick.isbn)
                .ok_or(BookstallError::NotInStock(pick.isbn))?
                .set_editor_pick(pick.pick);
        }
        self.stats.record_editor_pick_updates(picks.len() as u64);
        Ok(())
    }

    fn remove_books(&self, isbns: &[i32]) -> Result<()> {
        let mut books = self.books.write();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        for &isbn in isbns {
            validate_isbn_in_stock(&books, isbn)?;
        }

        for &isbn in isbns {
            books.remove(&isbn);
        }
        self.stats.record_books_removed(isbns.len() as u64);
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let mut books = self.books.write();
        let removed = books.len() as u64;
        books.clear();
        self.stats.record_books_removed(removed);
        Ok(())
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        Err(BookstallError::Unsupported("get_books_in_demand"))
    }
}
