use std::cmp::Ordering;
use std::sync::Arc;

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::core::book::{Book, BookCopy, BookRating, EditorPick, StockBook};
use crate::core::record::BookRecord;
use crate::core::validate;
use crate::error::{BookstallError, Result};
use crate::stats::{Statistics, StatsSnapshot};

use super::{sample_picks, BookStore, StockManager, StoreConfig};

/// A record together with its lock. The lock entry is installed and removed
/// with the record in one map operation, so a stocked ISBN always has a
/// lock and a removed ISBN never leaves one behind.
type RecordCell = Arc<RwLock<BookRecord>>;

/// The two-level discipline: a global intention lock plus one read-write
/// lock per record.
///
/// Structural changes (installing or dropping titles) take the intention
/// lock exclusively and touch no per-record lock. Everything else takes it
/// shared and then locks the affected records, always in ascending ISBN
/// order; since every call site uses the same total order, lock cycles
/// cannot form. Whole-catalog reads snapshot one record at a time: the
/// shared intention guard keeps the set of titles stable while individual
/// records keep moving underneath.
pub struct TwoLevelStore {
    intent: RwLock<()>,
    books: DashMap<i32, RecordCell, RandomState>,
    stats: Arc<Statistics>,
}

impl TwoLevelStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            intent: RwLock::new(()),
            books: DashMap::with_capacity_and_hasher(config.capacity, RandomState::new()),
            stats: Arc::new(Statistics::new()),
        }
    }

    /// Get a statistics snapshot
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of titles in the catalog
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Check if a title is stocked
    pub fn contains(&self, isbn: i32) -> bool {
        self.books.contains_key(&isbn)
    }

    /// Clone the cell for a stocked ISBN. Callers hold the intention lock
    /// in some mode, so the entry cannot disappear between this lookup and
    /// the per-record lock acquisition.
    fn cell(&self, isbn: i32) -> Result<RecordCell> {
        let entry = self
            .books
            .get(&isbn)
            .ok_or(BookstallError::NotInStock(isbn))?;
        Ok(Arc::clone(entry.value()))
    }
}

impl Default for TwoLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-rated first: higher average rating, then more ratings, then lower
/// ISBN. Averages are compared by integer cross-multiplication so equal
/// averages are exact ties rather than float noise.
fn top_rated_order(a: &StockBook, b: &StockBook) -> Ordering {
    let cross_a = a.total_rating as i128 * b.num_times_rated as i128;
    let cross_b = b.total_rating as i128 * a.num_times_rated as i128;
    cross_b
        .cmp(&cross_a)
        .then(b.num_times_rated.cmp(&a.num_times_rated))
        .then(a.isbn.cmp(&b.isbn))
}

impl BookStore for TwoLevelStore {
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(orders.iter().map(|order| order.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut pairs = Vec::with_capacity(orders.len());
        for order in orders {
            validate::validate_isbn(order.isbn)?;
            let cell = self.cell(order.isbn)?;
            validate::validate_copy_count(order)?;
            pairs.push((*order, cell));
        }

        // Ascending-ISBN acquisition keeps concurrent multi-record buys
        // deadlock free.
        pairs.sort_unstable_by_key(|(order, _)| order.isbn);
        let mut guards: Vec<_> = pairs.iter().map(|(_, cell)| cell.write()).collect();

        // Shortfalls are collected for the whole request before any decision.
        let mut misses: Vec<(usize, i32)> = Vec::new();
        for (index, (order, _)) in pairs.iter().enumerate() {
            let record = &guards[index];
            if !record.copies_in_stock(order.num_copies) {
                misses.push((index, order.num_copies - record.num_copies()));
            }
        }

        // An aborted purchase still persists its sale misses; copies stay
        // untouched.
        if !misses.is_empty() {
            let mut total_misses = 0u64;
            for &(index, shortfall) in &misses {
                guards[index].add_sale_miss(shortfall);
                total_misses += shortfall as u64;
            }
            let first_isbn = pairs[misses[0].0].0.isbn;
            self.stats.record_failed_buy(total_misses);
            return Err(BookstallError::OutOfStock(first_isbn));
        }

        let mut copies_sold = 0u64;
        for (index, (order, _)) in pairs.iter().enumerate() {
            guards[index].buy_copies(order.num_copies);
            copies_sold += order.num_copies as u64;
        }
        self.stats.record_buy(copies_sold);
        Ok(())
    }

    fn get_books(&self, isbns: &[i32]) -> Result<Vec<Book>> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut cells = Vec::with_capacity(isbns.len());
        for &isbn in isbns {
            validate::validate_isbn(isbn)?;
            cells.push((isbn, self.cell(isbn)?));
        }

        cells.sort_unstable_by_key(|(isbn, _)| *isbn);
        let guards: Vec<_> = cells.iter().map(|(_, cell)| cell.read()).collect();

        let snapshots = guards.iter().map(|record| record.book()).collect();
        self.stats.record_catalog_read();
        Ok(snapshots)
    }

    fn get_editor_picks(&self, num_books: i32) -> Result<Vec<Book>> {
        let _intent = self.intent.read();
        validate::validate_count("num_books", num_books)?;

        let picks: Vec<Book> = self
            .books
            .iter()
            .filter_map(|entry| {
                let record = entry.value().read();
                record.editor_pick().then(|| record.book())
            })
            .collect();

        self.stats.record_catalog_read();
        Ok(sample_picks(picks, num_books as usize))
    }

    fn get_top_rated_books(&self, num_books: i32) -> Result<Vec<Book>> {
        let _intent = self.intent.read();
        validate::validate_count("num_books", num_books)?;

        let mut rated: Vec<StockBook> = self
            .books
            .iter()
            .filter_map(|entry| {
                let record = entry.value().read();
                (record.num_times_rated() > 0).then(|| record.stock_book())
            })
            .collect();

        rated.sort_unstable_by(top_rated_order);
        rated.truncate(num_books as usize);

        self.stats.record_catalog_read();
        Ok(rated.iter().map(|book| book.book()).collect())
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(ratings.iter().map(|rating| rating.isbn))
        {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut pairs = Vec::with_capacity(ratings.len());
        for rating in ratings {
            validate::validate_isbn(rating.isbn)?;
            let cell = self.cell(rating.isbn)?;
            validate::validate_rating(rating)?;
            pairs.push((*rating, cell));
        }

        pairs.sort_unstable_by_key(|(rating, _)| rating.isbn);
        let mut guards: Vec<_> = pairs.iter().map(|(_, cell)| cell.write()).collect();

        for (index, (rating, _)) in pairs.iter().enumerate() {
            guards[index].add_rating(rating.rating);
        }
        self.stats.record_ratings(ratings.len() as u64);
        Ok(())
    }
}

impl StockManager for TwoLevelStore {
    fn add_books(&self, new_books: &[StockBook]) -> Result<()> {
        let _intent = self.intent.write();

        if let Some(isbn) = validate::duplicate_in_batch(new_books.iter().map(|book| book.isbn)) {
            return Err(BookstallError::Duplicate(isbn));
        }

        for candidate in new_books {
            validate::validate_candidate(candidate)?;
            if self.books.contains_key(&candidate.isbn) {
                return Err(BookstallError::Duplicate(candidate.isbn));
            }
        }

        for candidate in new_books {
            self.books.insert(
                candidate.isbn,
                Arc::new(RwLock::new(BookRecord::new(candidate))),
            );
        }
        self.stats.record_books_added(new_books.len() as u64);
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(copies.iter().map(|copy| copy.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut pairs = Vec::with_capacity(copies.len());
        for copy in copies {
            validate::validate_isbn(copy.isbn)?;
            let cell = self.cell(copy.isbn)?;
            validate::validate_copy_count(copy)?;
            pairs.push((*copy, cell));
        }

        pairs.sort_unstable_by_key(|(copy, _)| copy.isbn);
        let mut guards: Vec<_> = pairs.iter().map(|(_, cell)| cell.write()).collect();

        let mut copies_added = 0u64;
        for (index, (copy, _)) in pairs.iter().enumerate() {
            guards[index].add_copies(copy.num_copies);
            copies_added += copy.num_copies as u64;
        }
        self.stats.record_copies_added(copies_added);
        Ok(())
    }

    fn get_books(&self) -> Result<Vec<StockBook>> {
        let _intent = self.intent.read();

        let snapshot = self
            .books
            .iter()
            .map(|entry| entry.value().read().stock_book())
            .collect();

        self.stats.record_stock_read();
        Ok(snapshot)
    }

    fn get_books_by_isbn(&self, isbns: &[i32]) -> Result<Vec<StockBook>> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut cells = Vec::with_capacity(isbns.len());
        for &isbn in isbns {
            validate::validate_isbn(isbn)?;
            cells.push((isbn, self.cell(isbn)?));
        }

        cells.sort_unstable_by_key(|(isbn, _)| *isbn);
        let guards: Vec<_> = cells.iter().map(|(_, cell)| cell.read()).collect();

        let snapshots = guards.iter().map(|record| record.stock_book()).collect();
        self.stats.record_stock_read();
        Ok(snapshots)
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()> {
        let _intent = self.intent.read();

        if let Some(isbn) = validate::duplicate_in_batch(picks.iter().map(|pick| pick.isbn)) {
            return Err(validate::repeated_isbn(isbn));
        }

        let mut pairs = Vec::with_capacity(picks.len());
        for pick in picks {
            validate::validate_isbn(pick.isbn)?;
            let cell = self.cell(pick.isbn)?;
            pairs.push((*pick, cell));
        }

        pairs.sort_unstable_by_key(|(pick, _)| pick.isbn);
        let mut guards: Vec<_> = pairs.iter().map(|(_, cell)| cell.write()).collect();

        for (index, (pick, _)) in pairs.iter().enumerate() {
            guards[index].set_editor_pick(pick.pick);
        }
        self.stats.record_editor_pick_updates(picks.len() as u64);
        Ok(())
    }

    fn remove_books(&self, isbns: &[i32]) -> Result<()> {
        let _intent = self.intent.write();

        if let Some(isbn) = validate::duplicate_in_batch(isbns.iter().copied()) {
            return Err(validate::repeated_isbn(isbn));
        }

        for &isbn in isbns {
            validate::validate_isbn(isbn)?;
            if !self.books.contains_key(&isbn) {
                return Err(BookstallError::NotInStock(isbn));
            }
        }

        // Dropping the entry drops the record and its lock together.
        for &isbn in isbns {
            self.books.remove(&isbn);
        }
        self.stats.record_books_removed(isbns.len() as u64);
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let _intent = self.intent.write();
        let removed = self.books.len() as u64;
        self.books.clear();
        self.stats.record_books_removed(removed);
        Ok(())
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let _intent = self.intent.read();

        let in_demand = self
            .books
            .iter()
            .filter_map(|entry| {
                let record = entry.value().read();
                (record.num_sale_misses() > 0).then(|| record.stock_book())
            })
            .collect();

        self.stats.record_stock_read();
        Ok(in_demand)
    }
}
