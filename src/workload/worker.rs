use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;

use crate::core::book::{BookCopy, StockBook};
use crate::core::store::{SharedBookStore, SharedStockManager};
use crate::error::Result;

use super::config::WorkloadConfig;
use super::generator::BookSetGenerator;

/// Counters reported by one worker after its measured loop.
#[derive(Debug, Clone, Copy)]
pub struct WorkerRunResult {
    pub successful_interactions: usize,
    pub total_runs: usize,
    pub successful_customer_interactions: usize,
    pub total_customer_interactions: usize,
    pub elapsed_ns: u64,
}

/// One workload runner: performs the warm-up loop, then the measured loop,
/// dispatching each run to an interaction class by a uniform percentage
/// draw.
pub struct Worker {
    config: WorkloadConfig,
    book_store: SharedBookStore,
    stock_manager: SharedStockManager,
    generator: BookSetGenerator,
    successful_customer_interactions: usize,
    total_customer_interactions: usize,
}

impl Worker {
    pub fn new(
        config: WorkloadConfig,
        book_store: SharedBookStore,
        stock_manager: SharedStockManager,
    ) -> Self {
        Self {
            config,
            book_store,
            stock_manager,
            generator: BookSetGenerator::new(),
            successful_customer_interactions: 0,
            total_customer_interactions: 0,
        }
    }

    /// Run the configured workload and report the measured counters.
    pub fn run(mut self) -> WorkerRunResult {
        let mut rng = rand::rng();

        for _ in 0..self.config.warm_up_runs {
            let dice = rng.random_range(0.0..100.0);
            let _ = self.run_interaction(dice);
        }

        // Warm-up counters are discarded.
        self.successful_customer_interactions = 0;
        self.total_customer_interactions = 0;

        let mut successful_interactions = 0;
        let start = Instant::now();
        for _ in 0..self.config.num_actual_runs {
            let dice = rng.random_range(0.0..100.0);
            if self.run_interaction(dice) {
                successful_interactions += 1;
            }
        }
        let elapsed_ns = start.elapsed().as_nanos() as u64;

        WorkerRunResult {
            successful_interactions,
            total_runs: self.config.num_actual_runs,
            successful_customer_interactions: self.successful_customer_interactions,
            total_customer_interactions: self.total_customer_interactions,
            elapsed_ns,
        }
    }

    fn run_interaction(&mut self, dice: f32) -> bool {
        if dice < self.config.percent_rare_stock_manager {
            self.rare_stock_manager_interaction().is_ok()
        } else if dice
            < self.config.percent_rare_stock_manager + self.config.percent_frequent_stock_manager
        {
            self.frequent_stock_manager_interaction().is_ok()
        } else {
            self.total_customer_interactions += 1;
            let outcome = self.frequent_bookstore_interaction();
            if outcome.is_ok() {
                self.successful_customer_interactions += 1;
            }
            outcome.is_ok()
        }
    }

    /// New stock acquisition: snapshot the stock, generate candidates, and
    /// add the ones whose ISBNs are not already present.
    fn rare_stock_manager_interaction(&self) -> Result<()> {
        let current_books = self.stock_manager.get_books()?;
        let current_isbns: HashSet<i32> = current_books.iter().map(|book| book.isbn).collect();

        let candidates = self.generator.next_stock_books(self.config.num_books_to_add);
        let books_to_add: Vec<StockBook> = candidates
            .into_iter()
            .filter(|book| !current_isbns.contains(&book.isbn))
            .collect();

        if !books_to_add.is_empty() {
            self.stock_manager.add_books(&books_to_add)?;
        }
        Ok(())
    }

    /// Stock replenishment: find the least-stocked titles and add a fixed
    /// number of copies to each.
    fn frequent_stock_manager_interaction(&self) -> Result<()> {
        let mut books = self.stock_manager.get_books()?;
        books.sort_by_key(|book| book.num_copies);

        let count = self.config.num_books_with_least_copies.min(books.len());
        let restock: Vec<BookCopy> = books[..count]
            .iter()
            .map(|book| BookCopy::new(book.isbn, self.config.num_add_copies))
            .collect();

        if !restock.is_empty() {
            self.stock_manager.add_copies(&restock)?;
        }
        Ok(())
    }

    /// The measured customer workload: fetch editor picks, sample some of
    /// their ISBNs, and buy a fixed number of copies of each.
    fn frequent_bookstore_interaction(&self) -> Result<()> {
        let picks = self
            .book_store
            .get_editor_picks(self.config.num_editor_picks_to_get)?;
        let pick_isbns: HashSet<i32> = picks.iter().map(|book| book.isbn).collect();

        let isbns_to_buy = self
            .generator
            .sample_isbns(&pick_isbns, self.config.num_books_to_buy);
        let orders: Vec<BookCopy> = isbns_to_buy
            .iter()
            .map(|&isbn| BookCopy::new(isbn, self.config.num_book_copies_to_buy))
            .collect();

        if !orders.is_empty() {
            self.book_store.buy_books(&orders)?;
        }
        Ok(())
    }
}
