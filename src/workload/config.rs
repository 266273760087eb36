use crate::constants::*;
use crate::error::{BookstallError, Result};

/// Tuning knobs for the workload driver.
///
/// Each run draws a uniform percentage in `[0, 100)` and dispatches to one
/// of three interaction classes; the three `percent_*` fields must sum to
/// 100. The frequent bookstore interaction is the measured customer
/// workload.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Runs performed before measurement starts; their counters are
    /// discarded.
    pub warm_up_runs: usize,
    /// Measured runs per worker.
    pub num_actual_runs: usize,

    pub percent_rare_stock_manager: f32,
    pub percent_frequent_stock_manager: f32,
    pub percent_frequent_bookstore: f32,

    /// Candidate titles generated per rare stock interaction.
    pub num_books_to_add: usize,
    /// How many of the least-stocked titles each frequent stock interaction
    /// replenishes.
    pub num_books_with_least_copies: usize,
    /// Copies added per replenished title.
    pub num_add_copies: i32,
    /// Editor picks fetched per customer interaction.
    pub num_editor_picks_to_get: i32,
    /// How many of the fetched picks each customer interaction buys.
    pub num_books_to_buy: usize,
    /// Copies bought per purchased ISBN.
    pub num_book_copies_to_buy: i32,

    /// Worker threads to run.
    pub num_workers: usize,
    /// Titles seeded into the catalog before the workers start.
    pub seed_books: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            warm_up_runs: DEFAULT_WARM_UP_RUNS,
            num_actual_runs: DEFAULT_NUM_ACTUAL_RUNS,
            percent_rare_stock_manager: DEFAULT_PERCENT_RARE_STOCK_MANAGER,
            percent_frequent_stock_manager: DEFAULT_PERCENT_FREQUENT_STOCK_MANAGER,
            percent_frequent_bookstore: DEFAULT_PERCENT_FREQUENT_BOOKSTORE,
            num_books_to_add: DEFAULT_NUM_BOOKS_TO_ADD,
            num_books_with_least_copies: DEFAULT_NUM_BOOKS_WITH_LEAST_COPIES,
            num_add_copies: DEFAULT_NUM_ADD_COPIES,
            num_editor_picks_to_get: DEFAULT_NUM_EDITOR_PICKS_TO_GET,
            num_books_to_buy: DEFAULT_NUM_BOOKS_TO_BUY,
            num_book_copies_to_buy: DEFAULT_NUM_BOOK_COPIES_TO_BUY,
            num_workers: num_cpus::get(),
            seed_books: DEFAULT_SEED_BOOKS,
        }
    }
}

impl WorkloadConfig {
    /// Reject configurations the driver cannot run sensibly.
    pub fn validate(&self) -> Result<()> {
        let sum = self.percent_rare_stock_manager
            + self.percent_frequent_stock_manager
            + self.percent_frequent_bookstore;
        if (sum - 100.0).abs() > f32::EPSILON * 100.0 {
            return Err(BookstallError::InvalidArgument(format!(
                "interaction percentages sum to {sum}, expected 100"
            )));
        }

        if self.percent_rare_stock_manager < 0.0
            || self.percent_frequent_stock_manager < 0.0
            || self.percent_frequent_bookstore < 0.0
        {
            return Err(BookstallError::InvalidArgument(
                "interaction percentages must be non-negative".to_string(),
            ));
        }

        if self.num_actual_runs == 0 {
            return Err(BookstallError::InvalidArgument(
                "num_actual_runs must be positive".to_string(),
            ));
        }

        if self.num_workers == 0 {
            return Err(BookstallError::InvalidArgument(
                "num_workers must be positive".to_string(),
            ));
        }

        if self.num_add_copies < 0 || self.num_editor_picks_to_get < 0
            || self.num_book_copies_to_buy < 0
        {
            return Err(BookstallError::InvalidArgument(
                "per-interaction quantities must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
