// Rating bounds
pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 5;

/// Reported as the average rating of a record nobody has rated yet.
pub const UNRATED_RATING: f32 = -1.0;

// Default interaction mix for the workload driver. The three percentages
// select between the rare stock-manager, frequent stock-manager, and
// frequent bookstore interactions and must sum to 100.
pub const DEFAULT_PERCENT_RARE_STOCK_MANAGER: f32 = 10.0;
pub const DEFAULT_PERCENT_FREQUENT_STOCK_MANAGER: f32 = 30.0;
pub const DEFAULT_PERCENT_FREQUENT_BOOKSTORE: f32 = 60.0;

// Default workload volumes
pub const DEFAULT_WARM_UP_RUNS: usize = 100;
pub const DEFAULT_NUM_ACTUAL_RUNS: usize = 500;
pub const DEFAULT_NUM_BOOKS_TO_ADD: usize = 5;
pub const DEFAULT_NUM_BOOKS_WITH_LEAST_COPIES: usize = 5;
pub const DEFAULT_NUM_ADD_COPIES: i32 = 10;
pub const DEFAULT_NUM_EDITOR_PICKS_TO_GET: i32 = 10;
pub const DEFAULT_NUM_BOOKS_TO_BUY: usize = 5;
pub const DEFAULT_NUM_BOOK_COPIES_TO_BUY: i32 = 1;
pub const DEFAULT_SEED_BOOKS: usize = 100;

// Candidate generation ranges
pub const GENERATOR_MAX_ISBN: i32 = 1_000_000;
pub const GENERATOR_MIN_PRICE: f32 = 10.0;
pub const GENERATOR_MAX_PRICE: f32 = 100.0;
pub const GENERATOR_MIN_COPIES: i32 = 10;
pub const GENERATOR_MAX_COPIES: i32 = 100;

// Store configuration
pub const DEFAULT_CATALOG_CAPACITY: usize = 1024;
