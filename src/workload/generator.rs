use std::collections::HashSet;

use rand::Rng;

use crate::constants::*;
use crate::core::book::StockBook;

/// Generates candidate stock books and ISBN samples for the workload
/// driver.
///
/// Generated candidates always satisfy the catalog validator. ISBN
/// uniqueness is best effort: a batch never repeats an ISBN, but two
/// batches may collide, so callers filter candidates against the current
/// stock before adding them.
#[derive(Debug, Default)]
pub struct BookSetGenerator;

impl BookSetGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `num` candidate titles with randomized identity, price,
    /// inventory, and curation flag.
    pub fn next_stock_books(&self, num: usize) -> Vec<StockBook> {
        let mut rng = rand::rng();
        let mut seen = HashSet::with_capacity(num);
        let mut books = Vec::with_capacity(num);

        while books.len() < num {
            let isbn = rng.random_range(1..=GENERATOR_MAX_ISBN);
            if !seen.insert(isbn) {
                continue;
            }

            let mut book = StockBook::new(
                isbn,
                format!("Book {isbn}"),
                format!("Author {}", rng.random_range(0..1000)),
                rng.random_range(GENERATOR_MIN_PRICE..GENERATOR_MAX_PRICE),
                rng.random_range(GENERATOR_MIN_COPIES..=GENERATOR_MAX_COPIES),
            );
            book.editor_pick = rng.random();
            books.push(book);
        }

        books
    }

    /// `num` distinct ISBNs drawn uniformly from the set, or the whole set
    /// when it holds at most `num`.
    pub fn sample_isbns(&self, isbns: &HashSet<i32>, num: usize) -> Vec<i32> {
        let pool: Vec<i32> = isbns.iter().copied().collect();
        if num >= pool.len() {
            return pool;
        }

        let mut rng = rand::rng();
        rand::seq::index::sample(&mut rng, pool.len(), num)
            .iter()
            .map(|index| pool[index])
            .collect()
    }
}
