use crate::constants::UNRATED_RATING;

/// Immutable identity snapshot of a book, as seen by customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub isbn: i32,
    pub title: String,
    pub author: String,
    pub price: f32,
}

impl Book {
    pub fn new(isbn: i32, title: impl Into<String>, author: impl Into<String>, price: f32) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
        }
    }
}

/// Full view of a stocked record: the identity snapshot plus inventory and
/// rating telemetry.
///
/// `StockBook` serves both directions of the stock-manager contract. As an
/// input to `add_books` it is a candidate (telemetry fields zero); as an
/// output of the stock reads it is a point-in-time snapshot of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct StockBook {
    pub isbn: i32,
    pub title: String,
    pub author: String,
    pub price: f32,
    pub num_copies: i32,
    pub num_sale_misses: i64,
    pub num_times_rated: i64,
    pub total_rating: i64,
    pub editor_pick: bool,
}

impl StockBook {
    /// Build a candidate for `add_books`: fresh telemetry, no curation flag.
    pub fn new(
        isbn: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f32,
        num_copies: i32,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            num_sale_misses: 0,
            num_times_rated: 0,
            total_rating: 0,
            editor_pick: false,
        }
    }

    /// Average of the individual 0-5 ratings, or [`UNRATED_RATING`] while
    /// the record has never been rated. Never stored; always derived.
    pub fn average_rating(&self) -> f32 {
        if self.num_times_rated == 0 {
            UNRATED_RATING
        } else {
            self.total_rating as f32 / self.num_times_rated as f32
        }
    }

    /// Project down to the customer-facing identity snapshot.
    pub fn book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

/// An (ISBN, quantity) pair, used both to buy and to replenish copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookCopy {
    pub isbn: i32,
    pub num_copies: i32,
}

impl BookCopy {
    pub fn new(isbn: i32, num_copies: i32) -> Self {
        Self { isbn, num_copies }
    }
}

/// A single 0-5 rating for one ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookRating {
    pub isbn: i32,
    pub rating: i32,
}

impl BookRating {
    pub fn new(isbn: i32, rating: i32) -> Self {
        Self { isbn, rating }
    }
}

/// Curation flag update for one ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorPick {
    pub isbn: i32,
    pub pick: bool,
}

impl EditorPick {
    pub fn new(isbn: i32, pick: bool) -> Self {
        Self { isbn, pick }
    }
}
