//! Pure validation predicates shared by both locking disciplines.
//!
//! Every mutating entry point validates its whole batch with these helpers
//! before touching any record, so a rejected call leaves the catalog
//! untouched.

use std::collections::HashSet;

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::core::book::{BookCopy, BookRating, StockBook};
use crate::error::{BookstallError, Result};

pub(crate) fn is_invalid_isbn(isbn: i32) -> bool {
    isbn <= 0
}

pub(crate) fn is_invalid_copies(num_copies: i32) -> bool {
    num_copies < 0
}

pub(crate) fn is_invalid_rating(rating: i32) -> bool {
    !(MIN_RATING..=MAX_RATING).contains(&rating)
}

pub(crate) fn is_empty_text(text: &str) -> bool {
    text.is_empty()
}

pub(crate) fn validate_isbn(isbn: i32) -> Result<()> {
    if is_invalid_isbn(isbn) {
        return Err(BookstallError::InvalidArgument(format!(
            "ISBN {isbn} is invalid"
        )));
    }
    Ok(())
}

/// Validate the identity and inventory fields of an `add_books` candidate.
/// Duplicate detection against the catalog stays with the store, which owns
/// the map.
pub(crate) fn validate_candidate(book: &StockBook) -> Result<()> {
    validate_isbn(book.isbn)?;

    if is_empty_text(&book.title) {
        return Err(BookstallError::InvalidArgument(format!(
            "title of ISBN {} is empty",
            book.isbn
        )));
    }

    if is_empty_text(&book.author) {
        return Err(BookstallError::InvalidArgument(format!(
            "author of ISBN {} is empty",
            book.isbn
        )));
    }

    if is_invalid_copies(book.num_copies) {
        return Err(BookstallError::InvalidArgument(format!(
            "copy count {} of ISBN {} is negative",
            book.num_copies, book.isbn
        )));
    }

    if book.price < 0.0 {
        return Err(BookstallError::InvalidArgument(format!(
            "price {} of ISBN {} is negative",
            book.price, book.isbn
        )));
    }

    Ok(())
}

pub(crate) fn validate_copy_count(copy: &BookCopy) -> Result<()> {
    if is_invalid_copies(copy.num_copies) {
        return Err(BookstallError::InvalidArgument(format!(
            "copy count {} for ISBN {} is negative",
            copy.num_copies, copy.isbn
        )));
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: &BookRating) -> Result<()> {
    if is_invalid_rating(rating.rating) {
        return Err(BookstallError::InvalidArgument(format!(
            "rating {} for ISBN {} is outside {MIN_RATING}..={MAX_RATING}",
            rating.rating, rating.isbn
        )));
    }
    Ok(())
}

/// `k` arguments of the sampling reads must be non-negative.
pub(crate) fn validate_count(what: &str, count: i32) -> Result<()> {
    if count < 0 {
        return Err(BookstallError::InvalidArgument(format!(
            "{what} is {count}, but it must be non-negative"
        )));
    }
    Ok(())
}

/// Batch inputs are sets keyed by ISBN. Returns the first ISBN that appears
/// more than once, if any; callers map it to their error kind.
pub(crate) fn duplicate_in_batch(isbns: impl IntoIterator<Item = i32>) -> Option<i32> {
    let mut seen = HashSet::new();
    for isbn in isbns {
        if !seen.insert(isbn) {
            return Some(isbn);
        }
    }
    None
}

/// The `InvalidArgument` produced for a repeated ISBN in a quantity batch.
pub(crate) fn repeated_isbn(isbn: i32) -> BookstallError {
    BookstallError::InvalidArgument(format!("ISBN {isbn} appears more than once in the request"))
}
