//! # Bookstall - Concurrency-Safe Bookstore Catalog Engine
//!
// Copyright 2025 Bookstall Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bookstall is an in-memory, ISBN-keyed catalog engine built to be hit by
//! many threads at once.
//!
//! ## Features
//!
//! - **Two client contracts**: a customer-facing [`BookStore`] (browse,
//!   purchase, rate) and an operator-facing [`StockManager`] (add titles,
//!   replenish copies, curate, remove, inspect inventory)
//! - **Two locking disciplines**: a single global read-write lock
//!   ([`SingleLockStore`]) and a two-level intention + per-record discipline
//!   ([`TwoLevelStore`]) with identical visible semantics
//! - **Transactional purchases**: `buy_books` is all-or-nothing across its
//!   whole ISBN set, and an aborted purchase still accounts its sale misses
//! - **Deadlock freedom**: multi-record operations acquire per-record locks
//!   in ascending ISBN order
//! - **Statistics**: operation counters with zero contention on the hot path
//! - **Workload driver**: a configurable mixed benchmark over both contracts
//!
//! ## Quick Start
//!
//! ```rust
//! use bookstall::{BookCopy, StockBook, StoreBuilder};
//!
//! # fn main() -> bookstall::Result<()> {
//! let (client, stock) = StoreBuilder::new().build();
//!
//! // Stock a title, then sell some of it.
//! stock.add_books(&[StockBook::new(3044560, "A Certain Book", "An Author", 10.0, 5)])?;
//! client.buy_books(&[BookCopy::new(3044560, 2)])?;
//!
//! let snapshot = stock.get_books_by_isbn(&[3044560])?;
//! assert_eq!(snapshot[0].num_copies, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Picking a Locking Discipline
//!
//! Both disciplines serialize conflicting mutations and keep bulk reads
//! snapshot consistent; they differ in granularity.
//!
//! ```rust
//! use bookstall::StoreBuilder;
//!
//! // One global read-write lock; every snapshot is linearizable.
//! let (client, stock) = StoreBuilder::new().single_lock(true).build();
//!
//! // Intention lock + per-record locks; disjoint ISBN sets do not contend.
//! let (client, stock) = StoreBuilder::new().build();
//! ```
//!
//! The single-lock variant keeps the rating surface (`rate_books`,
//! `get_top_rated_books`, `get_books_in_demand`) unsupported; the two-level
//! variant implements the full contract.
//!
//! ## Transactional Purchases
//!
//! ```rust
//! use bookstall::{BookCopy, BookstallError, StockBook, StoreBuilder};
//!
//! # fn main() -> bookstall::Result<()> {
//! let (client, stock) = StoreBuilder::new().build();
//! stock.add_books(&[StockBook::new(1, "Thin Stock", "An Author", 8.0, 1)])?;
//!
//! // Asking for more copies than exist aborts the whole purchase and
//! // records the shortfall as a sale miss.
//! let result = client.buy_books(&[BookCopy::new(1, 3)]);
//! assert_eq!(result, Err(BookstallError::OutOfStock(1)));
//!
//! let snapshot = stock.get_books_by_isbn(&[1])?;
//! assert_eq!(snapshot[0].num_copies, 1);
//! assert_eq!(snapshot[0].num_sale_misses, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Both stores are `Send + Sync`; the builder hands back `Arc`ed trait
//! handles that clone cheaply into worker threads.
//!
//! ```rust
//! use bookstall::{BookCopy, StockBook, StoreBuilder};
//! use std::thread;
//!
//! # fn main() -> bookstall::Result<()> {
//! let (client, stock) = StoreBuilder::new().build();
//! stock.add_books(&[StockBook::new(7, "Hot Title", "An Author", 15.0, 100)])?;
//!
//! let mut handles = vec![];
//! for _ in 0..4 {
//!     let client = client.clone();
//!     handles.push(thread::spawn(move || {
//!         for _ in 0..25 {
//!             client.buy_books(&[BookCopy::new(7, 1)]).unwrap();
//!         }
//!     }));
//! }
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(stock.get_books_by_isbn(&[7])?[0].num_copies, 0);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod core;
pub mod error;
pub mod stats;
pub mod workload;

pub use core::book::{Book, BookCopy, BookRating, EditorPick, StockBook};
pub use core::store::{
    BookStore, SharedBookStore, SharedStockManager, SingleLockStore, StockManager, StoreBuilder,
    StoreConfig, TwoLevelStore,
};
pub use error::{BookstallError, Result};
pub use stats::{Statistics, StatsSnapshot};

#[cfg(test)]
mod tests;
