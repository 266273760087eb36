use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::core::book::{BookCopy, BookRating, StockBook};
use crate::core::store::{SharedBookStore, SharedStockManager, StoreBuilder};

const TEST_ISBN: i32 = 3044560;

fn variants() -> Vec<(&'static str, SharedBookStore, SharedStockManager)> {
    let (single_client, single_stock) = StoreBuilder::new().single_lock(true).build();
    let (two_client, two_stock) = StoreBuilder::new().build();
    vec![
        ("single_lock", single_client, single_stock),
        ("two_level", two_client, two_stock),
    ]
}

#[test]
fn test_concurrent_buyer_and_adder_balance_out() {
    for (variant, client, stock) in variants() {
        stock
            .add_books(&[StockBook::new(TEST_ISBN, "Balanced", "Author", 10.0, 100)])
            .unwrap();

        let buyer = {
            let client = client.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    client.buy_books(&[BookCopy::new(TEST_ISBN, 1)]).unwrap();
                }
            })
        };
        let adder = {
            let stock = stock.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    stock.add_copies(&[BookCopy::new(TEST_ISBN, 1)]).unwrap();
                }
            })
        };

        buyer.join().unwrap();
        adder.join().unwrap();

        let snapshot = stock.get_books_by_isbn(&[TEST_ISBN]).unwrap();
        assert_eq!(snapshot[0].num_copies, 100, "{variant}");
        assert_eq!(snapshot[0].num_sale_misses, 0, "{variant}");
    }
}

#[test]
fn test_readers_never_observe_partial_cycles() {
    for (variant, client, stock) in variants() {
        stock
            .add_books(&[StockBook::new(TEST_ISBN, "Cycled", "Author", 10.0, 100)])
            .unwrap();

        let done = Arc::new(AtomicBool::new(false));

        let cycler = {
            let client = client.clone();
            let stock = stock.clone();
            let done = done.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    client.buy_books(&[BookCopy::new(TEST_ISBN, 1)]).unwrap();
                    stock.add_copies(&[BookCopy::new(TEST_ISBN, 1)]).unwrap();
                }
                done.store(true, Ordering::Release);
            })
        };

        // Copies only ever sit at 100 or mid-cycle at 99; any other value
        // means a reader saw a partially applied mutation.
        while !done.load(Ordering::Acquire) {
            let snapshot = stock.get_books_by_isbn(&[TEST_ISBN]).unwrap();
            let copies = snapshot[0].num_copies;
            assert!(copies == 99 || copies == 100, "{variant}: saw {copies}");
        }

        cycler.join().unwrap();
        let snapshot = stock.get_books_by_isbn(&[TEST_ISBN]).unwrap();
        assert_eq!(snapshot[0].num_copies, 100, "{variant}");
    }
}

#[test]
fn test_opposite_order_multi_buys_do_not_deadlock() {
    for (variant, client, stock) in variants() {
        stock
            .add_books(&[
                StockBook::new(100, "Low", "Author", 5.0, 1000),
                StockBook::new(200, "High", "Author", 5.0, 1000),
            ])
            .unwrap();

        let forward = {
            let client = client.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    client
                        .buy_books(&[BookCopy::new(100, 1), BookCopy::new(200, 1)])
                        .unwrap();
                }
            })
        };
        let reverse = {
            let client = client.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    client
                        .buy_books(&[BookCopy::new(200, 1), BookCopy::new(100, 1)])
                        .unwrap();
                }
            })
        };

        forward.join().unwrap();
        reverse.join().unwrap();

        let snapshot = stock.get_books_by_isbn(&[100, 200]).unwrap();
        assert_eq!(snapshot[0].num_copies, 800, "{variant}");
        assert_eq!(snapshot[1].num_copies, 800, "{variant}");
    }
}

#[test]
fn test_concurrent_buys_never_oversell() {
    for (variant, client, stock) in variants() {
        stock
            .add_books(&[StockBook::new(TEST_ISBN, "Scarce", "Author", 10.0, 60)])
            .unwrap();

        let mut handles = vec![];
        for _ in 0..4 {
            let client = client.clone();
            handles.push(thread::spawn(move || {
                let mut bought = 0;
                for _ in 0..25 {
                    if client.buy_books(&[BookCopy::new(TEST_ISBN, 1)]).is_ok() {
                        bought += 1;
                    }
                }
                bought
            }));
        }

        let total_bought: i32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        let snapshot = stock.get_books_by_isbn(&[TEST_ISBN]).unwrap();
        assert_eq!(snapshot[0].num_copies, 60 - total_bought, "{variant}");
        assert!(snapshot[0].num_copies >= 0, "{variant}");
        assert_eq!(
            snapshot[0].num_sale_misses as i32,
            100 - total_bought,
            "{variant}"
        );
    }
}

#[test]
fn test_concurrent_adds_of_disjoint_titles() {
    for (variant, _client, stock) in variants() {
        let mut handles = vec![];
        for shard in 0..4 {
            let stock = stock.clone();
            handles.push(thread::spawn(move || {
                let base = 1000 * (shard + 1);
                let books: Vec<StockBook> = (0..25)
                    .map(|offset| {
                        StockBook::new(base + offset, format!("Book {offset}"), "Author", 1.0, 1)
                    })
                    .collect();
                stock.add_books(&books).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stock.get_books().unwrap().len(), 100, "{variant}");
    }
}

#[test]
fn test_concurrent_adds_of_same_title_admit_exactly_one() {
    for (variant, _client, stock) in variants() {
        let mut handles = vec![];
        for _ in 0..4 {
            let stock = stock.clone();
            handles.push(thread::spawn(move || {
                stock
                    .add_books(&[StockBook::new(77, "Contended", "Author", 1.0, 1)])
                    .is_ok()
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();

        assert_eq!(wins, 1, "{variant}");
        assert_eq!(stock.get_books().unwrap().len(), 1, "{variant}");
    }
}

#[test]
fn test_concurrent_ratings_serialize_on_one_isbn() {
    let (client, stock) = StoreBuilder::new().build();
    stock
        .add_books(&[StockBook::new(TEST_ISBN, "Rated", "Author", 10.0, 1)])
        .unwrap();

    let mut handles = vec![];
    for _ in 0..2 {
        let client = client.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                client.rate_books(&[BookRating::new(TEST_ISBN, 4)]).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = stock.get_books_by_isbn(&[TEST_ISBN]).unwrap();
    assert_eq!(snapshot[0].num_times_rated, 100);
    assert_eq!(snapshot[0].total_rating, 400);
    assert!((snapshot[0].average_rating() - 4.0).abs() < 1e-2);
}

#[test]
fn test_full_snapshots_during_structural_changes() {
    for (variant, _client, stock) in variants() {
        let writer = {
            let stock = stock.clone();
            thread::spawn(move || {
                for batch in 0..20 {
                    let base = 100 * (batch + 1);
                    let books: Vec<StockBook> = (0..5)
                        .map(|offset| {
                            StockBook::new(base + offset, format!("Book {offset}"), "Author", 1.0, 1)
                        })
                        .collect();
                    stock.add_books(&books).unwrap();
                }
            })
        };

        // Snapshots taken mid-install only ever contain whole batches.
        for _ in 0..50 {
            let snapshot = stock.get_books().unwrap();
            assert_eq!(snapshot.len() % 5, 0, "{variant}");
        }

        writer.join().unwrap();
        assert_eq!(stock.get_books().unwrap().len(), 100, "{variant}");
    }
}
