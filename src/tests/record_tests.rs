use crate::constants::UNRATED_RATING;
use crate::core::book::StockBook;
use crate::core::record::BookRecord;

fn candidate() -> StockBook {
    let mut book = StockBook::new(3044560, "Harry Potter and JUnit", "JK Unit", 10.0, 5);
    book.editor_pick = true;
    book
}

#[test]
fn test_new_record_honors_inventory_and_pick() {
    let record = BookRecord::new(&candidate());

    assert_eq!(record.isbn(), 3044560);
    assert_eq!(record.num_copies(), 5);
    assert!(record.editor_pick());
}

#[test]
fn test_new_record_zeroes_telemetry() {
    // A candidate claiming prior telemetry does not smuggle it in.
    let mut dirty = candidate();
    dirty.num_sale_misses = 9;
    dirty.num_times_rated = 9;
    dirty.total_rating = 45;

    let record = BookRecord::new(&dirty);
    let snapshot = record.stock_book();

    assert_eq!(snapshot.num_sale_misses, 0);
    assert_eq!(snapshot.num_times_rated, 0);
    assert_eq!(snapshot.total_rating, 0);
}

#[test]
fn test_copies_in_stock() {
    let record = BookRecord::new(&candidate());

    assert!(record.copies_in_stock(0));
    assert!(record.copies_in_stock(5));
    assert!(!record.copies_in_stock(6));
}

#[test]
fn test_buy_and_add_copies() {
    let mut record = BookRecord::new(&candidate());

    record.buy_copies(3);
    assert_eq!(record.num_copies(), 2);

    record.add_copies(4);
    assert_eq!(record.num_copies(), 6);
}

#[test]
fn test_sale_miss_accumulates_shortfall() {
    let mut record = BookRecord::new(&candidate());

    record.add_sale_miss(2);
    record.add_sale_miss(3);
    assert_eq!(record.num_sale_misses(), 5);
}

#[test]
fn test_rating_aggregates() {
    let mut record = BookRecord::new(&candidate());
    assert_eq!(record.stock_book().average_rating(), UNRATED_RATING);

    record.add_rating(4);
    record.add_rating(2);

    let snapshot = record.stock_book();
    assert_eq!(snapshot.num_times_rated, 2);
    assert_eq!(snapshot.total_rating, 6);
    assert!((snapshot.average_rating() - 3.0).abs() < 1e-2);
}

#[test]
fn test_editor_pick_toggle() {
    let mut record = BookRecord::new(&candidate());

    record.set_editor_pick(false);
    assert!(!record.editor_pick());
    record.set_editor_pick(true);
    assert!(record.editor_pick());
}

#[test]
fn test_snapshots_are_detached() {
    let mut record = BookRecord::new(&candidate());
    let before = record.stock_book();

    record.buy_copies(5);
    record.add_rating(5);

    // The earlier snapshot is a value, not a view.
    assert_eq!(before.num_copies, 5);
    assert_eq!(before.num_times_rated, 0);

    let book = record.book();
    assert_eq!(book.isbn, 3044560);
    assert_eq!(book.title, "Harry Potter and JUnit");
}
