use pricetime_engine::{OrderBook, Side};

fn trade_pairs(book: &OrderBook) -> Vec<(u64, i64)> {
    book.trades().iter().map(|t| (t.quantity, t.price)).collect()
}

#[test]
fn scenario_a_fifo_across_levels_with_residual() {
    // `submit` runs `match_all` after every call, so the `Ask 100x6` below
    // crosses the resting bids (102, then 101, then the head of 100)
    // immediately, well before the aggressive `Bid 102x14` is submitted.
    // See DESIGN.md for the full trade-by-trade trace.
    let mut book = OrderBook::new();
    book.submit(Side::Bid, 100, 5).unwrap();
    book.submit(Side::Bid, 101, 3).unwrap();
    book.submit(Side::Bid, 100, 4).unwrap();
    book.submit(Side::Bid, 102, 2).unwrap();
    book.submit(Side::Ask, 100, 6).unwrap();
    book.submit(Side::Ask, 101, 5).unwrap();
    book.submit(Side::Ask, 102, 3).unwrap();

    book.submit(Side::Bid, 102, 14).unwrap();

    assert_eq!(
        trade_pairs(&book),
        vec![(2, 100), (3, 100), (1, 100), (5, 101), (3, 102)]
    );
    assert_eq!(book.ltp().unwrap(), Some(102));

    let snapshot = book.snapshot().unwrap();
    assert!(snapshot.asks.is_empty());
    assert_eq!(snapshot.bids.len(), 2);
    assert_eq!(snapshot.bids[0].price, 102);
    assert_eq!(snapshot.bids[0].total_quantity, 6);
    assert_eq!(snapshot.bids[1].price, 100);
    assert_eq!(snapshot.bids[1].total_quantity, 8);
}

#[test]
fn scenario_b_cancel_before_match() {
    let mut book = OrderBook::new();
    let id = book.submit(Side::Bid, 100, 10).unwrap();
    book.cancel(id).unwrap();
    let ask_id = book.submit(Side::Ask, 100, 10).unwrap();

    assert!(book.trades().is_empty());
    assert!(book.ltp().unwrap().is_none());
    let snapshot = book.snapshot().unwrap();
    assert!(snapshot.bids.is_empty());
    assert_eq!(
        snapshot.asks,
        vec![pricetime_engine::PriceLevelView {
            price: 100,
            total_quantity: 10,
            order_count: 1,
            orders: vec![pricetime_engine::OrderView { order_id: ask_id, quantity: 10 }],
        }]
    );
}

#[test]
fn scenario_c_crosses_two_ask_levels() {
    let mut book = OrderBook::new();
    book.submit(Side::Ask, 100, 5).unwrap();
    book.submit(Side::Ask, 101, 5).unwrap();

    book.submit(Side::Bid, 101, 8).unwrap();

    assert_eq!(trade_pairs(&book), vec![(5, 100), (3, 101)]);
    assert_eq!(book.ltp().unwrap(), Some(101));
    let snapshot = book.snapshot().unwrap();
    assert_eq!(snapshot.asks.len(), 1);
    assert_eq!(snapshot.asks[0].price, 101);
    assert_eq!(snapshot.asks[0].total_quantity, 2);
}

#[test]
fn scenario_d_partial_fill_leaves_residual_resting() {
    let mut book = OrderBook::new();
    book.submit(Side::Ask, 50, 3).unwrap();
    book.submit(Side::Bid, 50, 10).unwrap();

    assert_eq!(trade_pairs(&book), vec![(3, 50)]);
    assert_eq!(book.ltp().unwrap(), Some(50));
    let snapshot = book.snapshot().unwrap();
    assert!(snapshot.asks.is_empty());
    assert_eq!(snapshot.bids[0].total_quantity, 7);
}

#[test]
fn scenario_e_no_cross_due_to_price() {
    let mut book = OrderBook::new();
    book.submit(Side::Bid, 99, 5).unwrap();
    book.submit(Side::Ask, 101, 5).unwrap();

    assert!(book.trades().is_empty());
    assert_eq!(book.best_bid(), Some(99));
    assert_eq!(book.best_ask(), Some(101));
}

#[test]
fn cancel_is_idempotent() {
    let mut book = OrderBook::new();
    let id = book.submit(Side::Bid, 100, 10).unwrap();
    book.cancel(id).unwrap();
    assert!(book.cancel(id).is_err());
}

#[test]
fn draining_a_level_frees_it_for_reinsertion() {
    let mut book = OrderBook::new();
    let id = book.submit(Side::Bid, 100, 5).unwrap();
    book.cancel(id).unwrap();
    assert!(book.best_bid().is_none());

    book.submit(Side::Bid, 100, 7).unwrap();
    assert_eq!(book.best_bid(), Some(100));
    let snapshot = book.snapshot().unwrap();
    assert_eq!(snapshot.bids[0].total_quantity, 7);
}
