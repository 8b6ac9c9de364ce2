use std::sync::Arc;
use std::thread;

use rand::Rng;

use pricetime_engine::{MultiBook, Side};

const THREADS: usize = 8;
const ORDERS_PER_THREAD: usize = 200;
const PRICE_RANGE: i64 = 20;
const BASE_PRICE: i64 = 1_000;

#[test]
fn concurrent_submissions_leave_a_consistent_book() {
    let multi_book = Arc::new(MultiBook::new(["AAPL"]));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let multi_book = multi_book.clone();
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..ORDERS_PER_THREAD {
                    let side = if rng.r#gen::<bool>() { Side::Bid } else { Side::Ask };
                    let offset = rng.gen_range(-PRICE_RANGE..=PRICE_RANGE);
                    let price = BASE_PRICE + offset;
                    let quantity = rng.gen_range(1..=10) as u64;
                    let _ = multi_book.submit("AAPL", side, price, quantity);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = multi_book.snapshot("AAPL").unwrap();

    // invariant 1: never crossed
    if let (Some(bid), Some(ask)) = (snapshot.bids.first(), snapshot.asks.first()) {
        assert!(bid.price < ask.price, "book left crossed: bid {} ask {}", bid.price, ask.price);
    }

    // bids descending, asks ascending
    for pair in snapshot.bids.windows(2) {
        assert!(pair[0].price > pair[1].price);
    }
    for pair in snapshot.asks.windows(2) {
        assert!(pair[0].price < pair[1].price);
    }

    // every resting level holds at least one order and a positive quantity
    for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
        assert!(level.order_count > 0);
        assert!(level.total_quantity > 0);
    }
}

#[test]
fn cancels_interleaved_with_submits_never_panic() {
    let multi_book = Arc::new(MultiBook::new(["TSLA"]));

    let submitter = {
        let multi_book = multi_book.clone();
        thread::spawn(move || {
            let mut ids = Vec::new();
            let mut rng = rand::thread_rng();
            for _ in 0..ORDERS_PER_THREAD {
                let side = if rng.r#gen::<bool>() { Side::Bid } else { Side::Ask };
                let price = BASE_PRICE + rng.gen_range(-PRICE_RANGE..=PRICE_RANGE);
                if let Ok(id) = multi_book.submit("TSLA", side, price, 5) {
                    ids.push(id);
                }
            }
            ids
        })
    };

    let ids = submitter.join().unwrap();

    let canceller = {
        let multi_book = multi_book.clone();
        thread::spawn(move || {
            for id in ids {
                let _ = multi_book.cancel("TSLA", id);
            }
        })
    };
    canceller.join().unwrap();

    // no panics, and the book is still queryable
    let _ = multi_book.snapshot("TSLA").unwrap();
}
