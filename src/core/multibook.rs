//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Fixed registry of independent, per-symbol order books. Each book is
// guarded by its own `parking_lot::Mutex`; there is no global lock, and no
// operation ever holds more than one book's lock at a time.
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

use super::order::{OrderId, Side};
use super::orderbook::{BookSnapshot, OrderBook, OrderBookError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultiBookError {
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error(transparent)]
    Book(#[from] OrderBookError),
}

pub struct MultiBook {
    books: HashMap<String, Mutex<OrderBook>>,
}

impl MultiBook {
    /// Builds a registry with one empty book per symbol.
    pub fn new(symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let books = symbols
            .into_iter()
            .map(|symbol| (symbol.into(), Mutex::new(OrderBook::new())))
            .collect();
        Self { books }
    }

    /// Builds a registry and seeds each book with one matched opening trade
    /// at `opening_price`, so `ltp` is non-null from the start.
    pub fn seeded(seeds: impl IntoIterator<Item = (impl Into<String>, i64)>) -> Self {
        let books: HashMap<String, Mutex<OrderBook>> = seeds
            .into_iter()
            .map(|(symbol, opening_price)| {
                let mut book = OrderBook::new();
                book.submit(Side::Ask, opening_price, 1)
                    .expect("seed ask is well-formed");
                book.submit(Side::Bid, opening_price, 1)
                    .expect("seed bid is well-formed");
                (symbol.into(), Mutex::new(book))
            })
            .collect();
        Self { books }
    }

    pub fn list_symbols(&self) -> Vec<&str> {
        self.books.keys().map(String::as_str).collect()
    }

    fn book(&self, symbol: &str) -> Result<&Mutex<OrderBook>, MultiBookError> {
        self.books
            .get(symbol)
            .ok_or_else(|| MultiBookError::UnknownSymbol(symbol.to_string()))
    }

    pub fn submit(&self, symbol: &str, side: Side, price: i64, quantity: u64) -> Result<OrderId, MultiBookError> {
        let book = self.book(symbol)?;
        Ok(book.lock().submit(side, price, quantity)?)
    }

    pub fn cancel(&self, symbol: &str, id: OrderId) -> Result<(), MultiBookError> {
        let book = self.book(symbol)?;
        Ok(book.lock().cancel(id)?)
    }

    pub fn snapshot(&self, symbol: &str) -> Result<BookSnapshot, MultiBookError> {
        let book = self.book(symbol)?;
        Ok(book.lock().snapshot()?)
    }

    pub fn ltp(&self, symbol: &str) -> Result<Option<i64>, MultiBookError> {
        let book = self.book(symbol)?;
        Ok(book.lock().ltp()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbol_is_rejected() {
        let multi = MultiBook::new(["AAPL"]);
        assert_eq!(
            multi.submit("TSLA", Side::Bid, 100, 1),
            Err(MultiBookError::UnknownSymbol("TSLA".to_string()))
        );
    }

    #[test]
    fn books_are_independent() {
        let multi = MultiBook::new(["AAPL", "TSLA"]);
        multi.submit("AAPL", Side::Bid, 100, 1).unwrap();
        assert!(multi.snapshot("TSLA").unwrap().bids.is_empty());
        assert_eq!(multi.snapshot("AAPL").unwrap().bids.len(), 1);
    }

    #[test]
    fn seeded_books_have_a_non_null_ltp() {
        let multi = MultiBook::seeded([("AAPL", 213), ("TSLA", 249), ("MSFT", 388)]);
        assert_eq!(multi.ltp("AAPL").unwrap(), Some(213));
        assert_eq!(multi.ltp("TSLA").unwrap(), Some(249));
        assert_eq!(multi.ltp("MSFT").unwrap(), Some(388));
    }
}
