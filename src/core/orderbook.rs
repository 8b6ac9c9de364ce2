//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Single-security limit order book: submit, cancel, snapshot, last traded
// price, and the internal continuous matching loop. Callers are expected to
// hold an external mutex for the duration of any of these calls (see
// `core::multibook`) — nothing in here synchronizes internally.
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use slab::Slab;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::level_queue::OrderNode;
use super::order::{next_order_id, Order, OrderId, Side, Trade};
use super::price_index::PriceIndex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderBookError {
    #[error("price must be positive")]
    InvalidPrice,
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("order type {0:?} is not supported by this order book")]
    UnsupportedOrderType(super::order::OrderType),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("book is poisoned after an earlier invariant violation")]
    Poisoned,
}

/// A consistent point-in-time view of resting liquidity on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSnapshot {
    /// Descending by price: best bid first.
    pub bids: Vec<PriceLevelView>,
    /// Ascending by price: best ask first.
    pub asks: Vec<PriceLevelView>,
    pub ltp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevelView {
    pub price: i64,
    pub total_quantity: u64,
    pub order_count: usize,
    /// Per-order breakdown at this level, oldest (head of the FIFO) first.
    /// Carries each resting order's id alongside its price and quantity.
    pub orders: Vec<OrderView>,
}

/// One resting order's contribution to a `PriceLevelView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderView {
    pub order_id: OrderId,
    pub quantity: u64,
}

struct OrderLocation {
    side: Side,
    price: i64,
    arena_key: usize,
}

pub struct OrderBook {
    bids: PriceIndex,
    asks: PriceIndex,
    arena: Slab<OrderNode>,
    index: HashMap<OrderId, OrderLocation>,
    trades: Vec<Trade>,
    ltp: Option<i64>,
    poisoned: AtomicBool,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: PriceIndex::new(),
            asks: PriceIndex::new(),
            arena: Slab::new(),
            index: HashMap::new(),
            trades: Vec::new(),
            ltp: None,
            poisoned: AtomicBool::new(false),
        }
    }

    fn check_alive(&self) -> Result<(), OrderBookError> {
        if self.poisoned.load(Ordering::Acquire) {
            return Err(OrderBookError::Poisoned);
        }
        Ok(())
    }

    /// Submits a new limit order, runs the continuous matching loop, and
    /// returns its id. Any unfilled remainder rests on the book.
    pub fn submit(&mut self, side: Side, price: i64, quantity: u64) -> Result<OrderId, OrderBookError> {
        self.check_alive()?;
        if price <= 0 {
            return Err(OrderBookError::InvalidPrice);
        }
        if quantity == 0 {
            return Err(OrderBookError::InvalidQuantity);
        }

        let id = next_order_id();
        let order = Order::new_limit(id, None, side, price, quantity);
        debug!(order_id = %id, ?side, price, quantity, "submit");

        self.add_to_book(order);
        self.match_all();
        Ok(id)
    }

    /// Removes a resting order. Idempotent: cancelling an order that has
    /// already fully traded or been cancelled returns `OrderNotFound`.
    pub fn cancel(&mut self, id: OrderId) -> Result<(), OrderBookError> {
        self.check_alive()?;
        let location = self.index.remove(&id).ok_or(OrderBookError::OrderNotFound(id))?;
        let index = self.index_for_mut(location.side);
        let Some(level_key) = index.find(location.price) else {
            return Err(OrderBookError::OrderNotFound(id));
        };
        index.queue_mut(level_key).unlink(&mut self.arena, location.arena_key);
        self.arena.remove(location.arena_key);
        if index.queue(level_key).is_empty() {
            index.remove(location.price);
        }
        debug!(order_id = %id, "cancel");
        Ok(())
    }

    /// Consistent snapshot of both sides plus last traded price.
    pub fn snapshot(&self) -> Result<BookSnapshot, OrderBookError> {
        self.check_alive()?;
        let bids = self
            .bids
            .iter_ascending()
            .map(|(price, queue)| level_view(price, queue, &self.arena))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let asks = self
            .asks
            .iter_ascending()
            .map(|(price, queue)| level_view(price, queue, &self.arena))
            .collect();
        Ok(BookSnapshot {
            bids,
            asks,
            ltp: self.ltp,
        })
    }

    pub fn ltp(&self) -> Result<Option<i64>, OrderBookError> {
        self.check_alive()?;
        Ok(self.ltp)
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn best_bid(&self) -> Option<i64> {
        self.bids.max().map(|k| self.bids.price_of(k))
    }

    pub fn best_ask(&self) -> Option<i64> {
        self.asks.min().map(|k| self.asks.price_of(k))
    }

    fn index_for_mut(&mut self, side: Side) -> &mut PriceIndex {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    fn add_to_book(&mut self, order: Order) {
        let side = order.side;
        let price = order.price;
        let id = order.id;
        let index = self.index_for_mut(side);
        let level_key = index.get_or_create(price);
        let arena_key = index.queue_mut(level_key).enqueue(&mut self.arena, order);
        self.index.insert(
            id,
            OrderLocation {
                side,
                price,
                arena_key,
            },
        );
    }

    /// Drains crossing liquidity until the book is no longer crossed. The
    /// trade price is always the resting order's price.
    fn match_all(&mut self) {
        loop {
            let (Some(bid_key), Some(ask_key)) = (self.bids.max(), self.asks.min()) else {
                break;
            };
            let bid_price = self.bids.price_of(bid_key);
            let ask_price = self.asks.price_of(ask_key);
            if bid_price < ask_price {
                break;
            }

            let Some(bid_head) = self.bids.queue(bid_key).peek_head() else {
                self.bids.remove(bid_price);
                continue;
            };
            let Some(ask_head) = self.asks.queue(ask_key).peek_head() else {
                self.asks.remove(ask_price);
                continue;
            };

            let bid_order_id = self.arena[bid_head].order.id;
            let ask_order_id = self.arena[ask_head].order.id;
            let bid_remaining = self.arena[bid_head].order.remaining;
            let ask_remaining = self.arena[ask_head].order.remaining;
            let trade_qty = bid_remaining.min(ask_remaining);

            // Trade executes at the resting order's price; the ask side is
            // the maker by convention here.
            let trade_price = ask_price;

            info!(
                maker = %ask_order_id,
                taker = %bid_order_id,
                price = trade_price,
                quantity = trade_qty,
                "trade"
            );
            self.trades.push(Trade {
                maker_order_id: ask_order_id,
                taker_order_id: bid_order_id,
                price: trade_price,
                quantity: trade_qty,
                executed_at: chrono::Utc::now(),
            });
            self.ltp = Some(trade_price);

            self.arena[bid_head].order.remaining -= trade_qty;
            self.arena[ask_head].order.remaining -= trade_qty;

            if self.arena[bid_head].order.remaining == 0 {
                self.bids.queue_mut(bid_key).unlink(&mut self.arena, bid_head);
                self.arena.remove(bid_head);
                self.index.remove(&bid_order_id);
                if self.bids.queue(bid_key).is_empty() {
                    self.bids.remove(bid_price);
                }
            }
            if self.arena[ask_head].order.remaining == 0 {
                self.asks.queue_mut(ask_key).unlink(&mut self.arena, ask_head);
                self.arena.remove(ask_head);
                self.index.remove(&ask_order_id);
                if self.asks.queue(ask_key).is_empty() {
                    self.asks.remove(ask_price);
                }
            }
        }
    }
}

fn level_view(price: i64, queue: &super::level_queue::LevelQueue, arena: &Slab<OrderNode>) -> PriceLevelView {
    let orders: Vec<OrderView> = queue
        .iter_front_to_back(arena)
        .map(|o| OrderView {
            order_id: o.id,
            quantity: o.remaining,
        })
        .collect();
    let total_quantity = orders.iter().map(|o| o.quantity).sum();
    PriceLevelView {
        price,
        total_quantity,
        order_count: orders.len(),
        orders,
    }
}
