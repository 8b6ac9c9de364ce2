//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Core order/trade vocabulary shared by the price index, the level queue and
// the order book. Price and quantity are plain fixed-point integers; the
// caller owns tick-size conventions, this module does not enforce any.
//--------------------------------------------------------------------------------------------------

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonically increasing order identifier. Never reused, including after
/// cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);

/// Issues the next order id. Process-wide, thread-safe, gap-free only in the
/// sense that ids are never reused — concurrent callers may interleave.
pub fn next_order_id() -> OrderId {
    OrderId(NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed))
}

/// Side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

/// Order type. Only `Limit` is accepted by `OrderBook::submit`; the other
/// variants are kept for API extensibility but are rejected at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Stop,
    StopLimit,
}

/// Time-in-force policy. Only `Gtc` (resting, good-till-cancel) is
/// implemented by the matching loop; `Ioc` is accepted by the type but has no
/// special handling in `OrderBook::submit` today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    Gtc,
    Ioc,
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::Gtc
    }
}

/// A resting or incoming limit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader_id: Option<String>,
    pub side: Side,
    pub order_type: OrderType,
    pub price: i64,
    pub quantity: u64,
    pub remaining: u64,
    pub time_in_force: TimeInForce,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new_limit(id: OrderId, trader_id: Option<String>, side: Side, price: i64, quantity: u64) -> Self {
        Self {
            id,
            trader_id,
            side,
            order_type: OrderType::Limit,
            price,
            quantity,
            remaining: quantity,
            time_in_force: TimeInForce::Gtc,
            created_at: Utc::now(),
        }
    }

    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }
}

/// A completed trade between a resting (maker) and incoming (taker) order.
/// `price` is always the resting order's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub price: i64,
    pub quantity: u64,
    pub executed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_are_monotonic_and_unique() {
        let a = next_order_id();
        let b = next_order_id();
        assert!(b.0 > a.0);
    }

    #[test]
    fn side_opposite_is_involutive() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn new_limit_order_starts_unfilled() {
        let order = Order::new_limit(OrderId(1), None, Side::Bid, 100, 10);
        assert_eq!(order.remaining, 10);
        assert!(!order.is_filled());
    }
}
