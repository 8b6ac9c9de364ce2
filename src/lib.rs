pub mod config;
pub mod core;
pub mod http;

pub use config::Config;
pub use core::{
    next_order_id, BookSnapshot, MultiBook, MultiBookError, Order, OrderBook, OrderBookError,
    OrderId, OrderType, OrderView, PriceLevelView, Side, TimeInForce, Trade,
};
pub use http::Api;
