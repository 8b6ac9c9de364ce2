pub mod level_queue;
pub mod multibook;
pub mod order;
pub mod orderbook;
pub mod price_index;

pub use multibook::{MultiBook, MultiBookError};
pub use order::{next_order_id, Order, OrderId, OrderType, Side, TimeInForce, Trade};
pub use orderbook::{BookSnapshot, OrderBook, OrderBookError, OrderView, PriceLevelView};
