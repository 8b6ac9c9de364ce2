//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name               | Description                                |
// |--------------------|--------------------------------------------|
// | PlaceTradeRequest   | Body of POST /place_trade                  |
// | PlaceTradeResponse  | Body returned on successful placement      |
// | OrderBookResponse   | Body returned by GET /get_orderbook/:symbol |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::core::{BookSnapshot, OrderId, PriceLevelView, Side};

fn rows_of(level: &PriceLevelView) -> impl Iterator<Item = OrderRowDto> + '_ {
    level.orders.iter().map(move |order| OrderRowDto {
        price: level.price,
        quantity: order.quantity,
        order_id: order.order_id,
    })
}

#[derive(Debug, Deserialize)]
pub struct PlaceTradeRequest {
    pub stock: String,
    pub order_side: OrderSideDto,
    pub price: i64,
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSideDto {
    Buy,
    Sell,
}

impl From<OrderSideDto> for Side {
    fn from(value: OrderSideDto) -> Self {
        match value {
            OrderSideDto::Buy => Side::Bid,
            OrderSideDto::Sell => Side::Ask,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceTradeResponse {
    pub message: String,
    pub order_id: OrderId,
}

/// One resting order, flattened out of its price level: the
/// `(price, quantity, order_id)` wire shape `GET /get_orderbook/<symbol>`
/// returns.
#[derive(Debug, Serialize)]
pub struct OrderRowDto {
    pub price: i64,
    pub quantity: u64,
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    pub bids: Vec<OrderRowDto>,
    pub asks: Vec<OrderRowDto>,
    pub ltp: Option<i64>,
}

impl From<BookSnapshot> for OrderBookResponse {
    fn from(snapshot: BookSnapshot) -> Self {
        Self {
            bids: snapshot.bids.iter().flat_map(rows_of).collect(),
            asks: snapshot.asks.iter().flat_map(rows_of).collect(),
            ltp: snapshot.ltp,
        }
    }
}
