//--------------------------------------------------------------------------------------------------
// Handler functions for the HTTP surface. Thin: every handler just unwraps a
// `MultiBook` call and shapes the response, no business logic lives here.
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{OrderBookResponse, PlaceTradeRequest, PlaceTradeResponse};
use super::error::{ApiError, ApiResult};
use crate::core::MultiBook;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn place_trade(
    State(multi_book): State<Arc<MultiBook>>,
    Json(request): Json<PlaceTradeRequest>,
) -> ApiResult<Json<PlaceTradeResponse>> {
    if request.price <= 0 {
        return Err(ApiError::BadRequest("price must be positive".to_string()));
    }
    if request.quantity == 0 {
        return Err(ApiError::BadRequest("quantity must be positive".to_string()));
    }

    let order_id = multi_book.submit(
        &request.stock,
        request.order_side.into(),
        request.price,
        request.quantity,
    )?;

    Ok(Json(PlaceTradeResponse {
        message: format!("order {order_id} accepted"),
        order_id,
    }))
}

pub async fn get_orderbook(
    State(multi_book): State<Arc<MultiBook>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<OrderBookResponse>> {
    let snapshot = multi_book.snapshot(&symbol)?;
    Ok(Json(snapshot.into()))
}
