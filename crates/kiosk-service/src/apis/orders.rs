//! Order endpoints for the kiosk API.
//!
//! Thin HTTP adapters over the order workflows: they parse and validate the
//! transport shapes, delegate to `OrderService`, and render orders with their
//! derived totals. No business rule lives here.

use crate::server::{error_response, AppState};
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use chrono::{DateTime, Utc};
use kiosk_order::CreateOrderRequest;
use kiosk_types::{ErrorResponse, Order, OrderStatus, OrderStatusFilter, PaymentQrCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as rendered by the API, with derived totals included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
	pub id: String,
	pub customer_id: Option<String>,
	pub status: OrderStatus,
	pub total: Decimal,
	pub items: Vec<OrderItemResponse>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub paid_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount_paid: Option<Decimal>,
	pub created_at: u64,
	pub updated_at: u64,
}

/// One order line as rendered by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
	pub id: String,
	pub product_id: String,
	pub product_name: String,
	pub product_description: String,
	pub unit_price: Decimal,
	pub quantity: u32,
	pub total_price: Decimal,
	pub category_name: String,
}

impl From<Order> for OrderResponse {
	fn from(order: Order) -> Self {
		let total = order.total();
		Self {
			id: order.id,
			customer_id: order.customer_id,
			status: order.status,
			total,
			items: order
				.items
				.into_iter()
				.map(|item| OrderItemResponse {
					total_price: item.total_price(),
					id: item.id,
					product_id: item.product_id,
					product_name: item.product_name,
					product_description: item.product_description,
					unit_price: item.unit_price,
					quantity: item.quantity,
					category_name: item.category_name,
				})
				.collect(),
			transaction_code: order.transaction_code,
			paid_at: order.paid_at,
			amount_paid: order.amount_paid,
			created_at: order.created_at,
			updated_at: order.updated_at,
		}
	}
}

/// Query parameters for listing orders.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
	/// One of the five statuses or "all" (the default).
	pub status: Option<String>,
}

/// Body for the update-status endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
	pub status: String,
}

type ApiResult<T> = Result<(StatusCode, Json<T>), (StatusCode, Json<ErrorResponse>)>;

fn bad_request(code: &str, message: String) -> (StatusCode, Json<ErrorResponse>) {
	(
		StatusCode::BAD_REQUEST,
		Json(ErrorResponse {
			error: code.to_string(),
			message,
			details: None,
		}),
	)
}

/// Handles POST /api/orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> ApiResult<OrderResponse> {
	match state.orders.create_order(request).await {
		Ok(order) => Ok((StatusCode::CREATED, Json(order.into()))),
		Err(e) => {
			tracing::warn!("Order creation failed: {}", e);
			Err(error_response(&e))
		}
	}
}

/// Handles GET /api/orders requests, optionally filtered by status.
pub async fn list_orders(
	State(state): State<AppState>,
	Query(query): Query<ListOrdersQuery>,
) -> ApiResult<Vec<OrderResponse>> {
	let filter = match query.status.as_deref() {
		None => OrderStatusFilter::All,
		Some(raw) => raw
			.parse::<OrderStatusFilter>()
			.map_err(|e| bad_request("INVALID_STATUS", e.to_string()))?,
	};

	match state.orders.list_orders(filter).await {
		Ok(orders) => Ok((
			StatusCode::OK,
			Json(orders.into_iter().map(OrderResponse::from).collect()),
		)),
		Err(e) => {
			tracing::warn!("Order listing failed: {}", e);
			Err(error_response(&e))
		}
	}
}

/// Handles GET /api/orders/{id} requests.
pub async fn get_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> ApiResult<OrderResponse> {
	match state.orders.get_order(&id).await {
		Ok(Some(order)) => Ok((StatusCode::OK, Json(order.into()))),
		Ok(None) => Err((
			StatusCode::NOT_FOUND,
			Json(ErrorResponse {
				error: "ORDER_NOT_FOUND".to_string(),
				message: format!("Order {id} not found"),
				details: None,
			}),
		)),
		Err(e) => {
			tracing::warn!("Order retrieval failed: {}", e);
			Err(error_response(&e))
		}
	}
}

/// Handles PATCH /api/orders/{id}/status requests.
pub async fn update_status(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<OrderResponse> {
	let new_status = request
		.status
		.parse::<OrderStatus>()
		.map_err(|e| bad_request("INVALID_STATUS", e.to_string()))?;

	match state.orders.update_status(&id, new_status).await {
		Ok(order) => Ok((StatusCode::OK, Json(order.into()))),
		Err(e) => {
			tracing::warn!("Status update failed: {}", e);
			Err(error_response(&e))
		}
	}
}

/// Handles GET /api/orders/kitchen requests.
///
/// Returns the kitchen work queue: ready orders first, then preparing, then
/// received, oldest first within each bucket.
pub async fn kitchen_queue(State(state): State<AppState>) -> ApiResult<Vec<OrderResponse>> {
	match state.orders.kitchen_queue().await {
		Ok(orders) => Ok((
			StatusCode::OK,
			Json(orders.into_iter().map(OrderResponse::from).collect()),
		)),
		Err(e) => {
			tracing::warn!("Kitchen queue derivation failed: {}", e);
			Err(error_response(&e))
		}
	}
}

/// Handles GET /api/orders/{id}/qrcode requests.
pub async fn payment_qr_code(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> ApiResult<PaymentQrCode> {
	match state.orders.payment_qr_code(&id).await {
		Ok(qr) => Ok((StatusCode::OK, Json(qr))),
		Err(e) => {
			tracing::warn!("QR code generation failed: {}", e);
			Err(error_response(&e))
		}
	}
}
