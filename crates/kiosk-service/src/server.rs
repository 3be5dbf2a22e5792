//! HTTP server for the kiosk order API.
//!
//! This module provides the router, shared state, and the mapping from core
//! workflow errors to HTTP error envelopes.

use axum::{
	http::StatusCode,
	response::Json,
	routing::{get, patch, post},
	Router,
};
use kiosk_config::ApiConfig;
use kiosk_order::{OrderError, OrderService};
use kiosk_storage::OrderStore;
use kiosk_types::ErrorResponse;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// The order workflows.
	pub orders: Arc<OrderService>,
	/// Direct store handle for infrastructure concerns such as read-model
	/// refreshes after webhook confirmations.
	pub store: Arc<dyn OrderStore>,
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	orders: Arc<OrderService>,
	store: Arc<dyn OrderStore>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { orders, store };

	let app = Router::new()
		.nest(
			"/api",
			Router::new()
				.route(
					"/orders",
					post(crate::apis::orders::create_order).get(crate::apis::orders::list_orders),
				)
				.route("/orders/kitchen", get(crate::apis::orders::kitchen_queue))
				.route("/orders/{id}", get(crate::apis::orders::get_order))
				.route(
					"/orders/{id}/status",
					patch(crate::apis::orders::update_status),
				)
				.route(
					"/orders/{id}/qrcode",
					get(crate::apis::orders::payment_qr_code),
				)
				.route("/webhook/payment", post(crate::apis::webhook::handle_payment)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Kiosk API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Maps a core workflow error to its HTTP status and error envelope.
pub fn error_response(err: &OrderError) -> (StatusCode, Json<ErrorResponse>) {
	let (status_code, error_code) = match err {
		OrderError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
		OrderError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND"),
		OrderError::EmptyOrder => (StatusCode::BAD_REQUEST, "EMPTY_ORDER"),
		OrderError::InvalidTransition { .. } => {
			(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TRANSITION")
		}
		OrderError::InvalidState { .. } => (StatusCode::CONFLICT, "INVALID_STATE"),
		OrderError::Underpaid { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "UNDERPAID"),
		OrderError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
	};

	(
		status_code,
		Json(ErrorResponse {
			error: error_code.to_string(),
			message: err.to_string(),
			details: None,
		}),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use kiosk_types::OrderStatus;
	use rust_decimal::Decimal;

	#[test]
	fn error_codes_map_to_expected_statuses() {
		let cases: Vec<(OrderError, StatusCode, &str)> = vec![
			(
				OrderError::OrderNotFound("order-1".into()),
				StatusCode::NOT_FOUND,
				"ORDER_NOT_FOUND",
			),
			(
				OrderError::ProductNotFound {
					requested: 2,
					found: 1,
				},
				StatusCode::NOT_FOUND,
				"PRODUCT_NOT_FOUND",
			),
			(
				OrderError::InvalidTransition {
					from: OrderStatus::Pending,
					to: OrderStatus::Ready,
				},
				StatusCode::UNPROCESSABLE_ENTITY,
				"INVALID_TRANSITION",
			),
			(
				OrderError::InvalidState {
					operation: "process payment",
					order_id: "order-1".into(),
					status: OrderStatus::Received,
				},
				StatusCode::CONFLICT,
				"INVALID_STATE",
			),
			(
				OrderError::Underpaid {
					paid: Decimal::new(999, 2),
					total: Decimal::new(1000, 2),
				},
				StatusCode::UNPROCESSABLE_ENTITY,
				"UNDERPAID",
			),
		];

		for (err, expected_status, expected_code) in cases {
			let (status, Json(body)) = error_response(&err);
			assert_eq!(status, expected_status);
			assert_eq!(body.error, expected_code);
			assert!(!body.message.is_empty());
		}
	}
}
