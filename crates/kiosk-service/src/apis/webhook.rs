//! Payment webhook endpoint.
//!
//! Receives the normalized payment confirmation after the surrounding
//! provider integration has resolved and validated the raw notification.
//! On success the read model is refreshed here, in infrastructure, so the
//! core payment workflow stays free of read-side concerns.

use crate::server::{error_response, AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use kiosk_types::{ErrorResponse, PaymentConfirmation};
use serde::Serialize;

/// Acknowledgement returned to the webhook caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
	pub status: &'static str,
	pub order_id: String,
}

/// Handles POST /api/webhook/payment requests.
pub async fn handle_payment(
	State(state): State<AppState>,
	Json(confirmation): Json<PaymentConfirmation>,
) -> Result<(StatusCode, Json<WebhookAck>), (StatusCode, Json<ErrorResponse>)> {
	let order_id = confirmation.order_id.clone();

	if let Err(e) = state.orders.confirm_payment(confirmation).await {
		tracing::warn!(order_id = %order_id, "Payment confirmation failed: {}", e);
		return Err(error_response(&e));
	}

	// The confirmation landed; a stale read model must not fail the webhook.
	if let Err(e) = state.store.refresh_read_model().await {
		tracing::warn!(order_id = %order_id, "Read model refresh failed: {}", e);
	}

	Ok((
		StatusCode::OK,
		Json(WebhookAck {
			status: "processed",
			order_id,
		}),
	))
}
