//! Payment types for QR-code checkout and webhook confirmations.
//!
//! These are the shapes exchanged with the abstract payment capability and
//! the normalized confirmation event delivered by the webhook layer. The
//! provider's raw wire format never reaches the core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request handed to the payment capability when generating a QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeRequest {
	/// The order this payment is for.
	pub order_id: String,
	/// Amount to collect.
	pub amount: Decimal,
	/// Human-readable title shown to the payer.
	pub title: String,
	/// Human-readable description shown to the payer.
	pub description: String,
	/// Per-line detail forwarded to the provider.
	#[serde(default)]
	pub items: Vec<QrCodeItem>,
}

/// One order line as forwarded to the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeItem {
	pub category: String,
	pub title: String,
	pub description: String,
	pub quantity: u32,
	pub unit_price: Decimal,
	pub total_amount: Decimal,
}

/// Response from the payment capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeResponse {
	/// The QR payload to render at the kiosk.
	pub qr_data: String,
	/// The provider-side order reference.
	pub in_store_order_id: String,
}

/// Result of the payment QR-code workflow.
///
/// Either the capability's real payload or the deterministic fallback;
/// the caller cannot observe which path produced it beyond the payload
/// contents themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentQrCode {
	pub qr_data: String,
	pub in_store_order_id: String,
	pub amount: Decimal,
}

/// Normalized payment confirmation delivered by the webhook layer.
///
/// The surrounding controller has already resolved and validated the raw
/// provider payload; the core only ever sees this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
	/// Provider transaction code.
	pub transaction_code: String,
	/// The order the payment settles.
	pub order_id: String,
	/// Instant the payment was approved.
	pub paid_at: DateTime<Utc>,
	/// Amount actually paid.
	pub amount_paid: Decimal,
}
