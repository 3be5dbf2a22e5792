//! Mercado Pago in-store QR implementation of the payment capability.
//!
//! Creates dynamic QR orders through the Point of Sale endpoint
//! (`/instore/orders/qr/seller/collectors/{user_id}/pos/{pos_id}/qrs`).
//! The provider later confirms payment through a webhook that carries the
//! order id back in `external_reference`; this module only handles the
//! outbound QR request.

use crate::{PaymentCapability, PaymentError};
use async_trait::async_trait;
use kiosk_types::{QrCodeRequest, QrCodeResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the Mercado Pago capability.
#[derive(Debug, Clone, Deserialize)]
pub struct MercadoPagoConfig {
	/// API access token used as bearer auth.
	pub access_token: String,
	/// Collector (seller) account id.
	pub user_id: String,
	/// Point-of-sale id the QR orders are created under.
	pub pos_id: String,
	/// Webhook URL the provider notifies once the payer completes checkout.
	pub notification_url: String,
	/// API base URL; overridable for sandboxes and tests.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Request timeout in seconds.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

fn default_base_url() -> String {
	"https://api.mercadopago.com".to_string()
}

fn default_timeout_seconds() -> u64 {
	10
}

/// Outbound payload for the in-store QR orders endpoint.
#[derive(Debug, Serialize)]
struct QrOrderPayload {
	external_reference: String,
	notification_url: String,
	#[serde(with = "rust_decimal::serde::float")]
	total_amount: Decimal,
	items: Vec<QrOrderItem>,
	title: String,
	description: String,
}

#[derive(Debug, Serialize)]
struct QrOrderItem {
	category: String,
	title: String,
	description: String,
	quantity: u32,
	unit_measure: String,
	#[serde(with = "rust_decimal::serde::float")]
	unit_price: Decimal,
	#[serde(with = "rust_decimal::serde::float")]
	total_amount: Decimal,
}

/// Mercado Pago payment capability.
pub struct MercadoPagoCapability {
	config: MercadoPagoConfig,
	client: reqwest::Client,
}

impl MercadoPagoCapability {
	/// Creates a new capability with the given configuration.
	pub fn new(config: MercadoPagoConfig) -> Result<Self, PaymentError> {
		let client = reqwest::Client::builder()
			.timeout(std::time::Duration::from_secs(config.timeout_seconds))
			.build()
			.map_err(|e| PaymentError::Configuration(e.to_string()))?;

		Ok(Self { config, client })
	}

	fn qr_orders_url(&self) -> String {
		format!(
			"{}/instore/orders/qr/seller/collectors/{}/pos/{}/qrs",
			self.config.base_url, self.config.user_id, self.config.pos_id
		)
	}

	fn build_payload(&self, request: &QrCodeRequest) -> QrOrderPayload {
		let items = if request.items.is_empty() {
			// The endpoint requires at least one item line.
			vec![QrOrderItem {
				category: "food".to_string(),
				title: request.title.clone(),
				description: request.description.clone(),
				quantity: 1,
				unit_measure: "unity".to_string(),
				unit_price: request.amount,
				total_amount: request.amount,
			}]
		} else {
			request
				.items
				.iter()
				.map(|item| QrOrderItem {
					category: item.category.clone(),
					title: item.title.clone(),
					description: item.description.clone(),
					quantity: item.quantity,
					unit_measure: "unity".to_string(),
					unit_price: item.unit_price,
					total_amount: item.total_amount,
				})
				.collect()
		};

		QrOrderPayload {
			external_reference: request.order_id.clone(),
			notification_url: self.config.notification_url.clone(),
			total_amount: request.amount,
			items,
			title: "Order payment".to_string(),
			description: "Order payment".to_string(),
		}
	}
}

#[async_trait]
impl PaymentCapability for MercadoPagoCapability {
	async fn generate_qr_code(
		&self,
		request: &QrCodeRequest,
	) -> Result<QrCodeResponse, PaymentError> {
		tracing::info!(order_id = %request.order_id, "Requesting QR order from Mercado Pago");

		let payload = self.build_payload(request);
		let response = self
			.client
			.post(self.qr_orders_url())
			.bearer_auth(&self.config.access_token)
			.json(&payload)
			.send()
			.await
			.map_err(|e| PaymentError::Provider(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(PaymentError::Provider(format!(
				"Mercado Pago API error: {} - {}",
				status, body
			)));
		}

		let qr: QrCodeResponse = response
			.json()
			.await
			.map_err(|e| PaymentError::Decode(e.to_string()))?;

		tracing::info!(
			order_id = %request.order_id,
			in_store_order_id = %qr.in_store_order_id,
			"QR order created, awaiting payment via webhook"
		);
		Ok(qr)
	}
}

/// Factory function to create a Mercado Pago capability from configuration.
///
/// Configuration parameters:
/// - `access_token`: API bearer token (required)
/// - `user_id`: collector account id (required)
/// - `pos_id`: point-of-sale id (required)
/// - `notification_url`: webhook URL for payment notifications (required)
/// - `base_url`: API base URL (default: "https://api.mercadopago.com")
/// - `timeout_seconds`: request timeout (default: 10)
pub fn create_capability(
	config: &toml::Value,
) -> Result<Box<dyn PaymentCapability>, PaymentError> {
	let config: MercadoPagoConfig = config
		.clone()
		.try_into()
		.map_err(|e: toml::de::Error| PaymentError::Configuration(e.message().to_string()))?;

	Ok(Box::new(MercadoPagoCapability::new(config)?))
}
