//! Mock payment capability for testing and development.
//!
//! Produces deterministic QR payloads without touching any provider, and can
//! be configured to fail so callers can exercise their degraded paths.

use crate::{PaymentCapability, PaymentError};
use async_trait::async_trait;
use kiosk_types::{QrCodeRequest, QrCodeResponse};
use serde::Deserialize;

/// Configuration for the mock capability.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockPaymentConfig {
	/// When true, every request fails with a provider error.
	#[serde(default)]
	pub fail: bool,
}

/// Mock payment capability.
pub struct MockPayment {
	config: MockPaymentConfig,
}

impl MockPayment {
	/// Creates a new mock capability with the given configuration.
	pub fn new(config: MockPaymentConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl PaymentCapability for MockPayment {
	async fn generate_qr_code(
		&self,
		request: &QrCodeRequest,
	) -> Result<QrCodeResponse, PaymentError> {
		if self.config.fail {
			return Err(PaymentError::Provider(
				"mock payment capability configured to fail".to_string(),
			));
		}

		Ok(QrCodeResponse {
			qr_data: format!("MOCK|{}|{}", request.order_id, request.amount),
			in_store_order_id: format!("mock-{}", request.order_id),
		})
	}
}

/// Factory function to create a mock capability from configuration.
///
/// Configuration parameters:
/// - `fail`: fail every request (default: false)
pub fn create_capability(
	config: &toml::Value,
) -> Result<Box<dyn PaymentCapability>, PaymentError> {
	let config: MockPaymentConfig = config
		.clone()
		.try_into()
		.map_err(|e: toml::de::Error| PaymentError::Configuration(e.message().to_string()))?;

	Ok(Box::new(MockPayment::new(config)))
}
