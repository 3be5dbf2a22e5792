//! Payment module for the kiosk order backend.
//!
//! This module defines the abstract payment capability the order core
//! depends on for QR-code checkout. The capability is optional everywhere it
//! is consumed: absence or failure must never break checkout, which falls
//! back to a deterministic synthetic payload in the order core.

use async_trait::async_trait;
use kiosk_types::{QrCodeRequest, QrCodeResponse};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod mercadopago;
	pub mod mock;
}

/// Errors that can occur during payment-provider operations.
#[derive(Debug, Error)]
pub enum PaymentError {
	/// Error that occurs when the provider rejects or fails a request.
	#[error("Provider error: {0}")]
	Provider(String),
	/// Error that occurs when the provider response cannot be decoded.
	#[error("Decode error: {0}")]
	Decode(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for external payment providers.
///
/// Implementations generate provider-side QR payloads for pending orders.
/// Payment confirmation never flows through this trait; it arrives later via
/// the webhook layer as a normalized event.
#[async_trait]
pub trait PaymentCapability: Send + Sync {
	/// Requests a QR payload for the given order from the provider.
	async fn generate_qr_code(&self, request: &QrCodeRequest)
		-> Result<QrCodeResponse, PaymentError>;
}

/// Type alias for payment-capability factory functions.
///
/// This is the function signature that all payment implementations must
/// provide to create instances of their capability.
pub type PaymentFactory = fn(&toml::Value) -> Result<Box<dyn PaymentCapability>, PaymentError>;

/// Get all registered payment implementations.
///
/// Returns a vector of (name, factory) tuples, used by the service wiring to
/// resolve the implementation named in configuration.
pub fn get_all_implementations() -> Vec<(&'static str, PaymentFactory)> {
	use implementations::{mercadopago, mock};

	vec![
		("mercadopago", mercadopago::create_capability as PaymentFactory),
		("mock", mock::create_capability as PaymentFactory),
	]
}
