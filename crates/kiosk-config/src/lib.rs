//! Configuration module for the kiosk order backend.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required values are properly set.

use kiosk_types::Product;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the kiosk service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Configuration specific to this service instance.
	pub service: ServiceConfig,
	/// Configuration for the order store backend.
	pub storage: StorageConfig,
	/// Product catalog available to the order core.
	#[serde(default)]
	pub catalog: CatalogConfig,
	/// Configuration for the external payment provider, when one is wired.
	pub payment: Option<PaymentConfig>,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to the service instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
	/// Unique identifier for this kiosk instance.
	pub id: String,
}

/// Configuration for the order store backend.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of store implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

/// Product catalog configuration.
///
/// Product CRUD lives outside this system; the service seeds its read-only
/// catalog from here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
	#[serde(default)]
	pub products: Vec<Product>,
}

/// Configuration for the external payment provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of payment implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
	/// Whether the API server should be started.
	#[serde(default = "default_api_enabled")]
	pub enabled: bool,
	/// Host address to bind to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

fn default_api_enabled() -> bool {
	true
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3000
}

impl Config {
	/// Parses configuration from a TOML string and validates it.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from a TOML file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		Self::from_toml_str(&raw)
	}

	/// Validates cross-field constraints the type system cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.service.id.is_empty() {
			return Err(ConfigError::Validation("service.id must not be empty".into()));
		}

		if !self.storage.implementations.contains_key(&self.storage.primary) {
			return Err(ConfigError::Validation(format!(
				"storage.primary '{}' has no matching storage.implementations entry",
				self.storage.primary
			)));
		}

		if let Some(payment) = &self.payment {
			if !payment.implementations.contains_key(&payment.primary) {
				return Err(ConfigError::Validation(format!(
					"payment.primary '{}' has no matching payment.implementations entry",
					payment.primary
				)));
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EXAMPLE: &str = r#"
		[service]
		id = "kiosk-1"

		[storage]
		primary = "memory"

		[storage.implementations.memory]

		[[catalog.products]]
		id = "p1"
		name = "Burger"
		description = "House burger"
		price = "10.00"
		category_name = "Lanche"

		[payment]
		primary = "mock"

		[payment.implementations.mock]
		fail = false

		[api]
		host = "0.0.0.0"
		port = 8080
	"#;

	#[test]
	fn parses_full_config() {
		let config = Config::from_toml_str(EXAMPLE).unwrap();
		assert_eq!(config.service.id, "kiosk-1");
		assert_eq!(config.storage.primary, "memory");
		assert_eq!(config.catalog.products.len(), 1);
		assert_eq!(config.payment.unwrap().primary, "mock");
		let api = config.api.unwrap();
		assert!(api.enabled);
		assert_eq!(api.port, 8080);
	}

	#[test]
	fn rejects_primary_without_implementation() {
		let raw = r#"
			[service]
			id = "kiosk-1"

			[storage]
			primary = "postgres"

			[storage.implementations.memory]
		"#;
		let err = Config::from_toml_str(raw).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn payment_and_api_sections_are_optional() {
		let raw = r#"
			[service]
			id = "kiosk-1"

			[storage]
			primary = "memory"

			[storage.implementations.memory]
		"#;
		let config = Config::from_toml_str(raw).unwrap();
		assert!(config.payment.is_none());
		assert!(config.api.is_none());
		assert!(config.catalog.products.is_empty());
	}

	#[tokio::test]
	async fn loads_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, EXAMPLE).unwrap();

		let config = Config::from_file(path.to_str().unwrap()).await.unwrap();
		assert_eq!(config.service.id, "kiosk-1");
	}
}
