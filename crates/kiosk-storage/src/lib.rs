//! Storage module for the kiosk order backend.
//!
//! This module provides the persistence ports consumed by the order core,
//! plus backing implementations. The core never talks to a database directly;
//! it only sees the `OrderStore` and `ProductCatalog` traits defined here.

use async_trait::async_trait;
use kiosk_types::{Order, OrderStatus, Product};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Port for order persistence.
///
/// Implementations own persistence identity for the order aggregate and its
/// line items. Concurrency control for racing updates on the same order is
/// the implementation's responsibility; the core performs no locking.
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Persists the order (insert or overwrite) and returns the stored
	/// aggregate.
	async fn save(&self, order: &Order) -> Result<Order, StorageError>;

	/// Looks up a single order. `None` when absent.
	async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError>;

	/// Returns every order, oldest-created-first.
	async fn find_all(&self) -> Result<Vec<Order>, StorageError>;

	/// Returns the orders currently in `status`, oldest-created-first.
	///
	/// Callers (notably the kitchen queue) rely on this ordering and do not
	/// re-sort; any new implementation must honor it.
	async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, StorageError>;

	/// Invalidates any materialized read-side cache.
	///
	/// Invoked by surrounding infrastructure after writes it considers
	/// significant, never by the core workflows. Backends without a read
	/// model can use the default no-op.
	async fn refresh_read_model(&self) -> Result<(), StorageError> {
		Ok(())
	}
}

/// Port for reading product data when building orders.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
	/// Fetches the products with the given ids in one batch.
	///
	/// May return fewer products than ids requested; the order core treats
	/// a short result as a hard failure.
	async fn find_many_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, StorageError>;
}

/// Type alias for order-store factory functions.
///
/// This is the function signature that all order-store implementations must
/// provide to create instances of their store.
pub type OrderStoreFactory = fn(&toml::Value) -> Result<Box<dyn OrderStore>, StorageError>;

/// Get all registered order-store implementations.
///
/// Returns a vector of (name, factory) tuples, used by the service wiring to
/// resolve the implementation named in configuration.
pub fn get_all_implementations() -> Vec<(&'static str, OrderStoreFactory)> {
	use implementations::{file, memory};

	vec![
		("file", file::create_store as OrderStoreFactory),
		("memory", memory::create_store as OrderStoreFactory),
	]
}
