//! In-memory storage backends for the kiosk order backend.
//!
//! This module provides memory-based implementations of the `OrderStore` and
//! `ProductCatalog` traits, useful for testing and development scenarios
//! where persistence is not required.

use crate::{OrderStore, ProductCatalog, StorageError};
use async_trait::async_trait;
use kiosk_types::{Order, OrderStatus, Product};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory order store.
///
/// Orders live in a HashMap behind a read-write lock, providing fast access
/// but no persistence across restarts. Read methods sort by creation time
/// (id as tie-break) to satisfy the oldest-first contract.
pub struct MemoryOrderStore {
	store: Arc<RwLock<HashMap<String, Order>>>,
}

impl MemoryOrderStore {
	/// Creates a new, empty MemoryOrderStore.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryOrderStore {
	fn default() -> Self {
		Self::new()
	}
}

fn sort_oldest_first(orders: &mut [Order]) {
	orders.sort_by(|a, b| {
		a.created_at
			.cmp(&b.created_at)
			.then_with(|| a.id.cmp(&b.id))
	});
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
	async fn save(&self, order: &Order) -> Result<Order, StorageError> {
		let mut store = self.store.write().await;
		store.insert(order.id.clone(), order.clone());
		Ok(order.clone())
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError> {
		let store = self.store.read().await;
		Ok(store.get(id).cloned())
	}

	async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
		let store = self.store.read().await;
		let mut orders: Vec<Order> = store.values().cloned().collect();
		sort_oldest_first(&mut orders);
		Ok(orders)
	}

	async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, StorageError> {
		let store = self.store.read().await;
		let mut orders: Vec<Order> = store
			.values()
			.filter(|order| order.status == status)
			.cloned()
			.collect();
		sort_oldest_first(&mut orders);
		Ok(orders)
	}
}

/// In-memory product catalog.
///
/// Holds a fixed set of products, typically seeded from configuration. The
/// catalog is read-only; product CRUD lives outside this system.
pub struct MemoryProductCatalog {
	products: HashMap<String, Product>,
}

impl MemoryProductCatalog {
	/// Creates a catalog over the given products.
	pub fn new(products: Vec<Product>) -> Self {
		Self {
			products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
		}
	}
}

#[async_trait]
impl ProductCatalog for MemoryProductCatalog {
	async fn find_many_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, StorageError> {
		// Distinct ids only: a repeated id resolves to one product, mirroring
		// a batched SELECT ... IN query.
		let mut seen = Vec::new();
		let mut found = Vec::new();
		for id in ids {
			if seen.contains(id) {
				continue;
			}
			seen.push(id.clone());
			if let Some(product) = self.products.get(id) {
				found.push(product.clone());
			}
		}
		Ok(found)
	}
}

/// Factory function to create a memory order store from configuration.
///
/// Configuration parameters:
/// - None required for memory storage
pub fn create_store(_config: &toml::Value) -> Result<Box<dyn OrderStore>, StorageError> {
	Ok(Box::new(MemoryOrderStore::new()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;

	fn order(id: &str, status: OrderStatus, created_at: u64) -> Order {
		Order {
			id: id.to_string(),
			customer_id: None,
			status,
			items: vec![kiosk_types::OrderItem {
				id: format!("{id}-item"),
				product_id: "product-1".to_string(),
				product_name: "Burger".to_string(),
				product_description: "House burger".to_string(),
				unit_price: Decimal::new(1000, 2),
				quantity: 1,
				category_name: "Lanche".to_string(),
			}],
			transaction_code: None,
			paid_at: None,
			amount_paid: None,
			created_at,
			updated_at: created_at,
		}
	}

	#[tokio::test]
	async fn save_and_find_round_trip() {
		let store = MemoryOrderStore::new();

		let saved = store
			.save(&order("order-1", OrderStatus::Pending, 10))
			.await
			.unwrap();
		assert_eq!(saved.id, "order-1");

		let found = store.find_by_id("order-1").await.unwrap().unwrap();
		assert_eq!(found.status, OrderStatus::Pending);

		assert!(store.find_by_id("missing").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn save_overwrites_existing_order() {
		let store = MemoryOrderStore::new();
		store
			.save(&order("order-1", OrderStatus::Pending, 10))
			.await
			.unwrap();

		let mut updated = order("order-1", OrderStatus::Received, 10);
		updated.transaction_code = Some("tx-1".to_string());
		store.save(&updated).await.unwrap();

		let found = store.find_by_id("order-1").await.unwrap().unwrap();
		assert_eq!(found.status, OrderStatus::Received);
		assert_eq!(found.transaction_code.as_deref(), Some("tx-1"));
		assert_eq!(store.find_all().await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn find_by_status_returns_bucket_oldest_first() {
		let store = MemoryOrderStore::new();
		store.save(&order("a", OrderStatus::Ready, 30)).await.unwrap();
		store.save(&order("b", OrderStatus::Ready, 10)).await.unwrap();
		store.save(&order("c", OrderStatus::Preparing, 20)).await.unwrap();

		let ready = store.find_by_status(OrderStatus::Ready).await.unwrap();
		let ids: Vec<&str> = ready.iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "a"]);
	}

	#[tokio::test]
	async fn catalog_returns_only_known_products() {
		let catalog = MemoryProductCatalog::new(vec![Product {
			id: "p1".to_string(),
			name: "Burger".to_string(),
			description: "House burger".to_string(),
			price: Decimal::new(1000, 2),
			category_name: Some("Lanche".to_string()),
		}]);

		let found = catalog
			.find_many_by_ids(&["p1".to_string(), "p2".to_string()])
			.await
			.unwrap();
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].id, "p1");
	}
}
