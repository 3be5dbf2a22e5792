//! File-based order store for the kiosk order backend.
//!
//! This module stores each order as a JSON document on the filesystem,
//! providing simple persistence without requiring external dependencies.
//! Writes go to a temp file first and are renamed into place so a crash
//! mid-write never leaves a half-written order behind.

use crate::{OrderStore, StorageError};
use async_trait::async_trait;
use kiosk_types::{Order, OrderStatus};
use std::path::PathBuf;
use tokio::fs;

/// File-based order store.
///
/// One `<id>.json` document per order under the configured base directory.
/// Read methods scan the directory and sort by creation time, so this backend
/// suits a single kiosk's volume rather than a fleet.
pub struct FileOrderStore {
	/// Base directory path for storing order documents.
	base_path: PathBuf,
}

impl FileOrderStore {
	/// Creates a new FileOrderStore rooted at the given directory.
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	/// Converts an order id to a filesystem-safe document path.
	fn document_path(&self, id: &str) -> PathBuf {
		let safe_id = id.replace(['/', ':'], "_");
		self.base_path.join(format!("{}.json", safe_id))
	}

	/// Reads every order document under the base directory.
	///
	/// Unreadable or undecodable files are skipped with a warning rather than
	/// failing the whole listing.
	async fn read_all(&self) -> Result<Vec<Order>, StorageError> {
		let mut orders = Vec::new();

		let mut entries = match fs::read_dir(&self.base_path).await {
			Ok(entries) => entries,
			// A store nothing has been written to yet is empty, not broken.
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(orders),
			Err(e) => return Err(StorageError::Backend(e.to_string())),
		};

		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?
		{
			let path = entry.path();
			if path.extension() != Some(std::ffi::OsStr::new("json")) {
				continue;
			}
			match fs::read(&path).await {
				Ok(bytes) => match serde_json::from_slice::<Order>(&bytes) {
					Ok(order) => orders.push(order),
					Err(e) => {
						tracing::warn!("Skipping order document {:?}: {}", path, e);
					}
				},
				Err(e) => {
					tracing::warn!("Skipping order document {:?}: could not be read: {}", path, e);
				}
			}
		}

		orders.sort_by(|a, b| {
			a.created_at
				.cmp(&b.created_at)
				.then_with(|| a.id.cmp(&b.id))
		});
		Ok(orders)
	}
}

#[async_trait]
impl OrderStore for FileOrderStore {
	async fn save(&self, order: &Order) -> Result<Order, StorageError> {
		let path = self.document_path(&order.id);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| StorageError::Backend(e.to_string()))?;
		}

		let bytes = serde_json::to_vec_pretty(order)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;

		// Write atomically by writing to temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, bytes)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		Ok(order.clone())
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError> {
		let path = self.document_path(id);

		let bytes = match fs::read(&path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(StorageError::Backend(e.to_string())),
		};

		let order = serde_json::from_slice(&bytes)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		Ok(Some(order))
	}

	async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
		self.read_all().await
	}

	async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, StorageError> {
		let orders = self.read_all().await?;
		Ok(orders
			.into_iter()
			.filter(|order| order.status == status)
			.collect())
	}
}

/// Factory function to create a file order store from configuration.
///
/// Configuration parameters:
/// - `storage_path`: Base directory for order documents (default: "./data/orders")
pub fn create_store(config: &toml::Value) -> Result<Box<dyn OrderStore>, StorageError> {
	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.unwrap_or("./data/orders")
		.to_string();

	Ok(Box::new(FileOrderStore::new(PathBuf::from(storage_path))))
}
