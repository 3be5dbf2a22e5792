//! Product snapshot data consumed when building orders.
//!
//! Product CRUD lives outside this system; the core only reads the fields it
//! snapshots into order line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as seen by the order core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
	/// Unique identifier in the catalog.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Display description.
	pub description: String,
	/// Current unit price.
	pub price: Decimal,
	/// Category name, when the product has one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category_name: Option<String>,
}
