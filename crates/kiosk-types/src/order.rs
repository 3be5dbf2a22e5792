//! Order aggregate types for the kiosk order backend.
//!
//! This module defines the order aggregate root, its line items, and the
//! status value that drives every lifecycle rule in the system. The aggregate
//! exclusively owns its line items; the total is always derived from them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A customer order moving through the kiosk lifecycle.
///
/// An order is created in `Pending` status from a snapshot of product data
/// and carries its payment-confirmation fields only once payment has been
/// confirmed. Under the defined transitions an order is `Received` exactly
/// when the payment fields are populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier, assigned at creation, immutable.
	pub id: String,
	/// Optional customer reference; orders may be anonymous.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_id: Option<String>,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Line items in the order they were added. Non-empty at creation.
	pub items: Vec<OrderItem>,
	/// Provider transaction code, populated once when payment is confirmed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_code: Option<String>,
	/// Instant the payment was approved, populated with the confirmation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub paid_at: Option<DateTime<Utc>>,
	/// Amount actually paid. May exceed the total; never less.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount_paid: Option<Decimal>,
	/// Timestamp when this order was created.
	pub created_at: u64,
	/// Timestamp when this order was last updated.
	pub updated_at: u64,
}

impl Order {
	/// Sum of the line totals. Always computed, never stored independently
	/// of the items.
	pub fn total(&self) -> Decimal {
		self.items.iter().map(OrderItem::total_price).sum()
	}

	/// Records the payment-confirmation fields delivered by the provider.
	pub fn set_payment_details(
		&mut self,
		transaction_code: String,
		paid_at: DateTime<Utc>,
		amount_paid: Decimal,
	) {
		self.transaction_code = Some(transaction_code);
		self.paid_at = Some(paid_at);
		self.amount_paid = Some(amount_paid);
	}
}

/// A single line of an order.
///
/// Product name, description, and unit price are copied from the product at
/// order time so later catalog edits do not retroactively change historical
/// orders. Immutable once attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
	/// Unique identifier for this line item.
	pub id: String,
	/// The product this line was created from.
	pub product_id: String,
	/// Product name at order time.
	pub product_name: String,
	/// Product description at order time.
	pub product_description: String,
	/// Unit price at order time.
	pub unit_price: Decimal,
	/// Number of units ordered.
	pub quantity: u32,
	/// Category name at order time.
	pub category_name: String,
}

impl OrderItem {
	/// Line total: unit price times quantity.
	pub fn total_price(&self) -> Decimal {
		self.unit_price * Decimal::from(self.quantity)
	}
}

/// Status of an order in the kiosk lifecycle.
///
/// The set is closed; parsing rejects anything outside it. The wire form is
/// the lowercase status name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Created, awaiting payment.
	Pending,
	/// Payment confirmed, awaiting preparation.
	Received,
	/// Being prepared in the kitchen.
	Preparing,
	/// Ready to be handed to the customer.
	Ready,
	/// Delivered and complete.
	Finished,
}

impl OrderStatus {
	/// The lowercase wire form of this status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Pending => "pending",
			OrderStatus::Received => "received",
			OrderStatus::Preparing => "preparing",
			OrderStatus::Ready => "ready",
			OrderStatus::Finished => "finished",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a status string is outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid order status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for OrderStatus {
	type Err = InvalidStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(OrderStatus::Pending),
			"received" => Ok(OrderStatus::Received),
			"preparing" => Ok(OrderStatus::Preparing),
			"ready" => Ok(OrderStatus::Ready),
			"finished" => Ok(OrderStatus::Finished),
			other => Err(InvalidStatus(other.to_string())),
		}
	}
}

/// Status filter accepted by the list-orders query.
///
/// The five lifecycle statuses plus `All`, which lists every order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
	Pending,
	Received,
	Preparing,
	Ready,
	Finished,
	All,
}

impl OrderStatusFilter {
	/// The concrete status this filter selects, or `None` for `All`.
	pub fn as_status(&self) -> Option<OrderStatus> {
		match self {
			OrderStatusFilter::Pending => Some(OrderStatus::Pending),
			OrderStatusFilter::Received => Some(OrderStatus::Received),
			OrderStatusFilter::Preparing => Some(OrderStatus::Preparing),
			OrderStatusFilter::Ready => Some(OrderStatus::Ready),
			OrderStatusFilter::Finished => Some(OrderStatus::Finished),
			OrderStatusFilter::All => None,
		}
	}
}

impl FromStr for OrderStatusFilter {
	type Err = InvalidStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "all" {
			return Ok(OrderStatusFilter::All);
		}
		s.parse::<OrderStatus>().map(|status| match status {
			OrderStatus::Pending => OrderStatusFilter::Pending,
			OrderStatus::Received => OrderStatusFilter::Received,
			OrderStatus::Preparing => OrderStatusFilter::Preparing,
			OrderStatus::Ready => OrderStatusFilter::Ready,
			OrderStatus::Finished => OrderStatusFilter::Finished,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(unit_price: Decimal, quantity: u32) -> OrderItem {
		OrderItem {
			id: "item-1".to_string(),
			product_id: "product-1".to_string(),
			product_name: "Burger".to_string(),
			product_description: "House burger".to_string(),
			unit_price,
			quantity,
			category_name: "Lanche".to_string(),
		}
	}

	#[test]
	fn total_sums_line_totals() {
		let order = Order {
			id: "order-1".to_string(),
			customer_id: None,
			status: OrderStatus::Pending,
			items: vec![
				item(Decimal::new(1050, 2), 2), // 21.00
				item(Decimal::new(499, 2), 1),  // 4.99
			],
			transaction_code: None,
			paid_at: None,
			amount_paid: None,
			created_at: 0,
			updated_at: 0,
		};

		assert_eq!(order.total(), Decimal::new(2599, 2));
	}

	#[test]
	fn status_round_trips_through_wire_form() {
		for status in [
			OrderStatus::Pending,
			OrderStatus::Received,
			OrderStatus::Preparing,
			OrderStatus::Ready,
			OrderStatus::Finished,
		] {
			assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
		}
	}

	#[test]
	fn unknown_status_is_rejected() {
		let err = "cancelled".parse::<OrderStatus>().unwrap_err();
		assert_eq!(err, InvalidStatus("cancelled".to_string()));
	}

	#[test]
	fn filter_accepts_all_and_statuses() {
		assert_eq!("all".parse::<OrderStatusFilter>().unwrap(), OrderStatusFilter::All);
		assert_eq!(
			"ready".parse::<OrderStatusFilter>().unwrap().as_status(),
			Some(OrderStatus::Ready)
		);
		assert!("done".parse::<OrderStatusFilter>().is_err());
	}
}
