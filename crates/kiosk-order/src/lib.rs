//! Order processing module for the kiosk order backend.
//!
//! This is the core of the system: the order factory, the status-transition
//! policy, and the workflows that move orders through their lifecycle from
//! creation to payment to kitchen fulfillment to delivery. Everything here
//! talks to the outside world exclusively through the ports in
//! `kiosk-storage` and `kiosk-payment`.

use kiosk_storage::StorageError;
use kiosk_types::OrderStatus;
use rust_decimal::Decimal;
use thiserror::Error;

pub mod factory;
pub mod qr;
mod service;
pub mod transitions;

pub use service::{CreateOrderItem, CreateOrderRequest, OrderService};

/// Errors that can occur during order workflows.
#[derive(Debug, Error)]
pub enum OrderError {
	/// Error that occurs when the requested order does not exist.
	#[error("Order {0} not found")]
	OrderNotFound(String),
	/// Error that occurs when at least one requested product does not
	/// resolve. Reported as a single aggregate failure, not per id.
	#[error("One or more products not found ({found} of {requested} resolved)")]
	ProductNotFound { requested: usize, found: usize },
	/// Error that occurs when an order is created with no items.
	#[error("Order must contain at least one item")]
	EmptyOrder,
	/// Error that occurs when a status change violates the transition policy.
	#[error("{}", transitions::failure_message(.from, .to))]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	/// Error that occurs when an operation is attempted while the order is
	/// in a status that forbids it.
	#[error("Cannot {operation} for order {order_id} with status '{status}'. Order must be 'pending'.")]
	InvalidState {
		operation: &'static str,
		order_id: String,
		status: OrderStatus,
	},
	/// Error that occurs when a payment confirmation covers less than the
	/// order total. Overpayment is accepted and recorded as delivered.
	#[error("Payment amount ({paid}) is less than order total ({total})")]
	Underpaid { paid: Decimal, total: Decimal },
	/// Error propagated from the order store.
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<StorageError> for OrderError {
	fn from(err: StorageError) -> Self {
		OrderError::Storage(err.to_string())
	}
}
