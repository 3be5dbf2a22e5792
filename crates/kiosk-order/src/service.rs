//! Order workflows.
//!
//! `OrderService` carries every order lifecycle operation: creating orders
//! from the product catalog, moving them through the status policy,
//! confirming payments delivered by the webhook layer, deriving the kitchen
//! queue, and generating payment QR codes. Each workflow loads and validates
//! before it writes; a workflow that fails validation writes nothing, and a
//! workflow that succeeds writes exactly once.

use crate::{factory, qr, transitions, OrderError};
use kiosk_payment::PaymentCapability;
use kiosk_storage::{OrderStore, ProductCatalog};
use kiosk_types::{
	current_timestamp, Order, OrderStatus, OrderStatusFilter, PaymentConfirmation, PaymentQrCode,
	QrCodeItem, QrCodeRequest,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request to create a new order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	/// Optional customer reference; orders may be anonymous.
	pub customer_id: Option<String>,
	/// Requested lines, by product id.
	pub items: Vec<CreateOrderItem>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
	pub product_id: String,
	pub quantity: u32,
}

/// Service carrying the order lifecycle workflows.
///
/// Holds the persistence ports and, optionally, the payment capability. The
/// capability is deliberately optional: QR generation degrades to a
/// deterministic fallback payload when it is absent or failing.
pub struct OrderService {
	orders: Arc<dyn OrderStore>,
	catalog: Arc<dyn ProductCatalog>,
	payment: Option<Arc<dyn PaymentCapability>>,
}

impl OrderService {
	/// Creates a new OrderService over the given ports.
	pub fn new(
		orders: Arc<dyn OrderStore>,
		catalog: Arc<dyn ProductCatalog>,
		payment: Option<Arc<dyn PaymentCapability>>,
	) -> Self {
		Self {
			orders,
			catalog,
			payment,
		}
	}

	/// Creates a new order from the requested product lines.
	///
	/// All distinct product ids are fetched in one batch; if any id fails to
	/// resolve the whole request fails with a single aggregate error and
	/// nothing is written. Category names fall back to `"Unknown"` when the
	/// product has none.
	pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
		if request.items.is_empty() {
			return Err(OrderError::EmptyOrder);
		}

		let mut product_ids: Vec<String> = Vec::new();
		for item in &request.items {
			if !product_ids.contains(&item.product_id) {
				product_ids.push(item.product_id.clone());
			}
		}

		let products = self.catalog.find_many_by_ids(&product_ids).await?;
		if products.len() != product_ids.len() {
			return Err(OrderError::ProductNotFound {
				requested: product_ids.len(),
				found: products.len(),
			});
		}

		let mut drafts = Vec::with_capacity(request.items.len());
		for item in &request.items {
			let product = products
				.iter()
				.find(|p| p.id == item.product_id)
				.ok_or(OrderError::ProductNotFound {
					requested: product_ids.len(),
					found: products.len(),
				})?;
			drafts.push(factory::DraftItem {
				product: product.clone(),
				quantity: item.quantity,
				category_name: product
					.category_name
					.clone()
					.unwrap_or_else(|| "Unknown".to_string()),
			});
		}

		let order = factory::create(request.customer_id, drafts);
		tracing::info!(order_id = %order.id, items = order.items.len(), "Creating order");

		Ok(self.orders.save(&order).await?)
	}

	/// Moves an order to a new status under the transition policy.
	pub async fn update_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, OrderError> {
		let mut order = self.load(order_id).await?;

		transitions::validate_transition(order.status, new_status)?;

		tracing::info!(order_id = %order.id, from = %order.status, to = %new_status, "Updating order status");
		order.status = new_status;
		order.updated_at = current_timestamp();

		Ok(self.orders.save(&order).await?)
	}

	/// Applies a payment confirmation delivered by the webhook layer.
	///
	/// Only `pending` orders accept a confirmation; this is the idempotency
	/// boundary for duplicate webhook deliveries. A second confirmation for
	/// an already-`received` order is rejected, never silently reprocessed.
	/// Underpayment is rejected; overpayment is recorded as delivered. The
	/// payment fields and the transition to `received` land in one save.
	pub async fn confirm_payment(
		&self,
		confirmation: PaymentConfirmation,
	) -> Result<(), OrderError> {
		tracing::info!(
			transaction_code = %confirmation.transaction_code,
			order_id = %confirmation.order_id,
			"Processing payment confirmation"
		);

		let mut order = self.load(&confirmation.order_id).await?;

		if order.status != OrderStatus::Pending {
			return Err(OrderError::InvalidState {
				operation: "process payment",
				order_id: order.id,
				status: order.status,
			});
		}

		let total = order.total();
		if confirmation.amount_paid < total {
			return Err(OrderError::Underpaid {
				paid: confirmation.amount_paid,
				total,
			});
		}

		order.set_payment_details(
			confirmation.transaction_code,
			confirmation.paid_at,
			confirmation.amount_paid,
		);
		order.status = OrderStatus::Received;
		order.updated_at = current_timestamp();

		self.orders.save(&order).await?;
		tracing::info!(order_id = %order.id, "Order marked as paid and received");
		Ok(())
	}

	/// Derives the kitchen work queue.
	///
	/// Priority is fixed: every `ready` order first, then `preparing`, then
	/// `received`; `pending` and `finished` never appear. Within a bucket the
	/// store already returns oldest-created-first: that ordering is a
	/// documented precondition of `OrderStore::find_by_status`, trusted here
	/// rather than recomputed.
	pub async fn kitchen_queue(&self) -> Result<Vec<Order>, OrderError> {
		let mut queue = self.orders.find_by_status(OrderStatus::Ready).await?;
		queue.extend(self.orders.find_by_status(OrderStatus::Preparing).await?);
		queue.extend(self.orders.find_by_status(OrderStatus::Received).await?);
		Ok(queue)
	}

	/// Generates the payment QR code for a pending order.
	///
	/// When a payment capability is wired its payload wins; any failure from
	/// it is logged and swallowed so checkout stays available on a degraded
	/// provider. The order itself is never modified: the transition to
	/// `received` happens later, through `confirm_payment`.
	pub async fn payment_qr_code(&self, order_id: &str) -> Result<PaymentQrCode, OrderError> {
		let order = self.load(order_id).await?;

		if order.status != OrderStatus::Pending {
			return Err(OrderError::InvalidState {
				operation: "generate a payment QR code",
				order_id: order.id,
				status: order.status,
			});
		}

		let total = order.total();

		if let Some(payment) = &self.payment {
			let short_id: String = order_id.chars().take(8).collect();
			let request = QrCodeRequest {
				order_id: order_id.to_string(),
				amount: total,
				title: format!("Order #{short_id}"),
				description: format!("Kiosk order with {} item(s)", order.items.len()),
				items: order
					.items
					.iter()
					.map(|item| QrCodeItem {
						category: item.category_name.clone(),
						title: item.product_name.clone(),
						description: item.product_description.clone(),
						quantity: item.quantity,
						unit_price: item.unit_price,
						total_amount: item.total_price(),
					})
					.collect(),
			};

			match payment.generate_qr_code(&request).await {
				Ok(response) => {
					tracing::info!(order_id = %order_id, "Provider QR code generated, awaiting payment via webhook");
					return Ok(PaymentQrCode {
						qr_data: response.qr_data,
						in_store_order_id: response.in_store_order_id,
						amount: total,
					});
				}
				Err(err) => {
					tracing::warn!(order_id = %order_id, error = %err, "Payment capability failed, falling back to synthetic QR code");
				}
			}
		}

		tracing::info!(order_id = %order_id, "Synthetic QR code generated, awaiting payment via webhook");
		Ok(PaymentQrCode {
			qr_data: qr::fallback_payload(order_id, total),
			in_store_order_id: order_id.to_string(),
			amount: total,
		})
	}

	/// Looks up a single order. `None` when absent.
	pub async fn get_order(&self, order_id: &str) -> Result<Option<Order>, OrderError> {
		Ok(self.orders.find_by_id(order_id).await?)
	}

	/// Lists orders, optionally restricted to one status.
	pub async fn list_orders(&self, filter: OrderStatusFilter) -> Result<Vec<Order>, OrderError> {
		match filter.as_status() {
			Some(status) => Ok(self.orders.find_by_status(status).await?),
			None => Ok(self.orders.find_all().await?),
		}
	}

	async fn load(&self, order_id: &str) -> Result<Order, OrderError> {
		self.orders
			.find_by_id(order_id)
			.await?
			.ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
	}
}
