//! Order factory.
//!
//! Builds a new order aggregate from a customer reference and priced line
//! items. Product name, description, and unit price are copied here, at
//! order time, so later catalog edits never rewrite order history. The
//! factory only constructs; persistence is the caller's concern.

use kiosk_types::{current_timestamp, new_id, Order, OrderItem, OrderStatus, Product};

/// One requested line, paired with the product snapshot it resolves to.
#[derive(Debug, Clone)]
pub struct DraftItem {
	pub product: Product,
	pub quantity: u32,
	pub category_name: String,
}

/// Builds a new `Pending` order from the given draft items.
///
/// Fresh identifiers are generated for the order and for every line item.
pub fn create(customer_id: Option<String>, items: Vec<DraftItem>) -> Order {
	let now = current_timestamp();

	let items = items
		.into_iter()
		.map(|draft| OrderItem {
			id: new_id(),
			product_id: draft.product.id,
			product_name: draft.product.name,
			product_description: draft.product.description,
			unit_price: draft.product.price,
			quantity: draft.quantity,
			category_name: draft.category_name,
		})
		.collect();

	Order {
		id: new_id(),
		customer_id,
		status: OrderStatus::Pending,
		items,
		transaction_code: None,
		paid_at: None,
		amount_paid: None,
		created_at: now,
		updated_at: now,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;

	fn draft(id: &str, price: Decimal, quantity: u32) -> DraftItem {
		DraftItem {
			product: Product {
				id: id.to_string(),
				name: format!("Product {id}"),
				description: format!("Description {id}"),
				price,
				category_name: Some("Lanche".to_string()),
			},
			quantity,
			category_name: "Lanche".to_string(),
		}
	}

	#[test]
	fn new_orders_start_pending_with_fresh_ids() {
		let order = create(
			Some("customer-1".to_string()),
			vec![draft("p1", Decimal::new(1000, 2), 1)],
		);

		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.customer_id.as_deref(), Some("customer-1"));
		assert!(!order.id.is_empty());
		assert_ne!(order.id, order.items[0].id);
		assert!(order.transaction_code.is_none());
		assert!(order.paid_at.is_none());
		assert!(order.amount_paid.is_none());
	}

	#[test]
	fn items_snapshot_product_data_in_order() {
		let order = create(
			None,
			vec![
				draft("p1", Decimal::new(1050, 2), 2),
				draft("p2", Decimal::new(499, 2), 1),
			],
		);

		assert_eq!(order.items.len(), 2);
		assert_eq!(order.items[0].product_id, "p1");
		assert_eq!(order.items[0].product_name, "Product p1");
		assert_eq!(order.items[1].product_id, "p2");
		assert_eq!(order.items[1].unit_price, Decimal::new(499, 2));
	}

	#[test]
	fn total_equals_sum_of_unit_price_times_quantity() {
		for item_count in 1..=5u32 {
			let drafts: Vec<DraftItem> = (0..item_count)
				.map(|i| draft(&format!("p{i}"), Decimal::new(250 + i64::from(i) * 100, 2), i + 1))
				.collect();
			let expected: Decimal = drafts
				.iter()
				.map(|d| d.product.price * Decimal::from(d.quantity))
				.sum();

			let order = create(None, drafts);
			assert_eq!(order.total(), expected);
		}
	}
}
