//! Deterministic fallback QR payload.
//!
//! When no payment capability is wired, or the wired one fails, checkout
//! still needs a scannable payload. This module synthesizes an EMV-style
//! string embedding the order id and total, finished with a four-digit
//! checksum over the payload bytes.

use rust_decimal::Decimal;

/// Synthesizes the fallback QR payload for an order.
pub fn fallback_payload(order_id: &str, total: Decimal) -> String {
	let amount = format!("{:0>2}", total);
	let data = format!(
		"00020101021243650016COM.MERCADOLIBRE02013063{order_id}52040000530398654{amount}5802BR5909FoodKiosk6009SAO PAULO62070503***6304"
	);
	let checksum = checksum(&data);
	format!("{data}{checksum}")
}

/// Sum of the payload's byte values mod 10000, zero-padded to four digits.
pub fn checksum(data: &str) -> String {
	let sum: u64 = data.bytes().map(u64::from).sum();
	format!("{:04}", sum % 10000)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checksum_is_four_digits_and_deterministic() {
		let first = checksum("00020101021243650016");
		let second = checksum("00020101021243650016");
		assert_eq!(first, second);
		assert_eq!(first.len(), 4);
		assert!(first.chars().all(|c| c.is_ascii_digit()));
	}

	#[test]
	fn checksum_wraps_at_ten_thousand() {
		// 200 'z' bytes sum to 24400, which must wrap to 4400.
		let data = "z".repeat(200);
		assert_eq!(checksum(&data), "4400");
	}

	#[test]
	fn payload_embeds_order_id_and_total() {
		let payload = fallback_payload("order-42", Decimal::new(2599, 2));
		assert!(payload.contains("order-42"));
		assert!(payload.contains("25.99"));
		// Payload ends with the checksum of everything before it.
		let (data, tail) = payload.split_at(payload.len() - 4);
		assert_eq!(tail, checksum(data));
	}

	#[test]
	fn single_digit_totals_are_zero_padded() {
		let payload = fallback_payload("order-1", Decimal::new(5, 0));
		assert!(payload.contains("654055802BR"));
	}
}
