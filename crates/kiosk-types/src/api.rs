//! API types for HTTP endpoints and error envelopes.

use serde::{Deserialize, Serialize};

/// JSON error envelope returned by every API endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error code, e.g. "ORDER_NOT_FOUND".
	pub error: String,
	/// Human-readable description of the failure.
	pub message: String,
	/// Optional structured detail.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}
