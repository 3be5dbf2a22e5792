//! Main entry point for the kiosk order service.
//!
//! This binary wires the order core to its backing implementations and
//! exposes the workflows over HTTP. Backends are pluggable: the order store
//! and the payment provider are both resolved by name from configuration.

use clap::Parser;
use kiosk_config::Config;
use kiosk_order::OrderService;
use kiosk_payment::PaymentCapability;
use kiosk_storage::implementations::memory::MemoryProductCatalog;
use kiosk_storage::OrderStore;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the kiosk service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the kiosk service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Resolves the configured store and payment implementations
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.init();

	tracing::info!("Started kiosk service");

	let config = Config::from_file(args.config.to_str().unwrap()).await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let store = build_order_store(&config)?;
	let payment = build_payment_capability(&config)?;
	let catalog = Arc::new(MemoryProductCatalog::new(config.catalog.products.clone()));
	tracing::info!(
		storage = %config.storage.primary,
		payment = payment.is_some(),
		products = config.catalog.products.len(),
		"Wired order core"
	);

	let orders = Arc::new(OrderService::new(store.clone(), catalog, payment));

	let api_config = match &config.api {
		Some(api) if api.enabled => api.clone(),
		_ => {
			tracing::warn!("API server disabled in configuration, nothing to serve");
			return Ok(());
		}
	};

	server::start_server(api_config, orders, store).await?;

	tracing::info!("Stopped kiosk service");
	Ok(())
}

/// Resolves the order store named by `storage.primary`.
fn build_order_store(config: &Config) -> Result<Arc<dyn OrderStore>, Box<dyn std::error::Error>> {
	let factory = kiosk_storage::get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == config.storage.primary)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("Unknown storage implementation '{}'", config.storage.primary))?;

	let implementation_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.cloned()
		.unwrap_or_else(|| toml::Value::Table(Default::default()));

	Ok(Arc::from(factory(&implementation_config)?))
}

/// Resolves the payment capability named by `payment.primary`, when the
/// section is present. A missing section simply means QR generation will use
/// the deterministic fallback.
fn build_payment_capability(
	config: &Config,
) -> Result<Option<Arc<dyn PaymentCapability>>, Box<dyn std::error::Error>> {
	let Some(payment) = &config.payment else {
		return Ok(None);
	};

	let factory = kiosk_payment::get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == payment.primary)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("Unknown payment implementation '{}'", payment.primary))?;

	let implementation_config = payment
		.implementations
		.get(&payment.primary)
		.cloned()
		.unwrap_or_else(|| toml::Value::Table(Default::default()));

	Ok(Some(Arc::from(factory(&implementation_config)?)))
}
