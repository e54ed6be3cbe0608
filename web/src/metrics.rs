//! Prometheus export for the storefront metrics.
//!
//! The core and store crates only talk to the `metrics` facade. Installing
//! the recorder here is what turns those calls into scrapeable series:
//!
//! - `storefront.ledger.purchases` (counter): purchases served
//! - `storefront.store.fetch` (counter, `collection`/`outcome` labels)
//! - `storefront.store.fetch_duration_seconds` (histogram, `collection` label)

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

pub use metrics_exporter_prometheus::PrometheusHandle;

/// Histogram buckets for store fetch latency, in seconds.
const FETCH_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Install the process-wide Prometheus recorder and describe the storefront
/// metrics.
///
/// Call once per process; the returned handle renders the scrape body.
///
/// # Errors
///
/// Returns [`BuildError`] if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            FETCH_BUCKETS,
        )?
        .install_recorder()?;

    describe_metrics();
    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(
        "storefront.ledger.purchases",
        "Purchases returned by the purchase ledger"
    );
    describe_counter!(
        "storefront.store.fetch",
        "Collection fetches against the backing store"
    );
    describe_histogram!(
        "storefront.store.fetch_duration_seconds",
        "Time taken to fetch one collection"
    );
}
