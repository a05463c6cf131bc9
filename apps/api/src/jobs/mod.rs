//! Job recommendation aggregation: provider adapters, the tiered executor,
//! deduplication and the synthetic fallback.

pub mod aggregator;
pub mod dedup;
pub mod executor;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod test_support;
