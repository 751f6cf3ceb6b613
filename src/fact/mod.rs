//! Random fact retrieval and the append-only fact log.

/// HTTP client for the random-fact API.
pub mod client;
/// Append-only `date fact` log.
pub mod log;

use crate::foundation::error::FactReelResult;

pub use client::{DEFAULT_FACT_ENDPOINT, FactClient, FactResponse};
pub use log::FactLog;

/// Fetch one fact and record it in `log` under today's local date.
///
/// The log append happens before anything else consumes the fact, so a later failure in the
/// pipeline still leaves the fact recorded.
#[tracing::instrument(skip_all)]
pub fn get_random_fact(client: &FactClient, log: &FactLog) -> FactReelResult<String> {
    let fact = client.fetch()?;
    let today = chrono::Local::now().date_naive();
    log.append(today, &fact)?;
    tracing::info!(len = fact.len(), "fetched fact");
    Ok(fact)
}

#[cfg(test)]
#[path = "../../tests/unit/fact/fetch.rs"]
mod tests;
