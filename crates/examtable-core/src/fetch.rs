//! Remote fallback tier: a one-shot fetch of a static subject document.
//! Any failure is logged and reported as "no data", letting the caller fall
//! through to the built-in sample. Failures are never retried.

use reqwest::Client;
use tracing::warn;

use crate::model::RawSubject;

/// Fetches the static subject document at `url`. Returns `None` on any
/// network, status, or decode failure.
pub async fn fetch_subjects(client: &Client, url: &str) -> Option<Vec<RawSubject>> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(url, error = %err, "subject document fetch failed");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!(url, status = %response.status(), "subject document fetch returned non-success");
        return None;
    }

    match response.json::<Vec<RawSubject>>().await {
        Ok(subjects) => Some(subjects),
        Err(err) => {
            warn!(url, error = %err, "subject document payload was not a subject array");
            None
        }
    }
}
