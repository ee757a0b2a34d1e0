//! HTTP loading of tour documents.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): returns an error since tours are only fetched in the
//! browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

use super::types::{Tour, TourError};

/// Where the tour page loads its tour from.
pub const DEFAULT_TOUR_URL: &str = "/tours/default.json";

#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16) -> Option<TourError> {
    (!(200..300).contains(&status)).then_some(TourError::Status(status))
}

/// Fetch and validate the tour document at `url`.
///
/// # Errors
///
/// Returns [`TourError::Request`] when the request cannot be sent or read,
/// [`TourError::Status`] for a non-success response and the
/// [`Tour::from_json`] errors for an invalid document.
pub async fn fetch_tour(url: &str) -> Result<Tour, TourError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(|err| TourError::Request(err.to_string()))?;
        if let Some(err) = status_error(resp.status()) {
            return Err(err);
        }
        let body = resp.text().await.map_err(|err| TourError::Request(err.to_string()))?;
        Tour::from_json(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(TourError::Request(format!("{url} is only fetched in the browser")))
    }
}
