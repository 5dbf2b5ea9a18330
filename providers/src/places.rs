//! Nearby-search client: the landmark resolver's provider half.
//!
//! One GET per resolution against the places nearby-search endpoint,
//! constrained to a fixed radius around the given coordinate and filtered to
//! one place type. The provider's own ranking is trusted: the first result
//! is the answer, with no local distance computation or tie-breaking. There
//! is no caching and no retry; a resolution is exactly one request.

use serde::Deserialize;

use lumen_types::{ApiKey, Coordinate, Landmark, PlaceKind};

use crate::{ProviderError, http_client, read_capped_error_body};

/// Canonical places API host.
pub const PLACES_API_BASE_URL: &str = "https://maps.googleapis.com";

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

/// Fixed search radius, in meters.
pub const SEARCH_RADIUS_METERS: u32 = 500;

const ENDPOINT: &str = "nearby search";

/// Service statuses that mean "the request was handled"; everything else is
/// a provider-side failure. `ZERO_RESULTS` is the well-formed empty outcome.
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    results: Vec<NearbyResult>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    name: String,
}

/// Client for the nearby-search capability.
///
/// The credential is supplied at construction and the base URL is
/// injectable, so tests run against a mock server with a fixture key.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    api_key: ApiKey,
    base_url: String,
}

impl PlacesClient {
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, PLACES_API_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Resolve the nearest landmark of `kind` around `location`.
    ///
    /// `Ok(None)` means the provider found nothing within the radius; every
    /// failure mode surfaces as a distinct [`ProviderError`].
    pub async fn nearest(
        &self,
        location: Coordinate,
        kind: PlaceKind,
    ) -> Result<Option<Landmark>, ProviderError> {
        let url = format!("{}{NEARBY_SEARCH_PATH}", self.base_url);
        tracing::debug!(%location, kind = kind.as_str(), "Resolving nearest landmark");

        let location_param = location.to_string();
        let radius_param = SEARCH_RADIUS_METERS.to_string();
        let response = http_client()
            .get(&url)
            .query(&[
                ("location", location_param.as_str()),
                ("radius", radius_param.as_str()),
                ("type", kind.as_str()),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            tracing::warn!(%status, "Nearby search returned an error status");
            return Err(ProviderError::Http {
                endpoint: ENDPOINT,
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        let payload: NearbyResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Payload {
                endpoint: ENDPOINT,
                detail: e.to_string(),
            })?;

        check_service_status(&payload)?;

        Ok(payload
            .results
            .into_iter()
            .next()
            .map(|result| Landmark::new(result.name)))
    }
}

/// The nearby-search API reports request-level failures in-band with HTTP
/// 200. A denied credential must not masquerade as "nothing nearby".
fn check_service_status(payload: &NearbyResponse) -> Result<(), ProviderError> {
    let Some(status) = payload.status.as_deref() else {
        return Ok(());
    };
    if status == STATUS_OK || status == STATUS_ZERO_RESULTS {
        return Ok(());
    }

    let detail = payload
        .error_message
        .clone()
        .unwrap_or_else(|| "no detail provided".to_string());
    if status == STATUS_REQUEST_DENIED {
        return Err(ProviderError::Credential { detail });
    }
    Err(ProviderError::Service {
        status: status.to_string(),
        detail,
    })
}
