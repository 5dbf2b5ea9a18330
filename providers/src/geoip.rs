//! IP-based host geolocation.
//!
//! Best-effort: asks an ipinfo-style endpoint where this machine appears to
//! be and parses the `loc` field (`"lat,lng"`). The result seeds the map pin
//! and the nearby search; no precision beyond "the provider's best guess" is
//! promised.

use serde::Deserialize;

use lumen_types::Coordinate;

use crate::{ProviderError, http_client, read_capped_error_body};

/// Canonical geolocation endpoint.
pub const GEOIP_API_BASE_URL: &str = "https://ipinfo.io";

const ENDPOINT: &str = "ip geolocation";

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    #[serde(default)]
    loc: Option<String>,
}

/// Client for the IP geolocation lookup.
#[derive(Debug, Clone)]
pub struct IpLocator {
    base_url: String,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpLocator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(GEOIP_API_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Look up the host's coordinate.
    pub async fn locate(&self) -> Result<Coordinate, ProviderError> {
        let url = format!("{}/json", self.base_url);
        tracing::debug!("Looking up host location by IP");

        let response = http_client()
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            return Err(ProviderError::Http {
                endpoint: ENDPOINT,
                status,
                body,
            });
        }

        let payload: GeoIpResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Payload {
                    endpoint: ENDPOINT,
                    detail: source.to_string(),
                })?;

        let loc = payload.loc.ok_or_else(|| ProviderError::LocationUnavailable {
            detail: "response carried no 'loc' field".to_string(),
        })?;
        parse_loc(&loc)
    }
}

/// Parse the provider's `"lat,lng"` string into a validated coordinate.
fn parse_loc(loc: &str) -> Result<Coordinate, ProviderError> {
    let unavailable = |detail: String| ProviderError::LocationUnavailable { detail };

    let (lat, lng) = loc
        .split_once(',')
        .ok_or_else(|| unavailable(format!("malformed loc '{loc}'")))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| unavailable(format!("malformed latitude in loc '{loc}'")))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .map_err(|_| unavailable(format!("malformed longitude in loc '{loc}'")))?;

    Coordinate::new(latitude, longitude).map_err(|e| unavailable(e.to_string()))
}
