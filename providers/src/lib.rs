//! HTTP collaborators for Lumen.
//!
//! # Architecture
//!
//! Two small clients share one hardened [`reqwest::Client`]:
//!
//! - [`places`] - nearby-search client; resolves the closest landmark of a
//!   category around a coordinate
//! - [`geoip`] - IP-based host geolocation
//!
//! Both clients take their base URL at construction so tests can point them
//! at a local mock server, and the places client takes its credential the
//! same way; nothing in this crate reads the environment.
//!
//! # Error Handling
//!
//! Every failure mode is a distinct [`ProviderError`] variant. An empty,
//! well-formed result set is NOT an error: the nearby search returns
//! `Ok(None)` for it. The transport status is always validated before a
//! response body is interpreted.

pub mod geoip;
pub mod places;

use std::sync::OnceLock;
use std::time::Duration;

pub use lumen_types;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Shared HTTP client with conservative timeouts and no redirect following.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build configured HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

/// Failure modes of the external providers.
///
/// `Transport`, `Http`, `Payload`, and `Credential` all mean "the system is
/// broken", each in a different way an operator can act on. None of them is
/// ever collapsed into the legitimate empty-result outcome.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a response (connect failure, timeout, IO).
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Http {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body does not match the expected shape.
    #[error("{endpoint} returned an unexpected payload: {detail}")]
    Payload {
        endpoint: &'static str,
        detail: String,
    },

    /// The search provider rejected the credential in-band.
    #[error("search provider rejected the API key: {detail}")]
    Credential { detail: String },

    /// The search provider reported a non-OK service status in-band.
    #[error("search provider reported {status}: {detail}")]
    Service { status: String, detail: String },

    /// The geolocation provider produced no usable coordinate.
    #[error("host location unavailable: {detail}")]
    LocationUnavailable { detail: String },
}

/// Read at most 32 KiB of an error response body for diagnostics.
pub(crate) async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.bytes().await {
        Ok(bytes) => {
            let mut body = bytes.to_vec();
            if body.len() > MAX_ERROR_BODY_BYTES {
                body.truncate(MAX_ERROR_BODY_BYTES);
                let text = String::from_utf8_lossy(&body);
                return format!("{text}...(truncated)");
            }
            String::from_utf8_lossy(&body).into_owned()
        }
        Err(_) => String::new(),
    }
}
