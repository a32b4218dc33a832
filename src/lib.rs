//! This library can be used to get sales tax rates for US addresses! Meant to be super simple.
//!
//! It gets data from the [Zip-Tax](https://zip-tax.com) `v50` address lookup API, one request
//! per lookup, no retries and no caching. You need your own API key.
//!
//! Note that the async API needs [`tokio`](https://crates.io/crates/tokio), as
//! [`reqwest`](https://crates.io/crates/reqwest) needs `tokio`! Enable the `blocking` feature
//! for `blocking::get` if you don't have a runtime.
//!
//! ```no_run
//! # async fn run() -> Result<(), ziptax::TaxLookupError> {
//! let info = ziptax::get("200 Spectrum Center Dr, Irvine, CA 92618", "my-key").await?;
//! if let Some(result) = info.first_result() {
//!     println!("Rate: {:.2}%", result.sales_tax_percent());
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;
use url::form_urlencoded;

#[cfg(feature = "blocking")]
pub mod blocking;
mod response;

pub use response::{AddressDetail, District, Sourcing, TaxResponse, TaxResult};

/// The only endpoint and API version this crate speaks.
pub const ZIPTAX_ENDPOINT: &str = "https://api.zip-tax.com/request/v50";

/// Error fetching tax info. Nothing is retried here; see [`TaxLookupError::retryable`] if you
/// want to do that yourself.
#[derive(Debug, Error)]
pub enum TaxLookupError {
    /// DNS, connect, TLS, or reading the body failed.
    #[error("failed to make API request")]
    Transport(#[from] reqwest::Error),
    /// Anything but a 200. The body was not read.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
    /// The body was not JSON, or not shaped like a [`TaxResponse`].
    #[error("failed to parse response")]
    Decode(#[source] serde_json::Error),
}

impl TaxLookupError {
    /// True when trying the same request again could plausibly work.
    pub fn retryable(&self) -> bool {
        match self {
            TaxLookupError::Transport(e) => !e.is_builder(),
            TaxLookupError::UnexpectedStatus(status) => {
                *status == 429 || (500..600).contains(status)
            }
            TaxLookupError::Decode(_) => false,
        }
    }
}

/// Looks up sales tax for addresses with one API key.
///
/// Holds nothing but the key and the endpoint, so it is cheap to clone and share.
#[derive(Clone)]
pub struct TaxLookupClient {
    api_key: String,
    endpoint: String,
}

impl fmt::Debug for TaxLookupClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxLookupClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl TaxLookupClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, ZIPTAX_ENDPOINT)
    }

    /// Points the client somewhere other than [`ZIPTAX_ENDPOINT`], e.g. a mock server.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// The full request URL for `address`.
    ///
    /// The address is form encoded as a single value. The key goes in as is, so it must not
    /// contain anything that needs escaping.
    pub fn url(&self, address: &str) -> String {
        let address: String = form_urlencoded::byte_serialize(address.as_bytes()).collect();
        format!("{}?key={}&address={}", self.endpoint, self.api_key, address)
    }

    /// One GET, no retries, no timeout beyond whatever `reqwest` does by default.
    pub async fn get(&self, address: &str) -> Result<TaxResponse, TaxLookupError> {
        debug!("looking up sales tax for {:?} at {}", address, self.endpoint);
        let response = reqwest::get(self.url(address)).await?;
        check_status(response.status())?;
        let body = response.bytes().await?;
        decode(&body)
    }
}

/// Single lookup against [`ZIPTAX_ENDPOINT`].
pub async fn get(address: &str, api_key: &str) -> Result<TaxResponse, TaxLookupError> {
    TaxLookupClient::new(api_key).get(address).await
}

fn check_status(status: StatusCode) -> Result<(), TaxLookupError> {
    debug!("zip-tax answered {}", status);
    if status != StatusCode::OK {
        warn!("zip-tax returned {}, not reading body", status);
        return Err(TaxLookupError::UnexpectedStatus(status.as_u16()));
    }
    Ok(())
}

fn decode(body: &[u8]) -> Result<TaxResponse, TaxLookupError> {
    debug!("decoding {} byte body from zip-tax", body.len());
    serde_json::from_slice(body).map_err(TaxLookupError::Decode)
}
