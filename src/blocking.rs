//! Blocking lookups for callers without an async runtime. The calling thread waits until the
//! exchange is done.
//!
//! Don't call these from inside an async context; `reqwest` will panic.

use crate::{check_status, decode, TaxLookupClient, TaxLookupError, TaxResponse};

impl TaxLookupClient {
    /// Same as [`TaxLookupClient::get`], but blocks.
    pub fn get_blocking(&self, address: &str) -> Result<TaxResponse, TaxLookupError> {
        debug!("looking up sales tax for {:?} at {} (blocking)", address, self.endpoint);
        let response = reqwest::blocking::get(self.url(address))?;
        check_status(response.status())?;
        let body = response.bytes()?;
        decode(&body)
    }
}

/// Single blocking lookup against [`crate::ZIPTAX_ENDPOINT`].
pub fn get(address: &str, api_key: &str) -> Result<TaxResponse, TaxLookupError> {
    TaxLookupClient::new(api_key).get_blocking(address)
}
