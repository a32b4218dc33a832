//! Records decoded from the Zip-Tax `v50` JSON payload.
//!
//! Field names follow the API exactly (camelCase on the wire). Missing fields decode to
//! their zero value and unknown fields are ignored, so a partial payload never fails to
//! decode as long as the types that *are* present line up. A `null` counts as missing.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Top level of a lookup response.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxResponse {
    /// API schema version, e.g. `"v50"`.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// API level response code. Opaque; it is not the HTTP status.
    #[serde(deserialize_with = "null_as_default")]
    pub r_code: i64,
    /// One entry per matched jurisdiction, in the order the API ranked them.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<TaxResult>,
    #[serde(deserialize_with = "null_as_default")]
    pub address_detail: AddressDetail,
}

impl TaxResponse {
    /// The highest precedence jurisdiction, or `None` if the address matched nothing.
    pub fn first_result(&self) -> Option<&TaxResult> {
        self.results.first()
    }
}

/// Tax breakdown for one jurisdiction. Rates are fractions, so `0.0725` is 7.25%.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxResult {
    #[serde(deserialize_with = "null_as_default")]
    pub geo_postal_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_county: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_state: String,
    /// Combined sales tax rate.
    #[serde(deserialize_with = "null_as_default")]
    pub tax_sales: f64,
    /// Combined use tax rate.
    #[serde(deserialize_with = "null_as_default")]
    pub tax_use: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub txb_service: String,
    #[serde(deserialize_with = "null_as_default")]
    pub txb_freight: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub state_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub city_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub city_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub city_tax_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub county_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub county_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub county_tax_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district1_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district1_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district1_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district2_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district2_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district2_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district3_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district3_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district3_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district4_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district4_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district4_use_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district5_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district5_sales_tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub district5_use_tax: f64,
    /// `"O"` for origin based sourcing, `"D"` for destination based.
    #[serde(deserialize_with = "null_as_default")]
    pub origin_destination: String,
}

/// One filled special tax district slot of a [`TaxResult`].
#[derive(Clone, PartialEq, Debug)]
pub struct District<'a> {
    pub code: &'a str,
    pub sales_tax: f64,
    pub use_tax: f64,
}

/// Whether tax is charged at the seller's or the buyer's location.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sourcing {
    Origin,
    Destination,
}

impl TaxResult {
    /// Combined sales tax as a percentage, e.g. `7.75`.
    pub fn sales_tax_percent(&self) -> f64 {
        self.tax_sales * 100.0
    }

    /// Combined use tax as a percentage.
    pub fn use_tax_percent(&self) -> f64 {
        self.tax_use * 100.0
    }

    /// The district slots that carry a code, in slot order.
    pub fn districts(&self) -> Vec<District<'_>> {
        [
            (&self.district1_code, self.district1_sales_tax, self.district1_use_tax),
            (&self.district2_code, self.district2_sales_tax, self.district2_use_tax),
            (&self.district3_code, self.district3_sales_tax, self.district3_use_tax),
            (&self.district4_code, self.district4_sales_tax, self.district4_use_tax),
            (&self.district5_code, self.district5_sales_tax, self.district5_use_tax),
        ]
        .into_iter()
        .filter(|(code, _, _)| !code.is_empty())
        .map(|(code, sales_tax, use_tax)| District {
            code: code.as_str(),
            sales_tax,
            use_tax,
        })
        .collect()
    }

    pub fn sourcing(&self) -> Option<Sourcing> {
        match self.origin_destination.as_str() {
            "O" => Some(Sourcing::Origin),
            "D" => Some(Sourcing::Destination),
            _ => None,
        }
    }

    pub fn service_taxable(&self) -> bool {
        self.txb_service.eq_ignore_ascii_case("Y")
    }

    pub fn freight_taxable(&self) -> bool {
        self.txb_freight.eq_ignore_ascii_case("Y")
    }
}

/// The address as normalized and geocoded by the API.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub normalized_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub incorporated: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_lng: f64,
}

/// Reads a field the way a missing one would read if the API sent `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Normalized address, coordinates, and the top jurisdiction's sales tax rate, one per line.
impl fmt::Display for TaxResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Normalized Address: {}", self.address_detail.normalized_address)?;
        writeln!(
            f,
            "Address Lat/Lng: {:.6}, {:.6}",
            self.address_detail.geo_lat, self.address_detail.geo_lng
        )?;
        match self.first_result() {
            Some(result) => write!(f, "Rate: {:.2}%", result.sales_tax_percent()),
            None => write!(f, "Rate: no jurisdiction found"),
        }
    }
}
