//! Maps a NASA POWER climatology response onto the domain model
//!
//! Decoding is all-or-nothing: every required field must be present and
//! well-formed or the whole payload is rejected. Failures name the offending
//! field so callers can tell a truncated body from a schema change.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::feed::{IrradianceFeed, MonthlyValues};

/// The only status accepted as a successful response
const OK_200: u16 = 200;

/// Path reported when the body is not JSON at all
const ROOT_FIELD: &str = "$";

/// Wire keys of the three irradiance series
const DNI_KEY: &str = "ALLSKY_SFC_SW_DNI";
const DWN_KEY: &str = "ALLSKY_SFC_SW_DWN";
const DIFF_KEY: &str = "ALLSKY_SFC_SW_DIFF";

/// Reasons a response cannot be mapped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    /// The server answered with something other than 200
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// A required field is missing or has the wrong shape
    #[error("Malformed payload at '{field}': {reason}")]
    MalformedPayload { field: String, reason: String },
}

impl MapperError {
    fn malformed(field: impl Into<String>, reason: impl ToString) -> Self {
        MapperError::MalformedPayload {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Stateless translator from wire bytes to [`IrradianceFeed`]
pub struct FeedItemsMapper;

impl FeedItemsMapper {
    /// Maps a response body and status code to a feed
    ///
    /// # Returns
    /// * `Ok(IrradianceFeed)` for a 200 response with a complete payload
    /// * `Err(MapperError::UnexpectedStatus)` for any other status
    /// * `Err(MapperError::MalformedPayload)` naming the first bad field
    pub fn map(body: &[u8], status: u16) -> Result<IrradianceFeed, MapperError> {
        if status != OK_200 {
            return Err(MapperError::UnexpectedStatus(status));
        }

        let root: Value =
            serde_json::from_slice(body).map_err(|e| MapperError::malformed(ROOT_FIELD, e))?;

        let coordinates: Vec<f64> = decode_field(&root, &["geometry", "coordinates"])?;
        let direct_normal: MonthlyValues =
            decode_field(&root, &["properties", "parameter", DNI_KEY])?;
        let global_horizontal: MonthlyValues =
            decode_field(&root, &["properties", "parameter", DWN_KEY])?;
        let diffuse_horizontal: MonthlyValues =
            decode_field(&root, &["properties", "parameter", DIFF_KEY])?;

        Ok(IrradianceFeed::new(
            coordinates,
            direct_normal,
            global_horizontal,
            diffuse_horizontal,
        ))
    }
}

/// Walks `path` from `root` and decodes the value found there
fn decode_field<T: DeserializeOwned>(root: &Value, path: &[&str]) -> Result<T, MapperError> {
    let field = path.join(".");

    let mut node = root;
    for key in path {
        node = node
            .get(key)
            .ok_or_else(|| MapperError::malformed(&field, "missing field"))?;
    }

    <T as Deserialize>::deserialize(node).map_err(|e| MapperError::malformed(field, e))
}
