//! Typed accessor over the Agify response shapes.
//!
//! Thin façade over [`World::dispatch`]: named lookups instead of raw query
//! construction, with strict decoding into the record types below.
use http::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AgifyResult, DecodeError};
use crate::http::{RawResponse, RequestOptions, World};

/// Single-name estimation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRecord {
    pub name: String,
    pub age: Option<u32>,
    pub count: u64,
}

/// Estimation result narrowed to one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedAgeRecord {
    pub name: String,
    pub age: Option<u32>,
    pub count: u64,
    pub country_id: String,
}

/// Error body the API returns on 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Named lookups borrowing one dispatcher for their lifetime.
#[derive(Debug)]
pub struct SchemaClient<'a> {
    world: &'a mut World,
}

impl<'a> SchemaClient<'a> {
    #[must_use]
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    /// Estimates the age of a single name.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures and [`DecodeError`] when the body is not
    /// a single record.
    pub async fn estimate(
        &mut self,
        name: &str,
        headers: &[(String, String)],
    ) -> AgifyResult<AgeRecord> {
        let options = RequestOptions {
            query: vec![("name".to_owned(), name.to_owned())],
            headers: headers.to_vec(),
            ..RequestOptions::default()
        };
        let response = self.world.dispatch(Method::GET, "/", options).await?;
        Ok(decode_single(&response)?)
    }

    /// Estimates the age of a single name within one country.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures and [`DecodeError`] when the body is not
    /// a localized record.
    pub async fn estimate_localized(
        &mut self,
        name: &str,
        country_id: &str,
        headers: &[(String, String)],
    ) -> AgifyResult<LocalizedAgeRecord> {
        let options = RequestOptions {
            query: vec![
                ("name".to_owned(), name.to_owned()),
                ("country_id".to_owned(), country_id.to_owned()),
            ],
            headers: headers.to_vec(),
            ..RequestOptions::default()
        };
        let response = self.world.dispatch(Method::GET, "/", options).await?;
        let record: LocalizedAgeRecord = response.json()?;
        Ok(record)
    }

    /// Estimates ages for a batch of names in one request, preserving input
    /// order in the returned records.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures; [`DecodeError`] when the response is not
    /// a 200 JSON array of records.
    pub async fn estimate_batch(
        &mut self,
        names: &[String],
        headers: &[(String, String)],
    ) -> AgifyResult<Vec<AgeRecord>> {
        let options = RequestOptions {
            query: batch_query(names, None),
            headers: headers.to_vec(),
            ..RequestOptions::default()
        };
        let response = self.world.dispatch(Method::GET, "/", options).await?;
        debug!("Batch lookup of {} names -> {}", names.len(), response.status);
        Ok(decode_batch(&response)?)
    }

    /// Batch estimation narrowed to one country, a single trailing
    /// `country_id` applied to the whole batch.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures; [`DecodeError`] when the response is not
    /// a 200 JSON array of localized records.
    pub async fn estimate_batch_localized(
        &mut self,
        names: &[String],
        country_id: &str,
        headers: &[(String, String)],
    ) -> AgifyResult<Vec<LocalizedAgeRecord>> {
        let options = RequestOptions {
            query: batch_query(names, Some(country_id)),
            headers: headers.to_vec(),
            ..RequestOptions::default()
        };
        let response = self.world.dispatch(Method::GET, "/", options).await?;
        Ok(decode_batch(&response)?)
    }
}

/// Builds the repeated `name[]` query for a batch, preserving input order,
/// with an optional trailing `country_id`.
#[must_use]
pub fn batch_query(names: &[String], country_id: Option<&str>) -> Vec<(String, String)> {
    let mut query: Vec<(String, String)> = names
        .iter()
        .map(|name| ("name[]".to_owned(), name.clone()))
        .collect();
    if let Some(country) = country_id {
        query.push(("country_id".to_owned(), country.to_owned()));
    }
    query
}

/// Decodes a single-record body.
///
/// # Errors
///
/// Returns [`DecodeError`] for malformed JSON or a non-record shape.
pub fn decode_single(response: &RawResponse) -> Result<AgeRecord, DecodeError> {
    response.json()
}

/// Decodes a batch body after asserting the 200/JSON/array contract.
///
/// # Errors
///
/// Returns [`DecodeError::UnexpectedStatus`], [`DecodeError::UnexpectedContentType`],
/// [`DecodeError::NotAnArray`], or a decode failure for the element shape.
pub fn decode_batch<T: serde::de::DeserializeOwned>(
    response: &RawResponse,
) -> Result<Vec<T>, DecodeError> {
    if response.status != reqwest::StatusCode::OK {
        return Err(DecodeError::UnexpectedStatus {
            status: response.status.as_u16(),
        });
    }
    if !response.is_json() {
        return Err(DecodeError::UnexpectedContentType {
            found: response.content_type().unwrap_or("<missing>").to_owned(),
        });
    }
    let value: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(|source| DecodeError::Malformed { source })?;
    if !value.is_array() {
        return Err(DecodeError::NotAnArray {
            found: json_kind(&value),
        });
    }
    serde_json::from_value(value).map_err(|source| DecodeError::Shape { source })
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
