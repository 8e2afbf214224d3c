use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::DispatchError;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Builds the outgoing header map from caller-supplied pairs plus the
/// configured API key. Ordered merge: caller headers first, then the API key,
/// so a caller-supplied `x-api-key` never wins over the configured one.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidHeader`] when a name or value is not a
/// legal HTTP header.
pub(crate) fn merge_headers(
    caller: &[(String, String)],
    api_key: Option<&str>,
) -> Result<HeaderMap, DispatchError> {
    let mut merged = HeaderMap::with_capacity(caller.len().saturating_add(1));

    for (name, value) in caller {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| DispatchError::InvalidHeader {
                name: name.clone(),
                source: Box::new(err),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|err| DispatchError::InvalidHeader {
                name: name.clone(),
                source: Box::new(err),
            })?;
        merged.insert(header_name, header_value);
    }

    if let Some(key) = api_key {
        let value = HeaderValue::from_str(key).map_err(|err| DispatchError::InvalidHeader {
            name: API_KEY_HEADER.as_str().to_owned(),
            source: Box::new(err),
        })?;
        merged.insert(API_KEY_HEADER, value);
    }

    Ok(merged)
}
