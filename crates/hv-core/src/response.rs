//! Response envelope for a single API call.
//!
//! Every accessor call produces an [`ApiResponse`]: the HTTP status (kept in
//! its textual form), the parsed payload if there is one, and the response
//! headers as [`Metadata`]. Aggregations classify calls with
//! [`ApiResponse::is_success`] and rewrap derived payloads without touching
//! the status or metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const TYPE_NAME: &str = "ApiResponse";

/// Errors from string-keyed property access on an [`ApiResponse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The name is neither a reserved field nor a present metadata key.
    #[error("unknown property {type_name}::{property}")]
    Unknown {
        type_name: &'static str,
        property: String,
    },

    /// The value kind does not match the reserved field being written.
    #[error("property {type_name}::{property} cannot be set from a {found} value")]
    Mismatch {
        type_name: &'static str,
        property: &'static str,
        found: &'static str,
    },
}

impl PropertyError {
    fn unknown(property: &str) -> Self {
        Self::Unknown {
            type_name: TYPE_NAME,
            property: property.to_string(),
        }
    }
}

/// HTTP-status-shaped code, stored as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff the first character is `2`.
    pub fn is_success(&self) -> bool {
        self.0.starts_with('2')
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code.to_string())
    }
}

impl From<&str> for StatusCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response headers keyed by lower-cased header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a header by name, ignoring case.
    ///
    /// `None` means the header was absent; `Some("")` means it was sent
    /// with an empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (name, value) in iter {
            metadata.insert(name, value);
        }
        metadata
    }
}

/// Reserved envelope fields, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    StatusCode,
    Payload,
    Metadata,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "status_code" | "statusCode" | "code" => Some(Self::StatusCode),
            "payload" | "data" => Some(Self::Payload),
            "metadata" | "headers" => Some(Self::Metadata),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::StatusCode => "status_code",
            Self::Payload => "payload",
            Self::Metadata => "metadata",
        }
    }
}

/// A property read through [`ApiResponse::get`].
#[derive(Debug, PartialEq)]
pub enum Property<'a, T> {
    StatusCode(&'a StatusCode),
    Payload(Option<&'a T>),
    Metadata(Option<&'a Metadata>),
    /// A header value found in the metadata.
    Header(&'a str),
}

/// A value written through [`ApiResponse::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<T> {
    StatusCode(StatusCode),
    Payload(Option<T>),
    Metadata(Option<Metadata>),
}

impl<T> PropertyValue<T> {
    const fn kind(&self) -> Field {
        match self {
            Self::StatusCode(_) => Field::StatusCode,
            Self::Payload(_) => Field::Payload,
            Self::Metadata(_) => Field::Metadata,
        }
    }
}

/// Outcome of one remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status_code: StatusCode,
    payload: Option<T>,
    metadata: Option<Metadata>,
}

impl<T> ApiResponse<T> {
    pub fn new(
        status_code: impl Into<StatusCode>,
        payload: Option<T>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            status_code: status_code.into(),
            payload,
            metadata,
        }
    }

    /// A successful response carrying `payload` and no metadata.
    pub fn ok(payload: T) -> Self {
        Self::new(200_u16, Some(payload), None)
    }

    /// A response with no payload and no metadata.
    pub fn status(status_code: impl Into<StatusCode>) -> Self {
        Self::new(status_code, None, None)
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub const fn status_code(&self) -> &StatusCode {
        &self.status_code
    }

    pub const fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    pub const fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Looks up a single response header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.get(name))
    }

    /// Replaces the payload, keeping status and metadata.
    pub fn set_payload(&mut self, payload: Option<T>) {
        self.payload = payload;
    }

    pub fn take_payload(&mut self) -> Option<T> {
        self.payload.take()
    }

    /// Rewraps the response around a payload of another type.
    pub fn with_payload<U>(self, payload: Option<U>) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            payload,
            metadata: self.metadata,
        }
    }

    pub fn map_payload<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            payload: self.payload.map(f),
            metadata: self.metadata,
        }
    }

    /// Reads a property by name.
    ///
    /// `status_code`, `payload` and `metadata` (or their aliases
    /// `statusCode`/`code`, `data`, `headers`) return the reserved fields;
    /// any other name is looked up in the metadata.
    pub fn get(&self, name: &str) -> Result<Property<'_, T>, PropertyError> {
        match Field::from_name(name) {
            Some(Field::StatusCode) => Ok(Property::StatusCode(&self.status_code)),
            Some(Field::Payload) => Ok(Property::Payload(self.payload.as_ref())),
            Some(Field::Metadata) => Ok(Property::Metadata(self.metadata.as_ref())),
            None => self
                .header(name)
                .map(Property::Header)
                .ok_or_else(|| PropertyError::unknown(name)),
        }
    }

    /// Writes a reserved property by name. Metadata keys are read-only.
    pub fn set(&mut self, name: &str, value: PropertyValue<T>) -> Result<(), PropertyError> {
        let field = Field::from_name(name).ok_or_else(|| PropertyError::unknown(name))?;
        if field != value.kind() {
            return Err(PropertyError::Mismatch {
                type_name: TYPE_NAME,
                property: field.as_str(),
                found: value.kind().as_str(),
            });
        }

        match value {
            PropertyValue::StatusCode(code) => self.status_code = code,
            PropertyValue::Payload(payload) => self.payload = payload,
            PropertyValue::Metadata(metadata) => self.metadata = metadata,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_headers() -> ApiResponse<Vec<u32>> {
        let metadata: Metadata = [("X-Runtime", "0.042"), ("Hint", "")].into_iter().collect();
        ApiResponse::new("200", Some(vec![1, 2]), Some(metadata))
    }

    #[test]
    fn success_is_decided_by_first_digit() {
        for (code, expected) in [
            ("200", true),
            ("201", true),
            ("404", false),
            ("500", false),
            ("301", false),
        ] {
            let response = ApiResponse::<()>::status(code);
            assert_eq!(response.is_success(), expected, "status {code}");
        }
    }

    #[test]
    fn empty_status_is_not_success() {
        assert!(!ApiResponse::<()>::status("").is_success());
    }

    #[test]
    fn numeric_status_is_kept_as_text() {
        let response = ApiResponse::<()>::status(204_u16);
        assert_eq!(response.status_code().as_str(), "204");
        assert!(response.is_success());
    }

    #[test]
    fn set_then_get_reserved_properties() {
        let mut response = with_headers();

        response
            .set("status_code", PropertyValue::StatusCode(StatusCode::new("201")))
            .unwrap();
        assert_eq!(
            response.get("status_code").unwrap(),
            Property::StatusCode(&StatusCode::new("201"))
        );

        response
            .set("payload", PropertyValue::Payload(Some(vec![7])))
            .unwrap();
        assert_eq!(
            response.get("payload").unwrap(),
            Property::Payload(Some(&vec![7]))
        );

        let metadata: Metadata = [("ETag", "abc")].into_iter().collect();
        response
            .set("metadata", PropertyValue::Metadata(Some(metadata.clone())))
            .unwrap();
        assert_eq!(
            response.get("metadata").unwrap(),
            Property::Metadata(Some(&metadata))
        );
    }

    #[test]
    fn legacy_names_alias_reserved_fields() {
        let response = with_headers();
        assert_eq!(
            response.get("code").unwrap(),
            Property::StatusCode(&StatusCode::new("200"))
        );
        assert_eq!(
            response.get("data").unwrap(),
            Property::Payload(Some(&vec![1, 2]))
        );
        assert!(matches!(
            response.get("headers").unwrap(),
            Property::Metadata(Some(_))
        ));
    }

    #[test]
    fn camel_case_status_code_name_is_accepted() {
        let mut response = with_headers();
        response
            .set("statusCode", PropertyValue::StatusCode(StatusCode::new("404")))
            .unwrap();
        assert_eq!(
            response.get("statusCode").unwrap(),
            Property::StatusCode(&StatusCode::new("404"))
        );
        assert!(!response.is_success());
    }

    #[test]
    fn get_falls_back_to_metadata() {
        let response = with_headers();
        assert_eq!(response.get("x-runtime").unwrap(), Property::Header("0.042"));
        assert_eq!(response.get("Hint").unwrap(), Property::Header(""));
    }

    #[test]
    fn unknown_property_fails_on_read_and_write() {
        let mut response = with_headers();

        let err = response.get("Location").unwrap_err();
        assert_eq!(err.to_string(), "unknown property ApiResponse::Location");

        let err = response
            .set("Location", PropertyValue::Payload(None))
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::Unknown {
                type_name: "ApiResponse",
                property: "Location".to_string(),
            }
        );
    }

    #[test]
    fn metadata_keys_are_not_writable() {
        let mut response = with_headers();
        assert!(matches!(
            response.set("X-Runtime", PropertyValue::Payload(None)),
            Err(PropertyError::Unknown { .. })
        ));
    }

    #[test]
    fn unknown_property_without_metadata() {
        let response = ApiResponse::<()>::status("200");
        assert!(matches!(
            response.get("Server"),
            Err(PropertyError::Unknown { .. })
        ));
    }

    #[test]
    fn set_rejects_mismatched_value() {
        let mut response = with_headers();
        let err = response
            .set("payload", PropertyValue::StatusCode(StatusCode::new("500")))
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::Mismatch {
                type_name: "ApiResponse",
                property: "payload",
                found: "status_code",
            }
        );
        assert_eq!(
            err.to_string(),
            "property ApiResponse::payload cannot be set from a status_code value"
        );
        assert!(response.is_success());
    }

    #[test]
    fn metadata_distinguishes_absent_from_empty() {
        let response = with_headers();
        assert_eq!(response.header("hint"), Some(""));
        assert_eq!(response.header("location"), None);
    }

    #[test]
    fn rewrap_preserves_status_and_metadata() {
        let response = with_headers();
        let rewrapped = response.clone().map_payload(|values| values.len());
        assert_eq!(rewrapped.payload(), Some(&2));
        assert_eq!(rewrapped.status_code(), response.status_code());
        assert_eq!(rewrapped.metadata(), response.metadata());

        let emptied = response.with_payload::<String>(None);
        assert_eq!(emptied.payload(), None);
        assert_eq!(emptied.header("x-runtime"), Some("0.042"));
    }
}
