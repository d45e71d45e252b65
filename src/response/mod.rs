//! Service response decoding
//!
//! The upload endpoint answers a 200 with a JSON object whose interesting
//! sections (`push.info`, `push.errors`, and `fielderrors` inside
//! `push.errors`) are themselves JSON documents encoded as string values of
//! the outer object. [`ResponseDecoder`] peels those layers back into an
//! [`UploadResult`]. The double encoding is a quirk of the service's wire
//! format and is reproduced here verbatim; values that already arrive as
//! objects are accepted too.
//!
//! Every key is independently optional. An unexpected-but-wellformed shape
//! never fails the decode; only a body that is not valid JSON does.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Outer key carrying the service verdict.
pub const KEY_SUCCESS: &str = "success";

/// Outer key carrying the (string-encoded) informational section.
pub const KEY_PUSH_INFO: &str = "push.info";

/// Outer key carrying the (string-encoded) error section.
pub const KEY_PUSH_ERRORS: &str = "push.errors";

/// Key inside `push.errors` carrying the (string-encoded) per-field errors.
pub const KEY_FIELD_ERRORS: &str = "fielderrors";

/// Key inside `push.info` carrying the direct download URL.
pub const KEY_DIRECT_DOWNLOAD_URL: &str = "push.directDownloadUrl";

/// Key inside `push.info` carrying the warning list.
pub const KEY_WARNINGS: &str = "push.warnings";

/// Decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decoded upload outcome.
///
/// All sections are optional; a body of `{}` decodes to the default value
/// with `success == false`, which callers treat as a normal negative
/// outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadResult {
    /// Service verdict; `false` when absent or unparseable.
    pub success: bool,

    /// Informational section, e.g. download URLs and warnings.
    pub push_info: Option<Map<String, Value>>,

    /// Error section as sent by the service.
    pub push_errors: Option<Map<String, Value>>,

    /// Per-field validation errors extracted from `push.errors`.
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl UploadResult {
    /// Direct download URL of the accepted build, when the service sent one.
    pub fn direct_download_url(&self) -> Option<&str> {
        self.push_info
            .as_ref()
            .and_then(|info| info.get(KEY_DIRECT_DOWNLOAD_URL))
            .and_then(Value::as_str)
    }

    /// Warnings attached to the push, in service order.
    pub fn warnings(&self) -> Vec<String> {
        self.push_info
            .as_ref()
            .and_then(|info| info.get(KEY_WARNINGS))
            .map(message_list)
            .unwrap_or_default()
    }
}

/// Decoder for the service's nested-JSON response format.
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Decode a response body.
    ///
    /// Returns `Ok(None)` when the body is valid JSON but not an object
    /// (e.g. `null`), mirroring the service's empty answer. Fails only when
    /// the body is not JSON at all.
    pub fn decode(body: &[u8]) -> Result<Option<UploadResult>, DecodeError> {
        let outer: Value = serde_json::from_slice(body)?;
        let Some(outer) = outer.as_object() else {
            return Ok(None);
        };

        let mut result = UploadResult::default();

        if let Some(errors) = outer.get(KEY_PUSH_ERRORS).and_then(nested_object) {
            if let Some(fields) = errors.get(KEY_FIELD_ERRORS).and_then(nested_object) {
                result.field_errors = Some(
                    fields
                        .iter()
                        .map(|(field, messages)| (field.clone(), message_list(messages)))
                        .collect(),
                );
            }
            result.push_errors = Some(errors);
        }

        if let Some(info) = outer.get(KEY_PUSH_INFO).and_then(nested_object) {
            result.push_info = Some(info);
        }

        if let Some(success) = outer.get(KEY_SUCCESS) {
            result.success = parse_success(success);
        }

        Ok(Some(result))
    }
}

/// Resolve a section that the service encodes as a JSON string.
///
/// A string value is parsed as JSON; a value that is already an object is
/// taken as-is. Anything else, including a string that does not parse to an
/// object, yields `None`.
fn nested_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        Value::Object(map) => Some(map.clone()),
        _ => None,
    }
}

/// Flatten a message value into a list of strings.
fn message_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}

/// Textual success coercion: exactly `"true"` is true, anything else false.
fn parse_success(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        other => other.to_string() == "true",
    }
}
