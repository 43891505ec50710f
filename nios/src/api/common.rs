//! Common types and utilities for the NIOS WAPI

use serde::{Deserialize, Serialize};

/// Body of every `_return_as_object=1` response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

/// WAPI error body
///
/// ```json
/// {"Error": "AdmConDataNotFound: Reference member/abc not found",
///  "code": "Client.Ibap.Data.NotFound", "text": "Reference member/abc not found"}
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(rename = "Error")]
    pub error: Option<String>,
    pub code: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("API error details: error={error:?}, code={code:?}, text={text:?}")]
pub struct ApiErrorDetails {
    pub error: Option<String>,
    pub code: Option<String>,
    pub text: Option<String>,
}

impl ApiErrorDetails {
    pub fn is_not_found(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| code.ends_with("Data.NotFound"))
    }
}

impl From<ApiErrorResponse> for ApiErrorDetails {
    fn from(resp: ApiErrorResponse) -> Self {
        Self {
            error: resp.error,
            code: resp.code,
            text: resp.text,
        }
    }
}

/// An object with a WAPI object type and reference
pub trait WapiObject: Sized {
    /// Object type, e.g. `member`
    fn object_type() -> &'static str;

    /// Fields requested on top of the defaults via `_return_fields+`
    fn return_fields() -> &'static [&'static str];

    fn object_path() -> String {
        format!("/{}", Self::object_type())
    }

    fn resource_path(r#ref: &str) -> String {
        format!("/{}", r#ref.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    /// `_return_fields+=a,b,c`
    pub fn return_fields_plus(self, fields: &[&str]) -> Self {
        if fields.is_empty() {
            return self;
        }
        self.add("_return_fields+", fields.join(","))
    }

    /// `_return_as_object=1`
    pub fn return_as_object(self) -> Self {
        self.add("_return_as_object", 1)
    }

    /// Standard query for reading back a single object
    pub fn for_object<T: WapiObject>() -> Self {
        Self::new()
            .return_fields_plus(T::return_fields())
            .return_as_object()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

/// Object type part of a reference: `member/b25l...:gm.example.com` -> `member`
pub fn ref_object_type(r#ref: &str) -> Option<&str> {
    let (object_type, rest) = r#ref.split_once('/')?;
    if object_type.is_empty() || rest.is_empty() {
        return None;
    }
    Some(object_type)
}

/// WAPI delete and some writes return the bare reference string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(pub String);
