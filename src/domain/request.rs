//! Logical API requests.
//!
//! An [`ApiRequest`] describes what a caller wants (path, method, body,
//! extra headers) independently of how many network attempts it takes.

use std::fmt;

use serde::Serialize;

use crate::error::ApiError;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller's intent to reach one endpoint.
///
/// Builder methods consume and return the request, so a constructed value
/// is never mutated behind the pipeline's back.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    path: String,
    method: Method,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach an already-built JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header that overrides the pipeline default of the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_method() {
        assert_eq!(ApiRequest::get("/a").method(), Method::Get);
        assert_eq!(ApiRequest::post("/a").method(), Method::Post);
        assert_eq!(ApiRequest::put("/a").method(), Method::Put);
        assert_eq!(ApiRequest::delete("/a").method(), Method::Delete);
    }

    #[test]
    fn with_json_serializes_body() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            push_notifications: bool,
        }

        let request = ApiRequest::put("/settings")
            .with_json(&Body {
                push_notifications: true,
            })
            .unwrap();

        assert_eq!(request.body(), Some(&json!({"pushNotifications": true})));
        assert_eq!(request.path(), "/settings");
    }

    #[test]
    fn headers_are_kept_in_order() {
        let request = ApiRequest::get("/signals")
            .with_header("X-Trace", "1")
            .with_header("Accept-Language", "en");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()[0].0, "X-Trace");
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
