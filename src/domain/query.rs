//! Query-string construction for filtered list endpoints.
//!
//! Parameters are form-urlencoded in insertion order. Absent filters,
//! empty strings and zero page numbers are skipped, so a request with no
//! filters maps to the bare path.

use url::form_urlencoded;

/// Accumulates query parameters for one request path.
pub struct Query {
    serializer: form_urlencoded::Serializer<'static, String>,
    empty: bool,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self {
            serializer: form_urlencoded::Serializer::new(String::new()),
            empty: true,
        }
    }

    /// Append `name=value` when `value` is present and non-empty.
    #[must_use]
    pub fn text(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.serializer.append_pair(name, value);
            self.empty = false;
        }
        self
    }

    /// Append `name=n` when `n` is present and non-zero.
    #[must_use]
    pub fn number(mut self, name: &str, value: Option<u32>) -> Self {
        if let Some(value) = value.filter(|v| *v != 0) {
            self.serializer.append_pair(name, &value.to_string());
            self.empty = false;
        }
        self
    }

    /// Join onto `path`, adding `?` only when at least one param exists.
    #[must_use]
    pub fn into_path(mut self, path: &str) -> String {
        if self.empty {
            return path.to_string();
        }
        format!("{}?{}", path, self.serializer.finish())
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_bare_path() {
        assert_eq!(Query::new().into_path("/signals"), "/signals");
    }

    #[test]
    fn params_keep_insertion_order() {
        let path = Query::new()
            .text("status", Some("active"))
            .number("pageSize", Some(10))
            .into_path("/signals");
        assert_eq!(path, "/signals?status=active&pageSize=10");
    }

    #[test]
    fn skips_missing_empty_and_zero() {
        let path = Query::new()
            .text("role", None)
            .text("search", Some(""))
            .number("page", Some(0))
            .number("pageSize", None)
            .into_path("/admin/users");
        assert_eq!(path, "/admin/users");
    }

    #[test]
    fn encodes_like_form_data() {
        let path = Query::new()
            .text("search", Some("jane doe&co"))
            .into_path("/admin/users");
        assert_eq!(path, "/admin/users?search=jane+doe%26co");
    }
}
