//! Response envelopes shared by several endpoints.

use serde::{Deserialize, Serialize};

/// Paging metadata returned alongside list data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// `{ success, message }` reply used by mutations that return no entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error detail inside an [`ErrorBody`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<std::collections::BTreeMap<String, String>>,
}

/// Error body contract: `{"success": false, "error": {"message": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_extracts_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"success": false, "error": {"code": "NOT_FOUND", "message": "Signal not found"}}"#,
        )
        .unwrap();
        assert_eq!(body.message(), Some("Signal not found"));
    }

    #[test]
    fn error_body_without_error_field_has_no_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn pagination_uses_camel_case() {
        let page: Pagination = serde_json::from_str(
            r#"{"page": 2, "pageSize": 10, "totalItems": 31, "totalPages": 4}"#,
        )
        .unwrap();
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_items, 31);
    }
}
