//! Canonical payloads and a pre-wired client for tests.

use std::sync::Arc;

use serde_json::{json, Value};

use super::audit::{RecordingAuditSink, RecordingAuthRejected};
use super::transport::ScriptedTransport;
use crate::adapter::outbound::token::MemoryTokenStore;
use crate::application::client::ApiClient;
use crate::port::outbound::token::TokenStore;

pub const BASE_URL: &str = "https://api.test/api";

/// An [`ApiClient`] over a scripted transport with every side effect
/// observable.
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub transport: Arc<ScriptedTransport>,
    pub audit: RecordingAuditSink,
    pub redirects: RecordingAuthRejected,
    pub tokens: Arc<MemoryTokenStore>,
}

impl TestClient {
    pub fn new(transport: ScriptedTransport) -> Self {
        Self::build(transport, MemoryTokenStore::new())
    }

    /// Start with `token` already in the store.
    pub fn signed_in(transport: ScriptedTransport, token: &str) -> Self {
        Self::build(transport, MemoryTokenStore::with_token(token))
    }

    fn build(transport: ScriptedTransport, tokens: MemoryTokenStore) -> Self {
        let transport = Arc::new(transport);
        let tokens = Arc::new(tokens);
        let audit = RecordingAuditSink::new();
        let redirects = RecordingAuthRejected::new();

        let client = ApiClient::new(BASE_URL, transport.clone(), tokens.clone())
            .with_audit(Arc::new(audit.clone()))
            .with_auth_rejected_handler(Arc::new(redirects.clone()));

        Self {
            client: Arc::new(client),
            transport,
            audit,
            redirects,
            tokens,
        }
    }

    /// Token currently in the durable store.
    pub fn stored_token(&self) -> Option<String> {
        self.tokens.load().ok().flatten()
    }
}

pub fn error_body(message: &str) -> Value {
    json!({ "success": false, "error": { "code": "ERROR", "message": message } })
}

pub fn pagination(page: u32, page_size: u32, total_items: u64) -> Value {
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(u64::from(page_size))
    };
    json!({
        "page": page,
        "pageSize": page_size,
        "totalItems": total_items,
        "totalPages": total_pages,
    })
}

pub fn signal(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "stock": "RELIANCE",
        "action": "BUY",
        "price": 2450.5,
        "target": 2600.0,
        "stopLoss": 2380.0,
        "market": "India",
        "status": status,
        "createdAt": "2024-03-01T09:15:00Z"
    })
}

pub fn signals_page(signals: Vec<Value>) -> Value {
    let total = signals.len() as u64;
    json!({ "data": signals, "pagination": pagination(1, 10, total) })
}

pub fn user(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "firstName": "Jane",
        "lastName": "Doe",
        "roles": ["User"],
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

pub fn auth_success(token: &str, user_id: &str, email: &str) -> Value {
    json!({ "success": true, "token": token, "user": user(user_id, email) })
}

pub fn user_settings() -> Value {
    json!({
        "id": "s-1",
        "userId": "u-1",
        "pushNotifications": true,
        "emailNotifications": true,
        "smsAlerts": false,
        "weekendNotifications": false,
        "indiaMarketEnabled": true,
        "usMarketEnabled": false,
        "updatedAt": "2024-03-01T00:00:00Z"
    })
}

pub fn watchlist_item(id: &str, symbol: &str) -> Value {
    json!({
        "id": id,
        "userId": "u-1",
        "symbol": symbol,
        "name": "Tata Consultancy Services",
        "market": "India",
        "createdAt": "2024-03-01T00:00:00Z"
    })
}

pub fn trade(id: &str) -> Value {
    json!({
        "id": id,
        "userId": "u-1",
        "stock": "AAPL",
        "market": "USD",
        "action": "BUY",
        "entryPrice": 170.25,
        "exitPrice": 182.1,
        "quantity": 10,
        "profit": 118.5,
        "profitPercentage": 6.96,
        "createdAt": "2024-02-01T00:00:00Z"
    })
}

pub fn ack(message: &str) -> Value {
    json!({ "success": true, "message": message })
}
