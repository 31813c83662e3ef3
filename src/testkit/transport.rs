//! Mock transport with scripted replies.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::port::outbound::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// What the transport does for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never answer; the pipeline's deadline has to fire.
    Hang,
}

/// A request as the transport saw it, with the (tokio) time it arrived.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub at: Instant,
    pub request: HttpRequest,
}

/// Transport that pops one scripted [`Reply`] per request.
///
/// When the script is exhausted the fallback reply (if any) is repeated;
/// without one the request fails with [`TransportError::Other`].
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: None,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn then(self, reply: Reply) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Queue a response with the given status and raw body.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.then(Reply::Respond(HttpResponse::new(status, body)))
    }

    /// Queue a JSON response.
    #[must_use]
    pub fn respond_json(self, status: u16, body: &serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn fail(self, error: TransportError) -> Self {
        self.then(Reply::Fail(error))
    }

    /// Queue a request that never completes.
    #[must_use]
    pub fn hang(self) -> Self {
        self.then(Reply::Hang)
    }

    /// Reply to use once the script runs out.
    #[must_use]
    pub fn otherwise(mut self, reply: Reply) -> Self {
        self.fallback = Some(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.lock().iter().map(|r| r.request.clone()).collect()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.log.lock().last().map(|r| r.request.clone())
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.log.lock().push(Recorded {
            at: Instant::now(),
            request,
        });

        let reply = self
            .replies
            .lock()
            .pop_front()
            .or_else(|| self.fallback.clone());

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(error)) => Err(error),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(TransportError::Other("no scripted reply".into())),
        }
    }
}
