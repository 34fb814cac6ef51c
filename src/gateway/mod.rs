use crate::session::ServerInfo;
use crate::shared::PageLoadError;
use serde::Serialize;
use serde_json::Value;

pub mod transport;

pub use transport::{Transport, TransportResponse, UreqTransport};

/// Thin JSON-over-HTTP layer between the router and a compute server.
#[derive(Debug, Clone, Default)]
pub struct BackendGateway<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> BackendGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn post_json<B: Serialize>(
        &self,
        server: &ServerInfo,
        path: &str,
        payload: &B,
    ) -> Result<Value, PageLoadError> {
        let url = endpoint_url(server, path);
        let body = encode_payload(payload)?;
        let response = self
            .transport
            .post_json(&url, &body)
            .map_err(|reason| PageLoadError::Transport {
                url: url.clone(),
                reason,
            })?;
        classify_response(&url, response)
    }

    pub fn get_json(&self, url: &str) -> Result<Value, PageLoadError> {
        let response = self
            .transport
            .get(url)
            .map_err(|reason| PageLoadError::Transport {
                url: url.to_string(),
                reason,
            })?;
        classify_response(url, response)
    }
}

pub fn endpoint_url(server: &ServerInfo, path: &str) -> String {
    format!("{}{}", server.base_url(), path)
}

pub fn encode_payload<B: Serialize>(payload: &B) -> Result<String, PageLoadError> {
    Ok(serde_json::to_string(payload)?)
}

pub fn classify_response(url: &str, response: TransportResponse) -> Result<Value, PageLoadError> {
    if !response.is_success() {
        return Err(PageLoadError::Backend {
            url: url.to_string(),
            status: response.status,
            detail: backend_error_detail(&response.body),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| PageLoadError::MalformedResponse {
        url: url.to_string(),
        reason: format!("body is not valid json: {e}"),
    })
}

/// Prefers the backend's `detail` field, then `error`/`message`, then the raw body.
pub fn backend_error_detail(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(Value::String(text)) => return text.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "<empty body>".to_string()
    } else {
        trimmed.to_string()
    }
}
