use std::io::Read;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves bytes to and from a backend. Non-2xx statuses are still `Ok`; only
/// failures to complete the exchange are `Err`.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, body: &str) -> Result<TransportResponse, String>;
    fn get(&self, url: &str) -> Result<TransportResponse, String>;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<TransportResponse, String> {
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body);
        into_transport_response(result)
    }

    fn get(&self, url: &str) -> Result<TransportResponse, String> {
        let result = self.agent.get(url).call();
        into_transport_response(result)
    }
}

fn into_transport_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<TransportResponse, String> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(err.to_string()),
    };
    let status = response.status();
    // Layout payloads can exceed ureq's into_string cap.
    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .map_err(|e| format!("failed to read response body: {e}"))?;
    Ok(TransportResponse { status, body })
}
