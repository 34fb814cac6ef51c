use crate::pages::Page;

#[derive(Debug, thiserror::Error)]
pub enum PageLoadError {
    #[error("no backend server is selected; pick a server before loading `{page}`")]
    ServerUnselected { page: Page },
    #[error("no backend server is selected; pick a server before running `{operation}`")]
    ServerRequired { operation: &'static str },
    #[error("page `{page}` has no backend endpoint")]
    NoBackendEndpoint { page: Page },
    #[error("master server address is not configured; set PUBLIC_MASTER_SERVER_IP and PUBLIC_MASTER_SERVER_PORT")]
    MasterServerUnconfigured,
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("backend at {url} responded with status {status}: {detail}")]
    Backend {
        url: String,
        status: u16,
        detail: String,
    },
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
    #[error("load of `{page}` was superseded by a later navigation")]
    Superseded { page: Page },
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PageLoadError {
    /// True when the error never reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ServerUnselected { .. }
                | Self::ServerRequired { .. }
                | Self::NoBackendEndpoint { .. }
                | Self::MasterServerUnconfigured
                | Self::Encode(_)
        )
    }

    /// True when the backend never saw the request, so a retry is safe.
    pub fn is_undelivered(&self) -> bool {
        self.is_local() || matches!(self, Self::Transport { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServerUnselected { .. } | Self::ServerRequired { .. } => "server_unselected",
            Self::NoBackendEndpoint { .. } => "no_backend_endpoint",
            Self::MasterServerUnconfigured => "master_server_unconfigured",
            Self::Transport { .. } => "transport",
            Self::Backend { .. } => "backend",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Superseded { .. } => "superseded",
            Self::Encode(_) => "encode",
        }
    }
}
