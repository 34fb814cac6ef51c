use super::{ArtifactFileRef, ArtifactFileRefs, ArtifactKind};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

pub const UNSELECTED_SERVER_LABEL: &str = "Select server";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerInfo {
    pub ip_address: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ServerInfo {
    pub fn new(ip_address: impl Into<String>, port: u16) -> Self {
        Self {
            ip_address: ip_address.into(),
            port,
            name: None,
        }
    }

    /// Parses `ip:port`. The address part is taken verbatim.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (address, port) = raw
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| format!("server `{raw}` must use `ip:port` format"))?;
        if address.is_empty() {
            return Err(format!("server `{raw}` is missing an address"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| format!("server `{raw}` has an invalid port `{port}`"))?;
        Ok(Self::new(address, port))
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.ip_address, self.port)
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}:{}", self.ip_address, self.port),
        }
    }
}

/// Reserved for multi-session support; every outgoing request carries it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub server: Option<ServerInfo>,
    pub active_layout: Option<String>,
    pub session_id: SessionId,
    pub files: ArtifactFileRefs,
}

impl SessionState {
    pub fn file_ref(&self, kind: ArtifactKind) -> &ArtifactFileRef {
        self.files.get(kind)
    }

    pub fn server_label(&self) -> String {
        self.server
            .as_ref()
            .map(ServerInfo::label)
            .unwrap_or_else(|| UNSELECTED_SERVER_LABEL.to_string())
    }
}

/// Shared handle over one session. Clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn server(&self) -> Option<ServerInfo> {
        self.lock().server.clone()
    }

    pub fn set_server(&self, server: ServerInfo) {
        self.lock().server = Some(server);
    }

    /// Selects a server picked from a discovery listing, keeping its display name.
    pub fn select_server(&self, descriptor: &ServerInfo) {
        self.set_server(descriptor.clone());
    }

    pub fn clear_server(&self) {
        self.lock().server = None;
    }

    pub fn active_layout(&self) -> Option<String> {
        self.lock().active_layout.clone()
    }

    pub fn set_active_layout(&self, layout: impl Into<String>) {
        self.lock().active_layout = Some(layout.into());
    }

    pub fn file_ref(&self, kind: ArtifactKind) -> ArtifactFileRef {
        self.lock().files.get(kind).clone()
    }

    pub fn set_file_ref(&self, kind: ArtifactKind, file: impl Into<ArtifactFileRef>) {
        *self.lock().files.slot_mut(kind) = file.into();
    }

    pub fn clear_file_ref(&self, kind: ArtifactKind) {
        *self.lock().files.slot_mut(kind) = ArtifactFileRef::default();
    }
}
