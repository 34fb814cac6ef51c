use super::Endpoint;
use crate::gateway::{encode_payload, endpoint_url};
use crate::pages::Page;
use crate::session::{ArtifactKind, Intent, ServerInfo, SessionId, SessionState};
use crate::shared::PageLoadError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStackupPayload {
    pub fname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutArtifactPayload {
    pub session_id: SessionId,
    pub layout_fname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFilePayload {
    pub filename: String,
}

/// `csv_fname` is `null` when no override file was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutInfoPayload {
    pub layout_fname: Option<String>,
    pub csv_fname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    LoadStackup(LoadStackupPayload),
    LayoutArtifact(LayoutArtifactPayload),
    LoadFile(LoadFilePayload),
    LayoutInfo(LayoutInfoPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedRequest {
    pub page: Page,
    pub server: ServerInfo,
    pub endpoint: Endpoint,
    pub intent: Intent,
    pub payload: RequestPayload,
}

impl RoutedRequest {
    pub fn url(&self) -> String {
        endpoint_url(&self.server, self.endpoint.path())
    }

    pub fn body(&self) -> Result<String, PageLoadError> {
        encode_payload(&self.payload)
    }
}

/// Chooses the endpoint and payload for one page visit. Pure: the same state,
/// page and intent always give the same request.
pub fn plan_request(
    state: &SessionState,
    page: Page,
    intent: Intent,
) -> Result<RoutedRequest, PageLoadError> {
    if page == Page::Home {
        return Err(PageLoadError::NoBackendEndpoint { page });
    }
    let server = state
        .server
        .clone()
        .ok_or(PageLoadError::ServerUnselected { page })?;
    let layout_fname = state.active_layout.clone();

    let (endpoint, intent, payload) = match page {
        Page::Home => return Err(PageLoadError::NoBackendEndpoint { page }),
        Page::CreateStackup | Page::CreatePadstack => {
            let (kind, refresh_endpoint) = if page == Page::CreateStackup {
                (ArtifactKind::Stackup, Endpoint::GetStackup)
            } else {
                (ArtifactKind::Padstack, Endpoint::GetPadstack)
            };
            match intent {
                Intent::FreshLoad { .. } => (
                    Endpoint::LoadStackup,
                    intent,
                    RequestPayload::LoadStackup(LoadStackupPayload {
                        fname: state.file_ref(kind).as_str().to_string(),
                    }),
                ),
                Intent::RefreshExisting => (
                    refresh_endpoint,
                    intent,
                    RequestPayload::LayoutArtifact(LayoutArtifactPayload {
                        session_id: state.session_id.clone(),
                        layout_fname,
                    }),
                ),
            }
        }
        Page::LoadMaterial | Page::LoadSpd => {
            let (kind, endpoint) = if page == Page::LoadMaterial {
                (ArtifactKind::Material, Endpoint::LoadMaterialData)
            } else {
                (ArtifactKind::Spd, Endpoint::LoadSpdData)
            };
            (
                endpoint,
                Intent::RefreshExisting,
                RequestPayload::LoadFile(LoadFilePayload {
                    filename: state.file_ref(kind).as_str().to_string(),
                }),
            )
        }
        Page::PortSetup | Page::SinkSetup | Page::VrmSetup | Page::LdoSetup => {
            let (kind, endpoint) = match page {
                Page::PortSetup => (ArtifactKind::Ports, Endpoint::GetPortInfo),
                Page::SinkSetup => (ArtifactKind::Sinks, Endpoint::GetSinkInfo),
                Page::VrmSetup => (ArtifactKind::Vrms, Endpoint::GetVrmInfo),
                _ => (ArtifactKind::Ldos, Endpoint::GetLdoInfo),
            };
            (
                endpoint,
                Intent::RefreshExisting,
                RequestPayload::LayoutInfo(LayoutInfoPayload {
                    layout_fname,
                    csv_fname: state.file_ref(kind).as_override().map(str::to_string),
                }),
            )
        }
    };

    Ok(RoutedRequest {
        page,
        server,
        endpoint,
        intent,
        payload,
    })
}
