use super::{Endpoint, RoutedRequest};
use crate::pages::Page;
use crate::session::ServerInfo;
use crate::shared::PageLoadError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactData {
    pub endpoint: Endpoint,
    pub fresh_load: bool,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryInfo {
    pub version: Option<String>,
    pub servers: Vec<ServerInfo>,
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Discovery(DiscoveryInfo),
    Stackup(ArtifactData),
    Padstack(ArtifactData),
    Material(ArtifactData),
    Spd(ArtifactData),
    Ports(ArtifactData),
    Sinks(ArtifactData),
    Vrms(ArtifactData),
    Ldos(ArtifactData),
}

impl PageData {
    pub fn page(&self) -> Page {
        match self {
            PageData::Discovery(_) => Page::Home,
            PageData::Stackup(_) => Page::CreateStackup,
            PageData::Padstack(_) => Page::CreatePadstack,
            PageData::Material(_) => Page::LoadMaterial,
            PageData::Spd(_) => Page::LoadSpd,
            PageData::Ports(_) => Page::PortSetup,
            PageData::Sinks(_) => Page::SinkSetup,
            PageData::Vrms(_) => Page::VrmSetup,
            PageData::Ldos(_) => Page::LdoSetup,
        }
    }

    pub fn artifact(&self) -> Option<&ArtifactData> {
        match self {
            PageData::Discovery(_) => None,
            PageData::Stackup(data)
            | PageData::Padstack(data)
            | PageData::Material(data)
            | PageData::Spd(data)
            | PageData::Ports(data)
            | PageData::Sinks(data)
            | PageData::Vrms(data)
            | PageData::Ldos(data) => Some(data),
        }
    }

    /// The JSON handed to the rendering layer.
    pub fn body(&self) -> &Value {
        match self {
            PageData::Discovery(info) => &info.raw,
            PageData::Stackup(data)
            | PageData::Padstack(data)
            | PageData::Material(data)
            | PageData::Spd(data)
            | PageData::Ports(data)
            | PageData::Sinks(data)
            | PageData::Vrms(data)
            | PageData::Ldos(data) => &data.body,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Artifact endpoints answer with a JSON object or array; anything else is
/// treated as a malformed response.
pub fn parse_page_data(request: &RoutedRequest, body: Value) -> Result<PageData, PageLoadError> {
    if !matches!(body, Value::Object(_) | Value::Array(_)) {
        return Err(PageLoadError::MalformedResponse {
            url: request.url(),
            reason: format!(
                "expected a json object or array from {}, got {}",
                request.endpoint,
                json_kind(&body)
            ),
        });
    }

    let data = ArtifactData {
        endpoint: request.endpoint,
        fresh_load: request.intent.is_fresh_load(),
        body,
    };
    match request.page {
        Page::Home => Err(PageLoadError::NoBackendEndpoint { page: Page::Home }),
        Page::CreateStackup => Ok(PageData::Stackup(data)),
        Page::CreatePadstack => Ok(PageData::Padstack(data)),
        Page::LoadMaterial => Ok(PageData::Material(data)),
        Page::LoadSpd => Ok(PageData::Spd(data)),
        Page::PortSetup => Ok(PageData::Ports(data)),
        Page::SinkSetup => Ok(PageData::Sinks(data)),
        Page::VrmSetup => Ok(PageData::Vrms(data)),
        Page::LdoSetup => Ok(PageData::Ldos(data)),
    }
}

/// Lenient: missing fields default, but a present `servers` field must be a
/// list of `{ ip_address, port }` entries.
pub fn parse_discovery(url: &str, body: Value) -> Result<DiscoveryInfo, PageLoadError> {
    let malformed = |reason: String| PageLoadError::MalformedResponse {
        url: url.to_string(),
        reason,
    };
    let Value::Object(map) = &body else {
        return Err(malformed(format!(
            "expected a json object from the master server, got {}",
            json_kind(&body)
        )));
    };

    let version = ["version", "result"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    let servers = match map.get("servers") {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value::<Vec<ServerInfo>>(raw.clone())
            .map_err(|e| malformed(format!("invalid `servers` listing: {e}")))?,
    };

    Ok(DiscoveryInfo {
        version,
        servers,
        raw: body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discovery_reads_version_and_servers() {
        let info = parse_discovery(
            "http://master:9000",
            json!({
                "result": "1.4.2",
                "servers": [
                    {"name": "lab-a", "ip_address": "10.0.0.5", "port": 8000},
                    {"ip_address": "10.0.0.6", "port": 8001}
                ]
            }),
        )
        .expect("discovery");
        assert_eq!(info.version.as_deref(), Some("1.4.2"));
        assert_eq!(info.servers.len(), 2);
        assert_eq!(info.servers[0].label(), "lab-a");
        assert_eq!(info.servers[1].label(), "10.0.0.6:8001");
    }

    #[test]
    fn discovery_rejects_non_object_and_bad_listing() {
        let err = parse_discovery("http://master:9000", json!(["a"]))
            .expect_err("array body is malformed");
        assert_eq!(err.kind(), "malformed_response");

        let err = parse_discovery(
            "http://master:9000",
            json!({"servers": [{"ip_address": "10.0.0.5"}]}),
        )
        .expect_err("missing port is malformed");
        assert!(err.to_string().contains("servers"));
    }
}
