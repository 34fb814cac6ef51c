use crate::pages::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    LoadStackup,
    GetStackup,
    GetPadstack,
    LoadMaterialData,
    LoadSpdData,
    GetPortInfo,
    GetSinkInfo,
    GetVrmInfo,
    GetLdoInfo,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::LoadStackup => "/load-stackup",
            Endpoint::GetStackup => "/get-stackup",
            Endpoint::GetPadstack => "/get-padstack",
            Endpoint::LoadMaterialData => "/load-material-data",
            Endpoint::LoadSpdData => "/load-spd-data",
            Endpoint::GetPortInfo => "/get-port-info",
            Endpoint::GetSinkInfo => "/get-sink-info",
            Endpoint::GetVrmInfo => "/get-vrm-info",
            Endpoint::GetLdoInfo => "/get-ldo-info",
        }
    }

    /// Every endpoint a page can end up calling, fresh-load first.
    pub fn candidates_for(page: Page) -> &'static [Endpoint] {
        match page {
            Page::Home => &[],
            Page::CreateStackup => &[Endpoint::LoadStackup, Endpoint::GetStackup],
            Page::CreatePadstack => &[Endpoint::LoadStackup, Endpoint::GetPadstack],
            Page::LoadMaterial => &[Endpoint::LoadMaterialData],
            Page::LoadSpd => &[Endpoint::LoadSpdData],
            Page::PortSetup => &[Endpoint::GetPortInfo],
            Page::SinkSetup => &[Endpoint::GetSinkInfo],
            Page::VrmSetup => &[Endpoint::GetVrmInfo],
            Page::LdoSetup => &[Endpoint::GetLdoInfo],
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
