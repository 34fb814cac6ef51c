use crate::session::ArtifactKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    Home,
    CreateStackup,
    CreatePadstack,
    LoadMaterial,
    LoadSpd,
    PortSetup,
    SinkSetup,
    VrmSetup,
    LdoSetup,
}

pub const ALL_PAGES: [Page; 9] = [
    Page::Home,
    Page::CreateStackup,
    Page::CreatePadstack,
    Page::LoadMaterial,
    Page::LoadSpd,
    Page::PortSetup,
    Page::SinkSetup,
    Page::VrmSetup,
    Page::LdoSetup,
];

impl Page {
    pub fn route(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::CreateStackup => "/create-stackup",
            Page::CreatePadstack => "/create-padstack",
            Page::LoadMaterial => "/load-material",
            Page::LoadSpd => "/load-spd",
            Page::PortSetup => "/port-setup",
            Page::SinkSetup => "/sink-setup",
            Page::VrmSetup => "/vrm-setup",
            Page::LdoSetup => "/ldo-setup",
        }
    }

    /// Accepts the route with or without its leading slash.
    pub fn from_route(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        ALL_PAGES
            .iter()
            .copied()
            .find(|page| page.route() == normalized)
    }

    /// Artifact whose file reference feeds this page's request. `Home` has none.
    pub fn artifact(self) -> Option<ArtifactKind> {
        match self {
            Page::Home => None,
            Page::CreateStackup => Some(ArtifactKind::Stackup),
            Page::CreatePadstack => Some(ArtifactKind::Padstack),
            Page::LoadMaterial => Some(ArtifactKind::Material),
            Page::LoadSpd => Some(ArtifactKind::Spd),
            Page::PortSetup => Some(ArtifactKind::Ports),
            Page::SinkSetup => Some(ArtifactKind::Sinks),
            Page::VrmSetup => Some(ArtifactKind::Vrms),
            Page::LdoSetup => Some(ArtifactKind::Ldos),
        }
    }

    /// Pages reachable both right after a file import and while revisiting a
    /// layout; only these consult the navigation intent.
    pub fn has_fresh_load_branch(self) -> bool {
        matches!(self, Page::CreateStackup | Page::CreatePadstack)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route())
    }
}
