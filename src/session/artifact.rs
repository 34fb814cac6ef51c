use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Stackup,
    Padstack,
    Material,
    Ports,
    Sinks,
    Vrms,
    Spd,
    Ldos,
}

pub const ALL_ARTIFACT_KINDS: [ArtifactKind; 8] = [
    ArtifactKind::Stackup,
    ArtifactKind::Padstack,
    ArtifactKind::Material,
    ArtifactKind::Ports,
    ArtifactKind::Sinks,
    ArtifactKind::Vrms,
    ArtifactKind::Spd,
    ArtifactKind::Ldos,
];

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stackup => "stackup",
            Self::Padstack => "padstack",
            Self::Material => "material",
            Self::Ports => "ports",
            Self::Sinks => "sinks",
            Self::Vrms => "vrms",
            Self::Spd => "spd",
            Self::Ldos => "ldos",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A picked file path for one artifact. The empty string means "no override,
/// use the layout default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ArtifactFileRef(String);

impl ArtifactFileRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_override(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl From<&str> for ArtifactFileRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ArtifactFileRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFileRefs {
    pub stackup: ArtifactFileRef,
    pub padstack: ArtifactFileRef,
    pub material: ArtifactFileRef,
    pub ports: ArtifactFileRef,
    pub sinks: ArtifactFileRef,
    pub vrms: ArtifactFileRef,
    pub spd: ArtifactFileRef,
    pub ldos: ArtifactFileRef,
}

impl ArtifactFileRefs {
    pub fn get(&self, kind: ArtifactKind) -> &ArtifactFileRef {
        match kind {
            ArtifactKind::Stackup => &self.stackup,
            ArtifactKind::Padstack => &self.padstack,
            ArtifactKind::Material => &self.material,
            ArtifactKind::Ports => &self.ports,
            ArtifactKind::Sinks => &self.sinks,
            ArtifactKind::Vrms => &self.vrms,
            ArtifactKind::Spd => &self.spd,
            ArtifactKind::Ldos => &self.ldos,
        }
    }

    pub fn slot_mut(&mut self, kind: ArtifactKind) -> &mut ArtifactFileRef {
        match kind {
            ArtifactKind::Stackup => &mut self.stackup,
            ArtifactKind::Padstack => &mut self.padstack,
            ArtifactKind::Material => &mut self.material,
            ArtifactKind::Ports => &mut self.ports,
            ArtifactKind::Sinks => &mut self.sinks,
            ArtifactKind::Vrms => &mut self.vrms,
            ArtifactKind::Spd => &mut self.spd,
            ArtifactKind::Ldos => &mut self.ldos,
        }
    }
}
