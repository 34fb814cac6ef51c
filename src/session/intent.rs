use crate::pages::Page;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFileType {
    Spd,
    Stackup,
    Padstack,
    Ports,
    Sinks,
    Vrms,
}

impl LoadFileType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spd => "spd",
            Self::Stackup => "stackup",
            Self::Padstack => "padstack",
            Self::Ports => "ports",
            Self::Sinks => "sinks",
            Self::Vrms => "vrms",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spd" => Ok(Self::Spd),
            "stackup" => Ok(Self::Stackup),
            "padstack" => Ok(Self::Padstack),
            "ports" => Ok(Self::Ports),
            "sinks" => Ok(Self::Sinks),
            "vrms" => Ok(Self::Vrms),
            _ => Err(
                "load file type must be one of: spd, stackup, padstack, ports, sinks, vrms"
                    .to_string(),
            ),
        }
    }

    pub fn for_page(page: Page) -> Option<Self> {
        match page {
            Page::LoadSpd => Some(Self::Spd),
            Page::CreateStackup => Some(Self::Stackup),
            Page::CreatePadstack => Some(Self::Padstack),
            Page::PortSetup => Some(Self::Ports),
            Page::SinkSetup => Some(Self::Sinks),
            Page::VrmSetup => Some(Self::Vrms),
            Page::Home | Page::LoadMaterial | Page::LdoSetup => None,
        }
    }
}

impl std::fmt::Display for LoadFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "The user chose to load file type X, intending to land on route R."
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigationIntent {
    pub load_file_type: LoadFileType,
    pub goto_route: String,
}

impl Default for NavigationIntent {
    fn default() -> Self {
        Self {
            load_file_type: LoadFileType::Spd,
            goto_route: Page::LoadSpd.route().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    FreshLoad { file_type: LoadFileType },
    RefreshExisting,
}

impl Intent {
    /// Route equality decides the branch; anything else falls through to
    /// refresh-existing.
    pub fn for_page(pending: Option<&NavigationIntent>, page: Page) -> Self {
        match pending {
            Some(intent) if intent.goto_route == page.route() => Intent::FreshLoad {
                file_type: intent.load_file_type,
            },
            _ => Intent::RefreshExisting,
        }
    }

    pub fn is_fresh_load(self) -> bool {
        matches!(self, Intent::FreshLoad { .. })
    }
}

/// Holds at most one pending intent. Reading it through `take_for` consumes it.
#[derive(Debug, Clone)]
pub struct IntentTracker {
    pending: Arc<Mutex<Option<NavigationIntent>>>,
}

impl Default for IntentTracker {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(Some(NavigationIntent::default()))),
        }
    }
}

impl IntentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<NavigationIntent>> {
        self.pending.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn set_intent(&self, load_file_type: LoadFileType, goto_route: impl Into<String>) {
        *self.lock() = Some(NavigationIntent {
            load_file_type,
            goto_route: goto_route.into(),
        });
    }

    pub fn request_fresh_load(&self, load_file_type: LoadFileType, page: Page) {
        self.set_intent(load_file_type, page.route());
    }

    pub fn intent(&self) -> Option<NavigationIntent> {
        self.lock().clone()
    }

    pub fn take(&self) -> Option<NavigationIntent> {
        self.lock().take()
    }

    pub fn take_for(&self, page: Page) -> Intent {
        Intent::for_page(self.take().as_ref(), page)
    }

    /// Puts back an intent taken by a visit that never reached the backend.
    /// An intent set in the meantime wins.
    pub fn restore(&self, intent: NavigationIntent) {
        let mut pending = self.lock();
        if pending.is_none() {
            *pending = Some(intent);
        }
    }
}
