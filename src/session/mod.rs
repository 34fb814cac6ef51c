pub mod artifact;
pub mod intent;
pub mod state;

pub use artifact::{ArtifactFileRef, ArtifactFileRefs, ArtifactKind, ALL_ARTIFACT_KINDS};
pub use intent::{Intent, IntentTracker, LoadFileType, NavigationIntent};
pub use state::{ServerInfo, SessionId, SessionState, SessionStore, UNSELECTED_SERVER_LABEL};
