use super::{default_global_config_path, ConfigError, Settings};
use std::path::Path;

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings_from(&path, |key| std::env::var(key).ok())
}

/// A missing settings file yields defaults; env overrides apply either way.
pub fn load_settings_from<F>(path: &Path, env_lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = if path.exists() {
        Settings::from_path(path)?
    } else {
        Settings::default()
    };
    settings.apply_env_overrides(env_lookup)?;
    settings.validate()?;
    Ok(settings)
}
