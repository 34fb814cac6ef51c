pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_global_settings, load_settings_from};
pub use paths::{
    default_global_config_path, CONFIG_PATH_ENV, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use settings::{MasterServerConfig, Settings, MASTER_SERVER_IP_ENV, MASTER_SERVER_PORT_ENV};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn settings_parse_master_timeout_and_log_file() {
        let settings: Settings = serde_yaml::from_str(
            r#"
master_server:
  address: 10.1.1.1
  port: 9000
request_timeout_seconds: 30
log_file: /tmp/layoutdeck/client.log
"#,
        )
        .expect("parse settings");

        settings.validate().expect("valid settings");
        assert_eq!(
            settings.master_server.as_ref().map(MasterServerConfig::url),
            Some("http://10.1.1.1:9000".to_string())
        );
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            settings.log_file,
            Some(PathBuf::from("/tmp/layoutdeck/client.log"))
        );
    }

    #[test]
    fn settings_reject_unknown_fields() {
        let err = serde_yaml::from_str::<Settings>(
            r#"
master_server:
  address: 10.1.1.1
  port: 9000
retries: 3
"#,
        )
        .expect_err("unknown field must fail");
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn settings_validation_rejects_zero_timeout_and_blank_master() {
        let settings = Settings {
            request_timeout_seconds: Some(0),
            ..Settings::default()
        };
        let err = settings.validate().expect_err("zero timeout must fail");
        match err {
            ConfigError::Settings(message) => {
                assert!(message.contains("request_timeout_seconds"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let settings = Settings {
            master_server: Some(MasterServerConfig {
                address: "  ".to_string(),
                port: 9000,
            }),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn master_url_keeps_explicit_scheme() {
        let master = MasterServerConfig {
            address: "https://master.lab/".to_string(),
            port: 8443,
        };
        assert_eq!(master.url(), "https://master.lab:8443");
    }

    #[test]
    fn env_overrides_replace_file_master_server() {
        let mut settings = Settings {
            master_server: Some(MasterServerConfig {
                address: "10.1.1.1".to_string(),
                port: 9000,
            }),
            ..Settings::default()
        };
        settings
            .apply_env_overrides(env(&[(MASTER_SERVER_PORT_ENV, "9100")]))
            .expect("apply env");
        assert_eq!(
            settings.master_server,
            Some(MasterServerConfig {
                address: "10.1.1.1".to_string(),
                port: 9100,
            })
        );

        settings
            .apply_env_overrides(env(&[
                (MASTER_SERVER_IP_ENV, "http://10.2.2.2"),
                (MASTER_SERVER_PORT_ENV, "9200"),
            ]))
            .expect("apply env");
        assert_eq!(
            settings.master_server.as_ref().map(MasterServerConfig::url),
            Some("http://10.2.2.2:9200".to_string())
        );
    }

    #[test]
    fn env_overrides_reject_bad_port_and_half_configured_master() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_overrides(env(&[
                (MASTER_SERVER_IP_ENV, "10.2.2.2"),
                (MASTER_SERVER_PORT_ENV, "eighty"),
            ]))
            .expect_err("bad port must fail");
        assert!(err.to_string().contains(MASTER_SERVER_PORT_ENV));

        let mut settings = Settings::default();
        let err = settings
            .apply_env_overrides(env(&[(MASTER_SERVER_IP_ENV, "10.2.2.2")]))
            .expect_err("ip without port must fail");
        match err {
            ConfigError::InvalidEnv { key, .. } => assert_eq!(key, MASTER_SERVER_PORT_ENV),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_settings_from_missing_file_uses_defaults() {
        let temp = tempdir().expect("temp dir");
        let settings =
            load_settings_from(&temp.path().join("absent.yaml"), env(&[])).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_settings_from_reports_invalid_yaml_path() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("config.yaml");
        fs::write(&path, "master_server: [").expect("write config");
        let err = load_settings_from(&path, env(&[])).expect_err("invalid yaml");
        match err {
            ConfigError::Parse { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_global_config_path_targets_home_layoutdeck_config_yaml() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp = tempdir().expect("temp dir");
        let old_home = std::env::var_os("HOME");
        let old_override = std::env::var_os(CONFIG_PATH_ENV);
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::set_var("HOME", temp.path());

        let path = default_global_config_path().expect("resolve global config path");
        assert_eq!(path, temp.path().join(".layoutdeck/config.yaml"));

        std::env::set_var(CONFIG_PATH_ENV, temp.path().join("custom.yaml"));
        let path = default_global_config_path().expect("resolve override path");
        assert_eq!(path, temp.path().join("custom.yaml"));

        match old_home {
            Some(value) => std::env::set_var("HOME", value),
            None => std::env::remove_var("HOME"),
        }
        match old_override {
            Some(value) => std::env::set_var(CONFIG_PATH_ENV, value),
            None => std::env::remove_var(CONFIG_PATH_ENV),
        }
    }
}
