use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use k8s_annotation_values::schema::KeySpec;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub(crate) keys: Vec<KeySpec>,
    pub(crate) log_filter: Option<String>,
}

impl Settings {
    pub(crate) fn new(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder
            .add_source(
                Environment::with_prefix("ANNOTATION_INSPECT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("unable to load settings")?
            .try_deserialize()
            .context("invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_annotation_values::schema::ValueType;
    use std::io::Write;

    #[test]
    fn test_settings_from_file() {
        let path = std::env::temp_dir().join(format!(
            "annotation-inspect-settings-{}.yaml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_filter: debug\nkeys:\n  - key: nginx.org/hsts\n    type: bool\n  - key: nginx.org/proxy-read-timeout\n    type: int\n"
        )
        .unwrap();

        let settings = Settings::new(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.log_filter.as_deref(), Some("debug"));
        assert_eq!(settings.keys.len(), 2);
        assert_eq!(settings.keys[1].key, "nginx.org/proxy-read-timeout");
        assert_eq!(settings.keys[1].value_type, ValueType::Integer);
    }

    #[test]
    fn test_settings_missing_file() {
        let path = std::env::temp_dir().join("annotation-inspect-settings-does-not-exist.yaml");
        assert!(Settings::new(Some(&path)).is_err());
    }
}
