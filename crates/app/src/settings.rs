//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `TRIPSPLIT__*` environment
//! variables.
//!
//! See `settings.toml` for the configuration.
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use engine::EngineConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
    /// Exit non-zero when the engine rejected any record.
    #[serde(default)]
    pub strict: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
            strict: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("TRIPSPLIT")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;
    use engine::DefaultSplitPolicy;

    use super::*;

    fn from_toml(raw: &str) -> Settings {
        Settings::build(Config::builder().add_source(File::from_str(raw, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert!(!settings.app.strict);
        assert_eq!(settings.engine, EngineConfig::default());
    }

    #[test]
    fn reads_engine_table() {
        let settings = from_toml(
            r#"
            [app]
            level = "debug"
            strict = true

            [engine]
            default_split = "exclude_payer"
            tolerance_cents = 3
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert!(settings.app.strict);
        assert_eq!(settings.engine.default_split, DefaultSplitPolicy::ExcludePayer);
        assert_eq!(settings.engine.tolerance_cents, 3);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let settings = Settings::new("does/not/exist/settings").unwrap();
        assert_eq!(settings.engine.tolerance_cents, 1);
    }
}
