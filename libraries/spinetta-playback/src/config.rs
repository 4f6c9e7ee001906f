//! Player configuration loading

use crate::error::{Result, TransportError};
use crate::types::PlayerConfig;
use std::path::Path;
use tracing::debug;

/// Environment variable prefix (`SPINETTA_INITIAL_VOLUME=0.5`)
pub const ENV_PREFIX: &str = "SPINETTA";

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Missing files are skipped; environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        if let Some(path) = path {
            if path.exists() {
                debug!(path = %path.display(), "loading player config file");
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
        }

        // Override with environment variables (prefixed with SPINETTA_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: PlayerConfig = settings
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Out-of-range volumes are fine (they saturate); NaN is not.
    pub fn validate(&self) -> Result<()> {
        if self.initial_volume.is_nan() {
            return Err(TransportError::Config(
                "initial_volume must be a number".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Tests that read the process environment run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sets environment variables, removing them again on drop
    struct ScopedEnv(Vec<&'static str>);

    impl ScopedEnv {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for key in &self.0 {
                std::env::remove_var(key);
            }
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let _lock = env_lock();
        let config = PlayerConfig::load(Some(Path::new("/nonexistent/player.toml"))).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let _lock = env_lock();
        let file = write_config("initial_volume = 0.25\nrepeat = true\n");

        let config = PlayerConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.initial_volume, 0.25);
        assert!(config.repeat);
        assert!(!config.shuffle);
        assert!(config.mirror_loop_to_sink);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let _lock = env_lock();
        let file = write_config("initial_volume = \"loud\"\n");

        let result = PlayerConfig::load(Some(file.path()));

        assert!(matches!(result, Err(TransportError::Config(_))));
    }

    #[test]
    fn environment_overrides_file() {
        let _lock = env_lock();
        let file = write_config("initial_volume = 0.25\nrepeat = true\n");
        let _env = ScopedEnv::set(&[
            ("SPINETTA_INITIAL_VOLUME", "0.6"),
            ("SPINETTA_MIRROR_LOOP_TO_SINK", "false"),
        ]);

        let config = PlayerConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.initial_volume, 0.6);
        assert!(!config.mirror_loop_to_sink);
        // Keys absent from the environment keep their file value
        assert!(config.repeat);
    }

    #[test]
    fn environment_alone_without_file() {
        let _lock = env_lock();
        let _env = ScopedEnv::set(&[("SPINETTA_LIKED", "true")]);

        let config = PlayerConfig::load(None).unwrap();

        assert!(config.liked);
        assert_eq!(config.initial_volume, 1.0);
    }

    #[test]
    fn nan_volume_fails_validation() {
        let config = PlayerConfig {
            initial_volume: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlayerConfig {
            initial_volume: 7.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
