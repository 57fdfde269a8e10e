/// Application configuration
///
/// Read once at startup from `<config_dir>/flora/config.toml`:
/// - Linux: ~/.config/flora/config.toml
/// - macOS: ~/Library/Application Support/flora/config.toml
/// - Windows: %APPDATA%\flora\config.toml
///
/// Every key is optional. A missing file means all defaults.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://192.168.0.10:5000/predict";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full URL of the classification endpoint
    pub endpoint: String,
    /// Request timeout covering connect, upload and response
    pub timeout_secs: u64,
    /// Sent as `?threshold=` when set; the server applies 0.8 otherwise
    pub confidence_threshold: Option<f32>,
    /// Video4Linux device node used for capture
    pub camera_device: PathBuf,
    /// Frames discarded before the shot so exposure can settle
    pub warmup_frames: u32,
    /// Where captured photos are saved; `None` means `<Pictures>/flora`
    pub photo_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            confidence_threshold: None,
            camera_device: PathBuf::from("/dev/video0"),
            warmup_frames: 5,
            photo_dir: None,
        }
    }
}

impl Config {
    /// Load from the platform config file, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), endpoint = %config.endpoint, "Loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring config file");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolved directory for captured photos
    pub fn photo_dir(&self) -> PathBuf {
        self.photo_dir.clone().unwrap_or_else(default_photo_dir)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("flora").join("config.toml"))
}

/// ~/Pictures/flora, or ~/flora when there is no pictures directory
fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flora")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            endpoint = "http://10.0.0.4:5000/predict"
            confidence_threshold = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://10.0.0.4:5000/predict");
        assert_eq!(config.confidence_threshold, Some(0.5));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.camera_device, PathBuf::from("/dev/video0"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "photo_dir = \"/srv/photos\"").unwrap();
        writeln!(file, "warmup_frames = 0").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.photo_dir(), PathBuf::from("/srv/photos"));
        assert_eq!(config.warmup_frames, 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/flora.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
