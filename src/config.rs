use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".notes.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

impl ServerSettings {
    /// `host:port`, resolved by the listener (host names are allowed).
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl NotesConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: NotesConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Walks upward from `start_path` looking for `.notes.yml`.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Loads the explicit config file if given, otherwise the nearest
    /// `.notes.yml`, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, start_path: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(NotesError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load(path)
            }
            None => match Self::find_config_file(start_path) {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = NotesConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.body_limit, 1_048_576);
        assert!(!config.logging.verbose);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_fills_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "server:\n  port: 8080\n").unwrap();

        let config = NotesConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();
        assert_eq!(NotesConfig::load(&path).unwrap(), NotesConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "server:\n  port: not-a-port\n").unwrap();
        assert!(matches!(
            NotesConfig::load(&path).unwrap_err(),
            NotesError::Yaml(_)
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut config = NotesConfig::default();
        config.server.port = 4567;
        config.logging.file = Some(PathBuf::from("logs/notes.log"));
        config.save(&path).unwrap();

        assert_eq!(NotesConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        NotesConfig::default().save(&path).unwrap();

        assert_eq!(NotesConfig::find_config_file(&nested), Some(path));
    }

    #[test]
    fn test_discover_missing_explicit_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yml");
        assert!(matches!(
            NotesConfig::discover(Some(&missing), temp_dir.path()).unwrap_err(),
            NotesError::Config(_)
        ));
    }

    #[test]
    fn test_bind_address() {
        let settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(settings.bind_address(), "127.0.0.1:9000");
    }
}
