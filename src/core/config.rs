//! Application configuration.
//!
//! Configuration is loaded once by the binary and passed down explicitly; the
//! library never reads it from a global. It lives in `config.json` inside the
//! directory returned by [`get_config_directory`].

use crate::core::classification::{LinkDescriptor, UserPayload};
use crate::core::dirs::get_config_directory;
use crate::core::error::{CoverageNavigatorError, Result};
use crate::core::validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ActivationConfig {
    pub message: String,
    pub link_text: String,
    /// Page linked from the prompt on the hosted service
    pub cloud_page: String,
    /// Page linked from the prompt on self-hosted installs
    pub self_hosted_page: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            message: "Activation is required to view this repo, please activate the owner in"
                .to_string(),
            link_text: "users management".to_string(),
            cloud_page: "membersTab".to_string(),
            self_hosted_page: "access".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub self_hosted: bool,
    pub validator: ValidatorConfig,
    pub activation: ActivationConfig,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AppConfig {
    pub fn config_file() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load_or_default() -> Result<Self> {
        let config_file = Self::config_file()?;
        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            log::debug!("no config at {}, using defaults", config_file.display());
            Ok(Self::default())
        }
    }

    /// Load the config file, writing the defaults on first use
    pub fn load_or_create() -> Result<Self> {
        let config_file = Self::config_file()?;
        if config_file.exists() {
            return Self::load_from(&config_file);
        }

        let config = Self {
            created_at: Some(chrono::Utc::now()),
            ..Self::default()
        };
        config.save_to(&config_file)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoverageNavigatorError::config_read_failed(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| CoverageNavigatorError::config_parse_failed(path, e))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoverageNavigatorError::config_write_failed(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| CoverageNavigatorError::config_write_failed(path, e))
    }

    /// Call-to-action shown when an owner is not activated
    pub fn activation_payload(&self) -> UserPayload {
        let page_name = if self.self_hosted {
            &self.activation.self_hosted_page
        } else {
            &self.activation.cloud_page
        };

        UserPayload {
            message: self.activation.message.clone(),
            link: LinkDescriptor {
                page_name: page_name.clone(),
                text: self.activation.link_text.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classification::ParseFailureStatus;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.self_hosted);
        assert_eq!(
            config.validator.parse_failure_status,
            ParseFailureStatus::NotFound
        );
        assert_eq!(config.validator.not_found_tags, vec!["NotFoundError"]);
    }

    #[test]
    fn test_activation_payload_follows_deployment() {
        let mut config = AppConfig::default();
        assert_eq!(config.activation_payload().link.page_name, "membersTab");

        config.self_hosted = true;
        assert_eq!(config.activation_payload().link.page_name, "access");
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = AppConfig {
            self_hosted: true,
            ..AppConfig::default()
        };
        config.save_to(&path)?;
        assert_eq!(AppConfig::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_discriminant_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.validator.discriminant = "kind".to_string();
        config.save_to(&path)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("\"discriminant\": \"kind\""));
        assert_eq!(AppConfig::load_from(&path)?.validator.discriminant, "kind");
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"validator": {"parse_failure_status": "bad_request"}}"#)?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(
            config.validator.parse_failure_status,
            ParseFailureStatus::BadRequest
        );
        assert_eq!(
            config.validator.owner_not_activated_tags,
            vec!["OwnerNotActivatedError"]
        );
        assert_eq!(config.activation, ActivationConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_parse_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json")?;

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
