use std::fs;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use super::connection::JsonConnection;

/// Device-local security state: the developer PIN hash, the device-trust
/// flag, and the hashed admin credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub developer_pin_hash: Option<String>,
    #[serde(default)]
    pub device_trusted: bool,
    pub admin_username_hash: Option<String>,
    pub admin_password_hash: Option<String>,
}

/// YAML-file-backed repository for [`SecuritySettings`]
#[derive(Clone)]
pub struct SecurityRepository {
    connection: JsonConnection,
}

impl SecurityRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Load the stored settings, or defaults when none were saved yet
    pub fn load(&self) -> Result<SecuritySettings> {
        let path = self.connection.security_settings_path();
        if !path.exists() {
            debug!("No security settings file, using defaults");
            return Ok(SecuritySettings::default());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_yaml::from_str(&yaml_content)
            .context("Failed to parse security settings")?;
        Ok(settings)
    }

    /// Replace the stored settings
    pub fn save(&self, settings: &SecuritySettings) -> Result<()> {
        let path = self.connection.security_settings_path();
        let yaml_content = serde_yaml::to_string(settings)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}
