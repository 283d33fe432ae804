use anyhow::Result;
use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::storage::json::{JsonConnection, SecurityRepository};
use shared::AdminCredentials;

/// PIN accepted until a custom developer PIN has been set
pub const DEFAULT_DEV_PIN: &str = "3759";

/// Service for the device-local credential scheme: SHA-256 hashed admin
/// credentials plus a device-trust PIN gating the registration and login
/// screens.
///
/// This is a convenience gate for a single-user desktop install, not a
/// security boundary.
#[derive(Clone)]
pub struct SecurityService {
    repository: SecurityRepository,
}

impl SecurityService {
    /// Create a new SecurityService
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            repository: SecurityRepository::new(connection),
        }
    }

    /// SHA-256 hash of a string, hex encoded
    pub fn hash(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check whether a candidate string matches a stored hash
    pub fn verify(candidate: &str, hash: &str) -> bool {
        Self::hash(candidate) == hash
    }

    /// Whether this installation has passed the PIN challenge
    pub async fn is_device_trusted(&self) -> Result<bool> {
        Ok(self.repository.load()?.device_trusted)
    }

    /// Mark this installation as trusted
    pub async fn trust_device(&self) -> Result<()> {
        let mut settings = self.repository.load()?;
        settings.device_trusted = true;
        self.repository.save(&settings)?;
        info!("Device marked as trusted");
        Ok(())
    }

    /// Store a custom developer PIN (hashed)
    pub async fn set_developer_pin(&self, pin: &str) -> Result<()> {
        let mut settings = self.repository.load()?;
        settings.developer_pin_hash = Some(Self::hash(pin));
        self.repository.save(&settings)?;
        info!("Developer PIN updated");
        Ok(())
    }

    /// Validate a developer PIN attempt.
    ///
    /// Checked against the stored hash when one exists, otherwise against
    /// the default PIN.
    pub async fn verify_developer_pin(&self, pin: &str) -> Result<bool> {
        let settings = self.repository.load()?;
        let is_valid = match &settings.developer_pin_hash {
            Some(stored_hash) => Self::verify(pin, stored_hash),
            None => pin == DEFAULT_DEV_PIN,
        };
        if !is_valid {
            warn!("Developer PIN validation failed");
        }
        Ok(is_valid)
    }

    /// Store admin credentials (both parts hashed)
    pub async fn set_admin_credentials(&self, username: &str, password: &str) -> Result<()> {
        let mut settings = self.repository.load()?;
        settings.admin_username_hash = Some(Self::hash(username));
        settings.admin_password_hash = Some(Self::hash(password));
        self.repository.save(&settings)?;
        info!("Admin credentials updated");
        Ok(())
    }

    /// The stored admin credential hashes, when registration has happened
    pub async fn admin_credentials(&self) -> Result<Option<AdminCredentials>> {
        let settings = self.repository.load()?;
        match (settings.admin_username_hash, settings.admin_password_hash) {
            (Some(username_hash), Some(password_hash)) => Ok(Some(AdminCredentials {
                username_hash,
                password_hash,
            })),
            _ => Ok(None),
        }
    }

    /// Validate an admin login attempt against the stored credentials.
    ///
    /// Fails when no credentials are registered yet.
    pub async fn verify_admin_login(&self, username: &str, password: &str) -> Result<bool> {
        let Some(credentials) = self.admin_credentials().await? else {
            warn!("Admin login attempted before registration");
            return Ok(false);
        };

        let is_valid = Self::verify(username, &credentials.username_hash)
            && Self::verify(password, &credentials.password_hash);
        if is_valid {
            info!("Admin login succeeded");
        } else {
            warn!("Admin login failed");
        }
        Ok(is_valid)
    }
}
