//! The `Client` class: one opened profile.

use std::path::{Path, PathBuf};

use sha3::{Digest, Sha3_256};

use crate::error::CoreError;

/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME: usize = 64;

/// A profile opened by the host.
#[derive(Debug, Clone)]
pub struct Client {
    name: String,
    profile_path: PathBuf,
    account_id: [u8; 32],
    display_name: Option<String>,
}

impl Client {
    /// Open the profile at `profile_path`. Its name is the final path component.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidProfile`] when the path has no usable final
    /// component.
    pub fn create(profile_path: &str) -> Result<Self, CoreError> {
        let path = PathBuf::from(profile_path);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| CoreError::InvalidProfile(profile_path.to_owned()))?
            .to_owned();
        let account_id = Sha3_256::digest(name.as_bytes()).into();
        tracing::info!(%name, "client opened");
        Ok(Self {
            name,
            profile_path: path,
            account_id,
            display_name: None,
        })
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location the profile was opened from.
    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    /// Raw account ID.
    pub const fn account_id(&self) -> &[u8; 32] {
        &self.account_id
    }

    /// Hex-encoded account ID.
    pub fn account_id_display(&self) -> String {
        hex::encode(self.account_id)
    }

    /// Current display name, if set.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Set or clear the display name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDisplayName`] for a blank name or one longer than
    /// [`MAX_DISPLAY_NAME`] characters. The previous name is kept.
    pub fn set_display_name(&mut self, display_name: Option<String>) -> Result<(), CoreError> {
        self.display_name = match display_name {
            None => None,
            Some(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::InvalidDisplayName("empty"));
                }
                if trimmed.chars().count() > MAX_DISPLAY_NAME {
                    return Err(CoreError::InvalidDisplayName("too long"));
                }
                Some(trimmed.to_owned())
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_last_path_component() {
        let c = Client::create("/data/profiles/alice").unwrap();
        assert_eq!(c.name(), "alice");
        assert_eq!(c.profile_path(), Path::new("/data/profiles/alice"));
        assert_eq!(Client::create("bob").unwrap().name(), "bob");
    }

    #[test]
    fn empty_profile_is_rejected() {
        assert_eq!(
            Client::create("").unwrap_err(),
            CoreError::InvalidProfile(String::new())
        );
        assert!(Client::create("/").is_err());
    }

    #[test]
    fn account_id_is_stable_per_name() {
        let a = Client::create("/x/alice").unwrap();
        let b = Client::create("/y/alice").unwrap();
        assert_eq!(a.account_id(), b.account_id());
        assert_eq!(a.account_id_display().len(), 64);
        assert_ne!(a.account_id(), Client::create("carol").unwrap().account_id());
    }

    #[test]
    fn display_name_is_trimmed_and_validated() {
        let mut c = Client::create("alice").unwrap();
        assert_eq!(c.display_name(), None);
        c.set_display_name(Some("  Alice  ".into())).unwrap();
        assert_eq!(c.display_name(), Some("Alice"));
        assert!(c.set_display_name(Some("   ".into())).is_err());
        assert!(c.set_display_name(Some("x".repeat(65))).is_err());
        assert_eq!(c.display_name(), Some("Alice"));
        c.set_display_name(None).unwrap();
        assert_eq!(c.display_name(), None);
    }
}
