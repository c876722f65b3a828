//! Proxy for the native `Client` class.

use std::sync::Arc;

use riko_runtime::{Handle, to_bytes};
use viska_core::symbols;

use crate::boundary::Boundary;
use crate::error::Result;
use crate::proxy::{Class, Proxy};

/// Class descriptor of the native `Client`.
pub static CLIENT: Class = Class {
    name: "Client",
    drop: symbols::CLIENT_DROP,
};

/// An opened profile, living in the native core.
///
/// Dropping a `Client` releases it; call [`release`](Self::release) to observe
/// the outcome.
#[derive(Debug)]
pub struct Client {
    proxy: Proxy,
}

impl Client {
    /// Open the profile at `profile_path`.
    ///
    /// # Errors
    ///
    /// Any native error from the factory, such as `InvalidProfile` for a path
    /// with no final component.
    pub fn create(boundary: Arc<dyn Boundary>, profile_path: &str) -> Result<Self> {
        let arg = to_bytes(&profile_path.to_owned())?;
        let proxy = Proxy::create(boundary, &CLIENT, symbols::CLIENT_CREATE, &[arg.as_slice()])?;
        Ok(Self { proxy })
    }

    /// Profile name (the last component of the profile path).
    ///
    /// # Errors
    ///
    /// [`Error::UseAfterFree`](crate::Error::UseAfterFree) once released; a
    /// native `NotFound` if the core no longer knows the handle.
    pub fn name(&self) -> Result<String> {
        self.proxy.call(symbols::CLIENT_NAME, &[])
    }

    /// Path the profile was opened from.
    ///
    /// # Errors
    ///
    /// Fails like [`name`](Self::name).
    pub fn profile_path(&self) -> Result<String> {
        self.proxy.call(symbols::CLIENT_PROFILE_PATH, &[])
    }

    /// Raw 32-byte account ID.
    ///
    /// # Errors
    ///
    /// Fails like [`name`](Self::name).
    pub fn account_id(&self) -> Result<Vec<u8>> {
        self.proxy.call(symbols::CLIENT_ACCOUNT_ID, &[])
    }

    /// Hex-encoded account ID.
    ///
    /// # Errors
    ///
    /// Fails like [`name`](Self::name).
    pub fn account_id_display(&self) -> Result<String> {
        self.proxy.call(symbols::CLIENT_ACCOUNT_ID_DISPLAY, &[])
    }

    /// Display name, `None` when unset.
    ///
    /// # Errors
    ///
    /// Fails like [`name`](Self::name).
    pub fn display_name(&self) -> Result<Option<String>> {
        self.proxy.call(symbols::CLIENT_DISPLAY_NAME, &[])
    }

    /// Set the display name, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// `InvalidDisplayName` for a blank or over-long name, otherwise like
    /// [`name`](Self::name).
    pub fn set_display_name(&self, display_name: Option<&str>) -> Result<()> {
        let arg = to_bytes(&display_name.map(str::to_owned))?;
        self.proxy.call(symbols::CLIENT_SET_DISPLAY_NAME, &[arg.as_slice()])
    }

    /// Destroy the native instance. A second call fails with `DoubleFree`.
    ///
    /// # Errors
    ///
    /// See [`Proxy::release`](crate::Proxy::release).
    pub fn release(&self) -> Result<()> {
        self.proxy.release()
    }

    /// Whether this client was released.
    #[must_use]
    pub fn is_freed(&self) -> bool {
        self.proxy.is_freed()
    }

    /// Native handle.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.proxy.handle()
    }
}
