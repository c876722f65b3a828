//! Entry point for hosts: module functions and the `Client` factory.

use std::fmt;
use std::sync::Arc;

use riko_runtime::to_bytes;
use viska_core::symbols;

use crate::boundary::{Boundary, NativeBoundary};
use crate::client::Client;
use crate::error::{self, Result};

/// Handle on the native library.
///
/// Cheap to clone; every clone talks through the same boundary.
#[derive(Clone)]
pub struct Library {
    boundary: Arc<dyn Boundary>,
}

impl Library {
    /// The native core linked into this process.
    #[must_use]
    pub fn native() -> Self {
        Self::with_boundary(Arc::new(NativeBoundary))
    }

    /// Use a custom boundary.
    #[must_use]
    pub fn with_boundary(boundary: Arc<dyn Boundary>) -> Self {
        Self { boundary }
    }

    /// The boundary calls go through.
    #[must_use]
    pub const fn boundary(&self) -> &Arc<dyn Boundary> {
        &self.boundary
    }

    /// Initialize the native core. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// [`Error::Native`](crate::Error::Native) if the core reports a failure, or
    /// [`Error::MalformedPayload`](crate::Error::MalformedPayload) if its answer does not decode.
    pub fn initialize(&self) -> Result<()> {
        self.call(symbols::INITIALIZE, &[])
    }

    /// Native core version.
    ///
    /// # Errors
    ///
    /// [`Error::Native`](crate::Error::Native) if the core reports a failure, or
    /// [`Error::MalformedPayload`](crate::Error::MalformedPayload) if its answer does not decode.
    pub fn version(&self) -> Result<String> {
        self.call(symbols::VERSION, &[])
    }

    /// SHA3-256 computed by the native core.
    ///
    /// # Errors
    ///
    /// As [`version`](Self::version).
    pub fn hash(&self, data: &[u8]) -> Result<Vec<u8>> {
        let arg = to_bytes(&data.to_vec())?;
        self.call(symbols::HASH, &[arg.as_slice()])
    }

    /// Drop every instance the native core still owns and return how many
    /// there were. Proxies to those instances report `NotFound` afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::Native`](crate::Error::Native) if the core reports a failure, or
    /// [`Error::MalformedPayload`](crate::Error::MalformedPayload) if its answer does not decode.
    pub fn shutdown(&self) -> Result<u64> {
        self.call(symbols::SHUTDOWN, &[])
    }

    /// Open a profile.
    ///
    /// # Errors
    ///
    /// See [`Client::create`].
    pub fn create_client(&self, profile_path: &str) -> Result<Client> {
        Client::create(Arc::clone(&self.boundary), profile_path)
    }

    fn call<R: riko_runtime::Marshal>(&self, symbol: &str, args: &[&[u8]]) -> Result<R> {
        error::unwrap(&self.boundary.call_static(symbol, args))
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library").finish_non_exhaustive()
    }
}
