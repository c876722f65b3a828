//! Stateless module functions: no handle, no liveness state.

use std::sync::OnceLock;

use sha3::{Digest, Sha3_256};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the library. Safe to call any number of times; only the first
/// call installs the logger. Returns `true` for that first call.
pub fn initialize() -> bool {
    let mut first = false;
    INITIALIZED.get_or_init(|| {
        riko_runtime::logger::init(None);
        tracing::info!(version = version(), "viska core initialized");
        first = true;
    });
    first
}

/// Crate version of the native core.
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// SHA3-256 of `bytes`.
pub fn hash(bytes: &[u8]) -> Vec<u8> {
    Sha3_256::digest(bytes).to_vec()
}

/// Release every instance still registered. See [`crate::state::shutdown`].
pub fn shutdown() -> u64 {
    crate::state::shutdown()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        initialize();
        assert!(!initialize());
        assert!(!initialize());
    }

    #[test]
    fn hash_matches_known_vector() {
        assert_eq!(
            hex::encode(hash(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }
}
