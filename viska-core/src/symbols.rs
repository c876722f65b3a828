//! Names of the exported entry points, as the host addresses them.

/// `() -> Envelope<()>`
pub const INITIALIZE: &str = "viska_initialize";
/// `() -> Envelope<String>`
pub const VERSION: &str = "viska_version";
/// `(bytes) -> Envelope<bytes>`
pub const HASH: &str = "viska_hash";
/// `() -> Envelope<u64>`
pub const SHUTDOWN: &str = "viska_shutdown";

/// `(profile_path: String) -> Envelope<Handle>`
pub const CLIENT_CREATE: &str = "viska_client_create";
/// `(handle) -> Envelope<()>`
pub const CLIENT_DROP: &str = "viska_client_drop";
/// `(handle) -> Envelope<String>`
pub const CLIENT_NAME: &str = "viska_client_name";
/// `(handle) -> Envelope<String>`
pub const CLIENT_PROFILE_PATH: &str = "viska_client_profile_path";
/// `(handle) -> Envelope<bytes>`
pub const CLIENT_ACCOUNT_ID: &str = "viska_client_account_id";
/// `(handle) -> Envelope<String>`
pub const CLIENT_ACCOUNT_ID_DISPLAY: &str = "viska_client_account_id_display";
/// `(handle) -> Envelope<Option<String>>`
pub const CLIENT_DISPLAY_NAME: &str = "viska_client_display_name";
/// `(handle, Option<String>) -> Envelope<()>`
pub const CLIENT_SET_DISPLAY_NAME: &str = "viska_client_set_display_name";
