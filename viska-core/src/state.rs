//! Process-wide handle tables.
//!
//! Tables are created lazily on first use and live until process exit.
//! [`shutdown`] drains them without resetting their handle counters.

use std::sync::OnceLock;

use riko_runtime::HandleTable;

use crate::client::Client;

static CLIENTS: OnceLock<HandleTable<Client>> = OnceLock::new();

/// Table owning every live [`Client`].
pub fn clients() -> &'static HandleTable<Client> {
    CLIENTS.get_or_init(|| HandleTable::new("client"))
}

/// Drop every registered instance. Returns how many were reclaimed.
pub fn shutdown() -> u64 {
    let reclaimed = clients().drain().len() as u64;
    if reclaimed > 0 {
        tracing::warn!(reclaimed, "instances still live at shutdown");
    }
    reclaimed
}
