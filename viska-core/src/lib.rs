//! `viska-core`: the native side of the Viska bindings.
//!
//! Design principles:
//! - Every exported function returns a [`RikoBuffer`](riko_runtime::RikoBuffer)
//!   holding one marshaled envelope; release it with `riko_buffer_free`.
//! - Instances live in process-wide handle tables; the host only ever sees the
//!   integer handle.
//! - Arguments arrive as marshaled byte buffers, handles as plain `u64`.
//! - Nothing unwinds across the boundary: panics become `Panic` envelopes.

pub mod client;
pub mod error;
pub mod exports;
pub mod module;
pub mod state;
pub mod symbols;

pub use client::Client;
pub use error::CoreError;
