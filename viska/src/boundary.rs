#![allow(unsafe_code)]
//! The calling convention between host and native core.
//!
//! Every entry point is addressed by symbol name, takes zero or more marshaled
//! argument buffers, and returns one marshaled envelope. Instance methods also
//! receive the handle they act on.

use std::slice;

use riko_runtime::envelope::{Envelope, seal};
use riko_runtime::ffi::riko_buffer_free;
use riko_runtime::{Error as RuntimeError, Handle, RikoBuffer};
use viska_core::exports as x;
use viska_core::symbols as s;

/// Transport for boundary calls.
///
/// [`NativeBoundary`] is the production implementation; tests substitute
/// doubles to count or script calls.
pub trait Boundary: Send + Sync {
    /// Call a free function or factory.
    fn call_static(&self, symbol: &str, args: &[&[u8]]) -> Vec<u8>;

    /// Call a method (or destructor) on the instance behind `handle`.
    fn call_method(&self, symbol: &str, handle: Handle, args: &[&[u8]]) -> Vec<u8>;
}

/// Calls the C ABI exported by `viska-core`, linked into this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBoundary;

impl Boundary for NativeBoundary {
    fn call_static(&self, symbol: &str, args: &[&[u8]]) -> Vec<u8> {
        let buf = match (symbol, args) {
            (s::INITIALIZE, []) => x::viska_initialize(),
            (s::VERSION, []) => x::viska_version(),
            (s::SHUTDOWN, []) => x::viska_shutdown(),
            (s::HASH, [data]) => unsafe { x::viska_hash(data.as_ptr(), data.len()) },
            (s::CLIENT_CREATE, [path]) => unsafe {
                x::viska_client_create(path.as_ptr(), path.len())
            },
            _ => return unknown_symbol(symbol, args.len()),
        };
        unsafe { take_buffer(buf) }
    }

    fn call_method(&self, symbol: &str, handle: Handle, args: &[&[u8]]) -> Vec<u8> {
        let h = handle.raw();
        let buf = match (symbol, args) {
            (s::CLIENT_DROP, []) => x::viska_client_drop(h),
            (s::CLIENT_NAME, []) => x::viska_client_name(h),
            (s::CLIENT_PROFILE_PATH, []) => x::viska_client_profile_path(h),
            (s::CLIENT_ACCOUNT_ID, []) => x::viska_client_account_id(h),
            (s::CLIENT_ACCOUNT_ID_DISPLAY, []) => x::viska_client_account_id_display(h),
            (s::CLIENT_DISPLAY_NAME, []) => x::viska_client_display_name(h),
            (s::CLIENT_SET_DISPLAY_NAME, [name]) => unsafe {
                x::viska_client_set_display_name(h, name.as_ptr(), name.len())
            },
            _ => return unknown_symbol(symbol, args.len()),
        };
        unsafe { take_buffer(buf) }
    }
}

/// Copy a native buffer into a `Vec`, then free it via `riko_buffer_free`.
unsafe fn take_buffer(buf: RikoBuffer) -> Vec<u8> {
    let bytes = if buf.ptr.is_null() {
        Vec::new()
    } else {
        unsafe { slice::from_raw_parts(buf.ptr, buf.len) }.to_vec()
    };
    unsafe { riko_buffer_free(buf) };
    bytes
}

fn unknown_symbol(symbol: &str, arity: usize) -> Vec<u8> {
    tracing::error!(symbol, arity, "no such entry point");
    let err = RuntimeError::UnknownSymbol(format!("{symbol}/{arity}"));
    seal(&Envelope::<()>::Err(err.into()))
}
