#![allow(unsafe_code)]
//! Exported C ABI. Each symbol is listed in [`crate::symbols`].
//!
//! Buffers passed in are borrowed for the duration of the call; the returned
//! [`RikoBuffer`] is owned by the caller.

use riko_runtime::RikoBuffer;
use riko_runtime::bridge::{self, CallResult};
use riko_runtime::ffi::arg_slice;

use crate::client::Client;
use crate::module;
use crate::state::clients;

fn client_method<R: riko_runtime::Marshal>(
    handle: u64,
    f: impl FnOnce(&mut Client) -> CallResult<R>,
) -> RikoBuffer {
    RikoBuffer::from_vec(bridge::method(clients(), handle, f))
}

// ---------------------------------------------------------------------------
// Module functions
// ---------------------------------------------------------------------------

/// Initialize the library. Safe to call repeatedly.
#[unsafe(no_mangle)]
pub extern "C" fn viska_initialize() -> RikoBuffer {
    RikoBuffer::from_vec(bridge::call(|| {
        module::initialize();
        Ok(())
    }))
}

/// Native core version string.
#[unsafe(no_mangle)]
pub extern "C" fn viska_version() -> RikoBuffer {
    RikoBuffer::from_vec(bridge::call(|| Ok(module::version().to_owned())))
}

/// SHA3-256 of a marshaled byte sequence.
///
/// # Safety
///
/// `data` must be valid for reads of `data_len` bytes, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn viska_hash(data: *const u8, data_len: usize) -> RikoBuffer {
    let raw = unsafe { arg_slice(data, data_len) };
    RikoBuffer::from_vec(bridge::call(|| {
        let bytes: Vec<u8> = bridge::arg(raw)?;
        Ok(module::hash(&bytes))
    }))
}

/// Drop every live instance. Returns the number reclaimed.
#[unsafe(no_mangle)]
pub extern "C" fn viska_shutdown() -> RikoBuffer {
    RikoBuffer::from_vec(bridge::call(|| Ok(module::shutdown())))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Open a profile. Returns the new client's handle.
///
/// # Safety
///
/// `profile_path` must be valid for reads of `profile_path_len` bytes, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn viska_client_create(
    profile_path: *const u8,
    profile_path_len: usize,
) -> RikoBuffer {
    let raw = unsafe { arg_slice(profile_path, profile_path_len) };
    RikoBuffer::from_vec(bridge::create(clients(), || {
        let path: String = bridge::arg(raw)?;
        Ok(Client::create(&path)?)
    }))
}

/// Destroy a client. Unknown handles yield a `NotFound` error.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_drop(handle: u64) -> RikoBuffer {
    RikoBuffer::from_vec(bridge::destroy(clients(), handle))
}

/// Profile name.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_name(handle: u64) -> RikoBuffer {
    client_method(handle, |c| Ok(c.name().to_owned()))
}

/// Path the profile was opened from, as given to `viska_client_create`.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_profile_path(handle: u64) -> RikoBuffer {
    client_method(handle, |c| Ok(c.profile_path().to_string_lossy().into_owned()))
}

/// Raw 32-byte account ID.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_account_id(handle: u64) -> RikoBuffer {
    client_method(handle, |c| Ok(c.account_id().to_vec()))
}

/// Hex account ID.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_account_id_display(handle: u64) -> RikoBuffer {
    client_method(handle, |c| Ok(c.account_id_display()))
}

/// Display name, absent when unset.
#[unsafe(no_mangle)]
pub extern "C" fn viska_client_display_name(handle: u64) -> RikoBuffer {
    client_method(handle, |c| Ok(c.display_name().map(str::to_owned)))
}

/// Set or clear the display name from a marshaled `Option<String>`.
///
/// # Safety
///
/// `display_name` must be valid for reads of `display_name_len` bytes, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn viska_client_set_display_name(
    handle: u64,
    display_name: *const u8,
    display_name_len: usize,
) -> RikoBuffer {
    let raw = unsafe { arg_slice(display_name, display_name_len) };
    client_method(handle, |c| {
        let value: Option<String> = bridge::arg(raw)?;
        Ok(c.set_display_name(value)?)
    })
}
