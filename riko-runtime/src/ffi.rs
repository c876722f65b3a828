#![allow(unsafe_code)]
//! C ABI plumbing: owned byte buffers handed across the boundary.

use std::mem::ManuallyDrop;
use std::slice;

/// A byte buffer allocated by the native side. Release with [`riko_buffer_free`].
#[repr(C)]
#[derive(Debug)]
pub struct RikoBuffer {
    /// Start of the allocation.
    pub ptr: *mut u8,
    /// Initialized bytes.
    pub len: usize,
    /// Allocated capacity.
    pub cap: usize,
}

impl RikoBuffer {
    /// Hand a vector's allocation to the caller.
    #[must_use]
    pub fn from_vec(v: Vec<u8>) -> Self {
        let mut v = ManuallyDrop::new(v);
        Self {
            ptr: v.as_mut_ptr(),
            len: v.len(),
            cap: v.capacity(),
        }
    }

    /// Reclaim the allocation.
    ///
    /// # Safety
    ///
    /// `self` must come from [`RikoBuffer::from_vec`] and must not have been
    /// reclaimed before.
    #[must_use]
    pub unsafe fn into_vec(self) -> Vec<u8> {
        if self.ptr.is_null() {
            return Vec::new();
        }
        unsafe { Vec::from_raw_parts(self.ptr, self.len, self.cap) }
    }
}

/// Free a buffer returned by any entry point.
///
/// # Safety
///
/// `buf` must have been returned by this library and not freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn riko_buffer_free(buf: RikoBuffer) {
    drop(unsafe { buf.into_vec() });
}

/// Borrow an argument buffer passed in by the host. Null means empty.
///
/// # Safety
///
/// Unless null, `ptr` must be valid for reads of `len` bytes for `'a`.
pub unsafe fn arg_slice<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len) }
    }
}
