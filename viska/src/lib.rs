#![doc = include_str!("../README.md")]

pub mod boundary;
pub mod client;
pub mod error;
pub mod library;
pub mod proxy;

// Re-export core public API at crate root.
pub use boundary::{Boundary, NativeBoundary};
pub use client::Client;
pub use error::{Error, Result};
pub use library::Library;
pub use proxy::{Class, Proxy};
pub use riko_runtime::{Handle, Marshal};
