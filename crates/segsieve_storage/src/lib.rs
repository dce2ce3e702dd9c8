//! # segsieve storage
//!
//! Byte-store backends for segsieve.
//!
//! The sieve writes prime records into a backend and the loader reads them
//! back. Backends are **opaque byte stores**: they never interpret the
//! records they hold.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, append, flush)
//! - No knowledge of the prime record format
//! - Must be `Send + Sync` so a sink can be shared by sieve workers
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and in-process use
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use segsieve_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(&7i64.to_ne_bytes()).unwrap();
//! let data = backend.read_at(offset, 8).unwrap();
//! assert_eq!(data, 7i64.to_ne_bytes());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
