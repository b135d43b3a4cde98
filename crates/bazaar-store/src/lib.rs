//! Type-safe key-value storage for Bazaar client state.
//!
//! Provides a small, ergonomic API for persisting data such as the wishlist
//! and the rewards wallet with automatic JSON serialization. The byte-level
//! storage is pluggable through [`KvBackend`]: an in-memory backend for tests
//! and embedding, and a directory-backed one for the CLI.
//!
//! # Example
//!
//! ```rust
//! use bazaar_store::Store;
//!
//! let store = Store::in_memory();
//!
//! // Store a value
//! store.set("wishlist", &vec![1u32, 2, 3]).unwrap();
//!
//! // Retrieve a value
//! let ids: Option<Vec<u32>> = store.get("wishlist").unwrap();
//! assert_eq!(ids, Some(vec![1, 2, 3]));
//!
//! // Delete a value
//! store.delete("wishlist").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileBackend, KvBackend, MemoryBackend, Store, StoreError};
}
