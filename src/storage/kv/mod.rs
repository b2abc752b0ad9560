//! String-keyed slot storage with pluggable backends.
//!
//! This is folio's "local device storage": the content slots and the admin
//! secret live here as plain key/value pairs.
//!
//! - **RedbBackend**: Persistent storage with ACID guarantees (default for `folio serve`)
//! - **MemoryBackend**: Fast, non-persistent storage (tests and `--memory`)
//!
//! # Example
//!
//! ```ignore
//! use folio::storage::kv::KvStore;
//!
//! let store = KvStore::memory();
//! store.set_str("portfolio_bio", "Photographe").await?;
//!
//! let store = KvStore::file("~/.folio/content.redb")?;
//! ```

mod backend;
mod memory;
mod redb;
mod store;

#[cfg(test)]
mod tests;

pub use backend::KvBackend;
pub use memory::MemoryBackend;
pub use redb::RedbBackend;
pub use store::KvStore;
