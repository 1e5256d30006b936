use std::any::Any;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// SynapticError
// ---------------------------------------------------------------------------

/// Error type shared by every Synaptic crate.
#[derive(Debug, Error)]
pub enum SynapticError {
    #[error("unsupported key type `{key_type}`; supported key types: {supported}")]
    UnsupportedKeyType { key_type: KeyType, supported: String },
    #[error("vector store error: {0}")]
    VectorStore(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("config error: {0}")]
    Config(String),
}

impl SynapticError {
    /// Build an [`SynapticError::UnsupportedKeyType`] listing the accepted set.
    pub fn unsupported_key_type(key_type: KeyType, supported: &[KeyType]) -> Self {
        let supported = supported
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        SynapticError::UnsupportedKeyType {
            key_type,
            supported,
        }
    }
}

// ---------------------------------------------------------------------------
// Key types
// ---------------------------------------------------------------------------

/// Descriptor of the key type a collection is requested with.
///
/// Captured statically through [`RecordKey::KEY_TYPE`] at the call site, so
/// stores can check it against the set their engine supports before building
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    String,
    Guid,
    Int32,
    Int64,
    UInt64,
    ObjectId,
    /// A caller-defined key, typically structured or composite.
    Other(&'static str),
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::String => f.write_str("string"),
            KeyType::Guid => f.write_str("guid"),
            KeyType::Int32 => f.write_str("i32"),
            KeyType::Int64 => f.write_str("i64"),
            KeyType::UInt64 => f.write_str("u64"),
            KeyType::ObjectId => f.write_str("object_id"),
            KeyType::Other(name) => f.write_str(name),
        }
    }
}

/// A type usable as the key of a record collection.
///
/// Implementing this trait only describes the key; whether a given store can
/// represent it is decided by the store.
pub trait RecordKey: Send + Sync + 'static {
    const KEY_TYPE: KeyType;
}

impl RecordKey for String {
    const KEY_TYPE: KeyType = KeyType::String;
}

impl RecordKey for uuid::Uuid {
    const KEY_TYPE: KeyType = KeyType::Guid;
}

impl RecordKey for i32 {
    const KEY_TYPE: KeyType = KeyType::Int32;
}

impl RecordKey for i64 {
    const KEY_TYPE: KeyType = KeyType::Int64;
}

impl RecordKey for u64 {
    const KEY_TYPE: KeyType = KeyType::UInt64;
}

// ---------------------------------------------------------------------------
// RecordCollection trait (forward-declared here, implementations per backend)
// ---------------------------------------------------------------------------

/// A typed handle bound to one named collection of a vector store.
///
/// Handles are produced by a store's `get_collection` and owned by the caller
/// afterwards; stores do not track them.
pub trait RecordCollection<K: RecordKey, R: Send + Sync + 'static>: Send + Sync {
    /// Name of the underlying collection.
    fn name(&self) -> &str;

    fn key_type(&self) -> KeyType {
        K::KEY_TYPE
    }

    /// Access the concrete handle, e.g. to downcast to a backend type.
    fn as_any(&self) -> &dyn Any;
}

// ---------------------------------------------------------------------------
// Store metadata
// ---------------------------------------------------------------------------

/// Describes the backend behind a vector store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreMetadata {
    /// Name of the storage system, e.g. `mongodb`.
    pub system_name: String,
    /// Name of the database the store is bound to.
    pub database_name: String,
}

/// Type alias for a pinned, boxed stream of collection names.
pub type CollectionNameStream<'a> =
    Pin<Box<dyn Stream<Item = Result<String, SynapticError>> + Send + 'a>>;

// ---------------------------------------------------------------------------
// CancellationSignal
// ---------------------------------------------------------------------------

/// A cloneable, one-way signal used to stop in-flight enumerations.
///
/// All clones observe the same state. Once cancelled the signal cannot be
/// reset.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the signal has fired.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}
