//! MongoDB vector store integration for Synaptic.
//!
//! This crate provides [`MongoVectorStore`], the entry point over one MongoDB
//! database:
//! - [`MongoVectorStore::get_collection`] hands out typed collection handles,
//!   rejecting key types MongoDB records cannot be keyed by (see
//!   [`SUPPORTED_KEY_TYPES`]). A custom [`CollectionFactory`] can replace the
//!   default [`MongoCollection`] handle.
//! - [`MongoVectorStore::list_collection_names`] lazily streams the names of
//!   the collections in the database.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use synaptic_mongodb::MongoVectorStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MongoVectorStore::from_uri("mongodb+srv://...", "my_database").await?;
//! let names: Vec<String> = store.list_collection_names(None).try_collect().await?;
//! store.close().await;
//! # Ok(())
//! # }
//! ```

mod collection;
mod database;
mod key_type;
mod vector_store;

pub use collection::{
    CollectionFactory, MongoCollection, MongoCollectionOptions, NoCollectionFactory,
};
pub use database::{ListCollectionNamesOptions, MongoDatabase, NameCursor};
pub use key_type::{validate_key, validate_key_type, SUPPORTED_KEY_TYPES};
pub use vector_store::{MongoVectorStore, MongoVectorStoreOptions};

// Re-export core types for convenience.
pub use synaptic_core::{
    CancellationSignal, CollectionNameStream, KeyType, RecordCollection, RecordKey,
    SynapticError, VectorStoreMetadata,
};
