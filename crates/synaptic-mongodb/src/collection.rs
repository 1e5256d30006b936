use std::any::Any;
use std::marker::PhantomData;

use synaptic_core::{RecordCollection, RecordKey};

use crate::database::MongoDatabase;

// ---------------------------------------------------------------------------
// MongoCollectionOptions
// ---------------------------------------------------------------------------

/// Per-collection settings handed to whichever factory builds the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoCollectionOptions {
    /// Name of the Atlas Vector Search index (default: `vector_index`).
    pub vector_index_name: String,
    /// Name of the Atlas Search full text index (default: `full_text_search_index`).
    pub full_text_index_name: String,
    /// Field name storing the embedding vector (default: `embedding`).
    pub vector_field: String,
    /// Field name storing the document content (default: `content`).
    pub content_field: String,
    /// Number of candidates for `$vectorSearch` (default: `10 * k`).
    pub num_candidates: Option<i64>,
}

impl Default for MongoCollectionOptions {
    fn default() -> Self {
        Self {
            vector_index_name: "vector_index".to_string(),
            full_text_index_name: "full_text_search_index".to_string(),
            vector_field: "embedding".to_string(),
            content_field: "content".to_string(),
            num_candidates: None,
        }
    }
}

impl MongoCollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vector search index name.
    pub fn with_vector_index_name(mut self, name: impl Into<String>) -> Self {
        self.vector_index_name = name.into();
        self
    }

    /// Set the full text search index name.
    pub fn with_full_text_index_name(mut self, name: impl Into<String>) -> Self {
        self.full_text_index_name = name.into();
        self
    }

    /// Set the field name for storing embedding vectors.
    pub fn with_vector_field(mut self, vector_field: impl Into<String>) -> Self {
        self.vector_field = vector_field.into();
        self
    }

    /// Set the field name for storing document content.
    pub fn with_content_field(mut self, content_field: impl Into<String>) -> Self {
        self.content_field = content_field.into();
        self
    }

    /// Set the number of candidates for `$vectorSearch`.
    ///
    /// If not set, defaults to `10 * k` at query time.
    pub fn with_num_candidates(mut self, num_candidates: i64) -> Self {
        self.num_candidates = Some(num_candidates);
        self
    }

    /// Compute the number of candidates to use in `$vectorSearch` for `k` results.
    pub fn num_candidates(&self, k: usize) -> i64 {
        self.num_candidates.unwrap_or_else(|| {
            i64::try_from(k)
                .unwrap_or(i64::MAX)
                .saturating_mul(10)
        })
    }
}

// ---------------------------------------------------------------------------
// MongoCollection
// ---------------------------------------------------------------------------

/// The default collection handle: a name bound to a database sub-collection.
///
/// Building one performs no I/O. Whether the collection exists is only
/// discovered by the driver on first use.
pub struct MongoCollection<K, R, D: MongoDatabase> {
    name: String,
    inner: D::Collection,
    options: MongoCollectionOptions,
    _record: PhantomData<fn() -> (K, R)>,
}

impl<K, R, D: MongoDatabase> MongoCollection<K, R, D> {
    pub fn new(database: &D, name: impl Into<String>, options: MongoCollectionOptions) -> Self {
        let name = name.into();
        let inner = database.collection(&name);
        Self {
            name,
            inner,
            options,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &MongoCollectionOptions {
        &self.options
    }

    /// Return a reference to the bound database collection.
    pub fn inner(&self) -> &D::Collection {
        &self.inner
    }
}

impl<K, R, D> RecordCollection<K, R> for MongoCollection<K, R, D>
where
    K: RecordKey,
    R: Send + Sync + 'static,
    D: MongoDatabase + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// CollectionFactory
// ---------------------------------------------------------------------------

/// Strategy for building collection handles in place of [`MongoCollection`].
///
/// Configured through
/// [`MongoVectorStoreOptions`](crate::MongoVectorStoreOptions). The store has
/// already validated the key type by the time this is called.
pub trait CollectionFactory<D: MongoDatabase>: Send + Sync {
    fn create_collection<K, R>(
        &self,
        database: &D,
        name: &str,
        options: &MongoCollectionOptions,
    ) -> Box<dyn RecordCollection<K, R>>
    where
        K: RecordKey,
        R: Send + Sync + 'static;
}

/// Placeholder factory type for stores without a custom factory.
///
/// Uninhabited, so the only value of `Option<NoCollectionFactory>` is `None`.
#[derive(Debug, Clone, Copy)]
pub enum NoCollectionFactory {}

impl<D: MongoDatabase> CollectionFactory<D> for NoCollectionFactory {
    fn create_collection<K, R>(
        &self,
        _database: &D,
        _name: &str,
        _options: &MongoCollectionOptions,
    ) -> Box<dyn RecordCollection<K, R>>
    where
        K: RecordKey,
        R: Send + Sync + 'static,
    {
        match *self {}
    }
}
