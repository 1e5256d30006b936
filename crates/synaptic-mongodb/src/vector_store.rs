use bson::doc;
use mongodb::{Client, Database};
use synaptic_core::{
    CancellationSignal, CollectionNameStream, RecordCollection, RecordKey, SynapticError,
    VectorStoreMetadata,
};

use crate::collection::{
    CollectionFactory, MongoCollection, MongoCollectionOptions, NoCollectionFactory,
};
use crate::database::{ListCollectionNamesOptions, MongoDatabase};
use crate::key_type::validate_key;

// ---------------------------------------------------------------------------
// MongoVectorStoreOptions
// ---------------------------------------------------------------------------

/// Configuration for a [`MongoVectorStore`].
#[derive(Debug, Clone)]
pub struct MongoVectorStoreOptions<F = NoCollectionFactory> {
    /// Factory used instead of [`MongoCollection`] when building handles.
    pub collection_factory: Option<F>,
}

impl MongoVectorStoreOptions {
    pub fn new() -> Self {
        Self {
            collection_factory: None,
        }
    }
}

impl<F> Default for MongoVectorStoreOptions<F> {
    fn default() -> Self {
        Self {
            collection_factory: None,
        }
    }
}

impl<F> MongoVectorStoreOptions<F> {
    /// Set a custom collection factory.
    pub fn with_collection_factory<G>(self, factory: G) -> MongoVectorStoreOptions<G> {
        MongoVectorStoreOptions {
            collection_factory: Some(factory),
        }
    }
}

// ---------------------------------------------------------------------------
// MongoVectorStore
// ---------------------------------------------------------------------------

/// A vector store over the collections of one MongoDB database.
///
/// The store hands out typed collection handles and lists the collections
/// that exist. It holds no mutable state, so a single instance can be shared
/// across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use futures::TryStreamExt;
/// use synaptic_mongodb::MongoVectorStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoVectorStore::new(client.database("hotels"));
///
/// let collection = store.get_collection::<String, serde_json::Value>("hotel_records", None)?;
/// let names: Vec<String> = store.list_collection_names(None).try_collect().await?;
/// # Ok(())
/// # }
/// ```
pub struct MongoVectorStore<D: MongoDatabase = Database, F = NoCollectionFactory> {
    database: D,
    options: MongoVectorStoreOptions<F>,
    /// Set only when the store built the client itself.
    owned_client: Option<Client>,
}

impl<D: MongoDatabase + 'static> MongoVectorStore<D> {
    /// Create a store over a caller-owned database handle.
    pub fn new(database: D) -> Self {
        Self::with_options(database, MongoVectorStoreOptions::default())
    }
}

impl MongoVectorStore<Database> {
    /// Connect to MongoDB at the given URI and bind `database`.
    ///
    /// The store owns the client it creates; [`close`](Self::close) shuts it
    /// down.
    pub async fn from_uri(uri: &str, database: &str) -> Result<Self, SynapticError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| SynapticError::Config(format!("failed to connect to MongoDB: {e}")))?;

        Ok(Self {
            database: client.database(database),
            options: MongoVectorStoreOptions::default(),
            owned_client: Some(client),
        })
    }
}

impl<D, F> MongoVectorStore<D, F>
where
    D: MongoDatabase + 'static,
    F: CollectionFactory<D>,
{
    /// Create a store over a caller-owned database handle with options.
    pub fn with_options(database: D, options: MongoVectorStoreOptions<F>) -> Self {
        Self {
            database,
            options,
            owned_client: None,
        }
    }

    /// Return a reference to the underlying database handle.
    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn metadata(&self) -> VectorStoreMetadata {
        VectorStoreMetadata {
            system_name: "mongodb".to_string(),
            database_name: self.database.name().to_string(),
        }
    }

    /// Get a typed handle for the collection `name`.
    ///
    /// Fails with [`SynapticError::UnsupportedKeyType`] when `K` is not a
    /// supported key type, before any factory is consulted. The collection
    /// does not need to exist and no I/O is performed.
    pub fn get_collection<K, R>(
        &self,
        name: &str,
        options: Option<MongoCollectionOptions>,
    ) -> Result<Box<dyn RecordCollection<K, R>>, SynapticError>
    where
        K: RecordKey,
        R: Send + Sync + 'static,
    {
        validate_key::<K>()?;

        if name.is_empty() {
            return Err(SynapticError::Validation(
                "collection name must not be empty".to_string(),
            ));
        }

        let options = options.unwrap_or_default();

        if let Some(factory) = &self.options.collection_factory {
            tracing::debug!(
                collection = name,
                key_type = %K::KEY_TYPE,
                "building collection with custom factory"
            );
            return Ok(factory.create_collection::<K, R>(&self.database, name, &options));
        }

        tracing::debug!(collection = name, key_type = %K::KEY_TYPE, "binding collection");
        Ok(Box::new(MongoCollection::<K, R, D>::new(
            &self.database,
            name,
            options,
        )))
    }

    /// Lazily list the names of the collections in the database.
    ///
    /// The stream is single-pass: every call issues a new listing request.
    /// Names come back in the order the server reports them. `cancel` is
    /// checked before the listing call and at every cursor advance; when it
    /// fires, the stream ends after the current page without yielding an
    /// error.
    pub fn list_collection_names(
        &self,
        cancel: Option<CancellationSignal>,
    ) -> CollectionNameStream<'_> {
        let database = &self.database;

        Box::pin(async_stream::stream! {
            let cancel = cancel.unwrap_or_default();
            tracing::debug!(database = database.name(), "listing collection names");

            let started = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                cursor = database.list_collection_names(ListCollectionNamesOptions::default()) => Some(cursor),
            };

            let mut cursor = match started {
                Some(Ok(cursor)) => Some(cursor),
                Some(Err(e)) => {
                    yield Err(e);
                    None
                }
                None => {
                    tracing::debug!(database = database.name(), "listing cancelled");
                    None
                }
            };

            while let Some(current) = cursor.as_mut() {
                let advanced = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    advanced = current.move_next() => Some(advanced),
                };

                match advanced {
                    Some(Ok(true)) => {
                        // A delivered page is yielded whole; cancellation is
                        // observed at the next advance.
                        for name in current.current().to_vec() {
                            yield Ok(name);
                        }
                    }
                    Some(Ok(false)) => cursor = None,
                    Some(Err(e)) => {
                        yield Err(e);
                        cursor = None;
                    }
                    None => {
                        tracing::debug!(database = database.name(), "listing cancelled");
                        cursor = None;
                    }
                }
            }
        })
    }

    /// Check whether a collection named `name` exists.
    pub async fn collection_exists(&self, name: &str) -> Result<bool, SynapticError> {
        let options = ListCollectionNamesOptions::new().with_filter(doc! { "name": name });
        let mut cursor = self.database.list_collection_names(options).await?;

        while cursor.move_next().await? {
            if cursor.current().iter().any(|n| n == name) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Release the store.
    ///
    /// Shuts down the MongoDB client only if the store created it through
    /// [`MongoVectorStore::from_uri`]. Caller-supplied database handles are
    /// left untouched.
    pub async fn close(self) {
        if let Some(client) = self.owned_client {
            tracing::debug!(database = self.database.name(), "shutting down owned client");
            client.shutdown().await;
        }
    }
}
