use async_trait::async_trait;
use bson::{doc, Document as BsonDocument};
use futures::TryStreamExt;
use mongodb::{Collection, Cursor, Database};
use synaptic_core::SynapticError;

// ---------------------------------------------------------------------------
// ListCollectionNamesOptions
// ---------------------------------------------------------------------------

/// Options passed through to the database when listing collections.
#[derive(Debug, Clone, Default)]
pub struct ListCollectionNamesOptions {
    /// Filter applied by the server, e.g. `{ "name": "hotels" }`.
    pub filter: Option<BsonDocument>,
    /// Number of entries the server returns in the first batch.
    pub batch_size: Option<u32>,
    /// Only list collections the user is authorized to read. Listing always
    /// requests names only, which the server requires for this flag.
    pub authorized_collections: Option<bool>,
}

impl ListCollectionNamesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: BsonDocument) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_authorized_collections(mut self, authorized_collections: bool) -> Self {
        self.authorized_collections = Some(authorized_collections);
        self
    }
}

// ---------------------------------------------------------------------------
// MongoDatabase / NameCursor traits
// ---------------------------------------------------------------------------

/// The database handle a [`MongoVectorStore`](crate::MongoVectorStore) is
/// bound to.
///
/// Implemented for [`mongodb::Database`]; tests and alternative transports can
/// supply their own.
#[async_trait]
pub trait MongoDatabase: Send + Sync {
    /// Handle for a named sub-collection.
    type Collection: Send + Sync + 'static;

    /// Name of the database.
    fn name(&self) -> &str;

    /// Bind a named sub-collection. Must not perform I/O; the collection is
    /// resolved by the driver on first use.
    fn collection(&self, name: &str) -> Self::Collection;

    /// Start listing collection names, returning a forward-only cursor.
    async fn list_collection_names(
        &self,
        options: ListCollectionNamesOptions,
    ) -> Result<Box<dyn NameCursor>, SynapticError>;
}

/// A forward-only, page-at-a-time cursor over collection names.
#[async_trait]
pub trait NameCursor: Send {
    /// Fetch the next page. Returns `false` once the cursor is exhausted.
    async fn move_next(&mut self) -> Result<bool, SynapticError>;

    /// Names in the current page. Empty before the first `move_next`.
    fn current(&self) -> &[String];
}

// ---------------------------------------------------------------------------
// mongodb driver implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl MongoDatabase for Database {
    type Collection = Collection<BsonDocument>;

    fn name(&self) -> &str {
        Database::name(self)
    }

    fn collection(&self, name: &str) -> Self::Collection {
        Database::collection::<BsonDocument>(self, name)
    }

    async fn list_collection_names(
        &self,
        options: ListCollectionNamesOptions,
    ) -> Result<Box<dyn NameCursor>, SynapticError> {
        let command = list_collections_command(options);
        let cursor = self.run_cursor_command(command).await.map_err(|e| {
            SynapticError::VectorStore(format!("MongoDB list collections failed: {e}"))
        })?;

        Ok(Box::new(DriverNameCursor {
            cursor,
            page: Vec::new(),
        }))
    }
}

/// Build a `listCollections` command that returns names only.
fn list_collections_command(options: ListCollectionNamesOptions) -> BsonDocument {
    let mut command = doc! { "listCollections": 1, "nameOnly": true };
    if let Some(filter) = options.filter {
        command.insert("filter", filter);
    }
    if let Some(authorized) = options.authorized_collections {
        command.insert("authorizedCollections", authorized);
    }
    if let Some(batch_size) = options.batch_size {
        command.insert("cursor", doc! { "batchSize": i64::from(batch_size) });
    }
    command
}

/// Adapts a driver cursor of `listCollections` entries to a [`NameCursor`].
///
/// The driver buffers server batches itself, so each page holds one name.
struct DriverNameCursor {
    cursor: Cursor<BsonDocument>,
    page: Vec<String>,
}

#[async_trait]
impl NameCursor for DriverNameCursor {
    async fn move_next(&mut self) -> Result<bool, SynapticError> {
        self.page.clear();

        let next = self
            .cursor
            .try_next()
            .await
            .map_err(|e| SynapticError::VectorStore(format!("MongoDB cursor error: {e}")))?;

        match next {
            Some(entry) => {
                let name = entry.get_str("name").map_err(|e| {
                    SynapticError::VectorStore(format!("MongoDB collection entry: {e}"))
                })?;
                self.page.push(name.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn current(&self) -> &[String] {
        &self.page
    }
}
