use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias for MongoDB store operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures of the MongoDB store, one variant per driver operation.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection string could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// Connection string with credentials redacted.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver refused the parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The `ping` command failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A single-document lookup failed.
    #[error("failed to find a document in `{collection}`")]
    FindOne {
        /// Collection involved.
        collection: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A listing query or its cursor failed.
    #[error("failed to list documents of `{collection}`")]
    FindMany {
        /// Collection involved.
        collection: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A single insert failed.
    #[error("failed to insert a document into `{collection}`")]
    InsertOne {
        /// Collection involved.
        collection: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The server assigned a non-ObjectId key.
    #[error("MongoDB returned a non-objectId key for the document inserted into `{collection}`")]
    UnexpectedInsertedId {
        /// Collection involved.
        collection: &'static str,
    },
    /// The `$inc` update failed.
    #[error("failed to increment `{field}` in `{collection}`")]
    Increment {
        /// Collection involved.
        collection: &'static str,
        /// Field the `$inc` targeted.
        field: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Listing collection names failed.
    #[error("failed to list collections")]
    ListCollections {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Wiping a collection failed.
    #[error("failed to clear collection `{collection}`")]
    ClearCollection {
        /// Collection involved.
        collection: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A bulk insert failed.
    #[error("failed to insert documents into `{collection}`")]
    InsertMany {
        /// Collection involved.
        collection: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}
