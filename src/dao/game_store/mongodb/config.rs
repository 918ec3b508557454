use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Parsed driver options plus the database holding the `games` collection.
#[derive(Clone)]
pub struct MongoConfig {
    /// Parsed driver options.
    pub options: ClientOptions,
    /// Database holding the games collection.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse the connection string once so reconnects reuse the same options.
    pub async fn from_uri(uri: &str, database_name: &str) -> MongoResult<Self> {
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name: database_name.to_owned(),
        })
    }
}
