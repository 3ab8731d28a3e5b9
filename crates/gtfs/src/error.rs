//! Failure vocabulary shared by the connection manager, the query traits and
//! every entity decoder.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GtfsError {
    #[error("GTFS dataset not found at {}", path.display())]
    MissingDataset { path: PathBuf },

    #[error("Unable to open GTFS dataset at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed ({filter}): {source}")]
    Query {
        filter: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid {entity} entry in column `{field}`: {reason}")]
    Decoding {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("{matches} {entity} rows match {key}, expected one")]
    Ambiguous {
        entity: &'static str,
        key: String,
        matches: usize,
    },

    #[error("GTFS database lock poisoned")]
    LockPoisoned,
}

impl GtfsError {
    /// True when a keyed lookup matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for the connection-level failures, which no retry can fix.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::MissingDataset { .. } | Self::Connection { .. })
    }
}

pub type Result<T> = std::result::Result<T, GtfsError>;
