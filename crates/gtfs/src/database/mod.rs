//! Read-only access to the GTFS Static dataset.
//!
//! A [`GtfsDatabase`] is built once at startup and passed by reference to
//! every query. It owns at most one SQLite connection, opened read-only on
//! first use and closed when the database value is dropped. Statement
//! execution is serialized through a single mutex, since a SQLite connection
//! is not reentrant.

pub mod filter;
pub mod record;

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::debug;

use crate::error::{GtfsError, Result};

pub use filter::{Column, Filter, FilterValue, Table};
pub use record::{Fields, Record};

/// File name of the dataset shipped with this crate.
pub const DATASET_FILE_NAME: &str = "MetroGTFS.sqlite3";

/// Where to find the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    path: PathBuf,
}

impl DatabaseConfig {
    /// Path of the dataset bundled under `resources/`.
    pub fn bundled_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join(DATASET_FILE_NAME)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::with_path(Self::bundled_path())
    }
}

/// Shared, read-only handle to the dataset.
pub struct GtfsDatabase {
    config: DatabaseConfig,
    conn: Mutex<Option<Connection>>,
}

impl GtfsDatabase {
    /// Create a handle without touching the file; it is opened on first use.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Handle over the bundled dataset.
    pub fn bundled() -> Self {
        Self::new(DatabaseConfig::default())
    }

    /// Open the dataset at `path` right away, reporting any failure now.
    ///
    /// # Errors
    ///
    /// [`GtfsError::MissingDataset`] or [`GtfsError::Connection`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let database = Self::new(DatabaseConfig::with_path(path));
        database.connect()?;
        Ok(database)
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open the connection if it is not open yet. Idempotent.
    ///
    /// A failed open is not remembered; the next call tries again.
    ///
    /// # Errors
    ///
    /// [`GtfsError::MissingDataset`] or [`GtfsError::Connection`].
    pub fn connect(&self) -> Result<()> {
        self.with_connection(|_| Ok(()))
    }

    pub fn is_connected(&self) -> bool {
        self.conn.lock().map(|conn| conn.is_some()).unwrap_or(false)
    }

    fn open_connection(path: &Path) -> Result<Connection> {
        if !path.is_file() {
            return Err(GtfsError::MissingDataset {
                path: path.to_path_buf(),
            });
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| GtfsError::Connection {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "opened GTFS dataset");
        Ok(conn)
    }

    /// Run `f` against the open connection, holding the lock for its duration.
    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock().map_err(|_| GtfsError::LockPoisoned)?;

        let conn = match &mut *guard {
            Some(conn) => conn,
            empty => empty.insert(Self::open_connection(self.config.path())?),
        };

        f(conn)
    }

    /// First row matching `filter`, if any.
    ///
    /// # Errors
    ///
    /// Connection failures, or [`GtfsError::Query`] if the statement fails.
    pub fn query_one(&self, filter: &Filter) -> Result<Option<Record>> {
        let mut first = None;
        self.visit(filter, Some(1), |record| {
            first = Some(record);
            Ok(ControlFlow::Break(()))
        })?;
        Ok(first)
    }

    /// Every row matching `filter`, read lazily.
    ///
    /// Nothing runs until the returned [`Rows`] is consumed, and each
    /// consumption re-executes the query from the start.
    pub fn query_many(&self, filter: &Filter) -> Rows<'_> {
        Rows {
            database: self,
            filter: filter.clone(),
        }
    }

    fn visit<F>(&self, filter: &Filter, limit: Option<usize>, mut f: F) -> Result<()>
    where
        F: FnMut(Record) -> Result<ControlFlow<()>>,
    {
        let query_error = |source: rusqlite::Error| GtfsError::Query {
            filter: filter.to_string(),
            source,
        };

        self.with_connection(|conn| {
            let sql = filter.to_sql(limit);
            debug!(%filter, %sql, "executing GTFS query");

            let mut stmt = conn.prepare_cached(&sql).map_err(query_error)?;
            let columns: Arc<[String]> = stmt
                .column_names()
                .into_iter()
                .map(str::to_owned)
                .collect();

            let mut rows = stmt.query(params_from_iter(filter.params())).map_err(query_error)?;
            while let Some(row) = rows.next().map_err(query_error)? {
                let record = Record::from_row(&columns, row).map_err(query_error)?;
                if f(record)?.is_break() {
                    break;
                }
            }
            Ok(())
        })
    }
}

/// Lazy, restartable sequence of rows for one filter.
///
/// Nothing is read until a consuming call, and each consuming call runs the
/// query again from the start. Rows are read in full before any callback
/// runs, so callbacks are free to query the same database.
pub struct Rows<'db> {
    database: &'db GtfsDatabase,
    filter: Filter,
}

impl Rows<'_> {
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Visit rows in the order the engine yields them, stopping early on
    /// `ControlFlow::Break`.
    ///
    /// # Errors
    ///
    /// Connection or query failures, or the first error returned by `f`.
    pub fn try_for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(Record) -> Result<ControlFlow<()>>,
    {
        for record in self.collect()? {
            if f(record)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Read every row.
    ///
    /// # Errors
    ///
    /// Connection or query failures.
    pub fn collect(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        self.database.visit(&self.filter, None, |record| {
            records.push(record);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(records)
    }

    /// Number of matching rows.
    ///
    /// # Errors
    ///
    /// Connection or query failures.
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        self.database.visit(&self.filter, None, |_| {
            count += 1;
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(count)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::fixture_database;
    use super::*;
    use rusqlite::types::Value;

    const STOPS: Table = Table::new("stops");
    const STOP_ID: Column = Column::new("stop_id");
    const STOP_NAME: Column = Column::new("stop_name");

    #[test]
    fn test_missing_dataset() {
        let database = GtfsDatabase::new(DatabaseConfig::with_path("/definitely/not/here.sqlite3"));

        let err = database.connect().unwrap_err();
        assert!(matches!(err, GtfsError::MissingDataset { .. }));
        assert!(!database.is_connected());

        // Lookups surface the same failure.
        let err = database.query_one(&Filter::table(STOPS)).unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn test_unreadable_file_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.sqlite3");
        std::fs::write(&path, b"this is not a database, just some bytes padding it out").unwrap();

        // SQLite defers header checks to the first statement on some builds,
        // so accept the failure either at open or at query time.
        match GtfsDatabase::open(&path) {
            Err(err) => assert!(err.is_connection(), "got: {err}"),
            Ok(database) => {
                let err = database.query_one(&Filter::table(STOPS)).unwrap_err();
                assert!(matches!(err, GtfsError::Query { .. }), "got: {err}");
            }
        }
    }

    #[test]
    fn test_connect_is_idempotent() {
        let (_dir, database) = fixture_database();

        assert!(database.is_connected());
        database.connect().unwrap();
        database.connect().unwrap();
        assert!(database.is_connected());
    }

    #[test]
    fn test_connection_is_read_only() {
        let (_dir, database) = fixture_database();

        let err = database
            .with_connection(|conn| {
                conn.execute("DELETE FROM stops", [])
                    .map_err(|source| GtfsError::Query {
                        filter: "DELETE".into(),
                        source,
                    })
            })
            .unwrap_err();
        assert!(matches!(err, GtfsError::Query { .. }));
    }

    #[test]
    fn test_query_one() {
        let (_dir, database) = fixture_database();

        let record = database
            .query_one(&Filter::table(STOPS).eq(STOP_ID, "STN_N12"))
            .unwrap()
            .unwrap();
        assert_eq!(
            record.get(STOP_NAME),
            Some(&Value::Text("ASHBURN METRORAIL STATION".into()))
        );

        let missing = database
            .query_one(&Filter::table(STOPS).eq(STOP_ID, "ABCDEFG"))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_query_many_is_restartable() {
        let (_dir, database) = fixture_database();

        let rows = database.query_many(&Filter::table(STOPS));
        let first = rows.collect().unwrap();
        let second = rows.collect().unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(rows.count().unwrap(), first.len());
    }

    #[test]
    fn test_query_many_stops_early() {
        let (_dir, database) = fixture_database();

        let mut seen = 0;
        database
            .query_many(&Filter::table(STOPS))
            .try_for_each(|_| {
                seen += 1;
                Ok(if seen == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })
            .unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_bad_filter_is_a_query_error() {
        let (_dir, database) = fixture_database();

        let filter = Filter::table(Table::new("no_such_table"));
        match database.query_one(&filter).unwrap_err() {
            GtfsError::Query { filter, .. } => assert_eq!(filter, "no_such_table"),
            other => panic!("unexpected error: {other}"),
        }

        let filter = Filter::table(STOPS).eq(Column::new("no_such_column"), 1);
        assert!(matches!(
            database.query_many(&filter).collect(),
            Err(GtfsError::Query { .. })
        ));
    }

    #[test]
    fn test_callbacks_may_query_the_same_database() {
        let (_dir, database) = fixture_database();

        let mut parents = Vec::new();
        database
            .query_many(&Filter::table(STOPS).eq(STOP_ID, "PF_B01_C"))
            .try_for_each(|record| {
                let parent = match record.get(Column::new("parent_station")) {
                    Some(Value::Text(id)) => id.clone(),
                    other => panic!("unexpected parent {other:?}"),
                };
                let station = database.query_one(&Filter::table(STOPS).eq(STOP_ID, parent))?;
                parents.push(station.and_then(|r| r.get(STOP_NAME).cloned()));
                Ok(ControlFlow::Continue(()))
            })
            .unwrap();

        assert_eq!(
            parents,
            [Some(Value::Text("GALLERY PL-CHINATOWN METRORAIL STATION".into()))]
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let (_dir, database) = fixture_database();
        let database = Arc::new(database);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let database = Arc::clone(&database);
                std::thread::spawn(move || database.query_many(&Filter::table(STOPS)).count().unwrap())
            })
            .collect();

        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(counts.windows(2).all(|w| w[0] == w[1]));
    }
}
