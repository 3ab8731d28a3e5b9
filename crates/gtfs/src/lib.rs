//! # metro-gtfs
//!
//! Typed, read-only access to a metro operator's GTFS Static dataset,
//! compiled into a single SQLite file.
//!
//! ## Features
//!
//! - **Typed identifiers**: a stop key cannot be passed where a trip key is expected
//! - **Keyed lookups**: single-column, two-column and six-column keys with wildcard parts
//! - **Strict decoding**: unknown enum codes and malformed dates are errors, never defaults
//! - **Shared handle**: one lazily opened, read-only connection per [`GtfsDatabase`]
//! - **Serde**: `Serialize`/`Deserialize` on every entity (optional `serde` feature)
//!
//! ## Example
//!
//! ```no_run
//! use metro_gtfs::prelude::*;
//!
//! # fn main() -> metro_gtfs::Result<()> {
//! let db = GtfsDatabase::bundled();
//!
//! let ashburn = Stop::find_str(&db, "STN_N12")?;
//! assert_eq!(ashburn.name, "ASHBURN METRORAIL STATION");
//!
//! let trip = Trip::find_str(&db, "5570306_19799")?;
//! for stop_time in trip.stop_times(&db)? {
//!     println!("{} {}", stop_time.departure_time, stop_time.stop_id);
//! }
//!
//! let query = FareLegRuleQuery::new()
//!     .from_area("everywhere")
//!     .to_area("everywhere")
//!     .from_timeframe("weekday_flat");
//! for rule in FareLegRule::matching(&db, &query)? {
//!     println!("{}", rule.fare_product_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod identifiers;
pub mod models;

pub use database::{DatabaseConfig, GtfsDatabase};
pub use error::{GtfsError, Result};
pub use identifiers::Identifier;

// Re-exports for convenience
pub mod prelude {
    pub use crate::database::{Column, DatabaseConfig, Filter, GtfsDatabase};
    pub use crate::error::{GtfsError, Result};
    pub use crate::identifiers::Identifier;
    pub use crate::models::*;
}
