//! Query capabilities for GTFS entities.
//!
//! Every entity implements [`Entity`], which binds it to a table and a column
//! list and decodes one row. On top of that, an entity opts into exactly one
//! way of being looked up by key:
//!
//! - [`SingleKey`]: one primary-key column (`stop_id`, `trip_id`, ...)
//! - [`CompositeKey`]: a pair of columns (`shape_id` + `shape_pt_sequence`, ...)
//! - [`LongCompositeKey`]: four required columns and two optional ones, where
//!   an omitted component matches any value
//!
//! All lookups share one failure policy: no rows is [`GtfsError::NotFound`],
//! connection and query failures pass through, and a row that fails to decode
//! aborts the lookup with [`GtfsError::Decoding`].

use std::fmt;
use std::ops::ControlFlow;

use crate::database::{Column, Fields, Filter, FilterValue, GtfsDatabase, Record, Table};
use crate::error::{GtfsError, Result};
use crate::identifiers::Identifier;

// ============================================================================
// Base query
// ============================================================================

/// A value decoded from one row of a dataset table.
pub trait Entity: Sized {
    /// Name used in errors.
    const NAME: &'static str;

    const TABLE: Table;

    /// Columns read by [`Entity::decode`].
    const COLUMNS: &'static [Column];

    /// Decode one row. Either every field is valid or the whole row fails.
    fn decode(fields: &Fields<'_>) -> Result<Self>;

    fn from_record(record: &Record) -> Result<Self> {
        Self::decode(&Fields::new(Self::NAME, record))
    }

    /// Filter matching the whole table.
    fn filter() -> Filter {
        Filter::table(Self::TABLE).select(Self::COLUMNS)
    }

    /// Every entity of this kind, in the order the dataset yields them.
    fn all(db: &GtfsDatabase) -> Result<Vec<Self>> {
        Self::all_where(db, &Self::filter())
    }

    /// Every entity matching `filter`.
    fn all_where(db: &GtfsDatabase, filter: &Filter) -> Result<Vec<Self>> {
        let mut entities = Vec::new();
        db.query_many(filter).try_for_each(|record| {
            entities.push(Self::from_record(&record)?);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(entities)
    }

    /// First entity matching `filter`.
    fn first_where(db: &GtfsDatabase, filter: &Filter) -> Result<Self> {
        match db.query_one(filter)? {
            Some(record) => Self::from_record(&record),
            None => Err(GtfsError::NotFound {
                entity: Self::NAME,
                key: filter.to_string(),
            }),
        }
    }
}

fn first_or_not_found<T: Entity>(db: &GtfsDatabase, filter: &Filter, key: impl fmt::Display) -> Result<T> {
    match db.query_one(filter)? {
        Some(record) => T::from_record(&record),
        None => Err(GtfsError::NotFound {
            entity: T::NAME,
            key: key.to_string(),
        }),
    }
}

// ============================================================================
// Single primary key
// ============================================================================

/// Entity whose rows are unique by one column.
pub trait SingleKey: Entity {
    const PRIMARY_KEY: Column;

    /// The key this entity was decoded from.
    fn id(&self) -> Identifier<Self>;

    fn key_filter(id: &Identifier<Self>) -> Filter {
        Self::filter().eq(Self::PRIMARY_KEY, id)
    }

    /// Look up the entity with this key.
    ///
    /// # Errors
    ///
    /// [`GtfsError::NotFound`] if no row has this key.
    fn find(db: &GtfsDatabase, id: &Identifier<Self>) -> Result<Self> {
        first_or_not_found(db, &Self::key_filter(id), id)
    }

    /// [`SingleKey::find`] from a raw key string.
    fn find_str(db: &GtfsDatabase, id: &str) -> Result<Self> {
        Self::find(db, &Identifier::new(id))
    }
}

// ============================================================================
// Two-column composite key
// ============================================================================

/// Entity whose rows are unique by a pair of columns.
pub trait CompositeKey: Entity {
    type First: Into<FilterValue> + fmt::Display + Clone;
    type Second: Into<FilterValue> + fmt::Display + Clone;

    const KEY: [Column; 2];

    /// `KEY[0] == first AND KEY[1] == second`
    fn key_filter(first: &Self::First, second: &Self::Second) -> Filter {
        Self::filter()
            .eq(Self::KEY[0], first.clone())
            .eq(Self::KEY[1], second.clone())
    }

    /// `first:second`, the text used for synthetic ids and `NotFound` keys.
    fn key_text(first: &Self::First, second: &Self::Second) -> String {
        format!("{first}:{second}")
    }

    /// Look up the entity with this key pair.
    ///
    /// # Errors
    ///
    /// [`GtfsError::NotFound`] if no row has this pair.
    fn find_by_key(db: &GtfsDatabase, first: &Self::First, second: &Self::Second) -> Result<Self> {
        first_or_not_found(db, &Self::key_filter(first, second), Self::key_text(first, second))
    }
}

// ============================================================================
// Long composite key
// ============================================================================

/// Values of a six-column key: four always present, two optional.
pub trait LongKey: fmt::Display {
    fn required(&self) -> [FilterValue; 4];

    fn optional(&self) -> [Option<FilterValue>; 2];
}

/// Entity looked up by four required columns and two optional ones.
///
/// An omitted optional component matches any value in its column, including
/// NULL. Lookups that can match several rows return the first one the dataset
/// yields; [`LongCompositeKey::find_unique_by_long_key`] checks instead.
pub trait LongCompositeKey: Entity {
    type Key: LongKey;

    const REQUIRED_KEY: [Column; 4];
    const OPTIONAL_KEY: [Column; 2];

    fn long_key_filter(key: &Self::Key) -> Filter {
        let mut filter = Self::filter();

        for (column, value) in Self::REQUIRED_KEY.into_iter().zip(key.required()) {
            filter = filter.eq(column, value);
        }
        for (column, value) in Self::OPTIONAL_KEY.into_iter().zip(key.optional()) {
            filter = filter.eq_opt(column, value);
        }

        filter
    }

    /// First entity matching the key.
    ///
    /// # Errors
    ///
    /// [`GtfsError::NotFound`] if nothing matches.
    fn find_by_long_key(db: &GtfsDatabase, key: &Self::Key) -> Result<Self> {
        first_or_not_found(db, &Self::long_key_filter(key), key)
    }

    /// The only entity matching the key.
    ///
    /// # Errors
    ///
    /// [`GtfsError::NotFound`] if nothing matches, [`GtfsError::Ambiguous`]
    /// if more than one row does.
    fn find_unique_by_long_key(db: &GtfsDatabase, key: &Self::Key) -> Result<Self> {
        let mut records = db.query_many(&Self::long_key_filter(key)).collect()?;

        match records.len() {
            0 => Err(GtfsError::NotFound {
                entity: Self::NAME,
                key: key.to_string(),
            }),
            1 => Self::from_record(&records.remove(0)),
            matches => Err(GtfsError::Ambiguous {
                entity: Self::NAME,
                key: key.to_string(),
                matches,
            }),
        }
    }

    /// Every entity matching the key.
    fn all_by_long_key(db: &GtfsDatabase, key: &Self::Key) -> Result<Vec<Self>> {
        Self::all_where(db, &Self::long_key_filter(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;
    use crate::models::{FareLegRule, FareLegRuleKey, Level, ShapePoint, Stop};

    #[test]
    fn test_entity_filter_selects_declared_columns() {
        let sql = Level::filter().to_sql(None);
        assert_eq!(
            sql,
            "SELECT \"level_id\", \"level_index\", \"level_name\" FROM \"levels\""
        );
    }

    #[test]
    fn test_single_key_round_trip() {
        let (_dir, db) = fixture_database();

        let id = Identifier::<Level>::new("B05_L1");
        let level = Level::find(&db, &id).unwrap();
        assert_eq!(level.id(), id);
    }

    #[test]
    fn test_single_key_not_found() {
        let (_dir, db) = fixture_database();

        match Stop::find_str(&db, "ABCDEFG").unwrap_err() {
            GtfsError::NotFound { entity, key } => {
                assert_eq!(entity, "Stop");
                assert_eq!(key, "ABCDEFG");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_composite_key_not_found_reports_both_parts() {
        let (_dir, db) = fixture_database();

        let err = ShapePoint::find_by_key(&db, &"RRED_1".into(), &999).unwrap_err();
        match err {
            GtfsError::NotFound { entity, key } => {
                assert_eq!(entity, "ShapePoint");
                assert_eq!(key, "RRED_1:999");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_where_not_found_describes_filter() {
        let (_dir, db) = fixture_database();

        let filter = Stop::filter().eq(Column::new("stop_name"), "NOWHERE");
        match Stop::first_where(&db, &filter).unwrap_err() {
            GtfsError::NotFound { key, .. } => assert_eq!(key, "stops WHERE stop_name = 'NOWHERE'"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_key_filter_omits_absent_components() {
        let key = FareLegRuleKey::new("Metrorail", "everywhere", "everywhere", "200_flat");
        assert_eq!(FareLegRule::long_key_filter(&key).predicate_count(), 4);

        let key = key.from_timeframe("weekday_flat");
        assert_eq!(FareLegRule::long_key_filter(&key).predicate_count(), 5);

        let key = key.to_timeframe("weekday_flat");
        assert_eq!(FareLegRule::long_key_filter(&key).predicate_count(), 6);
    }

    #[test]
    fn test_unique_long_key_detects_ambiguity() {
        let (_dir, db) = fixture_database();

        // Two timeframes share this product between the same areas.
        let key = FareLegRuleKey::new("Metrorail", "STN_A01_C01", "STN_A03", "200_regular");
        assert!(FareLegRule::find_by_long_key(&db, &key).is_ok());

        match FareLegRule::find_unique_by_long_key(&db, &key).unwrap_err() {
            GtfsError::Ambiguous { matches, .. } => assert_eq!(matches, 2),
            other => panic!("unexpected error: {other}"),
        }

        let key = key.from_timeframe("weekday_regular");
        let rule = FareLegRule::find_unique_by_long_key(&db, &key).unwrap();
        assert_eq!(rule.from_timeframe_id.as_ref().map(Identifier::as_str), Some("weekday_regular"));
    }
}
