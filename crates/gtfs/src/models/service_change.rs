//! Dated exceptions to weekly service (`calendar_dates`).

use chrono::NaiveDate;

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::codec::format_date;
use crate::models::service::Service;
use crate::models::traits::{CompositeKey, Entity};
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const SERVICE_ID: Column = Column::new("service_id");
    pub const DATE: Column = Column::new("date");
    pub const EXCEPTION_TYPE: Column = Column::new("exception_type");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExceptionType {
    /// Service runs on this date even if the weekly pattern says otherwise.
    Added,
    /// Service does not run on this date.
    Removed,
}

impl_gtfs_code!(ExceptionType {
    1 => Added,
    2 => Removed,
});

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceChange {
    pub service_id: Identifier<Service>,
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}

impl ServiceChange {
    /// `service:YYYYMMDD`
    pub fn id(&self) -> Identifier<ServiceChange> {
        Identifier::new(Self::key_text(&self.service_id, &self.date))
    }
}

impl Entity for ServiceChange {
    const NAME: &'static str = "ServiceChange";
    const TABLE: Table = Table::new("calendar_dates");
    const COLUMNS: &'static [Column] = &[column::SERVICE_ID, column::DATE, column::EXCEPTION_TYPE];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            service_id: fields.id(column::SERVICE_ID)?,
            date: fields.date(column::DATE)?,
            exception_type: fields.code(column::EXCEPTION_TYPE)?,
        })
    }
}

impl CompositeKey for ServiceChange {
    type First = Identifier<Service>;
    type Second = NaiveDate;

    const KEY: [Column; 2] = [column::SERVICE_ID, column::DATE];

    fn key_text(service: &Identifier<Service>, date: &NaiveDate) -> String {
        format!("{service}:{}", format_date(*date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;
    use crate::error::GtfsError;
    use rusqlite::types::Value;

    #[test]
    fn test_find_change() {
        let (_dir, db) = fixture_database();

        let date = NaiveDate::from_ymd_opt(2024, 6, 27).unwrap();
        let change = ServiceChange::find_by_key(&db, &"64_R".into(), &date).unwrap();

        assert_eq!(change.exception_type, ExceptionType::Added);
        assert_eq!(change.date, date);
        assert_eq!(change.id().as_str(), "64_R:20240627");
    }

    #[test]
    fn test_not_found_key_matches_id_format() {
        let (_dir, db) = fixture_database();

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        match ServiceChange::find_by_key(&db, &"64_R".into(), &date).unwrap_err() {
            GtfsError::NotFound { entity, key } => {
                assert_eq!(entity, "ServiceChange");
                assert_eq!(key, "64_R:20240101");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_exception_type_is_rejected() {
        let (_dir, db) = fixture_database();

        let date = NaiveDate::from_ymd_opt(2024, 6, 27).unwrap();
        let record = db
            .query_one(&ServiceChange::key_filter(&"64_R".into(), &date))
            .unwrap()
            .unwrap()
            .with(column::EXCEPTION_TYPE, Value::Integer(3));

        assert!(matches!(
            ServiceChange::from_record(&record),
            Err(GtfsError::Decoding { field: "exception_type", .. })
        ));
    }
}
