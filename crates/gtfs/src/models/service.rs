//! Weekly service patterns (`calendar`).

use chrono::{NaiveDate, Weekday};

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::calendar::{ServiceCalendar, WeekdayFlags, WEEK};
use crate::models::service_change::{self, ExceptionType, ServiceChange};
use crate::models::traits::{CompositeKey, Entity, SingleKey};
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const SERVICE_ID: Column = Column::new("service_id");
    pub const MONDAY: Column = Column::new("monday");
    pub const TUESDAY: Column = Column::new("tuesday");
    pub const WEDNESDAY: Column = Column::new("wednesday");
    pub const THURSDAY: Column = Column::new("thursday");
    pub const FRIDAY: Column = Column::new("friday");
    pub const SATURDAY: Column = Column::new("saturday");
    pub const SUNDAY: Column = Column::new("sunday");
    pub const START_DATE: Column = Column::new("start_date");
    pub const END_DATE: Column = Column::new("end_date");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceAvailability {
    NoService,
    HasService,
}

impl_gtfs_code!(ServiceAvailability {
    0 => NoService,
    1 => HasService,
});

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    pub id: Identifier<Service>,
    pub monday: ServiceAvailability,
    pub tuesday: ServiceAvailability,
    pub wednesday: ServiceAvailability,
    pub thursday: ServiceAvailability,
    pub friday: ServiceAvailability,
    pub saturday: ServiceAvailability,
    pub sunday: ServiceAvailability,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Service {
    pub fn on(&self, day: Weekday) -> ServiceAvailability {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Days of the week with service.
    pub fn service_days(&self) -> WeekdayFlags {
        WEEK.into_iter()
            .filter(|day| self.on(*day) == ServiceAvailability::HasService)
            .collect()
    }

    /// The exception recorded for this service on `date`, if any.
    pub fn change_on(&self, db: &GtfsDatabase, date: NaiveDate) -> Result<Option<ExceptionType>> {
        match ServiceChange::find_by_key(db, &self.id, &date) {
            Ok(change) => Ok(Some(change.exception_type)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Every exception recorded for this service.
    pub fn changes(&self, db: &GtfsDatabase) -> Result<Vec<ServiceChange>> {
        let filter = ServiceChange::filter().eq(service_change::column::SERVICE_ID, &self.id);
        ServiceChange::all_where(db, &filter)
    }

    /// Weekly pattern plus dated exceptions.
    pub fn calendar(&self, db: &GtfsDatabase) -> Result<ServiceCalendar> {
        let changes = self.changes(db)?;
        Ok(ServiceCalendar::new(self, &changes))
    }
}

impl Entity for Service {
    const NAME: &'static str = "Service";
    const TABLE: Table = Table::new("calendar");
    const COLUMNS: &'static [Column] = &[
        column::SERVICE_ID,
        column::MONDAY,
        column::TUESDAY,
        column::WEDNESDAY,
        column::THURSDAY,
        column::FRIDAY,
        column::SATURDAY,
        column::SUNDAY,
        column::START_DATE,
        column::END_DATE,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::SERVICE_ID)?,
            monday: fields.code(column::MONDAY)?,
            tuesday: fields.code(column::TUESDAY)?,
            wednesday: fields.code(column::WEDNESDAY)?,
            thursday: fields.code(column::THURSDAY)?,
            friday: fields.code(column::FRIDAY)?,
            saturday: fields.code(column::SATURDAY)?,
            sunday: fields.code(column::SUNDAY)?,
            start_date: fields.date(column::START_DATE)?,
            end_date: fields.date(column::END_DATE)?,
        })
    }
}

impl SingleKey for Service {
    const PRIMARY_KEY: Column = column::SERVICE_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;
    use crate::error::GtfsError;
    use rusqlite::types::Value;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_service() {
        let (_dir, db) = fixture_database();

        let service = Service::find_str(&db, "weekday_service_R").unwrap();
        assert_eq!(service.on(Weekday::Thu), ServiceAvailability::HasService);
        assert_eq!(service.on(Weekday::Sun), ServiceAvailability::NoService);
        assert_eq!(
            service.service_days().iter().collect::<Vec<_>>(),
            [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        );
    }

    #[test]
    fn test_weekend_service() {
        let (_dir, db) = fixture_database();

        let service = Service::find_str(&db, "weekend_service_R").unwrap();
        assert_eq!(service.on(Weekday::Sat), ServiceAvailability::HasService);
        assert_eq!(service.on(Weekday::Mon), ServiceAvailability::NoService);
    }

    #[test]
    fn test_change_on() {
        let (_dir, db) = fixture_database();

        let service = Service::find_str(&db, "64_R").unwrap();
        assert_eq!(
            service.change_on(&db, date(2024, 6, 27)).unwrap(),
            Some(ExceptionType::Added)
        );
        assert_eq!(service.change_on(&db, date(2024, 6, 28)).unwrap(), None);
    }

    #[test]
    fn test_calendar_applies_changes() {
        let (_dir, db) = fixture_database();

        let service = Service::find_str(&db, "64_R").unwrap();
        let calendar = service.calendar(&db).unwrap();

        assert!(calendar.runs_on(date(2024, 6, 27)));
        assert!(!calendar.runs_on(date(2024, 7, 4))); // removed holiday
    }

    #[test]
    fn test_invalid_day_flag_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Service::key_filter(&"weekday_service_R".into()))
            .unwrap()
            .unwrap()
            .with(column::THURSDAY, Value::Integer(2));

        assert!(matches!(
            Service::from_record(&record),
            Err(GtfsError::Decoding { field: "thursday", .. })
        ));
    }

    #[test]
    fn test_invalid_start_date_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Service::key_filter(&"weekday_service_R".into()))
            .unwrap()
            .unwrap()
            .with(column::START_DATE, Value::Integer(20241340));

        assert!(matches!(
            Service::from_record(&record),
            Err(GtfsError::Decoding { field: "start_date", .. })
        ));
    }
}
