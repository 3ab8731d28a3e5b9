//! Transit agencies (`agency`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const AGENCY_ID: Column = Column::new("agency_id");
    pub const AGENCY_NAME: Column = Column::new("agency_name");
    pub const AGENCY_URL: Column = Column::new("agency_url");
    pub const AGENCY_TIMEZONE: Column = Column::new("agency_timezone");
    pub const AGENCY_LANG: Column = Column::new("agency_lang");
    pub const AGENCY_PHONE: Column = Column::new("agency_phone");
    pub const AGENCY_FARE_URL: Column = Column::new("agency_fare_url");
}

/// The operator publishing the feed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agency {
    pub id: Identifier<Agency>,
    pub name: String,
    pub url: String,
    /// IANA zone name, e.g. `America/New_York`.
    pub timezone: String,
    pub lang: Option<String>,
    pub phone: Option<String>,
    pub fare_url: Option<String>,
}

impl Entity for Agency {
    const NAME: &'static str = "Agency";
    const TABLE: Table = Table::new("agency");
    const COLUMNS: &'static [Column] = &[
        column::AGENCY_ID,
        column::AGENCY_NAME,
        column::AGENCY_URL,
        column::AGENCY_TIMEZONE,
        column::AGENCY_LANG,
        column::AGENCY_PHONE,
        column::AGENCY_FARE_URL,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::AGENCY_ID)?,
            name: fields.string(column::AGENCY_NAME)?,
            url: fields.string(column::AGENCY_URL)?,
            timezone: fields.string(column::AGENCY_TIMEZONE)?,
            lang: fields.opt_string(column::AGENCY_LANG)?,
            phone: fields.opt_string(column::AGENCY_PHONE)?,
            fare_url: fields.opt_string(column::AGENCY_FARE_URL)?,
        })
    }
}

impl SingleKey for Agency {
    const PRIMARY_KEY: Column = column::AGENCY_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;

    #[test]
    fn test_find_agency() {
        let (_dir, db) = fixture_database();

        let agency = Agency::find_str(&db, "1").unwrap();
        assert_eq!(agency.url, "http://www.wmata.com");
        assert_eq!(agency.phone.as_deref(), Some("202-637-7000"));
        assert_eq!(agency.timezone, "America/New_York");
    }
}
