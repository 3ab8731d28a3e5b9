//! Dataset metadata (`feed_info`).

use chrono::NaiveDate;

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const FEED_PUBLISHER_NAME: Column = Column::new("feed_publisher_name");
    pub const FEED_PUBLISHER_URL: Column = Column::new("feed_publisher_url");
    pub const FEED_LANG: Column = Column::new("feed_lang");
    pub const FEED_START_DATE: Column = Column::new("feed_start_date");
    pub const FEED_END_DATE: Column = Column::new("feed_end_date");
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedInfo {
    pub publisher_name: String,
    pub publisher_url: String,
    pub lang: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FeedInfo {
    /// True if the feed covers `date`. Missing bounds are open.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date) && self.end_date.map_or(true, |end| date <= end)
    }
}

impl Entity for FeedInfo {
    const NAME: &'static str = "FeedInfo";
    const TABLE: Table = Table::new("feed_info");
    const COLUMNS: &'static [Column] = &[
        column::FEED_PUBLISHER_NAME,
        column::FEED_PUBLISHER_URL,
        column::FEED_LANG,
        column::FEED_START_DATE,
        column::FEED_END_DATE,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            publisher_name: fields.string(column::FEED_PUBLISHER_NAME)?,
            publisher_url: fields.string(column::FEED_PUBLISHER_URL)?,
            lang: fields.string(column::FEED_LANG)?,
            start_date: fields.opt_date(column::FEED_START_DATE)?,
            end_date: fields.opt_date(column::FEED_END_DATE)?,
        })
    }
}

/// Keyed by publisher name.
impl SingleKey for FeedInfo {
    const PRIMARY_KEY: Column = column::FEED_PUBLISHER_NAME;

    fn id(&self) -> Identifier<Self> {
        Identifier::new(&self.publisher_name)
    }
}
