//! Fare timeframes (`timeframes`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::codec::ServiceTime;
use crate::models::service::Service;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const TIMEFRAME_GROUP_ID: Column = Column::new("timeframe_group_id");
    pub const START_TIME: Column = Column::new("start_time");
    pub const END_TIME: Column = Column::new("end_time");
    pub const SERVICE_ID: Column = Column::new("service_id");
}

/// A span of the service day during which a fare applies.
///
/// `end_time` may be `24:00:00`, meaning the end of the service day.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeframe {
    pub id: Identifier<Timeframe>,
    pub start_time: ServiceTime,
    pub end_time: ServiceTime,
    pub service_id: Identifier<Service>,
}

impl Timeframe {
    /// True if `time` falls in `[start_time, end_time)`.
    pub fn contains(&self, time: ServiceTime) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

impl Entity for Timeframe {
    const NAME: &'static str = "Timeframe";
    const TABLE: Table = Table::new("timeframes");
    const COLUMNS: &'static [Column] = &[
        column::TIMEFRAME_GROUP_ID,
        column::START_TIME,
        column::END_TIME,
        column::SERVICE_ID,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::TIMEFRAME_GROUP_ID)?,
            start_time: fields.time(column::START_TIME)?,
            end_time: fields.time(column::END_TIME)?,
            service_id: fields.id(column::SERVICE_ID)?,
        })
    }
}

impl SingleKey for Timeframe {
    const PRIMARY_KEY: Column = column::TIMEFRAME_GROUP_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}
