//! Arrivals and departures of trips at stops (`stop_times`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::codec::ServiceTime;
use crate::models::stop::Stop;
use crate::models::traits::{CompositeKey, Entity};
use crate::models::trip::Trip;
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const TRIP_ID: Column = Column::new("trip_id");
    pub const ARRIVAL_TIME: Column = Column::new("arrival_time");
    pub const DEPARTURE_TIME: Column = Column::new("departure_time");
    pub const STOP_ID: Column = Column::new("stop_id");
    pub const STOP_SEQUENCE: Column = Column::new("stop_sequence");
    pub const PICKUP_TYPE: Column = Column::new("pickup_type");
    pub const DROP_OFF_TYPE: Column = Column::new("drop_off_type");
    pub const SHAPE_DIST_TRAVELED: Column = Column::new("shape_dist_traveled");
}

/// Whether passengers can board or alight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupDropOff {
    Regular,
    NotAvailable,
    PhoneAgency,
    CoordinateWithDriver,
}

impl_gtfs_code!(PickupDropOff {
    0 => Regular,
    1 => NotAvailable,
    2 => PhoneAgency,
    3 => CoordinateWithDriver,
});

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopTime {
    pub trip_id: Identifier<Trip>,
    pub arrival_time: ServiceTime,
    pub departure_time: ServiceTime,
    pub stop_id: Identifier<Stop>,
    pub stop_sequence: u32,
    pub pickup_type: PickupDropOff,
    pub drop_off_type: PickupDropOff,
    /// Miles along the trip's shape.
    pub distance_traveled: f64,
}

impl StopTime {
    /// `trip:sequence`
    pub fn id(&self) -> Identifier<StopTime> {
        Identifier::new(format!("{}:{}", self.trip_id, self.stop_sequence))
    }

    /// Seconds spent at the stop.
    pub fn dwell_seconds(&self) -> u64 {
        self.departure_time
            .total_seconds()
            .saturating_sub(self.arrival_time.total_seconds())
    }
}

impl Entity for StopTime {
    const NAME: &'static str = "StopTime";
    const TABLE: Table = Table::new("stop_times");
    const COLUMNS: &'static [Column] = &[
        column::TRIP_ID,
        column::ARRIVAL_TIME,
        column::DEPARTURE_TIME,
        column::STOP_ID,
        column::STOP_SEQUENCE,
        column::PICKUP_TYPE,
        column::DROP_OFF_TYPE,
        column::SHAPE_DIST_TRAVELED,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            trip_id: fields.id(column::TRIP_ID)?,
            arrival_time: fields.time(column::ARRIVAL_TIME)?,
            departure_time: fields.time(column::DEPARTURE_TIME)?,
            stop_id: fields.id(column::STOP_ID)?,
            stop_sequence: fields.uint(column::STOP_SEQUENCE)?,
            pickup_type: fields.code(column::PICKUP_TYPE)?,
            drop_off_type: fields.code(column::DROP_OFF_TYPE)?,
            distance_traveled: fields.float(column::SHAPE_DIST_TRAVELED)?,
        })
    }
}

impl CompositeKey for StopTime {
    type First = Identifier<Trip>;
    type Second = u32;

    const KEY: [Column; 2] = [column::TRIP_ID, column::STOP_SEQUENCE];
}
