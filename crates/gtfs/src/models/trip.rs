//! Trips (`trips`).

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::route::Route;
use crate::models::service::Service;
use crate::models::shape::Shape;
use crate::models::stop_time::{self, StopTime};
use crate::models::traits::{Entity, SingleKey};
use crate::models::types::DirectionId;

pub mod column {
    use crate::database::Column;

    pub const TRIP_ID: Column = Column::new("trip_id");
    pub const ROUTE_ID: Column = Column::new("route_id");
    pub const SERVICE_ID: Column = Column::new("service_id");
    pub const TRIP_HEADSIGN: Column = Column::new("trip_headsign");
    pub const DIRECTION_ID: Column = Column::new("direction_id");
    pub const BLOCK_ID: Column = Column::new("block_id");
    pub const SHAPE_ID: Column = Column::new("shape_id");
}

/// One run of a vehicle along a route.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub id: Identifier<Trip>,
    pub route_id: Identifier<Route>,
    pub service_id: Identifier<Service>,
    pub headsign: Option<String>,
    pub direction: DirectionId,
    pub block_id: Option<String>,
    pub shape_id: Identifier<Shape>,
}

impl Trip {
    /// Stop times of this trip, in stop sequence order.
    pub fn stop_times(&self, db: &GtfsDatabase) -> Result<Vec<StopTime>> {
        let filter = StopTime::filter().eq(stop_time::column::TRIP_ID, &self.id);
        let mut stop_times = StopTime::all_where(db, &filter)?;
        stop_times.sort_by_key(|st| st.stop_sequence);
        Ok(stop_times)
    }

    /// The path this trip travels.
    pub fn shape(&self, db: &GtfsDatabase) -> Result<Shape> {
        Shape::load(db, &self.shape_id)
    }

    pub fn service(&self, db: &GtfsDatabase) -> Result<Service> {
        Service::find(db, &self.service_id)
    }
}

impl Entity for Trip {
    const NAME: &'static str = "Trip";
    const TABLE: Table = Table::new("trips");
    const COLUMNS: &'static [Column] = &[
        column::TRIP_ID,
        column::ROUTE_ID,
        column::SERVICE_ID,
        column::TRIP_HEADSIGN,
        column::DIRECTION_ID,
        column::BLOCK_ID,
        column::SHAPE_ID,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::TRIP_ID)?,
            route_id: fields.id(column::ROUTE_ID)?,
            service_id: fields.id(column::SERVICE_ID)?,
            headsign: fields.opt_string(column::TRIP_HEADSIGN)?,
            direction: fields.code(column::DIRECTION_ID)?,
            block_id: fields.opt_string(column::BLOCK_ID)?,
            shape_id: fields.id(column::SHAPE_ID)?,
        })
    }
}

impl SingleKey for Trip {
    const PRIMARY_KEY: Column = column::TRIP_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;

    #[test]
    fn test_find_trip() {
        let (_dir, db) = fixture_database();

        let trip = Trip::find_str(&db, "5570306_19799").unwrap();
        assert_eq!(trip.route_id.as_str(), "RED");
        assert_eq!(trip.service_id.as_str(), "61_R");
        assert_eq!(trip.headsign.as_deref(), Some("GLENMONT"));
        assert_eq!(trip.direction, DirectionId::Outbound);
        assert_eq!(trip.block_id, None); // stored as ''
        assert_eq!(trip.shape_id.as_str(), "RRED_1");
    }

    #[test]
    fn test_stop_times_are_sorted() {
        let (_dir, db) = fixture_database();

        let trip = Trip::find_str(&db, "5570306_19799").unwrap();
        let stop_times = trip.stop_times(&db).unwrap();

        assert!(stop_times.len() > 1);
        assert!(stop_times.windows(2).all(|w| w[0].stop_sequence < w[1].stop_sequence));
        assert!(stop_times.windows(2).all(|w| w[0].departure_time <= w[1].arrival_time));
        assert!(stop_times.iter().all(|st| st.trip_id == trip.id));
    }

    #[test]
    fn test_trip_shape() {
        let (_dir, db) = fixture_database();

        let trip = Trip::find_str(&db, "5570306_19799").unwrap();
        let shape = trip.shape(&db).unwrap();
        assert_eq!(shape.id, trip.shape_id);
        assert!(!shape.points.is_empty());
    }
}
