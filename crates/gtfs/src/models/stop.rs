//! Stops, stations, entrances and station nodes (`stops`).

use geo::Point;

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::level::Level;
use crate::models::traits::{Entity, SingleKey};
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const STOP_ID: Column = Column::new("stop_id");
    pub const STOP_NAME: Column = Column::new("stop_name");
    pub const STOP_DESC: Column = Column::new("stop_desc");
    pub const STOP_LAT: Column = Column::new("stop_lat");
    pub const STOP_LON: Column = Column::new("stop_lon");
    pub const ZONE_ID: Column = Column::new("zone_id");
    pub const LOCATION_TYPE: Column = Column::new("location_type");
    pub const PARENT_STATION: Column = Column::new("parent_station");
    pub const WHEELCHAIR_BOARDING: Column = Column::new("wheelchair_boarding");
    pub const LEVEL_ID: Column = Column::new("level_id");
}

/// What kind of location a stop row describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationType {
    /// Where passengers board. Also called a stop.
    Platform,
    /// Physical structure containing platforms.
    Station,
    /// Entrance or exit of a station.
    Entrance,
    /// Point inside a station linked by pathways.
    GenericNode,
    BoardingArea,
}

impl_gtfs_code!(LocationType {
    0 => Platform,
    1 => Station,
    2 => Entrance,
    3 => GenericNode,
    4 => BoardingArea,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelchairBoarding {
    NoInformation,
    Accessible,
    NotAccessible,
}

impl_gtfs_code!(WheelchairBoarding {
    0 => NoInformation,
    1 => Accessible,
    2 => NotAccessible,
});

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id: Identifier<Stop>,
    pub name: String,
    pub description: Option<String>,
    /// x = longitude, y = latitude
    pub location: Point,
    pub zone_id: Option<String>,
    pub location_type: LocationType,
    pub parent_station: Option<Identifier<Stop>>,
    pub wheelchair_boarding: WheelchairBoarding,
    pub level_id: Option<Identifier<Level>>,
}

impl Stop {
    /// Every stop whose parent station is `parent`.
    pub fn children(db: &GtfsDatabase, parent: &Identifier<Stop>) -> Result<Vec<Stop>> {
        Self::all_where(db, &Self::filter().eq(column::PARENT_STATION, parent))
    }

    /// Top-level stops, i.e. those with no parent station. An empty
    /// `parent_station` counts as none.
    pub fn roots(db: &GtfsDatabase) -> Result<Vec<Stop>> {
        Self::all_where(db, &Self::filter().is_absent(column::PARENT_STATION))
    }
}

impl Entity for Stop {
    const NAME: &'static str = "Stop";
    const TABLE: Table = Table::new("stops");
    const COLUMNS: &'static [Column] = &[
        column::STOP_ID,
        column::STOP_NAME,
        column::STOP_DESC,
        column::STOP_LAT,
        column::STOP_LON,
        column::ZONE_ID,
        column::LOCATION_TYPE,
        column::PARENT_STATION,
        column::WHEELCHAIR_BOARDING,
        column::LEVEL_ID,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        let lat = fields.float(column::STOP_LAT)?;
        let lon = fields.float(column::STOP_LON)?;

        Ok(Self {
            id: fields.id(column::STOP_ID)?,
            name: fields.string(column::STOP_NAME)?,
            description: fields.opt_string(column::STOP_DESC)?,
            location: Point::new(lon, lat),
            zone_id: fields.opt_string(column::ZONE_ID)?,
            location_type: fields.code(column::LOCATION_TYPE)?,
            parent_station: fields.opt_id(column::PARENT_STATION)?,
            wheelchair_boarding: fields.code(column::WHEELCHAIR_BOARDING)?,
            level_id: fields.opt_id(column::LEVEL_ID)?,
        })
    }
}

impl SingleKey for Stop {
    const PRIMARY_KEY: Column = column::STOP_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;
    use crate::error::GtfsError;
    use crate::models::types::GtfsCode;
    use rusqlite::types::Value;

    #[test]
    fn test_location_type_codes() {
        assert_eq!(LocationType::from_code(1), Some(LocationType::Station));
        assert_eq!(LocationType::from_code(4), Some(LocationType::BoardingArea));
        assert_eq!(LocationType::from_code(5), None);
        assert_eq!(WheelchairBoarding::from_code(3), None);
    }

    #[test]
    fn test_find_station() {
        let (_dir, db) = fixture_database();

        let stop = Stop::find_str(&db, "STN_N12").unwrap();
        assert_eq!(stop.name, "ASHBURN METRORAIL STATION");
        assert_eq!(stop.location_type, LocationType::Station);
        assert_eq!(stop.parent_station, None);
        assert!(stop.location.y() > 38.0 && stop.location.x() < -77.0);
    }

    #[test]
    fn test_children() {
        let (_dir, db) = fixture_database();

        let children = Stop::children(&db, &"STN_B01_F01".into()).unwrap();
        assert!(!children.is_empty());
        for child in &children {
            assert_eq!(child.parent_station.as_ref().map(Identifier::as_str), Some("STN_B01_F01"));
            assert!(
                child.name.contains("CHINATOWN") || child.name.contains("GALLERY PL"),
                "unexpected child {}",
                child.name
            );
        }
    }

    #[test]
    fn test_roots_have_no_parent() {
        let (_dir, db) = fixture_database();

        let roots = Stop::roots(&db).unwrap();
        assert!(roots.iter().any(|s| s.id.as_str() == "STN_N12"));
        assert!(roots.iter().all(|s| s.parent_station.is_none()));
    }

    #[test]
    fn test_empty_parent_is_a_root() {
        let (_dir, db) = fixture_database();

        // Stored as '' rather than NULL.
        let dupont = Stop::find_str(&db, "STN_A03").unwrap();
        assert_eq!(dupont.parent_station, None);

        let roots = Stop::roots(&db).unwrap();
        assert!(roots.iter().any(|s| s.id == dupont.id));

        let decoded_roots = Stop::all(&db)
            .unwrap()
            .into_iter()
            .filter(|s| s.parent_station.is_none())
            .count();
        assert_eq!(roots.len(), decoded_roots);
    }

    #[test]
    fn test_unknown_location_type_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Stop::key_filter(&"STN_N12".into()))
            .unwrap()
            .unwrap()
            .with(column::LOCATION_TYPE, Value::Integer(9));

        match Stop::from_record(&record).unwrap_err() {
            GtfsError::Decoding { entity, field, .. } => {
                assert_eq!(entity, "Stop");
                assert_eq!(field, "location_type");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
