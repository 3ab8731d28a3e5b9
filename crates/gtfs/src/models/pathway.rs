//! Links between locations inside stations (`pathways`).

use std::time::Duration;

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::stop::Stop;
use crate::models::traits::{Entity, SingleKey};
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const PATHWAY_ID: Column = Column::new("pathway_id");
    pub const FROM_STOP_ID: Column = Column::new("from_stop_id");
    pub const TO_STOP_ID: Column = Column::new("to_stop_id");
    pub const PATHWAY_MODE: Column = Column::new("pathway_mode");
    pub const IS_BIDIRECTIONAL: Column = Column::new("is_bidirectional");
    pub const LENGTH: Column = Column::new("length");
    pub const TRAVERSAL_TIME: Column = Column::new("traversal_time");
    pub const STAIR_COUNT: Column = Column::new("stair_count");
    pub const MAX_SLOPE: Column = Column::new("max_slope");
    pub const MIN_WIDTH: Column = Column::new("min_width");
    pub const SIGNPOSTED_AS: Column = Column::new("signposted_as");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathwayMode {
    Walkway,
    Stairs,
    /// Travelator.
    MovingSidewalk,
    Escalator,
    Elevator,
    /// Payment gate between the paid and unpaid areas.
    FareGate,
    ExitGate,
}

impl_gtfs_code!(PathwayMode {
    1 => Walkway,
    2 => Stairs,
    3 => MovingSidewalk,
    4 => Escalator,
    5 => Elevator,
    6 => FareGate,
    7 => ExitGate,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bidirectional {
    Unidirectional,
    Bidirectional,
}

impl_gtfs_code!(Bidirectional {
    0 => Unidirectional,
    1 => Bidirectional,
});

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pathway {
    pub id: Identifier<Pathway>,
    pub from_stop_id: Identifier<Stop>,
    pub to_stop_id: Identifier<Stop>,
    pub mode: PathwayMode,
    pub bidirectional: Bidirectional,
    /// Meters.
    pub length: f64,
    pub traversal_time: Duration,
    /// Negative when going down from `from_stop_id`.
    pub stair_count: Option<i64>,
    pub max_slope: Option<f64>,
    /// Meters.
    pub min_width: Option<f64>,
    pub signposted_as: Option<String>,
}

impl Pathway {
    /// Pathways leaving `stop`, plus bidirectional ones arriving at it.
    pub fn all_from_stop(db: &GtfsDatabase, stop: &Identifier<Stop>) -> Result<Vec<Pathway>> {
        let mut pathways = Self::all_where(db, &Self::filter().eq(column::FROM_STOP_ID, stop))?;

        let reverse = Self::filter()
            .eq(column::TO_STOP_ID, stop)
            .eq(column::IS_BIDIRECTIONAL, Bidirectional::Bidirectional as i64);
        pathways.extend(Self::all_where(db, &reverse)?);

        Ok(pathways)
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional == Bidirectional::Bidirectional
    }
}

impl Entity for Pathway {
    const NAME: &'static str = "Pathway";
    const TABLE: Table = Table::new("pathways");
    const COLUMNS: &'static [Column] = &[
        column::PATHWAY_ID,
        column::FROM_STOP_ID,
        column::TO_STOP_ID,
        column::PATHWAY_MODE,
        column::IS_BIDIRECTIONAL,
        column::LENGTH,
        column::TRAVERSAL_TIME,
        column::STAIR_COUNT,
        column::MAX_SLOPE,
        column::MIN_WIDTH,
        column::SIGNPOSTED_AS,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        let seconds = fields.int(column::TRAVERSAL_TIME)?;
        let traversal_time = u64::try_from(seconds)
            .map(Duration::from_secs)
            .map_err(|_| fields.invalid(column::TRAVERSAL_TIME, format!("negative traversal time {seconds}")))?;

        Ok(Self {
            id: fields.id(column::PATHWAY_ID)?,
            from_stop_id: fields.id(column::FROM_STOP_ID)?,
            to_stop_id: fields.id(column::TO_STOP_ID)?,
            mode: fields.code(column::PATHWAY_MODE)?,
            bidirectional: fields.code(column::IS_BIDIRECTIONAL)?,
            length: fields.float(column::LENGTH)?,
            traversal_time,
            stair_count: fields.opt_int(column::STAIR_COUNT)?,
            max_slope: fields.opt_float(column::MAX_SLOPE)?,
            min_width: fields.opt_float(column::MIN_WIDTH)?,
            signposted_as: fields.opt_string(column::SIGNPOSTED_AS)?,
        })
    }
}

impl SingleKey for Pathway {
    const PRIMARY_KEY: Column = column::PATHWAY_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;
    use crate::error::GtfsError;
    use approx::assert_relative_eq;
    use rusqlite::types::Value;

    #[test]
    fn test_find_pathway() {
        let (_dir, db) = fixture_database();

        let pathway = Pathway::find_str(&db, "C05_134128").unwrap();
        assert_eq!(pathway.from_stop_id.as_str(), "NODE_C05_M_ESC_BT");
        assert_eq!(pathway.to_stop_id.as_str(), "NODE_C05_ESC1_TP");
        assert_eq!(pathway.mode, PathwayMode::Walkway);
        assert!(pathway.is_bidirectional());
        assert_relative_eq!(pathway.length, 159.8745823);
        assert_eq!(pathway.traversal_time, Duration::from_secs(35));
        assert_eq!(pathway.stair_count, None);
        assert_eq!(
            pathway.signposted_as.as_deref(),
            Some("OR Vienna/BL Franconia/Springfield/SV Wiehle-Reston East")
        );
    }

    #[test]
    fn test_all_from_stop_includes_reverse_bidirectional() {
        let (_dir, db) = fixture_database();

        let pathways = Pathway::all_from_stop(&db, &"NODE_C05_ESC1_TP".into()).unwrap();
        let ids: Vec<&str> = pathways.iter().map(|p| p.id.as_str()).collect();

        assert!(ids.contains(&"C05_134128")); // arrives here, bidirectional
        assert!(ids.contains(&"C05_134130")); // leaves from here
        assert!(!ids.contains(&"C05_134129")); // arrives here, one way
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Pathway::key_filter(&"C05_134128".into()))
            .unwrap()
            .unwrap()
            .with(column::PATHWAY_MODE, Value::Integer(0));

        assert!(matches!(
            Pathway::from_record(&record),
            Err(GtfsError::Decoding { field: "pathway_mode", .. })
        ));
    }

    #[test]
    fn test_negative_traversal_time_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Pathway::key_filter(&"C05_134128".into()))
            .unwrap()
            .unwrap()
            .with(column::TRAVERSAL_TIME, Value::Integer(-5));

        assert!(matches!(
            Pathway::from_record(&record),
            Err(GtfsError::Decoding { field: "traversal_time", .. })
        ));
    }
}
