//! Area membership of stops (`stop_areas`).

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::area::Area;
use crate::models::stop::Stop;
use crate::models::traits::{CompositeKey, Entity};

pub mod column {
    use crate::database::Column;

    pub const AREA_ID: Column = Column::new("area_id");
    pub const STOP_ID: Column = Column::new("stop_id");
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopArea {
    pub area_id: Identifier<Area>,
    pub stop_id: Identifier<Stop>,
}

impl StopArea {
    /// `area:stop`
    pub fn id(&self) -> Identifier<StopArea> {
        Identifier::new(format!("{}:{}", self.area_id, self.stop_id))
    }

    /// Memberships matching whichever of `area` and `stop` are given. With
    /// neither, every membership.
    pub fn all_matching(
        db: &GtfsDatabase,
        area: Option<&Identifier<Area>>,
        stop: Option<&Identifier<Stop>>,
    ) -> Result<Vec<StopArea>> {
        let filter = Self::filter()
            .eq_opt(column::AREA_ID, area)
            .eq_opt(column::STOP_ID, stop);
        Self::all_where(db, &filter)
    }
}

impl Entity for StopArea {
    const NAME: &'static str = "StopArea";
    const TABLE: Table = Table::new("stop_areas");
    const COLUMNS: &'static [Column] = &[column::AREA_ID, column::STOP_ID];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            area_id: fields.id(column::AREA_ID)?,
            stop_id: fields.id(column::STOP_ID)?,
        })
    }
}

impl CompositeKey for StopArea {
    type First = Identifier<Area>;
    type Second = Identifier<Stop>;

    const KEY: [Column; 2] = [column::AREA_ID, column::STOP_ID];
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::database::testing::fixture_database;

    #[test]
    fn test_find_membership() {
        let (_dir, db) = fixture_database();

        let member = StopArea::find_by_key(&db, &"STN_A03".into(), &"STN_A03".into()).unwrap();
        assert_eq!(member.id().as_str(), "STN_A03:STN_A03");
    }

    #[test]
    fn test_all_matching() {
        let (_dir, db) = fixture_database();

        let everywhere = StopArea::all_matching(&db, Some(&"everywhere".into()), None).unwrap();
        assert!(everywhere.iter().any(|m| m.stop_id.as_str() == "STN_N06"));
        assert!(everywhere.iter().all(|m| m.area_id.as_str() == "everywhere"));

        let n04 = StopArea::all_matching(&db, None, Some(&"STN_N04".into())).unwrap();
        assert_eq!(n04.len(), 2);

        let all = StopArea::all_matching(&db, None, None).unwrap();
        assert_eq!(all, StopArea::all(&db).unwrap());
    }
}
