//! Fare areas (`areas`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const AREA_ID: Column = Column::new("area_id");
}

/// A group of stops priced together. Members are listed in `stop_areas`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub id: Identifier<Area>,
}

impl Entity for Area {
    const NAME: &'static str = "Area";
    const TABLE: Table = Table::new("areas");
    const COLUMNS: &'static [Column] = &[column::AREA_ID];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::AREA_ID)?,
        })
    }
}

impl SingleKey for Area {
    const PRIMARY_KEY: Column = column::AREA_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}
