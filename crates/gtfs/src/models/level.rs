//! Station levels (`levels`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const LEVEL_ID: Column = Column::new("level_id");
    pub const LEVEL_INDEX: Column = Column::new("level_index");
    pub const LEVEL_NAME: Column = Column::new("level_name");
}

/// A floor of a station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: Identifier<Level>,
    /// Position relative to street level (0); negative below ground.
    pub index: f64,
    pub name: Option<String>,
}

impl Entity for Level {
    const NAME: &'static str = "Level";
    const TABLE: Table = Table::new("levels");
    const COLUMNS: &'static [Column] = &[column::LEVEL_ID, column::LEVEL_INDEX, column::LEVEL_NAME];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::LEVEL_ID)?,
            index: fields.float(column::LEVEL_INDEX)?,
            name: fields.opt_string(column::LEVEL_NAME)?,
        })
    }
}

impl SingleKey for Level {
    const PRIMARY_KEY: Column = column::LEVEL_ID;

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

    #[test]
    fn test_find_level() {
        let (_dir, db) = fixture_database();

        let level = Level::find_str(&db, "B05_L1").unwrap();
        assert_eq!(level.name.as_deref(), Some("Mezzanine"));
        assert_eq!(level.index, -1.0);
    }

    #[test]
    fn test_text_index_is_rejected() {
        let (_dir, db) = fixture_database();

        let record = db
            .query_one(&Level::key_filter(&"B05_L1".into()))
            .unwrap()
            .unwrap()
            .with(column::LEVEL_INDEX, Value::Text("basement".into()));

        assert!(matches!(
            Level::from_record(&record),
            Err(GtfsError::Decoding { field: "level_index", .. })
        ));
    }
}
