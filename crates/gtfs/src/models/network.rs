//! Fare networks (`networks`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};

pub mod column {
    use crate::database::Column;

    pub const NETWORK_ID: Column = Column::new("network_id");
    pub const NETWORK_NAME: Column = Column::new("network_name");
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    pub id: Identifier<Network>,
    pub name: Option<String>,
}

impl Entity for Network {
    const NAME: &'static str = "Network";
    const TABLE: Table = Table::new("networks");
    const COLUMNS: &'static [Column] = &[column::NETWORK_ID, column::NETWORK_NAME];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::NETWORK_ID)?,
            name: fields.opt_string(column::NETWORK_NAME)?,
        })
    }
}

impl SingleKey for Network {
    const PRIMARY_KEY: Column = column::NETWORK_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}
