//! Routes (`routes`).

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::network::Network;
use crate::models::traits::{Entity, SingleKey};
use crate::models::trip::{self, Trip};
use crate::models::types::RouteType;

pub mod column {
    use crate::database::Column;

    pub const ROUTE_ID: Column = Column::new("route_id");
    pub const ROUTE_SHORT_NAME: Column = Column::new("route_short_name");
    pub const ROUTE_LONG_NAME: Column = Column::new("route_long_name");
    pub const ROUTE_TYPE: Column = Column::new("route_type");
    pub const NETWORK_ID: Column = Column::new("network_id");
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id: Identifier<Route>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub route_type: RouteType,
    pub network_id: Option<Identifier<Network>>,
}

impl Route {
    /// Display name: the long name, falling back to the short one.
    pub fn name(&self) -> &str {
        self.long_name
            .as_deref()
            .or(self.short_name.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Every trip on this route.
    pub fn trips(&self, db: &GtfsDatabase) -> Result<Vec<Trip>> {
        Trip::all_where(db, &Trip::filter().eq(trip::column::ROUTE_ID, &self.id))
    }
}

impl Entity for Route {
    const NAME: &'static str = "Route";
    const TABLE: Table = Table::new("routes");
    const COLUMNS: &'static [Column] = &[
        column::ROUTE_ID,
        column::ROUTE_SHORT_NAME,
        column::ROUTE_LONG_NAME,
        column::ROUTE_TYPE,
        column::NETWORK_ID,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::ROUTE_ID)?,
            short_name: fields.opt_string(column::ROUTE_SHORT_NAME)?,
            long_name: fields.opt_string(column::ROUTE_LONG_NAME)?,
            route_type: fields.code(column::ROUTE_TYPE)?,
            network_id: fields.opt_id(column::NETWORK_ID)?,
        })
    }
}

impl SingleKey for Route {
    const PRIMARY_KEY: Column = column::ROUTE_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}
