//! Fare media (`fare_media`).

use crate::database::{Column, Fields, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::traits::{Entity, SingleKey};
use crate::models::types::impl_gtfs_code;

pub mod column {
    use crate::database::Column;

    pub const FARE_MEDIA_ID: Column = Column::new("fare_media_id");
    pub const FARE_MEDIA_NAME: Column = Column::new("fare_media_name");
    pub const FARE_MEDIA_TYPE: Column = Column::new("fare_media_type");
}

/// How a fare is carried by the rider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FareMediaType {
    None,
    PaperTicket,
    TransitCard,
    /// Contactless bank cards and wallets.
    ContactlessEmv,
    MobileApp,
}

impl_gtfs_code!(FareMediaType {
    0 => None,
    1 => PaperTicket,
    2 => TransitCard,
    3 => ContactlessEmv,
    4 => MobileApp,
});

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareMedia {
    pub id: Identifier<FareMedia>,
    pub name: Option<String>,
    pub media_type: FareMediaType,
}

impl Entity for FareMedia {
    const NAME: &'static str = "FareMedia";
    const TABLE: Table = Table::new("fare_media");
    const COLUMNS: &'static [Column] = &[
        column::FARE_MEDIA_ID,
        column::FARE_MEDIA_NAME,
        column::FARE_MEDIA_TYPE,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.id(column::FARE_MEDIA_ID)?,
            name: fields.opt_string(column::FARE_MEDIA_NAME)?,
            media_type: fields.code(column::FARE_MEDIA_TYPE)?,
        })
    }
}

impl SingleKey for FareMedia {
    const PRIMARY_KEY: Column = column::FARE_MEDIA_ID;

    fn id(&self) -> Identifier<Self> {
        self.id.clone()
    }
}
