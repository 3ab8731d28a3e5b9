//! Fare products (`fare_products`).
//!
//! A product is priced per fare medium, so the same `fare_product_id` can
//! appear once for each medium it is sold on.

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::fare_media::FareMedia;
use crate::models::traits::{CompositeKey, Entity};

pub mod column {
    use crate::database::Column;

    pub const FARE_PRODUCT_ID: Column = Column::new("fare_product_id");
    pub const FARE_PRODUCT_NAME: Column = Column::new("fare_product_name");
    pub const FARE_MEDIA_ID: Column = Column::new("fare_media_id");
    pub const AMOUNT: Column = Column::new("amount");
    pub const CURRENCY: Column = Column::new("currency");
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareProduct {
    pub product_id: Identifier<FareProduct>,
    pub name: Option<String>,
    pub media_id: Identifier<FareMedia>,
    pub amount: f64,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
}

impl FareProduct {
    /// `product:media`
    pub fn id(&self) -> Identifier<FareProduct> {
        Identifier::new(format!("{}:{}", self.product_id, self.media_id))
    }

    /// Every medium this product is sold on.
    pub fn all_for_product(db: &GtfsDatabase, product: &Identifier<FareProduct>) -> Result<Vec<FareProduct>> {
        Self::all_where(db, &Self::filter().eq(column::FARE_PRODUCT_ID, product))
    }
}

impl Entity for FareProduct {
    const NAME: &'static str = "FareProduct";
    const TABLE: Table = Table::new("fare_products");
    const COLUMNS: &'static [Column] = &[
        column::FARE_PRODUCT_ID,
        column::FARE_PRODUCT_NAME,
        column::FARE_MEDIA_ID,
        column::AMOUNT,
        column::CURRENCY,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            product_id: fields.id(column::FARE_PRODUCT_ID)?,
            name: fields.opt_string(column::FARE_PRODUCT_NAME)?,
            media_id: fields.id(column::FARE_MEDIA_ID)?,
            amount: fields.float(column::AMOUNT)?,
            currency: fields.string(column::CURRENCY)?,
        })
    }
}

impl CompositeKey for FareProduct {
    type First = Identifier<FareProduct>;
    type Second = Identifier<FareMedia>;

    const KEY: [Column; 2] = [column::FARE_PRODUCT_ID, column::FARE_MEDIA_ID];
}
