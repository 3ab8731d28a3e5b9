//! Fare leg rules (`fare_leg_rules`).
//!
//! A rule prices one leg of a journey: travel on a network from one area to
//! another, optionally restricted to the timeframes the leg starts and ends
//! in. Rules are keyed by four required columns and two optional ones; see
//! [`LongCompositeKey`] for how omitted components match.

use std::fmt;

use crate::database::{Column, Fields, FilterValue, GtfsDatabase, Table};
use crate::error::Result;
use crate::identifiers::Identifier;
use crate::models::area::Area;
use crate::models::fare_product::FareProduct;
use crate::models::network::Network;
use crate::models::timeframe::Timeframe;
use crate::models::traits::{Entity, LongCompositeKey, LongKey};

pub mod column {
    use crate::database::Column;

    pub const NETWORK_ID: Column = Column::new("network_id");
    pub const FROM_AREA_ID: Column = Column::new("from_area_id");
    pub const TO_AREA_ID: Column = Column::new("to_area_id");
    pub const FARE_PRODUCT_ID: Column = Column::new("fare_product_id");
    pub const FROM_TIMEFRAME_GROUP_ID: Column = Column::new("from_timeframe_group_id");
    pub const TO_TIMEFRAME_GROUP_ID: Column = Column::new("to_timeframe_group_id");
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareLegRule {
    pub network_id: Identifier<Network>,
    pub from_area_id: Identifier<Area>,
    pub to_area_id: Identifier<Area>,
    pub fare_product_id: Identifier<FareProduct>,
    pub from_timeframe_id: Option<Identifier<Timeframe>>,
    pub to_timeframe_id: Option<Identifier<Timeframe>>,
}

impl FareLegRule {
    /// All six key components joined with `:`, absent ones as empty strings.
    pub fn id(&self) -> Identifier<FareLegRule> {
        Identifier::new(self.key().to_string())
    }

    /// The full key of this rule.
    pub fn key(&self) -> FareLegRuleKey {
        FareLegRuleKey {
            network_id: self.network_id.clone(),
            from_area_id: self.from_area_id.clone(),
            to_area_id: self.to_area_id.clone(),
            fare_product_id: self.fare_product_id.clone(),
            from_timeframe_id: self.from_timeframe_id.clone(),
            to_timeframe_id: self.to_timeframe_id.clone(),
        }
    }

    /// Every rule matching the components set in `query`.
    pub fn matching(db: &GtfsDatabase, query: &FareLegRuleQuery) -> Result<Vec<FareLegRule>> {
        let filter = Self::filter()
            .eq_opt(column::NETWORK_ID, query.network_id.as_ref())
            .eq_opt(column::FROM_AREA_ID, query.from_area_id.as_ref())
            .eq_opt(column::TO_AREA_ID, query.to_area_id.as_ref())
            .eq_opt(column::FARE_PRODUCT_ID, query.fare_product_id.as_ref())
            .eq_opt(column::FROM_TIMEFRAME_GROUP_ID, query.from_timeframe_id.as_ref())
            .eq_opt(column::TO_TIMEFRAME_GROUP_ID, query.to_timeframe_id.as_ref());
        Self::all_where(db, &filter)
    }
}

impl Entity for FareLegRule {
    const NAME: &'static str = "FareLegRule";
    const TABLE: Table = Table::new("fare_leg_rules");
    const COLUMNS: &'static [Column] = &[
        column::NETWORK_ID,
        column::FROM_AREA_ID,
        column::TO_AREA_ID,
        column::FARE_PRODUCT_ID,
        column::FROM_TIMEFRAME_GROUP_ID,
        column::TO_TIMEFRAME_GROUP_ID,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            network_id: fields.id(column::NETWORK_ID)?,
            from_area_id: fields.id(column::FROM_AREA_ID)?,
            to_area_id: fields.id(column::TO_AREA_ID)?,
            fare_product_id: fields.id(column::FARE_PRODUCT_ID)?,
            from_timeframe_id: fields.opt_id(column::FROM_TIMEFRAME_GROUP_ID)?,
            to_timeframe_id: fields.opt_id(column::TO_TIMEFRAME_GROUP_ID)?,
        })
    }
}

impl LongCompositeKey for FareLegRule {
    type Key = FareLegRuleKey;

    const REQUIRED_KEY: [Column; 4] = [
        column::NETWORK_ID,
        column::FROM_AREA_ID,
        column::TO_AREA_ID,
        column::FARE_PRODUCT_ID,
    ];
    const OPTIONAL_KEY: [Column; 2] = [column::FROM_TIMEFRAME_GROUP_ID, column::TO_TIMEFRAME_GROUP_ID];
}

/// Key of a [`FareLegRule`]. Timeframes left unset match any value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FareLegRuleKey {
    pub network_id: Identifier<Network>,
    pub from_area_id: Identifier<Area>,
    pub to_area_id: Identifier<Area>,
    pub fare_product_id: Identifier<FareProduct>,
    pub from_timeframe_id: Option<Identifier<Timeframe>>,
    pub to_timeframe_id: Option<Identifier<Timeframe>>,
}

impl FareLegRuleKey {
    pub fn new(
        network_id: impl Into<Identifier<Network>>,
        from_area_id: impl Into<Identifier<Area>>,
        to_area_id: impl Into<Identifier<Area>>,
        fare_product_id: impl Into<Identifier<FareProduct>>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            from_area_id: from_area_id.into(),
            to_area_id: to_area_id.into(),
            fare_product_id: fare_product_id.into(),
            from_timeframe_id: None,
            to_timeframe_id: None,
        }
    }

    pub fn from_timeframe(mut self, timeframe: impl Into<Identifier<Timeframe>>) -> Self {
        self.from_timeframe_id = Some(timeframe.into());
        self
    }

    pub fn to_timeframe(mut self, timeframe: impl Into<Identifier<Timeframe>>) -> Self {
        self.to_timeframe_id = Some(timeframe.into());
        self
    }
}

impl LongKey for FareLegRuleKey {
    fn required(&self) -> [FilterValue; 4] {
        [
            (&self.network_id).into(),
            (&self.from_area_id).into(),
            (&self.to_area_id).into(),
            (&self.fare_product_id).into(),
        ]
    }

    fn optional(&self) -> [Option<FilterValue>; 2] {
        [
            self.from_timeframe_id.as_ref().map(FilterValue::from),
            self.to_timeframe_id.as_ref().map(FilterValue::from),
        ]
    }
}

impl fmt::Display for FareLegRuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = |id: &Option<Identifier<Timeframe>>| id.as_ref().map_or("", Identifier::as_str).to_owned();

        write!(
            f,
            "{}:{}:{}:{}:{}:{}",
            self.network_id,
            self.from_area_id,
            self.to_area_id,
            self.fare_product_id,
            optional(&self.from_timeframe_id),
            optional(&self.to_timeframe_id),
        )
    }
}

/// Search over fare leg rules where every component is optional.
///
/// Useful when the fare product is the thing being looked for, e.g. "what
/// does a weekday trip from here to there cost".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FareLegRuleQuery {
    pub network_id: Option<Identifier<Network>>,
    pub from_area_id: Option<Identifier<Area>>,
    pub to_area_id: Option<Identifier<Area>>,
    pub fare_product_id: Option<Identifier<FareProduct>>,
    pub from_timeframe_id: Option<Identifier<Timeframe>>,
    pub to_timeframe_id: Option<Identifier<Timeframe>>,
}

impl FareLegRuleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(mut self, id: impl Into<Identifier<Network>>) -> Self {
        self.network_id = Some(id.into());
        self
    }

    pub fn from_area(mut self, id: impl Into<Identifier<Area>>) -> Self {
        self.from_area_id = Some(id.into());
        self
    }

    pub fn to_area(mut self, id: impl Into<Identifier<Area>>) -> Self {
        self.to_area_id = Some(id.into());
        self
    }

    pub fn fare_product(mut self, id: impl Into<Identifier<FareProduct>>) -> Self {
        self.fare_product_id = Some(id.into());
        self
    }

    pub fn from_timeframe(mut self, id: impl Into<Identifier<Timeframe>>) -> Self {
        self.from_timeframe_id = Some(id.into());
        self
    }

    pub fn to_timeframe(mut self, id: impl Into<Identifier<Timeframe>>) -> Self {
        self.to_timeframe_id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::fixture_database;

    #[test]
    fn test_find_by_long_key() {
        let (_dir, db) = fixture_database();

        let key = FareLegRuleKey::new("Metrorail", "everywhere", "everywhere", "200_flat").from_timeframe("weekday_flat");
        let rule = FareLegRule::find_by_long_key(&db, &key).unwrap();

        assert_eq!(rule.fare_product_id.as_str(), "200_flat");
        assert_eq!(rule.from_timeframe_id.as_ref().map(Identifier::as_str), Some("weekday_flat"));
        assert_eq!(rule.key().from_timeframe_id, key.from_timeframe_id);
    }

    #[test]
    fn test_key_display() {
        let key = FareLegRuleKey::new("Metrorail", "STN_A01_C01", "STN_A03", "200_regular");
        assert_eq!(key.to_string(), "Metrorail:STN_A01_C01:STN_A03:200_regular::");

        let key = key.from_timeframe("weekday_regular").to_timeframe("weekday_regular");
        assert_eq!(
            key.to_string(),
            "Metrorail:STN_A01_C01:STN_A03:200_regular:weekday_regular:weekday_regular"
        );
    }

    #[test]
    fn test_not_found_reports_key() {
        let (_dir, db) = fixture_database();

        let key = FareLegRuleKey::new("ABCDEFG", "everywhere", "everywhere", "200_flat");
        let err = FareLegRule::find_by_long_key(&db, &key).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("ABCDEFG:everywhere"), "got: {err}");
    }

    #[test]
    fn test_matching_without_product() {
        let (_dir, db) = fixture_database();

        let query = FareLegRuleQuery::new()
            .from_area("everywhere")
            .to_area("everywhere")
            .from_timeframe("weekday_flat");
        let rules = FareLegRule::matching(&db, &query).unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].fare_product_id.as_str(), "200_flat");
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let (_dir, db) = fixture_database();

        let everything = FareLegRule::matching(&db, &FareLegRuleQuery::new()).unwrap();
        assert_eq!(everything, FareLegRule::all(&db).unwrap());
    }
}
