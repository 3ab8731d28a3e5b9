//! GTFS entities, the traits used to query them, and shared types.

pub mod calendar;
pub mod codec;
pub mod traits;
pub mod types;

pub mod agency;
pub mod area;
pub mod fare_leg_rule;
pub mod fare_media;
pub mod fare_product;
pub mod feed_info;
pub mod level;
pub mod network;
pub mod pathway;
pub mod route;
pub mod service;
pub mod service_change;
pub mod shape;
pub mod stop;
pub mod stop_area;
pub mod stop_time;
pub mod timeframe;
pub mod trip;

// Re-exports for convenience
pub use calendar::{ServiceCalendar, WeekdayFlags};
pub use codec::ServiceTime;
pub use traits::{CompositeKey, Entity, LongCompositeKey, LongKey, SingleKey};
pub use types::{DirectionId, GtfsCode, RouteType};

pub use agency::Agency;
pub use area::Area;
pub use fare_leg_rule::{FareLegRule, FareLegRuleKey, FareLegRuleQuery};
pub use fare_media::{FareMedia, FareMediaType};
pub use fare_product::FareProduct;
pub use feed_info::FeedInfo;
pub use level::Level;
pub use network::Network;
pub use pathway::{Bidirectional, Pathway, PathwayMode};
pub use route::Route;
pub use service::{Service, ServiceAvailability};
pub use service_change::{ExceptionType, ServiceChange};
pub use shape::{Shape, ShapePoint};
pub use stop::{LocationType, Stop, WheelchairBoarding};
pub use stop_area::StopArea;
pub use stop_time::{PickupDropOff, StopTime};
pub use timeframe::Timeframe;
pub use trip::Trip;
