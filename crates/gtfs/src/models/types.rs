//! Core enums shared across GTFS entities, and the integer-code contract
//! every closed enumeration implements.

// ============================================================================
// Integer codes
// ============================================================================

/// A closed enumeration stored in the dataset as an integer code.
///
/// `from_code` is exhaustive: unknown codes yield `None` and are reported as
/// decoding failures rather than mapped to a default.
pub trait GtfsCode: Sized + Copy {
    /// Name used in error messages.
    const NAME: &'static str;

    fn from_code(code: i64) -> Option<Self>;

    fn code(self) -> i64;
}

/// Implement [`GtfsCode`] for a fieldless enum from a `code => Variant` table.
macro_rules! impl_gtfs_code {
    ($name:ident { $($code:literal => $variant:ident),+ $(,)? }) => {
        impl $crate::models::types::GtfsCode for $name {
            const NAME: &'static str = stringify!($name);

            fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }
    };
}

pub(crate) use impl_gtfs_code;

// ============================================================================
// Enums
// ============================================================================

/// GTFS route types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RouteType {
    Tram = 0,
    /// Metro and subway; every Metrorail route uses this.
    Subway = 1,
    Rail = 2,
    Bus = 3,
    Ferry = 4,
    CableTram = 5,
    AerialLift = 6,
    Funicular = 7,
    Trolleybus = 11,
    Monorail = 12,
}

impl_gtfs_code!(RouteType {
    0 => Tram,
    1 => Subway,
    2 => Rail,
    3 => Bus,
    4 => Ferry,
    5 => CableTram,
    6 => AerialLift,
    7 => Funicular,
    11 => Trolleybus,
    12 => Monorail,
});

/// Trip direction (0 = outbound, 1 = inbound per GTFS)
///
/// Only separates trips when publishing timetables; not for routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DirectionId {
    Outbound = 0,
    Inbound = 1,
}

impl_gtfs_code!(DirectionId {
    0 => Outbound,
    1 => Inbound,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_from_code() {
        assert_eq!(RouteType::from_code(1), Some(RouteType::Subway));
        assert_eq!(RouteType::from_code(3), Some(RouteType::Bus));
        assert_eq!(RouteType::from_code(12), Some(RouteType::Monorail));
        assert_eq!(RouteType::from_code(8), None);
        assert_eq!(RouteType::from_code(99), None);
    }

    #[test]
    fn test_codes_match_discriminants() {
        for code in 0..16 {
            if let Some(route_type) = RouteType::from_code(code) {
                assert_eq!(route_type.code(), code);
                assert_eq!(route_type as i64, code);
            }
        }
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(DirectionId::from_code(0), Some(DirectionId::Outbound));
        assert_eq!(DirectionId::from_code(1), Some(DirectionId::Inbound));
        assert_eq!(DirectionId::from_code(-1), None);
        assert_eq!(DirectionId::Inbound.code(), 1);
        assert_eq!(DirectionId::NAME, "DirectionId");
    }
}
