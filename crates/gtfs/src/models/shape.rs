//! Trip geometry (`shapes`).
//!
//! Each row is one [`ShapePoint`]; a [`Shape`] is every point sharing a
//! `shape_id`, ordered by sequence.

use geo::{Coord, LineString, Point};

use crate::database::{Column, Fields, GtfsDatabase, Table};
use crate::error::{GtfsError, Result};
use crate::identifiers::Identifier;
use crate::models::traits::{CompositeKey, Entity};

pub mod column {
    use crate::database::Column;

    pub const SHAPE_ID: Column = Column::new("shape_id");
    pub const SHAPE_PT_LAT: Column = Column::new("shape_pt_lat");
    pub const SHAPE_PT_LON: Column = Column::new("shape_pt_lon");
    pub const SHAPE_PT_SEQUENCE: Column = Column::new("shape_pt_sequence");
    pub const SHAPE_DIST_TRAVELED: Column = Column::new("shape_dist_traveled");
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapePoint {
    pub shape_id: Identifier<Shape>,
    /// x = longitude, y = latitude
    pub location: Point,
    pub sequence: u32,
    /// Miles from the first point of the shape.
    pub distance_traveled: f64,
}

impl ShapePoint {
    /// `shape:sequence`
    pub fn id(&self) -> Identifier<ShapePoint> {
        Identifier::new(format!("{}:{}", self.shape_id, self.sequence))
    }
}

impl Entity for ShapePoint {
    const NAME: &'static str = "ShapePoint";
    const TABLE: Table = Table::new("shapes");
    const COLUMNS: &'static [Column] = &[
        column::SHAPE_ID,
        column::SHAPE_PT_LAT,
        column::SHAPE_PT_LON,
        column::SHAPE_PT_SEQUENCE,
        column::SHAPE_DIST_TRAVELED,
    ];

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        let lat = fields.float(column::SHAPE_PT_LAT)?;
        let lon = fields.float(column::SHAPE_PT_LON)?;

        Ok(Self {
            shape_id: fields.id(column::SHAPE_ID)?,
            location: Point::new(lon, lat),
            sequence: fields.uint(column::SHAPE_PT_SEQUENCE)?,
            distance_traveled: fields.float(column::SHAPE_DIST_TRAVELED)?,
        })
    }
}

impl CompositeKey for ShapePoint {
    type First = Identifier<Shape>;
    type Second = u32;

    const KEY: [Column; 2] = [column::SHAPE_ID, column::SHAPE_PT_SEQUENCE];
}

/// A complete shape, points sorted by sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub id: Identifier<Shape>,
    pub points: Vec<ShapePoint>,
}

impl Shape {
    /// Load every point of shape `id`.
    ///
    /// # Errors
    ///
    /// [`GtfsError::NotFound`] if the shape has no points.
    pub fn load(db: &GtfsDatabase, id: &Identifier<Shape>) -> Result<Self> {
        let filter = ShapePoint::filter().eq(column::SHAPE_ID, id);
        let mut points = ShapePoint::all_where(db, &filter)?;

        if points.is_empty() {
            return Err(GtfsError::NotFound {
                entity: "Shape",
                key: id.to_string(),
            });
        }

        points.sort_by_key(|p| p.sequence);
        Ok(Self {
            id: id.clone(),
            points,
        })
    }

    pub fn line_string(&self) -> LineString {
        self.points
            .iter()
            .map(|p| Coord::from(p.location))
            .collect()
    }

    /// Distance traveled at the last point, in miles.
    pub fn total_distance(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.distance_traveled)
    }
}
