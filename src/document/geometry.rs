//! Geometry values carried by shapes and graphics.
//!
//! These are plain values. Edit records clone them to capture "before" state;
//! the document stores them behind stable identifiers.

use bevy::math::DVec2;

/// One polygon part: an exterior ring plus zero or more interior holes
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PolygonPart {
    pub exterior: Vec<DVec2>,
    pub holes: Vec<Vec<DVec2>>,
}

impl PolygonPart {
    pub fn new(exterior: Vec<DVec2>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_hole(mut self, hole: Vec<DVec2>) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Value of a shape or graphic
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(DVec2),
    Polyline(Vec<DVec2>),
    /// One or more parts, each with optional holes
    Polygon(Vec<PolygonPart>),
}

impl Geometry {
    /// Single-part polygon without holes
    pub fn polygon(exterior: Vec<DVec2>) -> Self {
        Geometry::Polygon(vec![PolygonPart::new(exterior)])
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Polyline(_) => "polyline",
            Geometry::Polygon(_) => "polygon",
        }
    }

    /// The vertex list that vertex edits address: the point itself, the
    /// polyline vertices, or the exterior ring of the first polygon part.
    pub fn primary_points(&self) -> &[DVec2] {
        match self {
            Geometry::Point(point) => std::slice::from_ref(point),
            Geometry::Polyline(points) => points,
            Geometry::Polygon(parts) => parts
                .first()
                .map(|part| part.exterior.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Mutable access to the primary sequence for geometries whose vertex
    /// count may change. Points have a fixed single vertex and return `None`.
    pub fn primary_points_mut(&mut self) -> Option<&mut Vec<DVec2>> {
        match self {
            Geometry::Point(_) => None,
            Geometry::Polyline(points) => Some(points),
            Geometry::Polygon(parts) => parts.first_mut().map(|part| &mut part.exterior),
        }
    }

    /// Smallest vertex count the primary sequence may hold
    pub fn min_vertices(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::Polyline(_) => 2,
            Geometry::Polygon(_) => 3,
        }
    }

    /// Every coordinate, holes included
    pub fn points_mut(&mut self) -> Vec<&mut DVec2> {
        match self {
            Geometry::Point(point) => vec![point],
            Geometry::Polyline(points) => points.iter_mut().collect(),
            Geometry::Polygon(parts) => parts
                .iter_mut()
                .flat_map(|part| {
                    part.exterior
                        .iter_mut()
                        .chain(part.holes.iter_mut().flat_map(|hole| hole.iter_mut()))
                })
                .collect(),
        }
    }

    /// Bounding extent of all coordinates
    pub fn bounds(&self) -> Option<Extent> {
        match self {
            Geometry::Point(point) => Some(Extent::from_corners(*point, *point)),
            Geometry::Polyline(points) => Extent::from_points(points.iter().copied()),
            Geometry::Polygon(parts) => Extent::from_points(
                parts
                    .iter()
                    .flat_map(|part| part.exterior.iter().copied()),
            ),
        }
    }
}

/// Axis-aligned rectangle in map units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Extent {
    pub min: DVec2,
    pub max: DVec2,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: DVec2::new(min_x, min_y),
            max: DVec2::new(max_x, max_y),
        }
    }

    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_corners(first, first), |extent, p| Self {
            min: extent.min.min(p),
            max: extent.max.max(p),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// True when either side has no length
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_primary_points_of_polygon_is_first_exterior() {
        let geometry = Geometry::Polygon(vec![
            PolygonPart::new(square()),
            PolygonPart::new(vec![DVec2::ZERO; 3]),
        ]);
        assert_eq!(geometry.primary_points(), square().as_slice());
    }

    #[test]
    fn test_point_has_no_growable_sequence() {
        let mut geometry = Geometry::Point(DVec2::new(1.0, 2.0));
        assert_eq!(geometry.primary_points(), &[DVec2::new(1.0, 2.0)]);
        assert!(geometry.primary_points_mut().is_none());
    }

    #[test]
    fn test_points_mut_includes_holes() {
        let hole = vec![
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(2.0, 2.0),
        ];
        let mut geometry = Geometry::Polygon(vec![PolygonPart::new(square()).with_hole(hole)]);
        assert_eq!(geometry.points_mut().len(), 7);
    }

    #[test]
    fn test_extent_from_points() {
        let extent = Extent::from_points(square()).unwrap();
        assert_eq!(extent, Extent::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(extent.size(), DVec2::new(4.0, 4.0));
        assert!(Extent::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_degenerate_extent() {
        assert!(Extent::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
        assert!(!Extent::new(0.0, 0.0, 1.0, 5.0).is_degenerate());
    }
}
