//! Stable identifiers for everything an edit record can point at.
//!
//! Records never hold references into the document. They hold these small
//! `Copy` handles instead, so a shape keeps its identity across removal and
//! re-insertion even when its value is swapped out underneath.

use std::fmt;

/// A layer within the map document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// A persisted shape, unique within the whole document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

/// A transient on-screen graphic (selection outline, sketch, hole preview)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicId(pub u64);

/// A shape addressed through the layer that contains it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    pub layer: LayerId,
    pub shape: ShapeId,
}

impl ShapeRef {
    pub fn new(layer: LayerId, shape: ShapeId) -> Self {
        Self { layer, shape }
    }
}

/// Anything that owns a point sequence: a persisted shape or a graphic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Shape(ShapeRef),
    Graphic(GraphicId),
}

impl From<ShapeRef> for EditTarget {
    fn from(shape: ShapeRef) -> Self {
        EditTarget::Shape(shape)
    }
}

impl From<GraphicId> for EditTarget {
    fn from(graphic: GraphicId) -> Self {
        EditTarget::Graphic(graphic)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape #{}", self.0)
    }
}

impl fmt::Display for GraphicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graphic #{}", self.0)
    }
}

impl fmt::Display for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.shape, self.layer)
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Shape(shape) => shape.fmt(f),
            EditTarget::Graphic(graphic) => graphic.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_ref_display() {
        let shape = ShapeRef::new(LayerId(2), ShapeId(7));
        assert_eq!(shape.to_string(), "shape #7 in layer 2");
    }

    #[test]
    fn test_edit_target_from_ids() {
        let shape = ShapeRef::new(LayerId(0), ShapeId(1));
        assert_eq!(EditTarget::from(shape), EditTarget::Shape(shape));
        assert_eq!(
            EditTarget::from(GraphicId(4)).to_string(),
            "graphic #4"
        );
    }
}
