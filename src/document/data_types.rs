//! Captured values that records carry between apply and revert.

use bevy::prelude::*;

use super::geometry::Geometry;
use super::ids::{GraphicId, ShapeRef};

/// One attribute cell of a feature's attribute row
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Real(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// Attribute row stored alongside a shape in its layer's table
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AttributeRow {
    pub values: Vec<(String, AttributeValue)>,
}

impl AttributeRow {
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.values.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Everything needed to put a removed shape back exactly where it was
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSnapshot {
    pub shape: ShapeRef,
    /// Position within the layer's ordered shape list
    pub index: usize,
    pub value: Geometry,
    pub row: AttributeRow,
}

/// Stroke style of a transient graphic
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicStyle {
    pub color: Color,
    pub stroke_width: f32,
}

impl Default for GraphicStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            stroke_width: 2.0,
        }
    }
}

/// A transient on-screen graphic, identified independently of its value
#[derive(Clone, Debug, PartialEq)]
pub struct Graphic {
    pub id: GraphicId,
    pub geometry: Geometry,
    pub style: GraphicStyle,
}

impl Graphic {
    pub fn new(id: GraphicId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            style: GraphicStyle::default(),
        }
    }
}

/// A graphic together with its position in the overlay's drawing order
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicSnapshot {
    pub index: usize,
    pub graphic: Graphic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_row_lookup() {
        let row = AttributeRow::default()
            .with("name", "Parcel 12")
            .with("area", 42.5)
            .with("owner_id", 7i64);

        assert_eq!(row.get("name"), Some(&AttributeValue::Text("Parcel 12".into())));
        assert_eq!(row.get("area"), Some(&AttributeValue::Real(42.5)));
        assert_eq!(row.get("owner_id"), Some(&AttributeValue::Integer(7)));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_graphic_style_default() {
        let style = GraphicStyle::default();
        assert_eq!(style.color, Color::WHITE);
        assert_eq!(style.stroke_width, 2.0);
    }
}
