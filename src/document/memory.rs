//! In-memory map document.
//!
//! [`MapDocument`] is the reference implementation of [`DocumentMutator`] and
//! [`DocumentQuery`]. It keeps ordered shape lists per layer, a graphics
//! overlay and the current view, and performs only bookkeeping plus the
//! affine screen-space transforms. The demo app and the history tests run
//! against it.

use bevy::math::{DVec2, Rect, Vec2};
use bevy::prelude::*;

use crate::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

use super::data_types::{AttributeRow, Graphic, GraphicSnapshot, ShapeSnapshot};
use super::error::{MutationError, MutationResult};
use super::geometry::{Extent, Geometry};
use super::ids::{EditTarget, GraphicId, LayerId, ShapeId, ShapeRef};
use super::mutator::{DocumentMutator, DocumentQuery};

/// A shape as stored in its layer
#[derive(Clone, Debug, PartialEq)]
pub struct StoredShape {
    pub id: ShapeId,
    pub value: Geometry,
    pub row: AttributeRow,
}

/// An ordered list of shapes with their attribute rows
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayer {
    pub id: LayerId,
    pub name: String,
    pub shapes: Vec<StoredShape>,
}

impl MapLayer {
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    fn position(&self, shape: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == shape)
    }
}

/// Resource holding the whole editable map
#[derive(Resource, Clone, Debug)]
pub struct MapDocument {
    layers: Vec<MapLayer>,
    graphics: Vec<Graphic>,
    view_extent: Extent,
    /// Size of the device viewport in pixels, used for screen-space edits
    viewport_size: Vec2,
    repaint_requests: u32,
    next_layer: u32,
    next_shape: u64,
    next_graphic: u64,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new(
            Extent::new(
                0.0,
                0.0,
                DEFAULT_VIEWPORT_WIDTH as f64,
                DEFAULT_VIEWPORT_HEIGHT as f64,
            ),
            Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        )
    }
}

/// Documents compare by content; repaint counters and id allocators are ignored
impl PartialEq for MapDocument {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
            && self.graphics == other.graphics
            && self.view_extent == other.view_extent
            && self.viewport_size == other.viewport_size
    }
}

impl MapDocument {
    pub fn new(view_extent: Extent, viewport_size: Vec2) -> Self {
        Self {
            layers: Vec::new(),
            graphics: Vec::new(),
            view_extent,
            viewport_size,
            repaint_requests: 0,
            next_layer: 0,
            next_shape: 0,
            next_graphic: 0,
        }
    }

    pub fn add_layer(&mut self, name: &str) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.push(MapLayer {
            id,
            name: name.to_string(),
            shapes: Vec::new(),
        });
        id
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Shape ids of a layer in stored order (empty for unknown layers)
    pub fn shape_ids(&self, layer: LayerId) -> Vec<ShapeId> {
        self.layer(layer).map(MapLayer::shape_ids).unwrap_or_default()
    }

    pub fn shape_value(&self, shape: ShapeRef) -> Option<&Geometry> {
        self.geometry(EditTarget::Shape(shape))
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
    }

    /// Number of repaints requested since creation
    pub fn repaint_requests(&self) -> u32 {
        self.repaint_requests
    }

    pub fn allocate_shape_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        id
    }

    pub fn allocate_graphic_id(&mut self) -> GraphicId {
        let id = GraphicId(self.next_graphic);
        self.next_graphic += 1;
        id
    }

    /// Append a new shape without going through the edit history.
    /// Used when building a document (loading, fixtures).
    pub fn push_shape(
        &mut self,
        layer: LayerId,
        value: Geometry,
        row: AttributeRow,
    ) -> Result<ShapeRef, MutationError> {
        let shape = self.allocate_shape_id();
        let index = self.layer_mut(layer)?.shapes.len();
        self.insert_shape(layer, shape, value, index, row)?;
        Ok(ShapeRef::new(layer, shape))
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut MapLayer, MutationError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MutationError::not_found(id.to_string()))
    }

    fn contains_shape(&self, shape: ShapeId) -> bool {
        self.layers.iter().any(|l| l.position(shape).is_some())
    }

    fn geometry(&self, target: EditTarget) -> Option<&Geometry> {
        match target {
            EditTarget::Shape(shape) => {
                let layer = self.layer(shape.layer)?;
                layer
                    .shapes
                    .iter()
                    .find(|s| s.id == shape.shape)
                    .map(|s| &s.value)
            }
            EditTarget::Graphic(id) => self.graphics.iter().find(|g| g.id == id).map(|g| &g.geometry),
        }
    }

    fn geometry_mut(&mut self, target: EditTarget) -> Result<&mut Geometry, MutationError> {
        let found = match target {
            EditTarget::Shape(shape) => self
                .layers
                .iter_mut()
                .find(|l| l.id == shape.layer)
                .and_then(|l| l.shapes.iter_mut().find(|s| s.id == shape.shape))
                .map(|s| &mut s.value),
            EditTarget::Graphic(id) => self
                .graphics
                .iter_mut()
                .find(|g| g.id == id)
                .map(|g| &mut g.geometry),
        };
        found.ok_or_else(|| MutationError::not_found(target.to_string()))
    }

    /// Map units covered by one device pixel on each axis
    fn world_per_pixel(&self) -> Result<DVec2, MutationError> {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return Err(MutationError::validation("viewport has no area"));
        }
        Ok(DVec2::new(
            self.view_extent.width() / self.viewport_size.x as f64,
            self.view_extent.height() / self.viewport_size.y as f64,
        ))
    }

    /// Device coordinates grow downwards, map coordinates upwards
    fn screen_to_world(&self, point: Vec2) -> Result<DVec2, MutationError> {
        let scale = self.world_per_pixel()?;
        Ok(DVec2::new(
            self.view_extent.min.x + point.x as f64 * scale.x,
            self.view_extent.max.y - point.y as f64 * scale.y,
        ))
    }

    /// Project a map coordinate into device pixels under the current view
    pub fn world_to_screen(&self, point: DVec2) -> Result<Vec2, MutationError> {
        let scale = self.world_per_pixel()?;
        Ok(Vec2::new(
            ((point.x - self.view_extent.min.x) / scale.x) as f32,
            ((self.view_extent.max.y - point.y) / scale.y) as f32,
        ))
    }

    fn contains_graphic(&self, graphic: GraphicId) -> bool {
        self.graphics.iter().any(|g| g.id == graphic)
    }
}

impl DocumentMutator for MapDocument {
    fn set_view_extent(&mut self, extent: Extent) -> MutationResult {
        if extent.is_degenerate() {
            return Err(MutationError::validation("view extent has no area"));
        }
        self.view_extent = extent;
        Ok(())
    }

    fn insert_shape(
        &mut self,
        layer: LayerId,
        shape: ShapeId,
        value: Geometry,
        index: usize,
        row: AttributeRow,
    ) -> MutationResult {
        if self.contains_shape(shape) {
            return Err(MutationError::validation(format!("{shape} already exists")));
        }
        let target = self.layer_mut(layer)?;
        if index > target.shapes.len() {
            return Err(MutationError::validation(format!(
                "insertion index {index} is past the end of {layer} ({} shapes)",
                target.shapes.len()
            )));
        }
        target.shapes.insert(
            index,
            StoredShape {
                id: shape,
                value,
                row,
            },
        );
        Ok(())
    }

    fn remove_shape(&mut self, layer: LayerId, shape: ShapeId) -> MutationResult {
        let target = self.layer_mut(layer)?;
        let index = target
            .position(shape)
            .ok_or_else(|| MutationError::not_found(ShapeRef::new(layer, shape).to_string()))?;
        target.shapes.remove(index);
        Ok(())
    }

    fn replace_shape_value(&mut self, shape: ShapeRef, value: Geometry) -> MutationResult {
        *self.geometry_mut(EditTarget::Shape(shape))? = value;
        Ok(())
    }

    fn add_hole(
        &mut self,
        polygon: ShapeRef,
        part: usize,
        hole: usize,
        points: &[DVec2],
    ) -> MutationResult {
        if points.len() < 3 {
            return Err(MutationError::validation(format!(
                "a hole needs at least 3 points, got {}",
                points.len()
            )));
        }
        let Geometry::Polygon(parts) = self.geometry_mut(EditTarget::Shape(polygon))? else {
            return Err(MutationError::validation(format!("{polygon} is not a polygon")));
        };
        let target = parts
            .get_mut(part)
            .ok_or_else(|| MutationError::not_found(format!("part {part} of {polygon}")))?;
        if hole > target.holes.len() {
            return Err(MutationError::not_found(format!(
                "hole slot {hole} in part {part} of {polygon}"
            )));
        }
        target.holes.insert(hole, points.to_vec());
        Ok(())
    }

    fn remove_hole(&mut self, polygon: ShapeRef, part: usize, hole: usize) -> MutationResult {
        let Geometry::Polygon(parts) = self.geometry_mut(EditTarget::Shape(polygon))? else {
            return Err(MutationError::validation(format!("{polygon} is not a polygon")));
        };
        let target = parts
            .get_mut(part)
            .ok_or_else(|| MutationError::not_found(format!("part {part} of {polygon}")))?;
        if hole >= target.holes.len() {
            return Err(MutationError::not_found(format!(
                "hole {hole} in part {part} of {polygon}"
            )));
        }
        target.holes.remove(hole);
        Ok(())
    }

    fn move_vertex(&mut self, target: EditTarget, index: usize, to: DVec2) -> MutationResult {
        let geometry = self.geometry_mut(target)?;
        if let Geometry::Point(point) = geometry {
            if index != 0 {
                return Err(MutationError::not_found(format!("vertex {index} of {target}")));
            }
            *point = to;
            return Ok(());
        }
        let vertex = geometry
            .primary_points_mut()
            .and_then(|points| points.get_mut(index))
            .ok_or_else(|| MutationError::not_found(format!("vertex {index} of {target}")))?;
        *vertex = to;
        Ok(())
    }

    fn add_vertex(&mut self, target: EditTarget, index: usize, point: DVec2) -> MutationResult {
        let geometry = self.geometry_mut(target)?;
        let Some(points) = geometry.primary_points_mut() else {
            return Err(MutationError::validation(format!(
                "{target} has a fixed vertex count"
            )));
        };
        if index > points.len() {
            return Err(MutationError::not_found(format!("vertex slot {index} of {target}")));
        }
        points.insert(index, point);
        Ok(())
    }

    fn remove_vertex(&mut self, target: EditTarget, index: usize) -> MutationResult {
        let geometry = self.geometry_mut(target)?;
        let min = geometry.min_vertices();
        let Some(points) = geometry.primary_points_mut() else {
            return Err(MutationError::validation(format!(
                "{target} has a fixed vertex count"
            )));
        };
        if index >= points.len() {
            return Err(MutationError::not_found(format!("vertex {index} of {target}")));
        }
        if points.len() <= min {
            return Err(MutationError::validation(format!(
                "{target} needs at least {min} vertices"
            )));
        }
        points.remove(index);
        Ok(())
    }

    fn move_on_screen(&mut self, target: EditTarget, from: Vec2, to: Vec2) -> MutationResult {
        let scale = self.world_per_pixel()?;
        let pixels = to - from;
        let delta = DVec2::new(pixels.x as f64 * scale.x, -(pixels.y as f64) * scale.y);
        for point in self.geometry_mut(target)?.points_mut() {
            *point += delta;
        }
        Ok(())
    }

    fn resize_on_screen(&mut self, target: EditTarget, rect: Rect) -> MutationResult {
        let destination =
            Extent::from_corners(self.screen_to_world(rect.min)?, self.screen_to_world(rect.max)?);
        if destination.is_degenerate() {
            return Err(MutationError::validation("resize rectangle has no area"));
        }
        let geometry = self.geometry_mut(target)?;
        let source = geometry
            .bounds()
            .filter(|bounds| !bounds.is_degenerate())
            .ok_or_else(|| MutationError::validation(format!("{target} has no area to resize")))?;
        let scale = destination.size() / source.size();
        for point in geometry.points_mut() {
            *point = destination.min + (*point - source.min) * scale;
        }
        Ok(())
    }

    fn set_point_sequence(&mut self, target: EditTarget, points: &[DVec2]) -> MutationResult {
        let geometry = self.geometry_mut(target)?;
        let min = geometry.min_vertices();
        if let Geometry::Point(point) = geometry {
            let [only] = points else {
                return Err(MutationError::validation(format!(
                    "{target} takes exactly one point"
                )));
            };
            *point = *only;
            return Ok(());
        }
        if points.len() < min {
            return Err(MutationError::validation(format!(
                "{target} needs at least {min} vertices"
            )));
        }
        let sequence = geometry
            .primary_points_mut()
            .ok_or_else(|| MutationError::not_found(format!("vertices of {target}")))?;
        *sequence = points.to_vec();
        Ok(())
    }

    fn add_graphic(&mut self, graphic: Graphic) -> MutationResult {
        let index = self.graphics.len();
        self.insert_graphic(graphic, index)
    }

    fn insert_graphic(&mut self, graphic: Graphic, index: usize) -> MutationResult {
        if self.contains_graphic(graphic.id) {
            return Err(MutationError::validation(format!("{} already exists", graphic.id)));
        }
        if index > self.graphics.len() {
            return Err(MutationError::validation(format!(
                "graphic index {index} is past the end of the overlay ({} graphics)",
                self.graphics.len()
            )));
        }
        self.graphics.insert(index, graphic);
        Ok(())
    }

    fn remove_graphic(&mut self, graphic: GraphicId) -> MutationResult {
        let index = self
            .graphics
            .iter()
            .position(|g| g.id == graphic)
            .ok_or_else(|| MutationError::not_found(graphic.to_string()))?;
        self.graphics.remove(index);
        Ok(())
    }

    fn remove_graphics(&mut self, graphics: &[GraphicId]) -> MutationResult {
        if let Some(missing) = graphics.iter().find(|id| !self.contains_graphic(**id)) {
            return Err(MutationError::not_found(missing.to_string()));
        }
        self.graphics.retain(|g| !graphics.contains(&g.id));
        Ok(())
    }

    fn request_repaint(&mut self) {
        self.repaint_requests += 1;
    }
}

impl DocumentQuery for MapDocument {
    fn view_extent(&self) -> Extent {
        self.view_extent
    }

    fn layer_len(&self, layer: LayerId) -> Option<usize> {
        self.layer(layer).map(|l| l.shapes.len())
    }

    fn shape(&self, shape: ShapeRef) -> Option<ShapeSnapshot> {
        let layer = self.layer(shape.layer)?;
        let index = layer.position(shape.shape)?;
        let stored = &layer.shapes[index];
        Some(ShapeSnapshot {
            shape,
            index,
            value: stored.value.clone(),
            row: stored.row.clone(),
        })
    }

    fn point_sequence(&self, target: EditTarget) -> Option<Vec<DVec2>> {
        self.geometry(target).map(|g| g.primary_points().to_vec())
    }

    fn graphic(&self, graphic: GraphicId) -> Option<GraphicSnapshot> {
        let index = self.graphics.iter().position(|g| g.id == graphic)?;
        Some(GraphicSnapshot {
            index,
            graphic: self.graphics[index].clone(),
        })
    }

    fn screen_bounds(&self, target: EditTarget) -> Option<Rect> {
        let bounds = self.geometry(target)?.bounds()?;
        let a = self.world_to_screen(bounds.min).ok()?;
        let b = self.world_to_screen(bounds.max).ok()?;
        Some(Rect::from_corners(a, b))
    }

    fn hole(&self, polygon: ShapeRef, part: usize, hole: usize) -> Option<Vec<DVec2>> {
        match self.geometry(EditTarget::Shape(polygon))? {
            Geometry::Polygon(parts) => parts.get(part)?.holes.get(hole).cloned(),
            _ => None,
        }
    }
}
