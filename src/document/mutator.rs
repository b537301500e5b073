//! Capability traits the edit records call into.
//!
//! The history core never touches document storage directly. Every change
//! goes through [`DocumentMutator`], and every "before" capture goes through
//! [`DocumentQuery`]. Hosts implement both for their own document type.

use bevy::math::{DVec2, Rect, Vec2};

use super::data_types::{AttributeRow, Graphic, GraphicSnapshot, ShapeSnapshot};
use super::error::MutationResult;
use super::geometry::{Extent, Geometry};
use super::ids::{EditTarget, GraphicId, LayerId, ShapeId, ShapeRef};

/// Primitive mutations of a map document.
///
/// Implementations validate their own invariants and reject a mutation with
/// [`MutationError`](super::MutationError) instead of panicking.
pub trait DocumentMutator {
    /// Change the visible map extent
    fn set_view_extent(&mut self, extent: Extent) -> MutationResult;

    /// Insert `shape` with `value` at `index` within `layer`, together with
    /// its attribute row
    fn insert_shape(
        &mut self,
        layer: LayerId,
        shape: ShapeId,
        value: Geometry,
        index: usize,
        row: AttributeRow,
    ) -> MutationResult;

    /// Remove a shape and its attribute row from `layer`
    fn remove_shape(&mut self, layer: LayerId, shape: ShapeId) -> MutationResult;

    /// Overwrite the value of an existing shape, keeping its identity and position
    fn replace_shape_value(&mut self, shape: ShapeRef, value: Geometry) -> MutationResult;

    /// Insert an interior ring into polygon part `part` at position `hole`
    fn add_hole(
        &mut self,
        polygon: ShapeRef,
        part: usize,
        hole: usize,
        points: &[DVec2],
    ) -> MutationResult;

    /// Remove the interior ring at (`part`, `hole`)
    fn remove_hole(&mut self, polygon: ShapeRef, part: usize, hole: usize) -> MutationResult;

    /// Move one vertex of the target's primary point sequence
    fn move_vertex(&mut self, target: EditTarget, index: usize, to: DVec2) -> MutationResult;

    /// Insert a vertex into the target's primary point sequence
    fn add_vertex(&mut self, target: EditTarget, index: usize, point: DVec2) -> MutationResult;

    /// Remove a vertex from the target's primary point sequence
    fn remove_vertex(&mut self, target: EditTarget, index: usize) -> MutationResult;

    /// Translate the target by a drag expressed in device coordinates
    fn move_on_screen(&mut self, target: EditTarget, from: Vec2, to: Vec2) -> MutationResult;

    /// Scale the target so its bounds fill `rect` (device coordinates)
    fn resize_on_screen(&mut self, target: EditTarget, rect: Rect) -> MutationResult;

    /// Replace the target's whole primary point sequence
    fn set_point_sequence(&mut self, target: EditTarget, points: &[DVec2]) -> MutationResult;

    /// Append a graphic on top of the overlay
    fn add_graphic(&mut self, graphic: Graphic) -> MutationResult;

    /// Put a graphic back at `index` in the drawing order
    fn insert_graphic(&mut self, graphic: Graphic, index: usize) -> MutationResult;

    fn remove_graphic(&mut self, graphic: GraphicId) -> MutationResult;

    /// Remove several graphics in one call
    fn remove_graphics(&mut self, graphics: &[GraphicId]) -> MutationResult;

    /// Ask the host to redraw; never fails
    fn request_repaint(&mut self);
}

/// Read access used to capture state before a mutation
pub trait DocumentQuery {
    fn view_extent(&self) -> Extent;

    /// Number of shapes in a layer
    fn layer_len(&self, layer: LayerId) -> Option<usize>;

    /// Current value, row and index of a shape
    fn shape(&self, shape: ShapeRef) -> Option<ShapeSnapshot>;

    /// Copy of the target's primary point sequence
    fn point_sequence(&self, target: EditTarget) -> Option<Vec<DVec2>>;

    /// Current value and drawing-order position of a graphic
    fn graphic(&self, graphic: GraphicId) -> Option<GraphicSnapshot>;

    /// Device-space bounds of the target under the current view
    fn screen_bounds(&self, target: EditTarget) -> Option<Rect>;

    /// Points of the interior ring at (`part`, `hole`)
    fn hole(&self, polygon: ShapeRef, part: usize, hole: usize) -> Option<Vec<DVec2>>;
}
