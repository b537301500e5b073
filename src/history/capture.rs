//! Build records from live document state, before the mutation happens.
//!
//! Each helper reads what it needs through [`DocumentQuery`] and returns the
//! record. Hand it to [`EditLog::perform`](super::EditLog::perform) to apply
//! the mutation and record it in one go.

use bevy::math::{DVec2, Rect};

use crate::document::{
    AttributeRow, DocumentQuery, EditTarget, Extent, Geometry, GraphicId, LayerId, MutationError,
    ShapeId, ShapeRef, ShapeSnapshot,
};

use super::data_types::SequenceEdit;
use super::records::EditRecord;

/// A shape that doesn't exist yet, as produced by a geometry operation
#[derive(Clone, Debug, PartialEq)]
pub struct NewShape {
    pub id: ShapeId,
    pub value: Geometry,
    pub row: AttributeRow,
}

fn shape_snapshot<Q: DocumentQuery + ?Sized>(
    document: &Q,
    shape: ShapeRef,
) -> Result<ShapeSnapshot, MutationError> {
    document
        .shape(shape)
        .ok_or_else(|| MutationError::not_found(shape.to_string()))
}

fn points_of<Q: DocumentQuery + ?Sized>(
    document: &Q,
    target: EditTarget,
) -> Result<Vec<DVec2>, MutationError> {
    document
        .point_sequence(target)
        .ok_or_else(|| MutationError::not_found(target.to_string()))
}

fn layer_len<Q: DocumentQuery + ?Sized>(document: &Q, layer: LayerId) -> Result<usize, MutationError> {
    document
        .layer_len(layer)
        .ok_or_else(|| MutationError::not_found(layer.to_string()))
}

pub fn viewport_change<Q: DocumentQuery + ?Sized>(document: &Q, new: Extent) -> EditRecord {
    EditRecord::viewport_change(document.view_extent(), new)
}

/// Add new shapes to the end of `layer`, in order
pub fn insert_shapes<Q: DocumentQuery + ?Sized>(
    document: &Q,
    layer: LayerId,
    shapes: Vec<NewShape>,
) -> Result<EditRecord, MutationError> {
    let start = layer_len(document, layer)?;
    let snapshots = shapes
        .into_iter()
        .enumerate()
        .map(|(offset, shape)| ShapeSnapshot {
            shape: ShapeRef::new(layer, shape.id),
            index: start + offset,
            value: shape.value,
            row: shape.row,
        })
        .collect();
    Ok(EditRecord::insert_shapes(snapshots))
}

/// Delete one or more shapes of a layer, remembering where each one sat
pub fn remove_shapes<Q: DocumentQuery + ?Sized>(
    document: &Q,
    shapes: &[ShapeRef],
) -> Result<EditRecord, MutationError> {
    let snapshots = shapes
        .iter()
        .map(|shape| shape_snapshot(document, *shape))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EditRecord::remove_shapes(snapshots))
}

pub fn replace_shape_value<Q: DocumentQuery + ?Sized>(
    document: &Q,
    shape: ShapeRef,
    after: Geometry,
) -> Result<EditRecord, MutationError> {
    let before = shape_snapshot(document, shape)?.value;
    Ok(EditRecord::ReplaceShapeValue {
        shape,
        before,
        after,
    })
}

/// Replace `original` by `parts`. The parts take over the original's slot in
/// the layer, in the given order.
pub fn split_shape<Q: DocumentQuery + ?Sized>(
    document: &Q,
    original: ShapeRef,
    parts: Vec<NewShape>,
) -> Result<EditRecord, MutationError> {
    let original = shape_snapshot(document, original)?;
    let layer = original.shape.layer;
    let parts = parts
        .into_iter()
        .enumerate()
        .map(|(offset, part)| ShapeSnapshot {
            shape: ShapeRef::new(layer, part.id),
            index: original.index + offset,
            value: part.value,
            row: part.row,
        })
        .collect();
    Ok(EditRecord::split_shape(original, parts))
}

/// Replace `originals` (all in one layer) by `merged`, which lands at the
/// lowest index any original held
pub fn merge_shapes<Q: DocumentQuery + ?Sized>(
    document: &Q,
    originals: &[ShapeRef],
    merged: NewShape,
) -> Result<EditRecord, MutationError> {
    let originals = originals
        .iter()
        .map(|shape| shape_snapshot(document, *shape))
        .collect::<Result<Vec<_>, _>>()?;
    let first = originals
        .iter()
        .min_by_key(|s| s.index)
        .ok_or_else(|| MutationError::validation("nothing to merge"))?;
    if originals.iter().any(|s| s.shape.layer != first.shape.layer) {
        return Err(MutationError::validation(
            "merged shapes must share one layer",
        ));
    }
    let merged = ShapeSnapshot {
        shape: ShapeRef::new(first.shape.layer, merged.id),
        index: first.index,
        value: merged.value,
        row: merged.row,
    };
    Ok(EditRecord::merge_shapes(originals, merged))
}

pub fn remove_hole<Q: DocumentQuery + ?Sized>(
    document: &Q,
    polygon: ShapeRef,
    part: usize,
    hole: usize,
) -> Result<EditRecord, MutationError> {
    let points = document
        .hole(polygon, part, hole)
        .ok_or_else(|| MutationError::not_found(format!("hole {hole} in part {part} of {polygon}")))?;
    Ok(EditRecord::RemoveHole {
        polygon,
        part,
        hole,
        points,
    })
}

/// Close a hole and turn its area into `filler`, appended to `filler_layer`
pub fn fill_hole<Q: DocumentQuery + ?Sized>(
    document: &Q,
    polygon: ShapeRef,
    part: usize,
    hole: usize,
    filler_layer: LayerId,
    filler: NewShape,
) -> Result<EditRecord, MutationError> {
    let points = document
        .hole(polygon, part, hole)
        .ok_or_else(|| MutationError::not_found(format!("hole {hole} in part {part} of {polygon}")))?;
    let index = layer_len(document, filler_layer)?;
    Ok(EditRecord::FillHole {
        polygon,
        part,
        hole,
        points,
        companion: ShapeSnapshot {
            shape: ShapeRef::new(filler_layer, filler.id),
            index,
            value: filler.value,
            row: filler.row,
        },
    })
}

pub fn move_vertex<Q: DocumentQuery + ?Sized>(
    document: &Q,
    target: EditTarget,
    index: usize,
    to: DVec2,
) -> Result<EditRecord, MutationError> {
    let from = *points_of(document, target)?
        .get(index)
        .ok_or_else(|| MutationError::not_found(format!("vertex {index} of {target}")))?;
    Ok(EditRecord::MoveVertex {
        target,
        index,
        from,
        to,
    })
}

pub fn remove_vertex<Q: DocumentQuery + ?Sized>(
    document: &Q,
    target: EditTarget,
    index: usize,
) -> Result<EditRecord, MutationError> {
    let point = *points_of(document, target)?
        .get(index)
        .ok_or_else(|| MutationError::not_found(format!("vertex {index} of {target}")))?;
    Ok(EditRecord::RemoveVertex {
        target,
        index,
        point,
    })
}

pub fn set_point_sequence<Q: DocumentQuery + ?Sized>(
    document: &Q,
    target: EditTarget,
    after: Vec<DVec2>,
    reason: SequenceEdit,
) -> Result<EditRecord, MutationError> {
    let before = points_of(document, target)?;
    Ok(EditRecord::SetPointSequence {
        target,
        before,
        after,
        reason,
    })
}

/// Delete graphics, copying their values and drawing-order slots so undo can
/// bring them back where they were
pub fn remove_graphics<Q: DocumentQuery + ?Sized>(
    document: &Q,
    graphics: &[GraphicId],
) -> Result<EditRecord, MutationError> {
    let snapshots = graphics
        .iter()
        .map(|id| {
            document
                .graphic(*id)
                .ok_or_else(|| MutationError::not_found(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EditRecord::remove_graphics(snapshots))
}

/// Resize the target onto `to` (device pixels), remembering its current
/// on-screen bounds for undo
pub fn resize_on_screen<Q: DocumentQuery + ?Sized>(
    document: &Q,
    target: EditTarget,
    to: Rect,
) -> Result<EditRecord, MutationError> {
    let from = document
        .screen_bounds(target)
        .ok_or_else(|| MutationError::not_found(format!("screen bounds of {target}")))?;
    Ok(EditRecord::ResizeOnScreen { target, from, to })
}
