//! The edit record enum: one variant per reversible mutation.
//!
//! Every variant stores identities plus copied values. Nothing here borrows
//! from the document, so a record stays valid while other records swap the
//! values of the same shapes back and forth.

use bevy::math::{DVec2, Rect, Vec2};

use crate::document::{
    EditTarget, Extent, Geometry, Graphic, GraphicSnapshot, ShapeRef, ShapeSnapshot,
};

use super::data_types::{EditKind, SequenceEdit};

/// A captured, reversible description of one user mutation
#[derive(Clone, Debug, PartialEq)]
pub enum EditRecord {
    /// The visible map extent changed
    ViewportChange { old: Extent, new: Extent },
    /// Shape(s) were added, in this order
    InsertShapes { shapes: Vec<ShapeSnapshot> },
    /// Shape(s) were deleted; snapshots sorted by original index
    RemoveShapes { shapes: Vec<ShapeSnapshot> },
    /// A shape's value was overwritten in place
    ReplaceShapeValue {
        shape: ShapeRef,
        before: Geometry,
        after: Geometry,
    },
    /// One shape was replaced by several
    SplitShape {
        original: ShapeSnapshot,
        parts: Vec<ShapeSnapshot>,
    },
    /// Several shapes were replaced by one
    MergeShapes {
        originals: Vec<ShapeSnapshot>,
        merged: ShapeSnapshot,
    },
    /// An interior ring was cut into a polygon part
    AddHole {
        polygon: ShapeRef,
        part: usize,
        hole: usize,
        points: Vec<DVec2>,
    },
    /// An interior ring was deleted
    RemoveHole {
        polygon: ShapeRef,
        part: usize,
        hole: usize,
        points: Vec<DVec2>,
    },
    /// An interior ring was closed and its area became a feature of its own
    FillHole {
        polygon: ShapeRef,
        part: usize,
        hole: usize,
        points: Vec<DVec2>,
        companion: ShapeSnapshot,
    },
    AddVertex {
        target: EditTarget,
        index: usize,
        point: DVec2,
    },
    MoveVertex {
        target: EditTarget,
        index: usize,
        from: DVec2,
        to: DVec2,
    },
    RemoveVertex {
        target: EditTarget,
        index: usize,
        point: DVec2,
    },
    /// A drag in device coordinates
    MoveOnScreen {
        target: EditTarget,
        from: Vec2,
        to: Vec2,
    },
    /// A resize in device coordinates; `from` is the bounds before the edit
    ResizeOnScreen {
        target: EditTarget,
        from: Rect,
        to: Rect,
    },
    AddGraphics { graphics: Vec<Graphic> },
    /// Owned copies of the removed graphics; sorted by drawing-order index
    RemoveGraphics { graphics: Vec<GraphicSnapshot> },
    /// The whole primary point sequence was rewritten
    SetPointSequence {
        target: EditTarget,
        before: Vec<DVec2>,
        after: Vec<DVec2>,
        reason: SequenceEdit,
    },
}

impl EditRecord {
    pub fn viewport_change(old: Extent, new: Extent) -> Self {
        EditRecord::ViewportChange { old, new }
    }

    pub fn insert_shape(shape: ShapeSnapshot) -> Self {
        EditRecord::InsertShapes {
            shapes: vec![shape],
        }
    }

    /// Shapes are re-inserted in the given order on redo
    pub fn insert_shapes(shapes: Vec<ShapeSnapshot>) -> Self {
        EditRecord::InsertShapes { shapes }
    }

    pub fn remove_shape(shape: ShapeSnapshot) -> Self {
        EditRecord::RemoveShapes {
            shapes: vec![shape],
        }
    }

    /// Sorts by original index so undo rebuilds the ordering front to back
    pub fn remove_shapes(mut shapes: Vec<ShapeSnapshot>) -> Self {
        shapes.sort_by_key(|s| s.index);
        EditRecord::RemoveShapes { shapes }
    }

    pub fn split_shape(original: ShapeSnapshot, mut parts: Vec<ShapeSnapshot>) -> Self {
        parts.sort_by_key(|s| s.index);
        EditRecord::SplitShape { original, parts }
    }

    pub fn merge_shapes(mut originals: Vec<ShapeSnapshot>, merged: ShapeSnapshot) -> Self {
        originals.sort_by_key(|s| s.index);
        EditRecord::MergeShapes { originals, merged }
    }

    pub fn add_graphics(graphics: &[Graphic]) -> Self {
        EditRecord::AddGraphics {
            graphics: graphics.to_vec(),
        }
    }

    /// Sorts by original index so undo restores the drawing order bottom up
    pub fn remove_graphics(mut graphics: Vec<GraphicSnapshot>) -> Self {
        graphics.sort_by_key(|g| g.index);
        EditRecord::RemoveGraphics { graphics }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditRecord::ViewportChange { .. } => EditKind::ViewportChange,
            EditRecord::InsertShapes { .. } => EditKind::InsertShapes,
            EditRecord::RemoveShapes { .. } => EditKind::RemoveShapes,
            EditRecord::ReplaceShapeValue { .. } => EditKind::ReplaceShapeValue,
            EditRecord::SplitShape { .. } => EditKind::SplitShape,
            EditRecord::MergeShapes { .. } => EditKind::MergeShapes,
            EditRecord::AddHole { .. } => EditKind::AddHole,
            EditRecord::RemoveHole { .. } => EditKind::RemoveHole,
            EditRecord::FillHole { .. } => EditKind::FillHole,
            EditRecord::AddVertex { .. } => EditKind::AddVertex,
            EditRecord::MoveVertex { .. } => EditKind::MoveVertex,
            EditRecord::RemoveVertex { .. } => EditKind::RemoveVertex,
            EditRecord::MoveOnScreen { .. } => EditKind::MoveOnScreen,
            EditRecord::ResizeOnScreen { .. } => EditKind::ResizeOnScreen,
            EditRecord::AddGraphics { .. } => EditKind::AddGraphics,
            EditRecord::RemoveGraphics { .. } => EditKind::RemoveGraphics,
            EditRecord::SetPointSequence { .. } => EditKind::SetPointSequence,
        }
    }

    /// Menu text for this edit, e.g. "Delete 3 Features"
    pub fn label(&self) -> String {
        match self {
            EditRecord::ViewportChange { .. } => "Change View".to_string(),
            EditRecord::InsertShapes { shapes } => counted("Add", shapes.len(), "Feature"),
            EditRecord::RemoveShapes { shapes } => counted("Delete", shapes.len(), "Feature"),
            EditRecord::ReplaceShapeValue { .. } => "Edit Feature".to_string(),
            EditRecord::SplitShape { .. } => "Split Feature".to_string(),
            EditRecord::MergeShapes { originals, .. } => {
                counted("Merge", originals.len(), "Feature")
            }
            EditRecord::AddHole { .. } => "Add Hole".to_string(),
            EditRecord::RemoveHole { .. } => "Remove Hole".to_string(),
            EditRecord::FillHole { .. } => "Fill Hole".to_string(),
            EditRecord::AddVertex { .. } => "Add Vertex".to_string(),
            EditRecord::MoveVertex { .. } => "Move Vertex".to_string(),
            EditRecord::RemoveVertex { .. } => "Delete Vertex".to_string(),
            EditRecord::MoveOnScreen { .. } => "Move".to_string(),
            EditRecord::ResizeOnScreen { .. } => "Resize".to_string(),
            EditRecord::AddGraphics { graphics } => counted("Add", graphics.len(), "Graphic"),
            EditRecord::RemoveGraphics { graphics } => {
                counted("Delete", graphics.len(), "Graphic")
            }
            EditRecord::SetPointSequence { reason, .. } => match reason {
                SequenceEdit::Smooth => "Smooth Line".to_string(),
                SequenceEdit::Simplify => "Simplify Line".to_string(),
                SequenceEdit::Reshape => "Reshape".to_string(),
            },
        }
    }
}

/// "Add Feature" for one, "Add 3 Features" otherwise
fn counted(verb: &str, count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", verb, noun)
    } else {
        format!("{} {} {}s", verb, count, noun)
    }
}
