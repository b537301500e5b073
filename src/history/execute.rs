//! Apply (redo) and revert (undo) for every edit record.
//!
//! Each record runs as a short list of primitive steps against the
//! [`DocumentMutator`]. The first rejected step is reported to the sink and
//! ends the record: earlier steps stay applied, later ones are skipped. A
//! repaint is requested either way.

use std::iter;

use bevy::prelude::*;

use crate::document::{
    DocumentMutator, Graphic, GraphicId, GraphicSnapshot, MutationError, MutationResult,
    ShapeSnapshot,
};

use super::data_types::{Direction, EditOutcome};
use super::diagnostics::{DiagnosticSink, EditDiagnostic};
use super::records::EditRecord;

/// Runs the steps of one record and tracks the first failure
struct StepRunner<'a, D: ?Sized> {
    record: &'a EditRecord,
    document: &'a mut D,
    sink: &'a mut dyn DiagnosticSink,
    direction: Direction,
    completed: usize,
    failure: Option<MutationError>,
}

impl<'a, D: DocumentMutator + ?Sized> StepRunner<'a, D> {
    fn new(
        record: &'a EditRecord,
        document: &'a mut D,
        sink: &'a mut dyn DiagnosticSink,
        direction: Direction,
    ) -> Self {
        Self {
            record,
            document,
            sink,
            direction,
            completed: 0,
            failure: None,
        }
    }

    /// Run one step unless an earlier one failed. Returns whether it ran and succeeded.
    fn step(&mut self, op: impl FnOnce(&mut D) -> MutationResult) -> bool {
        if self.failure.is_some() {
            return false;
        }
        match op(&mut *self.document) {
            Ok(()) => {
                self.completed += 1;
                true
            }
            Err(error) => {
                self.sink.report(EditDiagnostic {
                    label: self.record.label(),
                    direction: self.direction,
                    step: self.completed,
                    error: error.clone(),
                });
                self.failure = Some(error);
                false
            }
        }
    }

    fn insert_all<'s>(&mut self, shapes: impl IntoIterator<Item = &'s ShapeSnapshot>) {
        for s in shapes {
            let inserted = self.step(|d| {
                d.insert_shape(
                    s.shape.layer,
                    s.shape.shape,
                    s.value.clone(),
                    s.index,
                    s.row.clone(),
                )
            });
            if !inserted {
                break;
            }
        }
    }

    fn remove_all<'s>(&mut self, shapes: impl IntoIterator<Item = &'s ShapeSnapshot>) {
        for s in shapes {
            if !self.step(|d| d.remove_shape(s.shape.layer, s.shape.shape)) {
                break;
            }
        }
    }

    fn add_graphics(&mut self, graphics: &[Graphic]) {
        for g in graphics {
            if !self.step(|d| d.add_graphic(g.clone())) {
                break;
            }
        }
    }

    /// Ascending indices, so each graphic lands back in its old slot
    fn restore_graphics(&mut self, graphics: &[GraphicSnapshot]) {
        for g in graphics {
            if !self.step(|d| d.insert_graphic(g.graphic.clone(), g.index)) {
                break;
            }
        }
    }

    /// A single graphic goes through `remove_graphic`, a set through `remove_graphics`
    fn remove_graphics(&mut self, ids: &[GraphicId]) {
        match ids {
            [] => {}
            [only] => {
                self.step(|d| d.remove_graphic(*only));
            }
            many => {
                self.step(|d| d.remove_graphics(many));
            }
        }
    }

    fn finish(self) -> EditOutcome {
        self.document.request_repaint();
        match self.failure {
            None => EditOutcome::Completed,
            Some(error) => EditOutcome::Failed {
                completed_steps: self.completed,
                error,
            },
        }
    }
}

impl EditRecord {
    /// Perform the edit (first time or redo)
    pub fn apply<D: DocumentMutator + ?Sized>(
        &self,
        document: &mut D,
        sink: &mut dyn DiagnosticSink,
    ) -> EditOutcome {
        debug!("Applying '{}'", self.label());
        let mut run = StepRunner::new(self, document, sink, Direction::Apply);

        match self {
            EditRecord::ViewportChange { new, .. } => {
                run.step(|d| d.set_view_extent(*new));
            }
            EditRecord::InsertShapes { shapes } => run.insert_all(shapes),
            EditRecord::RemoveShapes { shapes } => run.remove_all(shapes),
            EditRecord::ReplaceShapeValue { shape, after, .. } => {
                run.step(|d| d.replace_shape_value(*shape, after.clone()));
            }
            EditRecord::SplitShape { original, parts } => {
                run.remove_all(iter::once(original));
                run.insert_all(parts);
            }
            EditRecord::MergeShapes { originals, merged } => {
                run.remove_all(originals);
                run.insert_all(iter::once(merged));
            }
            EditRecord::AddHole {
                polygon,
                part,
                hole,
                points,
            } => {
                run.step(|d| d.add_hole(*polygon, *part, *hole, points));
            }
            EditRecord::RemoveHole {
                polygon, part, hole, ..
            } => {
                run.step(|d| d.remove_hole(*polygon, *part, *hole));
            }
            EditRecord::FillHole {
                polygon,
                part,
                hole,
                companion,
                ..
            } => {
                run.step(|d| d.remove_hole(*polygon, *part, *hole));
                run.insert_all(iter::once(companion));
            }
            EditRecord::AddVertex {
                target,
                index,
                point,
            } => {
                run.step(|d| d.add_vertex(*target, *index, *point));
            }
            EditRecord::MoveVertex {
                target, index, to, ..
            } => {
                run.step(|d| d.move_vertex(*target, *index, *to));
            }
            EditRecord::RemoveVertex { target, index, .. } => {
                run.step(|d| d.remove_vertex(*target, *index));
            }
            EditRecord::MoveOnScreen { target, from, to } => {
                run.step(|d| d.move_on_screen(*target, *from, *to));
            }
            EditRecord::ResizeOnScreen { target, to, .. } => {
                run.step(|d| d.resize_on_screen(*target, *to));
            }
            EditRecord::AddGraphics { graphics } => run.add_graphics(graphics),
            EditRecord::RemoveGraphics { graphics } => {
                let ids: Vec<GraphicId> = graphics.iter().map(|g| g.graphic.id).collect();
                run.remove_graphics(&ids);
            }
            EditRecord::SetPointSequence { target, after, .. } => {
                run.step(|d| d.set_point_sequence(*target, after));
            }
        }

        run.finish()
    }

    /// Undo the edit, restoring the state captured before it was applied
    pub fn revert<D: DocumentMutator + ?Sized>(
        &self,
        document: &mut D,
        sink: &mut dyn DiagnosticSink,
    ) -> EditOutcome {
        debug!("Reverting '{}'", self.label());
        let mut run = StepRunner::new(self, document, sink, Direction::Revert);

        match self {
            EditRecord::ViewportChange { old, .. } => {
                run.step(|d| d.set_view_extent(*old));
            }
            EditRecord::InsertShapes { shapes } => run.remove_all(shapes.iter().rev()),
            // Ascending original indices, so each insert lands where it was
            EditRecord::RemoveShapes { shapes } => run.insert_all(shapes),
            EditRecord::ReplaceShapeValue { shape, before, .. } => {
                run.step(|d| d.replace_shape_value(*shape, before.clone()));
            }
            EditRecord::SplitShape { original, parts } => {
                run.remove_all(parts.iter().rev());
                run.insert_all(iter::once(original));
            }
            EditRecord::MergeShapes { originals, merged } => {
                run.remove_all(iter::once(merged));
                run.insert_all(originals);
            }
            EditRecord::AddHole {
                polygon, part, hole, ..
            } => {
                run.step(|d| d.remove_hole(*polygon, *part, *hole));
            }
            EditRecord::RemoveHole {
                polygon,
                part,
                hole,
                points,
            } => {
                run.step(|d| d.add_hole(*polygon, *part, *hole, points));
            }
            EditRecord::FillHole {
                polygon,
                part,
                hole,
                points,
                companion,
            } => {
                run.remove_all(iter::once(companion));
                run.step(|d| d.add_hole(*polygon, *part, *hole, points));
            }
            EditRecord::AddVertex { target, index, .. } => {
                run.step(|d| d.remove_vertex(*target, *index));
            }
            EditRecord::MoveVertex {
                target,
                index,
                from,
                ..
            } => {
                run.step(|d| d.move_vertex(*target, *index, *from));
            }
            EditRecord::RemoveVertex {
                target,
                index,
                point,
            } => {
                run.step(|d| d.add_vertex(*target, *index, *point));
            }
            EditRecord::MoveOnScreen { target, from, to } => {
                run.step(|d| d.move_on_screen(*target, *to, *from));
            }
            EditRecord::ResizeOnScreen { target, from, .. } => {
                run.step(|d| d.resize_on_screen(*target, *from));
            }
            EditRecord::AddGraphics { graphics } => {
                let ids: Vec<GraphicId> = graphics.iter().map(|g| g.id).collect();
                run.remove_graphics(&ids);
            }
            EditRecord::RemoveGraphics { graphics } => run.restore_graphics(graphics),
            EditRecord::SetPointSequence { target, before, .. } => {
                run.step(|d| d.set_point_sequence(*target, before));
            }
        }

        run.finish()
    }
}
