//! Small value types shared by records, the log and diagnostics.

use std::fmt;

use crate::document::MutationError;

/// Which way a record is being run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// `apply()`: perform or redo the edit
    Apply,
    /// `revert()`: undo the edit
    Revert,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Apply => f.write_str("apply"),
            Direction::Revert => f.write_str("revert"),
        }
    }
}

/// Why a whole point sequence was replaced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequenceEdit {
    #[default]
    Smooth,
    Simplify,
    Reshape,
}

/// Discriminant of an [`EditRecord`](super::EditRecord)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    ViewportChange,
    InsertShapes,
    RemoveShapes,
    ReplaceShapeValue,
    SplitShape,
    MergeShapes,
    AddHole,
    RemoveHole,
    FillHole,
    AddVertex,
    MoveVertex,
    RemoveVertex,
    MoveOnScreen,
    ResizeOnScreen,
    AddGraphics,
    RemoveGraphics,
    SetPointSequence,
}

/// What happened when a record was applied or reverted
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// Every sub-step succeeded
    Completed,
    /// A sub-step was rejected; `completed_steps` earlier steps stay applied
    /// and the rest were skipped
    Failed {
        completed_steps: usize,
        error: MutationError,
    },
}

impl EditOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, EditOutcome::Completed)
    }
}
