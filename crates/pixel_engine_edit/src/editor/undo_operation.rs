//! Editor undo operations as serializable enum
//!
//! A single enum containing all editor undo operations, making them
//! serializable for session persistence. Paint strokes of every tool share
//! the [`Paint`](EditOp::Paint) variant - the per-pixel journal is
//! tool-agnostic. `Atomic` groups several operations into one undo step;
//! the grouping itself is owned by the undo stack, never by a journal.

use serde::{Deserialize, Serialize};

use crate::Result;

use super::undo_stack::OperationType;
use super::{EditState, PixelJournal};

/// Serializable editor undo operation enum
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EditOp {
    /// Atomic group of operations
    Atomic {
        description: String,
        operations: Vec<EditOp>,
        operation_type: OperationType,
    },

    /// A sealed paint stroke
    Paint { journal: PixelJournal },
}

impl EditOp {
    /// Get a description of this operation for display
    pub fn get_description(&self) -> String {
        match self {
            EditOp::Atomic { description, .. } => description.clone(),
            EditOp::Paint { journal } => journal.description().to_string(),
        }
    }

    /// Get the operation type for grouping
    pub fn get_operation_type(&self) -> OperationType {
        match self {
            EditOp::Atomic { operation_type, .. } => *operation_type,
            EditOp::Paint { .. } => OperationType::Unknown,
        }
    }

    /// Whether this operation changes data (affects the modified flag)
    pub fn changes_data(&self) -> bool {
        match self {
            EditOp::Atomic { operations, .. } => operations.iter().any(EditOp::changes_data),
            EditOp::Paint { journal } => !journal.is_empty(),
        }
    }

    /// Undo this operation
    pub fn undo(&self, edit_state: &mut EditState) -> Result<()> {
        match self {
            EditOp::Atomic { operations, .. } => {
                for op in operations.iter().rev() {
                    op.undo(edit_state)?;
                }
                Ok(())
            }
            EditOp::Paint { journal } => {
                let mut pixels = edit_state.get_buffer_mut().lock();
                journal.undo_into(&mut pixels);
                Ok(())
            }
        }
    }

    /// Redo this operation
    pub fn redo(&self, edit_state: &mut EditState) -> Result<()> {
        match self {
            EditOp::Atomic { operations, .. } => {
                for op in operations.iter() {
                    op.redo(edit_state)?;
                }
                Ok(())
            }
            EditOp::Paint { journal } => {
                let mut pixels = edit_state.get_buffer_mut().lock();
                journal.redo_into(&mut pixels);
                Ok(())
            }
        }
    }
}
