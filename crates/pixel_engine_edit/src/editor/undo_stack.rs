//! Undo stack for frame editing
//!
//! Holds the serializable undo/redo sides and the save-point marker. The
//! [`UndoState`] trait is what UI collaborators call; [`EditState`] is its
//! implementor.
//!
//! [`EditState`]: super::EditState

use serde::{Deserialize, Serialize};

use crate::Result;

use super::undo_operation::EditOp;

/// Trait for types that support undo/redo operations
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Perform undo operation
    fn undo(&mut self) -> Result<()>;

    /// Get description of the next redo operation
    fn redo_description(&self) -> Option<String>;

    /// Check if redo is available
    fn can_redo(&self) -> bool;

    /// Perform redo operation
    fn redo(&mut self) -> Result<()>;
}

/// Type of operation for grouping related undos
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// Unknown/default operation
    #[default]
    Unknown,
    /// Freehand stroke (pencil, eraser, spray)
    Stroke,
    /// Bucket fill
    Fill,
    /// Committed shape (line, rectangle, ellipse)
    Shape,
}

/// Serializable undo/redo stack
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UndoStack {
    undo: Vec<EditOp>,
    redo: Vec<EditOp>,
    /// Undo depth at the last save, for dirty tracking
    #[serde(default)]
    save_point: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new operation onto the undo side
    pub fn push(&mut self, op: EditOp) {
        self.undo.push(op);
    }

    pub fn pop_undo(&mut self) -> Option<EditOp> {
        self.undo.pop()
    }

    pub fn push_redo(&mut self, op: EditOp) {
        self.redo.push(op);
    }

    pub fn pop_redo(&mut self) -> Option<EditOp> {
        self.redo.pop()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo.last().map(EditOp::get_description)
    }

    /// Operations on the undo side, oldest first (history display)
    pub fn undo_ops(&self) -> &[EditOp] {
        &self.undo
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo.last().map(EditOp::get_description)
    }

    /// Drop the redo side; called when a new action invalidates it
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.save_point = None;
    }

    /// Remove and return every operation pushed after `base`, in order.
    /// Used to collect an atomic group.
    pub fn drain_from(&mut self, base: usize) -> Vec<EditOp> {
        if base >= self.undo.len() {
            return Vec::new();
        }
        self.undo.split_off(base)
    }

    /// Mark the current undo depth as the saved state
    pub fn mark_saved(&mut self) {
        self.save_point = Some(self.undo.len());
    }

    /// Whether the stack is at the depth recorded by the last
    /// [`mark_saved`](Self::mark_saved)
    pub fn is_at_save_point(&self) -> bool {
        self.save_point == Some(self.undo.len())
    }
}
