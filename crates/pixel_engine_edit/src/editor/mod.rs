//! Frame editing session
//!
//! [`EditState`] owns everything the editor mutates for one frame: the
//! pixel buffer, the tool preview overlay, the undo/redo stack and the
//! modified flag. The surrounding UI holds one `EditState` per open frame
//! and drives it through the paint operations and the [`UndoState`] trait.

pub mod undo_stack;
use std::sync::{Arc, Mutex};

pub use undo_stack::*;

pub mod undo_operation;
pub use undo_operation::EditOp;

mod journal;
pub use journal::{PixelChange, PixelJournal};

mod paint_operations;

pub mod session_state;
pub use session_state::SessionState;

use crate::{PixelBuffer, PreviewOverlay, Rectangle, Result};

pub struct EditState {
    buffer: PixelBuffer,
    tool_overlay: PreviewOverlay,

    /// Serializable undo stack (wrapped in Arc<Mutex> for atomic operations)
    undo_stack: Arc<Mutex<UndoStack>>,

    /// Set after every commit and undo/redo; the frame model reads and
    /// resets it ("mark modified" boundary contract)
    modified: bool,
}

impl EditState {
    /// Create an editing session over a fresh transparent buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(Self::from_buffer(PixelBuffer::new(width, height)?))
    }

    /// Create an editing session over an existing frame buffer
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        let mut tool_overlay = PreviewOverlay::default();
        tool_overlay.set_size(buffer.size());

        Self {
            buffer,
            tool_overlay,
            undo_stack: Arc::new(Mutex::new(UndoStack::new())),
            modified: false,
        }
    }

    pub fn get_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn get_buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn get_tool_overlay(&self) -> &PreviewOverlay {
        &self.tool_overlay
    }

    pub fn get_tool_overlay_mut(&mut self) -> &mut PreviewOverlay {
        &mut self.tool_overlay
    }

    /// Take the accumulated invalidate rectangle for the visual feedback
    /// layer, leaving it empty
    pub fn take_damage(&mut self) -> Option<Rectangle> {
        self.buffer.take_damage()
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Read and reset the modified flag
    pub fn take_modified(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }

    /// Begin an atomic undo group.
    ///
    /// All operations committed while the guard is alive are collected into
    /// a single undo step when it ends (explicitly or on drop).
    #[must_use]
    pub fn begin_atomic_undo(&mut self, description: impl Into<String>) -> AtomicUndoGuard {
        self.begin_typed_atomic_undo(description, OperationType::Unknown)
    }

    #[must_use]
    pub fn begin_typed_atomic_undo(&mut self, description: impl Into<String>, operation_type: OperationType) -> AtomicUndoGuard {
        self.undo_stack.lock().unwrap().clear_redo();
        AtomicUndoGuard::new(description.into(), self.undo_stack.clone(), operation_type)
    }

    /// Push an undo operation without executing it (the mutation already
    /// happened while the stroke was recorded)
    pub(crate) fn push_plain_undo(&mut self, op: EditOp) {
        if op.changes_data() {
            self.mark_modified();
        }
        self.undo_stack.lock().unwrap().push(op);
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.lock().unwrap().undo_len()
    }

    /// Get clone of the undo stack handle (for serialization)
    pub fn get_undo_stack(&self) -> Arc<Mutex<UndoStack>> {
        self.undo_stack.clone()
    }

    /// Replace the undo stack (session restore)
    pub fn restore_undo_stack(&mut self, stack: UndoStack) {
        *self.undo_stack.lock().unwrap() = stack;
    }

    /// Mark the current undo depth as saved
    pub fn mark_saved(&mut self) {
        self.modified = false;
        self.undo_stack.lock().unwrap().mark_saved();
    }

    pub fn is_at_save_point(&self) -> bool {
        self.undo_stack.lock().unwrap().is_at_save_point()
    }
}

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.lock().unwrap().undo_description()
    }

    fn can_undo(&self) -> bool {
        self.undo_stack.lock().unwrap().can_undo()
    }

    fn undo(&mut self) -> Result<()> {
        let Some(op) = self.undo_stack.lock().unwrap().pop_undo() else {
            return Ok(());
        };
        if op.changes_data() {
            self.mark_modified();
        }

        let res = op.undo(self);
        self.undo_stack.lock().unwrap().push_redo(op);
        res
    }

    fn redo_description(&self) -> Option<String> {
        self.undo_stack.lock().unwrap().redo_description()
    }

    fn can_redo(&self) -> bool {
        self.undo_stack.lock().unwrap().can_redo()
    }

    fn redo(&mut self) -> Result<()> {
        let Some(op) = self.undo_stack.lock().unwrap().pop_redo() else {
            return Ok(());
        };
        if op.changes_data() {
            self.mark_modified();
        }

        let res = op.redo(self);
        self.undo_stack.lock().unwrap().push(op);
        res
    }
}

/// Guard for atomic undo operations.
///
/// When dropped, collects all operations pushed since creation into a
/// single [`EditOp::Atomic`].
pub struct AtomicUndoGuard {
    base_count: usize,
    description: String,
    operation_type: OperationType,
    undo_stack: Arc<Mutex<UndoStack>>,
    ended: bool,
}

impl AtomicUndoGuard {
    fn new(description: String, undo_stack: Arc<Mutex<UndoStack>>, operation_type: OperationType) -> Self {
        let base_count = undo_stack.lock().unwrap().undo_len();
        Self {
            base_count,
            description,
            operation_type,
            undo_stack,
            ended: false,
        }
    }

    /// End the atomic group explicitly
    pub fn end(&mut self) {
        self.end_action();
    }

    /// Discard all operations in this atomic group without committing them.
    ///
    /// NOTE: This only removes operations from the stack, it does NOT undo
    /// the actual buffer changes. Use `discard_and_undo()` when the changes
    /// themselves must be rolled back.
    pub fn discard(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        let mut stack = self.undo_stack.lock().unwrap();
        while stack.undo_len() > self.base_count {
            stack.pop_undo();
        }
    }

    /// Discard all operations in this atomic group AND undo them, reverting
    /// every buffer change made since the guard was created.
    pub fn discard_and_undo(&mut self, edit_state: &mut EditState) {
        if self.ended {
            return;
        }
        self.ended = true;

        let mut stack = self.undo_stack.lock().unwrap();
        while stack.undo_len() > self.base_count {
            if let Some(op) = stack.pop_undo() {
                // Drop the lock before undoing to avoid deadlock
                drop(stack);
                if let Err(e) = op.undo(edit_state) {
                    log::warn!("Failed to undo operation during discard: {}", e);
                }
                stack = self.undo_stack.lock().unwrap();
            }
        }
        edit_state.mark_modified();
    }

    fn end_action(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        let mut stack = self.undo_stack.lock().unwrap();
        if stack.undo_len() <= self.base_count {
            return;
        }

        let mut operations = stack.drain_from(self.base_count);

        // A lone operation needs no Atomic wrapper unless it carries a
        // non-default operation type.
        if operations.len() == 1 && self.operation_type == OperationType::Unknown {
            stack.push(operations.pop().unwrap());
            return;
        }

        stack.push(EditOp::Atomic {
            description: self.description.clone(),
            operations,
            operation_type: self.operation_type,
        });
    }
}

impl Drop for AtomicUndoGuard {
    fn drop(&mut self) {
        self.end_action();
    }
}
