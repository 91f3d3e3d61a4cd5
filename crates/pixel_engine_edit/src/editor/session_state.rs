//! Session state for the frame editor
//!
//! Contains everything needed to restore an editing session across
//! restarts: the undo/redo stack and the tool configuration. Serialized to
//! disk by the application shell when it exits; this crate only defines the
//! snapshot shape.

use serde::{Deserialize, Serialize};

use crate::tools::ToolContext;
use crate::{Color, CompositingMode};

use super::{EditState, UndoStack};

/// Serializable editor session snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// The undo/redo stack
    pub undo_stack: UndoStack,

    /// Currently selected tool ID
    #[serde(default)]
    pub selected_tool: String,

    /// Current drawing colors
    #[serde(default)]
    pub primary_color: Color,
    #[serde(default)]
    pub secondary_color: Color,

    /// Compositing mode tools are configured with
    #[serde(default)]
    pub compositing_mode: CompositingMode,

    /// Brush diameter
    #[serde(default = "default_brush_size")]
    pub brush_size: i32,

    /// Points scattered per spray event
    #[serde(default = "default_spray_density")]
    pub spray_density: u32,
}

fn default_version() -> u32 {
    1
}
fn default_brush_size() -> i32 {
    1
}
fn default_spray_density() -> u32 {
    12
}

impl Default for SessionState {
    fn default() -> Self {
        let ctx = ToolContext::default();
        Self {
            version: 1,
            undo_stack: UndoStack::default(),
            selected_tool: String::new(),
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            compositing_mode: ctx.compositing_mode,
            brush_size: ctx.brush_size,
            spray_density: ctx.spray_density,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current session
    pub fn capture(state: &EditState, ctx: &ToolContext, selected_tool: &str) -> Self {
        Self {
            version: 1,
            undo_stack: state.get_undo_stack().lock().unwrap().clone(),
            selected_tool: selected_tool.to_string(),
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            compositing_mode: ctx.compositing_mode,
            brush_size: ctx.brush_size,
            spray_density: ctx.spray_density,
        }
    }

    /// Restore the captured undo history into an edit state and rebuild the
    /// tool context
    pub fn restore(self, state: &mut EditState) -> ToolContext {
        state.restore_undo_stack(self.undo_stack);
        ToolContext {
            primary_color: self.primary_color,
            secondary_color: self.secondary_color,
            compositing_mode: self.compositing_mode,
            brush_size: self.brush_size,
            spray_density: self.spray_density,
        }
    }
}
