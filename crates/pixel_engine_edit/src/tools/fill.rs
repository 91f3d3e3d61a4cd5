//! Bucket fill tool

use crate::{Color, CompositingMode, EditState, Result};

use super::{Colored, CompositingAware, PaintTool, PointerButton, PointerEvent, ToolContext, ToolEvent};

/// Click tool: pointer-down runs the flood fill and commits immediately.
/// A press outside the frame is a no-op.
pub struct FillTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
}

impl FillTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
        }
    }
}

impl PaintTool for FillTool {
    fn name(&self) -> &'static str {
        "Bucket fill"
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        if !state.get_buffer().contains(input.pos) {
            return Ok(ToolEvent::None);
        }

        let color = match input.button {
            PointerButton::Left => self.primary_color,
            PointerButton::Right => self.secondary_color,
        };

        let painted = state.flood_fill(input.pos, color, self.mode)?;
        if painted == 0 {
            return Ok(ToolEvent::None);
        }
        Ok(ToolEvent::Commit("Bucket fill".to_string()))
    }

    fn on_drag(&mut self, _state: &mut EditState, _input: &PointerEvent) -> Result<ToolEvent> {
        Ok(ToolEvent::None)
    }

    fn on_release(&mut self, _state: &mut EditState, _input: &PointerEvent) -> Result<ToolEvent> {
        Ok(ToolEvent::None)
    }

    fn on_cancel(&mut self, _state: &mut EditState) -> Result<()> {
        Ok(())
    }
}

impl Colored for FillTool {
    fn primary_color(&self) -> Color {
        self.primary_color
    }

    fn set_primary_color(&mut self, color: Color) {
        self.primary_color = color;
    }

    fn secondary_color(&self) -> Color {
        self.secondary_color
    }

    fn set_secondary_color(&mut self, color: Color) {
        self.secondary_color = color;
    }
}

impl CompositingAware for FillTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}
