//! Freehand pencil and eraser tools

use crate::{Color, CompositingMode, EditState, Result};

use super::{BrushSized, Colored, CompositingAware, PaintTool, PointerEvent, Stroke, ToolContext, ToolEvent};

/// Freehand drawing: each drag event rasterizes the segment from the last
/// pointer position with the brush disc. The right button paints with the
/// secondary color.
pub struct PencilTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
    brush_size: i32,
    stroke: Option<Stroke>,
}

impl PencilTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
            brush_size: ctx.brush_size,
            stroke: None,
        }
    }
}

impl PaintTool for PencilTool {
    fn name(&self) -> &'static str {
        "Pencil"
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let color = match input.button {
            super::PointerButton::Left => self.primary_color,
            super::PointerButton::Right => self.secondary_color,
        };
        let mut stroke = Stroke::begin("Pencil", input.pos, color, self.mode, self.brush_size);
        stroke.stamp(state, input.pos)?;
        self.stroke = Some(stroke);
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(stroke) = &mut self.stroke else {
            return Ok(ToolEvent::None);
        };
        stroke.stamp_segment(state, input.pos)?;
        Ok(ToolEvent::Redraw)
    }

    fn on_release(&mut self, state: &mut EditState, _input: &PointerEvent) -> Result<ToolEvent> {
        match self.stroke.take() {
            Some(stroke) => stroke.commit(state),
            None => Ok(ToolEvent::None),
        }
    }

    fn on_cancel(&mut self, state: &mut EditState) -> Result<()> {
        if let Some(stroke) = self.stroke.take() {
            stroke.cancel(state);
        }
        Ok(())
    }
}

impl Colored for PencilTool {
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

impl BrushSized for PencilTool {
    fn brush_size(&self) -> i32 {
        self.brush_size
    }

    fn set_brush_size(&mut self, size: i32) {
        self.brush_size = size.max(1);
    }
}

impl CompositingAware for PencilTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}

/// Eraser: a freehand stroke that writes transparency.
///
/// Always a Replace write - blending transparency over a pixel would be a
/// no-op.
pub struct EraserTool {
    brush_size: i32,
    stroke: Option<Stroke>,
}

impl EraserTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            brush_size: ctx.brush_size,
            stroke: None,
        }
    }
}

impl PaintTool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let mut stroke = Stroke::begin("Eraser", input.pos, Color::TRANSPARENT, CompositingMode::Replace, self.brush_size);
        stroke.stamp(state, input.pos)?;
        self.stroke = Some(stroke);
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(stroke) = &mut self.stroke else {
            return Ok(ToolEvent::None);
        };
        stroke.stamp_segment(state, input.pos)?;
        Ok(ToolEvent::Redraw)
    }

    fn on_release(&mut self, state: &mut EditState, _input: &PointerEvent) -> Result<ToolEvent> {
        match self.stroke.take() {
            Some(stroke) => stroke.commit(state),
            None => Ok(ToolEvent::None),
        }
    }

    fn on_cancel(&mut self, state: &mut EditState) -> Result<()> {
        if let Some(stroke) = self.stroke.take() {
            stroke.cancel(state);
        }
        Ok(())
    }
}

impl BrushSized for EraserTool {
    fn brush_size(&self) -> i32 {
        self.brush_size
    }

    fn set_brush_size(&mut self, size: i32) {
        self.brush_size = size.max(1);
    }
}
