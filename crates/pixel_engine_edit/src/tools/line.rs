//! Line tool

use crate::{paint, Color, CompositingMode, EditState, Position, Result};

use super::{constrain_line, Colored, CompositingAware, Modifiers, PaintTool, PointerEvent, ToolContext, ToolEvent};

struct LineDrag {
    anchor: Position,
    color: Color,
}

/// Draws a straight line between press and release.
///
/// While dragging, the line is rendered into the preview overlay only; the
/// buffer is first touched when the gesture commits. SHIFT snaps the line
/// to 45-degree increments.
pub struct LineTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
    drag: Option<LineDrag>,
}

impl LineTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
            drag: None,
        }
    }

    fn end_point(&self, input: &PointerEvent) -> Position {
        match &self.drag {
            Some(drag) if input.modifiers.contains(Modifiers::SHIFT) => constrain_line(drag.anchor, input.pos),
            _ => input.pos,
        }
    }

    fn render_preview(&self, state: &mut EditState, to: Position) {
        if let Some(drag) = &self.drag {
            state.render_overlay_points(paint::line_points(drag.anchor, to), drag.color, self.mode);
        }
    }
}

impl PaintTool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        self.drag = Some(LineDrag {
            anchor: input.pos,
            color: match input.button {
                super::PointerButton::Left => self.primary_color,
                super::PointerButton::Right => self.secondary_color,
            },
        });
        self.render_preview(state, input.pos);
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        if self.drag.is_none() {
            return Ok(ToolEvent::None);
        }
        let to = self.end_point(input);
        self.render_preview(state, to);
        Ok(ToolEvent::Redraw)
    }

    fn on_release(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let to = self.end_point(input);
        let Some(drag) = self.drag.take() else {
            return Ok(ToolEvent::None);
        };
        state.clear_overlay();
        let painted = state.draw_line(drag.anchor, to, drag.color, self.mode)?;
        if painted == 0 {
            return Ok(ToolEvent::Redraw);
        }
        Ok(ToolEvent::Commit("Line".to_string()))
    }

    fn on_cancel(&mut self, state: &mut EditState) -> Result<()> {
        // The preview never reached the buffer; dropping it is the rollback
        self.drag = None;
        state.clear_overlay();
        Ok(())
    }
}

impl Colored for LineTool {
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

impl CompositingAware for LineTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}
