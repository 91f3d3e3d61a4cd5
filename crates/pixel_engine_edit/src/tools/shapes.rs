//! Rectangle and ellipse tools
//!
//! Both follow the same preview-then-commit pattern as the line tool: the
//! drag renders into the overlay, the release composites through a journal.
//! SHIFT constrains the bounding box to a square.

use crate::{paint, Color, CompositingMode, EditState, Position, Result};

use super::{constrain_square, Colored, CompositingAware, Modifiers, PaintTool, PointerButton, PointerEvent, ToolContext, ToolEvent};

struct ShapeDrag {
    anchor: Position,
    color: Color,
}

/// Draws rectangle outlines or filled rectangles
pub struct RectangleTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
    filled: bool,
    drag: Option<ShapeDrag>,
}

impl RectangleTool {
    pub fn new(ctx: &ToolContext, filled: bool) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
            filled,
            drag: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }
}

impl PaintTool for RectangleTool {
    fn name(&self) -> &'static str {
        if self.filled { "Filled rectangle" } else { "Rectangle" }
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        shape_press(&mut self.drag, self.primary_color, self.secondary_color, state, input);
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(drag) = &self.drag else {
            return Ok(ToolEvent::None);
        };
        let corner = opposite_corner(drag.anchor, input);
        state.render_overlay_points(paint::rectangle_points(drag.anchor, corner, self.filled), drag.color, self.mode);
        Ok(ToolEvent::Redraw)
    }

    fn on_release(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(drag) = self.drag.take() else {
            return Ok(ToolEvent::None);
        };
        let corner = opposite_corner(drag.anchor, input);
        state.clear_overlay();
        let painted = state.draw_rectangle(drag.anchor, corner, self.filled, drag.color, self.mode)?;
        if painted == 0 {
            return Ok(ToolEvent::Redraw);
        }
        Ok(ToolEvent::Commit(self.name().to_string()))
    }

    fn on_cancel(&mut self, state: &mut EditState) -> Result<()> {
        self.drag = None;
        state.clear_overlay();
        Ok(())
    }
}

impl Colored for RectangleTool {
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

impl CompositingAware for RectangleTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}

/// Draws ellipse outlines or filled ellipses inscribed in the dragged box
pub struct EllipseTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
    filled: bool,
    drag: Option<ShapeDrag>,
}

impl EllipseTool {
    pub fn new(ctx: &ToolContext, filled: bool) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
            filled,
            drag: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    fn points(&self, p0: Position, p1: Position) -> Vec<Position> {
        if self.filled {
            paint::filled_ellipse_points(p0, p1)
        } else {
            paint::ellipse_points(p0, p1)
        }
    }
}

impl PaintTool for EllipseTool {
    fn name(&self) -> &'static str {
        if self.filled { "Filled ellipse" } else { "Ellipse" }
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        shape_press(&mut self.drag, self.primary_color, self.secondary_color, state, input);
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(drag) = &self.drag else {
            return Ok(ToolEvent::None);
        };
        let corner = opposite_corner(drag.anchor, input);
        let points = self.points(drag.anchor, corner);
        state.render_overlay_points(points, drag.color, self.mode);
        Ok(ToolEvent::Redraw)
    }

    fn on_release(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let Some(drag) = self.drag.take() else {
            return Ok(ToolEvent::None);
        };
        let corner = opposite_corner(drag.anchor, input);
        state.clear_overlay();
        let painted = state.draw_ellipse(drag.anchor, corner, self.filled, drag.color, self.mode)?;
        if painted == 0 {
            return Ok(ToolEvent::Redraw);
        }
        Ok(ToolEvent::Commit(self.name().to_string()))
    }

    fn on_cancel(&mut self, state: &mut EditState) -> Result<()> {
        self.drag = None;
        state.clear_overlay();
        Ok(())
    }
}

impl Colored for EllipseTool {
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

impl CompositingAware for EllipseTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}

fn shape_press(drag: &mut Option<ShapeDrag>, primary: Color, secondary: Color, state: &mut EditState, input: &PointerEvent) {
    *drag = Some(ShapeDrag {
        anchor: input.pos,
        color: match input.button {
            PointerButton::Left => primary,
            PointerButton::Right => secondary,
        },
    });
    state.clear_overlay();
}

fn opposite_corner(anchor: Position, input: &PointerEvent) -> Position {
    if input.modifiers.contains(Modifiers::SHIFT) {
        constrain_square(anchor, input.pos)
    } else {
        input.pos
    }
}
