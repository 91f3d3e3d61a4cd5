//! Spray (airbrush) tool

use crate::{Color, CompositingMode, EditState, Position, Result};

use super::{BrushSized, Colored, CompositingAware, PaintTool, PointerButton, PointerEvent, Stroke, ToolContext, ToolEvent};

/// Scatters random points within the brush radius on every pointer event.
///
/// The whole press-to-release gesture is one journal; pixels already hit
/// during the gesture are not composited again.
pub struct SprayTool {
    primary_color: Color,
    secondary_color: Color,
    mode: CompositingMode,
    brush_size: i32,
    density: u32,
    rng: fastrand::Rng,
    stroke: Option<Stroke>,
}

impl SprayTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self::with_rng(ctx, fastrand::Rng::new())
    }

    /// Pin the scatter pattern to a seed (tests)
    pub fn with_seed(ctx: &ToolContext, seed: u64) -> Self {
        Self::with_rng(ctx, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(ctx: &ToolContext, rng: fastrand::Rng) -> Self {
        Self {
            primary_color: ctx.primary_color,
            secondary_color: ctx.secondary_color,
            mode: ctx.compositing_mode,
            brush_size: ctx.brush_size,
            density: ctx.spray_density,
            rng,
            stroke: None,
        }
    }

    fn scatter(&mut self, center: Position) -> Vec<Position> {
        let radius = self.brush_size.max(1);
        let mut points = Vec::with_capacity(self.density as usize);
        for _ in 0..self.density {
            let dx = self.rng.i32(-radius..=radius);
            let dy = self.rng.i32(-radius..=radius);
            if dx * dx + dy * dy <= radius * radius {
                points.push(Position::new(center.x + dx, center.y + dy));
            }
        }
        points
    }

    fn burst(&mut self, state: &mut EditState, center: Position) -> Result<()> {
        let points = self.scatter(center);
        if let Some(stroke) = &mut self.stroke {
            stroke.paint_points(state, points)?;
        }
        Ok(())
    }
}

impl PaintTool for SprayTool {
    fn name(&self) -> &'static str {
        "Spray"
    }

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        let color = match input.button {
            PointerButton::Left => self.primary_color,
            PointerButton::Right => self.secondary_color,
        };
        // The scatter itself is the brush; the stroke stamps single pixels
        self.stroke = Some(Stroke::begin("Spray", input.pos, color, self.mode, 1));
        self.burst(state, input.pos)?;
        Ok(ToolEvent::Redraw)
    }

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent> {
        if self.stroke.is_none() {
            return Ok(ToolEvent::None);
        }
        self.burst(state, input.pos)?;
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

impl Colored for SprayTool {
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

impl BrushSized for SprayTool {
    fn brush_size(&self) -> i32 {
        self.brush_size
    }

    fn set_brush_size(&mut self, size: i32) {
        self.brush_size = size.max(1);
    }
}

impl CompositingAware for SprayTool {
    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.mode = mode;
    }
}
