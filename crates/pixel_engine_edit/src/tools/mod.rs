//! Paint tool state machines
//!
//! Each tool implements [`PaintTool`] and runs the `Idle -> Dragging ->
//! Idle` cycle: pointer-down opens a journal (or anchors a shape
//! preview), pointer-move extends it, pointer-up seals the journal and
//! commits it to the undo stack. Shape tools render into the preview
//! overlay while dragging and only touch the buffer on commit.
//!
//! Tool configuration is explicit: a [`ToolContext`] is passed into every
//! tool constructor instead of living in process-wide statics, and the
//! capability traits ([`Colored`], [`BrushSized`], [`CompositingAware`])
//! let the UI adjust a tool generically after construction.

mod fill;
mod line;
mod pencil;
mod shapes;
mod spray;

pub use fill::FillTool;
pub use line::LineTool;
pub use pencil::{EraserTool, PencilTool};
pub use shapes::{EllipseTool, RectangleTool};
pub use spray::SprayTool;

use std::collections::HashSet;

use crate::{paint, Color, CompositingMode, EditState, PixelJournal, Position, Result};

bitflags::bitflags! {
    /// Modifier-key state delivered with each pointer event
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Left,
    Right,
}

/// A pointer event with coordinates already translated to buffer space
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub pos: Position,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(pos: impl Into<Position>) -> Self {
        Self {
            pos: pos.into(),
            button: PointerButton::Left,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Shared tool configuration, passed into tool constructors.
///
/// Replaces the hidden cross-tool coupling of global "current brush"
/// state: whoever owns the tools decides when to rebuild them with a new
/// context or to adjust one through the capability traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolContext {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub compositing_mode: CompositingMode,
    /// Brush diameter for sized tools
    pub brush_size: i32,
    /// Points scattered per spray event
    pub spray_density: u32,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            primary_color: Color::rgb(0, 0, 0),
            secondary_color: Color::rgb(255, 255, 255),
            compositing_mode: CompositingMode::Replace,
            brush_size: 1,
            spray_density: 12,
        }
    }
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary_color(mut self, color: Color) -> Self {
        self.primary_color = color;
        self
    }

    pub fn with_secondary_color(mut self, color: Color) -> Self {
        self.secondary_color = color;
        self
    }

    pub fn with_compositing_mode(mut self, mode: CompositingMode) -> Self {
        self.compositing_mode = mode;
        self
    }

    pub fn with_brush_size(mut self, size: i32) -> Self {
        self.brush_size = size.max(1);
        self
    }

    pub fn with_spray_density(mut self, density: u32) -> Self {
        self.spray_density = density.max(1);
        self
    }

    /// The paint color for a given pointer button
    pub fn color_for(&self, button: PointerButton) -> Color {
        match button {
            PointerButton::Left => self.primary_color,
            PointerButton::Right => self.secondary_color,
        }
    }
}

/// Tool event returned from tool operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolEvent {
    /// No action needed
    None,
    /// Request a redraw (e.g., after a preview update)
    Redraw,
    /// An operation was committed to the undo stack
    Commit(String),
    /// Status message to display
    Status(String),
}

/// A paint tool driven by pointer events.
///
/// Coordinates arrive in buffer space; events outside the buffer are
/// clipped by the tools, never rejected. A tool asked to cancel mid-drag
/// must roll back any partial uncommitted buffer state.
pub trait PaintTool {
    /// Stable identifier, also used for undo descriptions and session state
    fn name(&self) -> &'static str;

    fn on_press(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent>;

    fn on_drag(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent>;

    fn on_release(&mut self, state: &mut EditState, input: &PointerEvent) -> Result<ToolEvent>;

    /// Abort the gesture in progress, rolling back uncommitted changes
    fn on_cancel(&mut self, state: &mut EditState) -> Result<()>;
}

/// Capability: tool paints with configurable colors
pub trait Colored {
    fn primary_color(&self) -> Color;
    fn set_primary_color(&mut self, color: Color);
    fn secondary_color(&self) -> Color;
    fn set_secondary_color(&mut self, color: Color);
}

/// Capability: tool stamps a sized brush
pub trait BrushSized {
    fn brush_size(&self) -> i32;
    fn set_brush_size(&mut self, size: i32);
}

/// Capability: tool respects a configurable compositing mode
pub trait CompositingAware {
    fn compositing_mode(&self) -> CompositingMode;
    fn set_compositing_mode(&mut self, mode: CompositingMode);
}

// ============================================================================
// Shared stroke machinery for freehand tools
// ============================================================================

/// In-progress freehand stroke: the open journal plus the per-stroke
/// visited set that guarantees each pixel is composited at most once per
/// gesture (repeated AlphaBlend passes would darken it on every drag
/// event).
pub(crate) struct Stroke {
    journal: PixelJournal,
    visited: HashSet<Position>,
    last: Position,
    color: Color,
    mode: CompositingMode,
    brush: Vec<Position>,
}

impl Stroke {
    pub(crate) fn begin(description: &str, start: Position, color: Color, mode: CompositingMode, brush_size: i32) -> Self {
        Self {
            journal: PixelJournal::new(description),
            visited: HashSet::new(),
            last: start,
            color,
            mode,
            brush: paint::brush_points(Position::new(0, 0), brush_size),
        }
    }

    /// Stamp the brush disc at one point
    pub(crate) fn stamp(&mut self, state: &mut EditState, center: Position) -> Result<()> {
        let points: Vec<Position> = self.brush.iter().map(|off| center + *off).collect();
        self.paint_points(state, points)
    }

    /// Rasterize the incremental segment from the last event position
    pub(crate) fn stamp_segment(&mut self, state: &mut EditState, to: Position) -> Result<()> {
        let mut points = Vec::new();
        for pt in paint::line_points(self.last, to) {
            for off in &self.brush {
                points.push(pt + *off);
            }
        }
        self.last = to;
        self.paint_points(state, points)
    }

    /// Composite and journal a batch of points (used directly by the spray
    /// tool's scatter)
    pub(crate) fn paint_points(&mut self, state: &mut EditState, points: Vec<Position>) -> Result<()> {
        let mut pixels = state.get_buffer_mut().lock();
        for pos in points {
            if !pixels.contains(pos) || !self.visited.insert(pos) {
                continue;
            }
            let old = pixels.pixel_at(pos)?;
            let new = self.mode.composite(old, self.color);
            pixels.set_pixel(pos, new)?;
            self.journal.register_pixel(pos, old, new)?;
        }
        Ok(())
    }

    /// Seal the journal and hand it to the undo stack
    pub(crate) fn commit(self, state: &mut EditState) -> Result<ToolEvent> {
        if self.journal.is_empty() {
            return Ok(ToolEvent::None);
        }
        let description = self.journal.description().to_string();
        state.commit_journal(self.journal)?;
        Ok(ToolEvent::Commit(description))
    }

    /// Roll back every pixel this stroke painted and discard the journal
    pub(crate) fn cancel(self, state: &mut EditState) {
        let mut pixels = state.get_buffer_mut().lock();
        self.journal.undo_into(&mut pixels);
    }
}

// ============================================================================
// Modifier constraints shared by the shape tools
// ============================================================================

/// Snap `pos` so the segment from `anchor` runs at a multiple of 45
/// degrees (SHIFT-constrained lines)
pub(crate) fn constrain_line(anchor: Position, pos: Position) -> Position {
    let dx = pos.x - anchor.x;
    let dy = pos.y - anchor.y;
    let adx = dx.abs();
    let ady = dy.abs();

    if adx > ady * 2 {
        Position::new(pos.x, anchor.y)
    } else if ady > adx * 2 {
        Position::new(anchor.x, pos.y)
    } else {
        let d = adx.min(ady);
        Position::new(anchor.x + d * dx.signum(), anchor.y + d * dy.signum())
    }
}

/// Snap `pos` so the box spanned from `anchor` is square
/// (SHIFT-constrained rectangles and ellipses)
pub(crate) fn constrain_square(anchor: Position, pos: Position) -> Position {
    let dx = pos.x - anchor.x;
    let dy = pos.y - anchor.y;
    let side = dx.abs().max(dy.abs());
    Position::new(
        anchor.x + side * if dx < 0 { -1 } else { 1 },
        anchor.y + side * if dy < 0 { -1 } else { 1 },
    )
}
