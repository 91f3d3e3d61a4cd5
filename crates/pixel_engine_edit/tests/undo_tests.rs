//! Tests for the undo stack, atomic grouping and session persistence

use pretty_assertions::assert_eq;

use pixel_engine_edit::{
    Color, CompositingMode, EditOp, EditState, OperationType, PixelBuffer, Position, SessionState, UndoState,
};

use pixel_engine_edit::tools::ToolContext;

const WHITE: Color = Color::rgb(255, 255, 255);
const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn white_state(width: i32, height: i32) -> EditState {
    EditState::from_buffer(PixelBuffer::filled(width, height, WHITE).unwrap())
}

fn snapshot(state: &EditState) -> Vec<Color> {
    state.get_buffer().data().to_vec()
}

// ==================== Plain undo/redo ====================

#[test]
fn test_undo_redo_round_trip_over_multiple_operations() {
    let mut state = white_state(8, 8);
    let blank = snapshot(&state);

    state.draw_line(Position::new(0, 0), Position::new(7, 0), RED, CompositingMode::Replace).unwrap();
    let after_line = snapshot(&state);

    state.flood_fill(Position::new(4, 4), BLUE, CompositingMode::Replace).unwrap();
    let after_fill = snapshot(&state);

    assert_eq!(state.undo_stack_len(), 2);

    state.undo().unwrap();
    assert_eq!(snapshot(&state), after_line);
    state.undo().unwrap();
    assert_eq!(snapshot(&state), blank);

    state.redo().unwrap();
    assert_eq!(snapshot(&state), after_line);
    state.redo().unwrap();
    assert_eq!(snapshot(&state), after_fill);
}

#[test]
fn test_undo_on_empty_stack_is_noop() {
    let mut state = white_state(4, 4);
    assert!(!state.can_undo());
    state.undo().unwrap();
    assert!(!state.can_redo());
    state.redo().unwrap();
}

#[test]
fn test_new_commit_clears_redo() {
    let mut state = white_state(4, 4);

    state.draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace).unwrap();
    state.undo().unwrap();
    assert!(state.can_redo());

    state.draw_line(Position::new(0, 1), Position::new(3, 1), BLUE, CompositingMode::Replace).unwrap();
    assert!(!state.can_redo());
}

#[test]
fn test_undo_descriptions() {
    let mut state = white_state(4, 4);
    state.flood_fill(Position::new(0, 0), RED, CompositingMode::Replace).unwrap();
    assert_eq!(state.undo_description(), Some("Bucket fill".to_string()));

    state.undo().unwrap();
    assert_eq!(state.undo_description(), None);
    assert_eq!(state.redo_description(), Some("Bucket fill".to_string()));
}

#[test]
fn test_modified_flag_tracks_commits_and_undo() {
    let mut state = white_state(4, 4);
    assert!(!state.is_modified());

    state.draw_line(Position::new(0, 0), Position::new(3, 3), RED, CompositingMode::Replace).unwrap();
    assert!(state.take_modified());
    assert!(!state.is_modified());

    state.undo().unwrap();
    assert!(state.is_modified());
}

// ==================== Atomic grouping ====================

#[test]
fn test_atomic_guard_groups_operations_into_one_step() {
    let mut state = white_state(8, 8);
    let blank = snapshot(&state);

    {
        let mut guard = state.begin_typed_atomic_undo("Stamp", OperationType::Shape);
        state.draw_line(Position::new(0, 0), Position::new(7, 0), RED, CompositingMode::Replace).unwrap();
        state.draw_line(Position::new(0, 1), Position::new(7, 1), BLUE, CompositingMode::Replace).unwrap();
        guard.end();
    }

    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(state.undo_description(), Some("Stamp".to_string()));

    // One undo reverts both lines
    state.undo().unwrap();
    assert_eq!(snapshot(&state), blank);

    // One redo brings both back
    state.redo().unwrap();
    assert_eq!(state.get_buffer().pixel_at(Position::new(3, 0)).unwrap(), RED);
    assert_eq!(state.get_buffer().pixel_at(Position::new(3, 1)).unwrap(), BLUE);
}

#[test]
fn test_atomic_guard_closes_on_drop() {
    let mut state = white_state(8, 8);

    {
        let _guard = state.begin_atomic_undo("Group");
        state.draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace).unwrap();
        state.draw_line(Position::new(0, 1), Position::new(3, 1), RED, CompositingMode::Replace).unwrap();
    }

    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(state.undo_description(), Some("Group".to_string()));
}

#[test]
fn test_atomic_guard_unwraps_single_operation() {
    let mut state = white_state(8, 8);

    {
        let _guard = state.begin_atomic_undo("Group");
        state.draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace).unwrap();
    }

    // A lone untyped operation keeps its own description
    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(state.undo_description(), Some("Line".to_string()));
}

#[test]
fn test_atomic_guard_with_no_operations_pushes_nothing() {
    let mut state = white_state(8, 8);
    {
        let _guard = state.begin_atomic_undo("Empty group");
    }
    assert_eq!(state.undo_stack_len(), 0);
}

#[test]
fn test_discard_and_undo_rolls_back_group() {
    let mut state = white_state(8, 8);
    let blank = snapshot(&state);

    let mut guard = state.begin_atomic_undo("Cancelled");
    state.draw_line(Position::new(0, 0), Position::new(7, 7), RED, CompositingMode::Replace).unwrap();
    state.flood_fill(Position::new(7, 0), BLUE, CompositingMode::Replace).unwrap();
    guard.discard_and_undo(&mut state);

    assert_eq!(state.undo_stack_len(), 0);
    assert_eq!(snapshot(&state), blank);
}

#[test]
fn test_nested_description_of_atomic_op() {
    let mut state = white_state(8, 8);
    {
        let _guard = state.begin_typed_atomic_undo("Two strokes", OperationType::Stroke);
        state.draw_line(Position::new(0, 0), Position::new(1, 0), RED, CompositingMode::Replace).unwrap();
        state.draw_line(Position::new(0, 1), Position::new(1, 1), RED, CompositingMode::Replace).unwrap();
    }

    let stack = state.get_undo_stack();
    let stack = stack.lock().unwrap();
    match stack.undo_ops().last() {
        Some(EditOp::Atomic {
            description,
            operations,
            operation_type,
        }) => {
            assert_eq!(description, "Two strokes");
            assert_eq!(operations.len(), 2);
            assert_eq!(*operation_type, OperationType::Stroke);
        }
        other => panic!("expected an atomic op, got {other:?}"),
    }
}

// ==================== Save points ====================

#[test]
fn test_save_point_tracking() {
    let mut state = white_state(4, 4);
    state.draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace).unwrap();
    state.mark_saved();
    assert!(state.is_at_save_point());
    assert!(!state.is_modified());

    state.undo().unwrap();
    assert!(!state.is_at_save_point());

    state.redo().unwrap();
    assert!(state.is_at_save_point());
}

// ==================== Session persistence ====================

#[test]
fn test_session_round_trip_preserves_undo_history() {
    let mut state = white_state(4, 4);
    state.draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace).unwrap();
    state.flood_fill(Position::new(0, 2), BLUE, CompositingMode::Replace).unwrap();

    let ctx = ToolContext::default().with_primary_color(RED).with_brush_size(3);
    let session = SessionState::capture(&state, &ctx, "Pencil");

    let json = serde_json::to_string(&session).unwrap();
    let restored: SessionState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.selected_tool, "Pencil");
    assert_eq!(restored.primary_color, RED);
    assert_eq!(restored.brush_size, 3);

    // Restore into a fresh state over the same (post-edit) pixels
    let mut resumed = EditState::from_buffer(state.get_buffer().clone());
    let restored_ctx = restored.restore(&mut resumed);
    assert_eq!(restored_ctx.primary_color, RED);
    assert_eq!(resumed.undo_stack_len(), 2);

    // The restored history still replays
    resumed.undo().unwrap();
    resumed.undo().unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(resumed.get_buffer().pixel_at(Position::new(x, y)).unwrap(), WHITE);
        }
    }
}

#[test]
fn test_default_session_uses_tool_context_defaults() {
    let session = SessionState::default();
    let ctx = ToolContext::default();
    assert_eq!(session.primary_color, ctx.primary_color);
    assert_eq!(session.secondary_color, ctx.secondary_color);
    assert_eq!(session.brush_size, ctx.brush_size);
    assert_eq!(session.spray_density, ctx.spray_density);
}
