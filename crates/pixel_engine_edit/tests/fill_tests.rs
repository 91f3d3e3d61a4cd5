//! Tests for the flood fill and line operations on the edit state
//!
//! Covers the paint-operation contract end to end: journal contents on the
//! undo stack, exact undo restoration, no-op guards and clipping.

use pixel_engine_edit::{Color, CompositingMode, EditOp, EditState, PixelBuffer, Position, UndoState};

const WHITE: Color = Color::rgb(255, 255, 255);
const BLACK: Color = Color::rgb(0, 0, 0);
const RED: Color = Color::rgb(255, 0, 0);

fn state_filled(width: i32, height: i32, color: Color) -> EditState {
    EditState::from_buffer(PixelBuffer::filled(width, height, color).unwrap())
}

/// Journal length of the newest undo operation
fn top_journal_len(state: &EditState) -> usize {
    let stack = state.get_undo_stack();
    let stack = stack.lock().unwrap();
    match stack.undo_ops().last() {
        Some(EditOp::Paint { journal }) => journal.len(),
        other => panic!("expected a paint op on top of the stack, got {other:?}"),
    }
}

// ==================== Flood Fill ====================

#[test]
fn test_fill_white_frame_with_black() {
    // 4x4 opaque white, fill at (0,0) with opaque black under Replace:
    // all 16 pixels black, journal of exactly 16 entries, undo restores
    // every pixel.
    let mut state = state_filled(4, 4, WHITE);

    let painted = state.flood_fill(Position::new(0, 0), BLACK, CompositingMode::Replace).unwrap();
    assert_eq!(painted, 16);
    assert_eq!(top_journal_len(&state), 16);

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(state.get_buffer().pixel_at(Position::new(x, y)).unwrap(), BLACK);
        }
    }

    state.undo().unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(state.get_buffer().pixel_at(Position::new(x, y)).unwrap(), WHITE);
        }
    }
}

#[test]
fn test_fill_already_correct_region_is_noop() {
    // Filling a region that already has the requested color leaves no
    // journal and no undo step behind.
    let mut state = state_filled(4, 4, RED);

    let painted = state.flood_fill(Position::new(2, 2), RED, CompositingMode::Replace).unwrap();
    assert_eq!(painted, 0);
    assert_eq!(state.undo_stack_len(), 0);
    assert!(!state.is_modified());
}

#[test]
fn test_fill_opaque_region_with_itself_under_blend_is_noop() {
    let mut state = state_filled(4, 4, RED);

    let painted = state.flood_fill(Position::new(1, 1), RED, CompositingMode::AlphaBlend).unwrap();
    assert_eq!(painted, 0);
    assert_eq!(state.undo_stack_len(), 0);
}

#[test]
fn test_fill_out_of_bounds_seed_is_noop() {
    let mut state = state_filled(4, 4, WHITE);

    let painted = state.flood_fill(Position::new(9, 9), BLACK, CompositingMode::Replace).unwrap();
    assert_eq!(painted, 0);
    assert_eq!(state.undo_stack_len(), 0);
}

#[test]
fn test_fill_only_reaches_connected_region() {
    let mut buffer = PixelBuffer::filled(8, 8, WHITE).unwrap();
    // Black wall splitting the frame at x=3
    for y in 0..8 {
        buffer.set_pixel(Position::new(3, y), BLACK).unwrap();
    }
    let mut state = EditState::from_buffer(buffer);

    let painted = state.flood_fill(Position::new(0, 0), RED, CompositingMode::Replace).unwrap();
    assert_eq!(painted, 24);

    assert_eq!(state.get_buffer().pixel_at(Position::new(2, 7)).unwrap(), RED);
    assert_eq!(state.get_buffer().pixel_at(Position::new(3, 4)).unwrap(), BLACK);
    assert_eq!(state.get_buffer().pixel_at(Position::new(4, 4)).unwrap(), WHITE);
}

#[test]
fn test_fill_undo_redo_round_trip() {
    let mut state = state_filled(6, 6, WHITE);
    state.flood_fill(Position::new(3, 3), RED, CompositingMode::Replace).unwrap();
    let after: Vec<Color> = state.get_buffer().data().to_vec();

    state.undo().unwrap();
    state.redo().unwrap();

    assert_eq!(state.get_buffer().data(), &after[..]);
}

#[test]
fn test_fill_with_alpha_blend_journals_blended_colors() {
    let mut state = state_filled(2, 2, WHITE);
    let half_black = Color::argb(128, 0, 0, 0);

    state.flood_fill(Position::new(0, 0), half_black, CompositingMode::AlphaBlend).unwrap();
    let blended = pixel_engine_edit::alpha_blend(WHITE, half_black);
    assert_eq!(state.get_buffer().pixel_at(Position::new(1, 1)).unwrap(), blended);

    // Undo restores pure white, bit for bit
    state.undo().unwrap();
    assert_eq!(state.get_buffer().pixel_at(Position::new(1, 1)).unwrap(), WHITE);
}

// ==================== Lines ====================

#[test]
fn test_line_on_transparent_frame() {
    // 4x4 transparent frame, opaque red line from (0,0) to (3,0) under
    // Replace: exactly the four top-row pixels red, journal length 4.
    let mut state = EditState::new(4, 4).unwrap();

    let painted = state
        .draw_line(Position::new(0, 0), Position::new(3, 0), RED, CompositingMode::Replace)
        .unwrap();
    assert_eq!(painted, 4);
    assert_eq!(top_journal_len(&state), 4);

    for x in 0..4 {
        assert_eq!(state.get_buffer().pixel_at(Position::new(x, 0)).unwrap(), RED);
    }
    for y in 1..4 {
        for x in 0..4 {
            assert_eq!(state.get_buffer().pixel_at(Position::new(x, y)).unwrap(), Color::TRANSPARENT);
        }
    }
}

#[test]
fn test_line_endpoint_order_is_irrelevant() {
    let a = Position::new(1, 0);
    let b = Position::new(6, 7);

    let mut forward = state_filled(8, 8, WHITE);
    forward.draw_line(a, b, RED, CompositingMode::Replace).unwrap();

    let mut backward = state_filled(8, 8, WHITE);
    backward.draw_line(b, a, RED, CompositingMode::Replace).unwrap();

    assert_eq!(forward.get_buffer().data(), backward.get_buffer().data());
}

#[test]
fn test_line_clips_at_frame_edges() {
    let mut state = state_filled(4, 4, WHITE);

    // Both endpoints outside; only the crossing segment is painted
    let painted = state
        .draw_line(Position::new(-3, 2), Position::new(8, 2), RED, CompositingMode::Replace)
        .unwrap();
    assert_eq!(painted, 4);
    assert_eq!(top_journal_len(&state), 4);

    state.undo().unwrap();
    assert_eq!(state.get_buffer().pixel_at(Position::new(0, 2)).unwrap(), WHITE);
}

#[test]
fn test_line_fully_outside_frame_commits_nothing() {
    let mut state = state_filled(4, 4, WHITE);
    let painted = state
        .draw_line(Position::new(10, 10), Position::new(20, 10), RED, CompositingMode::Replace)
        .unwrap();
    assert_eq!(painted, 0);
    assert_eq!(state.undo_stack_len(), 0);
}

// ==================== Shapes ====================

#[test]
fn test_filled_rectangle_and_undo() {
    let mut state = state_filled(6, 6, WHITE);
    let painted = state
        .draw_rectangle(Position::new(1, 1), Position::new(3, 2), true, RED, CompositingMode::Replace)
        .unwrap();
    assert_eq!(painted, 6);

    assert_eq!(state.get_buffer().pixel_at(Position::new(2, 2)).unwrap(), RED);
    assert_eq!(state.get_buffer().pixel_at(Position::new(4, 2)).unwrap(), WHITE);

    state.undo().unwrap();
    assert_eq!(state.get_buffer().pixel_at(Position::new(2, 2)).unwrap(), WHITE);
}

#[test]
fn test_rectangle_outline_leaves_interior() {
    let mut state = state_filled(6, 6, WHITE);
    state
        .draw_rectangle(Position::new(0, 0), Position::new(4, 4), false, RED, CompositingMode::Replace)
        .unwrap();

    assert_eq!(state.get_buffer().pixel_at(Position::new(0, 2)).unwrap(), RED);
    assert_eq!(state.get_buffer().pixel_at(Position::new(2, 2)).unwrap(), WHITE);
}

#[test]
fn test_ellipse_commits_and_reverts() {
    let mut state = state_filled(9, 9, WHITE);
    let painted = state
        .draw_ellipse(Position::new(0, 0), Position::new(8, 8), true, RED, CompositingMode::Replace)
        .unwrap();
    assert!(painted > 0);
    assert_eq!(state.get_buffer().pixel_at(Position::new(4, 4)).unwrap(), RED);

    state.undo().unwrap();
    for y in 0..9 {
        for x in 0..9 {
            assert_eq!(state.get_buffer().pixel_at(Position::new(x, y)).unwrap(), WHITE);
        }
    }
}

// ==================== Damage reporting ====================

#[test]
fn test_fill_reports_damage_rectangle() {
    let mut state = state_filled(4, 4, WHITE);
    state.take_damage();

    state.flood_fill(Position::new(0, 0), BLACK, CompositingMode::Replace).unwrap();
    let damage = state.take_damage().unwrap();
    assert_eq!(damage, state.get_buffer().rectangle());
}

#[test]
fn test_undo_reports_damage_rectangle() {
    let mut state = state_filled(4, 4, WHITE);
    state.draw_line(Position::new(0, 1), Position::new(3, 1), RED, CompositingMode::Replace).unwrap();
    state.take_damage();

    state.undo().unwrap();
    let damage = state.take_damage().unwrap();
    assert_eq!(damage.min, Position::new(0, 1));
    assert_eq!(damage.max, Position::new(3, 1));
}
