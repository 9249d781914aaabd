//! Move application tests: multi-jumps, promotion and captured squares.

use super::{pairs, spot};
use crate::board::{
    Color, GameStatus, Move, MoveKind, PieceType, Position, PositionBuilder, SPOTS_NUMBER,
};

#[test]
fn test_normal_move_flips_turn() {
    let mut position = Position::starting();
    position.apply_move(Move::normal(spot(22), spot(18)));
    assert_eq!(position.turn(), Some(Color::Black));
    assert_eq!(position.piece_at(spot(18)), Some((Color::White, PieceType::Man)));
    assert_eq!(position.piece_at(spot(22)), None);
    assert_eq!(position.pending_capture(), None);
}

#[test]
fn test_multi_jump_keeps_turn() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[29])
        .men(Color::Black, &[25, 18])
        .build();

    position.apply_move(Move::capture(spot(29), spot(22)));
    assert_eq!(position.turn(), Some(Color::White));
    assert_eq!(position.pending_capture(), Some(spot(22)));
    assert_eq!(position.piece_at(spot(25)), None);
    assert_eq!(pairs(&position.legal_moves()), vec![(22, 15)]);

    position.apply_move(Move::capture(spot(22), spot(15)));
    assert_eq!(position.turn(), Some(Color::Black));
    assert_eq!(position.pending_capture(), None);
    assert!(position.pieces(Color::Black).is_empty());
    assert_eq!(position.status(), GameStatus::Won(Color::White));
}

#[test]
fn test_chain_restricts_other_pieces() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[29, 30])
        .men(Color::Black, &[25, 18, 26])
        .build();
    assert_eq!(
        pairs(&position.legal_moves()),
        vec![(29, 22), (30, 21), (30, 23)]
    );

    position.apply_move(Move::capture(spot(29), spot(22)));
    assert_eq!(pairs(&position.legal_moves()), vec![(22, 15)]);
    assert!(position.legal_moves_for(spot(30)).is_empty());
    assert!(!position.is_valid(Move::capture(spot(30), spot(23))));
    assert!(position.has_captures());
}

#[test]
fn test_king_continues_backward() {
    let mut position = PositionBuilder::new()
        .kings(Color::White, &[13])
        .men(Color::Black, &[9, 10])
        .build();
    position.apply_move(Move::capture(spot(13), spot(6)));
    assert_eq!(position.turn(), Some(Color::White));
    assert_eq!(position.pending_capture(), Some(spot(6)));

    position.apply_move(Move::capture(spot(6), spot(15)));
    assert_eq!(position.turn(), Some(Color::Black));
    assert_eq!(position.piece_at(spot(15)), Some((Color::White, PieceType::King)));
}

#[test]
fn test_man_does_not_continue_backward() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[13])
        .men(Color::Black, &[9, 10])
        .build();
    position.apply_move(Move::capture(spot(13), spot(6)));
    assert_eq!(position.turn(), Some(Color::Black));
    assert_eq!(position.pending_capture(), None);
}

#[test]
fn test_promotion_creates_king() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[4])
        .men(Color::Black, &[11])
        .build();
    position.apply_move(Move::new(spot(4), spot(0), MoveKind::PROMOTION));
    assert_eq!(position.piece_at(spot(0)), Some((Color::White, PieceType::King)));
    assert!(position.kings().contains(spot(0)));

    let king_turn = PositionBuilder::new()
        .piece(spot(0), Color::White, PieceType::King)
        .build();
    assert_eq!(pairs(&king_turn.legal_moves()), vec![(0, 4), (0, 5)]);
}

#[test]
fn test_promotion_mid_capture_ends_turn() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[9])
        .men(Color::Black, &[6, 7])
        .build();
    position.apply_move(Move::new(spot(9), spot(2), MoveKind::CAPTURE_PROMOTION));

    assert_eq!(position.turn(), Some(Color::Black));
    assert_eq!(position.pending_capture(), None);
    assert_eq!(position.piece_at(spot(2)), Some((Color::White, PieceType::King)));
    assert_eq!(position.piece_at(spot(6)), None);
    assert_eq!(position.piece_at(spot(7)), Some((Color::Black, PieceType::Man)));
}

#[test]
fn test_captured_index_each_direction() {
    let position = PositionBuilder::new()
        .kings(Color::White, &[14])
        .men(Color::Black, &[9, 10, 17, 18])
        .build();
    let cases = [(7, 10), (5, 9), (23, 18), (21, 17)];
    for (to, jumped) in cases {
        let mv = Move::capture(spot(14), spot(to));
        assert_eq!(position.captured_index(mv), Some(spot(jumped)), "14x{to}");
    }
}

#[test]
fn test_captured_index_none_for_steps() {
    let position = Position::starting();
    let mv = Move::normal(spot(21), spot(17));
    assert_eq!(position.captured_index(mv), None);
    assert_eq!(
        position.captured_index(mv).map_or(SPOTS_NUMBER, |s| s.index()),
        SPOTS_NUMBER
    );
}

#[test]
fn test_captured_piece_loses_king_bit() {
    let mut position = PositionBuilder::new()
        .men(Color::White, &[21])
        .kings(Color::Black, &[17])
        .build();
    position.apply_move(Move::capture(spot(21), spot(14)));
    assert!(position.kings().is_empty());
    assert!(position.pieces(Color::Black).is_empty());
}

#[test]
fn test_reset_restores_start() {
    let mut position = Position::starting();
    position.apply_move(Move::normal(spot(22), spot(18)));
    position.reset();
    assert_eq!(position, Position::starting());
}
