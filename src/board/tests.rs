use super::*;
use crate::error::{BoardError, EngineError};

#[test]
fn test_side_opponent() {
    assert_eq!(Side::First.opponent(), Side::Second);
    assert_eq!(Side::Second.opponent(), Side::First);
    assert_eq!(Side::from_sign(1), Some(Side::First));
    assert_eq!(Side::from_sign(-1), Some(Side::Second));
    assert_eq!(Side::from_sign(0), None);
}

#[test]
fn test_board_constants() {
    assert_eq!(ROWS, 10);
    assert_eq!(COLS, 9);
    assert_eq!(BOARD_SIZE, 90);
    assert_eq!(MAX_MOVES, 112);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::at(9, 4); // First general's start
    assert_eq!(pos.to_index(), 85);
    assert_eq!(Pos::from_index(85), pos);
    assert_eq!(Pos::try_from_index(89), Ok(Pos::at(9, 8)));
    assert_eq!(
        Pos::try_from_index(90),
        Err(EngineError::InvalidIndex { index: 90 })
    );
}

#[test]
fn test_pos_new_rejects_off_board() {
    let pos = Pos::new(7, 2).unwrap();
    assert_eq!((pos.row(), pos.col()), (7, 2));
    assert_eq!(Pos::new(9, 8), Ok(Pos::at(9, 8)));
    assert_eq!(Pos::new(10, 0), Err(EngineError::InvalidIndex { index: 90 }));
    assert_eq!(Pos::new(0, 9), Err(EngineError::InvalidIndex { index: 9 }));
    // Far off-board rows must not wrap into another cell when packed
    assert_eq!(Pos::new(28, 4), Err(EngineError::InvalidIndex { index: 256 }));
    assert!(Pos::new(255, 255).is_err());
}

#[test]
fn test_pos_offset_and_zones() {
    let pos = Pos::at(0, 0);
    assert_eq!(pos.offset(-1, 0), None);
    assert_eq!(pos.offset(1, 2), Some(Pos::at(1, 2)));

    assert!(Pos::at(8, 4).in_palace(Side::First));
    assert!(!Pos::at(8, 4).in_palace(Side::Second));
    assert!(Pos::at(0, 3).in_palace(Side::Second));
    assert!(!Pos::at(1, 6).in_palace(Side::Second));

    assert!(Pos::at(5, 0).on_own_half(Side::First));
    assert!(!Pos::at(4, 0).on_own_half(Side::First));
    assert!(Pos::at(4, 0).on_own_half(Side::Second));
}

#[test]
fn test_piece_codes() {
    for kind in PieceKind::ALL {
        for side in [Side::First, Side::Second] {
            let piece = Piece::new(kind, side);
            assert_eq!(Piece::from_code(piece.code()), Some(piece));
        }
    }
    assert_eq!(Piece::from_code(0), None);
    assert_eq!(Piece::from_code(8), None);
    assert_eq!(Piece::from_code(i8::MIN), None);
    assert_eq!(Piece::new(PieceKind::Chariot, Side::Second).code(), -5);
    assert_eq!(Piece::new(PieceKind::Horse, Side::Second).glyph(), 'h');
}

#[test]
fn test_initial_layout() {
    let board = Board::initial();
    assert_eq!(board.occupied_count(), 32);
    assert_eq!(board.general_pos(Side::First), Some(Pos::at(9, 4)));
    assert_eq!(board.general_pos(Side::Second), Some(Pos::at(0, 4)));

    let expected_counts = [
        (PieceKind::General, 1),
        (PieceKind::Advisor, 2),
        (PieceKind::Elephant, 2),
        (PieceKind::Horse, 2),
        (PieceKind::Chariot, 2),
        (PieceKind::Cannon, 2),
        (PieceKind::Soldier, 5),
    ];
    for (kind, count) in expected_counts {
        for side in [Side::First, Side::Second] {
            assert_eq!(board.piece_count(Piece::new(kind, side)), count, "{kind:?} {side}");
        }
    }

    assert_eq!(&board.cells()[..9], &[-5, -4, -3, -2, -1, -2, -3, -4, -5]);
    assert_eq!(&board.cells()[81..], &[5, 4, 3, 2, 1, 2, 3, 4, 5]);
    assert_eq!(board.piece_at(Pos::at(7, 1)), Some(Piece::new(PieceKind::Cannon, Side::First)));
    assert_eq!(board.piece_at(Pos::at(3, 8)), Some(Piece::new(PieceKind::Soldier, Side::Second)));
}

#[test]
fn test_initial_is_independent_copy() {
    let a = Board::initial();
    let b = Board::initial();
    assert_eq!(a, b);

    // Moving on one copy never affects the other or the cached layout
    let moved = a.apply(Move::new(Pos::at(6, 0), Pos::at(5, 0)));
    assert_ne!(moved, b);
    assert_eq!(a, b);
    assert_eq!(Board::initial(), b);
}

#[test]
fn test_apply_move_capture() {
    let board = Board::initial();
    // First cannon takes the second horse on b0
    let mv = Move::new(Pos::at(7, 1), Pos::at(0, 1));
    let next = board.apply(mv);

    assert!(next.is_empty(Pos::at(7, 1)));
    assert_eq!(next.piece_at(Pos::at(0, 1)), Some(Piece::new(PieceKind::Cannon, Side::First)));
    assert_eq!(next.occupied_count(), 31);
    assert_eq!(next.piece_count(Piece::new(PieceKind::Horse, Side::Second)), 1);
}

#[test]
fn test_from_cells_validation() {
    let cells = *Board::initial().cells();
    assert_eq!(Board::from_cells(&cells), Ok(Board::initial()));

    assert_eq!(
        Board::from_cells(&cells[..89]),
        Err(EngineError::MalformedBoard(BoardError::WrongCellCount(89)))
    );

    let mut bad = cells;
    bad[40] = 9;
    assert_eq!(
        Board::from_cells(&bad),
        Err(EngineError::MalformedBoard(BoardError::InvalidPieceCode { index: 40, code: 9 }))
    );

    let mut no_general = cells;
    no_general[4] = 0;
    assert_eq!(
        Board::from_cells(&no_general),
        Err(EngineError::MalformedBoard(BoardError::MissingGeneral(Side::Second)))
    );

    let mut two_generals = cells;
    two_generals[76] = 1;
    assert_eq!(
        Board::from_cells(&two_generals),
        Err(EngineError::MalformedBoard(BoardError::DuplicateGeneral(Side::First)))
    );
}

#[test]
fn test_from_pieces() {
    let board = Board::from_pieces([
        (Pos::at(9, 4), Piece::new(PieceKind::General, Side::First)),
        (Pos::at(0, 3), Piece::new(PieceKind::General, Side::Second)),
        (Pos::at(5, 5), Piece::new(PieceKind::Chariot, Side::First)),
    ])
    .unwrap();

    assert_eq!(board.occupied_count(), 3);
    let first: Vec<_> = board.pieces(Side::First).map(|(pos, _)| pos).collect();
    assert_eq!(first, vec![Pos::at(5, 5), Pos::at(9, 4)]);

    let err = Board::from_pieces([(Pos::at(9, 4), Piece::new(PieceKind::General, Side::First))]);
    assert_eq!(err, Err(EngineError::MalformedBoard(BoardError::MissingGeneral(Side::Second))));
}
