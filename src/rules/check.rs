//! Attack and check detection
//!
//! Attacks are purely geometric: they ignore whether the attacker's own
//! general would be exposed by making the capture.

use crate::board::{Board, Piece, PieceKind, Pos, Side};

/// True if `side`'s general is attacked by any opposing piece.
///
/// Facing generals on an open file count as an attack (flying general), so
/// a position where the mover's general faces the opponent's is "in check".
/// A side with no general on the board is never in check.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    let Some(target) = board.general_pos(side) else {
        return false;
    };

    board
        .pieces(side.opponent())
        .any(|(from, piece)| attacks(board, from, piece, target))
}

/// True if the piece standing on `from` could capture on `target`.
pub fn attacks(board: &Board, from: Pos, piece: Piece, target: Pos) -> bool {
    let dr = target.row() as i8 - from.row() as i8;
    let dc = target.col() as i8 - from.col() as i8;
    if dr == 0 && dc == 0 {
        return false;
    }

    match piece.kind {
        PieceKind::General => {
            let step = dr.abs() + dc.abs() == 1 && target.in_palace(piece.side);
            step || (dc == 0 && count_between(board, from, target) == Some(0) && is_opposing_general(board, target, piece.side))
        }
        PieceKind::Advisor => dr.abs() == 1 && dc.abs() == 1 && target.in_palace(piece.side),
        PieceKind::Elephant => {
            dr.abs() == 2
                && dc.abs() == 2
                && target.on_own_half(piece.side)
                && from.offset(dr / 2, dc / 2).is_some_and(|eye| board.is_empty(eye))
        }
        PieceKind::Horse => {
            let leg = match (dr.abs(), dc.abs()) {
                (2, 1) => (dr / 2, 0),
                (1, 2) => (0, dc / 2),
                _ => return false,
            };
            from.offset(leg.0, leg.1).is_some_and(|p| board.is_empty(p))
        }
        PieceKind::Chariot => count_between(board, from, target) == Some(0),
        PieceKind::Cannon => count_between(board, from, target) == Some(1),
        PieceKind::Soldier => {
            let forward = piece.side.forward();
            (dr == forward && dc == 0)
                || (!from.on_own_half(piece.side) && dr == 0 && dc.abs() == 1)
        }
    }
}

/// True when both generals stand on one file with nothing between them.
pub fn generals_facing(board: &Board) -> bool {
    match (board.general_pos(Side::First), board.general_pos(Side::Second)) {
        (Some(a), Some(b)) => a.col() == b.col() && count_between(board, a, b) == Some(0),
        _ => false,
    }
}

fn is_opposing_general(board: &Board, pos: Pos, side: Side) -> bool {
    board.piece_at(pos) == Some(Piece::new(PieceKind::General, side.opponent()))
}

/// Number of occupied cells strictly between two cells on a shared row or
/// column, or `None` if they are not aligned.
pub(crate) fn count_between(board: &Board, a: Pos, b: Pos) -> Option<usize> {
    let (dr, dc) = if a.row() == b.row() {
        (0, (b.col() as i8 - a.col() as i8).signum())
    } else if a.col() == b.col() {
        ((b.row() as i8 - a.row() as i8).signum(), 0)
    } else {
        return None;
    };

    let mut count = 0;
    let mut cur = a.offset(dr, dc)?;
    while cur != b {
        if !board.is_empty(cur) {
            count += 1;
        }
        cur = cur.offset(dr, dc)?;
    }
    Some(count)
}
