//! Legal move generation
//!
//! # Ordering
//!
//! The order of the returned list is part of the public contract, since
//! drivers bind list positions to policy slots. Cells are scanned in
//! ascending index order (row 0 first, file `a` first). For each piece of
//! the side to move, destinations follow that kind's direction table below;
//! sliding pieces emit destinations nearest-first along each ray. Filtering
//! out self-check keeps the relative order of the survivors.
//!
//! Order is relative to the mover. The second side's list is the first
//! side's list on [`flip`]ped board, mapped back through [`flip_index`], so
//! action `i` on a canonical view names the same move as action `i` on the
//! real board. "Up" below means toward the opponent.
//!
//! Mirroring does not preserve indices: a left-right mirrored board lists
//! the mirrored moves in a different order, which is why symmetry
//! augmentation re-indexes policies move by move.
//!
//! | Kind     | Direction order                                        |
//! |----------|--------------------------------------------------------|
//! | General  | up, right, down, left                                  |
//! | Advisor  | up-left, up-right, down-left, down-right               |
//! | Elephant | up-left, up-right, down-left, down-right (two steps)   |
//! | Horse    | clockwise from two-up-one-left                         |
//! | Chariot  | up, right, down, left                                  |
//! | Cannon   | up, right, down, left                                  |
//! | Soldier  | forward, left, right                                   |

use tracing::{trace, warn};

use super::check::is_in_check;
use crate::board::transform::flip_index;
use crate::board::{flip, Board, Move, MoveList, Piece, PieceKind, Pos, Side, MAX_MOVES};
use crate::error::{EngineError, Result};

/// Orthogonal steps: up, right, down, left
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Diagonal steps: up-left, up-right, down-left, down-right
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse jumps paired with the leg cell that blocks them
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
];

/// Legal moves for `side`.
///
/// With `capture_only` set, only moves landing on an opposing piece are
/// returned. An empty list means the side has no legal move (and has lost).
///
/// # Errors
///
/// [`EngineError::CapacityExceeded`] if more than [`MAX_MOVES`] moves are
/// legal.
pub fn possible_moves(board: &Board, side: Side, capture_only: bool) -> Result<MoveList> {
    match side {
        Side::First => first_side_moves(board, capture_only, side),
        Side::Second => {
            let seen = first_side_moves(&flip(board), capture_only, side)?;
            let mut moves = MoveList::new();
            for mv in &seen {
                moves.try_push(mv.map(flip_index))?;
            }
            Ok(moves)
        }
    }
}

/// Legal first-side moves on `board`. `mover` is the real side, for logs.
fn first_side_moves(board: &Board, capture_only: bool, mover: Side) -> Result<MoveList> {
    let side = Side::First;
    let mut candidates = Vec::with_capacity(MAX_MOVES);
    pseudo_legal_moves(board, side, &mut candidates);

    let mut legal = MoveList::new();
    let mut count = 0usize;
    for mv in candidates {
        if capture_only && !is_capture(board, mv, side) {
            continue;
        }
        if leaves_in_check(board, mv, side) {
            continue;
        }
        count += 1;
        if count > MAX_MOVES {
            continue;
        }
        legal.try_push(mv)?;
    }

    if count > MAX_MOVES {
        warn!(count, capacity = MAX_MOVES, side = %mover, "legal move count exceeds capacity");
        return Err(EngineError::CapacityExceeded {
            count,
            capacity: MAX_MOVES,
        });
    }

    trace!(side = %mover, capture_only, count, "generated legal moves");
    Ok(legal)
}

/// True if `side` has at least one legal move. Stops at the first one found.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    let mut candidates = Vec::with_capacity(MAX_MOVES);
    pseudo_legal_moves(board, side, &mut candidates);
    candidates.into_iter().any(|mv| !leaves_in_check(board, mv, side))
}

/// True if `mv` is legal for `side` on `board`.
pub fn is_legal(board: &Board, side: Side, mv: Move) -> bool {
    let mut candidates = Vec::new();
    match board.piece_at(mv.from()) {
        Some(piece) if piece.side == side => piece_moves(board, mv.from(), piece, &mut candidates),
        _ => return false,
    }
    candidates.contains(&mv) && !leaves_in_check(board, mv, side)
}

#[inline]
fn is_capture(board: &Board, mv: Move, side: Side) -> bool {
    board.is_own(mv.to(), side.opponent())
}

#[inline]
fn leaves_in_check(board: &Board, mv: Move, side: Side) -> bool {
    is_in_check(&board.apply(mv), side)
}

/// Geometric moves for every piece of `side`, before self-check filtering.
pub(crate) fn pseudo_legal_moves(board: &Board, side: Side, out: &mut Vec<Move>) {
    for (from, piece) in board.pieces(side) {
        piece_moves(board, from, piece, out);
    }
}

fn piece_moves(board: &Board, from: Pos, piece: Piece, out: &mut Vec<Move>) {
    let side = piece.side;
    match piece.kind {
        PieceKind::General => gen_steps(board, from, side, &ORTHOGONAL, |to| to.in_palace(side), out),
        PieceKind::Advisor => gen_steps(board, from, side, &DIAGONAL, |to| to.in_palace(side), out),
        PieceKind::Elephant => gen_elephant(board, from, side, out),
        PieceKind::Horse => gen_horse(board, from, side, out),
        PieceKind::Chariot => gen_chariot(board, from, side, out),
        PieceKind::Cannon => gen_cannon(board, from, side, out),
        PieceKind::Soldier => gen_soldier(board, from, side, out),
    }
}

/// Push `from -> to` unless `to` holds a piece of the mover's side
#[inline]
fn try_add(board: &Board, from: Pos, to: Pos, side: Side, out: &mut Vec<Move>) {
    if !board.is_own(to, side) {
        out.push(Move::new(from, to));
    }
}

/// Single steps filtered by a zone predicate (general and advisor)
fn gen_steps(
    board: &Board,
    from: Pos,
    side: Side,
    steps: &[(i8, i8)],
    allowed: impl Fn(Pos) -> bool,
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in steps {
        if let Some(to) = from.offset(dr, dc) {
            if allowed(to) {
                try_add(board, from, to, side, out);
            }
        }
    }
}

fn gen_elephant(board: &Board, from: Pos, side: Side, out: &mut Vec<Move>) {
    for &(dr, dc) in &DIAGONAL {
        let Some(to) = from.offset(dr * 2, dc * 2) else {
            continue;
        };
        if !to.on_own_half(side) {
            continue;
        }
        // Blocked eye
        match from.offset(dr, dc) {
            Some(eye) if board.is_empty(eye) => try_add(board, from, to, side, out),
            _ => {}
        }
    }
}

fn gen_horse(board: &Board, from: Pos, side: Side, out: &mut Vec<Move>) {
    for &((dr, dc), (lr, lc)) in &HORSE_JUMPS {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match from.offset(lr, lc) {
            Some(leg) if board.is_empty(leg) => try_add(board, from, to, side, out),
            _ => {}
        }
    }
}

fn gen_chariot(board: &Board, from: Pos, side: Side, out: &mut Vec<Move>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            if board.is_empty(to) {
                out.push(Move::new(from, to));
            } else {
                try_add(board, from, to, side, out);
                break;
            }
            cur = to;
        }
    }
}

fn gen_cannon(board: &Board, from: Pos, side: Side, out: &mut Vec<Move>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut cur = from;
        let mut screened = false;
        while let Some(to) = cur.offset(dr, dc) {
            if board.is_empty(to) {
                if !screened {
                    out.push(Move::new(from, to));
                }
            } else if screened {
                try_add(board, from, to, side, out);
                break;
            } else {
                screened = true;
            }
            cur = to;
        }
    }
}

fn gen_soldier(board: &Board, from: Pos, side: Side, out: &mut Vec<Move>) {
    if let Some(to) = from.offset(side.forward(), 0) {
        try_add(board, from, to, side, out);
    }

    if !from.on_own_half(side) {
        for dc in [-1, 1] {
            if let Some(to) = from.offset(0, dc) {
                try_add(board, from, to, side, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::check::generals_facing;

    fn general(side: Side) -> Piece {
        Piece::new(PieceKind::General, side)
    }

    fn piece(kind: PieceKind, side: Side) -> Piece {
        Piece::new(kind, side)
    }

    fn moves_from(list: &MoveList, from: Pos) -> Vec<Pos> {
        list.iter().filter(|m| m.from() == from).map(|m| m.to()).collect()
    }

    #[test]
    fn test_opening_move_count() {
        let board = Board::initial();
        assert_eq!(possible_moves(&board, Side::First, false).unwrap().len(), 44);
        assert_eq!(possible_moves(&board, Side::Second, false).unwrap().len(), 44);
    }

    #[test]
    fn test_opening_captures() {
        // Only the cannons can capture: each takes the opposing horse
        let board = Board::initial();
        let captures = possible_moves(&board, Side::First, true).unwrap();
        assert_eq!(
            captures.as_slice(),
            &[
                Move::new(Pos::at(7, 1), Pos::at(0, 1)),
                Move::new(Pos::at(7, 7), Pos::at(0, 7)),
            ]
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let board = Board::initial();
        let a = possible_moves(&board, Side::First, false).unwrap();
        let b = possible_moves(&board.clone(), Side::First, false).unwrap();
        assert_eq!(a, b);

        // Cells are visited in ascending order
        let origins: Vec<usize> = a.iter().map(|m| m.from().to_index()).collect();
        let mut sorted = origins.clone();
        sorted.sort();
        assert_eq!(origins, sorted);
    }

    #[test]
    fn test_opening_horse_moves() {
        let list = possible_moves(&Board::initial(), Side::First, false).unwrap();
        // Horse on b9: the c7 jump and the a7 jump; d8 is blocked by the elephant leg
        assert_eq!(moves_from(&list, Pos::at(9, 1)), vec![Pos::at(7, 0), Pos::at(7, 2)]);
    }

    #[test]
    fn test_opening_cannon_moves() {
        let list = possible_moves(&Board::initial(), Side::First, false).unwrap();
        let targets = moves_from(&list, Pos::at(7, 1));
        // up x4 then the capture over the screen, right x5, down x1, left x1
        assert_eq!(targets.len(), 12);
        assert_eq!(targets[0], Pos::at(6, 1));
        assert_eq!(targets[4], Pos::at(0, 1));
        assert_eq!(*targets.last().unwrap(), Pos::at(7, 0));
    }

    #[test]
    fn test_elephant_cannot_cross_river() {
        let board = Board::from_pieces([
            (Pos::at(9, 4), general(Side::First)),
            (Pos::at(0, 3), general(Side::Second)),
            (Pos::at(5, 2), piece(PieceKind::Elephant, Side::First)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();
        assert_eq!(moves_from(&list, Pos::at(5, 2)), vec![Pos::at(7, 0), Pos::at(7, 4)]);
    }

    #[test]
    fn test_elephant_eye_blocked() {
        let board = Board::from_pieces([
            (Pos::at(9, 4), general(Side::First)),
            (Pos::at(0, 3), general(Side::Second)),
            (Pos::at(7, 4), piece(PieceKind::Elephant, Side::First)),
            (Pos::at(8, 3), piece(PieceKind::Soldier, Side::Second)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();
        assert_eq!(
            moves_from(&list, Pos::at(7, 4)),
            vec![Pos::at(5, 2), Pos::at(5, 6), Pos::at(9, 6)]
        );
    }

    #[test]
    fn test_soldier_moves() {
        let board = Board::from_pieces([
            (Pos::at(9, 4), general(Side::First)),
            (Pos::at(0, 3), general(Side::Second)),
            (Pos::at(6, 0), piece(PieceKind::Soldier, Side::First)),
            (Pos::at(4, 6), piece(PieceKind::Soldier, Side::First)),
            (Pos::at(0, 8), piece(PieceKind::Soldier, Side::First)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();

        // Before the river: forward only
        assert_eq!(moves_from(&list, Pos::at(6, 0)), vec![Pos::at(5, 0)]);
        // Across the river: forward, left, right
        assert_eq!(
            moves_from(&list, Pos::at(4, 6)),
            vec![Pos::at(3, 6), Pos::at(4, 5), Pos::at(4, 7)]
        );
        // Last rank: sideways only, never backward
        assert_eq!(moves_from(&list, Pos::at(0, 8)), vec![Pos::at(0, 7)]);
    }

    #[test]
    fn test_general_confined_to_palace() {
        let board = Board::from_pieces([
            (Pos::at(7, 3), general(Side::First)),
            (Pos::at(0, 5), general(Side::Second)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();
        assert_eq!(moves_from(&list, Pos::at(7, 3)), vec![Pos::at(7, 4), Pos::at(8, 3)]);
    }

    #[test]
    fn test_flying_general_excluded() {
        // Stepping onto the e-file would face the opposing general
        let board = Board::from_pieces([
            (Pos::at(9, 3), general(Side::First)),
            (Pos::at(0, 4), general(Side::Second)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();
        let targets = moves_from(&list, Pos::at(9, 3));
        assert_eq!(targets, vec![Pos::at(8, 3)]);

        for mv in &list {
            assert!(!generals_facing(&board.apply(*mv)));
        }
    }

    #[test]
    fn test_pinned_screen_cannot_leave_file() {
        // The chariot is the only piece between the generals
        let board = Board::from_pieces([
            (Pos::at(9, 4), general(Side::First)),
            (Pos::at(0, 4), general(Side::Second)),
            (Pos::at(5, 4), piece(PieceKind::Chariot, Side::First)),
        ])
        .unwrap();
        let list = possible_moves(&board, Side::First, false).unwrap();
        let chariot = moves_from(&list, Pos::at(5, 4));
        assert!(chariot.iter().all(|p| p.col() == 4));
        assert!(chariot.contains(&Pos::at(0, 4)));
    }

    #[test]
    fn test_must_resolve_check() {
        let board = Board::from_pieces([
            (Pos::at(9, 4), general(Side::First)),
            (Pos::at(0, 4), general(Side::Second)),
            (Pos::at(5, 4), piece(PieceKind::Chariot, Side::Second)),
            (Pos::at(9, 0), piece(PieceKind::Chariot, Side::First)),
        ])
        .unwrap();
        assert!(is_in_check(&board, Side::First));

        let list = possible_moves(&board, Side::First, false).unwrap();
        for mv in &list {
            assert!(!is_in_check(&board.apply(*mv), Side::First));
        }
        // Sideways steps out of the file escape; the chariot cannot help
        assert_eq!(
            list.as_slice(),
            &[
                Move::new(Pos::at(9, 4), Pos::at(9, 5)),
                Move::new(Pos::at(9, 4), Pos::at(9, 3)),
            ]
        );
    }

    #[test]
    fn test_second_side_order_follows_flipped_view() {
        let board = Board::initial().apply(Move::new(Pos::at(9, 1), Pos::at(7, 2)));
        let real = possible_moves(&board, Side::Second, false).unwrap();
        let seen = possible_moves(&flip(&board), Side::First, false).unwrap();

        assert_eq!(real.len(), seen.len());
        for (r, s) in real.iter().zip(seen.iter()) {
            assert_eq!(*r, s.map(flip_index));
        }
        // a6a5 on the view is the i3 soldier stepping forward
        assert_eq!(real[0], Move::new(Pos::at(3, 8), Pos::at(4, 8)));

        let captures = possible_moves(&board, Side::Second, true).unwrap();
        let expected: Vec<Move> = real
            .iter()
            .copied()
            .filter(|mv| board.is_own(mv.to(), Side::First))
            .collect();
        assert_eq!(captures.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_is_legal() {
        let board = Board::initial();
        assert!(is_legal(&board, Side::First, Move::new(Pos::at(9, 1), Pos::at(7, 2))));
        assert!(!is_legal(&board, Side::First, Move::new(Pos::at(9, 1), Pos::at(8, 3))));
        assert!(!is_legal(&board, Side::Second, Move::new(Pos::at(9, 1), Pos::at(7, 2))));
        assert!(!is_legal(&board, Side::First, Move::new(Pos::at(5, 0), Pos::at(4, 0))));
    }

    #[test]
    fn test_has_legal_move() {
        assert!(has_legal_move(&Board::initial(), Side::First));

        // Bare general in the corner of its palace, every step covered
        let board = Board::from_pieces([
            (Pos::at(9, 3), general(Side::First)),
            (Pos::at(0, 4), general(Side::Second)),
            (Pos::at(8, 0), piece(PieceKind::Chariot, Side::Second)),
        ])
        .unwrap();
        assert!(!has_legal_move(&board, Side::First));
        assert!(possible_moves(&board, Side::First, false).unwrap().is_empty());
    }
}
