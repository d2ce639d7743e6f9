use arrayvec::ArrayVec;

use crate::board::{Board, Color, Move};

/// A legal move paired with the depth-1 lookahead score `search` uses to
/// order the root move list before the full-depth search begins. Zero until
/// `search::order_by_pre_score` fills it in.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub pre_score: f64,
    pub mv: Move,
}

/// Legal moves for `color` in `board`, in the fixed order `Board::pseudo_legal_moves`
/// produces (row-major by source square, then each piece kind's own direction
/// order), filtered to only those that do not leave the mover's own king in check.
pub fn generate_all(board: &Board, color: Color) -> ArrayVec<ScoredMove, 256> {
    let mut result = ArrayVec::new();
    let mut scratch = board.clone();
    for mv in board.pseudo_legal_moves(color) {
        let info = scratch.apply(mv);
        let leaves_own_king_in_check = scratch.in_check(color);
        scratch.undo(info);
        if !leaves_own_king_in_check {
            result.push(ScoredMove { pre_score: 0.0, mv });
        }
    }
    result
}

/// The number of legal moves `color` has in `board`. Checkmate and stalemate
/// are both exactly the positions where this is zero; `search` tells them
/// apart with `Board::in_check`.
pub fn count_all(board: &Board, color: Color) -> usize {
    generate_all(board, color).len()
}
