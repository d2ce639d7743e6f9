use crate::board::{Board, Color, Move};
use crate::comm::Group;
use crate::evaluation;
use crate::movegen::{self, ScoredMove};
use crate::types::MATE_THRESHOLD;

fn identity_for(color: Color) -> f64 {
    match color {
        Color::White => f64::NEG_INFINITY,
        Color::Black => f64::INFINITY,
        Color::None => 0.0,
    }
}

/// The non-restricting sentinel passed as `alpha` into the root call. Inverted
/// from the textbook maximizer/minimizer seed: this `alpha` is a cutoff
/// ceiling/floor threaded down from the parent, not a value being improved
/// from below, so a root call (which has no parent) must pass a value its
/// own node can never cross by accident.
fn root_alpha(color: Color) -> f64 {
    match color {
        Color::White => f64::INFINITY,
        Color::Black => f64::NEG_INFINITY,
        Color::None => 0.0,
    }
}

/// Whether `candidate` replaces `current` as the local best. Ties favor the
/// later move in scan order, matching the reduce's tie-break by compressed
/// move value on the way out (`ThreadGroup::all_reduce_argmax`/`argmin`), so
/// a single-worker (serial) run and a multi-worker run agree on equal scores.
fn is_better(color: Color, candidate: f64, current: f64) -> bool {
    match color {
        Color::White => candidate >= current,
        Color::Black => candidate <= current,
        Color::None => false,
    }
}

/// Whether `local_best` has already crossed the bound the parent passed down,
/// meaning the parent will never select this branch regardless of what else
/// it finds here — the single-sided alpha cutoff.
fn crosses(color: Color, local_best: f64, alpha: f64) -> bool {
    match color {
        Color::White => local_best >= alpha,
        Color::Black => local_best <= alpha,
        Color::None => false,
    }
}

/// Scores a position with no legal moves for `color`: a mate if `color` is
/// in check (biased by remaining depth so a shorter forced mate always
/// outscores one found deeper in the tree), a flat draw otherwise.
fn terminal_score(board: &Board, color: Color, depth: u32) -> f64 {
    if board.in_check(color) {
        let magnitude = MATE_THRESHOLD + depth as f64;
        if color == Color::White { -magnitude } else { magnitude }
    } else {
        0.0
    }
}

/// One ply of lookahead used only to order root moves: apply the move, then
/// take the resulting position's flat static score. Ordering only affects
/// which branches get explored first, not correctness.
fn order_by_pre_score(board: &Board, color: Color, moves: &mut [ScoredMove]) {
    for scored in moves.iter_mut() {
        let mut scratch = board.clone();
        let info = scratch.apply(scored.mv);
        scored.pre_score = evaluation::score(&scratch);
        scratch.undo(info);
    }
    if color == Color::White {
        moves.sort_unstable_by(|a, b| b.pre_score.partial_cmp(&a.pre_score).unwrap());
    } else {
        moves.sort_unstable_by(|a, b| a.pre_score.partial_cmp(&b.pre_score).unwrap());
    }
}

/// Splits `group` over `moves` (one subgroup per move if there are enough
/// workers to go around, otherwise each worker round-robins its own subset
/// as a singleton group), recurses into `evaluate` for each, and combines
/// every member's local best via the group's collective reduce.
fn search_and_combine(
    board: &Board,
    color: Color,
    depth: u32,
    alpha: f64,
    group: &dyn Group,
    moves: &[ScoredMove],
) -> (f64, Option<Move>) {
    let num_groups = moves.len().min(group.size());
    let my_group_index = group.group_index(num_groups);
    let sub_group = group.split(num_groups, my_group_index);

    let mut local_best = identity_for(color);
    let mut local_best_move: Option<Move> = None;
    let mut scratch = board.clone();

    for (i, scored) in moves.iter().enumerate() {
        if i % num_groups != my_group_index {
            continue;
        }
        let info = scratch.apply(scored.mv);
        let child_score = evaluate(&scratch, !color, depth - 1, local_best, sub_group.as_ref());
        scratch.undo(info);

        if is_better(color, child_score, local_best) {
            local_best = child_score;
            local_best_move = Some(scored.mv);
        }
        if crosses(color, local_best, alpha) {
            break;
        }
    }

    let seed_bits = local_best_move.map(Move::compress).unwrap_or(0) as i32;
    let (best_score, best_bits) = match color {
        Color::White => group.all_reduce_argmax((local_best, seed_bits)),
        Color::Black => group.all_reduce_argmin((local_best, seed_bits)),
        Color::None => (local_best, seed_bits),
    };

    (best_score, Move::from_compressed(best_bits as u32))
}

/// The root of a fixed-depth search: generates every legal move for `color`,
/// orders them by a one-ply lookahead, then distributes the ordered list
/// across `group` and combines the result. Returns `(score, None)` for
/// checkmate or stalemate.
pub fn find_best(board: &Board, color: Color, depth: u32, group: &dyn Group) -> (f64, Option<Move>) {
    let mut moves: Vec<ScoredMove> = movegen::generate_all(board, color).into_iter().collect();
    if moves.is_empty() {
        return (terminal_score(board, color, depth), None);
    }
    order_by_pre_score(board, color, &mut moves);
    search_and_combine(board, color, depth, root_alpha(color), group, &moves)
}

/// The recursive half of the mutual pair: scores a non-root node, bottoming
/// out at `depth == 0` with the static evaluator and at a position with no
/// legal moves with `terminal_score`.
fn evaluate(board: &Board, color: Color, depth: u32, alpha: f64, group: &dyn Group) -> f64 {
    let moves: Vec<ScoredMove> = movegen::generate_all(board, color).into_iter().collect();
    if moves.is_empty() {
        return terminal_score(board, color, depth);
    }
    if depth == 0 {
        return evaluation::score(board);
    }
    search_and_combine(board, color, depth, alpha, group, &moves).0
}
