use crate::board::{Board, Color, Move, PieceKind};
use crate::error::MoveParseError;
use crate::movegen;

/// Renders `board` as an 8x8 ASCII grid, rank 8 at the top, with file/rank
/// labels. Uppercase letters are White, lowercase are Black, `.` is empty.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in (1..=8).rev() {
        out.push_str(&row.to_string());
        out.push(' ');
        for col in 1..=8 {
            let piece = board.get(row, col);
            out.push(piece_char(piece.kind, piece.color));
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

fn piece_char(kind: PieceKind, color: Color) -> char {
    let ch = match kind {
        PieceKind::Empty => return '.',
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    if color == Color::White { ch.to_ascii_uppercase() } else { ch }
}

/// The protocol line printed after each engine turn: `Best move: e2e4 , 0.35`.
/// A `None` move (mate or stalemate already reached) prints `(none)`.
pub fn print_best_move(mv: Option<Move>, score: f64) {
    let mv_str = mv.map(|m| m.to_string()).unwrap_or_else(|| "(none)".to_string());
    println!("Best move: {mv_str} , {score:.2}");
}

fn square_from_chars(file: char, rank: char) -> Result<(i32, i32), MoveParseError> {
    if !file.is_ascii_alphabetic() || !('1'..='8').contains(&rank) {
        return Err(MoveParseError::BadSquare(format!("{file}{rank}")));
    }
    let col = (file.to_ascii_lowercase() as i32) - ('a' as i32) + 1;
    let row = rank as i32 - '0' as i32;
    if !(1..=8).contains(&col) {
        return Err(MoveParseError::BadSquare(format!("{file}{rank}")));
    }
    Ok((row, col))
}

/// Parses a human's typed move. Accepts plain coordinate notation (`e2e4`)
/// and a simplified algebraic form of `<piece letter><destination>`
/// (`Nf3`); pawn moves omit the piece letter (`e4`, destination only).
/// When an algebraic form matches more than one legal move, `disambiguate`
/// is called with the candidates and must return the chosen index (or
/// `None` to abort, surfaced as `MoveParseError::AbortedDisambiguation`).
/// An empty (whitespace-only) `input` is the caller's quit signal and is
/// reported as `MoveParseError::Empty` rather than silently treated as a move.
pub fn parse_move(
    input: &str,
    board: &Board,
    color: Color,
    mut disambiguate: impl FnMut(&[Move]) -> Option<usize>,
) -> Result<Move, MoveParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MoveParseError::Empty);
    }

    let chars: Vec<char> = input.chars().collect();

    // coordinate notation: e2e4 (trailing promotion letter, if any, is ignored
    // since promotion is always to a queen)
    if chars.len() >= 4 && chars[0].is_ascii_alphabetic() && chars[1].is_ascii_digit() {
        if let (Ok((r1, c1)), Ok((r2, c2))) =
            (square_from_chars(chars[0], chars[1]), square_from_chars(chars[2], chars[3]))
        {
            return Ok(Move::new(r1, c1, r2, c2));
        }
    }

    let (piece_kind, dest_chars) = match chars[0] {
        'N' => (PieceKind::Knight, &chars[1..]),
        'B' => (PieceKind::Bishop, &chars[1..]),
        'R' => (PieceKind::Rook, &chars[1..]),
        'Q' => (PieceKind::Queen, &chars[1..]),
        'K' => (PieceKind::King, &chars[1..]),
        _ => (PieceKind::Pawn, &chars[..]),
    };
    if dest_chars.len() < 2 {
        return Err(MoveParseError::BadSquare(input.to_string()));
    }
    let (dest_row, dest_col) = square_from_chars(dest_chars[0], dest_chars[1])?;

    let candidates: Vec<Move> = movegen::generate_all(board, color)
        .into_iter()
        .map(|sm| sm.mv)
        .filter(|mv| {
            mv.row2 == dest_row && mv.col2 == dest_col && board.get(mv.row1, mv.col1).kind == piece_kind
        })
        .collect();

    match candidates.len() {
        0 => Err(MoveParseError::NoSuchMove(input.to_string())),
        1 => Ok(candidates[0]),
        _ => {
            let chosen = disambiguate(&candidates).ok_or(MoveParseError::AbortedDisambiguation)?;
            candidates.get(chosen).copied().ok_or(MoveParseError::AbortedDisambiguation)
        }
    }
}
