use std::fs;
use std::path::Path;

use crate::board::{Board, Color, Piece, PieceKind};
use crate::error::BoardFileError;

/// Loads a board and the side to move from a 9-line text file: a header line
/// (`W`/`w`/`B`/`b`, any second character on that line discarded) followed by
/// 8 board lines, rank 8 first down to rank 1, each exactly 8 characters,
/// file a first. Uppercase letters are White pieces, lowercase are Black, a
/// space is an empty square. Castling rights are inferred from whether the
/// relevant king and rook are still on their starting squares; there is no
/// way to encode an in-flight en-passant capture in this format, so a
/// freshly loaded board never has one.
pub fn load_board(path: impl AsRef<Path>) -> Result<(Board, Color), BoardFileError> {
    let contents = fs::read_to_string(path)?;
    parse_board(&contents)
}

fn parse_board(contents: &str) -> Result<(Board, Color), BoardFileError> {
    let mut lines: Vec<&str> = contents.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len() != 9 {
        return Err(BoardFileError::WrongLineCount(lines.len()));
    }

    let side_to_move = parse_side_to_move(lines[0])?;

    let mut board = Board::empty();
    for (i, line) in lines[1..].iter().enumerate() {
        let row = 8 - i as i32;
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != 8 {
            return Err(BoardFileError::WrongLineLength(8 - i, (*line).to_string()));
        }
        for (col_idx, ch) in chars.into_iter().enumerate() {
            let col = col_idx as i32 + 1;
            if ch == ' ' {
                continue;
            }
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            let kind = match ch.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                other => return Err(BoardFileError::UnknownPieceChar(other)),
            };
            board.set(row, col, Piece::new(kind, color, row, col));
        }
    }

    infer_castling_rights(&mut board);
    Ok((board, side_to_move))
}

fn parse_side_to_move(header: &str) -> Result<Color, BoardFileError> {
    let ch = header.chars().next().ok_or(BoardFileError::MissingHeader)?;
    match ch {
        'W' | 'w' => Ok(Color::White),
        'B' | 'b' => Ok(Color::Black),
        other => Err(BoardFileError::UnknownSideToMove(other)),
    }
}

fn infer_castling_rights(board: &mut Board) {
    let mut rights = board.castling_rights();

    let king_home = |color| match color {
        Color::White => (1, 5),
        Color::Black => (8, 5),
        Color::None => (0, 0),
    };
    let rook_home_kingside = |color| match color {
        Color::White => (1, 8),
        Color::Black => (8, 8),
        Color::None => (0, 0),
    };
    let rook_home_queenside = |color| match color {
        Color::White => (1, 1),
        Color::Black => (8, 1),
        Color::None => (0, 0),
    };

    let king_in_place = |color| {
        let (r, c) = king_home(color);
        let p = board.get(r, c);
        p.kind == PieceKind::King && p.color == color
    };
    let rook_in_place = |home: (i32, i32), color| {
        let p = board.get(home.0, home.1);
        p.kind == PieceKind::Rook && p.color == color
    };

    rights.white_kingside = king_in_place(Color::White) && rook_in_place(rook_home_kingside(Color::White), Color::White);
    rights.white_queenside = king_in_place(Color::White) && rook_in_place(rook_home_queenside(Color::White), Color::White);
    rights.black_kingside = king_in_place(Color::Black) && rook_in_place(rook_home_kingside(Color::Black), Color::Black);
    rights.black_queenside = king_in_place(Color::Black) && rook_in_place(rook_home_queenside(Color::Black), Color::Black);

    board.set_castling_rights(rights);
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTING: &str = "\
W.
rnbqkbnr
pppppppp
        
        
        
        
PPPPPPPP
RNBQKBNR
";

    #[test]
    fn parses_starting_position() {
        let (board, side) = parse_board(STARTING).unwrap();
        assert_eq!(side, Color::White);
        assert_eq!(board.get(1, 5).kind, PieceKind::King);
        assert_eq!(board.get(1, 5).color, Color::White);
        assert_eq!(board.get(8, 4).kind, PieceKind::Queen);
        assert_eq!(board.get(8, 4).color, Color::Black);
        assert!(board.get(4, 4).is_empty());
        assert!(board.castling_rights().white_kingside);
        assert!(board.castling_rights().black_queenside);
    }

    #[test]
    fn reads_black_to_move_header() {
        let black_to_move = STARTING.replacen("W.", "B.", 1);
        let (_, side) = parse_board(&black_to_move).unwrap();
        assert_eq!(side, Color::Black);
    }

    #[test]
    fn rejects_unknown_side_to_move() {
        let bad = STARTING.replacen("W.", "X.", 1);
        let err = parse_board(&bad).unwrap_err();
        assert!(matches!(err, BoardFileError::UnknownSideToMove('X')));
    }

    #[test]
    fn rejects_wrong_line_count() {
        let err = parse_board("W.\nrnbqkbnr\npppppppp\n").unwrap_err();
        assert!(matches!(err, BoardFileError::WrongLineCount(3)));
    }

    #[test]
    fn rejects_wrong_line_length() {
        let bad = STARTING.replacen("pppppppp", "ppppppp", 1);
        let err = parse_board(&bad).unwrap_err();
        assert!(matches!(err, BoardFileError::WrongLineLength(_, _)));
    }

    #[test]
    fn missing_rook_clears_that_sides_rights() {
        let moved_rook = STARTING.replacen("RNBQKBNR", "RNBQKBN ", 1);
        let (board, _) = parse_board(&moved_rook).unwrap();
        assert!(!board.castling_rights().white_kingside);
        assert!(board.castling_rights().white_queenside);
    }
}
