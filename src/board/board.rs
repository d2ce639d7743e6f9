use super::chessmove::Move;
use super::piece::Piece;
use super::square::{Color, PieceKind, Square};

/// Per-color castling rights. Monotone non-increasing over the life of a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

/// The file an opponent pawn just double-pushed onto, capturable en passant
/// on the very next move only. `0` means no such capture is currently legal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EnPassantFiles {
    pub white: i32,
    pub black: i32,
}

/// Everything `Board::undo` needs to exactly reverse a prior `apply`, bundled
/// into one value instead of the four loose parameters of the reference
/// design (move, taken piece, saved rights, saved en-passant files) plus the
/// extra bookkeeping an explicit inverse-move undo needs that a whole-board
/// snapshot would get for free (the piece as it stood before moving, and the
/// castling rook relocation).
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    mv: Move,
    moved_before: Piece,
    taken: Piece,
    taken_square: Square,
    rook_move: Option<(Square, Square)>,
    rights: CastlingRights,
    ep: EnPassantFiles,
}

/// The central aggregate (C1): an 8x8 grid of pieces plus the scalar state
/// that rides alongside it (king cache, castling rights, en-passant files).
#[derive(Clone, Debug)]
pub struct Board {
    grid: [[Piece; 8]; 8],
    white_king: Square,
    black_king: Square,
    rights: CastlingRights,
    ep: EnPassantFiles,
}

const NO_KING: Square = Square { row: 0, col: 0 };

impl Board {
    /// A fully empty board with no castling rights and no kings placed.
    pub fn empty() -> Self {
        let mut grid = [[Piece::empty(0, 0); 8]; 8];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = Piece::empty(r as i32 + 1, c as i32 + 1);
            }
        }
        Board {
            grid,
            white_king: NO_KING,
            black_king: NO_KING,
            rights: CastlingRights {
                white_kingside: false,
                white_queenside: false,
                black_kingside: false,
                black_queenside: false,
            },
            ep: EnPassantFiles::default(),
        }
    }

    /// The canonical starting position.
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        board.rights = CastlingRights::default();

        let back_rank = [
            PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
            PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
        ];
        for (col, kind) in back_rank.iter().enumerate() {
            let col = col as i32 + 1;
            board.set(1, col, Piece::new(*kind, Color::White, 1, col));
            board.set(2, col, Piece::new(PieceKind::Pawn, Color::White, 2, col));
            board.set(7, col, Piece::new(PieceKind::Pawn, Color::Black, 7, col));
            board.set(8, col, Piece::new(*kind, Color::Black, 8, col));
        }
        board
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.rights
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.rights = rights;
    }

    pub fn en_passant_files(&self) -> EnPassantFiles {
        self.ep
    }

    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
            Color::None => NO_KING,
        }
    }

    /// Returns the sentinel `Piece::invalid` for an out-of-range lookup instead
    /// of panicking, so callers walking off the edge of the board can just
    /// check `invalid` rather than bounds-checking every step themselves.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Piece {
        if !Square::new(row, col).in_bounds() {
            return Piece::invalid(row, col);
        }
        self.grid[(row - 1) as usize][(col - 1) as usize]
    }

    pub fn set(&mut self, row: i32, col: i32, piece: Piece) {
        debug_assert!(Square::new(row, col).in_bounds(), "set() requires an on-board square");
        let mut piece = piece;
        piece.row = row;
        piece.col = col;
        piece.invalid = false;
        self.grid[(row - 1) as usize][(col - 1) as usize] = piece;
        if piece.kind == PieceKind::King {
            match piece.color {
                Color::White => self.white_king = Square::new(row, col),
                Color::Black => self.black_king = Square::new(row, col),
                Color::None => {}
            }
        }
    }

    fn clear_rook_corner_rights(&mut self, row: i32, col: i32) {
        match (row, col) {
            (1, 1) => self.rights.white_queenside = false,
            (1, 8) => self.rights.white_kingside = false,
            (8, 1) => self.rights.black_queenside = false,
            (8, 8) => self.rights.black_kingside = false,
            _ => {}
        }
    }

    fn back_rank(color: Color) -> i32 {
        match color {
            Color::White => 8,
            Color::Black => 1,
            Color::None => 0,
        }
    }

    /// Performs `mv` with all of the position state machine's side effects
    /// (castling, en passant, auto-queen promotion, rights bookkeeping) and
    /// returns an `UndoInfo` that reverses them exactly. Does not check
    /// legality; that is `movegen`'s job.
    pub fn apply(&mut self, mv: Move) -> UndoInfo {
        let moved = self.get(mv.row1, mv.col1);
        let mut taken = self.get(mv.row2, mv.col2);
        let mut taken_square = mv.to();

        let saved_rights = self.rights;
        let saved_ep = self.ep;

        // clear both en-passant files; a double push below may reinstate one of them
        self.ep = EnPassantFiles::default();

        // a king move drops both of its color's castling rights
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => { self.rights.white_kingside = false; self.rights.white_queenside = false; }
                Color::Black => { self.rights.black_kingside = false; self.rights.black_queenside = false; }
                Color::None => {}
            }
        }

        // either endpoint landing on a starting-rook corner drops the matching
        // right, whether the mover left that corner or the captured piece stood there
        self.clear_rook_corner_rights(mv.row1, mv.col1);
        self.clear_rook_corner_rights(mv.row2, mv.col2);

        // castling: king moves two files, relocate the corner rook
        let mut rook_move = None;
        if moved.kind == PieceKind::King && (mv.col2 - mv.col1).abs() == 2 {
            let row = mv.row1;
            let (rook_from, rook_to) = if mv.col2 > mv.col1 { (8, 6) } else { (1, 4) };
            let rook = self.get(row, rook_from);
            self.set(row, rook_to, rook);
            self.set(row, rook_from, Piece::empty(row, rook_from));
            rook_move = Some((Square::new(row, rook_from), Square::new(row, rook_to)));
        }

        // en passant: pawn moved diagonally onto an empty square
        if moved.kind == PieceKind::Pawn && mv.col1 != mv.col2 && taken.is_empty() {
            taken_square = Square::new(mv.row1, mv.col2);
            taken = self.get(mv.row1, mv.col2);
        }

        // pawn double push sets the opponent's en-passant file
        if moved.kind == PieceKind::Pawn && (mv.row2 - mv.row1).abs() == 2 {
            match moved.color {
                Color::White => self.ep.black = mv.col1,
                Color::Black => self.ep.white = mv.col1,
                Color::None => {}
            }
        }

        // remove moved from source and taken from its actual square (may
        // differ from the destination for an en passant capture)
        self.set(mv.row1, mv.col1, Piece::empty(mv.row1, mv.col1));
        self.set(taken_square.row, taken_square.col, Piece::empty(taken_square.row, taken_square.col));

        // place the moved piece, auto-queening a pawn that reached the last rank
        if moved.kind == PieceKind::Pawn && mv.row2 == Self::back_rank(moved.color) {
            self.set(mv.row2, mv.col2, Piece::new(PieceKind::Queen, moved.color, mv.row2, mv.col2));
        } else {
            self.set(mv.row2, mv.col2, Piece::new(moved.kind, moved.color, mv.row2, mv.col2));
        }

        UndoInfo { mv, moved_before: moved, taken, taken_square, rook_move, rights: saved_rights, ep: saved_ep }
    }

    /// Restores the grid and all scalar state to exactly what it was before
    /// the `apply` that produced `info`.
    pub fn undo(&mut self, info: UndoInfo) {
        let mv = info.mv;
        self.set(mv.row2, mv.col2, Piece::empty(mv.row2, mv.col2));
        self.set(mv.row1, mv.col1, info.moved_before);
        self.set(info.taken_square.row, info.taken_square.col, info.taken);

        if let Some((from, to)) = info.rook_move {
            let rook = self.get(to.row, to.col);
            self.set(to.row, to.col, Piece::empty(to.row, to.col));
            self.set(from.row, from.col, rook);
        }

        self.rights = info.rights;
        self.ep = info.ep;
    }

    /// Whether `square` is attacked by the opponent of `defender`. Equivalent
    /// to temporarily placing a `defender` king on `square` and testing check,
    /// but computed directly so castling legality can probe arbitrary squares
    /// without mutating the board.
    fn attacked_by_enemy(&self, square: Square, defender: Color) -> bool {
        let enemy = !defender;
        let (row, col) = (square.row, square.col);

        // the enemy pawn threatening `square` sits one row toward its own
        // advancing direction, i.e. the opposite direction the defender's pawns push
        let pawn_row = match defender {
            Color::White => row + 1,
            Color::Black => row - 1,
            Color::None => row,
        };
        for dc in [-1, 1] {
            let p = self.get(pawn_row, col + dc);
            if p.kind == PieceKind::Pawn && p.color == enemy {
                return true;
            }
        }

        const KNIGHT_OFFSETS: [(i32, i32); 8] = [
            (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
        ];
        for (dr, dc) in KNIGHT_OFFSETS {
            let p = self.get(row + dr, col + dc);
            if p.kind == PieceKind::Knight && p.color == enemy {
                return true;
            }
        }

        const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        for (dr, dc) in ORTHOGONAL {
            let mut r = row + dr;
            let mut c = col + dc;
            loop {
                let p = self.get(r, c);
                if p.invalid {
                    break;
                }
                if !p.is_empty() {
                    if p.color == enemy && (p.kind == PieceKind::Rook || p.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }

        const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (dr, dc) in DIAGONAL {
            let mut r = row + dr;
            let mut c = col + dc;
            loop {
                let p = self.get(r, c);
                if p.invalid {
                    break;
                }
                if !p.is_empty() {
                    if p.color == enemy && (p.kind == PieceKind::Bishop || p.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }

        const KING_OFFSETS: [(i32, i32); 8] = [
            (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
        ];
        for (dr, dc) in KING_OFFSETS {
            let p = self.get(row + dr, col + dc);
            if p.kind == PieceKind::King && p.color == enemy {
                return true;
            }
        }

        false
    }

    /// Whether `color`'s king is currently in check. False if `color` has no king.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self.king_square(color);
        if !king.in_bounds() {
            return false;
        }
        self.attacked_by_enemy(king, color)
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        let has_right = match color {
            Color::White => self.rights.white_kingside,
            Color::Black => self.rights.black_kingside,
            Color::None => false,
        };
        if !has_right {
            return false;
        }
        let row = Self::back_rank(color);
        if !self.get(row, 6).is_empty() || !self.get(row, 7).is_empty() {
            return false;
        }
        ![5, 6, 7].into_iter().any(|col| self.attacked_by_enemy(Square::new(row, col), color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        let has_right = match color {
            Color::White => self.rights.white_queenside,
            Color::Black => self.rights.black_queenside,
            Color::None => false,
        };
        if !has_right {
            return false;
        }
        let row = Self::back_rank(color);
        if !self.get(row, 2).is_empty() || !self.get(row, 3).is_empty() || !self.get(row, 4).is_empty() {
            return false;
        }
        ![5, 4, 3].into_iter().any(|col| self.attacked_by_enemy(Square::new(row, col), color))
    }

    /// Pseudo-legal moves for `color`, in fixed board-scan / per-kind order
    /// (row-major by source square, then each piece's own fixed direction
    /// order). Does not filter moves that leave the mover's own king in check.
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 1..=8 {
            for col in 1..=8 {
                let piece = self.get(row, col);
                if piece.color != color {
                    continue;
                }
                match piece.kind {
                    PieceKind::Pawn => self.pawn_moves(row, col, color, &mut moves),
                    PieceKind::Knight => self.offset_moves(row, col, color, &KNIGHT_STEPS, &mut moves),
                    PieceKind::Bishop => self.ray_moves(row, col, color, &DIAGONAL_DIRS, &mut moves),
                    PieceKind::Rook => self.ray_moves(row, col, color, &ORTHOGONAL_DIRS, &mut moves),
                    PieceKind::Queen => {
                        self.ray_moves(row, col, color, &DIAGONAL_DIRS, &mut moves);
                        self.ray_moves(row, col, color, &ORTHOGONAL_DIRS, &mut moves);
                    }
                    PieceKind::King => {
                        self.offset_moves(row, col, color, &KING_STEPS, &mut moves);
                        if self.can_castle_kingside(color) {
                            moves.push(Move::new(row, col, row, col + 2));
                        }
                        if self.can_castle_queenside(color) {
                            moves.push(Move::new(row, col, row, col - 2));
                        }
                    }
                    PieceKind::Empty => {}
                }
            }
        }
        moves
    }

    fn offset_moves(&self, row: i32, col: i32, color: Color, offsets: &[(i32, i32)], out: &mut Vec<Move>) {
        for (dr, dc) in offsets {
            let target = self.get(row + dr, col + dc);
            if target.invalid || target.color == color {
                continue;
            }
            out.push(Move::new(row, col, row + dr, col + dc));
        }
    }

    fn ray_moves(&self, row: i32, col: i32, color: Color, dirs: &[(i32, i32)], out: &mut Vec<Move>) {
        for (dr, dc) in dirs {
            let mut r = row + dr;
            let mut c = col + dc;
            loop {
                let target = self.get(r, c);
                if target.invalid {
                    break;
                }
                if target.color == color {
                    break;
                }
                out.push(Move::new(row, col, r, c));
                if !target.is_empty() {
                    break;
                }
                r += dr;
                c += dc;
            }
        }
    }

    fn pawn_moves(&self, row: i32, col: i32, color: Color, out: &mut Vec<Move>) {
        let (dir, start_row) = match color {
            Color::White => (1, 2),
            Color::Black => (-1, 7),
            Color::None => return,
        };

        let one = self.get(row + dir, col);
        if one.is_empty() && !one.invalid {
            out.push(Move::new(row, col, row + dir, col));
            if row == start_row {
                let two = self.get(row + 2 * dir, col);
                if two.is_empty() && !two.invalid {
                    out.push(Move::new(row, col, row + 2 * dir, col));
                }
            }
        }

        let ep_file = match color {
            Color::White => self.ep.white,
            Color::Black => self.ep.black,
            Color::None => 0,
        };
        for dc in [-1, 1] {
            let target = self.get(row + dir, col + dc);
            if target.invalid {
                continue;
            }
            if !target.is_empty() && target.color == !color {
                out.push(Move::new(row, col, row + dir, col + dc));
            } else if target.is_empty() && ep_file == col + dc && row == start_row_for_ep(color) {
                out.push(Move::new(row, col, row + dir, col + dc));
            }
        }
    }
}

fn start_row_for_ep(color: Color) -> i32 {
    match color {
        Color::White => 5,
        Color::Black => 4,
        Color::None => 0,
    }
}

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
const KING_STEPS: [(i32, i32); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];
const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
