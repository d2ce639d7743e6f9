use swarmate::board::{Board, Color, Move, Piece, PieceKind};
use swarmate::comm::SerialGroup;
use swarmate::{movegen, search};

/// S1: Scholar's mate. 1.e4 e5 2.Qh5 Nc6 3.Bc4 Nf6?? 4.Qxf7# — the queen on
/// f7 is shielded by the bishop on c4, and the black queen still sitting on
/// d8 blocks the only otherwise-uncovered flight square.
#[test]
fn scholars_mate_is_checkmate() {
    let mut board = Board::starting_position();
    let moves = [
        Move::new(2, 5, 4, 5), // e2e4
        Move::new(7, 5, 5, 5), // e7e5
        Move::new(1, 4, 5, 8), // Qd1h5
        Move::new(8, 2, 6, 3), // Nb8c6
        Move::new(1, 6, 4, 3), // Bf1c4
        Move::new(8, 7, 6, 6), // Ng8f6
        Move::new(5, 8, 7, 6), // Qh5xf7#
    ];
    for mv in moves {
        board.apply(mv);
    }

    assert!(board.in_check(Color::Black));
    assert_eq!(movegen::count_all(&board, Color::Black), 0);

    let group = SerialGroup;
    let (score, mv) = search::find_best(&board, Color::Black, 2, &group);
    assert_eq!(mv, None);
    assert!(score > 500.0, "black is mated, the position favors white, score should be large and positive, got {score}");
}

/// S2: stalemate — white to move, not in check, and no legal move exists.
#[test]
fn stalemate_scenario() {
    let mut board = Board::empty();
    board.set(1, 1, Piece::new(PieceKind::King, Color::White, 1, 1));
    board.set(3, 2, Piece::new(PieceKind::King, Color::Black, 3, 2));
    board.set(2, 3, Piece::new(PieceKind::Queen, Color::Black, 2, 3));

    assert!(!board.in_check(Color::White));
    assert_eq!(movegen::count_all(&board, Color::White), 0);

    let group = SerialGroup;
    let (score, mv) = search::find_best(&board, Color::White, 3, &group);
    assert_eq!(mv, None);
    assert_eq!(score, 0.0);
}

/// S3: a forced back-rank checkmate found by the searcher itself, not just
/// verified after the fact.
#[test]
fn back_rank_checkmate_is_found_by_search() {
    let mut board = Board::empty();
    board.set(1, 1, Piece::new(PieceKind::King, Color::White, 1, 1));
    board.set(8, 7, Piece::new(PieceKind::King, Color::Black, 8, 7));
    board.set(7, 6, Piece::new(PieceKind::Pawn, Color::Black, 7, 6));
    board.set(7, 7, Piece::new(PieceKind::Pawn, Color::Black, 7, 7));
    board.set(7, 8, Piece::new(PieceKind::Pawn, Color::Black, 7, 8));
    board.set(1, 4, Piece::new(PieceKind::Rook, Color::White, 1, 4));

    let group = SerialGroup;
    let (score, mv) = search::find_best(&board, Color::White, 2, &group);
    assert_eq!(mv, Some(Move::new(1, 4, 8, 4)));

    board.apply(mv.unwrap());
    assert!(board.in_check(Color::Black));
    assert_eq!(movegen::count_all(&board, Color::Black), 0);
    assert!(score > 500.0);
}

/// S4: en passant. Black double-pushes a pawn past the white pawn's
/// attacking rank, white captures onto the skipped square, and the captured
/// pawn disappears from its own square rather than the destination.
#[test]
fn en_passant_capture() {
    let mut board = Board::empty();
    board.set(1, 5, Piece::new(PieceKind::King, Color::White, 1, 5));
    board.set(8, 5, Piece::new(PieceKind::King, Color::Black, 8, 5));
    board.set(5, 5, Piece::new(PieceKind::Pawn, Color::White, 5, 5)); // e5
    board.set(7, 4, Piece::new(PieceKind::Pawn, Color::Black, 7, 4)); // d7

    let double_push = Move::new(7, 4, 5, 4); // d7d5
    assert!(movegen::generate_all(&board, Color::Black).iter().any(|sm| sm.mv == double_push));
    board.apply(double_push);
    assert_eq!(board.en_passant_files().white, 4);

    let capture = Move::new(5, 5, 6, 4); // e5xd6 e.p.
    assert!(movegen::generate_all(&board, Color::White).iter().any(|sm| sm.mv == capture));
    board.apply(capture);

    assert_eq!(board.get(6, 4).kind, PieceKind::Pawn);
    assert_eq!(board.get(6, 4).color, Color::White);
    assert!(board.get(5, 4).is_empty(), "the captured pawn must vanish from its own square, not the destination");
}

/// S5: castling blocked by attack. White has the right and an empty path to
/// castle kingside, but a rook covers one of the squares the king must pass
/// through, so the castling move is absent from the legal move list even
/// though queenside (an unattacked path) is still available.
#[test]
fn castling_blocked_by_attack_is_excluded_from_movegen() {
    let mut board = Board::empty();
    board.set(1, 5, Piece::new(PieceKind::King, Color::White, 1, 5));
    board.set(1, 1, Piece::new(PieceKind::Rook, Color::White, 1, 1));
    board.set(1, 8, Piece::new(PieceKind::Rook, Color::White, 1, 8));
    board.set(8, 6, Piece::new(PieceKind::Rook, Color::Black, 8, 6)); // covers f1/f-file
    board.set(8, 5, Piece::new(PieceKind::King, Color::Black, 8, 5));
    board.set_castling_rights(swarmate::board::CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: false,
        black_queenside: false,
    });

    let kingside_castle = Move::new(1, 5, 1, 7);
    let queenside_castle = Move::new(1, 5, 1, 3);
    let legal = movegen::generate_all(&board, Color::White);
    assert!(!legal.iter().any(|sm| sm.mv == kingside_castle));
    assert!(legal.iter().any(|sm| sm.mv == queenside_castle));
}

/// S6: every legal move from a realistic midgame position survives a
/// compress/decompress round trip unchanged.
#[test]
fn move_compression_round_trips_a_real_move_list() {
    let mut board = Board::starting_position();
    for mv in [Move::new(2, 5, 4, 5), Move::new(7, 5, 5, 5), Move::new(1, 7, 3, 6), Move::new(8, 2, 6, 3)] {
        board.apply(mv);
    }

    let legal = movegen::generate_all(&board, Color::White);
    assert!(!legal.is_empty());
    for scored in legal.iter() {
        let bits = scored.mv.compress();
        assert_eq!(Move::from_compressed(bits), Some(scored.mv));
    }
}
