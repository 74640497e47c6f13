use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    // Starting position has 20 legal moves
    assert_eq!(pos.legal_moves().len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(pos.legal_moves().len(), 48);
}

#[test]
fn test_startpos_fingerprint() {
    let pos = Position::startpos();
    assert_eq!(
        pos.fingerprint(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_fingerprint_omits_dead_en_passant() {
    let mut pos = Position::startpos();
    pos.play_uci("e2e4").unwrap();
    // No black pawn can take on e3.
    assert_eq!(
        pos.fingerprint(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_fingerprint_keeps_live_en_passant() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3").unwrap();
    pos.play_uci("c2c4").unwrap();
    assert_eq!(
        pos.fingerprint(),
        "rnbqkbnr/ppp1pppp/8/8/2PpP3/8/PP1P1PPP/RNBQKBNR b KQkq c3 0 3"
    );
}

#[test]
fn test_make_unmake_restores_fingerprint() {
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let before = pos.fingerprint();
    let hash = pos.board().hash();

    for mv in pos.legal_moves() {
        pos.make_move(mv);
        assert_ne!(pos.fingerprint(), before);
        pos.unmake_move();
        assert_eq!(pos.fingerprint(), before);
        assert_eq!(pos.board().hash(), hash);
    }
}

#[test]
fn test_unmake_at_root_is_noop() {
    let mut pos = Position::startpos();
    pos.unmake_move();
    assert_eq!(pos.fingerprint(), Position::startpos().fingerprint());
}

#[test]
fn test_is_capture() {
    let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let captures: Vec<_> = pos
        .legal_moves()
        .into_iter()
        .filter(|&mv| pos.is_capture(mv))
        .collect();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].to, Square::D5);
}

#[test]
fn test_en_passant_is_capture() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let ep = parse_uci(&pos, "e5f6");
    assert!(pos.is_capture(ep));
}

#[test]
fn test_castling_is_not_capture() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castle = parse_uci(&pos, "e1g1");
    assert!(!pos.is_capture(castle));
}

#[test]
fn test_checkmate_outcome() {
    // Scholar's mate
    let pos =
        Position::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(pos.is_checkmate());
    let outcome = pos.outcome().unwrap();
    assert_eq!(outcome.winner, Some(Color::White));
    assert_eq!(outcome.termination, Termination::Checkmate);
    assert_eq!(outcome.result_str(), "1-0");
}

#[test]
fn test_repetition_count_knight_shuffle() {
    let mut pos = Position::startpos();
    assert_eq!(pos.repetition_count(), 1);

    for _ in 0..2 {
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            pos.play_uci(uci).unwrap();
        }
    }
    assert_eq!(pos.repetition_count(), 3);
    assert!(pos.can_claim_draw());
    assert!(!pos.is_game_over());

    for _ in 0..2 {
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            pos.play_uci(uci).unwrap();
        }
    }
    assert_eq!(pos.repetition_count(), 5);
    assert_eq!(
        pos.outcome().map(|o| o.termination),
        Some(Termination::FivefoldRepetition)
    );
}

#[test]
fn test_invalid_fen_is_error() {
    let err = Position::from_fen("not a fen").unwrap_err();
    assert!(matches!(err, PositionError::InvalidFen { .. }));
}

fn parse_uci(pos: &Position, txt: &str) -> Move {
    crate::notation::parse_uci_move(pos, txt).unwrap()
}
