use pawnshop::{ChessGame, ReplayLog, RulesError, Square};

fn fixture(name: &str) -> ReplayLog {
    let path = format!("{}/tests/data/{name}.toml", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("{path}: {err}"));
    ReplayLog::from_toml(&text).unwrap_or_else(|err| panic!("{path}: {err}"))
}

#[test]
fn opera_game() {
    let log = fixture("opera_game");
    assert_eq!(log.ply.len(), 33);
    let game = log.replay().unwrap();
    assert_eq!(game.fullmove_number(), 17);
    assert!(!game.is_white_turn());
    assert_eq!(ReplayLog::record(&game).ply, log.ply);
}

#[test]
fn en_passant_promotion_and_long_castling() {
    let log = fixture("special_moves");
    let game = log.replay().unwrap();

    let after = |ply: usize| &game.past()[ply - 1];
    assert!(after(5).played.is_en_passant());
    assert_eq!(after(5).before.transients.en_passant, Some(Square::f6));
    assert_eq!(after(9).played.promotion().map(|man| man.to_string()), Some("Q".to_owned()));
    assert!(after(12).played.is_castling());
    assert_eq!(game.en_passant_target(), Some(Square::e6));
}

#[test]
fn moves_replay_from_their_own_descriptions() {
    // Re-entering what `play` writes gives the same positions.
    let original = fixture("opera_game").replay().unwrap();
    let mut described = ChessGame::new();
    for made in original.past() {
        let notation = described.play(made.played).unwrap();
        assert_eq!(notation, made.notation.trim_end_matches(['+', '#']));
        assert_eq!(described.position(), &made.after);
    }
}

#[test]
fn knights_need_telling_apart() {
    let mut game = ChessGame::new();
    for text in ["Nf3", "Nf6", "Nc3", "Nc6", "Ne4", "Ng4"] {
        game.make_move(text).unwrap();
    }
    let before = game.fen();
    assert_eq!(game.make_move("Ng5"), Err(RulesError::AmbiguousMove("Ng5".into())));
    assert_eq!(game.fen(), before);

    game.make_move("Neg5").unwrap();
    assert_eq!(
        game.fen(),
        "r1bqkb1r/pppppppp/2n5/6N1/6n1/5N2/PPPPPPPP/R1BQKB1R b KQkq - 7 4"
    );
}

#[test]
fn navigating_the_opera_game() {
    let mut game = fixture("opera_game").replay().unwrap();
    let end = game.fen();
    while game.move_backward() {}
    assert_eq!(game.cursor(), 0);
    assert_eq!(game.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    for _ in 0..22 {
        assert!(game.move_forward());
    }
    // Just before O-O-O.
    assert_eq!(
        game.fen(),
        "r3kb1r/p2nqppp/5n2/1B2p1B1/4P3/1Q6/PPP2PPP/R3K2R w KQkq - 1 12"
    );
    while game.move_forward() {}
    assert_eq!(game.fen(), end);
}

#[test]
fn tampered_log_is_caught() {
    let mut log = fixture("special_moves");
    log.ply[4].fen = log.ply[3].fen.clone();
    match log.replay() {
        Err(RulesError::ReplayMismatch { ply, .. }) => assert_eq!(ply, 5),
        other => panic!("unexpected {other:?}"),
    }

    let mut log = fixture("special_moves");
    // Without the suffix the pawn stays a pawn on h8.
    log.ply[8].notation = "gxh8".into();
    match log.replay() {
        Err(RulesError::ReplayMismatch { ply, found, .. }) => {
            assert_eq!(ply, 9);
            assert!(found.starts_with("r2qkbnP/"), "{found}");
        }
        other => panic!("unexpected {other:?}"),
    }
}
