use pawnshop::{ChessGame, ChessPiece, PossibleMove, notation::fen};
use rand::{Rng, SeedableRng, rngs::SmallRng};

fn pi_rng() -> SmallRng {
    SmallRng::from_seed(*b"3.141592653589793238462643383279")
}

fn promote(game: &ChessGame, mv: PossibleMove, rng: &mut SmallRng) -> PossibleMove {
    let Some(man) = game.board()[mv.from] else {
        return mv;
    };
    if man.piece() == ChessPiece::PAWN && mv.to.row() == man.color().far_row() {
        let piece = [ChessPiece::KNIGHT, ChessPiece::BISHOP, ChessPiece::ROOK, ChessPiece::QUEEN]
            [rng.random_range(0..4)];
        mv.with_promotion(pawnshop::ChessMan::new(man.color(), piece))
    } else {
        mv
    }
}

#[test]
fn random_playouts_round_trip() {
    let mut rng = pi_rng();
    for _ in 0..40 {
        let mut game = ChessGame::new();
        let mut echo = ChessGame::new();
        for _ in 0..120 {
            let moves = game.position().all_moves();
            if moves.is_empty() {
                break;
            }
            let mv = promote(&game, moves[rng.random_range(0..moves.len())], &mut rng);
            let notation = game.play(mv).unwrap();

            // Notation written for a move reads back as that move.
            assert_eq!(echo.make_move(&notation), Ok(mv), "{notation} on {}", echo.fen());
            assert_eq!(echo.position(), game.position());

            let text = game.fen();
            assert_eq!(fen::decode(&text).as_ref(), Ok(game.position()), "{text}");
        }
    }
}
