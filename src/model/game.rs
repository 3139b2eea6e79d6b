//! The game record: the current position plus the moves leading to it.
//!
//! Moves undone with [`ChessGame::move_backward`] are kept so they can be
//! redone, until a different move is made from the earlier position.

use std::collections::VecDeque;

use crate::{
    error::RulesError,
    model::{
        ChessColor, Square,
        board::Board,
        castling::CastlingRights,
        movegen::PossibleMove,
        moving::Position,
        resolve,
    },
    notation::{fen, stdalg},
};

/// A move made in the game, with the positions on either side of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMove {
    pub played: PossibleMove,
    /// The move as entered, or as described if it came from [`ChessGame::play`].
    pub notation: String,
    pub before: Position,
    pub after: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    past: Vec<ChessMove>,
    future: VecDeque<ChessMove>,
    start: Position,
    current: Position,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// A game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(start: Position) -> Self {
        Self {
            past: Vec::new(),
            future: VecDeque::new(),
            start,
            current: start,
        }
    }

    /// A game starting from the position described by `text`.
    pub fn from_fen(text: &str) -> Result<Self, RulesError> {
        Ok(Self::from_position(fen::decode(text)?))
    }

    pub fn position(&self) -> &Position {
        &self.current
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    pub fn board(&self) -> &Board {
        &self.current.board
    }

    pub fn active(&self) -> ChessColor {
        self.current.active
    }

    pub fn is_white_turn(&self) -> bool {
        self.current.active.is_white()
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.current.transients.rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.current.transients.en_passant
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.current.transients.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.current.turn
    }

    /// The current position as FEN.
    pub fn fen(&self) -> String {
        fen::encode(&self.current)
    }

    /// Moves made up to the current position, oldest first.
    pub fn past(&self) -> &[ChessMove] {
        &self.past
    }

    /// Moves undone and available for redoing, next first.
    pub fn future(&self) -> impl Iterator<Item = &ChessMove> {
        self.future.iter()
    }

    /// Every recorded move, undone ones included.
    pub fn history(&self) -> impl Iterator<Item = &ChessMove> {
        self.past.iter().chain(self.future.iter())
    }

    /// Number of moves between the start and the current position.
    pub fn cursor(&self) -> usize {
        self.past.len()
    }

    /// Moves the chessman on `from` can make, if it belongs to the side to move.
    pub fn possible_moves(&self, from: Square) -> Vec<PossibleMove> {
        self.current.possible_moves(from)
    }

    /// Make the move written in standard algebraic notation.
    ///
    /// On failure the game is unchanged.
    pub fn make_move(&mut self, text: &str) -> Result<PossibleMove, RulesError> {
        let parsed = stdalg::parse_move(text, self.current.active)?;
        let mv = resolve::resolve(&self.current, &parsed, text)?;
        self.commit(mv, text.trim().to_owned());
        Ok(mv)
    }

    /// Make a move picked from [`ChessGame::possible_moves`], returning its notation.
    ///
    /// A pawn move onto the far rank may carry a promotion, see
    /// [`PossibleMove::with_promotion`]; without one the pawn stays a pawn.
    pub fn play(&mut self, mv: PossibleMove) -> Result<String, RulesError> {
        if !self.is_possible(&mv) {
            return Err(RulesError::NoLegalMove(mv.to_string()));
        }
        let notation = stdalg::describe(&self.current, &mv);
        self.commit(mv, notation.clone());
        Ok(notation)
    }

    fn is_possible(&self, mv: &PossibleMove) -> bool {
        let Some(man) = self.current.board[mv.from] else {
            return false;
        };
        let promotion = mv.promotion();
        if let Some(promo) = promotion {
            let onto_far_rank = man.piece().is_pawn() && mv.to.row() == man.color().far_row();
            if !onto_far_rank || promo.color() != man.color() || !promo.piece().is_promotion() {
                return false;
            }
        }

        self.current.possible_moves(mv.from).into_iter().any(|cand| {
            let cand = match promotion {
                Some(promo) => cand.with_promotion(promo),
                None => cand,
            };
            cand == *mv
        })
    }

    fn commit(&mut self, played: PossibleMove, notation: String) {
        let after = self.current.apply(&played);
        self.future.clear();
        self.past.push(ChessMove {
            played,
            notation,
            before: self.current,
            after,
        });
        self.current = after;
    }

    /// Step back one move, keeping it for [`ChessGame::move_forward`].
    /// Returns false at the start of the game.
    pub fn move_backward(&mut self) -> bool {
        match self.past.pop() {
            Some(last) => {
                self.current = last.before;
                self.future.push_front(last);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone move. Returns false if there is none.
    pub fn move_forward(&mut self) -> bool {
        match self.future.pop_front() {
            Some(next) => {
                self.current = next.after;
                self.past.push(next);
                true
            }
            None => false,
        }
    }
}

#[test]
fn new_game_state() {
    let game = ChessGame::new();
    assert!(game.is_white_turn());
    assert_eq!(game.castling_rights(), CastlingRights::ALL);
    assert_eq!(game.en_passant_target(), None);
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.fullmove_number(), 1);
    assert_eq!(game.fen(), fen::START_FEN);
    assert_eq!(game.cursor(), 0);
}

#[test]
fn failed_moves_leave_the_game_alone() {
    let mut game = ChessGame::new();
    assert_eq!(game.make_move("e5"), Err(RulesError::NoLegalMove("e5".into())));
    assert_eq!(game.make_move("Ke9"), Err(RulesError::Parse("Ke9".into())));
    assert_eq!(game, ChessGame::new());
    assert_eq!(
        game.play(PossibleMove::new(Square::e2, Square::e5, false)),
        Err(RulesError::NoLegalMove("e2e5".into()))
    );
    assert_eq!(game, ChessGame::new());
}

#[test]
fn navigation_restores_transients() {
    let mut game = ChessGame::new();
    for text in ["e4", "d5", "e5", "f5"] {
        assert!(game.make_move(text).is_ok(), "{text}");
    }
    assert_eq!(game.en_passant_target(), Some(Square::f6));

    assert!(game.move_backward());
    assert!(game.move_backward());
    assert_eq!(game.fen(), "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
    assert!(game.move_forward());
    assert!(game.move_forward());
    assert!(!game.move_forward());
    assert_eq!(game.en_passant_target(), Some(Square::f6));

    for _ in 0..4 {
        assert!(game.move_backward());
    }
    assert!(!game.move_backward());
    assert_eq!(game.fen(), fen::START_FEN);
    assert_eq!(game.future().count(), 4);
}

#[test]
fn new_move_drops_the_undone_ones() {
    let mut game = ChessGame::new();
    assert!(game.make_move("e4").is_ok());
    assert!(game.make_move("e5").is_ok());
    assert!(game.move_backward());
    assert!(game.make_move("c5").is_ok());
    assert!(!game.move_forward());
    assert_eq!(
        game.history().map(|m| m.notation.as_str()).collect::<Vec<_>>(),
        vec!["e4", "c5"]
    );
}

#[test]
fn play_checks_against_generated_moves() {
    let mut game = ChessGame::new();
    let Some(mv) = game
        .possible_moves(Square::g1)
        .into_iter()
        .find(|mv| mv.to == Square::f3)
    else {
        panic!("Nf3 should be possible");
    };
    assert_eq!(game.play(mv), Ok("Nf3".to_owned()));
    assert!(!game.is_white_turn());
    // White's knight is no longer ours to move.
    assert!(game.possible_moves(Square::f3).is_empty());
}

#[test]
fn play_takes_a_promotion_only_on_the_far_rank() {
    use crate::model::ChessMan;
    let start = "4k3/1P6/8/8/8/8/P7/4K3 w - - 0 1";
    let Ok(mut game) = ChessGame::from_fen(start) else {
        panic!("valid FEN");
    };
    let push = PossibleMove::new(Square::b7, Square::b8, false);
    assert!(game.play(push.with_promotion(ChessMan::BLACK_QUEEN)).is_err());
    assert!(game.play(push.with_promotion(ChessMan::WHITE_KING)).is_err());
    let short = PossibleMove::new(Square::a2, Square::a3, false);
    assert!(game.play(short.with_promotion(ChessMan::WHITE_QUEEN)).is_err());
    assert_eq!(game.fen(), start);

    assert_eq!(game.play(push.with_promotion(ChessMan::WHITE_ROOK)), Ok("b8=R".to_owned()));
    assert_eq!(game.fen(), "1R2k3/8/8/8/8/8/P7/4K3 b - - 0 1");

    let Ok(mut game) = ChessGame::from_fen(start) else {
        panic!("valid FEN");
    };
    assert_eq!(game.play(push), Ok("b8".to_owned()));
    assert_eq!(game.fen(), "1P2k3/8/8/8/8/8/P7/4K3 b - - 0 1");
}

#[test]
fn unpromoted_far_rank_push_by_notation() {
    let Ok(mut game) = ChessGame::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1") else {
        panic!("valid FEN");
    };
    assert!(game.make_move("b8").is_ok());
    assert_eq!(game.fen(), "1P2k3/8/8/8/8/8/8/4K3 b - - 0 1");
}
