use crate::model::{
    ChessColor, ChessPiece, Square,
    board::Board,
    castling::{CastlingRights, CastlingRules},
    movegen::{self, PossibleMove, SideEffect},
};

/// Game state not visible from the placement of the chessmen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transients {
    /// Square passed over by a pawn's double step on the previous move.
    pub en_passant: Option<Square>,
    /// Moves since the last capture or pawn move.
    pub halfmove_clock: u16,
    pub rights: CastlingRights,
}

impl Transients {
    pub fn startpos() -> Self {
        Self {
            en_passant: None,
            halfmove_clock: 0,
            rights: CastlingRights::ALL,
        }
    }
}

/// Everything a FEN record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub active: ChessColor,
    pub transients: Transients,
    /// Full-move number, starting at 1 and bumped after black moves.
    pub turn: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self {
            board: Board::startpos(),
            active: ChessColor::WHITE,
            transients: Transients::startpos(),
            turn: 1,
        }
    }

    /// Moves of the chessman on `from`, which must belong to the side to move.
    pub fn possible_moves(&self, from: Square) -> Vec<PossibleMove> {
        movegen::moves_from(
            &self.board,
            from,
            self.active,
            self.transients.en_passant,
            self.transients.rights,
        )
    }

    /// All moves of the side to move.
    pub fn all_moves(&self) -> Vec<PossibleMove> {
        movegen::enumerate(
            &self.board,
            self.active,
            self.transients.en_passant,
            self.transients.rights,
        )
    }

    /// The position after `mv`.
    ///
    /// The main relocation happens first, then the side effect, so a
    /// promotion overwrites the pawn that just arrived. Clocks and
    /// castling rights are updated from the resulting board.
    pub fn apply(&self, mv: &PossibleMove) -> Self {
        let pawn_moved = self.board[mv.from].is_some_and(|man| man.piece() == ChessPiece::PAWN);
        let mut capture = mv.capture || self.board[mv.to].is_some();

        let mut board = self.board.with_move(mv.from, mv.to);
        match mv.child {
            Some(SideEffect::Move { from, to }) => board = board.with_move(from, to),
            Some(SideEffect::Remove { at }) => {
                capture = true;
                board = board.with_removed(at);
            }
            Some(SideEffect::Change { at, man }) => board = board.with_changed(at, man),
            None => {}
        }

        let en_passant = if pawn_moved && mv.from.row().abs_diff(mv.to.row()) == 2 {
            Square::from_coords((mv.from.row() + mv.to.row()) / 2, mv.from.col())
        } else {
            None
        };

        let halfmove_clock = if capture || pawn_moved {
            0
        } else {
            self.transients.halfmove_clock.saturating_add(1)
        };

        let turn = match self.active {
            ChessColor::WHITE => self.turn,
            ChessColor::BLACK => self.turn.saturating_add(1),
        };

        let rights = CastlingRules::STANDARD.surviving(&board, self.transients.rights);

        Self {
            board,
            active: self.active.opp(),
            transients: Transients {
                en_passant,
                halfmove_clock,
                rights,
            },
            turn,
        }
    }
}

#[test]
fn double_step_sets_en_passant_target() {
    let pos = Position::startpos();
    let next = pos.apply(&PossibleMove::new(Square::e2, Square::e4, false));
    assert_eq!(next.transients.en_passant, Some(Square::e3));
    assert_eq!(next.active, ChessColor::BLACK);
    assert_eq!(next.turn, 1);
    assert_eq!(next.transients.halfmove_clock, 0);

    let after = next.apply(&PossibleMove::new(Square::g8, Square::f6, false));
    assert_eq!(after.transients.en_passant, None);
    assert_eq!(after.turn, 2);
    assert_eq!(after.transients.halfmove_clock, 1);
    // Untouched by apply.
    assert_eq!(pos, Position::startpos());
}

#[test]
fn castling_moves_the_rook_too() {
    use crate::model::{CastlingDirection, ChessMan};
    let mut pos = Position::startpos();
    pos.board = pos.board.with_removed(Square::f1).with_removed(Square::g1);
    let Some(mv) = movegen::castling_move(
        &pos.board,
        ChessColor::WHITE,
        CastlingDirection::SHORT,
        pos.transients.rights,
    ) else {
        panic!("castling should be available");
    };
    let next = pos.apply(&mv);
    assert_eq!(next.board[Square::g1], Some(ChessMan::WHITE_KING));
    assert_eq!(next.board[Square::f1], Some(ChessMan::WHITE_ROOK));
    assert_eq!(next.board[Square::h1], None);
    assert!(!next.transients.rights.has(ChessColor::WHITE, CastlingDirection::SHORT));
    assert!(!next.transients.rights.has(ChessColor::WHITE, CastlingDirection::LONG));
    assert!(next.transients.rights.has(ChessColor::BLACK, CastlingDirection::LONG));
    assert_eq!(next.transients.halfmove_clock, 1);
}

#[test]
fn en_passant_capture_resets_clock_and_removes_pawn() {
    use crate::model::ChessMan;
    let mut pos = Position::startpos();
    pos.board = Board::EMPTY
        .with_changed(Square::e5, ChessMan::WHITE_PAWN)
        .with_changed(Square::d5, ChessMan::BLACK_PAWN);
    pos.transients = Transients {
        en_passant: Some(Square::d6),
        halfmove_clock: 9,
        rights: CastlingRights::NONE,
    };
    let mv = PossibleMove::new(Square::e5, Square::d6, false).with_child(SideEffect::Remove { at: Square::d5 });
    let next = pos.apply(&mv);
    assert_eq!(next.board[Square::d5], None);
    assert_eq!(next.board[Square::d6], Some(ChessMan::WHITE_PAWN));
    assert_eq!(next.transients.halfmove_clock, 0);
}

#[test]
fn promotion_replaces_the_pawn() {
    use crate::model::ChessMan;
    let mut pos = Position::startpos();
    pos.board = Board::EMPTY
        .with_changed(Square::b2, ChessMan::BLACK_PAWN)
        .with_changed(Square::a1, ChessMan::WHITE_ROOK);
    pos.active = ChessColor::BLACK;
    pos.transients.rights = CastlingRights::ALL;
    let mv = PossibleMove::new(Square::b2, Square::a1, true).with_promotion(ChessMan::BLACK_QUEEN);
    let next = pos.apply(&mv);
    assert_eq!(next.board[Square::a1], Some(ChessMan::BLACK_QUEEN));
    assert_eq!(next.board[Square::b2], None);
    assert!(next.transients.rights.is_none());
    assert_eq!(next.turn, 2);
}
