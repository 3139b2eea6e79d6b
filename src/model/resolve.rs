//! Resolving parsed notation against a position.
//!
//! The backward search of [`moves_to`](movegen::moves_to) supplies every
//! move that could produce the written destination, with the written
//! promotion attached when the destination is the far rank. The chessman
//! on the origin and the origin hints then narrow that down, and exactly
//! one survivor is required.
//!
//! A promotion suffix is not demanded on the far rank, nor refused
//! elsewhere: `e8` with a pawn on e7 moves the pawn without changing it,
//! and `c4=Q` is the plain pawn move to c4.

use crate::{
    error::RulesError,
    model::{
        movegen::{self, PossibleMove},
        moving::Position,
    },
    notation::stdalg::{MoveIntent, ParsedMove},
};

/// All moves on `position` fitting `parsed`.
pub fn candidates(position: &Position, parsed: &ParsedMove) -> Vec<PossibleMove> {
    let board = &position.board;
    let trans = &position.transients;

    let found = match parsed.intent {
        MoveIntent::Castle(dir) => {
            movegen::castling_move(board, parsed.man.color(), dir, trans.rights)
                .into_iter()
                .collect()
        }
        MoveIntent::Normal => movegen::moves_to(
            board,
            parsed.to,
            parsed.man,
            trans.en_passant,
            parsed.promotion,
        ),
    };

    found
        .into_iter()
        .filter(|mv| board[mv.from] == Some(parsed.man))
        .filter(|mv| parsed.from_file.is_none_or(|f| mv.from.file() == f))
        .filter(|mv| parsed.from_rank.is_none_or(|r| mv.from.rank() == r))
        .collect()
}

/// The single move fitting `parsed`, reporting `text` on failure.
pub fn resolve(position: &Position, parsed: &ParsedMove, text: &str) -> Result<PossibleMove, RulesError> {
    match candidates(position, parsed).as_slice() {
        [] => Err(RulesError::NoLegalMove(text.to_owned())),
        [mv] => Ok(*mv),
        _ => Err(RulesError::AmbiguousMove(text.to_owned())),
    }
}

#[cfg(test)]
fn resolve_text(position: &Position, text: &str) -> Result<PossibleMove, RulesError> {
    let parsed = crate::notation::stdalg::parse_move(text, position.active)?;
    resolve(position, &parsed, text)
}

#[test]
fn resolves_opening_moves() {
    use crate::model::Square;
    let pos = Position::startpos();
    assert_eq!(
        resolve_text(&pos, "Nf3"),
        Ok(PossibleMove::new(Square::g1, Square::f3, false))
    );
    assert_eq!(
        resolve_text(&pos, "e4"),
        Ok(PossibleMove::new(Square::e2, Square::e4, false))
    );
    assert_eq!(resolve_text(&pos, "e5"), Err(RulesError::NoLegalMove("e5".into())));
    assert_eq!(resolve_text(&pos, "Nd4"), Err(RulesError::NoLegalMove("Nd4".into())));
    assert_eq!(resolve_text(&pos, "O-O"), Err(RulesError::NoLegalMove("O-O".into())));
    // Hint pointing at the wrong knight.
    assert_eq!(resolve_text(&pos, "Nbf3"), Err(RulesError::NoLegalMove("Nbf3".into())));
}

#[test]
fn ambiguity_needs_a_hint() {
    use crate::model::{ChessMan, Square, board::Board};
    let mut pos = Position::startpos();
    pos.board = Board::EMPTY
        .with_changed(Square::b1, ChessMan::WHITE_KNIGHT)
        .with_changed(Square::f1, ChessMan::WHITE_KNIGHT);

    assert_eq!(resolve_text(&pos, "Nd2"), Err(RulesError::AmbiguousMove("Nd2".into())));
    assert_eq!(
        resolve_text(&pos, "Nbd2"),
        Ok(PossibleMove::new(Square::b1, Square::d2, false))
    );
    assert_eq!(
        resolve_text(&pos, "Nfd2"),
        Ok(PossibleMove::new(Square::f1, Square::d2, false))
    );
    assert_eq!(
        resolve_text(&pos, "N1d2"),
        Err(RulesError::AmbiguousMove("N1d2".into()))
    );
}

#[test]
fn promotion_applies_on_the_far_rank_only() {
    use crate::model::{ChessColor, ChessMan, Square, board::Board};
    let mut pos = Position::startpos();
    pos.board = Board::EMPTY
        .with_changed(Square::e7, ChessMan::WHITE_PAWN)
        .with_changed(Square::c2, ChessMan::WHITE_PAWN);

    let promoted = resolve_text(&pos, "e8=Q");
    assert_eq!(
        promoted.map(|mv| mv.promotion()),
        Ok(Some(ChessMan::WHITE_QUEEN))
    );
    assert_eq!(
        resolve_text(&pos, "e8"),
        Ok(PossibleMove::new(Square::e7, Square::e8, false))
    );
    assert_eq!(
        resolve_text(&pos, "c4=Q"),
        Ok(PossibleMove::new(Square::c2, Square::c4, false))
    );
    assert_eq!(resolve_text(&pos, "Ne8=Q"), Err(RulesError::NoLegalMove("Ne8=Q".into())));

    pos.active = ChessColor::BLACK;
    pos.board = pos.board.with_changed(Square::d2, ChessMan::BLACK_PAWN);
    assert_eq!(
        resolve_text(&pos, "d1=n").map(|mv| mv.promotion()),
        Ok(Some(ChessMan::BLACK_KNIGHT))
    );
}
