use strum::VariantArray;

use crate::model::{
    CastlingDirection, ChessColor, ChessMan, ChessPiece, Square, board::Board,
};

/// Squares involved in castling, indexed by
/// `[ChessColor::ix()][CastlingDirection::ix()]`.
#[derive(Debug)]
pub struct CastlingRules {
    pub king_from: [Square; 2],
    pub king_to: [[Square; 2]; 2],
    pub rook_from: [[Square; 2]; 2],
    pub rook_to: [[Square; 2]; 2],
}

impl CastlingRules {
    #[rustfmt::skip]
    pub const STANDARD: Self = {
        use Square::*;
        Self {
            king_from: [e1, e8],
            king_to: [[g1, c1], [g8, c8]],
            rook_from: [[h1, a1], [h8, a8]],
            rook_to: [[f1, d1], [f8, d8]],
        }
    };

    /// Squares strictly between the king and the rook, which
    /// must all be empty for the castling to take place.
    pub fn between(&self, side: ChessColor, dir: CastlingDirection) -> impl Iterator<Item = Square> {
        let king = self.king_from[side.ix()];
        let rook = self.rook_from[side.ix()][dir.ix()];
        let (lo, hi) = if king.col() < rook.col() {
            (king.col(), rook.col())
        } else {
            (rook.col(), king.col())
        };
        let row = king.row();
        (lo + 1..hi).filter_map(move |col| Square::from_coords(row, col))
    }

    /// The rights from `rights` which still hold on `board`: a king off its
    /// home square loses both, a rook off its home square loses its own.
    pub fn surviving(&self, board: &Board, mut rights: CastlingRights) -> CastlingRights {
        for side in ChessColor::VARIANTS.iter().copied() {
            if board[self.king_from[side.ix()]] != Some(ChessMan::new(side, ChessPiece::KING)) {
                rights.revoke_all(side);
                continue;
            }
            for dir in CastlingDirection::VARIANTS.iter().copied() {
                let rook = self.rook_from[side.ix()][dir.ix()];
                if board[rook] != Some(ChessMan::new(side, ChessPiece::ROOK)) {
                    rights.revoke(side, dir);
                }
            }
        }
        rights
    }
}

/// Castling rights, indexed by `[ChessColor::ix()][CastlingDirection::ix()]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(pub [[bool; 2]; 2]);

impl CastlingRights {
    pub const ALL: Self = Self([[true; 2]; 2]);
    pub const NONE: Self = Self([[false; 2]; 2]);

    #[inline]
    pub fn has(&self, side: ChessColor, dir: CastlingDirection) -> bool {
        self.0[side.ix()][dir.ix()]
    }

    #[inline]
    pub fn revoke(&mut self, side: ChessColor, dir: CastlingDirection) {
        self.0[side.ix()][dir.ix()] = false;
    }

    #[inline]
    pub fn revoke_all(&mut self, side: ChessColor) {
        self.0[side.ix()] = [false; 2];
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

#[test]
fn between_squares() {
    use CastlingDirection::*;
    use ChessColor::*;
    let rules = &CastlingRules::STANDARD;
    assert_eq!(rules.between(WHITE, SHORT).collect::<Vec<_>>(), vec![Square::f1, Square::g1]);
    assert_eq!(
        rules.between(BLACK, LONG).collect::<Vec<_>>(),
        vec![Square::b8, Square::c8, Square::d8]
    );
}

#[test]
fn rights_survive_only_with_king_and_rook_home() {
    use CastlingDirection::*;
    use ChessColor::*;
    let rules = &CastlingRules::STANDARD;
    let board = Board::startpos();
    assert_eq!(rules.surviving(&board, CastlingRights::ALL), CastlingRights::ALL);

    let no_h1_rook = board.with_removed(Square::h1);
    let rights = rules.surviving(&no_h1_rook, CastlingRights::ALL);
    assert!(!rights.has(WHITE, SHORT));
    assert!(rights.has(WHITE, LONG));
    assert!(rights.has(BLACK, SHORT));

    let king_walked = board.with_move(Square::e8, Square::e6);
    let rights = rules.surviving(&king_walked, CastlingRights::ALL);
    assert!(!rights.has(BLACK, SHORT));
    assert!(!rights.has(BLACK, LONG));
    assert!(rights.has(WHITE, LONG));

    // Never re-granted.
    assert!(rules.surviving(&board, CastlingRights::NONE).is_none());
}
