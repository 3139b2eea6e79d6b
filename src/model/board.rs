//! # The 'mailbox' representation of a chessboard.
//!
//! This is the simple and most obvious representation,
//! using a separate value in an array for each square, a so-called
//! 'board'-centric representation. Cells are indexed by
//! [`Square::ix`], so the first eight cells are rank 1.
//!
//! Boards are small `Copy` values. The editing methods return a fresh
//! board and leave the receiver alone, which lets a position keep its
//! board unchanged while successors are worked out.
use std::ops::Index;

use strum::VariantArray;

use crate::model::{ChessColor, ChessMan, ChessPiece, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Board(pub [Option<ChessMan>; 64]);

const BACK_RANK: [ChessPiece; 8] = {
    use ChessPiece::*;
    [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK]
};

impl Board {
    pub const EMPTY: Self = Self([None; 64]);

    /// The standard starting arrangement.
    pub fn startpos() -> Self {
        let mut res = Self::EMPTY;
        for (col, piece) in BACK_RANK.iter().copied().enumerate() {
            res.0[col] = Some(ChessMan::new(ChessColor::WHITE, piece));
            res.0[8 + col] = Some(ChessMan::WHITE_PAWN);
            res.0[48 + col] = Some(ChessMan::BLACK_PAWN);
            res.0[56 + col] = Some(ChessMan::new(ChessColor::BLACK, piece));
        }
        res
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<ChessMan> {
        self.0[sq.ix()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, it: Option<ChessMan>) {
        self.0[sq.ix()] = it;
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.0[sq.ix()].is_none()
    }

    /// Square holds a chessman of the opposite color to `side`.
    #[inline]
    pub fn is_enemy(&self, sq: Square, side: ChessColor) -> bool {
        self.0[sq.ix()].is_some_and(|man| man.color() != side)
    }

    /// Square holds a chessman of color `side`.
    #[inline]
    pub fn is_friend(&self, sq: Square, side: ChessColor) -> bool {
        self.0[sq.ix()].is_some_and(|man| man.color() == side)
    }

    /// FEN letter of the occupant, or `'.'` for an empty square.
    pub fn char_at(&self, sq: Square) -> char {
        self.0[sq.ix()].map_or('.', ChessMan::to_char)
    }

    /// Every square holding `man`, in index order.
    pub fn find(&self, man: ChessMan) -> impl Iterator<Item = Square> + '_ {
        Square::VARIANTS
            .iter()
            .copied()
            .filter(move |sq| self.0[sq.ix()] == Some(man))
    }

    /// Relocate whatever stands on `from` to `to`, overwriting the old occupant.
    pub fn with_move(&self, from: Square, to: Square) -> Self {
        let mut res = *self;
        res.0[to.ix()] = res.0[from.ix()].take();
        res
    }

    pub fn with_removed(&self, at: Square) -> Self {
        let mut res = *self;
        res.0[at.ix()] = None;
        res
    }

    pub fn with_changed(&self, at: Square, man: ChessMan) -> Self {
        let mut res = *self;
        res.0[at.ix()] = Some(man);
        res
    }

    /// Rows of eight cells, rank 1 first.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<ChessMan>]> {
        self.0.chunks(8)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Index<Square> for Board {
    type Output = Option<ChessMan>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.ix()]
    }
}

#[test]
fn startpos_has_both_kings_and_sixteen_pawns() {
    let board = Board::startpos();
    assert_eq!(board[Square::e1], Some(ChessMan::WHITE_KING));
    assert_eq!(board[Square::e8], Some(ChessMan::BLACK_KING));
    assert_eq!(board[Square::d8], Some(ChessMan::BLACK_QUEEN));
    assert_eq!(board.find(ChessMan::WHITE_PAWN).count(), 8);
    assert_eq!(board.find(ChessMan::BLACK_PAWN).count(), 8);
    assert_eq!(board.0.iter().filter(|c| c.is_none()).count(), 32);
}

#[test]
fn edits_leave_the_original_alone() {
    let board = Board::startpos();
    let moved = board.with_move(Square::g1, Square::f3);
    assert_eq!(board[Square::g1], Some(ChessMan::WHITE_KNIGHT));
    assert_eq!(moved[Square::g1], None);
    assert_eq!(moved[Square::f3], Some(ChessMan::WHITE_KNIGHT));

    let promoted = moved.with_changed(Square::f3, ChessMan::WHITE_QUEEN);
    assert_eq!(moved[Square::f3], Some(ChessMan::WHITE_KNIGHT));
    assert_eq!(promoted.char_at(Square::f3), 'Q');
    assert_eq!(promoted.with_removed(Square::f3).char_at(Square::f3), '.');
}

#[test]
fn capture_overwrites_destination() {
    let board = Board::startpos().with_move(Square::d1, Square::d7);
    assert_eq!(board[Square::d7], Some(ChessMan::WHITE_QUEEN));
    assert!(board.is_enemy(Square::d7, ChessColor::BLACK));
    assert!(board.is_friend(Square::d7, ChessColor::WHITE));
    assert_eq!(board.find(ChessMan::BLACK_PAWN).count(), 7);
}
