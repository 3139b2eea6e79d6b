//! Text renderings and parsers of the chess model.
//!
//! Parsers are built with chumsky and hang off the [`Parsable`] trait,
//! one implementation per model type. The [`Display`] impls here are
//! the inverse renderings, and double as the crate's diagnostics.

pub mod fen;
pub mod replay;
pub mod square;
pub mod stdalg;

use std::fmt::Display;

use chumsky::{error::EmptyErr, prelude::*};

use crate::model::{
    BoardFile, BoardRank, CastlingDirection, ChessColor, ChessMan, ChessPiece, Square,
    board::Board,
    castling::CastlingRights,
    movegen::{PossibleMove, SideEffect},
    moving::Position,
};

/// Parser over string input with the default error type.
pub trait Prs<'s, T>: Parser<'s, &'s str, T> {}

impl<'s, T, P: Parser<'s, &'s str, T>> Prs<'s, T> for P {}

pub trait Parsable: Sized {
    fn parser<'s>() -> impl Prs<'s, Self>;

    /// Parse the whole of `text`, or nothing.
    fn parse_exact(text: &str) -> Option<Self> {
        Self::parser().then_ignore(end()).parse(text).into_result().ok()
    }
}

/// Parse the given parser, if present, and report whether it was.
pub fn is_it<'s, T>(p: impl Prs<'s, T>) -> impl Prs<'s, bool> {
    p.or_not().map(|s| s.is_some())
}

impl Parsable for ChessMan {
    fn parser<'s>() -> impl Prs<'s, Self> {
        one_of("PNBRQKpnbrqk").try_map(|c: char, _| Self::from_char(c).ok_or_else(EmptyErr::default))
    }
}

impl Display for BoardFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl Display for BoardRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + *self as u8) as char)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (file, rank) = self.parts();
        write!(f, "{file}{rank}")
    }
}

/// `white`/`black`, or `w`/`b` in the alternate form.
impl Display for ChessColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self, f.alternate()) {
            (Self::WHITE, false) => f.write_str("white"),
            (Self::BLACK, false) => f.write_str("black"),
            (Self::WHITE, true) => f.write_str("w"),
            (Self::BLACK, true) => f.write_str("b"),
        }
    }
}

impl Display for ChessPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// FEN letter, or the chess glyph in the alternate form.
impl Display for ChessMan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.glyph())
        } else {
            write!(f, "{}", self.to_char())
        }
    }
}

impl Display for CastlingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SHORT => f.write_str("O-O"),
            Self::LONG => f.write_str("O-O-O"),
        }
    }
}

/// The FEN castling field, `KQkq` down to `-`.
impl Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return f.write_str("-");
        }
        for (side, dir, c) in [
            (ChessColor::WHITE, CastlingDirection::SHORT, 'K'),
            (ChessColor::WHITE, CastlingDirection::LONG, 'Q'),
            (ChessColor::BLACK, CastlingDirection::SHORT, 'k'),
            (ChessColor::BLACK, CastlingDirection::LONG, 'q'),
        ] {
            if self.has(side, dir) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Diagram with rank 8 on top and rank labels on the left,
/// using letters, or glyphs in the alternate form.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.rows().enumerate().collect::<Vec<_>>().into_iter().rev() {
            write!(f, "{} ", row + 1)?;
            for cell in cells {
                match cell {
                    Some(man) if f.alternate() => write!(f, " {:#}", man)?,
                    Some(man) => write!(f, " {}", man)?,
                    None => f.write_str(" .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&fen::encode(self))
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`. The rook hop of a
/// castling and the victim of en passant follow in brackets, as in
/// `e1g1[h1f1]` and `e5d6[xd5]`.
impl Display for PossibleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        match self.child {
            Some(SideEffect::Change { man, .. }) => {
                write!(f, "{}", man.piece().letter().to_ascii_lowercase())
            }
            Some(SideEffect::Move { from, to }) => write!(f, "[{from}{to}]"),
            Some(SideEffect::Remove { at }) => write!(f, "[x{at}]"),
            None => Ok(()),
        }
    }
}

#[test]
fn board_diagram() {
    let shown = Board::startpos().to_string();
    let lines = shown.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8  r n b q k b n r");
    assert_eq!(lines[4], "4  . . . . . . . .");
    assert_eq!(lines[7], "1  R N B Q K B N R");
    assert_eq!(lines[8], "   a b c d e f g h");
    assert!(format!("{:#}", Board::startpos()).starts_with("8  ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
}

#[test]
fn move_in_coordinate_notation() {
    let mv = PossibleMove::new(Square::e7, Square::e8, false).with_promotion(ChessMan::WHITE_QUEEN);
    assert_eq!(mv.to_string(), "e7e8q");
    assert_eq!(PossibleMove::new(Square::g1, Square::f3, false).to_string(), "g1f3");

    let castle = PossibleMove::new(Square::e1, Square::g1, false).with_child(SideEffect::Move {
        from: Square::h1,
        to: Square::f1,
    });
    assert_eq!(castle.to_string(), "e1g1[h1f1]");
    let en_passant =
        PossibleMove::new(Square::e5, Square::d6, true).with_child(SideEffect::Remove { at: Square::d5 });
    assert_eq!(en_passant.to_string(), "e5d6[xd5]");
}

#[test]
fn castling_rights_field() {
    let mut rights = CastlingRights::ALL;
    assert_eq!(rights.to_string(), "KQkq");
    rights.revoke(ChessColor::WHITE, CastlingDirection::LONG);
    rights.revoke_all(ChessColor::BLACK);
    assert_eq!(rights.to_string(), "K");
    assert_eq!(CastlingRights::NONE.to_string(), "-");
}
