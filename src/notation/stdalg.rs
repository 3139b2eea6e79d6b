//! # Standard algebraic notation
//!
//! The move notation of printed games and of FIDE's laws of chess,
//! e.g. `e4`, `Nbd7`, `exd6`, `O-O-O` or `gxh8=Q+`.
//!
//! Notation only names the destination and the kind of chessman, with
//! just enough of the origin to tell candidates apart. Reading it
//! therefore takes two steps: parsing the text into a [`ParsedMove`],
//! and resolving that against a position (see
//! [`resolve`](crate::model::resolve)). Writing it goes the other way,
//! from a move on a position to text, see [`describe`].
//!
//! Leniencies on input:
//!
//! - Piece letters may be lower case, except `b`, which is always a file.
//! - Castling may be written with zeros, `0-0` and `0-0-0`.
//! - The promotion letter may be lower case.
//! - Capture and check markers are read but not checked against the board.

use std::fmt::Display;

use chumsky::prelude::*;

use crate::{
    error::RulesError,
    model::{
        BoardFile, BoardRank, CastlingDirection, ChessColor, ChessMan, ChessOfficer, ChessPiece,
        Square,
        castling::CastlingRules,
        movegen::{self, PossibleMove},
        moving::Position,
    },
    notation::{Parsable, Prs, is_it},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InCheck {
    Check,
    Mate,
}

/// The origin file and rank given in the text, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct OriginHint {
    pub file: Option<BoardFile>,
    pub rank: Option<BoardRank>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdAlgMove {
    pub piece: ChessPiece,
    pub hint: OriginHint,
    pub capture: bool,
    pub to: Square,
    pub promotion: Option<ChessPiece>,
    pub check: Option<InCheck>,
}

/// Colorless notation as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdAlgNotation {
    Castling(CastlingDirection, Option<InCheck>),
    Move(StdAlgMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveIntent {
    Normal,
    Castle(CastlingDirection),
}

/// Notation bound to the side making the move.
///
/// For castling the origin hints and destination name the king's squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedMove {
    pub intent: MoveIntent,
    pub man: ChessMan,
    pub from_file: Option<BoardFile>,
    pub from_rank: Option<BoardRank>,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<ChessMan>,
    pub check: Option<InCheck>,
}

impl ParsedMove {
    pub fn new(notation: StdAlgNotation, side: ChessColor) -> Self {
        match notation {
            StdAlgNotation::Castling(dir, check) => {
                let rules = &CastlingRules::STANDARD;
                let from = rules.king_from[side.ix()];
                Self {
                    intent: MoveIntent::Castle(dir),
                    man: ChessMan::new(side, ChessPiece::KING),
                    from_file: Some(from.file()),
                    from_rank: Some(from.rank()),
                    to: rules.king_to[side.ix()][dir.ix()],
                    capture: false,
                    promotion: None,
                    check,
                }
            }
            StdAlgNotation::Move(mv) => Self {
                intent: MoveIntent::Normal,
                man: ChessMan::new(side, mv.piece),
                from_file: mv.hint.file,
                from_rank: mv.hint.rank,
                to: mv.to,
                capture: mv.capture,
                promotion: mv.promotion.map(|piece| ChessMan::new(side, piece)),
                check: mv.check,
            },
        }
    }
}

/// Parse `text` as a move by `side`.
pub fn parse_move(text: &str, side: ChessColor) -> Result<ParsedMove, RulesError> {
    StdAlgNotation::parse_exact(text.trim())
        .map(|notation| ParsedMove::new(notation, side))
        .ok_or_else(|| RulesError::Parse(text.to_owned()))
}

impl Parsable for StdAlgNotation {
    fn parser<'s>() -> impl Prs<'s, Self> {
        choice((
            castling()
                .then(InCheck::parser().or_not())
                .map(|(dir, check)| Self::Castling(dir, check)),
            StdAlgMove::parser().map(Self::Move),
        ))
    }
}

fn castling<'s>() -> impl Prs<'s, CastlingDirection> {
    choice((
        choice((just("O-O-O"), just("0-0-0"))).to(CastlingDirection::LONG),
        choice((just("O-O"), just("0-0"))).to(CastlingDirection::SHORT),
    ))
}

impl Parsable for StdAlgMove {
    fn parser<'s>() -> impl Prs<'s, Self> {
        // The hinted form is tried first; `e4` must fall through to the
        // plain form after the hint has eaten its square.
        let hinted = origin_hint().then(is_it(just('x'))).then(Square::parser());
        let plain = empty()
            .to(OriginHint::default())
            .then(is_it(just('x')))
            .then(Square::parser());

        group((
            officer().map(ChessPiece::from).or_not(),
            choice((hinted, plain)),
            just('=').ignore_then(promotion()).or_not(),
            InCheck::parser().or_not(),
        ))
        .map(|(piece, ((hint, capture), to), promotion, check)| Self {
            piece: piece.unwrap_or(ChessPiece::PAWN),
            hint,
            capture,
            to,
            promotion,
            check,
        })
    }
}

fn origin_hint<'s>() -> impl Prs<'s, OriginHint> {
    choice((
        BoardFile::parser()
            .then(BoardRank::parser())
            .map(|(f, r)| OriginHint {
                file: Some(f),
                rank: Some(r),
            }),
        BoardFile::parser().map(|f| OriginHint {
            file: Some(f),
            rank: None,
        }),
        BoardRank::parser().map(|r| OriginHint {
            file: None,
            rank: Some(r),
        }),
    ))
}

fn officer<'s>() -> impl Prs<'s, ChessOfficer> {
    use ChessOfficer::*;
    choice((
        one_of("Nn").to(KNIGHT),
        just('B').to(BISHOP),
        one_of("Rr").to(ROOK),
        one_of("Qq").to(QUEEN),
        one_of("Kk").to(KING),
    ))
}

fn promotion<'s>() -> impl Prs<'s, ChessPiece> {
    use ChessPiece::*;
    choice((
        one_of("Nn").to(KNIGHT),
        one_of("Bb").to(BISHOP),
        one_of("Rr").to(ROOK),
        one_of("Qq").to(QUEEN),
    ))
}

impl Parsable for InCheck {
    fn parser<'s>() -> impl Prs<'s, Self> {
        choice((just('+').to(InCheck::Check), just('#').to(InCheck::Mate)))
    }
}

impl Display for InCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => f.write_str("+"),
            Self::Mate => f.write_str("#"),
        }
    }
}

impl Display for StdAlgNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Castling(dir, check) => {
                write!(f, "{dir}")?;
                if let Some(check) = check {
                    write!(f, "{check}")?;
                }
                Ok(())
            }
            Self::Move(mv) => write!(f, "{mv}"),
        }
    }
}

impl Display for StdAlgMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piece != ChessPiece::PAWN {
            write!(f, "{}", self.piece)?;
        }
        if let Some(file) = self.hint.file {
            write!(f, "{file}")?;
        }
        if let Some(rank) = self.hint.rank {
            write!(f, "{rank}")?;
        }
        if self.capture {
            f.write_str("x")?;
        }
        write!(f, "{}", self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "={piece}")?;
        }
        if let Some(check) = self.check {
            write!(f, "{check}")?;
        }
        Ok(())
    }
}

/// Notation for `mv` on `position`, with the fewest origin hints that
/// tell it apart from other moves of the same kind of chessman.
///
/// Check markers are never written. Returns `None` if the origin is empty.
pub fn notate(position: &Position, mv: &PossibleMove) -> Option<StdAlgNotation> {
    let man = position.board[mv.from]?;
    let piece = man.piece();

    if piece == ChessPiece::KING && mv.is_castling() {
        let dir = if mv.to.col() > mv.from.col() {
            CastlingDirection::SHORT
        } else {
            CastlingDirection::LONG
        };
        return Some(StdAlgNotation::Castling(dir, None));
    }

    let capture = mv.capture || mv.is_en_passant() || position.board[mv.to].is_some();
    let hint = if piece == ChessPiece::PAWN {
        OriginHint {
            file: capture.then(|| mv.from.file()),
            rank: None,
        }
    } else {
        disambiguation(position, mv, man)
    };

    Some(StdAlgNotation::Move(StdAlgMove {
        piece,
        hint,
        capture,
        to: mv.to,
        promotion: mv.promotion().map(ChessMan::piece),
        check: None,
    }))
}

fn disambiguation(position: &Position, mv: &PossibleMove, man: ChessMan) -> OriginHint {
    let rivals = movegen::moves_to(&position.board, mv.to, man, position.transients.en_passant, None)
        .into_iter()
        .map(|other| other.from)
        .filter(|&sq| sq != mv.from)
        .collect::<Vec<_>>();

    let (file, rank) = mv.from.parts();
    if rivals.is_empty() {
        OriginHint::default()
    } else if rivals.iter().all(|sq| sq.col() != mv.from.col()) {
        OriginHint {
            file: Some(file),
            rank: None,
        }
    } else if rivals.iter().all(|sq| sq.row() != mv.from.row()) {
        OriginHint {
            file: None,
            rank: Some(rank),
        }
    } else {
        OriginHint {
            file: Some(file),
            rank: Some(rank),
        }
    }
}

/// [`notate`] rendered as text, or coordinate notation if the origin is empty.
pub fn describe(position: &Position, mv: &PossibleMove) -> String {
    match notate(position, mv) {
        Some(notation) => notation.to_string(),
        None => mv.to_string(),
    }
}

#[cfg(test)]
fn parsed(text: &str) -> StdAlgMove {
    match StdAlgNotation::parse_exact(text) {
        Some(StdAlgNotation::Move(mv)) => mv,
        other => panic!("{text} parsed as {other:?}"),
    }
}

#[test]
fn pawn_moves_parse() {
    let e4 = parsed("e4");
    assert_eq!(e4.piece, ChessPiece::PAWN);
    assert_eq!(e4.to, Square::e4);
    assert_eq!(e4.hint, OriginHint::default());
    assert!(!e4.capture);

    let exd5 = parsed("exd5");
    assert_eq!(exd5.hint.file, Some(BoardFile::e_));
    assert!(exd5.capture);
    assert_eq!(exd5.to, Square::d5);

    let promo = parsed("gxh8=Q+");
    assert_eq!(promo.hint.file, Some(BoardFile::g_));
    assert_eq!(promo.to, Square::h8);
    assert_eq!(promo.promotion, Some(ChessPiece::QUEEN));
    assert_eq!(promo.check, Some(InCheck::Check));

    assert_eq!(parsed("e8=n").promotion, Some(ChessPiece::KNIGHT));
}

#[test]
fn officer_moves_parse() {
    let nf3 = parsed("Nf3");
    assert_eq!(nf3.piece, ChessPiece::KNIGHT);
    assert_eq!(nf3.to, Square::f3);

    assert_eq!(parsed("nf3"), nf3);

    let nbd7 = parsed("Nbd7");
    assert_eq!(nbd7.hint.file, Some(BoardFile::b_));
    assert_eq!(nbd7.hint.rank, None);

    let r1a3 = parsed("R1a3");
    assert_eq!(r1a3.hint.file, None);
    assert_eq!(r1a3.hint.rank, Some(BoardRank::_1));

    let qh4xe1 = parsed("Qh4xe1#");
    assert_eq!(qh4xe1.hint.file, Some(BoardFile::h_));
    assert_eq!(qh4xe1.hint.rank, Some(BoardRank::_4));
    assert!(qh4xe1.capture);
    assert_eq!(qh4xe1.check, Some(InCheck::Mate));
}

#[test]
fn lowercase_b_is_a_file() {
    let bxc3 = parsed("bxc3");
    assert_eq!(bxc3.piece, ChessPiece::PAWN);
    assert_eq!(bxc3.hint.file, Some(BoardFile::b_));

    assert_eq!(parsed("Bxc3").piece, ChessPiece::BISHOP);
}

#[test]
fn castling_parses() {
    use CastlingDirection::*;
    for (text, dir) in [("O-O", SHORT), ("0-0", SHORT), ("O-O-O", LONG), ("0-0-0", LONG)] {
        assert_eq!(StdAlgNotation::parse_exact(text), Some(StdAlgNotation::Castling(dir, None)));
    }
    assert_eq!(
        StdAlgNotation::parse_exact("O-O-O+"),
        Some(StdAlgNotation::Castling(LONG, Some(InCheck::Check)))
    );

    let parsed = parse_move("O-O", ChessColor::BLACK);
    assert_eq!(
        parsed.map(|p| (p.intent, p.man, p.to)),
        Ok((MoveIntent::Castle(SHORT), ChessMan::BLACK_KING, Square::g8))
    );
}

#[test]
fn garbage_is_rejected() {
    for text in ["", "e9", "i4", "Pe4", "Nf", "x", "O-O-O-O", "e4!", "Xe4", "e8=K"] {
        assert_eq!(
            parse_move(text, ChessColor::WHITE),
            Err(RulesError::Parse(text.to_owned())),
            "{text}"
        );
    }
}

#[test]
fn notation_renders_back() {
    for text in ["e4", "exd5", "Nbd7", "R1a3", "Qh4xe1#", "gxh8=Q+", "O-O", "O-O-O+"] {
        let Some(notation) = StdAlgNotation::parse_exact(text) else {
            panic!("cannot parse {text}");
        };
        assert_eq!(notation.to_string(), text);
    }
}

#[test]
fn describe_opening_moves() {
    let pos = Position::startpos();
    assert_eq!(describe(&pos, &PossibleMove::new(Square::g1, Square::f3, false)), "Nf3");
    assert_eq!(describe(&pos, &PossibleMove::new(Square::e2, Square::e4, false)), "e4");
    assert_eq!(describe(&pos, &PossibleMove::new(Square::e4, Square::e5, false)), "e4e5");
}

#[test]
fn describe_disambiguates() {
    let mut pos = Position::startpos();
    pos.board = crate::model::board::Board::EMPTY
        .with_changed(Square::a1, ChessMan::WHITE_ROOK)
        .with_changed(Square::f1, ChessMan::WHITE_ROOK)
        .with_changed(Square::a5, ChessMan::WHITE_ROOK)
        .with_changed(Square::d8, ChessMan::BLACK_QUEEN);

    let by_file = PossibleMove::new(Square::a1, Square::d1, false);
    assert_eq!(describe(&pos, &by_file), "Rad1");
    let by_rank = PossibleMove::new(Square::a1, Square::a3, false);
    assert_eq!(describe(&pos, &by_rank), "R1a3");

    let pos = Position {
        board: pos.board.with_changed(Square::e7, ChessMan::WHITE_PAWN),
        ..pos
    };
    let promo = PossibleMove::new(Square::e7, Square::d8, true).with_promotion(ChessMan::WHITE_KNIGHT);
    assert_eq!(describe(&pos, &promo), "exd8=N");
}
