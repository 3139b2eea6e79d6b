//! # Forsyth-Edwards Notation
//!
//! A FEN record describes a whole position on one line, in six
//! whitespace-separated fields:
//!
//! 1. Piece placement, rank 8 first, ranks separated by `/`. Within a rank
//!    the files run a to h, chessmen are letters (upper case white, lower
//!    case black) and runs of empty squares are a digit 1 to 8.
//! 2. Side to move, `w` or `b`.
//! 3. Castling rights, some of `KQkq` in that order, or `-`.
//! 4. En-passant target square, or `-`.
//! 5. Half-move clock, plies since the last capture or pawn move.
//! 6. Full-move number, starting at 1 and incremented after black moves.
//!
//! The standard starting position is [`START_FEN`].

use chumsky::{error::EmptyErr, prelude::*, text};

use crate::{
    error::RulesError,
    model::{
        ChessColor, ChessMan, Square,
        board::Board,
        castling::CastlingRights,
        moving::{Position, Transients},
    },
    notation::{Parsable, Prs, is_it},
};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn fen_rank<'s>() -> impl Prs<'s, Vec<Option<ChessMan>>> {
    choice((
        ChessMan::parser().map(|man| vec![Some(man)]),
        one_of("12345678").map(|c: char| vec![None; (c as u8 - b'0') as usize]),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .map(|runs| runs.concat())
    .filter(|cells: &Vec<Option<ChessMan>>| cells.len() == 8)
}

impl Parsable for Board {
    fn parser<'s>() -> impl Prs<'s, Self> {
        fen_rank()
            .separated_by(just('/'))
            .collect::<Vec<_>>()
            .filter(|ranks: &Vec<Vec<Option<ChessMan>>>| ranks.len() == 8)
            .map(|ranks| {
                let mut res = Board::EMPTY;
                for (row, rank) in ranks.iter().rev().enumerate() {
                    res.0[row * 8..row * 8 + 8].copy_from_slice(rank);
                }
                res
            })
    }
}

impl Parsable for ChessColor {
    fn parser<'s>() -> impl Prs<'s, Self> {
        choice((just('w').to(Self::WHITE), just('b').to(Self::BLACK)))
    }
}

/// Some of `KQkq`, each at most once and in that order, or `-`.
impl Parsable for CastlingRights {
    fn parser<'s>() -> impl Prs<'s, Self> {
        choice((
            just('-').to(Self::NONE),
            group((
                is_it(just('K')),
                is_it(just('Q')),
                is_it(just('k')),
                is_it(just('q')),
            ))
            .map(|(wk, wq, bk, bq)| Self([[wk, wq], [bk, bq]]))
            .filter(|rights: &Self| !rights.is_none()),
        ))
    }
}

fn en_passant<'s>() -> impl Prs<'s, Option<Square>> {
    choice((just('-').to(None), Square::parser().map(Some)))
}

/// Plain decimal, no sign and no leading zeros.
fn counter<'s>() -> impl Prs<'s, u16> {
    text::int(10).try_map(|digits: &str, _| digits.parse::<u16>().map_err(|_| EmptyErr::default()))
}

/// Read a FEN record.
///
/// Each of the six fields must be present and well formed; the reason
/// names the first field that is not.
pub fn decode(text: &str) -> Result<Position, RulesError> {
    let invalid = |reason: String| RulesError::InvalidFen {
        fen: text.to_owned(),
        reason,
    };

    let mut fields = text.split_whitespace();
    let mut next = |name: &str| {
        fields
            .next()
            .ok_or_else(|| invalid(format!("missing {name} field")))
    };

    let placement = next("piece placement")?;
    let active = next("side to move")?;
    let castling = next("castling")?;
    let ep = next("en passant")?;
    let halfmove = next("half-move clock")?;
    let fullmove = next("full-move number")?;

    if fields.next().is_some() {
        return Err(invalid("trailing text after the full-move number".to_owned()));
    }

    let board = Board::parse_exact(placement).ok_or_else(|| {
        invalid(format!(
            "piece placement `{placement}` must be 8 ranks of 8 squares"
        ))
    })?;
    let active = ChessColor::parse_exact(active)
        .ok_or_else(|| invalid(format!("side to move `{active}` must be `w` or `b`")))?;
    let rights = CastlingRights::parse_exact(castling)
        .ok_or_else(|| invalid(format!("bad castling field `{castling}`")))?;
    let en_passant = en_passant()
        .then_ignore(end())
        .parse(ep)
        .into_result()
        .map_err(|_| invalid(format!("bad en passant field `{ep}`")))?;
    let halfmove_clock = counter()
        .then_ignore(end())
        .parse(halfmove)
        .into_result()
        .map_err(|_| invalid(format!("bad half-move clock `{halfmove}`")))?;
    let turn = counter()
        .then_ignore(end())
        .parse(fullmove)
        .into_result()
        .map_err(|_| invalid(format!("bad full-move number `{fullmove}`")))?;

    Ok(Position {
        board,
        active,
        transients: Transients {
            en_passant,
            halfmove_clock,
            rights,
        },
        turn,
    })
}

/// The piece placement field.
pub fn placement(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);
    for cells in board.rows() {
        let mut rank = String::new();
        let mut empty = 0u8;
        for cell in cells {
            match cell {
                Some(man) => {
                    if empty > 0 {
                        rank.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    rank.push(man.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            rank.push((b'0' + empty) as char);
        }
        ranks.push(rank);
    }
    ranks.reverse();
    ranks.join("/")
}

/// Write a FEN record.
pub fn encode(position: &Position) -> String {
    let ep = match position.transients.en_passant {
        Some(sq) => sq.to_string(),
        None => "-".to_owned(),
    };
    format!(
        "{} {:#} {} {} {} {}",
        placement(&position.board),
        position.active,
        position.transients.rights,
        ep,
        position.transients.halfmove_clock,
        position.turn
    )
}

#[test]
fn start_position_both_ways() {
    assert_eq!(decode(START_FEN), Ok(Position::startpos()));
    assert_eq!(encode(&Position::startpos()), START_FEN);
}

#[test]
fn fields_survive_a_round_trip() {
    for fen in [
        "r3kb1r/p2nqppp/5n2/1B2p1B1/4P3/1Q6/PPP2PPP/R3K2R w KQkq - 1 12",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/8/8/8/8/8/8/4K3 b - - 99 160",
        "2kr1bQ1/pppq3p/2n5/3ppb2/8/3P4/PPP2PPP/RNBQKBNR w KQ e6 0 8",
    ] {
        let decoded = decode(fen);
        assert_eq!(decoded.map(|pos| encode(&pos)), Ok(fen.to_owned()));
    }
}

#[test]
fn decoded_fields() {
    let Ok(pos) = decode("4k3/8/8/8/4Pp2/8/8/4K3 b Kq e3 3 41") else {
        panic!("valid FEN");
    };
    use crate::model::CastlingDirection::*;
    assert_eq!(pos.active, ChessColor::BLACK);
    assert_eq!(pos.board[Square::e4], Some(ChessMan::WHITE_PAWN));
    assert_eq!(pos.board[Square::f4], Some(ChessMan::BLACK_PAWN));
    assert_eq!(pos.transients.en_passant, Some(Square::e3));
    assert!(pos.transients.rights.has(ChessColor::WHITE, SHORT));
    assert!(!pos.transients.rights.has(ChessColor::WHITE, LONG));
    assert!(pos.transients.rights.has(ChessColor::BLACK, LONG));
    assert_eq!(pos.transients.halfmove_clock, 3);
    assert_eq!(pos.turn, 41);
}

#[test]
fn malformed_records_are_rejected() {
    for fen in [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkqK - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 one",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 70000",
    ] {
        match decode(fen) {
            Err(RulesError::InvalidFen { fen: reported, .. }) => assert_eq!(reported, fen),
            other => panic!("{fen:?} decoded as {other:?}"),
        }
    }
}

#[test]
fn only_canonical_records_decode() {
    // Each of these would re-encode differently.
    for fen in [
        "4k3/8/8/8/8/8/8/4K3 w KKq - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w qK - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w kK - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - - +5 1",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 +1",
        "4k3/8/8/8/8/8/8/4K3 w - - 05 1",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 01",
    ] {
        match decode(fen) {
            Err(RulesError::InvalidFen { fen: reported, .. }) => assert_eq!(reported, fen),
            other => panic!("{fen:?} decoded as {other:?}"),
        }
    }
}

#[test]
fn castling_field_subsets() {
    use crate::model::CastlingDirection::*;
    let Some(rights) = CastlingRights::parse_exact("Kq") else {
        panic!("Kq is a castling field");
    };
    assert!(rights.has(ChessColor::WHITE, SHORT));
    assert!(!rights.has(ChessColor::WHITE, LONG));
    assert!(!rights.has(ChessColor::BLACK, SHORT));
    assert!(rights.has(ChessColor::BLACK, LONG));
    assert_eq!(CastlingRights::parse_exact("KQkq"), Some(CastlingRights::ALL));
    assert_eq!(CastlingRights::parse_exact("-"), Some(CastlingRights::NONE));
    assert_eq!(CastlingRights::parse_exact(""), None);
}
