//! # Chess vocabulary
//!
//! Squares, files, ranks, colors and chessmen live here. The board,
//! move generation, resolution of written moves and the game record
//! are in the sub-modules.

use strum::{EnumIs, FromRepr, VariantArray};

pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod moving;
pub mod resolve;

/// A square of the board, numbered `row * 8 + col` from a1 = 0 to h8 = 63.
///
/// Written in octal the two digits are the row and the column, so the
/// files run fastest: b1 = 1, a2 = 8. Row 0 is white's back rank.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    FromRepr, VariantArray)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Index into a 64-entry array.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Row of the square, 0 being rank 1.
    #[inline]
    pub fn row(self) -> u8 {
        (self as u8 & 0x38) >> 3
    }

    /// Column of the square, 0 being the a-file.
    #[inline]
    pub fn col(self) -> u8 {
        self as u8 & 0x7
    }

    /// Checked construction from a row and column.
    #[inline]
    pub fn from_coords(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Self::from_repr(row << 3 | col)
        } else {
            None
        }
    }

    /// Join a file and rank into a square.
    #[inline]
    pub fn from_parts(f: BoardFile, r: BoardRank) -> Self {
        Self::VARIANTS[r.ix() << 3 | f.ix()]
    }

    /// File and rank of the square.
    #[inline]
    pub fn parts(self) -> (BoardFile, BoardRank) {
        (BoardFile::from_u8(self.col()), BoardRank::from_u8(self.row()))
    }

    #[inline]
    pub fn file(self) -> BoardFile {
        BoardFile::from_u8(self.col())
    }

    #[inline]
    pub fn rank(self) -> BoardRank {
        BoardRank::from_u8(self.row())
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Self::from_coords(row as u8, col as u8)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum BoardRank {
    _1 = 0,
    _2 = 1,
    _3 = 2,
    _4 = 3,
    _5 = 4,
    _6 = 5,
    _7 = 6,
    _8 = 7,
}

impl BoardRank {
    /// Use this rank as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Keeps the low three bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        Self::VARIANTS[(ix & 0x7) as usize]
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum BoardFile {
    a_ = 0,
    b_ = 1,
    c_ = 2,
    d_ = 3,
    e_ = 4,
    f_ = 5,
    g_ = 6,
    h_ = 7,
}

impl BoardFile {
    /// Use this file as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Keeps the low three bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        Self::VARIANTS[(ix & 0x7) as usize]
    }
}

/// Side of a player or chessman.
///
/// The discriminants are used for indexing arrays of the form
/// `[<white value>, <black value>]`, see [`CastlingRules`](castling::CastlingRules).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray)]
#[repr(u8)]
pub enum ChessColor {
    WHITE = 0,
    BLACK = 1,
}

impl ChessColor {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::WHITE => Self::BLACK,
            Self::BLACK => Self::WHITE,
        }
    }

    /// Sign value of associated chessman color.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => -1,
        }
    }

    /// Row delta of a pawn step.
    #[inline]
    pub fn forward(self) -> i8 {
        self.sign()
    }

    /// Row the pawns of this color start on.
    #[inline]
    pub fn pawn_row(self) -> u8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => 6,
        }
    }

    /// Row on which the pawns of this color promote.
    #[inline]
    pub fn far_row(self) -> u8 {
        match self {
            Self::WHITE => 7,
            Self::BLACK => 0,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Piece type, without color.
///
/// Discriminants match the white [`ChessMan`] values.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray)]
#[repr(u8)]
pub enum ChessPiece {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl ChessPiece {
    /// Use as an array index: equal to one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    /// The upper-case letter naming this piece.
    pub fn letter(self) -> char {
        ['P', 'N', 'B', 'R', 'Q', 'K'][self.ix()]
    }

    /// Case-insensitive inverse of [`ChessPiece::letter`].
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(Self::PAWN),
            'N' => Some(Self::KNIGHT),
            'B' => Some(Self::BISHOP),
            'R' => Some(Self::ROOK),
            'Q' => Some(Self::QUEEN),
            'K' => Some(Self::KING),
            _ => None,
        }
    }

    /// Whether a pawn may promote to this piece.
    #[inline]
    pub fn is_promotion(self) -> bool {
        matches!(self, Self::KNIGHT | Self::BISHOP | Self::ROOK | Self::QUEEN)
    }

    /// The officer this piece is, or `None` for the pawn.
    pub fn officer(self) -> Option<ChessOfficer> {
        ChessOfficer::from_repr(self as u8)
    }
}

/// The piece types other than the pawn.
///
/// Pawns move asymmetrically, so the move generator keeps them apart
/// from the officers at the type level.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr)]
#[repr(u8)]
pub enum ChessOfficer {
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

/// Subset inclusion.
impl From<ChessOfficer> for ChessPiece {
    fn from(value: ChessOfficer) -> Self {
        match value {
            ChessOfficer::KNIGHT => Self::KNIGHT,
            ChessOfficer::BISHOP => Self::BISHOP,
            ChessOfficer::ROOK => Self::ROOK,
            ChessOfficer::QUEEN => Self::QUEEN,
            ChessOfficer::KING => Self::KING,
        }
    }
}

/// A colored chessman, pawns included.
///
/// The discriminants carry the piece type as the absolute value and the
/// color as the sign. An empty square is `None` in an `Option<ChessMan>`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, VariantArray)]
#[repr(i8)]
pub enum ChessMan {
    /// ♚
    BLACK_KING = -6,
    /// ♛
    BLACK_QUEEN = -5,
    /// ♜
    BLACK_ROOK = -4,
    /// ♝
    BLACK_BISHOP = -3,
    /// ♞
    BLACK_KNIGHT = -2,
    /// ♟
    BLACK_PAWN = -1,
    /// ♙
    WHITE_PAWN = 1,
    /// ♘
    WHITE_KNIGHT = 2,
    /// ♗
    WHITE_BISHOP = 3,
    /// ♖
    WHITE_ROOK = 4,
    /// ♕
    WHITE_QUEEN = 5,
    /// ♔
    WHITE_KING = 6,
}

impl ChessMan {
    /// The chessman of the given color and piece type.
    pub fn new(color: ChessColor, piece: ChessPiece) -> Self {
        use ChessColor::*;
        use ChessPiece::*;
        match (color, piece) {
            (WHITE, PAWN) => Self::WHITE_PAWN,
            (WHITE, KNIGHT) => Self::WHITE_KNIGHT,
            (WHITE, BISHOP) => Self::WHITE_BISHOP,
            (WHITE, ROOK) => Self::WHITE_ROOK,
            (WHITE, QUEEN) => Self::WHITE_QUEEN,
            (WHITE, KING) => Self::WHITE_KING,
            (BLACK, PAWN) => Self::BLACK_PAWN,
            (BLACK, KNIGHT) => Self::BLACK_KNIGHT,
            (BLACK, BISHOP) => Self::BLACK_BISHOP,
            (BLACK, ROOK) => Self::BLACK_ROOK,
            (BLACK, QUEEN) => Self::BLACK_QUEEN,
            (BLACK, KING) => Self::BLACK_KING,
        }
    }

    /// Color, from the sign of the discriminant.
    #[inline]
    pub fn color(self) -> ChessColor {
        if (self as i8) < 0 {
            ChessColor::BLACK
        } else {
            ChessColor::WHITE
        }
    }

    /// Piece type, from the absolute value of the discriminant.
    #[inline]
    pub fn piece(self) -> ChessPiece {
        ChessPiece::VARIANTS[(self as i8).unsigned_abs() as usize - 1]
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn to_char(self) -> char {
        let c = self.piece().letter();
        match self.color() {
            ChessColor::WHITE => c,
            ChessColor::BLACK => c.to_ascii_lowercase(),
        }
    }

    /// Inverse of [`ChessMan::to_char`]; the case decides the color.
    pub fn from_char(c: char) -> Option<Self> {
        let piece = ChessPiece::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            ChessColor::WHITE
        } else {
            ChessColor::BLACK
        };
        Some(Self::new(color, piece))
    }

    /// Unicode chess glyph.
    pub fn glyph(self) -> char {
        let glyphs = match self.color() {
            ChessColor::WHITE => ['♙', '♘', '♗', '♖', '♕', '♔'],
            ChessColor::BLACK => ['♟', '♞', '♝', '♜', '♛', '♚'],
        };
        glyphs[self.piece().ix()]
    }
}

/// Which rook the king castles with.
///
/// The discriminants are used as array indexes into the
/// castling tables, which are indexed first by [`ChessColor`].
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray)]
#[repr(u8)]
pub enum CastlingDirection {
    /// Aka. the 'king-side' castling, `O-O`.
    SHORT = 0,
    /// Aka. the 'queen-side' castling, `O-O-O`.
    LONG = 1,
}

impl CastlingDirection {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

#[test]
fn square_coords() {
    for (ix, sq) in Square::VARIANTS.iter().copied().enumerate() {
        assert_eq!(sq.ix(), ix);
        assert_eq!(Square::from_coords(sq.row(), sq.col()), Some(sq));
        let (f, r) = sq.parts();
        assert_eq!(Square::from_parts(f, r), sq);
    }
    assert_eq!(Square::e4.row(), 3);
    assert_eq!(Square::e4.col(), 4);
    assert_eq!(Square::from_coords(8, 0), None);
}

#[test]
fn square_offsets_stay_on_board() {
    assert_eq!(Square::e4.offset(1, -1), Some(Square::d5));
    assert_eq!(Square::a1.offset(-1, 0), None);
    assert_eq!(Square::h8.offset(0, 1), None);
    assert_eq!(Square::g1.offset(2, -1), Some(Square::f3));
}

#[test]
fn chessman_letters() {
    for man in ChessMan::VARIANTS.iter().copied() {
        assert_eq!(ChessMan::from_char(man.to_char()), Some(man));
        assert_eq!(ChessMan::new(man.color(), man.piece()), man);
    }
    assert_eq!(ChessMan::WHITE_KING.to_char(), 'K');
    assert_eq!(ChessMan::BLACK_PAWN.to_char(), 'p');
    assert_eq!(ChessMan::from_char('.'), None);
    assert_eq!(ChessMan::from_char('x'), None);
    assert_eq!(ChessMan::BLACK_KNIGHT.glyph(), '♞');
}

#[test]
fn officers_exclude_the_pawn() {
    assert_eq!(ChessPiece::PAWN.officer(), None);
    for piece in ChessPiece::VARIANTS.iter().copied().skip(1) {
        let Some(officer) = piece.officer() else {
            panic!("{piece:?} is an officer");
        };
        assert_eq!(ChessPiece::from(officer), piece);
    }
}
