//! A chess rules engine working on the mailbox board.
//!
//! Moves are entered in standard algebraic notation and resolved against
//! the current position, positions are read and written as FEN, and whole
//! games can be recorded to and replayed from TOML logs.
//!
//! ```
//! use pawnshop::ChessGame;
//!
//! let mut game = ChessGame::new();
//! game.make_move("e4").unwrap();
//! game.make_move("c5").unwrap();
//! assert_eq!(
//!     game.fen(),
//!     "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
//! );
//! ```
//!
//! Whether a move leaves the own king in check is not examined.

pub mod error;
pub mod model;
pub mod notation;

pub use error::RulesError;
pub use model::{
    CastlingDirection, ChessColor, ChessMan, ChessPiece, Square,
    board::Board,
    castling::CastlingRights,
    game::{ChessGame, ChessMove},
    movegen::{PossibleMove, SideEffect},
    moving::Position,
};
pub use notation::replay::ReplayLog;
