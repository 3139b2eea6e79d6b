//! Replay logs: a game as TOML, one table per ply.
//!
//! ```toml
//! start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//!
//! [[ply]]
//! move = "e4"
//! fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! ```
//!
//! `start` may be left out for the standard starting position. Each ply
//! records the move as written and the FEN after it, so replaying a log
//! checks the engine against the recorded game.

use serde::{Deserialize, Serialize};

use crate::{error::RulesError, model::game::ChessGame, notation::fen};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayPly {
    #[serde(rename = "move")]
    pub notation: String,
    pub fen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default)]
    pub ply: Vec<ReplayPly>,
}

impl ReplayLog {
    pub fn from_toml(text: &str) -> Result<Self, RulesError> {
        toml::from_str(text).map_err(|err| RulesError::ReplayLog(err.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, RulesError> {
        toml::to_string(self).map_err(|err| RulesError::ReplayLog(err.to_string()))
    }

    /// The moves leading up to the current position of `game`.
    pub fn record(game: &ChessGame) -> Self {
        let start = fen::encode(game.start());
        Self {
            start: (start != fen::START_FEN).then_some(start),
            ply: game
                .past()
                .iter()
                .map(|mv| ReplayPly {
                    notation: mv.notation.clone(),
                    fen: fen::encode(&mv.after),
                })
                .collect(),
        }
    }

    /// Play the log from its start, checking the position after every ply.
    pub fn replay(&self) -> Result<ChessGame, RulesError> {
        let mut game = match &self.start {
            Some(start) => ChessGame::from_fen(start)?,
            None => ChessGame::new(),
        };

        for (ix, ply) in self.ply.iter().enumerate() {
            game.make_move(&ply.notation)?;
            let found = game.fen();
            if found != ply.fen {
                return Err(RulesError::ReplayMismatch {
                    ply: ix + 1,
                    expected: ply.fen.clone(),
                    found,
                });
            }
        }

        Ok(game)
    }
}

#[test]
fn record_then_replay() {
    let mut game = ChessGame::new();
    for text in ["d4", "Nf6", "c4", "e6"] {
        assert!(game.make_move(text).is_ok(), "{text}");
    }
    let log = ReplayLog::record(&game);
    assert_eq!(log.start, None);
    assert_eq!(log.ply.len(), 4);
    assert_eq!(log.ply[0].notation, "d4");

    let Ok(text) = log.to_toml() else {
        panic!("log should serialize");
    };
    assert!(text.contains("[[ply]]"));
    assert!(text.contains("move = \"Nf6\""));
    assert!(!text.contains("start"));

    assert_eq!(ReplayLog::from_toml(&text), Ok(log.clone()));
    assert_eq!(log.replay().map(|replayed| replayed.fen()), Ok(game.fen()));
}

#[test]
fn record_stops_at_the_current_position() {
    let mut game = ChessGame::new();
    for text in ["e4", "c5", "Nf3"] {
        assert!(game.make_move(text).is_ok(), "{text}");
    }
    assert!(game.move_backward());
    assert_eq!(ReplayLog::record(&game).ply.len(), 2);
}

#[test]
fn custom_start_is_kept() {
    let start = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    let Ok(mut game) = ChessGame::from_fen(start) else {
        panic!("valid FEN");
    };
    assert!(game.make_move("e4").is_ok());
    let log = ReplayLog::record(&game);
    assert_eq!(log.start.as_deref(), Some(start));
    assert_eq!(log.replay().map(|g| g.fen()), Ok("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1".to_owned()));
}

#[test]
fn replay_reports_the_diverging_ply() {
    let log = ReplayLog {
        start: None,
        ply: vec![
            ReplayPly {
                notation: "e4".into(),
                fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".into(),
            },
            ReplayPly {
                notation: "e5".into(),
                fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2".into(),
            },
        ],
    };
    match log.replay() {
        Err(RulesError::ReplayMismatch { ply, found, .. }) => {
            assert_eq!(ply, 2);
            assert_eq!(found, "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unreadable_logs() {
    assert!(matches!(ReplayLog::from_toml("ply = 3"), Err(RulesError::ReplayLog(_))));
    assert!(matches!(
        ReplayLog::from_toml("[[ply]]\nmove = \"e4\""),
        Err(RulesError::ReplayLog(_))
    ));
    assert_eq!(ReplayLog::from_toml(""), Ok(ReplayLog::default()));
}
