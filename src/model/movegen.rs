//! Move generation over the mailbox board.
//!
//! Moves are generated forward from an origin ([`moves_from`]) for the
//! interactive side, and backward from a destination ([`moves_to`]) for
//! resolving algebraic notation, where the origin is what needs finding.
//!
//! Both directions are pseudo-legal: a move leaving the own king in
//! check is still generated.

use strum::VariantArray;

use crate::model::{
    CastlingDirection, ChessColor, ChessMan, ChessOfficer, ChessPiece, Square,
    board::Board,
    castling::{CastlingRights, CastlingRules},
};

/// The extra board edit attached to a special move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    /// The rook hop of a castling.
    Move { from: Square, to: Square },
    /// The pawn taken en passant.
    Remove { at: Square },
    /// The piece a pawn promotes into.
    Change { at: Square, man: ChessMan },
}

/// A candidate relocation with at most one attached side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PossibleMove {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub child: Option<SideEffect>,
}

impl PossibleMove {
    #[inline]
    pub fn new(from: Square, to: Square, capture: bool) -> Self {
        Self {
            from,
            to,
            capture,
            child: None,
        }
    }

    #[inline]
    pub fn with_child(self, child: SideEffect) -> Self {
        Self {
            child: Some(child),
            ..self
        }
    }

    /// Attach a promotion to `man` on the destination square.
    #[inline]
    pub fn with_promotion(self, man: ChessMan) -> Self {
        self.with_child(SideEffect::Change { at: self.to, man })
    }

    pub fn promotion(&self) -> Option<ChessMan> {
        match self.child {
            Some(SideEffect::Change { man, .. }) => Some(man),
            _ => None,
        }
    }

    pub fn is_castling(&self) -> bool {
        matches!(self.child, Some(SideEffect::Move { .. }))
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(self.child, Some(SideEffect::Remove { .. }))
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
#[rustfmt::skip]
const ROYAL: [(i8, i8); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];
#[rustfmt::skip]
const JUMPS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

/// Step directions of an officer and whether it slides along them.
fn pattern(officer: ChessOfficer) -> (&'static [(i8, i8)], bool) {
    use ChessOfficer::*;
    match officer {
        KNIGHT => (&JUMPS[..], false),
        BISHOP => (&DIAGONAL[..], true),
        ROOK => (&ORTHOGONAL[..], true),
        QUEEN => (&ROYAL[..], true),
        KING => (&ROYAL[..], false),
    }
}

/// Every move the chessman on `from` can make, if it belongs to `side`.
///
/// An empty or enemy-held origin yields nothing.
pub fn moves_from(
    board: &Board,
    from: Square,
    side: ChessColor,
    en_passant: Option<Square>,
    rights: CastlingRights,
) -> Vec<PossibleMove> {
    let mut res = Vec::new();
    let Some(man) = board[from] else {
        return res;
    };
    if man.color() != side {
        return res;
    }

    match man.piece().officer() {
        None => pawn_forward(board, from, side, en_passant, &mut res),
        Some(officer) => {
            rays_from(board, from, side, pattern(officer), &mut res);
            if officer == ChessOfficer::KING {
                for dir in CastlingDirection::VARIANTS.iter().copied() {
                    if let Some(mv) = castling_move(board, side, dir, rights) {
                        if mv.from == from {
                            res.push(mv);
                        }
                    }
                }
            }
        }
    }

    res
}

fn rays_from(
    board: &Board,
    from: Square,
    side: ChessColor,
    (dirs, slides): (&[(i8, i8)], bool),
    buffer: &mut Vec<PossibleMove>,
) {
    for &(dr, dc) in dirs {
        let mut next = from.offset(dr, dc);
        while let Some(to) = next {
            match board[to] {
                None => buffer.push(PossibleMove::new(from, to, false)),
                Some(other) => {
                    if other.color() != side {
                        buffer.push(PossibleMove::new(from, to, true));
                    }
                    break;
                }
            }
            if !slides {
                break;
            }
            next = to.offset(dr, dc);
        }
    }
}

fn pawn_forward(
    board: &Board,
    from: Square,
    side: ChessColor,
    en_passant: Option<Square>,
    buffer: &mut Vec<PossibleMove>,
) {
    let fwd = side.forward();

    if let Some(one) = from.offset(fwd, 0).filter(|&sq| board.is_empty(sq)) {
        buffer.push(PossibleMove::new(from, one, false));
        if from.row() == side.pawn_row() {
            if let Some(two) = one.offset(fwd, 0).filter(|&sq| board.is_empty(sq)) {
                buffer.push(PossibleMove::new(from, two, false));
            }
        }
    }

    let enemy_pawn = Some(ChessMan::new(side.opp(), ChessPiece::PAWN));
    for dc in [-1, 1] {
        let Some(to) = from.offset(fwd, dc) else {
            continue;
        };
        if board.is_enemy(to, side) {
            buffer.push(PossibleMove::new(from, to, true));
        } else if Some(to) == en_passant && board.is_empty(to) {
            if let Some(victim) = from.offset(0, dc) {
                if board[victim] == enemy_pawn {
                    buffer.push(
                        PossibleMove::new(from, to, true).with_child(SideEffect::Remove { at: victim }),
                    );
                }
            }
        }
    }
}

/// Every move by which a `man` could arrive on `to`.
///
/// The search runs the movement pattern backward from the destination,
/// so only squares actually holding `man` become origins. For pawns the
/// `promotion`, when given, is attached to moves onto the far rank.
/// Castling is not produced here, see [`castling_move`].
pub fn moves_to(
    board: &Board,
    to: Square,
    man: ChessMan,
    en_passant: Option<Square>,
    promotion: Option<ChessMan>,
) -> Vec<PossibleMove> {
    let mut res = Vec::new();
    match man.piece().officer() {
        None => {
            pawn_backward(board, to, man, en_passant, &mut res);
            if let Some(promo) = promotion {
                if to.row() == man.color().far_row() {
                    for mv in res.iter_mut() {
                        *mv = mv.with_promotion(promo);
                    }
                }
            }
        }
        Some(officer) => rays_to(board, to, man, pattern(officer), &mut res),
    }
    res
}

fn rays_to(
    board: &Board,
    to: Square,
    man: ChessMan,
    (dirs, slides): (&[(i8, i8)], bool),
    buffer: &mut Vec<PossibleMove>,
) {
    let capture = match board[to] {
        None => false,
        Some(other) if other.color() != man.color() => true,
        Some(_) => return,
    };

    for &(dr, dc) in dirs {
        let mut next = to.offset(dr, dc);
        while let Some(from) = next {
            if let Some(found) = board[from] {
                if found == man {
                    buffer.push(PossibleMove::new(from, to, capture));
                }
                break;
            }
            if !slides {
                break;
            }
            next = from.offset(dr, dc);
        }
    }
}

fn pawn_backward(
    board: &Board,
    to: Square,
    man: ChessMan,
    en_passant: Option<Square>,
    buffer: &mut Vec<PossibleMove>,
) {
    let side = man.color();
    let back = -side.forward();

    match board[to] {
        None => {
            if let Some(one) = to.offset(back, 0) {
                if board[one] == Some(man) {
                    buffer.push(PossibleMove::new(one, to, false));
                } else if board.is_empty(one) {
                    if let Some(two) = one.offset(back, 0) {
                        if two.row() == side.pawn_row() && board[two] == Some(man) {
                            buffer.push(PossibleMove::new(two, to, false));
                        }
                    }
                }
            }

            if Some(to) == en_passant {
                let enemy_pawn = Some(ChessMan::new(side.opp(), ChessPiece::PAWN));
                if let Some(victim) = to.offset(back, 0).filter(|&sq| board[sq] == enemy_pawn) {
                    for dc in [-1, 1] {
                        if let Some(from) = victim.offset(0, dc).filter(|&sq| board[sq] == Some(man)) {
                            buffer.push(
                                PossibleMove::new(from, to, true)
                                    .with_child(SideEffect::Remove { at: victim }),
                            );
                        }
                    }
                }
            }
        }
        Some(other) if other.color() != side => {
            for dc in [-1, 1] {
                if let Some(from) = to.offset(back, dc).filter(|&sq| board[sq] == Some(man)) {
                    buffer.push(PossibleMove::new(from, to, true));
                }
            }
        }
        Some(_) => {}
    }
}

/// The castling of `side` in direction `dir`, if the right is held,
/// king and rook stand on their home squares and the squares between
/// them are empty. Attacked squares are not considered.
pub fn castling_move(
    board: &Board,
    side: ChessColor,
    dir: CastlingDirection,
    rights: CastlingRights,
) -> Option<PossibleMove> {
    let rules = &CastlingRules::STANDARD;
    let (c, d) = (side.ix(), dir.ix());

    if !rights.has(side, dir) {
        return None;
    }

    let king = rules.king_from[c];
    let rook = rules.rook_from[c][d];
    if board[king] != Some(ChessMan::new(side, ChessPiece::KING))
        || board[rook] != Some(ChessMan::new(side, ChessPiece::ROOK))
    {
        return None;
    }

    if !rules.between(side, dir).all(|sq| board.is_empty(sq)) {
        return None;
    }

    Some(PossibleMove::new(king, rules.king_to[c][d], false).with_child(SideEffect::Move {
        from: rook,
        to: rules.rook_to[c][d],
    }))
}

/// All moves of `side`, origin by origin in square order.
pub fn enumerate(
    board: &Board,
    side: ChessColor,
    en_passant: Option<Square>,
    rights: CastlingRights,
) -> Vec<PossibleMove> {
    Square::VARIANTS
        .iter()
        .flat_map(|&sq| moves_from(board, sq, side, en_passant, rights))
        .collect()
}

#[cfg(test)]
fn destinations(moves: &[PossibleMove]) -> Vec<Square> {
    let mut res = moves.iter().map(|mv| mv.to).collect::<Vec<_>>();
    res.sort();
    res
}

#[test]
fn opening_moves() {
    use ChessColor::*;
    let board = Board::startpos();
    let all = enumerate(&board, WHITE, None, CastlingRights::ALL);
    assert_eq!(all.len(), 20);
    assert_eq!(enumerate(&board, BLACK, None, CastlingRights::ALL).len(), 20);

    let knight = moves_from(&board, Square::g1, WHITE, None, CastlingRights::ALL);
    assert_eq!(destinations(&knight), vec![Square::f3, Square::h3]);

    let pawn = moves_from(&board, Square::e2, WHITE, None, CastlingRights::ALL);
    assert_eq!(destinations(&pawn), vec![Square::e3, Square::e4]);

    assert!(moves_from(&board, Square::a1, WHITE, None, CastlingRights::ALL).is_empty());
    assert!(moves_from(&board, Square::e7, WHITE, None, CastlingRights::ALL).is_empty());
    assert!(moves_from(&board, Square::e4, WHITE, None, CastlingRights::ALL).is_empty());
}

#[test]
fn sliders_stop_at_blockers() {
    let board = Board::EMPTY
        .with_changed(Square::d4, ChessMan::WHITE_QUEEN)
        .with_changed(Square::d6, ChessMan::BLACK_KNIGHT)
        .with_changed(Square::f4, ChessMan::WHITE_PAWN);
    let moves = moves_from(&board, Square::d4, ChessColor::WHITE, None, CastlingRights::NONE);
    // 27 on an open board, less d7, d8, f4, g4, h4.
    assert_eq!(moves.len(), 22);
    assert!(moves.iter().any(|mv| mv.to == Square::d6 && mv.capture));
    assert!(!moves.iter().any(|mv| mv.to == Square::f4));
    assert!(moves.iter().all(|mv| mv.capture == (mv.to == Square::d6)));
}

#[test]
fn steppers_take_one_step() {
    let board = Board::EMPTY
        .with_changed(Square::d4, ChessMan::WHITE_KING)
        .with_changed(Square::a1, ChessMan::WHITE_KNIGHT);
    let king = moves_from(&board, Square::d4, ChessColor::WHITE, None, CastlingRights::NONE);
    assert_eq!(king.len(), 8);
    assert!(king.iter().all(|mv| mv.to.row().abs_diff(3) <= 1 && mv.to.col().abs_diff(3) <= 1));

    let knight = moves_from(&board, Square::a1, ChessColor::WHITE, None, CastlingRights::NONE);
    assert_eq!(destinations(&knight), vec![Square::c2, Square::b3]);
    assert_eq!(pattern(ChessOfficer::KING), (&ROYAL[..], false));
}

#[test]
fn castling_needs_empty_squares_and_rights() {
    use CastlingDirection::*;
    use ChessColor::*;
    let board = Board::startpos()
        .with_removed(Square::f1)
        .with_removed(Square::g1);

    let mv = castling_move(&board, WHITE, SHORT, CastlingRights::ALL);
    assert_eq!(
        mv,
        Some(PossibleMove::new(Square::e1, Square::g1, false).with_child(SideEffect::Move {
            from: Square::h1,
            to: Square::f1
        }))
    );
    assert_eq!(castling_move(&board, WHITE, LONG, CastlingRights::ALL), None);
    assert_eq!(castling_move(&board, WHITE, SHORT, CastlingRights::NONE), None);

    let king = moves_from(&board, Square::e1, WHITE, None, CastlingRights::ALL);
    assert_eq!(destinations(&king), vec![Square::f1, Square::g1]);
    assert_eq!(king.iter().filter(|mv| mv.is_castling()).count(), 1);
}

#[test]
fn both_castlings_are_offered() {
    use ChessColor::*;
    let board = Board::EMPTY
        .with_changed(Square::e8, ChessMan::BLACK_KING)
        .with_changed(Square::a8, ChessMan::BLACK_ROOK)
        .with_changed(Square::h8, ChessMan::BLACK_ROOK);
    let king = moves_from(&board, Square::e8, BLACK, None, CastlingRights::ALL);
    let castlings = king.iter().filter(|mv| mv.is_castling()).map(|mv| mv.to).collect::<Vec<_>>();
    assert_eq!(castlings, vec![Square::g8, Square::c8]);
}

#[test]
fn en_passant_both_ways() {
    use ChessColor::*;
    let board = Board::EMPTY
        .with_changed(Square::e5, ChessMan::WHITE_PAWN)
        .with_changed(Square::f5, ChessMan::BLACK_PAWN);

    let forward = moves_from(&board, Square::e5, WHITE, Some(Square::f6), CastlingRights::NONE);
    let ep = PossibleMove::new(Square::e5, Square::f6, true).with_child(SideEffect::Remove { at: Square::f5 });
    assert!(forward.contains(&ep));
    assert!(forward.contains(&PossibleMove::new(Square::e5, Square::e6, false)));

    let backward = moves_to(&board, Square::f6, ChessMan::WHITE_PAWN, Some(Square::f6), None);
    assert_eq!(backward, vec![ep]);

    assert!(moves_to(&board, Square::f6, ChessMan::WHITE_PAWN, None, None).is_empty());
}

#[test]
fn pawn_backward_search() {
    let board = Board::startpos();
    let double = moves_to(&board, Square::e4, ChessMan::WHITE_PAWN, None, None);
    assert_eq!(double, vec![PossibleMove::new(Square::e2, Square::e4, false)]);

    let single = moves_to(&board, Square::d6, ChessMan::BLACK_PAWN, None, None);
    assert_eq!(single, vec![PossibleMove::new(Square::d7, Square::d6, false)]);

    assert!(moves_to(&board, Square::e5, ChessMan::WHITE_PAWN, None, None).is_empty());

    let blocked = board.with_changed(Square::e3, ChessMan::BLACK_KNIGHT);
    assert!(moves_to(&blocked, Square::e4, ChessMan::WHITE_PAWN, None, None).is_empty());
    let captures = moves_to(&blocked, Square::e3, ChessMan::WHITE_PAWN, None, None);
    assert_eq!(
        destinations(&captures),
        vec![Square::e3, Square::e3],
    );
    assert!(captures.iter().all(|mv| mv.capture));
}

#[test]
fn promotion_attaches_to_far_rank_only() {
    let board = Board::EMPTY.with_changed(Square::g7, ChessMan::WHITE_PAWN);
    let onto = moves_to(&board, Square::g8, ChessMan::WHITE_PAWN, None, Some(ChessMan::WHITE_KNIGHT));
    assert_eq!(onto.len(), 1);
    assert_eq!(onto[0].promotion(), Some(ChessMan::WHITE_KNIGHT));

    let board = Board::EMPTY.with_changed(Square::g6, ChessMan::WHITE_PAWN);
    let short = moves_to(&board, Square::g7, ChessMan::WHITE_PAWN, None, Some(ChessMan::WHITE_QUEEN));
    assert_eq!(short.len(), 1);
    assert_eq!(short[0].promotion(), None);
}

#[test]
fn backward_search_finds_exactly_the_forward_moves() {
    // Every generated move is rediscovered from its destination.
    let board = Board::startpos()
        .with_move(Square::e2, Square::e4)
        .with_move(Square::d7, Square::d5)
        .with_move(Square::g1, Square::f3)
        .with_move(Square::c8, Square::g4);
    for side in ChessColor::VARIANTS.iter().copied() {
        for mv in enumerate(&board, side, None, CastlingRights::NONE) {
            let Some(man) = board[mv.from] else {
                panic!("move from empty square {mv:?}");
            };
            assert!(moves_to(&board, mv.to, man, None, None).contains(&mv), "{mv:?}");
        }
    }
}
