//! A game position with an explicit apply/undo stack.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::Zobrist64;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Piece, Position as _, Role, Square,
    attacks,
};

use crate::error::CoreError;
use crate::notation::uci;
use crate::scoped::ScopedMove;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Game state with reversible move application.
///
/// Every [`apply`](Position::apply) pushes the previous state onto a stack and
/// every [`undo`](Position::undo) pops it, so a caller that pairs the two
/// leaves the position exactly as it found it. Equality compares the whole
/// stack, not just the current board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    current: Chess,
    history: Vec<Chess>,
    moves: Vec<Move>,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Position {
        Position::from_chess(Chess::default())
    }

    /// Parse a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Position, CoreError> {
        let parsed: Fen = fen.parse().map_err(|_| CoreError::InvalidFen {
            fen: fen.to_string(),
        })?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|err| CoreError::IllegalPosition {
                reason: err.to_string(),
            })?;
        Ok(Position::from_chess(chess))
    }

    fn from_chess(chess: Chess) -> Position {
        Position {
            current: chess,
            history: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// FEN of the current state.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.current, EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.current.turn()
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.current.legal_moves()
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.current.is_check()
    }

    /// The piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.current.board().piece_at(sq)
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.current.board().iter()
    }

    /// Whether any piece of color `by` attacks `sq`.
    pub fn is_attacked_by(&self, sq: Square, by: Color) -> bool {
        let board = self.current.board();
        board.attacks_to(sq, by, board.occupied()).any()
    }

    /// Whether a pawn of color `by` attacks `sq`.
    pub fn attacked_by_pawn(&self, sq: Square, by: Color) -> bool {
        // A `by` pawn attacks `sq` exactly when it stands on a square that a
        // pawn of the other color on `sq` would attack.
        let pawns = self.current.board().by_piece(Piece {
            color: by,
            role: Role::Pawn,
        });
        (attacks::pawn_attacks(!by, sq) & pawns).any()
    }

    /// Whether playing `mv` puts the opponent in check.
    pub fn gives_check(&self, mv: Move) -> bool {
        let mut next = self.current.clone();
        next.play_unchecked(mv);
        next.is_check()
    }

    /// Polyglot-compatible 64-bit Zobrist key of the current state.
    pub fn hash(&self) -> u64 {
        self.current.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
    }

    /// Apply a move known to be legal (taken from [`legal_moves`](Position::legal_moves)).
    pub fn apply(&mut self, mv: Move) {
        let mut next = self.current.clone();
        next.play_unchecked(mv);
        self.history.push(std::mem::replace(&mut self.current, next));
        self.moves.push(mv);
    }

    /// Undo the most recently applied move.
    ///
    /// Returns `None` when nothing has been applied since construction.
    pub fn undo(&mut self) -> Option<Move> {
        let previous = self.history.pop()?;
        self.current = previous;
        self.moves.pop()
    }

    /// Apply a move after checking its legality.
    pub fn play(&mut self, mv: Move) -> Result<(), CoreError> {
        if !self.current.is_legal(mv) {
            return Err(CoreError::IllegalMove {
                notation: uci(mv),
                fen: self.fen(),
            });
        }
        self.apply(mv);
        Ok(())
    }

    /// Parse a UCI move, check its legality and apply it.
    pub fn play_uci(&mut self, notation: &str) -> Result<Move, CoreError> {
        let mv = self.parse_uci(notation)?;
        self.apply(mv);
        Ok(mv)
    }

    /// Resolve a UCI move string to a legal move in the current position.
    pub fn parse_uci(&self, notation: &str) -> Result<Move, CoreError> {
        let parsed: UciMove = notation.parse().map_err(|_| CoreError::InvalidNotation {
            notation: notation.to_string(),
        })?;
        parsed.to_move(&self.current).map_err(|_| CoreError::IllegalMove {
            notation: notation.to_string(),
            fen: self.fen(),
        })
    }

    /// Resolve from/to squares plus optional promotion to a legal move.
    ///
    /// A king moving onto its own castling rook is read as castling.
    pub fn legal_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        UciMove::Normal {
            from,
            to,
            promotion,
        }
        .to_move(&self.current)
        .ok()
    }

    /// Apply `mv` for the lifetime of the returned guard.
    pub fn scoped(&mut self, mv: Move) -> ScopedMove<'_> {
        ScopedMove::new(self, mv)
    }

    /// Number of moves applied since construction.
    #[inline]
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Moves applied since construction, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The most recently applied move.
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Color-mirrored copy: board flipped vertically, colors and turn swapped.
    ///
    /// The move history is not carried over.
    pub fn mirrored(&self) -> Result<Position, CoreError> {
        let mut setup = self.current.to_setup(EnPassantMode::Legal);
        setup.mirror();
        let chess: Chess = setup
            .position(CastlingMode::Standard)
            .map_err(|err| CoreError::IllegalPosition {
                reason: err.to_string(),
            })?;
        Ok(Position::from_chess(chess))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves() {
        assert_eq!(Position::startpos().legal_moves().len(), 20);
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::from_fen(STARTING_FEN).unwrap();
        assert_eq!(pos, Position::startpos());
        assert_eq!(pos.fen(), STARTING_FEN);
    }

    #[test]
    fn startpos_hash_matches_polyglot() {
        assert_eq!(Position::startpos().hash(), 0x463b_9618_1691_fc9c);
    }

    #[test]
    fn hash_after_e4_matches_polyglot() {
        let mut pos = Position::startpos();
        pos.play_uci("e2e4").unwrap();
        assert_eq!(pos.hash(), 0x823c_9b50_fd11_4196);
    }

    #[test]
    fn invalid_fen_rejected() {
        let err = Position::from_fen("not a fen").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFen { .. }));
    }

    #[test]
    fn missing_king_rejected() {
        let err = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
        assert!(matches!(err, CoreError::IllegalPosition { .. }));
    }

    #[test]
    fn apply_then_undo_restores() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        for mv in pos.legal_moves() {
            pos.apply(mv);
            assert_eq!(pos.ply(), 1);
            assert_eq!(pos.undo(), Some(mv));
            assert_eq!(pos, before);
        }
    }

    #[test]
    fn undo_on_fresh_position_is_none() {
        let mut pos = Position::startpos();
        assert_eq!(pos.undo(), None);
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn play_rejects_illegal_move() {
        let mut pos = Position::startpos();
        let bogus = Move::Normal {
            role: Role::Pawn,
            from: Square::E2,
            capture: None,
            to: Square::E5,
            promotion: None,
        };
        let err = pos.play(bogus).unwrap_err();
        assert!(matches!(err, CoreError::IllegalMove { .. }));
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn play_uci_rejects_garbage() {
        let mut pos = Position::startpos();
        assert!(matches!(
            pos.play_uci("zz"),
            Err(CoreError::InvalidNotation { .. })
        ));
        assert!(matches!(
            pos.play_uci("e2e5"),
            Err(CoreError::IllegalMove { .. })
        ));
    }

    #[test]
    fn play_uci_castles() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = pos.play_uci("e1g1").unwrap();
        assert!(mv.is_castle());
        assert_eq!(uci(mv), "e1g1");
        assert_eq!(pos.piece_at(Square::G1), Some(Color::White.king()));
        assert_eq!(pos.piece_at(Square::F1), Some(Color::White.rook()));
    }

    #[test]
    fn legal_move_reads_king_onto_rook_as_castling() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = pos.legal_move(Square::E1, Square::H1, None).unwrap();
        assert!(mv.is_castle());
        assert!(pos.legal_move(Square::E1, Square::E3, None).is_none());
    }

    #[test]
    fn attacked_by_pawn_only_counts_pawns() {
        // Black pawn d5 covers c4 and e4; black rook a4 covers the fourth rank.
        let pos = Position::from_fen("4k3/8/8/3p4/r7/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.attacked_by_pawn(Square::E4, Color::Black));
        assert!(pos.attacked_by_pawn(Square::C4, Color::Black));
        assert!(!pos.attacked_by_pawn(Square::D4, Color::Black));
        assert!(pos.is_attacked_by(Square::D4, Color::Black));
        assert!(!pos.attacked_by_pawn(Square::E4, Color::White));
    }

    #[test]
    fn gives_check_detects_checking_move() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let check = pos.parse_uci("a1a8").unwrap();
        let quiet = pos.parse_uci("a1b1").unwrap();
        assert!(pos.gives_check(check));
        assert!(!pos.gives_check(quiet));
    }

    #[test]
    fn in_check_reports_side_to_move() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(pos.in_check());
    }

    #[test]
    fn mirrored_startpos_swaps_turn_only() {
        let mirrored = Position::startpos().mirrored().unwrap();
        assert_eq!(mirrored.side_to_move(), Color::Black);
        assert_eq!(mirrored.piece_at(Square::E1), Some(Color::White.king()));
        assert_eq!(mirrored.piece_at(Square::D8), Some(Color::Black.queen()));
    }

    #[test]
    fn mirrored_moves_piece_across_board() {
        let pos = Position::from_fen("4k3/8/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let mirrored = pos.mirrored().unwrap();
        assert_eq!(mirrored.piece_at(Square::C6), Some(Color::Black.knight()));
        assert_eq!(mirrored.side_to_move(), Color::Black);
    }

    #[test]
    fn moves_history_tracks_plies() {
        let mut pos = Position::startpos();
        let e4 = pos.play_uci("e2e4").unwrap();
        let e5 = pos.play_uci("e7e5").unwrap();
        assert_eq!(pos.moves(), &[e4, e5]);
        assert_eq!(pos.last_move(), Some(e5));
    }
}
