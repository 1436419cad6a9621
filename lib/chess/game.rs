use crate::chess::{Bitboard, Board, Color, Piece, Square};
use derive_more::{Display, Error};
use std::ops::Index;
use tracing::instrument;

/// The reason why a move was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum RuleViolation {
    #[display("there is no piece on the source square")]
    NoPieceAtSource,
    #[display("the chosen piece is not yours")]
    WrongOwner,
    #[display("there are no possible moves for the chosen piece")]
    NoLegalMoves,
    #[display("the chosen piece cannot move to the target square")]
    IllegalTarget,
    #[display("you cannot put yourself in check")]
    SelfCheck,
}

/// A match of chess between two players.
///
/// The one externally callable state machine: it owns the board and advances
/// only through [`Game::play`], which either commits a move or fails with a
/// [`RuleViolation`] leaving no observable mutation behind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: u32,
    side: Color,
    check: bool,
    checkmate: bool,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            turn: 1,
            side: Color::White,
            check: false,
            checkmate: false,
        }
    }
}

impl Game {
    /// The current turn number; starts at 1 and advances on every committed
    /// move.
    #[inline(always)]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The [`Color`] to move.
    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    /// Whether the side to move is in check.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        self.check
    }

    /// Whether the side to move is checkmated.
    #[inline(always)]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// An iterator over the pieces on the board.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.board.iter()
    }

    /// An iterator over the captured pieces.
    #[inline(always)]
    pub fn captured(&self) -> impl Iterator<Item = Piece> + '_ {
        self.board.captured()
    }

    /// The legality matrix of the piece on `whence`.
    ///
    /// The matrix ignores whether a move would leave the mover's own king in
    /// check; that is only decided by [`Game::play`].
    #[instrument(level = "trace", skip(self), err)]
    pub fn moves(&self, whence: Square) -> Result<Bitboard, RuleViolation> {
        let Some(piece) = self.board[whence] else {
            return Err(RuleViolation::NoPieceAtSource);
        };

        if piece.color() != self.side {
            return Err(RuleViolation::WrongOwner);
        }

        let moves = self.board.reachable(whence);
        if moves.is_empty() {
            return Err(RuleViolation::NoLegalMoves);
        }

        Ok(moves)
    }

    /// Relocates the piece on `whence` to `whither` and returns the capture,
    /// if any.
    ///
    /// The move executes on a board snapshot first; a move that would leave
    /// the mover's own king in check is rejected by discarding the snapshot,
    /// so a failure never mutates the match.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play(&mut self, whence: Square, whither: Square) -> Result<Option<Piece>, RuleViolation> {
        let moves = self.moves(whence)?;
        if !moves.contains(whither) {
            return Err(RuleViolation::IllegalTarget);
        }

        let mut board = self.board.clone();
        let captured = board.execute(whence, whither);
        if board.in_check(self.side) {
            return Err(RuleViolation::SelfCheck);
        }

        self.check = board.in_check(!self.side);
        self.checkmate = self.check && !escapes(&board, !self.side);
        self.board = board;
        self.turn += 1;
        self.side = !self.side;
        Ok(captured)
    }
}

/// Whether any move of `side` clears the check on its king.
///
/// Every candidate move of every piece executes on its own snapshot, so the
/// trials never leak into the live board.
fn escapes(board: &Board, side: Color) -> bool {
    for (piece, whence) in board.iter() {
        if piece.color() != side {
            continue;
        }

        for whither in board.reachable(whence) {
            let mut trial = board.clone();
            trial.execute(whence, whither);
            if !trial.in_check(side) {
                return true;
            }
        }
    }

    false
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Game {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        self.board.index(sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Role;

    #[test]
    fn match_starts_on_turn_one_with_white_to_move() {
        let game = Game::default();
        assert_eq!(game.turn(), 1);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(!game.is_check());
        assert!(!game.is_checkmate());
        assert_eq!(game.pieces().count(), 32);
        assert_eq!(game.captured().count(), 0);
    }

    #[test]
    fn moves_fails_if_source_square_is_vacant() {
        let game = Game::default();
        assert_eq!(game.moves(Square::E4), Err(RuleViolation::NoPieceAtSource));
    }

    #[test]
    fn moves_fails_if_piece_belongs_to_the_opponent() {
        let game = Game::default();
        assert_eq!(game.moves(Square::E7), Err(RuleViolation::WrongOwner));
    }

    #[test]
    fn moves_fails_if_piece_has_nowhere_to_go() {
        let game = Game::default();
        assert_eq!(game.moves(Square::E1), Err(RuleViolation::NoLegalMoves));
    }

    #[test]
    fn moves_returns_the_legality_matrix() {
        let game = Game::default();
        let moves = game.moves(Square::B1).unwrap();
        assert!(moves.contains(Square::C3));
        assert!(moves.contains(Square::A3));
        assert!(!moves.contains(Square::D2));
    }

    #[test]
    fn play_fails_if_target_is_not_in_the_matrix() {
        let mut game = Game::default();
        assert_eq!(
            game.play(Square::E2, Square::E5),
            Err(RuleViolation::IllegalTarget)
        );
    }

    #[test]
    fn play_advances_the_turn_and_flips_the_side() {
        let mut game = Game::default();
        assert_eq!(game.play(Square::E2, Square::E4), Ok(None));
        assert_eq!(game.turn(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game[Square::E4], Some(Piece(Color::White, Role::Pawn)));
        assert_eq!(game[Square::E2], None);
    }

    #[test]
    fn play_returns_the_captured_piece() {
        let mut game = Game::default();
        game.play(Square::E2, Square::E4).unwrap();
        game.play(Square::D7, Square::D5).unwrap();
        assert_eq!(
            game.play(Square::E4, Square::D5),
            Ok(Some(Piece(Color::Black, Role::Pawn)))
        );

        assert_eq!(
            Vec::from_iter(game.captured()),
            vec![Piece(Color::Black, Role::Pawn)]
        );
    }

    #[test]
    fn failed_play_leaves_the_match_untouched() {
        let mut game = Game::default();
        let before = game.clone();
        assert_eq!(
            game.play(Square::D1, Square::D5),
            Err(RuleViolation::NoLegalMoves)
        );

        assert_eq!(game, before);
    }
}
