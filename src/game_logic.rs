//! Turn-level game engine and move-command parsing.

use std::fmt;
use std::str::FromStr;

use log::info;
use thiserror::Error;

use crate::board::{Board, MoveError};
use crate::piece::{Color, Piece};
use crate::square::Square;

/// Error when parsing a move command from its four-character form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ParseMoveError(String);

/// A proposed move in `<file><rank><file><rank>` notation, e.g. `e2e4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub from: Square,
    pub to: Square,
}

impl FromStr for MoveCommand {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ParseMoveError(s.to_string()));
        }
        let parse = |half: &str| {
            half.parse::<Square>()
                .map_err(|_| ParseMoveError(s.to_string()))
        };
        Ok(Self {
            from: parse(&s[..2])?,
            to: parse(&s[2..])?,
        })
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// One line of player input: a move, or the `quit` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveCommand),
    Quit,
}

impl FromStr for Command {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "quit" {
            Ok(Command::Quit)
        } else {
            s.parse().map(Command::Move)
        }
    }
}

/// What a committed move did to the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The opponent is now in check.
    pub check: bool,
    /// The opponent is in check with no escaping move.
    pub checkmate: bool,
}

/// Core game engine: owns the board and the side to move.
///
/// The turn passes to the opponent only when a move commits; every
/// rejection — wrong piece, bad geometry, self-check exposure — leaves the
/// turn with the same player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn: Color,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine with the standard initial position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Creates an engine from an arbitrary position and side to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Plays a move for the side to move.
    ///
    /// On commit the turn passes to the opponent and the outcome reports
    /// whether that opponent now stands in check or is checkmated. On any
    /// rejection the board and the turn are unchanged.
    pub fn play(&mut self, mv: MoveCommand) -> Result<MoveOutcome, MoveError> {
        self.board.apply_move(self.turn, mv.from, mv.to)?;

        let opponent = !self.turn;
        self.turn = opponent;

        let check = self.board.is_in_check(opponent);
        let checkmate = check && self.board.is_checkmate(opponent);
        if checkmate {
            info!("{mv}: checkmate, {opponent} has no escape");
        } else if check {
            info!("{mv}: {opponent} is in check");
        }
        Ok(MoveOutcome { check, checkmate })
    }
}
