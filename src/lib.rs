//! A two-player chess rules engine with a terminal front end.
//!
//! The core validates moves against standard movement geometry, applies
//! them with a self-check gate, and detects check and checkmate by
//! exhaustive trial moves. Castling, en passant, promotion, and draw
//! detection are not implemented.

use crate::board::Board;
use crate::game_logic::Command;

pub mod board;
pub mod game_logic;
pub mod mock;
pub mod piece;
pub mod rules;
pub mod square;
pub mod terminal;

/// Trait for reading move commands from a player.
///
/// Abstracts over the interactive terminal and scripted inputs, providing
/// a uniform interface for the game loop.
pub trait MoveInput {
    /// Error type for a single command that could not be understood.
    ///
    /// Returning an error must not consume a turn; the loop reports it and
    /// asks again.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Read the next command.
    ///
    /// `Ok(None)` means the input source is exhausted (end of script, end
    /// of stdin) and the session should end.
    fn read_command(&mut self) -> Result<Option<Command>, Self::Error>;
}

/// Trait for presenting the board to the players.
///
/// Mirrors [`MoveInput`] on the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given board position.
    fn show(&mut self, board: &Board) -> Result<(), Self::Error>;
}
