//! Terminal collaborators: board rendering, stdin input, and the
//! interactive turn loop.

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::game_logic::{Command, GameEngine, ParseMoveError};
use crate::square::Square;
use crate::{BoardDisplay, MoveInput};

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

/// Terminal-based board display.
///
/// Renders ranks 8→1 top to bottom, one ASCII letter per piece (uppercase
/// White, lowercase Black), `.` for empty squares, with rank labels on the
/// left and a file-letter legend row at the bottom.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, board: &Board) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), board)
    }
}

/// Render a board to any writer. Extracted for testability.
fn render_board(w: &mut impl Write, board: &Board) -> Result<(), DisplayError> {
    for rank in (0..8).rev() {
        write!(w, "{} ", rank + 1)?;
        for file in 0..8 {
            let cell = Square::new(rank, file)
                .and_then(|square| board.piece_at(square))
                .map_or('.', |piece| piece.symbol());
            write!(w, " {cell} ")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "   a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Move input reading lines from a terminal, with a prompt.
///
/// End of stream reads as `Ok(None)`; a line that parses as neither a move
/// nor `quit` is reported as an error without consuming a turn.
pub struct TerminalInput<R> {
    reader: R,
}

impl TerminalInput<io::StdinLock<'static>> {
    /// Create an input reading from stdin.
    pub fn stdin() -> Self {
        Self {
            reader: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalInput<R> {
    /// Create an input reading from any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> MoveInput for TerminalInput<R> {
    type Error = ParseMoveError;

    fn read_command(&mut self) -> Result<Option<Command>, Self::Error> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            // 0 bytes read means end of stream; treat read failures the
            // same way, as the terminal session cannot continue.
            Ok(0) | Err(_) => Ok(None),
            Ok(_) => line.trim().parse().map(Some),
        }
    }
}

/// Drives a full game session over the given collaborators.
///
/// Each iteration draws the board, prompts the side to move, and plays the
/// next command. Rejected moves and malformed input print a diagnostic
/// without passing the turn. The session ends on `quit`, on exhausted
/// input, or on checkmate.
pub fn run_game(
    engine: &mut GameEngine,
    input: &mut impl MoveInput,
    display: &mut impl BoardDisplay,
) {
    loop {
        if let Err(e) = display.show(engine.board()) {
            eprintln!("display failure: {e}");
            return;
        }
        println!();
        print!("{}'s move: ", engine.turn());
        if io::stdout().flush().is_err() {
            return;
        }

        let command = match input.read_command() {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(e) => {
                println!("{e}. Enter a move like 'e2e4' or 'quit' to exit.");
                continue;
            }
        };

        match command {
            Command::Quit => return,
            Command::Move(mv) => match engine.play(mv) {
                Ok(outcome) => {
                    if outcome.checkmate {
                        let winner = !engine.turn();
                        if let Err(e) = display.show(engine.board()) {
                            eprintln!("display failure: {e}");
                        }
                        println!("Checkmate! {winner} wins.");
                        return;
                    }
                    if outcome.check {
                        println!("{} is in check.", engine.turn());
                    }
                }
                Err(e) => println!("Invalid move: {e}."),
            },
        }
    }
}

/// Runs an interactive game on the terminal, from the standard initial
/// position until quit, end of input, or checkmate.
pub fn run_interactive_terminal() {
    let mut engine = GameEngine::new();
    let mut input = TerminalInput::stdin();
    let mut display = TerminalDisplay::new();
    run_game(&mut engine, &mut input, &mut display);
}
