//! Scripted move input for tests and non-interactive runs.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::MoveInput;
use crate::game_logic::{Command, ParseMoveError};

/// A scriptable [`MoveInput`] fed from whitespace-separated move tokens.
///
/// New script can be appended at any time; commands are handed out in
/// order and the input reads as exhausted once the queue drains.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Command>,
}

impl ScriptedInput {
    /// Create an empty scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scripted input pre-loaded from a script.
    pub fn from_script(script: &str) -> Result<Self, ParseMoveError> {
        let mut input = Self::new();
        input.push_script(script)?;
        Ok(input)
    }

    /// Parse and queue additional commands.
    ///
    /// The script is whitespace-separated move tokens (`"e2e4 e7e5"`) with
    /// `quit` allowed as a token. Parsing is all-or-nothing: on error,
    /// nothing is queued.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseMoveError> {
        let commands = script
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Command>, _>>()?;
        self.pending.extend(commands);
        Ok(())
    }

    /// Number of commands still queued.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl MoveInput for ScriptedInput {
    type Error = Infallible;

    fn read_command(&mut self) -> Result<Option<Command>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}
