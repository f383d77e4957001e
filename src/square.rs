use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error when parsing a square from its two-character form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseSquareError(String);

/// One cell of the 8×8 grid, identified by rank and file, both in `0..8`.
///
/// Files `'a'..='h'` map to `0..=7`, ranks `'1'..='8'` to `0..=7`, so
/// `"e2"` is `Square { rank: 1, file: 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square from rank and file indices.
    ///
    /// Returns `None` if either index is out of range.
    #[inline]
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Iterates over all 64 squares, a1 through h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { rank, file }))
    }

    /// Offsets this square by signed rank/file deltas.
    ///
    /// Returns `None` when the result falls off the board.
    #[inline]
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Ok(Square {
                rank: rank as u8 - b'1',
                file: file as u8 - b'a',
            }),
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}
