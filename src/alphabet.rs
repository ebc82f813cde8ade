//! The symbol bound a tree is built over.

use std::fmt;

/// One element of the indexed text.
pub type Symbol = u8;

/// A fixed alphabet `0..bound`. Symbols at or above the bound are rejected on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    bound: u16,
}

impl Alphabet {
    /// 7-bit ASCII.
    pub const ASCII: Self = Self { bound: 128 };

    /// Every byte value.
    pub const BYTES: Self = Self { bound: 256 };

    /// Creates an alphabet of `bound` symbols. `bound` must be in `1..=256`.
    pub fn new(bound: u16) -> Result<Self, AlphabetError> {
        if bound == 0 || bound > 256 {
            return Err(AlphabetError::InvalidBound { bound });
        }
        Ok(Self { bound })
    }

    #[must_use]
    pub const fn bound(self) -> u16 {
        self.bound
    }

    #[must_use]
    pub const fn contains(self, symbol: Symbol) -> bool {
        (symbol as u16) < self.bound
    }

    /// Checks every symbol of `s`, reporting the first one out of range.
    pub fn validate(self, s: &[Symbol]) -> Result<(), AlphabetError> {
        match s.iter().position(|&ch| !self.contains(ch)) {
            None => Ok(()),
            Some(position) => Err(AlphabetError::SymbolOutOfRange {
                symbol: s[position],
                position,
                bound: self.bound,
            }),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::BYTES
    }
}

/// Errors raised when a symbol or an alphabet bound is not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetError {
    /// A symbol at `position` of the presented sequence is not below `bound`.
    SymbolOutOfRange { symbol: Symbol, position: usize, bound: u16 },

    /// The requested alphabet bound is outside `1..=256`.
    InvalidBound { bound: u16 },
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolOutOfRange { symbol, position, bound } => write!(
                f,
                "symbol {symbol} at position {position} is outside the alphabet 0..{bound}"
            ),
            Self::InvalidBound { bound } => {
                write!(f, "alphabet bound {bound} is outside 1..=256")
            }
        }
    }
}

impl std::error::Error for AlphabetError {}
