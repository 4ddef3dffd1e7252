//! # Candidate identifiers and their random generator.
//!
//! A [`Candidate`] is a randomly drawn token that has not been validated yet.
//! [`Generator`] draws candidates over a fixed [`Alphabet`] and length; it is
//! the only producer of candidates in a normal run.
//!
//! ## Rules
//! - Generation is pure apart from the process-wide RNG and never fails.
//! - Draws are independent; repeats are possible and are handled downstream
//!   as ordinary rejections by the validation service.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

/// Character sets candidates can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// Decimal digits `0-9`.
    #[default]
    Digits,
    /// Lowercase ASCII letters `a-z`.
    Letters,
    /// Lowercase ASCII letters and decimal digits.
    Alphanumeric,
}

impl Alphabet {
    /// Returns the characters of this alphabet.
    pub fn chars(&self) -> &'static [u8] {
        match self {
            Alphabet::Digits => b"0123456789",
            Alphabet::Letters => b"abcdefghijklmnopqrstuvwxyz",
            Alphabet::Alphanumeric => b"abcdefghijklmnopqrstuvwxyz0123456789",
        }
    }

    /// Short stable name, also the accepted CLI spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alphabet::Digits => "digits",
            Alphabet::Letters => "letters",
            Alphabet::Alphanumeric => "alnum",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digits" => Ok(Alphabet::Digits),
            "letters" => Ok(Alphabet::Letters),
            "alnum" | "alphanumeric" => Ok(Alphabet::Alphanumeric),
            other => Err(format!(
                "unknown alphabet '{other}' (expected digits, letters, or alnum)"
            )),
        }
    }
}

/// A randomly drawn identifier awaiting validation.
///
/// Internally an `Arc<str>`, so events and records can carry the text
/// without copying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(Arc<str>);

impl Candidate {
    /// Wraps an existing token as a candidate.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// The candidate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Candidate> for Arc<str> {
    fn from(candidate: &Candidate) -> Self {
        Arc::clone(&candidate.0)
    }
}

/// Draws random candidates of a fixed length over a fixed alphabet.
///
/// # Example
/// ```
/// use prospector::{Alphabet, Generator};
///
/// let generator = Generator::new(Alphabet::Digits, 5);
/// let candidate = generator.generate();
/// assert_eq!(candidate.as_str().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    alphabet: Alphabet,
    length: usize,
}

impl Generator {
    /// Creates a generator. Length is clamped to at least 1.
    pub fn new(alphabet: Alphabet, length: usize) -> Self {
        Self {
            alphabet,
            length: length.max(1),
        }
    }

    /// Draws one candidate, each position uniform over the alphabet.
    pub fn generate(&self) -> Candidate {
        let chars = self.alphabet.chars();
        let mut rng = rand::rng();
        let text: String = (0..self.length)
            .map(|_| chars[rng.random_range(0..chars.len())] as char)
            .collect();
        Candidate(text.into())
    }
}
