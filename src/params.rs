// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Cipher parameters `RC5-w/r/b` and their runtime validation.

use std::fmt;
use std::str::FromStr;

/// The word widths RC5 is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    W16,
    W32,
    W64,
}

impl WordWidth {
    /// Width in bits (`w`).
    pub const fn bits(self) -> usize {
        match self {
            WordWidth::W16 => 16,
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }

    /// Width in bytes (`u`).
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }
}

impl TryFrom<usize> for WordWidth {
    type Error = ParameterError;

    fn try_from(width: usize) -> Result<Self, Self::Error> {
        match width {
            16 => Ok(WordWidth::W16),
            32 => Ok(WordWidth::W32),
            64 => Ok(WordWidth::W64),
            _ => Err(ParameterError::InvalidWidth(width)),
        }
    }
}

/// The `ParameterError` enum represents the possible errors that can occur while
/// building [CipherParameters]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("invalid width `{0}`; supported widths are: {{16, 32, 64}}")]
    InvalidWidth(usize),
    #[error("invalid {name} `{value}`; supported range is [0, 255]")]
    OutOfRange { name: &'static str, value: u64 },
    #[error("malformed parameter notation `{0}`; expected `RC5-w/r/b`")]
    MalformedNotation(String),
}

/// The fixed parameters of one RC5 instance: word width `w`, rounds `r` and key
/// length in bytes `b`.
///
/// The ranges of `r` and `b` are enforced by their type, the width by [WordWidth].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherParameters {
    width: WordWidth,
    rounds: u8,
    key_len: u8,
}

impl CipherParameters {
    /// Validates the width and builds the parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_core::{CipherParameters, ParameterError};
    ///
    /// let params = CipherParameters::new(32, 12, 16).unwrap();
    /// assert_eq!(params.block_size(), 8);
    ///
    /// assert_eq!(
    ///     CipherParameters::new(24, 12, 16),
    ///     Err(ParameterError::InvalidWidth(24))
    /// );
    /// ```
    pub fn new(width: usize, rounds: u8, key_len: u8) -> Result<Self, ParameterError> {
        let width = WordWidth::try_from(width).map_err(|err| {
            log::debug!("rejecting cipher parameters: {err}");
            err
        })?;
        Ok(Self::with_width(width, rounds, key_len))
    }

    pub const fn with_width(width: WordWidth, rounds: u8, key_len: u8) -> Self {
        CipherParameters {
            width,
            rounds,
            key_len,
        }
    }

    pub const fn width(&self) -> WordWidth {
        self.width
    }

    pub const fn rounds(&self) -> u8 {
        self.rounds
    }

    pub const fn key_len(&self) -> u8 {
        self.key_len
    }

    /// Bytes per word, `u = w / 8`.
    pub const fn word_bytes(&self) -> usize {
        self.width.bytes()
    }

    /// Bytes per block, `2u`.
    pub const fn block_size(&self) -> usize {
        2 * self.word_bytes()
    }

    /// Length of the expanded key table, `t = 2 * (r + 1)`.
    pub const fn table_len(&self) -> usize {
        table_len(self.rounds)
    }

    /// Number of words the key is folded into, `c = max(ceil(b / u), 1)`.
    pub const fn key_words(&self) -> usize {
        key_words(self.key_len as usize, self.word_bytes())
    }
}

pub(crate) const fn table_len(rounds: u8) -> usize {
    2 * (rounds as usize + 1)
}

pub(crate) const fn key_words(key_len: usize, word_bytes: usize) -> usize {
    if key_len == 0 {
        1
    } else {
        key_len.div_ceil(word_bytes)
    }
}

impl fmt::Display for CipherParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RC5-{}/{}/{}",
            self.width.bits(),
            self.rounds,
            self.key_len
        )
    }
}

impl FromStr for CipherParameters {
    type Err = ParameterError;

    /// Parses the `RC5-w/r/b` notation, e.g. `RC5-32/12/16`. The `RC5-` prefix is
    /// optional and case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParameterError::MalformedNotation(s.to_owned());

        let trimmed = s.trim();
        let body = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("rc5-") => &trimmed[4..],
            _ => trimmed,
        };

        let mut fields = body.split('/').map(|field| field.trim().parse::<u64>());
        let (Some(Ok(width)), Some(Ok(rounds)), Some(Ok(key_len)), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        let width = usize::try_from(width).map_err(|_| ParameterError::InvalidWidth(usize::MAX))?;
        let rounds = u8::try_from(rounds).map_err(|_| ParameterError::OutOfRange {
            name: "round count",
            value: rounds,
        })?;
        let key_len = u8::try_from(key_len).map_err(|_| ParameterError::OutOfRange {
            name: "key length",
            value: key_len,
        })?;

        CipherParameters::new(width, rounds, key_len)
    }
}
