// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The RC5 control block: parameters and key packed into one byte string.
//!
//! Layout: `[version, w, r, b, key[0], .., key[b - 1]]`, version `0x10`.

use crate::algorithm::{new_rc5_dyn, RC5Algo};
use crate::params::{CipherParameters, ParameterError};

/// The only control block version RC5 defines.
pub const RC5_CONTROL_BLOCK_VERSION: u8 = 0x10;

const HEADER_LEN: usize = 4;

/// The `ControlBlockError` enum represents the possible errors that can occur while
/// parsing a [ControlBlock]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlBlockError {
    #[error("invalid control block length `{0}`; should be at least 4 bytes long")]
    InvalidLength(usize),
    #[error("unsupported rc5 algorithm version `{0:#04x}`; the only supported version is 0x10")]
    UnsupportedVersion(u8),
    #[error("specified key length `{declared}` does not correspond to the provided key `{actual}`")]
    KeyLengthMismatch { declared: u8, actual: usize },
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// A parsed control block borrowing its key from the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBlock<'a> {
    params: CipherParameters,
    key: &'a [u8],
}

impl<'a> ControlBlock<'a> {
    /// Parses and validates a control block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_core::ControlBlock;
    ///
    /// let control_block = [
    ///     0x10, 0x20, 0x0C, 0x0A, 0x20, 0x33, 0x7D, 0x83, 0x05, 0x5F, 0x62, 0x51, 0xBB, 0x09
    /// ];
    /// let cb = ControlBlock::parse(&control_block).unwrap();
    /// assert_eq!(cb.parameters().to_string(), "RC5-32/12/10");
    ///
    /// let algo = cb.cipher();
    /// let pt = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
    /// let ct = algo.encode(cb.key(), &pt).unwrap();
    /// assert_eq!(pt[..], algo.decode(cb.key(), &ct).unwrap()[..]);
    /// ```
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ControlBlockError> {
        let (header, key) = match bytes.split_first_chunk::<HEADER_LEN>() {
            Some(split) => split,
            None => return Err(ControlBlockError::InvalidLength(bytes.len())),
        };
        let &[version, width, rounds, key_len] = header;

        if version != RC5_CONTROL_BLOCK_VERSION {
            return Err(ControlBlockError::UnsupportedVersion(version));
        }

        if key_len as usize != key.len() {
            return Err(ControlBlockError::KeyLengthMismatch {
                declared: key_len,
                actual: key.len(),
            });
        }

        let params = CipherParameters::new(width as usize, rounds, key_len)?;
        log::debug!("parsed control block for {params}");

        Ok(ControlBlock { params, key })
    }

    /// Builds a control block from validated parameters and a matching key.
    pub fn new(params: CipherParameters, key: &'a [u8]) -> Result<Self, ControlBlockError> {
        if params.key_len() as usize != key.len() {
            return Err(ControlBlockError::KeyLengthMismatch {
                declared: params.key_len(),
                actual: key.len(),
            });
        }
        Ok(ControlBlock { params, key })
    }

    pub fn parameters(&self) -> CipherParameters {
        self.params
    }

    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// A cipher for this block's parameters; pass [ControlBlock::key] on every call.
    pub fn cipher(&self) -> Box<dyn RC5Algo> {
        new_rc5_dyn(self.params)
    }

    /// Serializes back into the `[version, w, r, b, key..]` layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.key.len());
        bytes.extend_from_slice(&[
            RC5_CONTROL_BLOCK_VERSION,
            self.params.width().bits() as u8,
            self.params.rounds(),
            self.params.key_len(),
        ]);
        bytes.extend_from_slice(self.key);
        bytes
    }
}
