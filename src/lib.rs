// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC5 block cipher algorithm
//!
//! The RC5 block cipher is a symmetric-key block cipher designed by Ron Rivest in 1994.
//! It has a variable block size (32, 64, or 128 bits), a variable key size (0 to 2040 bits),
//! and a variable number of rounds (0 to 255). A parameter set is written `RC5-w/r/b`.
//!
//! The RC5 algorithm operates on two words (16-bit, 32-bit, or 64-bit each) at a time, with
//! each word being represented by a generic type implementing [Word]. Every encode and
//! decode expands the caller's key into a fresh table of round keys and drops it when
//! the call returns; nothing is cached between calls.
//!
//! ```
//! use rc5_core::{decode, encode, CipherParameters};
//!
//! let params: CipherParameters = "RC5-32/12/16".parse().unwrap();
//! let key = [
//!     0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
//!     0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
//! ];
//! let pt = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
//!
//! let ct = encode(params, &key, &pt).unwrap();
//! assert_eq!(ct, [0x2D, 0xDC, 0x14, 0x9B, 0xCF, 0x08, 0x8B, 0x9E]);
//! assert_eq!(decode(params, &key, &ct).unwrap(), pt);
//! ```
//!

mod algorithm;
mod control_block;
mod key_schedule;
mod packing;
mod params;
mod word;

pub use crate::algorithm::*;
pub use crate::control_block::*;
pub use crate::params::*;
pub use crate::word::Word;
