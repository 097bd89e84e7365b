// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Little-endian conversion between block bytes and words.
//!
//! Callers validate the block length; these helpers index directly.

use crate::word::Word;

/// Packs the `W::BYTES` bytes starting at `start` into a word, lowest byte first.
#[inline]
pub(crate) fn pack_word<W: Word>(block: &[u8], start: usize) -> W {
    block[start..start + W::BYTES]
        .iter()
        .rev()
        .fold(W::zero(), |word, &byte| (word << 8) | W::from_byte(byte))
}

/// Writes `word` into the `W::BYTES` bytes starting at `start`, lowest byte first.
#[inline]
pub(crate) fn unpack_word<W: Word>(block: &mut [u8], start: usize, word: W) {
    block[start..start + W::BYTES]
        .iter_mut()
        .enumerate()
        .for_each(|(i, byte)| *byte = (word >> (8 * i)).low_byte());
}

/// Splits a `2u` byte block into its `A` and `B` words.
#[inline]
pub(crate) fn block_to_words<W: Word>(block: &[u8]) -> (W, W) {
    (pack_word(block, 0), pack_word(block, W::BYTES))
}

/// Writes the `A` and `B` words back into a `2u` byte block.
#[inline]
pub(crate) fn words_to_block<W: Word>(block: &mut [u8], a: W, b: W) {
    unpack_word(block, 0, a);
    unpack_word(block, W::BYTES, b);
}
