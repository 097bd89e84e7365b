// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Expansion of a secret key into the `S` table driving the round transform.

use crate::params::{key_words, table_len};
use crate::word::Word;
use std::cmp::max;

/// The expanded key table `S` of `t = 2 * (r + 1)` words.
///
/// Built at the start of every encode/decode and dropped at its end.
pub(crate) type ExpandedTable<W> = Box<[W]>;

/// Expands `key` into the table for `rounds` rounds.
pub(crate) fn setup_s<W: Word>(key: &[u8], rounds: u8) -> ExpandedTable<W> {
    let mut l_arr = key_to_words::<W>(key);
    let mut s_arr = seed_table::<W>(rounds);

    let total_count = 3 * max(s_arr.len(), l_arr.len());
    log::debug!(
        "expanding {}-bit key schedule: b = {}, c = {}, t = {}, {} mixing steps",
        W::BITS,
        key.len(),
        l_arr.len(),
        s_arr.len(),
        total_count
    );

    let (t, c) = (s_arr.len(), l_arr.len());
    let (mut a, mut b) = (W::zero(), W::zero());
    for k in 0..total_count {
        let (i, j) = (k % t, k % c);
        // A = S[i] = (S[i] + A + B) <<< 3
        a = s_arr[i].wrapping_add(&a).wrapping_add(&b).rotl(W::from_byte(3));
        s_arr[i] = a;
        // B = L[j] = (L[j] + A + B) <<< (A + B)
        let ab = a.wrapping_add(&b);
        b = l_arr[j].wrapping_add(&ab).rotl(ab);
        l_arr[j] = b;
    }

    s_arr
}

/// Folds the key bytes into `c` little-endian words, `L` in the RC5 paper.
///
/// An empty key yields a single zero word.
fn key_to_words<W: Word>(key: &[u8]) -> Box<[W]> {
    let mut l_arr = vec![W::zero(); key_words(key.len(), W::BYTES)];
    for (i, &byte) in key.iter().enumerate().rev() {
        let l = &mut l_arr[i / W::BYTES];
        *l = (*l << 8).wrapping_add(&W::from_byte(byte));
    }
    l_arr.into_boxed_slice()
}

/// The key independent starting table: `S[0] = P`, `S[i] = S[i - 1] + Q`.
fn seed_table<W: Word>(rounds: u8) -> Box<[W]> {
    std::iter::successors(Some(W::P), |s| Some(s.wrapping_add(&W::Q)))
        .take(table_len(rounds))
        .collect()
}
