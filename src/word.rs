// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The word types RC5 can operate on and their width specific constants.
//!
//! Only `u16`, `u32` and `u64` implement [Word]. The trait is sealed, so any other
//! width is rejected by the compiler before a key is ever seen.

use crate::params::WordWidth;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned machine word of exactly `w` bits with wraparound arithmetic.
pub trait Word:
    sealed::Sealed
    + num_traits::PrimInt
    + num_traits::Unsigned
    + num_traits::WrappingAdd
    + num_traits::WrappingSub
    + std::fmt::Debug
    + std::fmt::LowerHex
    + Send
    + Sync
    + 'static
{
    /// Word width in bits (`w`).
    const BITS: u32;
    /// Bytes per word (`u`).
    const BYTES: usize;
    /// `Odd((e - 2) * 2^w)`
    const P: Self;
    /// `Odd((phi - 1) * 2^w)`
    const Q: Self;
    /// The runtime tag of this width.
    const WIDTH: WordWidth;

    fn from_byte(byte: u8) -> Self;

    /// Truncates the word to its lowest byte.
    fn low_byte(self) -> u8;

    /// Rotates left by `amount mod w` bits.
    fn rotl(self, amount: Self) -> Self;

    /// Rotates right by `amount mod w` bits.
    fn rotr(self, amount: Self) -> Self;
}

macro_rules! impl_word {
    ($t:ty, $width:ident, $p:literal, $q:literal) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const BYTES: usize = std::mem::size_of::<$t>();
            const P: Self = $p;
            const Q: Self = $q;
            const WIDTH: WordWidth = WordWidth::$width;

            #[inline]
            fn from_byte(byte: u8) -> Self {
                byte as $t
            }

            #[inline]
            fn low_byte(self) -> u8 {
                (self & 0xFF) as u8
            }

            #[inline]
            fn rotl(self, amount: Self) -> Self {
                self.rotate_left(rotation_amount::<$t>(amount as u32))
            }

            #[inline]
            fn rotr(self, amount: Self) -> Self {
                self.rotate_right(rotation_amount::<$t>(amount as u32))
            }
        }
    };
}

impl_word!(u16, W16, 0xB7E1, 0x9E37);
impl_word!(u32, W32, 0xB7E1_5163, 0x9E37_79B9);
impl_word!(u64, W64, 0xB7E1_5162_8AED_2A6B, 0x9E37_79B9_7F4A_7C15);

// w is a power of two, so masking with w - 1 is the same as mod w
#[inline]
fn rotation_amount<T: Word>(x: u32) -> u32 {
    x & (T::BITS - 1)
}
