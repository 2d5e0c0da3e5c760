//! # Radix Integer Codec
//!
//! A [`Codec`] converts 64-bit integers to and from text in any radix from
//! 2 to 256. The radix is the length of the alphabet the codec is built
//! from, and the symbol at index `i` of that alphabet is the digit `i`.
//!
//! ## Encoding Format
//!
//! Digits are written most significant first, without leading zero digits
//! (zero itself is the single digit-0 symbol). Negative signed values are
//! their magnitude prefixed with `-`.
//!
//! For example, with the decimal alphabet `0123456789`:
//! - `0` encodes as `"0"`
//! - `-987654321` encodes as `"-987654321"`
//! - `i64::MIN` encodes as `"-9223372036854775808"`
//!
//! ## Sign Collision
//!
//! Signed decoding always treats a leading `-` as the sign. If the alphabet
//! itself contains `-`, any value whose leading digit is that symbol cannot
//! be told apart from a negative number. Such alphabets remain usable for
//! unsigned values only.

use std::fmt;
use std::str::FromStr;

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::{LOWER_BASE36, UPPER_BASE36};

/// Maximum number of characters any codec needs for a 64-bit value: 64
/// binary digits plus the sign.
const MAX_ENCODED_LEN: usize = u64::BITS as usize + 1;

/// Sign character prefixed to negative values.
const MINUS: char = '-';

/// Largest radix served by [`Codec::lower_base`] and [`Codec::upper_base`].
const MAX_ALPHANUMERIC_RADIX: usize = 36;

/// Encodes and decodes 64-bit integers with a fixed alphabet.
///
/// A codec is validated once at construction and immutable afterwards, so
/// a single instance can be shared freely between threads.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct Codec {
    alphabet: Alphabet,
    /// Upper bound on the digits plus sign of any encoded 64-bit value.
    max_encoded_len: usize,
}

impl Codec {
    /// Creates a codec from the characters of `alphabet`.
    ///
    /// The alphabet must hold 2 to 256 unique characters, each a code
    /// point in U+0000..=U+00FF.
    ///
    /// ## Errors
    /// - [`Error::InvalidAlphabetSize`] for fewer than 2 or more than 256
    ///   characters.
    /// - [`Error::UnsupportedCharacter`] for a character above U+00FF.
    /// - [`Error::DuplicateCharacter`] when a character repeats.
    pub fn new(alphabet: &str) -> Result<Self, Error> {
        Alphabet::new(alphabet.chars()).map(Self::from_alphabet)
    }

    /// Creates a codec from raw byte symbols. Byte `b` is the character
    /// with code point `b`, which makes every radix up to 256 reachable.
    ///
    /// ## Errors
    /// Same as [`Codec::new`], minus [`Error::UnsupportedCharacter`].
    pub fn from_bytes(alphabet: &[u8]) -> Result<Self, Error> {
        Alphabet::new(alphabet.iter().copied().map(char::from)).map(Self::from_alphabet)
    }

    /// Creates a codec for radix `n` over `0-9a-z`.
    ///
    /// ## Errors
    /// [`Error::InvalidAlphabetSize`] unless `n` is within 2..=36.
    pub fn lower_base(n: usize) -> Result<Self, Error> {
        Self::alphanumeric(LOWER_BASE36, n)
    }

    /// Creates a codec for radix `n` over `0-9A-Z`.
    ///
    /// ## Errors
    /// [`Error::InvalidAlphabetSize`] unless `n` is within 2..=36.
    pub fn upper_base(n: usize) -> Result<Self, Error> {
        Self::alphanumeric(UPPER_BASE36, n)
    }

    fn alphanumeric(reference: &str, n: usize) -> Result<Self, Error> {
        if !(2..=MAX_ALPHANUMERIC_RADIX).contains(&n) {
            return Err(Error::InvalidAlphabetSize(n));
        }
        Self::new(&reference[..n])
    }

    fn from_alphabet(alphabet: Alphabet) -> Self {
        // ceil(log_radix(2^64)) is the digit count of u64::MAX; one more
        // slot holds the sign. The magnitude of i64::MIN never has more
        // digits than u64::MAX, so signed values fit as well.
        let radix = alphabet.len() as u64;
        let max_encoded_len = u64::MAX.ilog(radix) as usize + 2;

        tracing::debug!(radix, max_encoded_len, "constructed integer codec");

        Self { alphabet, max_encoded_len }
    }

    /// Returns the radix of the codec.
    pub fn base(&self) -> usize {
        self.alphabet.len()
    }

    /// Returns the alphabet the codec was built from.
    pub fn alphabet(&self) -> &str {
        self.alphabet.as_str()
    }

    /// Returns the maximum number of characters an encoded value can take,
    /// including the sign.
    pub fn max_encoded_len(&self) -> usize {
        self.max_encoded_len
    }

    /// Encodes an unsigned integer.
    pub fn encode_u64(&self, n: u64) -> String {
        let mut out = String::new();
        self.encode_u64_into(n, &mut out);
        out
    }

    /// Encodes a signed integer. Negative values are prefixed with `-`.
    pub fn encode_i64(&self, n: i64) -> String {
        let mut out = String::new();
        self.encode_i64_into(n, &mut out);
        out
    }

    /// Encodes an unsigned integer, appending to the provided buffer.
    pub fn encode_u64_into(&self, n: u64, out: &mut String) {
        self.encode_magnitude(n, false, out)
    }

    /// Encodes a signed integer, appending to the provided buffer.
    pub fn encode_i64_into(&self, n: i64, out: &mut String) {
        // `unsigned_abs` keeps the magnitude of i64::MIN (2^63) exact.
        self.encode_magnitude(n.unsigned_abs(), n < 0, out)
    }

    fn encode_magnitude(&self, mut n: u64, negative: bool, out: &mut String) {
        let radix = self.base() as u64;
        let end = self.max_encoded_len;
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let mut pos = end;

        // Least significant digit first, filling the buffer from the back.
        loop {
            pos -= 1;
            buf[pos] = self.alphabet.symbol((n % radix) as usize);
            n /= radix;
            if n == 0 {
                break;
            }
        }

        if negative {
            pos -= 1;
            buf[pos] = MINUS as u8;
        }

        out.reserve(end - pos);
        out.extend(buf[pos..end].iter().copied().map(char::from));
    }

    /// Decodes an unsigned integer.
    ///
    /// ## Errors
    /// - [`Error::EmptyInput`] if `s` is empty.
    /// - [`Error::InvalidCharacter`] for the first character not in the
    ///   alphabet.
    /// - [`Error::Overflow`] if the value exceeds `u64::MAX`.
    pub fn decode_u64(&self, s: &str) -> Result<u64, Error> {
        self.decode_magnitude(s, 0)
            .inspect_err(|error| tracing::trace!(%error, len = s.len(), "failed to decode u64"))
    }

    /// Decodes a signed integer. A leading `-` marks a negative value.
    ///
    /// ## Errors
    /// - [`Error::EmptyInput`] if `s` is empty or only holds the sign.
    /// - [`Error::InvalidCharacter`] for the first character not in the
    ///   alphabet.
    /// - [`Error::Overflow`] if the value is outside the `i64` range.
    pub fn decode_i64(&self, s: &str) -> Result<i64, Error> {
        self.decode_signed(s)
            .inspect_err(|error| tracing::trace!(%error, len = s.len(), "failed to decode i64"))
    }

    fn decode_signed(&self, s: &str) -> Result<i64, Error> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }

        match s.strip_prefix(MINUS) {
            // Two's complement allows a magnitude of exactly 2^63 here,
            // which is i64::MIN.
            Some(digits) => {
                let magnitude = self.decode_magnitude(digits, 1)?;
                0i64.checked_sub_unsigned(magnitude).ok_or(Error::Overflow)
            }
            None => {
                let magnitude = self.decode_magnitude(s, 0)?;
                i64::try_from(magnitude).map_err(|_| Error::Overflow)
            }
        }
    }

    /// Accumulates the digits of `digits`. `offset` is the number of
    /// characters preceding `digits` in the caller's input and only shifts
    /// reported positions.
    fn decode_magnitude(&self, digits: &str, offset: usize) -> Result<u64, Error> {
        if digits.is_empty() {
            return Err(Error::EmptyInput);
        }

        let radix = self.base() as u64;
        let mut n: u64 = 0;

        for (index, character) in digits.chars().enumerate() {
            let digit = self
                .alphabet
                .digit(character)
                .ok_or(Error::InvalidCharacter { character, position: offset + index })?;

            n = n
                .checked_mul(radix)
                .and_then(|shifted| shifted.checked_add(u64::from(digit)))
                .ok_or(Error::Overflow)?;
        }

        Ok(n)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("base", &self.base())
            .field("alphabet", &self.alphabet())
            .field("max_encoded_len", &self.max_encoded_len)
            .finish()
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alphabet())
    }
}

impl FromStr for Codec {
    type Err = Error;

    fn from_str(alphabet: &str) -> Result<Self, Self::Err> {
        Self::new(alphabet)
    }
}

impl TryFrom<&str> for Codec {
    type Error = Error;

    fn try_from(alphabet: &str) -> Result<Self, Self::Error> {
        Self::new(alphabet)
    }
}

impl TryFrom<String> for Codec {
    type Error = Error;

    fn try_from(alphabet: String) -> Result<Self, Self::Error> {
        Self::new(&alphabet)
    }
}

impl serde::Serialize for Codec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.alphabet())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MAX_PROPTEST_ITERATIONS: u32 = 10000;

    /// Builds a codec with `radix` distinct byte symbols starting at an
    /// arbitrary rotation, so symbol order differs from byte order.
    fn rotated_codec(radix: usize, rotation: u8) -> Codec {
        let symbols: Vec<u8> = (0..radix).map(|i| (i as u8).wrapping_add(rotation)).collect();
        Codec::from_bytes(&symbols).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MAX_PROPTEST_ITERATIONS))]

        /// Tests that signed values round-trip for every alphanumeric radix
        #[test]
        fn test_i64_round_trip(radix in 2usize..=36, value: i64) {
            let codec = Codec::lower_base(radix).unwrap();
            let encoded = codec.encode_i64(value);
            prop_assert_eq!(codec.decode_i64(&encoded), Ok(value));
        }

        /// Tests that unsigned values round-trip for every radix
        #[test]
        fn test_u64_round_trip(radix in 2usize..=256, rotation: u8, value: u64) {
            let codec = rotated_codec(radix, rotation);
            let encoded = codec.encode_u64(value);
            prop_assert_eq!(codec.decode_u64(&encoded), Ok(value));
        }

        /// Tests that no encoding exceeds the precomputed buffer bound and
        /// that only zero starts with the digit-0 symbol
        #[test]
        fn test_encoded_length(radix in 2usize..=256, rotation: u8, value: i64) {
            let codec = rotated_codec(radix, rotation);
            let encoded = codec.encode_i64(value);
            prop_assert!(encoded.chars().count() <= codec.max_encoded_len());

            let zero = char::from(codec.alphabet.symbol(0));
            let digits = if value < 0 { &encoded[1..] } else { &encoded[..] };
            if value != 0 {
                prop_assert!(!digits.starts_with(zero));
            } else {
                prop_assert_eq!(digits.chars().count(), 1);
            }
        }

        /// Tests that decimal encoding agrees with the standard library
        #[test]
        fn test_decimal_matches_std(value: i64) {
            let codec = Codec::lower_base(10).unwrap();
            prop_assert_eq!(codec.encode_i64(value), value.to_string());
        }

        /// Tests that decoding agrees with `u64::from_str_radix`, including
        /// the overflow boundary
        #[test]
        fn test_decode_matches_std(radix in 2u32..=36, digits in "[0-9a-z]{1,70}") {
            let codec = Codec::lower_base(radix as usize).unwrap();
            let expected = match u64::from_str_radix(&digits, radix) {
                Ok(value) => Ok(value),
                Err(error) => match error.kind() {
                    std::num::IntErrorKind::PosOverflow => Err(Error::Overflow),
                    _ => {
                        let (position, character) = digits
                            .chars()
                            .enumerate()
                            .find(|(_, c)| c.to_digit(radix).is_none())
                            .unwrap();
                        Err(Error::InvalidCharacter { character, position })
                    }
                },
            };
            prop_assert_eq!(codec.decode_u64(&digits), expected);
        }
    }
}
