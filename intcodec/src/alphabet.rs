//! # Alphabet validation and reverse lookup
//!
//! An alphabet is an ordered set of symbols where the symbol at index `i`
//! stands for the digit `i`. Every symbol is a single byte value. When the
//! alphabet is given as text, each character must be a code point in
//! U+0000..=U+00FF, and the byte is that code point (Latin-1). This keeps a
//! full 256 symbol alphabet expressible while every encoded value remains a
//! valid Rust string.
//!
//! The reverse lookup is a table with one slot per byte value, so decoding
//! a symbol is a single index operation.

use crate::error::Error;

/// Smallest supported radix.
pub const MIN_RADIX: usize = 2;

/// Largest supported radix, one symbol for every byte value.
pub const MAX_RADIX: usize = 256;

/// Number of slots in the reverse lookup table.
const LOOKUP_SIZE: usize = 256;

/// A validated alphabet together with its reverse lookup table.
///
/// The invariants below hold for the lifetime of the value and are only
/// checked in [`Alphabet::new`]:
/// - the number of symbols is within [`MIN_RADIX`]..=[`MAX_RADIX`],
/// - no symbol appears twice,
/// - `lookup[symbols[i]] == Some(i)` and every other slot is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// The alphabet as text, kept for display and serialization.
    text: String,
    /// Symbol byte for each digit value.
    symbols: Box<[u8]>,
    /// Digit value for each byte, `None` when the byte is not a symbol.
    lookup: [Option<u8>; LOOKUP_SIZE],
}

#[allow(clippy::len_without_is_empty)]
impl Alphabet {
    /// Validates the given symbols and builds the reverse lookup table.
    ///
    /// ## Errors
    /// - [`Error::InvalidAlphabetSize`] when there are fewer than 2 or more
    ///   than 256 symbols.
    /// - [`Error::UnsupportedCharacter`] when a character does not fit in a
    ///   byte.
    /// - [`Error::DuplicateCharacter`] when a symbol repeats.
    pub fn new<I>(chars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = char>,
    {
        // Buffer at most one symbol past the limit; the rest is only counted.
        let mut iter = chars.into_iter();
        let chars: Vec<char> = iter.by_ref().take(MAX_RADIX + 1).collect();
        if chars.len() > MAX_RADIX {
            return Err(Error::InvalidAlphabetSize(chars.len() + iter.count()));
        }
        if chars.len() < MIN_RADIX {
            return Err(Error::InvalidAlphabetSize(chars.len()));
        }

        let mut symbols = Vec::with_capacity(chars.len());
        let mut lookup = [None; LOOKUP_SIZE];

        for (digit, &ch) in chars.iter().enumerate() {
            let byte = u8::try_from(ch).map_err(|_| Error::UnsupportedCharacter(ch))?;
            let slot = &mut lookup[usize::from(byte)];
            if slot.is_some() {
                return Err(Error::DuplicateCharacter(ch));
            }
            // The size check above bounds `digit` to 0..=255.
            *slot = Some(digit as u8);
            symbols.push(byte);
        }

        Ok(Self {
            text: chars.into_iter().collect(),
            symbols: symbols.into_boxed_slice(),
            lookup,
        })
    }

    /// The number of symbols, which is the radix.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// The alphabet as text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The symbol byte for `digit`. Callers guarantee `digit < self.len()`.
    pub fn symbol(&self, digit: usize) -> u8 {
        self.symbols[digit]
    }

    /// Returns the digit value of `ch`, or `None` if `ch` is not a symbol
    /// of this alphabet.
    pub fn digit(&self, ch: char) -> Option<u8> {
        let byte = u8::try_from(ch).ok()?;
        self.lookup[usize::from(byte)]
    }
}
