//! Top-level error type for the intcodec library
//!

/// Errors that can occur while building a [`Codec`](crate::Codec) or while
/// decoding with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The alphabet must hold between 2 and 256 characters. The bounded
    /// constructors ([`Codec::lower_base`](crate::Codec::lower_base) and
    /// [`Codec::upper_base`](crate::Codec::upper_base)) also report a radix
    /// outside of 2 to 36 with this variant.
    #[error("alphabet size must be between 2 and 256, got {0}")]
    InvalidAlphabetSize(usize),

    /// The same character appears more than once in the alphabet.
    #[error("duplicate character {0:?} in alphabet")]
    DuplicateCharacter(char),

    /// The alphabet contains a character that does not fit in a single byte
    /// (a code point above U+00FF).
    #[error("alphabet character {0:?} is outside of U+0000..=U+00FF")]
    UnsupportedCharacter(char),

    /// Attempted to decode from an empty input.
    #[error("empty input")]
    EmptyInput,

    /// The input contains a character that is not part of the alphabet.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character index of the offending character within the input.
        position: usize,
    },

    /// The decoded value does not fit in the target integer type.
    #[error("integer overflow while decoding")]
    Overflow,
}
