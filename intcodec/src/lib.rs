#![deny(missing_docs)]

//! # intcodec
//!
//! Encoding and decoding of 64-bit integers in any radix from 2 to 256,
//! using a caller supplied alphabet. See [`Codec`] for the format.
//!
//! ```
//! use intcodec::Codec;
//!
//! let hex = Codec::lower_base(16).unwrap();
//! assert_eq!(hex.encode_i64(i64::MIN), "-8000000000000000");
//! assert_eq!(hex.decode_u64("ff"), Ok(255));
//!
//! assert_eq!(intcodec::BASE64.encode_u64(63), "/");
//! ```
use std::sync::LazyLock;

mod alphabet;
pub mod codec;
pub mod config;
pub mod error;

pub use codec::Codec;
pub use error::Error;

/// Reference alphabet for [`Codec::lower_base`]: the digits followed by
/// the lower case letters.
pub const LOWER_BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Reference alphabet for [`Codec::upper_base`]: the digits followed by
/// the upper case letters.
pub const UPPER_BASE36: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The standard base64 alphabet from RFC 4648, without padding.
pub const STANDARD_BASE64: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// A codec over [`STANDARD_BASE64`], built on first use.
pub static BASE64: LazyLock<Codec> =
    LazyLock::new(|| Codec::new(STANDARD_BASE64).expect("standard base64 alphabet is valid"));
