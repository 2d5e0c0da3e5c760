//! Configuration for describing a codec in static settings
//!
//! Alphabets usually live in configuration rather than code. [`Settings`]
//! reads a `[codec]` table from an optional TOML file, then applies
//! environment overrides with the `INTCODEC` prefix:
//!
//! ```toml
//! [codec]
//! kind = "custom"
//! alphabet = "0123456789abcdefghjkmnpqrstvwxyz"
//! ```
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::codec::Codec;
use crate::error::Error;
use crate::BASE64;

/// Environment variable prefix for codec settings.
pub const ENV_PREFIX: &str = "INTCODEC";

/// The radix used when the configuration does not name one.
pub const DEFAULT_RADIX: usize = 10;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// The family of alphabet a codec is built from.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// `0-9a-z` truncated to `radix` characters.
    Lower,
    /// `0-9A-Z` truncated to `radix` characters.
    Upper,
    /// The standard base64 alphabet. `radix` is ignored.
    Base64,
    /// The characters of `alphabet`. `radix` is ignored.
    Custom,
}

/// Top-level configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// The codec definition.
    pub codec: CodecConfig,
}

/// Describes how to build a [`Codec`].
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Which alphabet family to use.
    pub kind: CodecKind,
    /// The radix for [`CodecKind::Lower`] and [`CodecKind::Upper`].
    pub radix: usize,
    /// The alphabet for [`CodecKind::Custom`].
    pub alphabet: Option<String>,
}

impl CodecConfig {
    /// Builds the codec described by this configuration.
    pub fn build(&self) -> Result<Codec, Error> {
        match self.kind {
            CodecKind::Lower => Codec::lower_base(self.radix),
            CodecKind::Upper => Codec::upper_base(self.radix),
            CodecKind::Base64 => Ok(BASE64.clone()),
            CodecKind::Custom => Codec::new(self.alphabet.as_deref().unwrap_or_default()),
        }
    }
}

impl Validatable for CodecConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.kind == CodecKind::Custom && self.alphabet.is_none() {
            return Err(ConfigError::Message(
                "[codec] alphabet is required when kind is \"custom\"".to_string(),
            ));
        }

        self.build()
            .map(|_| ())
            .map_err(|err| ConfigError::Message(format!("[codec] {err}")))
    }
}

impl Settings {
    /// Initializing the settings from an optional config file, with
    /// environment variables taking precedence.
    ///
    /// Environment variables follow the nesting of the settings:
    ///
    /// ```text
    /// INTCODEC_CODEC__RADIX
    /// ^^^^^^^^ ^^^^^  ^^^^^
    ///    │    ^  │  ^^  └ The `radix` field of the `codec` object
    ///    │    │  │  └ separator("__")
    ///    │    │  └ The `codec` field of the root object (`Settings`)
    ///    │    └ prefix_separator("_")
    ///    └ with_prefix("INTCODEC")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let mut cfg_builder = Config::builder();
        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        Self::from_builder(cfg_builder)
    }

    /// Same as [`Settings::new`], but reads the TOML document `toml` in
    /// place of a config file.
    pub fn new_from_str(toml: &str) -> Result<Self, ConfigError> {
        let cfg_builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        Self::from_builder(cfg_builder)
    }

    fn from_builder(cfg_builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .prefix_separator("_");

        let cfg = cfg_builder
            .set_default("codec.kind", "lower")?
            .set_default("codec.radix", DEFAULT_RADIX as i64)?
            .add_source(env)
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        tracing::debug!(
            kind = ?settings.codec.kind,
            radix = settings.codec.radix,
            "loaded codec settings"
        );

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()
    }

    /// Builds the configured codec.
    pub fn codec(&self) -> Result<Codec, Error> {
        self.codec.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn empty_config_defaults_to_decimal() {
        let settings = Settings::new_from_str("").unwrap();
        assert_eq!(settings.codec.kind, CodecKind::Lower);
        assert_eq!(settings.codec.radix, DEFAULT_RADIX);
        assert_eq!(settings.codec.alphabet, None);
        assert_eq!(settings.codec().unwrap().alphabet(), "0123456789");
    }

    #[test_case("[codec]\nkind = \"lower\"\nradix = 16" => "0123456789abcdef"; "lower hex")]
    #[test_case("[codec]\nkind = \"upper\"\nradix = 36" => crate::UPPER_BASE36; "upper base 36")]
    #[test_case("[codec]\nkind = \"base64\"\nradix = 2" => crate::STANDARD_BASE64; "base64 ignores radix")]
    #[test_case("[codec]\nkind = \"custom\"\nalphabet = \"xyz\"" => "xyz"; "custom")]
    fn configured_alphabet(toml: &str) -> String {
        let settings = Settings::new_from_str(toml).unwrap();
        settings.codec().unwrap().alphabet().to_string()
    }

    #[test_case("[codec]\nradix = 37" => "[codec] alphabet size must be between 2 and 256, got 37"; "radix too large")]
    #[test_case("[codec]\nkind = \"upper\"\nradix = 1" => "[codec] alphabet size must be between 2 and 256, got 1"; "radix too small")]
    #[test_case("[codec]\nkind = \"custom\"\nalphabet = \"abca\"" => "[codec] duplicate character 'a' in alphabet"; "duplicate")]
    #[test_case("[codec]\nkind = \"custom\"" => "[codec] alphabet is required when kind is \"custom\""; "missing alphabet")]
    fn invalid_config_is_rejected(toml: &str) -> String {
        match Settings::new_from_str(toml) {
            Err(ConfigError::Message(message)) => message,
            other => panic!("expected a validation message, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_a_deserialization_error() {
        let err = Settings::new_from_str("[codec]\nkind = \"octal\"").unwrap_err();
        assert!(
            err.to_string().contains("does not have variant constructor octal"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn codec_config_deserializes_standalone() {
        let json = r#"{"kind": "custom", "radix": 0, "alphabet": "01"}"#;
        let config: CodecConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.build().unwrap().base(), 2);
    }
}
