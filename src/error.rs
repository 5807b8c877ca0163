//! Error types for wallet generation and import.

use thiserror::Error;

/// Errors produced by [`crate::WalletCore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The private key input is empty, malformed, or not a valid secp256k1 scalar.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKeyFormat(String),

    /// The mnemonic phrase is empty or fails wordlist/checksum validation.
    #[error("Invalid mnemonic phrase: {0}")]
    InvalidMnemonicFormat(String),

    /// The operating system could not supply secure randomness.
    #[error("Failed to create wallet: secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// BIP-32 derivation failed for an otherwise valid seed.
    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

impl WalletError {
    pub fn invalid_private_key(message: impl Into<String>) -> Self {
        Self::InvalidPrivateKeyFormat(message.into())
    }

    pub fn invalid_mnemonic(message: impl Into<String>) -> Self {
        Self::InvalidMnemonicFormat(message.into())
    }

    /// Fatal errors must abort the front end instead of being shown and recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RandomnessUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
