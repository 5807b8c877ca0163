//! Generate or import EVM wallets (address, private key, BIP-39 mnemonic).
//!
//! [`WalletCore`] holds the derivation logic; [`Session`] wraps it in the
//! single-wallet state a front end displays.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod host;
pub mod session;
pub mod shell;
#[cfg(test)]
mod testing;
pub mod wallet;

pub use cli::{Args, Command};
pub use config::{WalletConfig, WordCount};
pub use error::{Result, WalletError};
pub use generator::{is_checksum_address, to_checksum_address, WalletCore};
pub use host::{Host, MemoryHost, TerminalHost};
pub use session::{Field, ImportMode, Session, WalletState};
pub use wallet::Credential;
