//! The single-wallet state shown to the user.

use log::{error, info};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::io;
use std::str::FromStr;

use crate::error::Result;
use crate::generator::WalletCore;
use crate::host::Host;
use crate::wallet::Credential;

#[derive(Debug, Default, PartialEq, Eq)]
pub enum WalletState {
    #[default]
    NoWallet,
    HasWallet(Credential),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    PrivateKey,
    Mnemonic,
}

/// Credential field that can be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    PrivateKey,
    Mnemonic,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "address" | "addr" => Ok(Field::Address),
            "key" | "privatekey" | "private-key" => Ok(Field::PrivateKey),
            "mnemonic" | "phrase" => Ok(Field::Mnemonic),
            other => Err(format!("unknown field '{other}' (expected address, key or mnemonic)")),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Address => "address",
            Field::PrivateKey => "private key",
            Field::Mnemonic => "mnemonic",
        };
        f.write_str(name)
    }
}

/// Holds at most one credential plus the message of the last failed action.
///
/// The credential is only ever replaced whole by a successful operation;
/// failures set the error message and leave the state alone. `R` is the
/// entropy source used by "create new wallet".
pub struct Session<H: Host, R = OsRng> {
    core: WalletCore,
    host: H,
    rng: R,
    state: WalletState,
    error: Option<String>,
}

impl<H: Host> Session<H, OsRng> {
    pub fn new(core: WalletCore, host: H) -> Self {
        Self::with_rng(core, host, OsRng)
    }
}

impl<H: Host, R: RngCore + CryptoRng> Session<H, R> {
    pub fn with_rng(core: WalletCore, host: H, rng: R) -> Self {
        Self {
            core,
            host,
            rng,
            state: WalletState::NoWallet,
            error: None,
        }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn credential(&self) -> Option<&Credential> {
        match &self.state {
            WalletState::HasWallet(credential) => Some(credential),
            WalletState::NoWallet => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// "Create new wallet" action.
    ///
    /// Only fatal errors are returned; the caller must stop the session on `Err`.
    pub fn create_new(&mut self) -> Result<()> {
        let outcome = self.core.generate_with_rng(&mut self.rng);
        self.apply(outcome)
    }

    /// "Import" action. Recoverable failures are recorded in [`Session::error`].
    pub fn import(&mut self, mode: ImportMode, input: &str) -> Result<()> {
        let outcome = match mode {
            ImportMode::PrivateKey => self.core.import_from_private_key(input),
            ImportMode::Mnemonic => self.core.import_from_mnemonic(input),
        };
        self.apply(outcome)
    }

    /// "Clear" action: drops the credential and any error message.
    pub fn clear(&mut self) {
        if matches!(self.state, WalletState::HasWallet(_)) {
            info!("Wallet cleared");
        }
        self.state = WalletState::NoWallet;
        self.error = None;
    }

    /// "Copy" action. Returns `Ok(false)` when there is nothing to copy.
    pub fn copy(&mut self, field: Field) -> io::Result<bool> {
        let Some(credential) = self.credential() else {
            return Ok(false);
        };
        let value = match field {
            Field::Address => credential.address.clone(),
            Field::PrivateKey => credential.private_key.clone(),
            Field::Mnemonic if credential.has_mnemonic() => credential.mnemonic.clone(),
            Field::Mnemonic => return Ok(false),
        };
        let value = zeroize::Zeroizing::new(value);
        self.host.copy(&value)?;
        Ok(true)
    }

    fn apply(&mut self, outcome: Result<Credential>) -> Result<()> {
        match outcome {
            Ok(mut credential) => {
                credential.balance = self.host.lookup_balance(&credential.address);
                self.state = WalletState::HasWallet(credential);
                self.error = None;
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                error!("{}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Ok(())
            }
        }
    }
}

impl<H: Host, R> fmt::Debug for Session<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("error", &self.error)
            .finish()
    }
}
