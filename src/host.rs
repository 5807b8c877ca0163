//! Side effects the front end needs from its environment.
//!
//! Clipboard writes and balance lookups sit behind [`Host`] so that the
//! session logic can be driven in tests without a terminal or a network.

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use std::io::{self, Write};

use crate::wallet::PLACEHOLDER_BALANCE;

/// Capabilities supplied by the environment hosting a wallet session.
pub trait Host {
    /// Place `text` on the clipboard verbatim.
    fn copy(&mut self, text: &str) -> io::Result<()>;

    /// Balance to display for `address`, as a decimal string.
    fn lookup_balance(&self, address: &str) -> String;
}

/// Terminal host: copies through the OSC 52 escape sequence and reports a zero balance.
///
/// Terminals that support OSC 52 forward the payload to the system clipboard;
/// others ignore the sequence.
pub struct TerminalHost<W: Write> {
    out: W,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalHost<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Host for TerminalHost<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        let payload = general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload)?;
        self.out.flush()
    }

    fn lookup_balance(&self, address: &str) -> String {
        debug!("Balance lookup for {} answered locally", address);
        PLACEHOLDER_BALANCE.to_string()
    }
}

/// In-memory host that records the last copied value.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub clipboard: Option<String>,
}

impl Host for MemoryHost {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    fn lookup_balance(&self, _address: &str) -> String {
        PLACEHOLDER_BALANCE.to_string()
    }
}
