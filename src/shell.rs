//! Line-oriented front end driving a [`Session`].

use rand::{CryptoRng, RngCore};
use std::io::{self, BufRead, Write};
use zeroize::Zeroizing;

use crate::error::WalletError;
use crate::host::Host;
use crate::session::{Field, ImportMode, Session};
use crate::wallet::Credential;

const HELP: &str = "\
Commands:
  new                         create a new wallet
  import key <hex>            import from a private key
  import mnemonic <words...>  import from a BIP-39 phrase
  copy address|key|mnemonic   copy a field to the clipboard
  show                        display the current wallet
  clear                       forget the current wallet
  help                        show this help
  quit                        exit";

enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until EOF or `quit`.
///
/// Returns `Err` only for I/O failures and fatal wallet errors.
pub fn run<H, G, R, W>(session: &mut Session<H, G>, input: R, out: &mut W) -> anyhow::Result<()>
where
    H: Host,
    G: RngCore + CryptoRng,
    R: BufRead,
    W: Write,
{
    writeln!(out, "EVM Wallet Generator (type 'help' for commands)")?;
    render(session, out)?;

    for line in input.lines() {
        // May hold a pasted key or phrase.
        let line = Zeroizing::new(line?);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match execute(session, line, out)? {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }
    Ok(())
}

fn execute<H, G, W>(session: &mut Session<H, G>, line: &str, out: &mut W) -> anyhow::Result<Flow>
where
    H: Host,
    G: RngCore + CryptoRng,
    W: Write,
{
    let (command, rest) = split_word(line);

    match command {
        "new" | "create" => {
            writeln!(out, "Creating...")?;
            if let Err(e) = session.create_new() {
                render(session, out)?;
                return Err(fatal(e));
            }
            render(session, out)?;
        }
        "import" => {
            let (mode, value) = split_word(rest);
            let mode = match mode {
                "key" | "privatekey" => ImportMode::PrivateKey,
                "mnemonic" | "phrase" => ImportMode::Mnemonic,
                _ => {
                    writeln!(out, "usage: import key <hex> | import mnemonic <words...>")?;
                    return Ok(Flow::Continue);
                }
            };
            if value.is_empty() {
                writeln!(out, "Nothing to import.")?;
                return Ok(Flow::Continue);
            }
            if let Err(e) = session.import(mode, value) {
                return Err(fatal(e));
            }
            render(session, out)?;
        }
        "copy" => match rest.parse::<Field>() {
            Ok(field) => match session.copy(field) {
                Ok(true) => writeln!(out, "Copied {} to clipboard.", field)?,
                Ok(false) => writeln!(out, "No {} to copy.", field)?,
                Err(e) => writeln!(out, "Clipboard unavailable: {}", e)?,
            },
            Err(e) => writeln!(out, "{}", e)?,
        },
        "show" => render(session, out)?,
        "clear" => {
            session.clear();
            render(session, out)?;
        }
        "help" | "?" => writeln!(out, "{}", HELP)?,
        "quit" | "exit" => return Ok(Flow::Quit),
        other => writeln!(out, "Unknown command '{}'. Type 'help' for commands.", other)?,
    }
    Ok(Flow::Continue)
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (s, ""),
    }
}

fn fatal(e: WalletError) -> anyhow::Error {
    anyhow::anyhow!("Fatal: {}", e)
}

/// Write the error banner (if any) followed by the wallet or the empty state.
pub fn render<H, G, W>(session: &Session<H, G>, out: &mut W) -> io::Result<()>
where
    H: Host,
    G: RngCore + CryptoRng,
    W: Write,
{
    writeln!(out)?;
    if let Some(error) = session.error() {
        writeln!(out, "Error: {}", error)?;
        writeln!(out)?;
    }
    match session.credential() {
        Some(credential) => write_credential(credential, out),
        None => writeln!(out, "No wallet loaded. Use 'new' or 'import'."),
    }
}

/// Plain-text credential view shared by the shell and one-shot commands.
pub fn write_credential<W: Write>(credential: &Credential, out: &mut W) -> io::Result<()> {
    writeln!(out, "Public Address     {}", credential.address)?;
    writeln!(out, "Private Key        {}", credential.private_key)?;
    if credential.has_mnemonic() {
        writeln!(out, "Mnemonic Phrase    {}", credential.mnemonic)?;
    }
    if let Some(path) = &credential.derivation_path {
        writeln!(out, "Derivation Path    {}", path)?;
    }
    writeln!(out, "Balance            {} ETH", credential.balance)?;
    writeln!(out)?;
    writeln!(out, "Never share your private key or mnemonic phrase.")
}
