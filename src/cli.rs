use clap::{Parser, Subcommand};

use crate::config::{WalletConfig, WordCount};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a new wallet with a fresh mnemonic
    New,
    /// Import a wallet from a hex private key
    ImportKey {
        /// Private key, with or without 0x (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Import a wallet from a BIP-39 mnemonic phrase
    ImportMnemonic {
        /// Mnemonic phrase (will prompt if not provided)
        #[arg(short, long)]
        mnemonic: Option<String>,
    },
    /// Interactive session (default)
    Shell,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Number of words in generated mnemonics (12, 15, 18, 21 or 24)
    #[arg(short, long, global = true, default_value_t = WordCount::Twelve)]
    pub words: WordCount,

    /// BIP-39 passphrase used when deriving from a mnemonic
    #[arg(short, long, global = true, default_value = "")]
    pub passphrase: String,

    /// Account index in the m/44'/60'/0'/0/{index} path
    #[arg(short = 'i', long, global = true, default_value_t = 0)]
    pub account_index: u32,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl Args {
    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig {
            word_count: self.words,
            passphrase: self.passphrase.clone(),
            account_index: self.account_index,
        }
    }
}
