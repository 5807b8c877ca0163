use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard EVM derivation path prefix (BIP-44, coin type 60).
pub const EVM_PATH_PREFIX: &str = "m/44'/60'/0'/0";

/// Number of words in a generated BIP-39 phrase.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    #[default]
    Twelve,
    Fifteen,
    Eighteen,
    TwentyOne,
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::Fifteen => 15,
            WordCount::Eighteen => 18,
            WordCount::TwentyOne => 21,
            WordCount::TwentyFour => 24,
        }
    }

    /// Entropy length in bytes (ENT / 8).
    pub fn entropy_len(self) -> usize {
        self.words() * 4 / 3
    }
}

impl TryFrom<usize> for WordCount {
    type Error = String;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        match words {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(format!("unsupported word count {other} (expected 12, 15, 18, 21 or 24)")),
        }
    }
}

impl From<WordCount> for usize {
    fn from(count: WordCount) -> Self {
        count.words()
    }
}

impl FromStr for WordCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a word count"))?;
        WordCount::try_from(words)
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words())
    }
}

/// Settings shared by the generate and import-by-mnemonic operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletConfig {
    pub word_count: WordCount,
    /// BIP-39 passphrase ("25th word"), empty by default.
    pub passphrase: String,
    pub account_index: u32,
}

impl WalletConfig {
    /// Full BIP-44 path of the configured account.
    pub fn derivation_path(&self) -> String {
        format!("{}/{}", EVM_PATH_PREFIX, self.account_index)
    }
}
