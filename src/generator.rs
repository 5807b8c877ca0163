use bip39::Mnemonic;
use log::{debug, info};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use tiny_hderive::bip32::ExtendedPrivKey;
use zeroize::Zeroizing;

use crate::config::WalletConfig;
use crate::error::{Result, WalletError};
use crate::wallet::{Credential, PLACEHOLDER_BALANCE};

// Pre-compute and cache the secp256k1 context
thread_local! {
    static SECP: Secp256k1<secp256k1::All> = Secp256k1::new();
}

/// Produces credentials from fresh randomness, a raw private key, or a BIP-39 phrase.
///
/// Every operation is pure: it either returns a complete [`Credential`] or an error,
/// and never touches state outside its return value.
#[derive(Debug, Clone, Default)]
pub struct WalletCore {
    config: WalletConfig,
}

impl WalletCore {
    pub fn new(config: WalletConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Generate a new mnemonic-backed wallet from the operating system CSPRNG.
    pub fn generate(&self) -> Result<Credential> {
        self.generate_with_rng(&mut OsRng)
    }

    /// Generate a new wallet drawing entropy from `rng`.
    ///
    /// A failing source yields [`WalletError::RandomnessUnavailable`]; no weaker
    /// fallback is attempted.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Credential> {
        let mut entropy = Zeroizing::new(vec![0u8; self.config.word_count.entropy_len()]);
        rng.try_fill_bytes(&mut entropy[..])
            .map_err(|e| WalletError::RandomnessUnavailable(e.to_string()))?;

        let mnemonic = Mnemonic::from_entropy(&entropy[..])
            .map_err(|e| WalletError::Derivation(e.to_string()))?;
        let credential = self.credential_from_mnemonic(&mnemonic)?;

        info!("Generated {}-word wallet {}", self.config.word_count, credential.address);
        Ok(credential)
    }

    /// Import a wallet from a hex-encoded 32-byte private key (`0x` prefix optional).
    pub fn import_from_private_key(&self, key: &str) -> Result<Credential> {
        let secret_key = parse_private_key(key).map_err(|e| {
            debug!("Rejected private key import: {}", e);
            e
        })?;

        let credential = Credential {
            address: address_from_secret(&secret_key),
            private_key: encode_secret(&secret_key),
            mnemonic: String::new(),
            balance: PLACEHOLDER_BALANCE.to_string(),
            derivation_path: None,
        };

        info!("Imported wallet {} from private key", credential.address);
        Ok(credential)
    }

    /// Import a wallet from a BIP-39 phrase, deriving the configured account.
    ///
    /// Words are matched case-insensitively and any run of whitespace separates
    /// them; the stored phrase is the normalized form.
    pub fn import_from_mnemonic(&self, phrase: &str) -> Result<Credential> {
        let words: Zeroizing<Vec<String>> =
            Zeroizing::new(phrase.split_whitespace().map(str::to_lowercase).collect());
        let normalized = Zeroizing::new(words.join(" "));
        if normalized.is_empty() {
            debug!("Rejected mnemonic import: empty phrase");
            return Err(WalletError::invalid_mnemonic("mnemonic phrase is empty"));
        }

        let mnemonic = Mnemonic::parse(normalized.as_str()).map_err(|e| {
            debug!("Rejected mnemonic import: {}", e);
            WalletError::invalid_mnemonic(e.to_string())
        })?;
        let credential = self.credential_from_mnemonic(&mnemonic)?;

        info!("Imported wallet {} from mnemonic", credential.address);
        Ok(credential)
    }

    fn credential_from_mnemonic(&self, mnemonic: &Mnemonic) -> Result<Credential> {
        let seed = Zeroizing::new(mnemonic.to_seed(self.config.passphrase.as_str()));
        let path = self.config.derivation_path();
        debug!("Deriving account at {}", path);

        let secret_key = derive_secret_key(&seed[..], &path)?;

        Ok(Credential {
            address: address_from_secret(&secret_key),
            private_key: encode_secret(&secret_key),
            mnemonic: mnemonic.to_string(),
            balance: PLACEHOLDER_BALANCE.to_string(),
            derivation_path: Some(path),
        })
    }
}

/// Parse a private key string into a validated secp256k1 scalar.
pub fn parse_private_key(input: &str) -> Result<SecretKey> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::invalid_private_key("private key is empty"));
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 64 {
        return Err(WalletError::invalid_private_key(format!(
            "expected 64 hex characters, got {}",
            digits.len()
        )));
    }

    let bytes = Zeroizing::new(
        hex::decode(digits).map_err(|e| WalletError::invalid_private_key(e.to_string()))?,
    );
    SecretKey::from_slice(&bytes[..]).map_err(|_| {
        WalletError::invalid_private_key("value is zero or not below the secp256k1 curve order")
    })
}

/// Derive the secret key at `path` (BIP-32) from a BIP-39 seed.
pub fn derive_secret_key(seed: &[u8], path: &str) -> Result<SecretKey> {
    let derived = ExtendedPrivKey::derive(seed, path)
        .map_err(|e| WalletError::Derivation(format!("{:?} at {}", e, path)))?;
    let secret = Zeroizing::new(derived.secret());
    SecretKey::from_slice(&secret[..]).map_err(|e| WalletError::Derivation(e.to_string()))
}

/// EIP-55 address of the account controlled by `secret_key`.
#[inline]
pub fn address_from_secret(secret_key: &SecretKey) -> String {
    SECP.with(|secp| {
        let public_key = PublicKey::from_secret_key(secp, secret_key);

        // Keccak256 of uncompressed pubkey
        let pubkey_uncompressed = public_key.serialize_uncompressed();
        let keccak_hash = Keccak256::digest(&pubkey_uncompressed[1..]); // Skip 0x04
        to_checksum_address(&keccak_hash[12..])
    })
}

/// Encode raw address bytes with the EIP-55 mixed-case checksum.
pub fn to_checksum_address(address_bytes: &[u8]) -> String {
    let addr_hex = hex::encode(address_bytes);
    let hash = Keccak256::digest(addr_hex.as_bytes());

    let mut result = String::with_capacity(addr_hex.len() + 2);
    result.push_str("0x");
    for (i, c) in addr_hex.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0xf;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Whether `s` is a 20-byte address whose letter casing matches its EIP-55 checksum.
pub fn is_checksum_address(s: &str) -> bool {
    let Some(digits) = s.strip_prefix("0x") else {
        return false;
    };
    if digits.len() != 40 {
        return false;
    }
    match hex::decode(digits) {
        Ok(bytes) => to_checksum_address(&bytes) == s,
        Err(_) => false,
    }
}

fn encode_secret(secret_key: &SecretKey) -> String {
    let bytes = Zeroizing::new(secret_key.secret_bytes());
    let digits = Zeroizing::new(hex::encode(&bytes[..]));
    let mut encoded = String::with_capacity(digits.len() + 2);
    encoded.push_str("0x");
    encoded.push_str(&digits);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BrokenRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";
    const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    #[test]
    fn eip55_reference_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let bytes = hex::decode(&expected[2..]).unwrap();
            assert_eq!(to_checksum_address(&bytes), expected);
            assert!(is_checksum_address(expected));
        }
    }

    #[test]
    fn checksum_rejects_wrong_casing_and_length() {
        assert!(!is_checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_checksum_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_checksum_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeA"));
        assert!(!is_checksum_address("0xzzAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    }

    #[test]
    fn key_one_maps_to_known_address() {
        let secret_key = parse_private_key(KEY_ONE).unwrap();
        assert_eq!(
            address_from_secret(&secret_key),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(encode_secret(&secret_key), KEY_ONE);
    }

    #[test]
    fn prefix_case_and_surrounding_whitespace_are_accepted() {
        let bare = parse_private_key(&KEY_ONE[2..]).unwrap();
        let upper = parse_private_key(&format!("0X{}", &KEY_ONE[2..])).unwrap();
        let padded = parse_private_key(&format!("  {KEY_ONE}\n")).unwrap();
        assert_eq!(bare, upper);
        assert_eq!(bare, padded);
    }

    #[test]
    fn scalar_range_is_enforced() {
        let zero = format!("0x{}", "0".repeat(64));
        assert!(matches!(
            parse_private_key(&zero),
            Err(WalletError::InvalidPrivateKeyFormat(_))
        ));
        assert!(matches!(
            parse_private_key(CURVE_ORDER),
            Err(WalletError::InvalidPrivateKeyFormat(_))
        ));

        let below_order = format!("{}40", &CURVE_ORDER[..62]);
        assert!(parse_private_key(&below_order).is_ok());
    }

    #[test]
    fn malformed_keys_are_rejected() {
        let inputs = vec![
            String::new(),
            "   ".to_string(),
            "0x".to_string(),
            "0x1234".to_string(),
            "a".repeat(66),
            format!("0x{}", "g".repeat(64)),
        ];
        for input in &inputs {
            assert!(
                matches!(parse_private_key(input), Err(WalletError::InvalidPrivateKeyFormat(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn broken_randomness_is_fatal() {
        let err = WalletCore::default().generate_with_rng(&mut BrokenRng).unwrap_err();
        assert!(matches!(err, WalletError::RandomnessUnavailable(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let core = WalletCore::default();
        let a = core.generate_with_rng(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = core.generate_with_rng(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.mnemonic.split(' ').count(), 12);
        assert_eq!(a.derivation_path.as_deref(), Some("m/44'/60'/0'/0/0"));
    }

    #[test]
    fn configured_word_count_is_honoured() {
        let core = WalletCore::new(WalletConfig {
            word_count: crate::config::WordCount::TwentyFour,
            ..WalletConfig::default()
        });
        let credential = core.generate_with_rng(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(credential.mnemonic.split(' ').count(), 24);
    }

    struct Recorder(std::sync::Mutex<Vec<(log::Level, String)>>);

    impl log::Log for Recorder {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut records) = self.0.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static RECORDER: Recorder = Recorder(std::sync::Mutex::new(Vec::new()));

    #[test]
    fn rejected_input_stays_below_default_log_filter() {
        let _ = log::set_logger(&RECORDER);
        log::set_max_level(log::LevelFilter::Trace);

        let core = WalletCore::default();
        assert!(core.import_from_private_key("0x1234").is_err());
        assert!(core.import_from_mnemonic("").is_err());
        assert!(core.import_from_mnemonic("abandon abandon abandon").is_err());

        let records = RECORDER.0.lock().unwrap();
        let rejected: Vec<_> = records
            .iter()
            .filter(|(_, message)| message.starts_with("Rejected"))
            .collect();
        assert!(!rejected.is_empty());
        assert!(rejected.iter().all(|(level, _)| *level > log::Level::Warn));
    }

    #[test]
    fn mnemonic_words_are_normalized() {
        let core = WalletCore::default();
        let messy = "  ABANDON abandon\tabandon abandon abandon abandon\nabandon abandon abandon abandon abandon About ";
        let credential = core.import_from_mnemonic(messy).unwrap();
        assert_eq!(
            credential.mnemonic,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
    }
}
