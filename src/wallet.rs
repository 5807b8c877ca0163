use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Balance shown for every credential; no chain is ever queried.
pub const PLACEHOLDER_BALANCE: &str = "0";

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub address: String,  // EIP-55 checksummed
    #[serde(rename = "privateKey")]
    pub private_key: String,  // 0x + 64 lowercase hex
    pub mnemonic: String,  // empty when imported from a raw key
    pub balance: String,
    #[serde(rename = "derivationPath", skip_serializing_if = "Option::is_none")]
    pub derivation_path: Option<String>,
}

impl Credential {
    pub fn has_mnemonic(&self) -> bool {
        !self.mnemonic.is_empty()
    }
}

// Secrets stay out of debug output and logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("mnemonic", &if self.has_mnemonic() { "<redacted>" } else { "" })
            .field("balance", &self.balance)
            .field("derivation_path", &self.derivation_path)
            .finish()
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.mnemonic.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credential {
        Credential {
            address: "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".to_string(),
            private_key: format!("0x{}01", "0".repeat(62)),
            mnemonic: String::new(),
            balance: PLACEHOLDER_BALANCE.to_string(),
            derivation_path: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["address"], "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
        assert!(json["privateKey"].as_str().unwrap().ends_with("01"));
        assert_eq!(json["mnemonic"], "");
        assert_eq!(json["balance"], "0");
        assert!(json.get("derivationPath").is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut credential = sample();
        credential.mnemonic = "abandon about".to_string();
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"));
        assert!(!rendered.contains(&credential.private_key));
        assert!(!rendered.contains("abandon"));
    }
}
