//! Common types for the Soter wallet adapter
//!
//! Permission, network, and ready-state enums plus the request payloads
//! exchanged with a wallet provider. Wire names are camelCase to match the
//! extension's JSON contract.

use serde::{Deserialize, Serialize};

/// Policy level controlling whether/when the wallet may decrypt on behalf
/// of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecryptPermission {
    /// Decryption is never allowed
    #[serde(rename = "NO_DECRYPT")]
    NoDecrypt,
    /// Each decryption prompts the user
    #[serde(rename = "DECRYPT_UPON_REQUEST")]
    UponRequest,
    /// Decryption is allowed without prompting
    #[serde(rename = "AUTO_DECRYPT")]
    AutoDecrypt,
    /// The application is granted view-key access
    #[serde(rename = "VIEW_KEY_ACCESS")]
    ViewKeyAccess,
}

impl std::fmt::Display for DecryptPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecryptPermission::NoDecrypt => write!(f, "no-decrypt"),
            DecryptPermission::UponRequest => write!(f, "upon-request"),
            DecryptPermission::AutoDecrypt => write!(f, "auto-decrypt"),
            DecryptPermission::ViewKeyAccess => write!(f, "view-key-access"),
        }
    }
}

/// Network a wallet session is established against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletAdapterNetwork {
    #[serde(rename = "mainnet")]
    Mainnet,
    #[serde(rename = "testnet")]
    Testnet,
    #[serde(rename = "localnet")]
    Localnet,
}

impl std::fmt::Display for WalletAdapterNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletAdapterNetwork::Mainnet => write!(f, "mainnet"),
            WalletAdapterNetwork::Testnet => write!(f, "testnet"),
            WalletAdapterNetwork::Localnet => write!(f, "localnet"),
        }
    }
}

/// Lifecycle marker for whether the wallet provider is detected/usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletReadyState {
    /// Provider detected and usable
    Installed,
    /// Detection is still polling; no provider seen yet
    NotDetected,
    /// Provider can be loaded on demand
    Loadable,
    /// No provider source exists at all; terminal
    Unsupported,
}

impl std::fmt::Display for WalletReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletReadyState::Installed => write!(f, "installed"),
            WalletReadyState::NotDetected => write!(f, "not-detected"),
            WalletReadyState::Loadable => write!(f, "loadable"),
            WalletReadyState::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A single program transition within a transaction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Program id (e.g., "credits.aleo")
    pub program: String,
    /// Function to invoke
    pub function_name: String,
    /// Function inputs, as the wallet expects them
    pub inputs: Vec<serde_json::Value>,
}

impl Transition {
    pub fn new(program: &str, function_name: &str, inputs: Vec<serde_json::Value>) -> Self {
        Self {
            program: program.to_string(),
            function_name: function_name.to_string(),
            inputs,
        }
    }
}

/// A transaction submitted for execution through the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Address of the signing account
    pub address: String,
    /// Target chain id (e.g., "mainnet")
    pub chain_id: String,
    /// Transitions to execute
    pub transitions: Vec<Transition>,
    /// Fee in microcredits
    pub fee: u64,
    /// Whether the fee is paid from a private record
    pub fee_private: bool,
}

impl TransactionRequest {
    pub fn new(address: &str, chain_id: &str, transitions: Vec<Transition>, fee: u64) -> Self {
        Self {
            address: address.to_string(),
            chain_id: chain_id.to_string(),
            transitions,
            fee,
            fee_private: true,
        }
    }

    /// Pay the fee from the public balance instead of a private record
    pub fn with_public_fee(mut self) -> Self {
        self.fee_private = false;
        self
    }
}

/// A program deployment submitted through the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    /// Address of the deploying account
    pub address: String,
    /// Target chain id
    pub chain_id: String,
    /// Program source to deploy
    pub program: String,
    /// Fee in microcredits
    pub fee: u64,
    /// Whether the fee is paid from a private record
    pub fee_private: bool,
}

impl DeploymentRequest {
    pub fn new(address: &str, chain_id: &str, program: &str, fee: u64) -> Self {
        Self {
            address: address.to_string(),
            chain_id: chain_id.to_string(),
            program: program.to_string(),
            fee,
            fee_private: true,
        }
    }
}

/// Parameters for a decrypt call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    /// Ciphertext to decrypt
    pub cipher_text: String,
    /// Transition public key, if decrypting a transition output
    pub tpk: Option<String>,
    /// Program the ciphertext belongs to
    pub program_id: Option<String>,
    /// Function that produced the ciphertext
    pub function_name: Option<String>,
    /// Output index within the transition
    pub index: Option<u32>,
}

impl DecryptRequest {
    pub fn new(cipher_text: &str) -> Self {
        Self {
            cipher_text: cipher_text.to_string(),
            tpk: None,
            program_id: None,
            function_name: None,
            index: None,
        }
    }

    pub fn with_tpk(mut self, tpk: &str) -> Self {
        self.tpk = Some(tpk.to_string());
        self
    }

    pub fn with_program(mut self, program_id: &str, function_name: &str, index: u32) -> Self {
        self.program_id = Some(program_id.to_string());
        self.function_name = Some(function_name.to_string());
        self.index = Some(index);
        self
    }
}

/// Adapter configuration
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Application name reported to the wallet
    pub app_name: String,
    /// Provider detection settings
    pub detector: crate::detect::DetectorConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            app_name: "sample".to_string(),
            detector: crate::detect::DetectorConfig::default(),
        }
    }
}

impl AdapterConfig {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_wire_names() {
        let json = serde_json::to_string(&DecryptPermission::ViewKeyAccess).unwrap();
        assert_eq!(json, "\"VIEW_KEY_ACCESS\"");
        let back: DecryptPermission = serde_json::from_str("\"NO_DECRYPT\"").unwrap();
        assert_eq!(back, DecryptPermission::NoDecrypt);
    }

    #[test]
    fn test_network_wire_names() {
        assert_eq!(
            serde_json::to_string(&WalletAdapterNetwork::Testnet).unwrap(),
            "\"testnet\""
        );
        assert_eq!(WalletAdapterNetwork::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn test_transaction_request_camel_case() {
        let tx = TransactionRequest::new(
            "aleo1abc",
            "mainnet",
            vec![Transition::new(
                "credits.aleo",
                "transfer_public",
                vec![serde_json::json!("aleo1def"), serde_json::json!("1u64")],
            )],
            50_000,
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["chainId"], "mainnet");
        assert_eq!(json["feePrivate"], true);
        assert_eq!(json["transitions"][0]["functionName"], "transfer_public");
    }

    #[test]
    fn test_decrypt_request_builder() {
        let req = DecryptRequest::new("record1xyz")
            .with_tpk("tpk1abc")
            .with_program("credits.aleo", "transfer_private", 0);
        assert_eq!(req.tpk.as_deref(), Some("tpk1abc"));
        assert_eq!(req.index, Some(0));
    }
}
