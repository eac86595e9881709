//! Wallet provider interface
//!
//! The adapter never talks to a wallet directly; it talks to a
//! [`WalletProvider`], an injected capability standing in for whatever
//! actually holds the keys (a browser extension bridge, a remote signer, or
//! the in-process [`LocalWalletProvider`](local::LocalWalletProvider)).
//! All providers implement the same trait, giving the adapter a consistent
//! API for:
//! - Session management (connect, disconnect)
//! - Signing and decryption
//! - Record and transaction-history queries
//! - Transaction submission and status tracking

pub mod local;

pub use local::LocalWalletProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::{
    DecryptPermission, DecryptRequest, DeploymentRequest, TransactionRequest,
    WalletAdapterNetwork,
};

/// Lookup function the adapter polls to locate a provider.
///
/// Returns `Some` once the provider is available (e.g., the extension has
/// injected itself), `None` while it is not.
pub type ProviderProbe = Arc<dyn Fn() -> Option<Arc<dyn WalletProvider>> + Send + Sync>;

/// Error reported by a wallet provider
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Human-readable failure description
    pub message: String,
    /// Provider-specific error code, when one exists
    pub code: Option<i32>,
}

impl ProviderError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            code: None,
        }
    }

    pub fn with_code(message: &str, code: i32) -> Self {
        Self {
            message: message.to_string(),
            code: Some(code),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Response to a message-signing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub signature: Vec<u8>,
}

/// Response to a decrypt request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub text: String,
}

/// Response to a records or record-plaintexts request.
/// Record shapes are wallet-defined, so entries stay schemaless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    pub records: Vec<serde_json::Value>,
}

/// Response to a transaction-history request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<serde_json::Value>,
}

/// Response to a single transaction, execution, or deploy request.
/// Some wallets omit the id on fire-and-forget submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction_id: Option<String>,
}

/// Response to a bulk transaction request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransactionsResponse {
    pub transaction_ids: Option<Vec<String>>,
}

/// Response to a transaction-status query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusResponse {
    pub status: Option<String>,
}

/// Response to an execution query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub execution: String,
}

/// Capability trait for a wallet that can hold a session, sign, decrypt,
/// and submit transactions on behalf of the application
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Public key of the active account, if a session is established
    fn public_key(&self) -> Option<String>;

    /// View key of the active account, if the wallet exposes one
    fn view_key(&self) -> Option<String>;

    // =========================================================================
    // Session
    // =========================================================================

    /// Establish a session with the given permission on the given network
    async fn connect(
        &self,
        permission: DecryptPermission,
        network: WalletAdapterNetwork,
    ) -> Result<(), ProviderError>;

    /// Tear down the session
    async fn disconnect(&self) -> Result<(), ProviderError>;

    // =========================================================================
    // Signing & decryption
    // =========================================================================

    /// Sign an arbitrary message with the account key
    async fn sign_message(&self, message: &[u8]) -> Result<SignatureResponse, ProviderError>;

    /// Decrypt a ciphertext
    async fn decrypt(&self, request: DecryptRequest) -> Result<DecryptResponse, ProviderError>;

    // =========================================================================
    // Records & history
    // =========================================================================

    /// Records owned by the account under a program
    async fn request_records(&self, program: &str) -> Result<RecordsResponse, ProviderError>;

    /// Records with decrypted plaintexts included
    async fn request_record_plaintexts(
        &self,
        program: &str,
    ) -> Result<RecordsResponse, ProviderError>;

    /// Transactions the account has executed against a program
    async fn request_transaction_history(
        &self,
        program: &str,
    ) -> Result<TransactionHistoryResponse, ProviderError>;

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Submit a transaction for execution
    async fn request_transaction(
        &self,
        transaction: TransactionRequest,
    ) -> Result<TransactionResponse, ProviderError>;

    /// Execute a transaction without broadcasting it
    async fn request_execution(
        &self,
        transaction: TransactionRequest,
    ) -> Result<TransactionResponse, ProviderError>;

    /// Submit several transactions at once
    async fn request_bulk_transactions(
        &self,
        transactions: Vec<TransactionRequest>,
    ) -> Result<BulkTransactionsResponse, ProviderError>;

    /// Deploy a program
    async fn request_deploy(
        &self,
        deployment: DeploymentRequest,
    ) -> Result<TransactionResponse, ProviderError>;

    /// Status of a previously submitted transaction
    async fn transaction_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatusResponse, ProviderError>;

    /// Execution trace of a finalized transaction
    async fn get_execution(
        &self,
        transaction_id: &str,
    ) -> Result<ExecutionResponse, ProviderError>;
}
