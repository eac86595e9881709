//! In-process wallet provider
//!
//! A reference [`WalletProvider`] backed by an ed25519 keypair held in
//! memory. Useful as a development stand-in for the browser extension and as
//! a test double with real signing. Not a custody solution: keys live in
//! process memory and decryption is a toy scheme for fixtures.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    BulkTransactionsResponse, DecryptResponse, ExecutionResponse, ProviderError, RecordsResponse,
    SignatureResponse, TransactionHistoryResponse, TransactionResponse,
    TransactionStatusResponse, WalletProvider,
};
use crate::types::{
    DecryptPermission, DecryptRequest, DeploymentRequest, TransactionRequest,
    WalletAdapterNetwork,
};

/// Prefix for fixture ciphertexts the local provider can open
const CIPHERTEXT_PREFIX: &str = "ciphertext1";

/// Wallet provider holding its keypair in process memory
pub struct LocalWalletProvider {
    signing_key: SigningKey,
    address: String,
    view_key: String,
    connected: AtomicBool,
    /// Executions recorded per issued transaction id
    submitted: RwLock<HashMap<String, String>>,
    nonce: AtomicU64,
}

impl LocalWalletProvider {
    /// Create a provider with a freshly generated keypair
    pub fn new() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Create a provider from a 32-byte seed (deterministic; for tests)
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(signing_key.verifying_key().as_bytes());
        let view_key = derive_view_key(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            address,
            view_key,
            connected: AtomicBool::new(false),
            submitted: RwLock::new(HashMap::new()),
            nonce: AtomicU64::new(0),
        }
    }

    /// Address of the held account, regardless of session state
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Verifying key matching the signatures this provider produces
    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Build a fixture ciphertext this provider can decrypt back to `text`
    pub fn encrypt_fixture(text: &str) -> String {
        format!("{}{}", CIPHERTEXT_PREFIX, hex::encode(text.as_bytes()))
    }

    fn ensure_connected(&self) -> Result<(), ProviderError> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProviderError::new("wallet not connected"))
        }
    }

    fn next_transaction_id(&self, payload: &[u8]) -> String {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut hasher = Sha256::new();
        hasher.update(payload);
        hasher.update(nonce.to_le_bytes());
        format!("at1{}", hex::encode(&hasher.finalize()[..16]))
    }

    async fn record_submission(
        &self,
        transaction: &TransactionRequest,
    ) -> Result<String, ProviderError> {
        let payload = serde_json::to_vec(transaction)
            .map_err(|e| ProviderError::new(&format!("unencodable transaction: {}", e)))?;
        let id = self.next_transaction_id(&payload);
        let execution = serde_json::to_string(&transaction.transitions)
            .map_err(|e| ProviderError::new(&format!("unencodable transitions: {}", e)))?;
        self.submitted.write().await.insert(id.clone(), execution);
        Ok(id)
    }
}

impl Default for LocalWalletProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWalletProvider")
            .field("address", &self.address)
            .field("signing_key", &"[REDACTED]")
            .field("connected", &self.connected.load(Ordering::SeqCst))
            .finish()
    }
}

#[async_trait::async_trait]
impl WalletProvider for LocalWalletProvider {
    fn public_key(&self) -> Option<String> {
        if self.connected.load(Ordering::SeqCst) {
            Some(self.address.clone())
        } else {
            None
        }
    }

    fn view_key(&self) -> Option<String> {
        if self.connected.load(Ordering::SeqCst) {
            Some(self.view_key.clone())
        } else {
            None
        }
    }

    async fn connect(
        &self,
        permission: DecryptPermission,
        network: WalletAdapterNetwork,
    ) -> Result<(), ProviderError> {
        debug!(%permission, %network, address = %self.address, "local provider connect");
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<SignatureResponse, ProviderError> {
        self.ensure_connected()?;
        let signature = self.signing_key.sign(message);
        Ok(SignatureResponse {
            signature: signature.to_bytes().to_vec(),
        })
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<DecryptResponse, ProviderError> {
        self.ensure_connected()?;
        let payload = request
            .cipher_text
            .strip_prefix(CIPHERTEXT_PREFIX)
            .ok_or_else(|| ProviderError::new("unrecognized ciphertext"))?;
        let bytes = hex::decode(payload)
            .map_err(|_| ProviderError::new("malformed ciphertext payload"))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ProviderError::new("ciphertext payload is not utf-8"))?;
        Ok(DecryptResponse { text })
    }

    async fn request_records(&self, _program: &str) -> Result<RecordsResponse, ProviderError> {
        self.ensure_connected()?;
        Ok(RecordsResponse::default())
    }

    async fn request_record_plaintexts(
        &self,
        _program: &str,
    ) -> Result<RecordsResponse, ProviderError> {
        self.ensure_connected()?;
        Ok(RecordsResponse::default())
    }

    async fn request_transaction_history(
        &self,
        _program: &str,
    ) -> Result<TransactionHistoryResponse, ProviderError> {
        self.ensure_connected()?;
        Ok(TransactionHistoryResponse::default())
    }

    async fn request_transaction(
        &self,
        transaction: TransactionRequest,
    ) -> Result<TransactionResponse, ProviderError> {
        self.ensure_connected()?;
        let id = self.record_submission(&transaction).await?;
        Ok(TransactionResponse {
            transaction_id: Some(id),
        })
    }

    async fn request_execution(
        &self,
        transaction: TransactionRequest,
    ) -> Result<TransactionResponse, ProviderError> {
        self.ensure_connected()?;
        let id = self.record_submission(&transaction).await?;
        Ok(TransactionResponse {
            transaction_id: Some(id),
        })
    }

    async fn request_bulk_transactions(
        &self,
        transactions: Vec<TransactionRequest>,
    ) -> Result<BulkTransactionsResponse, ProviderError> {
        self.ensure_connected()?;
        let mut ids = Vec::with_capacity(transactions.len());
        for transaction in &transactions {
            ids.push(self.record_submission(transaction).await?);
        }
        Ok(BulkTransactionsResponse {
            transaction_ids: Some(ids),
        })
    }

    async fn request_deploy(
        &self,
        deployment: DeploymentRequest,
    ) -> Result<TransactionResponse, ProviderError> {
        self.ensure_connected()?;
        let id = self.next_transaction_id(deployment.program.as_bytes());
        self.submitted.write().await.insert(id.clone(), "[]".to_string());
        Ok(TransactionResponse {
            transaction_id: Some(id),
        })
    }

    async fn transaction_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatusResponse, ProviderError> {
        self.ensure_connected()?;
        if self.submitted.read().await.contains_key(transaction_id) {
            Ok(TransactionStatusResponse {
                status: Some("Finalized".to_string()),
            })
        } else {
            Err(ProviderError::new("unknown transaction id"))
        }
    }

    async fn get_execution(
        &self,
        transaction_id: &str,
    ) -> Result<ExecutionResponse, ProviderError> {
        self.ensure_connected()?;
        self.submitted
            .read()
            .await
            .get(transaction_id)
            .map(|execution| ExecutionResponse {
                execution: execution.clone(),
            })
            .ok_or_else(|| ProviderError::new("unknown transaction id"))
    }
}

/// Derive a stable `aleo1…` address string from verifying-key bytes
fn derive_address(key_bytes: &[u8]) -> String {
    let digest = Sha256::digest(key_bytes);
    format!("aleo1{}", hex::encode(&digest[..20]))
}

/// Derive a stable view-key string from verifying-key bytes
fn derive_view_key(key_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"view");
    hasher.update(key_bytes);
    format!("AViewKey1{}", hex::encode(&hasher.finalize()[..16]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};

    fn connected_provider() -> LocalWalletProvider {
        let provider = LocalWalletProvider::from_seed([7u8; 32]);
        provider.connected.store(true, Ordering::SeqCst);
        provider
    }

    #[test]
    fn test_deterministic_address_from_seed() {
        let a = LocalWalletProvider::from_seed([1u8; 32]);
        let b = LocalWalletProvider::from_seed([1u8; 32]);
        let c = LocalWalletProvider::from_seed([2u8; 32]);
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), c.address());
        assert!(a.address().starts_with("aleo1"));
    }

    #[test]
    fn test_keys_hidden_until_connected() {
        let provider = LocalWalletProvider::from_seed([3u8; 32]);
        assert_eq!(provider.public_key(), None);
        assert_eq!(provider.view_key(), None);
    }

    #[tokio::test]
    async fn test_sign_message_verifies() {
        let provider = connected_provider();
        let message = b"authorize session 42";
        let response = provider.sign_message(message).await.unwrap();

        let bytes: [u8; 64] = response.signature.as_slice().try_into().unwrap();
        let signature = Signature::from_bytes(&bytes);
        assert!(provider.verifying_key().verify(message, &signature).is_ok());
    }

    #[tokio::test]
    async fn test_sign_requires_session() {
        let provider = LocalWalletProvider::from_seed([4u8; 32]);
        let err = provider.sign_message(b"hi").await.unwrap_err();
        assert!(err.to_string().contains("not connected"));
    }

    #[tokio::test]
    async fn test_decrypt_fixture_roundtrip() {
        let provider = connected_provider();
        let cipher = LocalWalletProvider::encrypt_fixture("42u64.private");
        let response = provider
            .decrypt(DecryptRequest::new(&cipher))
            .await
            .unwrap();
        assert_eq!(response.text, "42u64.private");
    }

    #[tokio::test]
    async fn test_decrypt_rejects_unknown_ciphertext() {
        let provider = connected_provider();
        let err = provider
            .decrypt(DecryptRequest::new("record1garbage"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unrecognized"));
    }

    #[tokio::test]
    async fn test_transaction_lifecycle() {
        let provider = connected_provider();
        let tx = TransactionRequest::new("aleo1abc", "testnet", vec![], 10_000);

        let response = provider.request_transaction(tx).await.unwrap();
        let id = response.transaction_id.unwrap();
        assert!(id.starts_with("at1"));

        let status = provider.transaction_status(&id).await.unwrap();
        assert_eq!(status.status.as_deref(), Some("Finalized"));

        let execution = provider.get_execution(&id).await.unwrap();
        assert_eq!(execution.execution, "[]");
    }

    #[tokio::test]
    async fn test_unknown_transaction_id_rejected() {
        let provider = connected_provider();
        assert!(provider.transaction_status("at1missing").await.is_err());
        assert!(provider.get_execution("at1missing").await.is_err());
    }

    #[tokio::test]
    async fn test_bulk_ids_are_distinct() {
        let provider = connected_provider();
        let tx = TransactionRequest::new("aleo1abc", "testnet", vec![], 10_000);
        let response = provider
            .request_bulk_transactions(vec![tx.clone(), tx])
            .await
            .unwrap();
        let ids = response.transaction_ids.unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
