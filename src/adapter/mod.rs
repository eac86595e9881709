//! Soter wallet adapter
//!
//! The adapter mediates between application code and a wallet provider. It
//! owns the session lifecycle (detection, connect, disconnect), forwards
//! every wallet operation to the provider, translates provider failures into
//! [`WalletAdapterError`], and broadcasts lifecycle events to subscribers.
//!
//! Failure observability is uniform: every operation that can fail emits an
//! [`AdapterEvent::Error`] before returning the error. The one exception is
//! [`disconnect`](SoterWalletAdapter::disconnect), which swallows provider
//! failures into an emitted event and never fails from the caller's side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::detect::{spawn_detector, DetectionHandle};
use crate::error::WalletAdapterError;
use crate::events::{AdapterEvent, AdapterEvents};
use crate::provider::{ProviderProbe, WalletProvider};
use crate::types::{
    AdapterConfig, DecryptPermission, DecryptRequest, DeploymentRequest, TransactionRequest,
    WalletAdapterNetwork, WalletReadyState,
};

/// Display name of the wallet this adapter targets
pub const WALLET_NAME: &str = "Soter Wallet";
/// Install page for the wallet extension
pub const WALLET_URL: &str =
    "https://chrome.google.com/webstore/detail/soter-aleo-wallet/kfpmpkkjaohgchlokcohbaokindffdjk";
/// Wallet icon URL
pub const WALLET_ICON: &str = "https://doc.aleo123.io/icon.png";

/// An established wallet session. Provider handle and public key live and
/// die together, so a half-connected state cannot be observed.
#[derive(Clone)]
struct Session {
    provider: Arc<dyn WalletProvider>,
    public_key: String,
    view_key: Option<String>,
}

struct AdapterInner {
    session: RwLock<Option<Session>>,
    ready_state: RwLock<WalletReadyState>,
    permission: RwLock<DecryptPermission>,
    connecting: AtomicBool,
    events: AdapterEvents,
    probe: Option<ProviderProbe>,
}

/// Wallet adapter for the Soter wallet.
///
/// Create one per application session with [`SoterWalletAdapter::new`] inside
/// a tokio runtime (a detection task is spawned immediately). Concurrent
/// operations are safe with respect to adapter state: each operation clones
/// the session handle before awaiting, so a racing `disconnect` cannot leave
/// state half-torn. No mutual exclusion is provided at the provider boundary;
/// an in-flight provider call proceeds even if the session is dropped
/// locally.
pub struct SoterWalletAdapter {
    inner: Arc<AdapterInner>,
    config: AdapterConfig,
    detection: Option<DetectionHandle>,
}

impl SoterWalletAdapter {
    /// Create an adapter and start polling `probe` for the wallet provider
    pub fn new(probe: ProviderProbe, config: AdapterConfig) -> Self {
        let inner = Arc::new(AdapterInner {
            session: RwLock::new(None),
            ready_state: RwLock::new(WalletReadyState::NotDetected),
            permission: RwLock::new(DecryptPermission::NoDecrypt),
            connecting: AtomicBool::new(false),
            events: AdapterEvents::default(),
            probe: Some(probe.clone()),
        });

        let detection = {
            let inner = inner.clone();
            spawn_detector(config.detector.clone(), probe, move |_provider| async move {
                *inner.ready_state.write().await = WalletReadyState::Installed;
                inner
                    .events
                    .emit(AdapterEvent::ReadyStateChange(WalletReadyState::Installed));
            })
        };

        Self {
            inner,
            config,
            detection: Some(detection),
        }
    }

    /// Create an adapter in a context where no provider can ever exist.
    /// The ready state is `Unsupported` and stays there.
    pub fn without_provider(config: AdapterConfig) -> Self {
        let inner = Arc::new(AdapterInner {
            session: RwLock::new(None),
            ready_state: RwLock::new(WalletReadyState::Unsupported),
            permission: RwLock::new(DecryptPermission::NoDecrypt),
            connecting: AtomicBool::new(false),
            events: AdapterEvents::default(),
            probe: None,
        });
        Self {
            inner,
            config,
            detection: None,
        }
    }

    // =========================================================================
    // Metadata & state accessors
    // =========================================================================

    pub fn name(&self) -> &'static str {
        WALLET_NAME
    }

    pub fn url(&self) -> &'static str {
        WALLET_URL
    }

    pub fn icon(&self) -> &'static str {
        WALLET_ICON
    }

    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    /// Public key of the connected account, if any
    pub async fn public_key(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.public_key.clone())
    }

    /// View key of the connected account, if the wallet exposed one
    pub async fn view_key(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .and_then(|session| session.view_key.clone())
    }

    /// Permission granted at connect time. Defaults to `NoDecrypt` and keeps
    /// the last granted value after disconnect.
    pub async fn decrypt_permission(&self) -> DecryptPermission {
        *self.inner.permission.read().await
    }

    pub fn connecting(&self) -> bool {
        self.inner.connecting.load(Ordering::SeqCst)
    }

    pub async fn connected(&self) -> bool {
        self.inner.session.read().await.is_some()
    }

    pub async fn ready_state(&self) -> WalletReadyState {
        *self.inner.ready_state.read().await
    }

    /// Subscribe to adapter events
    pub fn subscribe(&self) -> broadcast::Receiver<AdapterEvent> {
        self.inner.events.subscribe()
    }

    /// Stop the detection poll. Dropping the adapter does this too.
    pub fn stop_detection(&self) {
        if let Some(detection) = &self.detection {
            detection.cancel();
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Connect to the wallet. Returns Ok immediately when already connected
    /// or connecting; fails with `NotReady` until the provider is detected.
    pub async fn connect(
        &self,
        permission: DecryptPermission,
        network: WalletAdapterNetwork,
    ) -> Result<(), WalletAdapterError> {
        if self.connected().await {
            return Ok(());
        }

        // Claim the connecting flag atomically; a racing second caller sees
        // the claim and returns without touching the provider
        if self
            .inner
            .connecting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let result = self.establish_session(permission, network).await;
        self.inner.connecting.store(false, Ordering::SeqCst);

        match result {
            Ok(public_key) => {
                info!(%public_key, app_name = %self.config.app_name, "wallet connected");
                self.inner.events.emit(AdapterEvent::Connect { public_key });
                Ok(())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    async fn establish_session(
        &self,
        permission: DecryptPermission,
        network: WalletAdapterNetwork,
    ) -> Result<String, WalletAdapterError> {
        if self.ready_state().await != WalletReadyState::Installed {
            return Err(WalletAdapterError::NotReady);
        }

        let provider = self
            .inner
            .probe
            .as_ref()
            .and_then(|probe| probe())
            .ok_or_else(|| WalletAdapterError::connection_msg("wallet provider unavailable"))?;

        provider
            .connect(permission, network)
            .await
            .map_err(WalletAdapterError::connection)?;

        let public_key = provider
            .public_key()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WalletAdapterError::connection_msg("wallet returned no public key"))?;
        let view_key = provider.view_key();

        *self.inner.session.write().await = Some(Session {
            provider,
            public_key: public_key.clone(),
            view_key,
        });
        *self.inner.permission.write().await = permission;

        Ok(public_key)
    }

    /// Disconnect from the wallet. The session is cleared before the provider
    /// is told, so no operation can slip in during teardown. Provider
    /// failures are emitted as events, never returned; a `Disconnect` event
    /// is always emitted last.
    pub async fn disconnect(&self) {
        let session = self.inner.session.write().await.take();

        if let Some(session) = session {
            if let Err(cause) = session.provider.disconnect().await {
                let error = WalletAdapterError::disconnection(cause);
                warn!(%error, "provider disconnect failed");
                self.inner.events.emit(AdapterEvent::Error(error));
            }
            info!("wallet disconnected");
        }

        self.inner.events.emit(AdapterEvent::Disconnect);
    }

    // =========================================================================
    // Signing & decryption
    // =========================================================================

    /// Sign an arbitrary message with the connected account
    pub async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.sign_message(message).await {
            Ok(response) => Ok(response.signature),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Decrypt a ciphertext. Enforced locally before the provider is asked:
    /// a `NoDecrypt` session fails without the provider ever seeing the call.
    pub async fn decrypt(&self, request: DecryptRequest) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;

        if self.decrypt_permission().await == DecryptPermission::NoDecrypt {
            return Err(self.fail(WalletAdapterError::DecryptionNotAllowed));
        }

        match session.provider.decrypt(request).await {
            Ok(response) => Ok(response.text),
            Err(cause) => Err(self.fail(WalletAdapterError::decryption(cause))),
        }
    }

    // =========================================================================
    // Records & history
    // =========================================================================

    /// Records owned by the account under a program
    pub async fn request_records(
        &self,
        program: &str,
    ) -> Result<Vec<serde_json::Value>, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_records(program).await {
            Ok(response) => Ok(response.records),
            Err(cause) => Err(self.fail(WalletAdapterError::records(cause))),
        }
    }

    /// Records with decrypted plaintexts included
    pub async fn request_record_plaintexts(
        &self,
        program: &str,
    ) -> Result<Vec<serde_json::Value>, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_record_plaintexts(program).await {
            Ok(response) => Ok(response.records),
            Err(cause) => Err(self.fail(WalletAdapterError::records(cause))),
        }
    }

    /// Transactions the account has executed against a program
    pub async fn request_transaction_history(
        &self,
        program: &str,
    ) -> Result<Vec<serde_json::Value>, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_transaction_history(program).await {
            Ok(response) => Ok(response.transactions),
            Err(cause) => Err(self.fail(WalletAdapterError::records(cause))),
        }
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Submit a transaction; resolves to its id, or `""` when the wallet
    /// omits one
    pub async fn request_transaction(
        &self,
        transaction: TransactionRequest,
    ) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_transaction(transaction).await {
            Ok(response) => Ok(response.transaction_id.unwrap_or_default()),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Execute a transaction without broadcasting it
    pub async fn request_execution(
        &self,
        transaction: TransactionRequest,
    ) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_execution(transaction).await {
            Ok(response) => Ok(response.transaction_id.unwrap_or_default()),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Submit several transactions; resolves to their ids, or `[]` when the
    /// wallet omits them
    pub async fn request_bulk_transactions(
        &self,
        transactions: Vec<TransactionRequest>,
    ) -> Result<Vec<String>, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_bulk_transactions(transactions).await {
            Ok(response) => Ok(response.transaction_ids.unwrap_or_default()),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Deploy a program
    pub async fn request_deploy(
        &self,
        deployment: DeploymentRequest,
    ) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.request_deploy(deployment).await {
            Ok(response) => Ok(response.transaction_id.unwrap_or_default()),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Status of a previously submitted transaction, or `""` when the wallet
    /// reports none
    pub async fn transaction_status(
        &self,
        transaction_id: &str,
    ) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.transaction_status(transaction_id).await {
            Ok(response) => Ok(response.status.unwrap_or_default()),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    /// Execution trace of a finalized transaction
    pub async fn get_execution(
        &self,
        transaction_id: &str,
    ) -> Result<String, WalletAdapterError> {
        let session = self.session_or_fail().await?;
        match session.provider.get_execution(transaction_id).await {
            Ok(response) => Ok(response.execution),
            Err(cause) => Err(self.fail(WalletAdapterError::transaction(cause))),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Clone the session out of the lock so no lock is held across provider
    /// awaits. `NotConnected` is emitted like any other failure.
    async fn session_or_fail(&self) -> Result<Session, WalletAdapterError> {
        self.inner
            .session
            .read()
            .await
            .clone()
            .ok_or(WalletAdapterError::NotConnected)
            .map_err(|error| self.fail(error))
    }

    /// Emit the failure as an event, then hand it back to the caller
    fn fail(&self, error: WalletAdapterError) -> WalletAdapterError {
        warn!(%error, "wallet operation failed");
        self.inner.events.emit(AdapterEvent::Error(error.clone()));
        error
    }
}
