//! soter-wallet-adapter - Soter wallet adapter for Aleo applications
//!
//! Connects application code to a Soter wallet provider: session lifecycle,
//! message signing, decryption, record queries, and transaction submission,
//! with typed lifecycle events for observers.
//!
//! The wallet itself is behind the [`provider::WalletProvider`] trait. In a
//! browser-bridge deployment the probe resolves to the extension's injected
//! object; in tests and local development
//! [`provider::LocalWalletProvider`] stands in with a real in-memory keypair.
//!
//! ```no_run
//! use std::sync::Arc;
//! use soter_wallet_adapter::{
//!     AdapterConfig, DecryptPermission, LocalWalletProvider, ProviderProbe,
//!     SoterWalletAdapter, WalletAdapterNetwork, WalletProvider,
//! };
//!
//! # async fn run() -> Result<(), soter_wallet_adapter::WalletAdapterError> {
//! let provider = Arc::new(LocalWalletProvider::new());
//! let probe: ProviderProbe = Arc::new(move || {
//!     Some(provider.clone() as Arc<dyn WalletProvider>)
//! });
//!
//! let adapter = SoterWalletAdapter::new(probe, AdapterConfig::new("my-app"));
//! adapter
//!     .connect(DecryptPermission::UponRequest, WalletAdapterNetwork::Testnet)
//!     .await?;
//! let signature = adapter.sign_message(b"login challenge").await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod detect;
pub mod error;
pub mod events;
pub mod provider;
pub mod types;

// Re-export the public surface
pub use adapter::{SoterWalletAdapter, WALLET_ICON, WALLET_NAME, WALLET_URL};
pub use detect::{DetectionHandle, DetectorConfig};
pub use error::WalletAdapterError;
pub use events::{AdapterEvent, AdapterEvents};
pub use provider::{LocalWalletProvider, ProviderError, ProviderProbe, WalletProvider};
pub use types::{
    AdapterConfig, DecryptPermission, DecryptRequest, DeploymentRequest, TransactionRequest,
    Transition, WalletAdapterNetwork, WalletReadyState,
};
