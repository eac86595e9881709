//! Adapter error types
//!
//! Unified error surface for all wallet operations. Every variant is
//! clonable so failures can also be broadcast as events.

use crate::provider::ProviderError;

/// Errors returned by [`SoterWalletAdapter`](crate::adapter::SoterWalletAdapter)
/// operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum WalletAdapterError {
    /// Wallet provider absent or not yet detected
    #[error("wallet not ready: provider not detected")]
    NotReady,

    /// Provider rejected the connection or returned no public key
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        cause: Option<ProviderError>,
    },

    /// Operation attempted without an active session
    #[error("wallet not connected")]
    NotConnected,

    /// Decryption forbidden under the current permission policy
    #[error("decryption not allowed under permission policy")]
    DecryptionNotAllowed,

    /// Provider decrypt call failed
    #[error("decryption failed: {message}")]
    Decryption {
        message: String,
        #[source]
        cause: Option<ProviderError>,
    },

    /// Provider records/history call failed
    #[error("records request failed: {message}")]
    Records {
        message: String,
        #[source]
        cause: Option<ProviderError>,
    },

    /// Provider signing or transaction call failed
    #[error("transaction failed: {message}")]
    Transaction {
        message: String,
        #[source]
        cause: Option<ProviderError>,
    },

    /// Provider disconnect call failed (emitted as an event, never returned
    /// from `disconnect`)
    #[error("disconnection failed: {message}")]
    Disconnection {
        message: String,
        #[source]
        cause: Option<ProviderError>,
    },
}

impl WalletAdapterError {
    pub fn connection(cause: ProviderError) -> Self {
        WalletAdapterError::Connection {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    pub fn connection_msg(message: &str) -> Self {
        WalletAdapterError::Connection {
            message: message.to_string(),
            cause: None,
        }
    }

    pub fn decryption(cause: ProviderError) -> Self {
        WalletAdapterError::Decryption {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    pub fn records(cause: ProviderError) -> Self {
        WalletAdapterError::Records {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    pub fn transaction(cause: ProviderError) -> Self {
        WalletAdapterError::Transaction {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    pub fn disconnection(cause: ProviderError) -> Self {
        WalletAdapterError::Disconnection {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }
}
