/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types for the proxy and its owner-side dispatcher.

use thiserror::Error;

/// Errors that can occur when interacting with a [`CallbackProxy`].
///
/// [`CallbackProxy`]: super::CallbackProxy
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The owner side has stopped; the command was not enqueued or will
    /// never be dispatched.
    #[error("proxy has been shut down")]
    Shutdown,

    /// The dedicated owner thread could not be started.
    #[error("failed to spawn owner thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A target method panicked on the owner thread, ending its loop.
    #[error("owner thread panicked: {message}")]
    OwnerPanicked {
        /// The panic payload, if it was a string.
        message: String,
    },

    /// The proxy configuration could not be parsed.
    #[error("invalid proxy configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ProxyError {
    /// Returns `true` if this error means the owner side is gone.
    #[inline]
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }
}
