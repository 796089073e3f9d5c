/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Dispatch receipt types.
//!
//! Plain forwarded calls are fire-and-forget. A caller that needs to know
//! when its command ran submits it with
//! [`CallbackProxy::submit_with_receipt`] and holds on to the returned
//! [`DispatchTicket`].
//!
//! [`CallbackProxy::submit_with_receipt`]: super::CallbackProxy::submit_with_receipt

use super::command::Operation;
use super::error::ProxyError;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Receipt delivered once a command has run on the owner thread.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{DispatchReceipt, Operation};
///
/// let receipt = DispatchReceipt::new(42, 0, Operation::NotifyDone);
/// assert_eq!(receipt.sequence_num, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// The sequence number assigned at dispatch.
    pub sequence_num: u64,

    /// Nanosecond timestamp of the dispatch.
    pub timestamp_ns: u64,

    /// The operation that was dispatched.
    pub operation: Operation,
}

impl DispatchReceipt {
    /// Creates a new receipt.
    #[must_use]
    pub fn new(sequence_num: u64, timestamp_ns: u64, operation: Operation) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            operation,
        }
    }
}

/// Pending receipt for one submitted command.
#[derive(Debug)]
pub struct DispatchTicket {
    rx: oneshot::Receiver<DispatchReceipt>,
}

impl DispatchTicket {
    pub(crate) fn new(rx: oneshot::Receiver<DispatchReceipt>) -> Self {
        Self { rx }
    }

    /// Blocks the current thread until the command has been dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the command was discarded or the
    /// owner thread stopped before reaching it.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context; use
    /// [`recv`](Self::recv) there instead.
    pub fn wait(self) -> Result<DispatchReceipt, ProxyError> {
        self.rx.blocking_recv().map_err(|_| ProxyError::Shutdown)
    }

    /// Waits asynchronously until the command has been dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the command will never run.
    pub async fn recv(self) -> Result<DispatchReceipt, ProxyError> {
        self.rx.await.map_err(|_| ProxyError::Shutdown)
    }

    /// Returns the receipt if the command has already run, without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the command will never run.
    pub fn try_receipt(&mut self) -> Result<Option<DispatchReceipt>, ProxyError> {
        match self.rx.try_recv() {
            Ok(receipt) => Ok(Some(receipt)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(ProxyError::Shutdown),
        }
    }
}
