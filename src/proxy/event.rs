/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Dispatch event types.
//!
//! This module defines the events emitted by the dispatcher after each
//! command has run on the owner thread.

use super::command::{Operation, ProxyCommand};
use super::core::ProxyId;
use serde::{Deserialize, Serialize};

/// Event emitted after a command has been applied to its target.
///
/// Events are emitted in dispatch order and are what the journal stores.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{DispatchEvent, Operation, ProxyCommand, ProxyId};
///
/// let event = DispatchEvent::new(1, 0, ProxyId::new(), ProxyCommand::MouseUp);
/// assert_eq!(event.sequence_num, 1);
/// assert_eq!(event.operation(), Operation::MouseUp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    /// Monotonically increasing sequence number, starting at 1.
    pub sequence_num: u64,

    /// Nanosecond timestamp when the command was dispatched.
    pub timestamp_ns: u64,

    /// The proxy instance that forwarded the command.
    pub proxy_id: ProxyId,

    /// The command that was applied.
    pub command: ProxyCommand,
}

impl DispatchEvent {
    /// Creates a new dispatch event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        proxy_id: ProxyId,
        command: ProxyCommand,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            proxy_id,
            command,
        }
    }

    /// Returns the operation tag of the dispatched command.
    #[inline]
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.command.operation()
    }
}
