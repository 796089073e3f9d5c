/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Cross-thread command proxy.
//!
//! This module forwards calls made against two capability interfaces,
//! [`EventSender`] and [`LayoutTestController`], from any thread to one owner
//! thread that holds the real implementations.
//!
//! # Architecture
//!
//! - Each call is packed into a typed [`ProxyCommand`] on the caller's thread
//! - Commands go through an unbounded multi-producer, single-consumer queue
//! - The [`Dispatcher`] dequeues them on the owner thread in FIFO order and
//!   applies each one to the target that declared the method
//! - Each dispatch receives a monotonic sequence number and nanosecond timestamp
//! - Callers that need completion use a [`DispatchTicket`]; everything else is
//!   fire-and-forget
//! - Dispatched events can be journaled and replayed
//!
//! # Examples
//!
//! ```
//! use callback_proxy::proxy::{
//!     CallbackProxy, EventSender, LayoutTestController, ProxyCommand, ProxyConfig,
//!     RecordingTarget,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = RecordingTarget::new();
//! let (mut proxy, handle) =
//!     CallbackProxy::spawn(target.clone(), target.clone(), ProxyConfig::default())?;
//!
//! // From any thread holding a clone of `proxy`:
//! proxy.mouse_move_to(10, 20);
//! proxy.mouse_up();
//! proxy.set_accepts_editing(true);
//!
//! proxy.shutdown()?;
//! handle.join()?;
//!
//! assert_eq!(target.calls()[0], ProxyCommand::MouseMoveTo { x: 10, y: 20 });
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod capability;
pub mod command;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod journal;
pub mod receipt;
pub mod recording;
pub mod replay;

#[cfg(test)]
mod tests;

// Re-export main types
pub use capability::{Capability, EventSender, LayoutTestController};
pub use command::{Operation, ProxyCommand};
pub use config::ProxyConfig;
pub use self::core::{CallbackProxy, ProxyId};
pub use dispatcher::{DispatchSummary, Dispatcher, DispatcherHandle, StopReason};
pub use error::ProxyError;
pub use event::DispatchEvent;
pub use receipt::{DispatchReceipt, DispatchTicket};
pub use recording::RecordingTarget;
pub use replay::{ReplayEngine, ReplayError};
