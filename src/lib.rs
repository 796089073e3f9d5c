/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # callback-proxy
//!
//! A cross-thread command proxy for UI test automation.
//!
//! Test scripts and harness code call into an event-injection capability
//! ([`EventSender`]) and a test-control capability
//! ([`LayoutTestController`]) from whatever thread they happen to run on.
//! The real implementations must only ever be touched by a single owner
//! thread. [`CallbackProxy`] bridges the two: it implements both
//! capabilities, turns each call into an immutable [`ProxyCommand`], and
//! queues it for the owner thread, where a [`Dispatcher`] replays the calls
//! in submission order.
//!
//! ## Guarantees
//!
//! - Callers never block: enqueueing is unbounded and always succeeds while
//!   the owner side is running.
//! - FIFO delivery: commands are dispatched in exactly the order they were
//!   enqueued; commands from one producer keep their local order.
//! - Argument fidelity: commands are typed per operation, so what the target
//!   receives is exactly what the caller passed.
//! - Explicit shutdown: [`CallbackProxy::shutdown`] or dropping every proxy
//!   clone stops the owner loop; see [`proxy::dispatcher`] for the policy.
//!
//! ## Modules
//!
//! - [`proxy`]: capabilities, commands, the proxy handle, the dispatcher,
//!   receipts, journaling and replay.

pub mod proxy;

pub use proxy::{
    CallbackProxy, Capability, DispatchEvent, DispatchReceipt, DispatchSummary, DispatchTicket,
    Dispatcher, DispatcherHandle, EventSender, LayoutTestController, Operation, ProxyCommand,
    ProxyConfig, ProxyError, ProxyId, RecordingTarget, ReplayEngine, ReplayError, StopReason,
};
