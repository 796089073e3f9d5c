/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Owner-side dispatcher.
//!
//! The [`Dispatcher`] owns the consumer end of the command queue and the two
//! real targets. Whichever thread drives it becomes the owner thread: every
//! command is applied there, one at a time, in enqueue order, and receives a
//! monotonic sequence number and nanosecond timestamp.
//!
//! # Shutdown
//!
//! The loop stops when [`CallbackProxy::shutdown`] enqueues a stop marker or
//! when every proxy clone has been dropped. Commands queued before the marker
//! are dispatched; commands found after it are discarded without touching
//! the targets. Once stopped, the queue is closed and further submissions
//! fail with [`ProxyError::Shutdown`].
//!
//! Target methods are not isolated: a panic inside one ends the owner loop.

use super::capability::{EventSender, LayoutTestController};
use super::command::ProxyCommand;
use super::config::ProxyConfig;
use super::core::{CallbackProxy, Envelope, ProxyId};
use super::error::ProxyError;
use super::event::DispatchEvent;
use super::journal::{InMemoryJournal, Journal};
use super::receipt::DispatchReceipt;
use crossbeam::channel::{self, Receiver, TryRecvError};
use std::any::Any;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Type alias for dispatch listener functions.
type DispatchListener = Arc<dyn Fn(&DispatchEvent) + Send + Sync>;

/// Why the owner loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A proxy called [`CallbackProxy::shutdown`].
    ShutdownRequested,

    /// Every proxy clone was dropped and the queue drained.
    Disconnected,
}

/// Counters describing the work done by a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Commands applied to a target.
    pub dispatched: u64,

    /// Commands still queued behind the stop marker when the loop stopped.
    ///
    /// A command enqueued while the queue is being closed may be dropped
    /// without being counted.
    pub discarded: u64,

    /// Sequence number of the last dispatched command.
    pub last_sequence: Option<u64>,

    /// Set once the loop has stopped.
    pub stop_reason: Option<StopReason>,
}

/// Consumer side of the proxy, bound to the two real targets.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{Dispatcher, LayoutTestController, ProxyConfig, RecordingTarget};
///
/// let target = RecordingTarget::new();
/// let (mut proxy, dispatcher) =
///     Dispatcher::with_config(target.clone(), target.clone(), ProxyConfig::default());
/// let handle = dispatcher.spawn().unwrap();
///
/// proxy.queue_load("http://x", "frameA");
/// proxy.shutdown().unwrap();
///
/// let dispatcher = handle.join().unwrap();
/// assert_eq!(dispatcher.summary().dispatched, 1);
/// ```
pub struct Dispatcher<E, L> {
    id: ProxyId,
    config: ProxyConfig,
    events: E,
    controller: L,
    command_rx: Option<Receiver<Envelope>>,
    next_sequence: u64,
    listeners: Vec<DispatchListener>,
    journal: Option<InMemoryJournal>,
    summary: DispatchSummary,
}

impl<E, L> Dispatcher<E, L>
where
    E: EventSender,
    L: LayoutTestController,
{
    /// Creates a proxy and its dispatcher with the default configuration.
    #[must_use]
    pub fn new(events: E, controller: L) -> (CallbackProxy, Self) {
        Self::with_config(events, controller, ProxyConfig::default())
    }

    /// Creates a proxy and its dispatcher.
    ///
    /// The queue is unbounded: enqueueing never blocks.
    #[must_use]
    pub fn with_config(events: E, controller: L, config: ProxyConfig) -> (CallbackProxy, Self) {
        let (command_tx, command_rx) = channel::unbounded();
        let id = ProxyId::new();
        let journal = config
            .record_journal
            .then(|| InMemoryJournal::with_capacity(config.journal_capacity));

        let dispatcher = Self {
            id,
            config,
            events,
            controller,
            command_rx: Some(command_rx),
            next_sequence: 1,
            listeners: Vec::new(),
            journal,
            summary: DispatchSummary::default(),
        };

        (CallbackProxy::new(id, command_tx), dispatcher)
    }

    /// Registers a listener called on the owner thread after each dispatch.
    ///
    /// Listeners run in registration order and see events in sequence order.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&DispatchEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Runs the owner loop on the current thread until it stops.
    ///
    /// Blocks while the queue is empty. Returns immediately if the
    /// dispatcher has already stopped.
    pub fn run(&mut self) -> DispatchSummary {
        let Some(command_rx) = self.command_rx.take() else {
            return self.summary;
        };

        info!(proxy_id = %self.id, "owner loop started");

        let reason = loop {
            match command_rx.recv() {
                Ok(Envelope::Command { command, reply }) => self.dispatch(command, reply),
                Ok(Envelope::Shutdown) => break StopReason::ShutdownRequested,
                Err(_) => break StopReason::Disconnected,
            }
        };

        self.close(command_rx, reason);
        self.summary
    }

    /// Dispatches the commands already queued, without blocking.
    ///
    /// For owner threads that run their own event loop and pump the proxy
    /// from it. Commands enqueued while pumping are left for the next call.
    /// Returns the number of commands dispatched.
    pub fn dispatch_pending(&mut self) -> usize {
        let Some(command_rx) = self.command_rx.take() else {
            return 0;
        };

        let budget = command_rx.len().max(1);
        let mut dispatched = 0;

        for _ in 0..budget {
            match command_rx.try_recv() {
                Ok(Envelope::Command { command, reply }) => {
                    self.dispatch(command, reply);
                    dispatched += 1;
                }
                Ok(Envelope::Shutdown) => {
                    self.close(command_rx, StopReason::ShutdownRequested);
                    return dispatched;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.close(command_rx, StopReason::Disconnected);
                    return dispatched;
                }
            }
        }

        self.command_rx = Some(command_rx);
        dispatched
    }

    /// Applies one command and publishes its event.
    fn dispatch(
        &mut self,
        command: ProxyCommand,
        reply: Option<oneshot::Sender<DispatchReceipt>>,
    ) {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        let ts = nanos_since_epoch();
        let operation = command.operation();

        debug!(proxy_id = %self.id, sequence_num = seq, %operation, "dispatching command");

        command.apply(&mut self.events, &mut self.controller);

        let event = DispatchEvent::new(seq, ts, self.id, command);

        for listener in &self.listeners {
            listener(&event);
        }

        if let Some(journal) = self.journal.as_mut()
            && let Err(e) = journal.append(event)
        {
            warn!(proxy_id = %self.id, sequence_num = seq, error = %e, "journal append failed");
        }

        if let Some(reply) = reply {
            // The caller may have dropped its ticket.
            let _ = reply.send(DispatchReceipt::new(seq, ts, operation));
        }

        self.summary.dispatched += 1;
        self.summary.last_sequence = Some(seq);
    }

    /// Discards what is queued behind the stop marker and closes the queue.
    ///
    /// Only the commands present when the loop stops are drained, so
    /// producers that keep sending cannot hold the loop open.
    fn close(&mut self, command_rx: Receiver<Envelope>, reason: StopReason) {
        let mut discarded = 0u64;
        for _ in 0..command_rx.len() {
            let Ok(envelope) = command_rx.try_recv() else {
                break;
            };
            if let Envelope::Command { command, .. } = envelope {
                debug!(proxy_id = %self.id, operation = %command.operation(), "discarding command queued after shutdown");
                discarded += 1;
            }
        }
        drop(command_rx);

        self.summary.discarded += discarded;
        self.summary.stop_reason = Some(reason);

        info!(
            proxy_id = %self.id,
            ?reason,
            dispatched = self.summary.dispatched,
            discarded,
            "owner loop stopped"
        );
    }
}

impl<E, L> Dispatcher<E, L> {
    /// Returns the identifier shared with the proxy.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProxyId {
        self.id
    }

    /// Returns the configuration this dispatcher was built with.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Returns `true` once the owner loop has stopped and the queue is closed.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.command_rx.is_none()
    }

    /// Returns the work counters so far.
    #[inline]
    #[must_use]
    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Returns the journal, if journaling is enabled.
    #[must_use]
    pub fn journal(&self) -> Option<&InMemoryJournal> {
        self.journal.as_ref()
    }

    /// Takes the journal out of the dispatcher, leaving journaling disabled.
    pub fn take_journal(&mut self) -> Option<InMemoryJournal> {
        self.config.record_journal = false;
        self.journal.take()
    }

    /// Returns the event-injection and test-control targets.
    #[must_use]
    pub fn targets(&self) -> (&E, &L) {
        (&self.events, &self.controller)
    }

    /// Returns mutable access to the targets.
    ///
    /// Only reachable from the thread that owns the dispatcher.
    pub fn targets_mut(&mut self) -> (&mut E, &mut L) {
        (&mut self.events, &mut self.controller)
    }

    /// Consumes the dispatcher and returns its targets.
    #[must_use]
    pub fn into_targets(self) -> (E, L) {
        (self.events, self.controller)
    }
}

impl<E, L> Dispatcher<E, L>
where
    E: EventSender + Send + 'static,
    L: LayoutTestController + Send + 'static,
{
    /// Spawns the owner loop on a new, dedicated thread.
    ///
    /// The thread is named after [`ProxyConfig::thread_name`].
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Spawn`] if the thread cannot be created.
    pub fn spawn(mut self) -> Result<DispatcherHandle<E, L>, ProxyError> {
        let id = self.id;
        let handle = std::thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || {
                self.run();
                self
            })
            .map_err(ProxyError::Spawn)?;

        Ok(DispatcherHandle { id, handle })
    }
}

/// Handle to a spawned owner thread.
pub struct DispatcherHandle<E, L> {
    id: ProxyId,
    handle: JoinHandle<Dispatcher<E, L>>,
}

impl<E, L> DispatcherHandle<E, L> {
    /// Returns the identifier shared with the proxy.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProxyId {
        self.id
    }

    /// Returns `true` if the owner thread has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the owner loop to stop and returns the stopped dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::OwnerPanicked`] if a target panicked.
    pub fn join(self) -> Result<Dispatcher<E, L>, ProxyError> {
        let id = self.id;
        self.handle.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            warn!(proxy_id = %id, %message, "owner thread panicked");
            ProxyError::OwnerPanicked { message }
        })
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
