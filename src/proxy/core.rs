/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Caller-side proxy handle.
//!
//! [`CallbackProxy`] is the producer end of the command queue. It implements
//! both capability interfaces, so callers on any thread can use it in place
//! of the real targets; every call is packed into a [`ProxyCommand`] and
//! enqueued for the owner thread.

use super::capability::{EventSender, LayoutTestController};
use super::command::ProxyCommand;
use super::config::ProxyConfig;
use super::dispatcher::{Dispatcher, DispatcherHandle};
use super::error::ProxyError;
use super::receipt::{DispatchReceipt, DispatchTicket};
use crossbeam::channel::Sender;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::oneshot;
use tracing::{trace, warn};
use uuid::Uuid;

/// Unique identifier of one proxy instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyId(Uuid);

impl ProxyId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProxyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What travels through the command queue.
#[derive(Debug)]
pub(crate) enum Envelope {
    Command {
        command: ProxyCommand,
        reply: Option<oneshot::Sender<DispatchReceipt>>,
    },
    Shutdown,
}

/// Cross-thread proxy for [`EventSender`] and [`LayoutTestController`].
///
/// Cloning is cheap; every clone is another producer on the same queue.
/// Forwarded calls never block and never return a value: the real method
/// runs later, on the owner thread, in enqueue order.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{Dispatcher, EventSender, LayoutTestController, RecordingTarget};
///
/// let target = RecordingTarget::new();
/// let (mut proxy, mut dispatcher) = Dispatcher::new(target.clone(), target.clone());
///
/// proxy.mouse_move_to(10, 20);
/// proxy.notify_done();
///
/// assert_eq!(dispatcher.dispatch_pending(), 2);
/// assert_eq!(target.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CallbackProxy {
    id: ProxyId,
    command_tx: Sender<Envelope>,
}

impl CallbackProxy {
    pub(crate) fn new(id: ProxyId, command_tx: Sender<Envelope>) -> Self {
        Self { id, command_tx }
    }

    /// Spawns a dedicated owner thread for the given targets.
    ///
    /// Shorthand for [`Dispatcher::with_config`] followed by
    /// [`Dispatcher::spawn`].
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Spawn`] if the thread cannot be created.
    pub fn spawn<E, L>(
        events: E,
        controller: L,
        config: ProxyConfig,
    ) -> Result<(Self, DispatcherHandle<E, L>), ProxyError>
    where
        E: EventSender + Send + 'static,
        L: LayoutTestController + Send + 'static,
    {
        let (proxy, dispatcher) = Dispatcher::with_config(events, controller, config);
        let handle = dispatcher.spawn()?;
        Ok((proxy, handle))
    }

    /// Returns the identifier shared by this proxy and its dispatcher.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProxyId {
        self.id
    }

    /// Returns the number of commands waiting for the owner thread.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.command_tx.len()
    }

    /// Enqueues a command for the owner thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the owner side has stopped.
    pub fn submit(&self, command: ProxyCommand) -> Result<(), ProxyError> {
        self.enqueue(command, None)
    }

    /// Enqueues a command and returns a ticket that resolves once it has run.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the owner side has stopped.
    ///
    /// # Examples
    ///
    /// ```
    /// use callback_proxy::proxy::{Dispatcher, ProxyCommand, RecordingTarget};
    ///
    /// let target = RecordingTarget::new();
    /// let (proxy, mut dispatcher) = Dispatcher::new(target.clone(), target);
    ///
    /// let mut ticket = proxy.submit_with_receipt(ProxyCommand::Display).unwrap();
    /// assert!(ticket.try_receipt().unwrap().is_none());
    ///
    /// dispatcher.dispatch_pending();
    /// let receipt = ticket.try_receipt().unwrap().unwrap();
    /// assert_eq!(receipt.sequence_num, 1);
    /// ```
    pub fn submit_with_receipt(&self, command: ProxyCommand) -> Result<DispatchTicket, ProxyError> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(command, Some(tx))?;
        Ok(DispatchTicket::new(rx))
    }

    /// Asks the owner thread to stop.
    ///
    /// Commands enqueued before this call are still dispatched; commands
    /// enqueued after it are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Shutdown`] if the owner side has already stopped.
    pub fn shutdown(&self) -> Result<(), ProxyError> {
        trace!(proxy_id = %self.id, "enqueueing shutdown marker");
        self.command_tx
            .send(Envelope::Shutdown)
            .map_err(|_| ProxyError::Shutdown)
    }

    fn enqueue(
        &self,
        command: ProxyCommand,
        reply: Option<oneshot::Sender<DispatchReceipt>>,
    ) -> Result<(), ProxyError> {
        trace!(proxy_id = %self.id, operation = %command.operation(), "enqueueing command");
        self.command_tx
            .send(Envelope::Command { command, reply })
            .map_err(|_| ProxyError::Shutdown)
    }

    /// Fire-and-forget path used by the capability implementations.
    fn forward(&self, command: ProxyCommand) {
        let operation = command.operation();
        if self.submit(command).is_err() {
            warn!(proxy_id = %self.id, %operation, "owner side stopped, dropping command");
        }
    }
}

impl EventSender for CallbackProxy {
    fn enable_dom_ui_event_logging(&mut self, dom_node: i32) {
        self.forward(ProxyCommand::EnableDomUiEventLogging { dom_node });
    }

    fn fire_keyboard_events_to_element(&mut self, dom_node: i32) {
        self.forward(ProxyCommand::FireKeyboardEventsToElement { dom_node });
    }

    fn key_down_with_modifiers(&mut self, character: &str, modifiers: &[String]) {
        self.forward(ProxyCommand::KeyDownWithModifiers {
            character: character.to_string(),
            modifiers: modifiers.to_vec(),
        });
    }

    fn key_down(&mut self, character: &str) {
        self.forward(ProxyCommand::KeyDown {
            character: character.to_string(),
        });
    }

    fn leap_forward(&mut self, milliseconds: i32) {
        self.forward(ProxyCommand::LeapForward { milliseconds });
    }

    fn mouse_click(&mut self) {
        self.forward(ProxyCommand::MouseClick);
    }

    fn mouse_down(&mut self) {
        self.forward(ProxyCommand::MouseDown);
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) {
        self.forward(ProxyCommand::MouseMoveTo { x, y });
    }

    fn mouse_up(&mut self) {
        self.forward(ProxyCommand::MouseUp);
    }
}

impl LayoutTestController for CallbackProxy {
    fn clear_back_forward_list(&mut self) {
        self.forward(ProxyCommand::ClearBackForwardList);
    }

    fn display(&mut self) {
        self.forward(ProxyCommand::Display);
    }

    fn dump_as_text(&mut self) {
        self.forward(ProxyCommand::DumpAsText);
    }

    fn dump_back_forward_list(&mut self) {
        self.forward(ProxyCommand::DumpBackForwardList);
    }

    fn dump_child_frame_scroll_positions(&mut self) {
        self.forward(ProxyCommand::DumpChildFrameScrollPositions);
    }

    fn dump_editing_callbacks(&mut self) {
        self.forward(ProxyCommand::DumpEditingCallbacks);
    }

    fn dump_selection_rect(&mut self) {
        self.forward(ProxyCommand::DumpSelectionRect);
    }

    fn dump_title_changes(&mut self) {
        self.forward(ProxyCommand::DumpTitleChanges);
    }

    fn keep_web_history(&mut self) {
        self.forward(ProxyCommand::KeepWebHistory);
    }

    fn notify_done(&mut self) {
        self.forward(ProxyCommand::NotifyDone);
    }

    fn queue_back_navigation(&mut self, how_far: i32) {
        self.forward(ProxyCommand::QueueBackNavigation { how_far });
    }

    fn queue_forward_navigation(&mut self, how_far: i32) {
        self.forward(ProxyCommand::QueueForwardNavigation { how_far });
    }

    fn queue_load(&mut self, url: &str, frame_target: &str) {
        self.forward(ProxyCommand::QueueLoad {
            url: url.to_string(),
            frame_target: frame_target.to_string(),
        });
    }

    fn queue_reload(&mut self) {
        self.forward(ProxyCommand::QueueReload);
    }

    fn queue_script(&mut self, script: &str) {
        self.forward(ProxyCommand::QueueScript {
            script: script.to_string(),
        });
    }

    fn repaint_sweep_horizontally(&mut self) {
        self.forward(ProxyCommand::RepaintSweepHorizontally);
    }

    fn set_accepts_editing(&mut self, accepts: bool) {
        self.forward(ProxyCommand::SetAcceptsEditing { accepts });
    }

    fn set_main_frame_is_first_responder(&mut self, is_first: bool) {
        self.forward(ProxyCommand::SetMainFrameIsFirstResponder { is_first });
    }

    fn set_window_is_key(&mut self, is_key: bool) {
        self.forward(ProxyCommand::SetWindowIsKey { is_key });
    }

    fn test_repaint(&mut self) {
        self.forward(ProxyCommand::TestRepaint);
    }

    fn wait_until_done(&mut self) {
        self.forward(ProxyCommand::WaitUntilDone);
    }
}
