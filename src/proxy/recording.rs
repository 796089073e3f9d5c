/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! A target that records every call it receives.

use super::capability::{EventSender, LayoutTestController};
use super::command::ProxyCommand;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Target implementing both capabilities by logging each call as a
/// [`ProxyCommand`].
///
/// Clones share one log, so a single recorder can stand in for both the
/// event-injection and the test-control target and still capture the global
/// call order.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{EventSender, ProxyCommand, RecordingTarget};
///
/// let mut target = RecordingTarget::new();
/// target.mouse_move_to(10, 20);
/// assert_eq!(target.calls(), vec![ProxyCommand::MouseMoveTo { x: 10, y: 20 }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    calls: Arc<Mutex<Vec<ProxyCommand>>>,
}

impl RecordingTarget {
    /// Creates a recorder with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded calls, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<ProxyCommand> {
        self.lock().clone()
    }

    /// Removes and returns the recorded calls.
    pub fn take(&self) -> Vec<ProxyCommand> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn record(&self, command: ProxyCommand) {
        self.lock().push(command);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProxyCommand>> {
        // A poisoned log is still readable.
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSender for RecordingTarget {
    fn enable_dom_ui_event_logging(&mut self, dom_node: i32) {
        self.record(ProxyCommand::EnableDomUiEventLogging { dom_node });
    }

    fn fire_keyboard_events_to_element(&mut self, dom_node: i32) {
        self.record(ProxyCommand::FireKeyboardEventsToElement { dom_node });
    }

    fn key_down_with_modifiers(&mut self, character: &str, modifiers: &[String]) {
        self.record(ProxyCommand::KeyDownWithModifiers {
            character: character.to_string(),
            modifiers: modifiers.to_vec(),
        });
    }

    fn key_down(&mut self, character: &str) {
        self.record(ProxyCommand::KeyDown {
            character: character.to_string(),
        });
    }

    fn leap_forward(&mut self, milliseconds: i32) {
        self.record(ProxyCommand::LeapForward { milliseconds });
    }

    fn mouse_click(&mut self) {
        self.record(ProxyCommand::MouseClick);
    }

    fn mouse_down(&mut self) {
        self.record(ProxyCommand::MouseDown);
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) {
        self.record(ProxyCommand::MouseMoveTo { x, y });
    }

    fn mouse_up(&mut self) {
        self.record(ProxyCommand::MouseUp);
    }
}

impl LayoutTestController for RecordingTarget {
    fn clear_back_forward_list(&mut self) {
        self.record(ProxyCommand::ClearBackForwardList);
    }

    fn display(&mut self) {
        self.record(ProxyCommand::Display);
    }

    fn dump_as_text(&mut self) {
        self.record(ProxyCommand::DumpAsText);
    }

    fn dump_back_forward_list(&mut self) {
        self.record(ProxyCommand::DumpBackForwardList);
    }

    fn dump_child_frame_scroll_positions(&mut self) {
        self.record(ProxyCommand::DumpChildFrameScrollPositions);
    }

    fn dump_editing_callbacks(&mut self) {
        self.record(ProxyCommand::DumpEditingCallbacks);
    }

    fn dump_selection_rect(&mut self) {
        self.record(ProxyCommand::DumpSelectionRect);
    }

    fn dump_title_changes(&mut self) {
        self.record(ProxyCommand::DumpTitleChanges);
    }

    fn keep_web_history(&mut self) {
        self.record(ProxyCommand::KeepWebHistory);
    }

    fn notify_done(&mut self) {
        self.record(ProxyCommand::NotifyDone);
    }

    fn queue_back_navigation(&mut self, how_far: i32) {
        self.record(ProxyCommand::QueueBackNavigation { how_far });
    }

    fn queue_forward_navigation(&mut self, how_far: i32) {
        self.record(ProxyCommand::QueueForwardNavigation { how_far });
    }

    fn queue_load(&mut self, url: &str, frame_target: &str) {
        self.record(ProxyCommand::QueueLoad {
            url: url.to_string(),
            frame_target: frame_target.to_string(),
        });
    }

    fn queue_reload(&mut self) {
        self.record(ProxyCommand::QueueReload);
    }

    fn queue_script(&mut self, script: &str) {
        self.record(ProxyCommand::QueueScript {
            script: script.to_string(),
        });
    }

    fn repaint_sweep_horizontally(&mut self) {
        self.record(ProxyCommand::RepaintSweepHorizontally);
    }

    fn set_accepts_editing(&mut self, accepts: bool) {
        self.record(ProxyCommand::SetAcceptsEditing { accepts });
    }

    fn set_main_frame_is_first_responder(&mut self, is_first: bool) {
        self.record(ProxyCommand::SetMainFrameIsFirstResponder { is_first });
    }

    fn set_window_is_key(&mut self, is_key: bool) {
        self.record(ProxyCommand::SetWindowIsKey { is_key });
    }

    fn test_repaint(&mut self) {
        self.record(ProxyCommand::TestRepaint);
    }

    fn wait_until_done(&mut self) {
        self.record(ProxyCommand::WaitUntilDone);
    }
}
