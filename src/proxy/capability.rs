/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Capability interfaces forwarded by the proxy.
//!
//! A capability is a named set of methods a target promises to implement.
//! The proxy exposes the union of [`EventSender`] and
//! [`LayoutTestController`] to arbitrary threads and replays every call on
//! the owner thread against the real implementations.
//!
//! Methods take `&mut self`: targets are only ever touched by the owner
//! thread, so they need no interior mutability.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which capability interface declared an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Synthetic input events (keyboard, mouse, timers).
    EventInjection,

    /// Layout test control (dumps, navigation queue, completion).
    TestControl,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventInjection => write!(f, "event_injection"),
            Self::TestControl => write!(f, "test_control"),
        }
    }
}

/// Event-injection capability.
///
/// Fires synthetic input into the page under test.
pub trait EventSender {
    /// Toggles verbose DOM UI event logging for the given node.
    fn enable_dom_ui_event_logging(&mut self, dom_node: i32);

    /// Fires the pending keyboard events at the given element.
    fn fire_keyboard_events_to_element(&mut self, dom_node: i32);

    /// Presses `character` while holding the named modifier keys.
    fn key_down_with_modifiers(&mut self, character: &str, modifiers: &[String]);

    /// Presses `character` with no modifiers.
    fn key_down(&mut self, character: &str);

    /// Advances the event clock without real time passing.
    fn leap_forward(&mut self, milliseconds: i32);

    /// Clicks at the current mouse position.
    fn mouse_click(&mut self);

    /// Presses the mouse button at the current position.
    fn mouse_down(&mut self);

    /// Moves the pointer to `(x, y)`.
    fn mouse_move_to(&mut self, x: i32, y: i32);

    /// Releases the mouse button.
    fn mouse_up(&mut self);
}

/// Test-control capability.
pub trait LayoutTestController {
    /// Clears the back/forward navigation list.
    fn clear_back_forward_list(&mut self);

    /// Forces a display pass.
    fn display(&mut self);

    /// Dumps the result as plain text instead of a render tree.
    fn dump_as_text(&mut self);

    /// Includes the back/forward list in the dump.
    fn dump_back_forward_list(&mut self);

    /// Includes child frame scroll positions in the dump.
    fn dump_child_frame_scroll_positions(&mut self);

    /// Records editing delegate callbacks.
    fn dump_editing_callbacks(&mut self);

    /// Includes the selection rectangle in the dump.
    fn dump_selection_rect(&mut self);

    /// Records title changes.
    fn dump_title_changes(&mut self);

    /// Keeps global web history for the test.
    fn keep_web_history(&mut self);

    /// Signals that an asynchronous test has finished.
    fn notify_done(&mut self);

    /// Queues a back navigation of `how_far` entries.
    fn queue_back_navigation(&mut self, how_far: i32);

    /// Queues a forward navigation of `how_far` entries.
    fn queue_forward_navigation(&mut self, how_far: i32);

    /// Queues a load of `url` into `frame_target`.
    fn queue_load(&mut self, url: &str, frame_target: &str);

    /// Queues a reload of the current page.
    fn queue_reload(&mut self);

    /// Queues a script to run in the current context.
    fn queue_script(&mut self, script: &str);

    fn repaint_sweep_horizontally(&mut self);

    fn set_accepts_editing(&mut self, accepts: bool);

    fn set_main_frame_is_first_responder(&mut self, is_first: bool);

    fn set_window_is_key(&mut self, is_key: bool);

    fn test_repaint(&mut self);

    /// Tells the harness to wait for [`notify_done`](Self::notify_done).
    fn wait_until_done(&mut self);
}
