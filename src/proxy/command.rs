/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Proxy command types.
//!
//! This module defines the commands that carry one deferred call across the
//! thread boundary, and the tags that identify them.

use super::capability::{Capability, EventSender, LayoutTestController};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A deferred invocation of one capability method.
///
/// Each variant mirrors one forwarded method, with typed fields in place of
/// a generic argument tuple. Commands are immutable once built and are
/// consumed on the owner thread by [`apply`](Self::apply).
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::{Operation, ProxyCommand};
///
/// let command = ProxyCommand::MouseMoveTo { x: 10, y: 20 };
/// assert_eq!(command.operation(), Operation::MouseMoveTo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProxyCommand {
    /// [`EventSender::enable_dom_ui_event_logging`].
    EnableDomUiEventLogging { dom_node: i32 },

    /// [`EventSender::fire_keyboard_events_to_element`].
    FireKeyboardEventsToElement { dom_node: i32 },

    /// [`EventSender::key_down_with_modifiers`].
    KeyDownWithModifiers {
        character: String,
        modifiers: Vec<String>,
    },

    /// [`EventSender::key_down`].
    KeyDown { character: String },

    /// [`EventSender::leap_forward`].
    LeapForward { milliseconds: i32 },

    MouseClick,
    MouseDown,

    /// [`EventSender::mouse_move_to`].
    MouseMoveTo { x: i32, y: i32 },

    MouseUp,

    ClearBackForwardList,
    Display,
    DumpAsText,
    DumpBackForwardList,
    DumpChildFrameScrollPositions,
    DumpEditingCallbacks,
    DumpSelectionRect,
    DumpTitleChanges,
    KeepWebHistory,
    NotifyDone,

    /// [`LayoutTestController::queue_back_navigation`].
    QueueBackNavigation { how_far: i32 },

    /// [`LayoutTestController::queue_forward_navigation`].
    QueueForwardNavigation { how_far: i32 },

    /// [`LayoutTestController::queue_load`].
    QueueLoad { url: String, frame_target: String },

    QueueReload,

    /// [`LayoutTestController::queue_script`].
    QueueScript { script: String },

    RepaintSweepHorizontally,

    /// [`LayoutTestController::set_accepts_editing`].
    SetAcceptsEditing { accepts: bool },

    /// [`LayoutTestController::set_main_frame_is_first_responder`].
    SetMainFrameIsFirstResponder { is_first: bool },

    /// [`LayoutTestController::set_window_is_key`].
    SetWindowIsKey { is_key: bool },

    TestRepaint,
    WaitUntilDone,
}

impl ProxyCommand {
    /// Returns the operation tag of this command.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::EnableDomUiEventLogging { .. } => Operation::EnableDomUiEventLogging,
            Self::FireKeyboardEventsToElement { .. } => Operation::FireKeyboardEventsToElement,
            Self::KeyDownWithModifiers { .. } => Operation::KeyDownWithModifiers,
            Self::KeyDown { .. } => Operation::KeyDown,
            Self::LeapForward { .. } => Operation::LeapForward,
            Self::MouseClick => Operation::MouseClick,
            Self::MouseDown => Operation::MouseDown,
            Self::MouseMoveTo { .. } => Operation::MouseMoveTo,
            Self::MouseUp => Operation::MouseUp,
            Self::ClearBackForwardList => Operation::ClearBackForwardList,
            Self::Display => Operation::Display,
            Self::DumpAsText => Operation::DumpAsText,
            Self::DumpBackForwardList => Operation::DumpBackForwardList,
            Self::DumpChildFrameScrollPositions => Operation::DumpChildFrameScrollPositions,
            Self::DumpEditingCallbacks => Operation::DumpEditingCallbacks,
            Self::DumpSelectionRect => Operation::DumpSelectionRect,
            Self::DumpTitleChanges => Operation::DumpTitleChanges,
            Self::KeepWebHistory => Operation::KeepWebHistory,
            Self::NotifyDone => Operation::NotifyDone,
            Self::QueueBackNavigation { .. } => Operation::QueueBackNavigation,
            Self::QueueForwardNavigation { .. } => Operation::QueueForwardNavigation,
            Self::QueueLoad { .. } => Operation::QueueLoad,
            Self::QueueReload => Operation::QueueReload,
            Self::QueueScript { .. } => Operation::QueueScript,
            Self::RepaintSweepHorizontally => Operation::RepaintSweepHorizontally,
            Self::SetAcceptsEditing { .. } => Operation::SetAcceptsEditing,
            Self::SetMainFrameIsFirstResponder { .. } => Operation::SetMainFrameIsFirstResponder,
            Self::SetWindowIsKey { .. } => Operation::SetWindowIsKey,
            Self::TestRepaint => Operation::TestRepaint,
            Self::WaitUntilDone => Operation::WaitUntilDone,
        }
    }

    /// Returns the capability that declared this command's method.
    #[inline]
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.operation().capability()
    }

    /// Invokes the corresponding method on the declaring target.
    ///
    /// Event-injection commands go to `events`, test-control commands go to
    /// `controller`. Any value the target produces is discarded.
    pub fn apply<E, L>(&self, events: &mut E, controller: &mut L)
    where
        E: EventSender + ?Sized,
        L: LayoutTestController + ?Sized,
    {
        match self {
            Self::EnableDomUiEventLogging { dom_node } => {
                events.enable_dom_ui_event_logging(*dom_node)
            }
            Self::FireKeyboardEventsToElement { dom_node } => {
                events.fire_keyboard_events_to_element(*dom_node)
            }
            Self::KeyDownWithModifiers {
                character,
                modifiers,
            } => events.key_down_with_modifiers(character, modifiers),
            Self::KeyDown { character } => events.key_down(character),
            Self::LeapForward { milliseconds } => events.leap_forward(*milliseconds),
            Self::MouseClick => events.mouse_click(),
            Self::MouseDown => events.mouse_down(),
            Self::MouseMoveTo { x, y } => events.mouse_move_to(*x, *y),
            Self::MouseUp => events.mouse_up(),
            Self::ClearBackForwardList => controller.clear_back_forward_list(),
            Self::Display => controller.display(),
            Self::DumpAsText => controller.dump_as_text(),
            Self::DumpBackForwardList => controller.dump_back_forward_list(),
            Self::DumpChildFrameScrollPositions => controller.dump_child_frame_scroll_positions(),
            Self::DumpEditingCallbacks => controller.dump_editing_callbacks(),
            Self::DumpSelectionRect => controller.dump_selection_rect(),
            Self::DumpTitleChanges => controller.dump_title_changes(),
            Self::KeepWebHistory => controller.keep_web_history(),
            Self::NotifyDone => controller.notify_done(),
            Self::QueueBackNavigation { how_far } => controller.queue_back_navigation(*how_far),
            Self::QueueForwardNavigation { how_far } => {
                controller.queue_forward_navigation(*how_far)
            }
            Self::QueueLoad { url, frame_target } => controller.queue_load(url, frame_target),
            Self::QueueReload => controller.queue_reload(),
            Self::QueueScript { script } => controller.queue_script(script),
            Self::RepaintSweepHorizontally => controller.repaint_sweep_horizontally(),
            Self::SetAcceptsEditing { accepts } => controller.set_accepts_editing(*accepts),
            Self::SetMainFrameIsFirstResponder { is_first } => {
                controller.set_main_frame_is_first_responder(*is_first)
            }
            Self::SetWindowIsKey { is_key } => controller.set_window_is_key(*is_key),
            Self::TestRepaint => controller.test_repaint(),
            Self::WaitUntilDone => controller.wait_until_done(),
        }
    }
}

/// Fieldless tag identifying which capability method a command invokes.
///
/// Codes are stable: event-injection operations occupy `1..=9`, test-control
/// operations occupy `20..=40`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum Operation {
    EnableDomUiEventLogging = 1,
    FireKeyboardEventsToElement = 2,
    KeyDownWithModifiers = 3,
    KeyDown = 4,
    LeapForward = 5,
    MouseClick = 6,
    MouseDown = 7,
    MouseMoveTo = 8,
    MouseUp = 9,

    ClearBackForwardList = 20,
    Display = 21,
    DumpAsText = 22,
    DumpBackForwardList = 23,
    DumpChildFrameScrollPositions = 24,
    DumpEditingCallbacks = 25,
    DumpSelectionRect = 26,
    DumpTitleChanges = 27,
    KeepWebHistory = 28,
    NotifyDone = 29,
    QueueBackNavigation = 30,
    QueueForwardNavigation = 31,
    QueueLoad = 32,
    QueueReload = 33,
    QueueScript = 34,
    RepaintSweepHorizontally = 35,
    SetAcceptsEditing = 36,
    SetMainFrameIsFirstResponder = 37,
    SetWindowIsKey = 38,
    TestRepaint = 39,
    WaitUntilDone = 40,
}

impl Operation {
    /// Every operation, in code order.
    pub const ALL: [Operation; 30] = [
        Self::EnableDomUiEventLogging,
        Self::FireKeyboardEventsToElement,
        Self::KeyDownWithModifiers,
        Self::KeyDown,
        Self::LeapForward,
        Self::MouseClick,
        Self::MouseDown,
        Self::MouseMoveTo,
        Self::MouseUp,
        Self::ClearBackForwardList,
        Self::Display,
        Self::DumpAsText,
        Self::DumpBackForwardList,
        Self::DumpChildFrameScrollPositions,
        Self::DumpEditingCallbacks,
        Self::DumpSelectionRect,
        Self::DumpTitleChanges,
        Self::KeepWebHistory,
        Self::NotifyDone,
        Self::QueueBackNavigation,
        Self::QueueForwardNavigation,
        Self::QueueLoad,
        Self::QueueReload,
        Self::QueueScript,
        Self::RepaintSweepHorizontally,
        Self::SetAcceptsEditing,
        Self::SetMainFrameIsFirstResponder,
        Self::SetWindowIsKey,
        Self::TestRepaint,
        Self::WaitUntilDone,
    ];

    /// Returns the numeric operation code.
    #[inline]
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Looks up an operation by its numeric code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.code() == code)
    }

    /// Returns the capability that declares this operation.
    #[inline]
    #[must_use]
    pub fn capability(self) -> Capability {
        if self.code() < 20 {
            Capability::EventInjection
        } else {
            Capability::TestControl
        }
    }

    /// Returns the stable snake_case name of the operation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EnableDomUiEventLogging => "enable_dom_ui_event_logging",
            Self::FireKeyboardEventsToElement => "fire_keyboard_events_to_element",
            Self::KeyDownWithModifiers => "key_down_with_modifiers",
            Self::KeyDown => "key_down",
            Self::LeapForward => "leap_forward",
            Self::MouseClick => "mouse_click",
            Self::MouseDown => "mouse_down",
            Self::MouseMoveTo => "mouse_move_to",
            Self::MouseUp => "mouse_up",
            Self::ClearBackForwardList => "clear_back_forward_list",
            Self::Display => "display",
            Self::DumpAsText => "dump_as_text",
            Self::DumpBackForwardList => "dump_back_forward_list",
            Self::DumpChildFrameScrollPositions => "dump_child_frame_scroll_positions",
            Self::DumpEditingCallbacks => "dump_editing_callbacks",
            Self::DumpSelectionRect => "dump_selection_rect",
            Self::DumpTitleChanges => "dump_title_changes",
            Self::KeepWebHistory => "keep_web_history",
            Self::NotifyDone => "notify_done",
            Self::QueueBackNavigation => "queue_back_navigation",
            Self::QueueForwardNavigation => "queue_forward_navigation",
            Self::QueueLoad => "queue_load",
            Self::QueueReload => "queue_reload",
            Self::QueueScript => "queue_script",
            Self::RepaintSweepHorizontally => "repaint_sweep_horizontally",
            Self::SetAcceptsEditing => "set_accepts_editing",
            Self::SetMainFrameIsFirstResponder => "set_main_frame_is_first_responder",
            Self::SetWindowIsKey => "set_window_is_key",
            Self::TestRepaint => "test_repaint",
            Self::WaitUntilDone => "wait_until_done",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
