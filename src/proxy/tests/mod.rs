/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Tests for the proxy module.

pub mod ordering;

use crate::proxy::{EventSender, RecordingTarget};
use crossbeam::channel::{Receiver, Sender};

/// Event target that records like [`RecordingTarget`], but can hold the
/// owner thread inside `mouse_down` and panic inside `mouse_click`.
pub(crate) struct ScriptedEvents {
    pub(crate) inner: RecordingTarget,
    pub(crate) entered: Option<Sender<()>>,
    pub(crate) gate: Option<Receiver<()>>,
    pub(crate) panic_on_click: bool,
}

impl ScriptedEvents {
    pub(crate) fn new(inner: RecordingTarget) -> Self {
        Self {
            inner,
            entered: None,
            gate: None,
            panic_on_click: false,
        }
    }
}

impl EventSender for ScriptedEvents {
    fn enable_dom_ui_event_logging(&mut self, dom_node: i32) {
        self.inner.enable_dom_ui_event_logging(dom_node);
    }

    fn fire_keyboard_events_to_element(&mut self, dom_node: i32) {
        self.inner.fire_keyboard_events_to_element(dom_node);
    }

    fn key_down_with_modifiers(&mut self, character: &str, modifiers: &[String]) {
        self.inner.key_down_with_modifiers(character, modifiers);
    }

    fn key_down(&mut self, character: &str) {
        self.inner.key_down(character);
    }

    fn leap_forward(&mut self, milliseconds: i32) {
        self.inner.leap_forward(milliseconds);
    }

    fn mouse_click(&mut self) {
        if self.panic_on_click {
            panic!("target rejected mouse_click");
        }
        self.inner.mouse_click();
    }

    fn mouse_down(&mut self) {
        if let Some(entered) = &self.entered {
            entered.send(()).ok();
        }
        if let Some(gate) = &self.gate {
            gate.recv().ok();
        }
        self.inner.mouse_down();
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) {
        self.inner.mouse_move_to(x, y);
    }

    fn mouse_up(&mut self) {
        self.inner.mouse_up();
    }
}
