use callback_proxy::proxy::journal::Journal;
use callback_proxy::{
    CallbackProxy, EventSender, LayoutTestController, ProxyCommand, ProxyConfig, ReplayEngine,
};
use std::thread;

/// Minimal stand-in for a browser page under test.
#[derive(Debug, Default)]
struct FakePage {
    pointer: (i32, i32),
    button_down: bool,
    clicks: Vec<(i32, i32)>,
    typed: String,
    clock_ms: i64,
}

impl EventSender for FakePage {
    fn enable_dom_ui_event_logging(&mut self, _dom_node: i32) {}

    fn fire_keyboard_events_to_element(&mut self, _dom_node: i32) {}

    fn key_down_with_modifiers(&mut self, character: &str, modifiers: &[String]) {
        if modifiers.iter().any(|m| m == "shiftKey") {
            self.typed.push_str(&character.to_uppercase());
        } else {
            self.typed.push_str(character);
        }
    }

    fn key_down(&mut self, character: &str) {
        self.typed.push_str(character);
    }

    fn leap_forward(&mut self, milliseconds: i32) {
        self.clock_ms += i64::from(milliseconds);
    }

    fn mouse_click(&mut self) {
        self.clicks.push(self.pointer);
    }

    fn mouse_down(&mut self) {
        self.button_down = true;
    }

    fn mouse_move_to(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    fn mouse_up(&mut self) {
        if self.button_down {
            self.clicks.push(self.pointer);
        }
        self.button_down = false;
    }
}

/// Minimal stand-in for the layout test controller.
#[derive(Debug, Default)]
struct FakeController {
    dump_as_text: bool,
    accepts_editing: bool,
    window_is_key: bool,
    waiting: bool,
    done: bool,
    loads: Vec<(String, String)>,
    history_offset: i32,
    scripts: Vec<String>,
}

impl LayoutTestController for FakeController {
    fn clear_back_forward_list(&mut self) {
        self.history_offset = 0;
    }

    fn display(&mut self) {}

    fn dump_as_text(&mut self) {
        self.dump_as_text = true;
    }

    fn dump_back_forward_list(&mut self) {}

    fn dump_child_frame_scroll_positions(&mut self) {}

    fn dump_editing_callbacks(&mut self) {}

    fn dump_selection_rect(&mut self) {}

    fn dump_title_changes(&mut self) {}

    fn keep_web_history(&mut self) {}

    fn notify_done(&mut self) {
        if self.waiting {
            self.done = true;
        }
    }

    fn queue_back_navigation(&mut self, how_far: i32) {
        self.history_offset -= how_far;
    }

    fn queue_forward_navigation(&mut self, how_far: i32) {
        self.history_offset += how_far;
    }

    fn queue_load(&mut self, url: &str, frame_target: &str) {
        self.loads.push((url.to_string(), frame_target.to_string()));
    }

    fn queue_reload(&mut self) {}

    fn queue_script(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    fn repaint_sweep_horizontally(&mut self) {}

    fn set_accepts_editing(&mut self, accepts: bool) {
        self.accepts_editing = accepts;
    }

    fn set_main_frame_is_first_responder(&mut self, _is_first: bool) {}

    fn set_window_is_key(&mut self, is_key: bool) {
        self.window_is_key = is_key;
    }

    fn test_repaint(&mut self) {}

    fn wait_until_done(&mut self) {
        self.waiting = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_script_thread_drives_page_on_owner_thread() {
        init_tracing();
        let (proxy, handle) = CallbackProxy::spawn(
            FakePage::default(),
            FakeController::default(),
            ProxyConfig::default().with_thread_name("page-owner"),
        )
        .unwrap();

        let mut script = proxy.clone();
        thread::spawn(move || {
            script.wait_until_done();
            script.dump_as_text();
            script.set_accepts_editing(true);
            script.mouse_move_to(10, 20);
            script.mouse_down();
            script.mouse_up();
            script.key_down("h");
            script.key_down_with_modifiers("i", &["shiftKey".to_string()]);
            script.leap_forward(500);
            script.queue_load("http://x", "frameA");
            script.queue_back_navigation(2);
            script.queue_forward_navigation(1);
            script.notify_done();
        })
        .join()
        .unwrap();

        proxy.shutdown().unwrap();
        let dispatcher = handle.join().unwrap();
        let (page, controller) = dispatcher.targets();

        assert_eq!(page.pointer, (10, 20));
        assert_eq!(page.clicks, vec![(10, 20)]);
        assert!(!page.button_down);
        assert_eq!(page.typed, "hI");
        assert_eq!(page.clock_ms, 500);

        assert!(controller.dump_as_text);
        assert!(controller.accepts_editing);
        assert!(controller.done);
        assert_eq!(
            controller.loads,
            vec![("http://x".to_string(), "frameA".to_string())]
        );
        assert_eq!(controller.history_offset, -1);
    }

    #[test]
    fn test_notify_done_before_wait_is_order_sensitive() {
        let (mut proxy, handle) = CallbackProxy::spawn(
            FakePage::default(),
            FakeController::default(),
            ProxyConfig::default(),
        )
        .unwrap();

        proxy.notify_done();
        proxy.wait_until_done();
        drop(proxy);

        let (_, controller) = handle.join().unwrap().into_targets();
        assert!(controller.waiting);
        assert!(!controller.done);
    }

    #[test]
    fn test_recorded_session_replays_onto_fresh_targets() {
        init_tracing();
        let (mut proxy, handle) = CallbackProxy::spawn(
            FakePage::default(),
            FakeController::default(),
            ProxyConfig::default().with_journal(true),
        )
        .unwrap();

        proxy.set_window_is_key(true);
        proxy.queue_script("document.body.focus()");
        proxy.mouse_move_to(3, 4);
        proxy.mouse_click();
        proxy
            .submit(ProxyCommand::QueueLoad {
                url: "about:blank".to_string(),
                frame_target: "_top".to_string(),
            })
            .unwrap();
        drop(proxy);

        let mut dispatcher = handle.join().unwrap();
        let journal = dispatcher.take_journal().unwrap();
        assert_eq!(journal.len(), 5);

        let mut page = FakePage::default();
        let mut controller = FakeController::default();
        let last = ReplayEngine::replay_from(&journal, 0, &mut page, &mut controller).unwrap();

        assert_eq!(last, 5);
        let (live_page, live_controller) = dispatcher.targets();
        assert_eq!(page.clicks, live_page.clicks);
        assert_eq!(controller.scripts, live_controller.scripts);
        assert_eq!(controller.loads, live_controller.loads);
        assert!(controller.window_is_key);
    }
}
