/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Tests for FIFO delivery and sequence numbering.

#[cfg(test)]
mod tests {
    use crate::proxy::{
        CallbackProxy, Dispatcher, EventSender, LayoutTestController, ProxyCommand, ProxyConfig,
        RecordingTarget,
    };
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_mouse_move_then_up_scenario() {
        let target = RecordingTarget::new();
        let (mut proxy, mut dispatcher) = Dispatcher::new(target.clone(), target.clone());

        proxy.mouse_move_to(10, 20);
        proxy.mouse_up();

        assert_eq!(dispatcher.dispatch_pending(), 2);
        assert_eq!(
            target.calls(),
            vec![ProxyCommand::MouseMoveTo { x: 10, y: 20 }, ProxyCommand::MouseUp]
        );
    }

    #[test]
    fn test_fifo_across_both_capabilities() {
        let target = RecordingTarget::new();
        let (mut proxy, handle) =
            CallbackProxy::spawn(target.clone(), target.clone(), ProxyConfig::default())
                .unwrap();

        proxy.dump_as_text();
        proxy.key_down("a");
        proxy.queue_reload();
        proxy.leap_forward(50);
        proxy.wait_until_done();
        proxy.mouse_click();
        proxy.notify_done();
        proxy.shutdown().unwrap();

        handle.join().unwrap();

        assert_eq!(
            target.calls(),
            vec![
                ProxyCommand::DumpAsText,
                ProxyCommand::KeyDown {
                    character: "a".to_string()
                },
                ProxyCommand::QueueReload,
                ProxyCommand::LeapForward { milliseconds: 50 },
                ProxyCommand::WaitUntilDone,
                ProxyCommand::MouseClick,
                ProxyCommand::NotifyDone,
            ]
        );
    }

    #[test]
    fn test_monotonic_sequence_numbers() {
        let target = RecordingTarget::new();
        let (mut proxy, mut dispatcher) = Dispatcher::new(target.clone(), target);

        let sequences = Arc::new(Mutex::new(Vec::new()));
        let sequences_clone = sequences.clone();

        dispatcher.add_listener(move |event| {
            sequences_clone.lock().unwrap().push(event.sequence_num);
        });

        let handle = dispatcher.spawn().unwrap();

        for i in 0..1000 {
            proxy.queue_back_navigation(i);
        }
        drop(proxy);

        let dispatcher = handle.join().unwrap();
        assert_eq!(dispatcher.summary().dispatched, 1000);
        assert_eq!(dispatcher.summary().last_sequence, Some(1000));

        let seq_vec = sequences.lock().unwrap();
        assert_eq!(seq_vec.len(), 1000);

        for i in 0..seq_vec.len() {
            assert_eq!(seq_vec[i], (i + 1) as u64);
        }
    }

    #[test]
    fn test_events_carry_commands_in_order() {
        let target = RecordingTarget::new();
        let (proxy, mut dispatcher) = Dispatcher::new(target.clone(), target);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        dispatcher.add_listener(move |event| {
            seen_clone.lock().unwrap().push(event.command.clone());
        });

        for how_far in 1..=5 {
            proxy
                .submit(ProxyCommand::QueueForwardNavigation { how_far })
                .unwrap();
        }
        dispatcher.dispatch_pending();

        let seen = seen.lock().unwrap();
        let expected: Vec<_> = (1..=5)
            .map(|how_far| ProxyCommand::QueueForwardNavigation { how_far })
            .collect();
        assert_eq!(*seen, expected);
    }

    #[test]
    fn test_timestamps_monotonic() {
        let target = RecordingTarget::new();
        let (mut proxy, mut dispatcher) = Dispatcher::new(target.clone(), target);

        let timestamps = Arc::new(Mutex::new(Vec::new()));
        let timestamps_clone = timestamps.clone();

        dispatcher.add_listener(move |event| {
            timestamps_clone.lock().unwrap().push(event.timestamp_ns);
        });

        for _ in 0..100 {
            proxy.test_repaint();
        }
        dispatcher.dispatch_pending();

        let ts_vec = timestamps.lock().unwrap();
        assert_eq!(ts_vec.len(), 100);

        for i in 0..ts_vec.len() - 1 {
            assert!(ts_vec[i + 1] >= ts_vec[i], "Timestamps must be monotonic");
        }
    }

    #[test]
    fn test_dispatch_pending_leaves_later_commands() {
        let target = RecordingTarget::new();
        let (mut proxy, mut dispatcher) = Dispatcher::new(target.clone(), target.clone());

        assert_eq!(dispatcher.dispatch_pending(), 0);
        assert!(!dispatcher.is_stopped());

        proxy.display();
        proxy.display();
        assert_eq!(proxy.pending(), 2);
        assert_eq!(dispatcher.dispatch_pending(), 2);
        assert_eq!(proxy.pending(), 0);

        proxy.mouse_down();
        assert_eq!(dispatcher.dispatch_pending(), 1);
        assert_eq!(target.len(), 3);
        assert_eq!(dispatcher.summary().last_sequence, Some(3));
    }
}
