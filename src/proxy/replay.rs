/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Deterministic replay engine for dispatch journals.
//!
//! [`ReplayEngine`] reads [`DispatchEvent`]s from a [`Journal`] and applies
//! each command, in sequence order, to a pair of targets. Replaying a journal
//! onto fresh targets reproduces the session the owner thread originally saw.
//!
//! # Examples
//!
//! ```
//! use callback_proxy::proxy::journal::InMemoryJournal;
//! use callback_proxy::proxy::replay::ReplayEngine;
//! use callback_proxy::proxy::{Dispatcher, EventSender, ProxyConfig, RecordingTarget};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let live = RecordingTarget::new();
//! let config = ProxyConfig::default().with_journal(true);
//! let (mut proxy, mut dispatcher) = Dispatcher::with_config(live.clone(), live, config);
//! proxy.mouse_click();
//! dispatcher.dispatch_pending();
//!
//! let journal: InMemoryJournal = dispatcher.take_journal().unwrap_or_default();
//! let mut target = RecordingTarget::new();
//! let last_seq = ReplayEngine::replay_from(&journal, 0, &mut target.clone(), &mut target)?;
//! println!("Replayed up to sequence {last_seq}");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use super::capability::{EventSender, LayoutTestController};
use super::command::ProxyCommand;
use super::event::DispatchEvent;
use super::journal::Journal;
use super::recording::RecordingTarget;
use thiserror::Error;

/// Errors that can occur while journaling or replaying.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The journal contains no events to replay.
    #[error("journal is empty, nothing to replay")]
    EmptyJournal,

    /// The requested starting sequence number exceeds the journal's last entry.
    #[error("invalid from_sequence {from_sequence}: journal last sequence is {last_sequence}")]
    InvalidSequence {
        /// The sequence number requested.
        from_sequence: u64,
        /// The last sequence number in the journal.
        last_sequence: u64,
    },

    /// A gap was detected between expected and found sequence numbers.
    #[error("sequence gap detected: expected {expected}, found {found}")]
    SequenceGap {
        /// The expected next sequence number.
        expected: u64,
        /// The actual sequence number found.
        found: u64,
    },

    /// An appended event did not advance the sequence.
    #[error("out-of-order append: last sequence is {last_sequence}, found {found}")]
    OutOfOrder {
        /// The last sequence number already stored.
        last_sequence: u64,
        /// The sequence number of the rejected event.
        found: u64,
    },
}

/// Stateless replay engine that re-applies a [`Journal`] to targets.
///
/// All methods are associated functions; use it as a namespace.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replays all events from `from_sequence` onwards onto the targets.
    ///
    /// Returns the sequence number of the last event applied.
    ///
    /// # Arguments
    ///
    /// * `journal` - the event source
    /// * `from_sequence` - first sequence number to include (inclusive); pass `0` for full replay
    /// * `events` - event-injection target
    /// * `controller` - test-control target
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    /// - [`ReplayError::SequenceGap`] if consecutive events are not contiguous
    pub fn replay_from<E, L>(
        journal: &impl Journal,
        from_sequence: u64,
        events: &mut E,
        controller: &mut L,
    ) -> Result<u64, ReplayError>
    where
        E: EventSender + ?Sized,
        L: LayoutTestController + ?Sized,
    {
        Self::replay_from_with_progress(journal, from_sequence, events, controller, |_, _| {})
    }

    /// Replays events with a progress callback invoked after each applied event.
    ///
    /// The callback receives `(events_applied, current_sequence)`.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from). Events before a gap have
    /// already been applied when the error is returned.
    pub fn replay_from_with_progress<E, L>(
        journal: &impl Journal,
        from_sequence: u64,
        events: &mut E,
        controller: &mut L,
        progress: impl Fn(u64, u64),
    ) -> Result<u64, ReplayError>
    where
        E: EventSender + ?Sized,
        L: LayoutTestController + ?Sized,
    {
        Self::check_bounds(journal, from_sequence)?;

        let mut last_seq: Option<u64> = None;
        let mut count = 0u64;

        for event in journal.read_from(from_sequence) {
            if let Some(prev) = last_seq
                && event.sequence_num != prev + 1
            {
                return Err(ReplayError::SequenceGap {
                    expected: prev + 1,
                    found: event.sequence_num,
                });
            }

            event.command.apply(events, controller);
            last_seq = Some(event.sequence_num);
            count = count.saturating_add(1);
            progress(count, event.sequence_num);
        }

        Ok(last_seq.unwrap_or(0))
    }

    /// Returns the events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// Nothing is applied; this is a pure slice of the journal.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    pub fn replay_range(
        journal: &impl Journal,
        from_sequence: u64,
        to_sequence: u64,
    ) -> Result<Vec<&DispatchEvent>, ReplayError> {
        Self::check_bounds(journal, from_sequence)?;
        Ok(journal.read_range(from_sequence, to_sequence).collect())
    }

    /// Replays the full journal onto a recorder and compares the calls it
    /// receives with `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn verify(journal: &impl Journal, expected: &[ProxyCommand]) -> Result<bool, ReplayError> {
        let recorder = RecordingTarget::new();
        Self::replay_from(journal, 0, &mut recorder.clone(), &mut recorder.clone())?;
        Ok(recorder.calls() == expected)
    }

    fn check_bounds(journal: &impl Journal, from_sequence: u64) -> Result<(), ReplayError> {
        let Some(last_sequence) = journal.last_sequence() else {
            return Err(ReplayError::EmptyJournal);
        };

        if from_sequence > last_sequence {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence,
            });
        }

        Ok(())
    }
}
