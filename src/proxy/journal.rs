/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Journal trait and in-memory implementation for dispatch event storage.
//!
//! A journal is an append-only log of [`DispatchEvent`]s. It captures a
//! test session exactly as the owner thread saw it, so the session can be
//! inspected and replayed onto fresh targets. Journals live in memory only.

use super::event::DispatchEvent;
use super::replay::ReplayError;

/// Append-only event log for [`DispatchEvent`]s.
///
/// Implementations must preserve insertion order and reject events whose
/// sequence number does not increase. The journal is the source of truth
/// for [`ReplayEngine`] operations.
///
/// [`ReplayEngine`]: super::replay::ReplayEngine
pub trait Journal {
    /// Appends a new event to the journal.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::OutOfOrder`] if the event's sequence number is
    /// not greater than the last stored one.
    fn append(&mut self, event: DispatchEvent) -> Result<(), ReplayError>;

    /// Returns an iterator over all events with `sequence_num >= from_sequence`.
    ///
    /// Events are yielded in ascending sequence order.
    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &DispatchEvent> + '_;

    /// Returns an iterator over events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// Events are yielded in ascending sequence order.
    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &DispatchEvent> + '_;

    /// Returns the total number of events stored.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` if no events have been appended.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sequence number of the last event, or `None` if empty.
    #[must_use]
    fn last_sequence(&self) -> Option<u64>;
}

/// In-memory implementation of [`Journal`].
///
/// Stores all events in a `Vec` in insertion order.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::journal::{InMemoryJournal, Journal};
/// use callback_proxy::proxy::{DispatchEvent, ProxyCommand, ProxyId};
///
/// let mut journal = InMemoryJournal::new();
/// assert!(journal.is_empty());
///
/// let event = DispatchEvent::new(1, 0, ProxyId::new(), ProxyCommand::MouseDown);
/// journal.append(event).ok();
/// assert_eq!(journal.len(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryJournal {
    events: Vec<DispatchEvent>,
}

impl InMemoryJournal {
    /// Creates a new empty in-memory journal.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Creates a new in-memory journal with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Returns a slice of all stored events.
    #[must_use]
    pub fn events(&self) -> &[DispatchEvent] {
        &self.events
    }
}

impl Journal for InMemoryJournal {
    fn append(&mut self, event: DispatchEvent) -> Result<(), ReplayError> {
        if let Some(last) = self.last_sequence()
            && event.sequence_num <= last
        {
            return Err(ReplayError::OutOfOrder {
                last_sequence: last,
                found: event.sequence_num,
            });
        }
        self.events.push(event);
        Ok(())
    }

    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &DispatchEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence)
    }

    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &DispatchEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence && e.sequence_num <= to_sequence)
    }

    #[inline]
    fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    fn last_sequence(&self) -> Option<u64> {
        self.events.last().map(|e| e.sequence_num)
    }
}
