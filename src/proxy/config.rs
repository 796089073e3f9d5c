/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Proxy configuration.

use super::error::ProxyError;
use serde::{Deserialize, Serialize};

/// Default name given to a spawned owner thread.
pub const DEFAULT_THREAD_NAME: &str = "callback-proxy-owner";

/// Default number of journal entries pre-allocated when journaling is on.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;

/// Configuration for a proxy and its dispatcher.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Examples
///
/// ```
/// use callback_proxy::proxy::ProxyConfig;
///
/// let config = ProxyConfig::from_json(r#"{ "record_journal": true }"#).unwrap();
/// assert!(config.record_journal);
/// assert_eq!(config.thread_name, "callback-proxy-owner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Name of the owner thread created by [`Dispatcher::spawn`].
    ///
    /// [`Dispatcher::spawn`]: super::Dispatcher::spawn
    pub thread_name: String,

    /// Whether every dispatched command is appended to an in-memory journal.
    pub record_journal: bool,

    /// Initial journal capacity.
    pub journal_capacity: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            record_journal: false,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl ProxyConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Config`] if the input is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(input: &str) -> Result<Self, ProxyError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Sets the owner thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Enables or disables journaling of dispatched commands.
    #[must_use]
    pub fn with_journal(mut self, enabled: bool) -> Self {
        self.record_journal = enabled;
        self
    }

    /// Sets the initial journal capacity.
    #[must_use]
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }
}
