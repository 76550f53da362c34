//! Dispatcher configuration.

use std::time::Duration;

/// Tunables of a [`MetadataDispatcher`](super::MetadataDispatcher).
///
/// # Example
///
/// ```rust,ignore
/// let config = DispatchConfig::new().with_handler_timeout(Duration::from_secs(5));
/// let dispatcher = MetadataDispatcher::with_config(registry, catalog, config);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    handler_timeout: Option<Duration>,
}

impl DispatchConfig {
    /// The default configuration: no per-handler timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every handler callback at `timeout`.
    ///
    /// Requires a Tokio runtime at dispatch time.
    #[cfg(feature = "timeout")]
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = Some(timeout);
        self
    }

    /// The per-handler timeout, if any.
    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout
    }
}
