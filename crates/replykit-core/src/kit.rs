// Rust guideline compliant 2026-10-16

//! Shared state handed to every adapter: config snapshot source and logger.

use crate::config::{ConfigHandle, LoggingPatch, RuntimeConfig};
use crate::logger::{Logger, TracingLogger};
use crate::Result;
use std::sync::Arc;

/// Transport-wide state shared by HTTP and socket responders.
///
/// Cloning is cheap; clones observe the same configuration and logger.
#[derive(Clone)]
pub struct Replykit {
    config: ConfigHandle,
    logger: Arc<dyn Logger>,
}

impl Replykit {
    /// Creates shared state with an explicit logger.
    ///
    /// The logger receives the config's logging policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: RuntimeConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        config.validate()?;
        logger.update_config(&LoggingPatch::from(&config.logging));
        Ok(Self {
            config: ConfigHandle::new(config),
            logger,
        })
    }

    /// Creates shared state logging through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_tracing(config: RuntimeConfig) -> Result<Self> {
        let logger = Arc::new(TracingLogger::new(config.logging.clone()));
        Self::new(config, logger)
    }

    /// Current configuration snapshot.
    #[must_use]
    pub fn config(&self) -> Arc<RuntimeConfig> {
        self.config.snapshot()
    }

    /// Underlying swappable handle.
    #[must_use]
    pub fn config_handle(&self) -> &ConfigHandle {
        &self.config
    }

    /// Shared logger.
    #[must_use]
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    /// Changes the configuration for responses constructed afterwards.
    ///
    /// The new logging policy is pushed to the logger. Responders that already
    /// captured a snapshot keep it.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed configuration fails validation.
    pub fn update_config<F>(&self, change: F) -> Result<Arc<RuntimeConfig>>
    where
        F: FnOnce(&mut RuntimeConfig),
    {
        let next = self.config.update(change)?;
        self.logger.update_config(&LoggingPatch::from(&next.logging));
        Ok(next)
    }
}
