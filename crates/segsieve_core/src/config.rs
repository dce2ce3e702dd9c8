//! Sieve engine configuration.

use crate::error::{CoreError, CoreResult};
use crate::Number;
use serde::Serialize;

/// Default segment width: 128 Ki candidates per block.
pub const DEFAULT_BLOCK_WIDTH: Number = 128 * 1024;

/// Order in which segment blocks reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    /// Blocks are appended as workers finish them. The file is sorted only
    /// within each block.
    #[default]
    Completion,
    /// Blocks are appended in ascending segment order, so the whole stream
    /// is sorted. Workers sieve a batch of segments in parallel, then the
    /// batch is written in order before the next one starts.
    Ascending,
}

/// Configuration for a [`crate::SegmentedSieve`].
#[derive(Debug, Clone)]
pub struct SieveConfig {
    /// Number of candidates covered by one segment.
    pub block_width: Number,

    /// Whether segments run on several worker threads.
    pub parallel: bool,

    /// Worker count when `parallel` is set. `None` uses the number of
    /// logical processors.
    pub threads: Option<usize>,

    /// Order of blocks in the output stream.
    pub order: OutputOrder,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            block_width: DEFAULT_BLOCK_WIDTH,
            parallel: true,
            threads: None,
            order: OutputOrder::Completion,
        }
    }
}

impl SieveConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment width.
    #[must_use]
    pub const fn block_width(mut self, width: Number) -> Self {
        self.block_width = width;
        self
    }

    /// Enables or disables parallel sieving.
    #[must_use]
    pub const fn parallel(mut self, value: bool) -> Self {
        self.parallel = value;
        self
    }

    /// Sets an explicit worker count for parallel runs.
    #[must_use]
    pub const fn threads(mut self, count: usize) -> Self {
        self.threads = Some(count);
        self
    }

    /// Sets the output order.
    #[must_use]
    pub const fn order(mut self, order: OutputOrder) -> Self {
        self.order = order;
        self
    }

    /// Checks that the configuration can drive an engine.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a non-positive block width or
    /// a zero thread count.
    pub fn validate(&self) -> CoreResult<()> {
        if self.block_width < 1 {
            return Err(CoreError::invalid_config(format!(
                "block width must be positive, got {}",
                self.block_width
            )));
        }
        if self.threads == Some(0) {
            return Err(CoreError::invalid_config("thread count must be at least 1"));
        }
        Ok(())
    }

    /// Number of workers a run with this configuration uses.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if !self.parallel {
            return 1;
        }
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SieveConfig::default();
        assert_eq!(config.block_width, 131_072);
        assert!(config.parallel);
        assert_eq!(config.threads, None);
        assert_eq!(config.order, OutputOrder::Completion);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = SieveConfig::new()
            .block_width(64)
            .threads(3)
            .order(OutputOrder::Ascending);

        assert_eq!(config.block_width, 64);
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.order, OutputOrder::Ascending);
    }

    #[test]
    fn sequential_uses_one_worker() {
        let config = SieveConfig::new().threads(8).parallel(false);
        assert_eq!(config.worker_count(), 1);
    }

    #[test]
    fn parallel_defaults_to_processor_count() {
        assert!(SieveConfig::new().worker_count() >= 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SieveConfig::new().block_width(0).validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SieveConfig::new().block_width(-5).validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SieveConfig::new().threads(0).validate(),
            Err(CoreError::InvalidConfig { .. })
        ));
    }
}
